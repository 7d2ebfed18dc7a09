use std::fmt;

use crate::aggregate::Tally;
use crate::types::{Status, ThresholdConfig};

/// Final judgement over an aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub status: Status,
    pub message: String,
}

impl Verdict {
    fn new(status: Status, message: impl Into<String>) -> Self {
        Self { status, message: message.into() }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.status, self.message)
    }
}

/// Share of OK events, truncated toward zero. `None` for an empty tally.
pub fn percent_ok(tally: &Tally) -> Option<u64> {
    if tally.total == 0 {
        return None;
    }
    Some(tally.ok * 100 / tally.total)
}

/// Judges a tally against the thresholds.
///
/// Rules are tried in a fixed order and the first one that fires wins:
/// empty aggregate, critical percent, warning percent, critical count,
/// warning count. Percent thresholds fire when the OK share is at or below
/// them; count thresholds fire when the count reaches them. Disabled (zero)
/// thresholds never fire.
pub fn evaluate(tally: &Tally, thresholds: &ThresholdConfig) -> Verdict {
    let Some(percent) = percent_ok(tally) else {
        return Verdict::new(Status::Warning, "no events matched the aggregate");
    };

    if let Some(crit) = ThresholdConfig::enabled(thresholds.crit_percent) {
        if percent <= u64::from(crit) {
            return Verdict::new(
                Status::Critical,
                format!("{}% or less of events are OK ({}%)", crit, percent),
            );
        }
    }

    if let Some(warn) = ThresholdConfig::enabled(thresholds.warn_percent) {
        if percent <= u64::from(warn) {
            return Verdict::new(
                Status::Warning,
                format!("{}% or less of events are OK ({}%)", warn, percent),
            );
        }
    }

    if let Some(crit) = ThresholdConfig::enabled(thresholds.crit_count) {
        if tally.critical >= u64::from(crit) {
            return Verdict::new(
                Status::Critical,
                format!("{} or more events are in a critical state ({})", crit, tally.critical),
            );
        }
    }

    if let Some(warn) = ThresholdConfig::enabled(thresholds.warn_count) {
        if tally.warning >= u64::from(warn) {
            return Verdict::new(
                Status::Warning,
                format!("{} or more events are in a warning state ({})", warn, tally.warning),
            );
        }
    }

    Verdict::new(Status::Ok, format!("everything is OK ({})", tally))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tally(ok: u64, warning: u64, critical: u64, unknown: u64) -> Tally {
        Tally {
            ok,
            warning,
            critical,
            unknown,
            total: ok + warning + critical + unknown,
            ..Default::default()
        }
    }

    fn thresholds(warn_percent: u32, crit_percent: u32, warn_count: u32, crit_count: u32) -> ThresholdConfig {
        ThresholdConfig { warn_percent, crit_percent, warn_count, crit_count }
    }

    #[test]
    fn test_percent_ok_truncates() {
        assert_eq!(percent_ok(&tally(2, 1, 0, 0)), Some(66));
        assert_eq!(percent_ok(&tally(1, 2, 0, 0)), Some(33));
        assert_eq!(percent_ok(&tally(29, 71, 0, 0)), Some(29));
        assert_eq!(percent_ok(&tally(0, 0, 5, 0)), Some(0));
        assert_eq!(percent_ok(&tally(7, 0, 0, 0)), Some(100));
        assert_eq!(percent_ok(&Tally::default()), None);
    }

    #[test]
    fn test_empty_tally_warns() {
        let verdict = evaluate(&Tally::default(), &thresholds(80, 50, 1, 1));
        assert_eq!(verdict.status, Status::Warning);
        assert!(verdict.message.contains("no events"));
    }

    #[test]
    fn test_percent_thresholds() {
        let t = tally(9, 1, 0, 0);

        let verdict = evaluate(&t, &thresholds(80, 50, 0, 0));
        assert_eq!(verdict.status, Status::Ok);

        let verdict = evaluate(&t, &thresholds(95, 50, 0, 0));
        assert_eq!(verdict.status, Status::Warning);
        assert!(verdict.message.contains("95%"));
        assert!(verdict.message.contains("(90%)"));

        // Boundary is inclusive
        let verdict = evaluate(&t, &thresholds(0, 90, 0, 0));
        assert_eq!(verdict.status, Status::Critical);
        assert!(verdict.message.contains("(90%)"));
    }

    #[test]
    fn test_count_thresholds() {
        let t = tally(0, 0, 3, 0);
        let verdict = evaluate(&t, &thresholds(0, 0, 0, 3));
        assert_eq!(verdict.status, Status::Critical);
        assert!(verdict.message.contains("(3)"));

        let verdict = evaluate(&t, &thresholds(0, 0, 0, 4));
        assert_eq!(verdict.status, Status::Ok);

        let t = tally(8, 2, 0, 0);
        let verdict = evaluate(&t, &thresholds(0, 0, 2, 0));
        assert_eq!(verdict.status, Status::Warning);
        assert!(verdict.message.contains("warning state (2)"));
    }

    #[test]
    fn test_critical_wins_over_warning() {
        // Critical percent breached together with warning count
        let t = tally(1, 5, 4, 0);
        let verdict = evaluate(&t, &thresholds(0, 20, 1, 0));
        assert_eq!(verdict.status, Status::Critical);

        // Both percent tiers breached
        let verdict = evaluate(&t, &thresholds(50, 20, 0, 0));
        assert_eq!(verdict.status, Status::Critical);

        // Warning percent is checked before critical count
        let verdict = evaluate(&t, &thresholds(50, 0, 0, 1));
        assert_eq!(verdict.status, Status::Warning);
    }

    #[test]
    fn test_zero_disables_threshold() {
        // Zero percent OK would breach a zero threshold if it were live
        let t = tally(0, 0, 0, 4);
        let verdict = evaluate(&t, &ThresholdConfig::default());
        assert_eq!(verdict.status, Status::Ok);
        assert!(verdict.message.contains("everything is OK"));
        assert!(verdict.message.contains("unknown=4"));
    }

    #[test]
    fn test_display() {
        let verdict = evaluate(&tally(1, 0, 0, 0), &ThresholdConfig::default());
        assert!(verdict.to_string().starts_with("OK: everything is OK"));
    }
}
