use std::collections::BTreeSet;
use std::fmt;

use crate::types::{Event, Status};

/// Per-run counters over the selected events of every namespace.
///
/// `total` always equals `ok + warning + critical + unknown`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Tally {
    pub entities: BTreeSet<String>,
    pub checks: BTreeSet<String>,
    pub ok: u64,
    pub warning: u64,
    pub critical: u64,
    pub unknown: u64,
    pub total: u64,
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_events<'a, I>(events: I) -> Self
    where
        I: IntoIterator<Item = &'a Event>,
    {
        let mut tally = Self::new();
        tally.extend(events);
        tally
    }

    pub fn record(&mut self, event: &Event) {
        self.entities.insert(event.entity.meta.name.clone());
        self.checks.insert(event.check.meta.name.clone());

        match event.check.status() {
            Status::Ok => self.ok += 1,
            Status::Warning => self.warning += 1,
            Status::Critical => self.critical += 1,
            Status::Unknown => self.unknown += 1,
        }
        self.total += 1;
    }

    /// Folds another tally into this one, as if its events had been recorded here.
    pub fn merge(&mut self, other: Tally) {
        self.entities.extend(other.entities);
        self.checks.extend(other.checks);
        self.ok += other.ok;
        self.warning += other.warning;
        self.critical += other.critical;
        self.unknown += other.unknown;
        self.total += other.total;
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn check_count(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

impl<'a> Extend<&'a Event> for Tally {
    fn extend<I: IntoIterator<Item = &'a Event>>(&mut self, events: I) {
        for event in events {
            self.record(event);
        }
    }
}

impl fmt::Display for Tally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "entities={} checks={} ok={} warning={} critical={} unknown={} total={}",
            self.entity_count(),
            self.check_count(),
            self.ok,
            self.warning,
            self.critical,
            self.unknown,
            self.total
        )
    }
}
