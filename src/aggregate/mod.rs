// Event selection and status counting
pub mod tally;

pub use tally::Tally;

use crate::parsing::LabelSelector;
use crate::types::Event;

/// The group of events whose combined health is judged as one unit.
#[derive(Debug, Clone, Default)]
pub struct Aggregate {
    pub check_labels: LabelSelector,
    pub entity_labels: LabelSelector,
}

impl Aggregate {
    pub fn new(check_labels: LabelSelector, entity_labels: LabelSelector) -> Self {
        Self { check_labels, entity_labels }
    }

    /// An event belongs to the aggregate when both its check labels and its
    /// entity labels satisfy the respective selectors.
    pub fn matches(&self, event: &Event) -> bool {
        event_matches(event, &self.check_labels, &self.entity_labels)
    }

    /// Keeps the matching events, preserving their order.
    pub fn select(&self, events: Vec<Event>) -> Vec<Event> {
        select_events(events, &self.check_labels, &self.entity_labels)
    }
}

fn event_matches(event: &Event, check_labels: &LabelSelector, entity_labels: &LabelSelector) -> bool {
    // Entity labels are only consulted once the check labels match.
    check_labels.matches(&event.check.meta.labels) && entity_labels.matches(&event.entity.meta.labels)
}

pub fn select_events(
    events: Vec<Event>,
    check_labels: &LabelSelector,
    entity_labels: &LabelSelector,
) -> Vec<Event> {
    events
        .into_iter()
        .filter(|e| event_matches(e, check_labels, entity_labels))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CheckRecord, EntityRecord, ObjectMeta};
    use std::collections::HashMap;

    fn to_map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    fn event(check: &str, check_labels: &[(&str, &str)], entity: &str, entity_labels: &[(&str, &str)]) -> Event {
        Event {
            check: CheckRecord {
                meta: ObjectMeta { name: check.to_string(), labels: to_map(check_labels) },
                status: 0,
            },
            entity: EntityRecord {
                meta: ObjectMeta { name: entity.to_string(), labels: to_map(entity_labels) },
            },
        }
    }

    fn names(events: &[Event]) -> Vec<String> {
        events.iter().map(|e| format!("{}/{}", e.entity.meta.name, e.check.meta.name)).collect()
    }

    #[test]
    fn test_select_requires_both_selectors() {
        let aggregate = Aggregate::new(LabelSelector::parse("aggregate=web"), LabelSelector::parse("env=prod"));
        let events = vec![
            event("http", &[("aggregate", "web")], "web-01", &[("env", "prod")]),
            event("http", &[("aggregate", "web")], "web-02", &[("env", "staging")]),
            event("disk", &[("aggregate", "db")], "db-01", &[("env", "prod")]),
            event("http", &[], "web-03", &[("env", "prod")]),
        ];

        let selected = aggregate.select(events);
        assert_eq!(names(&selected), vec!["web-01/http"]);
    }

    #[test]
    fn test_select_preserves_order() {
        let aggregate = Aggregate::new(LabelSelector::parse("aggregate=web"), LabelSelector::default());
        let events = vec![
            event("c", &[("aggregate", "web")], "e3", &[]),
            event("x", &[("aggregate", "db")], "e2", &[]),
            event("a", &[("aggregate", "web")], "e1", &[]),
            event("b", &[("aggregate", "web")], "e2", &[]),
        ];

        let selected = aggregate.select(events);
        assert_eq!(names(&selected), vec!["e3/c", "e1/a", "e2/b"]);
    }

    #[test]
    fn test_unlabelled_event_needs_empty_selectors() {
        let bare = || event("ping", &[], "host", &[]);

        assert!(Aggregate::default().matches(&bare()));
        assert!(!Aggregate::new(LabelSelector::parse("a=1"), LabelSelector::default()).matches(&bare()));
        assert!(!Aggregate::new(LabelSelector::default(), LabelSelector::parse("a=1")).matches(&bare()));
    }

    #[test]
    fn test_selection_distributes_over_concatenation() {
        let check = LabelSelector::parse("aggregate=web");
        let entity = LabelSelector::parse("region=eu");
        let first = vec![
            event("http", &[("aggregate", "web")], "a", &[("region", "eu")]),
            event("http", &[("aggregate", "web")], "b", &[("region", "us")]),
        ];
        let second = vec![
            event("http", &[("aggregate", "api")], "c", &[("region", "eu")]),
            event("tls", &[("aggregate", "web")], "d", &[("region", "eu")]),
        ];

        let mut joined = first.clone();
        joined.extend(second.clone());
        let together = select_events(joined, &check, &entity);

        let mut separately = select_events(first, &check, &entity);
        separately.extend(select_events(second, &check, &entity));

        assert_eq!(names(&together), names(&separately));
        assert_eq!(names(&together), vec!["a/http", "d/tls"]);
    }
}
