use tracing::debug;

use crate::aggregate::{Aggregate, Tally};
use crate::sensu::{BackendError, SensuClient, Session};

/// Pulls events namespace by namespace and folds the aggregate's share of
/// them into a single tally.
pub struct EventCollector<'a> {
    client: &'a SensuClient,
    aggregate: &'a Aggregate,
}

impl<'a> EventCollector<'a> {
    pub fn new(client: &'a SensuClient, aggregate: &'a Aggregate) -> Self {
        Self { client, aggregate }
    }

    /// Selected events of one namespace, folded into a fresh tally.
    pub async fn collect_namespace(&self, session: &Session, namespace: &str) -> Result<Tally, BackendError> {
        let events = self.client.list_events(session, namespace).await?;
        let fetched = events.len();
        let selected = self.aggregate.select(events);
        debug!(
            "namespace {}: {} events fetched, {} selected",
            namespace,
            fetched,
            selected.len()
        );
        Ok(Tally::from_events(&selected))
    }

    /// Stops at the first namespace that fails; no partial tally is returned.
    pub async fn collect(&self, session: &Session, namespaces: &[String]) -> Result<Tally, BackendError> {
        let mut tally = Tally::new();
        for ns in namespaces {
            tally.merge(self.collect_namespace(session, ns).await?);
        }
        Ok(tally)
    }
}
