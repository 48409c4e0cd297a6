use serde::{Deserialize, Serialize};

use crate::LookupProvider;

/// What happened to one lookup. `NotConfigured` means no call was made.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LookupOutcome<T> {
    NotConfigured,
    Found { records: Vec<T> },
    NoResults,
    Failed { reason: String },
}

impl<T> LookupOutcome<T> {
    /// Flattened view: empty for every variant except `Found`.
    pub fn records(&self) -> &[T] {
        match self {
            LookupOutcome::Found { records } => records,
            _ => &[],
        }
    }

    pub fn into_records(self) -> Vec<T> {
        match self {
            LookupOutcome::Found { records } => records,
            _ => vec![],
        }
    }

    pub fn is_configured(&self) -> bool {
        !matches!(self, LookupOutcome::NotConfigured)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, LookupOutcome::Failed { .. })
    }
}

/// Run `provider` if it is configured and fold the result into an outcome.
/// Never fails; errors are logged and reported as `Failed`.
pub async fn lookup<P>(provider: &P, query: &str) -> LookupOutcome<P::Record>
where
    P: LookupProvider + ?Sized,
{
    if !provider.is_configured() {
        tracing::debug!(provider = provider.name(), "lookup: not configured, skipped");
        return LookupOutcome::NotConfigured;
    }

    match provider.search(query).await {
        Ok(records) if records.is_empty() => {
            tracing::debug!(provider = provider.name(), "lookup: no results");
            LookupOutcome::NoResults
        }
        Ok(records) => {
            tracing::debug!(provider = provider.name(), count = records.len(), "lookup: ok");
            LookupOutcome::Found { records }
        }
        Err(e) => {
            tracing::warn!(provider = provider.name(), error = %e, "lookup: failed");
            LookupOutcome::Failed { reason: e.to_string() }
        }
    }
}
