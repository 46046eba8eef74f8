//! Report Query Surface
//!
//! Read-side operations behind the report listing and report download. Both
//! read straight from the store and never observe in-flight
//! runs: a freshly issued id stays "not found" until its write lands.

use super::store::ReportStore;
use super::types::{ReportId, ReportRecord, ReportSummary};
use crate::storage::StoreError;

impl ReportStore {
    /// Lists a summary of every stored report.
    ///
    /// Entries that cannot be read back or decoded are skipped with a warning;
    /// only a failure to enumerate keys is an error.
    /// Order follows the backend and is unspecified.
    pub async fn list_summaries(&self) -> Result<Vec<ReportSummary>, StoreError> {
        let keys = self.kv.list().await?;
        let mut summaries = Vec::with_capacity(keys.len());

        for key in keys {
            let value_json = match self.kv.get(&key).await {
                Ok(Some(value_json)) => value_json,
                Ok(None) => {
                    tracing::debug!("Key {} disappeared during listing", key);
                    continue;
                }
                Err(e) => {
                    tracing::warn!("Skipping unreadable report {}: {}", key, e);
                    continue;
                }
            };

            match Self::decode(&key, &value_json) {
                Ok(record) => summaries.push(ReportSummary::project(ReportId::from(key), &record)),
                Err(e) => tracing::warn!("Skipping malformed report: {}", e),
            }
        }

        Ok(summaries)
    }

    /// Looks up one report. `Ok(None)` is the ordinary not-found outcome.
    pub async fn get_by_id(&self, id: &ReportId) -> Result<Option<ReportRecord>, StoreError> {
        match self.kv.get(id.as_str()).await? {
            Some(value_json) => Self::decode(id.as_str(), &value_json).map(Some),
            None => Ok(None),
        }
    }
}
