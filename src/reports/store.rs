use super::types::{ReportId, ReportRecord};
use crate::storage::{KvStore, StoreError};

use std::sync::Arc;

/// Typed facade over the key/value capability.
///
/// One entry per [`ReportId`], the value being the JSON-serialized
/// [`ReportRecord`]. The facade owns encoding and decoding; the backend only
/// ever sees strings.
#[derive(Clone)]
pub struct ReportStore {
    pub(super) kv: Arc<dyn KvStore>,
}

impl ReportStore {
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        Self { kv }
    }

    /// Writes `record` under `id`. Records are immutable, so writing an id
    /// twice fails with [`StoreError::KeyExists`].
    pub async fn put(&self, id: &ReportId, record: &ReportRecord) -> Result<(), StoreError> {
        let value_json = serde_json::to_string(record).map_err(StoreError::Encode)?;
        self.kv.put(id.as_str(), value_json).await?;

        tracing::info!(
            "Stored report {} ({} bytes of content)",
            id,
            record.content.len()
        );
        Ok(())
    }

    pub(super) fn decode(key: &str, value_json: &str) -> Result<ReportRecord, StoreError> {
        serde_json::from_str(value_json).map_err(|source| StoreError::Corrupt {
            key: key.to_string(),
            source,
        })
    }
}
