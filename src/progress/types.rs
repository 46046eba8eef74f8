use serde::{Deserialize, Serialize};

/// Content type of a newline-delimited JSON event stream.
pub const NDJSON_CONTENT_TYPE: &str = "application/x-ndjson";

/// One unit of the event protocol, written as a single JSON line.
///
/// ```text
/// {"type":"status","message":"Fetching market data...","progress":10}
/// {"type":"report","content":"ACME is a..."}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ProgressEvent {
    /// Informational step update. `progress` is a percentage (0-100) and does
    /// not decrease within one run by convention.
    Status { message: String, progress: u8 },
    /// A chunk (or the whole) of the final report text. Consumers concatenate
    /// report chunks in arrival order.
    Report { content: String },
}

impl ProgressEvent {
    pub fn status(message: impl Into<String>, progress: u8) -> Self {
        Self::Status {
            message: message.into(),
            progress: progress.min(100),
        }
    }

    pub fn report(content: impl Into<String>) -> Self {
        Self::Report {
            content: content.into(),
        }
    }
}
