use serde::{Deserialize, Serialize};
use std::fmt;

/// Longest ticker symbol accepted by the pipeline.
pub const MAX_SYMBOL_LEN: usize = 32;

/// Reasons a requested symbol is rejected before any work starts.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SymbolError {
    #[error("symbol required")]
    Missing,
    #[error("invalid symbol: {0}")]
    Invalid(String),
}

/// A validated ticker symbol (e.g. `ACME`, `BRK.B`, `^GSPC`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(String);

impl Symbol {
    /// Validates a raw query value.
    ///
    /// Surrounding whitespace is ignored. The remainder must be 1 to
    /// [`MAX_SYMBOL_LEN`] characters of ASCII alphanumerics or `. - ^ =`.
    pub fn parse(raw: Option<&str>) -> Result<Self, SymbolError> {
        let trimmed = raw.map(str::trim).unwrap_or_default();
        if trimmed.is_empty() {
            return Err(SymbolError::Missing);
        }

        let valid_chars = trimmed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '^' | '='));
        if trimmed.len() > MAX_SYMBOL_LEN || !valid_chars {
            return Err(SymbolError::Invalid(trimmed.to_string()));
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque identifier of one pipeline run and of its stored result.
///
/// Generated before the first event is written so it can be returned in
/// response metadata. The format is `<symbol>-<unix ms>-<8 hex digits>`; the
/// random suffix keeps two runs for the same symbol in the same millisecond
/// apart. Callers must treat the value as opaque.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReportId(String);

impl ReportId {
    pub fn generate(symbol: &Symbol) -> Self {
        Self(format!(
            "{}-{}-{:08x}",
            symbol,
            now_ms(),
            rand::random::<u32>()
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for ReportId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for ReportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The durable unit written once per successful run.
///
/// Serialized as `{"symbol": .., "created": <unix ms>, "content": ..}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRecord {
    pub symbol: String,
    /// Creation time in milliseconds since the Unix epoch.
    pub created: u64,
    pub content: String,
}

impl ReportRecord {
    /// Builds a record stamped with the current time.
    pub fn new(symbol: &Symbol, content: String) -> Self {
        Self {
            symbol: symbol.to_string(),
            created: now_ms(),
            content,
        }
    }
}

/// Listing projection of a [`ReportRecord`]; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub id: ReportId,
    pub symbol: String,
    pub created: u64,
}

impl ReportSummary {
    pub fn project(id: ReportId, record: &ReportRecord) -> Self {
        Self {
            id,
            symbol: record.symbol.clone(),
            created: record.created,
        }
    }
}

/// Current system time in milliseconds.
pub fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
