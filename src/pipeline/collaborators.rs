//! External Collaborator Contracts
//!
//! The pipeline drives three collaborators it does not implement itself. Each
//! is a trait object so the orchestrators can be exercised with local doubles
//! and wired to HTTP providers in production (see `crate::providers`).

use crate::reports::Symbol;

use async_trait::async_trait;
use axum::http::{HeaderMap, StatusCode};
use bytes::Bytes;
use futures_util::stream::BoxStream;

#[derive(Debug, thiserror::Error)]
pub enum CollaboratorError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("collaborator responded with status {0}")]
    Status(u16),
    #[error("malformed response: {0}")]
    Decode(String),
}

/// Opaque structured quote record handed to the analysis generator.
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteSnapshot(pub serde_json::Value);

impl QuoteSnapshot {
    /// The degraded context used when market data cannot be fetched.
    pub fn empty() -> Self {
        Self(serde_json::Value::Object(serde_json::Map::new()))
    }

    pub fn is_empty(&self) -> bool {
        match &self.0 {
            serde_json::Value::Object(map) => map.is_empty(),
            serde_json::Value::Null => true,
            _ => false,
        }
    }
}

/// Market-data provider: one snapshot per symbol.
#[async_trait]
pub trait MarketData: Send + Sync {
    async fn snapshot(&self, symbol: &Symbol) -> Result<QuoteSnapshot, CollaboratorError>;
}

/// Analysis generator returning the full report text in one call.
#[async_trait]
pub trait AnalysisGenerator: Send + Sync {
    async fn generate(
        &self,
        symbol: &Symbol,
        context: &QuoteSnapshot,
    ) -> Result<String, CollaboratorError>;
}

/// Byte stream of an upstream response body.
pub type UpstreamBody = BoxStream<'static, Result<Bytes, CollaboratorError>>;

/// An upstream response whose status and headers have arrived but whose body
/// has not been read yet.
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: UpstreamBody,
}

/// Upstream research endpoint answering with a streamed body.
#[async_trait]
pub trait ResearchUpstream: Send + Sync {
    /// Sends the request and returns as soon as the response head is in.
    /// `Err` means no response was obtained at all.
    async fn open(&self, symbol: &Symbol) -> Result<UpstreamResponse, CollaboratorError>;
}
