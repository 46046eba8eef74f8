//! Shared test doubles for collaborators and stores.

use crate::pipeline::{
    AnalysisGenerator, CollaboratorError, MarketData, QuoteSnapshot, ResearchUpstream,
    UpstreamResponse,
};
use crate::progress::codec::decode_events;
use crate::progress::{EventStream, ProgressEvent};
use crate::reports::Symbol;
use crate::storage::{KvStore, MemoryStore, StoreError};

use async_trait::async_trait;
use axum::Router;
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use bytes::Bytes;
use futures_util::StreamExt;
use std::net::SocketAddr;
use std::sync::Mutex;

pub fn symbol(raw: &str) -> Symbol {
    Symbol::parse(Some(raw)).unwrap()
}

pub fn acme_quote() -> QuoteSnapshot {
    QuoteSnapshot(serde_json::json!({
        "symbol": "ACME",
        "regularMarketPrice": 42.5,
        "marketCap": 1_000_000_000u64,
    }))
}

/// Binds an ephemeral port on localhost and serves `app` in the background.
pub async fn spawn_server(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// Reads an event stream to its end and decodes every line.
pub async fn collect_events(mut events: EventStream) -> Vec<ProgressEvent> {
    let mut body = Vec::new();
    while let Some(chunk) = events.next().await {
        body.extend_from_slice(&chunk.unwrap());
    }
    decode_events(&String::from_utf8(body).unwrap())
}

// ============================================================
// MARKET DATA
// ============================================================

pub struct StaticMarket(pub QuoteSnapshot);

#[async_trait]
impl MarketData for StaticMarket {
    async fn snapshot(&self, _symbol: &Symbol) -> Result<QuoteSnapshot, CollaboratorError> {
        Ok(self.0.clone())
    }
}

pub struct FailingMarket;

#[async_trait]
impl MarketData for FailingMarket {
    async fn snapshot(&self, _symbol: &Symbol) -> Result<QuoteSnapshot, CollaboratorError> {
        Err(CollaboratorError::Status(503))
    }
}

// ============================================================
// ANALYSIS
// ============================================================

/// Answers `"<symbol> is a..."` and remembers every context it was given.
#[derive(Default)]
pub struct RecordingAnalysis {
    pub contexts: Mutex<Vec<QuoteSnapshot>>,
}

#[async_trait]
impl AnalysisGenerator for RecordingAnalysis {
    async fn generate(
        &self,
        symbol: &Symbol,
        context: &QuoteSnapshot,
    ) -> Result<String, CollaboratorError> {
        self.contexts.lock().unwrap().push(context.clone());
        Ok(format!("{} is a...", symbol))
    }
}

pub struct FailingAnalysis;

#[async_trait]
impl AnalysisGenerator for FailingAnalysis {
    async fn generate(
        &self,
        _symbol: &Symbol,
        _context: &QuoteSnapshot,
    ) -> Result<String, CollaboratorError> {
        Err(CollaboratorError::Status(500))
    }
}

// ============================================================
// STORES
// ============================================================

/// Reads like a normal store but rejects every write.
#[derive(Default)]
pub struct ReadOnlyStore {
    pub inner: MemoryStore,
}

#[async_trait]
impl KvStore for ReadOnlyStore {
    async fn put(&self, _key: &str, _value: String) -> Result<(), StoreError> {
        Err(StoreError::Status(503))
    }

    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.inner.get(key).await
    }

    async fn list(&self) -> Result<Vec<String>, StoreError> {
        self.inner.list().await
    }
}

/// Lists keys it cannot read back.
pub struct FlakyReadStore {
    pub inner: MemoryStore,
    pub unreadable: String,
}

#[async_trait]
impl KvStore for FlakyReadStore {
    async fn put(&self, key: &str, value: String) -> Result<(), StoreError> {
        self.inner.put(key, value).await
    }

    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        if key == self.unreadable {
            return Err(StoreError::Status(504));
        }
        self.inner.get(key).await
    }

    async fn list(&self) -> Result<Vec<String>, StoreError> {
        self.inner.list().await
    }
}

// ============================================================
// UPSTREAM
// ============================================================

/// Upstream that replays a fixed response. `Err` chunks become stream errors.
pub struct ScriptedUpstream {
    pub status: StatusCode,
    pub content_type: &'static str,
    pub chunks: Vec<Result<&'static str, &'static str>>,
}

impl ScriptedUpstream {
    pub fn ok(content_type: &'static str, chunks: Vec<Result<&'static str, &'static str>>) -> Self {
        Self {
            status: StatusCode::OK,
            content_type,
            chunks,
        }
    }
}

#[async_trait]
impl ResearchUpstream for ScriptedUpstream {
    async fn open(&self, _symbol: &Symbol) -> Result<UpstreamResponse, CollaboratorError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(self.content_type),
        );
        headers.insert("x-report-id", HeaderValue::from_static("UPSTREAM-1"));

        let chunks: Vec<Result<Bytes, CollaboratorError>> = self
            .chunks
            .iter()
            .map(|chunk| match chunk {
                Ok(text) => Ok(Bytes::from_static(text.as_bytes())),
                Err(reason) => Err(CollaboratorError::Decode(reason.to_string())),
            })
            .collect();

        Ok(UpstreamResponse {
            status: self.status,
            headers,
            body: futures_util::stream::iter(chunks).boxed(),
        })
    }
}

pub struct UnreachableUpstream;

#[async_trait]
impl ResearchUpstream for UnreachableUpstream {
    async fn open(&self, _symbol: &Symbol) -> Result<UpstreamResponse, CollaboratorError> {
        Err(CollaboratorError::Status(502))
    }
}
