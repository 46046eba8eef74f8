//! Streaming-Source Orchestrator
//!
//! Used when the analysis source is an upstream endpoint that answers with a
//! byte stream. The upstream body is teed the moment its head arrives:
//!
//! - the **forward** branch becomes the caller's response body, byte for byte;
//! - the **capture** branch is drained by a detached task that stores the
//!   result once the upstream finishes.
//!
//! The capture task owns its branch, the store handle and the id, so it runs
//! to completion even after the caller has disconnected or the response has
//! been fully delivered. Its failure is a soft failure: the caller already has
//! the content, only retrieval by id is lost.

use super::collaborators::{ResearchUpstream, UpstreamResponse};
use super::error::PipelineError;
use super::tee::{TeeBranch, tee};
use crate::progress::NDJSON_CONTENT_TYPE;
use crate::progress::codec::collect_report_content;
use crate::reports::{ReportId, ReportRecord, ReportStore, Symbol};

use axum::http::StatusCode;
use axum::http::header::{self, HeaderMap, HeaderName, HeaderValue};
use futures_util::StreamExt;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Response metadata field carrying the allocated report id.
pub const REPORT_ID_HEADER: HeaderName = HeaderName::from_static("x-report-id");
/// Where an id already set by the upstream is preserved.
pub const UPSTREAM_REPORT_ID_HEADER: HeaderName = HeaderName::from_static("x-upstream-report-id");

/// Connection-level headers that must not be copied onto the forwarded response.
const HOP_BY_HOP: [&str; 8] = [
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
];

/// How the captured copy is turned into report content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureFormat {
    /// NDJSON progress events; the stored content is the concatenation of the
    /// `report` event contents. A body carrying no `report` event (e.g. a
    /// single JSON document) is stored as raw text.
    Events,
    /// Anything else; the body text is stored as-is.
    RawText,
}

impl CaptureFormat {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let content_type = headers
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if content_type.starts_with(NDJSON_CONTENT_TYPE)
            || content_type.starts_with("application/json")
        {
            CaptureFormat::Events
        } else {
            CaptureFormat::RawText
        }
    }
}

/// An upstream response being forwarded while a copy is captured.
pub struct ForwardedRun {
    pub id: ReportId,
    pub status: StatusCode,
    pub headers: HeaderMap,
    /// Caller-facing copy of the upstream body.
    pub body: TeeBranch,
    /// The detached capture task. Dropping the handle does not cancel it.
    pub capture: JoinHandle<Result<(), PipelineError>>,
}

pub enum StreamingOutcome {
    Forwarded(ForwardedRun),
    /// The upstream answered with a non-success status; its status and body
    /// are passed through and nothing is allocated or stored.
    Rejected(UpstreamResponse),
}

pub struct StreamingPipeline {
    upstream: Arc<dyn ResearchUpstream>,
    reports: Arc<ReportStore>,
}

impl StreamingPipeline {
    pub fn new(upstream: Arc<dyn ResearchUpstream>, reports: Arc<ReportStore>) -> Arc<Self> {
        Arc::new(Self { upstream, reports })
    }

    /// Calls the upstream and, on success, splits its body into the forwarded
    /// copy and the detached capture.
    ///
    /// An upstream that cannot be reached at all is a
    /// [`PipelineError::CollaboratorFatal`].
    pub async fn open(&self, symbol: Symbol) -> Result<StreamingOutcome, PipelineError> {
        let response = self
            .upstream
            .open(&symbol)
            .await
            .map_err(PipelineError::CollaboratorFatal)?;

        if !response.status.is_success() {
            tracing::warn!(
                "Upstream rejected research for {} with {}",
                symbol,
                response.status
            );
            return Ok(StreamingOutcome::Rejected(response));
        }

        let id = ReportId::generate(&symbol);
        let format = CaptureFormat::from_headers(&response.headers);
        let headers = forwarded_headers(&response.headers, Some(&id));
        tracing::info!("Forwarding upstream research {} for {} ({:?})", id, symbol, format);

        let (forward, captured) = tee(response.body);
        let capture = tokio::spawn(capture_report(
            captured,
            self.reports.clone(),
            id.clone(),
            symbol,
            format,
        ));

        Ok(StreamingOutcome::Forwarded(ForwardedRun {
            id,
            status: response.status,
            headers,
            body: forward,
            capture,
        }))
    }
}

/// Copies upstream headers for the caller, dropping hop-by-hop headers.
///
/// Any upstream report id is moved to [`UPSTREAM_REPORT_ID_HEADER`], so
/// [`REPORT_ID_HEADER`] only ever carries an id this service will store. With
/// `id`, [`REPORT_ID_HEADER`] is set to it.
pub fn forwarded_headers(upstream: &HeaderMap, id: Option<&ReportId>) -> HeaderMap {
    let mut headers = HeaderMap::new();

    for (name, value) in upstream {
        if HOP_BY_HOP.contains(&name.as_str()) {
            continue;
        }
        if *name == REPORT_ID_HEADER {
            headers.insert(UPSTREAM_REPORT_ID_HEADER, value.clone());
            continue;
        }
        headers.append(name.clone(), value.clone());
    }

    if let Some(id) = id {
        match HeaderValue::from_str(id.as_str()) {
            Ok(value) => {
                headers.insert(REPORT_ID_HEADER, value);
            }
            Err(e) => tracing::error!("Report id {} is not a valid header value: {}", id, e),
        }
    }

    headers
}

async fn capture_report(
    branch: TeeBranch,
    reports: Arc<ReportStore>,
    id: ReportId,
    symbol: Symbol,
    format: CaptureFormat,
) -> Result<(), PipelineError> {
    let result = drain_and_store(branch, &reports, &id, &symbol, format).await;
    if let Err(e) = &result {
        tracing::warn!("Report {} will not be retrievable: {}", id, e);
    }
    result
}

async fn drain_and_store(
    mut branch: TeeBranch,
    reports: &ReportStore,
    id: &ReportId,
    symbol: &Symbol,
    format: CaptureFormat,
) -> Result<(), PipelineError> {
    let mut buffer = Vec::new();
    while let Some(chunk) = branch.next().await {
        buffer.extend_from_slice(&chunk?);
    }

    let text = String::from_utf8_lossy(&buffer).into_owned();
    let content = match format {
        CaptureFormat::RawText => text,
        CaptureFormat::Events => match collect_report_content(&text) {
            Some(content) => content,
            None => {
                tracing::debug!("No report events for {}, storing body as text", id);
                text
            }
        },
    };

    tracing::debug!("Captured {} bytes for report {}", buffer.len(), id);
    reports.put(id, &ReportRecord::new(symbol, content)).await?;
    Ok(())
}
