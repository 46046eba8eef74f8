use super::error::PipelineError;
use super::orchestrator::ResearchPipeline;
use super::streaming::{REPORT_ID_HEADER, StreamingOutcome, StreamingPipeline, forwarded_headers};
use crate::progress::NDJSON_CONTENT_TYPE;
use crate::reports::Symbol;

use axum::Extension;
use axum::body::Body;
use axum::extract::Query;
use axum::http::StatusCode;
use axum::http::header::{self, HeaderMap, HeaderValue};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct ResearchParams {
    pub symbol: Option<String>,
}

/// `GET /research?symbol=S` backed by the synchronous orchestrator.
pub async fn handle_research(
    Extension(pipeline): Extension<Arc<ResearchPipeline>>,
    Query(params): Query<ResearchParams>,
) -> Response {
    let symbol = match Symbol::parse(params.symbol.as_deref()) {
        Ok(symbol) => symbol,
        Err(e) => return client_error(PipelineError::Client(e)),
    };

    // The run is detached; its handle is not needed to serve the response.
    let run = pipeline.start(symbol);

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(NDJSON_CONTENT_TYPE),
    );
    match HeaderValue::from_str(run.id.as_str()) {
        Ok(value) => {
            headers.insert(REPORT_ID_HEADER, value);
        }
        Err(e) => tracing::error!("Report id {} is not a valid header value: {}", run.id, e),
    }

    (StatusCode::OK, headers, Body::from_stream(run.events)).into_response()
}

/// `GET /research?symbol=S` forwarded to the upstream research endpoint.
pub async fn handle_research_streaming(
    Extension(pipeline): Extension<Arc<StreamingPipeline>>,
    Query(params): Query<ResearchParams>,
) -> Response {
    let symbol = match Symbol::parse(params.symbol.as_deref()) {
        Ok(symbol) => symbol,
        Err(e) => return client_error(PipelineError::Client(e)),
    };

    match pipeline.open(symbol).await {
        Ok(StreamingOutcome::Forwarded(run)) => {
            (run.status, run.headers, Body::from_stream(run.body)).into_response()
        }
        Ok(StreamingOutcome::Rejected(upstream)) => (
            upstream.status,
            forwarded_headers(&upstream.headers, None),
            Body::from_stream(upstream.body),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Upstream research unavailable: {}", e);
            (StatusCode::BAD_GATEWAY, e.to_string()).into_response()
        }
    }
}

fn client_error(error: PipelineError) -> Response {
    tracing::debug!("Rejected research request: {}", error);
    (StatusCode::BAD_REQUEST, error.to_string()).into_response()
}
