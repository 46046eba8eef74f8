use crate::pipeline::handlers::{handle_research, handle_research_streaming};
use crate::pipeline::{ResearchPipeline, StreamingPipeline};
use crate::reports::ReportStore;
use crate::reports::handlers::{handle_get_report, handle_list_reports};
use crate::storage::KvStore;
use crate::storage::handlers::{handle_get, handle_list, handle_put};
use crate::storage::protocol::ENDPOINT_KV;

use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Extension, Router};
use std::sync::Arc;

/// The research variant served at `/research`.
#[derive(Clone)]
pub enum ResearchSource {
    Synchronous(Arc<ResearchPipeline>),
    Streaming(Arc<StreamingPipeline>),
}

/// Assembles the HTTP surface:
///
/// - `GET /research?symbol=S` (NDJSON stream or upstream passthrough)
/// - `GET /reports`
/// - `GET /report/:id`
/// - `/internal/kv` when `served_store` is given
pub fn build_router(
    source: ResearchSource,
    reports: Arc<ReportStore>,
    served_store: Option<Arc<dyn KvStore>>,
) -> Router {
    let mut app = Router::new()
        .route("/reports", get(handle_list_reports))
        .route("/report/:id", get(handle_get_report));

    app = match source {
        ResearchSource::Synchronous(pipeline) => app
            .route("/research", get(handle_research))
            .layer(Extension(pipeline)),
        ResearchSource::Streaming(pipeline) => app
            .route("/research", get(handle_research_streaming))
            .layer(Extension(pipeline)),
    };

    if let Some(store) = served_store {
        let kv_routes = Router::new()
            .route(ENDPOINT_KV, post(handle_put).get(handle_list))
            .route(&format!("{}/:key", ENDPOINT_KV), get(handle_get))
            .layer(Extension(store));
        app = app.merge(kv_routes);
    }

    app.layer(Extension(reports))
        .fallback(|| async { (StatusCode::NOT_FOUND, "Not found") })
}
