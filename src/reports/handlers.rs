use super::store::ReportStore;
use super::types::{ReportId, ReportSummary};

use axum::extract::Path;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use std::sync::Arc;

pub async fn handle_list_reports(
    Extension(reports): Extension<Arc<ReportStore>>,
) -> Result<Json<Vec<ReportSummary>>, (StatusCode, String)> {
    match reports.list_summaries().await {
        Ok(summaries) => {
            tracing::debug!("Listing {} reports", summaries.len());
            Ok(Json(summaries))
        }
        Err(e) => {
            tracing::error!("Failed to list reports: {}", e);
            Err((StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
        }
    }
}

/// Returns the stored content as plain text.
pub async fn handle_get_report(
    Extension(reports): Extension<Arc<ReportStore>>,
    Path(id): Path<String>,
) -> Response {
    let id = ReportId::from(id);

    match reports.get_by_id(&id).await {
        Ok(Some(record)) => (
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            record.content,
        )
            .into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, "not found").into_response(),
        Err(e) => {
            tracing::error!("Failed to read report {}: {}", id, e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}
