use axum::{
    Json,
    extract::{Extension, Path},
    http::StatusCode,
};
use std::sync::Arc;

use super::protocol::{GetResponse, ListKeysResponse, PutRequest, PutResponse};
use super::store::{KvStore, StoreError};

pub async fn handle_put(
    Extension(store): Extension<Arc<dyn KvStore>>,
    Json(req): Json<PutRequest>,
) -> (StatusCode, Json<PutResponse>) {
    match store.put(&req.key, req.value_json).await {
        Ok(()) => (StatusCode::OK, Json(PutResponse { success: true })),
        Err(StoreError::KeyExists(key)) => {
            tracing::warn!("Rejected overwrite of existing key {}", key);
            (StatusCode::CONFLICT, Json(PutResponse { success: false }))
        }
        Err(e) => {
            tracing::error!("Failed to put: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(PutResponse { success: false }),
            )
        }
    }
}

pub async fn handle_get(
    Extension(store): Extension<Arc<dyn KvStore>>,
    Path(key): Path<String>,
) -> (StatusCode, Json<GetResponse>) {
    match store.get(&key).await {
        Ok(Some(value_json)) => (
            StatusCode::OK,
            Json(GetResponse {
                value_json: Some(value_json),
            }),
        ),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(GetResponse { value_json: None }),
        ),
        Err(e) => {
            tracing::error!("Failed to get {}: {}", key, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(GetResponse { value_json: None }),
            )
        }
    }
}

pub async fn handle_list(
    Extension(store): Extension<Arc<dyn KvStore>>,
) -> (StatusCode, Json<ListKeysResponse>) {
    match store.list().await {
        Ok(keys) => (StatusCode::OK, Json(ListKeysResponse { keys })),
        Err(e) => {
            tracing::error!("Failed to list keys: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ListKeysResponse { keys: Vec::new() }),
            )
        }
    }
}
