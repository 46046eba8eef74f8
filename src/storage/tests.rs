//! Storage Module Tests
//!
//! Validates the key/value contract shared by every backend.
//!
//! ## Test Scopes
//! - **MemoryStore**: Put/Get/List, write-once semantics, concurrent writers.
//! - **Service + RemoteStore**: The `/internal/kv` handlers driven over real HTTP by the client.

#[cfg(test)]
mod tests {
    use crate::storage::handlers::{handle_get, handle_list, handle_put};
    use crate::storage::protocol::ENDPOINT_KV;
    use crate::storage::{KvStore, MemoryStore, RemoteStore, StoreError};
    use crate::testing::spawn_server;

    use axum::routing::{get, post};
    use axum::{Extension, Router};
    use std::collections::HashSet;
    use std::sync::Arc;

    fn kv_service(store: Arc<dyn KvStore>) -> Router {
        Router::new()
            .route(ENDPOINT_KV, post(handle_put).get(handle_list))
            .route(&format!("{}/:key", ENDPOINT_KV), get(handle_get))
            .layer(Extension(store))
    }

    // ============================================================
    // MEMORY STORE
    // ============================================================

    #[tokio::test]
    async fn test_memory_store_put_then_get() {
        let store = MemoryStore::new();

        store
            .put("ACME-1", r#"{"symbol":"ACME"}"#.to_string())
            .await
            .unwrap();

        let value = store.get("ACME-1").await.unwrap();
        assert_eq!(value.as_deref(), Some(r#"{"symbol":"ACME"}"#));
    }

    #[tokio::test]
    async fn test_memory_store_missing_key_is_none() {
        let store = MemoryStore::new();

        assert!(store.get("nonexistent").await.unwrap().is_none());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_memory_store_rejects_second_write() {
        let store = MemoryStore::new();
        store.put("ACME-1", "first".to_string()).await.unwrap();

        let result = store.put("ACME-1", "second".to_string()).await;

        assert!(matches!(result, Err(StoreError::KeyExists(key)) if key == "ACME-1"));
        // The original value is untouched
        assert_eq!(store.get("ACME-1").await.unwrap().as_deref(), Some("first"));
    }

    #[tokio::test]
    async fn test_memory_store_lists_every_key() {
        let store = MemoryStore::new();
        for i in 0..20 {
            store.put(&format!("key-{}", i), i.to_string()).await.unwrap();
        }

        let keys: HashSet<String> = store.list().await.unwrap().into_iter().collect();

        assert_eq!(keys.len(), 20);
        assert!(keys.contains("key-0"));
        assert!(keys.contains("key-19"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_memory_store_concurrent_writers() {
        let store = Arc::new(MemoryStore::new());

        let mut handles = Vec::new();
        for i in 0..100 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store.put(&format!("report-{}", i), format!("content {}", i)).await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(store.len(), 100);
        assert_eq!(
            store.get("report-57").await.unwrap().as_deref(),
            Some("content 57")
        );
    }

    // ============================================================
    // KEY/VALUE SERVICE + REMOTE STORE
    // ============================================================

    #[tokio::test]
    async fn test_remote_store_roundtrip_through_service() {
        let backing = Arc::new(MemoryStore::new());
        let addr = spawn_server(kv_service(backing.clone())).await;
        let remote =
            RemoteStore::with_client(reqwest::Client::new(), &format!("http://{}/", addr));

        remote
            .put("ACME-1700000000000-0000abcd", "{\"content\":\"x\"}".to_string())
            .await
            .unwrap();

        // Landed in the serving node's store
        assert_eq!(backing.len(), 1);
        assert_eq!(
            remote
                .get("ACME-1700000000000-0000abcd")
                .await
                .unwrap()
                .as_deref(),
            Some("{\"content\":\"x\"}")
        );
        assert_eq!(
            remote.list().await.unwrap(),
            vec!["ACME-1700000000000-0000abcd".to_string()]
        );
    }

    #[tokio::test]
    async fn test_remote_store_missing_key_is_none() {
        let addr = spawn_server(kv_service(Arc::new(MemoryStore::new()))).await;
        let remote =
            RemoteStore::with_client(reqwest::Client::new(), &format!("http://{}", addr));

        assert!(remote.get("ghost").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_remote_store_conflict_maps_to_key_exists() {
        let addr = spawn_server(kv_service(Arc::new(MemoryStore::new()))).await;
        let remote =
            RemoteStore::with_client(reqwest::Client::new(), &format!("http://{}", addr));

        remote.put("dup", "a".to_string()).await.unwrap();
        let result = remote.put("dup", "b".to_string()).await;

        assert!(matches!(result, Err(StoreError::KeyExists(_))));
    }

    #[tokio::test]
    async fn test_remote_store_unreachable_service_is_http_error() {
        // Bind then drop to get a port nothing listens on
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let remote =
            RemoteStore::with_client(reqwest::Client::new(), &format!("http://{}", addr));
        let result = remote.list().await;

        assert!(matches!(result, Err(StoreError::Http(_))));
    }
}
