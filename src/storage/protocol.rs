//! Key/Value Service Protocol
//!
//! Defines the endpoint and Data Transfer Objects (DTOs) used when one node
//! exposes its store to others over HTTP and `RemoteStore` talks to it.
//!
//! Values travel as already-serialized JSON strings so the service never needs
//! to understand what it stores.

use serde::{Deserialize, Serialize};

// --- API Endpoints ---

/// Base path of the key/value service.
///
/// - `POST {ENDPOINT_KV}` stores a key (write-once).
/// - `GET {ENDPOINT_KV}` lists every key.
/// - `GET {ENDPOINT_KV}/{key}` fetches one value.
pub const ENDPOINT_KV: &str = "/internal/kv";

// --- Data Transfer Objects ---

/// Client request for writing one entry.
#[derive(Debug, Serialize, Deserialize)]
pub struct PutRequest {
    /// The entry key.
    pub key: String,
    /// The serialized JSON string of the value.
    pub value_json: String,
}

/// Acknowledgment for write operations.
#[derive(Debug, Serialize, Deserialize)]
pub struct PutResponse {
    /// `false` when the key already existed or the backend failed.
    pub success: bool,
}

/// Response for single-key retrieval.
#[derive(Debug, Serialize, Deserialize)]
pub struct GetResponse {
    /// The value, if found. `None` indicates the key does not exist.
    pub value_json: Option<String>,
}

/// Response for key enumeration.
#[derive(Debug, Serialize, Deserialize)]
pub struct ListKeysResponse {
    pub keys: Vec<String>,
}
