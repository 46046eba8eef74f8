//! Report Storage Module
//!
//! Durable key/value persistence for finished reports.
//!
//! ## Core Concepts
//! - **Capability**: `KvStore` is injected wherever persistence is needed; nothing holds a global.
//! - **Write-once**: A key is written exactly once; later writes to the same key are rejected.
//! - **Backends**: `MemoryStore` keeps entries in-process, `RemoteStore` talks to a key/value
//!   service over HTTP. Both honour the same contract.
//! - **Service**: `handlers` expose any `KvStore` at `/internal/kv` so other nodes can use it
//!   through `RemoteStore`.

pub mod handlers;
pub mod memory;
pub mod protocol;
pub mod remote;
pub mod store;

pub use memory::MemoryStore;
pub use remote::RemoteStore;
pub use store::{KvStore, StoreError};

#[cfg(test)]
mod tests;
