//! Reports Module
//!
//! The data model of the service and everything that reads or writes finished reports.
//!
//! ## Data Model
//! - **`Symbol`**: A validated ticker symbol taken from the request.
//! - **`ReportId`**: Allocated per run before any event is written; the store key.
//! - **`ReportRecord`**: The write-once durable unit (`symbol`, `created`, `content`).
//! - **`ReportSummary`**: A listing projection computed at query time.
//!
//! ## Submodules
//! - **`store`**: Typed `ReportStore` facade over the injected `KvStore`.
//! - **`query`**: The read side: `list_summaries` and `get_by_id`.
//! - **`handlers`**: `GET /reports` and `GET /report/{id}`.

pub mod handlers;
pub mod query;
pub mod store;
pub mod types;

pub use store::ReportStore;
pub use types::{ReportId, ReportRecord, ReportSummary, Symbol, SymbolError};
