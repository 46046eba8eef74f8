//! Equity Research Pipeline Library
//!
//! A client asks for research on a ticker symbol, watches progress arrive as a
//! stream of newline-delimited JSON events, and can fetch the finished report
//! by id at any later time.
//!
//! ## Architecture Modules
//! - **`storage`**: The key/value capability (`KvStore`) with in-process and networked
//!   backends, plus the HTTP service exposing a store to other nodes.
//! - **`reports`**: The data model (`ReportId`, `ReportRecord`, `ReportSummary`) and the
//!   query surface (`list_summaries`, `get_by_id`).
//! - **`progress`**: The NDJSON event protocol and the back-pressured `ProgressEmitter`.
//! - **`pipeline`**: The synchronous and streaming orchestrators, the tee primitive and the
//!   `/research` handlers.
//! - **`providers`**: HTTP implementations of the market-data, analysis and upstream
//!   collaborators.
//! - **`config`** / **`router`**: Startup configuration and route assembly used by `main.rs`.

pub mod config;
pub mod pipeline;
pub mod progress;
pub mod providers;
pub mod reports;
pub mod router;
pub mod storage;

#[cfg(test)]
pub(crate) mod testing;
