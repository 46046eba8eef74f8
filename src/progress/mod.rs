//! Progress Event Protocol
//!
//! Multiplexes step updates and final report content over one response stream,
//! encoded as newline-delimited JSON (one event object per line).
//!
//! ## Submodules
//! - **`types`**: The `ProgressEvent` tagged union.
//! - **`codec`**: Line encoding and decoding.
//! - **`emitter`**: The back-pressured channel that feeds a response body.

pub mod codec;
pub mod emitter;
pub mod types;

pub use emitter::{EmitError, EventStream, ProgressEmitter, event_channel};
pub use types::{NDJSON_CONTENT_TYPE, ProgressEvent};
