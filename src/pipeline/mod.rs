//! Research Pipeline Module
//!
//! Turns a ticker symbol into a streamed, persisted research report.
//!
//! ## Variants
//! 1. **Synchronous source** (`orchestrator`): the run is an explicit state machine
//!    (`Allocated -> FetchingContext -> Generating -> Persisting -> Completed`) that emits
//!    progress events while calling market data and the analysis generator, then writes the
//!    record exactly once.
//! 2. **Streaming source** (`streaming`): the upstream body is duplicated with `tee`; one copy
//!    goes to the caller verbatim, the other is captured and stored by a detached task.
//!
//! ## Concurrency
//! Every request is its own task. There is no global lock and no per-symbol deduplication:
//! two requests for the same symbol produce two ids and two records.
//!
//! ## Submodules
//! - **`collaborators`**: Traits for market data, analysis generation and the upstream endpoint.
//! - **`error`**: The failure taxonomy (`PipelineError`).
//! - **`state`**: Run states and bookkeeping.
//! - **`tee`**: Stream duplication primitive.
//! - **`handlers`**: `GET /research` for both variants.

pub mod collaborators;
pub mod error;
pub mod handlers;
pub mod orchestrator;
pub mod state;
pub mod streaming;
pub mod tee;

pub use collaborators::{
    AnalysisGenerator, CollaboratorError, MarketData, QuoteSnapshot, ResearchUpstream,
    UpstreamResponse,
};
pub use error::PipelineError;
pub use orchestrator::{ResearchPipeline, StartedRun};
pub use state::{RunOutcome, RunState, RunSummary};
pub use streaming::{StreamingOutcome, StreamingPipeline};
