use super::collaborators::CollaboratorError;
use super::tee::TeeError;
use crate::progress::EmitError;
use crate::reports::SymbolError;
use crate::storage::StoreError;

/// Failure taxonomy of a research run.
///
/// | kind | where | effect |
/// |---|---|---|
/// | `Client` | request validation | 400, nothing allocated |
/// | `CollaboratorDegraded` | context fetch | logged, run continues with empty context |
/// | `CollaboratorFatal` | generation / upstream stream | run aborted, stream closed early, nothing stored |
/// | `Persistence` | store write | synchronous: run aborted; streaming: soft failure, id never resolves |
/// | `StreamClosed` | event sink | reader gone, run aborted |
///
/// Queries for unknown or not-yet-written ids are not errors: they resolve to
/// `Ok(None)` (see `ReportStore::get_by_id`) and the handler answers 404.
///
/// Nothing is retried; a failed run is re-initiated by the caller with a new id.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Client(#[from] SymbolError),
    #[error("context fetch degraded: {0}")]
    CollaboratorDegraded(#[source] CollaboratorError),
    #[error("collaborator failed: {0}")]
    CollaboratorFatal(#[source] CollaboratorError),
    #[error("upstream stream failed: {0}")]
    UpstreamStream(#[from] TeeError),
    #[error("failed to persist report: {0}")]
    Persistence(#[from] StoreError),
    #[error("event stream closed: {0}")]
    StreamClosed(#[from] EmitError),
}

impl PipelineError {
    /// Whether this error ends the run, as opposed to being absorbed locally.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, PipelineError::CollaboratorDegraded(_))
    }
}
