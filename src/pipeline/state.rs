use super::error::PipelineError;
use crate::reports::{ReportId, Symbol};

/// Discrete steps of a synchronous research run.
///
/// ```text
/// Allocated -> FetchingContext -> Generating -> Persisting -> Completed
///     \______________\_________________\_____________\______> (aborted)
/// ```
///
/// Any non-terminal state may end abruptly; there is no separate failed
/// state, the caller simply sees the event stream close early.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// Report id computed and published; nothing else has happened yet.
    Allocated,
    FetchingContext,
    Generating,
    Persisting,
    Completed,
}

impl RunState {
    /// The state that follows this one on the success path.
    pub fn next(self) -> Option<RunState> {
        match self {
            RunState::Allocated => Some(RunState::FetchingContext),
            RunState::FetchingContext => Some(RunState::Generating),
            RunState::Generating => Some(RunState::Persisting),
            RunState::Persisting => Some(RunState::Completed),
            RunState::Completed => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        self == RunState::Completed
    }
}

/// How a run ended.
#[derive(Debug)]
pub enum RunOutcome {
    Completed,
    /// The run stopped in `at` because of `error`.
    Aborted { at: RunState, error: PipelineError },
}

/// Bookkeeping for one run: its identity, current state and the path taken.
#[derive(Debug)]
pub struct PipelineRun {
    pub id: ReportId,
    pub symbol: Symbol,
    state: RunState,
    visited: Vec<RunState>,
    degraded: Vec<PipelineError>,
}

impl PipelineRun {
    pub fn allocate(symbol: Symbol) -> Self {
        let id = ReportId::generate(&symbol);
        Self {
            id,
            symbol,
            state: RunState::Allocated,
            visited: vec![RunState::Allocated],
            degraded: Vec::new(),
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Moves to the next state on the success path.
    pub fn advance(&mut self) -> RunState {
        match self.state.next() {
            Some(next) => {
                tracing::debug!("Run {}: {:?} -> {:?}", self.id, self.state, next);
                self.state = next;
                self.visited.push(next);
            }
            None => tracing::warn!("Run {} advanced past {:?}", self.id, self.state),
        }
        self.state
    }

    /// Records a failure that was absorbed instead of ending the run.
    pub fn note_degraded(&mut self, error: PipelineError) {
        tracing::warn!("Run {} degraded in {:?}: {}", self.id, self.state, error);
        self.degraded.push(error);
    }

    /// Closes the run with the result of its last step.
    pub fn finish(self, result: Result<(), PipelineError>) -> RunSummary {
        let outcome = match result {
            Ok(()) => RunOutcome::Completed,
            Err(error) => RunOutcome::Aborted {
                at: self.state,
                error,
            },
        };

        RunSummary {
            id: self.id,
            symbol: self.symbol,
            visited: self.visited,
            degraded: self.degraded,
            outcome,
        }
    }
}

/// What a finished run reports back to whoever awaits it.
#[derive(Debug)]
pub struct RunSummary {
    pub id: ReportId,
    pub symbol: Symbol,
    /// Every state entered, in order.
    pub visited: Vec<RunState>,
    /// Absorbed failures, e.g. a market-data outage.
    pub degraded: Vec<PipelineError>,
    pub outcome: RunOutcome,
}

impl RunSummary {
    pub fn is_completed(&self) -> bool {
        matches!(self.outcome, RunOutcome::Completed)
    }
}
