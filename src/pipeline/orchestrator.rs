//! Synchronous-Source Orchestrator
//!
//! Drives one research run when the analysis collaborator returns the whole
//! text from a single call. Each run is spawned as its own task; its only
//! link to the request is the event channel it writes to.

use super::collaborators::{AnalysisGenerator, MarketData, QuoteSnapshot};
use super::error::PipelineError;
use super::state::{PipelineRun, RunSummary};
use crate::progress::{EventStream, ProgressEmitter, event_channel};
use crate::reports::{ReportId, ReportRecord, ReportStore, Symbol};

use std::sync::Arc;
use tokio::task::JoinHandle;

pub const MSG_FETCHING_CONTEXT: &str = "Fetching market data...";
pub const MSG_GENERATING: &str = "Generating analysis...";
pub const MSG_COMPLETED: &str = "Completed";

pub const PROGRESS_FETCHING_CONTEXT: u8 = 10;
pub const PROGRESS_GENERATING: u8 = 60;
pub const PROGRESS_COMPLETED: u8 = 100;

/// A run that has been allocated and spawned.
pub struct StartedRun {
    /// Published to the caller before any event is produced.
    pub id: ReportId,
    /// The NDJSON body of the response.
    pub events: EventStream,
    /// Resolves once the run has completed or aborted.
    pub handle: JoinHandle<RunSummary>,
}

pub struct ResearchPipeline {
    market: Arc<dyn MarketData>,
    analysis: Arc<dyn AnalysisGenerator>,
    reports: Arc<ReportStore>,
}

impl ResearchPipeline {
    pub fn new(
        market: Arc<dyn MarketData>,
        analysis: Arc<dyn AnalysisGenerator>,
        reports: Arc<ReportStore>,
    ) -> Arc<Self> {
        Arc::new(Self {
            market,
            analysis,
            reports,
        })
    }

    /// Allocates a report id and spawns the run.
    ///
    /// Returns immediately; the caller publishes `id` and streams `events`
    /// while the run proceeds concurrently.
    pub fn start(self: &Arc<Self>, symbol: Symbol) -> StartedRun {
        let run = PipelineRun::allocate(symbol);
        let id = run.id.clone();
        let (emitter, events) = event_channel();

        let pipeline = self.clone();
        let handle = tokio::spawn(async move { pipeline.drive(run, emitter).await });

        StartedRun { id, events, handle }
    }

    async fn drive(&self, mut run: PipelineRun, mut emitter: ProgressEmitter) -> RunSummary {
        tracing::info!("Research run {} started for {}", run.id, run.symbol);

        let result = self.execute(&mut run, &mut emitter).await;
        match &result {
            Ok(()) => tracing::info!(
                "Research run {} completed ({} events)",
                run.id,
                emitter.emitted()
            ),
            Err(e) => tracing::error!(
                "Research run {} aborted in {:?}: {}",
                run.id,
                run.state(),
                e
            ),
        }

        // Closes the stream; on failure the reader sees it end early.
        drop(emitter);
        run.finish(result)
    }

    async fn execute(
        &self,
        run: &mut PipelineRun,
        emitter: &mut ProgressEmitter,
    ) -> Result<(), PipelineError> {
        run.advance();
        emitter
            .status(MSG_FETCHING_CONTEXT, PROGRESS_FETCHING_CONTEXT)
            .await?;
        let context = match self.market.snapshot(&run.symbol).await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                run.note_degraded(PipelineError::CollaboratorDegraded(e));
                QuoteSnapshot::empty()
            }
        };

        run.advance();
        emitter.status(MSG_GENERATING, PROGRESS_GENERATING).await?;
        let content = self
            .analysis
            .generate(&run.symbol, &context)
            .await
            .map_err(PipelineError::CollaboratorFatal)?;

        run.advance();
        let record = ReportRecord::new(&run.symbol, content);
        self.reports.put(&run.id, &record).await?;

        emitter.status(MSG_COMPLETED, PROGRESS_COMPLETED).await?;
        emitter.report(&record.content).await?;
        run.advance();

        Ok(())
    }
}
