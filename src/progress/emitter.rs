//! Progress Emitter
//!
//! Writes `ProgressEvent`s onto a byte channel whose receiving half becomes the
//! HTTP response body.
//!
//! The channel holds a single frame, so `emit` only returns once the previous
//! line has been taken by the transport. A slow reader therefore sees each
//! step as it happens instead of one burst at the end, and the pipeline never
//! runs ahead of its consumer.

use super::codec::encode_event;
use super::types::ProgressEvent;

use bytes::Bytes;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

/// Frames in flight between the emitter and the transport.
const FRAME_CAPACITY: usize = 1;

/// Receiving half of an event channel; usable directly as a response body stream.
pub type EventStream = ReceiverStream<Result<Bytes, std::io::Error>>;

#[derive(Debug, thiserror::Error)]
pub enum EmitError {
    /// The reader went away; the run cannot deliver anything further.
    #[error("event stream reader disconnected")]
    Disconnected,
    #[error("failed to encode event: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Sending half of an event channel.
///
/// Dropping the emitter closes the stream. A write failure is terminal: the
/// emitter never retries.
pub struct ProgressEmitter {
    tx: mpsc::Sender<Result<Bytes, std::io::Error>>,
    emitted: usize,
    last_progress: Option<u8>,
}

/// Creates a connected emitter/stream pair.
pub fn event_channel() -> (ProgressEmitter, EventStream) {
    let (tx, rx) = mpsc::channel(FRAME_CAPACITY);
    let emitter = ProgressEmitter {
        tx,
        emitted: 0,
        last_progress: None,
    };
    (emitter, ReceiverStream::new(rx))
}

impl ProgressEmitter {
    /// Writes one event, waiting until the transport has room for it.
    pub async fn emit(&mut self, event: &ProgressEvent) -> Result<(), EmitError> {
        if let ProgressEvent::Status { progress, .. } = event {
            if let Some(last) = self.last_progress
                && *progress < last
            {
                tracing::warn!("Progress went backwards: {} -> {}", last, progress);
            }
            self.last_progress = Some(*progress);
        }

        let line = encode_event(event)?;
        self.tx
            .send(Ok(line))
            .await
            .map_err(|_| EmitError::Disconnected)?;

        self.emitted += 1;
        Ok(())
    }

    pub async fn status(&mut self, message: &str, progress: u8) -> Result<(), EmitError> {
        self.emit(&ProgressEvent::status(message, progress)).await
    }

    pub async fn report(&mut self, content: &str) -> Result<(), EmitError> {
        self.emit(&ProgressEvent::report(content)).await
    }

    /// Number of events written so far.
    pub fn emitted(&self) -> usize {
        self.emitted
    }
}
