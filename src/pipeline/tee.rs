//! Stream Duplication
//!
//! Splits one fallible byte stream into two copies that are read
//! independently. A pump task pulls from the source and pushes every chunk
//! into two unbounded queues, so neither reader can slow the other down and
//! neither waits for the full body before seeing the first chunk.
//!
//! Dropping one branch does not affect the other: the pump keeps feeding the
//! surviving branch and only stops early once both are gone. A source error
//! is delivered to both branches and ends the stream.

use bytes::Bytes;
use futures_util::{Stream, StreamExt};
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TeeError {
    #[error("source stream failed: {0}")]
    Source(String),
}

pub type TeeChunk = Result<Bytes, TeeError>;

/// One readable copy of a teed stream.
pub type TeeBranch = UnboundedReceiverStream<TeeChunk>;

/// Duplicates `source` into two branches. Must be called within a Tokio runtime.
pub fn tee<S, E>(source: S) -> (TeeBranch, TeeBranch)
where
    S: Stream<Item = Result<Bytes, E>> + Send + 'static,
    E: std::fmt::Display + Send + 'static,
{
    let (left_tx, left_rx) = mpsc::unbounded_channel();
    let (right_tx, right_rx) = mpsc::unbounded_channel();

    tokio::spawn(pump(source, left_tx, right_tx));

    (
        UnboundedReceiverStream::new(left_rx),
        UnboundedReceiverStream::new(right_rx),
    )
}

async fn pump<S, E>(
    source: S,
    left: mpsc::UnboundedSender<TeeChunk>,
    right: mpsc::UnboundedSender<TeeChunk>,
) where
    S: Stream<Item = Result<Bytes, E>>,
    E: std::fmt::Display,
{
    let mut source = std::pin::pin!(source);
    let mut left = Some(left);
    let mut right = Some(right);
    let mut bytes_read = 0usize;

    while let Some(item) = source.next().await {
        let chunk = item.map_err(|e| TeeError::Source(e.to_string()));
        let failed = chunk.is_err();
        if let Ok(bytes) = &chunk {
            bytes_read += bytes.len();
        }

        deliver(&mut left, chunk.clone());
        deliver(&mut right, chunk);

        if failed {
            tracing::debug!("Tee source failed after {} bytes", bytes_read);
            return;
        }
        if left.is_none() && right.is_none() {
            tracing::debug!("Both tee branches dropped after {} bytes", bytes_read);
            return;
        }
    }

    tracing::trace!("Tee source drained ({} bytes)", bytes_read);
}

/// Sends to a branch, forgetting it once its reader has gone away.
fn deliver(branch: &mut Option<mpsc::UnboundedSender<TeeChunk>>, chunk: TeeChunk) {
    let closed = match branch {
        Some(tx) => tx.send(chunk).is_err(),
        None => false,
    };
    if closed {
        *branch = None;
    }
}
