//! Background progress recording.
//!
//! Graded attempts are pushed onto an unbounded channel and folded into the
//! shared [`ProgressTracker`] by a worker task, so grading never waits on
//! the tracker lock.

use std::sync::Arc;

use tokio::sync::{mpsc, RwLock};
use tokio::task::JoinHandle;
use verse_core::{AttemptRecord, ProgressTracker, ProgressionSink, SinkError};

/// Sink that hands attempts to the progress worker.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<AttemptRecord>,
}

impl ProgressionSink for ChannelSink {
    fn record_attempt(&self, attempt: AttemptRecord) -> Result<(), SinkError> {
        self.tx
            .send(attempt)
            .map_err(|_| SinkError::Unavailable("progress worker has stopped".to_string()))
    }
}

/// Start the worker. It runs until every clone of the returned sink is dropped.
pub fn spawn_progress_worker(
    tracker: Arc<RwLock<ProgressTracker>>,
) -> (ChannelSink, JoinHandle<()>) {
    let (tx, mut rx) = mpsc::unbounded_channel::<AttemptRecord>();

    let handle = tokio::spawn(async move {
        while let Some(attempt) = rx.recv().await {
            let mut tracker = tracker.write().await;
            let record = tracker.apply(&attempt);
            tracing::debug!(
                verse_id = %record.verse_id,
                attempts = record.attempts,
                rolling_accuracy = record.rolling_accuracy,
                mastered = record.mastered,
                "progress updated"
            );
        }
        tracing::info!("Progress worker stopped");
    });

    (ChannelSink { tx }, handle)
}
