//! Atomic publication of [`PipelineState`] snapshots.
//!
//! The pipeline is the single writer; the presentation layer holds receivers
//! and reads whole-value snapshots. Consumers never observe a partially
//! populated collection — the state is replaced in one shot.

use tokio::sync::watch;

use dexterm_shared::PipelineState;

/// Read side of the state channel, held by the presentation layer.
pub type StateReceiver = watch::Receiver<PipelineState>;

/// Single-writer handle publishing state snapshots.
#[derive(Debug)]
pub struct StatePublisher {
    tx: watch::Sender<PipelineState>,
}

/// Create a state channel primed with the idle snapshot
/// (`loading = true`, no items).
pub fn state_channel() -> (StatePublisher, StateReceiver) {
    let (tx, rx) = watch::channel(PipelineState::idle());
    (StatePublisher { tx }, rx)
}

impl StatePublisher {
    /// Replace the published snapshot as a whole.
    ///
    /// Publishing after every receiver is gone (screen torn down mid-flight)
    /// is a no-op, not a fault.
    pub fn publish(&self, state: PipelineState) {
        let _ = self.tx.send(state);
    }
}
