use std::sync::Arc;

use fork_choice_store::BlockCheckpoints;
use types::phase0::{containers::Checkpoint, primitives::Gwei};

/// Access to post-block states computed outside of fork choice.
///
/// Implementations must be deterministic. Fork choice calls them while importing blocks and
/// relies on them returning the same values for the same state.
pub trait StateTransition {
    type State;

    /// Realized and unrealized checkpoints of `state`.
    ///
    /// The unrealized checkpoints are the ones `state` would have after processing justification
    /// and finalization at the end of its epoch.
    fn block_checkpoints(&self, state: &Self::State) -> BlockCheckpoints;

    /// Effective balances of all validators in the state of `checkpoint`.
    ///
    /// Validators that are not active in the epoch of `checkpoint` must have a zero balance.
    /// `state` is the post-block state through which `checkpoint` became known.
    fn justified_balances(&self, state: &Self::State, checkpoint: Checkpoint) -> Arc<[Gwei]>;
}
