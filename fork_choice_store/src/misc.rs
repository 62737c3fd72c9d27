use std::sync::Arc;

use derive_more::BitOr;
use helper_functions::accessors;
use types::{
    nonstandard::{DataAvailabilityStatus, ExecutionStatus},
    phase0::{
        containers::Checkpoint,
        primitives::{ExecutionBlockHash, Gwei, Slot, H256},
    },
};

/// Checkpoints of a post-block state, both realized and unrealized.
///
/// The unrealized checkpoints are the ones the state would have after processing justification
/// and finalization at the end of its epoch.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub struct BlockCheckpoints {
    pub justified: Checkpoint,
    pub finalized: Checkpoint,
    pub unrealized_justified: Checkpoint,
    pub unrealized_finalized: Checkpoint,
}

impl BlockCheckpoints {
    /// Checkpoints of an anchor block, which justifies and finalizes itself.
    #[must_use]
    pub const fn anchor(checkpoint: Checkpoint) -> Self {
        Self {
            justified: checkpoint,
            finalized: checkpoint,
            unrealized_justified: checkpoint,
            unrealized_finalized: checkpoint,
        }
    }

    #[must_use]
    pub fn contains(self, checkpoint: Checkpoint) -> bool {
        [
            self.justified,
            self.finalized,
            self.unrealized_justified,
            self.unrealized_finalized,
        ]
        .contains(&checkpoint)
    }
}

/// A justified checkpoint along with the effective balances of its state.
///
/// Inactive validators are expected to have zero balances.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct JustifiedCheckpoint {
    pub checkpoint: Checkpoint,
    pub balances: Arc<[Gwei]>,
    pub total_active_balance: Gwei,
}

impl JustifiedCheckpoint {
    #[must_use]
    pub fn new(checkpoint: Checkpoint, balances: Arc<[Gwei]>) -> Self {
        let total_active_balance = accessors::total_active_balance(&balances);

        Self {
            checkpoint,
            balances,
            total_active_balance,
        }
    }
}

/// Extra weight given to a timely block for the duration of its slot.
///
/// A zero `root` means no block is boosted.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub struct ProposerBoost {
    pub root: H256,
    pub score: Gwei,
}

impl ProposerBoost {
    #[must_use]
    pub fn is_active(self) -> bool {
        !self.root.is_zero() && self.score > 0
    }
}

/// Everything [`ProtoArray::insert`] needs to know about a block.
///
/// [`ProtoArray::insert`]: crate::ProtoArray::insert
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ProtoBlock {
    pub slot: Slot,
    pub root: H256,
    pub parent_root: H256,
    pub state_root: H256,
    pub target_root: H256,
    pub checkpoints: BlockCheckpoints,
    pub execution_block_hash: Option<ExecutionBlockHash>,
    pub execution_status: ExecutionStatus,
    pub data_availability_status: DataAvailabilityStatus,
    pub timely: bool,
}

/// The parts of the store that determine whether a block may become the head.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ViabilityContext {
    pub justified_checkpoint: Checkpoint,
    pub finalized_checkpoint: Checkpoint,
    pub current_slot: Slot,
}

#[derive(Clone, Copy, PartialEq, Eq, Default, Debug, BitOr)]
pub struct CheckpointChanges {
    pub justified_checkpoint_updated: bool,
    pub finalized_checkpoint_updated: bool,
}

impl CheckpointChanges {
    #[must_use]
    pub const fn any(self) -> bool {
        self.justified_checkpoint_updated || self.finalized_checkpoint_updated
    }
}
