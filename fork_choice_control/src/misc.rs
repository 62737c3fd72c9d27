use types::{
    nonstandard::{DataAvailabilityStatus, ExecutionStatus},
    phase0::{
        containers::BeaconBlockHeader,
        primitives::{Epoch, ExecutionBlockHash, Slot, ValidatorIndex, H256},
    },
};

use crate::proposer_head::NotReorgedReason;

/// Everything about a block's payload that fork choice needs at import time.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct BlockPayload {
    pub execution_block_hash: Option<ExecutionBlockHash>,
    pub execution_status: ExecutionStatus,
    pub data_availability_status: DataAvailabilityStatus,
}

impl BlockPayload {
    #[must_use]
    pub const fn pre_merge() -> Self {
        Self {
            execution_block_hash: None,
            execution_status: ExecutionStatus::PreMerge,
            data_availability_status: DataAvailabilityStatus::PreData,
        }
    }

    /// A payload imported before the execution engine has validated it.
    #[must_use]
    pub const fn optimistic(execution_block_hash: ExecutionBlockHash) -> Self {
        Self {
            execution_block_hash: Some(execution_block_hash),
            execution_status: ExecutionStatus::Syncing,
            data_availability_status: DataAvailabilityStatus::PreData,
        }
    }

    #[must_use]
    pub const fn with_data_availability(self, status: DataAvailabilityStatus) -> Self {
        Self {
            data_availability_status: status,
            ..self
        }
    }

    pub(crate) const fn is_consistent(self) -> bool {
        matches!(
            (self.execution_block_hash, self.execution_status),
            (None, ExecutionStatus::PreMerge)
                | (
                    Some(_),
                    ExecutionStatus::Syncing | ExecutionStatus::Valid | ExecutionStatus::Invalid,
                ),
        )
    }
}

/// The block fork choice starts from. It is treated as both justified and finalized.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct AnchorBlock {
    pub root: H256,
    pub header: BeaconBlockHeader,
    pub payload: BlockPayload,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AttestationOrigin {
    Gossip,
    /// Included in a block that has already been imported.
    Block,
}

impl AttestationOrigin {
    #[must_use]
    pub const fn is_from_block(self) -> bool {
        matches!(self, Self::Block)
    }
}

/// An attestation that may only be applied once its slot is in the past.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct QueuedAttestation {
    pub slot: Slot,
    pub attesting_indices: Vec<ValidatorIndex>,
    pub block_root: H256,
    pub target_epoch: Epoch,
}

/// Arguments for `engine_forkchoiceUpdated` as of the last head computation.
///
/// Hashes are `None` for blocks without execution payloads.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub struct ForkchoiceUpdateParameters {
    pub head_root: H256,
    pub head_block_hash: Option<ExecutionBlockHash>,
    pub justified_block_hash: Option<ExecutionBlockHash>,
    pub finalized_block_hash: Option<ExecutionBlockHash>,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ProposerHeadInfo {
    /// The block to build on. Either the head or its parent.
    pub proposer_head: H256,
    pub is_head_timely: bool,
    /// `None` if and only if `proposer_head` is the parent of the head.
    pub not_reorged_reason: Option<NotReorgedReason>,
}
