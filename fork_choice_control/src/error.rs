use static_assertions::assert_impl_all;
use thiserror::Error;
use types::{
    nonstandard::ExecutionStatus,
    phase0::primitives::{Epoch, ExecutionBlockHash, Slot, H256},
    preset::PresetName,
};

/// Reasons a block is not added to fork choice.
///
/// The block may still become acceptable later, for example once its parent is received.
#[derive(Debug, Error)]
pub enum InvalidBlock {
    #[error("block {root:?} is from a future slot {slot} (current slot: {current_slot})")]
    FutureSlot {
        root: H256,
        slot: Slot,
        current_slot: Slot,
    },
    #[error("block {root:?} at slot {slot} is not later than finalized slot {finalized_slot}")]
    FinalizedSlot {
        root: H256,
        slot: Slot,
        finalized_slot: Slot,
    },
    #[error(
        "block {root:?} has execution status {execution_status} \
         inconsistent with execution block hash {execution_block_hash:?}"
    )]
    InconsistentExecutionStatus {
        root: H256,
        execution_block_hash: Option<ExecutionBlockHash>,
        execution_status: ExecutionStatus,
    },
    #[error("parent of block {root:?} has an invalid execution payload: {parent_root:?}")]
    InvalidParent { root: H256, parent_root: H256 },
    #[error("block {root:?} does not descend from finalized block {finalized_root:?}")]
    NotDescendantOfFinalized { root: H256, finalized_root: H256 },
    #[error("block {root:?} at slot {slot} is not later than its parent at slot {parent_slot}")]
    NotLaterThanParent {
        root: H256,
        slot: Slot,
        parent_slot: Slot,
    },
    #[error("parent of block {root:?} is unknown: {parent_root:?}")]
    UnknownParent { root: H256, parent_root: H256 },
}

/// Reasons an attestation is dropped without affecting fork choice.
#[derive(Debug, Error)]
pub enum InvalidAttestation {
    #[error("attestation for block {beacon_block_root:?} has no attesting indices")]
    Empty { beacon_block_root: H256 },
    #[error("attestation votes for block {root:?} from slot {block_slot} after its slot {slot}")]
    FutureBlock {
        root: H256,
        block_slot: Slot,
        slot: Slot,
    },
    #[error("attestation target epoch {target_epoch} is after current epoch {current_epoch}")]
    FutureEpoch {
        target_epoch: Epoch,
        current_epoch: Epoch,
    },
    #[error("attestation slot {slot} is after current slot {current_slot}")]
    FutureSlot { slot: Slot, current_slot: Slot },
    #[error("attestation target {target_root:?} is not the epoch boundary block {expected:?}")]
    InconsistentTarget {
        target_root: H256,
        expected: Option<H256>,
    },
    #[error("attestation target epoch {target_epoch} is before previous epoch {previous_epoch}")]
    PastEpoch {
        target_epoch: Epoch,
        previous_epoch: Epoch,
    },
    #[error("attestation target epoch {target_epoch} does not match slot {slot}")]
    TargetEpochMismatch { target_epoch: Epoch, slot: Slot },
    #[error("attestation votes for an unknown block: {root:?}")]
    UnknownHeadBlock { root: H256 },
    #[error("attestation targets an unknown block: {root:?}")]
    UnknownTargetBlock { root: H256 },
}

/// Misuse of [`ForkChoice`](crate::ForkChoice) by its caller.
#[derive(Debug, Error)]
pub enum Error {
    #[error("attestations in attester slashing are not slashable")]
    AttesterSlashingNotSlashable,
    #[error(
        "finalized epoch {finalized_epoch} is not newer than \
         epoch {last_pruned_epoch} of the previous prune"
    )]
    FinalityNotNewer {
        finalized_epoch: Epoch,
        last_pruned_epoch: Epoch,
    },
    #[error("chain configuration is for preset {preset_base}, not {preset}")]
    PresetMismatch {
        preset: PresetName,
        preset_base: PresetName,
    },
    #[error("proposer head requested for slot {slot} while store is at slot {current_slot}")]
    ProposerHeadSlotMismatch { slot: Slot, current_slot: Slot },
    #[error("block {root:?} is not the finalized block {finalized_root:?} or its ancestor")]
    PruneRootNotFinalized { root: H256, finalized_root: H256 },
    #[error("block is not in fork choice: {root:?}")]
    UnknownBlock { root: H256 },
    #[error("no block in fork choice has execution block hash {block_hash:?}")]
    UnknownExecutionBlockHash { block_hash: ExecutionBlockHash },
}

// `anyhow::Error` requires errors to be thread-safe.
assert_impl_all!(InvalidBlock: Send, Sync);
assert_impl_all!(InvalidAttestation: Send, Sync);
assert_impl_all!(Error: Send, Sync);
