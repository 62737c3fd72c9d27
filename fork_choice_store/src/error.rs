use static_assertions::assert_impl_all;
use thiserror::Error;
use types::{
    nonstandard::{DataAvailabilityStatus, ExecutionStatus},
    phase0::primitives::{Gwei, ValidatorIndex, H256},
};

use crate::proto_array::NodeIndex;

/// Violations of invariants maintained by [`ProtoArray`] and [`Store`].
///
/// None of these can be caused by well-formed input. Any of them means the structure is
/// inconsistent and should not be used further.
///
/// [`ProtoArray`]: crate::ProtoArray
/// [`Store`]:      crate::Store
#[derive(Debug, Error)]
pub enum Error {
    #[error("balance of validator {validator_index} does not fit in a delta: {balance}")]
    BalanceOverflow {
        validator_index: ValidatorIndex,
        balance: Gwei,
    },
    #[error("data availability of block {root:?} cannot change from {old} to {new}")]
    DataAvailabilityTransition {
        root: H256,
        old: DataAvailabilityStatus,
        new: DataAvailabilityStatus,
    },
    #[error("delta count does not match node count (deltas: {deltas}, nodes: {nodes})")]
    DeltaCountMismatch { deltas: usize, nodes: usize },
    #[error("delta for block {root:?} overflowed")]
    DeltaOverflow { root: H256 },
    #[error("execution status of block {root:?} cannot change from {old} to {new}")]
    ExecutionStatusTransition {
        root: H256,
        old: ExecutionStatus,
        new: ExecutionStatus,
    },
    #[error("finalized block is not in fork choice: {root:?}")]
    FinalizedNodeUnknown { root: H256 },
    #[error(
        "block {ancestor_root:?} has an invalid execution payload \
         but its descendant {root:?} was declared valid"
    )]
    InvalidAncestorOfValidPayload { root: H256, ancestor_root: H256 },
    #[error("node index is out of bounds: {index}")]
    InvalidNodeIndex { index: NodeIndex },
    #[error("parent of block {root:?} has an invalid execution payload: {parent_root:?}")]
    InvalidParent { root: H256, parent_root: H256 },
    #[error("block is not in fork choice: {root:?}")]
    UnknownBlock { root: H256 },
    #[error("parent of block {root:?} is not in fork choice: {parent_root:?}")]
    UnknownParent { root: H256, parent_root: H256 },
    #[error("block {root:?} has a valid execution payload and cannot be invalidated")]
    ValidPayloadInvalidated { root: H256 },
    #[error("validator index does not fit in usize: {validator_index}")]
    ValidatorIndexOverflow { validator_index: ValidatorIndex },
    #[error("weight of block {root:?} is out of range after applying delta {delta} to {weight}")]
    WeightOutOfRange { root: H256, weight: Gwei, delta: i64 },
}

// `anyhow::Error` requires errors to be thread-safe.
assert_impl_all!(Error: Send, Sync);
