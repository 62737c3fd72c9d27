//! Data structures behind [Beacon Chain Fork Choice].
//!
//! Blocks are kept in a [`ProtoArray`], a tree stored in a vector in insertion order. Every block
//! is inserted after its parent, so a single backward pass over the vector is enough to
//! propagate weights and best descendants from leaves to the root. Pruning removes everything
//! that does not descend from the finalized block and compacts the vector.
//!
//! Votes are kept in [`Store`] and applied lazily. Each validator has a [`VoteTracker`] with the
//! vote already reflected in node weights and the latest vote received. [`Store::compute_deltas`]
//! turns the difference between the two into per-node weight changes, which are then passed to
//! [`ProtoArray::apply_score_changes`] along with the proposer boost for the current slot.
//!
//! Whether a block may become the head depends on the checkpoints in [`Store`] as well as the
//! execution and data availability statuses stored in each [`ProtoNode`]. An invalid execution
//! payload disqualifies the block and all of its descendants. Missing data only disqualifies the
//! block itself and can still be fixed later.
//!
//! Nothing here performs I/O or verifies signatures. Inputs are expected to be validated by the
//! caller. Errors returned by this crate indicate that the structures are inconsistent.
//!
//! [Beacon Chain Fork Choice]: https://github.com/ethereum/consensus-specs/blob/v1.4.0/specs/phase0/fork-choice.md

pub use crate::{
    error::Error,
    misc::{
        BlockCheckpoints, CheckpointChanges, JustifiedCheckpoint, ProposerBoost, ProtoBlock,
        ViabilityContext,
    },
    proto_array::{NodeIndex, ProtoArray, ProtoNode},
    store::Store,
    store_config::StoreConfig,
    votes::{compute_deltas, VoteTracker},
};

mod error;
mod misc;
mod proto_array;
mod store;
mod store_config;
mod votes;
