//! Fork choice built on top of [`fork_choice_store`].
//!
//! This crate handles the following concerns:
//! - Validation of blocks and attestations against the block tree.
//! - Checkpoint updates, including pulling up unrealized checkpoints at epoch boundaries.
//! - Delaying attestations until their slot is in the past.
//! - Proposer boost and the [decision whether to reorg a late head](`ForkChoice::get_proposer_head`).
//! - Optimistic sync and data availability.
//! - Pruning of blocks that conflict with finality.
//!
//! Post-block states are not computed here. They are accessed through [`StateTransition`].

pub use crate::{
    error::{Error, InvalidAttestation, InvalidBlock},
    fork_choice::ForkChoice,
    misc::{
        AnchorBlock, AttestationOrigin, BlockPayload, ForkchoiceUpdateParameters,
        ProposerHeadInfo, QueuedAttestation,
    },
    proposer_head::{proposer_head, NotReorgedReason, ReorgCandidate},
    state_transition::StateTransition,
};

mod error;
mod fork_choice;
mod misc;
mod proposer_head;
mod state_transition;

#[cfg(test)]
mod extra_tests;
#[cfg(test)]
mod helpers;
