//! Decision whether a proposer should build on the parent of a late head.
//!
//! See [`get_proposer_head`] in `consensus-specs`. The checks are performed in a fixed order and
//! the first one that fails is reported, so callers always learn why the head was kept.
//!
//! [`get_proposer_head`]: https://github.com/ethereum/consensus-specs/blob/v1.4.0/specs/phase0/fork-choice.md#get_proposer_head

use core::time::Duration;

use arithmetic::U64Ext as _;
use fork_choice_store::{ProtoNode, StoreConfig};
use helper_functions::misc;
use strum::{AsRefStr, Display};
use types::{
    config::Config as ChainConfig,
    phase0::primitives::{Epoch, Gwei, Slot, H256},
    preset::Preset,
};

use crate::misc::ProposerHeadInfo;

#[derive(Clone, Copy, PartialEq, Eq, Debug, AsRefStr, Display)]
#[strum(serialize_all = "snake_case")]
pub enum NotReorgedReason {
    ProposerBoostReorgDisabled,
    ParentBlockNotAvailable,
    HeadBlockNotLate,
    NotShufflingStable,
    NotFfgCompetitive,
    ChainNotFinalized,
    ReorgDistanceExceeded,
    ProposerBoostNotWornOff,
    NotProposingOnTime,
    HeadBlockNotWeak,
    ParentNotStrong,
}

/// Inputs of the decision that come from the store.
///
/// Weights in `head` and `parent` must be up to date, including proposer boost.
#[derive(Clone, Copy, Debug)]
pub struct ReorgCandidate<'nodes> {
    pub head: &'nodes ProtoNode,
    pub parent: Option<&'nodes ProtoNode>,
    pub slot: Slot,
    pub time_into_slot: Duration,
    pub finalized_epoch: Epoch,
    pub proposer_boost_root: H256,
    pub committee_weight: Gwei,
}

#[must_use]
pub fn proposer_head<P: Preset>(
    chain_config: &ChainConfig,
    store_config: &StoreConfig,
    candidate: ReorgCandidate,
) -> ProposerHeadInfo {
    let ReorgCandidate {
        head,
        parent,
        slot,
        time_into_slot,
        finalized_epoch,
        proposer_boost_root,
        committee_weight,
    } = candidate;

    let keep_head = |reason| ProposerHeadInfo {
        proposer_head: head.root,
        is_head_timely: head.timely,
        not_reorged_reason: Some(reason),
    };

    if !store_config.proposer_boost_reorg_enabled {
        return keep_head(NotReorgedReason::ProposerBoostReorgDisabled);
    }

    let Some(parent) = parent else {
        return keep_head(NotReorgedReason::ParentBlockNotAvailable);
    };

    if head.timely {
        return keep_head(NotReorgedReason::HeadBlockNotLate);
    }

    // Reorging at an epoch boundary could change the proposer shuffling of the next epoch.
    if misc::is_epoch_start::<P>(slot) {
        return keep_head(NotReorgedReason::NotShufflingStable);
    }

    if head.checkpoints.unrealized_justified != parent.checkpoints.unrealized_justified {
        return keep_head(NotReorgedReason::NotFfgCompetitive);
    }

    let epochs_since_finalization =
        misc::compute_epoch_at_slot::<P>(slot).saturating_sub(finalized_epoch);

    if epochs_since_finalization > chain_config.reorg_max_epochs_since_finalization {
        return keep_head(NotReorgedReason::ChainNotFinalized);
    }

    let head_is_previous_slot = head.slot + 1 == slot;
    let parent_is_close = head.slot.saturating_sub(parent.slot) <= store_config.max_reorg_distance;

    if !(head_is_previous_slot && parent_is_close) {
        return keep_head(NotReorgedReason::ReorgDistanceExceeded);
    }

    if proposer_boost_root == head.root {
        return keep_head(NotReorgedReason::ProposerBoostNotWornOff);
    }

    if time_into_slot > chain_config.proposer_reorg_cutoff() {
        return keep_head(NotReorgedReason::NotProposingOnTime);
    }

    let head_threshold = committee_weight.mul_percent(chain_config.reorg_head_weight_threshold);

    if head.weight >= head_threshold {
        return keep_head(NotReorgedReason::HeadBlockNotWeak);
    }

    let parent_threshold = committee_weight.mul_percent(chain_config.reorg_parent_weight_threshold);

    if parent.weight <= parent_threshold {
        return keep_head(NotReorgedReason::ParentNotStrong);
    }

    ProposerHeadInfo {
        proposer_head: parent.root,
        is_head_timely: false,
        not_reorged_reason: None,
    }
}
