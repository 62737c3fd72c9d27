use core::marker::PhantomData;
use std::sync::Arc;

use anyhow::Result;
use arithmetic::U64Ext as _;
use derivative::Derivative;
use hash_hasher::HashedMap;
use helper_functions::misc;
use im::HashSet;
use log::{debug, info};
use types::{
    phase0::{
        containers::Checkpoint,
        primitives::{Epoch, Gwei, Slot, ValidatorIndex, H256},
    },
    preset::Preset,
};

use crate::{
    error::Error,
    misc::{CheckpointChanges, JustifiedCheckpoint, ProposerBoost, ViabilityContext},
    proto_array::NodeIndex,
    votes::{self, VoteTracker},
};

/// [`Store`] from `consensus-specs` without the block tree.
///
/// Blocks live in [`ProtoArray`]. This holds time, checkpoints, votes and proposer boost.
/// Votes are not applied immediately. They accumulate in per-validator trackers until
/// [`Store::compute_deltas`] is called.
///
/// [`Store`]:      https://github.com/ethereum/consensus-specs/blob/v1.4.0/specs/phase0/fork-choice.md#store
/// [`ProtoArray`]: crate::ProtoArray
#[derive(Derivative)]
#[derivative(Clone(bound = ""), Debug(bound = ""))]
pub struct Store<P: Preset> {
    current_slot: Slot,
    justified_checkpoint: JustifiedCheckpoint,
    finalized_checkpoint: Checkpoint,
    best_justified_checkpoint: Checkpoint,
    unrealized_justified_checkpoint: JustifiedCheckpoint,
    unrealized_finalized_checkpoint: Checkpoint,
    // Zero when no block is boosted.
    proposer_boost_root: H256,
    equivocating_indices: HashSet<ValidatorIndex>,
    #[derivative(Debug = "ignore")]
    votes: Vec<VoteTracker>,
    // Balances the weights in the proto-array were computed with.
    #[derivative(Debug = "ignore")]
    applied_balances: Arc<[Gwei]>,
    #[derivative(Debug = "ignore")]
    phantom: PhantomData<P>,
}

impl<P: Preset> Store<P> {
    #[must_use]
    pub fn new(
        current_slot: Slot,
        justified_checkpoint: JustifiedCheckpoint,
        finalized_checkpoint: Checkpoint,
    ) -> Self {
        Self {
            current_slot,
            best_justified_checkpoint: justified_checkpoint.checkpoint,
            unrealized_justified_checkpoint: justified_checkpoint.clone(),
            justified_checkpoint,
            finalized_checkpoint,
            unrealized_finalized_checkpoint: finalized_checkpoint,
            proposer_boost_root: H256::zero(),
            equivocating_indices: HashSet::new(),
            votes: vec![],
            applied_balances: Arc::from([]),
            phantom: PhantomData,
        }
    }

    #[must_use]
    pub const fn current_slot(&self) -> Slot {
        self.current_slot
    }

    #[must_use]
    pub fn current_epoch(&self) -> Epoch {
        misc::compute_epoch_at_slot::<P>(self.current_slot)
    }

    #[must_use]
    pub const fn justified_checkpoint(&self) -> Checkpoint {
        self.justified_checkpoint.checkpoint
    }

    #[must_use]
    pub const fn justified(&self) -> &JustifiedCheckpoint {
        &self.justified_checkpoint
    }

    #[must_use]
    pub const fn finalized_checkpoint(&self) -> Checkpoint {
        self.finalized_checkpoint
    }

    #[must_use]
    pub fn finalized_slot(&self) -> Slot {
        misc::compute_start_slot_at_epoch::<P>(self.finalized_checkpoint.epoch)
    }

    #[must_use]
    pub const fn best_justified_checkpoint(&self) -> Checkpoint {
        self.best_justified_checkpoint
    }

    #[must_use]
    pub const fn unrealized_justified_checkpoint(&self) -> Checkpoint {
        self.unrealized_justified_checkpoint.checkpoint
    }

    #[must_use]
    pub const fn unrealized_finalized_checkpoint(&self) -> Checkpoint {
        self.unrealized_finalized_checkpoint
    }

    #[must_use]
    pub const fn proposer_boost_root(&self) -> H256 {
        self.proposer_boost_root
    }

    #[must_use]
    pub const fn equivocating_indices(&self) -> &HashSet<ValidatorIndex> {
        &self.equivocating_indices
    }

    /// Returns `None` if the validator has never voted.
    #[must_use]
    pub fn latest_vote(&self, validator_index: ValidatorIndex) -> Option<VoteTracker> {
        let index = usize::try_from(validator_index).ok()?;

        self.votes
            .get(index)
            .copied()
            .filter(|vote| *vote != VoteTracker::default())
    }

    #[must_use]
    pub fn viability_context(&self) -> ViabilityContext {
        ViabilityContext {
            justified_checkpoint: self.justified_checkpoint(),
            finalized_checkpoint: self.finalized_checkpoint,
            current_slot: self.current_slot,
        }
    }

    /// Advances the store to `slot`, which should be the slot right after the current one.
    ///
    /// Proposer boost is reset. On the first slot of an epoch unrealized checkpoints become
    /// realized.
    pub fn on_slot(&mut self, slot: Slot) -> CheckpointChanges {
        if slot <= self.current_slot {
            return CheckpointChanges::default();
        }

        let old_epoch = self.current_epoch();

        self.current_slot = slot;

        // > Reset store.proposer_boost_root if this is a new slot
        self.proposer_boost_root = H256::zero();

        // > If a new epoch, pull-up justification and finalization from previous epoch
        if self.current_epoch() > old_epoch {
            return self.set_checkpoints(
                self.unrealized_justified_checkpoint.clone(),
                self.unrealized_finalized_checkpoint,
            );
        }

        CheckpointChanges::default()
    }

    /// [`update_checkpoints`](https://github.com/ethereum/consensus-specs/blob/v1.4.0/specs/phase0/fork-choice.md#update_checkpoints)
    ///
    /// `justified_balances` is only called if the justified checkpoint changes.
    pub fn update_checkpoints(
        &mut self,
        justified_checkpoint: Checkpoint,
        finalized_checkpoint: Checkpoint,
        justified_balances: impl FnOnce() -> Arc<[Gwei]>,
    ) -> CheckpointChanges {
        let justified_checkpoint =
            if justified_checkpoint.epoch > self.justified_checkpoint.checkpoint.epoch {
                JustifiedCheckpoint::new(justified_checkpoint, justified_balances())
            } else {
                self.justified_checkpoint.clone()
            };

        self.set_checkpoints(justified_checkpoint, finalized_checkpoint)
    }

    /// [`update_unrealized_checkpoints`](https://github.com/ethereum/consensus-specs/blob/v1.4.0/specs/phase0/fork-choice.md#update_unrealized_checkpoints)
    pub fn update_unrealized_checkpoints(
        &mut self,
        unrealized_justified_checkpoint: Checkpoint,
        unrealized_finalized_checkpoint: Checkpoint,
        justified_balances: impl FnOnce() -> Arc<[Gwei]>,
    ) {
        // > Update unrealized justified checkpoint
        if unrealized_justified_checkpoint.epoch
            > self.unrealized_justified_checkpoint.checkpoint.epoch
        {
            self.unrealized_justified_checkpoint =
                JustifiedCheckpoint::new(unrealized_justified_checkpoint, justified_balances());

            self.update_best_justified_checkpoint(unrealized_justified_checkpoint);
        }

        // > Update unrealized finalized checkpoint
        if unrealized_finalized_checkpoint.epoch > self.unrealized_finalized_checkpoint.epoch {
            self.unrealized_finalized_checkpoint = unrealized_finalized_checkpoint;
        }
    }

    pub fn set_proposer_boost_root(&mut self, block_root: H256) {
        debug!("proposer boost applied to block {block_root:?} at slot {}", self.current_slot);
        self.proposer_boost_root = block_root;
    }

    /// Records the latest vote of a validator.
    ///
    /// Returns `false` if the vote was ignored, either because the validator is equivocating or
    /// because a vote with the same or a later target epoch has already been recorded.
    pub fn process_attestation(
        &mut self,
        validator_index: ValidatorIndex,
        block_root: H256,
        target_epoch: Epoch,
    ) -> Result<bool> {
        if self.equivocating_indices.contains(&validator_index) {
            return Ok(false);
        }

        let index = usize::try_from(validator_index)
            .map_err(|_| Error::ValidatorIndexOverflow { validator_index })?;

        if index >= self.votes.len() {
            self.votes.resize(index + 1, VoteTracker::default());
        }

        Ok(self.votes[index].update(block_root, target_epoch))
    }

    /// Excludes validators from fork choice permanently.
    ///
    /// Weight already contributed by their votes is removed by the next [`Self::compute_deltas`].
    /// Returns the number of validators that were not excluded before.
    pub fn apply_equivocation(
        &mut self,
        validator_indices: impl IntoIterator<Item = ValidatorIndex>,
    ) -> usize {
        validator_indices
            .into_iter()
            .filter(|validator_index| {
                self.equivocating_indices
                    .insert(*validator_index)
                    .is_none()
            })
            .count()
    }

    /// Computes weight changes for all votes and balance changes since the previous call.
    ///
    /// The deltas must be applied to the array `indices` belong to.
    pub fn compute_deltas(&mut self, indices: &HashedMap<H256, NodeIndex>) -> Result<Vec<i64>> {
        let new_balances = Arc::clone(&self.justified_checkpoint.balances);

        let deltas = votes::compute_deltas(
            indices,
            &mut self.votes,
            &self.applied_balances,
            &new_balances,
            &self.equivocating_indices,
        )?;

        self.applied_balances = new_balances;

        Ok(deltas)
    }

    /// Total active balance of the justified state divided among the slots of an epoch.
    #[must_use]
    pub fn committee_weight(&self) -> Gwei {
        self.justified_checkpoint
            .total_active_balance
            .div_typenum::<P::SlotsPerEpoch>()
    }

    /// [`get_proposer_score`](https://github.com/ethereum/consensus-specs/blob/v1.4.0/specs/phase0/fork-choice.md#get_proposer_score)
    /// paired with the boosted root.
    #[must_use]
    pub fn proposer_boost(&self, proposer_score_boost: u64) -> ProposerBoost {
        if self.proposer_boost_root.is_zero() {
            return ProposerBoost::default();
        }

        ProposerBoost {
            root: self.proposer_boost_root,
            score: self.committee_weight().mul_percent(proposer_score_boost),
        }
    }

    fn set_checkpoints(
        &mut self,
        justified_checkpoint: JustifiedCheckpoint,
        finalized_checkpoint: Checkpoint,
    ) -> CheckpointChanges {
        let mut changes = CheckpointChanges::default();

        // > Update justified checkpoint
        if justified_checkpoint.checkpoint.epoch > self.justified_checkpoint.checkpoint.epoch {
            debug!("justified checkpoint updated to {:?}", justified_checkpoint.checkpoint);

            self.update_best_justified_checkpoint(justified_checkpoint.checkpoint);
            self.justified_checkpoint = justified_checkpoint;
            changes.justified_checkpoint_updated = true;
        }

        // > Update finalized checkpoint
        if finalized_checkpoint.epoch > self.finalized_checkpoint.epoch {
            info!("finalized checkpoint updated to {finalized_checkpoint:?}");

            self.finalized_checkpoint = finalized_checkpoint;
            changes.finalized_checkpoint_updated = true;
        }

        changes
    }

    fn update_best_justified_checkpoint(&mut self, checkpoint: Checkpoint) {
        if checkpoint.epoch > self.best_justified_checkpoint.epoch {
            self.best_justified_checkpoint = checkpoint;
        }
    }
}
