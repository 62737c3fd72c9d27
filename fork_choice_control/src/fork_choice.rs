use core::{cmp, time::Duration};
use std::{collections::BTreeMap, sync::Arc};

use anyhow::{ensure, Result};
use fork_choice_store::{
    BlockCheckpoints, CheckpointChanges, JustifiedCheckpoint, ProposerBoost, ProtoArray,
    ProtoBlock, ProtoNode, Store, StoreConfig,
};
use hash_hasher::HashedSet;
use helper_functions::{misc, predicates};
use itertools::{EitherOrBoth, Itertools as _};
use log::{debug, info, warn};
use types::{
    config::Config as ChainConfig,
    nonstandard::{
        DataAvailabilityStatus, ExecutionStatus, PayloadValidation, PayloadValidationStatus,
    },
    phase0::{
        containers::{
            AttestationData, AttesterSlashing, BeaconBlockHeader, Checkpoint, IndexedAttestation,
        },
        primitives::{Epoch, ExecutionBlockHash, Slot, ValidatorIndex, H256},
    },
    preset::Preset,
};

use crate::{
    error::{Error, InvalidAttestation, InvalidBlock},
    misc::{
        AnchorBlock, AttestationOrigin, BlockPayload, ForkchoiceUpdateParameters,
        ProposerHeadInfo, QueuedAttestation,
    },
    proposer_head::{self, ReorgCandidate},
    state_transition::StateTransition,
};

/// [Fork choice] for a single chain.
///
/// All methods are synchronous and leave the structure consistent when they return, including
/// when they fail. Blocks and attestations are expected to have been validated against the
/// state transition and signature rules beforehand.
///
/// Votes are applied lazily. [`Self::on_attestation`] only records them. They affect weights the
/// next time [`Self::get_head`] or [`Self::on_tick`] is called.
///
/// [Fork choice]: https://github.com/ethereum/consensus-specs/blob/v1.4.0/specs/phase0/fork-choice.md
pub struct ForkChoice<P: Preset, T: StateTransition> {
    chain_config: Arc<ChainConfig>,
    store_config: StoreConfig,
    state_transition: T,
    proto_array: ProtoArray<P>,
    store: Store<P>,
    queued_attestations: Vec<QueuedAttestation>,
    // Roots of `AttestationData` that passed validation, grouped by target epoch.
    validated_attestation_data: BTreeMap<Epoch, HashedSet<H256>>,
    head_root: H256,
    forkchoice_update_parameters: ForkchoiceUpdateParameters,
    last_pruned_epoch: Option<Epoch>,
}

impl<P: Preset, T: StateTransition> ForkChoice<P, T> {
    /// Starts fork choice from a trusted `anchor`, which becomes justified and finalized.
    ///
    /// Fails if `chain_config` was written for a preset other than `P`.
    pub fn new(
        chain_config: Arc<ChainConfig>,
        store_config: StoreConfig,
        state_transition: T,
        anchor: AnchorBlock,
        anchor_state: &T::State,
        current_slot: Slot,
    ) -> Result<Self> {
        let AnchorBlock {
            root,
            header,
            payload,
        } = anchor;

        ensure!(
            chain_config.preset_base == P::NAME,
            Error::PresetMismatch {
                preset: P::NAME,
                preset_base: chain_config.preset_base,
            },
        );

        ensure!(
            payload.is_consistent(),
            InvalidBlock::InconsistentExecutionStatus {
                root,
                execution_block_hash: payload.execution_block_hash,
                execution_status: payload.execution_status,
            },
        );

        let checkpoint = Checkpoint {
            epoch: misc::compute_epoch_at_slot::<P>(header.slot),
            root,
        };

        let balances = state_transition.justified_balances(anchor_state, checkpoint);
        let justified_checkpoint = JustifiedCheckpoint::new(checkpoint, balances);
        let current_slot = cmp::max(current_slot, header.slot);
        let store = Store::new(current_slot, justified_checkpoint, checkpoint);

        let proto_array = ProtoArray::new(ProtoBlock {
            slot: header.slot,
            root,
            parent_root: header.parent_root,
            state_root: header.state_root,
            target_root: root,
            checkpoints: BlockCheckpoints::anchor(checkpoint),
            execution_block_hash: payload.execution_block_hash,
            execution_status: payload.execution_status,
            data_availability_status: payload.data_availability_status,
            timely: false,
        });

        let mut fork_choice = Self {
            chain_config,
            store_config,
            state_transition,
            proto_array,
            store,
            queued_attestations: vec![],
            validated_attestation_data: BTreeMap::new(),
            head_root: root,
            forkchoice_update_parameters: ForkchoiceUpdateParameters::default(),
            last_pruned_epoch: None,
        };

        fork_choice.forkchoice_update_parameters = fork_choice.compute_update_parameters(root);

        Ok(fork_choice)
    }

    #[must_use]
    pub fn chain_config(&self) -> &ChainConfig {
        &self.chain_config
    }

    #[must_use]
    pub const fn store_config(&self) -> StoreConfig {
        self.store_config
    }

    /// Advances the store to `slot` and recomputes the head.
    ///
    /// Every epoch boundary between the current slot and `slot` is processed, so unrealized
    /// checkpoints are realized even if the node was offline for several epochs.
    /// Attestations whose slot is now in the past are applied.
    pub fn on_tick(&mut self, slot: Slot) -> Result<H256> {
        let mut changes = CheckpointChanges::default();

        while self.store.current_slot() < slot {
            let next_epoch_start =
                misc::compute_start_slot_at_epoch::<P>(self.store.current_epoch() + 1);

            // Slots within an epoch only differ in proposer boost, which is reset either way.
            changes = changes | self.store.on_slot(cmp::min(slot, next_epoch_start));
        }

        if changes.finalized_checkpoint_updated {
            debug!(
                "finalized checkpoint advanced on tick to slot {slot}: {:?}",
                self.store.finalized_checkpoint(),
            );
        }

        self.prune_validated_attestation_data();
        self.apply_queued_attestations()?;
        self.get_head()
    }

    /// Adds a block whose parent has already been added.
    ///
    /// `block_delay` is the time between the start of the block's slot and its arrival. It is
    /// used to determine whether the block is timely and eligible for proposer boost.
    ///
    /// Adding the same block twice has no effect.
    pub fn on_block(
        &mut self,
        block_root: H256,
        block: &BeaconBlockHeader,
        payload: BlockPayload,
        post_state: &T::State,
        block_delay: Duration,
    ) -> Result<()> {
        if self.proto_array.contains(block_root) {
            return Ok(());
        }

        let BeaconBlockHeader {
            slot,
            parent_root,
            state_root,
            ..
        } = *block;

        let parent = self
            .proto_array
            .node(parent_root)
            .ok_or(InvalidBlock::UnknownParent {
                root: block_root,
                parent_root,
            })?;

        ensure!(
            !parent.execution_status.is_invalid(),
            InvalidBlock::InvalidParent {
                root: block_root,
                parent_root,
            },
        );

        ensure!(
            slot > parent.slot,
            InvalidBlock::NotLaterThanParent {
                root: block_root,
                slot,
                parent_slot: parent.slot,
            },
        );

        ensure!(
            payload.is_consistent()
                && (parent.execution_block_hash.is_none()
                    || payload.execution_block_hash.is_some()),
            InvalidBlock::InconsistentExecutionStatus {
                root: block_root,
                execution_block_hash: payload.execution_block_hash,
                execution_status: payload.execution_status,
            },
        );

        let current_slot = self.store.current_slot();

        // > Blocks cannot be in the future.
        // > If they are, their consideration must be delayed until they are in the past.
        ensure!(
            slot <= current_slot,
            InvalidBlock::FutureSlot {
                root: block_root,
                slot,
                current_slot,
            },
        );

        // > Check that block is later than the finalized epoch slot
        // > (optimization to reduce calls to get_ancestor)
        let finalized_slot = self.store.finalized_slot();

        ensure!(
            slot > finalized_slot,
            InvalidBlock::FinalizedSlot {
                root: block_root,
                slot,
                finalized_slot,
            },
        );

        // > Check block is a descendant of the finalized block at the checkpoint finalized slot
        let finalized_root = self.store.finalized_checkpoint().root;

        ensure!(
            self.proto_array.is_descendant(finalized_root, parent_root),
            InvalidBlock::NotDescendantOfFinalized {
                root: block_root,
                finalized_root,
            },
        );

        let block_epoch = misc::compute_epoch_at_slot::<P>(slot);
        let target_slot = misc::compute_start_slot_at_epoch::<P>(block_epoch);

        let target_root = if slot == target_slot {
            block_root
        } else {
            self.proto_array
                .ancestor_at_slot(parent_root, target_slot)
                .map(|node| node.root)
                .ok_or(InvalidBlock::NotDescendantOfFinalized {
                    root: block_root,
                    finalized_root,
                })?
        };

        // > Add proposer score boost if the block is timely
        let timely = slot == current_slot && block_delay < self.chain_config.attestation_due();

        if self.store_config.proposer_boost_enabled
            && timely
            && self.store.proposer_boost_root().is_zero()
        {
            self.store.set_proposer_boost_root(block_root);
        }

        let checkpoints = self.state_transition.block_checkpoints(post_state);
        let state_transition = &self.state_transition;

        // > Update checkpoints in store if necessary
        let mut changes = self.store.update_checkpoints(
            checkpoints.justified,
            checkpoints.finalized,
            || state_transition.justified_balances(post_state, checkpoints.justified),
        );

        // > Eagerly compute unrealized justification and finality
        self.store.update_unrealized_checkpoints(
            checkpoints.unrealized_justified,
            checkpoints.unrealized_finalized,
            || state_transition.justified_balances(post_state, checkpoints.unrealized_justified),
        );

        // > If block is from a prior epoch, apply the realized values
        if block_epoch < self.store.current_epoch() {
            changes = changes
                | self.store.update_checkpoints(
                    checkpoints.unrealized_justified,
                    checkpoints.unrealized_finalized,
                    || {
                        state_transition
                            .justified_balances(post_state, checkpoints.unrealized_justified)
                    },
                );
        }

        self.proto_array.insert(
            ProtoBlock {
                slot,
                root: block_root,
                parent_root,
                state_root,
                target_root,
                checkpoints,
                execution_block_hash: payload.execution_block_hash,
                execution_status: payload.execution_status,
                data_availability_status: payload.data_availability_status,
                timely,
            },
            self.store.viability_context(),
        )?;

        debug!(
            "block {block_root:?} at slot {slot} added to fork choice \
             (timely: {timely}, execution status: {}, checkpoints changed: {})",
            payload.execution_status,
            changes.any(),
        );

        Ok(())
    }

    /// Records the votes in `attestation`.
    ///
    /// Votes are applied to weights once the slot of the attestation is in the past.
    /// `attestation_data_root` is the hash tree root of `attestation.data`. It is used to skip
    /// validation of data that has already been validated.
    pub fn on_attestation(
        &mut self,
        attestation: &IndexedAttestation,
        attestation_data_root: H256,
        origin: AttestationOrigin,
    ) -> Result<()> {
        let IndexedAttestation {
            attesting_indices,
            data,
        } = attestation;

        ensure!(
            !attesting_indices.is_empty(),
            InvalidAttestation::Empty {
                beacon_block_root: data.beacon_block_root,
            },
        );

        let already_validated = self
            .validated_attestation_data
            .get(&data.target.epoch)
            .is_some_and(|roots| roots.contains(&attestation_data_root));

        if !already_validated {
            self.validate_attestation_data(*data, origin)?;

            self.validated_attestation_data
                .entry(data.target.epoch)
                .or_default()
                .insert(attestation_data_root);
        }

        // > Attestations can only affect the fork choice of subsequent slots.
        // > Delay consideration in the fork choice until their slot is in the past.
        if data.slot < self.store.current_slot() {
            self.apply_votes(attesting_indices, data.beacon_block_root, data.target.epoch)?;
        } else {
            self.queued_attestations.push(QueuedAttestation {
                slot: data.slot,
                attesting_indices: attesting_indices.clone(),
                block_root: data.beacon_block_root,
                target_epoch: data.target.epoch,
            });
        }

        Ok(())
    }

    /// [`on_attester_slashing`](https://github.com/ethereum/consensus-specs/blob/v1.4.0/specs/phase0/fork-choice.md#on_attester_slashing)
    ///
    /// Returns the number of validators that were newly found to be equivocating.
    pub fn on_attester_slashing(&mut self, attester_slashing: &AttesterSlashing) -> Result<usize> {
        let AttesterSlashing {
            attestation_1,
            attestation_2,
        } = attester_slashing;

        ensure!(
            predicates::is_slashable_attestation_data(attestation_1.data, attestation_2.data),
            Error::AttesterSlashingNotSlashable,
        );

        // Attesting indices are sorted, so the intersection can be computed in one pass.
        let slashable_indices = attestation_1
            .attesting_indices
            .iter()
            .copied()
            .merge_join_by(attestation_2.attesting_indices.iter().copied(), Ord::cmp)
            .filter_map(|either_or_both| match either_or_both {
                EitherOrBoth::Both(validator_index, _) => Some(validator_index),
                _ => None,
            });

        let equivocating = self.store.apply_equivocation(slashable_indices);

        if equivocating > 0 {
            info!("{equivocating} validators excluded from fork choice for equivocating");
        }

        Ok(equivocating)
    }

    /// Applies pending votes and returns the root of the head block.
    ///
    /// Proposer boost is included in weights until the next call.
    pub fn get_head(&mut self) -> Result<H256> {
        let deltas = self.store.compute_deltas(self.proto_array.indices())?;

        let proposer_boost = if self.store_config.proposer_boost_enabled {
            self.store
                .proposer_boost(self.chain_config.proposer_score_boost)
        } else {
            ProposerBoost::default()
        };

        let context = self.store.viability_context();

        self.proto_array
            .apply_score_changes(deltas, proposer_boost, context)?;

        let justified_root = self.store.justified_checkpoint().root;

        let start_root = if self.proto_array.contains(justified_root) {
            justified_root
        } else {
            let finalized_root = self.store.finalized_checkpoint().root;

            warn!(
                "justified block {justified_root:?} is not in fork choice; \
                 searching for head from finalized block {finalized_root:?}",
            );

            finalized_root
        };

        let head_root = self.proto_array.find_head(start_root, context)?;

        if head_root != self.head_root {
            debug!("head changed from {:?} to {head_root:?}", self.head_root);
            self.head_root = head_root;
        }

        self.forkchoice_update_parameters = self.compute_update_parameters(head_root);

        Ok(head_root)
    }

    /// Decides whether a block proposed at `slot` should be built on `head_root` or its parent.
    ///
    /// Weights are those from the last call to [`Self::get_head`].
    pub fn get_proposer_head(
        &self,
        head_root: H256,
        time_into_slot: Duration,
        slot: Slot,
    ) -> Result<ProposerHeadInfo> {
        let current_slot = self.store.current_slot();

        ensure!(
            slot == current_slot,
            Error::ProposerHeadSlotMismatch { slot, current_slot },
        );

        let head = self
            .proto_array
            .node(head_root)
            .ok_or(Error::UnknownBlock { root: head_root })?;

        let parent = head
            .parent
            .map(|index| self.proto_array.node_at(index))
            .transpose()?;

        let candidate = ReorgCandidate {
            head,
            parent,
            slot,
            time_into_slot,
            finalized_epoch: self.store.finalized_checkpoint().epoch,
            proposer_boost_root: self.store.proposer_boost_root(),
            committee_weight: self.store.committee_weight(),
        };

        let info =
            proposer_head::proposer_head::<P>(&self.chain_config, &self.store_config, candidate);

        match info.not_reorged_reason {
            Some(reason) => debug!("not reorging head {head_root:?} at slot {slot}: {reason}"),
            None => debug!(
                "proposing on parent {:?} of late head {head_root:?} at slot {slot}",
                info.proposer_head,
            ),
        }

        Ok(info)
    }

    /// Applies a payload validation result from the execution engine.
    ///
    /// An invalid payload makes its block and all descendants permanently ineligible for head
    /// and triggers head recomputation.
    pub fn update_execution_status(
        &mut self,
        block_hash: ExecutionBlockHash,
        validation: PayloadValidation,
    ) -> Result<()> {
        let PayloadValidation {
            status,
            latest_valid_hash,
        } = validation;

        let block_root = self
            .proto_array
            .root_by_execution_block_hash(block_hash)
            .ok_or(Error::UnknownExecutionBlockHash { block_hash })?;

        match status.execution_status() {
            ExecutionStatus::Invalid => {
                // `latest_valid_hash` is meaningless for `INVALID_BLOCK_HASH`.
                let latest_valid_hash = latest_valid_hash
                    .filter(|_| status != PayloadValidationStatus::InvalidBlockHash);

                warn!(
                    "execution engine reported payload {block_hash:?} of block {block_root:?} \
                     as {status:?} (latest valid hash: {latest_valid_hash:?})",
                );

                self.proto_array
                    .invalidate_payloads(block_root, latest_valid_hash)?;

                self.get_head()?;
            }
            execution_status => self
                .proto_array
                .set_execution_status(block_root, execution_status)?,
        }

        Ok(())
    }

    pub fn set_data_availability(
        &mut self,
        block_root: H256,
        status: DataAvailabilityStatus,
    ) -> Result<()> {
        self.proto_array.set_data_availability(block_root, status)
    }

    /// Removes blocks that can no longer become part of the canonical chain.
    ///
    /// `finalized_root` must be the finalized block or one of its ancestors. Each call must
    /// follow an advance of the finalized checkpoint since the previous call that pruned.
    /// Returns the removed blocks, which may be empty if the prune threshold was not reached.
    pub fn prune(&mut self, finalized_root: H256) -> Result<Vec<ProtoNode>> {
        let finalized_checkpoint = self.store.finalized_checkpoint();

        ensure!(
            self.proto_array
                .is_descendant(finalized_root, finalized_checkpoint.root),
            Error::PruneRootNotFinalized {
                root: finalized_root,
                finalized_root: finalized_checkpoint.root,
            },
        );

        if let Some(last_pruned_epoch) = self.last_pruned_epoch {
            ensure!(
                finalized_checkpoint.epoch > last_pruned_epoch,
                Error::FinalityNotNewer {
                    finalized_epoch: finalized_checkpoint.epoch,
                    last_pruned_epoch,
                },
            );
        }

        let removed = self
            .proto_array
            .maybe_prune(finalized_root, self.store_config.prune_threshold)?;

        if !removed.is_empty() {
            self.last_pruned_epoch = Some(finalized_checkpoint.epoch);
        }

        Ok(removed)
    }

    #[must_use]
    pub const fn current_slot(&self) -> Slot {
        self.store.current_slot()
    }

    #[must_use]
    pub const fn justified_checkpoint(&self) -> Checkpoint {
        self.store.justified_checkpoint()
    }

    #[must_use]
    pub const fn finalized_checkpoint(&self) -> Checkpoint {
        self.store.finalized_checkpoint()
    }

    #[must_use]
    pub const fn best_justified_checkpoint(&self) -> Checkpoint {
        self.store.best_justified_checkpoint()
    }

    #[must_use]
    pub const fn unrealized_justified_checkpoint(&self) -> Checkpoint {
        self.store.unrealized_justified_checkpoint()
    }

    #[must_use]
    pub const fn unrealized_finalized_checkpoint(&self) -> Checkpoint {
        self.store.unrealized_finalized_checkpoint()
    }

    #[must_use]
    pub const fn proposer_boost_root(&self) -> H256 {
        self.store.proposer_boost_root()
    }

    /// Root of the head as of the last call to [`Self::get_head`].
    #[must_use]
    pub const fn head_root(&self) -> H256 {
        self.head_root
    }

    #[must_use]
    pub const fn forkchoice_update_parameters(&self) -> ForkchoiceUpdateParameters {
        self.forkchoice_update_parameters
    }

    #[must_use]
    pub fn queued_attestation_count(&self) -> usize {
        self.queued_attestations.len()
    }

    #[must_use]
    pub fn contains_block(&self, block_root: H256) -> bool {
        self.proto_array.contains(block_root)
    }

    #[must_use]
    pub fn get_block(&self, block_root: H256) -> Option<&ProtoNode> {
        self.proto_array.node(block_root)
    }

    /// Returns the root of the block at `slot` in the chain ending with `block_root`.
    ///
    /// If `slot` was skipped, the root of the latest block before it is returned.
    #[must_use]
    pub fn get_ancestor(&self, block_root: H256, slot: Slot) -> Option<H256> {
        self.proto_array
            .ancestor_at_slot(block_root, slot)
            .map(|node| node.root)
    }

    #[must_use]
    pub fn is_descendant(&self, ancestor_root: H256, descendant_root: H256) -> bool {
        self.proto_array
            .is_descendant(ancestor_root, descendant_root)
    }

    #[must_use]
    pub fn is_optimistic(&self, block_root: H256) -> Option<bool> {
        self.proto_array
            .node(block_root)
            .map(|node| node.execution_status.is_optimistic())
    }

    #[must_use]
    pub fn get_all_nodes(&self) -> &[ProtoNode] {
        self.proto_array.nodes()
    }

    /// Blocks not in the chain ending with `block_root`.
    pub fn get_non_ancestors(&self, block_root: H256) -> impl Iterator<Item = &ProtoNode> {
        self.proto_array.iter_non_ancestors(block_root)
    }

    /// Tips of all known forks, including ones that cannot become the head.
    #[must_use]
    pub fn get_heads(&self) -> Vec<&ProtoNode> {
        self.proto_array.heads()
    }

    #[must_use]
    pub fn latest_vote(&self, validator_index: ValidatorIndex) -> Option<H256> {
        self.store
            .latest_vote(validator_index)
            .map(|vote| vote.next_root)
    }

    fn validate_attestation_data(
        &self,
        data: AttestationData,
        origin: AttestationOrigin,
    ) -> Result<()> {
        let AttestationData {
            slot,
            beacon_block_root,
            target,
            ..
        } = data;

        // > If the given attestation is not from a beacon block message,
        // > we have to check the target epoch scope.
        if !origin.is_from_block() {
            let current_slot = self.store.current_slot();
            let current_epoch = self.store.current_epoch();
            let previous_epoch = misc::previous_epoch(current_epoch);

            // > Attestations must be from the current or previous epoch
            ensure!(
                target.epoch <= current_epoch,
                InvalidAttestation::FutureEpoch {
                    target_epoch: target.epoch,
                    current_epoch,
                },
            );

            ensure!(
                target.epoch >= previous_epoch,
                InvalidAttestation::PastEpoch {
                    target_epoch: target.epoch,
                    previous_epoch,
                },
            );

            ensure!(
                slot <= current_slot,
                InvalidAttestation::FutureSlot { slot, current_slot },
            );
        }

        // > Check that the epoch number and slot number are matching
        ensure!(
            target.epoch == misc::compute_epoch_at_slot::<P>(slot),
            InvalidAttestation::TargetEpochMismatch {
                target_epoch: target.epoch,
                slot,
            },
        );

        // > Attestation target must be for a known block.
        ensure!(
            self.proto_array.contains(target.root),
            InvalidAttestation::UnknownTargetBlock { root: target.root },
        );

        // > Attestations must be for a known block.
        let block = self
            .proto_array
            .node(beacon_block_root)
            .ok_or(InvalidAttestation::UnknownHeadBlock {
                root: beacon_block_root,
            })?;

        // > Attestations must not be for blocks in the future.
        ensure!(
            block.slot <= slot,
            InvalidAttestation::FutureBlock {
                root: beacon_block_root,
                block_slot: block.slot,
                slot,
            },
        );

        // > LMD vote must be consistent with FFG vote target
        let target_slot = misc::compute_start_slot_at_epoch::<P>(target.epoch);
        let expected = self.get_ancestor(beacon_block_root, target_slot);

        ensure!(
            expected == Some(target.root),
            InvalidAttestation::InconsistentTarget {
                target_root: target.root,
                expected,
            },
        );

        Ok(())
    }

    fn apply_votes(
        &mut self,
        attesting_indices: &[ValidatorIndex],
        block_root: H256,
        target_epoch: Epoch,
    ) -> Result<()> {
        for validator_index in attesting_indices.iter().copied() {
            self.store
                .process_attestation(validator_index, block_root, target_epoch)?;
        }

        Ok(())
    }

    fn apply_queued_attestations(&mut self) -> Result<()> {
        let current_slot = self.store.current_slot();

        let (due, pending): (Vec<_>, Vec<_>) = core::mem::take(&mut self.queued_attestations)
            .into_iter()
            .partition(|attestation| attestation.slot < current_slot);

        self.queued_attestations = pending;

        for attestation in due {
            self.apply_votes(
                &attestation.attesting_indices,
                attestation.block_root,
                attestation.target_epoch,
            )?;
        }

        Ok(())
    }

    // Gossip attestations older than the previous epoch are rejected, so their data cannot be
    // looked up anymore.
    fn prune_validated_attestation_data(&mut self) {
        let previous_epoch = misc::previous_epoch(self.store.current_epoch());

        self.validated_attestation_data =
            self.validated_attestation_data.split_off(&previous_epoch);
    }

    fn compute_update_parameters(&self, head_root: H256) -> ForkchoiceUpdateParameters {
        let block_hash = |root| {
            self.proto_array
                .node(root)
                .and_then(|node| node.execution_block_hash)
        };

        ForkchoiceUpdateParameters {
            head_root,
            head_block_hash: block_hash(head_root),
            justified_block_hash: block_hash(self.store.justified_checkpoint().root),
            finalized_block_hash: block_hash(self.store.finalized_checkpoint().root),
        }
    }
}
