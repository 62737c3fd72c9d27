//! Weighted block tree stored in a topologically ordered array.
//!
//! Every node is appended after its parent, so iterating from the end of the array visits
//! children before their parents. Weight changes and best descendants can then be propagated
//! to the root in a single backward pass.
//!
//! Relations between nodes are stored as indices into the array. Pruning compacts the array and
//! rewrites all indices, so an index must not be held across calls that mutate the array.

use core::marker::PhantomData;

use anyhow::{bail, ensure, Result};
use derivative::Derivative;
use hash_hasher::{HashedMap, HashedSet};
use helper_functions::misc;
use log::{debug, warn};
use types::{
    nonstandard::{DataAvailabilityStatus, ExecutionStatus},
    phase0::{
        consts::GENESIS_EPOCH,
        containers::Checkpoint,
        primitives::{ExecutionBlockHash, Gwei, Slot, H256},
    },
    preset::Preset,
};

use crate::{
    error::Error,
    misc::{BlockCheckpoints, ProposerBoost, ProtoBlock, ViabilityContext},
};

pub type NodeIndex = usize;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ProtoNode {
    pub slot: Slot,
    pub root: H256,
    pub parent: Option<NodeIndex>,
    pub state_root: H256,
    pub target_root: H256,
    pub checkpoints: BlockCheckpoints,
    pub weight: Gwei,
    pub best_child: Option<NodeIndex>,
    // `None` means the node is its own best descendant.
    pub best_descendant: Option<NodeIndex>,
    pub execution_block_hash: Option<ExecutionBlockHash>,
    pub execution_status: ExecutionStatus,
    pub data_availability_status: DataAvailabilityStatus,
    pub timely: bool,
}

impl ProtoNode {
    const fn new(block: ProtoBlock, parent: Option<NodeIndex>) -> Self {
        let ProtoBlock {
            slot,
            root,
            parent_root: _,
            state_root,
            target_root,
            checkpoints,
            execution_block_hash,
            execution_status,
            data_availability_status,
            timely,
        } = block;

        Self {
            slot,
            root,
            parent,
            state_root,
            target_root,
            checkpoints,
            weight: 0,
            best_child: None,
            best_descendant: None,
            execution_block_hash,
            execution_status,
            data_availability_status,
            timely,
        }
    }
}

#[derive(Derivative)]
#[derivative(Clone(bound = ""), Debug(bound = ""))]
pub struct ProtoArray<P: Preset> {
    nodes: Vec<ProtoNode>,
    indices: HashedMap<H256, NodeIndex>,
    execution_indices: HashedMap<ExecutionBlockHash, NodeIndex>,
    previous_proposer_boost: ProposerBoost,
    // Set when a status change may have made a best descendant nonviable.
    best_descendants_stale: bool,
    #[derivative(Debug = "ignore")]
    phantom: PhantomData<P>,
}

impl<P: Preset> ProtoArray<P> {
    /// Creates an array containing only `anchor`, which becomes the root of the tree.
    #[must_use]
    pub fn new(anchor: ProtoBlock) -> Self {
        let mut proto_array = Self {
            nodes: vec![],
            indices: HashedMap::default(),
            execution_indices: HashedMap::default(),
            previous_proposer_boost: ProposerBoost::default(),
            best_descendants_stale: false,
            phantom: PhantomData,
        };

        proto_array.push(anchor, None);
        proto_array
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn contains(&self, root: H256) -> bool {
        self.indices.contains_key(&root)
    }

    #[must_use]
    pub fn index(&self, root: H256) -> Option<NodeIndex> {
        self.indices.get(&root).copied()
    }

    #[must_use]
    pub const fn indices(&self) -> &HashedMap<H256, NodeIndex> {
        &self.indices
    }

    #[must_use]
    pub fn node(&self, root: H256) -> Option<&ProtoNode> {
        self.nodes.get(self.index(root)?)
    }

    pub fn node_at(&self, index: NodeIndex) -> Result<&ProtoNode> {
        self.nodes
            .get(index)
            .ok_or_else(|| Error::InvalidNodeIndex { index }.into())
    }

    #[must_use]
    pub fn nodes(&self) -> &[ProtoNode] {
        &self.nodes
    }

    #[must_use]
    pub fn root_by_execution_block_hash(&self, block_hash: ExecutionBlockHash) -> Option<H256> {
        let index = self.execution_indices.get(&block_hash).copied()?;
        self.nodes.get(index).map(|node| node.root)
    }

    #[must_use]
    pub const fn previous_proposer_boost(&self) -> ProposerBoost {
        self.previous_proposer_boost
    }

    /// Adds a block whose parent is already present.
    ///
    /// Inserting a block that is already present does nothing.
    pub fn insert(&mut self, block: ProtoBlock, context: ViabilityContext) -> Result<NodeIndex> {
        if let Some(index) = self.index(block.root) {
            return Ok(index);
        }

        let ProtoBlock {
            root, parent_root, ..
        } = block;

        let parent_index = self
            .index(parent_root)
            .ok_or(Error::UnknownParent { root, parent_root })?;

        ensure!(
            !self.node_at(parent_index)?.execution_status.is_invalid(),
            Error::InvalidParent { root, parent_root },
        );

        let index = self.push(block, Some(parent_index));

        if block.execution_status.is_valid() {
            self.propagate_valid_payload(root, parent_index)?;
        }

        self.maybe_update_best_child_and_descendant(parent_index, index, context)?;

        Ok(index)
    }

    /// Applies accumulated vote changes and proposer boost, then recomputes best descendants.
    ///
    /// `deltas[i]` is the change in weight of votes for node `i` alone. The boost from the
    /// previous call is removed, so `proposer_boost` only lasts until the next call.
    pub fn apply_score_changes(
        &mut self,
        mut deltas: Vec<i64>,
        proposer_boost: ProposerBoost,
        context: ViabilityContext,
    ) -> Result<()> {
        ensure!(
            deltas.len() == self.nodes.len(),
            Error::DeltaCountMismatch {
                deltas: deltas.len(),
                nodes: self.nodes.len(),
            },
        );

        let previous_proposer_boost = core::mem::take(&mut self.previous_proposer_boost);

        if previous_proposer_boost.is_active() {
            if let Some(index) = self.index(previous_proposer_boost.root) {
                let ProposerBoost { root, score } = previous_proposer_boost;
                let delta = &mut deltas[index];
                *delta = delta
                    .checked_sub(signed(score, root)?)
                    .ok_or(Error::DeltaOverflow { root })?;
            }
        }

        if proposer_boost.is_active() {
            if let Some(index) = self.index(proposer_boost.root) {
                let ProposerBoost { root, score } = proposer_boost;
                let delta = &mut deltas[index];
                *delta = delta
                    .checked_add(signed(score, root)?)
                    .ok_or(Error::DeltaOverflow { root })?;
                self.previous_proposer_boost = proposer_boost;
            }
        }

        for index in (0..self.nodes.len()).rev() {
            let node = &mut self.nodes[index];

            // Invalid blocks and their votes do not count toward the weight of their ancestors.
            let delta = if node.execution_status.is_invalid() {
                -signed(node.weight, node.root)?
            } else {
                deltas[index]
            };

            node.weight = node
                .weight
                .checked_add_signed(delta)
                .ok_or(Error::WeightOutOfRange {
                    root: node.root,
                    weight: node.weight,
                    delta,
                })?;

            if let Some(parent_index) = node.parent {
                let root = node.root;
                let parent_delta = deltas
                    .get_mut(parent_index)
                    .ok_or(Error::InvalidNodeIndex {
                        index: parent_index,
                    })?;

                *parent_delta = parent_delta
                    .checked_add(delta)
                    .ok_or(Error::DeltaOverflow { root })?;
            }
        }

        self.update_best_descendants(context)
    }

    /// Returns the best viable descendant of `start_root`, or `start_root` itself if it has none.
    pub fn find_head(&mut self, start_root: H256, context: ViabilityContext) -> Result<H256> {
        if self.best_descendants_stale {
            self.update_best_descendants(context)?;
        }

        let start_index = self
            .index(start_root)
            .ok_or(Error::UnknownBlock { root: start_root })?;

        let start_node = self.node_at(start_index)?;
        let best_node = self.node_at(start_node.best_descendant.unwrap_or(start_index))?;

        if self.node_is_viable_for_head(best_node, context) {
            return Ok(best_node.root);
        }

        debug!("no viable descendant of {start_root:?} found; using it as the head");

        Ok(start_root)
    }

    /// Applies a status reported by the execution engine to a single block.
    ///
    /// `Valid` spreads to ancestors awaiting validation. `Invalid` spreads to all descendants.
    pub fn set_execution_status(&mut self, root: H256, new: ExecutionStatus) -> Result<()> {
        let index = self.index(root).ok_or(Error::UnknownBlock { root })?;
        let old = self.node_at(index)?.execution_status;

        match (old, new) {
            (ExecutionStatus::PreMerge, ExecutionStatus::PreMerge)
            | (ExecutionStatus::Syncing, ExecutionStatus::Syncing)
            | (ExecutionStatus::Valid, ExecutionStatus::Syncing | ExecutionStatus::Valid)
            | (ExecutionStatus::Invalid, ExecutionStatus::Syncing | ExecutionStatus::Invalid) => {}
            (ExecutionStatus::PreMerge, ExecutionStatus::Syncing) => {
                self.nodes[index].execution_status = ExecutionStatus::Syncing;
            }
            (ExecutionStatus::Syncing, ExecutionStatus::Valid) => {
                self.propagate_valid_payload(root, index)?;
            }
            (ExecutionStatus::PreMerge | ExecutionStatus::Syncing, ExecutionStatus::Invalid) => {
                self.mark_invalid(index)?;
                self.invalidate_descendants(index)?;
            }
            (ExecutionStatus::Valid, ExecutionStatus::Invalid) => {
                bail!(Error::ValidPayloadInvalidated { root });
            }
            (
                ExecutionStatus::Syncing | ExecutionStatus::Valid | ExecutionStatus::Invalid,
                ExecutionStatus::PreMerge,
            )
            | (ExecutionStatus::PreMerge | ExecutionStatus::Invalid, ExecutionStatus::Valid) => {
                bail!(Error::ExecutionStatusTransition { root, old, new });
            }
        }

        self.best_descendants_stale = true;

        Ok(())
    }

    /// Handles an `INVALID` response for the payload of `root`.
    ///
    /// If `latest_valid_hash` identifies an ancestor of `root`, every block between that ancestor
    /// and `root` is invalidated and the ancestor is marked valid. A zero hash invalidates all
    /// ancestors with unverified payloads. An unknown hash only invalidates `root`.
    /// Fails if the payload of `root` has already been validated.
    pub fn invalidate_payloads(
        &mut self,
        root: H256,
        latest_valid_hash: Option<ExecutionBlockHash>,
    ) -> Result<()> {
        let index = self.index(root).ok_or(Error::UnknownBlock { root })?;

        ensure!(
            !self.node_at(index)?.execution_status.is_valid(),
            Error::ValidPayloadInvalidated { root },
        );

        let mut invalid_indices = vec![index];
        let mut latest_valid_index = None;

        if let Some(latest_valid_hash) = latest_valid_hash {
            let mut candidates = vec![];

            for (ancestor_index, ancestor) in self.ancestors_with_indices(index) {
                if ancestor.execution_block_hash == Some(latest_valid_hash) {
                    latest_valid_index = Some(ancestor_index);
                    break;
                }

                if matches!(
                    ancestor.execution_status,
                    ExecutionStatus::PreMerge | ExecutionStatus::Valid,
                ) {
                    break;
                }

                candidates.push(ancestor_index);
            }

            if latest_valid_index.is_some() || latest_valid_hash.is_zero() {
                invalid_indices = candidates;
            }
        }

        if let Some(latest_valid_index) = latest_valid_index {
            let latest_valid_root = self.node_at(latest_valid_index)?.root;
            self.propagate_valid_payload(latest_valid_root, latest_valid_index)?;
        }

        let Some(oldest_invalid_index) = invalid_indices.iter().copied().min() else {
            self.best_descendants_stale = true;
            return Ok(());
        };

        for invalid_index in invalid_indices {
            self.mark_invalid(invalid_index)?;
        }

        self.invalidate_descendants(oldest_invalid_index)?;
        self.best_descendants_stale = true;

        Ok(())
    }

    pub fn set_data_availability(
        &mut self,
        root: H256,
        new: DataAvailabilityStatus,
    ) -> Result<()> {
        let index = self.index(root).ok_or(Error::UnknownBlock { root })?;
        let node = &mut self.nodes[index];
        let old = node.data_availability_status;

        match (old, new) {
            (DataAvailabilityStatus::PreData, _)
            | (
                DataAvailabilityStatus::NotAvailable,
                DataAvailabilityStatus::Available
                | DataAvailabilityStatus::NotAvailable
                | DataAvailabilityStatus::TimedOut,
            )
            | (DataAvailabilityStatus::Available, DataAvailabilityStatus::Available)
            | (DataAvailabilityStatus::TimedOut, DataAvailabilityStatus::TimedOut) => {
                node.data_availability_status = new;
            }
            (
                DataAvailabilityStatus::NotAvailable
                | DataAvailabilityStatus::Available
                | DataAvailabilityStatus::TimedOut,
                DataAvailabilityStatus::PreData,
            )
            | (
                DataAvailabilityStatus::Available,
                DataAvailabilityStatus::NotAvailable | DataAvailabilityStatus::TimedOut,
            )
            | (
                DataAvailabilityStatus::TimedOut,
                DataAvailabilityStatus::Available | DataAvailabilityStatus::NotAvailable,
            ) => {
                bail!(Error::DataAvailabilityTransition { root, old, new });
            }
        }

        self.best_descendants_stale = true;

        Ok(())
    }

    /// Removes every node that is not the finalized node or one of its descendants.
    ///
    /// Does nothing if fewer than `prune_threshold` nodes precede the finalized node.
    /// Returns the removed nodes.
    pub fn maybe_prune(
        &mut self,
        finalized_root: H256,
        prune_threshold: usize,
    ) -> Result<Vec<ProtoNode>> {
        let finalized_index = self
            .index(finalized_root)
            .ok_or(Error::FinalizedNodeUnknown {
                root: finalized_root,
            })?;

        if finalized_index < prune_threshold {
            return Ok(vec![]);
        }

        let old_nodes = core::mem::take(&mut self.nodes);
        let mut new_indices = vec![None; old_nodes.len()];
        let mut removed = vec![];

        for (old_index, mut node) in old_nodes.into_iter().enumerate() {
            let new_parent = node.parent.and_then(|parent| new_indices[parent]);

            let keep = old_index == finalized_index
                || (old_index > finalized_index && new_parent.is_some());

            if keep {
                new_indices[old_index] = Some(self.nodes.len());
                node.parent = new_parent;
                self.nodes.push(node);
            } else {
                removed.push(node);
            }
        }

        // Best children and descendants are always descendants, so none of them were removed.
        for node in &mut self.nodes {
            node.best_child = node.best_child.and_then(|index| new_indices[index]);
            node.best_descendant = node.best_descendant.and_then(|index| new_indices[index]);
        }

        self.indices = self
            .nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (node.root, index))
            .collect();

        self.execution_indices = self
            .nodes
            .iter()
            .enumerate()
            .filter_map(|(index, node)| Some((node.execution_block_hash?, index)))
            .collect();

        debug!(
            "pruned {} nodes from fork choice (finalized root: {finalized_root:?}, remaining: {})",
            removed.len(),
            self.nodes.len(),
        );

        Ok(removed)
    }

    /// Returns `true` if `descendant_root` is `ancestor_root` or one of its descendants.
    ///
    /// Unknown roots are not descendants of anything.
    #[must_use]
    pub fn is_descendant(&self, ancestor_root: H256, descendant_root: H256) -> bool {
        let Some(ancestor) = self.node(ancestor_root) else {
            return false;
        };

        self.iter_ancestors(descendant_root)
            .take_while(|node| node.slot >= ancestor.slot)
            .any(|node| node.root == ancestor_root)
    }

    /// Iterates over the node with `root` and its ancestors, starting with the node itself.
    pub fn iter_ancestors(&self, root: H256) -> impl Iterator<Item = &ProtoNode> {
        core::iter::successors(self.node(root), |node| {
            node.parent.and_then(|parent| self.nodes.get(parent))
        })
    }

    /// Iterates over nodes that are neither the node with `root` nor any of its ancestors.
    pub fn iter_non_ancestors(&self, root: H256) -> impl Iterator<Item = &ProtoNode> {
        let ancestors = self
            .iter_ancestors(root)
            .map(|node| node.root)
            .collect::<HashedSet<_>>();

        self.nodes
            .iter()
            .filter(move |node| !ancestors.contains(&node.root))
    }

    /// Returns the latest ancestor of `root` (possibly the node itself) at or before `slot`.
    #[must_use]
    pub fn ancestor_at_slot(&self, root: H256, slot: Slot) -> Option<&ProtoNode> {
        self.iter_ancestors(root).find(|node| node.slot <= slot)
    }

    pub fn nodes_at_slot(&self, slot: Slot) -> impl Iterator<Item = &ProtoNode> {
        self.nodes.iter().filter(move |node| node.slot == slot)
    }

    /// Returns all nodes without children, viable or not.
    #[must_use]
    pub fn heads(&self) -> Vec<&ProtoNode> {
        let mut has_children = vec![false; self.nodes.len()];

        for parent in self.nodes.iter().filter_map(|node| node.parent) {
            has_children[parent] = true;
        }

        self.nodes
            .iter()
            .zip(has_children)
            .filter(|(_, has_children)| !has_children)
            .map(|(node, _)| node)
            .collect()
    }

    fn push(&mut self, block: ProtoBlock, parent: Option<NodeIndex>) -> NodeIndex {
        let index = self.nodes.len();

        self.indices.insert(block.root, index);

        if let Some(block_hash) = block.execution_block_hash {
            self.execution_indices.insert(block_hash, index);
        }

        self.nodes.push(ProtoNode::new(block, parent));

        index
    }

    fn ancestors_with_indices(
        &self,
        index: NodeIndex,
    ) -> impl Iterator<Item = (NodeIndex, &ProtoNode)> {
        core::iter::successors(
            self.nodes.get(index).map(|node| (index, node)),
            |(_, node)| {
                let parent = node.parent?;
                Some((parent, self.nodes.get(parent)?))
            },
        )
    }

    fn update_best_descendants(&mut self, context: ViabilityContext) -> Result<()> {
        for index in (0..self.nodes.len()).rev() {
            if let Some(parent_index) = self.nodes[index].parent {
                self.maybe_update_best_child_and_descendant(parent_index, index, context)?;
            }
        }

        self.best_descendants_stale = false;

        Ok(())
    }

    fn maybe_update_best_child_and_descendant(
        &mut self,
        parent_index: NodeIndex,
        child_index: NodeIndex,
        context: ViabilityContext,
    ) -> Result<()> {
        let child = self.node_at(child_index)?;
        let parent = self.node_at(parent_index)?;

        let child_leads_to_viable_head = self.node_leads_to_viable_head(child, context)?;

        let change_to_none = (None, None);
        let change_to_child = (
            Some(child_index),
            Some(child.best_descendant.unwrap_or(child_index)),
        );
        let no_change = (parent.best_child, parent.best_descendant);

        let (best_child, best_descendant) = match parent.best_child {
            Some(best_child_index) if best_child_index == child_index => {
                if child_leads_to_viable_head {
                    change_to_child
                } else {
                    change_to_none
                }
            }
            Some(best_child_index) => {
                let best_child = self.node_at(best_child_index)?;
                let best_child_leads_to_viable_head =
                    self.node_leads_to_viable_head(best_child, context)?;

                // Viability comes first. Ties in weight are broken by root so that the outcome
                // does not depend on the order blocks were received in.
                let child_is_better =
                    match (child_leads_to_viable_head, best_child_leads_to_viable_head) {
                        (true, false) => true,
                        (false, true) => false,
                        (true, true) | (false, false) => child
                            .weight
                            .cmp(&best_child.weight)
                            .then_with(|| child.root.cmp(&best_child.root))
                            .is_gt(),
                    };

                if child_is_better {
                    change_to_child
                } else {
                    no_change
                }
            }
            None if child_leads_to_viable_head => change_to_child,
            None => change_to_none,
        };

        let parent = &mut self.nodes[parent_index];
        parent.best_child = best_child;
        parent.best_descendant = best_descendant;

        Ok(())
    }

    fn node_leads_to_viable_head(
        &self,
        node: &ProtoNode,
        context: ViabilityContext,
    ) -> Result<bool> {
        let best_descendant_is_viable = match node.best_descendant {
            Some(index) => self.node_is_viable_for_head(self.node_at(index)?, context),
            None => false,
        };

        Ok(best_descendant_is_viable || self.node_is_viable_for_head(node, context))
    }

    /// [`filter_block_tree`](https://github.com/ethereum/consensus-specs/blob/v1.4.0/specs/phase0/fork-choice.md#filter_block_tree)
    /// extended with the execution and data availability status of the block.
    fn node_is_viable_for_head(&self, node: &ProtoNode, context: ViabilityContext) -> bool {
        if node.execution_status.is_invalid() || node.data_availability_status.is_not_available()
        {
            return false;
        }

        let ViabilityContext {
            justified_checkpoint,
            finalized_checkpoint,
            current_slot,
        } = context;

        let current_epoch = misc::compute_epoch_at_slot::<P>(current_slot);

        // > If the previous epoch is justified, the block should be pulled-up.
        // > In this case, check that unrealized justification is higher than the store
        // > and that the voting source is not more than two epochs ago
        let voting_source = if misc::compute_epoch_at_slot::<P>(node.slot) < current_epoch {
            node.checkpoints.unrealized_justified
        } else {
            node.checkpoints.justified
        };

        let correct_justified = justified_checkpoint.epoch == GENESIS_EPOCH
            || voting_source.epoch == justified_checkpoint.epoch
            || voting_source.epoch + 2 >= current_epoch;

        let correct_finalized = finalized_checkpoint.epoch == GENESIS_EPOCH
            || self.is_finalized_checkpoint_or_descendant(node, finalized_checkpoint);

        correct_justified && correct_finalized
    }

    fn is_finalized_checkpoint_or_descendant(
        &self,
        node: &ProtoNode,
        finalized_checkpoint: Checkpoint,
    ) -> bool {
        // Checkpoints of a block are always its ancestors.
        if node.checkpoints.contains(finalized_checkpoint) {
            return true;
        }

        let finalized_slot = misc::compute_start_slot_at_epoch::<P>(finalized_checkpoint.epoch);

        core::iter::successors(Some(node), |node| {
            node.parent.and_then(|parent| self.nodes.get(parent))
        })
        .find(|ancestor| ancestor.root == finalized_checkpoint.root || ancestor.slot <= finalized_slot)
        .is_some_and(|ancestor| ancestor.root == finalized_checkpoint.root)
    }

    fn propagate_valid_payload(&mut self, valid_root: H256, start_index: NodeIndex) -> Result<()> {
        let mut next_index = Some(start_index);

        while let Some(index) = next_index {
            let node = self
                .nodes
                .get_mut(index)
                .ok_or(Error::InvalidNodeIndex { index })?;

            match node.execution_status {
                ExecutionStatus::Syncing => {
                    node.execution_status = ExecutionStatus::Valid;
                    next_index = node.parent;
                }
                ExecutionStatus::PreMerge | ExecutionStatus::Valid => break,
                ExecutionStatus::Invalid => bail!(Error::InvalidAncestorOfValidPayload {
                    root: valid_root,
                    ancestor_root: node.root,
                }),
            }
        }

        Ok(())
    }

    fn mark_invalid(&mut self, index: NodeIndex) -> Result<()> {
        let node = self
            .nodes
            .get_mut(index)
            .ok_or(Error::InvalidNodeIndex { index })?;

        ensure!(
            !node.execution_status.is_valid(),
            Error::ValidPayloadInvalidated { root: node.root },
        );

        if !node.execution_status.is_invalid() {
            warn!("execution payload of block {:?} is invalid", node.root);
            node.execution_status = ExecutionStatus::Invalid;
        }

        Ok(())
    }

    // Descendants always have higher indices, so one forward pass reaches all of them.
    fn invalidate_descendants(&mut self, start_index: NodeIndex) -> Result<()> {
        for index in start_index + 1..self.nodes.len() {
            let Some(parent_index) = self.nodes[index].parent else {
                continue;
            };

            if self.nodes[parent_index].execution_status.is_invalid() {
                self.mark_invalid(index)?;
            }
        }

        Ok(())
    }
}

fn signed(gwei: Gwei, root: H256) -> Result<i64> {
    gwei.try_into()
        .map_err(|_| Error::DeltaOverflow { root }.into())
}
