use anyhow::Result;
use hash_hasher::HashedMap;
use im::HashSet;
use types::phase0::primitives::{Epoch, Gwei, ValidatorIndex, H256};

use crate::{error::Error, proto_array::NodeIndex};

/// Latest message of a single validator.
///
/// `current_root` is the vote whose weight is already included in the proto-array.
/// `next_root` is the latest vote received. The two are reconciled by [`compute_deltas`].
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub struct VoteTracker {
    pub current_root: H256,
    pub next_root: H256,
    pub next_epoch: Epoch,
}

impl VoteTracker {
    /// Records a vote unless a vote for the same or a later epoch has already been recorded.
    ///
    /// Returns `true` if the vote was recorded.
    pub fn update(&mut self, block_root: H256, target_epoch: Epoch) -> bool {
        if target_epoch > self.next_epoch || *self == Self::default() {
            self.next_root = block_root;
            self.next_epoch = target_epoch;
            return true;
        }

        false
    }
}

/// Computes per-node weight changes since the last call and marks pending votes as applied.
///
/// `old_balances` must be the balances passed as `new_balances` in the previous call.
/// Validators missing from either slice are treated as having a zero balance.
pub fn compute_deltas(
    indices: &HashedMap<H256, NodeIndex>,
    votes: &mut [VoteTracker],
    old_balances: &[Gwei],
    new_balances: &[Gwei],
    equivocating_indices: &HashSet<ValidatorIndex>,
) -> Result<Vec<i64>> {
    let mut deltas = vec![0; indices.len()];

    for (index, vote) in votes.iter_mut().enumerate() {
        if *vote == VoteTracker::default() {
            continue;
        }

        let validator_index = ValidatorIndex::try_from(index)?;
        let old_balance = signed_balance(validator_index, old_balances.get(index))?;
        let new_balance = signed_balance(validator_index, new_balances.get(index))?;

        if equivocating_indices.contains(&validator_index) {
            // The weight of the current vote is removed once. Later calls find a zero root.
            if let Some(node_index) = indices.get(&vote.current_root).copied() {
                deltas[node_index] -= old_balance;
            }

            vote.current_root = H256::zero();
            continue;
        }

        if vote.current_root == vote.next_root && old_balance == new_balance {
            continue;
        }

        if let Some(node_index) = indices.get(&vote.current_root).copied() {
            deltas[node_index] -= old_balance;
        }

        if let Some(node_index) = indices.get(&vote.next_root).copied() {
            deltas[node_index] += new_balance;
        }

        vote.current_root = vote.next_root;
    }

    Ok(deltas)
}

fn signed_balance(validator_index: ValidatorIndex, balance: Option<&Gwei>) -> Result<i64> {
    let balance = balance.copied().unwrap_or_default();

    balance
        .try_into()
        .map_err(|_| Error::BalanceOverflow {
            validator_index,
            balance,
        })
        .map_err(Into::into)
}
