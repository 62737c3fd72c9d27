// Scenarios are built on the minimal preset: 8 slots per epoch, 6 second slots and 64 validators
// with equal balances. One validator is worth an eighth of a committee.
//
// Blocks are added in slots that have already started unless a test needs them to be timely.

use core::time::Duration;
use std::sync::Arc;

use fork_choice_store::StoreConfig;
use types::{
    config::Config,
    nonstandard::{
        DataAvailabilityStatus, ExecutionStatus, PayloadValidation, PayloadValidationStatus,
    },
    phase0::{
        containers::{BeaconBlockHeader, Checkpoint},
        primitives::H256,
    },
    preset::{Minimal, PresetName},
};

use crate::{
    error::{Error, InvalidAttestation, InvalidBlock},
    fork_choice::ForkChoice,
    helpers::{
        block_hash, checkpoints, root, start_of_epoch, Context, TestStateTransition,
        EFFECTIVE_BALANCE,
    },
    misc::{AnchorBlock, AttestationOrigin, BlockPayload, ProposerHeadInfo},
    proposer_head::NotReorgedReason,
};

#[test]
fn chain_config_must_match_preset() {
    let context = Context::minimal();
    let anchor_state = context.genesis_state();

    let anchor = AnchorBlock {
        root: context.genesis_root(),
        header: BeaconBlockHeader::default(),
        payload: BlockPayload::pre_merge(),
    };

    let result = ForkChoice::<Minimal, _>::new(
        Arc::new(Config::mainnet()),
        StoreConfig::minimal(),
        TestStateTransition,
        anchor,
        &anchor_state,
        0,
    );

    let Err(error) = result else {
        panic!("mainnet configuration should be rejected for minimal preset");
    };

    assert!(matches!(
        error.downcast_ref(),
        Some(Error::PresetMismatch {
            preset: PresetName::Minimal,
            preset_base: PresetName::Mainnet,
        }),
    ));
}

#[test]
fn head_follows_branch_with_more_votes() {
    let mut context = Context::minimal();
    let genesis = context.genesis_root();

    context.on_slot(1);

    let block_a = context.add_block(genesis, 1, root(1));
    let block_b = context.add_block(genesis, 1, root(2));

    context.attest(0..4, block_a, 1);
    context.attest(4..10, block_b, 1);

    assert_eq!(context.on_slot(2), block_b);

    let block_a_weight = context
        .fork_choice()
        .get_block(block_a)
        .map(|node| node.weight);

    assert_eq!(block_a_weight, Some(4 * EFFECTIVE_BALANCE));
}

#[test]
fn ties_are_broken_by_greater_root() {
    let mut context = Context::minimal();
    let genesis = context.genesis_root();

    context.on_slot(2);
    context.add_block(genesis, 1, root(2));
    context.add_block(genesis, 1, root(1));

    assert_eq!(context.head(), root(2));
}

#[test]
fn head_does_not_depend_on_order_of_blocks() {
    let heads = [[1, 2], [2, 1]].map(|order| {
        let mut context = Context::minimal();
        let genesis = context.genesis_root();

        context.on_slot(3);

        for byte in order {
            context.add_block(genesis, 1, root(byte));
        }

        let block_c = context.add_block(root(1), 2, root(3));

        context.attest(0..2, root(2), 2);
        context.attest(2..3, block_c, 2);
        context.head()
    });

    assert_eq!(heads, [root(2), root(2)]);
}

#[test]
fn proposer_boost_lasts_until_next_slot() {
    let mut context = Context::minimal();
    let genesis = context.genesis_root();

    context.on_slot(1);

    let block_a = context.add_block(genesis, 1, root(1));
    let block_b = context.add_block(genesis, 1, root(2));

    assert_eq!(context.fork_choice().proposer_boost_root(), block_a);
    assert_eq!(context.head(), block_a);

    assert_eq!(context.on_slot(2), block_b);
    assert_eq!(context.fork_choice().proposer_boost_root(), H256::zero());

    let block_a_weight = context
        .fork_choice()
        .get_block(block_a)
        .map(|node| node.weight);

    assert_eq!(block_a_weight, Some(0));
}

#[test]
fn late_blocks_are_not_boosted() {
    let mut context = Context::minimal();
    let genesis = context.genesis_root();

    context.on_slot(1);

    let block = context.add_late_block(genesis, 1, root(1));

    assert_eq!(context.fork_choice().proposer_boost_root(), H256::zero());
    assert_eq!(
        context.fork_choice().get_block(block).map(|node| node.timely),
        Some(false),
    );
}

#[test]
fn proposer_boost_can_be_disabled() {
    let mut context = Context::with_store_config(StoreConfig {
        proposer_boost_enabled: false,
        ..StoreConfig::minimal()
    });

    let genesis = context.genesis_root();

    context.on_slot(1);
    context.add_block(genesis, 1, root(1));

    assert_eq!(context.fork_choice().proposer_boost_root(), H256::zero());
}

#[test]
fn attestations_from_current_slot_are_applied_in_next_slot() {
    let mut context = Context::minimal();
    let genesis = context.genesis_root();

    context.on_slot(1);

    let block = context.add_block(genesis, 1, root(1));

    context.attest(0..8, block, 1);

    assert_eq!(context.fork_choice().queued_attestation_count(), 1);
    assert_eq!(context.fork_choice().latest_vote(0), None);

    context.on_slot(2);

    assert_eq!(context.fork_choice().queued_attestation_count(), 0);
    assert_eq!(context.fork_choice().latest_vote(0), Some(block));
    assert_eq!(context.fork_choice().latest_vote(8), None);
}

#[test]
fn later_votes_in_same_epoch_are_ignored() {
    let mut context = Context::minimal();
    let genesis = context.genesis_root();

    context.on_slot(3);

    let block_a = context.add_block(genesis, 1, root(1));
    let block_b = context.add_block(block_a, 2, root(2));

    context.attest(0..1, block_a, 1);
    context.attest(0..1, block_b, 2);

    assert_eq!(context.fork_choice().latest_vote(0), Some(block_a));
}

#[test]
fn old_attestations_are_only_accepted_from_blocks() {
    let mut context = Context::minimal();
    let genesis = context.genesis_root();

    context.on_slot(1);

    let block = context.add_block(genesis, 1, root(1));

    context.on_slot(start_of_epoch(2));

    let attestation = context.attestation(0..4, block, 1);

    let error = context
        .try_attest(&attestation, AttestationOrigin::Gossip)
        .expect_err("attestation from 2 epochs ago should be rejected");

    assert!(matches!(
        error.downcast_ref(),
        Some(InvalidAttestation::PastEpoch {
            target_epoch: 0,
            previous_epoch: 1,
        }),
    ));

    context
        .try_attest(&attestation, AttestationOrigin::Block)
        .expect("attestations from blocks are not limited by epoch");

    assert_eq!(context.fork_choice().latest_vote(0), Some(block));
}

#[test]
fn invalid_attestations_are_rejected() {
    let mut context = Context::minimal();
    let genesis = context.genesis_root();

    context.on_slot(1);

    let block = context.add_block(genesis, 1, root(1));

    let future = context.attestation(0..1, block, 2);

    let mut empty = context.attestation(0..1, block, 1);
    empty.attesting_indices.clear();

    let mut unknown_head = context.attestation(0..1, block, 1);
    unknown_head.data.beacon_block_root = root(9);

    let mut inconsistent_target = context.attestation(0..1, block, 1);
    inconsistent_target.data.target.root = block;

    for (attestation, expected) in [
        (future, "FutureSlot"),
        (empty, "Empty"),
        (unknown_head, "UnknownHeadBlock"),
        (inconsistent_target, "InconsistentTarget"),
    ] {
        let error = context
            .try_attest(&attestation, AttestationOrigin::Gossip)
            .expect_err("attestation should be rejected");

        let reason = match error.downcast_ref() {
            Some(InvalidAttestation::FutureSlot { .. }) => "FutureSlot",
            Some(InvalidAttestation::Empty { .. }) => "Empty",
            Some(InvalidAttestation::UnknownHeadBlock { .. }) => "UnknownHeadBlock",
            Some(InvalidAttestation::InconsistentTarget { .. }) => "InconsistentTarget",
            _ => "other",
        };

        assert_eq!(reason, expected);
    }

    assert_eq!(context.fork_choice().queued_attestation_count(), 0);
}

#[test]
fn invalid_blocks_are_rejected() {
    let mut context = Context::minimal();
    let genesis = context.genesis_root();
    let state = context.genesis_state();

    let mut try_add = |parent_root, slot, root, payload| {
        context
            .try_add_block(parent_root, slot, root, payload, &state, Duration::ZERO)
            .expect_err("block should be rejected")
    };

    let error = try_add(root(9), 1, root(1), BlockPayload::pre_merge());

    assert!(matches!(
        error.downcast_ref(),
        Some(InvalidBlock::UnknownParent { .. }),
    ));

    let error = try_add(genesis, 1, root(1), BlockPayload::pre_merge());

    assert!(matches!(
        error.downcast_ref(),
        Some(InvalidBlock::FutureSlot {
            slot: 1,
            current_slot: 0,
            ..
        }),
    ));

    let error = try_add(genesis, 0, root(1), BlockPayload::pre_merge());

    assert!(matches!(
        error.downcast_ref(),
        Some(InvalidBlock::NotLaterThanParent { .. }),
    ));

    let error = try_add(
        genesis,
        1,
        root(1),
        BlockPayload {
            execution_block_hash: None,
            ..BlockPayload::optimistic(block_hash(1))
        },
    );

    assert!(matches!(
        error.downcast_ref(),
        Some(InvalidBlock::InconsistentExecutionStatus { .. }),
    ));

    assert_eq!(context.fork_choice().get_all_nodes().len(), 1);
}

#[test]
fn blocks_without_payloads_cannot_follow_blocks_with_them() {
    let mut context = Context::minimal();
    let genesis = context.genesis_root();
    let state = context.genesis_state();

    context.on_slot(2);

    let block_a = context.add_optimistic_block(genesis, 1, root(1), block_hash(1));

    let error = context
        .try_add_block(
            block_a,
            2,
            root(2),
            BlockPayload::pre_merge(),
            &state,
            Duration::ZERO,
        )
        .expect_err("pre-merge block should not follow a post-merge one");

    assert!(matches!(
        error.downcast_ref(),
        Some(InvalidBlock::InconsistentExecutionStatus { .. }),
    ));
}

#[test]
fn adding_block_twice_has_no_effect() {
    let mut context = Context::minimal();
    let genesis = context.genesis_root();

    context.on_slot(1);
    context.add_block(genesis, 1, root(1));
    context.add_block(genesis, 1, root(1));

    assert_eq!(context.fork_choice().get_all_nodes().len(), 2);
    assert_eq!(context.fork_choice().get_heads().len(), 1);
}

#[test]
fn finality_only_moves_forward() {
    let mut context = Context::minimal();
    let genesis = context.genesis_root();
    let genesis_checkpoint = context.genesis_checkpoint();

    context.on_slot(start_of_epoch(2));

    let block_a = context.add_block(genesis, 1, root(1));
    let block_b = context.add_block(block_a, start_of_epoch(1), root(2));

    let checkpoint_b = Checkpoint {
        epoch: 1,
        root: block_b,
    };

    let block_c = context.add_block_with_checkpoints(
        block_b,
        start_of_epoch(2),
        root(3),
        checkpoints(checkpoint_b, genesis_checkpoint),
    );

    assert_eq!(context.fork_choice().justified_checkpoint(), checkpoint_b);
    assert_eq!(context.fork_choice().finalized_checkpoint(), genesis_checkpoint);

    let checkpoint_c = Checkpoint {
        epoch: 2,
        root: block_c,
    };

    context.on_slot(start_of_epoch(2) + 1);

    let block_e = context.add_block_with_checkpoints(
        block_c,
        start_of_epoch(2) + 1,
        root(5),
        checkpoints(checkpoint_c, checkpoint_b),
    );

    assert_eq!(context.fork_choice().justified_checkpoint(), checkpoint_c);
    assert_eq!(context.fork_choice().finalized_checkpoint(), checkpoint_b);

    context.on_slot(start_of_epoch(2) + 2);
    context.add_block(block_e, start_of_epoch(2) + 2, root(6));

    assert_eq!(context.fork_choice().justified_checkpoint(), checkpoint_c);
    assert_eq!(context.fork_choice().finalized_checkpoint(), checkpoint_b);
    assert_eq!(context.head(), root(6));

    let state = context.genesis_state();

    let error = context
        .try_add_block(
            block_a,
            start_of_epoch(1) + 1,
            root(4),
            BlockPayload::pre_merge(),
            &state,
            Duration::ZERO,
        )
        .expect_err("block conflicting with finalized block should be rejected");

    assert!(matches!(
        error.downcast_ref(),
        Some(InvalidBlock::NotDescendantOfFinalized { .. }),
    ));
}

#[test]
fn unrealized_justification_is_realized_at_epoch_boundary() {
    let mut context = Context::minimal();
    let genesis = context.genesis_root();
    let genesis_checkpoint = context.genesis_checkpoint();

    context.on_slot(start_of_epoch(1) + 1);

    let checkpoint = Checkpoint {
        epoch: 1,
        root: root(1),
    };

    let mut block_checkpoints = checkpoints(genesis_checkpoint, genesis_checkpoint);
    block_checkpoints.unrealized_justified = checkpoint;

    context.add_block_with_checkpoints(genesis, start_of_epoch(1), root(1), block_checkpoints);

    assert_eq!(context.fork_choice().justified_checkpoint(), genesis_checkpoint);
    assert_eq!(context.fork_choice().unrealized_justified_checkpoint(), checkpoint);

    // Skipping an entire epoch should still realize the checkpoint.
    context.on_slot(start_of_epoch(3));

    assert_eq!(context.fork_choice().justified_checkpoint(), checkpoint);
    assert_eq!(context.fork_choice().best_justified_checkpoint(), checkpoint);
}

#[test]
fn unrealized_justification_of_blocks_from_past_epochs_is_realized_immediately() {
    let mut context = Context::minimal();
    let genesis = context.genesis_root();
    let genesis_checkpoint = context.genesis_checkpoint();

    context.on_slot(start_of_epoch(2) + 1);

    let checkpoint = Checkpoint {
        epoch: 1,
        root: root(1),
    };

    let mut block_checkpoints = checkpoints(genesis_checkpoint, genesis_checkpoint);
    block_checkpoints.unrealized_justified = checkpoint;

    context.add_block_with_checkpoints(genesis, start_of_epoch(1), root(1), block_checkpoints);

    assert_eq!(context.fork_choice().justified_checkpoint(), checkpoint);
}

#[test]
fn pruning_keeps_head_and_removes_conflicting_blocks() {
    let mut context = Context::minimal();
    let genesis = context.genesis_root();

    context.on_slot(start_of_epoch(2) + 1);

    let block_a = context.add_block(genesis, 1, root(1));
    let block_x = context.add_block(genesis, 2, root(9));
    let block_b = context.add_block(block_a, start_of_epoch(1), root(2));

    let checkpoint_b = Checkpoint {
        epoch: 1,
        root: block_b,
    };

    let block_c = context.add_block_with_checkpoints(
        block_b,
        start_of_epoch(2),
        root(3),
        checkpoints(checkpoint_b, checkpoint_b),
    );

    // Votes for blocks that are about to be pruned must not affect the head afterwards.
    let attestation = context.attestation(0..32, block_x, 2);

    context
        .try_attest(&attestation, AttestationOrigin::Block)
        .expect("attestation from block should be accepted");

    let head_before = context.head();

    assert_eq!(head_before, block_c);

    let error = context
        .fork_choice_mut()
        .prune(block_x)
        .expect_err("pruning from a non-finalized block should fail");

    assert!(matches!(
        error.downcast_ref(),
        Some(Error::PruneRootNotFinalized { .. }),
    ));

    let removed = context
        .fork_choice_mut()
        .prune(block_b)
        .expect("pruning from finalized block should succeed");

    let mut removed_roots = removed.iter().map(|node| node.root).collect::<Vec<_>>();
    removed_roots.sort();

    assert_eq!(removed_roots, [block_a, block_x, genesis]);
    assert!(!context.fork_choice().contains_block(block_x));
    assert_eq!(context.head(), head_before);

    let error = context
        .fork_choice_mut()
        .prune(block_b)
        .expect_err("pruning again without new finality should fail");

    assert!(matches!(
        error.downcast_ref(),
        Some(Error::FinalityNotNewer {
            finalized_epoch: 1,
            last_pruned_epoch: 1,
        }),
    ));
}

#[test]
fn pruning_waits_for_threshold() {
    let mut context = Context::with_store_config(StoreConfig::default());
    let genesis = context.genesis_root();

    context.on_slot(start_of_epoch(2) + 1);

    let block_b = context.add_block(genesis, start_of_epoch(1), root(2));

    let checkpoint_b = Checkpoint {
        epoch: 1,
        root: block_b,
    };

    context.add_block_with_checkpoints(
        block_b,
        start_of_epoch(2),
        root(3),
        checkpoints(checkpoint_b, checkpoint_b),
    );

    let removed = context
        .fork_choice_mut()
        .prune(block_b)
        .expect("pruning below threshold should succeed");

    assert!(removed.is_empty());
    assert!(context.fork_choice().contains_block(genesis));

    // Nothing was removed, so the same finalized checkpoint may be used again.
    context
        .fork_choice_mut()
        .prune(genesis)
        .expect("pruning from an ancestor of the finalized block should succeed");
}

#[test]
fn equivocating_validators_lose_their_votes() {
    let mut context = Context::minimal();
    let genesis = context.genesis_root();

    context.on_slot(1);

    let block_a = context.add_block(genesis, 1, root(1));
    let block_b = context.add_block(genesis, 1, root(2));

    context.attest(0..6, block_a, 1);
    context.attest(6..10, block_b, 1);

    assert_eq!(context.on_slot(2), block_a);

    let attester_slashing = context.double_vote(0..4, block_a, block_b, 1);

    let equivocating = context
        .fork_choice_mut()
        .on_attester_slashing(&attester_slashing)
        .expect("attester slashing should be valid");

    assert_eq!(equivocating, 4);
    assert_eq!(context.head(), block_b);

    let equivocating = context
        .fork_choice_mut()
        .on_attester_slashing(&attester_slashing)
        .expect("attester slashing should be valid");

    assert_eq!(equivocating, 0);

    let not_slashable = context.double_vote(0..4, block_a, block_a, 1);

    let error = context
        .fork_choice_mut()
        .on_attester_slashing(&not_slashable)
        .expect_err("identical attestations are not slashable");

    assert!(matches!(
        error.downcast_ref(),
        Some(Error::AttesterSlashingNotSlashable),
    ));

    // Votes by equivocating validators are ignored from now on.
    context.attest(0..4, block_a, 2);

    assert_eq!(context.on_slot(3), block_b);
}

#[test]
fn invalid_payloads_are_excluded_along_with_their_votes() {
    let mut context = Context::minimal();
    let genesis = context.genesis_root();

    context.on_slot(1);

    let block_a = context.add_optimistic_block(genesis, 1, root(1), block_hash(1));
    let block_b = context.add_block(genesis, 1, root(2));

    context.attest(0..10, block_a, 1);
    context.attest(10..12, block_b, 1);

    assert_eq!(context.on_slot(2), block_a);
    assert_eq!(context.fork_choice().is_optimistic(block_a), Some(true));

    context
        .fork_choice_mut()
        .update_execution_status(block_hash(1), PayloadValidation::invalid(None))
        .expect("invalid payload should be handled");

    assert_eq!(context.fork_choice().head_root(), block_b);

    let genesis_weight = context
        .fork_choice()
        .get_block(genesis)
        .map(|node| node.weight);

    assert_eq!(genesis_weight, Some(2 * EFFECTIVE_BALANCE));

    // Invalid blocks cannot become the head again.
    context.attest(12..40, block_a, 2);

    assert_eq!(context.on_slot(3), block_b);

    let state = context.genesis_state();

    let error = context
        .try_add_block(
            block_a,
            3,
            root(3),
            BlockPayload::optimistic(block_hash(3)),
            &state,
            Duration::ZERO,
        )
        .expect_err("child of invalid block should be rejected");

    assert!(matches!(
        error.downcast_ref(),
        Some(InvalidBlock::InvalidParent { .. }),
    ));
}

#[test]
fn latest_valid_hash_bounds_invalidation() {
    let mut context = Context::minimal();
    let genesis = context.genesis_root();

    context.on_slot(4);

    let block_a = context.add_optimistic_block(genesis, 1, root(1), block_hash(1));
    let block_b = context.add_optimistic_block(block_a, 2, root(2), block_hash(2));
    let block_c = context.add_optimistic_block(block_b, 3, root(3), block_hash(3));

    assert_eq!(context.head(), block_c);

    context
        .fork_choice_mut()
        .update_execution_status(block_hash(3), PayloadValidation::invalid(Some(block_hash(1))))
        .expect("invalid payload should be handled");

    let status = |root| {
        context
            .fork_choice()
            .get_block(root)
            .map(|node| node.execution_status)
    };

    assert_eq!(status(block_a), Some(ExecutionStatus::Valid));
    assert_eq!(status(block_b), Some(ExecutionStatus::Invalid));
    assert_eq!(status(block_c), Some(ExecutionStatus::Invalid));
    assert_eq!(context.fork_choice().head_root(), block_a);
    assert_eq!(context.fork_choice().is_optimistic(block_a), Some(false));
}

#[test]
fn zero_latest_valid_hash_invalidates_whole_optimistic_chain() {
    let mut context = Context::minimal();
    let genesis = context.genesis_root();

    context.on_slot(4);

    let block_a = context.add_optimistic_block(genesis, 1, root(1), block_hash(1));
    let block_b = context.add_optimistic_block(block_a, 2, root(2), block_hash(2));
    let block_c = context.add_optimistic_block(block_b, 3, root(3), block_hash(3));

    context
        .fork_choice_mut()
        .update_execution_status(block_hash(3), PayloadValidation::invalid(Some(H256::zero())))
        .expect("invalid payload should be handled");

    for block in [block_a, block_b, block_c] {
        assert_eq!(
            context
                .fork_choice()
                .get_block(block)
                .map(|node| node.execution_status),
            Some(ExecutionStatus::Invalid),
        );
    }

    assert_eq!(context.fork_choice().head_root(), genesis);
}

#[test]
fn validated_payload_cannot_be_reported_invalid() {
    let mut context = Context::minimal();
    let genesis = context.genesis_root();

    context.on_slot(3);

    let block_a = context.add_optimistic_block(genesis, 1, root(1), block_hash(1));
    let block_b = context.add_optimistic_block(block_a, 2, root(2), block_hash(2));

    context
        .fork_choice_mut()
        .update_execution_status(block_hash(2), PayloadValidation::valid())
        .expect("valid payload should be handled");

    for latest_valid_hash in [None, Some(H256::zero())] {
        let error = context
            .fork_choice_mut()
            .update_execution_status(block_hash(2), PayloadValidation::invalid(latest_valid_hash))
            .expect_err("validated payload cannot become invalid");

        assert!(matches!(
            error.downcast_ref(),
            Some(fork_choice_store::Error::ValidPayloadInvalidated { .. }),
        ));
    }

    assert_eq!(context.fork_choice().is_optimistic(block_b), Some(false));
    assert_eq!(context.head(), block_b);
}

#[test]
fn invalid_block_hash_only_invalidates_its_block() {
    let mut context = Context::minimal();
    let genesis = context.genesis_root();

    context.on_slot(4);

    let block_a = context.add_optimistic_block(genesis, 1, root(1), block_hash(1));
    let block_b = context.add_optimistic_block(block_a, 2, root(2), block_hash(2));
    let block_c = context.add_optimistic_block(block_b, 3, root(3), block_hash(3));

    context
        .fork_choice_mut()
        .update_execution_status(
            block_hash(3),
            PayloadValidation {
                status: PayloadValidationStatus::InvalidBlockHash,
                latest_valid_hash: Some(block_hash(1)),
            },
        )
        .expect("invalid payload should be handled");

    let status = |root| {
        context
            .fork_choice()
            .get_block(root)
            .map(|node| node.execution_status)
    };

    assert_eq!(status(block_a), Some(ExecutionStatus::Syncing));
    assert_eq!(status(block_b), Some(ExecutionStatus::Syncing));
    assert_eq!(status(block_c), Some(ExecutionStatus::Invalid));
    assert_eq!(context.fork_choice().head_root(), block_b);
}

#[test]
fn valid_payloads_validate_ancestors() {
    let mut context = Context::minimal();
    let genesis = context.genesis_root();

    context.on_slot(3);

    let block_a = context.add_optimistic_block(genesis, 1, root(1), block_hash(1));
    let block_b = context.add_optimistic_block(block_a, 2, root(2), block_hash(2));

    context
        .fork_choice_mut()
        .update_execution_status(block_hash(2), PayloadValidation::valid())
        .expect("valid payload should be handled");

    assert_eq!(context.fork_choice().is_optimistic(block_a), Some(false));
    assert_eq!(context.fork_choice().is_optimistic(block_b), Some(false));

    let error = context
        .fork_choice_mut()
        .update_execution_status(block_hash(9), PayloadValidation::syncing())
        .expect_err("payload of unknown block should be rejected");

    assert!(matches!(
        error.downcast_ref(),
        Some(Error::UnknownExecutionBlockHash { .. }),
    ));
}

#[test]
fn forkchoice_update_parameters_track_head() {
    let mut context = Context::minimal();
    let genesis = context.genesis_root();

    context.on_slot(2);

    let block = context.add_optimistic_block(genesis, 1, root(1), block_hash(1));

    context.head();

    let parameters = context.fork_choice().forkchoice_update_parameters();

    assert_eq!(parameters.head_root, block);
    assert_eq!(parameters.head_block_hash, Some(block_hash(1)));
    assert_eq!(parameters.justified_block_hash, None);
    assert_eq!(parameters.finalized_block_hash, None);
}

#[test]
fn blocks_without_available_data_cannot_be_head() {
    let mut context = Context::minimal();
    let genesis = context.genesis_root();
    let state = context.genesis_state();

    context.on_slot(2);

    let block_a = context.add_block(genesis, 1, root(1));

    context
        .try_add_block(
            block_a,
            2,
            root(2),
            BlockPayload::pre_merge().with_data_availability(DataAvailabilityStatus::NotAvailable),
            &state,
            Duration::ZERO,
        )
        .expect("block should be accepted before its data is available");

    assert_eq!(context.head(), block_a);

    context
        .fork_choice_mut()
        .set_data_availability(root(2), DataAvailabilityStatus::Available)
        .expect("data availability should be updated");

    assert_eq!(context.head(), root(2));
}

#[test]
fn data_arriving_after_timeout_is_rejected() {
    let mut context = Context::minimal();
    let genesis = context.genesis_root();
    let state = context.genesis_state();

    context.on_slot(2);

    let block_a = context.add_block(genesis, 1, root(1));

    context
        .try_add_block(
            block_a,
            2,
            root(2),
            BlockPayload::pre_merge().with_data_availability(DataAvailabilityStatus::NotAvailable),
            &state,
            Duration::ZERO,
        )
        .expect("block should be accepted before its data is available");

    context
        .fork_choice_mut()
        .set_data_availability(root(2), DataAvailabilityStatus::TimedOut)
        .expect("waiting for data should be allowed to time out");

    let error = context
        .fork_choice_mut()
        .set_data_availability(root(2), DataAvailabilityStatus::Available)
        .expect_err("data arrived too late");

    assert!(matches!(
        error.downcast_ref(),
        Some(fork_choice_store::Error::DataAvailabilityTransition { .. }),
    ));

    assert_eq!(context.head(), block_a);
}

// Sets up a late head in slot 2 on top of a parent in slot 1 and returns the proposer head
// for slot 3. `parent_votes` validators vote for the parent and one for the head.
fn proposer_head_in_slot_3(parent_votes: u64, head_is_late: bool) -> ProposerHeadInfo {
    let mut context = Context::minimal();
    let genesis = context.genesis_root();

    context.on_slot(1);

    let parent = context.add_block(genesis, 1, root(1));

    context.attest(0..parent_votes, parent, 1);
    context.on_slot(2);

    let head = if head_is_late {
        context.add_late_block(parent, 2, root(2))
    } else {
        context.add_block(parent, 2, root(2))
    };

    context.attest(parent_votes..parent_votes + 1, head, 2);

    assert_eq!(context.on_slot(3), head);

    context
        .fork_choice()
        .get_proposer_head(head, Duration::ZERO, 3)
        .expect("proposer head should be computed")
}

#[test]
fn weak_late_head_is_reorged_when_parent_is_strong() {
    let info = proposer_head_in_slot_3(20, true);

    assert_eq!(info.proposer_head, root(1));
    assert_eq!(info.not_reorged_reason, None);
}

#[test]
fn weak_late_head_is_kept_when_parent_is_not_strong() {
    let info = proposer_head_in_slot_3(10, true);

    assert_eq!(info.proposer_head, root(2));
    assert_eq!(info.not_reorged_reason, Some(NotReorgedReason::ParentNotStrong));
}

#[test]
fn timely_head_is_kept() {
    let info = proposer_head_in_slot_3(20, false);

    assert_eq!(info.proposer_head, root(2));
    assert!(info.is_head_timely);
    assert_eq!(info.not_reorged_reason, Some(NotReorgedReason::HeadBlockNotLate));
}

#[test]
fn proposer_head_requires_current_slot() {
    let mut context = Context::minimal();
    let genesis = context.genesis_root();

    context.on_slot(1);

    let error = context
        .fork_choice()
        .get_proposer_head(genesis, Duration::ZERO, 2)
        .expect_err("proposer head for a future slot should be rejected");

    assert!(matches!(
        error.downcast_ref(),
        Some(Error::ProposerHeadSlotMismatch {
            slot: 2,
            current_slot: 1,
        }),
    ));

    let error = context
        .fork_choice()
        .get_proposer_head(root(9), Duration::ZERO, 1)
        .expect_err("proposer head for an unknown block should be rejected");

    assert!(matches!(
        error.downcast_ref(),
        Some(Error::UnknownBlock { .. }),
    ));
}

#[test]
fn forks_are_reported_as_heads() {
    let mut context = Context::minimal();
    let genesis = context.genesis_root();

    context.on_slot(3);

    let block_a = context.add_block(genesis, 1, root(1));
    let block_b = context.add_block(genesis, 2, root(2));
    let block_c = context.add_block(block_a, 2, root(3));

    let mut heads = context
        .fork_choice()
        .get_heads()
        .into_iter()
        .map(|node| node.root)
        .collect::<Vec<_>>();

    heads.sort();

    assert_eq!(heads, [block_b, block_c]);

    let non_ancestors = context
        .fork_choice()
        .get_non_ancestors(block_c)
        .map(|node| node.root)
        .collect::<Vec<_>>();

    assert_eq!(non_ancestors, [block_b]);
    assert_eq!(context.fork_choice().get_ancestor(block_c, 1), Some(block_a));
    assert_eq!(context.fork_choice().get_ancestor(block_b, 1), Some(genesis));
    assert!(context.fork_choice().is_descendant(block_a, block_c));
    assert!(!context.fork_choice().is_descendant(block_a, block_b));
}
