use core::{ops::Range, time::Duration};
use std::sync::Arc;

use anyhow::Result;
use fork_choice_store::{BlockCheckpoints, StoreConfig};
use helper_functions::misc;
use types::{
    config::Config,
    phase0::{
        consts::GENESIS_SLOT,
        containers::{
            AttestationData, AttesterSlashing, BeaconBlockHeader, Checkpoint, IndexedAttestation,
        },
        primitives::{Epoch, ExecutionBlockHash, Gwei, Slot, ValidatorIndex, H256},
    },
    preset::{Minimal, Preset},
};

use crate::{
    fork_choice::ForkChoice,
    misc::{AnchorBlock, AttestationOrigin, BlockPayload},
    state_transition::StateTransition,
};

pub const VALIDATOR_COUNT: usize = 64;
pub const EFFECTIVE_BALANCE: Gwei = 32_000_000_000;

/// Post-block state reduced to what fork choice reads from it.
#[derive(Clone, Debug)]
pub struct TestState {
    pub checkpoints: BlockCheckpoints,
    pub balances: Arc<[Gwei]>,
}

pub struct TestStateTransition;

impl StateTransition for TestStateTransition {
    type State = TestState;

    fn block_checkpoints(&self, state: &TestState) -> BlockCheckpoints {
        state.checkpoints
    }

    fn justified_balances(&self, state: &TestState, _checkpoint: Checkpoint) -> Arc<[Gwei]> {
        Arc::clone(&state.balances)
    }
}

pub struct Context<P: Preset> {
    fork_choice: ForkChoice<P, TestStateTransition>,
    genesis_root: H256,
    balances: Arc<[Gwei]>,
    // Attestation data roots only need to be distinct.
    attestation_count: u64,
}

impl Context<Minimal> {
    #[must_use]
    pub fn minimal() -> Self {
        Self::with_store_config(StoreConfig::minimal())
    }

    #[must_use]
    pub fn with_store_config(store_config: StoreConfig) -> Self {
        Self::new(store_config, BlockPayload::pre_merge())
    }
}

impl<P: Preset> Context<P> {
    #[must_use]
    pub fn new(store_config: StoreConfig, anchor_payload: BlockPayload) -> Self {
        let genesis_root = H256::repeat_byte(0xff);
        let balances = Arc::<[Gwei]>::from(vec![EFFECTIVE_BALANCE; VALIDATOR_COUNT]);

        let anchor_state = TestState {
            checkpoints: BlockCheckpoints::anchor(Checkpoint {
                epoch: 0,
                root: genesis_root,
            }),
            balances: Arc::clone(&balances),
        };

        let anchor = AnchorBlock {
            root: genesis_root,
            header: BeaconBlockHeader {
                slot: GENESIS_SLOT,
                ..BeaconBlockHeader::default()
            },
            payload: anchor_payload,
        };

        let fork_choice = ForkChoice::new(
            Arc::new(Config::minimal()),
            store_config,
            TestStateTransition,
            anchor,
            &anchor_state,
            GENESIS_SLOT,
        )
        .expect("anchor should be accepted");

        Self {
            fork_choice,
            genesis_root,
            balances,
            attestation_count: 0,
        }
    }

    #[must_use]
    pub const fn fork_choice(&self) -> &ForkChoice<P, TestStateTransition> {
        &self.fork_choice
    }

    pub fn fork_choice_mut(&mut self) -> &mut ForkChoice<P, TestStateTransition> {
        &mut self.fork_choice
    }

    #[must_use]
    pub const fn genesis_root(&self) -> H256 {
        self.genesis_root
    }

    #[must_use]
    pub fn genesis_checkpoint(&self) -> Checkpoint {
        Checkpoint {
            epoch: 0,
            root: self.genesis_root,
        }
    }

    /// State of a block that does not change any checkpoints.
    #[must_use]
    pub fn genesis_state(&self) -> TestState {
        self.state(BlockCheckpoints::anchor(self.genesis_checkpoint()))
    }

    #[must_use]
    pub fn state(&self, checkpoints: BlockCheckpoints) -> TestState {
        TestState {
            checkpoints,
            balances: Arc::clone(&self.balances),
        }
    }

    pub fn on_slot(&mut self, slot: Slot) -> H256 {
        self.fork_choice
            .on_tick(slot)
            .expect("tick should be processed successfully")
    }

    pub fn head(&mut self) -> H256 {
        self.fork_choice
            .get_head()
            .expect("head should be computed successfully")
    }

    /// Adds a pre-merge block that arrives at the start of its slot.
    pub fn add_block(&mut self, parent_root: H256, slot: Slot, root: H256) -> H256 {
        let state = self.genesis_state();

        self.try_add_block(
            parent_root,
            slot,
            root,
            BlockPayload::pre_merge(),
            &state,
            Duration::ZERO,
        )
        .expect("block should be accepted");

        root
    }

    /// Adds a pre-merge block that arrives after attestations for its slot are due.
    pub fn add_late_block(&mut self, parent_root: H256, slot: Slot, root: H256) -> H256 {
        let state = self.genesis_state();
        let delay = self.fork_choice.chain_config().attestation_due();

        self.try_add_block(parent_root, slot, root, BlockPayload::pre_merge(), &state, delay)
            .expect("block should be accepted");

        root
    }

    pub fn add_optimistic_block(
        &mut self,
        parent_root: H256,
        slot: Slot,
        root: H256,
        execution_block_hash: ExecutionBlockHash,
    ) -> H256 {
        let state = self.genesis_state();
        let payload = BlockPayload::optimistic(execution_block_hash);

        self.try_add_block(parent_root, slot, root, payload, &state, Duration::ZERO)
            .expect("block should be accepted");

        root
    }

    pub fn add_block_with_checkpoints(
        &mut self,
        parent_root: H256,
        slot: Slot,
        root: H256,
        checkpoints: BlockCheckpoints,
    ) -> H256 {
        let state = self.state(checkpoints);

        self.try_add_block(
            parent_root,
            slot,
            root,
            BlockPayload::pre_merge(),
            &state,
            Duration::ZERO,
        )
        .expect("block should be accepted");

        root
    }

    pub fn try_add_block(
        &mut self,
        parent_root: H256,
        slot: Slot,
        root: H256,
        payload: BlockPayload,
        state: &TestState,
        block_delay: Duration,
    ) -> Result<()> {
        let header = BeaconBlockHeader {
            slot,
            parent_root,
            state_root: root,
            ..BeaconBlockHeader::default()
        };

        self.fork_choice
            .on_block(root, &header, payload, state, block_delay)
    }

    /// Builds an attestation with a target consistent with the chain ending in `block_root`.
    #[must_use]
    pub fn attestation(
        &self,
        validators: Range<ValidatorIndex>,
        block_root: H256,
        slot: Slot,
    ) -> IndexedAttestation {
        let epoch = misc::compute_epoch_at_slot::<P>(slot);

        let target_root = self
            .fork_choice
            .get_ancestor(block_root, misc::compute_start_slot_at_epoch::<P>(epoch))
            .unwrap_or(block_root);

        IndexedAttestation {
            attesting_indices: validators.collect(),
            data: AttestationData {
                slot,
                index: 0,
                beacon_block_root: block_root,
                source: self.fork_choice.justified_checkpoint(),
                target: Checkpoint {
                    epoch,
                    root: target_root,
                },
            },
        }
    }

    pub fn try_attest(
        &mut self,
        attestation: &IndexedAttestation,
        origin: AttestationOrigin,
    ) -> Result<()> {
        self.attestation_count += 1;

        let data_root = H256::from_low_u64_be(self.attestation_count);

        self.fork_choice
            .on_attestation(attestation, data_root, origin)
    }

    pub fn attest(&mut self, validators: Range<ValidatorIndex>, block_root: H256, slot: Slot) {
        let attestation = self.attestation(validators, block_root, slot);

        self.try_attest(&attestation, AttestationOrigin::Gossip)
            .expect("attestation should be accepted");
    }

    /// Builds a double vote by `validators` for `root_1` and `root_2` in the same target epoch.
    #[must_use]
    pub fn double_vote(
        &self,
        validators: Range<ValidatorIndex>,
        root_1: H256,
        root_2: H256,
        slot: Slot,
    ) -> AttesterSlashing {
        AttesterSlashing {
            attestation_1: self.attestation(validators.clone(), root_1, slot),
            attestation_2: self.attestation(validators, root_2, slot),
        }
    }
}

#[must_use]
pub const fn root(byte: u8) -> H256 {
    H256::repeat_byte(byte)
}

#[must_use]
pub const fn block_hash(byte: u8) -> ExecutionBlockHash {
    H256::repeat_byte(byte)
}

#[must_use]
pub fn start_of_epoch(epoch: Epoch) -> Slot {
    misc::compute_start_slot_at_epoch::<Minimal>(epoch)
}

#[must_use]
pub const fn checkpoints(justified: Checkpoint, finalized: Checkpoint) -> BlockCheckpoints {
    BlockCheckpoints {
        justified,
        finalized,
        unrealized_justified: justified,
        unrealized_finalized: finalized,
    }
}
