use arithmetic::U64Ext as _;
use typenum::Unsigned as _;
use types::{
    phase0::primitives::{Epoch, Slot},
    preset::Preset,
};

#[must_use]
pub fn compute_epoch_at_slot<P: Preset>(slot: Slot) -> Epoch {
    slot.div_typenum::<P::SlotsPerEpoch>()
}

#[must_use]
pub const fn compute_start_slot_at_epoch<P: Preset>(epoch: Epoch) -> Slot {
    epoch.saturating_mul(P::SlotsPerEpoch::U64)
}

#[must_use]
pub fn is_epoch_start<P: Preset>(slot: Slot) -> bool {
    slots_since_epoch_start::<P>(slot) == 0
}

// <https://github.com/ethereum/consensus-specs/blob/v1.3.0/specs/phase0/fork-choice.md#compute_slots_since_epoch_start>
#[must_use]
pub fn slots_since_epoch_start<P: Preset>(slot: Slot) -> u64 {
    slot.mod_typenum::<P::SlotsPerEpoch>()
}

/// Returns the epoch before `epoch`, or `epoch` itself at genesis.
#[must_use]
pub const fn previous_epoch(epoch: Epoch) -> Epoch {
    epoch.saturating_sub(1)
}
