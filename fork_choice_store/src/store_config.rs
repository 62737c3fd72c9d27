use derivative::Derivative;
use types::phase0::primitives::Slot;

#[derive(Clone, Copy, Debug, Derivative)]
#[derivative(Default)]
pub struct StoreConfig {
    /// Number of nodes that must precede the finalized node before pruning does any work.
    #[derivative(Default(value = "256"))]
    pub prune_threshold: usize,
    #[derivative(Default(value = "true"))]
    pub proposer_boost_enabled: bool,
    #[derivative(Default(value = "true"))]
    pub proposer_boost_reorg_enabled: bool,
    /// Maximum number of slots between a head and its parent for the head to be reorged.
    #[derivative(Default(value = "1"))]
    pub max_reorg_distance: Slot,
}

impl StoreConfig {
    /// Configuration that prunes as soon as possible. Meant for tests.
    #[must_use]
    pub fn minimal() -> Self {
        Self {
            prune_threshold: 0,
            ..Self::default()
        }
    }
}
