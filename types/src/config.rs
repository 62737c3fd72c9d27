use core::{num::NonZeroU64, time::Duration};
use std::{borrow::Cow, collections::BTreeMap};

use nonzero_ext::nonzero;
use serde::{de::IgnoredAny, Deserialize, Serialize};

use crate::{phase0::consts::INTERVALS_PER_SLOT, preset::PresetName};

/// Configuration variables customizable at runtime.
///
/// See [configurations in `consensus-specs`](https://github.com/ethereum/consensus-specs/tree/aac851f860fa384916f62027b2dbe3318a354c5b/configs).
///
/// Only the variables used by fork choice are represented. Other variables present in standard
/// configuration files are accepted and ignored.
#[expect(
    clippy::unsafe_derive_deserialize,
    reason = "A false positive triggered by `nonzero!`. \
              `Config` has no invariants. It is intended to be deserialized from user input. \
              The `unsafe` block in `nonzero!` only operates on the literal passed to it."
)]
#[derive(Debug, Deserialize, Serialize)]
#[serde(default, rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Config {
    // Meta
    pub config_name: Cow<'static, str>,
    pub preset_base: PresetName,

    // Time parameters
    #[serde(with = "serde_utils::string_or_native")]
    pub seconds_per_slot: NonZeroU64,

    // Fork choice
    #[serde(with = "serde_utils::string_or_native")]
    pub proposer_score_boost: u64,
    #[serde(with = "serde_utils::string_or_native")]
    pub reorg_head_weight_threshold: u64,
    #[serde(with = "serde_utils::string_or_native")]
    pub reorg_parent_weight_threshold: u64,
    #[serde(with = "serde_utils::string_or_native")]
    pub reorg_max_epochs_since_finalization: u64,

    // Extra fields
    #[serde(flatten, skip_serializing)]
    pub unknown: BTreeMap<String, IgnoredAny>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            // Meta
            //
            // Use `default` as the default `config_name` and override it in `Config::mainnet`.
            // This way custom network data will be kept separate from mainnet data if a user
            // forgets to specify a custom `CONFIG_NAME`.
            config_name: Cow::Borrowed("default"),
            preset_base: PresetName::Mainnet,

            // Time parameters
            seconds_per_slot: nonzero!(12_u64),

            // Fork choice
            proposer_score_boost: 40,
            reorg_head_weight_threshold: 20,
            reorg_parent_weight_threshold: 160,
            reorg_max_epochs_since_finalization: 2,

            // Extra fields
            unknown: BTreeMap::new(),
        }
    }
}

impl Config {
    /// [Mainnet configuration](https://github.com/eth-clients/mainnet/blob/978f1794eada6f85bee76e4d2d5959a5fb8e0cc5/metadata/config.yaml).
    #[must_use]
    pub fn mainnet() -> Self {
        Self {
            config_name: Cow::Borrowed("mainnet"),
            ..Self::default()
        }
    }

    /// [Minimal configuration](https://github.com/ethereum/consensus-specs/blob/aac851f860fa384916f62027b2dbe3318a354c5b/configs/minimal.yaml).
    #[must_use]
    pub fn minimal() -> Self {
        Self {
            config_name: Cow::Borrowed("minimal"),
            preset_base: PresetName::Minimal,
            seconds_per_slot: nonzero!(6_u64),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn slot_duration(&self) -> Duration {
        Duration::from_secs(self.seconds_per_slot.get())
    }

    /// Blocks received after this point in their slot are not timely and do not get boosted.
    #[must_use]
    pub fn attestation_due(&self) -> Duration {
        self.slot_duration() / Self::intervals_per_slot()
    }

    /// Proposers attempting a reorg must publish before this point in the slot.
    #[must_use]
    pub fn proposer_reorg_cutoff(&self) -> Duration {
        self.attestation_due() / 2
    }

    fn intervals_per_slot() -> u32 {
        INTERVALS_PER_SLOT
            .get()
            .try_into()
            .expect("INTERVALS_PER_SLOT is small enough to fit in u32")
    }
}
