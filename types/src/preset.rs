use core::{fmt::Debug, hash::Hash};

use serde_with::{DeserializeFromStr, SerializeDisplay};
use strum::{Display, EnumString};
use typenum::{NonZero, Unsigned, U32, U8};

/// Compile-time configuration variables.
///
/// Fork choice only depends on the length of an epoch. Everything it needs at runtime lives in
/// [`Config`](crate::config::Config).
pub trait Preset: Copy + Eq + Ord + Hash + Default + Debug + Send + Sync + 'static {
    type SlotsPerEpoch: Unsigned + NonZero;

    const NAME: PresetName;
}

/// [Mainnet preset](https://github.com/ethereum/consensus-specs/tree/aac851f860fa384916f62027b2dbe3318a354c5b/presets/mainnet).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Debug)]
pub struct Mainnet;

impl Preset for Mainnet {
    type SlotsPerEpoch = U32;

    const NAME: PresetName = PresetName::Mainnet;
}

/// [Minimal preset](https://github.com/ethereum/consensus-specs/tree/aac851f860fa384916f62027b2dbe3318a354c5b/presets/minimal).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Debug)]
pub struct Minimal;

impl Preset for Minimal {
    type SlotsPerEpoch = U8;

    const NAME: PresetName = PresetName::Minimal;
}

#[derive(
    Clone, Copy, PartialEq, Eq, Debug, Display, EnumString, DeserializeFromStr, SerializeDisplay,
)]
#[strum(serialize_all = "lowercase")]
pub enum PresetName {
    Mainnet,
    Minimal,
}
