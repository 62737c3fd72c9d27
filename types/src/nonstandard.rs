use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};

use crate::phase0::primitives::ExecutionBlockHash;

/// Validity of a block's execution payload as known to the consensus layer.
///
/// Allowed transitions:
/// - `PreMerge` → `Syncing` or `Invalid`.
/// - `Syncing` → `Valid` or `Invalid`.
/// - `Valid` and `Invalid` are final. `Invalid` is inherited by all descendants.
#[derive(Clone, Copy, PartialEq, Eq, Debug, AsRefStr, Display, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ExecutionStatus {
    PreMerge,
    Syncing,
    Valid,
    Invalid,
}

impl ExecutionStatus {
    #[must_use]
    pub const fn is_valid(self) -> bool {
        matches!(self, Self::Valid)
    }

    #[must_use]
    pub const fn is_invalid(self) -> bool {
        matches!(self, Self::Invalid)
    }

    #[must_use]
    pub const fn is_syncing(self) -> bool {
        matches!(self, Self::Syncing)
    }

    /// `true` if the payload has been imported without being fully verified.
    #[must_use]
    pub const fn is_optimistic(self) -> bool {
        self.is_syncing()
    }
}

/// Whether the data a block commits to (blobs, columns) has been observed.
///
/// `NotAvailable` excludes the block from head selection, but unlike
/// [`ExecutionStatus::Invalid`] it does not spread to descendants and may still change to
/// `Available` if the data arrives later.
///
/// `TimedOut` is set once the caller stops waiting for the data. It is final.
#[derive(Clone, Copy, PartialEq, Eq, Debug, AsRefStr, Display, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DataAvailabilityStatus {
    PreData,
    Available,
    NotAvailable,
    TimedOut,
}

impl DataAvailabilityStatus {
    /// `true` if the block cannot be the head until its data arrives, or at all.
    #[must_use]
    pub const fn is_not_available(self) -> bool {
        matches!(self, Self::NotAvailable | Self::TimedOut)
    }
}

/// [`PayloadStatusV1.status`](https://github.com/ethereum/execution-apis/blob/b7c5d3420e00648f456744d121ffbd929862924d/src/engine/paris.md#payloadstatusv1)
#[derive(Clone, Copy, PartialEq, Eq, Debug, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PayloadValidationStatus {
    Valid,
    Invalid,
    Syncing,
    Accepted,
    InvalidBlockHash,
}

impl PayloadValidationStatus {
    #[must_use]
    pub const fn execution_status(self) -> ExecutionStatus {
        match self {
            Self::Valid => ExecutionStatus::Valid,
            Self::Invalid | Self::InvalidBlockHash => ExecutionStatus::Invalid,
            Self::Syncing | Self::Accepted => ExecutionStatus::Syncing,
        }
    }
}

/// The parts of an execution engine response that affect fork choice.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PayloadValidation {
    pub status: PayloadValidationStatus,
    pub latest_valid_hash: Option<ExecutionBlockHash>,
}

impl PayloadValidation {
    #[must_use]
    pub const fn valid() -> Self {
        Self {
            status: PayloadValidationStatus::Valid,
            latest_valid_hash: None,
        }
    }

    #[must_use]
    pub const fn syncing() -> Self {
        Self {
            status: PayloadValidationStatus::Syncing,
            latest_valid_hash: None,
        }
    }

    #[must_use]
    pub const fn invalid(latest_valid_hash: Option<ExecutionBlockHash>) -> Self {
        Self {
            status: PayloadValidationStatus::Invalid,
            latest_valid_hash,
        }
    }
}
