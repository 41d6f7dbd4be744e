//! Vesting engine error types

use thiserror::Error;

use crate::pool::PoolCategory;

/// Vesting engine errors
#[derive(Error, Debug)]
pub enum VestingError {
    #[error(transparent)]
    Permission(#[from] roles::RoleError),

    #[error(transparent)]
    Ledger(#[from] ledger::LedgerError),

    #[error("unknown pool category id {0}")]
    UnknownCategory(u8),

    #[error("asset reference does not satisfy the fungible contract: {0}")]
    InvalidAssetReference(String),

    #[error("asset reference is not set")]
    AssetUnset,

    #[error("asset mismatch: engine is bound to {expected}, got {actual}")]
    AssetMismatch { expected: String, actual: String },

    #[error("start time {start_time} is not in the future (now {now})")]
    StartTimeNotFuture { start_time: u64, now: u64 },

    #[error("start time of {0:?} pool is already set")]
    StartTimeAlreadySet(PoolCategory),

    #[error("start time of {0:?} pool is not set")]
    StartTimeUnset(PoolCategory),

    #[error("allocation amount must be greater than 0")]
    ZeroAmount,

    #[error("{0} already has an allocation")]
    DuplicateAllocation(String),

    #[error("{category:?} pool capacity exceeded: requested {requested}, remaining {remaining}")]
    CapacityExceeded {
        category: PoolCategory,
        requested: u128,
        remaining: u128,
    },

    #[error("{0} has no allocation")]
    NoAllocation(String),

    #[error("{0} has no claimable balance")]
    NothingToClaim(String),
}

pub type Result<T> = std::result::Result<T, VestingError>;
