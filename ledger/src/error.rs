//! Ledger error types

use thiserror::Error;

/// Fungible ledger errors
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error(transparent)]
    Permission(#[from] roles::RoleError),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("insufficient balance: requested {requested}, available {available}")]
    InsufficientBalance { requested: u128, available: u128 },

    #[error("insufficient allowance: requested {requested}, approved {approved}")]
    InsufficientAllowance { requested: u128, approved: u128 },

    #[error("fixed-supply asset does not support minting")]
    FixedSupply,

    #[error("supply overflow")]
    SupplyOverflow,
}

pub type Result<T> = std::result::Result<T, LedgerError>;
