//! Treasury error types

use thiserror::Error;

/// Escrow treasury errors
#[derive(Error, Debug)]
pub enum TreasuryError {
    #[error(transparent)]
    Permission(#[from] roles::RoleError),

    #[error(transparent)]
    Ledger(#[from] ledger::LedgerError),

    #[error(transparent)]
    Registry(#[from] registry::RegistryError),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("asset reference is not set")]
    AssetUnset,

    #[error("asset mismatch: treasury is bound to {expected}, got {actual}")]
    AssetMismatch { expected: String, actual: String },

    #[error("{account} does not own item {id}")]
    NotItemOwner { id: u64, account: String },

    #[error("item {0} is not in custody")]
    NotInCustody(u64),
}

pub type Result<T> = std::result::Result<T, TreasuryError>;
