//! Registry error types

use thiserror::Error;

/// Ownership registry errors
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error(transparent)]
    Permission(#[from] roles::RoleError),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("item {0} does not exist")]
    UnknownItem(u64),

    #[error("item {0} already minted")]
    DuplicateItem(u64),

    #[error("{account} is not owner or approved for item {id}")]
    NotAuthorized { id: u64, account: String },

    #[error("item {0} is not held by the stated owner")]
    WrongOwner(u64),

    #[error("registry is soulbound: item {0} cannot be transferred")]
    NonTransferable(u64),
}

pub type Result<T> = std::result::Result<T, RegistryError>;
