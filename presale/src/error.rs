//! Sale swapper error types

use thiserror::Error;

/// Sale swapper errors
#[derive(Error, Debug)]
pub enum SaleError {
    #[error(transparent)]
    Permission(#[from] roles::RoleError),

    #[error(transparent)]
    Ledger(#[from] ledger::LedgerError),

    #[error("price must be greater than 0")]
    InvalidPrice,

    #[error("sale phases must be ordered: presale1 {presale1}, presale2 {presale2}, public {public}")]
    InvalidSchedule {
        presale1: u64,
        presale2: u64,
        public: u64,
    },

    #[error("account list length {accounts} does not match quota list length {quotas}")]
    LengthMismatch { accounts: usize, quotas: usize },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("{0} is not a registered sale account")]
    UnknownAccount(String),

    #[error("asset reference is not set")]
    AssetUnset,

    #[error("asset mismatch: sale is bound to {expected}, got {actual}")]
    AssetMismatch { expected: String, actual: String },

    #[error("sale schedule is not configured")]
    SaleNotConfigured,

    #[error("sale has not started: height {height}, opens at {opens_at}")]
    SaleNotStarted { height: u64, opens_at: u64 },

    #[error("{0} is not whitelisted for this sale phase")]
    NotWhitelisted(String),

    #[error("sale quota exceeded: requested {requested}, remaining {remaining}")]
    QuotaExceeded { requested: u128, remaining: u128 },

    #[error("payment amount must be greater than 0")]
    ZeroPayment,

    #[error("foundation wallet is not set")]
    FoundationWalletUnset,
}

pub type Result<T> = std::result::Result<T, SaleError>;
