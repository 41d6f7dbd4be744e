//! Phased public sale swapper
//!
//! Sells the fixed-supply token for a payment asset at a configured price,
//! gated by block height into two whitelisted presale phases and an open
//! public phase. State is a plain serializable container; the hosting
//! environment supplies the caller identity and the current height.

pub mod error;
pub mod sale;

pub use error::{Result, SaleError};
pub use sale::{PreSale, SaleAccount, SaleInfo, SalePhase};
