//! Fixed-point fungible ledger
//!
//! Minimal account -> balance bookkeeping for a fungible asset with
//! transfer/mint/burn primitives and ERC20-style allowances, used by every
//! other component as the thing being moved. Amounts are `u128` in the
//! asset's smallest unit; there is no floating point anywhere.

pub mod asset;
pub mod error;
pub mod token;

pub use asset::FungibleAsset;
pub use error::{LedgerError, Result};
pub use token::TokenLedger;

/// Ledger constants
pub mod constants {
    /// Fixed-point decimal places of every asset in the suite.
    pub const DECIMALS: u8 = 18;

    /// One whole token in smallest units (10^18).
    pub const UNIT: u128 = 1_000_000_000_000_000_000;

    /// Supply of the fixed-supply sale token (1,000,000,000 tokens).
    pub const FIXED_SUPPLY: u128 = 1_000_000_000 * UNIT;
}

#[cfg(test)]
mod tests {
    use super::constants::*;

    #[test]
    fn test_constants() {
        assert_eq!(UNIT, 10u128.pow(DECIMALS as u32));
        assert_eq!(FIXED_SUPPLY, 1_000_000_000 * UNIT);
    }
}
