//! Fungible asset seam
//!
//! Components that take an "asset reference" (vesting engine, treasuries,
//! presale) are written against this trait instead of a concrete ledger.
//! Configuring a reference records the `asset_id`; consumers refuse a
//! mismatched ledger at use time, so a treasury bound to one asset can
//! never move another.

use crate::error::Result;

/// The capability contract a configured asset reference must satisfy.
pub trait FungibleAsset {
    /// Stable identifier of the asset, recorded at configuration time.
    fn asset_id(&self) -> &str;

    /// Fixed-point decimal places of the asset.
    fn decimals(&self) -> u8;

    /// Balance of `account`; unknown accounts hold 0.
    fn balance_of(&self, account: &str) -> u128;

    /// Move `amount` from `caller`'s own balance to `to`.
    fn transfer(&mut self, caller: &str, to: &str, amount: u128) -> Result<()>;

    /// Move `amount` from `from` to `to`, spending `caller`'s allowance.
    fn transfer_from(&mut self, caller: &str, from: &str, to: &str, amount: u128) -> Result<()>;
}
