//! Escrow treasuries
//!
//! Custodial components layered on the fungible ledger and the item
//! registry. A treasury holds balances or items on behalf of the contract
//! custody account; depositors are made whole again only through an
//! administrator-authorized withdraw.

pub mod error;
pub mod item_treasury;
pub mod token_treasury;

pub use error::{Result, TreasuryError};
pub use item_treasury::ItemTreasury;
pub use token_treasury::TokenTreasury;
