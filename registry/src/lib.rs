//! Non-fungible ownership registry
//!
//! Maps unique item ids to owning accounts, with approve/transfer
//! primitives, capability-gated mint/burn, a metadata-URI resolver, and a
//! per-registry transfer policy (achievement-style badges are soulbound:
//! no transfer succeeds after mint, regardless of caller).

pub mod error;
pub mod item;

pub use error::{RegistryError, Result};
pub use item::{ItemRegistry, NonFungibleAsset, TransferPolicy};
