//! Vesting engine
//!
//! Owns the four fixed-capacity allocation pools (private-sale, team,
//! marketing, treasury), one allocation record per account, and the
//! time-based claim machinery. Release curves are table-driven descriptors
//! evaluated by a single shared function with exact integer basis-point
//! arithmetic; the claimable-balance computation is a pure function of
//! elapsed time, so querying it never perturbs a later claim.

pub mod curve;
pub mod engine;
pub mod error;
pub mod pool;

pub use curve::{ReleaseCurve, BPS_DENOMINATOR, MONTH_SECONDS};
pub use engine::{AccountInfo, PoolInfo, VestingEngine};
pub use error::{Result, VestingError};
pub use pool::{Allocation, Pool, PoolCategory};
