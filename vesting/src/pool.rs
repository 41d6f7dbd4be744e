//! Pools and allocation records

use ledger::constants::UNIT;
use serde::{Deserialize, Serialize};

use crate::curve::ReleaseCurve;
use crate::error::{Result, VestingError};

/// The four fixed allocation pools. Ids match the external interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum PoolCategory {
    PrivateSale = 0,
    Team = 1,
    Marketing = 2,
    Treasury = 3,
}

impl PoolCategory {
    pub const ALL: [PoolCategory; 4] = [
        PoolCategory::PrivateSale,
        PoolCategory::Team,
        PoolCategory::Marketing,
        PoolCategory::Treasury,
    ];

    /// Resolve an external category id; unknown ids are rejected.
    pub fn from_id(id: u8) -> Result<Self> {
        match id {
            0 => Ok(PoolCategory::PrivateSale),
            1 => Ok(PoolCategory::Team),
            2 => Ok(PoolCategory::Marketing),
            3 => Ok(PoolCategory::Treasury),
            other => Err(VestingError::UnknownCategory(other)),
        }
    }

    /// Maximum amount ever allocable to this pool, in smallest units.
    pub const fn capacity(self) -> u128 {
        match self {
            PoolCategory::PrivateSale => 165_000_000 * UNIT,
            PoolCategory::Team => 80_000_000 * UNIT,
            PoolCategory::Marketing => 55_000_000 * UNIT,
            PoolCategory::Treasury => 290_000_000 * UNIT,
        }
    }
}

/// Aggregate state of one pool.
///
/// Invariants: `claimed <= allocated <= capacity`; `start_time` is
/// write-once (0 means unset).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pool {
    pub category: PoolCategory,
    pub capacity: u128,
    pub allocated: u128,
    pub claimed: u128,
    pub start_time: u64,
    pub curve: ReleaseCurve,
}

impl Pool {
    pub fn new(category: PoolCategory) -> Self {
        Self {
            category,
            capacity: category.capacity(),
            allocated: 0,
            claimed: 0,
            start_time: 0,
            curve: ReleaseCurve::for_category(category),
        }
    }

    pub fn remaining_capacity(&self) -> u128 {
        self.capacity - self.allocated
    }
}

/// One account's claim rights within exactly one pool. An account holds at
/// most one allocation across the whole engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Allocation {
    pub account: String,
    pub category: PoolCategory,
    pub total_balance: u128,
    pub claimed_balance: u128,
    pub created_time: u64,
    /// 0 until the first successful claim.
    pub last_claimed_time: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_ids_round_trip() {
        for category in PoolCategory::ALL {
            assert_eq!(
                PoolCategory::from_id(category as u8).unwrap(),
                category
            );
        }
        assert!(matches!(
            PoolCategory::from_id(5),
            Err(VestingError::UnknownCategory(5))
        ));
    }

    #[test]
    fn test_capacities_sum_to_total_reserved_supply() {
        let sum: u128 = PoolCategory::ALL.iter().map(|c| c.capacity()).sum();
        assert_eq!(sum, 590_000_000 * UNIT);
    }

    #[test]
    fn test_new_pool_is_empty_and_unscheduled() {
        let pool = Pool::new(PoolCategory::Team);
        assert_eq!(pool.allocated, 0);
        assert_eq!(pool.claimed, 0);
        assert_eq!(pool.start_time, 0);
        assert_eq!(pool.remaining_capacity(), pool.capacity);
    }
}
