//! Release curve evaluation
//!
//! Each pool category carries a declarative curve descriptor: an initial
//! lump released at month 0, a first tranche month, a tranche size, and a
//! tranche interval. One evaluator handles all four shapes, which keeps
//! the rounding behavior identical across pools. Percentages are integer
//! basis points over 10_000; amounts are `u128`, so even the largest pool
//! (290M tokens at 18 decimals) multiplied by the basis-point numerator
//! stays far below the type's range.

use serde::{Deserialize, Serialize};

use crate::pool::PoolCategory;

/// Length of a vesting month in seconds (30 days).
pub const MONTH_SECONDS: u64 = 30 * 86_400;

/// Basis-point denominator for percentage arithmetic.
pub const BPS_DENOMINATOR: u128 = 10_000;

/// Declarative release curve, evaluated per elapsed month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseCurve {
    /// Basis points released from month 0 onward.
    pub initial_bps: u32,
    /// Month index of the first periodic tranche.
    pub first_tranche_month: u64,
    /// Basis points added per tranche.
    pub tranche_bps: u32,
    /// Months between tranches.
    pub tranche_interval_months: u64,
    /// From this month on the full balance is released unconditionally.
    pub full_month: u64,
}

impl ReleaseCurve {
    /// The fixed curve for a pool category.
    ///
    /// | category     | month 0 | tranches                  | full  |
    /// |--------------|---------|---------------------------|-------|
    /// | private sale | 5%      | +4%/month from month 6    | 29    |
    /// | team         | 0%      | +2.8%/month from month 12 | 47    |
    /// | marketing    | 0%      | +10% every 4th month      | 36    |
    /// | treasury     | 10%     | +1%/month from month 1    | 90    |
    pub const fn for_category(category: PoolCategory) -> Self {
        match category {
            PoolCategory::PrivateSale => Self {
                initial_bps: 500,
                first_tranche_month: 6,
                tranche_bps: 400,
                tranche_interval_months: 1,
                full_month: 29,
            },
            PoolCategory::Team => Self {
                initial_bps: 0,
                first_tranche_month: 12,
                tranche_bps: 280,
                tranche_interval_months: 1,
                full_month: 47,
            },
            PoolCategory::Marketing => Self {
                initial_bps: 0,
                first_tranche_month: 0,
                tranche_bps: 1000,
                tranche_interval_months: 4,
                full_month: 36,
            },
            PoolCategory::Treasury => Self {
                initial_bps: 1000,
                first_tranche_month: 1,
                tranche_bps: 100,
                tranche_interval_months: 1,
                full_month: 90,
            },
        }
    }

    /// Cumulative released amount for `total` after `elapsed_months`.
    ///
    /// Once the schedule end is reached the full balance is returned
    /// unconditionally, so accumulated rounding can never release more
    /// than 100% or strand dust below it.
    pub fn released_amount(&self, total: u128, elapsed_months: u64) -> u128 {
        if elapsed_months >= self.full_month {
            return total;
        }
        let mut bps = self.initial_bps as u128;
        if elapsed_months >= self.first_tranche_month {
            let tranches =
                (elapsed_months - self.first_tranche_month) / self.tranche_interval_months + 1;
            bps += self.tranche_bps as u128 * tranches as u128;
        }
        (total * bps / BPS_DENOMINATOR).min(total)
    }
}
