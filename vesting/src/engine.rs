//! Claim engine
//!
//! All mutating entry points take the caller identity, the current unix
//! time, and a mutable handle to the fungible asset; the hosting
//! environment guarantees total ordering of calls, so every operation is
//! all-or-nothing by construction: the ledger transfer happens before any
//! engine state is written, and a transfer failure propagates without
//! leaving partial updates behind.

use std::collections::BTreeMap;

use ledger::constants::DECIMALS;
use ledger::FungibleAsset;
use log::{debug, info};
use roles::{Capability, RoleGate};
use serde::{Deserialize, Serialize};

use crate::curve::MONTH_SECONDS;
use crate::error::{Result, VestingError};
use crate::pool::{Allocation, Pool, PoolCategory};

/// Snapshot of one pool's aggregates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolInfo {
    pub capacity: u128,
    pub start_time: u64,
    pub allocated: u128,
    pub claimed: u128,
}

/// Snapshot of one account's allocation record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountInfo {
    pub total_balance: u128,
    pub claimed_balance: u128,
    pub created_time: u64,
    pub last_claimed_time: u64,
}

/// The vesting engine: four pools, one allocation per account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VestingEngine {
    custody: String,
    asset: Option<String>,
    roles: RoleGate,
    pools: [Pool; 4],
    allocations: BTreeMap<String, Allocation>,
}

impl VestingEngine {
    /// All four pools pre-exist with their fixed capacities.
    pub fn new(admin: &str, custody: &str) -> Self {
        Self {
            custody: custody.to_string(),
            asset: None,
            roles: RoleGate::new(admin),
            pools: [
                Pool::new(PoolCategory::PrivateSale),
                Pool::new(PoolCategory::Team),
                Pool::new(PoolCategory::Marketing),
                Pool::new(PoolCategory::Treasury),
            ],
            allocations: BTreeMap::new(),
        }
    }

    /// The account holding escrowed vesting funds.
    pub fn custody(&self) -> &str {
        &self.custody
    }

    /// Bind the engine to the token it escrows and pays out. Caller must
    /// hold `Admin`. Rebinding is allowed; the reference must satisfy the
    /// fungible contract (18 fixed-point decimals).
    pub fn set_asset_reference(&mut self, caller: &str, asset: &impl FungibleAsset) -> Result<()> {
        self.roles.require(Capability::Admin, caller)?;
        if asset.decimals() != DECIMALS {
            return Err(VestingError::InvalidAssetReference(format!(
                "expected {} decimals, got {}",
                DECIMALS,
                asset.decimals()
            )));
        }
        self.asset = Some(asset.asset_id().to_string());
        Ok(())
    }

    fn check_asset(&self, asset: &impl FungibleAsset) -> Result<()> {
        match &self.asset {
            None => Err(VestingError::AssetUnset),
            Some(expected) if expected != asset.asset_id() => Err(VestingError::AssetMismatch {
                expected: expected.clone(),
                actual: asset.asset_id().to_string(),
            }),
            Some(_) => Ok(()),
        }
    }

    /// Set the release-curve start of a pool. Caller must hold `Admin`;
    /// the timestamp must be strictly in the future; write-once.
    pub fn set_start_time(
        &mut self,
        caller: &str,
        category: PoolCategory,
        start_time: u64,
        now: u64,
    ) -> Result<()> {
        self.roles.require(Capability::Admin, caller)?;
        if start_time <= now {
            return Err(VestingError::StartTimeNotFuture { start_time, now });
        }
        let pool = &mut self.pools[category as usize];
        if pool.start_time != 0 {
            return Err(VestingError::StartTimeAlreadySet(category));
        }
        pool.start_time = start_time;
        info!("vesting: {:?} pool starts at {}", category, start_time);
        Ok(())
    }

    /// Create `beneficiary`'s allocation in `category`, pulling `amount`
    /// from the caller into engine custody. Caller must hold `Admin` and
    /// must have approved the custody account as spender beforehand.
    pub fn add(
        &mut self,
        asset: &mut impl FungibleAsset,
        caller: &str,
        category: PoolCategory,
        amount: u128,
        beneficiary: &str,
        now: u64,
    ) -> Result<()> {
        self.roles.require(Capability::Admin, caller)?;
        self.check_asset(asset)?;
        if amount == 0 {
            return Err(VestingError::ZeroAmount);
        }
        if self.allocations.contains_key(beneficiary) {
            return Err(VestingError::DuplicateAllocation(beneficiary.to_string()));
        }
        let pool = &self.pools[category as usize];
        let remaining = pool.remaining_capacity();
        if amount > remaining {
            return Err(VestingError::CapacityExceeded {
                category,
                requested: amount,
                remaining,
            });
        }

        asset.transfer_from(&self.custody, caller, &self.custody, amount)?;

        self.pools[category as usize].allocated += amount;
        self.allocations.insert(
            beneficiary.to_string(),
            Allocation {
                account: beneficiary.to_string(),
                category,
                total_balance: amount,
                claimed_balance: 0,
                created_time: now,
                last_claimed_time: 0,
            },
        );
        info!(
            "vesting: allocated {} to {} in {:?} pool",
            amount, beneficiary, category
        );
        Ok(())
    }

    /// Claimable amount of `account` as of `now`. Pure query: never fails
    /// and never mutates; unknown accounts and pools without a start time
    /// yield 0.
    pub fn claimable_balance(&self, account: &str, now: u64) -> u128 {
        let Some(allocation) = self.allocations.get(account) else {
            return 0;
        };
        let pool = &self.pools[allocation.category as usize];
        Self::claimable(pool, allocation, now)
    }

    // Shared by the query and the claim path so both always agree.
    fn claimable(pool: &Pool, allocation: &Allocation, now: u64) -> u128 {
        if pool.start_time == 0 || now < pool.start_time {
            return 0;
        }
        let elapsed_months = (now - pool.start_time) / MONTH_SECONDS;
        let released = pool
            .curve
            .released_amount(allocation.total_balance, elapsed_months);
        released.saturating_sub(allocation.claimed_balance)
    }

    /// Claim everything currently releasable for the caller. Transfers
    /// from engine custody to the caller, then advances the claimed
    /// aggregates. Fails loudly where the query returns 0: missing
    /// allocation and unset start time are state errors, an empty
    /// claimable balance is a balance error.
    pub fn claim(&mut self, asset: &mut impl FungibleAsset, caller: &str, now: u64) -> Result<u128> {
        self.check_asset(asset)?;
        let allocation = self
            .allocations
            .get(caller)
            .ok_or_else(|| VestingError::NoAllocation(caller.to_string()))?;
        let category = allocation.category;
        let pool = &self.pools[category as usize];
        if pool.start_time == 0 {
            return Err(VestingError::StartTimeUnset(category));
        }
        let claimable = Self::claimable(pool, allocation, now);
        debug!("vesting: {} claimable {} at {}", caller, claimable, now);
        if claimable == 0 {
            return Err(VestingError::NothingToClaim(caller.to_string()));
        }

        asset.transfer(&self.custody, caller, claimable)?;

        self.pools[category as usize].claimed += claimable;
        if let Some(allocation) = self.allocations.get_mut(caller) {
            allocation.claimed_balance += claimable;
            allocation.last_claimed_time = now;
        }
        info!(
            "vesting: {} claimed {} from {:?} pool",
            caller, claimable, category
        );
        Ok(claimable)
    }

    /// Aggregate view of one pool.
    pub fn vesting_info(&self, category: PoolCategory) -> PoolInfo {
        let pool = &self.pools[category as usize];
        PoolInfo {
            capacity: pool.capacity,
            start_time: pool.start_time,
            allocated: pool.allocated,
            claimed: pool.claimed,
        }
    }

    /// One account's allocation record, if it exists.
    pub fn vesting_account_info(&self, account: &str) -> Option<AccountInfo> {
        self.allocations.get(account).map(|allocation| AccountInfo {
            total_balance: allocation.total_balance,
            claimed_balance: allocation.claimed_balance,
            created_time: allocation.created_time,
            last_claimed_time: allocation.last_claimed_time,
        })
    }

    /// Sum of per-account claimed balances within one pool. Used by the
    /// conservation checks; always equals the pool's `claimed` aggregate.
    pub fn claimed_by_pool(&self, category: PoolCategory) -> u128 {
        self.allocations
            .values()
            .filter(|allocation| allocation.category == category)
            .map(|allocation| allocation.claimed_balance)
            .sum()
    }

    /// Grant an engine capability. Caller must hold `Admin`.
    pub fn grant_role(&mut self, caller: &str, capability: Capability, account: &str) -> Result<()> {
        self.roles.grant(caller, capability, account)?;
        Ok(())
    }
}
