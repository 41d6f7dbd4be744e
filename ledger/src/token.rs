//! Fungible token ledger

use std::collections::HashMap;

use log::{debug, info};
use roles::{Capability, RoleGate};
use serde::{Deserialize, Serialize};

use crate::asset::FungibleAsset;
use crate::constants::{DECIMALS, FIXED_SUPPLY};
use crate::error::{LedgerError, Result};

/// Account -> balance mapping for one fungible asset.
///
/// Two flavors exist: a fixed-supply ledger minted in full to its
/// administrator at creation (the sale token), and a mintable ledger whose
/// supply grows and shrinks behind `Minter`/`Burner` capabilities (the
/// points asset).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenLedger {
    asset_id: String,
    decimals: u8,
    total_supply: u128,
    fixed_supply: bool,
    balances: HashMap<String, u128>,
    // owner -> spender -> approved amount
    allowances: HashMap<String, HashMap<String, u128>>,
    roles: RoleGate,
}

impl TokenLedger {
    /// Fixed-supply ledger; the entire supply is credited to `admin`.
    pub fn new_fixed(asset_id: &str, admin: &str) -> Self {
        let mut balances = HashMap::new();
        balances.insert(admin.to_string(), FIXED_SUPPLY);
        Self {
            asset_id: asset_id.to_string(),
            decimals: DECIMALS,
            total_supply: FIXED_SUPPLY,
            fixed_supply: true,
            balances,
            allowances: HashMap::new(),
            roles: RoleGate::new(admin),
        }
    }

    /// Mintable ledger with zero initial supply.
    pub fn new_mintable(asset_id: &str, admin: &str) -> Self {
        Self {
            asset_id: asset_id.to_string(),
            decimals: DECIMALS,
            total_supply: 0,
            fixed_supply: false,
            balances: HashMap::new(),
            allowances: HashMap::new(),
            roles: RoleGate::new(admin),
        }
    }

    pub fn total_supply(&self) -> u128 {
        self.total_supply
    }

    pub fn allowance(&self, owner: &str, spender: &str) -> u128 {
        self.allowances
            .get(owner)
            .and_then(|spenders| spenders.get(spender))
            .copied()
            .unwrap_or(0)
    }

    /// Approve `spender` to pull up to `amount` from the caller's balance.
    pub fn approve(&mut self, caller: &str, spender: &str, amount: u128) -> Result<()> {
        if spender.is_empty() {
            return Err(LedgerError::InvalidArgument(
                "spender address is empty".to_string(),
            ));
        }
        self.allowances
            .entry(caller.to_string())
            .or_default()
            .insert(spender.to_string(), amount);
        Ok(())
    }

    /// Mint `amount` to `recipient`. Caller must hold `Minter`.
    pub fn mint(&mut self, caller: &str, recipient: &str, amount: u128) -> Result<()> {
        self.roles.require(Capability::Minter, caller)?;
        if self.fixed_supply {
            return Err(LedgerError::FixedSupply);
        }
        if amount == 0 {
            return Err(LedgerError::InvalidArgument(
                "mint amount must be greater than 0".to_string(),
            ));
        }
        self.total_supply = self
            .total_supply
            .checked_add(amount)
            .ok_or(LedgerError::SupplyOverflow)?;
        self.credit(recipient, amount);
        info!(
            "{}: minted {} to {} (supply {})",
            self.asset_id, amount, recipient, self.total_supply
        );
        Ok(())
    }

    /// Burn `amount` from `from`. Caller must hold `Burner`.
    pub fn burn(&mut self, caller: &str, from: &str, amount: u128) -> Result<()> {
        self.roles.require(Capability::Burner, caller)?;
        self.debit(from, amount)?;
        self.total_supply -= amount;
        info!(
            "{}: burned {} from {} (supply {})",
            self.asset_id, amount, from, self.total_supply
        );
        Ok(())
    }

    /// Grant a ledger capability. Caller must hold `Admin`.
    pub fn grant_role(&mut self, caller: &str, capability: Capability, account: &str) -> Result<()> {
        self.roles.grant(caller, capability, account)?;
        Ok(())
    }

    /// Revoke a ledger capability. Caller must hold `Admin`.
    pub fn revoke_role(
        &mut self,
        caller: &str,
        capability: Capability,
        account: &str,
    ) -> Result<()> {
        self.roles.revoke(caller, capability, account)?;
        Ok(())
    }

    pub fn has_role(&self, capability: Capability, account: &str) -> bool {
        self.roles.has(capability, account)
    }

    fn credit(&mut self, account: &str, amount: u128) {
        let balance = self.balances.entry(account.to_string()).or_insert(0);
        *balance += amount;
    }

    fn debit(&mut self, account: &str, amount: u128) -> Result<()> {
        let available = self.balance_of(account);
        if available < amount {
            return Err(LedgerError::InsufficientBalance {
                requested: amount,
                available,
            });
        }
        if let Some(balance) = self.balances.get_mut(account) {
            *balance -= amount;
        }
        Ok(())
    }

    fn move_balance(&mut self, from: &str, to: &str, amount: u128) -> Result<()> {
        if to.is_empty() {
            return Err(LedgerError::InvalidArgument(
                "recipient address is empty".to_string(),
            ));
        }
        if amount == 0 {
            return Err(LedgerError::InvalidArgument(
                "transfer amount must be greater than 0".to_string(),
            ));
        }
        self.debit(from, amount)?;
        self.credit(to, amount);
        debug!("{}: {} -> {} amount {}", self.asset_id, from, to, amount);
        Ok(())
    }
}

impl FungibleAsset for TokenLedger {
    fn asset_id(&self) -> &str {
        &self.asset_id
    }

    fn decimals(&self) -> u8 {
        self.decimals
    }

    fn balance_of(&self, account: &str) -> u128 {
        self.balances.get(account).copied().unwrap_or(0)
    }

    fn transfer(&mut self, caller: &str, to: &str, amount: u128) -> Result<()> {
        self.move_balance(caller, to, amount)
    }

    fn transfer_from(&mut self, caller: &str, from: &str, to: &str, amount: u128) -> Result<()> {
        let approved = self.allowance(from, caller);
        if approved < amount {
            return Err(LedgerError::InsufficientAllowance {
                requested: amount,
                approved,
            });
        }
        self.move_balance(from, to, amount)?;
        if let Some(spenders) = self.allowances.get_mut(from) {
            if let Some(remaining) = spenders.get_mut(caller) {
                *remaining -= amount;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::UNIT;

    #[test]
    fn test_fixed_supply_goes_to_admin() {
        let ledger = TokenLedger::new_fixed("DST", "owner");
        assert_eq!(ledger.balance_of("owner"), FIXED_SUPPLY);
        assert_eq!(ledger.total_supply(), FIXED_SUPPLY);
        assert_eq!(ledger.balance_of("stranger"), 0);
    }

    #[test]
    fn test_transfer() {
        let mut ledger = TokenLedger::new_fixed("DST", "owner");
        ledger.transfer("owner", "alice", 1000).unwrap();
        assert_eq!(ledger.balance_of("alice"), 1000);
        assert_eq!(ledger.balance_of("owner"), FIXED_SUPPLY - 1000);
    }

    #[test]
    fn test_transfer_insufficient_balance() {
        let mut ledger = TokenLedger::new_fixed("DST", "owner");
        let err = ledger.transfer("alice", "bob", 1).unwrap_err();
        assert!(matches!(
            err,
            LedgerError::InsufficientBalance {
                requested: 1,
                available: 0
            }
        ));
    }

    #[test]
    fn test_transfer_from_consumes_allowance() {
        let mut ledger = TokenLedger::new_fixed("DST", "owner");
        ledger.approve("owner", "escrow", 300).unwrap();

        ledger
            .transfer_from("escrow", "owner", "vault", 200)
            .unwrap();
        assert_eq!(ledger.balance_of("vault"), 200);
        assert_eq!(ledger.allowance("owner", "escrow"), 100);

        let err = ledger
            .transfer_from("escrow", "owner", "vault", 200)
            .unwrap_err();
        assert!(matches!(
            err,
            LedgerError::InsufficientAllowance {
                requested: 200,
                approved: 100
            }
        ));
    }

    #[test]
    fn test_mint_requires_minter() {
        let mut ledger = TokenLedger::new_mintable("DSP", "owner");
        assert!(ledger.mint("owner", "alice", 100).is_err());

        ledger
            .grant_role("owner", Capability::Minter, "minter")
            .unwrap();
        ledger.mint("minter", "alice", 100 * UNIT).unwrap();
        assert_eq!(ledger.balance_of("alice"), 100 * UNIT);
        assert_eq!(ledger.total_supply(), 100 * UNIT);
    }

    #[test]
    fn test_fixed_supply_refuses_mint() {
        let mut ledger = TokenLedger::new_fixed("DST", "owner");
        ledger
            .grant_role("owner", Capability::Minter, "minter")
            .unwrap();
        assert!(matches!(
            ledger.mint("minter", "alice", 1),
            Err(LedgerError::FixedSupply)
        ));
    }

    #[test]
    fn test_burn_requires_burner() {
        let mut ledger = TokenLedger::new_mintable("DSP", "owner");
        ledger
            .grant_role("owner", Capability::Minter, "owner")
            .unwrap();
        ledger.mint("owner", "alice", 500).unwrap();

        assert!(ledger.burn("alice", "alice", 100).is_err());

        ledger
            .grant_role("owner", Capability::Burner, "burner")
            .unwrap();
        ledger.burn("burner", "alice", 100).unwrap();
        assert_eq!(ledger.balance_of("alice"), 400);
        assert_eq!(ledger.total_supply(), 400);
    }

    #[test]
    fn test_snapshot_restore() {
        let mut ledger = TokenLedger::new_fixed("DST", "owner");
        ledger.transfer("owner", "alice", 42).unwrap();

        let snapshot = serde_json::to_string(&ledger).unwrap();
        let restored: TokenLedger = serde_json::from_str(&snapshot).unwrap();
        assert_eq!(restored.balance_of("alice"), 42);
        assert_eq!(restored.total_supply(), FIXED_SUPPLY);
    }
}
