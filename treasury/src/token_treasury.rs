//! Fungible escrow treasury

use ledger::FungibleAsset;
use log::info;
use roles::{Capability, RoleGate};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TreasuryError};

/// Holds a fungible balance on behalf of the custody account.
///
/// Anyone may deposit (an escrowed pull-transfer requiring the depositor's
/// prior approval of the custody account as spender); only an
/// administrator may withdraw.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenTreasury {
    custody: String,
    asset: Option<String>,
    roles: RoleGate,
}

impl TokenTreasury {
    pub fn new(admin: &str, custody: &str) -> Self {
        Self {
            custody: custody.to_string(),
            asset: None,
            roles: RoleGate::new(admin),
        }
    }

    /// The account that holds escrowed funds.
    pub fn custody(&self) -> &str {
        &self.custody
    }

    /// Bind the treasury to one fungible asset. Caller must hold `Admin`.
    /// May be called again to rebind.
    pub fn set_asset_reference(&mut self, caller: &str, asset: &impl FungibleAsset) -> Result<()> {
        self.roles.require(Capability::Admin, caller)?;
        self.asset = Some(asset.asset_id().to_string());
        Ok(())
    }

    fn check_asset(&self, asset: &impl FungibleAsset) -> Result<()> {
        match &self.asset {
            None => Err(TreasuryError::AssetUnset),
            Some(expected) if expected != asset.asset_id() => Err(TreasuryError::AssetMismatch {
                expected: expected.clone(),
                actual: asset.asset_id().to_string(),
            }),
            Some(_) => Ok(()),
        }
    }

    /// Escrowed balance of the treasury.
    pub fn balance(&self, asset: &impl FungibleAsset) -> Result<u128> {
        self.check_asset(asset)?;
        Ok(asset.balance_of(&self.custody))
    }

    /// Pull `amount` from the caller into custody.
    pub fn deposit(
        &self,
        asset: &mut impl FungibleAsset,
        caller: &str,
        amount: u128,
    ) -> Result<()> {
        self.check_asset(asset)?;
        if amount == 0 {
            return Err(TreasuryError::InvalidArgument(
                "deposit amount must be greater than 0".to_string(),
            ));
        }
        asset.transfer_from(&self.custody, caller, &self.custody, amount)?;
        info!(
            "treasury {}: deposit {} from {}",
            self.custody, amount, caller
        );
        Ok(())
    }

    /// Push `amount` from custody to `recipient`. Caller must hold
    /// `Admin` or `Custodian`.
    pub fn withdraw(
        &self,
        asset: &mut impl FungibleAsset,
        caller: &str,
        recipient: &str,
        amount: u128,
    ) -> Result<()> {
        if !self.roles.has(Capability::Custodian, caller) {
            self.roles.require(Capability::Admin, caller)?;
        }
        self.check_asset(asset)?;
        asset.transfer(&self.custody, recipient, amount)?;
        info!(
            "treasury {}: withdraw {} to {}",
            self.custody, amount, recipient
        );
        Ok(())
    }

    /// Grant a treasury capability. Caller must hold `Admin`.
    pub fn grant_role(&mut self, caller: &str, capability: Capability, account: &str) -> Result<()> {
        self.roles.grant(caller, capability, account)?;
        Ok(())
    }
}
