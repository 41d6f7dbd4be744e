//! Non-fungible escrow treasury

use std::collections::BTreeMap;

use log::info;
use registry::NonFungibleAsset;
use roles::{Capability, RoleGate};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TreasuryError};

/// Holds items in custody and records the depositor per item id, so an
/// administrator-authorized withdraw returns each item to whoever parted
/// with it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemTreasury {
    custody: String,
    asset: Option<String>,
    // item id -> depositor
    holders: BTreeMap<u64, String>,
    roles: RoleGate,
}

impl ItemTreasury {
    pub fn new(admin: &str, custody: &str) -> Self {
        Self {
            custody: custody.to_string(),
            asset: None,
            holders: BTreeMap::new(),
            roles: RoleGate::new(admin),
        }
    }

    pub fn custody(&self) -> &str {
        &self.custody
    }

    /// Bind the treasury to one item collection. Caller must hold `Admin`.
    pub fn set_asset_reference(
        &mut self,
        caller: &str,
        asset: &impl NonFungibleAsset,
    ) -> Result<()> {
        self.roles.require(Capability::Admin, caller)?;
        self.asset = Some(asset.asset_id().to_string());
        Ok(())
    }

    fn check_asset(&self, asset: &impl NonFungibleAsset) -> Result<()> {
        match &self.asset {
            None => Err(TreasuryError::AssetUnset),
            Some(expected) if expected != asset.asset_id() => Err(TreasuryError::AssetMismatch {
                expected: expected.clone(),
                actual: asset.asset_id().to_string(),
            }),
            Some(_) => Ok(()),
        }
    }

    /// Recorded depositor of `id`, if the item is in custody.
    pub fn holder_of(&self, id: u64) -> Option<&str> {
        self.holders.get(&id).map(String::as_str)
    }

    /// Move item `id` from the caller into custody. The caller must
    /// currently own the item.
    pub fn deposit(
        &mut self,
        asset: &mut impl NonFungibleAsset,
        caller: &str,
        id: u64,
    ) -> Result<()> {
        self.check_asset(asset)?;
        match asset.owner_of(id) {
            Some(owner) if owner == caller => {}
            _ => {
                return Err(TreasuryError::NotItemOwner {
                    id,
                    account: caller.to_string(),
                })
            }
        }
        asset.transfer_from(caller, caller, &self.custody, id)?;
        self.holders.insert(id, caller.to_string());
        info!("treasury {}: item {} deposited by {}", self.custody, id, caller);
        Ok(())
    }

    /// Return item `id` to its recorded depositor. Caller must hold
    /// `Admin` or `Custodian`. Fails if the item is not actually in
    /// custody.
    pub fn withdraw(
        &mut self,
        asset: &mut impl NonFungibleAsset,
        caller: &str,
        id: u64,
    ) -> Result<()> {
        if !self.roles.has(Capability::Custodian, caller) {
            self.roles.require(Capability::Admin, caller)?;
        }
        self.check_asset(asset)?;
        let holder = match self.holders.get(&id) {
            Some(holder) => holder.clone(),
            None => return Err(TreasuryError::NotInCustody(id)),
        };
        if asset.owner_of(id) != Some(self.custody.as_str()) {
            return Err(TreasuryError::NotInCustody(id));
        }
        asset.transfer_from(&self.custody, &self.custody, &holder, id)?;
        self.holders.remove(&id);
        info!("treasury {}: item {} returned to {}", self.custody, id, holder);
        Ok(())
    }

    /// Grant a treasury capability. Caller must hold `Admin`.
    pub fn grant_role(&mut self, caller: &str, capability: Capability, account: &str) -> Result<()> {
        self.roles.grant(caller, capability, account)?;
        Ok(())
    }
}
