//! Item ownership and transfer rules

use std::collections::BTreeMap;

use log::info;
use roles::{Capability, RoleGate};
use serde::{Deserialize, Serialize};

use crate::error::{RegistryError, Result};

/// Whether items in a registry may change hands after mint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransferPolicy {
    Transferable,
    /// No `transfer_from` ever succeeds, not even for the owner, the
    /// administrator, or the minter.
    Soulbound,
}

/// The capability contract a non-fungible asset reference must satisfy.
pub trait NonFungibleAsset {
    fn asset_id(&self) -> &str;
    fn owner_of(&self, id: u64) -> Option<&str>;
    fn transfer_from(&mut self, caller: &str, from: &str, to: &str, id: u64) -> Result<()>;
}

/// Unique-id -> owner registry for one collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemRegistry {
    asset_id: String,
    policy: TransferPolicy,
    base_uri: String,
    // Highest mintable id, inclusive (membership classes are 0..=3).
    id_limit: Option<u64>,
    minted: u64,
    owners: BTreeMap<u64, String>,
    approvals: BTreeMap<u64, String>,
    roles: RoleGate,
}

impl ItemRegistry {
    pub fn new(asset_id: &str, admin: &str, policy: TransferPolicy) -> Self {
        Self {
            asset_id: asset_id.to_string(),
            policy,
            base_uri: String::new(),
            id_limit: None,
            minted: 0,
            owners: BTreeMap::new(),
            approvals: BTreeMap::new(),
            roles: RoleGate::new(admin),
        }
    }

    /// Restrict mintable ids to `0..=limit`.
    pub fn with_id_limit(mut self, limit: u64) -> Self {
        self.id_limit = Some(limit);
        self
    }

    /// Count of items minted over the registry's lifetime.
    pub fn minted(&self) -> u64 {
        self.minted
    }

    pub fn policy(&self) -> TransferPolicy {
        self.policy
    }

    /// Mint item `id` to `recipient`. Caller must hold `Minter`.
    pub fn mint(&mut self, caller: &str, recipient: &str, id: u64) -> Result<()> {
        self.roles.require(Capability::Minter, caller)?;
        if recipient.is_empty() {
            return Err(RegistryError::InvalidArgument(
                "recipient address is empty".to_string(),
            ));
        }
        if let Some(limit) = self.id_limit {
            if id > limit {
                return Err(RegistryError::InvalidArgument(format!(
                    "item id {id} exceeds limit {limit}"
                )));
            }
        }
        if self.owners.contains_key(&id) {
            return Err(RegistryError::DuplicateItem(id));
        }
        self.owners.insert(id, recipient.to_string());
        self.minted += 1;
        info!("{}: minted item {} to {}", self.asset_id, id, recipient);
        Ok(())
    }

    /// Burn item `id`. Caller must hold `Burner`.
    pub fn burn(&mut self, caller: &str, id: u64) -> Result<()> {
        self.roles.require(Capability::Burner, caller)?;
        if self.owners.remove(&id).is_none() {
            return Err(RegistryError::UnknownItem(id));
        }
        self.approvals.remove(&id);
        info!("{}: burned item {}", self.asset_id, id);
        Ok(())
    }

    /// Approve `approved` to transfer item `id`. Caller must own the item.
    pub fn approve(&mut self, caller: &str, approved: &str, id: u64) -> Result<()> {
        let owner = self
            .owners
            .get(&id)
            .ok_or(RegistryError::UnknownItem(id))?;
        if owner != caller {
            return Err(RegistryError::NotAuthorized {
                id,
                account: caller.to_string(),
            });
        }
        self.approvals.insert(id, approved.to_string());
        Ok(())
    }

    /// Set the metadata base URI. Caller must hold `Admin`.
    pub fn set_base_uri(&mut self, caller: &str, base_uri: &str) -> Result<()> {
        self.roles.require(Capability::Admin, caller)?;
        self.base_uri = base_uri.to_string();
        Ok(())
    }

    /// Resolve the metadata URI for `id`: empty string while the base URI
    /// is unset, else `{base}/{id}.json`.
    pub fn token_uri(&self, id: u64) -> String {
        if self.base_uri.is_empty() {
            String::new()
        } else {
            format!("{}/{}.json", self.base_uri, id)
        }
    }

    /// Grant a registry capability. Caller must hold `Admin`.
    pub fn grant_role(&mut self, caller: &str, capability: Capability, account: &str) -> Result<()> {
        self.roles.grant(caller, capability, account)?;
        Ok(())
    }

    pub fn has_role(&self, capability: Capability, account: &str) -> bool {
        self.roles.has(capability, account)
    }
}

impl NonFungibleAsset for ItemRegistry {
    fn asset_id(&self) -> &str {
        &self.asset_id
    }

    fn owner_of(&self, id: u64) -> Option<&str> {
        self.owners.get(&id).map(String::as_str)
    }

    fn transfer_from(&mut self, caller: &str, from: &str, to: &str, id: u64) -> Result<()> {
        if self.policy == TransferPolicy::Soulbound {
            return Err(RegistryError::NonTransferable(id));
        }
        if to.is_empty() {
            return Err(RegistryError::InvalidArgument(
                "recipient address is empty".to_string(),
            ));
        }
        let owner = self
            .owners
            .get(&id)
            .ok_or(RegistryError::UnknownItem(id))?;
        if owner != from {
            return Err(RegistryError::WrongOwner(id));
        }
        let approved = self.approvals.get(&id).is_some_and(|a| a == caller);
        if caller != owner && !approved {
            return Err(RegistryError::NotAuthorized {
                id,
                account: caller.to_string(),
            });
        }
        self.owners.insert(id, to.to_string());
        self.approvals.remove(&id);
        info!("{}: item {} {} -> {}", self.asset_id, id, from, to);
        Ok(())
    }
}
