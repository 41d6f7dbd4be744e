//! Capability-based access control
//!
//! Every component in the suite owns a `RoleGate` and checks the caller's
//! capability before executing a mutating entry point. The gate holds no
//! state beyond the capability -> account-set mapping; capabilities do not
//! expire.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Capabilities recognized across the suite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Capability {
    /// May grant/revoke capabilities and call administrator entry points.
    Admin,
    /// May mint fungible or non-fungible assets.
    Minter,
    /// May burn fungible or non-fungible assets.
    Burner,
    /// May release escrowed holdings from a treasury.
    Custodian,
}

/// Role gate errors
#[derive(Error, Debug)]
pub enum RoleError {
    #[error("permission denied: {account} does not hold {capability:?}")]
    PermissionDenied {
        capability: Capability,
        account: String,
    },
}

pub type Result<T> = std::result::Result<T, RoleError>;

/// Capability -> account-set mapping with administrator-gated mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleGate {
    grants: BTreeMap<Capability, BTreeSet<String>>,
}

impl RoleGate {
    /// Create a gate with `admin` holding the `Admin` capability.
    pub fn new(admin: &str) -> Self {
        let mut grants = BTreeMap::new();
        grants.insert(
            Capability::Admin,
            BTreeSet::from([admin.to_string()]),
        );
        Self { grants }
    }

    /// Does `account` hold `capability`?
    pub fn has(&self, capability: Capability, account: &str) -> bool {
        self.grants
            .get(&capability)
            .is_some_and(|accounts| accounts.contains(account))
    }

    /// Fail with a permission error unless `account` holds `capability`.
    pub fn require(&self, capability: Capability, account: &str) -> Result<()> {
        if self.has(capability, account) {
            Ok(())
        } else {
            Err(RoleError::PermissionDenied {
                capability,
                account: account.to_string(),
            })
        }
    }

    /// Grant `capability` to `account`. Caller must hold `Admin`.
    pub fn grant(&mut self, caller: &str, capability: Capability, account: &str) -> Result<()> {
        self.require(Capability::Admin, caller)?;
        self.grants
            .entry(capability)
            .or_default()
            .insert(account.to_string());
        Ok(())
    }

    /// Revoke `capability` from `account`. Caller must hold `Admin`.
    pub fn revoke(&mut self, caller: &str, capability: Capability, account: &str) -> Result<()> {
        self.require(Capability::Admin, caller)?;
        if let Some(accounts) = self.grants.get_mut(&capability) {
            accounts.remove(account);
        }
        Ok(())
    }
}
