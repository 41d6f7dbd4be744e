//! Phased sale swapper
//!
//! Exchanges a payment asset for sale tokens at a fixed price across three
//! block-height phases: presale 1 (whitelist with per-account quota),
//! presale 2 (whitelist only), and the open public sale. Tokens are served
//! from the swapper's custody balance; proceeds accumulate there until an
//! administrator sweeps them to the foundation wallet.

use std::collections::BTreeMap;

use ledger::FungibleAsset;
use log::info;
use roles::{Capability, RoleGate};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SaleError};

/// Sale phase as of a block height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SalePhase {
    NotStarted,
    PreSale1,
    PreSale2,
    Public,
}

/// Price and phase boundaries. Re-settable by an administrator until the
/// sale operator is satisfied with the schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleInfo {
    /// Tokens per smallest payment unit.
    pub price: u128,
    pub presale1_height: u64,
    pub presale2_height: u64,
    pub public_sale_height: u64,
}

/// Whitelist entry for the two presale phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleAccount {
    /// Maximum tokens swappable during presale 1.
    pub quota: u128,
    /// Tokens swapped so far across all phases.
    pub swapped: u128,
    pub active: bool,
}

/// The sale swapper: one token asset out, one payment asset in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreSale {
    custody: String,
    token_asset: Option<String>,
    payment_asset: Option<String>,
    foundation_wallet: Option<String>,
    info: Option<SaleInfo>,
    accounts: BTreeMap<String, SaleAccount>,
    roles: RoleGate,
}

impl PreSale {
    pub fn new(admin: &str, custody: &str) -> Self {
        Self {
            custody: custody.to_string(),
            token_asset: None,
            payment_asset: None,
            foundation_wallet: None,
            info: None,
            accounts: BTreeMap::new(),
            roles: RoleGate::new(admin),
        }
    }

    /// The account holding sale tokens and accumulated proceeds.
    pub fn custody(&self) -> &str {
        &self.custody
    }

    pub fn sale_info(&self) -> Option<SaleInfo> {
        self.info
    }

    pub fn account(&self, account: &str) -> Option<SaleAccount> {
        self.accounts.get(account).copied()
    }

    /// Configure price and phase heights. Caller must hold `Admin`. The
    /// price must be positive and the phase heights non-decreasing.
    pub fn set_sale_info(
        &mut self,
        caller: &str,
        price: u128,
        presale1_height: u64,
        presale2_height: u64,
        public_sale_height: u64,
    ) -> Result<()> {
        self.roles.require(Capability::Admin, caller)?;
        if price == 0 {
            return Err(SaleError::InvalidPrice);
        }
        if presale1_height > presale2_height || presale2_height > public_sale_height {
            return Err(SaleError::InvalidSchedule {
                presale1: presale1_height,
                presale2: presale2_height,
                public: public_sale_height,
            });
        }
        self.info = Some(SaleInfo {
            price,
            presale1_height,
            presale2_height,
            public_sale_height,
        });
        info!(
            "sale: price {} phases {}/{}/{}",
            price, presale1_height, presale2_height, public_sale_height
        );
        Ok(())
    }

    /// Set the proceeds recipient. Caller must hold `Admin`.
    pub fn set_foundation_wallet(&mut self, caller: &str, wallet: &str) -> Result<()> {
        self.roles.require(Capability::Admin, caller)?;
        if wallet.is_empty() {
            return Err(SaleError::InvalidArgument(
                "foundation wallet address is empty".to_string(),
            ));
        }
        self.foundation_wallet = Some(wallet.to_string());
        Ok(())
    }

    /// Bind the sale token. Caller must hold `Admin`; rebindable.
    pub fn set_asset_reference(&mut self, caller: &str, asset: &impl FungibleAsset) -> Result<()> {
        self.roles.require(Capability::Admin, caller)?;
        self.token_asset = Some(asset.asset_id().to_string());
        Ok(())
    }

    /// Bind the payment asset. Caller must hold `Admin`; rebindable.
    pub fn set_payment_reference(&mut self, caller: &str, asset: &impl FungibleAsset) -> Result<()> {
        self.roles.require(Capability::Admin, caller)?;
        self.payment_asset = Some(asset.asset_id().to_string());
        Ok(())
    }

    fn check_asset(bound: &Option<String>, asset: &impl FungibleAsset) -> Result<()> {
        match bound {
            None => Err(SaleError::AssetUnset),
            Some(expected) if expected != asset.asset_id() => Err(SaleError::AssetMismatch {
                expected: expected.clone(),
                actual: asset.asset_id().to_string(),
            }),
            Some(_) => Ok(()),
        }
    }

    /// Register whitelist entries with their presale-1 quotas. Caller must
    /// hold `Admin`; the two slices must pair up.
    pub fn add_accounts(&mut self, caller: &str, accounts: &[&str], quotas: &[u128]) -> Result<()> {
        self.roles.require(Capability::Admin, caller)?;
        if accounts.len() != quotas.len() {
            return Err(SaleError::LengthMismatch {
                accounts: accounts.len(),
                quotas: quotas.len(),
            });
        }
        for (account, &quota) in accounts.iter().zip(quotas) {
            if account.is_empty() {
                return Err(SaleError::InvalidArgument(
                    "sale account address is empty".to_string(),
                ));
            }
            self.accounts.insert(
                account.to_string(),
                SaleAccount {
                    quota,
                    swapped: 0,
                    active: true,
                },
            );
        }
        Ok(())
    }

    /// Adjust an already-registered entry. Caller must hold `Admin`.
    pub fn set_account(
        &mut self,
        caller: &str,
        account: &str,
        quota: u128,
        active: bool,
    ) -> Result<()> {
        self.roles.require(Capability::Admin, caller)?;
        let entry = self
            .accounts
            .get_mut(account)
            .ok_or_else(|| SaleError::UnknownAccount(account.to_string()))?;
        entry.quota = quota;
        entry.active = active;
        Ok(())
    }

    /// Phase as of `height`; `SaleNotConfigured` until the schedule is set.
    pub fn phase(&self, height: u64) -> Result<SalePhase> {
        let info = self.info.ok_or(SaleError::SaleNotConfigured)?;
        Ok(if height < info.presale1_height {
            SalePhase::NotStarted
        } else if height < info.presale2_height {
            SalePhase::PreSale1
        } else if height < info.public_sale_height {
            SalePhase::PreSale2
        } else {
            SalePhase::Public
        })
    }

    /// Swap `paid` payment units for tokens at the configured price.
    /// The caller must have approved the custody account on the payment
    /// ledger beforehand. Returns the token amount served.
    ///
    /// Presale 1 admits active whitelist entries within their quota;
    /// presale 2 drops the quota; the public phase admits anyone. Every
    /// phase is bounded by the tokens left in custody.
    pub fn swap(
        &mut self,
        token: &mut impl FungibleAsset,
        payment: &mut impl FungibleAsset,
        caller: &str,
        paid: u128,
        height: u64,
    ) -> Result<u128> {
        Self::check_asset(&self.token_asset, token)?;
        Self::check_asset(&self.payment_asset, payment)?;
        let info = self.info.ok_or(SaleError::SaleNotConfigured)?;
        if paid == 0 {
            return Err(SaleError::ZeroPayment);
        }

        let tokens = paid
            .checked_mul(info.price)
            .ok_or_else(|| SaleError::InvalidArgument("payment amount overflows".to_string()))?;

        match self.phase(height)? {
            SalePhase::NotStarted => {
                return Err(SaleError::SaleNotStarted {
                    height,
                    opens_at: info.presale1_height,
                });
            }
            SalePhase::PreSale1 => {
                let entry = self
                    .accounts
                    .get(caller)
                    .filter(|entry| entry.active)
                    .ok_or_else(|| SaleError::NotWhitelisted(caller.to_string()))?;
                let remaining = entry.quota.saturating_sub(entry.swapped);
                if tokens > remaining {
                    return Err(SaleError::QuotaExceeded {
                        requested: tokens,
                        remaining,
                    });
                }
            }
            SalePhase::PreSale2 => {
                self.accounts
                    .get(caller)
                    .filter(|entry| entry.active)
                    .ok_or_else(|| SaleError::NotWhitelisted(caller.to_string()))?;
            }
            SalePhase::Public => {}
        }

        // Custody must be able to serve before any payment is pulled.
        let available = token.balance_of(&self.custody);
        if tokens > available {
            return Err(SaleError::Ledger(ledger::LedgerError::InsufficientBalance {
                requested: tokens,
                available,
            }));
        }

        payment.transfer_from(&self.custody, caller, &self.custody, paid)?;
        token.transfer(&self.custody, caller, tokens)?;

        if let Some(entry) = self.accounts.get_mut(caller) {
            entry.swapped += tokens;
        }
        info!("sale: {} swapped {} for {} tokens", caller, paid, tokens);
        Ok(tokens)
    }

    /// Custody balance of the payment asset.
    pub fn payment_balance(&self, payment: &impl FungibleAsset) -> Result<u128> {
        Self::check_asset(&self.payment_asset, payment)?;
        Ok(payment.balance_of(&self.custody))
    }

    /// Custody balance of the sale token.
    pub fn token_balance(&self, token: &impl FungibleAsset) -> Result<u128> {
        Self::check_asset(&self.token_asset, token)?;
        Ok(token.balance_of(&self.custody))
    }

    /// Sweep all accumulated proceeds to the foundation wallet. Caller
    /// must hold `Admin`. A zero balance is a no-op.
    pub fn withdraw_payment(&mut self, payment: &mut impl FungibleAsset, caller: &str) -> Result<u128> {
        self.roles.require(Capability::Admin, caller)?;
        Self::check_asset(&self.payment_asset, payment)?;
        let wallet = self
            .foundation_wallet
            .clone()
            .ok_or(SaleError::FoundationWalletUnset)?;
        let balance = payment.balance_of(&self.custody);
        if balance > 0 {
            payment.transfer(&self.custody, &wallet, balance)?;
            info!("sale: swept {} proceeds to {}", balance, wallet);
        }
        Ok(balance)
    }

    /// Return all unsold tokens to the foundation wallet. Caller must
    /// hold `Admin`. A zero balance is a no-op.
    pub fn withdraw_token(&mut self, token: &mut impl FungibleAsset, caller: &str) -> Result<u128> {
        self.roles.require(Capability::Admin, caller)?;
        Self::check_asset(&self.token_asset, token)?;
        let wallet = self
            .foundation_wallet
            .clone()
            .ok_or(SaleError::FoundationWalletUnset)?;
        let balance = token.balance_of(&self.custody);
        if balance > 0 {
            token.transfer(&self.custody, &wallet, balance)?;
            info!("sale: returned {} unsold tokens to {}", balance, wallet);
        }
        Ok(balance)
    }

    /// Grant a sale capability. Caller must hold `Admin`.
    pub fn grant_role(&mut self, caller: &str, capability: Capability, account: &str) -> Result<()> {
        self.roles.grant(caller, capability, account)?;
        Ok(())
    }
}
