//! Token Ledger Adapter
//!
//! Balances per `(token, holder)` with optional trustline gating. A gated
//! holder can only receive an asset after registering a trustline for it,
//! which a contract cannot do on its own behalf. The issuer of an asset may
//! hand an administrator its mint/burn authority; [`IssuerGrant`] wraps that
//! authority as a [`MintCapability`].

use crate::domain::Identity;
use crate::ports::outbound::{MintCapability, TokenError, TokenLedger};
use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::debug;

#[derive(Default)]
struct LedgerState {
    balances: HashMap<(Identity, Identity), u128>,
    trustlines: HashSet<(Identity, Identity)>,
    issuers: HashMap<Identity, Identity>,
    admins: HashMap<Identity, Identity>,
}

/// In-memory token ledger.
pub struct InMemoryTokenLedger {
    state: RwLock<LedgerState>,
    require_trustlines: bool,
}

impl InMemoryTokenLedger {
    /// Ledger where any holder may receive any asset (origin-style).
    pub fn new() -> Self {
        Self {
            state: RwLock::new(LedgerState::default()),
            require_trustlines: false,
        }
    }

    /// Ledger where receiving an asset requires a trustline (destination-style).
    pub fn with_trustlines() -> Self {
        Self {
            state: RwLock::new(LedgerState::default()),
            require_trustlines: true,
        }
    }

    /// Issue a new asset. The issuer is also its first administrator.
    pub fn register_asset(&self, token: Identity, issuer: Identity) {
        let mut state = self.state.write();
        state.issuers.insert(token, issuer);
        state.admins.insert(token, issuer);
    }

    /// Register a trustline from `holder` to `token`.
    pub fn establish_trustline(&self, token: Identity, holder: Identity) {
        self.state.write().trustlines.insert((token, holder));
    }

    /// Hand the asset's supply authority to `admin`. Only the issuer may do this.
    pub fn set_admin(
        &self,
        token: &Identity,
        issuer: &Identity,
        admin: Identity,
    ) -> Result<(), TokenError> {
        let mut state = self.state.write();
        if state.issuers.get(token) != Some(issuer) {
            return Err(TokenError::Unauthorized(*token));
        }
        state.admins.insert(*token, admin);
        Ok(())
    }

    /// Credit a balance directly (test setup).
    pub fn credit(&self, token: Identity, holder: Identity, amount: u128) {
        *self.state.write().balances.entry((token, holder)).or_insert(0) += amount;
    }

    fn can_receive(&self, state: &LedgerState, token: &Identity, holder: &Identity) -> bool {
        !self.require_trustlines
            || state.issuers.get(token) == Some(holder)
            || state.trustlines.contains(&(*token, *holder))
    }

    fn admin_mint(
        &self,
        admin: &Identity,
        token: &Identity,
        to: &Identity,
        amount: u128,
    ) -> Result<(), TokenError> {
        let mut state = self.state.write();
        if state.admins.get(token) != Some(admin) {
            return Err(TokenError::Unauthorized(*token));
        }
        let balance = state.balances.entry((*token, *to)).or_insert(0);
        *balance = balance.checked_add(amount).ok_or(TokenError::Overflow)?;
        debug!(%token, %to, amount = %amount, "[escrow] Admin mint");
        Ok(())
    }

    fn admin_burn(
        &self,
        admin: &Identity,
        token: &Identity,
        from: &Identity,
        amount: u128,
    ) -> Result<(), TokenError> {
        let mut state = self.state.write();
        if state.admins.get(token) != Some(admin) {
            return Err(TokenError::Unauthorized(*token));
        }
        let balance = state.balances.entry((*token, *from)).or_insert(0);
        if *balance < amount {
            return Err(TokenError::InsufficientBalance {
                holder: *from,
                balance: *balance,
                requested: amount,
            });
        }
        *balance -= amount;
        Ok(())
    }
}

impl Default for InMemoryTokenLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenLedger for InMemoryTokenLedger {
    fn transfer(
        &self,
        token: &Identity,
        from: &Identity,
        to: &Identity,
        amount: u128,
    ) -> Result<(), TokenError> {
        let mut state = self.state.write();

        if !self.can_receive(&state, token, to) {
            return Err(TokenError::MissingTrustline {
                token: *token,
                holder: *to,
            });
        }

        let from_balance = state.balances.get(&(*token, *from)).copied().unwrap_or(0);
        if from_balance < amount {
            return Err(TokenError::InsufficientBalance {
                holder: *from,
                balance: from_balance,
                requested: amount,
            });
        }
        let to_balance = state.balances.get(&(*token, *to)).copied().unwrap_or(0);
        let credited = to_balance.checked_add(amount).ok_or(TokenError::Overflow)?;

        state.balances.insert((*token, *from), from_balance - amount);
        state.balances.insert((*token, *to), credited);
        Ok(())
    }

    fn balance(&self, token: &Identity, holder: &Identity) -> u128 {
        self.state
            .read()
            .balances
            .get(&(*token, *holder))
            .copied()
            .unwrap_or(0)
    }
}

/// Mint/burn authority over assets of an [`InMemoryTokenLedger`], exercised
/// as `grantee`. Works only while the ledger lists `grantee` as admin.
pub struct IssuerGrant {
    ledger: Arc<InMemoryTokenLedger>,
    grantee: Identity,
}

impl IssuerGrant {
    /// Capability acting as `grantee`.
    pub fn new(ledger: Arc<InMemoryTokenLedger>, grantee: Identity) -> Self {
        Self { ledger, grantee }
    }
}

impl MintCapability for IssuerGrant {
    fn mint(&self, token: &Identity, to: &Identity, amount: u128) -> Result<(), TokenError> {
        self.ledger.admin_mint(&self.grantee, token, to, amount)
    }

    fn burn(&self, token: &Identity, from: &Identity, amount: u128) -> Result<(), TokenError> {
        self.ledger.admin_burn(&self.grantee, token, from, amount)
    }
}
