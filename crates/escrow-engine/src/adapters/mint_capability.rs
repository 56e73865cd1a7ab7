//! Mock Mint Capability
//!
//! Records every mint and burn so tests can assert exact custody traffic.

use crate::domain::Identity;
use crate::ports::outbound::{MintCapability, TokenError};
use parking_lot::RwLock;
use std::collections::HashMap;

/// One recorded supply operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MintCall {
    /// `mint(token, to, amount)`
    Mint {
        /// Asset.
        token: Identity,
        /// Credited holder.
        to: Identity,
        /// Amount.
        amount: u128,
    },
    /// `burn(token, from, amount)`
    Burn {
        /// Asset.
        token: Identity,
        /// Debited holder.
        from: Identity,
        /// Amount.
        amount: u128,
    },
}

#[derive(Default)]
struct MockState {
    calls: Vec<MintCall>,
    minted: HashMap<Identity, u128>,
    burned: HashMap<Identity, u128>,
    balances: HashMap<(Identity, Identity), u128>,
    revoked: bool,
    failing_mints: usize,
    failing_burns: usize,
}

/// Mock capability with minted/burned totals per token.
#[derive(Default)]
pub struct MockMintCapability {
    state: RwLock<MockState>,
}

impl MockMintCapability {
    /// Fresh capability with authority granted.
    pub fn new() -> Self {
        Self::default()
    }

    /// Withdraw the authority; every later call fails.
    pub fn revoke(&self) {
        self.state.write().revoked = true;
    }

    /// Reject the next `n` mint calls.
    pub fn fail_next_mints(&self, n: usize) {
        self.state.write().failing_mints = n;
    }

    /// Reject the next `n` burn calls.
    pub fn fail_next_burns(&self, n: usize) {
        self.state.write().failing_burns = n;
    }

    /// All successful calls, oldest first.
    pub fn calls(&self) -> Vec<MintCall> {
        self.state.read().calls.clone()
    }

    /// Total minted for a token.
    pub fn minted(&self, token: &Identity) -> u128 {
        self.state.read().minted.get(token).copied().unwrap_or(0)
    }

    /// Total burned for a token.
    pub fn burned(&self, token: &Identity) -> u128 {
        self.state.read().burned.get(token).copied().unwrap_or(0)
    }

    /// Supply currently outstanding for a token.
    pub fn outstanding(&self, token: &Identity) -> u128 {
        self.minted(token).saturating_sub(self.burned(token))
    }

    /// Balance produced by this capability's mints and burns.
    pub fn balance(&self, token: &Identity, holder: &Identity) -> u128 {
        self.state
            .read()
            .balances
            .get(&(*token, *holder))
            .copied()
            .unwrap_or(0)
    }
}

impl MintCapability for MockMintCapability {
    fn mint(&self, token: &Identity, to: &Identity, amount: u128) -> Result<(), TokenError> {
        let mut state = self.state.write();
        if state.revoked {
            return Err(TokenError::Unauthorized(*token));
        }
        if state.failing_mints > 0 {
            state.failing_mints -= 1;
            return Err(TokenError::Unauthorized(*token));
        }
        let balance = state
            .balances
            .get(&(*token, *to))
            .copied()
            .unwrap_or(0)
            .checked_add(amount)
            .ok_or(TokenError::Overflow)?;
        let minted = state
            .minted
            .get(token)
            .copied()
            .unwrap_or(0)
            .checked_add(amount)
            .ok_or(TokenError::Overflow)?;
        state.balances.insert((*token, *to), balance);
        state.minted.insert(*token, minted);
        state.calls.push(MintCall::Mint {
            token: *token,
            to: *to,
            amount,
        });
        Ok(())
    }

    fn burn(&self, token: &Identity, from: &Identity, amount: u128) -> Result<(), TokenError> {
        let mut state = self.state.write();
        if state.revoked {
            return Err(TokenError::Unauthorized(*token));
        }
        if state.failing_burns > 0 {
            state.failing_burns -= 1;
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
        *state.burned.entry(*token).or_insert(0) += amount;
        state.calls.push(MintCall::Burn {
            token: *token,
            from: *from,
            amount,
        });
        Ok(())
    }
}
