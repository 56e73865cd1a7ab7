//! # Domain Entities
//!
//! Swap parameters, stored records, events and deployment configuration.

use super::errors::{EscrowError, Hash};
use super::secure_secret::SecureSecret;
use super::value_objects::{
    ChainSide, CustodyMode, DualAddress, HashScheme, Identity, Role, Stage, SwapId, WindowEdges,
};
use crate::algorithms::timelock::Timelocks;
use serde::{Deserialize, Serialize};
use std::env;

/// Default rescue delay (1 day).
pub const DEFAULT_RESCUE_DELAY_SECS: u64 = 86_400;

/// Full parameter set of one swap. Never mutated after creation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Immutables {
    /// Cross-ledger correlation value; doubles as the swap id.
    pub order_hash: Hash,
    /// Commitment to the secret.
    pub hashlock: Hash,
    /// Maker identifiers on both ledgers.
    pub maker: DualAddress,
    /// Taker identifiers on both ledgers.
    pub taker: DualAddress,
    /// Token identifiers on both ledgers.
    pub token: DualAddress,
    /// Swap amount.
    pub amount: u128,
    /// Safety deposit paid out alongside the amount.
    pub safety_deposit: u128,
    /// Packed timelocks. `deployed_at` is stamped by `create`.
    pub timelocks: Timelocks,
}

impl Immutables {
    /// Lookup key of this swap.
    pub fn swap_id(&self) -> SwapId {
        SwapId(self.order_hash)
    }

    /// `amount + safety_deposit`, the value every full payout moves.
    pub fn total(&self) -> Result<u128, EscrowError> {
        self.amount
            .checked_add(self.safety_deposit)
            .ok_or(EscrowError::InvalidAmount {
                amount: self.safety_deposit,
                limit: u128::MAX - self.amount,
            })
    }

    /// Digest of the origin-side encoding.
    pub fn hash(&self, scheme: HashScheme) -> Hash {
        crate::algorithms::hashlock::hash_immutables(self, scheme)
    }
}

impl SwapId {
    /// Swap id equal to the immutables digest.
    pub fn derive(immutables: &Immutables, scheme: HashScheme) -> Self {
        Self(immutables.hash(scheme))
    }
}

/// One entry of the record store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EscrowRecord {
    /// Role on this ledger.
    pub role: Role,
    /// Swap parameters with `deployed_at` stamped.
    pub immutables: Immutables,
    /// Lifecycle stage.
    pub stage: Stage,
    /// Value locked into custody so far.
    pub funded: u128,
}

impl EscrowRecord {
    /// New record in the `Created` stage with nothing funded.
    pub fn new(role: Role, immutables: Immutables) -> Self {
        Self {
            role,
            immutables,
            stage: Stage::Created,
            funded: 0,
        }
    }

    /// Move to a terminal stage.
    pub fn transition_to(&mut self, next: Stage) -> Result<(), EscrowError> {
        if !self.stage.can_transition_to(next) {
            return Err(EscrowError::InvalidTime);
        }
        self.stage = next;
        Ok(())
    }

    /// Record additional funding, bounded by the full payout.
    pub fn add_funding(&mut self, amount: u128) -> Result<u128, EscrowError> {
        let limit = self.immutables.total()?;
        let headroom = limit.saturating_sub(self.funded);
        if amount == 0 || amount > headroom {
            return Err(EscrowError::InvalidAmount {
                amount,
                limit: headroom,
            });
        }
        self.funded += amount;
        Ok(self.funded)
    }
}

/// Events published on every successful state change.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EscrowEvent {
    /// Record stored.
    EscrowCreated {
        /// Swap id.
        swap_id: SwapId,
        /// Role on this ledger.
        role: Role,
        /// Hashlock the secret must match.
        hashlock: Hash,
        /// Stamped deployment time.
        deployed_at: u64,
    },
    /// Value locked into custody.
    EscrowFunded {
        /// Swap id.
        swap_id: SwapId,
        /// Funding identity.
        from: Identity,
        /// Amount locked by this call.
        amount: u128,
        /// Cumulative funding.
        total_funded: u128,
    },
    /// Secret revealed and payout released.
    Withdrawal {
        /// Swap id.
        swap_id: SwapId,
        /// Revealed preimage.
        secret: SecureSecret,
        /// Payout recipient.
        recipient: Identity,
        /// Amount paid.
        amount: u128,
    },
    /// Timed out and refunded.
    EscrowCancelled {
        /// Swap id.
        swap_id: SwapId,
        /// Refund recipient.
        recipient: Identity,
        /// Amount refunded.
        amount: u128,
    },
    /// Emergency recovery.
    FundsRescued {
        /// Swap id.
        swap_id: SwapId,
        /// Rescue recipient.
        recipient: Identity,
        /// Amount rescued.
        amount: u128,
    },
}

impl EscrowEvent {
    /// Swap the event concerns.
    pub fn swap_id(&self) -> SwapId {
        match self {
            Self::EscrowCreated { swap_id, .. }
            | Self::EscrowFunded { swap_id, .. }
            | Self::Withdrawal { swap_id, .. }
            | Self::EscrowCancelled { swap_id, .. }
            | Self::FundsRescued { swap_id, .. } => *swap_id,
        }
    }

    /// Event topic name.
    pub fn topic(&self) -> &'static str {
        match self {
            Self::EscrowCreated { .. } => "created",
            Self::EscrowFunded { .. } => "funded",
            Self::Withdrawal { .. } => "withdraw",
            Self::EscrowCancelled { .. } => "cancelled",
            Self::FundsRescued { .. } => "funds_save",
        }
    }
}

/// Deployment configuration, fixed at construction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EscrowConfig {
    /// Seconds after `deployed_at` before `rescue_funds` opens.
    pub rescue_delay_secs: u64,
    /// Comparison used at window edges.
    pub window_edges: WindowEdges,
    /// Hash behind hashlocks.
    pub hash_scheme: HashScheme,
    /// Ledger this deployment runs on.
    pub chain_side: ChainSide,
    /// Custody strategy.
    pub custody_mode: CustodyMode,
}

impl Default for EscrowConfig {
    fn default() -> Self {
        Self {
            rescue_delay_secs: DEFAULT_RESCUE_DELAY_SECS,
            window_edges: WindowEdges::StartInclusive,
            hash_scheme: HashScheme::Keccak256,
            chain_side: ChainSide::Destination,
            custody_mode: CustodyMode::AdminMint,
        }
    }
}

impl EscrowConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `ESCROW_RESCUE_DELAY`: rescue delay in seconds (default: 86400)
    /// - `ESCROW_WINDOW_EDGES`: `start_inclusive` or `start_exclusive`
    /// - `ESCROW_HASH_SCHEME`: `keccak256` or `sha256`
    /// - `ESCROW_CHAIN_SIDE`: `origin` or `destination`
    /// - `ESCROW_CUSTODY_MODE`: `transfer` or `admin_mint`
    ///
    /// Unparsable values fall back to the default.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            rescue_delay_secs: env_or("ESCROW_RESCUE_DELAY", defaults.rescue_delay_secs),
            window_edges: env_or("ESCROW_WINDOW_EDGES", defaults.window_edges),
            hash_scheme: env_or("ESCROW_HASH_SCHEME", defaults.hash_scheme),
            chain_side: env_or("ESCROW_CHAIN_SIDE", defaults.chain_side),
            custody_mode: env_or("ESCROW_CUSTODY_MODE", defaults.custody_mode),
        }
    }

    /// Origin-ledger deployment: plain transfers.
    pub fn origin() -> Self {
        Self {
            chain_side: ChainSide::Origin,
            custody_mode: CustodyMode::Transfer,
            ..Self::default()
        }
    }

    /// Destination-ledger deployment: administrative mint custody.
    pub fn destination() -> Self {
        Self::default()
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, "[escrow] Ignoring unparsable config value");
            default
        }),
        Err(_) => default,
    }
}
