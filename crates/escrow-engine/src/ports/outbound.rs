//! # Outbound Ports
//!
//! Everything the engine needs from its host ledger.

use crate::domain::{
    CustodyMode, DestinationAddress, EscrowError, EscrowEvent, EscrowRecord, Identity,
    OriginAddress, Stage, SwapId,
};
use thiserror::Error;

/// Failures reported by token primitives.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TokenError {
    /// Recipient never registered for the asset.
    #[error("{holder} has no trustline for {token}")]
    MissingTrustline {
        /// Asset.
        token: Identity,
        /// Account lacking the trustline.
        holder: Identity,
    },

    /// Sender balance too low.
    #[error("{holder} holds {balance}, needs {requested}")]
    InsufficientBalance {
        /// Account being debited.
        holder: Identity,
        /// Current balance.
        balance: u128,
        /// Requested debit.
        requested: u128,
    },

    /// Mint/burn authority absent or revoked.
    #[error("Not authorized to administer {0}")]
    Unauthorized(Identity),

    /// Balance arithmetic overflow.
    #[error("Balance overflow")]
    Overflow,
}

impl From<TokenError> for EscrowError {
    fn from(e: TokenError) -> Self {
        EscrowError::NativeTokenSendingFailure(e.to_string())
    }
}

/// Ledger environment - outbound port.
pub trait LedgerEnv: Send + Sync {
    /// Current ledger timestamp in seconds.
    fn timestamp(&self) -> u64;

    /// Authenticated signer of the current call, if any.
    fn invoker(&self) -> Option<Identity>;

    /// The engine's own identity on this ledger.
    fn current_contract(&self) -> Identity;

    /// Fail with `InvalidCaller` unless `who` signed the current call.
    fn require_auth(&self, who: &Identity) -> Result<(), EscrowError> {
        match self.invoker() {
            Some(invoker) if invoker == *who => Ok(()),
            _ => Err(EscrowError::InvalidCaller),
        }
    }
}

/// Record store - outbound port.
///
/// Lookup misses are `InvalidImmutables`.
pub trait EscrowStore: Send + Sync {
    /// Insert unless a record already exists for `swap_id`.
    fn put_if_absent(&self, swap_id: SwapId, record: EscrowRecord) -> Result<(), EscrowError>;

    /// Fetch a copy of the record.
    fn get(&self, swap_id: &SwapId) -> Result<EscrowRecord, EscrowError>;

    /// Apply a stage transition. Illegal transitions fail with `InvalidTime`.
    fn set_stage(&self, swap_id: &SwapId, stage: Stage) -> Result<(), EscrowError>;

    /// Add to the funded total, returning the new total.
    fn add_funding(&self, swap_id: &SwapId, amount: u128) -> Result<u128, EscrowError>;

    /// Number of stored records.
    fn len(&self) -> usize;

    /// True when nothing is stored.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Address bridge - outbound port.
///
/// The mapping is one-to-one and append-only.
pub trait AddressBridge: Send + Sync {
    /// Map every pair or none. Identical pairs are no-ops.
    fn map_all(&self, pairs: &[(OriginAddress, DestinationAddress)]) -> Result<(), EscrowError>;

    /// Map one pair.
    fn map(&self, origin: OriginAddress, destination: DestinationAddress) -> Result<(), EscrowError> {
        self.map_all(&[(origin, destination)])
    }

    /// Destination identifier for an origin identifier.
    fn resolve_to_destination(&self, origin: &OriginAddress)
        -> Result<DestinationAddress, EscrowError>;

    /// Origin identifier for a destination identifier.
    fn resolve_to_origin(&self, destination: &DestinationAddress)
        -> Result<OriginAddress, EscrowError>;
}

/// Token transfer primitive - outbound port.
pub trait TokenLedger: Send + Sync {
    /// Move `amount` of `token` between holders.
    fn transfer(
        &self,
        token: &Identity,
        from: &Identity,
        to: &Identity,
        amount: u128,
    ) -> Result<(), TokenError>;

    /// Balance of a holder.
    fn balance(&self, token: &Identity, holder: &Identity) -> u128;
}

/// Issuer-granted supply authority - outbound port.
pub trait MintCapability: Send + Sync {
    /// Create `amount` of `token` in `to`'s balance.
    fn mint(&self, token: &Identity, to: &Identity, amount: u128) -> Result<(), TokenError>;

    /// Destroy `amount` of `token` from `from`'s balance.
    fn burn(&self, token: &Identity, from: &Identity, amount: u128) -> Result<(), TokenError>;
}

/// Custody strategy used by the engine to hold and release value.
///
/// Never touches record stages.
pub trait Custody: Send + Sync {
    /// Strategy in use.
    fn mode(&self) -> CustodyMode;

    /// Bring `amount` into engine custody on behalf of `from`.
    fn lock(&self, token: &Identity, from: &Identity, amount: u128) -> Result<(), EscrowError>;

    /// Pay `amount` out of engine custody to `to`.
    fn release(&self, token: &Identity, to: &Identity, amount: u128) -> Result<(), EscrowError>;
}

/// Event publication - outbound port.
pub trait EventSink: Send + Sync {
    /// Publish one event.
    fn publish(&self, event: EscrowEvent);
}
