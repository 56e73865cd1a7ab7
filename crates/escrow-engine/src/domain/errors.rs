//! # Domain Errors
//!
//! Error taxonomy for the escrow engine. Every variant is a caller-side
//! precondition failure; the engine never retries internally.

use thiserror::Error;

/// Hash type (32-byte keccak256 / SHA-256 digest).
pub type Hash = [u8; 32];

/// Timelock packing, ordering and overflow failures.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum TimeLockError {
    /// `deployed_at + rescue_delay` does not fit the absolute timestamp width.
    #[error("Rescue start overflows the timestamp width")]
    RescueStartOverflow,

    /// An offset or absolute stage time does not fit in 32 bits.
    #[error("Timelock value overflows 32 bits")]
    TimelockValueOverflow,

    /// `deployed_at` has not been stamped.
    #[error("Deployment timestamp not set")]
    DeploymentTimestampNotSet,

    /// Source offsets are not strictly increasing.
    #[error("Invalid source chain timelock ordering")]
    InvalidSourceChainTimelockOrdering,

    /// Destination offsets are not strictly increasing.
    #[error("Invalid destination chain timelock ordering")]
    InvalidDestinationChainTimelockOrdering,
}

/// Escrow engine error types.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EscrowError {
    /// Wrong signer for the attempted role or window.
    #[error("Invalid caller")]
    InvalidCaller,

    /// Duplicate swap id, malformed parameters, lookup miss or terminal stage.
    #[error("Invalid immutables")]
    InvalidImmutables,

    /// Secret does not hash to the stored hashlock.
    #[error("Invalid secret")]
    InvalidSecret,

    /// Operation attempted outside its legal time window.
    #[error("Invalid time")]
    InvalidTime,

    /// Underlying value-transfer primitive rejected the call.
    #[error("Token transfer failed: {0}")]
    NativeTokenSendingFailure(String),

    /// No bridge entry for the given identifier.
    #[error("Address mapping missing for {0}")]
    AddressMappingMissing(String),

    /// Identifier is already bridged to a different counterpart.
    #[error("Address mapping conflict: {identifier} already mapped to {existing}")]
    AddressMappingConflict {
        /// Identifier being mapped.
        identifier: String,
        /// Counterpart it is already bound to.
        existing: String,
    },

    /// Amount is zero, overflows, or exceeds what the escrow can hold.
    #[error("Invalid amount: {amount} (limit {limit})")]
    InvalidAmount {
        /// Requested amount.
        amount: u128,
        /// Largest acceptable amount.
        limit: u128,
    },

    /// Payout attempted before custody holds it.
    #[error("Insufficient funding: {funded}/{required}")]
    InsufficientFunding {
        /// Value currently locked for the swap.
        funded: u128,
        /// Value the payout needs.
        required: u128,
    },

    /// Timelock codec failure.
    #[error("Timelock error: {0}")]
    TimeLock(#[from] TimeLockError),
}

impl EscrowError {
    /// Stable numeric error code, matching the contract error codes.
    pub fn code(&self) -> u32 {
        match self {
            Self::InvalidCaller => 1,
            Self::InvalidImmutables => 2,
            Self::InvalidSecret => 3,
            Self::InvalidTime => 4,
            Self::NativeTokenSendingFailure(_) => 5,
            Self::AddressMappingMissing(_) => 6,
            Self::TimeLock(_) => 7,
            Self::AddressMappingConflict { .. } => 8,
            Self::InvalidAmount { .. } => 9,
            Self::InsufficientFunding { .. } => 10,
        }
    }

    /// Short label used for metrics and structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidCaller => "invalid_caller",
            Self::InvalidImmutables => "invalid_immutables",
            Self::InvalidSecret => "invalid_secret",
            Self::InvalidTime => "invalid_time",
            Self::NativeTokenSendingFailure(_) => "token_sending_failure",
            Self::AddressMappingMissing(_) => "address_mapping_missing",
            Self::AddressMappingConflict { .. } => "address_mapping_conflict",
            Self::InvalidAmount { .. } => "invalid_amount",
            Self::InsufficientFunding { .. } => "insufficient_funding",
            Self::TimeLock(_) => "timelock",
        }
    }
}
