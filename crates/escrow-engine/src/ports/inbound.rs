//! # Inbound Ports
//!
//! Operations one ledger deployment exposes to resolvers and users.

use crate::domain::{
    DestinationAddress, EscrowError, Identity, Immutables, OriginAddress, Role, SecureSecret,
    Stage, SwapId,
};
use std::time::Duration;

/// Escrow API - inbound port.
///
/// Every state-changing call either fully applies or returns an error with
/// no observable effect.
pub trait EscrowApi: Send + Sync {
    /// Register a swap where this ledger locks the original asset.
    fn create_src_escrow(&self, immutables: Immutables) -> Result<SwapId, EscrowError>;

    /// Register a swap where this ledger releases the counter-asset.
    fn create_dst_escrow(&self, immutables: Immutables) -> Result<SwapId, EscrowError>;

    /// Move `amount` from `from` into engine custody. `from` must sign.
    fn fund_escrow(&self, swap_id: &SwapId, from: Identity, amount: u128)
        -> Result<(), EscrowError>;

    /// Reveal the secret and pay `amount + safety_deposit` to the taker.
    fn withdraw(&self, swap_id: &SwapId, secret: SecureSecret) -> Result<(), EscrowError>;

    /// Refund `amount + safety_deposit` to the maker after timeout.
    fn cancel(&self, swap_id: &SwapId) -> Result<(), EscrowError>;

    /// Emergency recovery by the taker after the rescue delay.
    fn rescue_funds(&self, swap_id: &SwapId, amount: u128) -> Result<(), EscrowError>;

    /// Role and immutables of a swap.
    fn get_escrow_state(&self, swap_id: &SwapId) -> Result<(Role, Immutables), EscrowError>;

    /// Current lifecycle stage.
    fn get_escrow_stage(&self, swap_id: &SwapId) -> Result<Stage, EscrowError>;

    /// Value currently locked for a swap.
    fn get_escrow_funded(&self, swap_id: &SwapId) -> Result<u128, EscrowError>;

    /// Deployment administrator.
    fn get_admin(&self) -> Identity;

    /// Deployment-wide rescue delay.
    fn get_rescue_delay(&self) -> Duration;

    /// Identity that holds escrowed value (the engine itself).
    fn get_custodian(&self) -> Identity;

    /// Administrative bridge pre-registration. Admin only.
    fn map_address(
        &self,
        origin: OriginAddress,
        destination: DestinationAddress,
    ) -> Result<(), EscrowError>;
}
