//! Custody Adapters
//!
//! Two ways of holding escrowed value:
//!
//! - [`TransferCustody`]: ordinary transfers into and out of the engine's
//!   own balance. Fails wherever the engine cannot receive the asset.
//! - [`MintCustody`]: issuer-granted supply authority. Locking mints to the
//!   engine; releasing mints to the recipient and then retires the engine's
//!   copy, so no trustline is ever needed on the engine side. The mint is
//!   the only step that can abort a release.

use crate::domain::{CustodyMode, EscrowError, Identity};
use crate::ports::outbound::{Custody, MintCapability, TokenLedger};
use std::sync::Arc;
use tracing::{debug, warn};

/// Custody through plain token transfers.
pub struct TransferCustody {
    ledger: Arc<dyn TokenLedger>,
    custodian: Identity,
}

impl TransferCustody {
    /// Hold value as `custodian` on `ledger`.
    pub fn new(ledger: Arc<dyn TokenLedger>, custodian: Identity) -> Self {
        Self { ledger, custodian }
    }
}

impl Custody for TransferCustody {
    fn mode(&self) -> CustodyMode {
        CustodyMode::Transfer
    }

    fn lock(&self, token: &Identity, from: &Identity, amount: u128) -> Result<(), EscrowError> {
        self.ledger.transfer(token, from, &self.custodian, amount)?;
        debug!(%from, amount = %amount, "[escrow] Transferred into custody");
        Ok(())
    }

    fn release(&self, token: &Identity, to: &Identity, amount: u128) -> Result<(), EscrowError> {
        self.ledger.transfer(token, &self.custodian, to, amount)?;
        debug!(%to, amount = %amount, "[escrow] Transferred out of custody");
        Ok(())
    }
}

/// Custody through an administrative mint/burn capability.
pub struct MintCustody {
    capability: Arc<dyn MintCapability>,
    custodian: Identity,
}

impl MintCustody {
    /// Hold value as `custodian` using `capability`.
    pub fn new(capability: Arc<dyn MintCapability>, custodian: Identity) -> Self {
        Self {
            capability,
            custodian,
        }
    }
}

impl Custody for MintCustody {
    fn mode(&self) -> CustodyMode {
        CustodyMode::AdminMint
    }

    fn lock(&self, token: &Identity, from: &Identity, amount: u128) -> Result<(), EscrowError> {
        self.capability.mint(token, &self.custodian, amount)?;
        debug!(%from, amount = %amount, "[escrow] Minted into custody");
        Ok(())
    }

    fn release(&self, token: &Identity, to: &Identity, amount: u128) -> Result<(), EscrowError> {
        self.capability.mint(token, to, amount)?;
        // Recipient is paid; a leftover custody balance is surplus supply.
        if let Err(e) = self.capability.burn(token, &self.custodian, amount) {
            warn!(%to, amount = %amount, error = %e, "[escrow] Custody burn failed after release");
        }
        debug!(%to, amount = %amount, "[escrow] Released from custody by mint");
        Ok(())
    }
}
