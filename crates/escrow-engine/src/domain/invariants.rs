//! # Domain Invariants
//!
//! Business rules checked by the lifecycle engine before any state change.

use super::entities::{EscrowRecord, Immutables};
use super::errors::EscrowError;
use super::value_objects::Stage;

/// Invariant: positive amount and deposit, non-overflowing payout.
pub fn invariant_amounts_valid(immutables: &Immutables) -> Result<u128, EscrowError> {
    if immutables.amount == 0 {
        return Err(EscrowError::InvalidAmount {
            amount: 0,
            limit: u128::MAX,
        });
    }
    if immutables.safety_deposit == 0 {
        return Err(EscrowError::InvalidImmutables);
    }
    immutables.total()
}

/// Invariant: the record still accepts lifecycle operations.
///
/// Terminal records look exactly like missing ones to callers.
pub fn invariant_active(record: &EscrowRecord) -> Result<(), EscrowError> {
    if record.stage != Stage::Created {
        return Err(EscrowError::InvalidImmutables);
    }
    Ok(())
}

/// Invariant: custody holds the full payout.
pub fn invariant_fully_funded(record: &EscrowRecord) -> Result<u128, EscrowError> {
    let required = record.immutables.total()?;
    if record.funded < required {
        return Err(EscrowError::InsufficientFunding {
            funded: record.funded,
            required,
        });
    }
    Ok(required)
}

/// Invariant: a rescue empties custody for the swap.
///
/// Rescue is terminal, so anything less would strand the remainder.
pub fn invariant_rescue_amount(record: &EscrowRecord, amount: u128) -> Result<(), EscrowError> {
    if amount == 0 || amount != record.funded {
        return Err(EscrowError::InvalidAmount {
            amount,
            limit: record.funded,
        });
    }
    Ok(())
}
