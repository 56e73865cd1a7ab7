//! Escrow Record Store Adapter
//!
//! `SwapId -> EscrowRecord`, one map per ledger deployment.

use crate::domain::{EscrowError, EscrowRecord, Stage, SwapId};
use crate::ports::outbound::EscrowStore;
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::debug;

/// In-memory record store.
#[derive(Default)]
pub struct InMemoryEscrowStore {
    records: RwLock<HashMap<SwapId, EscrowRecord>>,
}

impl InMemoryEscrowStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every record, for inspection.
    pub fn snapshot(&self) -> Vec<(SwapId, EscrowRecord)> {
        self.records
            .read()
            .iter()
            .map(|(id, record)| (*id, record.clone()))
            .collect()
    }
}

impl EscrowStore for InMemoryEscrowStore {
    fn put_if_absent(&self, swap_id: SwapId, record: EscrowRecord) -> Result<(), EscrowError> {
        let mut records = self.records.write();
        if records.contains_key(&swap_id) {
            return Err(EscrowError::InvalidImmutables);
        }
        debug!(swap_id = %swap_id.short(), "[escrow] Record stored");
        records.insert(swap_id, record);
        Ok(())
    }

    fn get(&self, swap_id: &SwapId) -> Result<EscrowRecord, EscrowError> {
        self.records
            .read()
            .get(swap_id)
            .cloned()
            .ok_or(EscrowError::InvalidImmutables)
    }

    fn set_stage(&self, swap_id: &SwapId, stage: Stage) -> Result<(), EscrowError> {
        let mut records = self.records.write();
        let record = records
            .get_mut(swap_id)
            .ok_or(EscrowError::InvalidImmutables)?;
        record.transition_to(stage)
    }

    fn add_funding(&self, swap_id: &SwapId, amount: u128) -> Result<u128, EscrowError> {
        let mut records = self.records.write();
        let record = records
            .get_mut(swap_id)
            .ok_or(EscrowError::InvalidImmutables)?;
        record.add_funding(amount)
    }

    fn len(&self) -> usize {
        self.records.read().len()
    }
}
