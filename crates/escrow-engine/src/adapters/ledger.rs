//! Mock Ledger Environment
//!
//! Clock and signer of a single simulated ledger.

use crate::domain::Identity;
use crate::ports::outbound::LedgerEnv;
use parking_lot::RwLock;

/// In-memory ledger environment for testing.
pub struct MockLedger {
    contract: Identity,
    current_time: RwLock<u64>,
    invoker: RwLock<Option<Identity>>,
}

impl MockLedger {
    /// Ledger whose engine runs as `contract`.
    pub fn new(contract: Identity) -> Self {
        Self {
            contract,
            current_time: RwLock::new(1_700_000_000),
            invoker: RwLock::new(None),
        }
    }

    /// Set current time for testing.
    pub fn set_time(&self, time: u64) {
        *self.current_time.write() = time;
    }

    /// Advance time for testing.
    pub fn advance_time(&self, secs: u64) {
        *self.current_time.write() += secs;
    }

    /// Sign subsequent calls as `who` (`None` for unsigned calls).
    pub fn set_invoker(&self, who: Option<Identity>) {
        *self.invoker.write() = who;
    }
}

impl LedgerEnv for MockLedger {
    fn timestamp(&self) -> u64 {
        *self.current_time.read()
    }

    fn invoker(&self) -> Option<Identity> {
        *self.invoker.read()
    }

    fn current_contract(&self) -> Identity {
        self.contract
    }
}
