//! # Adapters Layer (Hexagonal Architecture)
//!
//! In-memory implementations of every outbound port, plus the two custody
//! strategies.

mod address_bridge;
mod custody;
mod event_log;
mod ledger;
mod mint_capability;
mod record_store;
mod token_ledger;

pub use address_bridge::InMemoryAddressBridge;
pub use custody::{MintCustody, TransferCustody};
pub use event_log::InMemoryEventLog;
pub use ledger::MockLedger;
pub use mint_capability::{MintCall, MockMintCapability};
pub use record_store::InMemoryEscrowStore;
pub use token_ledger::{InMemoryTokenLedger, IssuerGrant};
