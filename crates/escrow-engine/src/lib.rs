//! # HTLC Escrow Engine
//!
//! Hashlock/timelock escrows that let two parties swap value across two
//! ledgers without trusting each other.
//!
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Purpose
//!
//! One engine instance runs per ledger. The source escrow holds the maker's
//! funds, the destination escrow holds the resolver's funds, and revealing
//! the secret on one ledger lets the counterparty unlock the other.
//!
//! ## Safety Rules
//!
//! | Rule | Enforcement |
//! |------|-------------|
//! | Immutable parameters | Stored once per swap id, never overwritten |
//! | Terminal stages | Withdrawn, Cancelled and Rescued accept no further operation |
//! | Funded payouts | Withdraw needs full funding; cancel and rescue never exceed it |
//! | Window ordering | Packed offsets must strictly increase per ledger |
//! | Stable bridging | An identifier maps to at most one counterpart |
//!
//! ## Module Structure
//!
//! ```text
//! escrow-engine/
//! ├── domain/          # Immutables, records, events, errors, invariants
//! ├── algorithms/      # Timelock codec, hashlock, window evaluation
//! ├── ports/           # EscrowApi, ledger/store/bridge/custody ports
//! ├── adapters/        # In-memory adapters, custody strategies
//! └── service.rs       # EscrowEngine
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod algorithms;
pub mod domain;
pub mod ports;
pub mod service;

// Re-exports
pub use adapters::{
    InMemoryAddressBridge, InMemoryEscrowStore, InMemoryEventLog, InMemoryTokenLedger,
    IssuerGrant, MintCall, MintCustody, MockLedger, MockMintCapability, TransferCustody,
};
pub use algorithms::{
    cancellation_access, create_hash_lock, elapsed, encode_immutables, generate_random_secret,
    hash_immutables, pack, rescue_open, unpack, verify_secret, withdrawal_access, Access,
    TimelockFields, Timelocks,
};
pub use domain::{
    ChainSide, CustodyMode, DestinationAddress, DualAddress, EscrowConfig, EscrowError,
    EscrowEvent, EscrowRecord, Hash, HashScheme, Identity, Immutables, OriginAddress, Role,
    SecureSecret, Stage, SwapId, TimeLockError, TimelockStage, WindowEdges,
    DEFAULT_RESCUE_DELAY_SECS,
};
pub use ports::{
    AddressBridge, Custody, EscrowApi, EscrowStore, EventSink, LedgerEnv, MintCapability,
    TokenError, TokenLedger,
};
pub use service::{EngineDeps, EngineStats, EscrowEngine};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
