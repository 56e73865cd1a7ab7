//! # Domain Value Objects
//!
//! Identifiers, enums and small immutable types shared by every module.

use super::errors::Hash;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Swap identifier: the sole lookup key of the record store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SwapId(pub Hash);

impl SwapId {
    /// Raw bytes.
    pub fn as_bytes(&self) -> &Hash {
        &self.0
    }

    /// Short hex prefix for log lines.
    pub fn short(&self) -> String {
        hex::encode(&self.0[..4])
    }
}

impl From<Hash> for SwapId {
    fn from(bytes: Hash) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for SwapId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

/// Origin-chain account identifier (20-byte EVM-style address).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OriginAddress(pub [u8; 20]);

impl fmt::Display for OriginAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

/// Destination-chain account identifier (32-byte account or contract id).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DestinationAddress(pub [u8; 32]);

impl fmt::Display for DestinationAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

/// A ledger-local identity: who signs calls, who holds balances.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Identity {
    /// Account on the origin ledger.
    Origin(OriginAddress),
    /// Account on the destination ledger.
    Destination(DestinationAddress),
}

impl Identity {
    /// Which ledger this identity lives on.
    pub fn side(&self) -> ChainSide {
        match self {
            Self::Origin(_) => ChainSide::Origin,
            Self::Destination(_) => ChainSide::Destination,
        }
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Origin(addr) => write!(f, "origin:{}", addr),
            Self::Destination(addr) => write!(f, "destination:{}", addr),
        }
    }
}

/// One logical participant (or token) across both ledgers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DualAddress {
    /// Identifier on the origin ledger.
    pub origin: OriginAddress,
    /// Identifier on the destination ledger.
    pub destination: DestinationAddress,
}

impl DualAddress {
    /// Create a new dual address.
    pub fn new(origin: [u8; 20], destination: [u8; 32]) -> Self {
        Self {
            origin: OriginAddress(origin),
            destination: DestinationAddress(destination),
        }
    }
}

/// Which ledger a deployment runs on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChainSide {
    /// The origin (EVM-style) ledger.
    Origin,
    /// The destination ledger.
    #[default]
    Destination,
}

impl FromStr for ChainSide {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "origin" => Ok(Self::Origin),
            "destination" => Ok(Self::Destination),
            other => Err(format!("unknown chain side: {}", other)),
        }
    }
}

/// Role of an escrow on this ledger. Fixed at creation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// The original asset is locked here.
    Source,
    /// The counter-asset is released here.
    Destination,
}

impl Role {
    /// Metrics label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Source => "source",
            Self::Destination => "destination",
        }
    }
}

/// Escrow lifecycle stage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    /// Registered, awaiting completion.
    #[default]
    Created,
    /// Secret revealed, funds released to the taker.
    Withdrawn,
    /// Timed out, funds returned to the maker.
    Cancelled,
    /// Emergency recovery after the rescue delay.
    Rescued,
}

impl Stage {
    /// Check if transition is valid.
    pub fn can_transition_to(&self, next: Stage) -> bool {
        matches!(
            (self, next),
            (Self::Created, Self::Withdrawn)
                | (Self::Created, Self::Cancelled)
                | (Self::Created, Self::Rescued)
        )
    }

    /// Check if terminal state.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Created)
    }

    /// Metrics label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Withdrawn => "withdrawn",
            Self::Cancelled => "cancelled",
            Self::Rescued => "rescued",
        }
    }
}

/// Timelock sub-field selector, in packing order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimelockStage {
    /// Private withdrawal on the source ledger (taker only).
    SrcWithdrawal = 0,
    /// Public withdrawal on the source ledger.
    SrcPublicWithdrawal = 1,
    /// Private cancellation on the source ledger (maker only).
    SrcCancellation = 2,
    /// Public cancellation on the source ledger.
    SrcPublicCancellation = 3,
    /// Private withdrawal on the destination ledger.
    DstWithdrawal = 4,
    /// Public withdrawal on the destination ledger.
    DstPublicWithdrawal = 5,
    /// Cancellation on the destination ledger.
    DstCancellation = 6,
}

impl TimelockStage {
    /// All stages in packing order.
    pub const ALL: [TimelockStage; 7] = [
        Self::SrcWithdrawal,
        Self::SrcPublicWithdrawal,
        Self::SrcCancellation,
        Self::SrcPublicCancellation,
        Self::DstWithdrawal,
        Self::DstPublicWithdrawal,
        Self::DstCancellation,
    ];

    /// Bit offset of this stage inside the packed value.
    pub fn bit_offset(&self) -> u32 {
        (*self as u32) * 32
    }
}

/// How window edges compare against ledger time.
///
/// `StartInclusive` opens a stage at its offset (`now >= start`) and so
/// windows read `[start, end)`. `StartExclusive` opens one second later
/// (`now > start`), giving `(start, end]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WindowEdges {
    /// `[start, end)`
    #[default]
    StartInclusive,
    /// `(start, end]`
    StartExclusive,
}

impl WindowEdges {
    /// Has the boundary at `at` been reached by `now`?
    pub fn reached(&self, now: u64, at: u64) -> bool {
        match self {
            Self::StartInclusive => now >= at,
            Self::StartExclusive => now > at,
        }
    }
}

impl FromStr for WindowEdges {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "start_inclusive" | "inclusive" => Ok(Self::StartInclusive),
            "start_exclusive" | "exclusive" => Ok(Self::StartExclusive),
            other => Err(format!("unknown window edges: {}", other)),
        }
    }
}

/// Hash function behind hashlocks and immutables hashing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HashScheme {
    /// keccak256, as used by the origin-chain contracts.
    #[default]
    Keccak256,
    /// SHA-256.
    Sha256,
}

impl FromStr for HashScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "keccak256" | "keccak" => Ok(Self::Keccak256),
            "sha256" => Ok(Self::Sha256),
            other => Err(format!("unknown hash scheme: {}", other)),
        }
    }
}

/// How value enters and leaves engine custody.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CustodyMode {
    /// Ordinary balance transfers.
    Transfer,
    /// Issuer-granted mint/burn authority.
    #[default]
    AdminMint,
}

impl FromStr for CustodyMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "transfer" => Ok(Self::Transfer),
            "admin_mint" | "mint" => Ok(Self::AdminMint),
            other => Err(format!("unknown custody mode: {}", other)),
        }
    }
}
