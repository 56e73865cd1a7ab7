//! # Secure Secret Type
//!
//! Hashlock preimage that zeroizes on drop. Revealed exactly once, by
//! `withdraw`, after which it is published in the withdrawal event so the
//! counterparty can unlock the other ledger.

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// 32-byte hashlock preimage.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SecureSecret {
    inner: [u8; 32],
}

impl SecureSecret {
    /// Wrap raw bytes.
    pub fn new(bytes: [u8; 32]) -> Self {
        Self { inner: bytes }
    }

    /// Copy from a slice. `None` unless exactly 32 bytes.
    pub fn from_slice(slice: &[u8]) -> Option<Self> {
        let inner: [u8; 32] = slice.try_into().ok()?;
        Some(Self { inner })
    }

    /// Parse a hex string, with or without `0x`.
    pub fn from_hex(s: &str) -> Option<Self> {
        let bytes = hex::decode(s.trim_start_matches("0x")).ok()?;
        Self::from_slice(&bytes)
    }

    /// Borrow the bytes. Do not hold on to the reference.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.inner
    }

    /// Copy the bytes out.
    pub fn expose(&self) -> [u8; 32] {
        self.inner
    }
}

impl std::fmt::Debug for SecureSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SecureSecret(***)")
    }
}

impl Serialize for SecureSecret {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&hex::encode(self.inner))
    }
}

impl<'de> Deserialize<'de> for SecureSecret {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).ok_or_else(|| serde::de::Error::custom("invalid secret"))
    }
}
