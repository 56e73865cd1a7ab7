//! # Hashlock and Immutables Hashing
//!
//! Secret commitments and the 1inch-compatible immutables digest.

use crate::domain::{Hash, HashScheme, Immutables, SecureSecret};
use rand::RngCore;
use sha2::{Digest, Sha256};
use sha3::Keccak256;

/// Generate a cryptographically secure random secret.
pub fn generate_random_secret() -> SecureSecret {
    let mut secret = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut secret);
    SecureSecret::new(secret)
}

/// Hash arbitrary bytes with the chosen scheme.
pub fn digest(scheme: HashScheme, data: &[u8]) -> Hash {
    let mut hash = [0u8; 32];
    match scheme {
        HashScheme::Keccak256 => {
            let mut hasher = Keccak256::new();
            hasher.update(data);
            hash.copy_from_slice(&hasher.finalize());
        }
        HashScheme::Sha256 => {
            let mut hasher = Sha256::new();
            hasher.update(data);
            hash.copy_from_slice(&hasher.finalize());
        }
    }
    hash
}

/// Create a hashlock from a secret.
pub fn create_hash_lock(scheme: HashScheme, secret: &SecureSecret) -> Hash {
    digest(scheme, secret.as_bytes())
}

/// Verify that a secret matches a hashlock.
pub fn verify_secret(scheme: HashScheme, secret: &SecureSecret, hash_lock: &Hash) -> bool {
    create_hash_lock(scheme, secret) == *hash_lock
}

/// ABI-style encoding of the immutables, 256 bytes.
///
/// Only origin identifiers are encoded; the origin contracts cannot see
/// destination ids.
pub fn encode_immutables(immutables: &Immutables) -> [u8; 256] {
    let mut out = [0u8; 256];
    out[0..32].copy_from_slice(&immutables.order_hash);
    out[32..64].copy_from_slice(&immutables.hashlock);
    out[76..96].copy_from_slice(&immutables.maker.origin.0);
    out[108..128].copy_from_slice(&immutables.taker.origin.0);
    out[140..160].copy_from_slice(&immutables.token.origin.0);
    out[176..192].copy_from_slice(&immutables.amount.to_be_bytes());
    out[208..224].copy_from_slice(&immutables.safety_deposit.to_be_bytes());
    out[224..256].copy_from_slice(&immutables.timelocks.to_be_bytes());
    out
}

/// Digest of the encoded immutables.
pub fn hash_immutables(immutables: &Immutables, scheme: HashScheme) -> Hash {
    digest(scheme, &encode_immutables(immutables))
}
