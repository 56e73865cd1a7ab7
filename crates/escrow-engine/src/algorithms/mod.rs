//! # Algorithms Module
//!
//! Timelock codec, hashlock helpers and window evaluation.

pub mod hashlock;
pub mod timelock;
pub mod windows;

pub use hashlock::{
    create_hash_lock, digest, encode_immutables, generate_random_secret, hash_immutables,
    verify_secret,
};
pub use timelock::{elapsed, pack, unpack, TimelockFields, Timelocks};
pub use windows::{cancellation_access, rescue_open, withdrawal_access, Access};
