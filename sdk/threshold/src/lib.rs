//! Shamir Threshold Secret Sharing
//!
//! Splits a secret into N shares so that any K of them reconstruct it and
//! fewer than K reveal nothing about it. Honest dealer only: shares carry no
//! commitments and are not verifiable.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        Split / Combine                          │
//! │                                                                 │
//! │  secret ──decompose──▶ units ──one polynomial per unit──┐       │
//! │                                                         ▼       │
//! │  shares ◀──────── evaluate at x = 1..N (Horner) ◀─── f_i(x)     │
//! │                                                                 │
//! │  K shares ──per unit: Lagrange at x = 0──▶ units ──recompose──▶ │
//! │                                                        secret   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The byte field [`Gf256Field`] is the default backend; [`PrimeField`]
//! shares a secret of up to 64 bytes as a single integer.
//!
//! [`split`] and [`combine`] run with built-in defaults; loaded
//! configuration only applies through [`SecretSharer::from_config`].

pub mod errors;
pub mod polynomial;
pub mod shares;
pub mod sharer;

use rand::RngCore;

pub use errors::{ErrorKind, ShamirError, ShareFormatError};
pub use polynomial::{Polynomial, interpolate_at_zero};
pub use shamir_field::{ElementCodec, Field, FieldError, Fp, Gf256, Gf256Field, PrimeField};
pub use shares::{Share, ShareId};
pub use sharer::{MAX_SHARES, MIN_THRESHOLD, SecretSharer};

/// Split a secret into N shares over GF(256), requiring K to reconstruct
///
/// # Arguments
/// * `secret` - The non-empty secret to split
/// * `n` - total number of shares to generate (at most 255)
/// * `k` - minimum shares needed to reconstruct (at least 2)
///
/// # Returns
/// Vector of N shares with ids 1..=N
pub fn split(secret: &[u8], n: usize, k: usize) -> Result<Vec<Share>, ShamirError> {
    SecretSharer::new(Gf256Field::new()).split(secret, n, k)
}

/// Combine shares produced by [`split`] back into the secret
///
/// # Arguments
/// * `shares` - At least K shares from the same split, in any order
pub fn combine(shares: &[Share]) -> Result<Vec<u8>, ShamirError> {
    SecretSharer::new(Gf256Field::new()).combine(shares)
}

/// Generate a random secret of `len` bytes
pub fn random_secret(len: usize) -> Vec<u8> {
    let mut secret = vec![0u8; len];
    rand::thread_rng().fill_bytes(&mut secret);
    secret
}
