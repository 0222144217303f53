//! Finite Field Arithmetic
//!
//! Field backends for threshold secret sharing.
//!
//! # Backends
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │                          Field trait                          │
//! │        add / sub / mul / div / inv / random / embed ids       │
//! │                                                               │
//! │   ┌──────────────────────┐        ┌────────────────────────┐  │
//! │   │      Gf256Field      │        │       PrimeField       │  │
//! │   │  one unit per byte   │        │  whole secret as one   │  │
//! │   │  exp/log tables      │        │  integer mod 2^521 - 1 │  │
//! │   │  no length ceiling   │        │  at most 64 bytes      │  │
//! │   └──────────────────────┘        └────────────────────────┘  │
//! └───────────────────────────────────────────────────────────────┘
//! ```

pub mod errors;
pub mod field;
pub mod gf256;
pub mod prime;

pub use errors::FieldError;
pub use field::{ElementCodec, Field};
pub use gf256::{Gf256, Gf256Field, Gf256Tables};
pub use prime::{Fp, PrimeField};
