//! GF(256) - Galois Field operations over bytes
//!
//! Elements are bytes, addition is XOR, and multiplication goes through
//! exponent/logarithm tables derived from the generator `0x03` and the
//! AES reduction polynomial x^8 + x^4 + x^3 + x + 1 (`0x11B`).

use std::fmt;
use std::sync::OnceLock;

use rand::{CryptoRng, RngCore};

use crate::errors::FieldError;
use crate::field::{ElementCodec, Field};

/// Low byte of the reduction polynomial `0x11B` (the x^8 term is implicit).
const REDUCTION: u8 = 0x1b;

/// Generator of the multiplicative group (order 255).
const GENERATOR: u8 = 0x03;

/// Order of the multiplicative group.
const GROUP_ORDER: usize = 255;

static TABLES: OnceLock<Gf256Tables> = OnceLock::new();

/// A GF(256) element
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Gf256(pub u8);

impl fmt::Debug for Gf256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Gf256({:#04x})", self.0)
    }
}

impl From<u8> for Gf256 {
    fn from(value: u8) -> Self {
        Self(value)
    }
}

impl From<Gf256> for u8 {
    fn from(value: Gf256) -> Self {
        value.0
    }
}

/// Exponent and logarithm tables for GF(256).
///
/// Built once per process and read-only afterwards. `log[0]` is unused.
pub struct Gf256Tables {
    exp: [u8; 256],
    log: [u8; 256],
}

impl Gf256Tables {
    /// Get the process-wide tables, building them on first use.
    pub fn get() -> &'static Gf256Tables {
        TABLES.get_or_init(Self::build)
    }

    fn build() -> Self {
        let mut exp = [0u8; 256];
        let mut log = [0u8; 256];

        let mut value: u8 = 1;
        for i in 0..GROUP_ORDER {
            exp[i] = value;
            log[value as usize] = i as u8;
            value = raw_mul(value, GENERATOR);
        }
        exp[GROUP_ORDER] = exp[0];

        Self { exp, log }
    }

    /// g^i for `i` in `0..=255`
    #[inline]
    pub fn exp(&self, i: usize) -> u8 {
        self.exp[i]
    }

    /// Discrete logarithm of a nonzero element
    #[inline]
    pub fn log(&self, a: u8) -> usize {
        self.log[a as usize] as usize
    }
}

impl fmt::Debug for Gf256Tables {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gf256Tables")
            .field("generator", &GENERATOR)
            .finish_non_exhaustive()
    }
}

/// Carry-less multiplication reduced by `0x11B`.
///
/// Only used to bootstrap the tables.
fn raw_mul(a: u8, b: u8) -> u8 {
    let mut result: u8 = 0;
    let mut a = a;
    let mut b = b;

    while b != 0 {
        if b & 1 != 0 {
            result ^= a;
        }
        let hi = a & 0x80;
        a <<= 1;
        if hi != 0 {
            a ^= REDUCTION;
        }
        b >>= 1;
    }
    result
}

/// The byte-oriented field. Each secret byte is one unit.
#[derive(Clone, Copy)]
pub struct Gf256Field {
    tables: &'static Gf256Tables,
}

impl Gf256Field {
    pub fn new() -> Self {
        Self::with_tables(Gf256Tables::get())
    }

    pub fn with_tables(tables: &'static Gf256Tables) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> &'static Gf256Tables {
        self.tables
    }
}

impl Default for Gf256Field {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Gf256Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Gf256Field")
    }
}

impl Field for Gf256Field {
    type Element = Gf256;

    fn zero(&self) -> Gf256 {
        Gf256(0)
    }

    fn one(&self) -> Gf256 {
        Gf256(1)
    }

    #[inline]
    fn add(&self, a: &Gf256, b: &Gf256) -> Gf256 {
        Gf256(a.0 ^ b.0)
    }

    /// Same as add in characteristic 2
    #[inline]
    fn sub(&self, a: &Gf256, b: &Gf256) -> Gf256 {
        Gf256(a.0 ^ b.0)
    }

    #[inline]
    fn mul(&self, a: &Gf256, b: &Gf256) -> Gf256 {
        if a.0 == 0 || b.0 == 0 {
            return Gf256(0);
        }
        let t = self.tables;
        Gf256(t.exp((t.log(a.0) + t.log(b.0)) % GROUP_ORDER))
    }

    #[inline]
    fn div(&self, a: &Gf256, b: &Gf256) -> Result<Gf256, FieldError> {
        if b.0 == 0 {
            return Err(FieldError::DivisionByZero);
        }
        if a.0 == 0 {
            return Ok(Gf256(0));
        }
        let t = self.tables;
        Ok(Gf256(
            t.exp((GROUP_ORDER + t.log(a.0) - t.log(b.0)) % GROUP_ORDER),
        ))
    }

    #[inline]
    fn inv(&self, a: &Gf256) -> Result<Gf256, FieldError> {
        if a.0 == 0 {
            return Err(FieldError::NoInverse);
        }
        let t = self.tables;
        Ok(Gf256(t.exp(GROUP_ORDER - t.log(a.0))))
    }

    fn random<R: RngCore + CryptoRng + ?Sized>(&self, rng: &mut R) -> Gf256 {
        let mut byte = [0u8; 1];
        rng.fill_bytes(&mut byte);
        Gf256(byte[0])
    }

    fn from_share_id(&self, x: u8) -> Gf256 {
        Gf256(x)
    }

    fn max_secret_len(&self) -> Option<usize> {
        None
    }

    fn decompose(&self, secret: &[u8]) -> Result<Vec<Gf256>, FieldError> {
        Ok(secret.iter().copied().map(Gf256).collect())
    }

    fn recompose(&self, units: &[Gf256]) -> Vec<u8> {
        units.iter().map(|u| u.0).collect()
    }
}

impl ElementCodec for Gf256 {
    fn encode_hex(units: &[Self]) -> String {
        let bytes: Vec<u8> = units.iter().map(|u| u.0).collect();
        hex::encode(bytes)
    }

    fn decode_hex(s: &str) -> Result<Vec<Self>, FieldError> {
        let bytes = hex::decode(s).map_err(|e| FieldError::InvalidEncoding(e.to_string()))?;
        Ok(bytes.into_iter().map(Gf256).collect())
    }
}
