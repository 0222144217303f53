//! Prime field backend
//!
//! Integers modulo the Mersenne prime 2^521 - 1. The whole secret becomes a
//! single field element, so secrets are bounded by the prime's size.

use std::sync::OnceLock;

use num_bigint::{BigUint, RandBigInt};
use num_traits::{One, Zero};
use rand::{CryptoRng, RngCore};

use crate::errors::FieldError;
use crate::field::{ElementCodec, Field};

/// Exponent of the Mersenne prime 2^521 - 1.
const MERSENNE_EXPONENT: usize = 521;

/// Marker prepended to a secret before it becomes an integer, so leading
/// zero bytes survive the round trip.
const LENGTH_SENTINEL: u8 = 0x01;

/// 65 bytes (sentinel + secret) is 520 bits, which stays below the modulus.
const MAX_SECRET_LEN: usize = 64;

static MODULUS: OnceLock<BigUint> = OnceLock::new();

fn modulus() -> &'static BigUint {
    MODULUS.get_or_init(|| (BigUint::one() << MERSENNE_EXPONENT) - 1u32)
}

/// An element of the prime field, always reduced into `[0, p)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Fp(BigUint);

impl Fp {
    pub fn new(value: BigUint) -> Self {
        Self(value % modulus())
    }

    pub fn value(&self) -> &BigUint {
        &self.0
    }
}

impl From<u64> for Fp {
    fn from(value: u64) -> Self {
        Self::new(BigUint::from(value))
    }
}

/// Integers modulo 2^521 - 1.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrimeField;

impl PrimeField {
    pub fn new() -> Self {
        Self
    }

    pub fn modulus(&self) -> &'static BigUint {
        modulus()
    }
}

impl Field for PrimeField {
    type Element = Fp;

    fn zero(&self) -> Fp {
        Fp(BigUint::zero())
    }

    fn one(&self) -> Fp {
        Fp(BigUint::one())
    }

    fn add(&self, a: &Fp, b: &Fp) -> Fp {
        Fp((&a.0 + &b.0) % modulus())
    }

    fn sub(&self, a: &Fp, b: &Fp) -> Fp {
        let p = modulus();
        Fp((&a.0 + p - &b.0) % p)
    }

    fn mul(&self, a: &Fp, b: &Fp) -> Fp {
        Fp((&a.0 * &b.0) % modulus())
    }

    fn div(&self, a: &Fp, b: &Fp) -> Result<Fp, FieldError> {
        if b.0.is_zero() {
            return Err(FieldError::DivisionByZero);
        }
        let inv = self.inv(b)?;
        Ok(self.mul(a, &inv))
    }

    /// Fermat's little theorem: a^(p-2) mod p
    fn inv(&self, a: &Fp) -> Result<Fp, FieldError> {
        if a.0.is_zero() {
            return Err(FieldError::NoInverse);
        }
        let p = modulus();
        let exponent = p - 2u32;
        Ok(Fp(a.0.modpow(&exponent, p)))
    }

    fn random<R: RngCore + CryptoRng + ?Sized>(&self, rng: &mut R) -> Fp {
        Fp(rng.gen_biguint_below(modulus()))
    }

    fn from_share_id(&self, x: u8) -> Fp {
        Fp(BigUint::from(x))
    }

    fn max_secret_len(&self) -> Option<usize> {
        Some(MAX_SECRET_LEN)
    }

    fn decompose(&self, secret: &[u8]) -> Result<Vec<Fp>, FieldError> {
        if secret.len() > MAX_SECRET_LEN {
            return Err(FieldError::SecretTooLarge {
                len: secret.len(),
                max: MAX_SECRET_LEN,
            });
        }
        let mut bytes = Vec::with_capacity(secret.len() + 1);
        bytes.push(LENGTH_SENTINEL);
        bytes.extend_from_slice(secret);
        Ok(vec![Fp(BigUint::from_bytes_be(&bytes))])
    }

    fn recompose(&self, units: &[Fp]) -> Vec<u8> {
        let mut secret = Vec::new();
        for unit in units {
            let bytes = unit.0.to_bytes_be();
            // A value without the sentinel did not come from a genuine
            // reconstruction; hand back the raw bytes.
            match bytes.split_first() {
                Some((&LENGTH_SENTINEL, rest)) => secret.extend_from_slice(rest),
                _ => secret.extend_from_slice(&bytes),
            }
        }
        secret
    }
}

impl ElementCodec for Fp {
    /// The whole secret is one unit, so the text is a single hex integer.
    fn encode_hex(units: &[Self]) -> String {
        let mut digits = String::new();
        for unit in units {
            let mut hex = unit.0.to_str_radix(16);
            if hex.len() % 2 == 1 {
                hex.insert(0, '0');
            }
            digits.push_str(&hex);
        }
        digits
    }

    fn decode_hex(s: &str) -> Result<Vec<Self>, FieldError> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(FieldError::InvalidEncoding(format!(
                "expected a single hex integer, found {} character(s)",
                s.len()
            )));
        }
        let value = BigUint::parse_bytes(s.as_bytes(), 16)
            .ok_or_else(|| FieldError::InvalidEncoding("unparseable hex integer".into()))?;
        if &value >= modulus() {
            return Err(FieldError::InvalidEncoding(
                "value is not reduced modulo the field prime".into(),
            ));
        }
        Ok(vec![Fp(value)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn samples() -> Vec<Fp> {
        let f = PrimeField::new();
        let mut rng = StdRng::seed_from_u64(7);
        let mut values: Vec<Fp> = (0..24).map(|_| f.random(&mut rng)).collect();
        values.push(Fp::from(1));
        values.push(Fp::from(2));
        values.push(Fp::new(modulus() - 1u32));
        values
    }

    #[test]
    fn modulus_is_mersenne_521() {
        let p = PrimeField::new().modulus();
        assert_eq!(p.bits(), 521);
        assert_eq!(p + 1u32, BigUint::one() << 521);
    }

    #[test]
    fn field_laws_hold_on_samples() {
        let f = PrimeField::new();
        let values = samples();
        for a in &values {
            assert_eq!(f.add(a, &f.zero()), *a);
            assert_eq!(f.mul(a, &f.one()), *a);
            assert_eq!(f.sub(a, a), f.zero());
            assert_eq!(f.mul(a, &f.inv(a).unwrap()), f.one());
            for b in &values {
                assert_eq!(f.add(a, b), f.add(b, a));
                assert_eq!(f.mul(a, b), f.mul(b, a));
                assert_eq!(f.add(&f.sub(a, b), b), *a);
                assert_eq!(f.div(&f.mul(a, b), b).unwrap(), *a);
            }
        }
    }

    #[test]
    fn wraps_around_modulus() {
        let f = PrimeField::new();
        let max = Fp::new(modulus() - 1u32);
        assert_eq!(f.add(&max, &f.one()), f.zero());
        assert_eq!(f.sub(&f.zero(), &f.one()), max);
        assert_eq!(Fp::new(modulus().clone()), f.zero());
    }

    #[test]
    fn zero_divisor_and_zero_inverse_fail() {
        let f = PrimeField::new();
        assert_eq!(f.div(&Fp::from(5), &f.zero()), Err(FieldError::DivisionByZero));
        assert_eq!(f.inv(&f.zero()), Err(FieldError::NoInverse));
    }

    #[test]
    fn decompose_keeps_leading_zeros() {
        let f = PrimeField::new();
        let secret = b"\x00\x00secret";
        let units = f.decompose(secret).unwrap();
        assert_eq!(units.len(), 1);
        assert_eq!(f.recompose(&units), secret);
    }

    #[test]
    fn decompose_rejects_oversize_secret() {
        let f = PrimeField::new();
        assert!(f.decompose(&[0xff; MAX_SECRET_LEN]).is_ok());
        assert_eq!(
            f.decompose(&[0xff; MAX_SECRET_LEN + 1]),
            Err(FieldError::SecretTooLarge {
                len: MAX_SECRET_LEN + 1,
                max: MAX_SECRET_LEN,
            })
        );
    }

    #[test]
    fn hex_codec_pads_to_even_length() {
        assert_eq!(Fp::encode_hex(&[Fp::from(0x3039)]), "3039");
        assert_eq!(Fp::encode_hex(&[Fp::from(0xabc)]), "0abc");
        assert_eq!(Fp::decode_hex("0abc").unwrap(), vec![Fp::from(0xabc)]);
    }

    #[test]
    fn hex_codec_rejects_garbage() {
        assert!(Fp::decode_hex("").is_err());
        assert!(Fp::decode_hex("xyz").is_err());
        assert!(Fp::decode_hex("+1").is_err());
        assert!(matches!(
            Fp::decode_hex("0a.0b"),
            Err(FieldError::InvalidEncoding(_))
        ));
        let unreduced = modulus().to_str_radix(16);
        assert!(Fp::decode_hex(&unreduced).is_err());
    }
}
