//! The arithmetic capability shared by every backend.

use std::fmt::Debug;

use rand::{CryptoRng, RngCore};

use crate::errors::FieldError;

/// A finite field usable as a secret sharing backend.
///
/// Besides the field operations, a backend knows how to cut a secret into
/// field elements ("units") and how to glue units back into bytes. The
/// protocol layer shares and reconstructs each unit independently.
pub trait Field: Clone + Send + Sync {
    type Element: Clone + PartialEq + Eq + Debug + Send + Sync + ElementCodec;

    fn zero(&self) -> Self::Element;

    fn one(&self) -> Self::Element;

    fn add(&self, a: &Self::Element, b: &Self::Element) -> Self::Element;

    fn sub(&self, a: &Self::Element, b: &Self::Element) -> Self::Element;

    fn mul(&self, a: &Self::Element, b: &Self::Element) -> Self::Element;

    /// Fails with [`FieldError::DivisionByZero`] when `b` is zero.
    fn div(&self, a: &Self::Element, b: &Self::Element) -> Result<Self::Element, FieldError>;

    /// Fails with [`FieldError::NoInverse`] when `a` is zero.
    fn inv(&self, a: &Self::Element) -> Result<Self::Element, FieldError>;

    /// Draws a uniformly distributed element from `rng`.
    fn random<R: RngCore + CryptoRng + ?Sized>(&self, rng: &mut R) -> Self::Element;

    /// Embeds a share identifier as a field element.
    fn from_share_id(&self, x: u8) -> Self::Element;

    /// Largest secret, in bytes, this field can share. `None` means unbounded.
    fn max_secret_len(&self) -> Option<usize>;

    /// Splits a secret into the units shared independently.
    fn decompose(&self, secret: &[u8]) -> Result<Vec<Self::Element>, FieldError>;

    /// Inverse of [`Field::decompose`].
    fn recompose(&self, units: &[Self::Element]) -> Vec<u8>;
}

/// Hex text form of a share's value (the `y` side of the wire format).
pub trait ElementCodec: Sized {
    fn encode_hex(units: &[Self]) -> String;

    fn decode_hex(s: &str) -> Result<Vec<Self>, FieldError>;
}
