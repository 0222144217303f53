//! Random polynomials, Horner evaluation and Lagrange interpolation at zero.

use std::fmt;

use rand::{CryptoRng, RngCore};
use shamir_field::Field;

use crate::errors::ShamirError;

/// Minimum number of points `interpolate_at_zero` accepts.
pub const MIN_POINTS: usize = 2;

/// A polynomial over a field; `coefficients[0]` is the constant term.
///
/// The constant term is a secret unit and the rest is fresh randomness, so
/// the `Debug` output never prints coefficients.
#[derive(Clone, PartialEq, Eq)]
pub struct Polynomial<E> {
    coefficients: Vec<E>,
}

impl<E: Clone> Polynomial<E> {
    /// f(x) = secret_unit + a1*x + a2*x^2 + ... + a_degree*x^degree
    pub fn generate<F, R>(field: &F, secret_unit: E, degree: usize, rng: &mut R) -> Self
    where
        F: Field<Element = E>,
        R: RngCore + CryptoRng + ?Sized,
    {
        let mut coefficients = Vec::with_capacity(degree + 1);
        coefficients.push(secret_unit);
        for _ in 0..degree {
            coefficients.push(field.random(rng));
        }
        Self { coefficients }
    }

    pub fn from_coefficients(coefficients: Vec<E>) -> Self {
        Self { coefficients }
    }

    pub fn degree(&self) -> usize {
        self.coefficients.len().saturating_sub(1)
    }

    pub fn constant_term(&self) -> Option<&E> {
        self.coefficients.first()
    }

    /// Evaluate at `x` with Horner's method
    pub fn evaluate<F>(&self, field: &F, x: &E) -> E
    where
        F: Field<Element = E>,
    {
        self.coefficients
            .iter()
            .rev()
            .fold(field.zero(), |acc, coeff| field.add(coeff, &field.mul(x, &acc)))
    }
}

impl<E> fmt::Debug for Polynomial<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Polynomial")
            .field("degree", &self.coefficients.len().saturating_sub(1))
            .field("coefficients", &"<redacted>")
            .finish()
    }
}

/// Value at x = 0 of the polynomial through `points`
///
/// Li(0) = product over j != i of (0 - xj) / (xi - xj), result = sum of yi * Li(0)
pub fn interpolate_at_zero<F: Field>(
    field: &F,
    points: &[(F::Element, F::Element)],
) -> Result<F::Element, ShamirError> {
    if points.len() < MIN_POINTS {
        return Err(ShamirError::InsufficientShares {
            got: points.len(),
            need: MIN_POINTS,
        });
    }

    let zero = field.zero();
    let mut result = field.zero();

    for (i, (xi, yi)) in points.iter().enumerate() {
        let mut numerator = field.one();
        let mut denominator = field.one();

        for (j, (xj, _)) in points.iter().enumerate() {
            if i != j {
                numerator = field.mul(&numerator, &field.sub(&zero, xj));
                denominator = field.mul(&denominator, &field.sub(xi, xj));
            }
        }

        let basis = field.div(&numerator, &denominator)?;
        result = field.add(&result, &field.mul(yi, &basis));
    }

    Ok(result)
}
