//! Split and combine over any [`Field`] backend.

use rand::{CryptoRng, RngCore};
use shamir_config::SharingConfig;
use shamir_field::{Field, FieldError};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::errors::ShamirError;
use crate::polynomial::{MIN_POINTS, Polynomial, interpolate_at_zero};
use crate::shares::{Share, ShareId};

/// Largest number of shares (share ids are nonzero bytes)
pub const MAX_SHARES: usize = 255;

/// Smallest meaningful threshold
pub const MIN_THRESHOLD: usize = 2;

/// K-of-N secret sharing over a field backend
///
/// Every secret unit gets its own random polynomial of degree `k - 1`; share
/// `x` holds the evaluation of each of them at `x`.
#[derive(Debug, Clone)]
pub struct SecretSharer<F: Field> {
    field: F,
    parallel_min_len: usize,
    default_threshold: usize,
    default_shares: usize,
}

impl<F: Field> SecretSharer<F> {
    /// Sharer with built-in defaults. Ignores `ShamirConfig::load` and the
    /// global config; use [`SecretSharer::from_config`] to apply them.
    pub fn new(field: F) -> Self {
        Self::from_config(field, &SharingConfig::default())
    }

    pub fn from_config(field: F, config: &SharingConfig) -> Self {
        Self {
            field,
            parallel_min_len: config.parallel_min_len,
            default_threshold: config.default_threshold,
            default_shares: config.default_shares,
        }
    }

    /// Secrets with at least this many units are processed on the rayon
    /// pool when the `parallel` feature is enabled.
    pub fn with_parallel_min_len(mut self, len: usize) -> Self {
        self.parallel_min_len = len;
        self
    }

    pub fn field(&self) -> &F {
        &self.field
    }

    pub fn parallel_min_len(&self) -> usize {
        self.parallel_min_len
    }

    /// Split a secret into N shares, requiring K to reconstruct
    ///
    /// Coefficients come from the thread-local CSPRNG.
    ///
    /// # Arguments
    /// * `secret` - Non-empty secret bytes
    /// * `n` - total number of shares to generate
    /// * `k` - minimum shares needed to reconstruct
    pub fn split(
        &self,
        secret: &[u8],
        n: usize,
        k: usize,
    ) -> Result<Vec<Share<F::Element>>, ShamirError> {
        let units = self.prepare(secret, n, k)?;
        let xs = self.share_points(n);

        #[cfg(feature = "parallel")]
        if units.len() >= self.parallel_min_len {
            log::trace!("sharing {} units on the rayon pool", units.len());
            let evaluations: Vec<Vec<F::Element>> = units
                .par_iter()
                .map_init(rand::thread_rng, |rng, unit| {
                    self.share_unit(unit, &xs, k - 1, rng)
                })
                .collect();
            return Ok(assemble(evaluations, n));
        }

        let mut rng = rand::thread_rng();
        Ok(self.split_units(&units, &xs, k, &mut rng))
    }

    /// Like [`SecretSharer::split`] but draws every coefficient from `rng`,
    /// sequentially and in unit order.
    pub fn split_with_rng<R>(
        &self,
        secret: &[u8],
        n: usize,
        k: usize,
        rng: &mut R,
    ) -> Result<Vec<Share<F::Element>>, ShamirError>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        let units = self.prepare(secret, n, k)?;
        let xs = self.share_points(n);
        Ok(self.split_units(&units, &xs, k, rng))
    }

    /// Split using the configured default share count and threshold
    pub fn split_with_defaults(
        &self,
        secret: &[u8],
    ) -> Result<Vec<Share<F::Element>>, ShamirError> {
        self.split(secret, self.default_shares, self.default_threshold)
    }

    /// Reconstruct the secret using Lagrange interpolation at x=0
    ///
    /// Any subset of at least K shares from the same split reconstructs the
    /// secret. Fewer than K shares is not detected and yields unrelated bytes.
    pub fn combine(&self, shares: &[Share<F::Element>]) -> Result<Vec<u8>, ShamirError> {
        let unit_count = validate_shares(shares)?;
        log::debug!(
            "combining {} shares of {} unit(s)",
            shares.len(),
            unit_count
        );

        let xs: Vec<F::Element> = shares
            .iter()
            .map(|share| self.field.from_share_id(share.id()))
            .collect();

        #[cfg(feature = "parallel")]
        if unit_count >= self.parallel_min_len {
            log::trace!("interpolating {} units on the rayon pool", unit_count);
            let units = (0..unit_count)
                .into_par_iter()
                .map(|position| self.interpolate_position(shares, &xs, position))
                .collect::<Result<Vec<_>, _>>()?;
            return Ok(self.field.recompose(&units));
        }

        let units = (0..unit_count)
            .map(|position| self.interpolate_position(shares, &xs, position))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(self.field.recompose(&units))
    }

    fn prepare(&self, secret: &[u8], n: usize, k: usize) -> Result<Vec<F::Element>, ShamirError> {
        validate_params(n, k)?;
        if secret.is_empty() {
            return Err(ShamirError::EmptySecret);
        }

        let units = self.field.decompose(secret).map_err(|e| match e {
            FieldError::SecretTooLarge { len, max } => ShamirError::SecretTooLarge { len, max },
            other => ShamirError::Field(other),
        })?;

        log::debug!(
            "splitting {} unit(s) into {} shares, threshold {}",
            units.len(),
            n,
            k
        );
        Ok(units)
    }

    fn share_points(&self, n: usize) -> Vec<F::Element> {
        (1..=n)
            .map(|x| self.field.from_share_id(x as ShareId))
            .collect()
    }

    fn split_units<R>(
        &self,
        units: &[F::Element],
        xs: &[F::Element],
        k: usize,
        rng: &mut R,
    ) -> Vec<Share<F::Element>>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        let evaluations = units
            .iter()
            .map(|unit| self.share_unit(unit, xs, k - 1, rng))
            .collect();
        assemble(evaluations, xs.len())
    }

    /// Evaluations of one fresh polynomial at every share point
    fn share_unit<R>(
        &self,
        unit: &F::Element,
        xs: &[F::Element],
        degree: usize,
        rng: &mut R,
    ) -> Vec<F::Element>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        let poly = Polynomial::generate(&self.field, unit.clone(), degree, rng);
        xs.iter().map(|x| poly.evaluate(&self.field, x)).collect()
    }

    fn interpolate_position(
        &self,
        shares: &[Share<F::Element>],
        xs: &[F::Element],
        position: usize,
    ) -> Result<F::Element, ShamirError> {
        let points: Vec<(F::Element, F::Element)> = xs
            .iter()
            .zip(shares)
            .map(|(x, share)| (x.clone(), share.value()[position].clone()))
            .collect();

        interpolate_at_zero(&self.field, &points).map_err(|e| match e {
            ShamirError::Field(source) => ShamirError::Arithmetic { position, source },
            other => other,
        })
    }
}

fn validate_params(n: usize, k: usize) -> Result<(), ShamirError> {
    if k < MIN_THRESHOLD || k > n || n > MAX_SHARES {
        return Err(ShamirError::InvalidThreshold { k, n });
    }
    Ok(())
}

/// Checks a share set is usable and returns its unit count
fn validate_shares<E>(shares: &[Share<E>]) -> Result<usize, ShamirError> {
    if shares.len() < MIN_POINTS {
        return Err(ShamirError::InsufficientShares {
            got: shares.len(),
            need: MIN_POINTS,
        });
    }

    let expected = shares[0].len();
    if expected == 0 {
        return Err(ShamirError::EmptySecret);
    }

    let mut seen = [false; 256];
    for share in shares {
        let x = share.id();
        if x == 0 {
            return Err(ShamirError::ZeroShareId);
        }
        if share.len() != expected {
            return Err(ShamirError::MismatchedShareLength {
                x,
                expected,
                got: share.len(),
            });
        }
        if std::mem::replace(&mut seen[x as usize], true) {
            return Err(ShamirError::DuplicateShareId { x });
        }
    }

    Ok(expected)
}

/// Transposes per-unit evaluations into per-share values
fn assemble<E>(evaluations: Vec<Vec<E>>, n: usize) -> Vec<Share<E>> {
    let mut values: Vec<Vec<E>> = (0..n)
        .map(|_| Vec::with_capacity(evaluations.len()))
        .collect();

    for row in evaluations {
        for (value, y) in values.iter_mut().zip(row) {
            value.push(y);
        }
    }

    values
        .into_iter()
        .enumerate()
        .map(|(i, value)| Share::new((i + 1) as ShareId, value))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use shamir_field::{Gf256, Gf256Field};

    fn sharer() -> SecretSharer<Gf256Field> {
        SecretSharer::new(Gf256Field::new())
    }

    #[test]
    fn shares_are_numbered_one_to_n() {
        let shares = sharer().split(b"abc", 5, 3).unwrap();
        let ids: Vec<_> = shares.iter().map(Share::id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
        assert!(shares.iter().all(|s| s.len() == 3));
    }

    #[test]
    fn seeded_split_is_deterministic() {
        let s = sharer();
        let a = s
            .split_with_rng(b"secret", 4, 2, &mut StdRng::seed_from_u64(9))
            .unwrap();
        let b = s
            .split_with_rng(b"secret", 4, 2, &mut StdRng::seed_from_u64(9))
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn units_use_independent_polynomials() {
        // With a shared polynomial, equal secret bytes would give equal share bytes.
        let secret = [0x11u8; 64];
        let shares = sharer()
            .split_with_rng(&secret, 3, 2, &mut StdRng::seed_from_u64(3))
            .unwrap();
        let first = shares[0].value();
        assert!(first.iter().any(|y| *y != first[0]));
    }

    #[test]
    fn parallel_and_sequential_paths_agree() {
        let secret: Vec<u8> = (0..=255u8).cycle().take(2048).collect();
        let eager = sharer().with_parallel_min_len(1);
        let lazy = sharer().with_parallel_min_len(usize::MAX);

        let shares = eager.split(&secret, 6, 4).unwrap();
        assert_eq!(lazy.combine(&shares[2..]).unwrap(), secret);

        let shares = lazy.split(&secret, 6, 4).unwrap();
        assert_eq!(eager.combine(&shares[..4]).unwrap(), secret);
    }

    #[test]
    fn defaults_come_from_config() {
        let config = SharingConfig {
            default_threshold: 3,
            default_shares: 4,
            parallel_min_len: 16,
        };
        let s = SecretSharer::from_config(Gf256Field::new(), &config);
        let shares = s.split_with_defaults(b"config").unwrap();
        assert_eq!(shares.len(), 4);
        assert_eq!(s.combine(&shares[1..]).unwrap(), b"config");
    }

    #[test]
    fn new_uses_builtin_defaults() {
        let s = SecretSharer::new(Gf256Field::new());
        assert_eq!(s.parallel_min_len(), SharingConfig::default().parallel_min_len);
        let shares = s.split_with_defaults(b"defaults").unwrap();
        assert_eq!(shares.len(), SharingConfig::default().default_shares);
    }

    #[test]
    fn validate_params_bounds() {
        assert!(validate_params(2, 2).is_ok());
        assert!(validate_params(255, 255).is_ok());
        assert!(validate_params(256, 2).is_err());
        assert!(validate_params(5, 1).is_err());
        assert!(validate_params(3, 5).is_err());
        assert!(validate_params(0, 0).is_err());
    }

    #[test]
    fn validate_shares_reports_offender() {
        let a = Share::new(1, vec![Gf256(1), Gf256(2)]);
        let b = Share::new(2, vec![Gf256(3)]);
        assert!(matches!(
            validate_shares(&[a.clone(), b]),
            Err(ShamirError::MismatchedShareLength {
                x: 2,
                expected: 2,
                got: 1
            })
        ));

        let c = Share::new(1, vec![Gf256(5), Gf256(6)]);
        assert!(matches!(
            validate_shares(&[a.clone(), c]),
            Err(ShamirError::DuplicateShareId { x: 1 })
        ));

        let zero = Share::new(0, vec![Gf256(5), Gf256(6)]);
        assert!(matches!(
            validate_shares(&[a, zero]),
            Err(ShamirError::ZeroShareId)
        ));
    }

    #[test]
    fn assemble_transposes() {
        let shares = assemble(vec![vec![1, 2, 3], vec![4, 5, 6]], 3);
        assert_eq!(shares[0], Share::new(1, vec![1, 4]));
        assert_eq!(shares[2], Share::new(3, vec![3, 6]));
    }
}
