use thiserror::Error;

/// Field arithmetic and element encoding errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("division by zero")]
    DivisionByZero,

    #[error("zero has no multiplicative inverse")]
    NoInverse,

    #[error("secret of {len} bytes exceeds field capacity of {max} bytes")]
    SecretTooLarge { len: usize, max: usize },

    #[error("invalid element encoding: {0}")]
    InvalidEncoding(String),
}
