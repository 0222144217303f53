use shamir_field::FieldError;
use thiserror::Error;

/// Broad category of a [`ShamirError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad parameters or an inconsistent share set. Never retried.
    Validation,
    /// Field arithmetic failed, e.g. a zero denominator.
    Arithmetic,
    /// Malformed serialized share.
    Format,
}

/// Secret sharing errors
///
/// Messages name the offending parameter or position but never carry secret
/// bytes or share values.
#[derive(Debug, Error)]
pub enum ShamirError {
    #[error("invalid threshold: k={k}, n={n} (require 2 <= k <= n <= 255)")]
    InvalidThreshold { k: usize, n: usize },

    #[error("secret must not be empty")]
    EmptySecret,

    #[error("secret of {len} bytes exceeds field capacity of {max} bytes")]
    SecretTooLarge { len: usize, max: usize },

    #[error("insufficient shares: got {got}, need at least {need}")]
    InsufficientShares { got: usize, need: usize },

    #[error("share {x} carries {got} unit(s), expected {expected}")]
    MismatchedShareLength { x: u8, expected: usize, got: usize },

    #[error("share identifier must be nonzero")]
    ZeroShareId,

    #[error("duplicate share identifier {x}")]
    DuplicateShareId { x: u8 },

    #[error("field arithmetic failed at unit {position}")]
    Arithmetic {
        position: usize,
        #[source]
        source: FieldError,
    },

    #[error(transparent)]
    Field(#[from] FieldError),

    #[error(transparent)]
    Format(#[from] ShareFormatError),
}

impl ShamirError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidThreshold { .. }
            | Self::EmptySecret
            | Self::SecretTooLarge { .. }
            | Self::InsufficientShares { .. }
            | Self::MismatchedShareLength { .. }
            | Self::ZeroShareId
            | Self::DuplicateShareId { .. } => ErrorKind::Validation,
            Self::Arithmetic { .. } => ErrorKind::Arithmetic,
            Self::Field(FieldError::SecretTooLarge { .. }) => ErrorKind::Validation,
            Self::Field(FieldError::InvalidEncoding(_)) => ErrorKind::Format,
            Self::Field(_) => ErrorKind::Arithmetic,
            Self::Format(_) => ErrorKind::Format,
        }
    }
}

/// Share text decoding errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShareFormatError {
    #[error("expected `<id>:<value>`, found {found} part(s)")]
    PartCount { found: usize },

    #[error("invalid share identifier: {0}")]
    InvalidId(String),

    #[error("share identifier must be nonzero")]
    ZeroId,

    #[error("share value carries no data")]
    EmptyValue,

    #[error("invalid share value")]
    InvalidValue(#[source] FieldError),
}
