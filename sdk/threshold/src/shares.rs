//! Shares and their text form
//!
//! A share serializes as `"<id>:<value>"`: the id as two lowercase hex
//! digits, then the value hex-encoded by its element codec. For the byte
//! field `"01:3039"` is share 1 carrying bytes `0x30 0x39`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use shamir_field::{ElementCodec, Gf256};

use crate::errors::ShareFormatError;

/// A share identifier (1-indexed)
pub type ShareId = u8;

const SEPARATOR: char = ':';

/// A secret share: the evaluation of every unit's polynomial at `x = id`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Share<E = Gf256> {
    id: ShareId,
    value: Vec<E>,
}

impl<E> Share<E> {
    /// Create a new share
    pub fn new(id: ShareId, value: Vec<E>) -> Self {
        Self { id, value }
    }

    pub fn id(&self) -> ShareId {
        self.id
    }

    /// One element per secret unit
    pub fn value(&self) -> &[E] {
        &self.value
    }

    pub fn len(&self) -> usize {
        self.value.len()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

impl<E: ElementCodec> Share<E> {
    pub fn serialize(&self) -> String {
        format!("{:02x}{}{}", self.id, SEPARATOR, E::encode_hex(&self.value))
    }

    pub fn deserialize(s: &str) -> Result<Self, ShareFormatError> {
        let parts: Vec<&str> = s.split(SEPARATOR).collect();
        let [id, value] = parts.as_slice() else {
            return Err(ShareFormatError::PartCount { found: parts.len() });
        };

        if id.len() != 2 || !id.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ShareFormatError::InvalidId(format!(
                "expected two hex digits, found {} character(s)",
                id.len()
            )));
        }
        let id = u8::from_str_radix(id, 16)
            .map_err(|e| ShareFormatError::InvalidId(e.to_string()))?;
        if id == 0 {
            return Err(ShareFormatError::ZeroId);
        }

        let value = E::decode_hex(value).map_err(ShareFormatError::InvalidValue)?;
        if value.is_empty() {
            return Err(ShareFormatError::EmptyValue);
        }

        Ok(Self { id, value })
    }
}

impl<E: ElementCodec> fmt::Display for Share<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.serialize())
    }
}

impl<E: ElementCodec> FromStr for Share<E> {
    type Err = ShareFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::deserialize(s)
    }
}

impl<E: ElementCodec> Serialize for Share<E> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de, E: ElementCodec> Deserialize<'de> for Share<E> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
