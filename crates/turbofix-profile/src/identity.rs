//! Vehicle identity: model hashes and license plates

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Vehicle model identifier as reported by the host.
///
/// Models may be declared by name; [`ModelHash::from_name`] produces the same
/// case-insensitive one-at-a-time hash the host uses for model names.
///
/// Serialized as a number. Deserializes from a number, a `0x`-prefixed hex
/// string, or a model name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ModelHash(pub u32);

impl<'de> Deserialize<'de> for ModelHash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Hash(u32),
            Text(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Hash(value) => Ok(Self(value)),
            Repr::Text(text) => {
                let trimmed = text.trim();
                if trimmed.starts_with("0x") || trimmed.starts_with("0X") {
                    trimmed.parse().map_err(serde::de::Error::custom)
                } else {
                    Ok(Self::from_name(trimmed))
                }
            }
        }
    }
}

impl ModelHash {
    pub fn from_name(name: &str) -> Self {
        Self(joaat(name.trim()))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ModelHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08X}", self.0)
    }
}

impl From<u32> for ModelHash {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

/// Parses a hexadecimal model hash, with or without a `0x` prefix.
impl FromStr for ModelHash {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);
        u32::from_str_radix(digits, 16).map(Self)
    }
}

/// Jenkins one-at-a-time hash over the lowercased name.
pub fn joaat(name: &str) -> u32 {
    let mut hash: u32 = 0;
    for byte in name.bytes() {
        hash = hash.wrapping_add(u32::from(byte.to_ascii_lowercase()));
        hash = hash.wrapping_add(hash << 10);
        hash ^= hash >> 6;
    }
    hash = hash.wrapping_add(hash << 3);
    hash ^= hash >> 11;
    hash.wrapping_add(hash << 15)
}

/// Compares two plates ignoring surrounding whitespace and ASCII case.
///
/// Hosts pad plate text to a fixed width, so `"46EEK572 "` matches `"46eek572"`.
pub fn plates_match(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}
