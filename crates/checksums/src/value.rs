use std::fmt::{self, Write as _};
use std::str::FromStr;

use thiserror::Error;

const SHA256_LEN: usize = 32;

/// A 32-byte SHA-256 value.
///
/// Equality is exact byte comparison.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Digest([u8; SHA256_LEN]);

impl Digest {
    /// Number of bytes in a digest.
    pub const LEN: usize = SHA256_LEN;

    /// Wraps raw digest bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; Self::LEN]) -> Self {
        Self(bytes)
    }

    /// Returns the raw digest bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; Self::LEN] {
        &self.0
    }

    /// Renders the digest as 64 lowercase hex characters.
    #[must_use]
    pub fn to_hex(&self) -> String {
        let mut out = String::with_capacity(Self::LEN * 2);
        for byte in self.0 {
            let _ = write!(out, "{byte:02x}");
        }
        out
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({self})")
    }
}

impl FromStr for Digest {
    type Err = DigestParseError;

    /// Parses 64 hex characters; upper and lower case are both accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.len() != Self::LEN * 2 {
            return Err(DigestParseError::Length { len: s.len() });
        }

        let mut bytes = [0_u8; Self::LEN];
        for (index, pair) in s.as_bytes().chunks_exact(2).enumerate() {
            let high = hex_value(pair[0]).ok_or(DigestParseError::Character {
                index: index * 2,
                character: char::from(pair[0]),
            })?;
            let low = hex_value(pair[1]).ok_or(DigestParseError::Character {
                index: index * 2 + 1,
                character: char::from(pair[1]),
            })?;
            bytes[index] = (high << 4) | low;
        }
        Ok(Self(bytes))
    }
}

const fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}

/// Error returned when a hex string does not describe a SHA-256 digest.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum DigestParseError {
    /// The string does not hold exactly 64 characters.
    #[error("SHA-256 digest must be 64 hex characters, got {len}")]
    Length {
        /// Length of the rejected string, in bytes.
        len: usize,
    },
    /// A character outside `[0-9a-fA-F]` was found.
    #[error("invalid hex character {character:?} at position {index}")]
    Character {
        /// Byte offset of the offending character.
        index: usize,
        /// The offending character.
        character: char,
    },
}

#[cfg(feature = "serde")]
impl serde::Serialize for Digest {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ABC: &str = "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad";

    #[test]
    fn parses_and_renders_hex() {
        let digest: Digest = ABC.parse().unwrap();
        assert_eq!(digest.to_hex(), ABC);
        assert_eq!(digest.to_string(), ABC);
        assert_eq!(digest.as_bytes()[0], 0xba);
    }

    #[test]
    fn parsing_accepts_uppercase_and_whitespace() {
        let digest: Digest = format!("  {}\n", ABC.to_uppercase()).parse().unwrap();
        assert_eq!(digest.to_hex(), ABC);
    }

    #[test]
    fn rejects_wrong_length() {
        assert_eq!(
            "abcd".parse::<Digest>(),
            Err(DigestParseError::Length { len: 4 })
        );
    }

    #[test]
    fn rejects_non_hex_characters() {
        let mut text = ABC.to_owned();
        text.replace_range(10..11, "g");
        assert_eq!(
            text.parse::<Digest>(),
            Err(DigestParseError::Character {
                index: 10,
                character: 'g'
            })
        );
    }

    #[test]
    fn debug_shows_hex() {
        let digest = Digest::from_bytes([0; 32]);
        assert!(format!("{digest:?}").starts_with("Digest(0000"));
    }
}
