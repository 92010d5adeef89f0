//! Room code - human-shareable identifier for a session's media room
//!
//! Viewers type or paste this code into the client to locate the broadcast,
//! so the alphabet avoids characters that are easy to confuse (0/O, 1/I/L).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Characters allowed in a room code (no 0/O, 1/I/L)
const CHARSET: &[u8] = b"ABCDEFGHJKMNPQRSTUVWXYZ23456789";
/// Characters per group
const GROUP_LEN: usize = 4;
/// Number of groups ("XXXX-XXXX")
const GROUPS: usize = 2;

/// Human-readable room code in the form `XXXX-XXXX`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RoomCode(String);

impl RoomCode {
    /// Generate a new random room code
    pub fn generate() -> Self {
        use rand::Rng;

        let mut rng = rand::thread_rng();
        let mut code = String::with_capacity(GROUPS * GROUP_LEN + GROUPS - 1);

        for group in 0..GROUPS {
            if group > 0 {
                code.push('-');
            }
            for _ in 0..GROUP_LEN {
                code.push(CHARSET[rng.gen_range(0..CHARSET.len())] as char);
            }
        }

        Self(code)
    }

    /// Parse and normalize a room code (uppercases, validates alphabet and shape)
    pub fn parse(input: &str) -> Result<Self, RoomCodeParseError> {
        let normalized = input.trim().to_ascii_uppercase();
        let groups: Vec<&str> = normalized.split('-').collect();

        if groups.len() != GROUPS || groups.iter().any(|g| g.len() != GROUP_LEN) {
            return Err(RoomCodeParseError::InvalidShape);
        }

        for ch in normalized.bytes() {
            if ch != b'-' && !CHARSET.contains(&ch) {
                return Err(RoomCodeParseError::InvalidCharacter(ch as char));
            }
        }

        Ok(Self(normalized))
    }

    /// Wrap a value that was validated when it was stored
    #[inline]
    #[must_use]
    pub fn from_stored(code: String) -> Self {
        Self(code)
    }

    /// The code as a string slice
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Error when parsing a room code
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RoomCodeParseError {
    #[error("room code must be two groups of four characters")]
    InvalidShape,

    #[error("room code contains invalid character: {0}")]
    InvalidCharacter(char),
}

impl fmt::Display for RoomCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for RoomCode {
    type Err = RoomCodeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RoomCode::parse(s)
    }
}

impl TryFrom<String> for RoomCode {
    type Error = RoomCodeParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        RoomCode::parse(&value)
    }
}

impl From<RoomCode> for String {
    fn from(code: RoomCode) -> Self {
        code.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_shape() {
        let code = RoomCode::generate();
        let s = code.as_str();
        assert_eq!(s.len(), 9);
        assert_eq!(s.as_bytes()[4], b'-');
        assert!(s
            .bytes()
            .all(|b| b == b'-' || CHARSET.contains(&b)));
    }

    #[test]
    fn test_generate_is_random() {
        let a = RoomCode::generate();
        let b = RoomCode::generate();
        // Astronomically unlikely to collide
        assert_ne!(a, b);
    }

    #[test]
    fn test_parse_normalizes_case() {
        let code = RoomCode::parse("abcd-efgh").unwrap();
        assert_eq!(code.as_str(), "ABCD-EFGH");
    }

    #[test]
    fn test_parse_rejects_bad_shape() {
        assert_eq!(
            RoomCode::parse("ABCDEFGH"),
            Err(RoomCodeParseError::InvalidShape)
        );
        assert_eq!(
            RoomCode::parse("ABC-DEFGH"),
            Err(RoomCodeParseError::InvalidShape)
        );
    }

    #[test]
    fn test_parse_rejects_ambiguous_characters() {
        assert_eq!(
            RoomCode::parse("ABC0-EFGH"),
            Err(RoomCodeParseError::InvalidCharacter('0'))
        );
        assert_eq!(
            RoomCode::parse("ABCI-EFGH"),
            Err(RoomCodeParseError::InvalidCharacter('I'))
        );
    }

    #[test]
    fn test_serde_roundtrip() {
        let code = RoomCode::generate();
        let json = serde_json::to_string(&code).unwrap();
        let back: RoomCode = serde_json::from_str(&json).unwrap();
        assert_eq!(code, back);
    }
}
