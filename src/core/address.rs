//! Address - EIP-55 checksummed Ethereum addresses
//!
//! Wallets hand back addresses in whatever case they like. Everything the
//! connector persists or signs for goes through [`Address::checksummed`] so a
//! persisted record and a live session always compare equal.
//!
//! # Example
//!
//! ```
//! use hubconnect::Address;
//!
//! let address = Address::checksummed("0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed").unwrap();
//! assert_eq!(address.as_str(), "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed");
//! ```

use crate::error::{ConnectorError, ConnectorResult};
use serde::{Deserialize, Serialize};
use sha3::{Digest, Keccak256};
use std::fmt;

/// A 20-byte account address rendered in EIP-55 mixed case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(String);

impl Address {
    /// Validate a hex address (with or without `0x`) and apply the checksum.
    pub fn checksummed(raw: &str) -> ConnectorResult<Self> {
        let trimmed = raw.trim();
        let body = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);

        if body.len() != 40 {
            return Err(ConnectorError::InvalidAddress(format!(
                "expected 40 hex chars, got {}",
                body.len()
            )));
        }
        hex::decode(body).map_err(|e| ConnectorError::InvalidAddress(e.to_string()))?;

        let lower = body.to_ascii_lowercase();
        let hash = Keccak256::digest(lower.as_bytes());

        let mut out = String::with_capacity(42);
        out.push_str("0x");
        for (i, c) in lower.chars().enumerate() {
            // high nibble for even positions, low nibble for odd
            let byte = hash[i / 2];
            let nibble = if i % 2 == 0 { byte >> 4 } else { byte & 0x0f };
            if c.is_ascii_alphabetic() && nibble >= 8 {
                out.push(c.to_ascii_uppercase());
            } else {
                out.push(c);
            }
        }
        Ok(Self(out))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Address {
    type Error = ConnectorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Address::checksummed(&value)
    }
}

impl From<Address> for String {
    fn from(address: Address) -> Self {
        address.0
    }
}

impl AsRef<str> for Address {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Reference vectors from EIP-55
    const VECTORS: &[&str] = &[
        "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed",
        "0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359",
        "0xdbF03B407c01E7cD3CBea99509d93f8DDDC8C6FB",
        "0xD1220A0cf47c7B9Be7A2E6BA89F429762e7b9aDb",
    ];

    #[test]
    fn test_checksum_reference_vectors() {
        for expected in VECTORS {
            let lower = expected.to_ascii_lowercase();
            let address = Address::checksummed(&lower).expect("valid address");
            assert_eq!(address.as_str(), *expected);
        }
    }

    #[test]
    fn test_checksum_is_idempotent() {
        let once = Address::checksummed(VECTORS[0]).unwrap();
        let twice = Address::checksummed(once.as_str()).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_accepts_missing_prefix() {
        let address = Address::checksummed("fb6916095ca1df60bb79ce92ce3ea74c37c5d359").unwrap();
        assert_eq!(address.as_str(), VECTORS[1]);
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(Address::checksummed("0x1234").is_err());
        assert!(Address::checksummed("0xzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzz").is_err());
        assert!(Address::checksummed("").is_err());
    }

    #[test]
    fn test_serde_checksums_on_read() {
        let address: Address =
            serde_json::from_str("\"0xd1220a0cf47c7b9be7a2e6ba89f429762e7b9adb\"").unwrap();
        assert_eq!(address.as_str(), VECTORS[3]);
        assert_eq!(serde_json::to_string(&address).unwrap(), format!("\"{}\"", VECTORS[3]));
    }
}
