//! EVM token address.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AmmError;

/// A 20-byte EVM address identifying a token.
///
/// Parsed from the usual `0x`-prefixed hex form, case-insensitively, so
/// checksummed and lower-case spellings of the same address compare equal.
/// Displayed in lower-case hex.
///
/// # Examples
///
/// ```
/// use hydra_quote::domain::TokenAddress;
///
/// let Ok(a) = "0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2".parse::<TokenAddress>() else {
///     unreachable!();
/// };
/// assert_eq!(a.to_string(), "0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TokenAddress([u8; 20]);

impl TokenAddress {
    /// Creates a `TokenAddress` from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Returns the underlying 20-byte representation.
    #[must_use]
    pub const fn as_bytes(&self) -> [u8; 20] {
        self.0
    }

    /// Returns the all-zero address.
    #[must_use]
    pub const fn zero() -> Self {
        Self([0u8; 20])
    }
}

impl FromStr for TokenAddress {
    type Err = AmmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        if hex.len() != 40 || !hex.is_ascii() {
            return Err(AmmError::InvalidToken("address must be 20 hex-encoded bytes"));
        }

        let mut bytes = [0u8; 20];
        for (byte, chunk) in bytes.iter_mut().zip(hex.as_bytes().chunks(2)) {
            let pair = core::str::from_utf8(chunk)
                .map_err(|_| AmmError::InvalidToken("address must be 20 hex-encoded bytes"))?;
            *byte = u8::from_str_radix(pair, 16)
                .map_err(|_| AmmError::InvalidToken("address contains a non-hex digit"))?;
        }
        Ok(Self(bytes))
    }
}

impl TryFrom<String> for TokenAddress {
    type Error = AmmError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TokenAddress> for String {
    fn from(value: TokenAddress) -> Self {
        value.to_string()
    }
}

impl fmt::Display for TokenAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("0x")?;
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}
