//! Conversions between interface amounts and the 256-bit working domain.
//!
//! Amounts cross the public API as arbitrary-precision [`BigUint`] values and
//! reach the snapshot as decimal strings.  The engines compute on [`U256`],
//! so every amount is narrowed once on entry and widened once on exit.

use num_bigint::BigUint;
use num_traits::Num;
use primitive_types::U256;

use crate::error::AmmError;

/// Narrows `value` into the 256-bit domain, or `None` if it does not fit.
#[must_use]
pub fn to_u256(value: &BigUint) -> Option<U256> {
    let bytes = value.to_bytes_be();
    if bytes.len() > 32 {
        return None;
    }
    Some(U256::from_big_endian(&bytes))
}

/// Widens a 256-bit value into an arbitrary-precision integer.
#[must_use]
pub fn to_biguint(value: U256) -> BigUint {
    let mut bytes = [0u8; 32];
    value.to_big_endian(&mut bytes);
    BigUint::from_bytes_be(&bytes)
}

/// Narrows a caller-supplied swap amount.
///
/// # Errors
///
/// Returns [`AmmError::InvalidAmount`] if `value` exceeds 256 bits.
pub fn amount_to_u256(value: &BigUint) -> Result<U256, AmmError> {
    to_u256(value).ok_or(AmmError::InvalidAmount("amount exceeds 256 bits"))
}

/// Narrows a snapshot reserve.
///
/// # Errors
///
/// Returns [`AmmError::InvalidReserve`] if `value` exceeds 256 bits.
pub fn reserve_to_u256(value: &BigUint) -> Result<U256, AmmError> {
    to_u256(value).ok_or(AmmError::InvalidReserve("reserve exceeds 256 bits"))
}

/// Parses a decimal-string integer as found in pool snapshots.
///
/// # Errors
///
/// Returns [`AmmError::InvalidReserve`] if the string is not a non-negative
/// base-10 integer.
pub fn parse_decimal(value: &str) -> Result<BigUint, AmmError> {
    if value.is_empty() {
        return Ok(BigUint::default());
    }
    BigUint::from_str_radix(value, 10)
        .map_err(|_| AmmError::InvalidReserve("reserve is not a decimal integer"))
}

/// Serde adapter for [`BigUint`] fields encoded as decimal strings.
pub mod decimal_string {
    use num_bigint::BigUint;
    use serde::{de, Deserialize, Deserializer, Serializer};

    /// Serializes a [`BigUint`] as a decimal string.
    ///
    /// # Errors
    ///
    /// Propagates the serializer's error.
    pub fn serialize<S: Serializer>(value: &BigUint, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    /// Deserializes a [`BigUint`] from a decimal string.
    ///
    /// # Errors
    ///
    /// Fails if the string is not a non-negative base-10 integer.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BigUint, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_decimal(&raw).map_err(de::Error::custom)
    }
}
