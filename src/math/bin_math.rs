//! Bin-id to price conversion for bin-ladder pools.
//!
//! A bin id is a 24-bit unsigned integer whose midpoint `2^23` is the
//! `1.0` price.  Each step away from the midpoint multiplies the price by
//! `1 + bin_step / 10_000`:
//!
//! ```text
//! price(id) = (1 + bin_step / 10_000) ^ (id - 2^23)
//! ```
//!
//! The result is a 128.128 fixed-point value expressing how many units of
//! token Y one unit of token X is worth.
//!
//! # Examples
//!
//! ```
//! use hydra_quote::math::{price_from_id, scale, REAL_ID_SHIFT};
//!
//! let price = price_from_id(REAL_ID_SHIFT, 25);
//! assert_eq!(price, Ok(scale()));
//! ```

use primitive_types::U256;

use super::{fixed_point, CheckedArithmetic};
use crate::error::AmmError;

/// Bin id that maps to the `1.0` price.
pub const REAL_ID_SHIFT: u32 = 1 << 23;

/// Largest valid bin id (ids are 24-bit).
pub const MAX_BIN_ID: u32 = (1 << 24) - 1;

/// Denominator of the bin step.
pub const BASIS_POINT_MAX: u64 = 10_000;

/// Returns the 128.128 price of bin `id` for a pool with `bin_step`.
///
/// # Errors
///
/// Returns [`AmmError::InvalidReserve`] when `id` lies outside the 24-bit
/// id space or its distance from the midpoint is too large for the price
/// to be represented.
pub fn price_from_id(id: u32, bin_step: u16) -> Result<U256, AmmError> {
    if id > MAX_BIN_ID {
        return Err(AmmError::InvalidReserve("bin id outside the 24-bit range"));
    }
    // id <= 2^24 - 1, so the difference always fits in an i32
    let exponent = i64::from(id) - i64::from(REAL_ID_SHIFT);
    let exponent = i32::try_from(exponent)
        .map_err(|_| AmmError::InvalidReserve("bin id outside the 24-bit range"))?;

    let step = (U256::from(bin_step) << fixed_point::SCALE_OFFSET) / U256::from(BASIS_POINT_MAX);
    let base = fixed_point::scale().safe_add(&step)?;

    fixed_point::pow(base, exponent)
        .map_err(|_| AmmError::InvalidReserve("bin id has no representable price"))
}
