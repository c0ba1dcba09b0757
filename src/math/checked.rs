//! Checked 256-bit arithmetic.
//!
//! The [`CheckedArithmetic`] trait provides fallible arithmetic on
//! [`U256`] that returns a [`MathError`] instead of wrapping or
//! panicking.  The replayed contracts revert on the same conditions, so a
//! `MathError` here means "the on-chain call would have reverted".
//!
//! # Examples
//!
//! ```
//! use hydra_quote::math::{CheckedArithmetic, MathError, Rounding};
//! use primitive_types::U256;
//!
//! let a = U256::from(100u64);
//! let b = U256::from(200u64);
//! assert_eq!(a.safe_add(&b), Ok(U256::from(300u64)));
//! assert_eq!(a.safe_sub(&b), Err(MathError::Underflow("subtraction")));
//! assert_eq!(b.safe_div(&a, Rounding::Up), Ok(U256::from(2u64)));
//! ```

use primitive_types::U256;
use thiserror::Error;

use super::Rounding;

/// Result alias for arithmetic helpers.
pub type MathResult<T> = core::result::Result<T, MathError>;

/// A fault detected by a checked arithmetic step.
///
/// The payload names the operation that failed so a fault surfaced to a
/// router still says where it happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum MathError {
    /// The result exceeds the 256-bit domain.
    #[error("overflow in {0}")]
    Overflow(&'static str),
    /// The result would be negative.
    #[error("underflow in {0}")]
    Underflow(&'static str),
    /// The divisor is zero.
    #[error("division by zero in {0}")]
    DivisionByZero(&'static str),
}

/// Fallible arithmetic for the 256-bit working domain.
///
/// # Contract
///
/// - **No panics**: every error condition produces `Err`.
/// - **No wrapping or saturation**: faults propagate to the caller.
pub trait CheckedArithmetic: Sized {
    /// Checked addition.
    ///
    /// # Errors
    ///
    /// Returns [`MathError::Overflow`] if the sum exceeds the domain.
    fn safe_add(&self, other: &Self) -> MathResult<Self>;

    /// Checked subtraction.
    ///
    /// # Errors
    ///
    /// Returns [`MathError::Underflow`] if `other > self`.
    fn safe_sub(&self, other: &Self) -> MathResult<Self>;

    /// Checked multiplication.
    ///
    /// # Errors
    ///
    /// Returns [`MathError::Overflow`] if the product exceeds the domain.
    fn safe_mul(&self, other: &Self) -> MathResult<Self>;

    /// Checked division with an explicit [`Rounding`] direction.
    ///
    /// # Errors
    ///
    /// Returns [`MathError::DivisionByZero`] if `other` is zero.
    fn safe_div(&self, other: &Self, rounding: Rounding) -> MathResult<Self>;

    /// Checked `self * mul / div` with a single rounding step.
    ///
    /// # Errors
    ///
    /// Returns [`MathError::Overflow`] if the intermediate product
    /// overflows, or [`MathError::DivisionByZero`] if `div` is zero.
    fn safe_mul_div(&self, mul: &Self, div: &Self, rounding: Rounding) -> MathResult<Self> {
        self.safe_mul(mul)?.safe_div(div, rounding)
    }
}

impl CheckedArithmetic for U256 {
    #[inline]
    fn safe_add(&self, other: &Self) -> MathResult<Self> {
        self.checked_add(*other)
            .ok_or(MathError::Overflow("addition"))
    }

    #[inline]
    fn safe_sub(&self, other: &Self) -> MathResult<Self> {
        self.checked_sub(*other)
            .ok_or(MathError::Underflow("subtraction"))
    }

    #[inline]
    fn safe_mul(&self, other: &Self) -> MathResult<Self> {
        self.checked_mul(*other)
            .ok_or(MathError::Overflow("multiplication"))
    }

    fn safe_div(&self, other: &Self, rounding: Rounding) -> MathResult<Self> {
        super::div_round(*self, *other, rounding)
    }
}
