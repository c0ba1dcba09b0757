//! Explicit rounding direction and rounding-aware integer division.
//!
//! Every division in the engines states its rounding direction.  The
//! replayed contracts are careful about which side of a division favours
//! the pool, and a quote that rounds the other way can be off by one unit,
//! enough to fail on-chain.

use primitive_types::U256;

use super::{MathError, MathResult};

/// Rounding direction for division and fixed-point scaling.
///
/// # Examples
///
/// ```
/// use hydra_quote::math::Rounding;
///
/// assert!(Rounding::Up.is_up());
/// assert!(!Rounding::Down.is_up());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rounding {
    /// Round towards positive infinity (ceiling).
    Up,
    /// Round towards zero (floor).
    Down,
}

impl Rounding {
    /// Returns `true` if this is [`Rounding::Up`].
    #[must_use]
    pub const fn is_up(&self) -> bool {
        matches!(self, Self::Up)
    }
}

/// Divides `numerator` by `denominator` with the given rounding.
///
/// Ceiling division is computed as `floor + (remainder != 0)` so it never
/// overflows, even for `numerator == U256::MAX`.
///
/// # Errors
///
/// Returns [`MathError::DivisionByZero`] if `denominator` is zero.
///
/// # Examples
///
/// ```
/// use hydra_quote::math::{div_round, Rounding};
/// use primitive_types::U256;
///
/// let q = div_round(U256::from(10u64), U256::from(3u64), Rounding::Up);
/// assert_eq!(q, Ok(U256::from(4u64)));
/// ```
pub fn div_round(numerator: U256, denominator: U256, rounding: Rounding) -> MathResult<U256> {
    if denominator.is_zero() {
        return Err(MathError::DivisionByZero("division"));
    }
    let (quotient, remainder) = numerator.div_mod(denominator);
    if rounding.is_up() && !remainder.is_zero() {
        // quotient < U256::MAX whenever the remainder is non-zero
        return Ok(quotient + U256::one());
    }
    Ok(quotient)
}
