//! Fee expressed as a numerator over a precision denominator.

use core::fmt;

use primitive_types::U256;
use serde::Serialize;

use crate::error::AmmError;
use crate::math::{CheckedArithmetic, MathResult, Rounding};

/// A swap fee of `rate / precision`.
///
/// Solidly-style pools store the fee as a small integer over a per-pool
/// precision (for example `3 / 1000` or `1 / 10_000`).
///
/// # Invariants
///
/// - `precision > 0`
/// - `rate <= precision`
///
/// # Examples
///
/// ```
/// use hydra_quote::domain::FeeRate;
/// use primitive_types::U256;
///
/// let Ok(fee) = FeeRate::new(3, 1_000) else { unreachable!() };
/// assert_eq!(fee.fee_on(U256::from(10_000u64)), Ok(U256::from(30u64)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct FeeRate {
    rate: u64,
    precision: u64,
}

impl FeeRate {
    /// Creates a fee rate after validating the invariants.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if `precision` is zero or
    /// `rate` exceeds it.
    pub const fn new(rate: u64, precision: u64) -> Result<Self, AmmError> {
        if precision == 0 {
            return Err(AmmError::InvalidConfiguration(
                "fee precision must be non-zero",
            ));
        }
        if rate > precision {
            return Err(AmmError::InvalidConfiguration(
                "fee rate must not exceed its precision",
            ));
        }
        Ok(Self { rate, precision })
    }

    /// Returns the fee numerator.
    #[must_use]
    pub const fn rate(&self) -> u64 {
        self.rate
    }

    /// Returns the fee denominator.
    #[must_use]
    pub const fn precision(&self) -> u64 {
        self.precision
    }

    /// Returns `floor(amount * rate / precision)`.
    ///
    /// # Errors
    ///
    /// Returns a [`MathError`](crate::math::MathError) if `amount * rate`
    /// overflows 256 bits.
    pub fn fee_on(&self, amount: U256) -> MathResult<U256> {
        amount.safe_mul_div(
            &U256::from(self.rate),
            &U256::from(self.precision),
            Rounding::Down,
        )
    }
}

impl fmt::Display for FeeRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.rate, self.precision)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::math::MathError;

    #[test]
    fn valid_rate() {
        let Ok(fee) = FeeRate::new(3, 1_000) else {
            panic!("expected Ok");
        };
        assert_eq!(fee.rate(), 3);
        assert_eq!(fee.precision(), 1_000);
        assert_eq!(fee.to_string(), "3/1000");
    }

    #[test]
    fn rejects_zero_precision() {
        assert_eq!(
            FeeRate::new(0, 0),
            Err(AmmError::InvalidConfiguration(
                "fee precision must be non-zero"
            ))
        );
    }

    #[test]
    fn rejects_rate_above_precision() {
        assert!(FeeRate::new(1_001, 1_000).is_err());
        assert!(FeeRate::new(1_000, 1_000).is_ok());
    }

    #[test]
    fn fee_rounds_down() {
        let Ok(fee) = FeeRate::new(3, 1_000) else {
            panic!("expected Ok");
        };
        assert_eq!(fee.fee_on(U256::from(999u64)), Ok(U256::from(2u64)));
        assert_eq!(fee.fee_on(U256::zero()), Ok(U256::zero()));
    }

    #[test]
    fn fee_overflow_is_reported() {
        let Ok(fee) = FeeRate::new(3, 1_000) else {
            panic!("expected Ok");
        };
        assert!(matches!(fee.fee_on(U256::MAX), Err(MathError::Overflow(_))));
    }
}
