//! Basis-point representation for percentages.

use core::fmt;

use primitive_types::U256;
use serde::{Deserialize, Serialize};

use crate::math::{CheckedArithmetic, MathResult, Rounding, BASIS_POINT_MAX};

/// A percentage expressed in basis points (1 bp = 0.01%, 10 000 bp = 100%).
///
/// Bin-ladder pools use basis points for the protocol's share of fees and
/// for the volatility reduction factor.
///
/// # Examples
///
/// ```
/// use hydra_quote::domain::BasisPoints;
/// use hydra_quote::math::Rounding;
/// use primitive_types::U256;
///
/// let share = BasisPoints::new(1_000); // 10%
/// assert_eq!(share.apply(U256::from(125u64), Rounding::Down), Ok(U256::from(12u64)));
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct BasisPoints(u16);

impl BasisPoints {
    /// Zero basis points (0%).
    pub const ZERO: Self = Self(0);

    /// 100% expressed in basis points.
    pub const MAX_PERCENT: Self = Self(10_000);

    /// Creates a new `BasisPoints` from a raw value.
    #[must_use]
    pub const fn new(value: u16) -> Self {
        Self(value)
    }

    /// Returns the underlying value.
    #[must_use]
    pub const fn get(&self) -> u16 {
        self.0
    }

    /// Returns `true` if the value is in the valid percentage range (`0..=10_000`).
    #[must_use]
    pub const fn is_valid_percent(&self) -> bool {
        self.0 <= Self::MAX_PERCENT.0
    }

    /// Computes `amount * self / 10_000` with explicit rounding.
    ///
    /// # Errors
    ///
    /// Returns a [`MathError`](crate::math::MathError) if the intermediate
    /// product overflows 256 bits.
    pub fn apply(&self, amount: U256, rounding: Rounding) -> MathResult<U256> {
        amount.safe_mul_div(
            &U256::from(self.0),
            &U256::from(BASIS_POINT_MAX),
            rounding,
        )
    }
}

impl fmt::Display for BasisPoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}bp", self.0)
    }
}
