//! Token decimal places.

use primitive_types::U256;

use crate::error::AmmError;

/// Maximum accepted decimal places.
const MAX_DECIMALS: u8 = 36;

/// The number of decimal places of a token.
///
/// Valid range is `0..=36`.  Stable-swap math normalises every balance to
/// 18 decimals through [`factor`](Self::factor), so `10^decimals` must stay
/// well inside 256 bits when multiplied by `1e18`.
///
/// # Examples
///
/// ```
/// use hydra_quote::domain::Decimals;
/// use primitive_types::U256;
///
/// let Ok(d) = Decimals::new(6) else { unreachable!() };
/// assert_eq!(d.factor(), U256::from(1_000_000u64));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Decimals(u8);

impl Default for Decimals {
    fn default() -> Self {
        Self::EIGHTEEN
    }
}

impl Decimals {
    /// Zero decimal places.
    pub const ZERO: Self = Self(0);

    /// The EVM convention of 18 decimal places.
    pub const EIGHTEEN: Self = Self(18);

    /// Creates a new `Decimals` value after validating the range.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if `value` exceeds 36.
    pub const fn new(value: u8) -> Result<Self, AmmError> {
        if value > MAX_DECIMALS {
            return Err(AmmError::InvalidConfiguration("decimals must be 0..=36"));
        }
        Ok(Self(value))
    }

    /// Returns the raw decimal count.
    #[must_use]
    pub const fn get(&self) -> u8 {
        self.0
    }

    /// Returns `10^decimals`.
    #[must_use]
    pub fn factor(&self) -> U256 {
        U256::exp10(usize::from(self.0))
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn valid_bounds() {
        let (Ok(zero), Ok(max)) = (Decimals::new(0), Decimals::new(36)) else {
            panic!("expected Ok");
        };
        assert_eq!(zero.get(), 0);
        assert_eq!(max.get(), 36);
    }

    #[test]
    fn rejects_above_max() {
        let Err(e) = Decimals::new(37) else {
            panic!("expected Err");
        };
        assert_eq!(e, AmmError::InvalidConfiguration("decimals must be 0..=36"));
    }

    #[test]
    fn default_is_eighteen() {
        assert_eq!(Decimals::default(), Decimals::EIGHTEEN);
    }

    #[test]
    fn factor() {
        assert_eq!(Decimals::ZERO.factor(), U256::one());
        assert_eq!(
            Decimals::EIGHTEEN.factor(),
            U256::from(1_000_000_000_000_000_000u64)
        );
    }
}
