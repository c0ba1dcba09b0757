//! 128.128 binary fixed-point helpers used by the bin-ladder engine.
//!
//! Prices are unsigned 256-bit integers carrying 128 fractional bits, so
//! `1.0` is `2^128`.  Multiplying or dividing an amount by a price needs a
//! 512-bit intermediate; the helpers below compute it with [`U512`] and
//! narrow back to [`U256`], reporting a [`MathError`] where the contract
//! would revert.

use primitive_types::{U256, U512};

use super::{MathError, MathResult, Rounding};

/// Number of fractional bits in a 128.128 price.
pub const SCALE_OFFSET: usize = 128;

/// Largest exponent magnitude accepted by [`pow`] (exclusive).
const MAX_POW_EXPONENT: u32 = 0x10_0000;

/// Returns `1.0` in 128.128 fixed point.
#[must_use]
pub fn scale() -> U256 {
    U256::one() << SCALE_OFFSET
}

fn fractional_mask() -> U512 {
    (U512::one() << SCALE_OFFSET) - U512::one()
}

fn narrow(value: U512, op: &'static str) -> MathResult<U256> {
    U256::try_from(value).map_err(|_| MathError::Overflow(op))
}

/// Computes `x * y >> 128` over a 512-bit intermediate.
///
/// With [`Rounding::Up`] the result is incremented when any of the
/// discarded low bits is set.
///
/// # Errors
///
/// Returns [`MathError::Overflow`] if the shifted product does not fit in
/// 256 bits.
pub fn mul_shift(x: U256, y: U256, rounding: Rounding) -> MathResult<U256> {
    let product = x.full_mul(y);
    let result = narrow(product >> SCALE_OFFSET, "mul_shift")?;
    if rounding.is_up() && !(product & fractional_mask()).is_zero() {
        return result
            .checked_add(U256::one())
            .ok_or(MathError::Overflow("mul_shift"));
    }
    Ok(result)
}

/// Computes `(x << 128) / denominator` over a 512-bit intermediate.
///
/// With [`Rounding::Up`] the result is incremented when the division
/// leaves a remainder.
///
/// # Errors
///
/// - [`MathError::DivisionByZero`] if `denominator` is zero.
/// - [`MathError::Overflow`] if the quotient does not fit in 256 bits.
pub fn shift_div(x: U256, denominator: U256, rounding: Rounding) -> MathResult<U256> {
    if denominator.is_zero() {
        return Err(MathError::DivisionByZero("shift_div"));
    }
    let numerator = U512::from(x) << SCALE_OFFSET;
    let (quotient, remainder) = numerator.div_mod(U512::from(denominator));
    let result = narrow(quotient, "shift_div")?;
    if rounding.is_up() && !remainder.is_zero() {
        return result
            .checked_add(U256::one())
            .ok_or(MathError::Overflow("shift_div"));
    }
    Ok(result)
}

/// Raises a 128.128 value to a signed integer power.
///
/// Binary exponentiation over the low 20 exponent bits.  A base above
/// `2^128` is replaced by its reciprocal before squaring so the running
/// square stays within 256 bits, and the result is inverted back at the
/// end when needed.
///
/// # Errors
///
/// Returns [`MathError::Underflow`] if `|exponent| >= 2^20` or the power
/// rounds down to zero.
pub fn pow(base: U256, exponent: i32) -> MathResult<U256> {
    if exponent == 0 {
        return Ok(scale());
    }

    let abs_exponent = exponent.unsigned_abs();
    let mut invert = exponent < 0;
    let mut result = U256::zero();

    if abs_exponent < MAX_POW_EXPONENT {
        result = scale();
        let mut squared = base;
        if base > U256::from(u128::MAX) {
            squared = U256::MAX / base;
            invert = !invert;
        }

        for bit in 0..20 {
            if abs_exponent & (1 << bit) != 0 {
                result = mul_shift(result, squared, Rounding::Down)?;
            }
            squared = mul_shift(squared, squared, Rounding::Down)?;
        }
    }

    if result.is_zero() {
        return Err(MathError::Underflow("pow"));
    }

    Ok(if invert { U256::MAX / result } else { result })
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn dec(s: &str) -> U256 {
        let Ok(v) = U256::from_dec_str(s) else {
            panic!("valid decimal literal");
        };
        v
    }

    #[test]
    fn mul_shift_by_one_is_identity() {
        let x = U256::from(123_456_789u64);
        assert_eq!(mul_shift(x, scale(), Rounding::Down), Ok(x));
        assert_eq!(mul_shift(x, scale(), Rounding::Up), Ok(x));
    }

    #[test]
    fn mul_shift_rounds_fraction() {
        // 3 * 0.5 = 1.5
        let half = scale() >> 1;
        let three = U256::from(3u64);
        assert_eq!(mul_shift(three, half, Rounding::Down), Ok(U256::one()));
        assert_eq!(mul_shift(three, half, Rounding::Up), Ok(U256::from(2u64)));
    }

    #[test]
    fn shift_div_rounds_fraction() {
        // 3 / 2.0 = 1.5
        let two = scale() << 1;
        let three = U256::from(3u64);
        assert_eq!(shift_div(three, two, Rounding::Down), Ok(U256::one()));
        assert_eq!(shift_div(three, two, Rounding::Up), Ok(U256::from(2u64)));
    }

    #[test]
    fn shift_div_zero_denominator() {
        assert!(matches!(
            shift_div(U256::one(), U256::zero(), Rounding::Down),
            Err(MathError::DivisionByZero(_))
        ));
    }

    #[test]
    fn shift_div_overflow() {
        assert!(matches!(
            shift_div(U256::MAX, U256::one(), Rounding::Down),
            Err(MathError::Overflow(_))
        ));
    }

    #[test]
    fn pow_zero_exponent_is_one() {
        assert_eq!(pow(dec("999999"), 0), Ok(scale()));
    }

    #[test]
    fn pow_of_one_is_one() {
        assert_eq!(pow(scale(), 1_000), Ok(scale()));
    }

    #[test]
    fn pow_matches_reference_values() {
        // base for a 25 bp step: 2^128 + (25 << 128) / 10_000
        let base = scale() + (U256::from(25u64) << SCALE_OFFSET) / U256::from(10_000u64);
        assert_eq!(
            pow(base, 1),
            Ok(dec("341133072838240809622033043950347631984"))
        );
        assert_eq!(
            pow(base, -1),
            Ok(dec("339433782464776522157979658286053078759"))
        );
        assert_eq!(
            pow(base, 100),
            Ok(dec("436794915378552100798054128165989473614"))
        );
        assert_eq!(
            pow(base, -100),
            Ok(dec("265094865257220261526334763469518204397"))
        );
    }

    #[test]
    fn pow_rejects_oversized_exponent() {
        let base = scale() + U256::one();
        assert!(matches!(
            pow(base, 0x10_0000),
            Err(MathError::Underflow(_))
        ));
    }
}
