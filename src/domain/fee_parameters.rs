//! Bin-ladder fee parameters and the dynamic fee they produce.
//!
//! The fee charged by a bin-ladder pool has two parts:
//!
//! ```text
//! base_fee     = base_factor * bin_step * 1e10
//! variable_fee = ceil((volatility_accumulated * bin_step)^2 * variable_fee_control / 100)
//! total_fee    = base_fee + variable_fee          (over 1e18)
//! ```
//!
//! The volatility accumulator grows with the number of bins the price
//! crosses and decays over time, so the variable part rises during
//! volatile periods.  Updating it is an explicit transition on a value the
//! caller owns: quotes work on a copy and never touch shared state.

use primitive_types::U256;
use serde::{Deserialize, Serialize};

use super::BasisPoints;
use crate::math::{CheckedArithmetic, MathResult, Rounding, BASIS_POINT_MAX};

/// Fixed-point precision of fees (`1e18` = 100%).
pub const FEE_PRECISION: u64 = 1_000_000_000_000_000_000;

/// Scales `base_factor * bin_step` (both basis-point quantities) to `1e18`.
const BASE_FEE_SCALE: u64 = 10_000_000_000;

/// Static and dynamic fee state of a bin-ladder pool.
///
/// Field names follow the on-chain struct so snapshots decode directly.
/// The static factors are required; the volatility state defaults to a
/// fresh pool's zeros.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeParameters {
    /// Multiplier of the base fee, in basis points of the bin step.
    pub base_factor: u16,
    /// Seconds during which the volatility reference is frozen.
    pub filter_period: u16,
    /// Seconds after which the volatility reference resets to zero.
    pub decay_period: u16,
    /// Share of the accumulator kept as reference after the filter period.
    pub reduction_factor: BasisPoints,
    /// Multiplier of the variable fee.
    pub variable_fee_control: u32,
    /// Protocol's share of the total fee.
    pub protocol_share: BasisPoints,
    /// Upper bound of the volatility accumulator.
    pub max_volatility_accumulated: u32,
    /// Current volatility accumulator.
    #[serde(default)]
    pub volatility_accumulated: u32,
    /// Accumulator value the current period started from.
    #[serde(default)]
    pub volatility_reference: u32,
    /// Bin id the current period started from.
    #[serde(default)]
    pub index_ref: u32,
    /// Timestamp of the last update, in seconds.
    #[serde(default)]
    pub time: u64,
}

impl FeeParameters {
    /// Returns the base fee over `1e18`.
    #[must_use]
    pub fn base_fee(&self, bin_step: u16) -> U256 {
        U256::from(self.base_factor) * U256::from(bin_step) * U256::from(BASE_FEE_SCALE)
    }

    /// Returns the variable fee over `1e18`, rounded up.
    #[must_use]
    pub fn variable_fee(&self, bin_step: u16) -> U256 {
        if self.variable_fee_control == 0 {
            return U256::zero();
        }
        // < 2^40 and squared < 2^80, far below 256 bits
        let prod = U256::from(self.volatility_accumulated) * U256::from(bin_step);
        (prod * prod * U256::from(self.variable_fee_control) + U256::from(99u8))
            / U256::from(100u8)
    }

    /// Returns the total fee over `1e18`.
    #[must_use]
    pub fn total_fee(&self, bin_step: u16) -> U256 {
        self.base_fee(bin_step) + self.variable_fee(bin_step)
    }

    /// Fee to add on top of a net `amount` so that the fee is `total_fee`
    /// of the gross amount: `ceil(amount * fee / (1e18 - fee))`.
    ///
    /// # Errors
    ///
    /// Returns a [`MathError`](crate::math::MathError) if the fee exceeds
    /// 100% or the product overflows.
    pub fn fee_amount(&self, amount: U256, bin_step: u16) -> MathResult<U256> {
        let fee = self.total_fee(bin_step);
        let denominator = U256::from(FEE_PRECISION).safe_sub(&fee)?;
        amount.safe_mul_div(&fee, &denominator, Rounding::Up)
    }

    /// Fee contained in a gross `amount`: `ceil(amount * fee / 1e18)`.
    ///
    /// # Errors
    ///
    /// Returns a [`MathError`](crate::math::MathError) if the product
    /// overflows.
    pub fn fee_amount_from(&self, amount: U256, bin_step: u16) -> MathResult<U256> {
        let fee = self.total_fee(bin_step);
        amount.safe_mul_div(&fee, &U256::from(FEE_PRECISION), Rounding::Up)
    }

    /// Splits `total_fee` into `(total, protocol share)`.
    ///
    /// # Errors
    ///
    /// Returns a [`MathError`](crate::math::MathError) if the product
    /// overflows.
    pub fn fee_distribution(&self, total_fee: U256) -> MathResult<(U256, U256)> {
        let protocol = self.protocol_share.apply(total_fee, Rounding::Down)?;
        Ok((total_fee, protocol))
    }

    /// Moves the accumulator to reflect a swap reaching `active_id`:
    /// `min(|active_id - index_ref| * 10_000 + volatility_reference, max)`.
    pub fn update_volatility_accumulated(&mut self, active_id: u32) {
        let delta = u64::from(active_id.abs_diff(self.index_ref));
        let accumulated = delta * BASIS_POINT_MAX + u64::from(self.volatility_reference);
        let capped = accumulated.min(u64::from(self.max_volatility_accumulated));
        // capped <= max_volatility_accumulated, a u32
        self.volatility_accumulated = u32::try_from(capped).unwrap_or(u32::MAX);
    }

    /// Starts a new swap at `active_id` and `timestamp`.
    ///
    /// Once the filter period has elapsed since the last update (or on the
    /// first swap) the reference index moves to `active_id` and the
    /// volatility reference decays: reduced by the reduction factor inside
    /// the decay period, reset to zero after it.  The accumulator is then
    /// recomputed for `active_id`.
    pub fn update_variable_fee_parameters(&mut self, active_id: u32, timestamp: u64) {
        let elapsed = timestamp.saturating_sub(self.time);

        if elapsed >= u64::from(self.filter_period) || self.time == 0 {
            self.index_ref = active_id;
            self.volatility_reference = if elapsed < u64::from(self.decay_period) {
                let reduced = u64::from(self.reduction_factor.get())
                    * u64::from(self.volatility_accumulated)
                    / BASIS_POINT_MAX;
                // reduction_factor <= 10_000 keeps this within u32
                u32::try_from(reduced).unwrap_or(u32::MAX)
            } else {
                0
            };
        }

        self.time = timestamp;
        self.update_volatility_accumulated(active_id);
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::math::MathError;

    const STEP: u16 = 25;

    fn params() -> FeeParameters {
        FeeParameters {
            base_factor: 5_000,
            filter_period: 30,
            decay_period: 600,
            reduction_factor: BasisPoints::new(5_000),
            variable_fee_control: 40_000,
            protocol_share: BasisPoints::new(1_000),
            max_volatility_accumulated: 350_000,
            ..FeeParameters::default()
        }
    }

    // -- fee rates ----------------------------------------------------------

    #[test]
    fn base_fee() {
        assert_eq!(
            params().base_fee(STEP),
            U256::from(1_250_000_000_000_000u64)
        );
    }

    #[test]
    fn variable_fee_is_zero_without_volatility() {
        assert_eq!(params().variable_fee(STEP), U256::zero());
    }

    #[test]
    fn variable_fee_with_volatility() {
        let fp = FeeParameters {
            volatility_accumulated: 30_000,
            ..params()
        };
        assert_eq!(fp.variable_fee(STEP), U256::from(225_000_000_000_000u64));
        assert_eq!(fp.total_fee(STEP), U256::from(1_475_000_000_000_000u64));
    }

    #[test]
    fn variable_fee_disabled_by_zero_control() {
        let fp = FeeParameters {
            volatility_accumulated: 30_000,
            variable_fee_control: 0,
            ..params()
        };
        assert_eq!(fp.variable_fee(STEP), U256::zero());
    }

    // -- fee amounts --------------------------------------------------------

    #[test]
    fn fee_amount_rounds_up() {
        assert_eq!(params().fee_amount(U256::from(100u64), STEP), Ok(U256::one()));
        assert_eq!(params().fee_amount(U256::zero(), STEP), Ok(U256::zero()));
    }

    #[test]
    fn fee_amount_from_gross() {
        let amount = U256::from(100_000_000_000_000_000u64);
        assert_eq!(
            params().fee_amount_from(amount, STEP),
            Ok(U256::from(125_000_000_000_000u64))
        );
    }

    #[test]
    fn fee_amount_adds_on_top_of_net() {
        // net + fee_amount(net) carries exactly the fee rate of the gross
        let net = U256::from(99_875_000_000_000_000u64);
        assert_eq!(
            params().fee_amount(net, STEP),
            Ok(U256::from(125_000_000_000_000u64))
        );
    }

    #[test]
    fn fee_above_precision_faults() {
        let fp = FeeParameters {
            base_factor: u16::MAX,
            ..params()
        };
        // 65535 * 65535 * 1e10 > 1e18
        assert!(matches!(
            fp.fee_amount(U256::one(), u16::MAX),
            Err(MathError::Underflow(_))
        ));
    }

    #[test]
    fn distribution() {
        assert_eq!(
            params().fee_distribution(U256::from(125_000_000_000_000u64)),
            Ok((
                U256::from(125_000_000_000_000u64),
                U256::from(12_500_000_000_000u64)
            ))
        );
    }

    // -- volatility ---------------------------------------------------------

    #[test]
    fn accumulator_tracks_distance_from_reference() {
        let mut fp = FeeParameters {
            index_ref: 1_000,
            volatility_reference: 5_000,
            ..params()
        };
        fp.update_volatility_accumulated(1_003);
        assert_eq!(fp.volatility_accumulated, 35_000);
        fp.update_volatility_accumulated(997);
        assert_eq!(fp.volatility_accumulated, 35_000);
    }

    #[test]
    fn accumulator_is_capped() {
        let mut fp = FeeParameters {
            index_ref: 0,
            ..params()
        };
        fp.update_volatility_accumulated(1_000);
        assert_eq!(fp.volatility_accumulated, 350_000);
    }

    #[test]
    fn first_swap_sets_reference() {
        let mut fp = params();
        fp.update_variable_fee_parameters(8_388_608, 1_700_000_000);
        assert_eq!(fp.index_ref, 8_388_608);
        assert_eq!(fp.time, 1_700_000_000);
        assert_eq!(fp.volatility_reference, 0);
        assert_eq!(fp.volatility_accumulated, 0);
    }

    #[test]
    fn within_filter_period_keeps_reference() {
        let mut fp = FeeParameters {
            index_ref: 100,
            volatility_accumulated: 20_000,
            volatility_reference: 10_000,
            time: 1_000,
            ..params()
        };
        fp.update_variable_fee_parameters(102, 1_010);
        assert_eq!(fp.index_ref, 100);
        assert_eq!(fp.volatility_reference, 10_000);
        assert_eq!(fp.volatility_accumulated, 30_000);
        assert_eq!(fp.time, 1_010);
    }

    #[test]
    fn inside_decay_period_reduces_reference() {
        let mut fp = FeeParameters {
            index_ref: 100,
            volatility_accumulated: 20_000,
            time: 1_000,
            ..params()
        };
        fp.update_variable_fee_parameters(101, 1_100);
        assert_eq!(fp.index_ref, 101);
        assert_eq!(fp.volatility_reference, 10_000);
        assert_eq!(fp.volatility_accumulated, 10_000);
    }

    #[test]
    fn after_decay_period_resets_reference() {
        let mut fp = FeeParameters {
            index_ref: 100,
            volatility_accumulated: 20_000,
            volatility_reference: 10_000,
            time: 1_000,
            ..params()
        };
        fp.update_variable_fee_parameters(101, 5_000);
        assert_eq!(fp.volatility_reference, 0);
        assert_eq!(fp.volatility_accumulated, 0);
    }

    #[test]
    fn decodes_snapshot_field_names() {
        let json = r#"{"baseFactor":5000,"filterPeriod":30,"decayPeriod":600,
            "reductionFactor":5000,"variableFeeControl":40000,"protocolShare":1000,
            "maxVolatilityAccumulated":350000,"volatilityAccumulated":0,
            "volatilityReference":0,"indexRef":0,"time":0}"#;
        let Ok(fp) = serde_json::from_str::<FeeParameters>(json) else {
            panic!("expected Ok");
        };
        assert_eq!(fp, params());
    }

    #[test]
    fn decodes_without_volatility_state() {
        let json = r#"{"baseFactor":5000,"filterPeriod":30,"decayPeriod":600,
            "reductionFactor":5000,"variableFeeControl":40000,"protocolShare":1000,
            "maxVolatilityAccumulated":350000}"#;
        let Ok(fp) = serde_json::from_str::<FeeParameters>(json) else {
            panic!("expected Ok");
        };
        assert_eq!(fp.volatility_accumulated, 0);
        assert_eq!(fp.time, 0);
        assert_eq!(fp.max_volatility_accumulated, 350_000);
    }

    #[test]
    fn rejects_missing_static_factors() {
        let full = r#"{"baseFactor":5000,"filterPeriod":30,"decayPeriod":600,"reductionFactor":5000,"variableFeeControl":40000,"protocolShare":1000,"maxVolatilityAccumulated":350000}"#;
        assert!(serde_json::from_str::<FeeParameters>("{}").is_err());
        // misspelled key
        let typo = full.replace("variableFeeControl", "variableFeeCtrl");
        assert!(serde_json::from_str::<FeeParameters>(&typo).is_err());
        let no_max = full.replace(r#","maxVolatilityAccumulated":350000"#, "");
        assert!(serde_json::from_str::<FeeParameters>(&no_max).is_err());
    }
}
