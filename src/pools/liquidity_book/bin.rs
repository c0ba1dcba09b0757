//! A single price bin and the one-bin swap step.
//!
//! # Step Algorithm
//!
//! 1. `price = price_from_id(id, bin_step)` (128.128).
//! 2. `max_in` is the input that drains the output reserve, rounded up:
//!    `reserve_y / price` when swapping X for Y, `reserve_x · price`
//!    otherwise.
//! 3. The volatility accumulator moves to this bin's id.
//! 4. If `max_in + fee_amount(max_in) ≤ amount_in` the bin is drained.
//! 5. Otherwise the fee is taken out of `amount_in` and the remainder is
//!    converted at `price`, rounded down and clamped to the reserve.
//!
//! The step assumes the bin holds liquidity on the output side; skipping
//! empty bins is up to the caller.

use primitive_types::U256;

use crate::domain::FeeParameters;
use crate::error::AmmError;
use crate::math::{mul_shift, price_from_id, shift_div, CheckedArithmetic, MathResult, Rounding};

/// Reserves held by one bin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bin {
    /// Bin id.
    pub id: u32,
    /// Token X held by the bin.
    pub reserve_x: U256,
    /// Token Y held by the bin.
    pub reserve_y: U256,
}

/// Per-bin reserve movement produced by a swap step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BinReserveDelta {
    /// Bin id the delta applies to.
    pub bin_id: u32,
    /// Token X added to the bin.
    pub amount_x_in: U256,
    /// Token X removed from the bin.
    pub amount_x_out: U256,
    /// Token Y added to the bin.
    pub amount_y_in: U256,
    /// Token Y removed from the bin.
    pub amount_y_out: U256,
}

/// Outcome of swapping against one bin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BinSwapStep {
    /// Input absorbed by the bin, net of fee.
    pub amount_in: U256,
    /// Output paid by the bin.
    pub amount_out: U256,
    /// Total fee charged on top of `amount_in`.
    pub fee: U256,
    /// Protocol's share of `fee`.
    pub protocol_fee: U256,
    /// Reserve movement to apply to the bin.
    pub delta: BinReserveDelta,
}

impl Bin {
    /// Creates a bin.
    #[must_use]
    pub const fn new(id: u32, reserve_x: U256, reserve_y: U256) -> Self {
        Self {
            id,
            reserve_x,
            reserve_y,
        }
    }

    /// Reserve paid out by a swap in the given direction.
    #[must_use]
    pub const fn reserve_out(&self, swap_for_y: bool) -> U256 {
        if swap_for_y {
            self.reserve_y
        } else {
            self.reserve_x
        }
    }

    /// Returns `true` if the bin has nothing to pay out in this direction.
    #[must_use]
    pub fn is_empty_for_swap(&self, swap_for_y: bool) -> bool {
        self.reserve_out(swap_for_y).is_zero()
    }

    /// Swaps up to `amount_in` (gross of fee) against this bin.
    ///
    /// `fee_parameters` is the caller's copy of the pool's fee state; its
    /// volatility accumulator is moved to this bin as part of the step.
    ///
    /// A zero `amount_in` yields a zero step.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidReserve`] if the bin id has no price.
    /// - [`AmmError::ArithmeticFault`] if a fixed-point step overflows or
    ///   the fee rate reaches 100%.
    pub fn swap_step(
        &self,
        fee_parameters: &mut FeeParameters,
        bin_step: u16,
        swap_for_y: bool,
        amount_in: U256,
    ) -> Result<BinSwapStep, AmmError> {
        let price = price_from_id(self.id, bin_step)?;
        let reserve_out = self.reserve_out(swap_for_y);

        let max_amount_in = if swap_for_y {
            shift_div(reserve_out, price, Rounding::Up)?
        } else {
            mul_shift(reserve_out, price, Rounding::Up)?
        };

        fee_parameters.update_volatility_accumulated(self.id);

        let max_fee = fee_parameters.fee_amount(max_amount_in, bin_step)?;
        let (amount_in_to_bin, amount_out, fee) = if max_amount_in.safe_add(&max_fee)? <= amount_in
        {
            (max_amount_in, reserve_out, max_fee)
        } else {
            let fee = fee_parameters.fee_amount_from(amount_in, bin_step)?;
            let amount_in_to_bin = amount_in.safe_sub(&fee)?;
            let amount_out = if swap_for_y {
                mul_shift(amount_in_to_bin, price, Rounding::Down)?
            } else {
                shift_div(amount_in_to_bin, price, Rounding::Down)?
            };
            (amount_in_to_bin, amount_out.min(reserve_out), fee)
        };

        let (fee, protocol_fee) = fee_parameters.fee_distribution(fee)?;

        Ok(BinSwapStep {
            amount_in: amount_in_to_bin,
            amount_out,
            fee,
            protocol_fee,
            delta: self.delta(swap_for_y, amount_in_to_bin, amount_out),
        })
    }

    /// Returns the bin after applying `delta`.
    ///
    /// # Errors
    ///
    /// Returns a [`MathError`](crate::math::MathError) if a reserve would
    /// overflow or go negative.
    pub fn apply(&self, delta: &BinReserveDelta) -> MathResult<Self> {
        Ok(Self {
            id: self.id,
            reserve_x: self
                .reserve_x
                .safe_add(&delta.amount_x_in)?
                .safe_sub(&delta.amount_x_out)?,
            reserve_y: self
                .reserve_y
                .safe_add(&delta.amount_y_in)?
                .safe_sub(&delta.amount_y_out)?,
        })
    }

    fn delta(&self, swap_for_y: bool, amount_in: U256, amount_out: U256) -> BinReserveDelta {
        if swap_for_y {
            BinReserveDelta {
                bin_id: self.id,
                amount_x_in: amount_in,
                amount_y_out: amount_out,
                ..BinReserveDelta::default()
            }
        } else {
            BinReserveDelta {
                bin_id: self.id,
                amount_y_in: amount_in,
                amount_x_out: amount_out,
                ..BinReserveDelta::default()
            }
        }
    }
}
