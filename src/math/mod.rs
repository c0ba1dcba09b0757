//! Arithmetic utilities for replaying on-chain AMM math.
//!
//! - [`CheckedArithmetic`]: overflow-checked operations on [`U256`](primitive_types::U256).
//! - [`Rounding`] and [`div_round`]: explicit division rounding.
//! - [`mul_shift`], [`shift_div`], [`pow`]: 128.128 fixed point with
//!   512-bit intermediates.
//! - [`price_from_id`]: bin-ladder price mapping.

mod bin_math;
mod checked;
mod fixed_point;
mod rounding;

pub use bin_math::{price_from_id, BASIS_POINT_MAX, MAX_BIN_ID, REAL_ID_SHIFT};
pub use checked::{CheckedArithmetic, MathError, MathResult};
pub use fixed_point::{mul_shift, pow, scale, shift_div, SCALE_OFFSET};
pub use rounding::{div_round, Rounding};
