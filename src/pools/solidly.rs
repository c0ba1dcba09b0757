//! Solidly pair engine (Velodrome v1 style).
//!
//! One engine, two invariants, selected per pool by [`CurveKind`]:
//!
//! - **Volatile**: `x · y = k`.
//! - **Stable**: `x³y + xy³ = k`, evaluated on balances normalised to 18
//!   decimals so that tokens with different decimals share one curve.
//!
//! # Exact-In Algorithm
//!
//! 1. `fee = floor(amount_in · rate / precision)`
//! 2. `a = amount_in − fee`
//! 3. volatile: `amount_out = floor(a · reserve_out / (reserve_in + a))`;
//!    stable: solve `f(reserve_in + a, y) = k` for `y` by Newton-Raphson and
//!    return `reserve_out − y`, all in the 18-decimal domain.
//! 4. Require `0 < amount_out ≤ reserve_out` and `k(after) ≥ k(before)`.
//!
//! # Exact-Out Algorithm
//!
//! Volatile only; the stable curve reports [`AmmError::Unimplemented`].
//!
//! ```text
//! amount_in = floor(reserve_in · amount_out · precision
//!                   / ((reserve_out − amount_out) · (precision − rate))) + 1
//! ```
//!
//! The exact-out quote reports a zero fee: callers do not feed it back into
//! reserve bookkeeping.
//!
//! Every fixed-point expression keeps the pair contract's operand order;
//! integer division truncates, so reordering changes the last digit.

use num_bigint::BigUint;
use num_traits::CheckedSub;
use primitive_types::U256;
use tracing::{trace, warn};

use crate::config::{CurveKind, SolidlyConfig};
use crate::domain::{
    amount, FeeRate, PoolMeta, SwapQuote, TokenAddress, TokenPair, TradeUpdate,
};
use crate::error::AmmError;
use crate::math::{CheckedArithmetic, MathResult, Rounding};
use crate::traits::{FromConfig, PoolSimulator};

/// Static gas estimate of a swap through a Solidly pair.
pub const SWAP_GAS: u64 = 125_000;

/// Upper bound on Newton-Raphson iterations.
pub const MAX_NEWTON_ITERATIONS: usize = 255;

const ONE_E18: u64 = 1_000_000_000_000_000_000;

fn e18() -> U256 {
    U256::from(ONE_E18)
}

/// Result of solving the stable invariant for one balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewtonOutcome {
    /// Final estimate of the balance.
    pub y: U256,
    /// Iterations performed.
    pub iterations: usize,
    /// `false` if the iteration cap was reached before two successive
    /// estimates came within one unit of each other.
    pub converged: bool,
}

/// A Solidly pair.
///
/// Created from a [`SolidlyConfig`] via [`FromConfig`].  The pool is an
/// immutable value: [`PoolSimulator::apply_trade`] returns an updated copy.
///
/// # Example
///
/// ```rust
/// use hydra_quote::config::{CurveKind, SolidlyConfig};
/// use hydra_quote::domain::{Decimals, FeeRate, TokenAddress, TokenPair};
/// use hydra_quote::pools::SolidlyPool;
/// use hydra_quote::traits::{FromConfig, PoolSimulator};
/// use num_bigint::BigUint;
///
/// let t0 = TokenAddress::from_bytes([1u8; 20]);
/// let t1 = TokenAddress::from_bytes([2u8; 20]);
/// let Ok(pair) = TokenPair::new(t0, t1) else { unreachable!() };
/// let Ok(fee) = FeeRate::new(3, 1_000) else { unreachable!() };
/// let reserve = BigUint::from(1_000u32) * BigUint::from(10u32).pow(18);
/// let Ok(cfg) = SolidlyConfig::new(
///     "0xpair",
///     pair,
///     [reserve.clone(), reserve],
///     CurveKind::Volatile,
///     [Decimals::EIGHTEEN; 2],
///     fee,
/// ) else { unreachable!() };
/// let Ok(pool) = SolidlyPool::from_config(&cfg) else { unreachable!() };
///
/// let amount_in = BigUint::from(10u32) * BigUint::from(10u32).pow(18);
/// let Ok(quote) = pool.quote_out(&t0, &amount_in) else { unreachable!() };
/// assert_eq!(quote.amount().to_string(), "9871580343970612988");
/// assert_eq!(quote.fee().to_string(), "30000000000000000");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolidlyPool {
    address: String,
    token_pair: TokenPair,
    reserves: [BigUint; 2],
    curve: CurveKind,
    decimal_factors: [U256; 2],
    fee: FeeRate,
    paused: bool,
    block_number: u64,
    block_timestamp: u64,
}

impl SolidlyPool {
    /// Returns the reserves in pool order.
    #[must_use]
    pub const fn reserves(&self) -> &[BigUint; 2] {
        &self.reserves
    }

    /// Returns the curve family.
    #[must_use]
    pub const fn curve(&self) -> CurveKind {
        self.curve
    }

    /// Returns the fee rate.
    #[must_use]
    pub const fn fee(&self) -> FeeRate {
        self.fee
    }

    /// Returns `true` if swaps are halted.
    #[must_use]
    pub const fn is_paused(&self) -> bool {
        self.paused
    }

    /// Evaluates the pool invariant for balances `x` (token 0) and `y`
    /// (token 1) in native units.
    ///
    /// # Errors
    ///
    /// Returns a [`MathError`](crate::math::MathError) on overflow.
    pub fn invariant(&self, x: U256, y: U256) -> MathResult<U256> {
        match self.curve {
            CurveKind::Volatile => x.safe_mul(&y),
            CurveKind::Stable => {
                let x = self.normalize(x, 0)?;
                let y = self.normalize(y, 1)?;
                let a = x.safe_mul(&y)?.safe_div(&e18(), Rounding::Down)?;
                let b = x
                    .safe_mul(&x)?
                    .safe_div(&e18(), Rounding::Down)?
                    .safe_add(&y.safe_mul(&y)?.safe_div(&e18(), Rounding::Down)?)?;
                a.safe_mul(&b)?.safe_div(&e18(), Rounding::Down)
            }
        }
    }

    /// Solves the stable invariant for `y` given `x0` and the target `xy`,
    /// starting from the estimate `y`.
    ///
    /// Iterates `y ± |f(x0, y) − xy| · 1e18 / d(x0, y)` until two successive
    /// estimates differ by at most one unit, for at most
    /// [`MAX_NEWTON_ITERATIONS`].  Running out of iterations is not an
    /// error: the last estimate is returned with `converged == false`.
    ///
    /// # Errors
    ///
    /// Returns a [`MathError`](crate::math::MathError) on overflow, on an
    /// estimate falling below zero, or if the derivative is zero.
    pub fn get_y(x0: U256, xy: U256, mut y: U256) -> MathResult<NewtonOutcome> {
        for iteration in 1..=MAX_NEWTON_ITERATIONS {
            let y_prev = y;
            let k = stable_f(x0, y)?;
            if k < xy {
                let dy = (xy - k)
                    .safe_mul(&e18())?
                    .safe_div(&stable_d(x0, y)?, Rounding::Down)?;
                y = y.safe_add(&dy)?;
            } else {
                let dy = (k - xy)
                    .safe_mul(&e18())?
                    .safe_div(&stable_d(x0, y)?, Rounding::Down)?;
                y = y.safe_sub(&dy)?;
            }

            if y.abs_diff(y_prev) <= U256::one() {
                return Ok(NewtonOutcome {
                    y,
                    iterations: iteration,
                    converged: true,
                });
            }
        }

        warn!(
            %x0,
            %xy,
            %y,
            "stable solver hit the iteration cap; returning last estimate"
        );
        Ok(NewtonOutcome {
            y,
            iterations: MAX_NEWTON_ITERATIONS,
            converged: false,
        })
    }

    fn working_reserves(&self) -> Result<[U256; 2], AmmError> {
        Ok([
            amount::reserve_to_u256(&self.reserves[0])?,
            amount::reserve_to_u256(&self.reserves[1])?,
        ])
    }

    fn normalize(&self, value: U256, index: usize) -> MathResult<U256> {
        value.safe_mul_div(&e18(), &self.decimal_factors[index], Rounding::Down)
    }

    fn denormalize(&self, value: U256, index: usize) -> MathResult<U256> {
        value.safe_mul_div(&self.decimal_factors[index], &e18(), Rounding::Down)
    }

    /// Output for an input already net of fee, before validation.
    fn raw_amount_out(
        &self,
        amount_in: U256,
        index_in: usize,
        reserves: [U256; 2],
    ) -> Result<U256, AmmError> {
        let index_out = 1 - index_in;
        let (reserve_in, reserve_out) = (reserves[index_in], reserves[index_out]);

        match self.curve {
            CurveKind::Volatile => Ok(amount_in
                .safe_mul(&reserve_out)?
                .safe_div(&reserve_in.safe_add(&amount_in)?, Rounding::Down)?),
            CurveKind::Stable => {
                let xy = self.invariant(reserves[0], reserves[1])?;
                let reserve_in = self.normalize(reserve_in, index_in)?;
                let reserve_out = self.normalize(reserve_out, index_out)?;
                let amount_in = self.normalize(amount_in, index_in)?;

                let solved = Self::get_y(amount_in.safe_add(&reserve_in)?, xy, reserve_out)?;
                let y = reserve_out.safe_sub(&solved.y)?;
                Ok(self.denormalize(y, index_out)?)
            }
        }
    }

    fn amount_out(
        &self,
        amount_in: U256,
        index_in: usize,
        reserves: [U256; 2],
    ) -> Result<U256, AmmError> {
        let amount_out = self.raw_amount_out(amount_in, index_in, reserves)?;
        let index_out = 1 - index_in;

        if amount_out.is_zero() {
            return Err(AmmError::InsufficientOutputAmount);
        }
        if amount_out > reserves[index_out] {
            return Err(AmmError::InsufficientLiquidity);
        }

        let mut balances = reserves;
        balances[index_in] = reserves[index_in].safe_add(&amount_in)?;
        balances[index_out] = reserves[index_out].safe_sub(&amount_out)?;
        self.check_invariant(reserves, balances)?;

        Ok(amount_out)
    }

    fn amount_in(
        &self,
        amount_out: U256,
        index_out: usize,
        reserves: [U256; 2],
    ) -> Result<U256, AmmError> {
        let index_in = 1 - index_out;
        let (reserve_in, reserve_out) = (reserves[index_in], reserves[index_out]);

        if amount_out > reserve_out {
            return Err(AmmError::InsufficientLiquidity);
        }
        if self.curve == CurveKind::Stable {
            return Err(AmmError::Unimplemented(
                "stable curve has no closed-form exact-out quote",
            ));
        }

        let precision = U256::from(self.fee.precision());
        let rate = U256::from(self.fee.rate());
        let numerator = reserve_in.safe_mul(&amount_out)?.safe_mul(&precision)?;
        let denominator = reserve_out
            .safe_sub(&amount_out)?
            .safe_mul(&precision.safe_sub(&rate)?)?;
        let amount_in = numerator
            .safe_div(&denominator, Rounding::Down)?
            .safe_add(&U256::one())?;

        if amount_in.is_zero() {
            return Err(AmmError::InsufficientInputAmount);
        }

        let mut balances = reserves;
        balances[index_in] = reserve_in.safe_add(&amount_in)?;
        balances[index_out] = reserve_out.safe_sub(&amount_out)?;
        self.check_invariant(reserves, balances)?;

        Ok(amount_in)
    }

    fn check_invariant(&self, before: [U256; 2], after: [U256; 2]) -> Result<(), AmmError> {
        if self.invariant(after[0], after[1])? < self.invariant(before[0], before[1])? {
            return Err(AmmError::InvariantViolation("K"));
        }
        Ok(())
    }

    fn token_index(&self, token: &TokenAddress) -> Result<usize, AmmError> {
        self.token_pair
            .index_of(token)
            .ok_or(AmmError::InvalidToken("token is not part of this pool"))
    }
}

/// `x0·y³ + x0³·y` in 18-decimal fixed point.
pub(crate) fn stable_f(x0: U256, y: U256) -> MathResult<U256> {
    let y3 = y
        .safe_mul(&y)?
        .safe_div(&e18(), Rounding::Down)?
        .safe_mul(&y)?
        .safe_div(&e18(), Rounding::Down)?;
    let a = x0.safe_mul(&y3)?.safe_div(&e18(), Rounding::Down)?;

    let x3 = x0
        .safe_mul(&x0)?
        .safe_div(&e18(), Rounding::Down)?
        .safe_mul(&x0)?
        .safe_div(&e18(), Rounding::Down)?;
    let b = x3.safe_mul(&y)?.safe_div(&e18(), Rounding::Down)?;

    a.safe_add(&b)
}

/// `∂f/∂y = 3·x0·y² + x0³` in 18-decimal fixed point.
fn stable_d(x0: U256, y: U256) -> MathResult<U256> {
    let y2 = y.safe_mul(&y)?.safe_div(&e18(), Rounding::Down)?;
    let a = U256::from(3u8)
        .safe_mul(&x0)?
        .safe_mul(&y2)?
        .safe_div(&e18(), Rounding::Down)?;

    let x3 = x0
        .safe_mul(&x0)?
        .safe_div(&e18(), Rounding::Down)?
        .safe_mul(&x0)?
        .safe_div(&e18(), Rounding::Down)?;

    a.safe_add(&x3)
}

impl FromConfig<SolidlyConfig> for SolidlyPool {
    /// Creates a new pool from the given configuration.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`SolidlyConfig::validate`].
    fn from_config(config: &SolidlyConfig) -> Result<Self, AmmError> {
        config.validate()?;
        let [d0, d1] = config.decimals();
        Ok(Self {
            address: config.address().to_owned(),
            token_pair: *config.token_pair(),
            reserves: config.reserves().clone(),
            curve: config.curve(),
            decimal_factors: [d0.factor(), d1.factor()],
            fee: config.fee(),
            paused: config.is_paused(),
            block_number: config.block_number(),
            block_timestamp: config.block_timestamp(),
        })
    }
}

impl PoolSimulator for SolidlyPool {
    fn quote_out(
        &self,
        token_in: &TokenAddress,
        amount_in: &BigUint,
    ) -> Result<SwapQuote, AmmError> {
        if self.paused {
            return Err(AmmError::PoolPaused);
        }
        let index_in = self.token_index(token_in)?;
        let amount_in = amount::amount_to_u256(amount_in)?;
        trace!(pool = %self.address, curve = %self.curve, %token_in, %amount_in, "quote_out");

        let fee = self.fee.fee_on(amount_in)?;
        let amount_in_after_fee = amount_in.safe_sub(&fee)?;
        let amount_out = self.amount_out(amount_in_after_fee, index_in, self.working_reserves()?)?;

        trace!(pool = %self.address, %amount_out, %fee, "quote_out result");
        Ok(SwapQuote::new(
            amount::to_biguint(amount_out),
            amount::to_biguint(fee),
            SWAP_GAS,
        ))
    }

    fn quote_in(
        &self,
        token_out: &TokenAddress,
        amount_out: &BigUint,
    ) -> Result<SwapQuote, AmmError> {
        if self.paused {
            return Err(AmmError::PoolPaused);
        }
        let index_out = self.token_index(token_out)?;
        let amount_out = amount::amount_to_u256(amount_out)?;
        trace!(pool = %self.address, curve = %self.curve, %token_out, %amount_out, "quote_in");

        let amount_in = self.amount_in(amount_out, index_out, self.working_reserves()?)?;

        trace!(pool = %self.address, %amount_in, "quote_in result");
        Ok(SwapQuote::new(
            amount::to_biguint(amount_in),
            BigUint::default(),
            SWAP_GAS,
        ))
    }

    fn apply_trade(&self, trade: &TradeUpdate) -> Self {
        let mut next = self.clone();
        let (Some(index_in), Some(index_out)) = (
            self.token_pair.index_of(&trade.token_in),
            self.token_pair.index_of(&trade.token_out),
        ) else {
            return next;
        };
        if index_in == index_out {
            return next;
        }

        let credited = &next.reserves[index_in] + &trade.amount_in;
        next.reserves[index_in] = credited.checked_sub(&trade.fee).unwrap_or_default();
        next.reserves[index_out] = next.reserves[index_out]
            .checked_sub(&trade.amount_out)
            .unwrap_or_default();
        next
    }

    fn describe(&self) -> PoolMeta {
        PoolMeta {
            fee: u128::from(self.fee.rate()),
            fee_precision: u128::from(self.fee.precision()),
            block_number: self.block_number,
            block_timestamp: self.block_timestamp,
        }
    }

    fn token_pair(&self) -> &TokenPair {
        &self.token_pair
    }

    fn address(&self) -> &str {
        &self.address
    }
}
