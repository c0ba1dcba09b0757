//! The calculation contract every pool engine implements.
//!
//! [`PoolSimulator`] is what a router talks to.  One simulator is built per
//! pool from an immutable snapshot; the router then asks it for quotes in
//! either direction and, once it commits to a hop, derives the post-trade
//! copy with [`PoolSimulator::apply_trade`] to price the next hop.
//!
//! # Guard Order
//!
//! Both quote directions check, in order and before any arithmetic:
//!
//! 1. the pool is not paused ([`AmmError::PoolPaused`]);
//! 2. the token belongs to the pool ([`AmmError::InvalidToken`]);
//! 3. the amount fits the 256-bit working domain
//!    ([`AmmError::InvalidAmount`]).
//!
//! # Purity
//!
//! No method mutates `self`.  Engines that carry mutable per-swap state
//! (the bin ladder's volatility accumulator) copy it for each quote, so one
//! simulator can be shared by any number of concurrent callers.
//!
//! # Dispatch Model
//!
//! Engines are dispatched via the [`PoolBox`](crate::pools::PoolBox) enum
//! rather than `dyn` trait objects.

use num_bigint::BigUint;

use crate::domain::{PoolMeta, SwapQuote, TokenAddress, TokenPair, TradeUpdate};
use crate::error::AmmError;

/// Off-chain replay of one on-chain pool's swap arithmetic.
///
/// # Errors
///
/// Quote methods return [`AmmError`]; a router should drop the pool from
/// the current route on any error.
pub trait PoolSimulator {
    /// Quotes the output of selling exactly `amount_in` of `token_in`.
    ///
    /// The returned [`SwapQuote::amount`] is in the other token;
    /// [`SwapQuote::fee`] is in `token_in`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::PoolPaused`], [`AmmError::InvalidToken`],
    ///   [`AmmError::InvalidAmount`] per the guard order above.
    /// - [`AmmError::InsufficientOutputAmount`],
    ///   [`AmmError::InsufficientLiquidity`],
    ///   [`AmmError::InvariantViolation`] when the pool would revert.
    /// - [`AmmError::ArithmeticFault`] if a checked step faults.
    fn quote_out(&self, token_in: &TokenAddress, amount_in: &BigUint)
        -> Result<SwapQuote, AmmError>;

    /// Quotes the input needed to buy exactly `amount_out` of `token_out`.
    ///
    /// The returned [`SwapQuote::amount`] is in the other token.
    ///
    /// # Errors
    ///
    /// As [`quote_out`](Self::quote_out), plus [`AmmError::Unimplemented`]
    /// for curves with no closed-form inverse and
    /// [`AmmError::InsufficientInputAmount`] when the computed input is zero.
    fn quote_in(&self, token_out: &TokenAddress, amount_out: &BigUint)
        -> Result<SwapQuote, AmmError>;

    /// Returns a copy of the pool with `trade` applied to its reserves.
    ///
    /// Performs no validation beyond token lookup: if either token is not
    /// in the pool the copy is returned unchanged.
    #[must_use]
    fn apply_trade(&self, trade: &TradeUpdate) -> Self
    where
        Self: Sized;

    /// Returns read-only diagnostics for the pool.
    #[must_use]
    fn describe(&self) -> PoolMeta;

    /// Returns the pool's two tokens in pool order.
    #[must_use]
    fn token_pair(&self) -> &TokenPair;

    /// Returns the pool's on-chain address.
    #[must_use]
    fn address(&self) -> &str;
}
