//! Unified error types for the Hydra quoting core.
//!
//! Every fallible public operation returns [`AmmError`].  The variants
//! mirror the failure modes of the on-chain contracts being replayed, so a
//! router can treat any `Err` as "exclude this pool from the route" without
//! inspecting it further.
//!
//! Deep arithmetic never produces an `AmmError` directly.  It returns a
//! [`MathError`], which converts into [`AmmError::ArithmeticFault`] at the
//! engine boundary through the `From` impl generated below.

use thiserror::Error;

use crate::math::MathError;

/// Crate-wide result alias.
pub type Result<T> = core::result::Result<T, AmmError>;

/// Every way a quote, trade replay, or pool construction can fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmmError {
    /// The pool is paused and accepts no swaps.
    #[error("pool is paused")]
    PoolPaused,

    /// The token is not one of the pool's two tokens, or a token pair is
    /// malformed.
    #[error("invalid token: {0}")]
    InvalidToken(&'static str),

    /// The requested amount is malformed or outside the 256-bit domain.
    #[error("invalid amount: {0}")]
    InvalidAmount(&'static str),

    /// The pool snapshot holds a reserve or bin id the engine cannot use.
    #[error("invalid reserve: {0}")]
    InvalidReserve(&'static str),

    /// The pool cannot deliver the requested output.
    #[error("INSUFFICIENT_LIQUIDITY")]
    InsufficientLiquidity,

    /// The swap would produce no output.
    #[error("INSUFFICIENT_OUTPUT_AMOUNT")]
    InsufficientOutputAmount,

    /// The swap would require no input.
    #[error("INSUFFICIENT_INPUT_AMOUNT")]
    InsufficientInputAmount,

    /// The post-trade invariant decreased.
    #[error("invariant violation: {0}")]
    InvariantViolation(&'static str),

    /// The operation has no counterpart in the replayed contract.
    #[error("unimplemented: {0}")]
    Unimplemented(&'static str),

    /// A checked 256-bit operation overflowed, underflowed, or divided by
    /// zero.
    #[error("arithmetic fault: {0}")]
    ArithmeticFault(#[from] MathError),

    /// Static pool parameters were rejected at construction.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),

    /// A snapshot blob could not be decoded.
    #[error("malformed snapshot: {0}")]
    MalformedSnapshot(String),
}

impl From<serde_json::Error> for AmmError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedSnapshot(err.to_string())
    }
}
