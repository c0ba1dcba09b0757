//! Enum dispatch wrapper for all pool types.
//!
//! [`PoolBox`] wraps every concrete pool implementation behind a single
//! enum, enabling heterogeneous collections and static dispatch.  Each
//! variant is feature-gated to match its pool type.

use num_bigint::BigUint;

#[cfg(feature = "liquidity-book")]
use super::liquidity_book::LiquidityBookPool;
#[cfg(feature = "solidly")]
use super::solidly::SolidlyPool;

use crate::domain::{PoolMeta, SwapQuote, TokenAddress, TokenPair, TradeUpdate};
use crate::error::AmmError;
use crate::traits::PoolSimulator;

/// Dispatch enum wrapping all concrete pool implementations.
///
/// Each variant is feature-gated behind its respective Cargo feature
/// flag.  The enum implements [`PoolSimulator`] by delegating every
/// method call to the inner pool via `match`, so a router can hold pools
/// of different protocols in one collection without trait objects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PoolBox {
    /// Solidly pair, volatile or stable (Velodrome v1 style).
    #[cfg(feature = "solidly")]
    Solidly(Box<SolidlyPool>),

    /// Bin-ladder pool (Liquidity Book v2.0 style).
    #[cfg(feature = "liquidity-book")]
    LiquidityBook(Box<LiquidityBookPool>),
}

/// Helper macro to delegate a method call to every PoolBox variant.
macro_rules! delegate {
    ($self:ident, $method:ident ( $($arg:expr),* )) => {
        match $self {
            #[cfg(feature = "solidly")]
            PoolBox::Solidly(p) => p.$method($($arg),*),
            #[cfg(feature = "liquidity-book")]
            PoolBox::LiquidityBook(p) => p.$method($($arg),*),
        }
    };
}

#[cfg(feature = "solidly")]
impl From<SolidlyPool> for PoolBox {
    fn from(pool: SolidlyPool) -> Self {
        Self::Solidly(Box::new(pool))
    }
}

#[cfg(feature = "liquidity-book")]
impl From<LiquidityBookPool> for PoolBox {
    fn from(pool: LiquidityBookPool) -> Self {
        Self::LiquidityBook(Box::new(pool))
    }
}

impl PoolSimulator for PoolBox {
    fn quote_out(
        &self,
        token_in: &TokenAddress,
        amount_in: &BigUint,
    ) -> Result<SwapQuote, AmmError> {
        delegate!(self, quote_out(token_in, amount_in))
    }

    fn quote_in(
        &self,
        token_out: &TokenAddress,
        amount_out: &BigUint,
    ) -> Result<SwapQuote, AmmError> {
        delegate!(self, quote_in(token_out, amount_out))
    }

    fn apply_trade(&self, trade: &TradeUpdate) -> Self {
        match self {
            #[cfg(feature = "solidly")]
            Self::Solidly(p) => Self::Solidly(Box::new(p.apply_trade(trade))),
            #[cfg(feature = "liquidity-book")]
            Self::LiquidityBook(p) => Self::LiquidityBook(Box::new(p.apply_trade(trade))),
        }
    }

    fn describe(&self) -> PoolMeta {
        delegate!(self, describe())
    }

    fn token_pair(&self) -> &TokenPair {
        delegate!(self, token_pair())
    }

    fn address(&self) -> &str {
        delegate!(self, address())
    }
}
