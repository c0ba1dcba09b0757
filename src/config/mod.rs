//! Pool configuration.
//!
//! [`AmmConfig`] is the top-level blueprint for creating any pool type;
//! [`PoolSnapshot`] is the wire format the per-protocol configs are decoded
//! from.

mod amm_config;
mod liquidity_book;
mod snapshot;
mod solidly;

pub use amm_config::AmmConfig;
pub use liquidity_book::{
    BinReserves, LiquidityBookConfig, LiquidityBookExtra, LiquidityBookStaticExtra,
};
pub use snapshot::{PoolKind, PoolSnapshot};
pub use solidly::{CurveKind, SolidlyConfig, SolidlyExtra, SolidlyStaticExtra};
