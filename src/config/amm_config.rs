//! Top-level pool configuration enum.
//!
//! [`AmmConfig`] is the declarative blueprint for creating any pool type.
//! Each variant wraps a protocol-specific configuration struct; the factory
//! matches on it to dispatch construction:
//!
//! ```text
//! match config {
//!     AmmConfig::Solidly(cfg)       => SolidlyPool::from_config(&cfg),
//!     AmmConfig::LiquidityBook(cfg) => LiquidityBookPool::from_config(&cfg),
//! }
//! ```

use super::{LiquidityBookConfig, PoolKind, PoolSnapshot, SolidlyConfig};
use crate::error::AmmError;

/// Configuration for any supported pool type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AmmConfig {
    /// Solidly / Velodrome v1 pair.
    Solidly(SolidlyConfig),
    /// Liquidity Book v2.0 bin-ladder pool.
    LiquidityBook(LiquidityBookConfig),
}

impl AmmConfig {
    /// Builds the config matching the snapshot's protocol tag.
    ///
    /// # Errors
    ///
    /// Returns whatever the protocol's `from_snapshot` returns.
    pub fn from_snapshot(snapshot: &PoolSnapshot) -> Result<Self, AmmError> {
        match snapshot.kind {
            PoolKind::Solidly => SolidlyConfig::from_snapshot(snapshot).map(Self::Solidly),
            PoolKind::LiquidityBook => {
                LiquidityBookConfig::from_snapshot(snapshot).map(Self::LiquidityBook)
            }
        }
    }

    /// Validates the inner configuration by delegating to the
    /// variant-specific `validate()` method.
    ///
    /// # Errors
    ///
    /// Returns the same [`AmmError`] that the inner config's `validate()`
    /// would return.
    pub fn validate(&self) -> Result<(), AmmError> {
        match self {
            Self::Solidly(cfg) => cfg.validate(),
            Self::LiquidityBook(cfg) => cfg.validate(),
        }
    }

    /// Returns the protocol tag of this config.
    #[must_use]
    pub const fn kind(&self) -> PoolKind {
        match self {
            Self::Solidly(_) => PoolKind::Solidly,
            Self::LiquidityBook(_) => PoolKind::LiquidityBook,
        }
    }

    /// Returns the pool address.
    #[must_use]
    pub fn address(&self) -> &str {
        match self {
            Self::Solidly(cfg) => cfg.address(),
            Self::LiquidityBook(cfg) => cfg.address(),
        }
    }
}

impl core::fmt::Display for AmmConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}({})", self.kind(), self.address())
    }
}
