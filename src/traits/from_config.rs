//! Generic construction trait for pool instantiation from configuration.
//!
//! [`FromConfig`] provides a uniform interface for creating pool instances
//! from their respective configuration structs.  Each engine implements
//! `FromConfig<C>` for its own config variant, enabling the factory to
//! dispatch construction without `dyn` trait objects:
//!
//! ```text
//! AmmConfig::Solidly(cfg)       => SolidlyPool::from_config(&cfg)
//! AmmConfig::LiquidityBook(cfg) => LiquidityBookPool::from_config(&cfg)
//! ```
//!
//! Implementations validate the configuration again, so a pool built
//! directly (without the factory) is still guaranteed to be consistent.

use crate::error::AmmError;

/// Builds a pool from a configuration.
///
/// # Errors
///
/// Returns [`AmmError::InvalidConfiguration`] (or a more specific
/// variant) if the configuration is invalid.
pub trait FromConfig<C> {
    /// Creates a new pool instance from the given configuration.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidConfiguration`] if any pool parameter is out of
    ///   range or inconsistent.
    /// - [`AmmError::InvalidToken`] if the token pair is invalid.
    /// - [`AmmError::InvalidReserve`] if a reserve or bin id is unusable.
    fn from_config(config: &C) -> Result<Self, AmmError>
    where
        Self: Sized;
}
