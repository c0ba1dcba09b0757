//! Protocol tag → constructor registry.
//!
//! A [`PoolRegistry`] maps each [`PoolKind`] to a function that turns a
//! [`PoolSnapshot`] into a [`PoolBox`].  The default set is registered
//! explicitly by [`PoolRegistry::with_default_pools`] at start-up; callers
//! may replace or add constructors with [`PoolRegistry::register`].

use std::collections::HashMap;

use serde_json::Value;
use tracing::debug;

#[cfg(any(feature = "solidly", feature = "liquidity-book"))]
use super::DefaultPoolFactory;
#[cfg(any(feature = "solidly", feature = "liquidity-book"))]
use crate::config::AmmConfig;
use crate::config::{PoolKind, PoolSnapshot};
use crate::error::AmmError;
use crate::pools::PoolBox;

/// Builds a pool from a snapshot.
pub type PoolConstructor = fn(&PoolSnapshot) -> Result<PoolBox, AmmError>;

/// Tag-keyed table of pool constructors.
///
/// # Example
///
/// ```rust
/// use hydra_quote::factory::PoolRegistry;
/// use hydra_quote::traits::PoolSimulator;
///
/// let json = r#"{
///     "address": "0xpair",
///     "type": "solidly",
///     "tokens": ["0x0101010101010101010101010101010101010101",
///                "0x0202020202020202020202020202020202020202"],
///     "reserves": ["1000000", "1000000"],
///     "staticExtra": "{\"stable\":false,\"decimals0\":18,\"decimals1\":18,\"feePrecision\":1000}",
///     "extra": "{\"isPaused\":false,\"fee\":3}"
/// }"#;
///
/// let registry = PoolRegistry::with_default_pools();
/// let Ok(pool) = registry.create_from_json(json) else { unreachable!() };
/// assert_eq!(pool.describe().fee, 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PoolRegistry {
    constructors: HashMap<PoolKind, PoolConstructor>,
}

/// Constructor that goes through [`AmmConfig`] and [`DefaultPoolFactory`].
#[cfg(any(feature = "solidly", feature = "liquidity-book"))]
fn build_from_config(snapshot: &PoolSnapshot) -> Result<PoolBox, AmmError> {
    DefaultPoolFactory::create(&AmmConfig::from_snapshot(snapshot)?)
}

impl PoolRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding a constructor for every enabled engine.
    #[must_use]
    #[allow(unused_mut)]
    pub fn with_default_pools() -> Self {
        let mut registry = Self::new();
        #[cfg(feature = "solidly")]
        registry.register(PoolKind::Solidly, build_from_config);
        #[cfg(feature = "liquidity-book")]
        registry.register(PoolKind::LiquidityBook, build_from_config);
        registry
    }

    /// Registers `constructor` for `kind`, returning the one it replaces.
    pub fn register(
        &mut self,
        kind: PoolKind,
        constructor: PoolConstructor,
    ) -> Option<PoolConstructor> {
        debug!(%kind, "registering pool constructor");
        self.constructors.insert(kind, constructor)
    }

    /// Returns `true` if a constructor is registered for `kind`.
    #[must_use]
    pub fn contains(&self, kind: PoolKind) -> bool {
        self.constructors.contains_key(&kind)
    }

    /// Iterates over the registered tags, in no particular order.
    pub fn kinds(&self) -> impl Iterator<Item = PoolKind> + '_ {
        self.constructors.keys().copied()
    }

    /// Builds a pool from a decoded snapshot.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidConfiguration`] if no constructor is
    ///   registered for the snapshot's tag.
    /// - Whatever the constructor returns.
    pub fn create(&self, snapshot: &PoolSnapshot) -> Result<PoolBox, AmmError> {
        let constructor = self.constructors.get(&snapshot.kind).ok_or(
            AmmError::InvalidConfiguration("no constructor registered for pool type"),
        )?;
        let pool = constructor(snapshot)?;
        debug!(
            kind = %snapshot.kind,
            address = %snapshot.address,
            block = snapshot.block_number,
            "pool built from snapshot"
        );
        Ok(pool)
    }

    /// Decodes a snapshot from JSON and builds a pool from it.
    ///
    /// The `type` tag is resolved before the rest of the snapshot is
    /// decoded, so an unknown protocol is reported as such rather than as
    /// a decoding failure.
    ///
    /// # Errors
    ///
    /// - [`AmmError::MalformedSnapshot`] if the JSON does not decode or
    ///   has no string `type` field.
    /// - [`AmmError::InvalidConfiguration`] for an unknown or
    ///   unregistered tag.
    /// - Whatever the constructor returns.
    pub fn create_from_json(&self, json: &str) -> Result<PoolBox, AmmError> {
        let value: Value = serde_json::from_str(json)?;
        let tag = value
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| AmmError::MalformedSnapshot("missing pool type".to_owned()))?;
        let kind: PoolKind = tag.parse()?;
        if !self.contains(kind) {
            return Err(AmmError::InvalidConfiguration(
                "no constructor registered for pool type",
            ));
        }

        let snapshot: PoolSnapshot = serde_json::from_value(value)?;
        self.create(&snapshot)
    }
}
