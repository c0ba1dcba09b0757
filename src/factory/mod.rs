//! Pool instantiation.
//!
//! Two entry points:
//!
//! - [`DefaultPoolFactory`] creates a pool from an already validated
//!   [`AmmConfig`], dispatching on the config variant.
//! - [`PoolRegistry`] maps snapshot protocol tags to constructors, so a
//!   router can turn raw JSON snapshots into pools without knowing which
//!   protocols exist.
//!
//! # Feature Gating
//!
//! Each engine is gated behind its feature flag.  A config for a disabled
//! engine, or a snapshot whose tag has no registered constructor, fails
//! with [`AmmError::InvalidConfiguration`].
//!
//! [`AmmConfig`]: crate::config::AmmConfig
//! [`AmmError::InvalidConfiguration`]: crate::error::AmmError::InvalidConfiguration

mod default_factory;
mod registry;

pub use default_factory::DefaultPoolFactory;
pub use registry::{PoolConstructor, PoolRegistry};
