//! Core trait abstractions.
//!
//! - [`PoolSimulator`]: the quote/apply contract every engine implements.
//! - [`FromConfig`]: configuration-driven construction used by the factory.

mod from_config;
mod pool_simulator;

pub use from_config::FromConfig;
pub use pool_simulator::PoolSimulator;
