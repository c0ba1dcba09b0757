//! Convenience re-exports for common types and traits.
//!
//! ```rust
//! use hydra_quote::prelude::*;
//! ```
//!
//! Brings the domain types, the simulator traits, the configuration and
//! snapshot types, the error types and the factory into scope with one
//! import.

pub use crate::domain::{
    BasisPoints, Decimals, FeeParameters, FeeRate, PoolMeta, SwapQuote, TokenAddress, TokenPair,
    TradeUpdate,
};

pub use crate::traits::{FromConfig, PoolSimulator};

pub use crate::math::{CheckedArithmetic, Rounding};

pub use crate::config::{AmmConfig, CurveKind, PoolKind, PoolSnapshot};

pub use crate::error::{AmmError, Result};

pub use crate::factory::{DefaultPoolFactory, PoolRegistry};

pub use crate::pools::PoolBox;
