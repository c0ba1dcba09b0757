//! Feature-gated pool engines and the [`PoolBox`] dispatch enum.
//!
//! Each engine is behind its own Cargo feature flag.  The [`PoolBox`]
//! enum provides static dispatch across all enabled engines, allowing
//! heterogeneous collections without `dyn` trait objects.
//!
//! # Pool Types
//!
//! | Feature | Pool | Style |
//! |---------|------|-------|
//! | `solidly` | [`SolidlyPool`] | Velodrome v1 volatile / stable |
//! | `liquidity-book` | [`LiquidityBookPool`] | Trader Joe Liquidity Book v2.0 |

#[cfg(feature = "liquidity-book")]
pub mod liquidity_book;
#[cfg(feature = "solidly")]
pub mod solidly;

mod pool_box;

#[cfg(all(test, feature = "solidly", feature = "liquidity-book"))]
mod proptest_properties;

#[cfg(feature = "liquidity-book")]
pub use liquidity_book::{Bin, BinReserveDelta, BinSwapStep, LiquidityBookPool};
pub use pool_box::PoolBox;
#[cfg(feature = "solidly")]
pub use solidly::{NewtonOutcome, SolidlyPool};
