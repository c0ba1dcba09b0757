//! # Hydra Quote
//!
//! Off-chain swap simulation for on-chain AMM pools.
//!
//! Given an immutable snapshot of a pool's state, the crate answers "how
//! much comes out if I put this in" (and, where the pool supports it, the
//! inverse) with the same integer arithmetic the pool contract uses, and
//! replays accepted trades onto a copy of the state so a router can chain
//! hops.  Two engine families are provided:
//!
//! - **Solidly** (Velodrome v1 volatile and stable pairs), `solidly` feature
//! - **Liquidity Book** (Trader Joe v2.0 bin ladder), `liquidity-book` feature
//!
//! # Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `solidly` | yes | Constant-product / stable-swap pairs |
//! | `liquidity-book` | yes | Bin-ladder pools |
//! | `all-pools` | yes | Enables both engines |
//!
//! # Quick Start
//!
//! ```rust
//! use hydra_quote::factory::PoolRegistry;
//! use hydra_quote::domain::TokenAddress;
//! use hydra_quote::traits::PoolSimulator;
//! use num_bigint::BigUint;
//!
//! let json = r#"{
//!     "address": "0xpair",
//!     "exchange": "velodrome",
//!     "type": "solidly",
//!     "tokens": ["0x0101010101010101010101010101010101010101",
//!                "0x0202020202020202020202020202020202020202"],
//!     "reserves": ["1000000000000000000000", "1000000000000000000000"],
//!     "staticExtra": "{\"stable\":false,\"decimals0\":18,\"decimals1\":18,\"feePrecision\":1000}",
//!     "extra": "{\"isPaused\":false,\"fee\":3}",
//!     "blockNumber": 1,
//!     "timestamp": 1700000000
//! }"#;
//!
//! // 1. Build the pool from its snapshot
//! let registry = PoolRegistry::with_default_pools();
//! let Ok(pool) = registry.create_from_json(json) else { unreachable!() };
//!
//! // 2. Quote 10 units of token 0
//! let Ok(token_in) = "0x0101010101010101010101010101010101010101".parse::<TokenAddress>()
//! else { unreachable!() };
//! let amount_in = BigUint::from(10u32) * BigUint::from(10u32).pow(18);
//! let Ok(quote) = pool.quote_out(&token_in, &amount_in) else { unreachable!() };
//!
//! assert_eq!(quote.amount().to_string(), "9871580343970612988");
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐
//! │    Router    │  holds snapshots, picks routes
//! └──────┬───────┘
//!        │ create_from_json / create(&config)
//!        ▼
//! ┌──────────────┐
//! │   Factory    │  PoolRegistry (tag → constructor), DefaultPoolFactory
//! └──────┬───────┘
//!        │ PoolBox (enum dispatch)
//!        ▼
//! ┌──────────────┐
//! │    Pools     │  SolidlyPool, LiquidityBookPool
//! └──────┬───────┘
//!        │ PoolSimulator trait
//!        ▼
//! ┌──────────────┐
//! │ Domain/Math  │  TokenAddress, SwapQuote, U256 checked math, 128.128
//! └──────────────┘
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Value types: [`TokenAddress`](domain::TokenAddress), [`SwapQuote`](domain::SwapQuote), [`FeeParameters`](domain::FeeParameters), etc. |
//! | [`traits`] | [`PoolSimulator`](traits::PoolSimulator) and [`FromConfig`](traits::FromConfig) |
//! | [`config`] | [`PoolSnapshot`](config::PoolSnapshot), [`AmmConfig`](config::AmmConfig) and per-protocol configs |
//! | [`pools`]  | Feature-gated engines and the [`PoolBox`](pools::PoolBox) dispatch enum |
//! | [`factory`] | [`DefaultPoolFactory`](factory::DefaultPoolFactory) and [`PoolRegistry`](factory::PoolRegistry) |
//! | [`math`]   | Checked 256-bit arithmetic, rounding, 128.128 fixed point, bin prices |
//! | [`error`]  | [`AmmError`](error::AmmError) unified error enum |
//! | [`prelude`] | Convenience re-exports for common types and traits |
//!
//! # Logging
//!
//! The crate emits [`tracing`] events and installs no subscriber: quotes at
//! `trace`, pool construction at `debug`, solver exhaustion and failed
//! trade replays at `warn`.

pub mod config;
pub mod domain;
pub mod error;
pub mod factory;
pub mod math;
pub mod pools;
pub mod prelude;
pub mod traits;
