//! Value types shared by every engine.
//!
//! Tokens are 20-byte EVM addresses; amounts are [`BigUint`](num_bigint::BigUint)
//! at the API surface and [`U256`](primitive_types::U256) inside the engines,
//! converted through the helpers in [`amount`].

pub mod amount;
mod basis_points;
mod decimals;
mod fee_parameters;
mod fee_rate;
mod pool_meta;
mod swap_quote;
mod token_address;
mod token_pair;
mod trade;

pub use amount::{to_biguint, to_u256};
pub use basis_points::BasisPoints;
pub use decimals::Decimals;
pub use fee_parameters::{FeeParameters, FEE_PRECISION};
pub use fee_rate::FeeRate;
pub use pool_meta::PoolMeta;
pub use swap_quote::SwapQuote;
pub use token_address::TokenAddress;
pub use token_pair::TokenPair;
pub use trade::TradeUpdate;
