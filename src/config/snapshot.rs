//! Pool snapshot wire format.
//!
//! A [`PoolSnapshot`] is what the state-retrieval service hands over for
//! each pool: common fields plus two protocol-specific JSON blobs.
//! `staticExtra` holds parameters fixed at deployment; `extra` holds state
//! that changes block to block.  The blobs are decoded exactly once, when
//! the per-protocol config is built from the snapshot.
//!
//! ```json
//! {
//!   "address": "0x…",
//!   "exchange": "velodrome",
//!   "type": "solidly",
//!   "tokens": ["0x…", "0x…"],
//!   "reserves": ["1000000000000000000000", "1000000000"],
//!   "staticExtra": "{\"stable\":true,\"decimals0\":18,\"decimals1\":6,\"feePrecision\":10000}",
//!   "extra": "{\"isPaused\":false,\"fee\":1}",
//!   "blockNumber": 19000000,
//!   "timestamp": 1700000000
//! }
//! ```

use core::fmt;
use core::str::FromStr;

use num_bigint::BigUint;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::domain::{amount, TokenAddress, TokenPair};
use crate::error::AmmError;

/// Protocol tag of a snapshot, used to pick the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PoolKind {
    /// Solidly / Velodrome v1 volatile and stable pairs.
    Solidly,
    /// Liquidity Book v2.0 bin-ladder pools.
    LiquidityBook,
}

impl PoolKind {
    /// Returns the wire tag.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Solidly => "solidly",
            Self::LiquidityBook => "liquidity-book",
        }
    }
}

impl fmt::Display for PoolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PoolKind {
    type Err = AmmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "solidly" => Ok(Self::Solidly),
            "liquidity-book" => Ok(Self::LiquidityBook),
            _ => Err(AmmError::InvalidConfiguration("unknown pool type")),
        }
    }
}

/// Immutable on-chain state of one pool at one block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolSnapshot {
    /// Pool contract address.
    pub address: String,
    /// Name of the exchange operating the pool.
    #[serde(default)]
    pub exchange: String,
    /// Protocol tag.
    #[serde(rename = "type")]
    pub kind: PoolKind,
    /// Pool tokens in pool order.
    pub tokens: Vec<TokenAddress>,
    /// Pool reserves as decimal strings, indexed like `tokens`.
    #[serde(default)]
    pub reserves: Vec<String>,
    /// JSON blob of deployment-time parameters.
    #[serde(default)]
    pub static_extra: String,
    /// JSON blob of block-dependent state.
    #[serde(default)]
    pub extra: String,
    /// Block the state was read at.
    #[serde(default)]
    pub block_number: u64,
    /// Timestamp of that block, in seconds.
    #[serde(default)]
    pub timestamp: u64,
}

impl PoolSnapshot {
    /// Parses a snapshot from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::MalformedSnapshot`] if the JSON does not decode.
    pub fn from_json(json: &str) -> Result<Self, AmmError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Returns the two tokens as a [`TokenPair`].
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidConfiguration`] if the snapshot does not list
    ///   exactly two tokens.
    /// - [`AmmError::InvalidToken`] if both tokens are the same.
    pub fn token_pair(&self) -> Result<TokenPair, AmmError> {
        let [token0, token1] = self.tokens.as_slice() else {
            return Err(AmmError::InvalidConfiguration(
                "pool must list exactly two tokens",
            ));
        };
        TokenPair::new(*token0, *token1)
    }

    /// Parses the two reserves.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidConfiguration`] if there are not exactly two.
    /// - [`AmmError::InvalidReserve`] if one is not a decimal integer.
    pub fn reserves(&self) -> Result<[BigUint; 2], AmmError> {
        let [reserve0, reserve1] = self.reserves.as_slice() else {
            return Err(AmmError::InvalidConfiguration(
                "pool must list exactly two reserves",
            ));
        };
        Ok([
            amount::parse_decimal(reserve0)?,
            amount::parse_decimal(reserve1)?,
        ])
    }

    /// Decodes the `staticExtra` blob.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::MalformedSnapshot`] if the blob does not decode
    /// into `T`.
    pub fn static_extra<T: DeserializeOwned>(&self) -> Result<T, AmmError> {
        Ok(serde_json::from_str(&self.static_extra)?)
    }

    /// Decodes the `extra` blob.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::MalformedSnapshot`] if the blob does not decode
    /// into `T`.
    pub fn extra<T: DeserializeOwned>(&self) -> Result<T, AmmError> {
        Ok(serde_json::from_str(&self.extra)?)
    }
}
