//! Configuration for Solidly-style pairs (Velodrome v1).

use core::fmt;

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use super::{PoolKind, PoolSnapshot};
use crate::domain::{amount, Decimals, FeeRate, TokenPair};
use crate::error::AmmError;

/// Invariant family of a Solidly pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CurveKind {
    /// Constant product `x * y = k`.
    #[default]
    Volatile,
    /// Stable swap `x^3 y + x y^3 = k` on 18-decimal balances.
    Stable,
}

impl fmt::Display for CurveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Volatile => f.write_str("volatile"),
            Self::Stable => f.write_str("stable"),
        }
    }
}

/// `staticExtra` blob of a Solidly snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolidlyStaticExtra {
    /// `true` for a stable pair.
    #[serde(default)]
    pub stable: bool,
    /// Decimals of token 0.
    pub decimals0: u8,
    /// Decimals of token 1.
    pub decimals1: u8,
    /// Fee denominator.
    pub fee_precision: u64,
}

/// `extra` blob of a Solidly snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolidlyExtra {
    /// Whether swaps are halted.
    #[serde(default)]
    pub is_paused: bool,
    /// Fee numerator.
    pub fee: u64,
}

/// Configuration for a Solidly pair.
///
/// # Validation
///
/// - The token pair is validated at [`TokenPair`] construction time.
/// - Both reserves must fit in 256 bits.
/// - The fee rate is validated at [`FeeRate`] construction time.
///
/// Reserves may be zero: an empty pair is a valid pool that fails every
/// quote with [`AmmError::InsufficientOutputAmount`] or
/// [`AmmError::InsufficientLiquidity`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolidlyConfig {
    address: String,
    token_pair: TokenPair,
    reserves: [BigUint; 2],
    curve: CurveKind,
    decimals: [Decimals; 2],
    fee: FeeRate,
    paused: bool,
    block_number: u64,
    block_timestamp: u64,
}

impl SolidlyConfig {
    /// Creates a new, unpaused `SolidlyConfig`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidReserve`] if a reserve exceeds 256 bits.
    pub fn new(
        address: impl Into<String>,
        token_pair: TokenPair,
        reserves: [BigUint; 2],
        curve: CurveKind,
        decimals: [Decimals; 2],
        fee: FeeRate,
    ) -> Result<Self, AmmError> {
        let config = Self {
            address: address.into(),
            token_pair,
            reserves,
            curve,
            decimals,
            fee,
            paused: false,
            block_number: 0,
            block_timestamp: 0,
        };
        config.validate()?;
        Ok(config)
    }

    /// Builds the config from a `solidly` snapshot.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidConfiguration`] if the snapshot has another
    ///   type, the wrong number of tokens or reserves, or bad static
    ///   parameters.
    /// - [`AmmError::MalformedSnapshot`] if a blob does not decode.
    /// - [`AmmError::InvalidToken`] / [`AmmError::InvalidReserve`] from
    ///   token and reserve validation.
    pub fn from_snapshot(snapshot: &PoolSnapshot) -> Result<Self, AmmError> {
        if snapshot.kind != PoolKind::Solidly {
            return Err(AmmError::InvalidConfiguration(
                "snapshot is not a solidly pool",
            ));
        }
        let static_extra: SolidlyStaticExtra = snapshot.static_extra()?;
        let extra: SolidlyExtra = snapshot.extra()?;

        let curve = if static_extra.stable {
            CurveKind::Stable
        } else {
            CurveKind::Volatile
        };
        let decimals = [
            Decimals::new(static_extra.decimals0)?,
            Decimals::new(static_extra.decimals1)?,
        ];
        let fee = FeeRate::new(extra.fee, static_extra.fee_precision)?;

        Ok(Self::new(
            snapshot.address.clone(),
            snapshot.token_pair()?,
            snapshot.reserves()?,
            curve,
            decimals,
            fee,
        )?
        .with_paused(extra.is_paused)
        .with_block(snapshot.block_number, snapshot.timestamp))
    }

    /// Sets the paused flag.
    #[must_use]
    pub const fn with_paused(mut self, paused: bool) -> Self {
        self.paused = paused;
        self
    }

    /// Records the block the state was read at.
    #[must_use]
    pub const fn with_block(mut self, block_number: u64, block_timestamp: u64) -> Self {
        self.block_number = block_number;
        self.block_timestamp = block_timestamp;
        self
    }

    /// Validates the configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidReserve`] if a reserve exceeds 256 bits.
    pub fn validate(&self) -> Result<(), AmmError> {
        for reserve in &self.reserves {
            amount::reserve_to_u256(reserve)?;
        }
        Ok(())
    }

    /// Returns the pool address.
    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Returns the token pair.
    #[must_use]
    pub const fn token_pair(&self) -> &TokenPair {
        &self.token_pair
    }

    /// Returns the reserves in pool order.
    #[must_use]
    pub const fn reserves(&self) -> &[BigUint; 2] {
        &self.reserves
    }

    /// Returns the curve family.
    #[must_use]
    pub const fn curve(&self) -> CurveKind {
        self.curve
    }

    /// Returns the token decimals in pool order.
    #[must_use]
    pub const fn decimals(&self) -> [Decimals; 2] {
        self.decimals
    }

    /// Returns the fee rate.
    #[must_use]
    pub const fn fee(&self) -> FeeRate {
        self.fee
    }

    /// Returns `true` if swaps are halted.
    #[must_use]
    pub const fn is_paused(&self) -> bool {
        self.paused
    }

    /// Returns the block number of the snapshot.
    #[must_use]
    pub const fn block_number(&self) -> u64 {
        self.block_number
    }

    /// Returns the block timestamp of the snapshot.
    #[must_use]
    pub const fn block_timestamp(&self) -> u64 {
        self.block_timestamp
    }
}
