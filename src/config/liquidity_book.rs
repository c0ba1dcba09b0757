//! Configuration for Liquidity Book v2.0 bin-ladder pools.

use std::collections::BTreeSet;

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use super::{PoolKind, PoolSnapshot};
use crate::domain::{amount, FeeParameters, TokenPair};
use crate::error::AmmError;
use crate::math::MAX_BIN_ID;

/// Reserves of one bin as carried in a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BinReserves {
    /// Bin id.
    pub id: u32,
    /// Token X held by the bin.
    #[serde(with = "amount::decimal_string")]
    pub reserve_x: BigUint,
    /// Token Y held by the bin.
    #[serde(with = "amount::decimal_string")]
    pub reserve_y: BigUint,
}

impl BinReserves {
    /// Creates a bin record.
    #[must_use]
    pub fn new(id: u32, reserve_x: BigUint, reserve_y: BigUint) -> Self {
        Self {
            id,
            reserve_x,
            reserve_y,
        }
    }
}

/// `staticExtra` blob of a bin-ladder snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiquidityBookStaticExtra {
    /// Basis points between adjacent bin prices.
    pub bin_step: u16,
}

/// `extra` blob of a bin-ladder snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiquidityBookExtra {
    /// Id of the bin holding the current price.
    pub active_bin_id: u32,
    /// Fee state at the snapshot block.
    pub fee_parameters: FeeParameters,
    /// Non-empty bins around the active one.
    #[serde(default)]
    pub bins: Vec<BinReserves>,
    /// Whether swaps are halted.
    #[serde(default)]
    pub paused: bool,
}

/// Configuration for a bin-ladder pool.
///
/// # Validation
///
/// - `bin_step` must be non-zero.
/// - The active id and every bin id must lie in the 24-bit id space.
/// - Bin ids must be unique and bin reserves must fit in 256 bits.
/// - The protocol share and reduction factor must not exceed 100%.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiquidityBookConfig {
    address: String,
    token_pair: TokenPair,
    bin_step: u16,
    active_bin_id: u32,
    fee_parameters: FeeParameters,
    bins: Vec<BinReserves>,
    paused: bool,
    block_number: u64,
    block_timestamp: u64,
}

impl LiquidityBookConfig {
    /// Creates a new, unpaused `LiquidityBookConfig`.
    ///
    /// # Errors
    ///
    /// See [`validate`](Self::validate).
    pub fn new(
        address: impl Into<String>,
        token_pair: TokenPair,
        bin_step: u16,
        active_bin_id: u32,
        fee_parameters: FeeParameters,
        bins: Vec<BinReserves>,
    ) -> Result<Self, AmmError> {
        let config = Self {
            address: address.into(),
            token_pair,
            bin_step,
            active_bin_id,
            fee_parameters,
            bins,
            paused: false,
            block_number: 0,
            block_timestamp: 0,
        };
        config.validate()?;
        Ok(config)
    }

    /// Builds the config from a `liquidity-book` snapshot.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidConfiguration`] if the snapshot has another
    ///   type or the wrong number of tokens, or a parameter is rejected.
    /// - [`AmmError::MalformedSnapshot`] if a blob does not decode.
    /// - [`AmmError::InvalidReserve`] for bad bins.
    pub fn from_snapshot(snapshot: &PoolSnapshot) -> Result<Self, AmmError> {
        if snapshot.kind != PoolKind::LiquidityBook {
            return Err(AmmError::InvalidConfiguration(
                "snapshot is not a liquidity-book pool",
            ));
        }
        let static_extra: LiquidityBookStaticExtra = snapshot.static_extra()?;
        let extra: LiquidityBookExtra = snapshot.extra()?;

        Ok(Self::new(
            snapshot.address.clone(),
            snapshot.token_pair()?,
            static_extra.bin_step,
            extra.active_bin_id,
            extra.fee_parameters,
            extra.bins,
        )?
        .with_paused(extra.paused)
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
    /// - [`AmmError::InvalidConfiguration`] for a zero bin step or a fee
    ///   share above 100%.
    /// - [`AmmError::InvalidReserve`] for an id outside the 24-bit range,
    ///   a duplicate bin or an oversized reserve.
    pub fn validate(&self) -> Result<(), AmmError> {
        if self.bin_step == 0 {
            return Err(AmmError::InvalidConfiguration("bin step must be non-zero"));
        }
        if !self.fee_parameters.protocol_share.is_valid_percent() {
            return Err(AmmError::InvalidConfiguration(
                "protocol share must not exceed 100%",
            ));
        }
        if !self.fee_parameters.reduction_factor.is_valid_percent() {
            return Err(AmmError::InvalidConfiguration(
                "reduction factor must not exceed 100%",
            ));
        }
        if self.active_bin_id > MAX_BIN_ID {
            return Err(AmmError::InvalidReserve(
                "active bin id outside the 24-bit range",
            ));
        }

        let mut seen = BTreeSet::new();
        for bin in &self.bins {
            if bin.id > MAX_BIN_ID {
                return Err(AmmError::InvalidReserve("bin id outside the 24-bit range"));
            }
            if !seen.insert(bin.id) {
                return Err(AmmError::InvalidReserve("duplicate bin id"));
            }
            amount::reserve_to_u256(&bin.reserve_x)?;
            amount::reserve_to_u256(&bin.reserve_y)?;
        }
        Ok(())
    }

    /// Returns the pool address.
    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Returns the token pair (token X, token Y).
    #[must_use]
    pub const fn token_pair(&self) -> &TokenPair {
        &self.token_pair
    }

    /// Returns the bin step in basis points.
    #[must_use]
    pub const fn bin_step(&self) -> u16 {
        self.bin_step
    }

    /// Returns the active bin id.
    #[must_use]
    pub const fn active_bin_id(&self) -> u32 {
        self.active_bin_id
    }

    /// Returns the fee parameters.
    #[must_use]
    pub const fn fee_parameters(&self) -> &FeeParameters {
        &self.fee_parameters
    }

    /// Returns the bins.
    #[must_use]
    pub fn bins(&self) -> &[BinReserves] {
        &self.bins
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
