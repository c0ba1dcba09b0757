//! Liquidity Book v2.0 bin-ladder pool.
//!
//! Liquidity sits in discrete bins; each bin trades at a single price
//! `(1 + bin_step / 10_000)^(id − 2^23)` and holds reserves of both
//! tokens.  Token X is `token0`, token Y is `token1`.
//!
//! # Swap Traversal
//!
//! 1. Copy the fee parameters and start a new swap at the active id and
//!    the snapshot timestamp (filter/decay transition).
//! 2. Walk bins from the active id in the swap direction: X in moves to
//!    lower ids, Y in to higher ids.  Bins with nothing to pay out are
//!    skipped.
//! 3. Run [`Bin::swap_step`] on each bin, accumulating output, fees and
//!    reserve deltas, until the input is consumed.
//!
//! Running out of bins with input left fails with
//! [`AmmError::InsufficientLiquidity`].
//!
//! Exact-out quotes are not supported: there is no closed-form inverse of
//! the traversal.

mod bin;

use std::collections::BTreeMap;

use num_bigint::BigUint;
use primitive_types::U256;
use tracing::{trace, warn};

pub use bin::{Bin, BinReserveDelta, BinSwapStep};

use crate::config::LiquidityBookConfig;
use crate::domain::{
    amount, FeeParameters, PoolMeta, SwapQuote, TokenAddress, TokenPair, TradeUpdate,
    FEE_PRECISION,
};
use crate::error::AmmError;
use crate::math::CheckedArithmetic;
use crate::traits::{FromConfig, PoolSimulator};

/// Static gas estimate of a swap.
pub const SWAP_GAS: u64 = 70_000;

/// Accumulated result of walking the bin ladder.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Traversal {
    amount_out: U256,
    fee: U256,
    protocol_fee: U256,
    deltas: Vec<BinReserveDelta>,
    active_bin_id: u32,
    fee_parameters: FeeParameters,
}

/// A Liquidity Book v2.0 pool.
///
/// Created from a [`LiquidityBookConfig`] via [`FromConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiquidityBookPool {
    address: String,
    token_pair: TokenPair,
    bin_step: u16,
    active_bin_id: u32,
    fee_parameters: FeeParameters,
    bins: BTreeMap<u32, Bin>,
    paused: bool,
    block_number: u64,
    block_timestamp: u64,
}

impl LiquidityBookPool {
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

    /// Returns the current fee parameters.
    #[must_use]
    pub const fn fee_parameters(&self) -> &FeeParameters {
        &self.fee_parameters
    }

    /// Returns the bin with the given id, if the pool knows it.
    #[must_use]
    pub fn bin(&self, id: u32) -> Option<&Bin> {
        self.bins.get(&id)
    }

    /// Iterates over the known bins in id order.
    pub fn bins(&self) -> impl Iterator<Item = &Bin> {
        self.bins.values()
    }

    fn traverse(&self, swap_for_y: bool, amount_in: U256) -> Result<Traversal, AmmError> {
        let mut fee_parameters = self.fee_parameters;
        fee_parameters.update_variable_fee_parameters(self.active_bin_id, self.block_timestamp);

        let ladder: Box<dyn Iterator<Item = &Bin> + '_> = if swap_for_y {
            Box::new(self.bins.range(..=self.active_bin_id).rev().map(|(_, bin)| bin))
        } else {
            Box::new(self.bins.range(self.active_bin_id..).map(|(_, bin)| bin))
        };

        let mut remaining = amount_in;
        let mut amount_out = U256::zero();
        let mut fee = U256::zero();
        let mut protocol_fee = U256::zero();
        let mut deltas = Vec::new();
        let mut active_bin_id = self.active_bin_id;

        for bin in ladder {
            if remaining.is_zero() {
                break;
            }
            if bin.is_empty_for_swap(swap_for_y) {
                continue;
            }

            let step = bin.swap_step(&mut fee_parameters, self.bin_step, swap_for_y, remaining)?;
            remaining = remaining.safe_sub(&step.amount_in.safe_add(&step.fee)?)?;
            amount_out = amount_out.safe_add(&step.amount_out)?;
            fee = fee.safe_add(&step.fee)?;
            protocol_fee = protocol_fee.safe_add(&step.protocol_fee)?;
            deltas.push(step.delta);
            active_bin_id = bin.id;
        }

        if !remaining.is_zero() {
            return Err(AmmError::InsufficientLiquidity);
        }
        if amount_out.is_zero() {
            return Err(AmmError::InsufficientOutputAmount);
        }

        Ok(Traversal {
            amount_out,
            fee,
            protocol_fee,
            deltas,
            active_bin_id,
            fee_parameters,
        })
    }

    fn replay(&self, swap_for_y: bool, amount_in: &BigUint) -> Result<Self, AmmError> {
        let amount_in = amount::amount_to_u256(amount_in)?;
        let traversal = self.traverse(swap_for_y, amount_in)?;

        let mut next = self.clone();
        for delta in &traversal.deltas {
            if let Some(bin) = next.bins.get_mut(&delta.bin_id) {
                *bin = bin.apply(delta)?;
            }
        }
        next.active_bin_id = traversal.active_bin_id;
        next.fee_parameters = traversal.fee_parameters;
        Ok(next)
    }

    fn check_swap(&self, token: &TokenAddress, amount: &BigUint) -> Result<(usize, U256), AmmError> {
        if self.paused {
            return Err(AmmError::PoolPaused);
        }
        let index = self
            .token_pair
            .index_of(token)
            .ok_or(AmmError::InvalidToken("token is not part of this pool"))?;
        Ok((index, amount::amount_to_u256(amount)?))
    }
}

impl FromConfig<LiquidityBookConfig> for LiquidityBookPool {
    /// Creates a new pool from the given configuration.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`LiquidityBookConfig::validate`].
    fn from_config(config: &LiquidityBookConfig) -> Result<Self, AmmError> {
        config.validate()?;

        let mut bins = BTreeMap::new();
        for record in config.bins() {
            let bin = Bin::new(
                record.id,
                amount::reserve_to_u256(&record.reserve_x)?,
                amount::reserve_to_u256(&record.reserve_y)?,
            );
            bins.insert(record.id, bin);
        }

        Ok(Self {
            address: config.address().to_owned(),
            token_pair: *config.token_pair(),
            bin_step: config.bin_step(),
            active_bin_id: config.active_bin_id(),
            fee_parameters: *config.fee_parameters(),
            bins,
            paused: config.is_paused(),
            block_number: config.block_number(),
            block_timestamp: config.block_timestamp(),
        })
    }
}

impl PoolSimulator for LiquidityBookPool {
    fn quote_out(
        &self,
        token_in: &TokenAddress,
        amount_in: &BigUint,
    ) -> Result<SwapQuote, AmmError> {
        let (index_in, amount_in) = self.check_swap(token_in, amount_in)?;
        let swap_for_y = index_in == 0;
        trace!(
            pool = %self.address,
            active_bin_id = self.active_bin_id,
            swap_for_y,
            %amount_in,
            "quote_out"
        );

        let traversal = self.traverse(swap_for_y, amount_in)?;

        trace!(
            pool = %self.address,
            amount_out = %traversal.amount_out,
            fee = %traversal.fee,
            bins = traversal.deltas.len(),
            "quote_out result"
        );
        Ok(SwapQuote::new(
            amount::to_biguint(traversal.amount_out),
            amount::to_biguint(traversal.fee),
            SWAP_GAS,
        )
        .with_protocol_fee(amount::to_biguint(traversal.protocol_fee)))
    }

    fn quote_in(
        &self,
        token_out: &TokenAddress,
        amount_out: &BigUint,
    ) -> Result<SwapQuote, AmmError> {
        self.check_swap(token_out, amount_out)?;
        Err(AmmError::Unimplemented(
            "bin-ladder pools do not quote exact output",
        ))
    }

    /// Replays the traversal for `trade.amount_in` and applies the bin
    /// deltas, the final active id and the advanced fee state.
    ///
    /// Only the input side of `trade` is used: the output is recomputed.
    fn apply_trade(&self, trade: &TradeUpdate) -> Self {
        let (Some(index_in), Some(index_out)) = (
            self.token_pair.index_of(&trade.token_in),
            self.token_pair.index_of(&trade.token_out),
        ) else {
            return self.clone();
        };
        if index_in == index_out {
            return self.clone();
        }

        match self.replay(index_in == 0, &trade.amount_in) {
            Ok(next) => next,
            Err(err) => {
                warn!(
                    pool = %self.address,
                    amount_in = %trade.amount_in,
                    %err,
                    "trade replay failed; keeping previous state"
                );
                self.clone()
            }
        }
    }

    fn describe(&self) -> PoolMeta {
        let fee = self.fee_parameters.total_fee(self.bin_step);
        PoolMeta {
            fee: if fee.bits() <= 128 { fee.low_u128() } else { u128::MAX },
            fee_precision: u128::from(FEE_PRECISION),
            block_number: self.block_number,
            block_timestamp: self.block_timestamp,
        }
    }

    fn token_pair(&self) -> &TokenPair {
        &self.token_pair
    }

    fn address(&self) -> &str {
        &self.address
    }
}
