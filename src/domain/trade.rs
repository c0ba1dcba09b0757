//! A trade to replay against pool state.

use num_bigint::BigUint;

use super::TokenAddress;

/// An executed (or chosen) swap whose effect on reserves should be applied
/// to a pool copy, typically the quote a router just accepted for one hop.
///
/// `fee` is the fee reported by that quote, in the input token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TradeUpdate {
    /// Token sent into the pool.
    pub token_in: TokenAddress,
    /// Amount of `token_in` sent.
    pub amount_in: BigUint,
    /// Token taken out of the pool.
    pub token_out: TokenAddress,
    /// Amount of `token_out` taken.
    pub amount_out: BigUint,
    /// Fee charged on the input side.
    pub fee: BigUint,
}

impl TradeUpdate {
    /// Creates a trade update.
    #[must_use]
    pub fn new(
        token_in: TokenAddress,
        amount_in: BigUint,
        token_out: TokenAddress,
        amount_out: BigUint,
        fee: BigUint,
    ) -> Self {
        Self {
            token_in,
            amount_in,
            token_out,
            amount_out,
            fee,
        }
    }
}
