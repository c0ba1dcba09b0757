//! Result of a quote.

use core::fmt;

use num_bigint::BigUint;
use serde::Serialize;

/// The outcome of a quote: the computed amount, the fee charged and the
/// static gas estimate of the protocol.
///
/// For an exact-input quote `amount` is the output; for an exact-output
/// quote it is the required input.  `protocol_fee` is the share of `fee`
/// diverted to the protocol and is zero for pools without one.
///
/// # Examples
///
/// ```
/// use hydra_quote::domain::SwapQuote;
/// use num_bigint::BigUint;
///
/// let quote = SwapQuote::new(BigUint::from(990u32), BigUint::from(3u32), 125_000);
/// assert_eq!(quote.amount(), &BigUint::from(990u32));
/// assert_eq!(quote.protocol_fee(), &BigUint::default());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SwapQuote {
    #[serde(with = "super::amount::decimal_string")]
    amount: BigUint,
    #[serde(with = "super::amount::decimal_string")]
    fee: BigUint,
    #[serde(with = "super::amount::decimal_string")]
    protocol_fee: BigUint,
    gas: u64,
}

impl SwapQuote {
    /// Creates a quote without a protocol-fee share.
    #[must_use]
    pub fn new(amount: BigUint, fee: BigUint, gas: u64) -> Self {
        Self {
            amount,
            fee,
            protocol_fee: BigUint::default(),
            gas,
        }
    }

    /// Attaches the protocol's share of the fee.
    #[must_use]
    pub fn with_protocol_fee(mut self, protocol_fee: BigUint) -> Self {
        self.protocol_fee = protocol_fee;
        self
    }

    /// Returns the quoted amount.
    #[must_use]
    pub const fn amount(&self) -> &BigUint {
        &self.amount
    }

    /// Returns the total fee.
    #[must_use]
    pub const fn fee(&self) -> &BigUint {
        &self.fee
    }

    /// Returns the protocol's share of the fee.
    #[must_use]
    pub const fn protocol_fee(&self) -> &BigUint {
        &self.protocol_fee
    }

    /// Returns the static gas estimate.
    #[must_use]
    pub const fn gas(&self) -> u64 {
        self.gas
    }
}

impl fmt::Display for SwapQuote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SwapQuote(amount={}, fee={}, protocol_fee={}, gas={})",
            self.amount, self.fee, self.protocol_fee, self.gas
        )
    }
}
