//! The two tokens of a pool, in pool order.

use super::TokenAddress;
use crate::error::AmmError;

/// The two distinct tokens of a pool.
///
/// Unlike a canonically sorted pair, the order is the pool's own: index 0
/// is `token0` (or `tokenX`) and index 1 is `token1` (or `tokenY`), exactly
/// as the snapshot lists them.  Reserve vectors are indexed the same way.
///
/// # Examples
///
/// ```
/// use hydra_quote::domain::{TokenAddress, TokenPair};
///
/// let a = TokenAddress::from_bytes([2u8; 20]);
/// let b = TokenAddress::from_bytes([1u8; 20]);
/// let Ok(pair) = TokenPair::new(a, b) else { unreachable!() };
/// assert_eq!(pair.index_of(&a), Some(0));
/// assert_eq!(pair.index_of(&b), Some(1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TokenPair {
    token0: TokenAddress,
    token1: TokenAddress,
}

impl TokenPair {
    /// Creates a pair, keeping the given order.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidToken`] if both tokens have the same address.
    pub fn new(token0: TokenAddress, token1: TokenAddress) -> Result<Self, AmmError> {
        if token0 == token1 {
            return Err(AmmError::InvalidToken(
                "token pair requires two distinct addresses",
            ));
        }
        Ok(Self { token0, token1 })
    }

    /// Returns the token at index 0.
    #[must_use]
    pub const fn token0(&self) -> TokenAddress {
        self.token0
    }

    /// Returns the token at index 1.
    #[must_use]
    pub const fn token1(&self) -> TokenAddress {
        self.token1
    }

    /// Returns the pool index of `token`, or `None` if it is not in the pair.
    #[must_use]
    pub fn index_of(&self, token: &TokenAddress) -> Option<usize> {
        if *token == self.token0 {
            Some(0)
        } else if *token == self.token1 {
            Some(1)
        } else {
            None
        }
    }

    /// Returns `true` if the given token is part of this pair.
    #[must_use]
    pub fn contains(&self, token: &TokenAddress) -> bool {
        self.index_of(token).is_some()
    }

    /// Returns the counterpart of `token` in this pair.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidToken`] if `token` is not in the pair.
    pub fn other(&self, token: &TokenAddress) -> Result<TokenAddress, AmmError> {
        match self.index_of(token) {
            Some(0) => Ok(self.token1),
            Some(_) => Ok(self.token0),
            None => Err(AmmError::InvalidToken("token is not part of this pair")),
        }
    }
}
