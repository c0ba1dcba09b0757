//! Default pool factory implementation.

use tracing::debug;

use crate::config::AmmConfig;
use crate::error::AmmError;
use crate::pools::PoolBox;

#[cfg(any(feature = "solidly", feature = "liquidity-book"))]
use crate::traits::FromConfig;

/// Stateless factory for creating pool instances from configuration.
///
/// `DefaultPoolFactory` matches on the [`AmmConfig`] variant, validates
/// the configuration, delegates to the pool's [`FromConfig`]
/// implementation, and wraps the result in a [`PoolBox`].
///
/// # Example
///
/// ```rust
/// use hydra_quote::config::{AmmConfig, CurveKind, SolidlyConfig};
/// use hydra_quote::domain::{Decimals, FeeRate, TokenAddress, TokenPair};
/// use hydra_quote::factory::DefaultPoolFactory;
/// use hydra_quote::traits::PoolSimulator;
/// use num_bigint::BigUint;
///
/// let t0 = TokenAddress::from_bytes([1u8; 20]);
/// let t1 = TokenAddress::from_bytes([2u8; 20]);
/// let Ok(pair) = TokenPair::new(t0, t1) else { unreachable!() };
/// let Ok(fee) = FeeRate::new(3, 1_000) else { unreachable!() };
/// let reserves = [BigUint::from(1_000_000u32), BigUint::from(1_000_000u32)];
/// let Ok(cfg) = SolidlyConfig::new(
///     "0xpair", pair, reserves, CurveKind::Volatile, [Decimals::EIGHTEEN; 2], fee,
/// ) else { unreachable!() };
///
/// let Ok(pool) = DefaultPoolFactory::create(&AmmConfig::Solidly(cfg)) else { unreachable!() };
/// assert_eq!(*pool.token_pair(), pair);
/// ```
///
/// [`FromConfig`]: crate::traits::FromConfig
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DefaultPoolFactory;

impl DefaultPoolFactory {
    /// Creates a new pool instance from the given configuration.
    ///
    /// # Flow
    ///
    /// 1. Validate the configuration via [`AmmConfig::validate`].
    /// 2. Match on the config variant.
    /// 3. Delegate to the pool's `FromConfig` implementation.
    /// 4. Wrap the constructed pool in the corresponding [`PoolBox`]
    ///    variant.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidConfiguration`] if the configuration is
    ///   invalid or if the requested pool type's feature is not enabled.
    /// - Any error propagated from the pool's `from_config` method.
    pub fn create(config: &AmmConfig) -> Result<PoolBox, AmmError> {
        config.validate()?;

        let pool = match config {
            #[cfg(feature = "solidly")]
            AmmConfig::Solidly(cfg) => {
                PoolBox::from(crate::pools::solidly::SolidlyPool::from_config(cfg)?)
            }

            #[cfg(feature = "liquidity-book")]
            AmmConfig::LiquidityBook(cfg) => PoolBox::from(
                crate::pools::liquidity_book::LiquidityBookPool::from_config(cfg)?,
            ),

            // Catch-all for config variants whose pool feature is disabled.
            #[allow(unreachable_patterns)]
            _ => {
                return Err(AmmError::InvalidConfiguration(
                    "requested pool type is not enabled (missing feature flag)",
                ))
            }
        };

        debug!(kind = %config.kind(), address = config.address(), "pool created");
        Ok(pool)
    }
}

#[cfg(test)]
#[allow(clippy::panic, unused_imports, dead_code)]
mod tests {
    use super::*;
    use crate::config::{BinReserves, CurveKind, LiquidityBookConfig, SolidlyConfig};
    use crate::domain::{Decimals, FeeParameters, FeeRate, TokenAddress, TokenPair};
    use crate::math::REAL_ID_SHIFT;
    use crate::traits::PoolSimulator;
    use num_bigint::BigUint;

    // -- helpers --------------------------------------------------------------

    fn make_pair() -> TokenPair {
        let Ok(pair) = TokenPair::new(
            TokenAddress::from_bytes([1u8; 20]),
            TokenAddress::from_bytes([2u8; 20]),
        ) else {
            panic!("expected valid pair");
        };
        pair
    }

    fn solidly_config() -> SolidlyConfig {
        let Ok(fee) = FeeRate::new(1, 10_000) else {
            panic!("valid fee");
        };
        let Ok(cfg) = SolidlyConfig::new(
            "0xsolidly",
            make_pair(),
            [BigUint::from(5_000u32), BigUint::from(5_000u32)],
            CurveKind::Stable,
            [Decimals::EIGHTEEN; 2],
            fee,
        ) else {
            panic!("valid config");
        };
        cfg
    }

    fn lb_config() -> LiquidityBookConfig {
        let Ok(cfg) = LiquidityBookConfig::new(
            "0xlb",
            make_pair(),
            10,
            REAL_ID_SHIFT,
            FeeParameters::default(),
            vec![BinReserves::new(
                REAL_ID_SHIFT,
                BigUint::from(10u32),
                BigUint::from(10u32),
            )],
        ) else {
            panic!("valid config");
        };
        cfg
    }

    // -- dispatch -------------------------------------------------------------

    #[cfg(feature = "solidly")]
    #[test]
    fn creates_solidly_pool() {
        let Ok(pool) = DefaultPoolFactory::create(&AmmConfig::Solidly(solidly_config())) else {
            panic!("expected Ok");
        };
        assert!(matches!(pool, PoolBox::Solidly(_)));
        assert_eq!(pool.address(), "0xsolidly");
        assert_eq!(pool.describe().fee_precision, 10_000);
    }

    #[cfg(feature = "liquidity-book")]
    #[test]
    fn creates_liquidity_book_pool() {
        let Ok(pool) = DefaultPoolFactory::create(&AmmConfig::LiquidityBook(lb_config())) else {
            panic!("expected Ok");
        };
        assert!(matches!(pool, PoolBox::LiquidityBook(_)));
        assert_eq!(pool.token_pair(), &make_pair());
    }

    #[cfg(feature = "liquidity-book")]
    #[test]
    fn paused_flag_survives_construction() {
        let cfg = AmmConfig::LiquidityBook(lb_config().with_paused(true));
        let Ok(pool) = DefaultPoolFactory::create(&cfg) else {
            panic!("expected Ok");
        };
        assert_eq!(
            pool.quote_out(&TokenAddress::from_bytes([1u8; 20]), &BigUint::from(1u32)),
            Err(AmmError::PoolPaused)
        );
    }

    #[cfg(not(feature = "liquidity-book"))]
    #[test]
    fn disabled_feature_is_rejected() {
        assert!(matches!(
            DefaultPoolFactory::create(&AmmConfig::LiquidityBook(lb_config())),
            Err(AmmError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn factory_is_copy() {
        let f = DefaultPoolFactory;
        let g = f;
        assert_eq!(f, g);
    }
}
