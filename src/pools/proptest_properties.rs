//! Property-based tests using `proptest` for engine invariants.
//!
//! 1. **Round-trip bound**: `quote_in(quote_out(a))` stays within one
//!    unit of `a` on the volatile curve (two when the fee is not exact),
//!    and the input `quote_in` asks for buys at least the requested output.
//! 2. **K monotonicity**: the invariant never decreases across a replayed
//!    trade, on both Solidly curves.
//! 3. **Pause short-circuit**: a paused pool fails every quote with
//!    `PoolPaused`, whatever the token or amount.
//! 4. **Bin output bound**: a bin never pays out more than it holds, and a
//!    traversal never more than the ladder holds.
//! 5. **Newton termination**: the stable solver stops within its cap and
//!    brackets the target invariant.

use num_bigint::BigUint;
use primitive_types::U256;
use proptest::prelude::*;

use crate::config::{BinReserves, CurveKind, LiquidityBookConfig, SolidlyConfig};
use crate::domain::{
    amount, BasisPoints, Decimals, FeeParameters, FeeRate, TokenAddress, TokenPair, TradeUpdate,
};
use crate::error::AmmError;
use crate::math::REAL_ID_SHIFT;
use crate::pools::liquidity_book::{Bin, LiquidityBookPool};
use crate::pools::solidly::{stable_f, SolidlyPool, MAX_NEWTON_ITERATIONS};
use crate::traits::{FromConfig, PoolSimulator};

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn tok_0() -> TokenAddress {
    TokenAddress::from_bytes([1u8; 20])
}

fn tok_1() -> TokenAddress {
    TokenAddress::from_bytes([2u8; 20])
}

fn make_pair() -> TokenPair {
    let Ok(pair) = TokenPair::new(tok_0(), tok_1()) else {
        panic!("valid pair");
    };
    pair
}

fn make_solidly(curve: CurveKind, r0: u128, r1: u128, rate: u64, precision: u64) -> SolidlyPool {
    let Ok(fee) = FeeRate::new(rate, precision) else {
        panic!("valid fee");
    };
    let Ok(cfg) = SolidlyConfig::new(
        "0xsolidly",
        make_pair(),
        [BigUint::from(r0), BigUint::from(r1)],
        curve,
        [Decimals::EIGHTEEN; 2],
        fee,
    ) else {
        panic!("valid Solidly config");
    };
    let Ok(pool) = SolidlyPool::from_config(&cfg) else {
        panic!("valid Solidly pool");
    };
    pool
}

fn fee_parameters(index_ref: u32) -> FeeParameters {
    FeeParameters {
        base_factor: 5_000,
        filter_period: 30,
        decay_period: 600,
        reduction_factor: BasisPoints::new(5_000),
        variable_fee_control: 40_000,
        protocol_share: BasisPoints::new(1_000),
        max_volatility_accumulated: 350_000,
        index_ref,
        ..FeeParameters::default()
    }
}

fn make_ladder(reserves: &[u64], swap_for_y: bool, paused: bool) -> LiquidityBookPool {
    let bins = reserves
        .iter()
        .zip(0u32..)
        .map(|(&r, offset)| {
            if swap_for_y {
                BinReserves::new(REAL_ID_SHIFT - offset, BigUint::default(), BigUint::from(r))
            } else {
                BinReserves::new(REAL_ID_SHIFT + offset, BigUint::from(r), BigUint::default())
            }
        })
        .collect();
    let Ok(cfg) = LiquidityBookConfig::new(
        "0xlb",
        make_pair(),
        25,
        REAL_ID_SHIFT,
        fee_parameters(REAL_ID_SHIFT),
        bins,
    ) else {
        panic!("valid LB config");
    };
    let Ok(pool) = LiquidityBookPool::from_config(&cfg.with_paused(paused)) else {
        panic!("valid LB pool");
    };
    pool
}

fn u256(value: &BigUint) -> U256 {
    let Some(v) = amount::to_u256(value) else {
        panic!("fits in 256 bits");
    };
    v
}

// ---------------------------------------------------------------------------
// Custom strategies
// ---------------------------------------------------------------------------

/// Reserve values in [1e6, 1e30].
fn reserve_strategy() -> impl Strategy<Value = u128> {
    1_000_000u128..=1_000_000_000_000_000_000_000_000_000_000u128
}

/// Stable-pair reserves in [1e18, 1e27] so normalised balances stay near
/// the working range of the solver.
fn stable_reserve_strategy() -> impl Strategy<Value = u128> {
    1_000_000_000_000_000_000u128..=1_000_000_000_000_000_000_000_000_000u128
}

/// Fee numerators over a precision of 1 000, up to 1%.
fn fee_rate_strategy() -> impl Strategy<Value = u64> {
    0u64..=10
}

// ---------------------------------------------------------------------------
// Property 1: Round-trip bound
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_round_trip_exact_fee(
        r0 in reserve_strategy(),
        r1 in reserve_strategy(),
        units in 1u128..=1_000_000_000_000_000_000_000u128,
        rate in fee_rate_strategy(),
    ) {
        // a multiple of the precision makes the fee exact
        let amount_in = BigUint::from(units) * BigUint::from(1_000u32);
        let pool = make_solidly(CurveKind::Volatile, r0, r1, rate, 1_000);

        let Ok(out) = pool.quote_out(&tok_0(), &amount_in) else {
            return Ok(());
        };
        let Ok(back) = pool.quote_in(&tok_1(), out.amount()) else {
            return Ok(());
        };

        // only the +1 of the inverse can exceed the original input
        prop_assert!(
            back.amount() <= &(&amount_in + 1u32),
            "round-trip needs more input: back={} > original={}",
            back.amount(), amount_in
        );
    }

    #[test]
    fn prop_round_trip_within_rounding(
        r0 in reserve_strategy(),
        r1 in reserve_strategy(),
        amount_in in 1u128..=1_000_000_000_000_000_000_000_000u128,
        rate in fee_rate_strategy(),
    ) {
        let amount_in = BigUint::from(amount_in);
        let pool = make_solidly(CurveKind::Volatile, r0, r1, rate, 1_000);

        let Ok(out) = pool.quote_out(&tok_0(), &amount_in) else {
            return Ok(());
        };
        let Ok(back) = pool.quote_in(&tok_1(), out.amount()) else {
            return Ok(());
        };

        prop_assert!(back.amount() <= &(&amount_in + 2u32));
    }

    #[test]
    fn prop_quote_in_buys_requested_output(
        r0 in reserve_strategy(),
        r1 in reserve_strategy(),
        amount_out in 1u128..=1_000_000_000_000_000_000_000_000u128,
        rate in fee_rate_strategy(),
    ) {
        prop_assume!(amount_out < r1);
        let pool = make_solidly(CurveKind::Volatile, r0, r1, rate, 1_000);
        let wanted = BigUint::from(amount_out);

        let Ok(needed) = pool.quote_in(&tok_1(), &wanted) else {
            return Ok(());
        };
        let Ok(got) = pool.quote_out(&tok_0(), needed.amount()) else {
            return Ok(());
        };

        prop_assert!(got.amount() >= &wanted, "got={} < wanted={}", got.amount(), wanted);
    }
}

// ---------------------------------------------------------------------------
// Property 2: K monotonicity
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_k_monotone_volatile(
        r0 in reserve_strategy(),
        r1 in reserve_strategy(),
        amount_in in 1u128..=1_000_000_000_000_000_000_000_000u128,
        rate in fee_rate_strategy(),
        zero_for_one in any::<bool>(),
    ) {
        let pool = make_solidly(CurveKind::Volatile, r0, r1, rate, 1_000);
        let (token_in, token_out) = if zero_for_one {
            (tok_0(), tok_1())
        } else {
            (tok_1(), tok_0())
        };
        let amount_in = BigUint::from(amount_in);
        let Ok(q) = pool.quote_out(&token_in, &amount_in) else {
            return Ok(());
        };

        let trade = TradeUpdate::new(
            token_in, amount_in, token_out, q.amount().clone(), q.fee().clone(),
        );
        let next = pool.apply_trade(&trade);
        let [b0, b1] = pool.reserves();
        let [a0, a1] = next.reserves();

        let (Ok(before), Ok(after)) = (
            pool.invariant(u256(b0), u256(b1)),
            next.invariant(u256(a0), u256(a1)),
        ) else {
            return Ok(());
        };
        prop_assert!(after >= before, "K decreased: {} < {}", after, before);
    }

    #[test]
    fn prop_k_monotone_stable(
        r0 in stable_reserve_strategy(),
        r1 in stable_reserve_strategy(),
        amount_in in 1_000_000_000_000u128..=1_000_000_000_000_000_000_000_000u128,
        zero_for_one in any::<bool>(),
    ) {
        let pool = make_solidly(CurveKind::Stable, r0, r1, 1, 10_000);
        let (token_in, token_out) = if zero_for_one {
            (tok_0(), tok_1())
        } else {
            (tok_1(), tok_0())
        };
        let amount_in = BigUint::from(amount_in);
        let Ok(q) = pool.quote_out(&token_in, &amount_in) else {
            return Ok(());
        };

        let trade = TradeUpdate::new(
            token_in, amount_in, token_out, q.amount().clone(), q.fee().clone(),
        );
        let next = pool.apply_trade(&trade);
        let [b0, b1] = pool.reserves();
        let [a0, a1] = next.reserves();

        let (Ok(before), Ok(after)) = (
            pool.invariant(u256(b0), u256(b1)),
            next.invariant(u256(a0), u256(a1)),
        ) else {
            return Ok(());
        };
        prop_assert!(after >= before, "K decreased: {} < {}", after, before);
    }
}

// ---------------------------------------------------------------------------
// Property 3: Pause short-circuit
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_paused_solidly_rejects_everything(
        r0 in reserve_strategy(),
        r1 in reserve_strategy(),
        amount in any::<u128>(),
        token in any::<[u8; 20]>(),
        stable in any::<bool>(),
    ) {
        let curve = if stable { CurveKind::Stable } else { CurveKind::Volatile };
        let Ok(fee) = FeeRate::new(3, 1_000) else {
            panic!("valid fee");
        };
        let Ok(cfg) = SolidlyConfig::new(
            "0xsolidly",
            make_pair(),
            [BigUint::from(r0), BigUint::from(r1)],
            curve,
            [Decimals::EIGHTEEN; 2],
            fee,
        ) else {
            panic!("valid config");
        };
        let Ok(pool) = SolidlyPool::from_config(&cfg.with_paused(true)) else {
            panic!("valid pool");
        };

        let token = TokenAddress::from_bytes(token);
        let amount = BigUint::from(amount);
        prop_assert_eq!(pool.quote_out(&token, &amount), Err(AmmError::PoolPaused));
        prop_assert_eq!(pool.quote_in(&token, &amount), Err(AmmError::PoolPaused));
    }

    #[test]
    fn prop_paused_ladder_rejects_everything(
        reserve in 1u64..=u64::MAX,
        amount in any::<u128>(),
        token in any::<[u8; 20]>(),
    ) {
        let pool = make_ladder(&[reserve], true, true);
        let token = TokenAddress::from_bytes(token);
        let amount = BigUint::from(amount);
        prop_assert_eq!(pool.quote_out(&token, &amount), Err(AmmError::PoolPaused));
        prop_assert_eq!(pool.quote_in(&token, &amount), Err(AmmError::PoolPaused));
    }
}

// ---------------------------------------------------------------------------
// Property 4: Bin output bound
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_bin_step_output_bounded(
        reserve in 0u128..=u128::MAX,
        offset in -5_000i32..=5_000i32,
        amount_in in any::<u128>(),
        swap_for_y in any::<bool>(),
    ) {
        let Some(id) = REAL_ID_SHIFT.checked_add_signed(offset) else {
            return Ok(());
        };
        let reserve = U256::from(reserve);
        let bin = if swap_for_y {
            Bin::new(id, U256::zero(), reserve)
        } else {
            Bin::new(id, reserve, U256::zero())
        };
        let mut fp = fee_parameters(id);
        let amount_in = U256::from(amount_in);

        let Ok(step) = bin.swap_step(&mut fp, 25, swap_for_y, amount_in) else {
            return Ok(());
        };
        prop_assert!(step.amount_out <= reserve);
        prop_assert!(step.amount_in + step.fee <= amount_in);
        prop_assert!(step.protocol_fee <= step.fee);
    }

    #[test]
    fn prop_traversal_output_bounded(
        reserves in prop::collection::vec(1u64..=1_000_000_000_000u64, 1..8),
        amount_in in 1u64..=u64::MAX,
        swap_for_y in any::<bool>(),
    ) {
        let pool = make_ladder(&reserves, swap_for_y, false);
        let token_in = if swap_for_y { tok_0() } else { tok_1() };

        let Ok(q) = pool.quote_out(&token_in, &BigUint::from(amount_in)) else {
            return Ok(());
        };
        let total: BigUint = reserves.iter().map(|&r| BigUint::from(r)).sum();
        prop_assert!(q.amount() <= &total);
        prop_assert!(q.fee() <= &BigUint::from(amount_in));
    }
}

// ---------------------------------------------------------------------------
// Property 5: Newton termination
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_newton_terminates_and_brackets(
        r0 in stable_reserve_strategy(),
        r1 in stable_reserve_strategy(),
        amount_in in 1_000_000_000_000u128..=1_000_000_000_000_000_000_000_000u128,
    ) {
        let pool = make_solidly(CurveKind::Stable, r0, r1, 0, 10_000);
        let (x, y) = (U256::from(r0), U256::from(r1));
        let Ok(xy) = pool.invariant(x, y) else {
            return Ok(());
        };
        let x0 = x + U256::from(amount_in);

        let Ok(outcome) = SolidlyPool::get_y(x0, xy, y) else {
            return Ok(());
        };
        prop_assert!(outcome.iterations <= MAX_NEWTON_ITERATIONS);
        if !outcome.converged {
            return Ok(());
        }

        let two = U256::from(2u8);
        let (Ok(low), Ok(high)) = (
            stable_f(x0, outcome.y.saturating_sub(two)),
            stable_f(x0, outcome.y + two),
        ) else {
            return Ok(());
        };
        prop_assert!(low <= xy && xy <= high, "xy={} not in [{}, {}]", xy, low, high);
    }
}
