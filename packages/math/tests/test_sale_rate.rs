use riptide_math::*;
use soroban_sdk::{Env, U256};

// ============================================================
// SALE RATE
// ============================================================

#[test]
fn test_compute_sale_rate_exact() {
    // 1000 tokens over 100 seconds = 10 tokens per second
    assert_eq!(compute_sale_rate(1_000, 100), Some(10u128 << SALE_RATE_SHIFT));
}

#[test]
fn test_compute_sale_rate_rounds_down() {
    let rate = compute_sale_rate(1, 3).unwrap();
    assert_eq!(rate, (1u128 << SALE_RATE_SHIFT) / 3);
}

#[test]
fn test_compute_sale_rate_zero_duration() {
    assert_eq!(compute_sale_rate(1_000, 0), None);
}

#[test]
fn test_compute_sale_rate_overflow() {
    assert_eq!(compute_sale_rate(u128::MAX, 10), None);
}

// ============================================================
// AMOUNT FROM SALE RATE
// ============================================================

#[test]
fn test_amount_from_whole_rate() {
    let rate = 10u128 << SALE_RATE_SHIFT;
    assert_eq!(compute_amount_from_sale_rate(rate, 100, false), Some(1_000));
    assert_eq!(compute_amount_from_sale_rate(rate, 100, true), Some(1_000));
}

#[test]
fn test_amount_from_fractional_rate_rounding() {
    // half a token per second for 3 seconds = 1.5 tokens
    let rate = 1u128 << (SALE_RATE_SHIFT - 1);
    assert_eq!(compute_amount_from_sale_rate(rate, 3, false), Some(1));
    assert_eq!(compute_amount_from_sale_rate(rate, 3, true), Some(2));
}

#[test]
fn test_amount_from_zero_duration() {
    assert_eq!(compute_amount_from_sale_rate(MAX_SALE_RATE, 0, true), Some(0));
}

#[test]
fn test_amount_from_max_rate_and_duration_fits() {
    let amount = compute_amount_from_sale_rate(MAX_SALE_RATE, MAX_ORDER_DURATION, true);
    assert!(amount.is_some());
}

#[test]
fn test_sale_rate_round_trip_never_exceeds_amount() {
    let rate = compute_sale_rate(1_000_003, 7_777).unwrap();
    let sold = compute_amount_from_sale_rate(rate, 7_777, false).unwrap();
    assert!(sold <= 1_000_003);
}

// ============================================================
// REWARD RATE
// ============================================================

#[test]
fn test_reward_rate_delta_zero_sale_rate() {
    let env = Env::default();
    assert!(reward_rate_delta(&env, 100, 0).is_none());
}

#[test]
fn test_reward_rate_delta_value() {
    let env = Env::default();
    let delta = reward_rate_delta(&env, 3, 1).unwrap();
    assert_eq!(delta, U256::from_u128(&env, 3).shl(REWARD_RATE_SHIFT));
}

#[test]
fn test_proceeds_round_trip_single_seller() {
    let env = Env::default();
    let sale_rate = 10u128 << SALE_RATE_SHIFT;
    let delta = reward_rate_delta(&env, 12_345, sale_rate).unwrap();
    let proceeds = proceeds_from_reward_rate(&env, &delta, sale_rate).unwrap();
    // The only seller recovers everything up to one unit of rounding
    assert!(proceeds <= 12_345 && 12_345 - proceeds <= 1);
}

#[test]
fn test_proceeds_split_between_sellers() {
    let env = Env::default();
    let rate_a = 3u128 << SALE_RATE_SHIFT;
    let rate_b = 1u128 << SALE_RATE_SHIFT;
    let delta = reward_rate_delta(&env, 4_000, rate_a + rate_b).unwrap();

    let a = proceeds_from_reward_rate(&env, &delta, rate_a).unwrap();
    let b = proceeds_from_reward_rate(&env, &delta, rate_b).unwrap();
    assert!(a + b <= 4_000);
    assert!(a >= 2_999 && a <= 3_000);
    assert!(b >= 999 && b <= 1_000);
}

#[test]
fn test_proceeds_zero_sale_rate() {
    let env = Env::default();
    let delta = U256::from_u128(&env, 1).shl(200);
    assert_eq!(proceeds_from_reward_rate(&env, &delta, 0), Some(0));
}
