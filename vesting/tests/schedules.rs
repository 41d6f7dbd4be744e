//! Month-by-month schedule walks at real pool scale.
//!
//! Each walk allocates a pool-sized balance, advances the clock one month
//! at a time, claims whenever something is due, and checks the claimed
//! running total against the expected percentage at every step.

use ledger::constants::UNIT;
use ledger::{FungibleAsset, TokenLedger};
use vesting::{PoolCategory, VestingEngine, VestingError, BPS_DENOMINATOR, MONTH_SECONDS};

const OWNER: &str = "owner";
const HOLDER: &str = "holder";
const CUSTODY: &str = "vesting:custody";

const START: u64 = 1_700_000_000;

fn walk(category: PoolCategory, total: u128, expected_bps: &[u32]) {
    let mut token = TokenLedger::new_fixed("DST", OWNER);
    let mut engine = VestingEngine::new(OWNER, CUSTODY);
    engine.set_asset_reference(OWNER, &token).unwrap();

    token.approve(OWNER, CUSTODY, total).unwrap();
    engine
        .add(&mut token, OWNER, category, total, HOLDER, 0)
        .unwrap();
    engine.set_start_time(OWNER, category, START, 0).unwrap();

    let mut claimed_so_far = 0u128;
    for (month, &bps) in expected_bps.iter().enumerate() {
        let now = START + month as u64 * MONTH_SECONDS;
        let expected_cumulative = if month == expected_bps.len() - 1 {
            total
        } else {
            total * bps as u128 / BPS_DENOMINATOR
        };
        let due = expected_cumulative - claimed_so_far;

        assert_eq!(
            engine.claimable_balance(HOLDER, now),
            due,
            "{:?} month {}",
            category,
            month
        );
        if due == 0 {
            assert!(matches!(
                engine.claim(&mut token, HOLDER, now),
                Err(VestingError::NothingToClaim(_))
            ));
        } else {
            assert_eq!(engine.claim(&mut token, HOLDER, now).unwrap(), due);
            claimed_so_far += due;
        }
        assert_eq!(token.balance_of(HOLDER), claimed_so_far);
    }

    assert_eq!(claimed_so_far, total);
    assert_eq!(token.balance_of(CUSTODY), 0);
    assert_eq!(engine.vesting_info(category).claimed, total);
}

// 5% at month 0, then 4% per month from month 6, complete at month 29.
#[test]
fn test_private_sale_schedule() {
    let mut expected = vec![500u32; 6];
    for month in 6..29 {
        expected.push(500 + 400 * (month - 5));
    }
    expected.push(10_000);
    assert_eq!(expected.len(), 30);
    walk(PoolCategory::PrivateSale, 165_000_000 * UNIT, &expected);
}

// 12-month cliff, then 2.8% per month, complete at month 47.
#[test]
fn test_team_schedule() {
    let mut expected = vec![0u32; 12];
    for month in 12..47 {
        expected.push(280 * (month - 11));
    }
    expected.push(10_000);
    assert_eq!(expected.len(), 48);
    walk(PoolCategory::Team, 80_000_000 * UNIT, &expected);
}

// 10% every fourth month starting at month 0, complete at month 36.
#[test]
fn test_marketing_schedule() {
    let mut expected = Vec::new();
    for month in 0u32..36 {
        expected.push((month / 4 + 1) * 1_000);
    }
    expected.push(10_000);
    assert_eq!(expected.len(), 37);
    walk(PoolCategory::Marketing, 55_000_000 * UNIT, &expected);
}

// 10% at month 0, then 1% per month, complete at month 90.
#[test]
fn test_treasury_schedule() {
    let mut expected = vec![1_000u32];
    for month in 1..90 {
        expected.push(1_000 + 100 * month);
    }
    expected.push(10_000);
    assert_eq!(expected.len(), 91);
    walk(PoolCategory::Treasury, 290_000_000 * UNIT, &expected);
}

// A holder who never claims mid-schedule gets everything at the end.
#[test]
fn test_late_claimer_gets_full_balance() {
    let mut token = TokenLedger::new_fixed("DST", OWNER);
    let mut engine = VestingEngine::new(OWNER, CUSTODY);
    engine.set_asset_reference(OWNER, &token).unwrap();

    let total = 7_777 * UNIT + 123; // not bps-divisible
    token.approve(OWNER, CUSTODY, total).unwrap();
    engine
        .add(&mut token, OWNER, PoolCategory::Team, total, HOLDER, 0)
        .unwrap();
    engine
        .set_start_time(OWNER, PoolCategory::Team, START, 0)
        .unwrap();

    let end = START + 200 * MONTH_SECONDS;
    assert_eq!(engine.claim(&mut token, HOLDER, end).unwrap(), total);
    assert_eq!(token.balance_of(HOLDER), total);
}
