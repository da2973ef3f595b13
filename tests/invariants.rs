//! Book invariants under seeded random order flow.
//!
//! Every test drives the engine with a deterministic `ChaCha8Rng` sequence
//! and checks the book after each call.

use std::collections::HashMap;

use limit_book::types::price::decimal_to_fixed;
use limit_book::{BookSnapshot, MatchingEngine, OrderRequest, Side};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rust_decimal::Decimal;

// ============================================================================
// TEST CONSTANTS
// ============================================================================

const FLOW_LEN: usize = 5_000;

/// Prices fall in 95..=105 so the two sides overlap and trade often
const MID_PRICE: i64 = 100;
const PRICE_SPREAD: i64 = 5;

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Deterministic order flow. Same seed = same requests.
fn generate_requests(count: usize, seed: u64) -> Vec<OrderRequest> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let side = if rng.gen_bool(0.5) { Side::Buy } else { Side::Sell };
            let price = MID_PRICE + rng.gen_range(-PRICE_SPREAD..=PRICE_SPREAD);
            // 0.01 to 10.00
            let quantity = Decimal::new(rng.gen_range(1..=1_000), 2);
            OrderRequest::new(side, Decimal::from(price), quantity)
        })
        .collect()
}

fn assert_snapshot_invariants(snap: &BookSnapshot) {
    for level in snap.bids.iter().chain(snap.asks.iter()) {
        let sum: u128 = level.orders.iter().map(|o| u128::from(o.quantity)).sum();
        assert_eq!(level.total_quantity, sum, "level {} total drifted", level.price);
        assert!(!level.orders.is_empty(), "empty level {} kept", level.price);
        assert!(level.orders.iter().all(|o| o.quantity > 0), "zero-quantity order kept");
        assert!(level.orders.iter().all(|o| o.price == level.price));
        assert!(
            level.orders.windows(2).all(|w| w[0].id < w[1].id),
            "level {} not in arrival order",
            level.price
        );
    }

    assert!(
        snap.bids.windows(2).all(|w| w[0].price > w[1].price),
        "bids must be strictly descending"
    );
    assert!(
        snap.asks.windows(2).all(|w| w[0].price < w[1].price),
        "asks must be strictly ascending"
    );
    assert!(snap.bids.iter().all(|l| l.orders.iter().all(|o| o.side == Side::Buy)));
    assert!(snap.asks.iter().all(|l| l.orders.iter().all(|o| o.side == Side::Sell)));

    assert!(!snap.is_crossed(), "book crossed: {:?} / {:?}", snap.best_bid(), snap.best_ask());
}

// ============================================================================
// INVARIANT TESTS
// ============================================================================

#[test]
fn snapshot_invariants_hold_after_every_call() {
    let mut engine = MatchingEngine::new();

    for (i, request) in generate_requests(FLOW_LEN, 7).into_iter().enumerate() {
        engine.process_order_at(request, i as u64).unwrap();

        assert_snapshot_invariants(&engine.snapshot());
        assert!(engine.book().is_consistent(), "book inconsistent after call {}", i);
    }
}

#[test]
fn quantity_is_conserved() {
    let mut engine = MatchingEngine::new();
    let mut submitted: u128 = 0;
    let mut traded: u128 = 0;

    for (i, request) in generate_requests(FLOW_LEN, 11).into_iter().enumerate() {
        submitted += u128::from(decimal_to_fixed(request.quantity).unwrap());
        let result = engine.process_order_at(request, i as u64).unwrap();
        traded += result.trades.iter().map(|t| u128::from(t.quantity)).sum::<u128>();

        // Each fill consumes the same quantity from the taker and a maker
        let snap = engine.snapshot();
        let resting = snap.side_quantity(Side::Buy) + snap.side_quantity(Side::Sell);
        assert_eq!(resting + 2 * traded, submitted, "conservation broken at call {}", i);
    }

    assert!(traded > 0, "flow should produce some trades");
}

#[test]
fn earlier_order_at_a_price_fills_first() {
    let mut engine = MatchingEngine::new();
    let mut open_before = open_orders(&engine.snapshot());

    for (i, request) in generate_requests(FLOW_LEN, 23).into_iter().enumerate() {
        let result = engine.process_order_at(request, i as u64).unwrap();
        let open_after = open_orders(&engine.snapshot());

        // A maker may only trade once every older order at its price and
        // side has left the book
        for trade in &result.trades {
            let (maker_side, maker_price) = open_before[&trade.maker_order_id];
            let older_still_open = open_after.iter().any(|(&id, &(side, price))| {
                id < trade.maker_order_id && side == maker_side && price == maker_price
            });
            assert!(
                !older_still_open,
                "maker {} filled while an older order at {} stayed open",
                trade.maker_order_id, maker_price
            );
        }

        open_before = open_after;
    }
}

/// order id -> (side, price) for every resting order
fn open_orders(snap: &BookSnapshot) -> HashMap<u64, (Side, u64)> {
    snap.bids
        .iter()
        .chain(snap.asks.iter())
        .flat_map(|level| level.orders.iter())
        .map(|order| (order.id, (order.side, order.price)))
        .collect()
}

#[test]
fn trades_never_breach_the_taker_limit() {
    let mut engine = MatchingEngine::new();

    for (i, request) in generate_requests(FLOW_LEN, 31).into_iter().enumerate() {
        let limit = decimal_to_fixed(request.price).unwrap();
        let side = request.side;
        let result = engine.process_order_at(request, i as u64).unwrap();

        for trade in &result.trades {
            assert!(side.accepts(limit, trade.price), "trade at {} breaches limit {}", trade.price, limit);
        }
        // Taker pays the maker prices in priority order
        let prices: Vec<u64> = result.trades.iter().map(|t| t.price).collect();
        match side {
            Side::Buy => assert!(prices.windows(2).all(|w| w[0] <= w[1])),
            Side::Sell => assert!(prices.windows(2).all(|w| w[0] >= w[1])),
        }
    }
}

// ============================================================================
// DETERMINISM
// ============================================================================

/// Run a deterministic request sequence and return the final state root.
fn run_sequence(seed: u64, count: usize) -> [u8; 32] {
    let mut engine = MatchingEngine::new();
    for (i, request) in generate_requests(count, seed).into_iter().enumerate() {
        engine.process_order_at(request, i as u64).unwrap();
    }
    engine.book().state_root()
}

#[test]
fn same_sequence_same_state_root() {
    let root1 = run_sequence(12345, 2_000);
    let root2 = run_sequence(12345, 2_000);
    assert_eq!(root1, root2, "State roots must match for determinism");

    let root3 = run_sequence(12346, 2_000);
    assert_ne!(root1, root3, "Different seeds should produce different roots");
}
