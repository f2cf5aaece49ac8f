//! Matching behaviour through the public engine API
//!
//! Covers priority rules, partial fills, lookup and input rejection.

use matching_engine::MatchingEngine;
use rust_decimal::Decimal;
use std::str::FromStr;
use types::errors::{EngineError, OrderError};
use types::numeric::{Price, Quantity};
use types::order::{OrderRequest, OrderSnapshot, OrderStatus, Side};

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn qty(s: &str) -> Quantity {
    Quantity::from_str(s).unwrap()
}

fn place(engine: &MatchingEngine, asset: &str, side: Side, price: &str, amount: &str) -> OrderSnapshot {
    engine
        .submit(OrderRequest::new(asset, dec(price), dec(amount), side))
        .unwrap()
}

fn reload(engine: &MatchingEngine, order: &OrderSnapshot) -> OrderSnapshot {
    engine.lookup(&order.id.to_string()).unwrap()
}

#[test]
fn crossing_orders_fill_the_smaller_side_either_way() {
    for buy_first in [true, false] {
        let engine = MatchingEngine::with_defaults();

        let (buy, sell) = if buy_first {
            let buy = place(&engine, "BTC", Side::BUY, "101", "2");
            let sell = place(&engine, "BTC", Side::SELL, "100", "0.5");
            (buy, sell)
        } else {
            let sell = place(&engine, "BTC", Side::SELL, "100", "0.5");
            let buy = place(&engine, "BTC", Side::BUY, "101", "2");
            (buy, sell)
        };

        let buy = reload(&engine, &buy);
        let sell = reload(&engine, &sell);

        assert!(sell.pending_amount.is_zero());
        assert_eq!(buy.pending_amount, qty("1.5"));
        assert_eq!(buy.trades.len(), 1);
        assert_eq!(sell.trades.len(), 1);
    }
}

#[test]
fn non_matching_pairs_never_trade() {
    let engine = MatchingEngine::with_defaults();

    // Different assets
    let a = place(&engine, "BTC", Side::BUY, "100", "1");
    let b = place(&engine, "ETH", Side::SELL, "90", "1");
    // Same direction
    let c = place(&engine, "SOL", Side::BUY, "100", "1");
    let d = place(&engine, "SOL", Side::BUY, "100", "1");
    // Prices do not cross
    let e = place(&engine, "ADA", Side::BUY, "99", "1");
    let f = place(&engine, "ADA", Side::SELL, "100", "1");

    for order in [a, b, c, d, e, f] {
        let order = reload(&engine, &order);
        assert!(order.trades.is_empty());
        assert_eq!(order.pending_amount, order.amount);
    }
}

#[test]
fn better_price_matches_first() {
    let engine = MatchingEngine::with_defaults();

    let expensive = place(&engine, "BTC", Side::SELL, "1400", "1");
    let cheap = place(&engine, "BTC", Side::SELL, "1300", "1");
    let buy = place(&engine, "BTC", Side::BUY, "1500", "1");

    assert_eq!(buy.status(), OrderStatus::Filled);
    assert_eq!(buy.trades[0].counterparty_order_id, cheap.id);
    assert_eq!(buy.trades[0].price, Price::from_u64(1300));

    let cheap = reload(&engine, &cheap);
    assert!(cheap.pending_amount.is_zero());

    let expensive = reload(&engine, &expensive);
    assert!(expensive.trades.is_empty());
    assert_eq!(expensive.pending_amount, qty("1"));
}

#[test]
fn earlier_order_matches_first_at_equal_price() {
    let engine = MatchingEngine::with_defaults();

    let s1 = place(&engine, "BTC", Side::SELL, "100", "1");
    let s2 = place(&engine, "BTC", Side::SELL, "100", "1");
    let buy = place(&engine, "BTC", Side::BUY, "100", "1");

    assert_eq!(buy.trades.len(), 1);
    assert_eq!(buy.trades[0].counterparty_order_id, s1.id);

    assert_eq!(reload(&engine, &s1).status(), OrderStatus::Filled);
    let s2 = reload(&engine, &s2);
    assert!(s2.trades.is_empty());
    assert_eq!(s2.pending_amount, qty("1"));
}

#[test]
fn partial_fills_accumulate_on_the_incoming_order() {
    let engine = MatchingEngine::with_defaults();

    let resting = [
        place(&engine, "BTC", Side::BUY, "100", "1"),
        place(&engine, "BTC", Side::BUY, "100", "1"),
        place(&engine, "BTC", Side::BUY, "100", "0.5"),
    ];
    // Incoming SELL of 3 sweeps all three bids
    let sell = place(&engine, "BTC", Side::SELL, "100", "3");

    assert_eq!(sell.pending_amount, qty("0.5"));
    assert_eq!(sell.trades.len(), 3);
    assert_eq!(sell.status(), OrderStatus::Partial);
    for (trade, order) in sell.trades.iter().zip(&resting) {
        assert_eq!(trade.counterparty_order_id, order.id);
        assert_eq!(trade.amount, order.amount);
    }

    // Remainder now rests on the ask side
    assert_eq!(engine.best_ask("BTC"), Some((Price::from_u64(100), qty("0.5"))));
    assert!(engine.best_bid("BTC").is_none());
}

#[test]
fn incoming_buy_accumulates_against_sequential_sells() {
    let engine = MatchingEngine::with_defaults();

    let buy = place(&engine, "BTC", Side::BUY, "100", "3");
    place(&engine, "BTC", Side::SELL, "100", "1");
    place(&engine, "BTC", Side::SELL, "100", "1");
    place(&engine, "BTC", Side::SELL, "100", "0.5");

    let buy = reload(&engine, &buy);
    assert_eq!(buy.pending_amount, qty("0.5"));
    assert_eq!(buy.trades.len(), 3);
}

#[test]
fn lookup_is_idempotent() {
    let engine = MatchingEngine::with_defaults();
    let order = place(&engine, "BTC", Side::SELL, "100", "1");

    let first = reload(&engine, &order);
    let second = reload(&engine, &order);

    assert_eq!(first, second);
}

#[test]
fn submit_then_lookup_round_trips() {
    let engine = MatchingEngine::with_defaults();
    place(&engine, "BTC", Side::SELL, "100", "0.4");

    let submitted = place(&engine, "BTC", Side::BUY, "100", "1");
    assert_eq!(engine.lookup(&submitted.id.to_string()).unwrap(), submitted);
    assert_eq!(engine.get(submitted.id), Some(submitted));
}

#[test]
fn invalid_input_is_rejected_before_touching_books() {
    let engine = MatchingEngine::with_defaults();

    let cases = [
        (OrderRequest::new("BTC", dec("100"), dec("0"), Side::BUY), "amount"),
        (OrderRequest::new("BTC", dec("100"), dec("-1"), Side::BUY), "amount"),
        (OrderRequest::new("BTC", dec("0"), dec("1"), Side::SELL), "price"),
        (OrderRequest::new("BTC", dec("-5"), dec("1"), Side::SELL), "price"),
        (OrderRequest::new("", dec("100"), dec("1"), Side::BUY), "asset"),
        (
            OrderRequest {
                direction: None,
                ..OrderRequest::new("BTC", dec("100"), dec("1"), Side::BUY)
            },
            "direction",
        ),
    ];

    for (request, field) in cases {
        match engine.submit(request) {
            Err(EngineError::Validation(err)) => assert_eq!(err.field, field),
            other => panic!("expected validation error on {field}, got {other:?}"),
        }
    }

    assert_eq!(engine.order_count(), 0);
    assert_eq!(engine.resting_count("BTC"), 0);
    assert!(engine.assets().is_empty());
}

#[test]
fn unknown_id_reports_not_found() {
    let engine = MatchingEngine::with_defaults();

    let err = engine.lookup("nonexistent").unwrap_err();

    assert_eq!(
        err,
        EngineError::Order(OrderError::NotFound {
            order_id: "nonexistent".to_string()
        })
    );
    assert_eq!(err.to_string(), "Order with ID nonexistent not found.");
}

#[test]
fn sell_filled_by_successive_buyers() {
    let engine = MatchingEngine::with_defaults();

    let sell = place(&engine, "BTC", Side::SELL, "43251.00", "1.0");

    // Below the ask: rests untouched
    let buy0 = place(&engine, "BTC", Side::BUY, "43250.00", "0.25");
    let sell_now = reload(&engine, &sell);
    assert_eq!(sell_now.pending_amount, qty("1.0"));
    assert!(sell_now.trades.is_empty());

    let buy1 = place(&engine, "BTC", Side::BUY, "43253.00", "0.35");
    assert!(buy1.pending_amount.is_zero());
    assert_eq!(buy1.trades.len(), 1);
    assert_eq!(buy1.trades[0].price, Price::from_u64(43251));

    let sell_now = reload(&engine, &sell);
    assert_eq!(sell_now.pending_amount, qty("0.65"));
    assert_eq!(sell_now.trades.len(), 1);

    let buy2 = place(&engine, "BTC", Side::BUY, "43251.00", "0.65");
    assert!(buy2.pending_amount.is_zero());
    assert_eq!(buy2.trades.len(), 1);

    let sell_now = reload(&engine, &sell);
    assert!(sell_now.pending_amount.is_zero());
    assert_eq!(sell_now.trades.len(), 2);
    assert_eq!(sell_now.status(), OrderStatus::Filled);

    let buy0 = reload(&engine, &buy0);
    assert_eq!(buy0.pending_amount, qty("0.25"));
    assert!(buy0.trades.is_empty());

    assert_eq!(engine.resting_count("BTC"), 1);
}

#[test]
fn depth_reports_best_levels_first() {
    let engine = MatchingEngine::with_defaults();

    place(&engine, "BTC", Side::BUY, "99", "1");
    place(&engine, "BTC", Side::BUY, "101", "2");
    place(&engine, "BTC", Side::BUY, "101", "0.5");
    place(&engine, "BTC", Side::BUY, "100", "3");

    let depth = engine.depth("BTC", Side::BUY, 2);
    assert_eq!(
        depth,
        vec![
            (Price::from_u64(101), qty("2.5")),
            (Price::from_u64(100), qty("3")),
        ]
    );
    assert!(engine.depth("BTC", Side::SELL, 5).is_empty());
    assert!(engine.depth("ETH", Side::BUY, 5).is_empty());
}

#[test]
fn incoming_order_sweeps_several_levels() {
    let engine = MatchingEngine::with_defaults();

    let s100 = place(&engine, "BTC", Side::SELL, "100", "1");
    let s101 = place(&engine, "BTC", Side::SELL, "101", "1");
    let s102 = place(&engine, "BTC", Side::SELL, "102", "0.5");

    let buy = place(&engine, "BTC", Side::BUY, "105", "3");

    assert_eq!(buy.status(), OrderStatus::Partial);
    assert_eq!(buy.pending_amount, qty("0.5"));

    let fills: Vec<_> = buy
        .trades
        .iter()
        .map(|t| (t.counterparty_order_id, t.price, t.amount))
        .collect();
    assert_eq!(
        fills,
        vec![
            (s100.id, Price::from_u64(100), qty("1")),
            (s101.id, Price::from_u64(101), qty("1")),
            (s102.id, Price::from_u64(102), qty("0.5")),
        ]
    );

    for resting in [&s100, &s101, &s102] {
        assert_eq!(reload(&engine, resting).status(), OrderStatus::Filled);
    }
    assert!(engine.best_ask("BTC").is_none());
    assert_eq!(engine.best_bid("BTC"), Some((Price::from_u64(105), qty("0.5"))));
}

#[test]
fn huge_amounts_rest_on_one_level() {
    let engine = MatchingEngine::with_defaults();
    let huge = "50000000000000000000000000000";

    let first = place(&engine, "BTC", Side::BUY, "1", huge);
    let second = place(&engine, "BTC", Side::BUY, "1", huge);

    assert_eq!(engine.order_count(), 2);
    assert_eq!(engine.resting_count("BTC"), 2);
    assert_eq!(reload(&engine, &second).pending_amount, qty(huge));

    // Aggregated depth clamps instead of overflowing
    let (price, total) = engine.best_bid("BTC").unwrap();
    assert_eq!(price, Price::from_u64(1));
    assert_eq!(total.as_decimal(), Decimal::MAX);

    // The first order still matches ahead of the second
    let sell = place(&engine, "BTC", Side::SELL, "1", "1");
    assert_eq!(sell.trades[0].counterparty_order_id, first.id);
}
