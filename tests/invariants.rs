//! Universal invariants that must hold after any sequence of submissions (§8).

use matching_core::prelude::*;
use proptest::prelude::*;
use rust_decimal_macros::dec;

fn engine() -> (BookRegistry, EventBus, SequenceGenerator) {
    (BookRegistry::new(), EventBus::new(), SequenceGenerator::new())
}

fn limit(symbol: &str, side: Side, price: Decimal, qty: Decimal) -> OrderRequest {
    OrderRequest {
        symbol: symbol.to_string(),
        side,
        order_type: OrderType::Limit,
        quantity: qty,
        price: Some(price),
    }
}

#[tokio::test]
async fn resting_limit_residual_equals_incoming_minus_filled() {
    let (registry, events, seq) = engine();
    submit_order(&registry, &events, &seq, limit("BTC-USDT", Side::Sell, dec!(100), dec!(1)))
        .await
        .unwrap();

    let incoming_qty = dec!(4);
    let result = submit_order(
        &registry,
        &events,
        &seq,
        limit("BTC-USDT", Side::Buy, dec!(100), incoming_qty),
    )
    .await
    .unwrap();

    let filled: Decimal = match result {
        SubmissionResult::Ok { trades } => trades.iter().map(|t| t.quantity).sum(),
        SubmissionResult::Killed { .. } => panic!("limit orders never kill"),
    };

    let book = registry.get_or_create("BTC-USDT");
    let book = book.lock().unwrap();
    let residual = book.level(Side::Buy, dec!(100)).map_or(Decimal::ZERO, |l| l.total_qty);
    assert_eq!(residual, incoming_qty - filled);
}

#[tokio::test]
async fn fully_rested_submission_increases_sum_available_by_its_quantity() {
    let (registry, events, seq) = engine();
    let qty = dec!(5);
    submit_order(&registry, &events, &seq, limit("BTC-USDT", Side::Sell, dec!(100), qty))
        .await
        .unwrap();

    let book = registry.get_or_create("BTC-USDT");
    let book = book.lock().unwrap();
    assert_eq!(book.sum_available(Side::Buy, dec!(100)), qty);
}

#[tokio::test]
async fn market_against_empty_book_yields_no_trades_and_no_rest() {
    let (registry, events, seq) = engine();
    let req = OrderRequest {
        symbol: "BTC-USDT".to_string(),
        side: Side::Buy,
        order_type: OrderType::Market,
        quantity: dec!(10),
        price: None,
    };
    let result = submit_order(&registry, &events, &seq, req).await.unwrap();
    match result {
        SubmissionResult::Ok { trades } => assert!(trades.is_empty()),
        SubmissionResult::Killed { .. } => panic!("market orders never kill"),
    }

    let book = registry.get_or_create("BTC-USDT");
    let book = book.lock().unwrap();
    assert_eq!(book.best_bid(), None);
    assert_eq!(book.best_ask(), None);
}

#[tokio::test]
async fn book_never_crosses_after_any_resting_sequence() {
    let (registry, events, seq) = engine();
    for (side, price, qty) in [
        (Side::Buy, dec!(99), dec!(1)),
        (Side::Sell, dec!(101), dec!(1)),
        (Side::Buy, dec!(98), dec!(2)),
        (Side::Sell, dec!(103), dec!(2)),
    ] {
        submit_order(&registry, &events, &seq, limit("BTC-USDT", side, price, qty))
            .await
            .unwrap();
    }

    let book = registry.get_or_create("BTC-USDT");
    let book = book.lock().unwrap();
    assert!(!book.is_crossed());
}

fn cents(raw: i64) -> Decimal {
    Decimal::new(raw.max(1), 2)
}

proptest! {
    /// For any sequence of crossing marketable limit orders on one side,
    /// the sum of trade quantities produced by a single submission never
    /// exceeds that submission's incoming quantity (§8 Conservation).
    #[test]
    fn conservation_holds_for_arbitrary_sweeps(
        resting_prices in prop::collection::vec(1_i64..10_000, 1..8),
        resting_qty in 1_i64..10_000,
        incoming_qty in 1_i64..50_000,
    ) {
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async {
            let (registry, events, seq) = engine();
            for raw_price in &resting_prices {
                submit_order(
                    &registry,
                    &events,
                    &seq,
                    limit("BTC-USDT", Side::Sell, cents(*raw_price), cents(resting_qty)),
                )
                .await
                .unwrap();
            }

            let req = OrderRequest {
                symbol: "BTC-USDT".to_string(),
                side: Side::Buy,
                order_type: OrderType::Market,
                quantity: cents(incoming_qty),
                price: None,
            };
            let result = submit_order(&registry, &events, &seq, req).await.unwrap();
            let filled: Decimal = match result {
                SubmissionResult::Ok { trades } => trades.iter().map(|t| t.quantity).sum(),
                SubmissionResult::Killed { .. } => Decimal::ZERO,
            };
            prop_assert!(filled <= cents(incoming_qty));

            let book = registry.get_or_create("BTC-USDT");
            let book = book.lock().unwrap();
            prop_assert!(!book.is_crossed());
            Ok(())
        })?;
    }
}
