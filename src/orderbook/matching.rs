//! The matching algorithm: price-time priority over one symbol's book (§4.3).

use crate::decimal::Decimal;
use crate::orderbook::book::OrderBook;
use crate::orderbook::error::OrderBookError;
use crate::orderbook::order::{Order, OrderType, Side};
use crate::orderbook::trade::Trade;

/// Matches `incoming` against `book`, producing trades in walk order and
/// resting any LIMIT residual. The book is exclusively owned by the caller
/// for the duration of this call (§4.3); this function never yields.
///
/// `incoming.quantity` is mutated down to its residual as matching proceeds.
///
/// # Errors
/// Returns [`OrderBookError`] if an internal invariant is violated (§7).
/// The book is poisoned before the error is returned.
pub fn match_order(incoming: &mut Order, book: &mut OrderBook) -> Result<Vec<Trade>, OrderBookError> {
    let mut trades = Vec::new();
    let opposing_side = incoming.side.opposite();

    let acceptable = |price: Decimal| -> bool {
        match incoming.order_type {
            OrderType::Market => true,
            _ => {
                let limit = incoming
                    .price
                    .expect("limit/ioc/fok orders carry a price");
                match incoming.side {
                    Side::Buy => price <= limit,
                    Side::Sell => price >= limit,
                }
            }
        }
    };

    // Collect the acceptable opposing price keys up front, in walk order.
    // Prices are cheap Copy values, so this sidesteps holding a live
    // iterator over the map while levels are drained out of it below.
    let walk_prices: Vec<Decimal> = match incoming.side {
        Side::Buy => book
            .asks
            .keys()
            .copied()
            .take_while(|p| acceptable(*p))
            .collect(),
        Side::Sell => book
            .bids
            .keys()
            .rev()
            .copied()
            .take_while(|p| acceptable(*p))
            .collect(),
    };

    for price in walk_prices {
        if incoming.quantity.is_zero() {
            break;
        }
        let level = match opposing_side {
            Side::Buy => book.bids.get_mut(&price),
            Side::Sell => book.asks.get_mut(&price),
        };
        let Some(level) = level else { continue };

        while incoming.quantity > Decimal::ZERO {
            let Some(head) = level.head() else { break };
            let match_qty = incoming.quantity.min(head.quantity);
            let trade = Trade::new(
                incoming.symbol.clone(),
                level.price,
                match_qty,
                incoming.side,
                head.id,
                incoming.id,
            );
            trades.push(trade);

            level.decrement_head(match_qty);
            incoming.quantity -= match_qty;
        }

        if level.total_qty.is_zero() {
            book.remove_level(opposing_side, price);
        }
    }

    if incoming.quantity < Decimal::ZERO {
        let err = OrderBookError::NegativeResidual {
            remaining: incoming.quantity.to_string(),
        };
        book.poison(err.to_string());
        return Err(err);
    }

    book.assert_no_empty_levels()?;

    // Residual handling (§4.3 step 7).
    match incoming.order_type {
        OrderType::Market | OrderType::Ioc => {
            // Discarded: no rest, no separate kill status.
        }
        OrderType::Fok => {
            debug_assert!(
                incoming.quantity.is_zero(),
                "FOK residual after a pre-checked fill is an engine bug"
            );
        }
        OrderType::Limit => {
            if incoming.quantity > Decimal::ZERO {
                book.add_limit(incoming.clone());
            }
        }
    }

    Ok(trades)
}
