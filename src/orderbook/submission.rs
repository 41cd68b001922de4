//! The order-submission entry point: validate → registry lookup → matcher → fan-out (§4.6).

use crate::decimal::{is_positive, Decimal};
use crate::orderbook::error::ValidationError;
use crate::orderbook::events::{BboSnapshot, DepthSnapshot, EventBus};
use crate::orderbook::matching::match_order;
use crate::orderbook::order::{Order, OrderType, Side};
use crate::orderbook::registry::BookRegistry;
use crate::orderbook::trade::Trade;
use crate::utils::SequenceGenerator;
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Wire request shape for an order submission (§6).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRequest {
    pub symbol: String,
    pub side: Side,
    pub order_type: OrderType,
    pub quantity: Decimal,
    pub price: Option<Decimal>,
}

/// Wire response shape for a submission (§6).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum SubmissionResult {
    Ok { trades: Vec<Trade> },
    Killed { reason: String },
}

/// Validates a request per §4.6 step 1: non-empty symbol, positive
/// quantity, and — for `LIMIT`/`IOC`/`FOK` — a positive price.
pub fn validate(req: &OrderRequest) -> Result<(), ValidationError> {
    if req.symbol.trim().is_empty() {
        return Err(ValidationError::MissingSymbol);
    }
    if !is_positive(req.quantity) {
        return Err(ValidationError::NonPositiveQuantity);
    }
    if req.order_type != OrderType::Market {
        match req.price {
            None => return Err(ValidationError::MissingPrice),
            Some(price) if !is_positive(price) => return Err(ValidationError::NonPositivePrice),
            Some(_) => {}
        }
    }
    Ok(())
}

/// Runs the full submission pipeline (§4.6):
///
/// 1. Validate the request.
/// 2. Look up or create the book for `symbol`.
/// 3. Under the book's exclusive lock: if the book is poisoned (§7), kill
///    this submission without touching it; if FOK, pre-check fillability
///    and either kill or proceed; otherwise match, then capture depth and
///    BBO. A match that violates an invariant poisons the book and this
///    submission is killed too — the lock is released either way, so other
///    symbols are unaffected and the process does not panic.
/// 4. After releasing the lock, publish trades, depth, and BBO, in order.
/// 5. Return the outcome, including any trades produced.
///
/// # Errors
/// Returns [`ValidationError`] if the request fails validation; no book is
/// touched and nothing is published in that case.
pub async fn submit_order(
    registry: &BookRegistry,
    events: &EventBus,
    sequence: &SequenceGenerator,
    req: OrderRequest,
) -> Result<SubmissionResult, ValidationError> {
    validate(&req)?;

    let book_handle = registry.get_or_create(&req.symbol);

    let outcome = {
        let mut book = book_handle.lock().expect("order book mutex poisoned");

        if book.is_poisoned() {
            let reason = book.poison_reason().unwrap_or("order book halted").to_string();
            return Ok(SubmissionResult::Killed { reason });
        }

        if req.order_type == OrderType::Fok {
            let limit_price = req.price.expect("validated: fok requires a price");
            let available = book.sum_available(req.side, limit_price);
            if available < req.quantity {
                return Ok(SubmissionResult::Killed {
                    reason: "FOK not fillable".to_string(),
                });
            }
        }

        let mut order = Order::new(
            req.symbol.clone(),
            req.side,
            req.order_type,
            req.quantity,
            req.price,
            sequence.next(),
        );

        let trades = match match_order(&mut order, &mut book) {
            Ok(trades) => trades,
            Err(err) => return Ok(SubmissionResult::Killed { reason: err.to_string() }),
        };

        let (asks, bids) = book.top_n(10);
        let depth = DepthSnapshot {
            timestamp: Utc::now(),
            symbol: req.symbol.clone(),
            asks,
            bids,
        };
        let bbo = BboSnapshot {
            symbol: req.symbol.clone(),
            best_bid: book.best_bid(),
            best_ask: book.best_ask(),
        };

        (trades, depth, bbo)
    }; // lock released here

    let (trades, depth, bbo) = outcome;
    events.publish_submission(&trades, depth, bbo);

    Ok(SubmissionResult::Ok { trades })
}
