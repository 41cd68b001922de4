//! The per-symbol order book: two price-indexed maps of price levels (§4.2).

use crate::decimal::Decimal;
use crate::orderbook::error::OrderBookError;
use crate::orderbook::order::{Order, Side};
use crate::orderbook::price_level::PriceLevel;
use std::collections::BTreeMap;

/// Two price-indexed maps of price levels for one symbol.
///
/// `bids` and `asks` are [`BTreeMap`]s — a balanced tree, one of the ordered
/// structures the design explicitly sanctions (§9 Design Notes) — keyed by
/// price, giving O(log n) insert/remove and ascending/descending iteration
/// with no separate sort step. A plain hash map cannot satisfy this contract.
///
/// Invariant: keys in `bids`/`asks` never index an empty level (§3); at rest,
/// `max(bids.keys) < min(asks.keys)` whenever both sides are non-empty.
#[derive(Debug, Clone)]
pub struct OrderBook {
    pub symbol: String,
    pub(crate) bids: BTreeMap<Decimal, PriceLevel>,
    pub(crate) asks: BTreeMap<Decimal, PriceLevel>,
    /// Set by the matcher when an invariant check fails (§7). Once set, the
    /// book refuses further mutation until an operator clears it.
    poisoned: Option<String>,
}

impl OrderBook {
    /// Creates an empty book for `symbol`.
    #[must_use]
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            bids: BTreeMap::new(),
            asks: BTreeMap::new(),
            poisoned: None,
        }
    }

    /// `true` once an internal invariant violation has been recorded (§7).
    #[must_use]
    pub fn is_poisoned(&self) -> bool {
        self.poisoned.is_some()
    }

    /// The diagnostic recorded when the book was poisoned, if any.
    #[must_use]
    pub fn poison_reason(&self) -> Option<&str> {
        self.poisoned.as_deref()
    }

    pub(crate) fn poison(&mut self, reason: impl Into<String>) {
        let reason = reason.into();
        tracing::error!(symbol = %self.symbol, reason = %reason, "order book invariant violated");
        self.poisoned = Some(reason);
    }

    /// The best (highest) bid price, or `None` if there are no bids.
    #[must_use]
    pub fn best_bid(&self) -> Option<Decimal> {
        self.bids.keys().next_back().copied()
    }

    /// The best (lowest) ask price, or `None` if there are no asks.
    #[must_use]
    pub fn best_ask(&self) -> Option<Decimal> {
        self.asks.keys().next().copied()
    }

    /// Up to `n` levels on each side, in price-priority order:
    /// `asks` ascending from best, `bids` descending from best (§4.2).
    #[must_use]
    pub fn top_n(&self, n: usize) -> (Vec<(Decimal, Decimal)>, Vec<(Decimal, Decimal)>) {
        let asks = self
            .asks
            .iter()
            .take(n)
            .map(|(price, level)| (*price, level.total_qty))
            .collect();
        let bids = self
            .bids
            .iter()
            .rev()
            .take(n)
            .map(|(price, level)| (*price, level.total_qty))
            .collect();
        (asks, bids)
    }

    /// Sums `total_qty` over levels on the opposite side of `taker_side`
    /// whose price is acceptable to a taker limited at `limit_price`: for a
    /// buy, `price <= limit_price`; for a sell, `price >= limit_price`.
    ///
    /// Used for the FOK pre-check (§4.3 step 3). Stops as soon as a level's
    /// price is no longer acceptable — the opposite side is sorted, so
    /// everything past that point is acceptable even less.
    #[must_use]
    pub fn sum_available(&self, taker_side: Side, limit_price: Decimal) -> Decimal {
        let mut total = Decimal::ZERO;
        match taker_side {
            Side::Buy => {
                for (price, level) in &self.asks {
                    if *price > limit_price {
                        break;
                    }
                    total += level.total_qty;
                }
            }
            Side::Sell => {
                for (price, level) in self.bids.iter().rev() {
                    if *price < limit_price {
                        break;
                    }
                    total += level.total_qty;
                }
            }
        }
        total
    }

    fn side_map(&mut self, side: Side) -> &mut BTreeMap<Decimal, PriceLevel> {
        match side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        }
    }

    /// Inserts `order` into the appropriate side, creating the level if
    /// absent. Rejects an order whose quantity is non-positive (§4.2).
    ///
    /// # Panics
    /// Panics if `order.price` is `None` — only priced orders may rest.
    pub fn add_limit(&mut self, order: Order) {
        if order.quantity <= Decimal::ZERO {
            return;
        }
        let price = order.price.expect("resting order must carry a price");
        let side = order.side;
        let level = self
            .side_map(side)
            .entry(price)
            .or_insert_with(|| PriceLevel::new(price));
        level.append(order);
    }

    /// Removes the level at `price` on `side` if present. Invoked internally
    /// once a level's `total_qty` reaches zero (§4.2, §4.3 step 5).
    pub(crate) fn remove_level(&mut self, side: Side, price: Decimal) {
        self.side_map(side).remove(&price);
    }

    /// Returns the level at `price` on `side`, for tests and inspection.
    #[must_use]
    pub fn level(&self, side: Side, price: Decimal) -> Option<&PriceLevel> {
        match side {
            Side::Buy => self.bids.get(&price),
            Side::Sell => self.asks.get(&price),
        }
    }

    /// Whether the book is non-crossed: `max(bids) < min(asks)` whenever
    /// both sides are non-empty (§3, §8 universal invariant).
    #[must_use]
    pub fn is_crossed(&self) -> bool {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => bid >= ask,
            _ => false,
        }
    }

    /// Checks and records (§7) the level-draining invariant: a level with
    /// `total_qty == 0` must never remain indexed.
    pub(crate) fn assert_no_empty_levels(&mut self) -> Result<(), OrderBookError> {
        let empty_bid = self.bids.iter().find(|(_, l)| l.total_qty.is_zero());
        let empty_ask = self.asks.iter().find(|(_, l)| l.total_qty.is_zero());
        if let Some((price, _)) = empty_bid.or(empty_ask) {
            let err = OrderBookError::EmptyLevelPersisted {
                price: price.to_string(),
            };
            self.poison(err.to_string());
            return Err(err);
        }
        Ok(())
    }
}
