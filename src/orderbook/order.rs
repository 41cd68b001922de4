//! Order identity, side, type, and the resting/incoming order record.

use crate::decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque, globally unique order identifier assigned at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Id(Uuid);

impl Id {
    /// Generates a fresh, unique identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for Id {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which side of the book an order or trade belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// The opposite side, used to pick which map of the book an incoming
    /// order consumes (§4.3 step 1).
    #[must_use]
    pub fn opposite(self) -> Side {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => write!(f, "buy"),
            Side::Sell => write!(f, "sell"),
        }
    }
}

/// Order type, determining price-acceptability and residual handling (§4.3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    /// Executes at any price until exhausted; never rests.
    Market,
    /// Rests the unfilled remainder on the book.
    Limit,
    /// Immediate-or-cancel: fills what it can, discards the remainder.
    Ioc,
    /// Fill-or-kill: fills completely or not at all.
    Fok,
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OrderType::Market => "market",
            OrderType::Limit => "limit",
            OrderType::Ioc => "ioc",
            OrderType::Fok => "fok",
        };
        write!(f, "{s}")
    }
}

/// An order, either freshly submitted or resting on a book.
///
/// Invariant: while resting on a book, `quantity` is strictly positive and
/// `price` equals the parent [`crate::orderbook::price_level::PriceLevel`]'s
/// price (§3).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: Id,
    pub symbol: String,
    pub side: Side,
    pub order_type: OrderType,
    /// Remaining quantity; mutates downward as maker during matching.
    pub quantity: Decimal,
    /// Required for `LIMIT`/`IOC`/`FOK`; absent for `MARKET`.
    pub price: Option<Decimal>,
    /// Monotonic arrival sequence number; breaks ties within a price level.
    pub timestamp: u64,
}

impl Order {
    /// Constructs a new order. Callers are responsible for validating field
    /// shapes and positivity before calling this (§4.6 step 1 is the single
    /// validation gate, enforced by the submission entry point).
    #[must_use]
    pub fn new(
        symbol: impl Into<String>,
        side: Side,
        order_type: OrderType,
        quantity: Decimal,
        price: Option<Decimal>,
        timestamp: u64,
    ) -> Self {
        Self {
            id: Id::new(),
            symbol: symbol.into(),
            side,
            order_type,
            quantity,
            price,
            timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn opposite_side_round_trips() {
        assert_eq!(Side::Buy.opposite(), Side::Sell);
        assert_eq!(Side::Sell.opposite(), Side::Buy);
    }

    #[test]
    fn order_ids_are_unique() {
        let a = Order::new("BTC-USDT", Side::Buy, OrderType::Limit, dec!(1), Some(dec!(100)), 0);
        let b = Order::new("BTC-USDT", Side::Buy, OrderType::Limit, dec!(1), Some(dec!(100)), 1);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn side_wire_format_is_lowercase() {
        assert_eq!(serde_json::to_string(&Side::Buy).unwrap(), "\"buy\"");
        assert_eq!(serde_json::to_string(&OrderType::Fok).unwrap(), "\"fok\"");
    }
}
