//! Immutable trade events produced by the matcher (§3, §6).

use crate::decimal::Decimal;
use crate::orderbook::order::{Id, Side};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An immutable record of one fill produced during a single submission's
/// walk (§3). The engine does not retain a trade log; trades are emitted to
/// the event fan-out and otherwise forgotten (§3 "Lifecycles").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub trade_id: Id,
    pub timestamp: DateTime<Utc>,
    pub symbol: String,
    /// The maker's resting price at the moment of the trade.
    pub price: Decimal,
    pub quantity: Decimal,
    pub aggressor_side: Side,
    pub maker_order_id: Id,
    pub taker_order_id: Id,
}

impl Trade {
    #[must_use]
    pub fn new(
        symbol: impl Into<String>,
        price: Decimal,
        quantity: Decimal,
        aggressor_side: Side,
        maker_order_id: Id,
        taker_order_id: Id,
    ) -> Self {
        Self {
            trade_id: Id::new(),
            timestamp: Utc::now(),
            symbol: symbol.into(),
            price,
            quantity,
            aggressor_side,
            maker_order_id,
            taker_order_id,
        }
    }
}
