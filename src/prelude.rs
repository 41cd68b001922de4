//! Prelude module that re-exports commonly used types.
//!
//! Instead of importing each type individually, use:
//!
//! ```rust
//! use matching_core::prelude::*;
//! ```

pub use crate::decimal::Decimal;
pub use crate::orderbook::{
    BboSnapshot, BookRegistry, DepthLevel, DepthSnapshot, EventBus, EventChannel, Id,
    MarketDataMessage, Order, OrderBook, OrderBookError, OrderRequest, OrderType, Side,
    SubmissionResult, SubscriptionId, Trade, ValidationError, match_order, submit_order, validate,
};
pub use crate::utils::SequenceGenerator;
