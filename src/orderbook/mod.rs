//! Per-symbol matching subsystem: book, matcher, registry, and event fan-out.

mod book;
mod error;
mod events;
mod matching;
mod order;
mod price_level;
mod registry;
mod submission;
mod trade;

pub use book::OrderBook;
pub use error::{OrderBookError, ValidationError};
pub use events::{BboSnapshot, DepthLevel, DepthSnapshot, EventBus, EventChannel, MarketDataMessage, SubscriptionId};
pub use matching::match_order;
pub use order::{Id, Order, OrderType, Side};
pub use price_level::PriceLevel;
pub use registry::BookRegistry;
pub use submission::{submit_order, validate, OrderRequest, SubmissionResult};
pub use trade::Trade;
