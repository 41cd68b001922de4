//! # Continuous Limit-Order-Book Matching Engine
//!
//! A per-symbol matching subsystem for a continuous limit-order-book
//! exchange: a price-ordered order book, a price-time-priority matching
//! algorithm over `MARKET`/`LIMIT`/`IOC`/`FOK` orders, a trade-emission
//! protocol, and a concurrency model that serialises mutation per symbol
//! while fanning out trade and market-data events to subscribers.
//!
//! ## Scope
//!
//! This crate is the core matching subsystem only. The inbound request
//! surface (HTTP order submission and its field-shape validation), the
//! outbound subscriber transport (long-lived duplex sessions), process
//! bootstrap, and persistence are external collaborators, not designed
//! here — see [`orderbook::submit_order`] for the seam a transport layer
//! plugs into.
//!
//! ## Concurrency model
//!
//! Each symbol's [`orderbook::OrderBook`] is owned by exactly one
//! [`std::sync::Mutex`], held by [`orderbook::BookRegistry`]. Submissions
//! for the same symbol are totally ordered by acquisition order of that
//! lock; different symbols never contend with each other. The matching
//! operation itself never suspends once the lock is held — this is the
//! invariant that prevents interleaved mutation of the same book.
//!
//! ## Non-goals
//!
//! Self-trade prevention, iceberg/hidden orders, order cancel/replace,
//! pro-rata allocation, cross-book arbitrage, priced market orders with
//! slippage bounds, fee computation, risk checks and position tracking,
//! and multi-venue routing are out of scope for this crate.

pub mod decimal;
pub mod orderbook;
pub mod prelude;
pub mod utils;

pub use orderbook::{
    BboSnapshot, BookRegistry, DepthSnapshot, EventBus, Id, MarketDataMessage, Order, OrderBook,
    OrderBookError, OrderRequest, OrderType, Side, SubmissionResult, Trade, ValidationError,
};
