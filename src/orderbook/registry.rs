//! Symbol → book registry, serialising mutation per symbol (§4.4).

use crate::orderbook::book::OrderBook;
use dashmap::DashMap;
use std::sync::{Arc, Mutex};
use tracing::info;

/// Maps `symbol -> OrderBook`, lazily creating a book on first reference.
///
/// Different symbols are fully independent: the registry mapping itself is
/// read-mostly and safe under concurrent readers via [`DashMap`]'s
/// insert-or-get `entry` API, and each book is wrapped in its own
/// [`std::sync::Mutex`] that guarantees at most one concurrent matching
/// operation per symbol. A `std::sync::Mutex` rather than an async mutex is
/// deliberate: the critical section it guards (matching plus snapshot
/// capture, §4.6 step 3) never suspends, so holding a std guard across an
/// `.await` — which would be a bug — simply does not compile.
#[derive(Debug, Default)]
pub struct BookRegistry {
    books: DashMap<String, Arc<Mutex<OrderBook>>>,
}

impl BookRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            books: DashMap::new(),
        }
    }

    /// Returns the book for `symbol`, creating it on first reference.
    pub fn get_or_create(&self, symbol: &str) -> Arc<Mutex<OrderBook>> {
        self.books
            .entry(symbol.to_string())
            .or_insert_with(|| {
                info!(symbol, "created order book");
                Arc::new(Mutex::new(OrderBook::new(symbol)))
            })
            .clone()
    }

    /// Returns the book for `symbol` if it already exists, without creating one.
    #[must_use]
    pub fn get(&self, symbol: &str) -> Option<Arc<Mutex<OrderBook>>> {
        self.books.get(symbol).map(|entry| entry.clone())
    }

    /// The symbols with a book currently registered.
    #[must_use]
    pub fn symbols(&self) -> Vec<String> {
        self.books.iter().map(|entry| entry.key().clone()).collect()
    }
}
