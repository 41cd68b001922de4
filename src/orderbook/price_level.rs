//! A single price level: the FIFO queue of resting orders sharing one price.

use crate::decimal::Decimal;
use crate::orderbook::order::Order;
use std::collections::VecDeque;

/// Aggregate of resting orders at one price, FIFO within the level (§4.1).
///
/// Invariant: `total_qty` equals the sum of `quantity` over `orders`. A
/// level whose `total_qty` reaches zero is removed from its book by the
/// caller (the level itself never reaches back into the book).
#[derive(Debug, Clone)]
pub struct PriceLevel {
    pub price: Decimal,
    pub total_qty: Decimal,
    orders: VecDeque<Order>,
}

impl PriceLevel {
    /// Creates an empty level at `price`.
    #[must_use]
    pub fn new(price: Decimal) -> Self {
        Self {
            price,
            total_qty: Decimal::ZERO,
            orders: VecDeque::new(),
        }
    }

    /// Pushes `order` at the tail and folds its quantity into `total_qty`.
    pub fn append(&mut self, order: Order) {
        debug_assert_eq!(order.price, Some(self.price));
        self.total_qty += order.quantity;
        self.orders.push_back(order);
    }

    /// Peeks the oldest resting order without removing it.
    #[must_use]
    pub fn head(&self) -> Option<&Order> {
        self.orders.front()
    }

    /// Removes and returns the head order. The caller is responsible for
    /// `total_qty` accounting (§4.1) — typically because it has already
    /// been decremented as part of a partial fill via [`Self::decrement_head`].
    pub fn pop_head(&mut self) -> Option<Order> {
        self.orders.pop_front()
    }

    /// Subtracts `qty` from the head order's remaining quantity and from
    /// `total_qty`; if the head reaches zero it is popped.
    ///
    /// # Panics
    /// Panics if the level is empty or `qty` exceeds the head's remaining
    /// quantity — both indicate a matcher bug, not a runtime condition.
    pub fn decrement_head(&mut self, qty: Decimal) {
        let head = self.orders.front_mut().expect("decrement_head on empty level");
        assert!(qty <= head.quantity, "decrement exceeds head's remaining quantity");
        head.quantity -= qty;
        self.total_qty -= qty;
        if head.quantity.is_zero() {
            self.orders.pop_front();
        }
    }

    /// Number of orders currently resting at this level.
    #[must_use]
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    /// Whether the level holds no orders.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}
