//! Event fan-out: trade and market-data channels with best-effort delivery (§4.5, §6).

use crate::decimal::Decimal;
use crate::orderbook::trade::Trade;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::mpsc::UnboundedSender;
use tracing::warn;

/// Per-level depth entries in a [`DepthSnapshot`], serialized as `["<price>", "<qty>"]`.
pub type DepthLevel = (Decimal, Decimal);

/// Up to 10 levels per side, in price-priority order (§6).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepthSnapshot {
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub symbol: String,
    pub asks: Vec<DepthLevel>,
    pub bids: Vec<DepthLevel>,
}

/// Best bid and offer, each `null` when that side is empty (§6).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BboSnapshot {
    pub symbol: String,
    pub best_bid: Option<Decimal>,
    pub best_ask: Option<Decimal>,
}

/// Market-data messages, tagged on the wire by `"type"` (§6).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MarketDataMessage {
    Depth(DepthSnapshot),
    Bbo(BboSnapshot),
}

/// Identifies a subscription for later [`EventChannel::unsubscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// A broadcast channel with a dynamic set of subscriber endpoints.
///
/// `subscribe`/`unsubscribe` are idempotent; `publish` attempts delivery to
/// every current subscriber and silently drops any endpoint whose send
/// fails (§4.5). Iterating [`DashMap::iter`] already yields a point-in-time
/// view of the subscriber set, so a slow or failing subscriber discovered
/// mid-publish cannot stall or skip delivery to the others (§5).
#[derive(Debug)]
pub struct EventChannel<T> {
    subscribers: DashMap<SubscriptionId, UnboundedSender<T>>,
    next_id: AtomicU64,
}

impl<T> Default for EventChannel<T> {
    fn default() -> Self {
        Self {
            subscribers: DashMap::new(),
            next_id: AtomicU64::new(0),
        }
    }
}

impl<T: Clone> EventChannel<T> {
    /// Creates a channel with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `sender` as a subscriber and returns its id.
    pub fn subscribe(&self, sender: UnboundedSender<T>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.subscribers.insert(id, sender);
        id
    }

    /// Removes a subscriber. A no-op if `id` is not currently subscribed.
    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.subscribers.remove(&id);
    }

    /// Current number of live subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Delivers `message` to every current subscriber, dropping any whose
    /// send fails. Failures are not retried (§4.5).
    pub fn publish(&self, message: T) {
        let dead: Vec<SubscriptionId> = self
            .subscribers
            .iter()
            .filter_map(|entry| {
                if entry.value().send(message.clone()).is_err() {
                    Some(*entry.key())
                } else {
                    None
                }
            })
            .collect();
        for id in dead {
            warn!("dropping unreachable subscriber {:?}", id);
            self.subscribers.remove(&id);
        }
    }
}

/// The two process-wide event channels (§4.5).
///
/// Constructed explicitly and threaded through as a collaborator rather
/// than reached via an implicit singleton, so tests can instantiate
/// isolated engines (§9 "Global mutable state").
#[derive(Debug, Default)]
pub struct EventBus {
    pub trades: EventChannel<Trade>,
    pub market_data: EventChannel<MarketDataMessage>,
}

impl EventBus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Publishes a submission's trades, then its depth and BBO snapshots,
    /// in that order — the canonical per-submission ordering (§4.5, §5).
    pub fn publish_submission(&self, trades: &[Trade], depth: DepthSnapshot, bbo: BboSnapshot) {
        for trade in trades {
            self.trades.publish(trade.clone());
        }
        self.market_data.publish(MarketDataMessage::Depth(depth));
        self.market_data.publish(MarketDataMessage::Bbo(bbo));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;
    use tokio::sync::mpsc::unbounded_channel;

    #[test]
    fn publish_reaches_every_subscriber() {
        let channel: EventChannel<u32> = EventChannel::new();
        let (tx_a, mut rx_a) = unbounded_channel();
        let (tx_b, mut rx_b) = unbounded_channel();
        channel.subscribe(tx_a);
        channel.subscribe(tx_b);

        channel.publish(7);

        assert_eq!(rx_a.try_recv().unwrap(), 7);
        assert_eq!(rx_b.try_recv().unwrap(), 7);
    }

    #[test]
    fn dead_subscribers_are_dropped_on_failed_send() {
        let channel: EventChannel<u32> = EventChannel::new();
        let (tx, rx) = unbounded_channel();
        channel.subscribe(tx);
        drop(rx);

        assert_eq!(channel.subscriber_count(), 1);
        channel.publish(1);
        assert_eq!(channel.subscriber_count(), 0);
    }

    #[test]
    fn unsubscribe_is_idempotent() {
        let channel: EventChannel<u32> = EventChannel::new();
        let (tx, _rx) = unbounded_channel();
        let id = channel.subscribe(tx);
        channel.unsubscribe(id);
        channel.unsubscribe(id);
        assert_eq!(channel.subscriber_count(), 0);
    }

    #[test]
    fn submission_events_publish_trades_then_depth_then_bbo() {
        let bus = EventBus::new();
        let (trade_tx, mut trade_rx) = unbounded_channel();
        let (md_tx, mut md_rx) = unbounded_channel();
        bus.trades.subscribe(trade_tx);
        bus.market_data.subscribe(md_tx);

        let trade = Trade::new(
            "BTC-USDT",
            dec!(100),
            dec!(1),
            crate::orderbook::order::Side::Buy,
            crate::orderbook::order::Id::new(),
            crate::orderbook::order::Id::new(),
        );
        let depth = DepthSnapshot {
            timestamp: Utc::now(),
            symbol: "BTC-USDT".into(),
            asks: vec![],
            bids: vec![],
        };
        let bbo = BboSnapshot {
            symbol: "BTC-USDT".into(),
            best_bid: None,
            best_ask: None,
        };

        bus.publish_submission(&[trade], depth, bbo);

        assert!(trade_rx.try_recv().is_ok());
        match md_rx.try_recv().unwrap() {
            MarketDataMessage::Depth(_) => {}
            MarketDataMessage::Bbo(_) => panic!("depth must be published before bbo"),
        }
        match md_rx.try_recv().unwrap() {
            MarketDataMessage::Bbo(_) => {}
            MarketDataMessage::Depth(_) => panic!("unexpected second depth message"),
        }
    }

    #[test]
    fn bbo_wire_shape_reports_null_for_empty_sides() {
        let bbo = BboSnapshot {
            symbol: "BTC-USDT".into(),
            best_bid: None,
            best_ask: None,
        };
        let json = serde_json::to_value(&MarketDataMessage::Bbo(bbo)).unwrap();
        assert_eq!(json["type"], "bbo");
        assert!(json["best_bid"].is_null());
        assert!(json["best_ask"].is_null());
    }
}
