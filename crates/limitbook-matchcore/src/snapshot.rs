//! Read-only views of the book for display and inspection.

use limitbook_types::OrderId;
use rust_decimal::Decimal;
use serde::Serialize;

/// One resting order as seen from outside the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RestingOrderView {
    pub price: Decimal,
    /// Remaining (open) quantity.
    pub quantity: u64,
    pub id: OrderId,
}

/// Every resting order on both sides, in priority order: asks ascending,
/// bids descending, FIFO within a level.
#[derive(Debug, Clone, Serialize)]
pub struct BookSnapshot {
    pub symbol: String,
    pub asks: Vec<RestingOrderView>,
    pub bids: Vec<RestingOrderView>,
}

impl BookSnapshot {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.asks.is_empty() && self.bids.is_empty()
    }
}

/// Aggregated quantity at one price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DepthLevel {
    pub price: Decimal,
    pub total_qty: u64,
    pub order_count: usize,
}

/// Top-of-book depth for both sides.
#[derive(Debug, Clone, Serialize)]
pub struct BookDepth {
    pub symbol: String,
    pub asks: Vec<DepthLevel>,
    pub bids: Vec<DepthLevel>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_snapshot() {
        let snap = BookSnapshot {
            symbol: "X".to_string(),
            asks: vec![],
            bids: vec![],
        };
        assert!(snap.is_empty());
    }

    #[test]
    fn snapshot_serializes_prices_as_strings() {
        let snap = BookSnapshot {
            symbol: "BTC-USD".to_string(),
            asks: vec![RestingOrderView {
                price: Decimal::new(1005, 1),
                quantity: 3,
                id: OrderId(4),
            }],
            bids: vec![],
        };
        let json = serde_json::to_value(&snap).unwrap();
        assert_eq!(json["asks"][0]["price"], "100.5");
        assert_eq!(json["asks"][0]["quantity"], 3);
        assert_eq!(json["asks"][0]["id"], 4);
        assert!(!snap.is_empty());
    }
}
