//! Trade records produced by the matching engine.
//!
//! A [`Trade`] is the immutable record of one match step between the
//! incoming order and the oldest resting order at the best opposite price.
//! It always executes at the resting order's price.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{OrderId, OrderSide, TradeId};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trade {
    /// Engine fill sequence number.
    pub id: TradeId,
    /// Instrument the engine serves.
    pub symbol: String,
    /// The order being submitted when the match happened.
    pub incoming_order_id: OrderId,
    /// The order that was resting in the book.
    pub resting_order_id: OrderId,
    /// Side of the incoming order.
    pub incoming_side: OrderSide,
    /// Execution price (the resting order's price).
    pub price: Decimal,
    /// Executed quantity.
    pub quantity: u64,
    pub executed_at: DateTime<Utc>,
}

impl Trade {
    /// Price × quantity, or `None` if the product exceeds `Decimal` range.
    #[must_use]
    pub fn notional(&self) -> Option<Decimal> {
        self.price.checked_mul(Decimal::from(self.quantity))
    }
}

impl std::fmt::Display for Trade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Trade: {} @ {} (Order {} vs Order {})",
            self.quantity, self.price, self.incoming_order_id, self.resting_order_id,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_trade() -> Trade {
        Trade {
            id: TradeId(1),
            symbol: "BTC-USD".to_string(),
            incoming_order_id: OrderId(2),
            resting_order_id: OrderId(1),
            incoming_side: OrderSide::Buy,
            price: Decimal::new(10050, 2),
            quantity: 4,
            executed_at: Utc::now(),
        }
    }

    #[test]
    fn trade_notional() {
        assert_eq!(make_trade().notional(), Some(Decimal::new(402, 0)));
    }

    #[test]
    fn notional_out_of_range_is_none() {
        let mut trade = make_trade();
        trade.price = Decimal::from_i128_with_scale(100_000_000_000_000_000_000, 0);
        trade.quantity = 10_000_000_000;
        assert_eq!(trade.notional(), None);
    }

    #[test]
    fn trade_display() {
        let s = format!("{}", make_trade());
        assert_eq!(s, "Trade: 4 @ 100.50 (Order 2 vs Order 1)");
    }

    #[test]
    fn trade_serde_roundtrip() {
        let trade = make_trade();
        let json = serde_json::to_string(&trade).unwrap();
        let back: Trade = serde_json::from_str(&json).unwrap();
        assert_eq!(trade.id, back.id);
        assert_eq!(trade.price, back.price);
        assert_eq!(trade.quantity, back.quantity);
        assert_eq!(trade.resting_order_id, back.resting_order_id);
    }
}
