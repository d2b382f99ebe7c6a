//! Order types for the limitbook matching engine.
//!
//! Only plain limit orders exist. An order is created by the engine on
//! `add_order`, may be consumed during the same call, and otherwise rests
//! until it is filled or cancelled.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{LimitbookError, OrderId};

/// Which side of the book this order is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum OrderSide {
    Buy,
    Sell,
}

impl OrderSide {
    /// Whether an order on this side limited at `limit` can trade against
    /// a resting order priced at `resting`.
    ///
    /// Buys cross when `limit >= resting`, sells when `limit <= resting`.
    #[must_use]
    pub fn crosses(self, limit: Decimal, resting: Decimal) -> bool {
        match self {
            Self::Buy => limit >= resting,
            Self::Sell => limit <= resting,
        }
    }
}

impl std::fmt::Display for OrderSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Buy => write!(f, "BUY"),
            Self::Sell => write!(f, "SELL"),
        }
    }
}

impl FromStr for OrderSide {
    type Err = LimitbookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "BUY" | "B" | "BID" => Ok(Self::Buy),
            "SELL" | "S" | "ASK" => Ok(Self::Sell),
            _ => Err(LimitbookError::InvalidSide(s.trim().to_string())),
        }
    }
}

/// A limit order.
///
/// `quantity` is the size originally submitted; `remaining_qty` is what is
/// still open and is the only field mutated by matching. A resting order
/// always has `remaining_qty > 0`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub side: OrderSide,
    pub price: Decimal,
    pub quantity: u64,
    pub remaining_qty: u64,
    /// Engine arrival counter (time priority, diagnostics only).
    pub sequence: u64,
}

impl Order {
    /// Build a fresh limit order with nothing filled yet.
    #[must_use]
    pub fn limit(id: OrderId, side: OrderSide, price: Decimal, quantity: u64) -> Self {
        Self {
            id,
            side,
            price,
            quantity,
            remaining_qty: quantity,
            sequence: 0,
        }
    }

    /// Reduce the open quantity by `qty`.
    ///
    /// Callers must never fill more than `remaining_qty`.
    pub fn fill(&mut self, qty: u64) {
        debug_assert!(qty <= self.remaining_qty, "overfill of order {}", self.id);
        self.remaining_qty -= qty;
    }

    #[must_use]
    pub fn is_filled(&self) -> bool {
        self.remaining_qty == 0
    }

    #[must_use]
    pub fn filled_qty(&self) -> u64 {
        self.quantity - self.remaining_qty
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_side_display() {
        assert_eq!(format!("{}", OrderSide::Buy), "BUY");
        assert_eq!(format!("{}", OrderSide::Sell), "SELL");
    }

    #[test]
    fn order_side_parse() {
        assert_eq!("buy".parse::<OrderSide>().unwrap(), OrderSide::Buy);
        assert_eq!(" SELL ".parse::<OrderSide>().unwrap(), OrderSide::Sell);
        assert_eq!("ask".parse::<OrderSide>().unwrap(), OrderSide::Sell);
    }

    #[test]
    fn order_side_parse_rejects_unknown() {
        let err = "hold".parse::<OrderSide>().unwrap_err();
        assert!(matches!(err, LimitbookError::InvalidSide(ref s) if s == "hold"));
    }

    #[test]
    fn crossing_rules() {
        let hundred = Decimal::new(100, 0);
        let ninety_nine = Decimal::new(99, 0);
        assert!(OrderSide::Buy.crosses(hundred, hundred));
        assert!(OrderSide::Buy.crosses(hundred, ninety_nine));
        assert!(!OrderSide::Buy.crosses(ninety_nine, hundred));
        assert!(OrderSide::Sell.crosses(ninety_nine, hundred));
        assert!(!OrderSide::Sell.crosses(hundred, ninety_nine));
    }

    #[test]
    fn fill_tracking() {
        let mut order = Order::limit(OrderId(1), OrderSide::Buy, Decimal::new(100, 0), 10);
        assert!(!order.is_filled());
        order.fill(4);
        assert_eq!(order.remaining_qty, 6);
        assert_eq!(order.filled_qty(), 4);
        order.fill(6);
        assert!(order.is_filled());
        assert_eq!(order.quantity, 10);
    }
}
