//! One side of the order book.
//!
//! Uses `BTreeMap` for price-level ordering:
//! - **Bids**: keyed by `Reverse<Decimal>` -- highest price first
//! - **Asks**: keyed by `Decimal` -- lowest price first
//!
//! Both are the same [`BookSide`] type, parameterized by the key, so the
//! first level returned by iteration is always the best price.

use std::cmp::Reverse;
use std::collections::BTreeMap;

use limitbook_types::{Order, OrderId};
use rust_decimal::Decimal;

use crate::price_level::PriceLevel;
use crate::snapshot::{DepthLevel, RestingOrderView};

/// Map key that decides the iteration order of a [`BookSide`].
pub trait LevelKey: Ord + Copy + std::fmt::Debug {
    fn from_price(price: Decimal) -> Self;
}

impl LevelKey for Decimal {
    fn from_price(price: Decimal) -> Self {
        price
    }
}

impl LevelKey for Reverse<Decimal> {
    fn from_price(price: Decimal) -> Self {
        Reverse(price)
    }
}

/// Buy side: highest price first.
pub type BidSide = BookSide<Reverse<Decimal>>;
/// Sell side: lowest price first.
pub type AskSide = BookSide<Decimal>;

/// Price levels for one side, in priority order. Holds no empty levels.
#[derive(Debug)]
pub struct BookSide<K: LevelKey> {
    levels: BTreeMap<K, PriceLevel>,
}

impl<K: LevelKey> Default for BookSide<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: LevelKey> BookSide<K> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            levels: BTreeMap::new(),
        }
    }

    /// Append an order to the tail of its price level, creating the level
    /// if needed.
    pub fn insert(&mut self, order: Order) {
        let price = order.price;
        self.levels
            .entry(K::from_price(price))
            .or_insert_with(|| PriceLevel::new(price))
            .push_back(order);
    }

    /// Remove one order from the level at `price`. Drops the level if it
    /// becomes empty.
    pub fn remove_order(&mut self, price: Decimal, order_id: OrderId) -> Option<Order> {
        let key = K::from_price(price);
        let level = self.levels.get_mut(&key)?;
        let order = level.remove_order(order_id)?;
        if level.is_empty() {
            self.levels.remove(&key);
        }
        Some(order)
    }

    /// Drop the level at `price` outright.
    pub fn remove_level(&mut self, price: Decimal) -> Option<PriceLevel> {
        self.levels.remove(&K::from_price(price))
    }

    #[must_use]
    pub fn best_price(&self) -> Option<Decimal> {
        self.levels.values().next().map(|level| level.price)
    }

    #[must_use]
    pub fn best_level(&self) -> Option<&PriceLevel> {
        self.levels.values().next()
    }

    pub fn best_level_mut(&mut self) -> Option<&mut PriceLevel> {
        self.levels.values_mut().next()
    }

    #[must_use]
    pub fn level(&self, price: Decimal) -> Option<&PriceLevel> {
        self.levels.get(&K::from_price(price))
    }

    /// Levels from best to worst.
    pub fn levels(&self) -> impl Iterator<Item = &PriceLevel> {
        self.levels.values()
    }

    /// Number of distinct price levels.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.levels.len()
    }

    #[must_use]
    pub fn order_count(&self) -> usize {
        self.levels.values().map(PriceLevel::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Every resting order as `(price, quantity, id)`, best price first,
    /// FIFO within a level.
    #[must_use]
    pub fn resting_views(&self) -> Vec<RestingOrderView> {
        self.levels
            .values()
            .flat_map(|level| {
                level.iter().map(move |order| RestingOrderView {
                    price: level.price,
                    quantity: order.remaining_qty,
                    id: order.id,
                })
            })
            .collect()
    }

    /// Aggregated view of the best `max_levels` levels.
    #[must_use]
    pub fn depth_levels(&self, max_levels: usize) -> Vec<DepthLevel> {
        self.levels
            .values()
            .take(max_levels)
            .map(|level| DepthLevel {
                price: level.price,
                total_qty: level.total_quantity(),
                order_count: level.len(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use limitbook_types::OrderSide;

    use super::*;

    fn dec(n: i64) -> Decimal {
        Decimal::new(n, 0)
    }

    fn order(id: u64, side: OrderSide, price: i64, qty: u64) -> Order {
        Order::limit(OrderId(id), side, dec(price), qty)
    }

    #[test]
    fn bid_levels_iterate_highest_first() {
        let mut bids = BidSide::new();
        bids.insert(order(1, OrderSide::Buy, 90, 1));
        bids.insert(order(2, OrderSide::Buy, 100, 1));
        bids.insert(order(3, OrderSide::Buy, 95, 1));

        let prices: Vec<Decimal> = bids.levels().map(|l| l.price).collect();
        assert_eq!(prices, vec![dec(100), dec(95), dec(90)]);
        assert_eq!(bids.best_price(), Some(dec(100)));
    }

    #[test]
    fn ask_levels_iterate_lowest_first() {
        let mut asks = AskSide::new();
        asks.insert(order(1, OrderSide::Sell, 110, 1));
        asks.insert(order(2, OrderSide::Sell, 101, 1));
        asks.insert(order(3, OrderSide::Sell, 105, 1));

        let prices: Vec<Decimal> = asks.levels().map(|l| l.price).collect();
        assert_eq!(prices, vec![dec(101), dec(105), dec(110)]);
        assert_eq!(asks.best_price(), Some(dec(101)));
    }

    #[test]
    fn same_price_shares_level() {
        let mut asks = AskSide::new();
        asks.insert(order(1, OrderSide::Sell, 100, 2));
        asks.insert(order(2, OrderSide::Sell, 100, 3));
        assert_eq!(asks.depth(), 1);
        assert_eq!(asks.order_count(), 2);
        assert_eq!(asks.level(dec(100)).unwrap().total_quantity(), 5);
    }

    #[test]
    fn removing_last_order_drops_level() {
        let mut bids = BidSide::new();
        bids.insert(order(1, OrderSide::Buy, 100, 1));
        bids.insert(order(2, OrderSide::Buy, 99, 1));

        let removed = bids.remove_order(dec(100), OrderId(1)).unwrap();
        assert_eq!(removed.id, OrderId(1));
        assert_eq!(bids.depth(), 1);
        assert!(bids.level(dec(100)).is_none());
        assert_eq!(bids.best_price(), Some(dec(99)));
    }

    #[test]
    fn remove_from_wrong_price_is_none() {
        let mut asks = AskSide::new();
        asks.insert(order(1, OrderSide::Sell, 100, 1));
        assert!(asks.remove_order(dec(101), OrderId(1)).is_none());
        assert_eq!(asks.order_count(), 1);
    }

    #[test]
    fn resting_views_follow_priority() {
        let mut bids = BidSide::new();
        bids.insert(order(1, OrderSide::Buy, 99, 4));
        bids.insert(order(2, OrderSide::Buy, 100, 5));
        bids.insert(order(3, OrderSide::Buy, 100, 6));

        let ids: Vec<u64> = bids.resting_views().iter().map(|v| v.id.0).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn depth_levels_aggregate_and_truncate() {
        let mut asks = AskSide::new();
        asks.insert(order(1, OrderSide::Sell, 101, 4));
        asks.insert(order(2, OrderSide::Sell, 101, 6));
        asks.insert(order(3, OrderSide::Sell, 102, 1));
        asks.insert(order(4, OrderSide::Sell, 103, 1));

        let depth = asks.depth_levels(2);
        assert_eq!(depth.len(), 2);
        assert_eq!(depth[0].price, dec(101));
        assert_eq!(depth[0].total_qty, 10);
        assert_eq!(depth[0].order_count, 2);
        assert_eq!(depth[1].price, dec(102));
    }

    #[test]
    fn empty_side() {
        let side = AskSide::default();
        assert!(side.is_empty());
        assert_eq!(side.best_price(), None);
        assert!(side.best_level().is_none());
        assert!(side.resting_views().is_empty());
    }
}
