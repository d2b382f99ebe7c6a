//! Order id -> resting location index.
//!
//! The registry never holds a reference into a price level. It records the
//! side and price, and the order itself is found by querying that level at
//! lookup time, which keeps cancellation O(log N) plus a scan of one level.

use std::collections::HashMap;

use limitbook_types::{OrderId, OrderSide};
use rust_decimal::Decimal;

/// Where a resting order lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RestingLocation {
    pub side: OrderSide,
    pub price: Decimal,
}

/// Contains an id iff an order with that id is resting in the book.
#[derive(Debug, Default)]
pub struct OrderRegistry {
    index: HashMap<OrderId, RestingLocation>,
}

impl OrderRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a newly rested order. Returns `false` if the id was already
    /// present (the existing entry is left untouched).
    pub fn insert(&mut self, id: OrderId, side: OrderSide, price: Decimal) -> bool {
        if self.index.contains_key(&id) {
            return false;
        }
        self.index.insert(id, RestingLocation { side, price });
        true
    }

    #[must_use]
    pub fn locate(&self, id: OrderId) -> Option<RestingLocation> {
        self.index.get(&id).copied()
    }

    pub fn remove(&mut self, id: OrderId) -> Option<RestingLocation> {
        self.index.remove(&id)
    }

    #[must_use]
    pub fn contains(&self, id: OrderId) -> bool {
        self.index.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// All registered ids with their locations (arbitrary order).
    pub fn iter(&self) -> impl Iterator<Item = (OrderId, RestingLocation)> + '_ {
        self.index.iter().map(|(id, loc)| (*id, *loc))
    }
}
