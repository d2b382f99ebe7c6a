//! A single price level in the order book.
//!
//! Orders at the same price are stored in FIFO order (time priority)
//! using a [`VecDeque`].

use std::collections::VecDeque;

use limitbook_types::{Order, OrderId};
use rust_decimal::Decimal;

/// All resting orders at one price.
///
/// The front of the deque is the oldest order and is matched first.
/// A level held by a `BookSide` is never empty.
#[derive(Debug, Clone)]
pub struct PriceLevel {
    pub price: Decimal,
    orders: VecDeque<Order>,
}

impl PriceLevel {
    #[must_use]
    pub fn new(price: Decimal) -> Self {
        Self {
            price,
            orders: VecDeque::new(),
        }
    }

    /// Add an order to the back of this level (lowest time priority).
    pub fn push_back(&mut self, order: Order) {
        self.orders.push_back(order);
    }

    /// Remove and return the front (oldest) order.
    pub fn pop_front(&mut self) -> Option<Order> {
        self.orders.pop_front()
    }

    #[must_use]
    pub fn front(&self) -> Option<&Order> {
        self.orders.front()
    }

    pub fn front_mut(&mut self) -> Option<&mut Order> {
        self.orders.front_mut()
    }

    /// Remove a specific order by id, keeping the others in arrival order.
    pub fn remove_order(&mut self, order_id: OrderId) -> Option<Order> {
        let pos = self.orders.iter().position(|o| o.id == order_id)?;
        self.orders.remove(pos)
    }

    #[must_use]
    pub fn get(&self, order_id: OrderId) -> Option<&Order> {
        self.orders.iter().find(|o| o.id == order_id)
    }

    /// Total remaining quantity across all orders at this level.
    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        self.orders.iter().map(|o| o.remaining_qty).sum()
    }

    /// Orders in time priority.
    pub fn iter(&self) -> impl Iterator<Item = &Order> {
        self.orders.iter()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.orders.len()
    }
}
