//! Thread-safe handle for an engine with many producers.
//!
//! The whole engine sits behind one lock and every call holds it for its
//! full duration, so readers never see a book mid-match. Scale out by
//! running one `SharedEngine` per instrument.

use std::sync::Arc;

use limitbook_types::{Order, OrderId, OrderSide, Result, Trade};
use parking_lot::Mutex;
use rust_decimal::Decimal;

use crate::engine::MatchingEngine;
use crate::snapshot::{BookDepth, BookSnapshot};

#[derive(Debug, Clone)]
pub struct SharedEngine {
    inner: Arc<Mutex<MatchingEngine>>,
}

impl SharedEngine {
    #[must_use]
    pub fn new(engine: MatchingEngine) -> Self {
        Self {
            inner: Arc::new(Mutex::new(engine)),
        }
    }

    pub fn add_order(
        &self,
        id: OrderId,
        side: OrderSide,
        price: Decimal,
        quantity: u64,
    ) -> Result<Vec<Trade>> {
        self.inner.lock().add_order(id, side, price, quantity)
    }

    pub fn cancel_order(&self, id: OrderId) -> Result<Order> {
        self.inner.lock().cancel_order(id)
    }

    #[must_use]
    pub fn snapshot(&self) -> BookSnapshot {
        self.inner.lock().snapshot()
    }

    #[must_use]
    pub fn depth(&self, max_levels: usize) -> BookDepth {
        self.inner.lock().depth(max_levels)
    }

    /// Run several reads against one consistent state of the book.
    pub fn read<R>(&self, f: impl FnOnce(&MatchingEngine) -> R) -> R {
        f(&self.inner.lock())
    }
}

impl From<MatchingEngine> for SharedEngine {
    fn from(engine: MatchingEngine) -> Self {
        Self::new(engine)
    }
}
