//! Continuous price-time priority matching engine.
//!
//! [`MatchingEngine`] owns both sides of the book and the order registry
//! and is the only thing that mutates them. Every public operation runs to
//! completion synchronously; nothing is observable half-applied.
//!
//! ```text
//! add_order(id, side, price, qty) -> Vec<Trade>
//! cancel_order(id)                -> Order
//! snapshot()                      -> BookSnapshot
//! ```
//!
//! ## Matching
//!
//! An incoming order walks the opposite side from the best level while its
//! limit still crosses. Each step fills `min(incoming, resting)` against the
//! oldest order at that level, at the resting order's price. Whatever is
//! left of the incoming order rests at the tail of its own level.

use chrono::Utc;
use limitbook_types::{
    BookConfig, LimitbookError, Order, OrderId, OrderSide, Result, Trade, TradeId, constants,
};
use rust_decimal::Decimal;

use crate::book_side::{AskSide, BidSide, BookSide, LevelKey};
use crate::registry::OrderRegistry;
use crate::snapshot::{BookDepth, BookSnapshot};

/// Order book plus matching logic for a single instrument.
#[derive(Debug)]
pub struct MatchingEngine {
    config: BookConfig,
    bids: BidSide,
    asks: AskSide,
    registry: OrderRegistry,
    next_trade_id: TradeId,
    next_sequence: u64,
}

impl Default for MatchingEngine {
    fn default() -> Self {
        Self::with_valid_config(BookConfig::default())
    }
}

impl MatchingEngine {
    /// Create an empty engine for the given configuration.
    pub fn new(config: BookConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_valid_config(config))
    }

    fn with_valid_config(config: BookConfig) -> Self {
        Self {
            config,
            bids: BidSide::new(),
            asks: AskSide::new(),
            registry: OrderRegistry::new(),
            next_trade_id: TradeId(constants::FIRST_TRADE_ID),
            next_sequence: 0,
        }
    }

    #[must_use]
    pub fn config(&self) -> &BookConfig {
        &self.config
    }

    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.config.symbol
    }

    // =================================================================
    // Add
    // =================================================================

    /// Submit a limit order.
    ///
    /// Matches against the opposite side under price-time priority and
    /// rests any remainder. Returns the trades in the order they happened
    /// (empty if nothing crossed).
    ///
    /// # Errors
    /// - `InvalidQuantity` if `quantity` is zero
    /// - `InvalidPrice` if `price` is not positive or is finer than the
    ///   configured precision
    /// - `DuplicateOrder` if an order with `id` is resting
    ///
    /// A rejected order leaves the book untouched.
    pub fn add_order(
        &mut self,
        id: OrderId,
        side: OrderSide,
        price: Decimal,
        quantity: u64,
    ) -> Result<Vec<Trade>> {
        let price = self.validate_new_order(id, price, quantity).inspect_err(|err| {
            tracing::warn!(
                symbol = %self.config.symbol,
                order = %id,
                %side,
                %price,
                quantity,
                error = %err,
                "Order rejected"
            );
        })?;

        let mut incoming = Order::limit(id, side, price, quantity);
        incoming.sequence = self.next_sequence;
        self.next_sequence += 1;

        let trades = match side {
            OrderSide::Buy => Self::match_against(
                &mut self.asks,
                &mut self.registry,
                &mut self.next_trade_id,
                &self.config.symbol,
                &mut incoming,
            ),
            OrderSide::Sell => Self::match_against(
                &mut self.bids,
                &mut self.registry,
                &mut self.next_trade_id,
                &self.config.symbol,
                &mut incoming,
            ),
        };

        let filled = incoming.filled_qty();
        let rested = incoming.remaining_qty;
        if !incoming.is_filled() {
            self.rest(incoming);
        }

        tracing::info!(
            symbol = %self.config.symbol,
            order = %id,
            %side,
            %price,
            quantity,
            filled,
            rested,
            trades = trades.len(),
            "Order accepted"
        );

        Ok(trades)
    }

    /// Check an incoming order and return its normalized price.
    fn validate_new_order(&self, id: OrderId, price: Decimal, quantity: u64) -> Result<Decimal> {
        if quantity == 0 {
            return Err(LimitbookError::zero_quantity());
        }
        if price <= Decimal::ZERO {
            return Err(LimitbookError::non_positive_price(price));
        }
        let price = price.normalize();
        if price.scale() > self.config.price_precision {
            return Err(LimitbookError::InvalidPrice {
                reason: format!(
                    "price {price} has more than {} decimal places",
                    self.config.price_precision
                ),
            });
        }
        if self.registry.contains(id) {
            return Err(LimitbookError::DuplicateOrder(id));
        }
        Ok(price)
    }

    /// Fill `incoming` against `opposite` until it is exhausted, the side
    /// is empty, or the best level no longer crosses.
    fn match_against<K: LevelKey>(
        opposite: &mut BookSide<K>,
        registry: &mut OrderRegistry,
        next_trade_id: &mut TradeId,
        symbol: &str,
        incoming: &mut Order,
    ) -> Vec<Trade> {
        let mut trades = Vec::new();

        while !incoming.is_filled() {
            let Some(level) = opposite.best_level_mut() else {
                break;
            };
            let level_price = level.price;
            if !incoming.side.crosses(incoming.price, level_price) {
                break;
            }
            debug_assert!(!level.is_empty(), "empty level left in book at {level_price}");
            let Some(resting) = level.front_mut() else {
                break;
            };

            let fill_qty = incoming.remaining_qty.min(resting.remaining_qty);
            incoming.fill(fill_qty);
            resting.fill(fill_qty);

            let resting_id = resting.id;
            let resting_done = resting.is_filled();

            let trade = Trade {
                id: *next_trade_id,
                symbol: symbol.to_string(),
                incoming_order_id: incoming.id,
                resting_order_id: resting_id,
                incoming_side: incoming.side,
                price: level_price,
                quantity: fill_qty,
                executed_at: Utc::now(),
            };
            *next_trade_id = next_trade_id.next();

            tracing::debug!(
                trade_id = %trade.id,
                incoming = %trade.incoming_order_id,
                resting = %trade.resting_order_id,
                price = %trade.price,
                qty = trade.quantity,
                "Trade matched"
            );
            trades.push(trade);

            if resting_done {
                level.pop_front();
                registry.remove(resting_id);
                if level.is_empty() {
                    opposite.remove_level(level_price);
                }
            }
        }

        trades
    }

    fn rest(&mut self, order: Order) {
        let registered = self.registry.insert(order.id, order.side, order.price);
        debug_assert!(registered, "order {} already registered", order.id);
        if !registered {
            return;
        }
        match order.side {
            OrderSide::Buy => self.bids.insert(order),
            OrderSide::Sell => self.asks.insert(order),
        }
    }

    // =================================================================
    // Cancel
    // =================================================================

    /// Remove a resting order. Returns the order with its open quantity.
    ///
    /// # Errors
    /// `OrderNotFound` if no order with `id` is resting; nothing changes.
    pub fn cancel_order(&mut self, id: OrderId) -> Result<Order> {
        let Some(location) = self.registry.locate(id) else {
            tracing::warn!(symbol = %self.config.symbol, order = %id, "Cancel of unknown order");
            return Err(LimitbookError::OrderNotFound(id));
        };

        let removed = match location.side {
            OrderSide::Buy => self.bids.remove_order(location.price, id),
            OrderSide::Sell => self.asks.remove_order(location.price, id),
        };
        let order = removed.ok_or(LimitbookError::OrderNotFound(id))?;
        self.registry.remove(id);

        tracing::info!(
            symbol = %self.config.symbol,
            order = %id,
            side = %order.side,
            price = %order.price,
            remaining = order.remaining_qty,
            "Order cancelled"
        );
        Ok(order)
    }

    // =================================================================
    // Queries
    // =================================================================

    /// Every resting order on both sides in priority order.
    #[must_use]
    pub fn snapshot(&self) -> BookSnapshot {
        BookSnapshot {
            symbol: self.config.symbol.clone(),
            asks: self.asks.resting_views(),
            bids: self.bids.resting_views(),
        }
    }

    /// Aggregated quantities for the best `max_levels` levels of each side.
    #[must_use]
    pub fn depth(&self, max_levels: usize) -> BookDepth {
        BookDepth {
            symbol: self.config.symbol.clone(),
            asks: self.asks.depth_levels(max_levels),
            bids: self.bids.depth_levels(max_levels),
        }
    }

    /// Best (highest) bid price, or `None` if no bids.
    #[must_use]
    pub fn best_bid(&self) -> Option<Decimal> {
        self.bids.best_price()
    }

    /// Best (lowest) ask price, or `None` if no asks.
    #[must_use]
    pub fn best_ask(&self) -> Option<Decimal> {
        self.asks.best_price()
    }

    /// Spread = `best_ask - best_bid`. `None` if either side is empty.
    #[must_use]
    pub fn spread(&self) -> Option<Decimal> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => Some(ask - bid),
            _ => None,
        }
    }

    /// Mid price = `(best_bid + best_ask) / 2`. `None` if either side is empty.
    #[must_use]
    pub fn mid_price(&self) -> Option<Decimal> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => Some((bid + ask) / Decimal::TWO),
            _ => None,
        }
    }

    /// Look up a resting order by id.
    #[must_use]
    pub fn get_order(&self, id: OrderId) -> Option<&Order> {
        let location = self.registry.locate(id)?;
        let level = match location.side {
            OrderSide::Buy => self.bids.level(location.price),
            OrderSide::Sell => self.asks.level(location.price),
        }?;
        level.get(id)
    }

    #[must_use]
    pub fn contains_order(&self, id: OrderId) -> bool {
        self.registry.contains(id)
    }

    /// Total number of resting orders.
    #[must_use]
    pub fn order_count(&self) -> usize {
        self.registry.len()
    }

    /// Number of distinct bid price levels.
    #[must_use]
    pub fn bid_depth(&self) -> usize {
        self.bids.depth()
    }

    /// Number of distinct ask price levels.
    #[must_use]
    pub fn ask_depth(&self) -> usize {
        self.asks.depth()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// Read access to the bid side.
    #[must_use]
    pub fn bids(&self) -> &BidSide {
        &self.bids
    }

    /// Read access to the ask side.
    #[must_use]
    pub fn asks(&self) -> &AskSide {
        &self.asks
    }

    #[must_use]
    pub fn registry(&self) -> &OrderRegistry {
        &self.registry
    }
}
