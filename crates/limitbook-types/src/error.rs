//! Error types for the limitbook matching engine.
//!
//! All errors use the `LB_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Order errors
//! - 9xx: General / configuration / I/O errors
//!
//! Every error is a rejected operation: the engine performs no mutation
//! before returning one.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::OrderId;

/// Central error enum for all limitbook operations.
#[derive(Debug, Error)]
pub enum LimitbookError {
    // =================================================================
    // Order Errors (1xx)
    // =================================================================
    /// No resting order has this id.
    #[error("LB_ERR_100: Order not found: {0}")]
    OrderNotFound(OrderId),

    /// An order with this id is already resting.
    #[error("LB_ERR_101: Order already exists: {0}")]
    DuplicateOrder(OrderId),

    /// The side token is neither BUY nor SELL.
    #[error("LB_ERR_102: Invalid side: {0:?}")]
    InvalidSide(String),

    /// Quantity must be a positive integer.
    #[error("LB_ERR_103: Invalid quantity: {reason}")]
    InvalidQuantity { reason: String },

    /// Price must be positive, finite, and within the configured precision.
    #[error("LB_ERR_104: Invalid price: {reason}")]
    InvalidPrice { reason: String },

    /// A boundary field could not be parsed (e.g. a non-numeric order id).
    #[error("LB_ERR_105: Invalid {field}: {value:?}")]
    InvalidInput { field: &'static str, value: String },

    // =================================================================
    // General / Internal (9xx)
    // =================================================================
    /// Configuration error (invalid config file, bad values, etc.).
    #[error("LB_ERR_900: Configuration error: {0}")]
    Configuration(String),

    /// Serialization / deserialization error.
    #[error("LB_ERR_901: Serialization error: {0}")]
    Serialization(String),

    /// I/O error (config file, terminal).
    #[error("LB_ERR_902: I/O error: {0}")]
    Io(String),
}

impl LimitbookError {
    pub fn zero_quantity() -> Self {
        Self::InvalidQuantity {
            reason: "quantity must be greater than zero".to_string(),
        }
    }

    pub fn non_positive_price(price: Decimal) -> Self {
        Self::InvalidPrice {
            reason: format!("price must be greater than zero, got {price}"),
        }
    }
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, LimitbookError>;

impl From<std::io::Error> for LimitbookError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for LimitbookError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
