//! Configuration for a single order book.

use serde::{Deserialize, Serialize};

use crate::{LimitbookError, Result, constants};

/// Per-instrument book configuration. One engine serves one symbol.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BookConfig {
    /// Instrument label stamped on trades and log lines (e.g., "BTC-USD").
    pub symbol: String,
    /// Maximum fractional digits accepted in an order price.
    pub price_precision: u32,
}

impl Default for BookConfig {
    fn default() -> Self {
        Self {
            symbol: constants::DEFAULT_SYMBOL.to_string(),
            price_precision: constants::PRICE_PRECISION,
        }
    }
}

impl BookConfig {
    /// Config for `symbol` with default precision.
    #[must_use]
    pub fn for_symbol(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            ..Self::default()
        }
    }

    /// Parse and validate a JSON config document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.symbol.trim().is_empty() {
            return Err(LimitbookError::Configuration(
                "symbol must not be empty".to_string(),
            ));
        }
        if self.price_precision > constants::MAX_PRICE_PRECISION {
            return Err(LimitbookError::Configuration(format!(
                "price_precision {} exceeds maximum {}",
                self.price_precision,
                constants::MAX_PRICE_PRECISION
            )));
        }
        Ok(())
    }
}
