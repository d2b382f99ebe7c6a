//! System-wide constants for the limitbook matching engine.

/// Default maximum number of fractional digits accepted in a price.
pub const PRICE_PRECISION: u32 = 8;

/// Hard upper bound on price precision (the scale limit of `rust_decimal`).
pub const MAX_PRICE_PRECISION: u32 = 28;

/// Symbol used when no configuration is supplied.
pub const DEFAULT_SYMBOL: &str = "DEFAULT";

/// First trade id handed out by a fresh engine.
pub const FIRST_TRADE_ID: u64 = 1;

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine name.
pub const ENGINE_NAME: &str = "limitbook";
