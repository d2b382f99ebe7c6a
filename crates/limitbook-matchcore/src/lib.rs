//! # limitbook-matchcore
//!
//! **Continuous double-auction matching engine.**
//!
//! MatchCore keeps a two-sided book of resting limit orders and matches
//! each incoming order against it under price-time priority:
//!
//! - **Best price first**, then **oldest first** within a price level
//! - **Trades at the resting price**, so the incoming order keeps any
//!   price improvement
//! - **Never crossed**: after every call the best bid is below the best ask
//! - **Single writer**: all state lives in one [`MatchingEngine`]; share it
//!   across threads through [`SharedEngine`]

pub mod book_side;
pub mod determinism;
pub mod engine;
pub mod price_level;
pub mod registry;
pub mod shared;
pub mod snapshot;

pub use book_side::{AskSide, BidSide, BookSide, LevelKey};
pub use determinism::{compute_trade_root, trade_root_hex, verify_trade_root};
pub use engine::MatchingEngine;
pub use price_level::PriceLevel;
pub use registry::{OrderRegistry, RestingLocation};
pub use shared::SharedEngine;
pub use snapshot::{BookDepth, BookSnapshot, DepthLevel, RestingOrderView};
