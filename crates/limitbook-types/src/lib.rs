//! # limitbook-types
//!
//! Shared types, errors, and configuration for the **limitbook** matching engine.
//!
//! This crate is the leaf dependency of the workspace. It defines:
//!
//! - **Identifiers**: [`OrderId`], [`TradeId`]
//! - **Order model**: [`Order`], [`OrderSide`]
//! - **Trade model**: [`Trade`]
//! - **Configuration**: [`BookConfig`]
//! - **Errors**: [`LimitbookError`] with `LB_ERR_` prefix codes
//! - **Constants**: precision limits and defaults

pub mod config;
pub mod constants;
pub mod error;
pub mod ids;
pub mod order;
pub mod trade;

// Re-export all primary types at crate root for ergonomic imports:
//   use limitbook_types::{Order, OrderSide, Trade, ...};

pub use config::*;
pub use error::*;
pub use ids::*;
pub use order::*;
pub use trade::*;

// Constants are accessed via `limitbook_types::constants::FOO`
// (not re-exported to avoid name collisions).
