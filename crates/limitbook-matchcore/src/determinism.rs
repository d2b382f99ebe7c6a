//! Determinism verification for replayed order flow.
//!
//! Two engines fed the same sequence of operations must emit the same
//! trades. The trade root is a SHA-256 digest over those trades that lets
//! a replay be checked without comparing full payloads. Wall-clock
//! timestamps are deliberately left out.

use limitbook_types::{OrderSide, Trade};
use sha2::{Digest, Sha256};

/// Compute the trade root hash over a sequence of trades.
///
/// Covers, per trade and in order: trade id, incoming and resting order
/// ids, incoming side, price, and quantity.
#[must_use]
pub fn compute_trade_root(trades: &[Trade]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(b"limitbook:trade_root:v1:");
    hasher.update((trades.len() as u64).to_le_bytes());

    for trade in trades {
        hasher.update(trade.id.0.to_le_bytes());
        hasher.update(trade.incoming_order_id.0.to_le_bytes());
        hasher.update(trade.resting_order_id.0.to_le_bytes());
        hasher.update([match trade.incoming_side {
            OrderSide::Buy => 0u8,
            OrderSide::Sell => 1u8,
        }]);
        hasher.update(trade.price.normalize().to_string().as_bytes());
        hasher.update(trade.quantity.to_le_bytes());
    }

    let result = hasher.finalize();
    let mut root = [0u8; 32];
    root.copy_from_slice(&result);
    root
}

/// Recompute the root for `trades` and compare with `expected_root`.
#[must_use]
pub fn verify_trade_root(trades: &[Trade], expected_root: &[u8; 32]) -> bool {
    compute_trade_root(trades) == *expected_root
}

/// Hex rendering of a trade root for logs.
#[must_use]
pub fn trade_root_hex(trades: &[Trade]) -> String {
    hex::encode(compute_trade_root(trades))
}
