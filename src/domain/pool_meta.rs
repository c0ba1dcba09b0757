//! Read-only pool diagnostics.

use serde::Serialize;

/// Diagnostic snapshot of a pool: its current fee as `fee / fee_precision`
/// and the chain position the state was read at.
///
/// Routers use the block fields to invalidate cached quotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolMeta {
    /// Fee numerator.
    pub fee: u128,
    /// Fee denominator.
    pub fee_precision: u128,
    /// Block the snapshot was taken at.
    pub block_number: u64,
    /// Timestamp of that block, in seconds.
    pub block_timestamp: u64,
}
