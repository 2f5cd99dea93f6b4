//! Low-stock alerts and reorder suggestions.

use serde::Serialize;

use stockroom_core::ItemId;

use crate::record::{InventoryRecord, Priority, StockStatus};

/// Threshold assumed when a record has no `min_stock`.
const DEFAULT_THRESHOLD: f64 = 1.0;

/// Quantity proposed when restocking `record`: twice its threshold, but at
/// least five above it.
pub fn suggested_reorder_quantity(record: &InventoryRecord) -> f64 {
    let threshold = record.min_stock.unwrap_or(DEFAULT_THRESHOLD);
    (threshold * 2.0).max(threshold + 5.0)
}

/// Records worth announcing: everything out of stock, plus low-stock records
/// of critical priority.
pub fn attention_items(records: &[InventoryRecord]) -> Vec<&InventoryRecord> {
    records
        .iter()
        .filter(|r| {
            r.status == StockStatus::OutOfStock
                || (r.status == StockStatus::LowStock && r.priority == Priority::Critical)
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RestockSuggestion {
    pub item_id: ItemId,
    pub name: String,
    pub status: StockStatus,
    pub current_quantity: f64,
    pub suggested_quantity: f64,
}

/// One suggestion per record whose status asks for a restock, in input order.
pub fn restock_suggestions(records: &[InventoryRecord]) -> Vec<RestockSuggestion> {
    records
        .iter()
        .filter(|r| r.status.needs_restock())
        .map(|r| RestockSuggestion {
            item_id: r.id.clone(),
            name: r.name.clone(),
            status: r.status,
            current_quantity: r.quantity,
            suggested_quantity: suggested_reorder_quantity(r),
        })
        .collect()
}
