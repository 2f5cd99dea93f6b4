//! Inventory domain module.
//!
//! Read side: the aggregator (`query`, `metrics`, `alerts`, `reports`)
//! derives views, dashboard figures and usage reports without touching the
//! records.
//! Write side: `item` decides and applies stock movements.
//!
//! Everything here is deterministic domain logic (no IO, no HTTP, no storage).

pub mod alerts;
pub mod item;
pub mod metrics;
pub mod query;
pub mod record;
pub mod reports;
pub mod seed;

pub use alerts::{RestockSuggestion, attention_items, restock_suggestions, suggested_reorder_quantity};
pub use item::{
    AdjustStock, ConsumeStock, ReceiveStock, StockAdjusted, StockCommand, StockConsumed, StockEvent,
    StockItem, StockReceived, transfer_stock,
};
pub use metrics::{
    CategoryBreakdown, InventoryMetrics, category_breakdown, compute_metrics, low_stock_value,
    percentage_change, top_value_items,
};
pub use query::{FilterCriteria, FilterOptions, SortField, SortOrder, filter_and_sort, filter_options};
pub use record::{InventoryRecord, Priority, StockStatus, UNCATEGORIZED};
pub use reports::{PeriodTotal, ReportPeriod, UsageRecord, aggregate_by_period};
pub use seed::{CommonItem, seed_items};
