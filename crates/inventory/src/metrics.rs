//! Dashboard figures derived from an inventory snapshot.

use serde::Serialize;

use crate::record::{InventoryRecord, Priority, StockStatus, UNCATEGORIZED, finite_or_zero};

/// Summary shown on the inventory dashboard.
///
/// Counts come from the stored `status`/`priority`, never from quantities.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryMetrics {
    pub total_items: f64,
    pub total_value: f64,
    pub total_cost: f64,
    pub low_stock_items: usize,
    pub out_of_stock_items: usize,
    pub critical_items: usize,
    /// Percentage, 0 when there is no stock value.
    pub profit_margin: f64,
    pub unique_products: usize,
    pub average_stock_level: f64,
}

pub fn compute_metrics(records: &[InventoryRecord]) -> InventoryMetrics {
    let total_items: f64 = records.iter().map(|r| finite_or_zero(r.quantity)).sum();
    let total_value: f64 = records.iter().map(InventoryRecord::stock_value).sum();
    let total_cost: f64 = records.iter().map(InventoryRecord::stock_cost).sum();

    let count_status = |status: StockStatus| records.iter().filter(|r| r.status == status).count();

    let profit_margin = if total_value > 0.0 {
        (total_value - total_cost) / total_value * 100.0
    } else {
        0.0
    };
    let average_stock_level = if records.is_empty() {
        0.0
    } else {
        total_items / records.len() as f64
    };

    InventoryMetrics {
        total_items,
        total_value,
        total_cost,
        low_stock_items: count_status(StockStatus::LowStock),
        out_of_stock_items: count_status(StockStatus::OutOfStock),
        critical_items: records.iter().filter(|r| r.priority == Priority::Critical).count(),
        profit_margin,
        unique_products: records.len(),
        average_stock_level,
    }
}

/// Stock value and unit count of one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryBreakdown {
    pub category: String,
    pub value: f64,
    pub count: f64,
}

/// Per-category value and units, in first-seen order. Records without a
/// category are grouped under [`UNCATEGORIZED`].
pub fn category_breakdown(records: &[InventoryRecord]) -> Vec<CategoryBreakdown> {
    let mut out: Vec<CategoryBreakdown> = Vec::new();
    for record in records {
        let category = if record.category.trim().is_empty() {
            UNCATEGORIZED
        } else {
            record.category.as_str()
        };
        let idx = match out.iter().position(|b| b.category == category) {
            Some(idx) => idx,
            None => {
                out.push(CategoryBreakdown {
                    category: category.to_string(),
                    value: 0.0,
                    count: 0.0,
                });
                out.len() - 1
            }
        };
        out[idx].value += record.stock_value();
        out[idx].count += finite_or_zero(record.quantity);
    }
    out
}

/// The `n` records holding the most stock value, highest first.
pub fn top_value_items(records: &[InventoryRecord], n: usize) -> Vec<InventoryRecord> {
    let mut ranked: Vec<&InventoryRecord> = records.iter().collect();
    ranked.sort_by(|a, b| b.stock_value().total_cmp(&a.stock_value()));
    ranked.into_iter().take(n).cloned().collect()
}

/// Value of the records at or below their minimum stock.
///
/// Quantity-based on purpose: it complements the status-based counters of
/// [`InventoryMetrics`] and may disagree with them when a status was set by
/// hand. Records without a minimum are skipped.
pub fn low_stock_value(records: &[InventoryRecord]) -> f64 {
    records
        .iter()
        .filter(|r| r.min_stock.is_some_and(|min| r.quantity <= min))
        .map(InventoryRecord::stock_value)
        .sum()
}

/// Relative change in percent. A zero baseline reports 0 (no change) or 100.
pub fn percentage_change(current: f64, previous: f64) -> f64 {
    if previous == 0.0 {
        return if current == 0.0 { 0.0 } else { 100.0 };
    }
    (current - previous) / previous * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use stockroom_core::ItemId;

    fn record(id: &str) -> InventoryRecord {
        InventoryRecord::new(ItemId::new(id).unwrap(), id)
    }

    #[test]
    fn empty_snapshot_has_zeroed_ratios() {
        let metrics = compute_metrics(&[]);
        assert_eq!(metrics.total_value, 0.0);
        assert_eq!(metrics.profit_margin, 0.0);
        assert_eq!(metrics.average_stock_level, 0.0);
        assert_eq!(metrics.unique_products, 0);
    }

    #[test]
    fn metrics_follow_the_dashboard_formulas() {
        let records = vec![
            record("masks")
                .with_quantity(50.0)
                .with_price(2.5)
                .with_cost(1.25)
                .with_status(StockStatus::LowStock)
                .with_priority(Priority::Critical),
            record("oil")
                .with_quantity(8.0)
                .with_price(25.0)
                .with_status(StockStatus::OutOfStock),
            record("bolts").with_quantity(2.0).with_price(1.0).with_cost(0.5),
        ];
        let m = compute_metrics(&records);
        assert_eq!(m.total_items, 60.0);
        assert_eq!(m.total_value, 125.0 + 200.0 + 2.0);
        assert_eq!(m.total_cost, 62.5 + 0.0 + 1.0);
        assert_eq!(m.low_stock_items, 1);
        assert_eq!(m.out_of_stock_items, 1);
        assert_eq!(m.critical_items, 1);
        assert_eq!(m.unique_products, 3);
        assert_eq!(m.average_stock_level, 20.0);
        let expected_margin = (327.0 - 63.5) / 327.0 * 100.0;
        assert!((m.profit_margin - expected_margin).abs() < 1e-9);
    }

    #[test]
    fn status_counts_trust_the_stored_status() {
        // Plenty of stock, but flagged low by hand.
        let records = vec![
            record("a")
                .with_quantity(500.0)
                .with_min_stock(10.0)
                .with_status(StockStatus::LowStock),
        ];
        assert_eq!(compute_metrics(&records).low_stock_items, 1);
        assert_eq!(low_stock_value(&records), 0.0);
    }

    #[test]
    fn breakdown_groups_missing_categories() {
        let records = vec![
            record("a").with_category("PPE").with_quantity(2.0).with_price(3.0),
            record("b").with_quantity(1.0).with_price(1.0),
            record("c").with_category("PPE").with_quantity(1.0).with_price(4.0),
        ];
        let breakdown = category_breakdown(&records);
        assert_eq!(breakdown.len(), 2);
        assert_eq!(breakdown[0].category, "PPE");
        assert_eq!(breakdown[0].value, 10.0);
        assert_eq!(breakdown[0].count, 3.0);
        assert_eq!(breakdown[1].category, UNCATEGORIZED);
    }

    #[test]
    fn top_value_items_ranks_by_stock_value() {
        let records = vec![
            record("cheap").with_quantity(1.0).with_price(1.0),
            record("dear").with_quantity(2.0).with_price(50.0),
            record("mid").with_quantity(10.0).with_price(2.0),
        ];
        let top: Vec<String> = top_value_items(&records, 2)
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(top, vec!["dear", "mid"]);
    }

    #[test]
    fn low_stock_value_uses_quantity_threshold() {
        let records = vec![
            record("a").with_quantity(5.0).with_min_stock(5.0).with_price(2.0),
            record("b").with_quantity(6.0).with_min_stock(5.0).with_price(2.0),
            record("c").with_quantity(0.0).with_price(9.0),
        ];
        assert_eq!(low_stock_value(&records), 10.0);
    }

    #[test]
    fn percentage_change_handles_zero_baseline() {
        assert_eq!(percentage_change(0.0, 0.0), 0.0);
        assert_eq!(percentage_change(5.0, 0.0), 100.0);
        assert_eq!(percentage_change(150.0, 100.0), 50.0);
    }

    proptest! {
        /// Property: a single record's value is exactly quantity * price.
        #[test]
        fn single_record_value(quantity in 0.0f64..10_000.0, price in 0.0f64..10_000.0) {
            let r = record("x").with_quantity(quantity).with_price(price);
            prop_assert_eq!(compute_metrics(&[r]).total_value, quantity * price);
        }

        /// Property: the margin is finite for any non-negative snapshot.
        #[test]
        fn margin_is_always_finite(
            rows in prop::collection::vec((0.0f64..100.0, 0.0f64..100.0, 0.0f64..100.0), 0..10)
        ) {
            let records: Vec<InventoryRecord> = rows
                .into_iter()
                .enumerate()
                .map(|(i, (q, p, c))| record(&format!("r{i}")).with_quantity(q).with_price(p).with_cost(c))
                .collect();
            let m = compute_metrics(&records);
            prop_assert!(m.profit_margin.is_finite());
            prop_assert!(m.average_stock_level.is_finite());
        }
    }
}
