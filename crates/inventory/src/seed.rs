//! Deterministic starter records for a freshly configured industry.

use stockroom_core::ItemId;

use crate::record::{InventoryRecord, StockStatus, UNCATEGORIZED};

/// Catalogue entry an industry preset offers as a starting point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommonItem {
    pub sku: &'static str,
    pub name: &'static str,
    pub unit: Option<&'static str>,
}

impl CommonItem {
    pub const fn new(sku: &'static str, name: &'static str, unit: &'static str) -> Self {
        Self {
            sku,
            name,
            unit: Some(unit),
        }
    }
}

/// Minimum number of catalogue entries taken when the catalogue is non-empty.
const MIN_SEEDED: usize = 3;

/// Build `qty` starter records for `industry_id` from its common items.
///
/// `max(3, min(common.len(), qty))` catalogue entries are used (cycling when
/// the catalogue is shorter than three), then `GEN-<n>` placeholders pad the
/// list up to `qty`. Records start empty and out of stock.
pub fn seed_items(industry_id: &str, common: &[CommonItem], qty: usize) -> Vec<InventoryRecord> {
    let mut items = Vec::with_capacity(qty.max(MIN_SEEDED));

    if !common.is_empty() {
        let take = MIN_SEEDED.max(common.len().min(qty));
        for (n, entry) in common.iter().cycle().take(take).enumerate() {
            let mut record = starter(industry_id, n + 1, entry.name);
            record.sku = Some(entry.sku.to_string());
            record.unit_of_measure = Some(entry.unit.unwrap_or("unit").to_string());
            items.push(record);
        }
    }

    while items.len() < qty {
        let n = items.len() + 1;
        let mut record = starter(industry_id, n, &format!("Generated Item {n}"));
        record.sku = Some(format!("GEN-{n}"));
        record.unit_of_measure = Some("unit".to_string());
        items.push(record);
    }

    tracing::debug!(industry = industry_id, seeded = items.len(), "seeded starter inventory");
    items
}

fn starter(industry_id: &str, n: usize, name: &str) -> InventoryRecord {
    // Ids built from a non-empty prefix cannot be rejected.
    let id = ItemId::new(format!("itm-{industry_id}-{n}")).unwrap_or_else(|_| ItemId::generate());
    InventoryRecord::new(id, name)
        .with_category(UNCATEGORIZED)
        .with_industry(industry_id)
        .with_status(StockStatus::OutOfStock)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESTAURANT: &[CommonItem] = &[
        CommonItem::new("RICE-001", "Rice (50 lb)", "bag"),
        CommonItem::new("TOMATO-001", "Tomato", "kg"),
        CommonItem::new("OIL-001", "Cooking Oil", "litre"),
    ];

    #[test]
    fn seeds_take_common_items_first_then_pad() {
        let items = seed_items("restaurant", RESTAURANT, 5);
        let skus: Vec<&str> = items.iter().filter_map(|r| r.sku.as_deref()).collect();
        assert_eq!(skus, vec!["RICE-001", "TOMATO-001", "OIL-001", "GEN-4", "GEN-5"]);
        assert_eq!(items[1].unit_of_measure.as_deref(), Some("kg"));
        assert!(items.iter().all(|r| r.industry == "restaurant" && r.quantity == 0.0));
    }

    #[test]
    fn short_catalogues_cycle_up_to_three() {
        let retail = [CommonItem::new("SKU-001", "Generic SKU 1", "unit")];
        let items = seed_items("retail", &retail, 1);
        assert_eq!(items.len(), 3);
        assert!(items.iter().all(|r| r.sku.as_deref() == Some("SKU-001")));
    }

    #[test]
    fn ids_are_deterministic_and_unique() {
        let a = seed_items("restaurant", RESTAURANT, 4);
        let b = seed_items("restaurant", RESTAURANT, 4);
        assert_eq!(a, b);
        assert_eq!(a[3].id.as_str(), "itm-restaurant-4");
    }

    #[test]
    fn empty_catalogue_yields_placeholders_only() {
        let items = seed_items("general", &[], 2);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name, "Generated Item 1");
    }
}
