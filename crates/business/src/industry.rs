//! Industry catalog used by the setup wizard.

use stockroom_inventory::{CommonItem, InventoryRecord, seed_items};

/// Starting point for a new inventory in a given industry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndustryPreset {
    pub id: &'static str,
    pub name: &'static str,
    pub categories: &'static [&'static str],
    pub common_items: &'static [CommonItem],
}

impl IndustryPreset {
    /// Deterministic starter records for this industry.
    pub fn seed(&self, qty: usize) -> Vec<InventoryRecord> {
        seed_items(self.id, self.common_items, qty)
    }
}

pub const GENERAL_INDUSTRY: &str = "general";

pub static INDUSTRIES: &[IndustryPreset] = &[
    IndustryPreset {
        id: "restaurant",
        name: "Restaurant",
        categories: &["Food Items", "Beverages", "Kitchen Equipment", "Cleaning Supplies", "Disposables"],
        common_items: &[
            CommonItem::new("RICE-001", "Rice (50 lb)", "bag"),
            CommonItem::new("TOMATO-001", "Tomato", "kg"),
            CommonItem::new("OIL-001", "Cooking Oil", "litre"),
        ],
    },
    IndustryPreset {
        id: "healthcare",
        name: "Healthcare",
        categories: &["Medical Supplies", "Equipment", "Pharmaceuticals", "PPE", "Diagnostics"],
        common_items: &[
            CommonItem::new("MED-001", "Medication (assorted)", "box"),
            CommonItem::new("BAND-001", "Bandages", "pack"),
            CommonItem::new("GLOVE-001", "Disposable Gloves", "box"),
        ],
    },
    IndustryPreset {
        id: "construction",
        name: "Construction",
        categories: &["Tools", "Materials", "Safety Equipment", "Hardware", "Electrical"],
        common_items: &[
            CommonItem::new("HAM-001", "Hammer", "unit"),
            CommonItem::new("BOOT-001", "Safety Boots", "pair"),
            CommonItem::new("HELM-001", "Safety Helmet", "unit"),
        ],
    },
    IndustryPreset {
        id: "retail",
        name: "Retail",
        categories: &["Products", "Accessories", "Display Items", "Packaging", "Supplies"],
        common_items: &[
            CommonItem::new("SKU-001", "Generic SKU 1", "unit"),
            CommonItem::new("SKU-002", "Generic SKU 2", "unit"),
        ],
    },
    IndustryPreset {
        id: "manufacturing",
        name: "Manufacturing",
        categories: &["Raw Materials", "Components", "Tools", "Finished Goods", "Packaging"],
        common_items: &[
            CommonItem::new("RAW-001", "Raw Material A", "kg"),
            CommonItem::new("COMP-001", "Component X", "unit"),
            CommonItem::new("PACK-001", "Packaging Box", "unit"),
        ],
    },
    IndustryPreset {
        id: "hospitality",
        name: "Hospitality",
        categories: &["Linens", "Toiletries", "Maintenance", "Food & Beverage", "Guest Supplies"],
        common_items: &[
            CommonItem::new("LINEN-001", "Bed Linen Set", "set"),
            CommonItem::new("TOILET-001", "Toiletries Kit", "unit"),
        ],
    },
    IndustryPreset {
        id: "education",
        name: "Education",
        categories: &["Supplies", "Equipment", "Books", "Technology", "Furniture"],
        common_items: &[
            CommonItem::new("BOOK-001", "Textbook (single)", "unit"),
            CommonItem::new("STAP-001", "Stationery Pack", "pack"),
        ],
    },
    IndustryPreset {
        id: "automotive",
        name: "Automotive",
        categories: &["Parts", "Fluids", "Tools", "Accessories", "Safety Equipment"],
        common_items: &[
            CommonItem::new("OIL-ENG-001", "Engine Oil", "litre"),
            CommonItem::new("FILTER-001", "Air Filter", "unit"),
        ],
    },
    IndustryPreset {
        id: "government",
        name: "Government",
        categories: &["General Items", "Supplies", "Equipment", "Tools", "Materials"],
        common_items: &[CommonItem::new("GOV-STD-001", "Standard Office Chair", "unit")],
    },
    IndustryPreset {
        id: GENERAL_INDUSTRY,
        name: "General",
        categories: &["General Items", "Supplies", "Equipment", "Tools", "Materials"],
        common_items: &[],
    },
];

/// Look up a preset, falling back to the general one for unknown ids.
pub fn industry_by_id(id: &str) -> &'static IndustryPreset {
    INDUSTRIES
        .iter()
        .find(|p| p.id == id)
        .or_else(|| INDUSTRIES.iter().find(|p| p.id == GENERAL_INDUSTRY))
        .unwrap_or(&INDUSTRIES[0])
}
