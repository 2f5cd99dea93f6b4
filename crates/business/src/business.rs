use core::str::FromStr;

use serde::{Deserialize, Serialize};

use stockroom_core::{DomainError, DomainResult};

/// Local-storage key the web client keeps the business configuration under.
pub const BUSINESS_CONFIG_KEY: &str = "maycoletraker-business-config";
/// Local-storage key of the current subscription.
pub const SUBSCRIPTION_KEY: &str = "maycoletraker-subscription";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BusinessType {
    Restaurant,
    Retail,
    Manufacturing,
    Warehouse,
    Healthcare,
    Automotive,
    Electronics,
    Trucking,
    Construction,
    Hotel,
    #[default]
    Custom,
}

impl BusinessType {
    pub const ALL: [BusinessType; 11] = [
        BusinessType::Restaurant,
        BusinessType::Retail,
        BusinessType::Manufacturing,
        BusinessType::Warehouse,
        BusinessType::Healthcare,
        BusinessType::Automotive,
        BusinessType::Electronics,
        BusinessType::Trucking,
        BusinessType::Construction,
        BusinessType::Hotel,
        BusinessType::Custom,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BusinessType::Restaurant => "restaurant",
            BusinessType::Retail => "retail",
            BusinessType::Manufacturing => "manufacturing",
            BusinessType::Warehouse => "warehouse",
            BusinessType::Healthcare => "healthcare",
            BusinessType::Automotive => "automotive",
            BusinessType::Electronics => "electronics",
            BusinessType::Trucking => "trucking",
            BusinessType::Construction => "construction",
            BusinessType::Hotel => "hotel",
            BusinessType::Custom => "custom",
        }
    }
}

impl core::fmt::Display for BusinessType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BusinessType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        BusinessType::ALL
            .into_iter()
            .find(|t| t.as_str() == wanted)
            .ok_or_else(|| DomainError::unknown("business type", s))
    }
}

/// Words the UI uses for items, consumption and places.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Terminology {
    pub items: String,
    pub usage: String,
    pub location: String,
}

impl Terminology {
    fn new(items: &str, usage: &str, location: &str) -> Self {
        Self {
            items: items.to_string(),
            usage: usage.to_string(),
            location: location.to_string(),
        }
    }
}

impl Default for Terminology {
    fn default() -> Self {
        Self::new("Items", "Used", "Location")
    }
}

struct Preset {
    categories: &'static [&'static str],
    units: &'static [&'static str],
    terminology: (&'static str, &'static str, &'static str),
}

fn preset(business_type: BusinessType) -> Option<Preset> {
    let p = match business_type {
        BusinessType::Restaurant => Preset {
            categories: &["Seafood", "Produce", "Dry Goods", "Dairy", "Meat", "Beverages"],
            units: &["Box", "lb", "kg", "pcs", "gal", "L", "cases"],
            terminology: ("Ingredients", "Used", "Kitchen"),
        },
        BusinessType::Retail => Preset {
            categories: &["Electronics", "Clothing", "Home & Garden", "Sports", "Books", "Toys"],
            units: &["pcs", "units", "cases", "boxes", "pallets"],
            terminology: ("Products", "Sold", "Store"),
        },
        BusinessType::Manufacturing => Preset {
            categories: &["Raw Materials", "Components", "Assemblies", "Tools", "Chemicals", "Packaging"],
            units: &["kg", "lb", "pcs", "rolls", "sheets", "m", "ft"],
            terminology: ("Materials", "Consumed", "Production Floor"),
        },
        BusinessType::Warehouse => Preset {
            categories: &["Electronics", "Parts", "Supplies", "Equipment", "Materials", "Packaging"],
            units: &["pcs", "cases", "pallets", "boxes", "units", "kg", "lb"],
            terminology: ("Stock Items", "Shipped", "Warehouse"),
        },
        BusinessType::Healthcare => Preset {
            categories: &["Medications", "Supplies", "Equipment", "PPE", "Instruments", "Disposables"],
            units: &["pcs", "boxes", "cases", "units", "vials", "packages"],
            terminology: ("Medical Supplies", "Dispensed", "Facility"),
        },
        BusinessType::Automotive => Preset {
            categories: &["Engine Parts", "Body Parts", "Electronics", "Fluids", "Tools", "Tires"],
            units: &["pcs", "units", "L", "gal", "kg", "lb", "sets"],
            terminology: ("Parts", "Installed", "Shop"),
        },
        BusinessType::Electronics => Preset {
            categories: &["Components", "Semiconductors", "PCBs", "Cables", "Connectors", "Tools"],
            units: &["pcs", "reels", "packages", "strips", "m", "ft"],
            terminology: ("Components", "Consumed", "Assembly Line"),
        },
        BusinessType::Trucking => Preset {
            categories: &[
                "Fuel",
                "Truck Parts",
                "Maintenance Supplies",
                "Cargo Equipment",
                "Safety Equipment",
                "Fluids",
            ],
            units: &["gal", "L", "pcs", "units", "cases", "bottles", "boxes"],
            terminology: ("Fleet Supplies", "Consumed", "Fleet Yard"),
        },
        BusinessType::Construction => Preset {
            categories: &[
                "Tools",
                "Lumber",
                "Concrete",
                "Hardware",
                "Safety Equipment",
                "Electrical",
                "Plumbing",
            ],
            units: &["pcs", "boards", "bags", "yards", "ft", "m", "boxes", "cases"],
            terminology: ("Materials", "Used", "Job Site"),
        },
        BusinessType::Hotel => Preset {
            categories: &[
                "Linens",
                "Amenities",
                "Food & Beverage",
                "Minibar",
                "Housekeeping",
                "Guest Supplies",
                "Maintenance",
            ],
            units: &["pcs", "sets", "bottles", "cases", "rolls", "boxes", "units"],
            terminology: ("Hotel Supplies", "Consumed", "Hotel"),
        },
        BusinessType::Custom => return None,
    };
    Some(p)
}

/// Per-business configuration: what the inventory is called and which
/// categories and units are offered when adding items.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessConfig {
    pub business_type: BusinessType,
    pub business_name: String,
    pub categories: Vec<String>,
    pub units: Vec<String>,
    pub terminology: Terminology,
}

impl BusinessConfig {
    /// A configuration pre-filled from the preset for `business_type`.
    pub fn for_type(business_type: BusinessType) -> Self {
        let mut config = Self::default();
        config.apply_preset(business_type);
        config
    }

    /// Switch to `business_type`, replacing categories, units and terminology
    /// with the preset. `Custom` only changes the type.
    pub fn apply_preset(&mut self, business_type: BusinessType) {
        self.business_type = business_type;
        let Some(p) = preset(business_type) else {
            return;
        };
        self.categories = p.categories.iter().map(|c| c.to_string()).collect();
        self.units = p.units.iter().map(|u| u.to_string()).collect();
        let (items, usage, location) = p.terminology;
        self.terminology = Terminology::new(items, usage, location);
        tracing::debug!(business_type = %business_type, "applied business preset");
    }

    /// Returns whether the category was added.
    pub fn add_category(&mut self, category: &str) -> bool {
        push_unique(&mut self.categories, category)
    }

    pub fn remove_category(&mut self, category: &str) -> bool {
        remove_exact(&mut self.categories, category)
    }

    /// Returns whether the unit was added.
    pub fn add_unit(&mut self, unit: &str) -> bool {
        push_unique(&mut self.units, unit)
    }

    pub fn remove_unit(&mut self, unit: &str) -> bool {
        remove_exact(&mut self.units, unit)
    }

    pub fn to_json(&self) -> DomainResult<String> {
        serde_json::to_string(self).map_err(|e| DomainError::validation(e.to_string()))
    }

    pub fn from_json(json: &str) -> DomainResult<Self> {
        serde_json::from_str(json).map_err(|e| DomainError::validation(format!("business config: {e}")))
    }
}

fn push_unique(list: &mut Vec<String>, value: &str) -> bool {
    let value = value.trim();
    if value.is_empty() || list.iter().any(|v| v == value) {
        return false;
    }
    list.push(value.to_string());
    true
}

fn remove_exact(list: &mut Vec<String>, value: &str) -> bool {
    let before = list.len();
    list.retain(|v| v != value);
    list.len() != before
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_custom_with_generic_terms() {
        let config = BusinessConfig::default();
        assert_eq!(config.business_type, BusinessType::Custom);
        assert!(config.categories.is_empty());
        assert_eq!(config.terminology.items, "Items");
        assert_eq!(config.terminology.usage, "Used");
        assert_eq!(config.terminology.location, "Location");
    }

    #[test]
    fn restaurant_preset_fills_lists_and_terms() {
        let config = BusinessConfig::for_type(BusinessType::Restaurant);
        assert_eq!(config.categories[0], "Seafood");
        assert_eq!(config.categories.len(), 6);
        assert!(config.units.contains(&"lb".to_string()));
        assert_eq!(config.terminology.items, "Ingredients");
        assert_eq!(config.terminology.location, "Kitchen");
    }

    #[test]
    fn every_preset_but_custom_has_categories() {
        for t in BusinessType::ALL {
            let config = BusinessConfig::for_type(t);
            assert_eq!(config.categories.is_empty(), t == BusinessType::Custom, "{t}");
        }
    }

    #[test]
    fn custom_keeps_current_lists() {
        let mut config = BusinessConfig::for_type(BusinessType::Hotel);
        config.apply_preset(BusinessType::Custom);
        assert_eq!(config.business_type, BusinessType::Custom);
        assert_eq!(config.categories[0], "Linens");
        assert_eq!(config.terminology.items, "Hotel Supplies");
    }

    #[test]
    fn categories_and_units_ignore_blanks_and_duplicates() {
        let mut config = BusinessConfig::for_type(BusinessType::Retail);
        assert!(!config.add_category("Toys"));
        assert!(!config.add_category("   "));
        assert!(config.add_category(" Garden Tools "));
        assert_eq!(config.categories.last().map(String::as_str), Some("Garden Tools"));
        assert!(config.remove_category("Toys"));
        assert!(!config.remove_category("toys"));

        assert!(config.add_unit("crates"));
        assert!(!config.add_unit("crates"));
        assert!(config.remove_unit("pcs"));
    }

    #[test]
    fn json_uses_client_field_names() {
        let config = BusinessConfig::for_type(BusinessType::Trucking);
        let json = config.to_json().unwrap();
        assert!(json.contains("\"businessType\":\"trucking\""));
        assert!(json.contains("\"businessName\""));
        assert_eq!(BusinessConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn malformed_json_is_a_validation_error() {
        assert!(matches!(
            BusinessConfig::from_json("{\"businessType\":\"spaceship\"}"),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn business_type_parses_case_insensitively() {
        assert_eq!("Hotel".parse::<BusinessType>().unwrap(), BusinessType::Hotel);
        assert!("bakery".parse::<BusinessType>().is_err());
    }
}
