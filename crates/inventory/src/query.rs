//! Filtering and sorting of inventory snapshots.

use core::cmp::Ordering;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use stockroom_core::DomainError;

use crate::record::{InventoryRecord, Priority, StockStatus};

/// Sentinel filter value meaning "no filter on this dimension".
pub const ALL: &str = "all";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

impl FromStr for SortOrder {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(DomainError::unknown("sort order", other)),
        }
    }
}

/// Record field a listing can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    #[default]
    Name,
    Category,
    Industry,
    Quantity,
    MinStock,
    Price,
    Cost,
    Status,
    Priority,
    Sku,
    Location,
    Supplier,
    ExpiryDate,
    LastUpdated,
}

impl SortField {
    pub const ALL: [SortField; 14] = [
        SortField::Name,
        SortField::Category,
        SortField::Industry,
        SortField::Quantity,
        SortField::MinStock,
        SortField::Price,
        SortField::Cost,
        SortField::Status,
        SortField::Priority,
        SortField::Sku,
        SortField::Location,
        SortField::Supplier,
        SortField::ExpiryDate,
        SortField::LastUpdated,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Name => "name",
            SortField::Category => "category",
            SortField::Industry => "industry",
            SortField::Quantity => "quantity",
            SortField::MinStock => "minStock",
            SortField::Price => "price",
            SortField::Cost => "cost",
            SortField::Status => "status",
            SortField::Priority => "priority",
            SortField::Sku => "sku",
            SortField::Location => "location",
            SortField::Supplier => "supplier",
            SortField::ExpiryDate => "expiryDate",
            SortField::LastUpdated => "lastUpdated",
        }
    }

    fn key<'a>(&self, record: &'a InventoryRecord) -> Option<SortKey<'a>> {
        match self {
            SortField::Name => Some(SortKey::Text(&record.name)),
            SortField::Category => Some(SortKey::Text(&record.category)),
            SortField::Industry => Some(SortKey::Text(&record.industry)),
            SortField::Quantity => Some(SortKey::Number(record.quantity)),
            SortField::MinStock => record.min_stock.map(SortKey::Number),
            SortField::Price => Some(SortKey::Number(record.price)),
            SortField::Cost => record.cost.map(SortKey::Number),
            SortField::Status => Some(SortKey::Text(record.status.as_str())),
            SortField::Priority => Some(SortKey::Text(record.priority.as_str())),
            SortField::Sku => record.sku.as_deref().map(SortKey::Text),
            SortField::Location => record.location.as_deref().map(SortKey::Text),
            SortField::Supplier => record.supplier.as_deref().map(SortKey::Text),
            SortField::ExpiryDate => record.expiry_date.map(SortKey::Date),
            SortField::LastUpdated => record.last_updated.map(SortKey::Date),
        }
    }
}

impl FromStr for SortField {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.replace(['_', '-'], "").to_ascii_lowercase();
        SortField::ALL
            .into_iter()
            .find(|field| field.as_str().to_ascii_lowercase() == wanted)
            .ok_or_else(|| DomainError::unknown("sort field", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum SortKey<'a> {
    Text(&'a str),
    Number(f64),
    Date(chrono::NaiveDate),
}

impl SortKey<'_> {
    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            (SortKey::Number(a), SortKey::Number(b)) => a.total_cmp(b),
            (SortKey::Date(a), SortKey::Date(b)) => a.cmp(b),
            // A field always yields the same key kind.
            _ => Ordering::Equal,
        }
    }
}

/// Null-safe comparison: present values are ordered by `order`, absent values
/// always land after them.
fn compare_keys(a: Option<SortKey<'_>>, b: Option<SortKey<'_>>, order: SortOrder) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => match order {
            SortOrder::Asc => a.compare(&b),
            SortOrder::Desc => b.compare(&a),
        },
    }
}

/// Search/filter/sort settings of an inventory listing.
///
/// Every filter is optional; `None`, an empty string and `"all"` all disable
/// the dimension.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterCriteria {
    pub search_term: Option<String>,
    pub category: Option<String>,
    pub industry: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub sort_by: SortField,
    pub sort_order: SortOrder,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search_term = Some(term.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn industry(mut self, industry: impl Into<String>) -> Self {
        self.industry = Some(industry.into());
        self
    }

    pub fn status(mut self, status: StockStatus) -> Self {
        self.status = Some(status.as_str().to_string());
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority.as_str().to_string());
        self
    }

    pub fn sorted_by(mut self, field: SortField, order: SortOrder) -> Self {
        self.sort_by = field;
        self.sort_order = order;
        self
    }

    /// Column-header click: the active column flips direction, a new column
    /// starts ascending.
    pub fn toggle_sort(&mut self, field: SortField) {
        if self.sort_by == field {
            self.sort_order = self.sort_order.toggled();
        } else {
            self.sort_by = field;
            self.sort_order = SortOrder::Asc;
        }
    }

    /// Whether `record` passes every active filter.
    pub fn matches(&self, record: &InventoryRecord) -> bool {
        matches_search(record, self.search_term.as_deref())
            && matches_exact(&record.category, self.category.as_deref())
            && matches_exact(&record.industry, self.industry.as_deref())
            && matches_exact(record.status.as_str(), self.status.as_deref())
            && matches_exact(record.priority.as_str(), self.priority.as_deref())
    }
}

fn is_active(filter: Option<&str>) -> Option<&str> {
    filter.filter(|value| !value.is_empty() && *value != ALL)
}

fn matches_exact(value: &str, filter: Option<&str>) -> bool {
    is_active(filter).is_none_or(|wanted| value == wanted)
}

fn matches_search(record: &InventoryRecord, term: Option<&str>) -> bool {
    let Some(term) = term.filter(|t| !t.is_empty()) else {
        return true;
    };
    let needle = term.to_lowercase();
    [
        Some(record.name.as_str()),
        Some(record.category.as_str()),
        record.sku.as_deref(),
        record.description.as_deref(),
    ]
    .into_iter()
    .any(|field| field.unwrap_or_default().to_lowercase().contains(&needle))
}

/// Filter `records` by `criteria` and sort the survivors.
///
/// The input is left untouched; ties keep their original relative order.
pub fn filter_and_sort(records: &[InventoryRecord], criteria: &FilterCriteria) -> Vec<InventoryRecord> {
    let mut out: Vec<InventoryRecord> = records
        .iter()
        .filter(|record| criteria.matches(record))
        .cloned()
        .collect();

    let field = criteria.sort_by;
    let order = criteria.sort_order;
    out.sort_by(|a, b| compare_keys(field.key(a), field.key(b), order));

    tracing::debug!(
        total = records.len(),
        matched = out.len(),
        sort_by = field.as_str(),
        "filtered inventory"
    );
    out
}

/// Values offered by the listing's filter dropdowns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub categories: Vec<String>,
    pub industries: Vec<String>,
    pub statuses: Vec<String>,
    pub priorities: Vec<String>,
}

/// Distinct categories and industries in first-seen order, each list led by
/// the `"all"` sentinel.
pub fn filter_options(records: &[InventoryRecord]) -> FilterOptions {
    fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
        let mut out = vec![ALL.to_string()];
        for value in values {
            if !out.iter().any(|seen| seen == value) {
                out.push(value.to_string());
            }
        }
        out
    }

    FilterOptions {
        categories: distinct(records.iter().map(|r| r.category.as_str())),
        industries: distinct(records.iter().map(|r| r.industry.as_str())),
        statuses: distinct(StockStatus::ALL.iter().map(|s| s.as_str())),
        priorities: distinct(Priority::ALL.iter().map(|p| p.as_str())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use stockroom_core::ItemId;

    fn record(id: &str, name: &str) -> InventoryRecord {
        InventoryRecord::new(ItemId::new(id).unwrap(), name)
    }

    fn salmon() -> InventoryRecord {
        record("1", "Atlantic Salmon").with_category("Seafood").with_sku("SAL-1")
    }

    fn names(records: &[InventoryRecord]) -> Vec<&str> {
        records.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn search_matches_name_category_and_sku_case_insensitively() {
        let records = vec![salmon()];
        for term in ["salm", "seaf", "sal-1", "ATLANTIC"] {
            let out = filter_and_sort(&records, &FilterCriteria::new().search(term));
            assert_eq!(out.len(), 1, "term {term} should match");
        }
        let out = filter_and_sort(&records, &FilterCriteria::new().search("tomato"));
        assert!(out.is_empty());
    }

    #[test]
    fn search_covers_description_and_tolerates_missing_fields() {
        let bare = record("2", "Bolts");
        let described = record("3", "Helmets").with_description("OSHA compliant");
        let out = filter_and_sort(&[bare, described], &FilterCriteria::new().search("osha"));
        assert_eq!(names(&out), vec!["Helmets"]);
    }

    #[test]
    fn all_sentinel_and_empty_values_disable_filters() {
        let records = vec![salmon(), record("2", "Tomatoes").with_category("Produce")];
        let criteria = FilterCriteria::new().category("all").industry("").search("");
        assert_eq!(filter_and_sort(&records, &criteria).len(), 2);
    }

    #[test]
    fn active_filters_are_anded() {
        let records = vec![
            record("1", "Masks")
                .with_industry("healthcare")
                .with_status(StockStatus::LowStock)
                .with_priority(Priority::Critical),
            record("2", "Gloves")
                .with_industry("healthcare")
                .with_status(StockStatus::InStock)
                .with_priority(Priority::Critical),
            record("3", "Helmets")
                .with_industry("construction")
                .with_status(StockStatus::LowStock)
                .with_priority(Priority::Critical),
        ];
        let criteria = FilterCriteria::new()
            .industry("healthcare")
            .status(StockStatus::LowStock)
            .priority(Priority::Critical);
        assert_eq!(names(&filter_and_sort(&records, &criteria)), vec!["Masks"]);
    }

    #[test]
    fn unknown_status_filter_matches_nothing() {
        let mut criteria = FilterCriteria::new();
        criteria.status = Some("discontinued".into());
        assert!(filter_and_sort(&[salmon()], &criteria).is_empty());
    }

    #[test]
    fn missing_sort_values_sink_in_both_directions() {
        let records = vec![
            record("a", "five").with_min_stock(5.0),
            record("b", "none"),
            record("c", "one").with_min_stock(1.0),
        ];

        let asc = FilterCriteria::new().sorted_by(SortField::MinStock, SortOrder::Asc);
        assert_eq!(names(&filter_and_sort(&records, &asc)), vec!["one", "five", "none"]);

        let desc = FilterCriteria::new().sorted_by(SortField::MinStock, SortOrder::Desc);
        assert_eq!(names(&filter_and_sort(&records, &desc)), vec!["five", "one", "none"]);
    }

    #[test]
    fn ties_keep_input_order() {
        let records = vec![
            record("1", "b").with_quantity(3.0),
            record("2", "a").with_quantity(3.0),
            record("3", "c").with_quantity(1.0),
        ];
        let criteria = FilterCriteria::new().sorted_by(SortField::Quantity, SortOrder::Asc);
        assert_eq!(names(&filter_and_sort(&records, &criteria)), vec!["c", "b", "a"]);

        let criteria = FilterCriteria::new().sorted_by(SortField::Quantity, SortOrder::Desc);
        assert_eq!(names(&filter_and_sort(&records, &criteria)), vec!["b", "a", "c"]);
    }

    #[test]
    fn input_is_not_mutated() {
        let records = vec![record("1", "b"), record("2", "a")];
        let before = records.clone();
        let _ = filter_and_sort(&records, &FilterCriteria::new());
        assert_eq!(records, before);
    }

    #[test]
    fn toggle_sort_flips_then_resets() {
        let mut criteria = FilterCriteria::new();
        criteria.toggle_sort(SortField::Name);
        assert_eq!(criteria.sort_order, SortOrder::Desc);
        criteria.toggle_sort(SortField::Price);
        assert_eq!((criteria.sort_by, criteria.sort_order), (SortField::Price, SortOrder::Asc));
    }

    #[test]
    fn sort_field_parses_client_and_snake_names() {
        assert_eq!("minStock".parse::<SortField>().unwrap(), SortField::MinStock);
        assert_eq!("expiry_date".parse::<SortField>().unwrap(), SortField::ExpiryDate);
        assert!("colour".parse::<SortField>().is_err());
    }

    #[test]
    fn filter_options_are_distinct_in_first_seen_order() {
        let records = vec![
            salmon().with_industry("restaurant"),
            record("2", "Masks").with_category("PPE").with_industry("healthcare"),
            record("3", "Trout").with_category("Seafood").with_industry("restaurant"),
        ];
        let options = filter_options(&records);
        assert_eq!(options.categories, vec!["all", "Seafood", "PPE"]);
        assert_eq!(options.industries, vec!["all", "restaurant", "healthcare"]);
        assert_eq!(options.statuses.len(), 5);
        assert_eq!(options.priorities[4], "critical");
    }

    fn arb_record() -> impl Strategy<Value = InventoryRecord> {
        (
            0u32..1000,
            "[a-d]{1,3}",
            prop::sample::select(vec!["PPE", "Seafood", "Tools"]),
            prop::option::of(0.0f64..50.0),
            prop::sample::select(StockStatus::ALL.to_vec()),
            prop::sample::select(Priority::ALL.to_vec()),
            prop::option::of("[A-C]{1,2}"),
        )
            .prop_map(|(id, name, category, min_stock, status, priority, sku)| {
                let mut r = InventoryRecord::new(ItemId::new(format!("id-{id}")).unwrap(), name)
                    .with_category(category)
                    .with_status(status)
                    .with_priority(priority);
                r.min_stock = min_stock;
                r.sku = sku;
                r
            })
    }

    fn arb_criteria() -> impl Strategy<Value = FilterCriteria> {
        (
            prop::option::of("[a-dA-C]{0,2}"),
            prop::option::of(prop::sample::select(vec!["all", "PPE", "Tools"])),
            prop::option::of(prop::sample::select(vec!["all", "low-stock", "in-stock"])),
            prop::sample::select(SortField::ALL.to_vec()),
            prop::bool::ANY,
        )
            .prop_map(|(search, category, status, field, desc)| FilterCriteria {
                search_term: search,
                category: category.map(str::to_string),
                status: status.map(str::to_string),
                sort_by: field,
                sort_order: if desc { SortOrder::Desc } else { SortOrder::Asc },
                ..FilterCriteria::default()
            })
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: re-applying the same criteria to an already filtered
        /// listing changes nothing.
        #[test]
        fn filter_and_sort_is_idempotent(
            records in prop::collection::vec(arb_record(), 0..20),
            criteria in arb_criteria(),
        ) {
            let once = filter_and_sort(&records, &criteria);
            let twice = filter_and_sort(&once, &criteria);
            prop_assert_eq!(once, twice);
        }

        /// Property: every record that survives matches the criteria, and no
        /// matching record is dropped.
        #[test]
        fn filter_keeps_exactly_the_matching_records(
            records in prop::collection::vec(arb_record(), 0..20),
            criteria in arb_criteria(),
        ) {
            let out = filter_and_sort(&records, &criteria);
            let expected = records.iter().filter(|r| criteria.matches(r)).count();
            prop_assert_eq!(out.len(), expected);
            prop_assert!(out.iter().all(|r| criteria.matches(r)));
        }
    }
}
