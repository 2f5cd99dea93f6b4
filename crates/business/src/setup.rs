//! First-run setup wizard.
//!
//! Step completion is a pure function of the collected selections, so the
//! wizard can be rebuilt from a saved [`SetupState`] at any point.

use serde::{Deserialize, Serialize};

use stockroom_core::{DomainError, DomainResult, ItemId};
use stockroom_inventory::{InventoryRecord, Priority, StockStatus};

use crate::industry::IndustryPreset;

/// Number of preset categories selected up front.
const PRESELECTED_CATEGORIES: usize = 4;
const DEFAULT_CATEGORY: &str = "General";
const DEFAULT_MIN_STOCK: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SetupStep {
    Industry,
    Business,
    Categories,
    Items,
    Configuration,
    Complete,
}

impl SetupStep {
    pub const ALL: [SetupStep; 6] = [
        SetupStep::Industry,
        SetupStep::Business,
        SetupStep::Categories,
        SetupStep::Items,
        SetupStep::Configuration,
        SetupStep::Complete,
    ];

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn title(&self) -> &'static str {
        match self {
            SetupStep::Industry => "Select Industry",
            SetupStep::Business => "Business Details",
            SetupStep::Categories => "Inventory Categories",
            SetupStep::Items => "Initial Items",
            SetupStep::Configuration => "System Configuration",
            SetupStep::Complete => "Launch System",
        }
    }
}

/// A starter item drafted during setup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StarterItem {
    pub name: String,
    pub category: String,
    pub min_stock: f64,
    pub unit: String,
    pub priority: Priority,
}

/// Everything the wizard has collected so far.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SetupState {
    pub industry: Option<String>,
    pub business_name: String,
    pub business_location: String,
    pub categories: Vec<String>,
    pub items: Vec<StarterItem>,
    pub finished: bool,
}

pub fn is_step_complete(state: &SetupState, step: SetupStep) -> bool {
    match step {
        SetupStep::Industry => state.industry.as_deref().is_some_and(|i| !i.is_empty()),
        SetupStep::Business => !state.business_name.trim().is_empty(),
        SetupStep::Categories => !state.categories.is_empty(),
        SetupStep::Items => !state.items.is_empty(),
        SetupStep::Configuration | SetupStep::Complete => state.finished,
    }
}

/// Step cursor over a [`SetupState`].
#[derive(Debug, Clone, Default)]
pub struct Wizard {
    state: SetupState,
    current: usize,
}

impl Wizard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a wizard from a saved state, positioned on the first step
    /// that is not complete yet.
    pub fn resume(state: SetupState) -> Self {
        let current = SetupStep::ALL
            .iter()
            .position(|step| !is_step_complete(&state, *step))
            .unwrap_or(SetupStep::ALL.len() - 1);
        Self { state, current }
    }

    pub fn state(&self) -> &SetupState {
        &self.state
    }

    pub fn current_step(&self) -> SetupStep {
        SetupStep::ALL[self.current.min(SetupStep::ALL.len() - 1)]
    }

    pub fn next(&mut self) -> SetupStep {
        if self.current + 1 < SetupStep::ALL.len() {
            self.current += 1;
        }
        self.current_step()
    }

    pub fn previous(&mut self) -> SetupStep {
        self.current = self.current.saturating_sub(1);
        self.current_step()
    }

    /// Choose an industry: pre-select its first categories, draft its common
    /// items and move on to the business details.
    pub fn select_industry(&mut self, preset: &IndustryPreset) {
        self.state.industry = Some(preset.id.to_string());
        self.state.categories = preset
            .categories
            .iter()
            .take(PRESELECTED_CATEGORIES)
            .map(|c| c.to_string())
            .collect();
        let category = self
            .state
            .categories
            .first()
            .cloned()
            .unwrap_or_else(|| DEFAULT_CATEGORY.to_string());
        self.state.items = preset
            .common_items
            .iter()
            .map(|item| StarterItem {
                name: item.name.to_string(),
                category: category.clone(),
                min_stock: DEFAULT_MIN_STOCK,
                unit: item.unit.unwrap_or("unit").to_string(),
                priority: Priority::Medium,
            })
            .collect();
        self.current = SetupStep::Business.index();
        tracing::debug!(industry = preset.id, "setup industry selected");
    }

    pub fn set_business(&mut self, name: &str, location: &str) {
        self.state.business_name = name.trim().to_string();
        self.state.business_location = location.trim().to_string();
    }

    /// Select or deselect a category. Returns whether it is now selected.
    pub fn toggle_category(&mut self, category: &str) -> bool {
        if let Some(pos) = self.state.categories.iter().position(|c| c == category) {
            self.state.categories.remove(pos);
            false
        } else {
            self.state.categories.push(category.to_string());
            true
        }
    }

    /// Draft a blank item in the first selected category.
    pub fn add_item(&mut self, name: &str) {
        let category = self
            .state
            .categories
            .first()
            .cloned()
            .unwrap_or_else(|| DEFAULT_CATEGORY.to_string());
        self.state.items.push(StarterItem {
            name: name.to_string(),
            category,
            min_stock: DEFAULT_MIN_STOCK,
            unit: "pieces".to_string(),
            priority: Priority::Medium,
        });
    }

    pub fn remove_item(&mut self, index: usize) -> Option<StarterItem> {
        (index < self.state.items.len()).then(|| self.state.items.remove(index))
    }

    /// Completed steps as a percentage of all steps.
    pub fn progress(&self) -> f64 {
        let done = SetupStep::ALL
            .iter()
            .filter(|step| is_step_complete(&self.state, **step))
            .count();
        done as f64 / SetupStep::ALL.len() as f64 * 100.0
    }

    /// Close the wizard and turn the drafted items into inventory records.
    pub fn finish(&mut self) -> DomainResult<Vec<InventoryRecord>> {
        let missing: Vec<&str> = SetupStep::ALL[..SetupStep::Configuration.index()]
            .iter()
            .filter(|step| !is_step_complete(&self.state, **step))
            .map(SetupStep::title)
            .collect();
        if !missing.is_empty() {
            return Err(DomainError::validation(format!(
                "setup incomplete: {}",
                missing.join(", ")
            )));
        }

        let industry = self.state.industry.clone().unwrap_or_default();
        let records = self
            .state
            .items
            .iter()
            .enumerate()
            .filter(|(_, item)| !item.name.trim().is_empty())
            .map(|(n, item)| -> DomainResult<InventoryRecord> {
                let id = ItemId::new(format!("itm-{industry}-{}", n + 1))?;
                let mut record = InventoryRecord::new(id, item.name.trim())
                    .with_category(item.category.clone())
                    .with_industry(industry.clone())
                    .with_min_stock(item.min_stock)
                    .with_priority(item.priority)
                    .with_status(StockStatus::OutOfStock);
                record.unit_of_measure = Some(item.unit.clone());
                if !self.state.business_location.is_empty() {
                    record.location = Some(self.state.business_location.clone());
                }
                Ok(record)
            })
            .collect::<DomainResult<Vec<_>>>()?;

        self.state.finished = true;
        self.current = SetupStep::Complete.index();
        tracing::info!(industry = %industry, items = records.len(), "setup finished");
        Ok(records)
    }
}
