//! `stockroom-business`: per-business setup around the inventory.
//!
//! Business presets, the industry catalog used to seed a new inventory, the
//! first-run setup wizard, onboarding tasks and process settings.

pub mod business;
pub mod industry;
pub mod onboarding;
pub mod settings;
pub mod setup;

pub use business::{BUSINESS_CONFIG_KEY, BusinessConfig, BusinessType, SUBSCRIPTION_KEY, Terminology};
pub use industry::{GENERAL_INDUSTRY, INDUSTRIES, IndustryPreset, industry_by_id};
pub use onboarding::{Onboarding, OnboardingTask};
pub use settings::AppSettings;
pub use setup::{SetupState, SetupStep, StarterItem, Wizard, is_step_complete};
