//! `stockroom-subscription`: plan tiers and what each one allows.
//!
//! Pure domain logic: callers pass in the current time and usage figures.

pub mod subscription;
pub mod tier;
pub mod usage;

pub use subscription::{SubscriptionStatus, TRIAL_DAYS, UserSubscription};
pub use tier::{Limit, Tier, TierId, TierLimits, storage_megabytes, tier, tiers};
pub use usage::{Feature, FeatureAccess, UsageStats, check_feature, is_at_limit, usage_percentage};
