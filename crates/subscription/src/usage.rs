use serde::{Deserialize, Serialize};

use crate::tier::{Limit, TierLimits};

/// Current consumption, as reported by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageStats {
    pub items: u64,
    pub users: u64,
    pub locations: u64,
    pub api_calls: u64,
    /// Megabytes.
    pub storage_used: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Feature {
    Items,
    Users,
    Locations,
    ApiCalls,
    Storage,
}

impl Feature {
    pub const ALL: [Feature; 5] = [
        Feature::Items,
        Feature::Users,
        Feature::Locations,
        Feature::ApiCalls,
        Feature::Storage,
    ];
}

impl UsageStats {
    pub fn get(&self, feature: Feature) -> u64 {
        match feature {
            Feature::Items => self.items,
            Feature::Users => self.users,
            Feature::Locations => self.locations,
            Feature::ApiCalls => self.api_calls,
            Feature::Storage => self.storage_used,
        }
    }
}

impl TierLimits {
    pub fn get(&self, feature: Feature) -> Limit {
        match feature {
            Feature::Items => self.items,
            Feature::Users => self.users,
            Feature::Locations => self.locations,
            Feature::ApiCalls => self.api_calls,
            Feature::Storage => self.storage_mb,
        }
    }
}

/// Whether `feature` has used up its allowance. Unlimited features never are.
pub fn is_at_limit(limits: &TierLimits, usage: &UsageStats, feature: Feature) -> bool {
    match limits.get(feature) {
        Limit::Unlimited => false,
        Limit::Limited(cap) => usage.get(feature) >= cap,
    }
}

/// Share of the allowance in use, capped at 100. Unlimited features report 0,
/// as does a zero cap.
pub fn usage_percentage(limits: &TierLimits, usage: &UsageStats, feature: Feature) -> f64 {
    match limits.get(feature) {
        Limit::Unlimited | Limit::Limited(0) => 0.0,
        Limit::Limited(cap) => (usage.get(feature) as f64 / cap as f64 * 100.0).min(100.0),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureAccess {
    pub allowed: bool,
    pub remaining: Limit,
}

/// Whether one more unit of `feature` may be used, and how many remain.
pub fn check_feature(limits: &TierLimits, usage: &UsageStats, feature: Feature) -> FeatureAccess {
    match limits.get(feature) {
        Limit::Unlimited => FeatureAccess {
            allowed: true,
            remaining: Limit::Unlimited,
        },
        Limit::Limited(cap) => {
            let used = usage.get(feature);
            FeatureAccess {
                allowed: used < cap,
                remaining: Limit::Limited(cap.saturating_sub(used)),
            }
        }
    }
}
