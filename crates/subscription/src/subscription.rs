use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use stockroom_core::{DomainError, DomainResult};

use crate::tier::{TierId, TierLimits, tier};

pub const TRIAL_DAYS: i64 = 14;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    Active,
    Trial,
    Expired,
    Cancelled,
}

/// The subscription stored alongside the business configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSubscription {
    pub tier: TierId,
    pub status: SubscriptionStatus,
    pub start_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trial_end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_trial_used: bool,
}

impl UserSubscription {
    /// The subscription every new installation starts on.
    pub fn free(now: DateTime<Utc>) -> Self {
        Self {
            tier: TierId::Free,
            status: SubscriptionStatus::Active,
            start_date: now,
            end_date: None,
            trial_end_date: None,
            is_trial_used: false,
        }
    }

    /// Start the one-off 14-day trial of a paid tier.
    pub fn start_trial(&mut self, tier_id: TierId, now: DateTime<Utc>) -> DomainResult<()> {
        if tier_id == TierId::Free {
            return Err(DomainError::validation("only paid tiers offer a trial"));
        }
        if self.is_trial_used {
            return Err(DomainError::conflict("trial already used"));
        }
        self.tier = tier_id;
        self.status = SubscriptionStatus::Trial;
        self.start_date = now;
        self.end_date = None;
        self.trial_end_date = Some(now + Duration::days(TRIAL_DAYS));
        self.is_trial_used = true;
        tracing::info!(tier = %tier_id, "trial started");
        Ok(())
    }

    /// Switch to a paid (or free) plan immediately.
    pub fn upgrade(&mut self, tier_id: TierId, now: DateTime<Utc>) {
        self.tier = tier_id;
        self.status = SubscriptionStatus::Active;
        self.start_date = now;
        self.end_date = None;
        self.trial_end_date = None;
        tracing::info!(tier = %tier_id, "subscription changed");
    }

    pub fn cancel(&mut self, now: DateTime<Utc>) {
        self.status = SubscriptionStatus::Cancelled;
        self.end_date = Some(now);
    }

    /// Status as of `now`: a trial past its end date counts as expired.
    pub fn status_at(&self, now: DateTime<Utc>) -> SubscriptionStatus {
        match (self.status, self.trial_end_date) {
            (SubscriptionStatus::Trial, Some(end)) if now >= end => SubscriptionStatus::Expired,
            (status, _) => status,
        }
    }

    /// Tier whose limits apply at `now`. Expired and cancelled plans fall back
    /// to free.
    pub fn effective_tier(&self, now: DateTime<Utc>) -> TierId {
        match self.status_at(now) {
            SubscriptionStatus::Active | SubscriptionStatus::Trial => self.tier,
            SubscriptionStatus::Expired | SubscriptionStatus::Cancelled => TierId::Free,
        }
    }

    pub fn limits_at(&self, now: DateTime<Utc>) -> TierLimits {
        tier(self.effective_tier(now)).limits
    }

    /// Whole days left in the trial, if one is running.
    pub fn trial_days_left(&self, now: DateTime<Utc>) -> Option<i64> {
        if self.status_at(now) != SubscriptionStatus::Trial {
            return None;
        }
        self.trial_end_date.map(|end| (end - now).num_days())
    }

    pub fn to_json(&self) -> DomainResult<String> {
        serde_json::to_string(self).map_err(|e| DomainError::validation(e.to_string()))
    }

    pub fn from_json(json: &str) -> DomainResult<Self> {
        serde_json::from_str(json).map_err(|e| DomainError::validation(format!("subscription: {e}")))
    }
}
