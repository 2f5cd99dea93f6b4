use core::str::FromStr;

use serde::{Deserialize, Serialize};

use stockroom_core::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TierId {
    #[default]
    Free,
    Professional,
    Enterprise,
}

impl TierId {
    pub fn as_str(&self) -> &'static str {
        match self {
            TierId::Free => "free",
            TierId::Professional => "professional",
            TierId::Enterprise => "enterprise",
        }
    }
}

impl core::fmt::Display for TierId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TierId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "free" => Ok(TierId::Free),
            "professional" => Ok(TierId::Professional),
            "enterprise" => Ok(TierId::Enterprise),
            other => Err(DomainError::unknown("tier", other)),
        }
    }
}

/// A usage cap. Serialised as a number, with `-1` meaning unlimited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum Limit {
    Limited(u64),
    Unlimited,
}

impl Limit {
    pub fn is_unlimited(&self) -> bool {
        matches!(self, Limit::Unlimited)
    }
}

impl TryFrom<i64> for Limit {
    type Error = DomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(Limit::Unlimited),
            v if v >= 0 => Ok(Limit::Limited(v as u64)),
            v => Err(DomainError::validation(format!("limit must be -1 or non-negative, got {v}"))),
        }
    }
}

impl From<Limit> for i64 {
    fn from(limit: Limit) -> Self {
        match limit {
            Limit::Unlimited => -1,
            Limit::Limited(v) => i64::try_from(v).unwrap_or(i64::MAX),
        }
    }
}

impl core::fmt::Display for Limit {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Limit::Unlimited => f.write_str("unlimited"),
            Limit::Limited(v) => write!(f, "{v}"),
        }
    }
}

/// Convert a storage label such as `100MB` or `1GB` to megabytes
/// (1GB = 1024MB). Anything else is rejected.
pub fn storage_megabytes(label: &str) -> Option<u64> {
    let label = label.trim().to_ascii_uppercase();
    if let Some(n) = label.strip_suffix("GB") {
        return n.trim().parse::<u64>().ok().and_then(|gb| gb.checked_mul(1024));
    }
    label.strip_suffix("MB")?.trim().parse().ok()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TierLimits {
    pub items: Limit,
    pub users: Limit,
    pub locations: Limit,
    pub api_calls: Limit,
    pub storage_mb: Limit,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tier {
    pub id: TierId,
    pub name: &'static str,
    /// Monthly price in dollars.
    pub price: u32,
    pub storage_label: &'static str,
    pub limits: TierLimits,
}

static TIERS: [Tier; 3] = [
    Tier {
        id: TierId::Free,
        name: "Starter",
        price: 0,
        storage_label: "100MB",
        limits: TierLimits {
            items: Limit::Limited(50),
            users: Limit::Limited(1),
            locations: Limit::Limited(1),
            api_calls: Limit::Limited(100),
            storage_mb: Limit::Limited(100),
        },
    },
    Tier {
        id: TierId::Professional,
        name: "Professional",
        price: 29,
        storage_label: "1GB",
        limits: TierLimits {
            items: Limit::Unlimited,
            users: Limit::Limited(5),
            locations: Limit::Limited(5),
            api_calls: Limit::Limited(1000),
            storage_mb: Limit::Limited(1024),
        },
    },
    Tier {
        id: TierId::Enterprise,
        name: "Enterprise",
        price: 99,
        storage_label: "10GB",
        limits: TierLimits {
            items: Limit::Unlimited,
            users: Limit::Unlimited,
            locations: Limit::Unlimited,
            api_calls: Limit::Unlimited,
            storage_mb: Limit::Limited(10 * 1024),
        },
    },
];

pub fn tiers() -> &'static [Tier] {
    &TIERS
}

pub fn tier(id: TierId) -> &'static Tier {
    match id {
        TierId::Free => &TIERS[0],
        TierId::Professional => &TIERS[1],
        TierId::Enterprise => &TIERS[2],
    }
}
