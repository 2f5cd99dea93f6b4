//! Usage reports: consumption totals bucketed by day, ISO week or month.

use core::str::FromStr;
use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use stockroom_core::{DomainError, ItemId};

use crate::item::StockConsumed;
use crate::record::{InventoryRecord, finite_or_zero};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportPeriod {
    #[default]
    Daily,
    Weekly,
    Monthly,
}

impl ReportPeriod {
    /// Bucket label for `at`: `2025-10-11`, `2025-W41` or `2025-10`.
    ///
    /// Weeks follow ISO 8601, so the first days of January may belong to the
    /// last week of the previous year.
    pub fn key(self, at: DateTime<Utc>) -> String {
        match self {
            ReportPeriod::Daily => at.format("%Y-%m-%d").to_string(),
            ReportPeriod::Weekly => {
                let week = at.iso_week();
                format!("{}-W{:02}", week.year(), week.week())
            }
            ReportPeriod::Monthly => at.format("%Y-%m").to_string(),
        }
    }
}

impl FromStr for ReportPeriod {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "daily" => Ok(ReportPeriod::Daily),
            "weekly" => Ok(ReportPeriod::Weekly),
            "monthly" => Ok(ReportPeriod::Monthly),
            other => Err(DomainError::unknown("report period", other)),
        }
    }
}

/// One logged usage, in the shape the web client keeps its usage log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageRecord {
    pub id: String,
    /// RFC 3339 timestamp or a bare `YYYY-MM-DD` date.
    pub timestamp: String,
    pub item: String,
    pub quantity: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<f64>,
}

impl UsageRecord {
    /// Log entry for a consumption of `record`, priced at its sale price.
    pub fn from_consumed(event: &StockConsumed, record: &InventoryRecord) -> Self {
        Self {
            id: ItemId::generate().to_string(),
            timestamp: event.occurred_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            item: record.name.clone(),
            quantity: event.consumed,
            unit_price: Some(record.price),
        }
    }

    pub fn occurred_at(&self) -> Option<DateTime<Utc>> {
        let raw = self.timestamp.trim();
        DateTime::parse_from_rfc3339(raw)
            .map(|at| at.with_timezone(&Utc))
            .ok()
            .or_else(|| {
                NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                    .ok()
                    .and_then(|d| d.and_hms_opt(0, 0, 0))
                    .map(|at| at.and_utc())
            })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodTotal {
    pub period: String,
    pub total_items: f64,
    /// Sum of `quantity * unit_price`, rounded to cents. Unpriced usage adds
    /// nothing.
    pub total_value: f64,
}

/// Totals per period, oldest first. Records with an unreadable timestamp are
/// skipped.
pub fn aggregate_by_period(records: &[UsageRecord], period: ReportPeriod) -> Vec<PeriodTotal> {
    let mut buckets: BTreeMap<String, (f64, f64)> = BTreeMap::new();
    let mut skipped = 0usize;

    for record in records {
        let Some(at) = record.occurred_at() else {
            skipped += 1;
            continue;
        };
        let quantity = finite_or_zero(record.quantity);
        let entry = buckets.entry(period.key(at)).or_default();
        entry.0 += quantity;
        if let Some(price) = record.unit_price {
            entry.1 += quantity * finite_or_zero(price);
        }
    }
    if skipped > 0 {
        tracing::debug!(skipped, "usage records without a readable timestamp");
    }

    buckets
        .into_iter()
        .map(|(period, (total_items, total_value))| PeriodTotal {
            period,
            total_items,
            total_value: (total_value * 100.0).round() / 100.0,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn usage(timestamp: &str, quantity: f64, unit_price: Option<f64>) -> UsageRecord {
        UsageRecord {
            id: timestamp.to_string(),
            timestamp: timestamp.to_string(),
            item: "Rice".to_string(),
            quantity,
            unit_price,
        }
    }

    #[test]
    fn period_keys() {
        let at = Utc.with_ymd_and_hms(2025, 10, 11, 15, 0, 0).unwrap();
        assert_eq!(ReportPeriod::Daily.key(at), "2025-10-11");
        assert_eq!(ReportPeriod::Weekly.key(at), "2025-W41");
        assert_eq!(ReportPeriod::Monthly.key(at), "2025-10");
    }

    #[test]
    fn iso_weeks_cross_year_boundaries() {
        let monday = Utc.with_ymd_and_hms(2024, 12, 30, 8, 0, 0).unwrap();
        assert_eq!(ReportPeriod::Weekly.key(monday), "2025-W01");
        let sunday = Utc.with_ymd_and_hms(2021, 1, 3, 8, 0, 0).unwrap();
        assert_eq!(ReportPeriod::Weekly.key(sunday), "2020-W53");
    }

    #[test]
    fn weekly_totals_group_across_new_year() {
        let records = vec![
            usage("2025-01-02T10:00:00Z", 3.0, Some(2.0)),
            usage("2024-12-30T09:00:00Z", 2.0, Some(2.0)),
            usage("2024-12-27T09:00:00Z", 1.0, None),
        ];
        let totals = aggregate_by_period(&records, ReportPeriod::Weekly);
        assert_eq!(
            totals,
            vec![
                PeriodTotal {
                    period: "2024-W52".into(),
                    total_items: 1.0,
                    total_value: 0.0,
                },
                PeriodTotal {
                    period: "2025-W01".into(),
                    total_items: 5.0,
                    total_value: 10.0,
                },
            ]
        );
    }

    #[test]
    fn buckets_come_out_oldest_first() {
        let records = vec![
            usage("2025-03-01", 1.0, None),
            usage("2024-11-15T12:00:00Z", 1.0, None),
            usage("2025-01-20T12:00:00+02:00", 1.0, None),
        ];
        let periods: Vec<String> = aggregate_by_period(&records, ReportPeriod::Monthly)
            .into_iter()
            .map(|t| t.period)
            .collect();
        assert_eq!(periods, vec!["2024-11", "2025-01", "2025-03"]);
    }

    #[test]
    fn value_is_rounded_to_cents_and_bad_timestamps_skipped() {
        let records = vec![
            usage("2025-10-11T08:00:00Z", 3.0, Some(0.333)),
            usage("2025-10-11T09:00:00Z", 1.0, Some(0.001)),
            usage("yesterday", 50.0, Some(1.0)),
        ];
        let totals = aggregate_by_period(&records, ReportPeriod::Daily);
        assert_eq!(totals.len(), 1);
        assert_eq!(totals[0].total_items, 4.0);
        assert_eq!(totals[0].total_value, 1.0);
    }

    #[test]
    fn consumption_events_become_priced_usage() {
        let record = InventoryRecord::new(ItemId::new("4").unwrap(), "Engine Oil").with_price(25.0);
        let event = StockConsumed {
            item_id: record.id.clone(),
            requested: 10.0,
            consumed: 8.0,
            occurred_at: Utc.with_ymd_and_hms(2024, 1, 20, 9, 0, 0).unwrap(),
        };
        let usage = UsageRecord::from_consumed(&event, &record);
        assert_eq!(usage.timestamp, "2024-01-20T09:00:00Z");
        assert_eq!(usage.quantity, 8.0);
        assert_eq!(usage.unit_price, Some(25.0));
        assert_eq!(usage.occurred_at(), Some(event.occurred_at));
    }

    #[test]
    fn period_parses_from_cli_words() {
        assert_eq!("weekly".parse::<ReportPeriod>().unwrap(), ReportPeriod::Weekly);
        assert!("yearly".parse::<ReportPeriod>().is_err());
    }
}
