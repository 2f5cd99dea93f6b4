//! Subcommand bodies. Each takes the loaded records and returns the text to
//! print, so they can be exercised without touching the file system.

use std::fmt::Write as _;

use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, Utc};

use stockroom_business::{AppSettings, industry_by_id};
use stockroom_core::{AggregateRoot, ItemId, OperatorId};
use stockroom_events::AuditEnvelope;
use stockroom_inventory::{
    ConsumeStock, FilterCriteria, InventoryRecord, ReceiveStock, StockCommand, StockEvent, StockItem,
    UsageRecord, aggregate_by_period, attention_items, compute_metrics, filter_and_sort, restock_suggestions,
};
use stockroom_verification::{
    IdentityOutcome, RecordingSpeech, ScanOutcome, VerificationConfig, VerificationError, VerificationGate,
    announce_attention,
};

use crate::cli::{AlertsArgs, ListArgs, MutationArgs, ReportArgs};

pub fn list(records: &[InventoryRecord], args: &ListArgs) -> Result<String> {
    let criteria = FilterCriteria {
        search_term: args.search.clone(),
        category: args.category.clone(),
        industry: args.industry.clone(),
        status: args.status.clone(),
        priority: args.priority.clone(),
        sort_by: args.sort,
        sort_order: args.order,
    };
    let rows = filter_and_sort(records, &criteria);

    if args.output.json {
        return serde_json::to_string_pretty(&rows).context("failed serializing listing");
    }
    let mut out = String::new();
    for r in &rows {
        writeln!(
            out,
            "{:<12} {:<32} {:<18} {:>10} {:<13} {}",
            r.id, r.name, r.category, r.quantity, r.status, r.priority
        )?;
    }
    writeln!(out, "{} of {} items", rows.len(), records.len())?;
    Ok(out)
}

pub fn metrics(records: &[InventoryRecord], json: bool) -> Result<String> {
    let m = compute_metrics(records);
    if json {
        return serde_json::to_string_pretty(&m).context("failed serializing metrics");
    }
    let mut out = String::new();
    writeln!(out, "unique products      {}", m.unique_products)?;
    writeln!(out, "total items          {}", m.total_items)?;
    writeln!(out, "total value          {:.2}", m.total_value)?;
    writeln!(out, "total cost           {:.2}", m.total_cost)?;
    writeln!(out, "profit margin        {:.1}%", m.profit_margin)?;
    writeln!(out, "average stock level  {:.1}", m.average_stock_level)?;
    writeln!(out, "low stock            {}", m.low_stock_items)?;
    writeln!(out, "out of stock         {}", m.out_of_stock_items)?;
    writeln!(out, "critical             {}", m.critical_items)?;
    Ok(out)
}

pub fn alerts(records: &[InventoryRecord], args: &AlertsArgs) -> Result<String> {
    let attention = attention_items(records);
    let suggestions = restock_suggestions(records);

    if args.output.json {
        let body = serde_json::json!({
            "attention": attention.iter().map(|r| r.id.as_str()).collect::<Vec<_>>(),
            "restock": suggestions,
        });
        return serde_json::to_string_pretty(&body).context("failed serializing alerts");
    }

    let mut out = String::new();
    if args.announce {
        let speech = RecordingSpeech::new();
        announce_attention(&speech, attention.len())?;
        for line in speech.spoken() {
            writeln!(out, "{line}")?;
        }
    }
    for s in &suggestions {
        writeln!(
            out,
            "{:<12} {:<32} {:<13} have {:>8} reorder {:>8}",
            s.item_id, s.name, s.status, s.current_quantity, s.suggested_quantity
        )?;
    }
    if suggestions.is_empty() {
        writeln!(out, "nothing to reorder")?;
    }
    Ok(out)
}

pub fn report(usage: &[UsageRecord], args: &ReportArgs) -> Result<String> {
    let totals = aggregate_by_period(usage, args.period);
    if args.output.json {
        return serde_json::to_string_pretty(&totals).context("failed serializing report");
    }
    let mut out = String::new();
    for t in &totals {
        writeln!(out, "{:<10} {:>10} {:>12.2}", t.period, t.total_items, t.total_value)?;
    }
    if totals.is_empty() {
        writeln!(out, "no usage recorded")?;
    }
    Ok(out)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Movement {
    Restock,
    Consume,
}

/// Result of a verified stock movement.
#[derive(Debug)]
pub struct MutationOutcome {
    pub records: Vec<InventoryRecord>,
    pub facts: Vec<AuditEnvelope<StockEvent>>,
}

/// Apply a restock or usage to one record, gated on scan + identity.
pub fn mutate(
    records: &[InventoryRecord],
    movement: Movement,
    args: &MutationArgs,
    settings: &AppSettings,
    now: DateTime<Utc>,
) -> Result<MutationOutcome> {
    let item_id = ItemId::new(args.item.as_str())?;
    let index = records
        .iter()
        .position(|r| r.id == item_id)
        .ok_or_else(|| anyhow!("no item with id {item_id}"))?;
    let record = &records[index];

    let mut config = settings.verification_config(Some(record.scan_code()));
    if args.skip_verification {
        config = VerificationConfig::bypassed();
    }
    let gate = build_gate(config, args);

    let command = match movement {
        Movement::Restock => StockCommand::Receive(ReceiveStock {
            item_id: item_id.clone(),
            amount: args.amount,
            location: args.location.clone(),
            occurred_at: now,
        }),
        Movement::Consume => StockCommand::Consume(ConsumeStock {
            item_id: item_id.clone(),
            amount: args.amount,
            occurred_at: now,
        }),
    };

    let mut item = StockItem::new(record.clone());
    let base = item.version();
    let result = gate.commit_with(|confirmation| {
        let events = item.execute(&command)?;
        let operator = confirmation.operator_name().map(|name| OperatorId::new(name)).transpose()?;
        Ok(events
            .into_iter()
            .enumerate()
            .map(|(i, event)| {
                let fact = AuditEnvelope::new(base + i as u64 + 1, event)
                    .approved_as(confirmation.face.clone());
                match &operator {
                    Some(op) => fact.performed_by(op.clone()),
                    None => fact,
                }
            })
            .collect::<Vec<_>>())
    });

    let facts = match result {
        Ok(facts) => facts,
        Err(VerificationError::Incomplete(incomplete)) => {
            return Err(anyhow!(incomplete))
                .context("pass --scan with the item's code and --operator or --face-match");
        }
        Err(err) => return Err(err).context(format!("{item_id} was not updated")),
    };

    tracing::info!(
        item_id = %item_id,
        version = item.version(),
        quantity = item.quantity(),
        "stock movement committed"
    );
    let mut updated = records.to_vec();
    updated[index] = item.into_record();
    Ok(MutationOutcome {
        records: updated,
        facts,
    })
}

impl MutationOutcome {
    /// Usage-log entries for the consumptions in this outcome.
    pub fn usage(&self) -> Vec<UsageRecord> {
        self.facts
            .iter()
            .filter_map(|fact| match fact.payload() {
                StockEvent::Consumed(event) => self
                    .records
                    .iter()
                    .find(|r| r.id == event.item_id)
                    .map(|record| UsageRecord::from_consumed(event, record)),
                _ => None,
            })
            .collect()
    }
}

fn build_gate(config: VerificationConfig, args: &MutationArgs) -> VerificationGate {
    let mut gate = VerificationGate::new(config);
    if let Some(code) = &args.scan {
        if gate.submit_scan_result(code) == ScanOutcome::Rejected {
            tracing::warn!(code = %code, "scanned code does not match the item");
        }
    }
    if let Some(name) = &args.operator {
        gate.submit_identity_result(IdentityOutcome::Manual {
            operator_name: name.clone(),
            pin: args.pin.clone(),
        });
    } else if args.face_match {
        gate.submit_identity_result(IdentityOutcome::SimulatedMatch);
    }
    gate
}

pub fn seed(industry: &str, count: usize) -> Vec<InventoryRecord> {
    industry_by_id(industry).seed(count)
}
