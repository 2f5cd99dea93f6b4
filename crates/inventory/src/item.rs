use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockroom_core::{Aggregate, AggregateRoot, DomainError, DomainResult, ItemId};
use stockroom_events::Event;

use crate::record::InventoryRecord;

/// Aggregate root: one inventory record under stock movements.
///
/// Status and priority are carried through untouched; only quantity,
/// location and `last_updated` move.
#[derive(Debug, Clone, PartialEq)]
pub struct StockItem {
    record: InventoryRecord,
    version: u64,
}

impl StockItem {
    pub fn new(record: InventoryRecord) -> Self {
        Self { record, version: 0 }
    }

    pub fn record(&self) -> &InventoryRecord {
        &self.record
    }

    pub fn into_record(self) -> InventoryRecord {
        self.record
    }

    pub fn quantity(&self) -> f64 {
        self.record.quantity
    }

    /// Decide and immediately apply `command`, returning the applied events.
    pub fn execute(&mut self, command: &StockCommand) -> DomainResult<Vec<StockEvent>> {
        let events = self.handle(command)?;
        for event in &events {
            self.apply(event);
        }
        Ok(events)
    }
}

impl AggregateRoot for StockItem {
    type Id = ItemId;

    fn id(&self) -> &Self::Id {
        &self.record.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: ReceiveStock (delivery / restock).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiveStock {
    pub item_id: ItemId,
    pub amount: f64,
    pub location: Option<String>,
    pub occurred_at: DateTime<Utc>,
}

/// Command: ConsumeStock (usage / sale).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsumeStock {
    pub item_id: ItemId,
    pub amount: f64,
    pub occurred_at: DateTime<Utc>,
}

/// Command: AdjustStock (stock-take correction).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjustStock {
    pub item_id: ItemId,
    pub delta: f64,
    pub reason: Option<String>,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StockCommand {
    Receive(ReceiveStock),
    Consume(ConsumeStock),
    Adjust(AdjustStock),
}

impl StockCommand {
    pub fn item_id(&self) -> &ItemId {
        match self {
            StockCommand::Receive(c) => &c.item_id,
            StockCommand::Consume(c) => &c.item_id,
            StockCommand::Adjust(c) => &c.item_id,
        }
    }
}

/// Event: StockReceived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockReceived {
    pub item_id: ItemId,
    pub amount: f64,
    pub location: Option<String>,
    pub occurred_at: DateTime<Utc>,
}

/// Event: StockConsumed.
///
/// `consumed` may be lower than `requested` when the shelf ran out; the
/// quantity never goes below zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockConsumed {
    pub item_id: ItemId,
    pub requested: f64,
    pub consumed: f64,
    pub occurred_at: DateTime<Utc>,
}

/// Event: StockAdjusted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockAdjusted {
    pub item_id: ItemId,
    pub requested_delta: f64,
    pub applied_delta: f64,
    pub reason: Option<String>,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StockEvent {
    Received(StockReceived),
    Consumed(StockConsumed),
    Adjusted(StockAdjusted),
}

impl Event for StockEvent {
    fn event_type(&self) -> &'static str {
        match self {
            StockEvent::Received(_) => "inventory.stock.received",
            StockEvent::Consumed(_) => "inventory.stock.consumed",
            StockEvent::Adjusted(_) => "inventory.stock.adjusted",
        }
    }

    fn schema_version(&self) -> u32 {
        1
    }

    fn item_id(&self) -> &ItemId {
        match self {
            StockEvent::Received(e) => &e.item_id,
            StockEvent::Consumed(e) => &e.item_id,
            StockEvent::Adjusted(e) => &e.item_id,
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            StockEvent::Received(e) => e.occurred_at,
            StockEvent::Consumed(e) => e.occurred_at,
            StockEvent::Adjusted(e) => e.occurred_at,
        }
    }
}

impl Aggregate for StockItem {
    type Command = StockCommand;
    type Event = StockEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        let record = &mut self.record;
        match event {
            StockEvent::Received(e) => {
                record.quantity += e.amount;
                if let Some(location) = &e.location {
                    record.location = Some(location.clone());
                }
            }
            StockEvent::Consumed(e) => {
                record.quantity = (record.quantity - e.consumed).max(0.0);
            }
            StockEvent::Adjusted(e) => {
                record.quantity = (record.quantity + e.applied_delta).max(0.0);
            }
        }
        record.last_updated = Some(event.occurred_at().date_naive());

        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        self.ensure_item_id(command.item_id())?;
        match command {
            StockCommand::Receive(cmd) => self.handle_receive(cmd),
            StockCommand::Consume(cmd) => self.handle_consume(cmd),
            StockCommand::Adjust(cmd) => self.handle_adjust(cmd),
        }
    }
}

fn ensure_positive(amount: f64, what: &str) -> DomainResult<()> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(DomainError::validation(format!("{what} must be a positive number")));
    }
    Ok(())
}

impl StockItem {
    fn ensure_item_id(&self, item_id: &ItemId) -> DomainResult<()> {
        if &self.record.id != item_id {
            return Err(DomainError::invariant("item_id mismatch"));
        }
        Ok(())
    }

    fn handle_receive(&self, cmd: &ReceiveStock) -> DomainResult<Vec<StockEvent>> {
        ensure_positive(cmd.amount, "amount")?;
        Ok(vec![StockEvent::Received(StockReceived {
            item_id: cmd.item_id.clone(),
            amount: cmd.amount,
            location: cmd.location.clone(),
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_consume(&self, cmd: &ConsumeStock) -> DomainResult<Vec<StockEvent>> {
        ensure_positive(cmd.amount, "amount")?;
        let available = self.record.quantity.max(0.0);
        let consumed = cmd.amount.min(available);
        if consumed < cmd.amount {
            tracing::debug!(
                item_id = %cmd.item_id,
                requested = cmd.amount,
                available,
                "consumption clamped at zero stock"
            );
        }
        Ok(vec![StockEvent::Consumed(StockConsumed {
            item_id: cmd.item_id.clone(),
            requested: cmd.amount,
            consumed,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_adjust(&self, cmd: &AdjustStock) -> DomainResult<Vec<StockEvent>> {
        if !cmd.delta.is_finite() || cmd.delta == 0.0 {
            return Err(DomainError::validation("delta must be a non-zero number"));
        }
        let applied_delta = cmd.delta.max(-self.record.quantity.max(0.0));
        Ok(vec![StockEvent::Adjusted(StockAdjusted {
            item_id: cmd.item_id.clone(),
            requested_delta: cmd.delta,
            applied_delta,
            reason: cmd.reason.clone(),
            occurred_at: cmd.occurred_at,
        })])
    }
}

/// Move `amount` units from one record to another, returning the new snapshot.
///
/// The source side is clamped at zero like a consumption; the destination
/// always receives the full amount.
pub fn transfer_stock(
    records: &[InventoryRecord],
    from: &ItemId,
    to: &ItemId,
    amount: f64,
) -> DomainResult<Vec<InventoryRecord>> {
    ensure_positive(amount, "transfer amount")?;
    if from == to {
        return Err(DomainError::validation("cannot transfer stock onto the same item"));
    }
    let known = |id: &ItemId| records.iter().any(|r| &r.id == id);
    if !known(from) || !known(to) {
        return Err(DomainError::not_found());
    }

    Ok(records
        .iter()
        .map(|r| {
            let mut r = r.clone();
            if &r.id == from {
                r.quantity = (r.quantity - amount).max(0.0);
            } else if &r.id == to {
                r.quantity += amount;
            }
            r
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Priority, StockStatus};

    fn item_id(s: &str) -> ItemId {
        ItemId::new(s).unwrap()
    }

    fn test_time() -> DateTime<Utc> {
        Utc::now()
    }

    fn stock_item(quantity: f64) -> StockItem {
        StockItem::new(
            InventoryRecord::new(item_id("oil"), "Engine Oil 5W-30")
                .with_quantity(quantity)
                .with_status(StockStatus::LowStock)
                .with_priority(Priority::High),
        )
    }

    #[test]
    fn receive_adds_stock_and_moves_location() {
        let mut item = stock_item(8.0);
        let cmd = StockCommand::Receive(ReceiveStock {
            item_id: item_id("oil"),
            amount: 20.0,
            location: Some("Fluids Storage".into()),
            occurred_at: test_time(),
        });

        let events = item.execute(&cmd).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type(), "inventory.stock.received");
        assert_eq!(item.quantity(), 28.0);
        assert_eq!(item.record().location.as_deref(), Some("Fluids Storage"));
        assert_eq!(item.version(), 1);
        assert!(item.record().last_updated.is_some());
    }

    #[test]
    fn movements_never_rewrite_status() {
        let mut item = stock_item(8.0);
        let cmd = StockCommand::Receive(ReceiveStock {
            item_id: item_id("oil"),
            amount: 500.0,
            location: None,
            occurred_at: test_time(),
        });
        item.execute(&cmd).unwrap();
        assert_eq!(item.record().status, StockStatus::LowStock);
    }

    #[test]
    fn consume_clamps_at_zero() {
        let mut item = stock_item(3.0);
        let cmd = StockCommand::Consume(ConsumeStock {
            item_id: item_id("oil"),
            amount: 5.0,
            occurred_at: test_time(),
        });

        let events = item.execute(&cmd).unwrap();
        let StockEvent::Consumed(e) = &events[0] else {
            panic!("expected StockConsumed event");
        };
        assert_eq!(e.requested, 5.0);
        assert_eq!(e.consumed, 3.0);
        assert_eq!(item.quantity(), 0.0);
    }

    #[test]
    fn non_positive_amounts_are_rejected() {
        let item = stock_item(3.0);
        for amount in [0.0, -1.0, f64::NAN] {
            let cmd = StockCommand::Receive(ReceiveStock {
                item_id: item_id("oil"),
                amount,
                location: None,
                occurred_at: test_time(),
            });
            match item.handle(&cmd).unwrap_err() {
                DomainError::Validation(_) => {}
                other => panic!("expected Validation error, got {other:?}"),
            }
        }
    }

    #[test]
    fn adjust_rejects_zero_and_clamps_negative() {
        let mut item = stock_item(4.0);
        let zero = StockCommand::Adjust(AdjustStock {
            item_id: item_id("oil"),
            delta: 0.0,
            reason: None,
            occurred_at: test_time(),
        });
        assert!(item.handle(&zero).is_err());

        let shrink = StockCommand::Adjust(AdjustStock {
            item_id: item_id("oil"),
            delta: -10.0,
            reason: Some("stock take".into()),
            occurred_at: test_time(),
        });
        let events = item.execute(&shrink).unwrap();
        let StockEvent::Adjusted(e) = &events[0] else {
            panic!("expected StockAdjusted event");
        };
        assert_eq!(e.applied_delta, -4.0);
        assert_eq!(item.quantity(), 0.0);
    }

    #[test]
    fn command_for_another_item_is_rejected() {
        let item = stock_item(4.0);
        let cmd = StockCommand::Consume(ConsumeStock {
            item_id: item_id("masks"),
            amount: 1.0,
            occurred_at: test_time(),
        });
        match item.handle(&cmd).unwrap_err() {
            DomainError::InvariantViolation(msg) if msg.contains("item_id mismatch") => {}
            other => panic!("expected invariant violation, got {other:?}"),
        }
    }

    #[test]
    fn transfer_moves_units_between_records() {
        let records = vec![
            InventoryRecord::new(item_id("a"), "A").with_quantity(3.0),
            InventoryRecord::new(item_id("b"), "B").with_quantity(1.0),
            InventoryRecord::new(item_id("c"), "C").with_quantity(7.0),
        ];
        let out = transfer_stock(&records, &item_id("a"), &item_id("b"), 5.0).unwrap();
        assert_eq!(out[0].quantity, 0.0);
        assert_eq!(out[1].quantity, 6.0);
        assert_eq!(out[2].quantity, 7.0);
        assert_eq!(records[0].quantity, 3.0);
    }

    #[test]
    fn transfer_validates_inputs() {
        let records = vec![InventoryRecord::new(item_id("a"), "A").with_quantity(3.0)];
        assert_eq!(
            transfer_stock(&records, &item_id("a"), &item_id("zzz"), 1.0).unwrap_err(),
            DomainError::NotFound
        );
        assert!(matches!(
            transfer_stock(&records, &item_id("a"), &item_id("a"), 1.0),
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            transfer_stock(&records, &item_id("a"), &item_id("zzz"), 0.0),
            Err(DomainError::Validation(_))
        ));
    }
}
