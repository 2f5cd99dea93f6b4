use chrono::{DateTime, Utc};

use stockroom_core::ItemId;

/// A fact about one inventory item (received, consumed, adjusted).
///
/// Facts are never edited after they are applied; a correction is a new fact.
pub trait Event: Clone + core::fmt::Debug + Send + Sync + 'static {
    /// Stable dotted name, e.g. `inventory.stock.received`.
    fn event_type(&self) -> &'static str;

    /// Bumped whenever the payload shape changes.
    fn schema_version(&self) -> u32;

    /// The item the fact is about.
    fn item_id(&self) -> &ItemId;

    /// Business time of the movement.
    fn occurred_at(&self) -> DateTime<Utc>;
}
