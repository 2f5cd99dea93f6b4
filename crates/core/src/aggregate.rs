//! Aggregate traits for write-path domain models.
//!
//! Stock mutations are modelled as commands decided against current state and
//! facts applied afterwards, so the decision step can be gated (verification)
//! or audited before anything changes.

/// Aggregate root marker + minimal interface.
pub trait AggregateRoot {
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    fn id(&self) -> &Self::Id;

    /// Number of facts applied since the aggregate was loaded.
    fn version(&self) -> u64;
}

/// Aggregate execution semantics (pure, deterministic).
///
/// - `handle(&self, cmd)` decides which events happen; it must not mutate.
/// - `apply(&mut self, event)` evolves state and bumps `version()` by one.
pub trait Aggregate: AggregateRoot {
    type Command: Clone + core::fmt::Debug;
    type Event: Clone + core::fmt::Debug;
    type Error: core::fmt::Debug;

    fn apply(&mut self, event: &Self::Event);

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error>;
}
