//! Stock movement facts and their audit envelope.

pub mod envelope;
pub mod event;

pub use envelope::AuditEnvelope;
pub use event::Event;
