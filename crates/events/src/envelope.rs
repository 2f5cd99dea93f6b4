use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockroom_core::{ItemId, OperatorId};

use crate::Event;

/// Audit wrapper around a stock fact.
///
/// Records the position of the fact within its item's history, the
/// verification tag that let the mutation through and, when known, the
/// operator who performed it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEnvelope<E> {
    sequence_number: u64,
    performed_by: Option<OperatorId>,
    approval: Option<String>,
    reason: Option<String>,
    payload: E,
}

impl<E: Event> AuditEnvelope<E> {
    pub fn new(sequence_number: u64, payload: E) -> Self {
        Self {
            sequence_number,
            performed_by: None,
            approval: None,
            reason: None,
            payload,
        }
    }

    pub fn performed_by(mut self, operator: OperatorId) -> Self {
        self.performed_by = Some(operator);
        self
    }

    /// Attach the verification tag that allowed this mutation (`ok`,
    /// `manual:<name>`, `skipped`).
    pub fn approved_as(mut self, approval: impl Into<String>) -> Self {
        self.approval = Some(approval.into());
        self
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    pub fn item_id(&self) -> &ItemId {
        self.payload.item_id()
    }

    pub fn sequence_number(&self) -> u64 {
        self.sequence_number
    }

    pub fn operator(&self) -> Option<&OperatorId> {
        self.performed_by.as_ref()
    }

    pub fn approval(&self) -> Option<&str> {
        self.approval.as_deref()
    }

    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }

    pub fn event_type(&self) -> &'static str {
        self.payload.event_type()
    }

    pub fn occurred_at(&self) -> DateTime<Utc> {
        self.payload.occurred_at()
    }

    pub fn payload(&self) -> &E {
        &self.payload
    }

    pub fn into_payload(self) -> E {
        self.payload
    }
}
