use serde::Serialize;
use thiserror::Error;

use stockroom_core::DomainError;

use crate::devices::DeviceError;

/// One of the two confirmations a mutation needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Leg {
    Scan,
    Identity,
}

impl Leg {
    pub fn as_str(&self) -> &'static str {
        match self {
            Leg::Scan => "scan",
            Leg::Identity => "identity",
        }
    }
}

impl core::fmt::Display for Leg {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned (never thrown) by a confirm attempt that is not yet allowed.
///
/// `missing` lists the outstanding legs in gate order, so callers can tell
/// "scan the item" apart from "confirm who you are".
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("verification incomplete: missing {}", describe(.missing))]
pub struct VerificationIncomplete {
    pub missing: Vec<Leg>,
}

impl VerificationIncomplete {
    pub fn is_missing(&self, leg: Leg) -> bool {
        self.missing.contains(&leg)
    }
}

fn describe(legs: &[Leg]) -> String {
    legs.iter().map(Leg::as_str).collect::<Vec<_>>().join(" and ")
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum VerificationError {
    #[error(transparent)]
    Incomplete(#[from] VerificationIncomplete),

    #[error("device error: {0}")]
    Device(#[from] DeviceError),

    #[error("commit rejected: {0}")]
    Commit(#[from] DomainError),
}
