use serde::{Deserialize, Serialize};

use stockroom_core::DomainResult;

use crate::devices::{FaceMatchProvider, ScanProvider};
use crate::error::{Leg, VerificationError, VerificationIncomplete};

/// Face tag reported for an automated or simulated match.
pub const FACE_OK: &str = "ok";
/// Face tag reported when the gate was bypassed.
pub const FACE_SKIPPED: &str = "skipped";
const MANUAL_PREFIX: &str = "manual:";

/// Gate settings, fixed for the lifetime of one mutation attempt.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VerificationConfig {
    /// Skip both legs and pass immediately (`skipVerification`).
    pub bypass: bool,
    /// Token the scanned code must contain, case-insensitively.
    pub expected_scan: Option<String>,
}

impl VerificationConfig {
    pub fn bypassed() -> Self {
        Self {
            bypass: true,
            expected_scan: None,
        }
    }

    pub fn expecting(code: impl Into<String>) -> Self {
        Self {
            bypass: false,
            expected_scan: Some(code.into()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum GateState {
    Idle,
    ScanPending,
    ScanConfirmed,
    IdentityPending,
    IdentityConfirmed,
    Passed,
    Bypassed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanOutcome {
    /// The scan satisfied the expectation (or there was none).
    Accepted,
    /// A code was read but did not contain the expected token.
    Rejected,
    /// Empty input; nothing changed.
    Ignored,
}

/// What an identity check produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityOutcome {
    /// Result of an injected face verifier.
    Verified(bool),
    /// The operator pressed "simulate face match".
    SimulatedMatch,
    /// Operator override when recognition is unavailable. The PIN is collected
    /// but not checked.
    Manual {
        operator_name: String,
        pin: Option<String>,
    },
}

impl IdentityOutcome {
    pub fn manual(operator_name: impl Into<String>) -> Self {
        IdentityOutcome::Manual {
            operator_name: operator_name.into(),
            pin: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityResult {
    Confirmed,
    Rejected,
    /// Manual mode was used without an operator name.
    OperatorNameRequired,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Approval {
    Automated,
    Manual(String),
}

impl Approval {
    fn tag(&self) -> String {
        match self {
            Approval::Automated => FACE_OK.to_string(),
            Approval::Manual(name) => format!("{MANUAL_PREFIX}{name}"),
        }
    }
}

/// Descriptor handed to the caller once the gate lets a mutation through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Confirmation {
    /// Last scanned code, if any.
    pub scan: Option<String>,
    /// `ok`, `manual:<operator>` or `skipped`.
    pub face: String,
}

impl Confirmation {
    pub fn is_manual(&self) -> bool {
        self.face.starts_with(MANUAL_PREFIX)
    }

    pub fn operator_name(&self) -> Option<&str> {
        self.face.strip_prefix(MANUAL_PREFIX)
    }
}

/// Two-factor gate for a single stock mutation.
///
/// Every step is retriable: a rejected scan or failed face match leaves the
/// leg pending, and the latest submission for a leg wins. There are no
/// timeouts; [`reset`](Self::reset) discards progress when the dialog closes.
#[derive(Debug, Clone)]
pub struct VerificationGate {
    config: VerificationConfig,
    scan_value: Option<String>,
    scan_confirmed: bool,
    identity: Option<Approval>,
    identity_attempted: bool,
}

impl VerificationGate {
    pub fn new(config: VerificationConfig) -> Self {
        if config.bypass {
            tracing::debug!("verification gate created in bypass mode");
        }
        Self {
            config,
            scan_value: None,
            scan_confirmed: false,
            identity: None,
            identity_attempted: false,
        }
    }

    pub fn config(&self) -> &VerificationConfig {
        &self.config
    }

    pub fn state(&self) -> GateState {
        if self.config.bypass {
            return GateState::Bypassed;
        }
        match (self.scan_confirmed, self.identity.is_some()) {
            (true, true) => GateState::Passed,
            (true, false) if self.identity_attempted => GateState::IdentityPending,
            (true, false) => GateState::ScanConfirmed,
            (false, true) => GateState::IdentityConfirmed,
            (false, false) if self.scan_value.is_some() => GateState::ScanPending,
            (false, false) => GateState::Idle,
        }
    }

    pub fn scan_confirmed(&self) -> bool {
        self.scan_confirmed
    }

    pub fn identity_confirmed(&self) -> bool {
        self.identity.is_some()
    }

    pub fn scan_value(&self) -> Option<&str> {
        self.scan_value.as_deref()
    }

    /// Submit a scanned code against the configured expectation.
    pub fn submit_scan_result(&mut self, code: &str) -> ScanOutcome {
        let expected = self.config.expected_scan.clone();
        self.submit_scan_against(code, expected.as_deref())
    }

    /// Submit a scanned code against an explicit expectation.
    ///
    /// Without an expectation any non-empty code is accepted; otherwise the
    /// code must contain `expected`, ignoring case.
    pub fn submit_scan_against(&mut self, code: &str, expected: Option<&str>) -> ScanOutcome {
        if code.trim().is_empty() {
            return ScanOutcome::Ignored;
        }
        self.scan_value = Some(code.to_string());

        let accepted = match expected.filter(|e| !e.trim().is_empty()) {
            None => true,
            Some(expected) => code.to_lowercase().contains(&expected.to_lowercase()),
        };
        self.scan_confirmed = accepted;

        if accepted {
            tracing::debug!(code, "scan accepted");
            ScanOutcome::Accepted
        } else {
            tracing::debug!(code, expected, "scan rejected");
            ScanOutcome::Rejected
        }
    }

    /// Read a code from `scanner` and submit it.
    ///
    /// Device failures are logged and returned; the scan leg stays as it was.
    pub fn scan_with(&mut self, scanner: &dyn ScanProvider) -> Result<ScanOutcome, VerificationError> {
        match scanner.scan() {
            Ok(code) => Ok(self.submit_scan_result(&code)),
            Err(err) => {
                tracing::warn!(error = %err, "scanner unavailable");
                Err(err.into())
            }
        }
    }

    pub fn submit_identity_result(&mut self, outcome: IdentityOutcome) -> IdentityResult {
        self.identity_attempted = true;
        match outcome {
            IdentityOutcome::Verified(true) | IdentityOutcome::SimulatedMatch => {
                self.identity = Some(Approval::Automated);
                IdentityResult::Confirmed
            }
            IdentityOutcome::Verified(false) => {
                tracing::debug!("face match rejected");
                self.identity = None;
                IdentityResult::Rejected
            }
            IdentityOutcome::Manual { operator_name, .. } => {
                let name = operator_name.trim();
                if name.is_empty() {
                    return IdentityResult::OperatorNameRequired;
                }
                tracing::info!(operator = name, "identity confirmed manually");
                self.identity = Some(Approval::Manual(name.to_string()));
                IdentityResult::Confirmed
            }
        }
    }

    /// Run `verifier` on a captured image and submit its verdict.
    ///
    /// A failing verifier counts as a rejected match, and the error is
    /// returned so the caller can offer manual mode.
    pub fn verify_identity_with(
        &mut self,
        verifier: &dyn FaceMatchProvider,
        image: &[u8],
    ) -> Result<IdentityResult, VerificationError> {
        match verifier.verify(image) {
            Ok(ok) => Ok(self.submit_identity_result(IdentityOutcome::Verified(ok))),
            Err(err) => {
                tracing::warn!(error = %err, "face verifier failed");
                self.identity_attempted = true;
                self.identity = None;
                Err(err.into())
            }
        }
    }

    /// Legs that still block a confirm, in gate order.
    pub fn outstanding(&self) -> Vec<Leg> {
        if self.config.bypass {
            return Vec::new();
        }
        let mut missing = Vec::with_capacity(2);
        if !self.scan_confirmed {
            missing.push(Leg::Scan);
        }
        if self.identity.is_none() {
            missing.push(Leg::Identity);
        }
        missing
    }

    /// Succeeds iff the gate is bypassed or both legs are confirmed.
    pub fn attempt_confirm(&self) -> Result<Confirmation, VerificationIncomplete> {
        let scan = self.scan_value.clone();
        if self.config.bypass {
            return Ok(Confirmation {
                scan,
                face: FACE_SKIPPED.to_string(),
            });
        }

        match &self.identity {
            Some(approval) if self.scan_confirmed => Ok(Confirmation {
                scan,
                face: approval.tag(),
            }),
            _ => Err(VerificationIncomplete {
                missing: self.outstanding(),
            }),
        }
    }

    /// Run `commit` only after a successful confirm, handing it the
    /// confirmation for auditing.
    pub fn commit_with<T>(
        &self,
        commit: impl FnOnce(&Confirmation) -> DomainResult<T>,
    ) -> Result<T, VerificationError> {
        let confirmation = self.attempt_confirm()?;
        Ok(commit(&confirmation)?)
    }

    /// Forget every submission (dialog closed or cancelled).
    pub fn reset(&mut self) {
        self.scan_value = None;
        self.scan_confirmed = false;
        self.identity = None;
        self.identity_attempted = false;
    }
}
