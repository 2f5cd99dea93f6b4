//! `stockroom-verification`: two-factor gate in front of stock mutations.
//!
//! A mutation is committed only once the item was scanned and the operator's
//! identity confirmed (or the gate was built in bypass mode). Scanner, camera
//! and speech hardware are reached through the traits in [`devices`], so the
//! gate itself never blocks and never assumes a device is present.
//!
//! This crate is intentionally decoupled from storage and UI.

pub mod devices;
pub mod error;
pub mod gate;

pub use devices::{
    AlwaysMatch, DeviceError, FaceMatchProvider, FixedScan, NeverMatch, RecordingSpeech, ScanProvider,
    SpeechProvider, UnavailableDevice, announce_attention,
};
pub use error::{Leg, VerificationError, VerificationIncomplete};
pub use gate::{
    Confirmation, GateState, IdentityOutcome, IdentityResult, ScanOutcome, VerificationConfig,
    VerificationGate,
};
