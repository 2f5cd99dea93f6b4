//! Capability interfaces for the host's scanner, camera and speech engine.
//!
//! Real implementations live at the application boundary; the types below are
//! the manual/mock ones used for local runs and tests.

use std::sync::Mutex;

use thiserror::Error;

/// Why a device could not deliver a result. Always retriable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeviceError {
    #[error("device unavailable: {0}")]
    Unavailable(String),

    #[error("permission denied: {0}")]
    PermissionDenied(String),

    #[error("device failed: {0}")]
    Failed(String),
}

/// Reads a QR/barcode and returns the decoded text.
pub trait ScanProvider {
    fn scan(&self) -> Result<String, DeviceError>;
}

/// Matches a captured face image against the expected operator.
pub trait FaceMatchProvider {
    fn verify(&self, image: &[u8]) -> Result<bool, DeviceError>;
}

/// Speaks a short announcement.
pub trait SpeechProvider {
    fn speak(&self, text: &str) -> Result<(), DeviceError>;
}

/// Scanner that always reads the same code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedScan(pub String);

impl FixedScan {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }
}

impl ScanProvider for FixedScan {
    fn scan(&self) -> Result<String, DeviceError> {
        Ok(self.0.clone())
    }
}

/// Face matcher that accepts every capture ("simulate face match").
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysMatch;

impl FaceMatchProvider for AlwaysMatch {
    fn verify(&self, _image: &[u8]) -> Result<bool, DeviceError> {
        Ok(true)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NeverMatch;

impl FaceMatchProvider for NeverMatch {
    fn verify(&self, _image: &[u8]) -> Result<bool, DeviceError> {
        Ok(false)
    }
}

/// Stand-in for hardware that is missing or blocked.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableDevice;

impl ScanProvider for UnavailableDevice {
    fn scan(&self) -> Result<String, DeviceError> {
        Err(DeviceError::Unavailable("no scanner attached".into()))
    }
}

impl FaceMatchProvider for UnavailableDevice {
    fn verify(&self, _image: &[u8]) -> Result<bool, DeviceError> {
        Err(DeviceError::Unavailable("no camera attached".into()))
    }
}

impl SpeechProvider for UnavailableDevice {
    fn speak(&self, _text: &str) -> Result<(), DeviceError> {
        Err(DeviceError::Unavailable("speech synthesis not supported".into()))
    }
}

/// Speech engine that only records what it was asked to say.
#[derive(Debug, Default)]
pub struct RecordingSpeech {
    spoken: Mutex<Vec<String>>,
}

impl RecordingSpeech {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spoken(&self) -> Vec<String> {
        match self.spoken.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl SpeechProvider for RecordingSpeech {
    fn speak(&self, text: &str) -> Result<(), DeviceError> {
        self.spoken
            .lock()
            .map_err(|_| DeviceError::Failed("speech log poisoned".into()))?
            .push(text.to_string());
        Ok(())
    }
}

/// Announce how many inventory items need attention. Nothing is said for zero.
///
/// Returns whether an announcement was made.
pub fn announce_attention(speech: &dyn SpeechProvider, count: usize) -> Result<bool, DeviceError> {
    if count == 0 {
        return Ok(false);
    }
    let noun = if count == 1 { "item needs" } else { "items need" };
    speech.speak(&format!("Alert: {count} critical inventory {noun} attention."))?;
    Ok(true)
}
