//! Unified error types for the CodeLock firmware.
//!
//! Runtime operation is infallible by contract: keypad polling, display
//! writes, relay pulses, and storage reads/writes do not surface errors
//! to the control loop. What remains fallible is initialisation —
//! peripheral bring-up and NVS flash init — plus the raw storage
//! backend underneath the infallible port facade.

use core::fmt;

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Peripheral or flash initialisation failed.
    Init(&'static str),
    /// The storage backend reported an error.
    Storage(StorageError),
    /// Configuration is invalid (bad compiled-in secret, zero threshold).
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Init(msg) => write!(f, "init: {msg}"),
            Self::Storage(e) => write!(f, "storage: {e}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl core::error::Error for Error {}

/// Errors from the raw NVS backend. The [`StoragePort`] facade absorbs
/// these (logging and falling back to zero), so they never reach the
/// domain core.
///
/// [`StoragePort`]: crate::app::ports::StoragePort
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageError {
    /// Requested key does not exist (first boot).
    NotFound,
    /// Underlying flash / NVS call failed with the given ESP-IDF code.
    Backend(i32),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "key not found"),
            Self::Backend(code) => write!(f, "backend error {code}"),
        }
    }
}

impl From<StorageError> for Error {
    fn from(e: StorageError) -> Self {
        Self::Storage(e)
    }
}

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
