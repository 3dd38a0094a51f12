//! Crate-level error type.

use thiserror::Error;

use crate::devices::DeviceError;

/// Errors surfaced to callers of the emulator.
///
/// CPU execution itself cannot fail: every opcode decodes, and cycle
/// bookkeeping is internal. Errors come from the outside world (image files)
/// and from peripheral registration.
#[derive(Debug, Error)]
pub enum EmulatorError {
    /// Reading a ROM or RAM image failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A peripheral could not be mapped or addressed.
    #[error(transparent)]
    Device(#[from] DeviceError),
}

/// Result type for fallible emulator operations.
pub type Result<T> = std::result::Result<T, EmulatorError>;
