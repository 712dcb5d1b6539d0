//! Driver error types.

use crate::bus::BusError;
use thiserror::Error;

/// Errors returned by SD109 driver operations.
///
/// Transport faults are always propagated to the caller; the driver never
/// retries silently. Argument and capability checks reject before any bus
/// access, so a failed call leaves cached and software state exactly as it
/// was (the alarm-flag exception is documented on
/// [`crate::rtc::ClockControl::set_alarm`]).
#[derive(Debug, Error)]
pub enum Sd109Error {
    /// Bus I/O failed.
    #[error("register bus error: {0}")]
    Transport(#[from] BusError),

    /// The identity register did not read back the expected magic.
    #[error("invalid chip id: expected {expected:#06x}, got {actual:#06x}")]
    IdentityMismatch {
        /// The magic value a genuine chip reports.
        expected: u16,
        /// What the device actually reported.
        actual: u16,
    },

    /// Caller-supplied value outside the protocol range.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Operation, channel, or attribute not defined by this protocol.
    #[error("unsupported: {0}")]
    Unsupported(String),
}

impl Sd109Error {
    /// Create an invalid-argument error.
    #[must_use]
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Create an unsupported-operation error.
    #[must_use]
    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::Unsupported(msg.into())
    }
}

/// Convenience result alias for driver operations.
pub type Sd109Result<T> = Result<T, Sd109Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Sd109Error::IdentityMismatch {
            expected: 0xD109,
            actual: 0xBEEF,
        };
        assert_eq!(
            err.to_string(),
            "invalid chip id: expected 0xd109, got 0xbeef"
        );
    }

    #[test]
    fn test_transport_from_bus_error() {
        let err: Sd109Error = BusError::Read { addr: 0x0A }.into();
        assert!(matches!(err, Sd109Error::Transport(_)));
    }

    #[test]
    fn test_constructors() {
        assert!(matches!(
            Sd109Error::invalid_argument("timeout out of range"),
            Sd109Error::InvalidArgument(_)
        ));
        assert!(matches!(
            Sd109Error::unsupported("voltage channel 7"),
            Sd109Error::Unsupported(_)
        ));
    }
}
