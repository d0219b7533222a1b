//! Error types for reset switch configuration.
//!
//! The monitor operations themselves cannot fail; only building a
//! configuration or a simulated timebase can be rejected.

use thiserror::Error;

/// Errors that can occur while configuring a reset switch monitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ResetSwitchError {
    /// A configuration value is out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(&'static str),
    /// The clock cannot represent a single millisecond.
    #[error("Timebase of {ticks_per_second} ticks/s is too coarse (minimum 1000)")]
    InvalidTimebase {
        /// Rejected tick rate.
        ticks_per_second: u64,
    },
}

impl ResetSwitchError {
    /// Create an invalid configuration error.
    #[must_use]
    pub fn invalid_configuration(msg: &'static str) -> Self {
        Self::InvalidConfiguration(msg)
    }
}

/// A specialized `Result` type for reset switch configuration.
pub type ResetSwitchResult<T> = core::result::Result<T, ResetSwitchError>;
