//! Configuration types for the reset switch monitor.

use crate::error::{ResetSwitchError, ResetSwitchResult};

/// Default debounce grace window after a resolved release.
pub const DEFAULT_HOLD_WINDOW_MS: u32 = 50;

/// Longest accepted grace window.
pub const MAX_HOLD_WINDOW_MS: u32 = 1000;

/// Reset monitor configuration.
///
/// Contains only primitive types so it can be built once at startup and
/// copied into a monitor without allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(C)]
pub struct ResetMonitorConfig {
    /// Grace period, in milliseconds, during which the switch is still
    /// reported as pressed after a latched press resolves.
    ///
    /// Default: 50ms.
    pub hold_window_ms: u32,
}

impl ResetMonitorConfig {
    /// Create a configuration with the given hold window.
    ///
    /// # Errors
    ///
    /// Returns an error if `hold_window_ms` is outside `1..=1000`.
    pub fn new(hold_window_ms: u32) -> ResetSwitchResult<Self> {
        let config = Self { hold_window_ms };
        config.validate()?;
        Ok(config)
    }

    /// Create a configuration builder.
    #[must_use]
    pub fn builder() -> ResetMonitorConfigBuilder {
        ResetMonitorConfigBuilder::default()
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> ResetSwitchResult<()> {
        if self.hold_window_ms == 0 {
            return Err(ResetSwitchError::invalid_configuration(
                "hold_window_ms must be at least 1",
            ));
        }
        if self.hold_window_ms > MAX_HOLD_WINDOW_MS {
            return Err(ResetSwitchError::invalid_configuration(
                "hold_window_ms must not exceed 1000",
            ));
        }
        Ok(())
    }
}

impl Default for ResetMonitorConfig {
    fn default() -> Self {
        Self {
            hold_window_ms: DEFAULT_HOLD_WINDOW_MS,
        }
    }
}

/// Builder for `ResetMonitorConfig`.
#[derive(Debug, Default)]
pub struct ResetMonitorConfigBuilder {
    config: ResetMonitorConfig,
}

impl ResetMonitorConfigBuilder {
    /// Set the hold window in milliseconds.
    #[must_use]
    pub fn hold_window_ms(mut self, ms: u32) -> Self {
        self.config.hold_window_ms = ms;
        self
    }

    /// Build the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn build(self) -> ResetSwitchResult<ResetMonitorConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
