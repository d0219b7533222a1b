//! Prelude for openracing-reset-switch.
//!
//! This module re-exports the most commonly used types for convenient importing.
//!
//! # Example
//!
//! ```rust
//! use openracing_reset_switch::prelude::*;
//!
//! let monitor = ResetMonitor::new(SimulatedInterruptController::new(), SimulatedClock::new());
//! assert_eq!(monitor.reset_switch_state(), ResetSwitchState::Released);
//! ```

pub use crate::config::{ResetMonitorConfig, ResetMonitorConfigBuilder};
pub use crate::error::{ResetSwitchError, ResetSwitchResult};
pub use crate::guard::{InterruptGuard, without_interrupts};
pub use crate::hardware::{InterruptController, InterruptState, InterruptStatus, MonotonicClock};
pub use crate::monitor::{ResetCallback, ResetMonitor};
pub use crate::simulated::{SimulatedClock, SimulatedInterruptController};
pub use crate::state::{DebounceLatch, MonitorMetrics, PollOutcome, ResetSwitchState, SwitchPhase};
