//! # openracing-reset-switch
//!
//! Debounced reset switch monitor for racing wheel hardware.
//!
//! This crate provides a `#![no_std]`-compatible monitor that turns a
//! bouncing, interrupt-driven reset switch into a stable pressed/released
//! signal:
//! - `InterruptController` and `MonotonicClock` traits for the platform
//! - `InterruptGuard` for nestable save/restore critical sections
//! - `ResetMonitor` with a one-shot reset callback and a debounced query
//! - Simulated collaborators for testing and hardware-free environments
//!
//! ## Guarantees
//!
//! - **No allocation** in the interrupt handler
//! - **No blocking** anywhere; every operation is a short critical section
//! - **At most once** callback invocation per registration
//! - **Exact restore** of the caller's interrupt-enable state
//!
//! ## Debounce Model
//!
//! ```text
//! edge interrupt ──► LatchedBouncing ──clean query──► Held ──50ms──► Idle
//!                          ▲   │ pending edge (ack)
//!                          └───┘
//! level bit down at any query ──► LatchedBouncing
//! ```
//!
//! Everything except `Idle` reports [`ResetSwitchState::Pressed`].
//!
//! ## Example
//!
//! ```rust
//! use openracing_reset_switch::prelude::*;
//!
//! let controller = SimulatedInterruptController::new();
//! let clock = SimulatedClock::new();
//! let monitor = ResetMonitor::new(&controller, &clock);
//!
//! // Press and let go; the interrupt latches the edge.
//! controller.press();
//! monitor.on_reset_interrupt();
//! controller.release();
//!
//! // The first clean query opens a 50ms hold window.
//! assert!(monitor.reset_switch_state().is_pressed());
//! clock.advance_ms(40);
//! assert!(monitor.reset_switch_state().is_pressed());
//! clock.advance_ms(20);
//! assert!(!monitor.reset_switch_state().is_pressed());
//! ```

#![no_std]
#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    missing_debug_implementations
)]
#![warn(clippy::pedantic)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

pub mod config;
pub mod error;
pub mod guard;
pub mod hardware;
pub mod monitor;
pub mod prelude;
pub mod simulated;
pub mod state;

pub use config::ResetMonitorConfig;
pub use error::{ResetSwitchError, ResetSwitchResult};
pub use guard::InterruptGuard;
pub use hardware::{InterruptController, InterruptState, InterruptStatus, MonotonicClock};
pub use monitor::{ResetCallback, ResetMonitor};
pub use simulated::{SimulatedClock, SimulatedInterruptController};
pub use state::{MonitorMetrics, PollOutcome, ResetSwitchState, SwitchPhase};
