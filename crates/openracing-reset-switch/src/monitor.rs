//! The reset switch monitor.
//!
//! `ResetMonitor` owns the one-shot callback, the debounce latch and the
//! metrics, and exposes the three reset switch operations:
//!
//! - [`ResetMonitor::on_reset_interrupt`], installed in the platform's
//!   interrupt dispatch table for the reset switch line
//! - [`ResetMonitor::set_reset_callback`], to arm, replace or disarm the
//!   one-shot handler
//! - [`ResetMonitor::reset_switch_state`], the debounced polling query
//!
//! # Shared state
//!
//! The callback, latch and metrics sit in a single
//! `critical_section::Mutex<RefCell<_>>`. Calls from normal flow also hold
//! an [`InterruptGuard`] over the injected controller for their whole body,
//! so the reset interrupt cannot land between reading and writing any of
//! the fields. The interrupt handler relies on the platform not nesting
//! interrupt entry and does not touch the guard.

use alloc::boxed::Box;
use core::cell::RefCell;
use core::fmt;

use critical_section::Mutex;
use tracing::{debug, trace};

use crate::config::ResetMonitorConfig;
use crate::error::ResetSwitchResult;
use crate::guard::InterruptGuard;
use crate::hardware::{InterruptController, MonotonicClock};
use crate::state::{DebounceLatch, MonitorMetrics, PollOutcome, ResetSwitchState, SwitchPhase};

/// One-shot reset handler.
///
/// Invoked from interrupt context at most once per registration. Taking it
/// out of the monitor consumes it.
pub type ResetCallback = Box<dyn FnOnce() + Send + 'static>;

struct Shared {
    callback: Option<ResetCallback>,
    latch: DebounceLatch,
    metrics: MonitorMetrics,
}

/// Debounced reset switch monitor.
///
/// # Example
///
/// ```rust
/// use openracing_reset_switch::prelude::*;
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicBool, Ordering};
///
/// let controller = SimulatedInterruptController::new();
/// let clock = SimulatedClock::new();
/// let monitor = ResetMonitor::new(&controller, &clock);
///
/// let fired = Arc::new(AtomicBool::new(false));
/// let flag = Arc::clone(&fired);
/// let previous = monitor.set_reset_callback(Some(Box::new(move || {
///     flag.store(true, Ordering::SeqCst);
/// })));
/// assert!(previous.is_none());
/// assert!(!controller.is_masked());
///
/// controller.press();
/// monitor.on_reset_interrupt();
/// assert!(fired.load(Ordering::SeqCst));
/// assert_eq!(monitor.reset_switch_state(), ResetSwitchState::Pressed);
/// ```
pub struct ResetMonitor<I, C> {
    controller: I,
    clock: C,
    config: ResetMonitorConfig,
    shared: Mutex<RefCell<Shared>>,
}

impl<I: InterruptController, C: MonotonicClock> ResetMonitor<I, C> {
    /// Create a monitor with the default 50ms hold window.
    ///
    /// No registers are touched; the reset line stays however the platform
    /// left it until the first `set_reset_callback`.
    #[must_use]
    pub fn new(controller: I, clock: C) -> Self {
        Self::from_parts(controller, clock, ResetMonitorConfig::default())
    }

    /// Create a monitor with a custom configuration.
    ///
    /// # Errors
    ///
    /// Returns `ResetSwitchError::InvalidConfiguration` if `config` fails
    /// `ResetMonitorConfig::validate`.
    pub fn with_config(
        controller: I,
        clock: C,
        config: ResetMonitorConfig,
    ) -> ResetSwitchResult<Self> {
        config.validate()?;
        Ok(Self::from_parts(controller, clock, config))
    }

    fn from_parts(controller: I, clock: C, config: ResetMonitorConfig) -> Self {
        Self {
            controller,
            clock,
            config,
            shared: Mutex::new(RefCell::new(Shared {
                callback: None,
                latch: DebounceLatch::new(),
                metrics: MonitorMetrics::new(),
            })),
        }
    }

    /// Reset switch interrupt entry point.
    ///
    /// Latches the press, acknowledges and masks the line, then hands the
    /// registered callback (if any) out of the monitor and runs it. The
    /// line stays masked until the next `set_reset_callback` re-arms it, so
    /// the callback cannot be re-entered by a second edge.
    ///
    /// Never allocates or logs. Running the callback consumes its `Box`, so
    /// the platform allocator must accept a free from interrupt context.
    pub fn on_reset_interrupt(&self) {
        let callback = critical_section::with(|cs| {
            let mut shared = self.shared.borrow_ref_mut(cs);
            shared.latch.latch_edge();
            self.controller.acknowledge_reset_switch();
            self.controller.mask_reset_switch();
            let callback = shared.callback.take();
            shared.metrics.record_interrupt(callback.is_some());
            callback
        });

        if let Some(callback) = callback {
            callback();
        }
    }

    /// Register, replace or clear the one-shot reset callback.
    ///
    /// `Some` acknowledges any stale edge and unmasks the reset line so the
    /// next press is detected; `None` masks the line. Returns the callback
    /// that was registered before, so a caller can chain or restore it.
    pub fn set_reset_callback(&self, callback: Option<ResetCallback>) -> Option<ResetCallback> {
        let armed = callback.is_some();
        let previous = {
            let _guard = InterruptGuard::new(&self.controller);
            critical_section::with(|cs| {
                let mut shared = self.shared.borrow_ref_mut(cs);
                let previous = core::mem::replace(&mut shared.callback, callback);
                if armed {
                    shared.metrics.record_registration();
                    self.controller.acknowledge_reset_switch();
                    self.controller.unmask_reset_switch();
                } else {
                    self.controller.mask_reset_switch();
                }
                previous
            })
        };

        debug!(armed, replaced = previous.is_some(), "reset callback updated");
        previous
    }

    /// Register a closure as the one-shot reset callback.
    pub fn set_reset_handler<F>(&self, handler: F) -> Option<ResetCallback>
    where
        F: FnOnce() + Send + 'static,
    {
        self.set_reset_callback(Some(Box::new(handler)))
    }

    /// Clear the reset callback and mask the reset line.
    pub fn clear_reset_callback(&self) -> Option<ResetCallback> {
        self.set_reset_callback(None)
    }

    /// Debounced reset switch state.
    ///
    /// Not side-effect free: a query can latch a press, acknowledge a
    /// bouncing edge, open a hold window or close an expired one.
    pub fn reset_switch_state(&self) -> ResetSwitchState {
        self.poll().state()
    }

    /// Run one debounce query and return the full decision.
    pub fn poll(&self) -> PollOutcome {
        let outcome = {
            let _guard = InterruptGuard::new(&self.controller);
            critical_section::with(|cs| {
                let mut shared = self.shared.borrow_ref_mut(cs);
                let status = self.controller.status();
                let outcome =
                    shared
                        .latch
                        .poll(status, self.clock.now_ticks(), self.hold_window_ticks());
                if outcome.acknowledges_edge() {
                    self.controller.acknowledge_reset_switch();
                }
                shared.metrics.record_poll(outcome);
                outcome
            })
        };

        match outcome {
            PollOutcome::Bouncing => trace!("reset switch bouncing, edge acknowledged"),
            PollOutcome::HoldStarted { at } => trace!(at, "reset hold window started"),
            PollOutcome::HoldExpired => trace!("reset hold window expired"),
            PollOutcome::LevelDown | PollOutcome::Holding | PollOutcome::Released => {}
        }
        outcome
    }

    /// Internal debounce phase, without advancing the state machine.
    #[must_use]
    pub fn phase(&self) -> SwitchPhase {
        let _guard = InterruptGuard::new(&self.controller);
        critical_section::with(|cs| {
            self.shared
                .borrow_ref(cs)
                .latch
                .phase(self.clock.now_ticks(), self.hold_window_ticks())
        })
    }

    /// Returns `true` if a callback is waiting for the next press.
    #[must_use]
    pub fn is_callback_registered(&self) -> bool {
        let _guard = InterruptGuard::new(&self.controller);
        critical_section::with(|cs| self.shared.borrow_ref(cs).callback.is_some())
    }

    /// Snapshot of the monitor metrics.
    #[must_use]
    pub fn metrics(&self) -> MonitorMetrics {
        let _guard = InterruptGuard::new(&self.controller);
        critical_section::with(|cs| self.shared.borrow_ref(cs).metrics)
    }

    /// Zero the monitor metrics.
    pub fn reset_metrics(&self) {
        let _guard = InterruptGuard::new(&self.controller);
        critical_section::with(|cs| self.shared.borrow_ref_mut(cs).metrics.reset());
    }

    /// Hold window length in clock ticks.
    #[must_use]
    pub fn hold_window_ticks(&self) -> u64 {
        self.clock.millis_to_ticks(self.config.hold_window_ms)
    }

    /// The monitor configuration.
    #[must_use]
    pub fn config(&self) -> &ResetMonitorConfig {
        &self.config
    }

    /// The injected interrupt controller.
    #[must_use]
    pub fn controller(&self) -> &I {
        &self.controller
    }

    /// The injected clock.
    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }
}

impl<I: fmt::Debug, C: fmt::Debug> fmt::Debug for ResetMonitor<I, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResetMonitor")
            .field("controller", &self.controller)
            .field("clock", &self.clock)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
