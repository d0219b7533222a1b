//! Simulated platform collaborators.
//!
//! `SimulatedInterruptController` and `SimulatedClock` implement the
//! hardware traits over atomics, for tests, benches and hardware-free
//! environments. Every method takes `&self`, so a test can keep driving the
//! "hardware" while a monitor borrows it.

use crate::error::{ResetSwitchError, ResetSwitchResult};
use crate::hardware::{InterruptController, InterruptState, InterruptStatus, MonotonicClock};
use portable_atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};

/// Timer rate of the reference console: bus clock (162 MHz) divided by 4.
pub const DEFAULT_TICKS_PER_SECOND: u64 = 40_500_000;

/// Software interrupt controller for the reset switch line.
///
/// Starts with delivery enabled, the reset source masked, the switch up and
/// no edge pending.
///
/// # Example
///
/// ```rust
/// use openracing_reset_switch::prelude::*;
///
/// let controller = SimulatedInterruptController::new();
/// controller.press();
/// assert!(controller.status().is_switch_down());
/// assert!(controller.is_edge_pending());
///
/// // Masked until a callback re-arms the line.
/// assert!(!controller.is_interrupt_asserted());
/// ```
#[derive(Debug)]
pub struct SimulatedInterruptController {
    enabled: AtomicBool,
    masked: AtomicBool,
    status: AtomicU32,
    acknowledge_count: AtomicU64,
}

impl SimulatedInterruptController {
    /// Create a controller in its power-on state.
    #[must_use]
    pub fn new() -> Self {
        Self {
            enabled: AtomicBool::new(true),
            masked: AtomicBool::new(true),
            status: AtomicU32::new(InterruptStatus::IDLE.bits()),
            acknowledge_count: AtomicU64::new(0),
        }
    }

    /// Push the switch down: the level bit drops and an edge is latched.
    pub fn press(&self) {
        self.status.fetch_and(
            !InterruptStatus::RESET_SWITCH_RELEASED.bits(),
            Ordering::AcqRel,
        );
        self.raise_edge();
    }

    /// Let the switch up. Does not clear a pending edge.
    pub fn release(&self) {
        self.status.fetch_or(
            InterruptStatus::RESET_SWITCH_RELEASED.bits(),
            Ordering::AcqRel,
        );
    }

    /// Latch an edge without changing the level, as contact bounce does.
    pub fn raise_edge(&self) {
        self.status
            .fetch_or(InterruptStatus::RESET_SWITCH.bits(), Ordering::AcqRel);
    }

    /// Force the current context's delivery state.
    pub fn set_interrupts_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Release);
    }

    /// Returns `true` if delivery is enabled on the current context.
    #[must_use]
    pub fn interrupts_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    /// Returns `true` if the reset switch source is masked.
    #[must_use]
    pub fn is_masked(&self) -> bool {
        self.masked.load(Ordering::Acquire)
    }

    /// Returns `true` if a reset switch edge is pending.
    #[must_use]
    pub fn is_edge_pending(&self) -> bool {
        self.status().is_edge_pending()
    }

    /// Returns `true` if the line would be delivered to the handler now.
    #[must_use]
    pub fn is_interrupt_asserted(&self) -> bool {
        self.is_edge_pending() && !self.is_masked() && self.interrupts_enabled()
    }

    /// Number of acknowledge writes seen.
    #[must_use]
    pub fn acknowledge_count(&self) -> u64 {
        self.acknowledge_count.load(Ordering::Acquire)
    }
}

impl Default for SimulatedInterruptController {
    fn default() -> Self {
        Self::new()
    }
}

impl InterruptController for SimulatedInterruptController {
    fn disable_interrupts(&self) -> InterruptState {
        if self.enabled.swap(false, Ordering::AcqRel) {
            InterruptState::enabled()
        } else {
            InterruptState::disabled()
        }
    }

    fn restore_interrupts(&self, previous: InterruptState) {
        self.enabled.store(previous.was_enabled(), Ordering::Release);
    }

    fn mask_reset_switch(&self) {
        self.masked.store(true, Ordering::Release);
    }

    fn unmask_reset_switch(&self) {
        self.masked.store(false, Ordering::Release);
    }

    fn acknowledge_reset_switch(&self) {
        self.status
            .fetch_and(!InterruptStatus::RESET_SWITCH.bits(), Ordering::AcqRel);
        self.acknowledge_count.fetch_add(1, Ordering::Relaxed);
    }

    fn status(&self) -> InterruptStatus {
        InterruptStatus::from_bits_retain(self.status.load(Ordering::Acquire))
    }
}

/// Manually driven monotonic clock.
#[derive(Debug)]
pub struct SimulatedClock {
    ticks: AtomicU64,
    ticks_per_second: u64,
}

impl SimulatedClock {
    /// Create a clock at tick 0 with the default timebase.
    #[must_use]
    pub fn new() -> Self {
        Self {
            ticks: AtomicU64::new(0),
            ticks_per_second: DEFAULT_TICKS_PER_SECOND,
        }
    }

    /// Create a clock at tick 0 with a custom timebase.
    ///
    /// # Errors
    ///
    /// Returns an error if the timebase is below 1000 ticks per second.
    pub fn with_ticks_per_second(ticks_per_second: u64) -> ResetSwitchResult<Self> {
        if ticks_per_second < 1000 {
            return Err(ResetSwitchError::InvalidTimebase { ticks_per_second });
        }
        Ok(Self {
            ticks: AtomicU64::new(0),
            ticks_per_second,
        })
    }

    /// Jump to an absolute tick.
    pub fn set_ticks(&self, ticks: u64) {
        self.ticks.store(ticks, Ordering::Release);
    }

    /// Move time forward by `ticks`.
    pub fn advance_ticks(&self, ticks: u64) {
        // Saturate so time never runs backwards.
        let mut now = self.ticks.load(Ordering::Acquire);
        while let Err(actual) = self.ticks.compare_exchange_weak(
            now,
            now.saturating_add(ticks),
            Ordering::AcqRel,
            Ordering::Acquire,
        ) {
            now = actual;
        }
    }

    /// Move time forward by `ms` milliseconds.
    pub fn advance_ms(&self, ms: u32) {
        self.advance_ticks(self.millis_to_ticks(ms));
    }
}

impl Default for SimulatedClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MonotonicClock for SimulatedClock {
    fn now_ticks(&self) -> u64 {
        self.ticks.load(Ordering::Acquire)
    }

    fn ticks_per_second(&self) -> u64 {
        self.ticks_per_second
    }
}
