//! Platform collaborators consumed by the reset monitor.
//!
//! The monitor never touches registers directly. Everything it needs from
//! the interrupt controller and the system timer goes through the two traits
//! in this module, so the same state machine runs against real hardware and
//! against [`crate::simulated`] in tests.

use bitflags::bitflags;

bitflags! {
    /// View of the processor-interface interrupt cause register.
    ///
    /// Only the two reset switch bits are named; every other bit is kept
    /// as-is so a raw register value round-trips through this type.
    #[repr(transparent)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct InterruptStatus: u32 {
        /// Reset switch edge pending. Written back to acknowledge.
        const RESET_SWITCH = 1 << 1;
        /// Raw switch level, set while the switch is up (active-low).
        const RESET_SWITCH_RELEASED = 1 << 16;
    }
}

impl InterruptStatus {
    /// Status with the switch up and nothing pending.
    pub const IDLE: Self = Self::RESET_SWITCH_RELEASED;

    /// Returns `true` if the switch is physically held down right now.
    #[must_use]
    pub fn is_switch_down(self) -> bool {
        !self.contains(Self::RESET_SWITCH_RELEASED)
    }

    /// Returns `true` if an unacknowledged reset switch edge is pending.
    #[must_use]
    pub fn is_edge_pending(self) -> bool {
        self.contains(Self::RESET_SWITCH)
    }
}

/// Interrupt delivery state saved by [`InterruptController::disable_interrupts`].
///
/// Restoring this value puts delivery back exactly as it was, which keeps
/// nested critical sections correct.
#[must_use = "dropping a saved interrupt state leaves delivery disabled"]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterruptState {
    enabled: bool,
}

impl InterruptState {
    /// Saved state for a context that had delivery enabled.
    pub const fn enabled() -> Self {
        Self { enabled: true }
    }

    /// Saved state for a context that already had delivery disabled.
    pub const fn disabled() -> Self {
        Self { enabled: false }
    }

    /// Returns `true` if delivery was enabled when this state was saved.
    #[must_use]
    pub const fn was_enabled(self) -> bool {
        self.enabled
    }
}

/// Interrupt controller operations for the reset switch line.
///
/// # Implementation Requirements
///
/// 1. `disable_interrupts` MUST return the exact prior state and be nestable
/// 2. `acknowledge_reset_switch` MUST clear only the reset switch cause bit
/// 3. Mask/unmask MUST affect only the reset switch source
/// 4. No method may block or allocate; all are called with delivery disabled
///    or from the interrupt handler itself
pub trait InterruptController {
    /// Disable interrupt delivery on the current context and return the
    /// previous state.
    fn disable_interrupts(&self) -> InterruptState;

    /// Restore interrupt delivery to a state saved by `disable_interrupts`.
    fn restore_interrupts(&self, previous: InterruptState);

    /// Mask the reset switch interrupt source.
    fn mask_reset_switch(&self);

    /// Unmask the reset switch interrupt source.
    fn unmask_reset_switch(&self);

    /// Clear the pending reset switch cause so it does not re-fire.
    fn acknowledge_reset_switch(&self);

    /// Read the interrupt cause register.
    fn status(&self) -> InterruptStatus;
}

/// Monotonic hardware time source.
pub trait MonotonicClock {
    /// Current time in native ticks. Never goes backwards.
    fn now_ticks(&self) -> u64;

    /// Native ticks per second.
    fn ticks_per_second(&self) -> u64;

    /// Convert milliseconds to native ticks, rounding up so the result
    /// never covers less time than requested.
    fn millis_to_ticks(&self, ms: u32) -> u64 {
        u64::from(ms)
            .saturating_mul(self.ticks_per_second())
            .div_ceil(1000)
    }
}

impl<T: InterruptController + ?Sized> InterruptController for &T {
    fn disable_interrupts(&self) -> InterruptState {
        (**self).disable_interrupts()
    }

    fn restore_interrupts(&self, previous: InterruptState) {
        (**self).restore_interrupts(previous);
    }

    fn mask_reset_switch(&self) {
        (**self).mask_reset_switch();
    }

    fn unmask_reset_switch(&self) {
        (**self).unmask_reset_switch();
    }

    fn acknowledge_reset_switch(&self) {
        (**self).acknowledge_reset_switch();
    }

    fn status(&self) -> InterruptStatus {
        (**self).status()
    }
}

impl<T: MonotonicClock + ?Sized> MonotonicClock for &T {
    fn now_ticks(&self) -> u64 {
        (**self).now_ticks()
    }

    fn ticks_per_second(&self) -> u64 {
        (**self).ticks_per_second()
    }

    fn millis_to_ticks(&self, ms: u32) -> u64 {
        (**self).millis_to_ticks(ms)
    }
}
