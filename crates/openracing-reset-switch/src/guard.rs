//! Scoped interrupt-disable critical section.

use crate::hardware::{InterruptController, InterruptState};

/// RAII guard that disables interrupt delivery and restores the saved state
/// on drop.
///
/// Restoration is exact rather than an unconditional re-enable, so a guard
/// taken inside another critical section leaves delivery disabled when it
/// goes out of scope.
///
/// ```rust
/// use openracing_reset_switch::prelude::*;
///
/// let controller = SimulatedInterruptController::new();
/// {
///     let _outer = InterruptGuard::new(&controller);
///     {
///         let _inner = InterruptGuard::new(&controller);
///         assert!(!controller.interrupts_enabled());
///     }
///     assert!(!controller.interrupts_enabled());
/// }
/// assert!(controller.interrupts_enabled());
/// ```
#[must_use = "interrupts are restored as soon as the guard is dropped"]
#[derive(Debug)]
pub struct InterruptGuard<'a, I: InterruptController + ?Sized> {
    controller: &'a I,
    saved: InterruptState,
}

impl<'a, I: InterruptController + ?Sized> InterruptGuard<'a, I> {
    /// Disable delivery on `controller`, remembering the previous state.
    pub fn new(controller: &'a I) -> Self {
        let saved = controller.disable_interrupts();
        Self { controller, saved }
    }

    /// State that will be restored when this guard drops.
    pub fn saved_state(&self) -> InterruptState {
        self.saved
    }
}

impl<I: InterruptController + ?Sized> Drop for InterruptGuard<'_, I> {
    fn drop(&mut self) {
        self.controller.restore_interrupts(self.saved);
    }
}

/// Run `f` with interrupt delivery disabled, restoring the previous state
/// afterwards.
pub fn without_interrupts<I, F, R>(controller: &I, f: F) -> R
where
    I: InterruptController + ?Sized,
    F: FnOnce() -> R,
{
    let _guard = InterruptGuard::new(controller);
    f()
}
