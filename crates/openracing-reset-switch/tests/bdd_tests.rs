//! BDD tests for reset switch scenarios.
//!
//! Feature: reset_switch_debounce.feature

#![cfg(test)]

use openracing_reset_switch::prelude::*;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

type TestResult = Result<(), Box<dyn std::error::Error>>;

mod reset_switch_scenarios {
    use super::*;

    /// Scenario: Press, latch, release and ride out the hold window
    #[test]
    fn scenario_press_release_hold_window() {
        // Given a monitor on idle hardware
        let controller = SimulatedInterruptController::new();
        let clock = SimulatedClock::new();
        let monitor = ResetMonitor::new(&controller, &clock);

        // When the switch goes down and the interrupt latches it
        controller.press();
        monitor.on_reset_interrupt();

        // And the switch comes back up with no new edge
        controller.release();
        assert!(!controller.is_edge_pending());

        // Then the first query reports pressed and opens the hold window
        assert_eq!(monitor.poll(), PollOutcome::HoldStarted { at: 0 });

        // And 40ms later the switch is still reported pressed
        clock.advance_ms(40);
        assert_eq!(monitor.reset_switch_state(), ResetSwitchState::Pressed);

        // And 60ms after the release it is reported released
        clock.advance_ms(20);
        assert_eq!(monitor.reset_switch_state(), ResetSwitchState::Released);
        assert_eq!(monitor.phase(), SwitchPhase::Idle);
    }

    /// Scenario: First registration returns nothing, the next returns it
    #[test]
    fn scenario_registration_chaining() -> TestResult {
        let monitor = ResetMonitor::new(SimulatedInterruptController::new(), SimulatedClock::new());
        let log = Arc::new(Mutex::new(Vec::<&'static str>::new()));

        let first_log = Arc::clone(&log);
        let first: ResetCallback = Box::new(move || {
            if let Ok(mut entries) = first_log.lock() {
                entries.push("first");
            }
        });
        assert!(monitor.set_reset_callback(Some(first)).is_none());

        let second_log = Arc::clone(&log);
        let previous = monitor.set_reset_callback(Some(Box::new(move || {
            if let Ok(mut entries) = second_log.lock() {
                entries.push("second");
            }
        })));
        let previous = previous.ok_or("expected the first callback back")?;

        // Calling the returned handler proves it is the first one.
        previous();
        let entries = log.lock().map_err(|e| e.to_string())?;
        assert_eq!(entries.as_slice(), ["first"]);
        Ok(())
    }

    /// Scenario: A fired callback is not replaced by one registered later
    #[test]
    fn scenario_callback_a_fires_once_b_waits() {
        let monitor = ResetMonitor::new(SimulatedInterruptController::new(), SimulatedClock::new());
        let a_hits = Arc::new(AtomicU32::new(0));
        let b_hits = Arc::new(AtomicU32::new(0));

        // Given callback A is registered
        let a = Arc::clone(&a_hits);
        monitor.set_reset_handler(move || {
            a.fetch_add(1, Ordering::SeqCst);
        });

        // When the interrupt fires
        monitor.on_reset_interrupt();
        assert!(!monitor.is_callback_registered());

        // And callback B is registered before another trigger
        let b = Arc::clone(&b_hits);
        let previous = monitor.set_reset_handler(move || {
            b.fetch_add(1, Ordering::SeqCst);
        });

        // Then A ran exactly once, B has not run, and nothing was returned
        assert!(previous.is_none());
        assert_eq!(a_hits.load(Ordering::SeqCst), 1);
        assert_eq!(b_hits.load(Ordering::SeqCst), 0);

        // And B runs on the next press
        monitor.on_reset_interrupt();
        assert_eq!(a_hits.load(Ordering::SeqCst), 1);
        assert_eq!(b_hits.load(Ordering::SeqCst), 1);
    }

    /// Scenario: Contact bounce keeps the switch pressed
    #[test]
    fn scenario_contact_bounce() {
        let controller = SimulatedInterruptController::new();
        let clock = SimulatedClock::new();
        let monitor = ResetMonitor::new(&controller, &clock);
        monitor.set_reset_handler(|| {});

        // Given a press was latched and the switch is up again
        controller.press();
        monitor.on_reset_interrupt();
        controller.release();

        // When the contacts chatter and raise another edge
        controller.raise_edge();

        // Then the query acknowledges it and still reports pressed
        assert_eq!(monitor.poll(), PollOutcome::Bouncing);
        assert!(!controller.is_edge_pending());

        // And once the chatter stops, the hold window begins
        clock.advance_ms(5);
        assert!(matches!(monitor.poll(), PollOutcome::HoldStarted { .. }));
        clock.advance_ms(50);
        assert!(!monitor.reset_switch_state().is_pressed());
    }

    /// Scenario: Holding the switch down outlasts the hold window
    #[test]
    fn scenario_long_press() {
        let controller = SimulatedInterruptController::new();
        let clock = SimulatedClock::new();
        let monitor = ResetMonitor::new(&controller, &clock);

        controller.press();
        monitor.on_reset_interrupt();

        for _ in 0..10 {
            clock.advance_ms(100);
            assert_eq!(monitor.poll(), PollOutcome::LevelDown);
        }

        controller.release();
        assert!(monitor.reset_switch_state().is_pressed());
        clock.advance_ms(50);
        assert!(!monitor.reset_switch_state().is_pressed());
    }

    /// Scenario: A press during the hold window re-latches
    #[test]
    fn scenario_press_during_hold_window() {
        let controller = SimulatedInterruptController::new();
        let clock = SimulatedClock::new();
        let monitor = ResetMonitor::new(&controller, &clock);

        monitor.on_reset_interrupt();
        assert!(matches!(monitor.poll(), PollOutcome::HoldStarted { .. }));
        assert_eq!(monitor.phase(), SwitchPhase::Held);

        clock.advance_ms(30);
        monitor.on_reset_interrupt();
        assert_eq!(monitor.phase(), SwitchPhase::LatchedBouncing);

        // The new resolution restarts the window from now.
        assert!(matches!(monitor.poll(), PollOutcome::HoldStarted { .. }));
        clock.advance_ms(40);
        assert!(monitor.reset_switch_state().is_pressed());
        clock.advance_ms(10);
        assert!(!monitor.reset_switch_state().is_pressed());
    }

    /// Scenario: Disarming leaves presses undetected by interrupt
    #[test]
    fn scenario_disarmed_line_is_masked() {
        let controller = SimulatedInterruptController::new();
        let monitor = ResetMonitor::new(&controller, SimulatedClock::new());

        monitor.set_reset_handler(|| {});
        monitor.clear_reset_callback();

        controller.press();
        assert!(controller.is_masked());
        assert!(!controller.is_interrupt_asserted());

        // Polling still sees the level.
        assert!(monitor.reset_switch_state().is_pressed());
    }
}
