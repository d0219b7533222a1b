//! Debounce state machine and metrics.
//!
//! [`DebounceLatch`] holds the two pieces of debounce state (the latched
//! press edge and the hold window start) and decides each query from the
//! interrupt status, the current time and the window length. It performs
//! no I/O; [`crate::monitor::ResetMonitor`] feeds it and carries out the
//! acknowledge it asks for.
//!
//! ```text
//!            edge interrupt / level down
//!   ┌──────┐ ─────────────────────────► ┌─────────────────┐
//!   │ Idle │                            │ LatchedBouncing │◄─┐ pending edge
//!   └──────┘ ◄──┐                       └─────────────────┘──┘ (ack)
//!      ▲        │ window expired               │
//!      │        │                   clean edge │ query
//!      │     ┌──────┐                          │
//!      └─────│ Held │◄─────────────────────────┘
//!            └──────┘
//!               │ edge interrupt / level down ──► LatchedBouncing
//! ```

use crate::hardware::InterruptStatus;

/// Debounced reset switch state reported to application code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ResetSwitchState {
    /// Switch is not considered pressed.
    #[default]
    Released,
    /// Switch is considered pressed.
    Pressed,
}

impl ResetSwitchState {
    /// Returns `true` for [`ResetSwitchState::Pressed`].
    #[must_use]
    pub fn is_pressed(self) -> bool {
        matches!(self, Self::Pressed)
    }

    /// Get the state as a string slice.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Released => "Released",
            Self::Pressed => "Pressed",
        }
    }
}

impl From<bool> for ResetSwitchState {
    fn from(pressed: bool) -> Self {
        if pressed {
            Self::Pressed
        } else {
            Self::Released
        }
    }
}

/// Internal debounce phase.
///
/// Externally the switch is two-valued; internally the monitor
/// distinguishes a latched press from a counting-down hold window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SwitchPhase {
    /// Not pressed, no hold window pending.
    #[default]
    Idle,
    /// A press edge is latched and not yet resolved by a query.
    LatchedBouncing,
    /// A resolved press is inside its hold window.
    Held,
}

impl SwitchPhase {
    /// Get the phase as a string slice.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::LatchedBouncing => "LatchedBouncing",
            Self::Held => "Held",
        }
    }
}

/// What a single query decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// The level bit shows the switch physically down.
    LevelDown,
    /// A latched press saw another edge; the pending cause must be
    /// acknowledged.
    Bouncing,
    /// A latched press resolved cleanly and the hold window started.
    HoldStarted {
        /// Tick at which the window started.
        at: u64,
    },
    /// Still inside the hold window.
    Holding,
    /// The hold window just ran out.
    HoldExpired,
    /// Nothing latched and no window pending.
    Released,
}

impl PollOutcome {
    /// Debounced state this outcome reports.
    #[must_use]
    pub fn state(self) -> ResetSwitchState {
        match self {
            Self::LevelDown | Self::Bouncing | Self::HoldStarted { .. } | Self::Holding => {
                ResetSwitchState::Pressed
            }
            Self::HoldExpired | Self::Released => ResetSwitchState::Released,
        }
    }

    /// Returns `true` if the caller must acknowledge the pending edge.
    #[must_use]
    pub fn acknowledges_edge(self) -> bool {
        matches!(self, Self::Bouncing)
    }
}

/// Latched edge and hold window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DebounceLatch {
    down_latched: bool,
    hold_start: Option<u64>,
}

impl DebounceLatch {
    /// Create an idle latch.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            down_latched: false,
            hold_start: None,
        }
    }

    /// Record a press edge seen by the interrupt handler.
    pub fn latch_edge(&mut self) {
        self.down_latched = true;
    }

    /// Returns `true` if a press edge is latched.
    #[must_use]
    pub fn is_latched(&self) -> bool {
        self.down_latched
    }

    /// Tick at which the current hold window started, if any.
    #[must_use]
    pub fn hold_start(&self) -> Option<u64> {
        self.hold_start
    }

    /// Decide one query.
    ///
    /// The level bit wins over everything and re-latches the press. A
    /// latched press either keeps bouncing (another edge pending) or
    /// resolves and opens the hold window; the resolving query itself
    /// still reports pressed. The window reports pressed while
    /// `now - start < window_ticks`.
    pub fn poll(&mut self, status: InterruptStatus, now: u64, window_ticks: u64) -> PollOutcome {
        if status.is_switch_down() {
            self.down_latched = true;
            return PollOutcome::LevelDown;
        }

        if self.down_latched {
            if status.is_edge_pending() {
                return PollOutcome::Bouncing;
            }
            self.down_latched = false;
            self.hold_start = Some(now);
            return PollOutcome::HoldStarted { at: now };
        }

        match self.hold_start {
            Some(start) if now.saturating_sub(start) < window_ticks => PollOutcome::Holding,
            Some(_) => {
                self.hold_start = None;
                PollOutcome::HoldExpired
            }
            None => PollOutcome::Released,
        }
    }

    /// Side-effect-free phase at time `now`.
    #[must_use]
    pub fn phase(&self, now: u64, window_ticks: u64) -> SwitchPhase {
        if self.down_latched {
            return SwitchPhase::LatchedBouncing;
        }
        match self.hold_start {
            Some(start) if now.saturating_sub(start) < window_ticks => SwitchPhase::Held,
            _ => SwitchPhase::Idle,
        }
    }
}

/// Monitor metrics for diagnostics.
///
/// Counters saturate instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(C)]
pub struct MonitorMetrics {
    /// Reset switch interrupts handled.
    pub interrupt_count: u64,
    /// One-shot callbacks invoked by the interrupt handler.
    pub callbacks_fired: u64,
    /// Callbacks registered (non-`None` registrations).
    pub callbacks_registered: u64,
    /// State queries answered.
    pub queries: u64,
    /// Queries that reported pressed.
    pub pressed_reports: u64,
    /// Pending edges acknowledged while bouncing.
    pub bounce_acks: u64,
    /// Hold windows opened.
    pub hold_windows_started: u64,
}

impl MonitorMetrics {
    /// Create a zeroed metrics instance.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            interrupt_count: 0,
            callbacks_fired: 0,
            callbacks_registered: 0,
            queries: 0,
            pressed_reports: 0,
            bounce_acks: 0,
            hold_windows_started: 0,
        }
    }

    /// Record an interrupt, and whether it fired a callback.
    pub fn record_interrupt(&mut self, fired_callback: bool) {
        self.interrupt_count = self.interrupt_count.saturating_add(1);
        if fired_callback {
            self.callbacks_fired = self.callbacks_fired.saturating_add(1);
        }
    }

    /// Record a callback registration.
    pub fn record_registration(&mut self) {
        self.callbacks_registered = self.callbacks_registered.saturating_add(1);
    }

    /// Record a query outcome.
    pub fn record_poll(&mut self, outcome: PollOutcome) {
        self.queries = self.queries.saturating_add(1);
        if outcome.state().is_pressed() {
            self.pressed_reports = self.pressed_reports.saturating_add(1);
        }
        match outcome {
            PollOutcome::Bouncing => self.bounce_acks = self.bounce_acks.saturating_add(1),
            PollOutcome::HoldStarted { .. } => {
                self.hold_windows_started = self.hold_windows_started.saturating_add(1);
            }
            _ => {}
        }
    }

    /// Reset all metrics.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
