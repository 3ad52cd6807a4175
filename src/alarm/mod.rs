//! Gate alarm state machine.
//!
//! ```text
//!            open_gate()                    # (no digits) / digits + #
//!   IDLE ───────────────────▶ OPEN ─────────────────────────────▶ OPEN
//!    ▲                    (sounding)                          (suspended)
//!    │                         │                                   │
//!    │        * (reset)        │            suspension timeout     │
//!    └─────────────────────────┴◀──────────── sounding ◀───────────┘
//! ```
//!
//! The gate flag is sticky: once the sensor reports open it stays set
//! until the star key resets everything. Suspension is an orthogonal
//! overlay (`Off`, `Timed`, `Infinite`), and numeric entry is a sub-mode
//! that only exists between the first digit and the terminating `#`.
//!
//! Every transition takes the [`PulseScheduler`] so it can restart or
//! silence the output pulses that belong to it.

pub mod keypad;

use log::{debug, info};

use crate::config::{MILLIS_PER_MINUTE, SystemConfig};
use crate::pulse::PulseScheduler;

pub use keypad::{Key, NumericEntry};

// ---------------------------------------------------------------------------
// Phase identity
// ---------------------------------------------------------------------------

/// Coarse phase derived from the gate flag, for logging and events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Gate closed (or reset since it was last open).
    Idle,
    /// Gate has been seen open since the last reset.
    Open,
}

// ---------------------------------------------------------------------------
// Suspension
// ---------------------------------------------------------------------------

/// Alarm suspension overlay. Entering a new suspension replaces the old.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Suspension {
    #[default]
    Off,
    /// Suspended for `duration_ms`, counted from `started_ms`.
    Timed { duration_ms: u32, started_ms: u32 },
    /// Suspended until the next `#` entry or reset.
    Infinite,
}

impl Suspension {
    /// Timed suspension of `minutes`, starting at `now_ms`.
    pub fn minutes(minutes: u32, now_ms: u32) -> Self {
        Self::Timed {
            duration_ms: minutes.saturating_mul(MILLIS_PER_MINUTE),
            started_ms: now_ms,
        }
    }

    pub const fn is_active(&self) -> bool {
        !matches!(self, Self::Off)
    }

    pub const fn is_infinite(&self) -> bool {
        matches!(self, Self::Infinite)
    }

    pub const fn is_timed(&self) -> bool {
        matches!(self, Self::Timed { .. })
    }

    /// Milliseconds left on a timed suspension, `None` otherwise.
    pub fn remaining_ms(&self, now_ms: u32) -> Option<u32> {
        match *self {
            Self::Timed {
                duration_ms,
                started_ms,
            } => Some(duration_ms.saturating_sub(now_ms.wrapping_sub(started_ms))),
            _ => None,
        }
    }

    /// True once strictly more than the duration has elapsed.
    fn has_expired(&self, now_ms: u32) -> bool {
        match *self {
            Self::Timed {
                duration_ms,
                started_ms,
            } => now_ms.wrapping_sub(started_ms) > duration_ms,
            _ => false,
        }
    }
}

// ---------------------------------------------------------------------------
// AlarmState
// ---------------------------------------------------------------------------

/// Gate, suspension, alarm, and numeric-entry state, owned by the event loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlarmState {
    gate_open: bool,
    suspension: Suspension,
    sounding: bool,
    entry: NumericEntry,
    max_suspend_minutes: u32,
}

impl AlarmState {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            gate_open: false,
            suspension: Suspension::Off,
            sounding: false,
            entry: NumericEntry::new(),
            max_suspend_minutes: config.max_suspend_minutes,
        }
    }

    // ── Transitions ───────────────────────────────────────────

    /// Latch the gate open. Shows the alarm LED and, unless suspended,
    /// starts the alarm. No-op when already open.
    pub fn open_gate(&mut self, now_ms: u32, pulses: &mut PulseScheduler) {
        if self.gate_open {
            return;
        }
        info!("Gate open");
        self.gate_open = true;
        pulses.alarm_led.restart(now_ms, true);
        if !self.suspension.is_active() {
            self.activate_alarm(now_ms, pulses);
        }
    }

    /// Clear gate, suspension, alarm, and any pending entry.
    pub fn reset(&mut self, pulses: &mut PulseScheduler) {
        info!("Reset");
        self.gate_open = false;
        self.cancel_suspension();
        self.silence_alarm(pulses);
        self.entry.clear();
        pulses.alarm_led.force(false);
    }

    /// Start sounding if the gate is open and the alarm is not already on.
    pub fn activate_alarm(&mut self, now_ms: u32, pulses: &mut PulseScheduler) {
        if self.gate_open && !self.sounding {
            info!("ALARM ACTIVATED");
            pulses.buzzer.restart(now_ms, true);
            self.sounding = true;
        }
    }

    /// Stop sounding and pull the buzzer low. No-op when silent.
    pub fn silence_alarm(&mut self, pulses: &mut PulseScheduler) {
        if self.sounding {
            self.sounding = false;
            pulses.buzzer.force(false);
            info!("Alarm silenced");
        }
    }

    pub fn cancel_suspension(&mut self) {
        self.suspension = Suspension::Off;
    }

    /// Replace the current suspension. Silences the alarm when the new
    /// state suspends it, re-activates it when suspension was cancelled
    /// while the gate is open.
    pub fn suspend(&mut self, suspension: Suspension, now_ms: u32, pulses: &mut PulseScheduler) {
        self.suspension = suspension;
        if suspension.is_active() {
            debug!("Suspended: {:?}", suspension);
            self.silence_alarm(pulses);
        } else if self.gate_open {
            debug!("Not suspended, gate open: reactivating alarm");
            self.activate_alarm(now_ms, pulses);
        } else {
            debug!("Not suspended, gate closed");
        }
    }

    /// Expire a timed suspension once its duration has fully elapsed.
    /// Returns `true` if the suspension expired on this call.
    pub fn check_suspension_timeout(&mut self, now_ms: u32, pulses: &mut PulseScheduler) -> bool {
        if !self.suspension.has_expired(now_ms) {
            return false;
        }
        info!("Suspension timeout");
        self.cancel_suspension();
        self.activate_alarm(now_ms, pulses);
        true
    }

    // ── Queries ───────────────────────────────────────────────

    pub const fn phase(&self) -> Phase {
        if self.gate_open { Phase::Open } else { Phase::Idle }
    }

    pub const fn is_gate_open(&self) -> bool {
        self.gate_open
    }

    pub const fn suspension(&self) -> Suspension {
        self.suspension
    }

    pub const fn is_suspended(&self) -> bool {
        self.suspension.is_active()
    }

    pub const fn is_sounding(&self) -> bool {
        self.sounding
    }

    pub const fn entry(&self) -> &NumericEntry {
        &self.entry
    }

    pub const fn is_editing(&self) -> bool {
        self.entry.is_editing()
    }

    /// The backlight may time out only with the gate closed, no timed
    /// suspension running, and no entry in progress.
    pub const fn backlight_auto_off_allowed(&self) -> bool {
        !self.gate_open
            && (!self.suspension.is_active() || self.suspension.is_infinite())
            && !self.entry.is_editing()
    }
}
