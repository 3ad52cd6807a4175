//! Square-wave pulse timers for the buzzer, LEDs, and display backlight.
//!
//! Every output is a pure function of elapsed time since its own reference
//! timestamp. The event loop calls `evaluate()` once per tick with the
//! timestamp it read at the top of the tick; nothing here reads a clock.
//!
//! ```text
//!   start                 start+on           start+on+off
//!     │◀──────── on ───────▶│◀───── off ──────▶│
//!     ┌─────────────────────┐                  ┌──────
//!  ───┘                     └──────────────────┘
//! ```
//!
//! | Timer      | On (ms) | Off (ms) | Evaluated while        |
//! |-----------|---------|----------|------------------------|
//! | Buzzer     | 1500    | 1000     | alarm sounding         |
//! | Alarm LED  | 250     | 250      | gate open              |
//! | Heartbeat  | 100     | 8000     | not suspended          |
//! | Backlight  | 10000   | single shot | see [`BacklightTimer`] |

use crate::config::SystemConfig;

/// A repeating on/off timer with a retained output level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PulseTimer {
    on_ms: u32,
    off_ms: u32,
    start_ms: u32,
    level: bool,
}

impl PulseTimer {
    pub const fn new(on_ms: u32, off_ms: u32) -> Self {
        Self {
            on_ms,
            off_ms,
            start_ms: 0,
            level: false,
        }
    }

    /// Length of one full on+off cycle.
    pub const fn cycle_ms(&self) -> u32 {
        self.on_ms.saturating_add(self.off_ms)
    }

    /// Begin a new cycle at `now_ms` with the output forced to `level`.
    pub fn restart(&mut self, now_ms: u32, level: bool) {
        self.start_ms = now_ms;
        self.level = level;
    }

    /// Drive the output to `level` and clear the reference.
    pub fn force(&mut self, level: bool) {
        self.start_ms = 0;
        self.level = level;
    }

    /// Drive the output to `level` without touching the cycle reference.
    pub fn hold(&mut self, level: bool) {
        self.level = level;
    }

    /// Advance the pulse and return the output level for this tick.
    ///
    /// Past the end of a cycle the reference is rebased to `now_ms` and the
    /// previous level is kept for this one tick.
    pub fn evaluate(&mut self, now_ms: u32) -> bool {
        let elapsed = now_ms.wrapping_sub(self.start_ms);
        if elapsed > self.cycle_ms() {
            self.start_ms = now_ms;
        } else {
            self.level = elapsed < self.on_ms;
        }
        self.level
    }

    /// Output level as of the last evaluation or forced change.
    pub const fn level(&self) -> bool {
        self.level
    }

    /// Reference timestamp of the current cycle.
    pub const fn start_ms(&self) -> u32 {
        self.start_ms
    }
}

/// Single-shot backlight timeout.
///
/// Armed on every text change (and on a bare `#`), switches the backlight
/// off once the timeout has elapsed and the caller reports that auto-off is
/// permitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BacklightTimer {
    timeout_ms: u32,
    start_ms: u32,
    on: bool,
    rearm_count: u32,
}

impl BacklightTimer {
    pub const fn new(timeout_ms: u32) -> Self {
        Self {
            timeout_ms,
            start_ms: 0,
            on: false,
            rearm_count: 0,
        }
    }

    /// Switch the backlight on and restart the timeout from `now_ms`.
    pub fn arm(&mut self, now_ms: u32) {
        self.start_ms = now_ms;
        self.on = true;
        self.rearm_count = self.rearm_count.wrapping_add(1);
    }

    /// Evaluate the timeout. `auto_off_allowed` carries the state-dependent
    /// exemptions (gate open, timed suspension, editing).
    pub fn evaluate(&mut self, now_ms: u32, auto_off_allowed: bool) -> bool {
        if auto_off_allowed && now_ms.wrapping_sub(self.start_ms) >= self.timeout_ms {
            self.on = false;
            self.start_ms = 0;
        }
        self.on
    }

    pub const fn is_on(&self) -> bool {
        self.on
    }

    /// Number of times the backlight has been armed since boot.
    pub const fn rearm_count(&self) -> u32 {
        self.rearm_count
    }
}

/// The four independent timers that multiplex the device outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PulseScheduler {
    pub buzzer: PulseTimer,
    pub alarm_led: PulseTimer,
    pub heartbeat: PulseTimer,
    pub backlight: BacklightTimer,
}

impl PulseScheduler {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            buzzer: PulseTimer::new(config.buzzer_on_ms, config.buzzer_off_ms),
            alarm_led: PulseTimer::new(config.alarm_led_on_ms, config.alarm_led_off_ms),
            heartbeat: PulseTimer::new(config.heartbeat_on_ms, config.heartbeat_off_ms),
            backlight: BacklightTimer::new(config.backlight_timeout_ms),
        }
    }
}
