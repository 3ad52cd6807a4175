//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AlarmService (domain)
//! ```
//!
//! Driven adapters (clock, reed switch, keypad, LCD, output pins, event
//! sinks) implement these traits. The
//! [`AlarmService`](super::service::AlarmService) consumes them via
//! generics, so the domain core never touches hardware directly.
//!
//! Ports are infallible: adapters log and swallow driver errors, and the
//! core keeps running on the last known state.

use crate::alarm::Key;

// ───────────────────────────────────────────────────────────────
// Clock port
// ───────────────────────────────────────────────────────────────

/// Monotonic millisecond clock. Wraps at `u32::MAX`; callers only ever
/// use wrapping subtraction.
pub trait ClockPort {
    fn now_ms(&self) -> u32;
}

// ───────────────────────────────────────────────────────────────
// Input ports (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Gate sensor (magnetic reed switch with a parallel test button).
pub trait SensorPort {
    /// Debounced "gate open" level. Called once per tick with the tick's
    /// timestamp so debouncing shares the same clock reading.
    fn gate_open(&mut self, now_ms: u32) -> bool;
}

/// 4×3 matrix keypad.
pub trait KeypadPort {
    /// At most one newly pressed key per call. No repeat while held.
    fn poll_key(&mut self, now_ms: u32) -> Option<Key>;
}

// ───────────────────────────────────────────────────────────────
// Output ports (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Two-line character display with backlight.
pub trait DisplayPort {
    /// Replace both lines. Lines arrive pre-centred at full panel width.
    fn render(&mut self, line1: &str, line2: &str);

    fn set_backlight(&mut self, on: bool);
}

/// The three binary output signals.
pub trait SignalPort {
    fn set_buzzer(&mut self, on: bool);

    fn set_alarm_led(&mut self, on: bool);

    fn set_heartbeat_led(&mut self, on: bool);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port. Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
