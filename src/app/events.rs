//! Outbound application events.
//!
//! The [`AlarmService`](super::service::AlarmService) emits these through
//! the [`EventSink`](super::ports::EventSink) port after each tick, derived
//! by comparing the state before and after the tick.

use crate::alarm::{Key, Phase, Suspension};
use crate::display::DisplayText;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// The service has started (splash shown, outputs low).
    Started,

    /// A key press was accepted from the keypad.
    KeyPressed(Key),

    /// The gate sensor latched the gate open.
    GateOpened,

    /// Star key cleared gate, suspension, and alarm.
    Reset,

    /// The buzzer began sounding.
    AlarmActivated,

    /// The buzzer was silenced (suspension or reset).
    AlarmSilenced,

    /// First digit of a suspension entry.
    EntryStarted(u32),

    /// Further digits of a suspension entry.
    EntryUpdated(u32),

    /// The suspension overlay changed through the keypad.
    SuspensionChanged(Suspension),

    /// A timed suspension ran out.
    SuspensionExpired,

    /// New text was drawn on the display.
    DisplayUpdated(DisplayText),

    /// Backlight switched on or off.
    BacklightChanged(bool),
}

/// Point-in-time view of the controller, for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlarmStatus {
    pub phase: Phase,
    pub suspension: Suspension,
    pub sounding: bool,
    /// `Some(minutes)` while a suspension entry is being typed.
    pub entry: Option<u32>,
    pub buzzer: bool,
    pub alarm_led: bool,
    pub heartbeat_led: bool,
    pub backlight: bool,
}
