//! Alarm service: the hexagonal core and the body of the event loop.
//!
//! [`AlarmService`] owns the alarm state, the pulse timers, and the
//! display refresher. One call to [`AlarmService::tick`] is one iteration
//! of the polling loop: the clock is read exactly once and every decision
//! in the tick uses that timestamp.
//!
//! ```text
//!  ClockPort ──▶ ┌────────────────────────────┐ ──▶ SignalPort
//!  SensorPort ──▶│        AlarmService         │ ──▶ DisplayPort
//!  KeypadPort ──▶│ AlarmState · Pulses · Text  │ ──▶ EventSink
//!                └────────────────────────────┘
//! ```

use log::info;

use crate::alarm::{AlarmState, Key, Suspension};
use crate::config::SystemConfig;
use crate::display::{DisplayRefresher, DisplayText, compose};
use crate::pulse::PulseScheduler;

use super::events::{AlarmStatus, AppEvent};
use super::ports::{ClockPort, DisplayPort, EventSink, KeypadPort, SensorPort, SignalPort};

/// State captured at the top of a tick so transitions can be reported.
#[derive(Clone, Copy)]
struct Before {
    gate_open: bool,
    sounding: bool,
    editing: bool,
    suspension: Suspension,
}

// ───────────────────────────────────────────────────────────────
// AlarmService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
pub struct AlarmService {
    config: SystemConfig,
    state: AlarmState,
    pulses: PulseScheduler,
    display: DisplayRefresher,
    /// Backlight level last written to the display, `None` before start.
    backlight_applied: Option<bool>,
    tick_count: u64,
}

impl AlarmService {
    /// Construct the service from configuration.
    ///
    /// Does **not** touch hardware; call [`start`](Self::start) next.
    pub fn new(config: SystemConfig) -> Self {
        let state = AlarmState::new(&config);
        let pulses = PulseScheduler::new(&config);
        let display = DisplayRefresher::new(config.display_refresh_interval_ms);
        Self {
            config,
            state,
            pulses,
            display,
            backlight_applied: None,
            tick_count: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Show the splash screen, light the backlight, pull every signal low,
    /// and start the heartbeat reference.
    pub fn start(
        &mut self,
        clock: &impl ClockPort,
        hw: &mut (impl DisplayPort + SignalPort),
        sink: &mut impl EventSink,
    ) {
        let now_ms = clock.now_ms();

        let (line1, line2) = DisplayText::splash().centered();
        hw.render(&line1, &line2);
        self.display.invalidate();
        self.pulses.backlight.arm(now_ms);
        self.apply_backlight(hw, sink);

        self.pulses.heartbeat.restart(now_ms, false);
        hw.set_buzzer(false);
        hw.set_alarm_led(false);
        hw.set_heartbeat_led(false);

        sink.emit(&AppEvent::Started);
        info!("AlarmService started at {} ms", now_ms);
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one loop iteration: inputs → state → pulses → outputs → display.
    ///
    /// The `hw` parameter satisfies every input and output port at once;
    /// this avoids a double mutable borrow while keeping the port
    /// boundary explicit.
    pub fn tick(
        &mut self,
        clock: &impl ClockPort,
        hw: &mut (impl SensorPort + KeypadPort + DisplayPort + SignalPort),
        sink: &mut impl EventSink,
    ) {
        let now_ms = clock.now_ms();
        self.tick_count += 1;
        let before = self.before();

        // 1. Inputs: sensor before keypad, both before any timer
        if hw.gate_open(now_ms) {
            self.state.open_gate(now_ms, &mut self.pulses);
        }
        let key = hw.poll_key(now_ms);
        if let Some(key) = key {
            self.state.handle_key(key, now_ms, &mut self.pulses);
        }

        // 2. Suspension timeout
        let expired = self.state.check_suspension_timeout(now_ms, &mut self.pulses);

        self.emit_transitions(before, key, expired, sink);

        // 3. Pulse timers
        self.evaluate_pulses(now_ms);

        // 4. Binary outputs
        hw.set_buzzer(self.pulses.buzzer.level());
        hw.set_alarm_led(self.pulses.alarm_led.level());
        hw.set_heartbeat_led(self.pulses.heartbeat.level());

        // 5. Display text (re-arms the backlight on change)
        self.refresh_display(now_ms, hw, sink);
        self.apply_backlight(hw, sink);
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn state(&self) -> &AlarmState {
        &self.state
    }

    pub fn pulses(&self) -> &PulseScheduler {
        &self.pulses
    }

    pub fn config(&self) -> &SystemConfig {
        &self.config
    }

    /// Total loop iterations executed since startup.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Text currently on the display, if any has been drawn since start.
    pub fn shown_text(&self) -> Option<&DisplayText> {
        self.display.shown()
    }

    pub fn status(&self) -> AlarmStatus {
        AlarmStatus {
            phase: self.state.phase(),
            suspension: self.state.suspension(),
            sounding: self.state.is_sounding(),
            entry: self
                .state
                .is_editing()
                .then(|| self.state.entry().value()),
            buzzer: self.pulses.buzzer.level(),
            alarm_led: self.pulses.alarm_led.level(),
            heartbeat_led: self.pulses.heartbeat.level(),
            backlight: self.pulses.backlight.is_on(),
        }
    }

    // ── Internal ──────────────────────────────────────────────

    fn before(&self) -> Before {
        Before {
            gate_open: self.state.is_gate_open(),
            sounding: self.state.is_sounding(),
            editing: self.state.is_editing(),
            suspension: self.state.suspension(),
        }
    }

    fn evaluate_pulses(&mut self, now_ms: u32) {
        let pulses = &mut self.pulses;

        if self.state.is_sounding() {
            pulses.buzzer.evaluate(now_ms);
        }

        // Alarm LED flashes whether or not the alarm is suspended
        if self.state.is_gate_open() {
            pulses.alarm_led.evaluate(now_ms);
        }

        if self.state.is_suspended() {
            pulses.heartbeat.hold(true);
        } else {
            pulses.heartbeat.evaluate(now_ms);
        }

        pulses
            .backlight
            .evaluate(now_ms, self.state.backlight_auto_off_allowed());
    }

    fn refresh_display(&mut self, now_ms: u32, hw: &mut impl DisplayPort, sink: &mut impl EventSink) {
        if !self.display.is_due(now_ms) {
            return;
        }
        let text = compose(&self.state, now_ms);
        if self.display.update(text.clone(), now_ms) {
            let (line1, line2) = text.centered();
            hw.render(&line1, &line2);
            self.pulses.backlight.arm(now_ms);
            sink.emit(&AppEvent::DisplayUpdated(text));
        }
    }

    fn apply_backlight(&mut self, hw: &mut impl DisplayPort, sink: &mut impl EventSink) {
        let on = self.pulses.backlight.is_on();
        if self.backlight_applied != Some(on) {
            hw.set_backlight(on);
            self.backlight_applied = Some(on);
            sink.emit(&AppEvent::BacklightChanged(on));
        }
    }

    fn emit_transitions(
        &self,
        before: Before,
        key: Option<Key>,
        expired: bool,
        sink: &mut impl EventSink,
    ) {
        if !before.gate_open && self.state.is_gate_open() {
            sink.emit(&AppEvent::GateOpened);
        }

        if let Some(key) = key {
            sink.emit(&AppEvent::KeyPressed(key));
            match key {
                Key::Star => sink.emit(&AppEvent::Reset),
                Key::Digit(d) if d <= 9 => {
                    let value = self.state.entry().value();
                    if before.editing {
                        sink.emit(&AppEvent::EntryUpdated(value));
                    } else {
                        sink.emit(&AppEvent::EntryStarted(value));
                    }
                }
                Key::Digit(_) | Key::Hash => {}
            }
        }

        let suspension = self.state.suspension();
        if expired {
            sink.emit(&AppEvent::SuspensionExpired);
        } else if suspension != before.suspension {
            sink.emit(&AppEvent::SuspensionChanged(suspension));
        }

        match (before.sounding, self.state.is_sounding()) {
            (false, true) => sink.emit(&AppEvent::AlarmActivated),
            (true, false) => sink.emit(&AppEvent::AlarmSilenced),
            _ => {}
        }
    }
}
