//! Mock hardware adapter for integration tests.
//!
//! Records every output write so tests can assert on the full history
//! without touching real GPIO or I²C, and a manual clock the test advances
//! explicitly.

use core::cell::Cell;
use std::collections::VecDeque;

use gatealarm::alarm::Key;
use gatealarm::app::events::AppEvent;
use gatealarm::app::ports::{
    ClockPort, DisplayPort, EventSink, KeypadPort, SensorPort, SignalPort,
};
use gatealarm::app::service::AlarmService;
use gatealarm::config::SystemConfig;

// ── Clock ─────────────────────────────────────────────────────

pub struct ManualClock(Cell<u32>);

#[allow(dead_code)]
impl ManualClock {
    pub fn new(start_ms: u32) -> Self {
        Self(Cell::new(start_ms))
    }

    pub fn set(&self, now_ms: u32) {
        self.0.set(now_ms);
    }
}

impl ClockPort for ManualClock {
    fn now_ms(&self) -> u32 {
        self.0.get()
    }
}

// ── MockHardware ──────────────────────────────────────────────

#[derive(Default)]
pub struct MockHardware {
    /// Raw gate level returned to the core.
    pub gate: bool,
    /// Keys delivered one per tick.
    pub keys: VecDeque<Key>,
    pub buzzer: bool,
    pub alarm_led: bool,
    pub heartbeat_led: bool,
    pub backlight: bool,
    /// Every `render` call, in order.
    pub renders: Vec<(String, String)>,
    pub backlight_writes: u32,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn last_render(&self) -> Option<(&str, &str)> {
        self.renders.last().map(|(a, b)| (a.as_str(), b.as_str()))
    }
}

impl SensorPort for MockHardware {
    fn gate_open(&mut self, _now_ms: u32) -> bool {
        self.gate
    }
}

impl KeypadPort for MockHardware {
    fn poll_key(&mut self, _now_ms: u32) -> Option<Key> {
        self.keys.pop_front()
    }
}

impl DisplayPort for MockHardware {
    fn render(&mut self, line1: &str, line2: &str) {
        self.renders.push((line1.to_owned(), line2.to_owned()));
    }

    fn set_backlight(&mut self, on: bool) {
        self.backlight = on;
        self.backlight_writes += 1;
    }
}

impl SignalPort for MockHardware {
    fn set_buzzer(&mut self, on: bool) {
        self.buzzer = on;
    }

    fn set_alarm_led(&mut self, on: bool) {
        self.alarm_led = on;
    }

    fn set_heartbeat_led(&mut self, on: bool) {
        self.heartbeat_led = on;
    }
}

// ── Event recorder ────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn count(&self, event: &AppEvent) -> usize {
        self.events.iter().filter(|e| *e == event).count()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

// ── Rig ───────────────────────────────────────────────────────

/// Service plus mocks, started at t = 0.
pub struct Rig {
    pub app: AlarmService,
    pub clock: ManualClock,
    pub hw: MockHardware,
    pub sink: RecordingSink,
}

#[allow(dead_code)]
impl Rig {
    pub fn new() -> Self {
        Self::with_config(SystemConfig::default())
    }

    pub fn with_config(config: SystemConfig) -> Self {
        let mut rig = Self {
            app: AlarmService::new(config),
            clock: ManualClock::new(0),
            hw: MockHardware::default(),
            sink: RecordingSink::default(),
        };
        rig.app.start(&rig.clock, &mut rig.hw, &mut rig.sink);
        rig
    }

    pub fn now(&self) -> u32 {
        self.clock.now_ms()
    }

    /// One loop iteration at `now_ms`.
    pub fn tick_at(&mut self, now_ms: u32) {
        self.clock.set(now_ms);
        self.app.tick(&self.clock, &mut self.hw, &mut self.sink);
    }

    /// Tick every `step_ms` after the current time up to and including
    /// `until_ms`.
    pub fn run_until(&mut self, until_ms: u32, step_ms: u32) {
        let mut t = self.now();
        while t < until_ms {
            t = (t + step_ms).min(until_ms);
            self.tick_at(t);
        }
    }

    /// Type `keys` one per tick, 10 ms apart.
    pub fn press(&mut self, keys: &str) {
        for c in keys.chars() {
            let key = Key::from_char(c).expect("valid keypad legend");
            self.hw.keys.push_back(key);
            let t = self.now() + 10;
            self.tick_at(t);
        }
    }
}
