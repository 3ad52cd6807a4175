//! Fuzz target: `SystemConfig` JSON parsing and validation
//!
//! Any configuration that passes `validate()` must drive the service
//! through a day of ticks without panicking or overflowing.
//!
//! cargo fuzz run fuzz_config_json

#![no_main]

use std::cell::Cell;

use gatealarm::alarm::Key;
use gatealarm::app::events::AppEvent;
use gatealarm::app::ports::{
    ClockPort, DisplayPort, EventSink, KeypadPort, SensorPort, SignalPort,
};
use gatealarm::app::service::AlarmService;
use gatealarm::config::SystemConfig;
use libfuzzer_sys::fuzz_target;

struct Clock(Cell<u32>);

impl ClockPort for Clock {
    fn now_ms(&self) -> u32 {
        self.0.get()
    }
}

/// Opens the gate and types "99999#" once.
struct Script {
    step: usize,
}

impl SensorPort for Script {
    fn gate_open(&mut self, _now_ms: u32) -> bool {
        self.step > 2
    }
}

impl KeypadPort for Script {
    fn poll_key(&mut self, _now_ms: u32) -> Option<Key> {
        self.step += 1;
        b"99999#".get(self.step - 1).and_then(|&c| Key::from_char(char::from(c)))
    }
}

impl DisplayPort for Script {
    fn render(&mut self, _line1: &str, _line2: &str) {}
    fn set_backlight(&mut self, _on: bool) {}
}

impl SignalPort for Script {
    fn set_buzzer(&mut self, _on: bool) {}
    fn set_alarm_led(&mut self, _on: bool) {}
    fn set_heartbeat_led(&mut self, _on: bool) {}
}

struct Discard;

impl EventSink for Discard {
    fn emit(&mut self, _event: &AppEvent) {}
}

fuzz_target!(|data: &[u8]| {
    let Ok(config) = serde_json::from_slice::<SystemConfig>(data) else {
        return;
    };
    if config.validate().is_err() {
        return;
    }

    let clock = Clock(Cell::new(0));
    let mut hw = Script { step: 0 };
    let mut app = AlarmService::new(config);
    app.start(&clock, &mut hw, &mut Discard);

    // One tick per minute for a little over a day
    for minute in 0..1500u32 {
        clock.0.set(minute.wrapping_mul(60_000));
        app.tick(&clock, &mut hw, &mut Discard);
    }
});
