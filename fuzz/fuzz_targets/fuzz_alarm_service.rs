//! Fuzz target: `AlarmService::tick` driven by arbitrary input sequences
//!
//! Each input byte is one loop tick. The low two bits pick what happens on
//! that tick; the remaining six bits are the payload.
//!
//! | bits 1..0 | tick                                            |
//! |-----------|-------------------------------------------------|
//! | `00`      | gate sensor level = payload bit 0               |
//! | `01`      | key press, payload % 12 indexes the keymap      |
//! | `10`      | advance the clock by payload × 1 s              |
//! | `11`      | advance the clock by payload × 1 min            |
//!
//! Invariants checked:
//! - No panics under any byte sequence
//! - The buzzer is silent whenever the alarm is not sounding
//! - The alarm sounds only with the gate open and no suspension
//! - The heartbeat LED is solid while suspended
//! - Every rendered line fits the 16-column panel
//!
//! cargo fuzz run fuzz_alarm_service

#![no_main]

use std::cell::Cell;

use gatealarm::alarm::Key;
use gatealarm::app::events::AppEvent;
use gatealarm::app::ports::{
    ClockPort, DisplayPort, EventSink, KeypadPort, SensorPort, SignalPort,
};
use gatealarm::app::service::AlarmService;
use gatealarm::config::SystemConfig;
use gatealarm::display::LCD_WIDTH;
use gatealarm::drivers::keypad::KEYMAP;
use libfuzzer_sys::fuzz_target;

struct Clock(Cell<u32>);

impl ClockPort for Clock {
    fn now_ms(&self) -> u32 {
        self.0.get()
    }
}

#[derive(Default)]
struct Hw {
    gate: bool,
    key: Option<Key>,
    buzzer: bool,
    heartbeat: bool,
}

impl SensorPort for Hw {
    fn gate_open(&mut self, _now_ms: u32) -> bool {
        self.gate
    }
}

impl KeypadPort for Hw {
    fn poll_key(&mut self, _now_ms: u32) -> Option<Key> {
        self.key.take()
    }
}

impl DisplayPort for Hw {
    fn render(&mut self, line1: &str, line2: &str) {
        assert!(line1.chars().count() <= LCD_WIDTH, "line 1 overflows: {:?}", line1);
        assert!(line2.chars().count() <= LCD_WIDTH, "line 2 overflows: {:?}", line2);
    }

    fn set_backlight(&mut self, _on: bool) {}
}

impl SignalPort for Hw {
    fn set_buzzer(&mut self, on: bool) {
        self.buzzer = on;
    }

    fn set_alarm_led(&mut self, _on: bool) {}

    fn set_heartbeat_led(&mut self, on: bool) {
        self.heartbeat = on;
    }
}

struct Discard;

impl EventSink for Discard {
    fn emit(&mut self, _event: &AppEvent) {}
}

fuzz_target!(|data: &[u8]| {
    let clock = Clock(Cell::new(0));
    let mut hw = Hw::default();
    let mut app = AlarmService::new(SystemConfig::default());
    app.start(&clock, &mut hw, &mut Discard);

    for &byte in data {
        let payload = u32::from(byte >> 2);
        match byte & 0b11 {
            0b00 => hw.gate = payload & 1 == 1,
            0b01 => {
                let idx = (payload % 12) as usize;
                hw.key = Key::from_char(KEYMAP[idx / 3][idx % 3]);
            }
            0b10 => clock.0.set(clock.0.get().wrapping_add(payload * 1000)),
            _ => clock.0.set(clock.0.get().wrapping_add(payload * 60_000)),
        }

        app.tick(&clock, &mut hw, &mut Discard);

        let state = app.state();
        assert_eq!(
            state.is_sounding(),
            state.is_gate_open() && !state.is_suspended(),
            "sounding out of step with gate/suspension"
        );
        if !state.is_sounding() {
            assert!(!hw.buzzer, "buzzer on while silent");
        }
        if state.is_suspended() {
            assert!(hw.heartbeat, "heartbeat not solid while suspended");
        }
    }
});
