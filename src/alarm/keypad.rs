//! Keypad command interpreter.
//!
//! | Key      | Not editing                    | Editing                         |
//! |----------|--------------------------------|---------------------------------|
//! | `0`–`9`  | start entry with the digit     | `value = value * 10 + digit`    |
//! | `#`      | infinite suspension + backlight| timed suspension, `0` cancels   |
//! | `*`      | reset                          | reset                           |
//!
//! The entered value is in minutes and saturates at the configured
//! maximum suspension rather than overflowing.

use log::{debug, info};

use super::{AlarmState, Suspension};
use crate::pulse::PulseScheduler;

const DIGIT_ENTRY_BASE: u32 = 10;

/// A decoded key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Digit(u8),
    Hash,
    Star,
}

impl Key {
    /// Decode a key-map character. Anything outside `0-9`, `#`, `*` is
    /// ignored.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '0'..='9' => c.to_digit(10).map(|d| Self::Digit(d as u8)),
            '#' => Some(Self::Hash),
            '*' => Some(Self::Star),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Self::Digit(d) => char::from(b'0' + d.min(9)),
            Self::Hash => '#',
            Self::Star => '*',
        }
    }
}

/// Suspension minutes being typed on the keypad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NumericEntry {
    value: u32,
    editing: bool,
}

impl NumericEntry {
    pub const fn new() -> Self {
        Self {
            value: 0,
            editing: false,
        }
    }

    /// Append a digit, starting a new entry if none is in progress.
    pub fn push_digit(&mut self, digit: u8, max: u32) {
        let digit = u32::from(digit);
        self.value = if self.editing {
            self.value
                .saturating_mul(DIGIT_ENTRY_BASE)
                .saturating_add(digit)
                .min(max)
        } else {
            digit.min(max)
        };
        self.editing = true;
    }

    /// End the entry, returning the value if one was in progress.
    pub fn take(&mut self) -> Option<u32> {
        let value = self.editing.then_some(self.value);
        self.clear();
        value
    }

    pub fn clear(&mut self) {
        self.value = 0;
        self.editing = false;
    }

    pub const fn is_editing(&self) -> bool {
        self.editing
    }

    pub const fn value(&self) -> u32 {
        self.value
    }
}

impl AlarmState {
    /// Apply one key press.
    pub fn handle_key(&mut self, key: Key, now_ms: u32, pulses: &mut PulseScheduler) {
        debug!("Keypad: {:?}", key);
        match key {
            Key::Digit(d) if d > 9 => debug!("Ignoring out-of-range digit {}", d),
            Key::Digit(d) => {
                self.entry.push_digit(d, self.max_suspend_minutes);
                debug!("Suspend entry = {}", self.entry.value());
            }
            Key::Hash => self.handle_hash(now_ms, pulses),
            Key::Star => self.reset(pulses),
        }
    }

    fn handle_hash(&mut self, now_ms: u32, pulses: &mut PulseScheduler) {
        let next = match self.entry.take() {
            Some(0) => {
                info!("Entered zero: suspension off");
                Suspension::Off
            }
            Some(minutes) => {
                info!("Entered suspension of {} min", minutes);
                Suspension::minutes(minutes, now_ms)
            }
            None => {
                // Also wakes the backlight if # is pressed twice in a row.
                pulses.backlight.arm(now_ms);
                info!("Infinite suspension");
                Suspension::Infinite
            }
        };
        self.suspend(next, now_ms, pulses);
    }
}
