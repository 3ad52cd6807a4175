//! System configuration parameters
//!
//! All tunable timings and limits for the gate alarm.
//! Defaults reproduce the behaviour of the shipped device.

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Milliseconds in one minute of suspension.
pub const MILLIS_PER_MINUTE: u32 = 60_000;

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Buzzer ---
    /// Time the buzzer sounds in each alarm cycle (ms)
    pub buzzer_on_ms: u32,
    /// Time the buzzer is silent in each alarm cycle (ms)
    pub buzzer_off_ms: u32,

    // --- LEDs ---
    /// Alarm LED lit time while the gate is open (ms)
    pub alarm_led_on_ms: u32,
    /// Alarm LED dark time while the gate is open (ms)
    pub alarm_led_off_ms: u32,
    /// Heartbeat LED flash length (ms)
    pub heartbeat_on_ms: u32,
    /// Pause between heartbeat flashes (ms)
    pub heartbeat_off_ms: u32,

    // --- Display ---
    /// Backlight stays on this long after the last re-arm (ms)
    pub backlight_timeout_ms: u32,
    /// Minimum time between display text recompositions (ms)
    pub display_refresh_interval_ms: u32,
    /// How long the boot splash screen is held (ms)
    pub splash_duration_ms: u32,
    /// 7-bit I2C address of the LCD backpack
    pub lcd_i2c_address: u8,

    // --- Inputs ---
    /// Stable period before a sensor or key change is accepted (ms)
    pub debounce_ms: u32,

    // --- Suspension ---
    /// Upper bound for a keypad-entered suspension (minutes)
    pub max_suspend_minutes: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Buzzer
            buzzer_on_ms: 1500,
            buzzer_off_ms: 1000,

            // LEDs
            alarm_led_on_ms: 250,
            alarm_led_off_ms: 250,
            heartbeat_on_ms: 100,
            heartbeat_off_ms: 8000,

            // Display
            backlight_timeout_ms: 10_000,
            display_refresh_interval_ms: 250,
            splash_duration_ms: 2000,
            lcd_i2c_address: 0x27,

            // Inputs
            debounce_ms: 50,

            // Suspension
            max_suspend_minutes: 24 * 60, // 24 h
        }
    }
}

impl SystemConfig {
    /// Check that every timing produces a usable pulse and that the longest
    /// suspension still fits the millisecond clock.
    pub fn validate(&self) -> Result<(), Error> {
        let phases = [
            (self.buzzer_on_ms, self.buzzer_off_ms, "buzzer on/off must be non-zero"),
            (self.alarm_led_on_ms, self.alarm_led_off_ms, "alarm LED on/off must be non-zero"),
            (self.heartbeat_on_ms, self.heartbeat_off_ms, "heartbeat on/off must be non-zero"),
        ];
        for (on, off, msg) in phases {
            if on == 0 || off == 0 {
                return Err(Error::Config(msg));
            }
        }

        if self.max_suspend_minutes == 0 {
            return Err(Error::Config("max suspension must be at least one minute"));
        }
        // Wrap-safe elapsed comparisons need the duration below half the clock range.
        match self.max_suspend_minutes.checked_mul(MILLIS_PER_MINUTE) {
            Some(ms) if ms < u32::MAX / 2 => {}
            _ => return Err(Error::Config("max suspension exceeds clock range")),
        }

        if self.lcd_i2c_address > 0x7F {
            return Err(Error::Config("LCD address must be a 7-bit I2C address"));
        }
        Ok(())
    }
}
