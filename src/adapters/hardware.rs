//! Hardware adapter: bridges real peripherals to domain port traits.
//!
//! Owns the gate input, the keypad, the LCD and the three output pins,
//! exposing them through [`SensorPort`], [`KeypadPort`], [`DisplayPort`]
//! and [`SignalPort`]. This is the only module in the system that touches
//! actual hardware.
//!
//! Ports are infallible: a failed bus or pin access is logged and the tick
//! carries on with the last known value. A flaky LCD must never stop the
//! buzzer.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin, PinState};
use embedded_hal::i2c::I2c;
use log::{debug, warn};

use crate::alarm::Key;
use crate::app::ports::{DisplayPort, KeypadPort, SensorPort, SignalPort};
use crate::drivers::keypad::MatrixKeypad;
use crate::drivers::lcd::I2cLcd;
use crate::drivers::reed_switch::DebouncedInput;
use crate::error::{Error, Result};

/// Binary outputs, all active HIGH.
pub struct SignalPins<O> {
    pub buzzer: O,
    pub alarm_led: O,
    pub heartbeat_led: O,
}

/// Concrete adapter that combines all hardware behind port traits.
///
/// `C` is the keypad column type, separate from `O` so the columns can be
/// open-drain while the signal outputs stay push-pull.
pub struct HardwareAdapter<I, O, C, I2C, D> {
    gate: DebouncedInput<I>,
    keypad: MatrixKeypad<I, C>,
    lcd: I2cLcd<I2C, D>,
    signals: SignalPins<O>,
}

impl<I, O, C, I2C, D> HardwareAdapter<I, O, C, I2C, D>
where
    I: InputPin,
    O: OutputPin,
    C: OutputPin,
    I2C: I2c,
    D: DelayNs,
{
    pub fn new(
        gate: DebouncedInput<I>,
        keypad: MatrixKeypad<I, C>,
        lcd: I2cLcd<I2C, D>,
        signals: SignalPins<O>,
    ) -> Self {
        Self {
            gate,
            keypad,
            lcd,
            signals,
        }
    }

    /// Bring up the LCD controller. Called once before the service starts.
    pub fn init(&mut self) -> Result<()> {
        self.lcd.init()
    }
}

fn drive<O: OutputPin>(pin: &mut O, on: bool, name: &str) {
    if let Err(e) = pin.set_state(PinState::from(on)) {
        warn!("HW | {} write failed: {}", name, Error::gpio(e));
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl<I, O, C, I2C, D> SensorPort for HardwareAdapter<I, O, C, I2C, D>
where
    I: InputPin,
    O: OutputPin,
    C: OutputPin,
    I2C: I2c,
    D: DelayNs,
{
    fn gate_open(&mut self, now_ms: u32) -> bool {
        match self.gate.update(now_ms) {
            Ok(open) => open,
            Err(e) => {
                warn!("HW | gate sensor read failed: {}", e);
                self.gate.is_active()
            }
        }
    }
}

// ── KeypadPort implementation ─────────────────────────────────

impl<I, O, C, I2C, D> KeypadPort for HardwareAdapter<I, O, C, I2C, D>
where
    I: InputPin,
    O: OutputPin,
    C: OutputPin,
    I2C: I2c,
    D: DelayNs,
{
    fn poll_key(&mut self, now_ms: u32) -> Option<Key> {
        match self.keypad.poll(now_ms) {
            Ok(Some(c)) => {
                let key = Key::from_char(c);
                if key.is_none() {
                    debug!("HW | ignoring keypad legend {:?}", c);
                }
                key
            }
            Ok(None) => None,
            Err(e) => {
                warn!("HW | keypad scan failed: {}", e);
                None
            }
        }
    }
}

// ── DisplayPort implementation ────────────────────────────────

impl<I, O, C, I2C, D> DisplayPort for HardwareAdapter<I, O, C, I2C, D>
where
    I: InputPin,
    O: OutputPin,
    C: OutputPin,
    I2C: I2c,
    D: DelayNs,
{
    fn render(&mut self, line1: &str, line2: &str) {
        if let Err(e) = self.lcd.render(line1, line2) {
            warn!("HW | LCD write failed: {}", e);
        }
    }

    fn set_backlight(&mut self, on: bool) {
        if let Err(e) = self.lcd.set_backlight(on) {
            warn!("HW | LCD backlight failed: {}", e);
        }
    }
}

// ── SignalPort implementation ─────────────────────────────────

impl<I, O, C, I2C, D> SignalPort for HardwareAdapter<I, O, C, I2C, D>
where
    I: InputPin,
    O: OutputPin,
    C: OutputPin,
    I2C: I2c,
    D: DelayNs,
{
    fn set_buzzer(&mut self, on: bool) {
        drive(&mut self.signals.buzzer, on, "buzzer");
    }

    fn set_alarm_led(&mut self, on: bool) {
        drive(&mut self.signals.alarm_led, on, "alarm LED");
    }

    fn set_heartbeat_led(&mut self, on: bool) {
        drive(&mut self.signals.heartbeat_led, on, "heartbeat LED");
    }
}
