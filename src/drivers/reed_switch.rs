//! Debounced digital input for the gate reed switch.
//!
//! ## Hardware
//!
//! Magnetic reed switch on the gate post with a momentary test button in
//! parallel, both pulling the input LOW against the pull-up when the gate
//! is open (or the button is held). Either one reads as "gate open".
//!
//! ## Debounce
//!
//! A new raw level must be seen unchanged for `debounce_ms` before it
//! replaces the stable level. `update()` is called once per loop tick with
//! the tick's timestamp.

use embedded_hal::digital::InputPin;

use crate::error::{Error, Result};

pub struct DebouncedInput<P> {
    pin: P,
    active_low: bool,
    debounce_ms: u32,
    stable: bool,
    candidate: bool,
    candidate_since_ms: u32,
}

impl<P: InputPin> DebouncedInput<P> {
    /// Wrap `pin`. The stable level starts inactive.
    pub fn new(pin: P, active_low: bool, debounce_ms: u32) -> Self {
        Self {
            pin,
            active_low,
            debounce_ms,
            stable: false,
            candidate: false,
            candidate_since_ms: 0,
        }
    }

    /// Sample the pin and return the debounced active state.
    pub fn update(&mut self, now_ms: u32) -> Result<bool> {
        let raw = if self.active_low {
            self.pin.is_low()
        } else {
            self.pin.is_high()
        }
        .map_err(Error::gpio)?;

        if raw != self.candidate {
            self.candidate = raw;
            self.candidate_since_ms = now_ms;
        } else if raw != self.stable
            && now_ms.wrapping_sub(self.candidate_since_ms) >= self.debounce_ms
        {
            self.stable = raw;
        }
        Ok(self.stable)
    }

    /// Last debounced state without sampling.
    pub fn is_active(&self) -> bool {
        self.stable
    }
}
