//! Application core. Pure domain logic, zero I/O.
//!
//! This module contains the event loop for the gate alarm: gate latching,
//! keypad suspension, pulse timers, and display refresh. All interaction
//! with hardware happens through **port traits** defined in [`ports`],
//! keeping this layer fully testable without real peripherals.

pub mod events;
pub mod ports;
pub mod service;
