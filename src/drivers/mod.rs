//! Peripheral drivers, generic over `embedded-hal` 1.0 traits.

pub mod keypad;
pub mod lcd;
pub mod reed_switch;
