//! Unified error types for the gate alarm firmware.
//!
//! The alarm core itself is infallible; these errors come from the hardware
//! shims (GPIO, I2C) and from configuration checks. All variants are `Copy`
//! so adapters can log and drop them without allocation.

use core::fmt;

use embedded_hal::{digital, i2c};

/// Every fallible driver or configuration operation funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A GPIO read or write failed.
    Gpio(digital::ErrorKind),
    /// An I2C transaction with the display backpack failed.
    I2c(i2c::ErrorKind),
    /// Configuration is invalid.
    Config(&'static str),
}

impl Error {
    /// Wrap any `embedded-hal` digital pin error.
    pub fn gpio(e: impl digital::Error) -> Self {
        Self::Gpio(e.kind())
    }

    /// Wrap any `embedded-hal` I2C bus error.
    pub fn i2c(e: impl i2c::Error) -> Self {
        Self::I2c(e.kind())
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gpio(kind) => write!(f, "gpio: {kind}"),
            Self::I2c(kind) => write!(f, "i2c: {kind}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl core::error::Error for Error {}

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
