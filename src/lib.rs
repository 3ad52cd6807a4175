//! Gate alarm firmware library.
//!
//! Exposes the pure-logic modules for integration testing and the
//! hardware shims the device binary wires together. All ESP-IDF-specific
//! code is guarded by the `espidf` feature within each module; the drivers
//! are generic over `embedded-hal` traits and build on the host.

#![deny(unused_must_use)]

pub mod alarm;
pub mod app;
pub mod config;
pub mod display;
pub mod error;
pub mod pins;
pub mod pulse;

pub mod adapters;
pub mod drivers;
