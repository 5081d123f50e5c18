//! Backend-independent peripheral drivers
//!
//! Device logic that works the same on every MCU, written against the
//! capability traits in `perikit-hal`:
//!
//! - LED modes (on, off, blink, single pulse) advanced by polling
//! - Push button with software debounce and press handlers
//! - Edge-line table routing GPIO interrupts to their devices
//! - UART with an interrupt-fed receive ring buffer
//! - SPI and I2C masters with guaranteed bus release
//! - Transfer completion signal for DMA-driven backends
//! - Configuration type definitions

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

#[macro_use]
mod fmt;

pub mod bus;
pub mod button;
pub mod completion;
pub mod config;
pub mod edge;
pub mod i2c;
pub mod led;
pub mod ring_buffer;
pub mod shared;
pub mod spi;
pub mod uart;

#[cfg(test)]
mod testing;

pub use perikit_hal::{Error, Result, Status};
