//! embedded-hal backends
//!
//! This crate implements the perikit capability traits on top of the
//! `embedded-hal` 1.0, `embedded-hal-async` and `embedded-io` traits, so
//! any HAL that provides those gets working backends without extra glue:
//!
//! - LEDs on a plain GPIO output or a PWM channel
//! - SPI master on an async bus plus a chip-select pin
//! - I2C master on an async bus with register-style addressing
//! - UART on an `embedded-io` serial port, with a receive pump for the
//!   interrupt side
//!
//! Every backend also takes a millisecond clock implementing
//! [`perikit_hal::Tick`]; a `Fn() -> u32` closure over the platform tick
//! counter is enough.

#![no_std]
#![deny(unsafe_code)]

pub mod bus;
pub mod led;
pub mod uart;
