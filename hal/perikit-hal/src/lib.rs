//! perikit capability tables
//!
//! This crate defines the contract every platform backend implements so the
//! generic drivers in `perikit-core` can run unmodified on any chip.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application / composition root         │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  perikit-core (generic drivers)         │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  perikit-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ perikit-      │       │ chip-specific │
//! │   drivers     │       │   backends    │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`tick::Tick`] - Monotonic millisecond clock
//! - [`led::LedBackend`] - Digital or dimmable indicator
//! - [`button::ButtonBackend`] - Edge-interrupt push button
//! - [`uart::UartBackend`] - Serial port with interrupt-driven receive
//! - [`i2c::I2cBackend`] - I2C master with register-style addressing
//! - [`spi::SpiBackend`] - SPI master with chip select
//!
//! Every operation reports failure through [`status::Error`].

#![no_std]
#![deny(unsafe_code)]

pub mod button;
pub mod i2c;
pub mod led;
pub mod spi;
pub mod status;
pub mod tick;
pub mod uart;

// Re-export key traits at crate root for convenience
pub use button::ButtonBackend;
pub use i2c::{I2cBackend, MemAddrWidth, MemAddress};
pub use led::LedBackend;
pub use spi::SpiBackend;
pub use status::{Error, Result, Status};
pub use tick::Tick;
pub use uart::UartBackend;
