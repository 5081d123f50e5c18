//! Peripheral configuration types
//!
//! Plain `Copy` values a board description builds once and hands to the
//! drivers. With the `serde` feature they can be loaded from a stored
//! configuration as well.

use perikit_hal::{Error, MemAddrWidth, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::button::DEFAULT_DEBOUNCE_MS;
use crate::i2c::MAX_ADDRESS;
use crate::led::LedMode;

/// Edge lines addressable through a 32-bit pending mask
pub const MAX_EDGE_LINES: u8 = 32;

/// Pin configuration with optional inversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PinConfig {
    /// GPIO pin number
    pub pin: u8,
    /// Pin is active-low (inverted)
    pub active_low: bool,
}

impl PinConfig {
    /// Create an active-high pin
    pub const fn new(pin: u8) -> Self {
        Self {
            pin,
            active_low: false,
        }
    }

    /// Create an active-low pin
    pub const fn active_low(pin: u8) -> Self {
        Self {
            pin,
            active_low: true,
        }
    }

    /// Electrical level that means "asserted"
    pub const fn asserted_level(&self) -> bool {
        !self.active_low
    }
}

/// LED configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LedConfig {
    pub pin: PinConfig,
    /// Mode entered right after init
    pub startup: LedMode,
}

impl LedConfig {
    pub const fn new(pin: PinConfig, startup: LedMode) -> Self {
        Self { pin, startup }
    }

    /// Reject timed modes with a zero-length phase
    pub fn validate(&self) -> Result<()> {
        match self.startup {
            LedMode::Blink { on_ms, off_ms } if on_ms == 0 || off_ms == 0 => {
                Err(Error::InvalidArgument)
            }
            LedMode::PulseOnce { duration_ms: 0 } => Err(Error::InvalidArgument),
            _ => Ok(()),
        }
    }
}

/// Button configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ButtonConfig {
    /// Edge line the button's interrupt is routed on
    pub line: u8,
    pub debounce_window_ms: u32,
}

impl ButtonConfig {
    /// Button on `line` with the default debounce window
    pub const fn new(line: u8) -> Self {
        Self {
            line,
            debounce_window_ms: DEFAULT_DEBOUNCE_MS,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.line >= MAX_EDGE_LINES {
            return Err(Error::InvalidArgument);
        }
        Ok(())
    }
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self::new(0)
    }
}

/// Addressing of one I2C target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct I2cTargetConfig {
    /// 7-bit target address
    pub address: u8,
    pub mem_addr_width: MemAddrWidth,
}

impl I2cTargetConfig {
    pub const fn new(address: u8, mem_addr_width: MemAddrWidth) -> Self {
        Self {
            address,
            mem_addr_width,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.address > MAX_ADDRESS {
            return Err(Error::InvalidArgument);
        }
        Ok(())
    }
}

/// SPI device configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SpiConfig {
    /// Chip select pin; usually active-low
    pub cs: PinConfig,
}

impl SpiConfig {
    pub const fn new(cs: PinConfig) -> Self {
        Self { cs }
    }

    pub fn validate(&self) -> Result<()> {
        Ok(())
    }
}
