//! I2C capability table

use core::future::Future;

use crate::status::Result;
use crate::tick::Tick;

/// Width of a target's internal register/memory address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MemAddrWidth {
    /// One address byte (most sensors, small EEPROMs)
    #[default]
    Bits8,
    /// Two address bytes, big-endian (larger EEPROMs)
    Bits16,
}

impl MemAddrWidth {
    /// Number of address bytes on the wire
    pub fn byte_count(self) -> usize {
        match self {
            MemAddrWidth::Bits8 => 1,
            MemAddrWidth::Bits16 => 2,
        }
    }
}

/// Internal memory address of an I2C target, with its width
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MemAddress {
    address: u16,
    width: MemAddrWidth,
}

impl MemAddress {
    /// Create a memory address
    ///
    /// Returns `None` if `address` does not fit in `width`.
    pub const fn new(address: u16, width: MemAddrWidth) -> Option<Self> {
        match width {
            MemAddrWidth::Bits8 if address > 0xFF => None,
            _ => Some(Self { address, width }),
        }
    }

    /// Single-byte address
    pub const fn byte(address: u8) -> Self {
        Self {
            address: address as u16,
            width: MemAddrWidth::Bits8,
        }
    }

    /// Two-byte address
    pub const fn word(address: u16) -> Self {
        Self {
            address,
            width: MemAddrWidth::Bits16,
        }
    }

    pub fn address(&self) -> u16 {
        self.address
    }

    pub fn width(&self) -> MemAddrWidth {
        self.width
    }

    /// Encode the address as it goes on the wire (MSB first)
    ///
    /// Returns the buffer and the number of valid leading bytes.
    pub fn to_bytes(&self) -> ([u8; 2], usize) {
        match self.width {
            MemAddrWidth::Bits8 => ([self.address as u8, 0], 1),
            MemAddrWidth::Bits16 => (self.address.to_be_bytes(), 2),
        }
    }
}

/// I2C master backend
///
/// Addresses are 7-bit. Transfers are register-style: the memory address is
/// written first, then data is written or read in the same transaction.
pub trait I2cBackend: Tick {
    /// Configure the bus
    fn init(&mut self) -> Result<()>;

    /// Release the bus
    fn deinit(&mut self) -> Result<()>;

    /// Write `data` starting at `mem` in the target at `address`
    fn mem_write(
        &mut self,
        address: u8,
        mem: MemAddress,
        data: &[u8],
    ) -> impl Future<Output = Result<()>>;

    /// Read into `buf` starting at `mem` in the target at `address`
    fn mem_read(
        &mut self,
        address: u8,
        mem: MemAddress,
        buf: &mut [u8],
    ) -> impl Future<Output = Result<()>>;

    /// Probe whether the target acknowledges within `timeout_ms`
    fn device_ready(&mut self, address: u8, timeout_ms: u32) -> impl Future<Output = Result<()>>;

    /// Claim the bus before a transaction
    ///
    /// Optional hook for shared-bus arbiters or multiplexers; the default
    /// does nothing.
    fn acquire_bus(&mut self) -> Result<()> {
        Ok(())
    }

    /// Give the bus back after a transaction
    fn release_bus(&mut self) -> Result<()> {
        Ok(())
    }
}
