//! I2C master driver
//!
//! Register-style access to targets on a shared bus. Arguments are checked
//! before the bus is touched: 7-bit target address, memory address that fits
//! its width, non-empty data. Each access is bracketed by the backend's
//! `acquire_bus`/`release_bus` hooks.

use perikit_hal::{Error, I2cBackend, MemAddrWidth, MemAddress, Result};

use crate::bus::SelectGuard;
use crate::config::I2cTargetConfig;

/// Highest 7-bit target address
pub const MAX_ADDRESS: u8 = 0x7F;

/// I2C bus master
pub struct I2c<B: I2cBackend> {
    backend: B,
}

impl<B: I2cBackend> I2c<B> {
    pub fn init(mut backend: B) -> Result<Self> {
        backend.init()?;
        Ok(Self { backend })
    }

    pub fn deinit(mut self) -> Result<B> {
        self.backend.deinit()?;
        Ok(self.backend)
    }

    /// Write `data` to the target's memory starting at `mem_address`
    pub async fn mem_write(
        &mut self,
        address: u8,
        mem_address: u16,
        width: MemAddrWidth,
        data: &[u8],
    ) -> Result<()> {
        let mem = check_args(address, mem_address, width, data.len())?;
        let mut guard = SelectGuard::acquire(&mut self.backend, B::acquire_bus, B::release_bus)?;
        let result = guard.bus().mem_write(address, mem, data).await;
        result.inspect_err(|e| warn!("i2c write to {:?}@{:?} failed: {:?}", address, mem, e))
    }

    /// Read `buf.len()` bytes of the target's memory starting at `mem_address`
    pub async fn mem_read(
        &mut self,
        address: u8,
        mem_address: u16,
        width: MemAddrWidth,
        buf: &mut [u8],
    ) -> Result<()> {
        let mem = check_args(address, mem_address, width, buf.len())?;
        let mut guard = SelectGuard::acquire(&mut self.backend, B::acquire_bus, B::release_bus)?;
        let result = guard.bus().mem_read(address, mem, buf).await;
        result.inspect_err(|e| warn!("i2c read from {:?}@{:?} failed: {:?}", address, mem, e))
    }

    /// Check that the target acknowledges within `timeout_ms`
    pub async fn device_ready(&mut self, address: u8, timeout_ms: u32) -> Result<()> {
        if address > MAX_ADDRESS {
            return Err(Error::InvalidArgument);
        }
        let mut guard = SelectGuard::acquire(&mut self.backend, B::acquire_bus, B::release_bus)?;
        let result = guard.bus().device_ready(address, timeout_ms).await;
        result
    }

    /// [`Self::mem_write`] against a configured target
    pub async fn write_register(
        &mut self,
        target: &I2cTargetConfig,
        mem_address: u16,
        data: &[u8],
    ) -> Result<()> {
        self.mem_write(target.address, mem_address, target.mem_addr_width, data)
            .await
    }

    /// [`Self::mem_read`] against a configured target
    pub async fn read_register(
        &mut self,
        target: &I2cTargetConfig,
        mem_address: u16,
        buf: &mut [u8],
    ) -> Result<()> {
        self.mem_read(target.address, mem_address, target.mem_addr_width, buf)
            .await
    }

    /// Borrow the backend
    pub fn backend(&self) -> &B {
        &self.backend
    }
}

fn check_args(
    address: u8,
    mem_address: u16,
    width: MemAddrWidth,
    len: usize,
) -> Result<MemAddress> {
    if address > MAX_ADDRESS || len == 0 {
        return Err(Error::InvalidArgument);
    }
    MemAddress::new(mem_address, width).ok_or(Error::InvalidArgument)
}
