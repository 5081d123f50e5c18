//! I2C backend on `embedded-hal-async`
//!
//! Register access follows the common EEPROM/sensor convention: the memory
//! address goes out first (MSB first for 16-bit addresses), then data is
//! written or read in the same transaction with a repeated start.

use embedded_hal::i2c::Operation;
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::I2c;
use perikit_hal::tick::elapsed_ms;
use perikit_hal::{Error, I2cBackend, MemAddress, Result, Tick};

/// Pause between readiness probes
const PROBE_INTERVAL_MS: u32 = 1;

/// I2C master on an async bus
///
/// The delay is only used to pace [`I2cBackend::device_ready`] probes.
pub struct EhI2c<I, D, C> {
    i2c: I,
    delay: D,
    clock: C,
}

impl<I, D, C> EhI2c<I, D, C>
where
    I: I2c,
    D: DelayNs,
    C: Tick,
{
    pub fn new(i2c: I, delay: D, clock: C) -> Self {
        Self { i2c, delay, clock }
    }

    /// Release the bus
    pub fn release(self) -> I {
        self.i2c
    }
}

impl<I, D, C: Tick> Tick for EhI2c<I, D, C> {
    fn now_ms(&self) -> u32 {
        self.clock.now_ms()
    }
}

impl<I, D, C> I2cBackend for EhI2c<I, D, C>
where
    I: I2c,
    D: DelayNs,
    C: Tick,
{
    fn init(&mut self) -> Result<()> {
        Ok(())
    }

    fn deinit(&mut self) -> Result<()> {
        Ok(())
    }

    async fn mem_write(&mut self, address: u8, mem: MemAddress, data: &[u8]) -> Result<()> {
        let (bytes, len) = mem.to_bytes();
        let mut ops = [Operation::Write(&bytes[..len]), Operation::Write(data)];
        self.i2c
            .transaction(address, &mut ops)
            .await
            .map_err(|_| Error::Backend)
    }

    async fn mem_read(&mut self, address: u8, mem: MemAddress, buf: &mut [u8]) -> Result<()> {
        let (bytes, len) = mem.to_bytes();
        self.i2c
            .write_read(address, &bytes[..len], buf)
            .await
            .map_err(|_| Error::Backend)
    }

    async fn device_ready(&mut self, address: u8, timeout_ms: u32) -> Result<()> {
        let start = self.clock.now_ms();
        loop {
            // Empty write: address phase only
            if self.i2c.write(address, &[]).await.is_ok() {
                return Ok(());
            }
            if elapsed_ms(self.clock.now_ms(), start) >= timeout_ms {
                return Err(Error::Backend);
            }
            self.delay.delay_ms(PROBE_INTERVAL_MS).await;
        }
    }
}
