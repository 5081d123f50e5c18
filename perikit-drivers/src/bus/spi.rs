//! SPI backend on `embedded-hal-async`
//!
//! Owns the whole bus plus one chip-select pin. For several devices on one
//! bus, give each a bus handle from a bus-sharing crate.

use embedded_hal::digital::OutputPin;
use embedded_hal_async::spi::SpiBus;
use perikit_core::config::SpiConfig;
use perikit_hal::{Error, Result, SpiBackend, Tick};

/// SPI master with a GPIO chip select
pub struct EhSpi<S, CS, C> {
    bus: S,
    cs: CS,
    clock: C,
    /// Chip select asserted = pin LOW (the usual wiring)
    cs_active_low: bool,
}

impl<S, CS, C> EhSpi<S, CS, C>
where
    S: SpiBus,
    CS: OutputPin,
    C: Tick,
{
    /// Create a backend with an active-low chip select
    pub fn new(bus: S, cs: CS, clock: C) -> Self {
        Self {
            bus,
            cs,
            clock,
            cs_active_low: true,
        }
    }

    /// Create a backend with the chip-select polarity from `config`
    pub fn from_config(bus: S, cs: CS, clock: C, config: &SpiConfig) -> Self {
        Self {
            bus,
            cs,
            clock,
            cs_active_low: config.cs.active_low,
        }
    }

    /// Release the bus and the chip-select pin
    pub fn release(self) -> (S, CS) {
        (self.bus, self.cs)
    }

    fn drive_cs(&mut self, asserted: bool) -> Result<()> {
        let result = if asserted != self.cs_active_low {
            self.cs.set_high()
        } else {
            self.cs.set_low()
        };
        result.map_err(|_| Error::Backend)
    }
}

impl<S, CS, C: Tick> Tick for EhSpi<S, CS, C> {
    fn now_ms(&self) -> u32 {
        self.clock.now_ms()
    }
}

impl<S, CS, C> SpiBackend for EhSpi<S, CS, C>
where
    S: SpiBus,
    CS: OutputPin,
    C: Tick,
{
    fn init(&mut self) -> Result<()> {
        self.drive_cs(false)
    }

    fn deinit(&mut self) -> Result<()> {
        self.drive_cs(false)
    }

    fn chip_select(&mut self) -> Result<()> {
        self.drive_cs(true)
    }

    fn chip_deselect(&mut self) -> Result<()> {
        self.drive_cs(false)
    }

    async fn transceive(&mut self, tx: &[u8], rx: &mut [u8]) -> Result<()> {
        self.bus
            .transfer(rx, tx)
            .await
            .map_err(|_| Error::Backend)?;
        // Chip select must not rise before the last byte has left
        self.bus.flush().await.map_err(|_| Error::Backend)
    }
}
