//! SPI master driver
//!
//! Every transfer runs inside a chip-select bracket: select, transfer,
//! deselect. Deselect happens on every path out once select has succeeded;
//! if select itself fails, nothing is transferred and deselect is not
//! attempted.
//!
//! Write-only and read-only helpers use a per-device scratch buffer for the
//! unused direction, which caps them at [`SCRATCH_LEN`] bytes. Use
//! [`Spi::transceive`] with caller buffers for longer transfers.

use perikit_hal::{Error, Result, SpiBackend};

use crate::bus::SelectGuard;

/// Scratch size for the one-directional helpers
pub const SCRATCH_LEN: usize = 256;

/// Byte clocked out while reading
pub const READ_FILL: u8 = 0xFF;

/// SPI device on a dedicated chip select
pub struct Spi<B: SpiBackend> {
    backend: B,
    scratch: [u8; SCRATCH_LEN],
}

impl<B: SpiBackend> Spi<B> {
    /// Configure the bus; chip select starts released
    pub fn init(mut backend: B) -> Result<Self> {
        backend.init()?;
        Ok(Self {
            backend,
            scratch: [0; SCRATCH_LEN],
        })
    }

    /// Release chip select and the bus
    pub fn deinit(mut self) -> Result<B> {
        if let Err(e) = self.backend.chip_deselect() {
            warn!("spi deselect before deinit failed: {:?}", e);
        }
        self.backend.deinit()?;
        Ok(self.backend)
    }

    /// Full-duplex transfer of equal-length, non-empty buffers
    pub async fn transceive(&mut self, tx: &[u8], rx: &mut [u8]) -> Result<()> {
        if tx.is_empty() || tx.len() != rx.len() {
            return Err(Error::InvalidArgument);
        }
        transaction(&mut self.backend, tx, rx).await
    }

    /// Send `tx`, discarding what comes back
    pub async fn write(&mut self, tx: &[u8]) -> Result<()> {
        if tx.is_empty() || tx.len() > SCRATCH_LEN {
            return Err(Error::InvalidArgument);
        }
        let discard = &mut self.scratch[..tx.len()];
        transaction(&mut self.backend, tx, discard).await
    }

    /// Fill `rx` while clocking out [`READ_FILL`]
    pub async fn read(&mut self, rx: &mut [u8]) -> Result<()> {
        if rx.is_empty() || rx.len() > SCRATCH_LEN {
            return Err(Error::InvalidArgument);
        }
        let fill = &mut self.scratch[..rx.len()];
        fill.fill(READ_FILL);
        transaction(&mut self.backend, fill, rx).await
    }

    /// Borrow the backend
    pub fn backend(&self) -> &B {
        &self.backend
    }
}

async fn transaction<B: SpiBackend>(backend: &mut B, tx: &[u8], rx: &mut [u8]) -> Result<()> {
    let mut guard = SelectGuard::acquire(backend, B::chip_select, B::chip_deselect)?;
    let result = guard.bus().transceive(tx, rx).await;
    if let Err(e) = result {
        warn!("spi transfer of {} bytes failed: {:?}", tx.len(), e);
    }
    result
}
