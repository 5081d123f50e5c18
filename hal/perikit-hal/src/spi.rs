//! SPI capability table

use core::future::Future;

use crate::status::Result;
use crate::tick::Tick;

/// SPI master backend
///
/// Chip select is exposed separately from the transfer so the generic
/// transaction wrapper can guarantee the release.
pub trait SpiBackend: Tick {
    /// Configure the bus
    fn init(&mut self) -> Result<()>;

    /// Release the bus
    fn deinit(&mut self) -> Result<()>;

    /// Assert chip select (CS low)
    fn chip_select(&mut self) -> Result<()>;

    /// Release chip select (CS high)
    fn chip_deselect(&mut self) -> Result<()>;

    /// Full-duplex transfer
    ///
    /// Clocks out `tx` while filling `rx`. Both slices have the same,
    /// non-zero length. The future resolves when the transfer has completed
    /// (typically on the DMA completion interrupt).
    fn transceive(&mut self, tx: &[u8], rx: &mut [u8]) -> impl Future<Output = Result<()>>;
}
