//! UART capability table

use crate::status::Result;
use crate::tick::Tick;

/// UART backend
///
/// Receive is interrupt-driven: the backend's receive interrupt (DMA
/// half/idle completion or similar) pushes each received block into the
/// ring-buffer producer the composition root handed it. Transmit is
/// asynchronous: `transmit` queues the bytes and returns before the last
/// one leaves the wire.
pub trait UartBackend: Tick {
    /// Configure the port and start reception
    fn init(&mut self) -> Result<()>;

    /// Stop reception and release the port
    fn deinit(&mut self) -> Result<()>;

    /// Queue bytes for transmission
    ///
    /// The backend copies what it needs before returning; `data` is not
    /// borrowed beyond the call.
    fn transmit(&mut self, data: &[u8]) -> Result<()>;
}
