//! UART backends on `embedded-io`
//!
//! Most HALs split a serial port into receive and transmit halves, and the
//! two halves live in different contexts here too:
//!
//! - [`EhUartTx`] is the [`UartBackend`] owned by the generic `Uart` device
//! - [`RxPump`] sits in the receive interrupt (or the poll loop, on ports
//!   without one) and moves whatever the port has ready into the ring
//!   buffer producer
//!
//! ```ignore
//! let (rx_half, tx_half) = serial.split();
//! let (producer, consumer) = ring.split();
//!
//! let mut pump = RxPump::new(rx_half, producer);
//! let mut console = Uart::init(EhUartTx::new(tx_half, clock), consumer)?;
//!
//! // USART2 interrupt
//! pump.pump()?;
//! ```

use embedded_io::{Read, ReadReady, Write};
use perikit_core::ring_buffer::RxProducer;
use perikit_hal::{Error, Result, Tick, UartBackend};

/// Bytes moved per port read while pumping
const PUMP_CHUNK: usize = 32;

/// Transmit half as a UART backend
pub struct EhUartTx<W, C> {
    port: W,
    clock: C,
}

impl<W: Write, C: Tick> EhUartTx<W, C> {
    pub fn new(port: W, clock: C) -> Self {
        Self { port, clock }
    }

    /// Release the port
    pub fn release(self) -> W {
        self.port
    }
}

impl<W, C: Tick> Tick for EhUartTx<W, C> {
    fn now_ms(&self) -> u32 {
        self.clock.now_ms()
    }
}

impl<W: Write, C: Tick> UartBackend for EhUartTx<W, C> {
    fn init(&mut self) -> Result<()> {
        Ok(())
    }

    fn deinit(&mut self) -> Result<()> {
        self.port.flush().map_err(|_| Error::Backend)
    }

    fn transmit(&mut self, data: &[u8]) -> Result<()> {
        self.port.write_all(data).map_err(|_| Error::Backend)
    }
}

/// Receive half feeding a ring buffer
pub struct RxPump<'r, 's, R> {
    port: R,
    rx: RxProducer<'r, 's>,
}

impl<'r, 's, R: Read + ReadReady> RxPump<'r, 's, R> {
    pub fn new(port: R, rx: RxProducer<'r, 's>) -> Self {
        Self { port, rx }
    }

    /// Move every ready byte into the ring
    ///
    /// Returns the number of bytes the ring accepted; the rest are counted
    /// as dropped by the ring. Once the consumer has closed the ring the
    /// port is still drained so its receive flag clears.
    pub fn pump(&mut self) -> Result<usize> {
        let mut chunk = [0u8; PUMP_CHUNK];
        let mut accepted = 0;

        while self.port.read_ready().map_err(|_| Error::Backend)? {
            let n = self.port.read(&mut chunk).map_err(|_| Error::Backend)?;
            if n == 0 {
                break;
            }
            accepted += self.rx.push_block(&chunk[..n]);
        }
        Ok(accepted)
    }

    /// Release the port and the producer
    pub fn release(self) -> (R, RxProducer<'r, 's>) {
        (self.port, self.rx)
    }
}
