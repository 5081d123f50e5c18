//! UART driver
//!
//! Receive path: the backend's receive interrupt pushes whole blocks into an
//! [`RxProducer`], and the poll loop drains the matching [`RxConsumer`]
//! through [`Uart::read`]. Bytes that do not fit are dropped at the producer
//! and counted.
//!
//! ```ignore
//! static RX_STORAGE: RingStorage<256> = RingStorage::new();
//!
//! let mut ring = RingBuffer::new(RX_STORAGE.as_slice())?;
//! let (producer, consumer) = ring.split();
//! let backend = Usart2::new(producer);
//! let mut console = Uart::init(backend, consumer)?;
//!
//! let mut line = [0u8; 64];
//! let n = console.read(&mut line);
//! console.write(&line[..n])?;
//! ```

use perikit_hal::{Error, Result, UartBackend};

use crate::ring_buffer::RxConsumer;

/// UART device
pub struct Uart<'r, 's, B: UartBackend> {
    backend: B,
    rx: RxConsumer<'r, 's>,
}

impl<'r, 's, B: UartBackend> Uart<'r, 's, B> {
    /// Start reception with an empty receive queue
    pub fn init(mut backend: B, mut rx: RxConsumer<'r, 's>) -> Result<Self> {
        rx.clear();
        backend.init()?;
        info!("uart up, rx capacity {}", rx.capacity());
        Ok(Self { backend, rx })
    }

    /// Stop reception and release the backend
    ///
    /// The receive queue is closed first, so a late interrupt can no longer
    /// deliver into it.
    pub fn deinit(mut self) -> Result<B> {
        self.rx.close();
        self.backend.deinit()?;
        Ok(self.backend)
    }

    /// Copy up to `buf.len()` received bytes; returns how many were copied
    pub fn read(&mut self, buf: &mut [u8]) -> usize {
        self.rx.read(buf)
    }

    /// Received bytes waiting to be read
    pub fn bytes_available(&self) -> usize {
        self.rx.available()
    }

    /// Bytes lost to a full receive queue since the ring was split
    pub fn dropped_bytes(&self) -> u32 {
        self.rx.dropped()
    }

    /// Queue `data` for transmission
    pub fn write(&mut self, data: &[u8]) -> Result<()> {
        if data.is_empty() {
            return Err(Error::InvalidArgument);
        }
        self.backend.transmit(data).inspect_err(|e| {
            warn!("uart transmit of {} bytes failed: {:?}", data.len(), e);
        })
    }

    /// Borrow the backend
    pub fn backend(&self) -> &B {
        &self.backend
    }
}
