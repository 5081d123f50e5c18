//! Transfer completion signal
//!
//! Asynchronous backends (DMA, interrupt-driven I2C) start a transfer, then
//! wait here until their completion interrupt reports the outcome. The
//! waiting task sleeps instead of spinning on a flag.
//!
//! ```ignore
//! static TX_DONE: Completion = Completion::new();
//!
//! #[interrupt]
//! fn DMA1_CH2_3() {
//!     TX_DONE.complete(dma_status());
//! }
//!
//! async fn transceive(&mut self, tx: &[u8], rx: &mut [u8]) -> Result<()> {
//!     TX_DONE.reset();
//!     self.start_dma(tx, rx)?;
//!     TX_DONE.wait().await
//! }
//! ```

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use perikit_hal::Result;

/// One-shot completion flag carrying the transfer outcome
pub struct Completion {
    signal: Signal<CriticalSectionRawMutex, Result<()>>,
}

impl Completion {
    pub const fn new() -> Self {
        Self {
            signal: Signal::new(),
        }
    }

    /// Report the outcome (interrupt side)
    ///
    /// A second report before anyone waits overwrites the first.
    pub fn complete(&self, result: Result<()>) {
        self.signal.signal(result);
    }

    /// Wait for the outcome and consume it
    pub async fn wait(&self) -> Result<()> {
        self.signal.wait().await
    }

    /// Take the outcome if it has already arrived
    pub fn try_take(&self) -> Option<Result<()>> {
        self.signal.try_take()
    }

    /// Check for a pending outcome without consuming it
    pub fn is_complete(&self) -> bool {
        self.signal.signaled()
    }

    /// Forget any stale outcome before starting a new transfer
    pub fn reset(&self) {
        self.signal.reset();
    }
}

impl Default for Completion {
    fn default() -> Self {
        Self::new()
    }
}
