//! Bus transaction guard
//!
//! Shared by the SPI and I2C drivers: acquire (chip select or bus lock),
//! run the transfer, and release on every path out, including an early `?`
//! return or a dropped future.

use perikit_hal::Result;

/// Acquire or release step of a bus backend
pub type BusStep<B> = fn(&mut B) -> Result<()>;

/// Holds a bus acquired until dropped
///
/// A release failure cannot be reported from `drop`; it is logged and the
/// transfer's own status wins.
pub struct SelectGuard<'a, B> {
    bus: &'a mut B,
    release: BusStep<B>,
}

impl<'a, B> SelectGuard<'a, B> {
    /// Run `acquire`, then hold the bus until the guard drops
    ///
    /// If `acquire` fails its error is returned and `release` is never
    /// called.
    pub fn acquire(bus: &'a mut B, acquire: BusStep<B>, release: BusStep<B>) -> Result<Self> {
        acquire(&mut *bus)?;
        Ok(Self { bus, release })
    }

    /// Access the acquired bus
    pub fn bus(&mut self) -> &mut B {
        &mut *self.bus
    }
}

impl<B> Drop for SelectGuard<'_, B> {
    fn drop(&mut self) {
        if let Err(e) = (self.release)(&mut *self.bus) {
            warn!("bus release failed: {:?}", e);
        }
    }
}
