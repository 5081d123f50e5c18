//! LED capability table

use crate::status::{Error, Result};
use crate::tick::Tick;

/// LED backend
///
/// Implementations drive the physical output for one indicator. The generic
/// state machine in `perikit-core` owns the backend and decides when each
/// operation is called.
pub trait LedBackend: Tick {
    /// Configure the output hardware
    fn init(&mut self) -> Result<()>;

    /// Release the output hardware
    fn deinit(&mut self) -> Result<()>;

    /// Drive the LED on (`true`) or off (`false`)
    ///
    /// Active-low wiring is the backend's concern; `on` is always the
    /// logical state.
    fn set_state(&mut self, on: bool) -> Result<()>;

    /// Invert the current physical level
    fn toggle(&mut self) -> Result<()>;

    /// Set the brightness as a percentage (0-100)
    ///
    /// Optional capability. Backends without dimming keep the default,
    /// which reports [`Error::NotSupported`].
    fn set_brightness(&mut self, percent: u8) -> Result<()> {
        let _ = percent;
        Err(Error::NotSupported)
    }
}
