//! Button capability table

use crate::status::Result;
use crate::tick::Tick;

/// Push-button backend
///
/// `init` arms the edge interrupt for the button's line and `deinit`
/// disarms it. Edge delivery itself goes through the composition root's
/// edge-line table, so the backend never holds a pointer back into the
/// generic driver.
pub trait ButtonBackend: Tick {
    /// Configure the input and arm its edge interrupt
    fn init(&mut self) -> Result<()>;

    /// Disarm the interrupt and release the input
    fn deinit(&mut self) -> Result<()>;
}
