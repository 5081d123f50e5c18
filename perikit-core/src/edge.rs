//! Edge-interrupt routing
//!
//! Most MCUs fold several GPIO edge sources into one interrupt vector and
//! report the line in a pending mask. [`EdgeLines`] maps each line to the
//! device that owns it, so the vector handler only has to forward the line
//! number:
//!
//! ```ignore
//! static LINES: EdgeLines<'static, 16> = EdgeLines::new();
//!
//! #[interrupt]
//! fn EXTI4_15() {
//!     let pending = exti_pending();
//!     LINES.dispatch_mask(pending);
//!     exti_clear(pending);
//! }
//! ```
//!
//! Slots change under a critical section, so attaching and detaching from
//! the poll loop cannot race the vector.

use core::cell::Cell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use perikit_hal::{Error, Result};

/// Something that reacts to an edge on its line
pub trait EdgeSink {
    /// Called from interrupt context
    fn on_edge(&self);
}

type Slot<'a> = Mutex<CriticalSectionRawMutex, Cell<Option<&'a (dyn EdgeSink + Sync)>>>;

/// Table of `N` edge lines
pub struct EdgeLines<'a, const N: usize> {
    slots: [Slot<'a>; N],
}

impl<'a, const N: usize> EdgeLines<'a, N> {
    /// Create a table with every line detached
    pub const fn new() -> Self {
        Self {
            slots: [const { Mutex::new(Cell::new(None)) }; N],
        }
    }

    /// Route `line` to `sink`
    ///
    /// Fails with [`Error::InvalidArgument`] if the line is out of range or
    /// already attached.
    pub fn attach(&self, line: usize, sink: &'a (dyn EdgeSink + Sync)) -> Result<()> {
        let slot = self.slots.get(line).ok_or(Error::InvalidArgument)?;
        slot.lock(|cell| {
            if cell.get().is_some() {
                return Err(Error::InvalidArgument);
            }
            cell.set(Some(sink));
            Ok(())
        })?;
        debug!("edge line {} attached", line);
        Ok(())
    }

    /// Stop routing `line`
    pub fn detach(&self, line: usize) -> Result<()> {
        let slot = self.slots.get(line).ok_or(Error::InvalidArgument)?;
        slot.lock(|cell| cell.set(None));
        debug!("edge line {} detached", line);
        Ok(())
    }

    pub fn is_attached(&self, line: usize) -> bool {
        self.slots
            .get(line)
            .is_some_and(|slot| slot.lock(|cell| cell.get().is_some()))
    }

    /// Forward an edge on `line`
    ///
    /// Edges on detached or out-of-range lines are ignored.
    pub fn dispatch(&self, line: usize) {
        let Some(slot) = self.slots.get(line) else {
            return;
        };
        if let Some(sink) = slot.lock(|cell| cell.get()) {
            sink.on_edge();
        } else {
            trace!("edge on detached line {}", line);
        }
    }

    /// Forward every line set in a pending mask, lowest first
    pub fn dispatch_mask(&self, mask: u32) {
        let mut pending = mask;
        while pending != 0 {
            let line = pending.trailing_zeros() as usize;
            self.dispatch(line);
            pending &= pending - 1;
        }
    }
}

impl<const N: usize> Default for EdgeLines<'_, N> {
    fn default() -> Self {
        Self::new()
    }
}
