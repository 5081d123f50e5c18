//! Interrupt-shareable device slot
//!
//! A [`Shared`] cell lets the composition root hand the same device to the
//! poll loop and to an interrupt handler. Access runs inside a critical
//! section, which on a single core just masks interrupts for the duration of
//! the closure, so closures must stay short.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;

/// Critical-section protected cell
///
/// ```ignore
/// static BUTTON: Shared<Option<Button<'static, Key0>>> = Shared::new(None);
///
/// BUTTON.replace(Button::init(key0)?);
/// ```
pub struct Shared<T> {
    inner: Mutex<CriticalSectionRawMutex, RefCell<T>>,
}

impl<T> Shared<T> {
    /// Create a new cell (usable in a `static`)
    pub const fn new(value: T) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(value)),
        }
    }

    /// Run `f` with exclusive access to the value
    ///
    /// `f` must not re-enter the same cell (for example from a button press
    /// handler that touches its own button slot); that is a borrow error and
    /// panics.
    pub fn lock<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        self.inner.lock(|cell| f(&mut cell.borrow_mut()))
    }

    /// Consume the cell and return the value
    pub fn into_inner(self) -> T {
        self.inner.into_inner().into_inner()
    }
}

impl<T> Shared<Option<T>> {
    /// Store a device in the slot, returning the previous one
    pub fn replace(&self, value: T) -> Option<T> {
        self.lock(|slot| slot.replace(value))
    }

    /// Empty the slot, returning its device
    pub fn take(&self) -> Option<T> {
        self.lock(|slot| slot.take())
    }

    /// Check if the slot holds a device
    pub fn is_occupied(&self) -> bool {
        self.lock(|slot| slot.is_some())
    }
}
