//! LED driver
//!
//! Drives one indicator through any [`LedBackend`]. Static modes (on/off) are
//! written immediately; timed modes (blink, single pulse) advance when the
//! poll loop calls [`Led::poll`].
//!
//! # Usage
//!
//! ```ignore
//! let mut status = Led::init(board_led)?;
//! status.set_blink(500, 500)?;
//!
//! loop {
//!     status.poll()?;
//! }
//! ```
//!
//! `poll` has to run at least once per shortest configured interval for the
//! timing to hold; a late poll stretches the current phase, it never skips
//! one.

use perikit_hal::tick::elapsed_ms;
use perikit_hal::{Error, LedBackend, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// LED operating mode
///
/// Parameters live in the variant that uses them, so only the active mode's
/// timing exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LedMode {
    /// Constantly off
    #[default]
    Off,
    /// Constantly on
    On,
    /// Alternate between lit and dark
    Blink { on_ms: u32, off_ms: u32 },
    /// Light once, then fall back to `Off`
    PulseOnce { duration_ms: u32 },
}

impl LedMode {
    /// Check if the mode needs periodic polling
    pub fn is_timed(&self) -> bool {
        matches!(self, LedMode::Blink { .. } | LedMode::PulseOnce { .. })
    }
}

/// LED device
pub struct Led<B: LedBackend> {
    backend: B,
    mode: LedMode,
    /// Tick of the last level change in a timed mode
    last_event_time: u32,
    /// Cached physical level
    is_on: bool,
}

impl<B: LedBackend> Led<B> {
    /// Initialize the backend and start in `Off`
    ///
    /// Backend failures are returned unchanged.
    pub fn init(mut backend: B) -> Result<Self> {
        backend.init()?;

        let mut led = Self {
            backend,
            mode: LedMode::Off,
            last_event_time: 0,
            is_on: false,
        };
        led.set_off()?;
        debug!("led initialized");
        Ok(led)
    }

    /// Switch the LED off and release the backend
    pub fn deinit(mut self) -> Result<B> {
        if let Err(e) = self.set_off() {
            warn!("led off before deinit failed: {:?}", e);
        }
        self.backend.deinit()?;
        Ok(self.backend)
    }

    /// Constantly on; cancels any timed mode
    pub fn set_on(&mut self) -> Result<()> {
        self.mode = LedMode::On;
        self.write(true)
    }

    /// Constantly off; cancels any timed mode
    pub fn set_off(&mut self) -> Result<()> {
        self.mode = LedMode::Off;
        self.write(false)
    }

    /// Start blinking, beginning with the lit phase
    pub fn set_blink(&mut self, on_ms: u32, off_ms: u32) -> Result<()> {
        self.mode = LedMode::Blink { on_ms, off_ms };
        debug!("led blink {}/{} ms", on_ms, off_ms);
        self.last_event_time = self.backend.now_ms();
        self.write(true)
    }

    /// Light for `duration_ms`, then turn off
    ///
    /// Retriggering while a pulse is running restarts it.
    pub fn trigger_pulse(&mut self, duration_ms: u32) -> Result<()> {
        self.mode = LedMode::PulseOnce { duration_ms };
        self.last_event_time = self.backend.now_ms();
        self.write(true)
    }

    /// Enter `mode` (e.g. a configured startup mode)
    pub fn apply(&mut self, mode: LedMode) -> Result<()> {
        match mode {
            LedMode::Off => self.set_off(),
            LedMode::On => self.set_on(),
            LedMode::Blink { on_ms, off_ms } => self.set_blink(on_ms, off_ms),
            LedMode::PulseOnce { duration_ms } => self.trigger_pulse(duration_ms),
        }
    }

    /// Advance timed modes
    ///
    /// Static modes ignore the call.
    pub fn poll(&mut self) -> Result<()> {
        match self.mode {
            LedMode::Blink { on_ms, off_ms } => {
                let now = self.backend.now_ms();
                let interval = if self.is_on { on_ms } else { off_ms };

                if elapsed_ms(now, self.last_event_time) >= interval {
                    self.is_on = !self.is_on;
                    self.last_event_time = now;
                    return self.backend.toggle();
                }
            }
            LedMode::PulseOnce { duration_ms } => {
                let now = self.backend.now_ms();
                if elapsed_ms(now, self.last_event_time) >= duration_ms {
                    return self.set_off();
                }
            }
            LedMode::On | LedMode::Off => {}
        }
        Ok(())
    }

    /// Set brightness (0-100%)
    ///
    /// Returns [`Error::NotSupported`] when the backend cannot dim.
    pub fn set_brightness(&mut self, percent: u8) -> Result<()> {
        if percent > 100 {
            return Err(Error::InvalidArgument);
        }
        self.backend.set_brightness(percent)
    }

    /// Current mode
    pub fn mode(&self) -> LedMode {
        self.mode
    }

    /// Whether the LED is currently lit
    pub fn is_on(&self) -> bool {
        self.is_on
    }

    /// Borrow the backend
    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn write(&mut self, on: bool) -> Result<()> {
        self.is_on = on;
        self.backend.set_state(on)
    }
}
