//! GPIO LED backend
//!
//! On/off LED on any `embedded_hal::digital::OutputPin`, directly or through
//! a transistor. The pin can be active-high (default) or active-low.

use embedded_hal::digital::OutputPin;
use perikit_core::config::PinConfig;
use perikit_hal::{Error, LedBackend, Result, Tick};

/// LED on a GPIO output
pub struct GpioLed<P, C> {
    pin: P,
    clock: C,
    /// If true, LED lit = pin LOW
    active_low: bool,
    /// Current logical state (true = lit)
    lit: bool,
}

impl<P: OutputPin, C: Tick> GpioLed<P, C> {
    /// Create a new GPIO LED
    ///
    /// The pin is not driven until `init`.
    pub fn new(pin: P, clock: C, active_low: bool) -> Self {
        Self {
            pin,
            clock,
            active_low,
            lit: false,
        }
    }

    /// Create a GPIO LED with the polarity from `config`
    pub fn from_config(pin: P, clock: C, config: &PinConfig) -> Self {
        Self::new(pin, clock, config.active_low)
    }

    /// Release the pin
    pub fn release(self) -> P {
        self.pin
    }

    fn drive(&mut self, lit: bool) -> Result<()> {
        // lit=true, active_low=false -> high; lit=true, active_low=true -> low
        let result = if lit != self.active_low {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        result.map_err(|_| Error::Backend)?;
        self.lit = lit;
        Ok(())
    }
}

impl<P, C: Tick> Tick for GpioLed<P, C> {
    fn now_ms(&self) -> u32 {
        self.clock.now_ms()
    }
}

impl<P: OutputPin, C: Tick> LedBackend for GpioLed<P, C> {
    fn init(&mut self) -> Result<()> {
        self.drive(false)
    }

    fn deinit(&mut self) -> Result<()> {
        self.drive(false)
    }

    fn set_state(&mut self, on: bool) -> Result<()> {
        self.drive(on)
    }

    fn toggle(&mut self) -> Result<()> {
        self.drive(!self.lit)
    }
}
