//! PWM LED backend
//!
//! Dimmable LED on an `embedded_hal::pwm::SetDutyCycle` channel. Brightness
//! is remembered while the LED is dark and applied the next time it lights.

use embedded_hal::pwm::SetDutyCycle;
use perikit_hal::{Error, LedBackend, Result, Tick};

/// LED on a PWM channel
pub struct PwmLed<P, C> {
    pwm: P,
    clock: C,
    /// Brightness used while lit (0-100%)
    brightness: u8,
    lit: bool,
}

impl<P: SetDutyCycle, C: Tick> PwmLed<P, C> {
    /// Create a new PWM LED at full brightness
    pub fn new(pwm: P, clock: C) -> Self {
        Self {
            pwm,
            clock,
            brightness: 100,
            lit: false,
        }
    }

    /// Brightness used while lit
    pub fn brightness(&self) -> u8 {
        self.brightness
    }

    /// Release the PWM channel
    pub fn release(self) -> P {
        self.pwm
    }

    fn drive(&mut self, lit: bool) -> Result<()> {
        let result = if lit {
            self.pwm.set_duty_cycle_percent(self.brightness)
        } else {
            self.pwm.set_duty_cycle_fully_off()
        };
        result.map_err(|_| Error::Backend)?;
        self.lit = lit;
        Ok(())
    }
}

impl<P, C: Tick> Tick for PwmLed<P, C> {
    fn now_ms(&self) -> u32 {
        self.clock.now_ms()
    }
}

impl<P: SetDutyCycle, C: Tick> LedBackend for PwmLed<P, C> {
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

    fn set_brightness(&mut self, percent: u8) -> Result<()> {
        if percent > 100 {
            return Err(Error::InvalidArgument);
        }
        self.brightness = percent;
        if self.lit {
            self.drive(true)?;
        }
        Ok(())
    }
}
