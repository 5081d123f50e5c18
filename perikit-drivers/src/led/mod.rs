//! LED backends

mod gpio;
mod pwm;

pub use gpio::GpioLed;
pub use pwm::PwmLed;
