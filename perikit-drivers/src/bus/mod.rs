//! Bus backends

mod i2c;
mod spi;

pub use i2c::EhI2c;
pub use spi::EhSpi;
