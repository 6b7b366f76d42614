//! This is a platform-agnostic Rust driver for the TE Connectivity HTU31D digital relative
//! humidity and temperature sensor, built on the [`embedded-hal`] traits.
//!
//! [`embedded-hal`]: https://github.com/rust-embedded/embedded-hal/tree/master/embedded-hal
//!
//! This driver allows you to:
//! - Trigger a conversion and read temperature and relative humidity, or humidity alone.
//! - Select the humidity and temperature oversampling ratios.
//! - Enable/disable the heater.
//! - Trigger a software reset.
//! - Read the device serial number.
//! - Read the diagnostic register.
//! - Read and write raw registers.
//!
//! Every data word the device returns carries a CRC-8, which is checked before the value is
//! handed out.
//!
//! ## Features
//!
//! - `defmt`: Enables logging using the `defmt` framework.
//! - `log`: Enables logging using the `log` framework.
//!
//! ## The device
//!
//! The HTU31D is a digital humidity sensor with temperature output.  It runs from 3.0 V to
//! 5.5 V, measures relative humidity from 0 to 100 %RH and temperature from -40 °C to 125 °C,
//! and answers on one of two I²C addresses selected by its ADDR pin.  Each conversion measures
//! both quantities; the oversampling ratio of each channel trades noise for conversion time.
//!
//! Datasheet: [HTU31D](https://www.te.com/usa-en/product-CAT-HSC0007.html)
//!
//! To use this driver, import this crate and an `embedded_hal` implementation, then
//! instantiate the device.
//!
//! ## Example:
//!
//! ```ignore
//! use htu31d::{AddrPin, Htu31d, HumidityOsr, I2cInterface, TemperatureOsr};
//!
//! // Platform-specific
//! let i2c = /* embedded_hal::i2c::I2c instance */;
//! let delay = /* embedded_hal::delay::DelayNs instance */;
//!
//! let mut htu31d = Htu31d::new(I2cInterface::new(i2c), delay, AddrPin::Low);
//! htu31d.init()?;
//! htu31d.set_humidity_osr(HumidityOsr::VeryHigh)?;
//! htu31d.set_temperature_osr(TemperatureOsr::VeryHigh)?;
//! htu31d.heater_off()?;
//!
//! println!("serial number {}", htu31d.get_serial_number()?);
//!
//! let reading = htu31d.read_temperature_humidity()?;
//! println!("{:0.1} %RH, {:0.1} °C", reading.humidity_percent, reading.centigrade);
//!
//! htu31d.deinit()?;
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![cfg_attr(not(test), no_std)]

#[cfg(all(feature = "defmt", feature = "log"))]
compile_error!("Features \"defmt\" and \"log\" are mutually exclusive and cannot be enabled together");

pub mod checksum;
mod device_impl;
mod hw_def;
mod interface;
mod types;

pub use crate::{hw_def::*, interface::*, types::*};
