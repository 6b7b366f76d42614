use crate::hw_def::*;

use core::fmt;

#[cfg(feature = "defmt")]
use defmt::Format;

/// HTU31D device driver
#[derive(Debug)]
pub struct Htu31d<IFACE, Delay> {
    pub(crate) iface: IFACE,
    pub(crate) delay: Delay,
    pub(crate) addr_pin: AddrPin,
    pub(crate) initialized: bool,
    pub(crate) humidity_osr: HumidityOsr,
    pub(crate) temperature_osr: TemperatureOsr,
}

/// All possible errors in this crate
#[cfg_attr(feature = "defmt", derive(Format))]
#[derive(Debug, PartialEq, Eq)]
pub enum Error<E> {
    /// I²C communication error
    I2c(E),
    /// Soft reset failed while opening or closing the device
    SoftReset(E),
    /// Operation needs [`Htu31d::init`] first
    NotInitialized,
    /// Failure of a checksum from the device was detected
    CrcMismatch,
    /// Oversampling ratio outside 0..=3
    InvalidOsr(u8),
    /// Address matches neither ADDR pin level
    InvalidAddrPin(u8),
    /// CRC payload length outside 1..=3
    InvalidLength(usize),
}
impl<E> From<crate::checksum::CrcError> for Error<E> {
    fn from(err: crate::checksum::CrcError) -> Self {
        match err {
            crate::checksum::CrcError::Mismatch => Error::CrcMismatch,
            crate::checksum::CrcError::InvalidLength(len) => Error::InvalidLength(len),
        }
    }
}
impl<E> From<InvalidOsr> for Error<E> {
    fn from(err: InvalidOsr) -> Self {
        Error::InvalidOsr(err.0)
    }
}
impl<E> From<InvalidAddrPin> for Error<E> {
    fn from(err: InvalidAddrPin) -> Self {
        Error::InvalidAddrPin(err.0)
    }
}
impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::I2c(e) => write!(f, "i2c error: {e:?}"),
            Error::SoftReset(e) => write!(f, "soft reset failed: {e:?}"),
            Error::NotInitialized => write!(f, "handle is not initialized"),
            Error::CrcMismatch => write!(f, "crc mismatch"),
            Error::InvalidOsr(raw) => write!(f, "invalid oversampling ratio {raw}"),
            Error::InvalidAddrPin(raw) => write!(f, "invalid address 0x{raw:02X}"),
            Error::InvalidLength(len) => write!(f, "invalid crc payload length {len}"),
        }
    }
}

/// Raw value that is not an oversampling ratio
#[cfg_attr(feature = "defmt", derive(Format))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct InvalidOsr(pub u8);

/// Raw value that is not an ADDR pin address
#[cfg_attr(feature = "defmt", derive(Format))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct InvalidAddrPin(pub u8);

/// Raw (still in u16 format) temperature and relative humidity from the device
#[cfg_attr(feature = "defmt", derive(Format))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RawTempAndRelHumid {
    /// unprocessed temperature
    pub temperature: u16,
    /// unprocessed relative humidity
    pub humidity: u16,
}
impl RawTempAndRelHumid {
    /// Get temperature in Centigrade
    pub fn centigrade(&self) -> f32 {
        raw_temp_to_centigrade(self.temperature)
    }
    /// Get relative humidity in percent
    pub fn humidity_percent(&self) -> f32 {
        raw_rel_humid_to_percent(self.humidity)
    }
}

/// Temperature and relative humidity after conversion
#[cfg_attr(feature = "defmt", derive(Format))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TempAndRelHumid {
    /// values as read from the device
    pub raw: RawTempAndRelHumid,
    /// degrees centigrade
    pub centigrade: f32,
    /// relative humidity in percent
    pub humidity_percent: f32,
}
impl From<RawTempAndRelHumid> for TempAndRelHumid {
    fn from(raw: RawTempAndRelHumid) -> Self {
        Self {
            raw,
            centigrade: raw.centigrade(),
            humidity_percent: raw.humidity_percent(),
        }
    }
}

/// Relative humidity after conversion
#[cfg_attr(feature = "defmt", derive(Format))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RelHumid {
    /// value as read from the device
    pub raw: u16,
    /// relative humidity in percent
    pub percent: f32,
}
impl From<u16> for RelHumid {
    fn from(raw: u16) -> Self {
        Self {
            raw,
            percent: raw_rel_humid_to_percent(raw),
        }
    }
}

/// Diagnostic bits from the device
#[cfg_attr(feature = "defmt", derive(Format))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Diagnostic {
    raw: u8,
    /// non-volatile memory error
    pub nvm_error: bool,
    /// humidity under- or overrun
    pub humidity_under_overrun: bool,
    /// humidity high error
    pub humidity_high_error: bool,
    /// humidity low error
    pub humidity_low_error: bool,
    /// temperature under- or overrun
    pub temperature_under_overrun: bool,
    /// temperature high error
    pub temperature_high_error: bool,
    /// temperature low error
    pub temperature_low_error: bool,
    /// heater is on
    pub heater_on: bool,
}
impl From<u8> for Diagnostic {
    fn from(raw: u8) -> Self {
        Self {
            raw,
            nvm_error: raw & DIAGNOSTIC_NVM_ERROR != 0,
            humidity_under_overrun: raw & DIAGNOSTIC_HUMIDITY_UNDER_OVERRUN != 0,
            humidity_high_error: raw & DIAGNOSTIC_HUMIDITY_HIGH_ERROR != 0,
            humidity_low_error: raw & DIAGNOSTIC_HUMIDITY_LOW_ERROR != 0,
            temperature_under_overrun: raw & DIAGNOSTIC_TEMPERATURE_UNDER_OVERRUN != 0,
            temperature_high_error: raw & DIAGNOSTIC_TEMPERATURE_HIGH_ERROR != 0,
            temperature_low_error: raw & DIAGNOSTIC_TEMPERATURE_LOW_ERROR != 0,
            heater_on: raw & DIAGNOSTIC_HEATER_ON != 0,
        }
    }
}
impl Diagnostic {
    /// Get the raw diagnostic byte
    pub fn raw(&self) -> u8 {
        self.raw
    }
}
impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Diagnostic {{ 0x{:02x}; ", self.raw)?;
        let flags = [
            (self.nvm_error, "nvm_error"),
            (self.humidity_under_overrun, "humidity_under_overrun"),
            (self.humidity_high_error, "humidity_high_error"),
            (self.humidity_low_error, "humidity_low_error"),
            (self.temperature_under_overrun, "temperature_under_overrun"),
            (self.temperature_high_error, "temperature_high_error"),
            (self.temperature_low_error, "temperature_low_error"),
            (self.heater_on, "heater_on"),
        ];
        for (_, name) in flags.iter().filter(|(set, _)| *set) {
            write!(f, "{name} ")?;
        }
        write!(f, "}}")
    }
}

/// Serial number of the device
#[cfg_attr(feature = "defmt", derive(Format))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SerialNumber(pub [u8; 3]);
impl fmt::Display for SerialNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0.iter() {
            write!(f, "{:02X}", byte)?;
        }
        Ok(())
    }
}

/// Static description of the chip
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Info {
    /// chip name
    pub chip_name: &'static str,
    /// manufacturer name
    pub manufacturer_name: &'static str,
    /// bus the chip sits on
    pub interface: &'static str,
    /// minimum supply voltage in volts
    pub supply_voltage_min_v: f32,
    /// maximum supply voltage in volts
    pub supply_voltage_max_v: f32,
    /// maximum supply current in milliamps
    pub max_current_ma: f32,
    /// minimum operating temperature in °C
    pub temperature_min: f32,
    /// maximum operating temperature in °C
    pub temperature_max: f32,
    /// driver version, major * 1000 + minor * 100
    pub driver_version: u32,
}
impl fmt::Display for Info {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "chip is {}", self.chip_name)?;
        writeln!(f, "manufacturer is {}", self.manufacturer_name)?;
        writeln!(f, "interface is {}", self.interface)?;
        writeln!(
            f,
            "driver version is {}.{}",
            self.driver_version / 1000,
            (self.driver_version % 1000) / 100
        )?;
        writeln!(f, "min supply voltage is {:0.1}V", self.supply_voltage_min_v)?;
        writeln!(f, "max supply voltage is {:0.1}V", self.supply_voltage_max_v)?;
        writeln!(f, "max current is {:0.2}mA", self.max_current_ma)?;
        writeln!(f, "max temperature is {:0.1}C", self.temperature_max)?;
        write!(f, "min temperature is {:0.1}C", self.temperature_min)
    }
}

/// Describe the chip.  Needs no device handle.
pub fn info() -> Info {
    Info {
        chip_name: CHIP_NAME,
        manufacturer_name: MANUFACTURER_NAME,
        interface: INTERFACE,
        supply_voltage_min_v: SUPPLY_VOLTAGE_MIN_V,
        supply_voltage_max_v: SUPPLY_VOLTAGE_MAX_V,
        max_current_ma: MAX_CURRENT_MA,
        temperature_min: TEMPERATURE_MIN,
        temperature_max: TEMPERATURE_MAX,
        driver_version: DRIVER_VERSION,
    }
}
