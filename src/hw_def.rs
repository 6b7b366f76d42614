use crate::types::{InvalidAddrPin, InvalidOsr};

#[cfg(feature = "defmt")]
use defmt::Format;

/// Command opcodes, written as the register byte of a bus transfer
#[cfg_attr(feature = "defmt", derive(Format))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u8)]
pub(crate) enum Command {
    /// Start a conversion; OSR bits are OR-ed in by [`conversion_command`]
    Conversion = 1 << 6,
    ReadTempAndRelHumid = 0x00,
    ReadRelHumid = 1 << 4,
    SoftReset = 0x1E,
    HeaterOn = 1 << 2,
    HeaterOff = 1 << 1,
    ReadSerialNumber = 0x0A,
    ReadDiagnostic = 1 << 3,
}
impl Command {
    pub(crate) const fn as_u8(self) -> u8 {
        self as u8
    }
}

/// Time the device needs to come back after a soft reset
pub(crate) const SOFT_RESET_DELAY_MS: u32 = 15;

/// I²C address, selected by the level of the ADDR pin
#[cfg_attr(feature = "defmt", derive(Format))]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[repr(u8)]
pub enum AddrPin {
    /// ADDR tied to GND
    #[default]
    Low = 0x40,
    /// ADDR tied to VDD
    High = 0x41,
}
impl AddrPin {
    /// 7-bit I²C address
    pub const fn as_u8(self) -> u8 {
        self as u8
    }
}
impl TryFrom<u8> for AddrPin {
    type Error = InvalidAddrPin;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        match raw {
            0x40 => Ok(AddrPin::Low),
            0x41 => Ok(AddrPin::High),
            _ => Err(InvalidAddrPin(raw)),
        }
    }
}

/// Humidity oversampling ratio.  Higher settings lower the noise floor and lengthen the
/// conversion.
#[cfg_attr(feature = "defmt", derive(Format))]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[repr(u8)]
pub enum HumidityOsr {
    /// 0.020 %RH
    #[default]
    Low = 0,
    /// 0.014 %RH
    Middle = 1,
    /// 0.010 %RH
    High = 2,
    /// 0.007 %RH
    VeryHigh = 3,
}
impl HumidityOsr {
    /// Conversion time contributed by the humidity channel
    pub const fn conversion_delay_ms(self) -> u32 {
        match self {
            HumidityOsr::Low => 2,
            HumidityOsr::Middle => 3,
            HumidityOsr::High => 5,
            HumidityOsr::VeryHigh => 9,
        }
    }
}
impl TryFrom<u8> for HumidityOsr {
    type Error = InvalidOsr;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        match raw {
            0 => Ok(HumidityOsr::Low),
            1 => Ok(HumidityOsr::Middle),
            2 => Ok(HumidityOsr::High),
            3 => Ok(HumidityOsr::VeryHigh),
            _ => Err(InvalidOsr(raw)),
        }
    }
}

/// Temperature oversampling ratio
#[cfg_attr(feature = "defmt", derive(Format))]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[repr(u8)]
pub enum TemperatureOsr {
    /// 0.040 °C
    #[default]
    Low = 0,
    /// 0.025 °C
    Middle = 1,
    /// 0.016 °C
    High = 2,
    /// 0.012 °C
    VeryHigh = 3,
}
impl TemperatureOsr {
    /// Conversion time contributed by the temperature channel
    pub const fn conversion_delay_ms(self) -> u32 {
        match self {
            TemperatureOsr::Low => 2,
            TemperatureOsr::Middle => 4,
            TemperatureOsr::High => 7,
            TemperatureOsr::VeryHigh => 13,
        }
    }
}
impl TryFrom<u8> for TemperatureOsr {
    type Error = InvalidOsr;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        match raw {
            0 => Ok(TemperatureOsr::Low),
            1 => Ok(TemperatureOsr::Middle),
            2 => Ok(TemperatureOsr::High),
            3 => Ok(TemperatureOsr::VeryHigh),
            _ => Err(InvalidOsr(raw)),
        }
    }
}

/// Build the conversion command: bit 6 triggers, bits 4:3 humidity OSR, bits 2:1 temperature OSR
pub(crate) const fn conversion_command(humidity_osr: HumidityOsr, temperature_osr: TemperatureOsr) -> u8 {
    Command::Conversion.as_u8() | ((humidity_osr as u8) & 0x3) << 3 | ((temperature_osr as u8) & 0x3) << 1
}

// The device scales by the full u16 range, 65535 rather than 65536.
pub(crate) fn raw_temp_to_centigrade(raw: u16) -> f32 {
    raw as f32 / 65535.0 * 165.0 - 40.0
}

pub(crate) fn raw_rel_humid_to_percent(raw: u16) -> f32 {
    raw as f32 / 65535.0 * 100.0
}

// Diagnostic register bits
pub(crate) const DIAGNOSTIC_NVM_ERROR: u8 = 1 << 7;
pub(crate) const DIAGNOSTIC_HUMIDITY_UNDER_OVERRUN: u8 = 1 << 6;
pub(crate) const DIAGNOSTIC_HUMIDITY_HIGH_ERROR: u8 = 1 << 5;
pub(crate) const DIAGNOSTIC_HUMIDITY_LOW_ERROR: u8 = 1 << 4;
pub(crate) const DIAGNOSTIC_TEMPERATURE_UNDER_OVERRUN: u8 = 1 << 3;
pub(crate) const DIAGNOSTIC_TEMPERATURE_HIGH_ERROR: u8 = 1 << 2;
pub(crate) const DIAGNOSTIC_TEMPERATURE_LOW_ERROR: u8 = 1 << 1;
pub(crate) const DIAGNOSTIC_HEATER_ON: u8 = 1 << 0;

// Chip descriptor
pub(crate) const CHIP_NAME: &str = "TE HTU31D";
pub(crate) const MANUFACTURER_NAME: &str = "TE";
pub(crate) const INTERFACE: &str = "IIC";
pub(crate) const SUPPLY_VOLTAGE_MIN_V: f32 = 3.0;
pub(crate) const SUPPLY_VOLTAGE_MAX_V: f32 = 5.5;
pub(crate) const MAX_CURRENT_MA: f32 = 0.414;
pub(crate) const TEMPERATURE_MIN: f32 = -40.0;
pub(crate) const TEMPERATURE_MAX: f32 = 125.0;
pub(crate) const DRIVER_VERSION: u32 = 1000;

#[cfg(test)]
mod tests {
    use super::*;

    const HUMIDITY_OSRS: [HumidityOsr; 4] = [
        HumidityOsr::Low,
        HumidityOsr::Middle,
        HumidityOsr::High,
        HumidityOsr::VeryHigh,
    ];
    const TEMPERATURE_OSRS: [TemperatureOsr; 4] = [
        TemperatureOsr::Low,
        TemperatureOsr::Middle,
        TemperatureOsr::High,
        TemperatureOsr::VeryHigh,
    ];

    #[test]
    fn conversion_command_very_high() {
        let cmd = conversion_command(HumidityOsr::VeryHigh, TemperatureOsr::VeryHigh);
        assert_eq!(cmd, 0x40 | (3 << 3) | (3 << 1));
        assert_eq!(cmd, 0x5E);
    }

    #[test]
    fn conversion_command_fields() {
        assert_eq!(conversion_command(HumidityOsr::Low, TemperatureOsr::Low), 0x40);
        assert_eq!(conversion_command(HumidityOsr::Middle, TemperatureOsr::Low), 0x48);
        assert_eq!(conversion_command(HumidityOsr::Low, TemperatureOsr::High), 0x44);
    }

    #[test]
    fn delay_tables() {
        let humidity: [u32; 4] = HUMIDITY_OSRS.map(HumidityOsr::conversion_delay_ms);
        let temperature: [u32; 4] = TEMPERATURE_OSRS.map(TemperatureOsr::conversion_delay_ms);
        assert_eq!(humidity, [2, 3, 5, 9]);
        assert_eq!(temperature, [2, 4, 7, 13]);
    }

    #[test]
    fn osr_try_from() {
        for (ii, osr) in HUMIDITY_OSRS.iter().enumerate() {
            assert_eq!(HumidityOsr::try_from(ii as u8), Ok(*osr));
        }
        for (ii, osr) in TEMPERATURE_OSRS.iter().enumerate() {
            assert_eq!(TemperatureOsr::try_from(ii as u8), Ok(*osr));
        }
        assert_eq!(HumidityOsr::try_from(4), Err(InvalidOsr(4)));
        assert_eq!(TemperatureOsr::try_from(0xFF), Err(InvalidOsr(0xFF)));
    }

    #[test]
    fn addr_pin_try_from() {
        assert_eq!(AddrPin::try_from(0x40), Ok(AddrPin::Low));
        assert_eq!(AddrPin::try_from(0x41), Ok(AddrPin::High));
        assert_eq!(AddrPin::try_from(0x80), Err(InvalidAddrPin(0x80)));
    }

    #[test]
    fn conversion_endpoints() {
        assert_eq!(raw_temp_to_centigrade(0), -40.0);
        assert_eq!(raw_rel_humid_to_percent(0), 0.0);
        assert_eq!(raw_temp_to_centigrade(65535), 125.0);
        assert_eq!(raw_rel_humid_to_percent(65535), 100.0);
    }

    #[test]
    fn conversion_midscale() {
        assert!((raw_temp_to_centigrade(32768) - 42.50).abs() < 0.02);
        assert!((raw_rel_humid_to_percent(32768) - 50.0).abs() < 0.01);
    }
}
