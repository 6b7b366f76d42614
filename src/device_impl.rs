use crate::checksum;
use crate::hw_def::*;
use crate::interface::Interface;
use crate::types::*;

use embedded_hal::delay::DelayNs;

cfg_if::cfg_if! {
    if #[cfg(feature = "defmt")] {
        use defmt::{debug, trace, warn};
    } else if #[cfg(feature = "log")] {
        use log::{debug, trace, warn};
    } else {
        macro_rules! debug {
            ($($arg:tt)*) => {};
        }
        macro_rules! trace {
            ($($arg:tt)*) => {};
        }
        macro_rules! warn {
            ($($arg:tt)*) => {};
        }
    }
}

/// Data word plus CRC byte of a measurement frame
const MEASUREMENT_FRAME_LEN: usize = 3;

impl<IFACE, Delay, E> Htu31d<IFACE, Delay>
where
    IFACE: Interface<Error = E>,
    Delay: DelayNs,
{
    /// Create a new, not yet initialized, HTU31D driver instance.  Both oversampling ratios
    /// start at their lowest setting.
    pub fn new(iface: IFACE, delay: Delay, addr_pin: AddrPin) -> Self {
        Self {
            iface,
            delay,
            addr_pin,
            initialized: false,
            humidity_osr: HumidityOsr::default(),
            temperature_osr: TemperatureOsr::default(),
        }
    }

    /// Destroy the driver and hand back the interface and delay
    pub fn release(self) -> (IFACE, Delay) {
        (self.iface, self.delay)
    }

    /// Select the address the driver talks to.  Allowed before [`init`](Self::init).
    pub fn set_addr_pin(&mut self, addr_pin: AddrPin) {
        self.addr_pin = addr_pin;
    }

    /// Address the driver talks to
    pub fn get_addr_pin(&self) -> AddrPin {
        self.addr_pin
    }

    /// Whether [`init`](Self::init) has completed and [`deinit`](Self::deinit) has not
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    fn check_initialized(&self) -> Result<(), Error<E>> {
        if self.initialized {
            Ok(())
        } else {
            warn!("htu31d: handle is not initialized");
            Err(Error::NotInitialized)
        }
    }

    fn write(&mut self, register: u8, data: &[u8]) -> Result<(), Error<E>> {
        self.iface
            .write_register(self.addr_pin.as_u8(), register, data)
            .map_err(Error::I2c)
    }

    fn read(&mut self, register: u8, read_buf: &mut [u8]) -> Result<(), Error<E>> {
        self.iface
            .read_register(self.addr_pin.as_u8(), register, read_buf)
            .map_err(Error::I2c)
    }

    /// Read `read_buf.len()` bytes from `register` and verify every `frame_len` sized frame,
    /// each ending in the CRC of the bytes before it.
    fn read_checked(&mut self, register: u8, read_buf: &mut [u8], frame_len: usize) -> Result<(), Error<E>> {
        if let Err(err) = self.read(register, read_buf) {
            warn!("htu31d: read of register {} failed", register);
            return Err(err);
        }
        for frame in read_buf.chunks(frame_len) {
            let Some((crc, data)) = frame.split_last() else {
                return Err(Error::InvalidLength(0));
            };
            if let Err(err) = checksum::verify(data, *crc) {
                warn!("htu31d: crc checked error on register {}", register);
                return Err(err.into());
            }
        }
        Ok(())
    }

    /// Start a conversion with the current oversampling ratios and block until it is done.
    /// The device converts both channels, so both waits apply whatever is read back.
    fn convert(&mut self) -> Result<(), Error<E>> {
        let cmd = conversion_command(self.humidity_osr, self.temperature_osr);
        trace!("htu31d::convert(): cmd={}", cmd);
        if let Err(err) = self.write(cmd, &[]) {
            warn!("htu31d: write failed");
            return Err(err);
        }
        self.delay.delay_ms(self.humidity_osr.conversion_delay_ms());
        self.delay.delay_ms(self.temperature_osr.conversion_delay_ms());
        Ok(())
    }

    /// Open the bus and reset the device.  If the reset fails the bus is closed again before
    /// the error is returned.
    pub fn init(&mut self) -> Result<(), Error<E>> {
        if let Err(err) = self.iface.init() {
            warn!("htu31d: iic init failed");
            return Err(Error::I2c(err));
        }
        if let Err(err) = self.iface.write_register(self.addr_pin.as_u8(), Command::SoftReset.as_u8(), &[]) {
            warn!("htu31d: soft reset failed");
            let _ = self.iface.deinit();
            return Err(Error::SoftReset(err));
        }
        self.delay.delay_ms(SOFT_RESET_DELAY_MS);
        self.initialized = true;
        debug!("htu31d: initialized at address {}", self.addr_pin.as_u8());
        Ok(())
    }

    /// Reset the device and close the bus.  Configuration (address, oversampling ratios) is
    /// kept for a later [`init`](Self::init).
    pub fn deinit(&mut self) -> Result<(), Error<E>> {
        self.check_initialized()?;
        if let Err(err) = self.iface.write_register(self.addr_pin.as_u8(), Command::SoftReset.as_u8(), &[]) {
            warn!("htu31d: soft reset failed");
            return Err(Error::SoftReset(err));
        }
        self.delay.delay_ms(SOFT_RESET_DELAY_MS);
        if let Err(err) = self.iface.deinit() {
            warn!("htu31d: iic deinit failed");
            return Err(Error::I2c(err));
        }
        self.initialized = false;
        debug!("htu31d: closed");
        Ok(())
    }

    /// Set the humidity oversampling ratio used by subsequent reads
    pub fn set_humidity_osr(&mut self, osr: HumidityOsr) -> Result<(), Error<E>> {
        self.check_initialized()?;
        self.humidity_osr = osr;
        Ok(())
    }

    /// Get the humidity oversampling ratio
    pub fn get_humidity_osr(&self) -> Result<HumidityOsr, Error<E>> {
        self.check_initialized()?;
        Ok(self.humidity_osr)
    }

    /// Set the temperature oversampling ratio used by subsequent reads
    pub fn set_temperature_osr(&mut self, osr: TemperatureOsr) -> Result<(), Error<E>> {
        self.check_initialized()?;
        self.temperature_osr = osr;
        Ok(())
    }

    /// Get the temperature oversampling ratio
    pub fn get_temperature_osr(&self) -> Result<TemperatureOsr, Error<E>> {
        self.check_initialized()?;
        Ok(self.temperature_osr)
    }

    /// Trigger a conversion and read back temperature and relative humidity
    pub fn read_temperature_humidity(&mut self) -> Result<TempAndRelHumid, Error<E>> {
        self.check_initialized()?;
        self.convert()?;
        let mut read_buf = [0u8; 2 * MEASUREMENT_FRAME_LEN];
        self.read_checked(Command::ReadTempAndRelHumid.as_u8(), &mut read_buf, MEASUREMENT_FRAME_LEN)?;
        let raw = RawTempAndRelHumid {
            temperature: u16::from_be_bytes([read_buf[0], read_buf[1]]),
            humidity: u16::from_be_bytes([read_buf[3], read_buf[4]]),
        };
        trace!("htu31d: raw temperature={} humidity={}", raw.temperature, raw.humidity);
        Ok(raw.into())
    }

    /// Trigger a conversion and read back relative humidity only
    pub fn read_humidity(&mut self) -> Result<RelHumid, Error<E>> {
        self.check_initialized()?;
        self.convert()?;
        let mut read_buf = [0u8; MEASUREMENT_FRAME_LEN];
        self.read_checked(Command::ReadRelHumid.as_u8(), &mut read_buf, MEASUREMENT_FRAME_LEN)?;
        let raw = u16::from_be_bytes([read_buf[0], read_buf[1]]);
        trace!("htu31d: raw humidity={}", raw);
        Ok(raw.into())
    }

    /// software reset
    pub fn soft_reset(&mut self) -> Result<(), Error<E>> {
        self.check_initialized()?;
        if let Err(err) = self.write(Command::SoftReset.as_u8(), &[]) {
            warn!("htu31d: write failed");
            return Err(err);
        }
        self.delay.delay_ms(SOFT_RESET_DELAY_MS);
        Ok(())
    }

    /// Switch the condensation heater on
    pub fn heater_on(&mut self) -> Result<(), Error<E>> {
        self.check_initialized()?;
        if let Err(err) = self.write(Command::HeaterOn.as_u8(), &[]) {
            warn!("htu31d: write failed");
            return Err(err);
        }
        Ok(())
    }

    /// Switch the condensation heater off
    pub fn heater_off(&mut self) -> Result<(), Error<E>> {
        self.check_initialized()?;
        if let Err(err) = self.write(Command::HeaterOff.as_u8(), &[]) {
            warn!("htu31d: write failed");
            return Err(err);
        }
        Ok(())
    }

    /// Read the 24-bit serial number
    pub fn get_serial_number(&mut self) -> Result<SerialNumber, Error<E>> {
        self.check_initialized()?;
        let mut read_buf = [0u8; 4];
        self.read_checked(Command::ReadSerialNumber.as_u8(), &mut read_buf, 4)?;
        Ok(SerialNumber([read_buf[0], read_buf[1], read_buf[2]]))
    }

    /// Read the diagnostic register
    pub fn get_diagnostic(&mut self) -> Result<Diagnostic, Error<E>> {
        self.check_initialized()?;
        let mut read_buf = [0u8; 2];
        self.read_checked(Command::ReadDiagnostic.as_u8(), &mut read_buf, 2)?;
        Ok(Diagnostic::from(read_buf[0]))
    }

    /// Write `data` to an arbitrary register.  No CRC is involved.
    pub fn set_reg(&mut self, register: u8, data: &[u8]) -> Result<(), Error<E>> {
        self.check_initialized()?;
        self.write(register, data)
    }

    /// Read an arbitrary register into `read_buf`.  No CRC is checked.
    pub fn get_reg(&mut self, register: u8, read_buf: &mut [u8]) -> Result<(), Error<E>> {
        self.check_initialized()?;
        self.read(register, read_buf)
    }
}
