use embedded_hal::i2c::{I2c, Operation};

/// Register-style bus the driver talks through.
///
/// `init` and `deinit` bracket the lifetime of the driver and default to no-ops, which is all
/// a bus that is already configured by the HAL needs.
pub trait Interface {
    /// Error reported by the underlying bus
    type Error;

    /// Bring the bus up; called once from [`Htu31d::init`](crate::Htu31d::init)
    fn init(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Release the bus; called from [`Htu31d::deinit`](crate::Htu31d::deinit) and when `init`
    /// fails after the bus was brought up
    fn deinit(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Write `register` followed by `data` to the device at `address`
    fn write_register(&mut self, address: u8, register: u8, data: &[u8]) -> Result<(), Self::Error>;

    /// Write `register`, then fill `buf` from the device at `address`
    fn read_register(&mut self, address: u8, register: u8, buf: &mut [u8]) -> Result<(), Self::Error>;
}

/// [`Interface`] over an [`embedded_hal::i2c::I2c`] bus
#[derive(Debug)]
pub struct I2cInterface<I2C> {
    i2c: I2C,
}

impl<I2C> I2cInterface<I2C> {
    /// Wrap an I²C bus
    pub fn new(i2c: I2C) -> Self {
        Self { i2c }
    }

    /// Give the bus back
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C: I2c> Interface for I2cInterface<I2C> {
    type Error = I2C::Error;

    fn write_register(&mut self, address: u8, register: u8, data: &[u8]) -> Result<(), Self::Error> {
        if data.is_empty() {
            self.i2c.write(address, &[register])
        } else {
            // adjacent writes are sent without a repeated start
            self.i2c.transaction(address, &mut [Operation::Write(&[register]), Operation::Write(data)])
        }
    }

    fn read_register(&mut self, address: u8, register: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        self.i2c.write_read(address, &[register], buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::i2c::ErrorKind;
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTx};

    #[test]
    fn command_only_write() {
        let mut i2c = I2cMock::new(&[I2cTx::write(0x40, vec![0x1E])]);
        let mut iface = I2cInterface::new(i2c.clone());
        iface.write_register(0x40, 0x1E, &[]).unwrap();
        i2c.done();
    }

    #[test]
    fn register_read() {
        let mut i2c = I2cMock::new(&[I2cTx::write_read(0x41, vec![0x08], vec![0x01, 0x31])]);
        let mut iface = I2cInterface::new(i2c.clone());
        let mut buf = [0u8; 2];
        iface.read_register(0x41, 0x08, &mut buf).unwrap();
        assert_eq!(buf, [0x01, 0x31]);
        i2c.done();
    }

    #[test]
    fn bus_error_is_passed_through() {
        let mut i2c = I2cMock::new(&[I2cTx::write(0x40, vec![0x04]).with_error(ErrorKind::Other)]);
        let mut iface = I2cInterface::new(i2c.clone());
        assert_eq!(iface.write_register(0x40, 0x04, &[]), Err(ErrorKind::Other));
        i2c.done();
    }

    #[test]
    fn init_and_deinit_default_to_ok() {
        let mut i2c = I2cMock::new(&[]);
        let mut iface = I2cInterface::new(i2c.clone());
        assert_eq!(iface.init(), Ok(()));
        assert_eq!(iface.deinit(), Ok(()));
        i2c.done();
    }
}
