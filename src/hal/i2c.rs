//! I2C Bus Abstractions
//!
//! Provides blocking burst access for the Si4703. The chip has no
//! register pointer: a read always streams the whole register file and
//! a write always lands at register 0x02, so the bus is only ever used
//! for plain reads and plain writes of a fixed length.

use embedded_hal::i2c::I2c;

/// I2C operation result
pub type I2cResult<T, E> = Result<T, E>;

/// I2C device address wrapper
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct I2cAddress(u8);

impl I2cAddress {
    /// Si4703 FM receiver address
    pub const SI4703: Self = Self(crate::config::SI4703_I2C_ADDR);

    /// Create from 7-bit address
    #[must_use]
    pub const fn new(addr: u8) -> Self {
        Self(addr & 0x7F)
    }

    /// Get the 7-bit address
    #[must_use]
    pub const fn addr(self) -> u8 {
        self.0
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for I2cAddress {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{=u8:#x}", self.0);
    }
}

/// Blocking I2C bus wrapper owning the peripheral
pub struct I2cBus<I2C> {
    i2c: I2C,
}

impl<I2C: I2c> I2cBus<I2C> {
    /// Create a new I2C bus wrapper
    #[must_use]
    pub const fn new(i2c: I2C) -> Self {
        Self { i2c }
    }

    /// Read a full burst from a device
    ///
    /// `embedded-hal` guarantees the buffer is either filled completely or
    /// the transfer reports an error, so a short read surfaces as `Err`.
    pub fn burst_read(&mut self, addr: I2cAddress, buffer: &mut [u8]) -> I2cResult<(), I2C::Error> {
        self.i2c.read(addr.addr(), buffer)
    }

    /// Write a burst to a device
    pub fn burst_write(&mut self, addr: I2cAddress, data: &[u8]) -> I2cResult<(), I2C::Error> {
        self.i2c.write(addr.addr(), data)
    }

    /// Scan the I2C bus for devices
    pub fn scan(&mut self) -> heapless::Vec<I2cAddress, 16> {
        let mut devices = heapless::Vec::new();

        for addr in 0x08..0x78 {
            let mut buf = [0u8; 1];
            if self.i2c.read(addr, &mut buf).is_ok() {
                let _ = devices.push(I2cAddress::new(addr));
            }
        }

        devices
    }

    /// Give the peripheral back
    pub fn release(self) -> I2C {
        self.i2c
    }
}
