//! Register cache and burst codec
//!
//! The chip streams its registers starting at 0x0A and wrapping through
//! 0x0F to 0x00..0x09; writes always start at 0x02. [`RegisterFile`] keeps
//! the registers in logical order and converts to and from those two
//! physical layouts.

use crate::config::{READ_BURST_LEN, REGISTER_COUNT, WRITE_BURST_LEN};

use super::registers::{DeviceInfo, Field, Register, StatusRssi};

/// In-memory mirror of the 16 registers, indexed by logical address
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct RegisterFile {
    regs: [u16; REGISTER_COUNT],
}

impl RegisterFile {
    /// All-zero register file
    #[must_use]
    pub const fn new() -> Self {
        Self {
            regs: [0; REGISTER_COUNT],
        }
    }

    /// Decode a read burst (physical order, high byte first)
    #[must_use]
    pub fn from_read_burst(burst: &[u8; READ_BURST_LEN]) -> Self {
        let mut file = Self::new();
        file.load(burst);
        file
    }

    /// Overwrite every register from a read burst
    pub fn load(&mut self, burst: &[u8; READ_BURST_LEN]) {
        for reg in Register::ALL {
            let slot = reg.read_slot() * 2;
            self.regs[reg.index()] = u16::from_be_bytes([burst[slot], burst[slot + 1]]);
        }
    }

    /// Encode registers 0x02..=0x07 as a write burst
    #[must_use]
    pub fn write_burst(&self) -> [u8; WRITE_BURST_LEN] {
        let mut burst = [0u8; WRITE_BURST_LEN];
        let first = Register::WRITE_START.index();
        for (chunk, value) in burst
            .chunks_exact_mut(2)
            .zip(&self.regs[first..=Register::WRITE_END.index()])
        {
            chunk.copy_from_slice(&value.to_be_bytes());
        }
        burst
    }

    /// Raw register value
    #[must_use]
    pub const fn get(&self, reg: Register) -> u16 {
        self.regs[reg.index()]
    }

    /// Replace a whole register
    pub fn set(&mut self, reg: Register, value: u16) {
        self.regs[reg.index()] = value;
    }

    /// Field value, right-aligned
    #[must_use]
    pub const fn field(&self, field: Field) -> u16 {
        field.extract(self.get(field.register))
    }

    /// Read-modify-write a field against the cached register
    pub fn set_field(&mut self, field: Field, value: u16) {
        let raw = self.get(field.register);
        self.set(field.register, field.insert(raw, value));
    }

    /// Single-bit field as bool
    #[must_use]
    pub const fn flag(&self, field: Field) -> bool {
        self.field(field) != 0
    }

    /// Set or clear a single-bit field
    pub fn set_flag(&mut self, field: Field, on: bool) {
        self.set_field(field, u16::from(on));
    }

    /// Decoded STATUSRSSI
    #[must_use]
    pub const fn status(&self) -> StatusRssi {
        StatusRssi::from_bits(self.get(Register::StatusRssi))
    }

    /// Decoded DEVICEID / CHIPID
    #[must_use]
    pub const fn device_info(&self) -> DeviceInfo {
        DeviceInfo::from_bits(self.get(Register::DeviceId), self.get(Register::ChipId))
    }

    /// Registers in logical order
    #[must_use]
    pub const fn as_array(&self) -> &[u16; REGISTER_COUNT] {
        &self.regs
    }
}
