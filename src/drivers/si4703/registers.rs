//! Si4703 register map
//!
//! Sixteen 16-bit registers addressed 0x00-0x0F. Only 0x02-0x07 are ever
//! written; 0x08-0x09 are reserved and 0x0A-0x0F are status.

use crate::types::Rssi;

/// Logical register address
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Register {
    /// Part number and manufacturer ID (read-only)
    DeviceId = 0x00,
    /// Revision, device and firmware (read-only)
    ChipId = 0x01,
    /// Power configuration, mute, seek control
    PowerCfg = 0x02,
    /// Tune control and channel select
    Channel = 0x03,
    /// System configuration 1 (RDS, de-emphasis, GPIO)
    SysConfig1 = 0x04,
    /// System configuration 2 (band, spacing, volume)
    SysConfig2 = 0x05,
    /// System configuration 3 (seek thresholds)
    SysConfig3 = 0x06,
    /// Test 1 (oscillator enable)
    Test1 = 0x07,
    /// Test 2 (reserved, never written)
    Test2 = 0x08,
    /// Boot configuration (reserved, never written)
    BootConfig = 0x09,
    /// Status and RSSI
    StatusRssi = 0x0A,
    /// Current channel
    ReadChan = 0x0B,
    /// RDS block A
    RdsA = 0x0C,
    /// RDS block B
    RdsB = 0x0D,
    /// RDS block C
    RdsC = 0x0E,
    /// RDS block D
    RdsD = 0x0F,
}

impl Register {
    /// All registers in logical order
    pub const ALL: [Self; 16] = [
        Self::DeviceId,
        Self::ChipId,
        Self::PowerCfg,
        Self::Channel,
        Self::SysConfig1,
        Self::SysConfig2,
        Self::SysConfig3,
        Self::Test1,
        Self::Test2,
        Self::BootConfig,
        Self::StatusRssi,
        Self::ReadChan,
        Self::RdsA,
        Self::RdsB,
        Self::RdsC,
        Self::RdsD,
    ];

    /// First register of a read burst
    pub const READ_START: Self = Self::StatusRssi;

    /// First register of a write burst
    pub const WRITE_START: Self = Self::PowerCfg;

    /// Last register of a write burst
    pub const WRITE_END: Self = Self::Test1;

    /// Logical address
    #[must_use]
    pub const fn addr(self) -> u8 {
        self as u8
    }

    /// Logical index into the register file
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Position of this register within a read burst
    #[must_use]
    pub const fn read_slot(self) -> usize {
        (self.index() + Self::ALL.len() - Self::READ_START.index()) % Self::ALL.len()
    }

    /// Check whether the register is part of a write burst
    #[must_use]
    pub const fn is_writable(self) -> bool {
        self.index() >= Self::WRITE_START.index() && self.index() <= Self::WRITE_END.index()
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Register {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "R{=u8:#x}", self.addr());
    }
}

/// A named bit range inside one register
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Field {
    /// Register holding the field
    pub register: Register,
    /// Position of the least significant bit
    pub shift: u8,
    /// Number of bits
    pub width: u8,
}

impl Field {
    /// Single-bit field
    #[must_use]
    pub const fn bit(register: Register, position: u8) -> Self {
        Self::range(register, position, 1)
    }

    /// Multi-bit field
    #[must_use]
    pub const fn range(register: Register, shift: u8, width: u8) -> Self {
        Self {
            register,
            shift,
            width,
        }
    }

    /// Largest value the field can hold
    #[must_use]
    pub const fn max(self) -> u16 {
        if self.width >= 16 {
            u16::MAX
        } else {
            (1u16 << self.width) - 1
        }
    }

    /// Mask of the field in register position
    #[must_use]
    pub const fn mask(self) -> u16 {
        self.max() << self.shift
    }

    /// Pull the field out of a raw register value
    #[must_use]
    pub const fn extract(self, raw: u16) -> u16 {
        (raw & self.mask()) >> self.shift
    }

    /// Replace the field in a raw register value; excess value bits are dropped
    #[must_use]
    pub const fn insert(self, raw: u16, value: u16) -> u16 {
        (raw & !self.mask()) | ((value & self.max()) << self.shift)
    }
}

/// Register 0x00 - DEVICEID
pub mod device_id {
    use super::{Field, Register};

    /// Part number
    pub const PN: Field = Field::range(Register::DeviceId, 12, 4);
    /// Manufacturer ID
    pub const MFGID: Field = Field::range(Register::DeviceId, 0, 12);
}

/// Register 0x01 - CHIPID
pub mod chip_id {
    use super::{Field, Register};

    /// Chip revision
    pub const REV: Field = Field::range(Register::ChipId, 10, 6);
    /// Device
    pub const DEV: Field = Field::range(Register::ChipId, 6, 4);
    /// Firmware version
    pub const FIRMWARE: Field = Field::range(Register::ChipId, 0, 6);
}

/// Register 0x02 - POWERCFG
pub mod power_cfg {
    use super::{Field, Register};

    /// Softmute disable
    pub const SMUTE: Field = Field::bit(Register::PowerCfg, 15);
    /// Mute disable
    pub const DMUTE: Field = Field::bit(Register::PowerCfg, 14);
    /// Seek mode (1 = stop at band limit)
    pub const SKMODE: Field = Field::bit(Register::PowerCfg, 10);
    /// Seek direction (1 = up)
    pub const SEEKUP: Field = Field::bit(Register::PowerCfg, 9);
    /// Start seek
    pub const SEEK: Field = Field::bit(Register::PowerCfg, 8);
    /// Power-down request
    pub const DISABLE: Field = Field::bit(Register::PowerCfg, 6);
    /// Power-up enable
    pub const ENABLE: Field = Field::bit(Register::PowerCfg, 0);
}

/// Register 0x03 - CHANNEL
pub mod channel {
    use super::{Field, Register};

    /// Start tune
    pub const TUNE: Field = Field::bit(Register::Channel, 15);
    /// Channel select
    pub const CHAN: Field = Field::range(Register::Channel, 0, 10);
}

/// Register 0x04 - SYSCONFIG1
pub mod sys_config1 {
    use super::{Field, Register};

    /// RDS enable
    pub const RDS: Field = Field::bit(Register::SysConfig1, 12);
    /// De-emphasis (1 = 50 µs)
    pub const DE: Field = Field::bit(Register::SysConfig1, 11);
}

/// Register 0x05 - SYSCONFIG2
pub mod sys_config2 {
    use super::{Field, Register};

    /// Band select
    pub const BAND: Field = Field::range(Register::SysConfig2, 6, 2);
    /// Channel spacing
    pub const SPACE: Field = Field::range(Register::SysConfig2, 4, 2);
    /// Channel spacing, high bit
    pub const SPACE1: Field = Field::bit(Register::SysConfig2, 5);
    /// Channel spacing, low bit
    pub const SPACE0: Field = Field::bit(Register::SysConfig2, 4);
    /// Volume
    pub const VOLUME: Field = Field::range(Register::SysConfig2, 0, 4);
}

/// Register 0x0A - STATUSRSSI
pub mod status_rssi {
    use super::{Field, Register};

    /// RDS ready
    pub const RDSR: Field = Field::bit(Register::StatusRssi, 15);
    /// Seek/tune complete
    pub const STC: Field = Field::bit(Register::StatusRssi, 14);
    /// Seek fail / band limit
    pub const SFBL: Field = Field::bit(Register::StatusRssi, 13);
    /// AFC rail
    pub const AFCRL: Field = Field::bit(Register::StatusRssi, 12);
    /// RDS synchronized
    pub const RDSS: Field = Field::bit(Register::StatusRssi, 11);
    /// Stereo indicator
    pub const STEREO: Field = Field::bit(Register::StatusRssi, 8);
    /// Received signal strength
    pub const RSSI: Field = Field::range(Register::StatusRssi, 0, 8);
}

/// Register 0x0B - READCHAN
pub mod read_chan {
    use super::{Field, Register};

    /// Channel the receiver is on
    pub const READCHAN: Field = Field::range(Register::ReadChan, 0, 10);
}

/// Decoded STATUSRSSI
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct StatusRssi {
    /// RDS group ready
    pub rds_ready: bool,
    /// Seek/tune complete
    pub stc: bool,
    /// Seek failed or hit the band limit
    pub sfbl: bool,
    /// AFC railed
    pub afc_rail: bool,
    /// RDS decoder synchronized
    pub rds_synced: bool,
    /// Stereo pilot detected
    pub stereo: bool,
    /// Signal strength
    pub rssi: Rssi,
}

impl StatusRssi {
    /// Decode a raw register value
    #[must_use]
    pub const fn from_bits(raw: u16) -> Self {
        Self {
            rds_ready: status_rssi::RDSR.extract(raw) != 0,
            stc: status_rssi::STC.extract(raw) != 0,
            sfbl: status_rssi::SFBL.extract(raw) != 0,
            afc_rail: status_rssi::AFCRL.extract(raw) != 0,
            rds_synced: status_rssi::RDSS.extract(raw) != 0,
            stereo: status_rssi::STEREO.extract(raw) != 0,
            rssi: Rssi::from_raw(status_rssi::RSSI.extract(raw) as u8),
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for StatusRssi {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "STC={=bool} SFBL={=bool} ST={=bool} {}",
            self.stc,
            self.sfbl,
            self.stereo,
            self.rssi
        );
    }
}

/// Decoded DEVICEID / CHIPID
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DeviceInfo {
    /// Part number (0x1 for Si4702/03)
    pub part_number: u8,
    /// Manufacturer ID (0x242)
    pub manufacturer: u16,
    /// Chip revision
    pub revision: u8,
    /// Device (0x1 = Si4702, 0x9 = Si4703 once powered up)
    pub device: u8,
    /// Firmware version (0 before power-up)
    pub firmware: u8,
}

impl DeviceInfo {
    /// Expected manufacturer ID
    pub const MANUFACTURER_SILABS: u16 = 0x242;

    /// Decode the two ID registers
    #[must_use]
    pub const fn from_bits(device_id: u16, chip_id: u16) -> Self {
        Self {
            part_number: device_id::PN.extract(device_id) as u8,
            manufacturer: device_id::MFGID.extract(device_id),
            revision: chip_id::REV.extract(chip_id) as u8,
            device: chip_id::DEV.extract(chip_id) as u8,
            firmware: chip_id::FIRMWARE.extract(chip_id) as u8,
        }
    }

    /// Check the manufacturer ID
    #[must_use]
    pub const fn is_silabs(&self) -> bool {
        self.manufacturer == Self::MANUFACTURER_SILABS
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for DeviceInfo {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "PN={=u8:X} MFG={=u16:X} REV={=u8} DEV={=u8:X} FW={=u8}",
            self.part_number,
            self.manufacturer,
            self.revision,
            self.device,
            self.firmware
        );
    }
}
