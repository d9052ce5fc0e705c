//! System configuration and hardware constants
//!
//! This module defines compile-time constants for the Si4703 receiver
//! and its host wiring. All datasheet timings, magic register values and
//! default cadences are centralized here, together with the runtime
//! [`TunerConfig`] handed to the driver at construction.

use crate::hal::i2c::I2cAddress;
use crate::radio::poll::{Backoff, PollPolicy};
use crate::types::{Band, ChannelSpacing, DeEmphasis, Volume};

/// Si4703 7-bit I2C address (fixed by the silicon)
pub const SI4703_I2C_ADDR: u8 = 0x10;

/// I2C bus frequency (the Si4703 supports up to 400 kHz)
pub const I2C_FREQUENCY_HZ: u32 = 100_000;

/// Number of 16-bit registers in the register map
pub const REGISTER_COUNT: usize = 16;

/// Bytes returned by a full read burst (16 registers, high byte first)
pub const READ_BURST_LEN: usize = REGISTER_COUNT * 2;

/// Bytes sent by a write burst (registers 0x02..=0x07)
pub const WRITE_BURST_LEN: usize = 12;

/// Reset hold time with SDIO low (selects 2-wire mode)
pub const RESET_HOLD_MS: u32 = 1;

/// Time for the bus mode to latch after reset is released
pub const MODE_LATCH_MS: u32 = 1;

/// Crystal oscillator stabilization time (AN230, must not be shortened)
pub const OSCILLATOR_SETTLE_MS: u32 = 500;

/// Maximum power-up time (datasheet)
pub const POWERUP_MS: u32 = 110;

/// Settle time after issuing a tune or seek before polling STC
pub const TUNE_SETTLE_MS: u32 = 500;

/// TEST1 value that enables the internal crystal oscillator (XOSCEN)
pub const TEST1_XOSCEN: u16 = 0x8100;

/// POWERCFG power-up value: ENABLE with DMUTE and SMUTE asserted
pub const POWERCFG_POWERUP: u16 = 0xC001;

/// Volume applied at the end of power-up
pub const DEFAULT_VOLUME: u8 = 7;

/// Station tuned at startup when a scan finds nothing (101.9 MHz)
pub const DEFAULT_STATION_TENTHS_MHZ: u16 = 1019;

/// Maximum number of stations kept by a band scan
pub const SCAN_CAPACITY: usize = 32;

/// Delay between tune polls (the chip is polled back-to-back)
pub const TUNE_POLL_INTERVAL_MS: u32 = 0;

/// Maximum number of tune polls before giving up
pub const TUNE_POLL_LIMIT: u32 = 5_000;

/// Delay between seek polls
pub const SEEK_POLL_INTERVAL_MS: u32 = 1_000;

/// Maximum number of seek polls before giving up
pub const SEEK_POLL_LIMIT: u32 = 60;

/// Pin assignments for GPIO
pub mod pins {
    //! GPIO pin assignments for the Si4703 breakout

    /// Si4703 RST (active low)
    pub const RESET: &str = "PB0";

    /// I2C1 SCL (Si4703 SCLK)
    pub const I2C1_SCL: &str = "PB8";

    /// I2C1 SDA (Si4703 SDIO, driven low during reset)
    pub const I2C1_SDA: &str = "PB9";

    /// Status LED
    pub const LED_STATUS: &str = "PA5";
}

/// How the wait that follows clearing TUNE/SEEK decides it is done.
///
/// The datasheet has STC drop once TUNE or SEEK is cleared. Existing
/// host code for this board instead waits for STC to read set again,
/// which is the default here.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum CompletionCheck {
    /// Poll until STC reads set
    #[default]
    AwaitStcSet,
    /// Poll until STC reads clear
    AwaitStcClear,
}

impl CompletionCheck {
    /// STC level that ends the acknowledgement wait
    #[must_use]
    pub const fn expected_stc(self) -> bool {
        match self {
            Self::AwaitStcSet => true,
            Self::AwaitStcClear => false,
        }
    }
}

/// Runtime tuner configuration
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TunerConfig {
    /// Device address on the bus
    pub address: I2cAddress,
    /// Receive band
    pub band: Band,
    /// Channel spacing
    pub spacing: ChannelSpacing,
    /// Audio de-emphasis
    pub de_emphasis: DeEmphasis,
    /// Volume applied at the end of power-up
    pub volume: Volume,
    /// Poll cadence while waiting for a tune to complete
    pub tune_poll: PollPolicy,
    /// Poll cadence while waiting for a seek to complete
    pub seek_poll: PollPolicy,
    /// Acknowledgement wait after clearing TUNE/SEEK
    pub completion: CompletionCheck,
}

impl TunerConfig {
    /// Default tune poll policy
    pub const TUNE_POLL: PollPolicy =
        PollPolicy::new(TUNE_POLL_INTERVAL_MS, TUNE_POLL_LIMIT, Backoff::Fixed);

    /// Default seek poll policy
    pub const SEEK_POLL: PollPolicy =
        PollPolicy::new(SEEK_POLL_INTERVAL_MS, SEEK_POLL_LIMIT, Backoff::Fixed);

    /// Configuration for a given band with its customary spacing and de-emphasis
    #[must_use]
    pub const fn for_band(band: Band) -> Self {
        Self {
            address: I2cAddress::SI4703,
            band,
            spacing: band.default_spacing(),
            de_emphasis: band.default_de_emphasis(),
            volume: Volume::DEFAULT,
            tune_poll: Self::TUNE_POLL,
            seek_poll: Self::SEEK_POLL,
            completion: CompletionCheck::AwaitStcSet,
        }
    }

    /// Override the channel spacing
    #[must_use]
    pub const fn with_spacing(mut self, spacing: ChannelSpacing) -> Self {
        self.spacing = spacing;
        self
    }

    /// Override the de-emphasis time constant
    #[must_use]
    pub const fn with_de_emphasis(mut self, de_emphasis: DeEmphasis) -> Self {
        self.de_emphasis = de_emphasis;
        self
    }

    /// Override the power-up volume
    #[must_use]
    pub const fn with_volume(mut self, volume: Volume) -> Self {
        self.volume = volume;
        self
    }

    /// Override both poll policies
    #[must_use]
    pub const fn with_polling(mut self, tune: PollPolicy, seek: PollPolicy) -> Self {
        self.tune_poll = tune;
        self.seek_poll = seek;
        self
    }

    /// Override the acknowledgement check
    #[must_use]
    pub const fn with_completion(mut self, completion: CompletionCheck) -> Self {
        self.completion = completion;
        self
    }
}

impl Default for TunerConfig {
    fn default() -> Self {
        Self::for_band(Band::UsEurope)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for CompletionCheck {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::AwaitStcSet => defmt::write!(f, "STC=1"),
            Self::AwaitStcClear => defmt::write!(f, "STC=0"),
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for TunerConfig {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "Tuner({}, {}, {}, vol={})",
            self.band,
            self.spacing,
            self.de_emphasis,
            self.volume
        );
    }
}
