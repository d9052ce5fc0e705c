//! Shared types used across the firmware
//!
//! This module defines domain-specific types that enforce invariants
//! at compile time and provide type safety throughout the codebase.

use core::fmt;

/// Broadcast frequency in tenths of a MHz (1019 = 101.9 MHz)
///
/// The unit matches the receiver's channel arithmetic, so conversions to
/// and from channel numbers stay in integers. Range checking is a
/// property of the [`Band`], not of the frequency itself.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Frequency(u16);

impl Frequency {
    /// Create a frequency from tenths of a MHz
    #[must_use]
    pub const fn from_tenths_mhz(tenths: u16) -> Self {
        Self(tenths)
    }

    /// Get the frequency in tenths of a MHz
    #[must_use]
    pub const fn as_tenths_mhz(self) -> u16 {
        self.0
    }

    /// Get the frequency in kHz
    #[must_use]
    pub const fn as_khz(self) -> u32 {
        self.0 as u32 * 100
    }

    /// Get the frequency in MHz as floating point
    #[must_use]
    pub fn as_mhz_f32(self) -> f32 {
        f32::from(self.0) / 10.0
    }
}

impl fmt::Debug for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Frequency({}.{} MHz)", self.0 / 10, self.0 % 10)
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{} MHz", self.0 / 10, self.0 % 10)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Frequency {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{}.{} MHz", self.0 / 10, self.0 % 10);
    }
}

/// Channel spacing (SYSCONFIG2 SPACE field)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ChannelSpacing {
    /// 200 kHz (Americas, chip default)
    #[default]
    Khz200,
    /// 100 kHz (Europe, Japan)
    Khz100,
}

impl ChannelSpacing {
    /// Step between channels in tenths of a MHz
    #[must_use]
    pub const fn step_tenths(self) -> u16 {
        match self {
            Self::Khz200 => 2,
            Self::Khz100 => 1,
        }
    }

    /// SPACE[1:0] field value
    #[must_use]
    pub const fn field_value(self) -> u16 {
        match self {
            Self::Khz200 => 0b00,
            Self::Khz100 => 0b01,
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for ChannelSpacing {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Khz200 => defmt::write!(f, "200 kHz"),
            Self::Khz100 => defmt::write!(f, "100 kHz"),
        }
    }
}

/// Audio de-emphasis time constant (SYSCONFIG1 DE bit)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DeEmphasis {
    /// 75 µs (USA)
    #[default]
    Us75,
    /// 50 µs (Europe, Australia, Japan)
    Us50,
}

impl DeEmphasis {
    /// DE bit value
    #[must_use]
    pub const fn bit(self) -> bool {
        matches!(self, Self::Us50)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for DeEmphasis {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Us75 => defmt::write!(f, "75us"),
            Self::Us50 => defmt::write!(f, "50us"),
        }
    }
}

/// FM receive band (SYSCONFIG2 BAND field)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Band {
    /// 87.5 - 108.0 MHz
    #[default]
    UsEurope,
    /// 76.0 - 108.0 MHz
    JapanWide,
    /// 76.0 - 90.0 MHz
    Japan,
}

impl Band {
    /// Lowest frequency of the band (channel 0)
    #[must_use]
    pub const fn bottom(self) -> Frequency {
        match self {
            Self::UsEurope => Frequency(875),
            Self::JapanWide | Self::Japan => Frequency(760),
        }
    }

    /// Highest frequency of the band
    #[must_use]
    pub const fn top(self) -> Frequency {
        match self {
            Self::UsEurope | Self::JapanWide => Frequency(1080),
            Self::Japan => Frequency(900),
        }
    }

    /// Check whether a frequency lies inside the band
    #[must_use]
    pub const fn contains(self, freq: Frequency) -> bool {
        freq.0 >= self.bottom().0 && freq.0 <= self.top().0
    }

    /// BAND[1:0] field value
    #[must_use]
    pub const fn field_value(self) -> u16 {
        match self {
            Self::UsEurope => 0b00,
            Self::JapanWide => 0b01,
            Self::Japan => 0b10,
        }
    }

    /// Customary spacing for this band
    #[must_use]
    pub const fn default_spacing(self) -> ChannelSpacing {
        match self {
            Self::UsEurope => ChannelSpacing::Khz200,
            Self::JapanWide | Self::Japan => ChannelSpacing::Khz100,
        }
    }

    /// Customary de-emphasis for this band
    #[must_use]
    pub const fn default_de_emphasis(self) -> DeEmphasis {
        match self {
            Self::UsEurope => DeEmphasis::Us75,
            Self::JapanWide | Self::Japan => DeEmphasis::Us50,
        }
    }

    /// Channel number for a frequency (rounds down to the grid)
    ///
    /// The caller is expected to have checked [`Band::contains`].
    #[must_use]
    pub const fn channel(self, freq: Frequency, spacing: ChannelSpacing) -> u16 {
        (freq.0 - self.bottom().0) / spacing.step_tenths()
    }

    /// Frequency of a channel number
    #[must_use]
    pub const fn frequency(self, channel: u16, spacing: ChannelSpacing) -> Frequency {
        Frequency(channel * spacing.step_tenths() + self.bottom().0)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Band {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::UsEurope => defmt::write!(f, "87.5-108"),
            Self::JapanWide => defmt::write!(f, "76-108"),
            Self::Japan => defmt::write!(f, "76-90"),
        }
    }
}

/// Audio volume (SYSCONFIG2 VOLUME field, 0 = mute)
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Volume(u8);

impl Volume {
    /// Minimum volume (muted)
    pub const MIN: Self = Self(0);

    /// Maximum volume
    pub const MAX: Self = Self(15);

    /// Power-up volume
    pub const DEFAULT: Self = Self(crate::config::DEFAULT_VOLUME);

    /// Create a volume, returns None if above 15
    #[must_use]
    pub const fn new(level: u8) -> Option<Self> {
        if level <= Self::MAX.0 {
            Some(Self(level))
        } else {
            None
        }
    }

    /// Volume from a raw VOLUME field (only the low 4 bits count)
    #[must_use]
    pub const fn from_bits(bits: u16) -> Self {
        Self((bits & 0x0F) as u8)
    }

    /// Get the raw level
    #[must_use]
    pub const fn level(self) -> u8 {
        self.0
    }

    /// One step louder, saturating at the maximum
    #[must_use]
    pub const fn step_up(self) -> Self {
        if self.0 < Self::MAX.0 {
            Self(self.0 + 1)
        } else {
            Self::MAX
        }
    }

    /// One step quieter, saturating at zero
    #[must_use]
    pub const fn step_down(self) -> Self {
        Self(self.0.saturating_sub(1))
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<i32> for Volume {
    type Error = i32;

    fn try_from(level: i32) -> Result<Self, Self::Error> {
        u8::try_from(level)
            .ok()
            .and_then(Self::new)
            .ok_or(level)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Volume {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{}", self.0);
    }
}

/// Seek direction
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SeekDirection {
    /// Seek towards lower frequencies
    #[default]
    Down,
    /// Seek towards higher frequencies
    Up,
}

impl SeekDirection {
    /// SEEKUP bit value
    #[must_use]
    pub const fn bit(self) -> bool {
        matches!(self, Self::Up)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for SeekDirection {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Down => defmt::write!(f, "down"),
            Self::Up => defmt::write!(f, "up"),
        }
    }
}

/// Result of a seek
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeekOutcome {
    /// A station was found and is now tuned
    Found(Frequency),
    /// The seek failed or stopped at the band limit (SFBL)
    BandLimit,
}

impl SeekOutcome {
    /// Frequency of the station found, if any
    #[must_use]
    pub const fn frequency(self) -> Option<Frequency> {
        match self {
            Self::Found(freq) => Some(freq),
            Self::BandLimit => None,
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for SeekOutcome {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Found(freq) => defmt::write!(f, "found {}", freq),
            Self::BandLimit => defmt::write!(f, "band limit"),
        }
    }
}

/// Received signal strength (raw 8-bit RSSI)
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Rssi(u8);

impl Rssi {
    /// Wrap a raw RSSI reading
    #[must_use]
    pub const fn from_raw(raw: u8) -> Self {
        Self(raw)
    }

    /// Raw reading
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// Reading scaled to 0.0 - 100.0 of full scale
    #[must_use]
    pub fn percent(self) -> f32 {
        f32::from(self.0) / 255.0 * 100.0
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Rssi {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "RSSI {}", self.0);
    }
}
