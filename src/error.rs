//! Driver errors
//!
//! A seek that stops at the band limit is an outcome, not an error; see
//! [`SeekOutcome`](crate::types::SeekOutcome).

use core::fmt;

use embedded_hal::digital::ErrorKind as PinErrorKind;

use crate::radio::poll::PollPhase;

/// Power-on sequence stages, in order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum InitStage {
    /// SDIO and RST driven low, reset held
    ResetAsserted,
    /// RST released, 2-wire mode latched
    ResetReleased,
    /// Bus transport handed to the driver
    BusActive,
    /// Crystal oscillator enabled and settled
    OscillatorEnabled,
    /// Chip enabled and power-up time elapsed
    PoweredUp,
    /// Default volume applied (terminal)
    VolumeSet,
}

impl InitStage {
    /// All stages in sequence order
    pub const ALL: [Self; 6] = [
        Self::ResetAsserted,
        Self::ResetReleased,
        Self::BusActive,
        Self::OscillatorEnabled,
        Self::PoweredUp,
        Self::VolumeSet,
    ];

    /// Short name for logs
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::ResetAsserted => "reset asserted",
            Self::ResetReleased => "reset released",
            Self::BusActive => "bus active",
            Self::OscillatorEnabled => "oscillator enabled",
            Self::PoweredUp => "powered up",
            Self::VolumeSet => "volume set",
        }
    }
}

impl fmt::Display for InitStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for InitStage {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{=str}", self.name());
    }
}

/// What went wrong inside the power-on sequence
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InitFault<E> {
    /// Bus transfer failed
    Bus(E),
    /// Reset or SDIO pin could not be driven
    Pin(PinErrorKind),
}

/// Driver error, generic over the bus error type
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error<E> {
    /// Bus read or write failed (not retried)
    Bus(E),
    /// Power-on sequence failed; `stage` is the first stage not reached
    Init {
        /// Stage that could not be reached
        stage: InitStage,
        /// Underlying failure
        fault: InitFault<E>,
    },
    /// Volume outside 0-15
    InvalidVolume(u8),
    /// Frequency (tenths of a MHz) outside the configured band
    InvalidFrequency(u16),
    /// STC never reached the expected level within the poll budget
    Timeout(PollPhase),
}

impl<E> Error<E> {
    /// Re-tag a failure that happened while working towards `stage`.
    #[must_use]
    pub fn during(self, stage: InitStage) -> Self {
        match self {
            Self::Bus(e) => Self::Init {
                stage,
                fault: InitFault::Bus(e),
            },
            other => other,
        }
    }

    /// Check if this is a power-on failure
    #[must_use]
    pub const fn is_init(&self) -> bool {
        matches!(self, Self::Init { .. })
    }
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bus(e) => write!(f, "bus transfer failed: {e:?}"),
            Self::Init {
                stage,
                fault: InitFault::Bus(e),
            } => write!(f, "initialization failed before '{stage}': bus error {e:?}"),
            Self::Init {
                stage,
                fault: InitFault::Pin(kind),
            } => write!(f, "initialization failed before '{stage}': pin error {kind:?}"),
            Self::InvalidVolume(level) => write!(f, "volume {level} out of range 0-15"),
            Self::InvalidFrequency(tenths) => {
                write!(f, "frequency {}.{} MHz outside band", tenths / 10, tenths % 10)
            }
            Self::Timeout(phase) => write!(f, "timed out waiting for {phase}"),
        }
    }
}

#[cfg(feature = "std")]
impl<E: fmt::Debug> std::error::Error for Error<E> {}

#[cfg(feature = "embedded")]
impl<E: defmt::Format> defmt::Format for Error<E> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Bus(e) => defmt::write!(f, "bus: {}", e),
            Self::Init {
                stage,
                fault: InitFault::Bus(e),
            } => defmt::write!(f, "init before {}: bus {}", stage, e),
            Self::Init {
                stage,
                fault: InitFault::Pin(kind),
            } => defmt::write!(f, "init before {}: pin {}", stage, defmt::Debug2Format(kind)),
            Self::InvalidVolume(level) => defmt::write!(f, "volume {} out of range", level),
            Self::InvalidFrequency(tenths) => defmt::write!(f, "frequency {} out of band", tenths),
            Self::Timeout(phase) => defmt::write!(f, "timeout: {}", phase),
        }
    }
}
