//! Driver progress hook
//!
//! The driver reports power-on progress and every STC poll through an
//! [`Observer`] instead of printing from inside its loops. Closures work
//! directly:
//!
//! ```
//! use si4703_firmware::radio::observer::{Event, Observer};
//!
//! let mut polls = 0;
//! let mut count = |event: Event| {
//!     if let Event::Poll { .. } = event {
//!         polls += 1;
//!     }
//! };
//! count.on_event(Event::InitStage(si4703_firmware::error::InitStage::BusActive));
//! ```

use crate::drivers::si4703::registers::StatusRssi;
use crate::error::InitStage;
use crate::radio::poll::PollPhase;

/// Something the driver did
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// Power-on sequence reached a stage
    InitStage(InitStage),
    /// One STC poll finished
    Poll {
        /// Wait the poll belongs to
        phase: PollPhase,
        /// 1-based poll number within the wait
        attempt: u32,
        /// Status read by this poll
        status: StatusRssi,
    },
}

#[cfg(feature = "embedded")]
impl defmt::Format for Event {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::InitStage(stage) => defmt::write!(f, "init: {}", stage),
            Self::Poll {
                phase,
                attempt,
                status,
            } => defmt::write!(f, "poll {} #{}: {}", phase, attempt, status),
        }
    }
}

/// Receiver of driver events
pub trait Observer {
    /// Called synchronously from the driver
    fn on_event(&mut self, event: Event);
}

/// Observer that ignores everything
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl Observer for NoopObserver {
    fn on_event(&mut self, _event: Event) {}
}

impl<F: FnMut(Event)> Observer for F {
    fn on_event(&mut self, event: Event) {
        self(event);
    }
}
