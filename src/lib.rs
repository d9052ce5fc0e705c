//! Si4703 FM Receiver Firmware Library
//!
//! This library provides a register-level driver for the Silicon Labs
//! Si4703 FM receiver, controlled over I2C from a host microcontroller,
//! together with the configuration and control logic around it.
//!
//! # Architecture
//!
//! The firmware is organized in layers:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    APPLICATION LAYER                         │
//! │   Band scan   │   Poll policy   │   Observer hook            │
//! ├─────────────────────────────────────────────────────────────┤
//! │                      DRIVER LAYER                            │
//! │  Tune/seek state machine  │  Register cache + burst codec    │
//! ├─────────────────────────────────────────────────────────────┤
//! │                        HAL LAYER                             │
//! │   I2C burst bus   │   Reset/SDIO lines   │   Delay           │
//! ├─────────────────────────────────────────────────────────────┤
//! │                  embedded-hal 1.0 traits                     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Design Principles
//!
//! - **Type-driven design**: volumes, frequencies and bands are checked types
//! - **No unsafe in application code**
//! - **Explicit error handling**: all fallible operations return `Result`
//! - **Bounded waits**: every hardware poll has a budget and can time out

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Logging macros must come first so every module can use them
mod fmt;

/// Hardware Abstraction Layer
///
/// Blocking bus and GPIO helpers over `embedded-hal`.
pub mod hal;

/// Peripheral Drivers
///
/// The Si4703 register-level driver.
pub mod drivers;

/// Radio Control Logic
///
/// Poll scheduling, observer hook and band scan.
pub mod radio;

/// Driver errors
pub mod error;

/// Shared types used across modules
pub mod types;

/// System configuration and constants
pub mod config;

pub use drivers::si4703::Si4703;
pub use error::Error;

/// Prelude module for common imports
pub mod prelude {
    //! Convenient re-exports for common types and traits.

    pub use crate::config::*;
    pub use crate::drivers::si4703::registers::{DeviceInfo, StatusRssi};
    pub use crate::drivers::si4703::{RegisterFile, Si4703};
    pub use crate::error::{Error, InitFault, InitStage};
    pub use crate::radio::observer::{Event, NoopObserver, Observer};
    pub use crate::radio::poll::{Backoff, PollPhase, PollPolicy};
    pub use crate::types::*;

    // Common traits
    pub use embedded_hal::delay::DelayNs;
    pub use embedded_hal::digital::OutputPin;
    pub use embedded_hal::i2c::I2c;

    // Logging
    #[cfg(feature = "embedded")]
    pub use defmt::{debug, error, info, trace, warn};
}
