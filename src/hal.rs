//! Hardware Abstraction Layer
//!
//! Thin, blocking wrappers over the `embedded-hal` capabilities the
//! receiver needs: the two-wire bus and the reset/SDIO control lines.
//! Timing comes straight from [`embedded_hal::delay::DelayNs`].

pub mod gpio;
pub mod i2c;
