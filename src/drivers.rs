//! Peripheral Drivers
//!
//! High-level drivers for external ICs.

pub mod si4703;
