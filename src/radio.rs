//! Radio Control Logic
//!
//! Poll scheduling, progress reporting and band scanning built on top of
//! the register-level driver.

pub mod observer;
pub mod poll;
pub mod scan;
