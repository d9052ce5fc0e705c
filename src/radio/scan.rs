//! Band Scan
//!
//! Walks the configured band with repeated upward seeks and collects the
//! stations found. A full scan leaves the chip on the last station
//! found; otherwise it stays where the final seek stopped.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use heapless::Vec;

use crate::drivers::si4703::{Result, Si4703};
use crate::radio::observer::Observer;
use crate::types::{Frequency, SeekDirection, SeekOutcome};

impl<I2C, D, O> Si4703<I2C, D, O>
where
    I2C: I2c,
    D: DelayNs,
    O: Observer,
{
    /// Scan the whole band upwards, keeping at most `N` stations.
    ///
    /// Starts by tuning to the band bottom, so a station sitting exactly on
    /// the bottom channel is not reported. Stops at the band limit, when
    /// a seek fails to move up, or as soon as `N` stations have been found
    /// (no further seek is issued, so the chip stays on the last one).
    ///
    /// # Errors
    ///
    /// Propagates tune and seek errors.
    pub fn scan_band<const N: usize>(&mut self) -> Result<Vec<Frequency, N>, I2C::Error> {
        let band = self.config().band;
        self.tune(band.bottom())?;

        let mut stations = Vec::new();
        let mut last = band.bottom();
        while !stations.is_full() {
            match self.seek(SeekDirection::Up)? {
                SeekOutcome::Found(freq) if freq > last => {
                    info!("scan: station at {}", freq);
                    if stations.push(freq).is_err() {
                        break;
                    }
                    last = freq;
                }
                _ => break,
            }
        }
        Ok(stations)
    }
}
