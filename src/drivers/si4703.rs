//! `Si4703` FM Receiver Driver
//!
//! Every operation follows the same cycle: refresh the register cache
//! with a full read burst, change the bits it needs in the cached image,
//! and commit registers 0x02..=0x07 with one write burst. Tune and seek
//! then wait for the chip through bounded STC polls.
//!
//! The driver is generic over any [`embedded_hal::i2c::I2c`] and
//! [`embedded_hal::delay::DelayNs`] implementation and owns both for its
//! lifetime. It is not reentrant: one caller at a time.
//!
//! # Example
//!
//! ```ignore
//! let mut radio = Si4703::init(i2c, delay, TunerConfig::default())?;
//! radio.set_channel(1019)?;        // 101.9 MHz
//! radio.set_volume(10)?;
//! if let SeekOutcome::Found(freq) = radio.seek(SeekDirection::Up)? {
//!     info!("station at {}", freq);
//! }
//! ```

mod cache;
pub mod registers;

pub use cache::RegisterFile;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::i2c::I2c;

use crate::config::{
    TunerConfig, OSCILLATOR_SETTLE_MS, POWERCFG_POWERUP, POWERUP_MS, READ_BURST_LEN, TEST1_XOSCEN,
    TUNE_SETTLE_MS,
};
use crate::error::{Error, InitFault, InitStage};
use crate::hal::gpio;
use crate::hal::i2c::I2cBus;
use crate::radio::observer::{Event, NoopObserver, Observer};
use crate::radio::poll::{PollPhase, PollPolicy};
use crate::types::{Frequency, Rssi, SeekDirection, SeekOutcome, Volume};

use registers::{channel, power_cfg, read_chan, sys_config1, sys_config2, DeviceInfo, Register, StatusRssi};

/// Driver result
pub type Result<T, E> = core::result::Result<T, Error<E>>;

/// `Si4703` driver
pub struct Si4703<I2C, D, O = NoopObserver> {
    bus: I2cBus<I2C>,
    delay: D,
    config: TunerConfig,
    regs: RegisterFile,
    observer: O,
}

impl<I2C, D> Si4703<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    /// Power up a chip that is already in 2-wire mode.
    ///
    /// Runs the stages from [`InitStage::BusActive`] on. Use
    /// [`gpio::enter_two_wire_mode`] first, or [`Si4703::bring_up`] for
    /// the whole sequence.
    ///
    /// # Errors
    ///
    /// Any bus failure is reported as [`Error::Init`]; no driver is
    /// returned in that case.
    pub fn init(i2c: I2C, delay: D, config: TunerConfig) -> Result<Self, I2C::Error> {
        Self::init_observed(i2c, delay, config, NoopObserver)
    }
}

impl<I2C, D, O> Si4703<I2C, D, O>
where
    I2C: I2c,
    D: DelayNs,
    O: Observer,
{
    /// Run the full power-on sequence, including reset.
    ///
    /// `connect` receives the SDIO pin once the bus mode has latched and
    /// returns the bus built on it. The reset pin is only borrowed and
    /// must be kept high afterwards.
    ///
    /// # Errors
    ///
    /// Any pin or bus failure is reported as [`Error::Init`].
    pub fn bring_up<RST, SDIO, F>(
        reset: &mut RST,
        mut sdio: SDIO,
        connect: F,
        mut delay: D,
        config: TunerConfig,
        mut observer: O,
    ) -> Result<Self, I2C::Error>
    where
        RST: OutputPin,
        SDIO: OutputPin,
        F: FnOnce(SDIO) -> I2C,
    {
        gpio::hold_in_reset(reset, &mut sdio, &mut delay).map_err(|kind| Error::Init {
            stage: InitStage::ResetAsserted,
            fault: InitFault::Pin(kind),
        })?;
        observer.on_event(Event::InitStage(InitStage::ResetAsserted));

        gpio::release_reset(reset, &mut delay).map_err(|kind| Error::Init {
            stage: InitStage::ResetReleased,
            fault: InitFault::Pin(kind),
        })?;
        observer.on_event(Event::InitStage(InitStage::ResetReleased));

        let i2c = connect(sdio);
        Self::init_observed(i2c, delay, config, observer)
    }

    /// [`Si4703::init`] with an observer attached.
    ///
    /// # Errors
    ///
    /// Any bus failure is reported as [`Error::Init`].
    pub fn init_observed(
        i2c: I2C,
        delay: D,
        config: TunerConfig,
        observer: O,
    ) -> Result<Self, I2C::Error> {
        let mut radio = Self {
            bus: I2cBus::new(i2c),
            delay,
            config,
            regs: RegisterFile::new(),
            observer,
        };
        radio.reached(InitStage::BusActive);

        radio
            .enable_oscillator()
            .map_err(|e| e.during(InitStage::OscillatorEnabled))?;
        radio.reached(InitStage::OscillatorEnabled);

        radio
            .enable_chip()
            .map_err(|e| e.during(InitStage::PoweredUp))?;
        radio.reached(InitStage::PoweredUp);

        radio
            .apply_volume(config.volume)
            .map_err(|e| e.during(InitStage::VolumeSet))?;
        radio.reached(InitStage::VolumeSet);

        Ok(radio)
    }

    fn reached(&mut self, stage: InitStage) {
        debug!("si4703: {}", stage);
        self.observer.on_event(Event::InitStage(stage));
    }

    fn enable_oscillator(&mut self) -> Result<(), I2C::Error> {
        self.refresh()?;
        self.regs.set(Register::Test1, TEST1_XOSCEN);
        self.commit()?;
        self.delay.delay_ms(OSCILLATOR_SETTLE_MS);
        Ok(())
    }

    fn enable_chip(&mut self) -> Result<(), I2C::Error> {
        self.refresh()?;
        self.regs.set(Register::PowerCfg, POWERCFG_POWERUP);
        // Region settings ride along in the same write burst
        self.regs.set_flag(sys_config1::DE, self.config.de_emphasis.bit());
        self.regs.set_field(sys_config2::BAND, self.config.band.field_value());
        self.regs.set_field(sys_config2::SPACE, self.config.spacing.field_value());
        self.commit()?;
        self.delay.delay_ms(POWERUP_MS);
        Ok(())
    }

    // ── Register cache ─────────────────────────────────────────────────

    /// Replace the cache with a full read burst.
    ///
    /// # Errors
    ///
    /// [`Error::Bus`] if the read fails.
    pub fn refresh(&mut self) -> Result<(), I2C::Error> {
        let mut burst = [0u8; READ_BURST_LEN];
        self.bus
            .burst_read(self.config.address, &mut burst)
            .map_err(Error::Bus)?;
        self.regs.load(&burst);
        Ok(())
    }

    /// Write cached registers 0x02..=0x07 to the chip.
    ///
    /// # Errors
    ///
    /// [`Error::Bus`] if the write is rejected.
    pub fn commit(&mut self) -> Result<(), I2C::Error> {
        let burst = self.regs.write_burst();
        self.bus
            .burst_write(self.config.address, &burst)
            .map_err(Error::Bus)
    }

    /// Cached registers as of the last refresh and local edits
    #[must_use]
    pub const fn registers(&self) -> &RegisterFile {
        &self.regs
    }

    /// Mutable access to the cache; changes reach the chip on [`commit`](Self::commit)
    pub fn registers_mut(&mut self) -> &mut RegisterFile {
        &mut self.regs
    }

    /// Active configuration
    #[must_use]
    pub const fn config(&self) -> &TunerConfig {
        &self.config
    }

    /// Give back the bus and delay
    pub fn release(self) -> (I2C, D) {
        (self.bus.release(), self.delay)
    }

    // ── Audio ──────────────────────────────────────────────────────────

    /// Set the volume (0-15, 0 mutes).
    ///
    /// # Errors
    ///
    /// [`Error::InvalidVolume`] without touching the bus if `level > 15`.
    pub fn set_volume(&mut self, level: u8) -> Result<(), I2C::Error> {
        let volume = Volume::new(level).ok_or(Error::InvalidVolume(level))?;
        self.apply_volume(volume)
    }

    fn apply_volume(&mut self, volume: Volume) -> Result<(), I2C::Error> {
        self.refresh()?;
        self.regs
            .set_field(sys_config2::VOLUME, u16::from(volume.level()));
        self.commit()
    }

    /// Current volume
    ///
    /// # Errors
    ///
    /// [`Error::Bus`] if the read fails.
    pub fn volume(&mut self) -> Result<Volume, I2C::Error> {
        self.refresh()?;
        Ok(Volume::from_bits(self.regs.field(sys_config2::VOLUME)))
    }

    /// One step louder (saturates at 15)
    ///
    /// # Errors
    ///
    /// [`Error::Bus`] on bus failure.
    pub fn volume_up(&mut self) -> Result<Volume, I2C::Error> {
        let volume = self.volume()?.step_up();
        self.apply_volume(volume)?;
        Ok(volume)
    }

    /// One step quieter (saturates at 0)
    ///
    /// # Errors
    ///
    /// [`Error::Bus`] on bus failure.
    pub fn volume_down(&mut self) -> Result<Volume, I2C::Error> {
        let volume = self.volume()?.step_down();
        self.apply_volume(volume)?;
        Ok(volume)
    }

    /// Mute or unmute the audio outputs (DMUTE)
    ///
    /// # Errors
    ///
    /// [`Error::Bus`] on bus failure.
    pub fn set_mute(&mut self, muted: bool) -> Result<(), I2C::Error> {
        self.refresh()?;
        self.regs.set_flag(power_cfg::DMUTE, !muted);
        self.commit()
    }

    // ── Tuning ─────────────────────────────────────────────────────────

    /// Clear TUNE and SEEK on a fresh cache and commit.
    ///
    /// # Errors
    ///
    /// [`Error::Bus`] on bus failure.
    pub fn clear_seek_tune(&mut self) -> Result<(), I2C::Error> {
        self.refresh()?;
        self.regs.set_flag(channel::TUNE, false);
        self.regs.set_flag(power_cfg::SEEK, false);
        self.commit()
    }

    /// Tune to a frequency given in tenths of a MHz (1019 = 101.9 MHz).
    ///
    /// Frequencies between grid points round down to the channel below.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidFrequency`] before any bus traffic if the frequency
    /// lies outside the configured band, [`Error::Timeout`] if STC never
    /// arrives, [`Error::Bus`] on bus failure.
    pub fn set_channel(&mut self, tenths_mhz: u16) -> Result<(), I2C::Error> {
        let freq = Frequency::from_tenths_mhz(tenths_mhz);
        let band = self.config.band;
        if !band.contains(freq) {
            return Err(Error::InvalidFrequency(tenths_mhz));
        }
        let chan = band.channel(freq, self.config.spacing);
        debug!("si4703: tune {} (channel {})", freq, chan);

        self.clear_seek_tune()?;
        self.regs.set_field(channel::CHAN, chan);
        self.regs.set_flag(channel::TUNE, true);
        self.commit()?;
        self.delay.delay_ms(TUNE_SETTLE_MS);

        let policy = self.config.tune_poll;
        self.await_stc(PollPhase::TuneComplete, policy, true)?;

        self.clear_seek_tune()?;
        let expected = self.config.completion.expected_stc();
        self.await_stc(PollPhase::TuneAcknowledged, policy, expected)?;
        Ok(())
    }

    /// [`set_channel`](Self::set_channel) taking a [`Frequency`]
    ///
    /// # Errors
    ///
    /// Same as [`set_channel`](Self::set_channel).
    pub fn tune(&mut self, freq: Frequency) -> Result<(), I2C::Error> {
        self.set_channel(freq.as_tenths_mhz())
    }

    /// Frequency the receiver is on (READCHAN).
    ///
    /// # Errors
    ///
    /// [`Error::Bus`] if the read fails.
    pub fn channel(&mut self) -> Result<Frequency, I2C::Error> {
        self.refresh()?;
        let chan = self.regs.field(read_chan::READCHAN);
        Ok(self.config.band.frequency(chan, self.config.spacing))
    }

    /// Signal strength of the current channel.
    ///
    /// # Errors
    ///
    /// [`Error::Bus`] if the read fails.
    pub fn rssi(&mut self) -> Result<Rssi, I2C::Error> {
        Ok(self.status()?.rssi)
    }

    /// Signal strength of the current channel as 0.0 - 100.0 of full scale.
    ///
    /// # Errors
    ///
    /// [`Error::Bus`] if the read fails.
    pub fn rssi_percent(&mut self) -> Result<f32, I2C::Error> {
        Ok(self.rssi()?.percent())
    }

    /// Fresh STATUSRSSI snapshot
    ///
    /// # Errors
    ///
    /// [`Error::Bus`] if the read fails.
    pub fn status(&mut self) -> Result<StatusRssi, I2C::Error> {
        self.refresh()?;
        Ok(self.regs.status())
    }

    /// Check the stereo indicator
    ///
    /// # Errors
    ///
    /// [`Error::Bus`] if the read fails.
    pub fn is_stereo(&mut self) -> Result<bool, I2C::Error> {
        Ok(self.status()?.stereo)
    }

    /// Seek to the next station in `direction`, stopping at the band edge.
    ///
    /// # Errors
    ///
    /// [`Error::Timeout`] if STC never arrives, [`Error::Bus`] on bus
    /// failure. Hitting the band limit is [`SeekOutcome::BandLimit`].
    pub fn seek(&mut self, direction: SeekDirection) -> Result<SeekOutcome, I2C::Error> {
        debug!("si4703: seek {}", direction);

        self.clear_seek_tune()?;
        self.regs.set_flag(power_cfg::SKMODE, true);
        self.regs.set_flag(power_cfg::SEEKUP, direction.bit());
        self.regs.set_flag(power_cfg::SEEK, true);
        self.commit()?;
        self.delay.delay_ms(TUNE_SETTLE_MS);

        let policy = self.config.seek_poll;
        let status = self.await_stc(PollPhase::SeekComplete, policy, true)?;
        let band_limit = status.sfbl;

        self.regs.set_flag(power_cfg::SEEK, false);
        self.commit()?;
        let expected = self.config.completion.expected_stc();
        self.await_stc(PollPhase::SeekAcknowledged, policy, expected)?;

        if band_limit {
            debug!("si4703: seek hit band limit");
            Ok(SeekOutcome::BandLimit)
        } else {
            self.channel().map(SeekOutcome::Found)
        }
    }

    fn await_stc(
        &mut self,
        phase: PollPhase,
        policy: PollPolicy,
        expected: bool,
    ) -> Result<StatusRssi, I2C::Error> {
        let mut schedule = policy.schedule();
        loop {
            let attempt = schedule.begin();
            self.refresh()?;
            let status = self.regs.status();
            trace!("si4703: {} poll {} stc={}", phase, attempt, status.stc);
            self.observer.on_event(Event::Poll {
                phase,
                attempt,
                status,
            });
            if status.stc == expected {
                return Ok(status);
            }
            match schedule.next_delay() {
                Some(0) => {}
                Some(ms) => self.delay.delay_ms(ms),
                None => {
                    warn!("si4703: gave up on {} after {} polls", phase, attempt);
                    // Drop TUNE/SEEK so later commits do not restart it.
                    // The timeout is reported even if this fails.
                    if self.clear_seek_tune().is_err() {
                        warn!("si4703: could not clear TUNE/SEEK after timeout");
                    }
                    return Err(Error::Timeout(phase));
                }
            }
        }
    }

    // ── Device ─────────────────────────────────────────────────────────

    /// Part, manufacturer and firmware IDs
    ///
    /// # Errors
    ///
    /// [`Error::Bus`] if the read fails.
    pub fn device_info(&mut self) -> Result<DeviceInfo, I2C::Error> {
        self.refresh()?;
        Ok(self.regs.device_info())
    }

    /// Enter the power-down state (ENABLE and DISABLE both set).
    ///
    /// # Errors
    ///
    /// [`Error::Bus`] on bus failure.
    pub fn power_down(&mut self) -> Result<(), I2C::Error> {
        self.refresh()?;
        self.regs.set_flag(power_cfg::ENABLE, true);
        self.regs.set_flag(power_cfg::DISABLE, true);
        self.commit()
    }
}
