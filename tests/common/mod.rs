//! Simulated Si4703 and recording HAL doubles shared by the integration tests
//!
//! The simulation speaks the chip's burst protocol: reads stream the
//! registers starting at 0x0A, writes land at 0x02. Setting TUNE or SEEK
//! arms a countdown of status reads after which STC goes high.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{self, OutputPin};
use embedded_hal::i2c::{self, ErrorKind, NoAcknowledgeSource, Operation};

use si4703_firmware::config::{SI4703_I2C_ADDR, WRITE_BURST_LEN};
use si4703_firmware::config::TunerConfig;
use si4703_firmware::Si4703;

const STC: u16 = 1 << 14;
const SFBL: u16 = 1 << 13;
const TUNE: u16 = 1 << 15;
const SEEK: u16 = 1 << 8;
const CHAN_MASK: u16 = 0x03FF;

// =============================================================================
// Bus errors
// =============================================================================

/// Error reported by the simulated bus
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimError {
    /// Nobody answered at the address
    Nack,
    /// Failure injected by the test
    Injected,
}

impl i2c::Error for SimError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::Nack => ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address),
            Self::Injected => ErrorKind::Bus,
        }
    }
}

/// One bus transfer as seen by the chip
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Transfer {
    /// Read of `len` bytes
    Read(usize),
    /// Write of the given bytes
    Write(Vec<u8>),
}

// =============================================================================
// Simulated chip
// =============================================================================

/// Register file and knobs of the simulated chip
#[derive(Debug)]
pub struct ChipState {
    /// Logical register file
    pub regs: [u16; 16],
    /// Address the chip answers on
    pub address: u8,
    /// Status reads after a tune/seek command until STC goes high
    pub stc_after_reads: u32,
    /// Where successive seeks end: a channel, or `None` for the band
    /// limit. Seeks past the end of the plan hit the band limit.
    pub seeks: VecDeque<Option<u16>>,
    /// Drop STC once TUNE and SEEK are both cleared (datasheet behavior)
    pub clear_stc_on_ack: bool,
    /// Never report STC
    pub stuck: bool,
    /// 1-based write transfer that fails
    pub fail_write: Option<usize>,
    /// 1-based read transfer that fails
    pub fail_read: Option<usize>,
    /// Every transfer in order
    pub transfers: Vec<Transfer>,
    pending: Option<u32>,
    reads: usize,
    writes: usize,
}

impl Default for ChipState {
    fn default() -> Self {
        let mut regs = [0u16; 16];
        regs[0x00] = 0x1242;
        regs[0x01] = 0x1253;
        regs[0x07] = 0x0100;
        Self {
            regs,
            address: SI4703_I2C_ADDR,
            stc_after_reads: 1,
            seeks: VecDeque::new(),
            clear_stc_on_ack: false,
            stuck: false,
            fail_write: None,
            fail_read: None,
            transfers: Vec::new(),
            pending: None,
            reads: 0,
            writes: 0,
        }
    }
}

impl ChipState {
    fn read_burst(&mut self, buf: &mut [u8]) -> Result<(), SimError> {
        self.reads += 1;
        self.transfers.push(Transfer::Read(buf.len()));
        if self.fail_read == Some(self.reads) {
            return Err(SimError::Injected);
        }

        if let Some(remaining) = self.pending {
            if remaining <= 1 {
                self.pending = None;
                if !self.stuck {
                    self.regs[0x0A] |= STC;
                }
            } else {
                self.pending = Some(remaining - 1);
            }
        }

        // Physical order: 0x0A..=0x0F then 0x00..=0x09
        for (i, chunk) in buf.chunks_mut(2).enumerate() {
            let value = self.regs[(i + 0x0A) % 16].to_be_bytes();
            chunk.copy_from_slice(&value[..chunk.len()]);
        }
        Ok(())
    }

    fn write_burst(&mut self, data: &[u8]) -> Result<(), SimError> {
        self.writes += 1;
        self.transfers.push(Transfer::Write(data.to_vec()));
        if self.fail_write == Some(self.writes) {
            return Err(SimError::Injected);
        }

        let was_tuning = self.regs[0x03] & TUNE != 0;
        let was_seeking = self.regs[0x02] & SEEK != 0;
        for (i, pair) in data.chunks_exact(2).enumerate().take(6) {
            self.regs[0x02 + i] = u16::from_be_bytes([pair[0], pair[1]]);
        }
        let tuning = self.regs[0x03] & TUNE != 0;
        let seeking = self.regs[0x02] & SEEK != 0;

        if tuning && !was_tuning {
            self.regs[0x0A] &= !(STC | SFBL);
            self.regs[0x0B] = (self.regs[0x0B] & !CHAN_MASK) | (self.regs[0x03] & CHAN_MASK);
            self.pending = Some(self.stc_after_reads);
        } else if seeking && !was_seeking {
            self.regs[0x0A] &= !(STC | SFBL);
            match self.seeks.pop_front().flatten() {
                Some(chan) => {
                    self.regs[0x0B] = (self.regs[0x0B] & !CHAN_MASK) | (chan & CHAN_MASK);
                }
                None => self.regs[0x0A] |= SFBL,
            }
            self.pending = Some(self.stc_after_reads);
        } else if !tuning && !seeking && self.clear_stc_on_ack {
            self.regs[0x0A] &= !(STC | SFBL);
        }
        Ok(())
    }

    /// Number of read transfers so far
    pub fn read_count(&self) -> usize {
        self.reads
    }

    /// Number of write transfers so far
    pub fn write_count(&self) -> usize {
        self.writes
    }

    /// Write transfers in order
    pub fn writes(&self) -> Vec<Vec<u8>> {
        self.transfers
            .iter()
            .filter_map(|t| match t {
                Transfer::Write(data) => Some(data.clone()),
                Transfer::Read(_) => None,
            })
            .collect()
    }

    /// Register as decoded from the most recent write burst
    pub fn last_written(&self, reg: usize) -> Option<u16> {
        let last = self.writes().pop()?;
        let offset = (reg - 0x02) * 2;
        Some(u16::from_be_bytes([last[offset], last[offset + 1]]))
    }
}

/// Cloneable handle to a simulated chip on the bus
#[derive(Clone, Default)]
pub struct SimBus {
    pub chip: Rc<RefCell<ChipState>>,
}

impl SimBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(configure: impl FnOnce(&mut ChipState)) -> Self {
        let bus = Self::new();
        configure(&mut bus.chip.borrow_mut());
        bus
    }

    /// Forget the transfer log (after init, for example)
    pub fn clear_log(&self) {
        self.chip.borrow_mut().transfers.clear();
    }

    pub fn transfers(&self) -> Vec<Transfer> {
        self.chip.borrow().transfers.clone()
    }

    pub fn reg(&self, reg: usize) -> u16 {
        self.chip.borrow().regs[reg]
    }
}

impl i2c::ErrorType for SimBus {
    type Error = SimError;
}

impl i2c::I2c for SimBus {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        let mut chip = self.chip.borrow_mut();
        if address != chip.address {
            return Err(SimError::Nack);
        }
        for op in operations {
            match op {
                Operation::Read(buf) => chip.read_burst(buf)?,
                Operation::Write(data) => chip.write_burst(data)?,
            }
        }
        Ok(())
    }
}

// =============================================================================
// Delay and pins
// =============================================================================

/// Delay that only records how long it was asked to wait
#[derive(Clone, Default)]
pub struct RecordingDelay {
    pub total_ms: Rc<Cell<u64>>,
    pub calls: Rc<RefCell<Vec<u32>>>,
}

impl RecordingDelay {
    pub fn total_ms(&self) -> u64 {
        self.total_ms.get()
    }
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ms.set(self.total_ms.get() + u64::from(ns / 1_000_000));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.calls.borrow_mut().push(ms);
        self.total_ms.set(self.total_ms.get() + u64::from(ms));
    }
}

/// Shared record of pin writes across several pins
pub type PinLog = Rc<RefCell<Vec<(&'static str, bool)>>>;

/// Output pin that records every level it is driven to
#[derive(Clone)]
pub struct RecordingPin {
    name: &'static str,
    log: PinLog,
}

impl RecordingPin {
    pub fn new(name: &'static str, log: &PinLog) -> Self {
        Self {
            name,
            log: Rc::clone(log),
        }
    }
}

impl digital::ErrorType for RecordingPin {
    type Error = Infallible;
}

impl OutputPin for RecordingPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.log.borrow_mut().push((self.name, false));
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.log.borrow_mut().push((self.name, true));
        Ok(())
    }
}

/// Output pin whose every write fails
pub struct BrokenPin;

impl digital::ErrorType for BrokenPin {
    type Error = digital::ErrorKind;
}

impl OutputPin for BrokenPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Err(digital::ErrorKind::Other)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Err(digital::ErrorKind::Other)
    }
}

// =============================================================================
// Helpers
// =============================================================================

/// Tune and seek polls without sleeping and with small budgets
pub fn fast_config() -> TunerConfig {
    use si4703_firmware::radio::poll::PollPolicy;
    TunerConfig::default().with_polling(PollPolicy::fixed(0, 10), PollPolicy::fixed(0, 10))
}

/// Powered-up driver on a fresh simulated chip, transfer log cleared
pub fn powered_radio(bus: &SimBus, config: TunerConfig) -> Si4703<SimBus, RecordingDelay> {
    let radio = Si4703::init(bus.clone(), RecordingDelay::default(), config)
        .expect("simulated chip powers up");
    bus.clear_log();
    radio
}

/// Every write the driver issues is a full 0x02..=0x07 burst
pub fn assert_full_write_bursts(bus: &SimBus) {
    for write in bus.chip.borrow().writes() {
        assert_eq!(write.len(), WRITE_BURST_LEN);
    }
}
