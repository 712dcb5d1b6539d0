//! RTC and wake-alarm controller.
//!
//! The clock and the alarm are each a 48-bit seconds counter split across
//! three consecutive 16-bit registers. The device offers no multi-word
//! atomicity: a write sequence that fails mid-way leaves the device torn,
//! and a concurrent reader during a write may observe a mix of old and new
//! words. That behavior is deliberate; callers needing atomic visibility
//! serialize outside this core or accept consistency bounded by the time
//! to issue all three words.

use crate::bus::RegisterBus;
use crate::error::{Sd109Error, Sd109Result};
use crate::session::Sd109Session;
use sd109_protocol::regs::{RTC0, RTC1, RTC2, WAKEUP0, WAKEUP1, WAKEUP2};
use sd109_protocol::Epoch48;
use serde::{Deserialize, Serialize};
use tracing::warn;

const RTC_WORDS: [u8; 3] = [RTC0, RTC1, RTC2];
const WAKEUP_WORDS: [u8; 3] = [WAKEUP0, WAKEUP1, WAKEUP2];

/// Alarm bookkeeping mirrored from the last alarm-configuration call.
///
/// The chip has no enable/pending register, so these flags live in driver
/// memory only and reset to defaults on re-attach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AlarmState {
    /// Caller intends the alarm to fire.
    pub enabled: bool,
    /// Caller reported the alarm as pending.
    pub pending: bool,
}

/// One alarm read: the device's wake time plus the software flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlarmReading {
    /// Wake time read from the device.
    pub time: Epoch48,
    /// Software enabled flag.
    pub enabled: bool,
    /// Software pending flag.
    pub pending: bool,
}

/// Clock surface bound to a host RTC framework by the adapter layer.
pub trait ClockControl {
    /// Read the live clock.
    ///
    /// # Errors
    ///
    /// Fails fast on the first word that cannot be read; no partial
    /// reassembly is returned.
    fn read_time(&self) -> Sd109Result<Epoch48>;

    /// Set the live clock.
    ///
    /// Words are written in ascending-address order and the sequence
    /// aborts on the first failure, leaving the device's time possibly
    /// torn; the caller may need to retry the whole write.
    ///
    /// # Errors
    ///
    /// Returns [`Sd109Error::InvalidArgument`] for values above the 48-bit
    /// range before any write is issued, and [`Sd109Error::Transport`] on
    /// a failed word write.
    fn set_time(&self, seconds: u64) -> Sd109Result<()>;

    /// Read the wake alarm and the software flags.
    ///
    /// # Errors
    ///
    /// Fails fast on the first word that cannot be read.
    fn read_alarm(&self) -> Sd109Result<AlarmReading>;

    /// Program the wake alarm.
    ///
    /// The `enabled`/`pending` flags record the caller's intent and are
    /// stored unconditionally before validation and the register writes,
    /// regardless of their outcome.
    ///
    /// # Errors
    ///
    /// Same contract as [`ClockControl::set_time`].
    fn set_alarm(&self, seconds: u64, enabled: bool, pending: bool) -> Sd109Result<()>;

    /// Enable or disable the wake alarm.
    ///
    /// Disabling clears the three alarm words to zero best-effort:
    /// individual word-write failures are logged, not returned, and
    /// already-zeroed words are not rolled back. The software flags are
    /// not touched. Enabling writes nothing; the alarm time itself arms
    /// the wake.
    ///
    /// # Errors
    ///
    /// Currently infallible; the signature leaves room for transports
    /// that must report disable failures.
    fn set_alarm_enabled(&self, enabled: bool) -> Sd109Result<()>;
}

fn read_epoch(bus: &dyn RegisterBus, addrs: [u8; 3]) -> Sd109Result<Epoch48> {
    let mut words = [0u16; 3];
    for (word, addr) in words.iter_mut().zip(addrs) {
        *word = bus.read_register(addr)?;
    }
    Ok(Epoch48::from_words(words))
}

fn write_epoch(bus: &dyn RegisterBus, addrs: [u8; 3], epoch: Epoch48) -> Sd109Result<()> {
    for (word, addr) in epoch.to_words().into_iter().zip(addrs) {
        bus.write_register(addr, word)?;
    }
    Ok(())
}

impl<B: RegisterBus> ClockControl for Sd109Session<B> {
    fn read_time(&self) -> Sd109Result<Epoch48> {
        read_epoch(&self.bus, RTC_WORDS)
    }

    fn set_time(&self, seconds: u64) -> Sd109Result<()> {
        let epoch =
            Epoch48::new(seconds).map_err(|e| Sd109Error::invalid_argument(e.to_string()))?;
        write_epoch(&self.bus, RTC_WORDS, epoch)
    }

    fn read_alarm(&self) -> Sd109Result<AlarmReading> {
        let time = read_epoch(&self.bus, WAKEUP_WORDS)?;
        let flags = *self.alarm.lock();
        Ok(AlarmReading {
            time,
            enabled: flags.enabled,
            pending: flags.pending,
        })
    }

    fn set_alarm(&self, seconds: u64, enabled: bool, pending: bool) -> Sd109Result<()> {
        // Intent is recorded before anything can fail.
        *self.alarm.lock() = AlarmState { enabled, pending };

        let epoch =
            Epoch48::new(seconds).map_err(|e| Sd109Error::invalid_argument(e.to_string()))?;
        write_epoch(&self.bus, WAKEUP_WORDS, epoch)
    }

    fn set_alarm_enabled(&self, enabled: bool) -> Sd109Result<()> {
        if enabled {
            return Ok(());
        }
        for addr in WAKEUP_WORDS {
            if let Err(e) = self.bus.write_register(addr, 0) {
                warn!("unable to clear wake-alarm word {addr:#04x}: {e}");
            }
        }
        Ok(())
    }
}
