//! Cached voltage telemetry.
//!
//! Each of the chip's 15 readings (5 rails × instant/min/max) is cached
//! with a timestamp and refreshed lazily on read once it goes stale. One
//! lock guards the whole cache for the duration of "check staleness,
//! optionally issue the bus read, update the entry", so two concurrent
//! readers of the same channel never issue duplicate bus transactions for
//! the same refresh window and never observe a half-updated cache.

use crate::bus::RegisterBus;
use crate::error::{Sd109Error, Sd109Result};
use crate::session::Sd109Session;
use parking_lot::Mutex;
use sd109_protocol::{CHANNEL_COUNT, VoltageKind, channel_label, channel_register};
use std::time::{Duration, Instant};
use tracing::warn;

/// Maximum age of a cached reading before a fresh bus read is required.
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(1);

/// One cached register value. `sampled_at == None` until the first
/// successful read.
#[derive(Debug, Clone, Copy, Default)]
struct ChannelReading {
    raw: u16,
    sampled_at: Option<Instant>,
}

#[derive(Debug)]
pub(crate) struct SensorCache {
    readings: Mutex<[[ChannelReading; VoltageKind::ALL.len()]; CHANNEL_COUNT]>,
    refresh_interval: Duration,
}

impl SensorCache {
    pub(crate) fn new(refresh_interval: Duration) -> Self {
        Self {
            readings: Mutex::new(Default::default()),
            refresh_interval,
        }
    }

    /// Read one channel, refreshing through `bus` if the cached entry is
    /// missing or at least `refresh_interval` old at `now`.
    ///
    /// Issues exactly zero (cache hit) or one (refresh) bus reads. On a
    /// failed refresh the cached entry, including its timestamp, is left
    /// untouched and the error propagates, so the next call retries
    /// instead of treating the failure as a sample.
    pub(crate) fn read_millivolts_at(
        &self,
        bus: &dyn RegisterBus,
        channel: usize,
        kind: VoltageKind,
        now: Instant,
    ) -> Sd109Result<i32> {
        let addr = channel_register(kind, channel)
            .ok_or_else(|| Sd109Error::unsupported(format!("voltage channel {channel}")))?;

        let mut readings = self.readings.lock();
        let entry = &mut readings[channel][kind.index()];

        let fresh = entry
            .sampled_at
            .is_some_and(|sampled| now.saturating_duration_since(sampled) < self.refresh_interval);
        if fresh {
            return Ok(i32::from(entry.raw));
        }

        let raw = bus.read_register(addr).inspect_err(|e| {
            warn!("failed to refresh voltage channel {channel} ({kind:?}): {e}");
        })?;
        entry.raw = raw;
        entry.sampled_at = Some(now);
        Ok(i32::from(raw))
    }
}

/// Voltage telemetry surface bound to a host monitoring framework by the
/// adapter layer.
pub trait SensorSource {
    /// Number of monitored rails.
    fn channel_count(&self) -> usize;

    /// Human-readable rail name. Never touches the device.
    ///
    /// # Errors
    ///
    /// Returns [`Sd109Error::Unsupported`] for an out-of-range channel.
    fn channel_label(&self, channel: usize) -> Sd109Result<&'static str>;

    /// Cached millivolt reading for one channel and kind.
    ///
    /// # Errors
    ///
    /// Returns [`Sd109Error::Unsupported`] for an out-of-range channel and
    /// [`Sd109Error::Transport`] when a required refresh fails.
    fn read_millivolts(&self, channel: usize, kind: VoltageKind) -> Sd109Result<i32>;
}

impl<B: RegisterBus> Sd109Session<B> {
    /// [`SensorSource::read_millivolts`] with the observation instant made
    /// explicit. The trait method passes [`Instant::now`].
    ///
    /// # Errors
    ///
    /// Same contract as [`SensorSource::read_millivolts`].
    pub fn read_millivolts_at(
        &self,
        channel: usize,
        kind: VoltageKind,
        now: Instant,
    ) -> Sd109Result<i32> {
        self.sensors.read_millivolts_at(&self.bus, channel, kind, now)
    }
}

impl<B: RegisterBus> SensorSource for Sd109Session<B> {
    fn channel_count(&self) -> usize {
        CHANNEL_COUNT
    }

    fn channel_label(&self, channel: usize) -> Sd109Result<&'static str> {
        channel_label(channel)
            .ok_or_else(|| Sd109Error::unsupported(format!("voltage channel {channel}")))
    }

    fn read_millivolts(&self, channel: usize, kind: VoltageKind) -> Sd109Result<i32> {
        self.read_millivolts_at(channel, kind, Instant::now())
    }
}
