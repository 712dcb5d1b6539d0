//! Attachment session.
//!
//! One [`Sd109Session`] owns all driver state for one chip instance. The
//! attach sequence validates identity before touching anything else, then
//! snapshots version and boot status and reconciles the persisted watchdog
//! parameters against the supplied configuration.

use crate::bus::RegisterBus;
use crate::config::Sd109Config;
use crate::error::{Sd109Error, Sd109Result};
use crate::rtc::AlarmState;
use crate::sensors::{REFRESH_INTERVAL, SensorCache};
use crate::watchdog::{self, WatchdogState};
use parking_lot::Mutex;
use sd109_protocol::regs::{BOOT_STATUS, CHIP_ID, CHIP_ID_MAGIC, FIRMWARE_VERSION};
use sd109_protocol::{BootReason, BootStatus};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Identity read once at attach; immutable for the life of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChipIdentity {
    /// Contents of the identity register (always the magic on a live
    /// session; a mismatch aborts attach).
    pub chip_id: u16,
    /// Firmware version register contents.
    pub firmware_version: u16,
    /// Decoded boot status register.
    pub boot: BootStatus,
}

/// Driver state for one attached SD109.
///
/// All per-channel and controller state is owned here; nothing is shared
/// across chip instances. The sensor cache and the watchdog/alarm
/// bookkeeping carry their own locks, so every public operation takes
/// `&self` and the session can be shared between a polling loop, a
/// power-event callback, and on-demand watchdog/RTC calls.
#[derive(Debug)]
pub struct Sd109Session<B: RegisterBus> {
    pub(crate) bus: B,
    config: Sd109Config,
    identity: ChipIdentity,
    pub(crate) sensors: SensorCache,
    pub(crate) watchdog: Mutex<WatchdogState>,
    pub(crate) alarm: Mutex<AlarmState>,
}

impl<B: RegisterBus> Sd109Session<B> {
    /// Attach to a chip behind `bus`.
    ///
    /// The identity register is read first and checked against the magic
    /// before any other register is touched, so an unrelated device's
    /// memory is never interpreted as valid state. An unrecognized boot
    /// status code is logged and classified as [`BootReason::Unknown`]
    /// without failing the attach.
    ///
    /// # Errors
    ///
    /// Returns [`Sd109Error::IdentityMismatch`] for a foreign chip and
    /// [`Sd109Error::Transport`] for any bus fault during the attach
    /// sequence; both abort the attachment.
    pub fn attach(bus: B, config: Sd109Config) -> Sd109Result<Self> {
        let chip_id = bus.read_register(CHIP_ID)?;
        if chip_id != CHIP_ID_MAGIC {
            return Err(Sd109Error::IdentityMismatch {
                expected: CHIP_ID_MAGIC,
                actual: chip_id,
            });
        }

        let firmware_version = bus.read_register(FIRMWARE_VERSION)?;

        let raw_status = bus.read_register(BOOT_STATUS)?;
        let boot = BootStatus::from_raw(raw_status);
        match boot.reason {
            BootReason::Unknown => warn!("start from unknown boot status {raw_status:#06x}"),
            reason => info!("start from {reason}"),
        }

        let watchdog = watchdog::reconcile_at_attach(&bus, &config)?;

        info!("attached SD109, firmware version {firmware_version:#06x}");

        Ok(Self {
            bus,
            config,
            identity: ChipIdentity {
                chip_id,
                firmware_version,
                boot,
            },
            sensors: SensorCache::new(REFRESH_INTERVAL),
            watchdog: Mutex::new(watchdog),
            alarm: Mutex::new(AlarmState::default()),
        })
    }

    /// Identity snapshot taken at attach.
    #[must_use]
    pub fn identity(&self) -> ChipIdentity {
        self.identity
    }

    /// Firmware version reported at attach.
    #[must_use]
    pub fn firmware_version(&self) -> u16 {
        self.identity.firmware_version
    }

    /// Why the chip last brought the board up.
    #[must_use]
    pub fn boot_reason(&self) -> BootReason {
        self.identity.boot.reason
    }

    /// The configuration this session was attached with.
    #[must_use]
    pub fn config(&self) -> Sd109Config {
        self.config
    }

    /// Borrow the underlying bus (for adapter-layer diagnostics).
    #[must_use]
    pub fn bus(&self) -> &B {
        &self.bus
    }
}
