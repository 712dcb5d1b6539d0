//! Watchdog controller.
//!
//! The chip arms and disarms the watchdog through the command register and
//! takes both timing parameters through one packed register. The software
//! `running` flag tracks the last successful command write only; a failed
//! write never updates the driver's belief about the device.

use crate::bus::RegisterBus;
use crate::config::Sd109Config;
use crate::error::{Sd109Error, Sd109Result};
use crate::session::Sd109Session;
use sd109_protocol::regs::{COMMAND, WDOG_REFRESH, WDOG_REFRESH_MAGIC, WDOG_TIMEOUT};
use sd109_protocol::{
    Command, MAX_TIMEOUT_SECONDS, MIN_WAIT_SECONDS, pack_timeout_register,
    unpack_timeout_register,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Software-side watchdog state.
///
/// `device_*` fields hold what the chip reported at attach, before any
/// configured override was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchdogState {
    /// Whether the last successful command write armed the watchdog.
    pub running: bool,
    /// Effective timeout in seconds.
    pub timeout_seconds: u8,
    /// Effective boot grace period in seconds.
    pub wait_seconds: u8,
    /// Disarming forbidden once started (adapter-layer policy, carried
    /// here so the adapter can read it back).
    pub nowayout: bool,
    /// Timeout persisted in the device at attach.
    pub device_timeout_seconds: u8,
    /// Wait persisted in the device at attach.
    pub device_wait_seconds: u8,
}

/// Watchdog surface bound to a host watchdog framework by the adapter
/// layer.
pub trait WatchdogControl {
    /// Arm the hardware watchdog.
    ///
    /// # Errors
    ///
    /// Returns [`Sd109Error::Transport`] when the command write fails; the
    /// software state then still reads as stopped.
    fn start(&self) -> Sd109Result<()>;

    /// Disarm the hardware watchdog.
    ///
    /// # Errors
    ///
    /// Returns [`Sd109Error::Transport`] when the command write fails; the
    /// software state then still reads as running.
    fn stop(&self) -> Sd109Result<()>;

    /// Refresh the watchdog.
    ///
    /// The chip accepts the refresh while disarmed too; issuing it then
    /// has no protective effect but is not an error. Transport faults
    /// propagate to the caller, who decides whether to retry — the driver
    /// must not retry silently, since that could mask a persistent bus
    /// fault the watchdog exists to catch.
    ///
    /// # Errors
    ///
    /// Returns [`Sd109Error::Transport`] when the refresh write fails.
    fn ping(&self) -> Sd109Result<()>;

    /// Program a new timeout in seconds.
    ///
    /// # Errors
    ///
    /// Returns [`Sd109Error::InvalidArgument`] for 0 or values above 255
    /// before any bus access, and [`Sd109Error::Transport`] when the
    /// register write fails; `timeout_seconds` is updated only after a
    /// successful write.
    fn set_timeout(&self, seconds: u32) -> Sd109Result<()>;

    /// Snapshot of the software watchdog state.
    fn watchdog_state(&self) -> WatchdogState;
}

/// Recover the persisted watchdog parameters and apply configured
/// overrides, writing back to the device when an override won.
pub(crate) fn reconcile_at_attach(
    bus: &dyn RegisterBus,
    config: &Sd109Config,
) -> Sd109Result<WatchdogState> {
    let raw = bus.read_register(WDOG_TIMEOUT)?;
    let (device_timeout, device_wait) = unpack_timeout_register(raw);

    let mut update_device = false;

    let timeout_seconds = match config.watchdog_timeout_seconds {
        Some(configured) => {
            update_device = true;
            configured
        }
        None => device_timeout,
    };

    // A configured wait below the firmware floor counts as not configured.
    let wait_seconds = match config.watchdog_wait_seconds {
        Some(configured) if configured >= MIN_WAIT_SECONDS => {
            update_device = true;
            configured
        }
        _ => device_wait,
    };

    if update_device {
        let packed = pack_timeout_register(timeout_seconds, wait_seconds);
        bus.write_register(WDOG_TIMEOUT, packed)?;
        debug!("wrote configured watchdog parameters {packed:#06x} back to the device");
    }

    info!(
        "watchdog: timeout {timeout_seconds}s, wait {wait_seconds}s (device had {device_timeout}s/{device_wait}s)"
    );

    Ok(WatchdogState {
        running: false,
        timeout_seconds,
        wait_seconds,
        nowayout: config.watchdog_nowayout,
        device_timeout_seconds: device_timeout,
        device_wait_seconds: device_wait,
    })
}

impl<B: RegisterBus> WatchdogControl for Sd109Session<B> {
    fn start(&self) -> Sd109Result<()> {
        self.bus
            .write_register(COMMAND, Command::WatchdogEnable.to_raw())?;
        self.watchdog.lock().running = true;
        Ok(())
    }

    fn stop(&self) -> Sd109Result<()> {
        self.bus
            .write_register(COMMAND, Command::WatchdogDisable.to_raw())?;
        self.watchdog.lock().running = false;
        Ok(())
    }

    fn ping(&self) -> Sd109Result<()> {
        self.bus.write_register(WDOG_REFRESH, WDOG_REFRESH_MAGIC)?;
        Ok(())
    }

    fn set_timeout(&self, seconds: u32) -> Sd109Result<()> {
        if seconds == 0 || seconds > MAX_TIMEOUT_SECONDS {
            return Err(Sd109Error::invalid_argument(format!(
                "watchdog timeout {seconds}s outside 1..={MAX_TIMEOUT_SECONDS}s"
            )));
        }
        let timeout = seconds as u8;

        let mut state = self.watchdog.lock();
        let packed = pack_timeout_register(timeout, state.wait_seconds);
        self.bus.write_register(WDOG_TIMEOUT, packed)?;
        state.timeout_seconds = timeout;
        Ok(())
    }

    fn watchdog_state(&self) -> WatchdogState {
        *self.watchdog.lock()
    }
}
