//! Attachment configuration.
//!
//! The driver does not parse any configuration source itself. Whatever the
//! host uses (device-tree overlay, config file, command line) is reduced by
//! the adapter layer to this plain struct before attach.

use serde::{Deserialize, Serialize};

/// Externally supplied configuration consumed at attach time.
///
/// `None` means "not configured": the value last programmed into the device
/// stays authoritative. A configured watchdog value wins and is written
/// back to the device during attach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Sd109Config {
    /// Whether the adapter layer should expose the watchdog at all.
    pub watchdog_enabled: bool,
    /// Watchdog timeout override in seconds.
    pub watchdog_timeout_seconds: Option<u8>,
    /// Watchdog boot grace period override in seconds. Values below the
    /// 45-second firmware floor count as not configured.
    pub watchdog_wait_seconds: Option<u8>,
    /// Forbid disarming the watchdog once started (adapter-layer policy).
    pub watchdog_nowayout: bool,
    /// Whether the adapter layer should expose the RTC.
    pub rtc_enabled: bool,
}

impl Sd109Config {
    /// Create a configuration builder.
    #[must_use]
    pub fn builder() -> Sd109ConfigBuilder {
        Sd109ConfigBuilder::default()
    }
}

/// Builder for [`Sd109Config`].
#[derive(Debug, Default)]
pub struct Sd109ConfigBuilder {
    config: Sd109Config,
}

impl Sd109ConfigBuilder {
    /// Expose the watchdog.
    #[must_use]
    pub fn watchdog_enabled(mut self, enabled: bool) -> Self {
        self.config.watchdog_enabled = enabled;
        self
    }

    /// Override the watchdog timeout in seconds.
    #[must_use]
    pub fn watchdog_timeout_seconds(mut self, seconds: u8) -> Self {
        self.config.watchdog_timeout_seconds = Some(seconds);
        self
    }

    /// Override the watchdog boot grace period in seconds.
    #[must_use]
    pub fn watchdog_wait_seconds(mut self, seconds: u8) -> Self {
        self.config.watchdog_wait_seconds = Some(seconds);
        self
    }

    /// Forbid disarming the watchdog once started.
    #[must_use]
    pub fn watchdog_nowayout(mut self, nowayout: bool) -> Self {
        self.config.watchdog_nowayout = nowayout;
        self
    }

    /// Expose the RTC.
    #[must_use]
    pub fn rtc_enabled(mut self, enabled: bool) -> Self {
        self.config.rtc_enabled = enabled;
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> Sd109Config {
        self.config
    }
}
