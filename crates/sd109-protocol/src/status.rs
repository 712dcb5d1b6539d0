//! Boot status register classification.
//!
//! Register 0x02 reports why the chip last (re)started the board. The low
//! bits carry a reason code; bit 3 reports whether the firmware watchdog
//! was already armed when the host came up.

/// Mask covering the boot reason code bits.
pub const BOOT_REASON_MASK: u16 = 0x0007;
/// Set when the firmware watchdog was armed at boot.
pub const STATUS_WDOG_ENABLED: u16 = 0x0008;

/// Why the chip last brought the board up.
///
/// Unrecognized codes classify as [`BootReason::Unknown`]; an unknown code
/// is worth reporting but must not fail attachment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum BootReason {
    /// Cold start from mains power.
    PowerUp,
    /// Restart after a commanded power-off.
    PowerOff,
    /// Restart after a commanded reboot.
    Reboot,
    /// Restart out of the halted state.
    Halt,
    /// Woken by the RTC alarm.
    Wakeup,
    /// Code not defined by this protocol revision.
    #[default]
    Unknown,
}

impl BootReason {
    /// Classify a raw status register value.
    ///
    /// The firmware reports the reason as the whole register value, so the
    /// match is direct rather than masked; a register with extra bits set
    /// (for example [`STATUS_WDOG_ENABLED`]) reads as [`BootReason::Unknown`],
    /// matching the chip documentation.
    #[must_use]
    pub fn from_raw(raw: u16) -> Self {
        match raw {
            0x0001 => Self::PowerUp,
            0x0002 => Self::PowerOff,
            0x0003 => Self::Reboot,
            0x0004 => Self::Halt,
            0x0005 => Self::Wakeup,
            _ => Self::Unknown,
        }
    }

    /// Get the reason as a string slice.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PowerUp => "POWER-UP",
            Self::PowerOff => "POWER-OFF",
            Self::Reboot => "REBOOT",
            Self::Halt => "HALT",
            Self::Wakeup => "WAKEUP",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl core::fmt::Display for BootReason {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Decoded contents of the boot status register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BootStatus {
    /// Classified boot reason.
    pub reason: BootReason,
    /// Watchdog-armed-at-boot flag (bit 3).
    pub watchdog_enabled: bool,
    /// Raw register value, kept for diagnostics.
    pub raw: u16,
}

impl BootStatus {
    /// Decode a raw status register value.
    #[must_use]
    pub fn from_raw(raw: u16) -> Self {
        Self {
            reason: BootReason::from_raw(raw),
            watchdog_enabled: raw & STATUS_WDOG_ENABLED != 0,
            raw,
        }
    }
}
