//! Register addresses and command codes for the SD109 register file.

/// Total number of 16-bit registers in the address space.
pub const NUM_REGS: u8 = 32;

/// Chip identity register. Must read [`CHIP_ID_MAGIC`] on a genuine SD109.
pub const CHIP_ID: u8 = 0x00;
/// Expected contents of the identity register.
pub const CHIP_ID_MAGIC: u16 = 0xD109;
/// Firmware version register.
pub const FIRMWARE_VERSION: u8 = 0x01;
/// Boot status register; see [`crate::status`].
pub const BOOT_STATUS: u8 = 0x02;

/// Command register. Accepts the codes in [`Command`].
pub const COMMAND: u8 = 0x06;

/// Watchdog refresh register. Writing [`WDOG_REFRESH_MAGIC`] pings the dog.
pub const WDOG_REFRESH: u8 = 0x08;
/// Magic refresh value; anything else is ignored by the firmware.
pub const WDOG_REFRESH_MAGIC: u16 = 0x0D1E;
/// Packed watchdog timeout/wait register; see [`crate::watchdog`].
pub const WDOG_TIMEOUT: u8 = 0x09;

/// First voltage register (channel 0, instant value). Channels follow at a
/// 3-register stride; see [`crate::channels`].
pub const VOLTAGE_BASE: u8 = 0x0A;

/// RTC time, bits 0-15.
pub const RTC0: u8 = 0x1A;
/// RTC time, bits 16-31.
pub const RTC1: u8 = 0x1B;
/// RTC time, bits 32-47.
pub const RTC2: u8 = 0x1C;
/// Wake alarm, bits 0-15.
pub const WAKEUP0: u8 = 0x1D;
/// Wake alarm, bits 16-31.
pub const WAKEUP1: u8 = 0x1E;
/// Wake alarm, bits 32-47.
pub const WAKEUP2: u8 = 0x1F;

/// Command codes accepted by the [`COMMAND`] register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[repr(u16)]
pub enum Command {
    /// Arm the hardware watchdog.
    WatchdogEnable = 0x01,
    /// Disarm the hardware watchdog.
    WatchdogDisable = 0x02,
    /// Cut board power once the host has finished powering down.
    PowerOff = 0x03,
    /// Cycle board power for a host reboot.
    Reboot = 0x04,
    /// Hold the board in the halted state.
    Halt = 0x05,
}

impl Command {
    /// Wire encoding of the command.
    #[must_use]
    pub fn to_raw(self) -> u16 {
        self as u16
    }
}
