//! Register protocol for the SD109 board-management companion chip.
//!
//! The SD109 is a small microcontroller that sits next to the SoC on a
//! carrier board and exposes voltage telemetry, a hardware watchdog, and a
//! battery-backed real-time clock through a flat 16-bit register file on a
//! two-wire bus (8-bit addresses, 16-bit words).
//!
//! This crate is intentionally I/O-free and allocation-free. It provides
//! pure constants, field packing, and codecs that can be tested and fuzzed
//! without bus plumbing; the stateful driver lives in `sd109-driver`.
//!
//! ## Register map
//!
//! | Addr | Meaning |
//! |------|---------|
//! | 0x00 | Chip ID (must read `0xD109`) |
//! | 0x01 | Firmware version |
//! | 0x02 | Boot status (reason code + watchdog-enabled bit) |
//! | 0x06 | Command (watchdog enable/disable, power-off/reboot/halt) |
//! | 0x08 | Watchdog refresh (write `0x0D1E` to ping) |
//! | 0x09 | Watchdog timeout/wait (low byte seconds, high byte wait/5) |
//! | 0x0A..0x18 | Voltage rails, 3 registers per channel (instant/min/max) |
//! | 0x1A..0x1C | RTC time words 0/1/2 (bits 0-15/16-31/32-47) |
//! | 0x1D..0x1F | Wake-alarm words 0/1/2 |

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(static_mut_refs)]

pub mod channels;
pub mod regs;
pub mod status;
pub mod time;
pub mod watchdog;

pub use channels::{
    CHANNEL_COUNT, CHANNEL_STRIDE, VoltageKind, channel_label, channel_register,
};
pub use regs::Command;
pub use status::{BootReason, BootStatus};
pub use time::{EPOCH48_MAX, Epoch48, EpochOutOfRange};
pub use watchdog::{
    MAX_TIMEOUT_SECONDS, MIN_WAIT_SECONDS, WAIT_STEP_SECONDS, pack_timeout_register,
    unpack_timeout_register,
};
