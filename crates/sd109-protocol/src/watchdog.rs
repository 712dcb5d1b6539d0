//! Watchdog timeout/wait field packing.
//!
//! Register 0x09 carries both watchdog parameters: the timeout in seconds
//! in the low byte and the boot grace period in the high byte, quantized
//! to 5-second steps (the wire field holds `wait / 5`).

/// Low-byte mask: timeout seconds.
pub const TIMEOUT_MASK: u16 = 0x00FF;
/// High-byte mask: wait in 5-second steps.
pub const WAIT_MASK: u16 = 0xFF00;
/// Bit position of the wait field.
pub const WAIT_POS: u16 = 8;

/// Wire quantum of the wait field, in seconds.
pub const WAIT_STEP_SECONDS: u8 = 5;
/// Shortest wait the firmware honors; configured values below this count
/// as "not configured" and the device's persisted value is used instead.
pub const MIN_WAIT_SECONDS: u8 = 45;
/// Largest timeout the low byte can carry.
pub const MAX_TIMEOUT_SECONDS: u32 = 255;

/// Pack timeout and wait seconds into the wire register value.
///
/// The wait is truncated to a multiple of [`WAIT_STEP_SECONDS`] by the
/// wire encoding.
#[must_use]
pub fn pack_timeout_register(timeout_seconds: u8, wait_seconds: u8) -> u16 {
    let wait_field = u16::from(wait_seconds / WAIT_STEP_SECONDS) << WAIT_POS & WAIT_MASK;
    wait_field | u16::from(timeout_seconds) & TIMEOUT_MASK
}

/// Unpack a wire register value into `(timeout_seconds, wait_seconds)`.
#[must_use]
pub fn unpack_timeout_register(raw: u16) -> (u8, u8) {
    let timeout = (raw & TIMEOUT_MASK) as u8;
    let wait = ((raw & WAIT_MASK) >> WAIT_POS) as u8;
    (timeout, wait.saturating_mul(WAIT_STEP_SECONDS))
}
