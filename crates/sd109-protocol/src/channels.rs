//! Voltage channel addressing and labels.
//!
//! The chip monitors five fixed rails. Each channel owns three consecutive
//! registers starting at [`crate::regs::VOLTAGE_BASE`]: the instantaneous
//! value, the minimum seen, and the maximum seen, all in millivolts.

use crate::regs::VOLTAGE_BASE;

/// Number of monitored voltage rails.
pub const CHANNEL_COUNT: usize = 5;
/// Registers occupied by each channel.
pub const CHANNEL_STRIDE: u8 = 3;

/// Which of a channel's three registers to address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum VoltageKind {
    /// Instantaneous reading.
    Instant,
    /// Minimum reading since power-up.
    Min,
    /// Maximum reading since power-up.
    Max,
}

impl VoltageKind {
    /// All kinds, in register order.
    pub const ALL: [Self; 3] = [Self::Instant, Self::Min, Self::Max];

    /// Offset of this kind within a channel's register triple.
    #[must_use]
    pub fn offset(self) -> u8 {
        match self {
            Self::Instant => 0,
            Self::Min => 1,
            Self::Max => 2,
        }
    }

    /// Dense index for per-kind cache arrays.
    #[must_use]
    pub fn index(self) -> usize {
        self.offset() as usize
    }
}

/// Register address of one channel reading, or `None` for an out-of-range
/// channel index.
#[must_use]
pub fn channel_register(kind: VoltageKind, channel: usize) -> Option<u8> {
    if channel >= CHANNEL_COUNT {
        return None;
    }
    Some(VOLTAGE_BASE + (channel as u8) * CHANNEL_STRIDE + kind.offset())
}

/// Human-readable rail name, or `None` for an out-of-range channel index.
///
/// Pure lookup; never touches the device.
#[must_use]
pub fn channel_label(channel: usize) -> Option<&'static str> {
    match channel {
        0 => Some("BOARD 5V"),
        1 => Some("SoC 5V"),
        2 => Some("SoC 3V3"),
        3 => Some("SoC 1V8"),
        4 => Some("Vin 24V"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_zero_triple() {
        assert_eq!(channel_register(VoltageKind::Instant, 0), Some(0x0A));
        assert_eq!(channel_register(VoltageKind::Min, 0), Some(0x0B));
        assert_eq!(channel_register(VoltageKind::Max, 0), Some(0x0C));
    }

    #[test]
    fn test_stride() {
        assert_eq!(channel_register(VoltageKind::Instant, 1), Some(0x0D));
        assert_eq!(channel_register(VoltageKind::Instant, 4), Some(0x16));
    }

    #[test]
    fn test_out_of_range_channel() {
        assert_eq!(channel_register(VoltageKind::Instant, CHANNEL_COUNT), None);
        assert_eq!(channel_label(CHANNEL_COUNT), None);
    }

    #[test]
    fn test_labels() {
        let labels: Vec<_> = (0..CHANNEL_COUNT).map(channel_label).collect();
        assert_eq!(
            labels,
            [
                Some("BOARD 5V"),
                Some("SoC 5V"),
                Some("SoC 3V3"),
                Some("SoC 1V8"),
                Some("Vin 24V"),
            ]
        );
    }
}
