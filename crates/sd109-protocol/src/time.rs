//! 48-bit epoch codec for the RTC and wake-alarm register triples.
//!
//! The chip stores time as a 48-bit seconds counter split across three
//! little-endian 16-bit words. The same layout serves both the live clock
//! (registers 0x1A..0x1C) and the wake alarm (0x1D..0x1F).

use thiserror::Error;

/// Largest epoch value the three 16-bit words can carry.
pub const EPOCH48_MAX: u64 = 0x0000_FFFF_FFFF_FFFF;

/// Value rejected because it does not fit in 48 bits.
///
/// Range checking happens at construction so an out-of-range input can
/// never trigger a partial multi-word write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("epoch value {0:#x} exceeds the 48-bit device range")]
pub struct EpochOutOfRange(pub u64);

/// A 48-bit count of seconds since the epoch, in the chip's native layout.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(transparent)]
pub struct Epoch48(u64);

impl Epoch48 {
    /// Validate and wrap an epoch value.
    ///
    /// # Errors
    ///
    /// Returns [`EpochOutOfRange`] when the value exceeds [`EPOCH48_MAX`].
    pub fn new(seconds: u64) -> Result<Self, EpochOutOfRange> {
        if seconds > EPOCH48_MAX {
            return Err(EpochOutOfRange(seconds));
        }
        Ok(Self(seconds))
    }

    /// Reassemble an epoch from the three device words, lowest word first.
    #[must_use]
    pub fn from_words(words: [u16; 3]) -> Self {
        let value = u64::from(words[0]) | u64::from(words[1]) << 16 | u64::from(words[2]) << 32;
        Self(value)
    }

    /// Split into the three device words, lowest word first.
    ///
    /// Words are written to the device in this (ascending-address) order.
    #[must_use]
    pub fn to_words(self) -> [u16; 3] {
        [
            (self.0 & 0xFFFF) as u16,
            (self.0 >> 16 & 0xFFFF) as u16,
            (self.0 >> 32 & 0xFFFF) as u16,
        ]
    }

    /// The epoch value in seconds.
    #[must_use]
    pub fn as_secs(self) -> u64 {
        self.0
    }
}

impl core::fmt::Display for Epoch48 {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u64> for Epoch48 {
    type Error = EpochOutOfRange;

    fn try_from(seconds: u64) -> Result<Self, Self::Error> {
        Self::new(seconds)
    }
}
