//! Driver core for the SD109 board-management companion chip.
//!
//! The SD109 exposes voltage telemetry, a hardware watchdog, and an RTC
//! with a wake alarm through a flat 16-bit register file on a two-wire
//! bus. This crate turns that register file into three independent,
//! stateful abstractions behind the [`RegisterBus`] trait:
//!
//! - [`SensorSource`] — per-rail voltage readings with a 1 s staleness
//!   cache behind one session-wide lock,
//! - [`WatchdogControl`] — start/stop/ping and the packed timeout/wait
//!   register, with attach-time reconciliation against supplied
//!   configuration,
//! - [`ClockControl`] — the 48-bit clock and wake alarm split across
//!   three-word register triples,
//!
//! plus the shutdown notifier ([`Sd109Session::on_power_event`]) that maps
//! host power transitions onto the command register.
//!
//! The bus transport, device discovery, and host-framework registration
//! (hwmon/watchdog/RTC) are external collaborators: an adapter layer binds
//! the three traits to whatever host is in use. Nothing here spawns
//! background tasks; every transition is driven synchronously by a caller.
//!
//! ## Example
//!
//! ```rust
//! use sd109_driver::bus::mock::MockRegisterBus;
//! use sd109_driver::{Sd109Config, Sd109Session, SensorSource, VoltageKind};
//!
//! # fn main() -> Result<(), sd109_driver::Sd109Error> {
//! let bus = MockRegisterBus::new();
//! bus.set_register(0x00, 0xD109); // identity
//! bus.set_register(0x02, 0x0001); // booted from power-up
//! bus.set_register(0x0A, 5021); // BOARD 5V rail, millivolts
//!
//! let session = Sd109Session::attach(bus, Sd109Config::default())?;
//! assert_eq!(session.read_millivolts(0, VoltageKind::Instant)?, 5021);
//! assert_eq!(session.channel_label(0)?, "BOARD 5V");
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(static_mut_refs)]
#![deny(missing_docs)]

pub mod bus;
pub mod config;
pub mod error;
pub mod power;
pub mod rtc;
pub mod sensors;
pub mod session;
pub mod watchdog;

pub use bus::{BusError, RegisterBus};
pub use config::{Sd109Config, Sd109ConfigBuilder};
pub use error::{Sd109Error, Sd109Result};
pub use power::PowerEvent;
pub use rtc::{AlarmReading, AlarmState, ClockControl};
pub use sensors::{REFRESH_INTERVAL, SensorSource};
pub use session::{ChipIdentity, Sd109Session};
pub use watchdog::{WatchdogControl, WatchdogState};

// Protocol-level types that appear in this crate's public API.
pub use sd109_protocol::{BootReason, BootStatus, Epoch48, VoltageKind};
