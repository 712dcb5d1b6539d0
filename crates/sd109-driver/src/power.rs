//! Shutdown notifier.
//!
//! During a host power transition the chip needs to be told what comes
//! next so it can sequence board power (cut it, cycle it, or hold the
//! halted state). The handler is a plain method registered with the host's
//! power-event mechanism by the adapter layer; there is no global notifier
//! state in this core.

use crate::bus::RegisterBus;
use crate::session::Sd109Session;
use sd109_protocol::regs::COMMAND;
use sd109_protocol::Command;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Host power-transition events the notifier understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerEvent {
    /// The host is powering off.
    PowerOff,
    /// The host is restarting.
    Restart,
    /// The host is halting.
    Halt,
    /// The host is suspending; the chip keeps board power, nothing to do.
    Suspend,
}

impl PowerEvent {
    /// Command code for this event, or `None` for events the chip does not
    /// participate in.
    #[must_use]
    pub fn command(self) -> Option<Command> {
        match self {
            Self::PowerOff => Some(Command::PowerOff),
            Self::Restart => Some(Command::Reboot),
            Self::Halt => Some(Command::Halt),
            Self::Suspend => None,
        }
    }
}

impl<B: RegisterBus> Sd109Session<B> {
    /// Notify the chip of a host power transition.
    ///
    /// Issues at most one command-register write. A transport failure is
    /// logged and swallowed: there is no way to escalate during an
    /// unstoppable power transition, and this handler must never block or
    /// delay it.
    pub fn on_power_event(&self, event: PowerEvent) {
        let Some(command) = event.command() else {
            return;
        };
        if let Err(e) = self.bus.write_register(COMMAND, command.to_raw()) {
            warn!("unable to write shutdown command {command:?}: {e}");
        }
    }
}
