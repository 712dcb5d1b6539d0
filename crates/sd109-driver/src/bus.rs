//! Register bus abstraction.
//!
//! The SD109 sits on a two-wire bus and is addressed as a flat file of
//! 16-bit registers behind 8-bit addresses. The driver core only ever sees
//! this trait; the concrete transport (I2C, a captured trace, the mock
//! below) is bound by the adapter layer.

use thiserror::Error;

/// Errors surfaced by a register bus transport.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BusError {
    /// Address outside the chip's register window.
    #[error("register address {addr:#04x} outside the device window")]
    InvalidAddress {
        /// The offending address.
        addr: u8,
    },

    /// A register read transaction failed.
    #[error("failed to read register {addr:#04x}")]
    Read {
        /// Register address of the failed transaction.
        addr: u8,
    },

    /// A register write transaction failed.
    #[error("failed to write register {addr:#04x}")]
    Write {
        /// Register address of the failed transaction.
        addr: u8,
    },

    /// Transport-level fault not tied to a single transaction.
    #[error("bus transport fault: {0}")]
    Io(String),
}

/// Synchronous 16-bit register access.
///
/// Both operations either complete or return an error promptly; no timeout
/// or cancellation is modeled beyond what the transport itself provides.
pub trait RegisterBus: Send + Sync {
    /// Read the 16-bit register at `addr`.
    ///
    /// # Errors
    ///
    /// Returns a [`BusError`] when the transaction fails.
    fn read_register(&self, addr: u8) -> Result<u16, BusError>;

    /// Write `value` to the 16-bit register at `addr`.
    ///
    /// # Errors
    ///
    /// Returns a [`BusError`] when the transaction fails.
    fn write_register(&self, addr: u8, value: u16) -> Result<(), BusError>;
}

pub mod mock {
    //! In-memory register bus for tests and hardware-free development.

    use super::{BusError, RegisterBus};
    use sd109_protocol::regs::NUM_REGS;
    use std::collections::HashSet;
    use std::sync::{Arc, Mutex};

    /// Mock register file with fault injection and transaction history.
    ///
    /// Clones share state, so a test can keep a handle while the session
    /// owns another.
    #[derive(Debug, Clone)]
    pub struct MockRegisterBus {
        regs: Arc<Mutex<[u16; NUM_REGS as usize]>>,
        read_log: Arc<Mutex<Vec<u8>>>,
        write_log: Arc<Mutex<Vec<(u8, u16)>>>,
        fail_reads: Arc<Mutex<HashSet<u8>>>,
        fail_writes: Arc<Mutex<HashSet<u8>>>,
    }

    impl MockRegisterBus {
        /// Create a mock with every register zeroed.
        #[must_use]
        pub fn new() -> Self {
            Self {
                regs: Arc::new(Mutex::new([0; NUM_REGS as usize])),
                read_log: Arc::new(Mutex::new(Vec::new())),
                write_log: Arc::new(Mutex::new(Vec::new())),
                fail_reads: Arc::new(Mutex::new(HashSet::new())),
                fail_writes: Arc::new(Mutex::new(HashSet::new())),
            }
        }

        /// Preload a register value without logging a write.
        pub fn set_register(&self, addr: u8, value: u16) {
            let mut regs = self.regs.lock().unwrap_or_else(|e| e.into_inner());
            if let Some(slot) = regs.get_mut(addr as usize) {
                *slot = value;
            }
        }

        /// Current value of a register, bypassing fault injection.
        #[must_use]
        pub fn register(&self, addr: u8) -> u16 {
            let regs = self.regs.lock().unwrap_or_else(|e| e.into_inner());
            regs.get(addr as usize).copied().unwrap_or(0)
        }

        /// Make every read of `addr` fail until cleared.
        pub fn fail_reads_at(&self, addr: u8) {
            let mut set = self.fail_reads.lock().unwrap_or_else(|e| e.into_inner());
            set.insert(addr);
        }

        /// Make every write of `addr` fail until cleared.
        pub fn fail_writes_at(&self, addr: u8) {
            let mut set = self.fail_writes.lock().unwrap_or_else(|e| e.into_inner());
            set.insert(addr);
        }

        /// Clear all injected faults.
        pub fn clear_faults(&self) {
            self.fail_reads
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .clear();
            self.fail_writes
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .clear();
        }

        /// Addresses of every read attempted, in order (including failed ones).
        #[must_use]
        pub fn read_log(&self) -> Vec<u8> {
            self.read_log
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .clone()
        }

        /// Every successful write, in order.
        #[must_use]
        pub fn write_log(&self) -> Vec<(u8, u16)> {
            self.write_log
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .clone()
        }

        /// Number of reads attempted at `addr`.
        #[must_use]
        pub fn reads_of(&self, addr: u8) -> usize {
            self.read_log
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .iter()
                .filter(|&&a| a == addr)
                .count()
        }

        /// Successful writes to `addr`, in order.
        #[must_use]
        pub fn writes_to(&self, addr: u8) -> Vec<u16> {
            self.write_log
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .iter()
                .filter(|(a, _)| *a == addr)
                .map(|(_, v)| *v)
                .collect()
        }

        /// Drop the accumulated read/write history.
        pub fn clear_history(&self) {
            self.read_log
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .clear();
            self.write_log
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .clear();
        }
    }

    impl Default for MockRegisterBus {
        fn default() -> Self {
            Self::new()
        }
    }

    impl RegisterBus for MockRegisterBus {
        fn read_register(&self, addr: u8) -> Result<u16, BusError> {
            if addr >= NUM_REGS {
                return Err(BusError::InvalidAddress { addr });
            }
            self.read_log
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .push(addr);
            let failing = self
                .fail_reads
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .contains(&addr);
            if failing {
                return Err(BusError::Read { addr });
            }
            let regs = self.regs.lock().unwrap_or_else(|e| e.into_inner());
            Ok(regs.get(addr as usize).copied().unwrap_or(0))
        }

        fn write_register(&self, addr: u8, value: u16) -> Result<(), BusError> {
            if addr >= NUM_REGS {
                return Err(BusError::InvalidAddress { addr });
            }
            let failing = self
                .fail_writes
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .contains(&addr);
            if failing {
                return Err(BusError::Write { addr });
            }
            let mut regs = self.regs.lock().unwrap_or_else(|e| e.into_inner());
            if let Some(slot) = regs.get_mut(addr as usize) {
                *slot = value;
            }
            self.write_log
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .push((addr, value));
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::MockRegisterBus;
    use super::*;

    #[test]
    fn test_mock_read_write() -> Result<(), BusError> {
        let bus = MockRegisterBus::new();
        bus.write_register(0x0A, 4981)?;
        assert_eq!(bus.read_register(0x0A)?, 4981);
        assert_eq!(bus.write_log(), vec![(0x0A, 4981)]);
        assert_eq!(bus.read_log(), vec![0x0A]);
        Ok(())
    }

    #[test]
    fn test_mock_rejects_out_of_window_address() {
        let bus = MockRegisterBus::new();
        assert_eq!(
            bus.read_register(0x20),
            Err(BusError::InvalidAddress { addr: 0x20 })
        );
        assert_eq!(
            bus.write_register(0xFF, 1),
            Err(BusError::InvalidAddress { addr: 0xFF })
        );
    }

    #[test]
    fn test_mock_fault_injection() {
        let bus = MockRegisterBus::new();
        bus.set_register(0x0A, 42);
        bus.fail_reads_at(0x0A);
        assert_eq!(bus.read_register(0x0A), Err(BusError::Read { addr: 0x0A }));
        // Failed reads still count as attempted transactions.
        assert_eq!(bus.reads_of(0x0A), 1);

        bus.clear_faults();
        assert_eq!(bus.read_register(0x0A), Ok(42));
    }

    #[test]
    fn test_mock_failed_write_leaves_register_untouched() {
        let bus = MockRegisterBus::new();
        bus.set_register(0x09, 0x0C1E);
        bus.fail_writes_at(0x09);
        assert!(bus.write_register(0x09, 0xFFFF).is_err());
        assert_eq!(bus.register(0x09), 0x0C1E);
        assert!(bus.writes_to(0x09).is_empty());
    }

    #[test]
    fn test_clones_share_state() -> Result<(), BusError> {
        let bus = MockRegisterBus::new();
        let handle = bus.clone();
        bus.write_register(0x06, 0x04)?;
        assert_eq!(handle.writes_to(0x06), vec![0x04]);
        Ok(())
    }
}
