//! Attachment sequence tests: identity gate, boot classification, and
//! watchdog reconciliation.

use sd109_driver::bus::mock::MockRegisterBus;
use sd109_driver::{
    BootReason, Sd109Config, Sd109Error, Sd109Session, WatchdogControl,
};

const CHIP_ID: u8 = 0x00;
const FIRMWARE_VERSION: u8 = 0x01;
const BOOT_STATUS: u8 = 0x02;
const WDOG_TIMEOUT: u8 = 0x09;

fn sd109_bus() -> MockRegisterBus {
    let bus = MockRegisterBus::new();
    bus.set_register(CHIP_ID, 0xD109);
    bus.set_register(FIRMWARE_VERSION, 0x0103);
    bus.set_register(BOOT_STATUS, 0x0005);
    bus
}

#[test]
fn attach_succeeds_on_genuine_chip() -> Result<(), Sd109Error> {
    let bus = sd109_bus();
    let session = Sd109Session::attach(bus, Sd109Config::default())?;
    assert_eq!(session.firmware_version(), 0x0103);
    assert_eq!(session.boot_reason(), BootReason::Wakeup);
    Ok(())
}

#[test]
fn identity_mismatch_aborts_before_any_other_register() {
    let bus = MockRegisterBus::new();
    bus.set_register(CHIP_ID, 0x1234);
    let handle = bus.clone();

    let result = Sd109Session::attach(bus, Sd109Config::default());
    assert!(matches!(
        result,
        Err(Sd109Error::IdentityMismatch {
            expected: 0xD109,
            actual: 0x1234,
        })
    ));
    assert_eq!(handle.read_log(), vec![CHIP_ID]);
}

#[test]
fn transport_fault_during_version_read_aborts_attach() {
    let bus = sd109_bus();
    bus.fail_reads_at(FIRMWARE_VERSION);

    let result = Sd109Session::attach(bus, Sd109Config::default());
    assert!(matches!(result, Err(Sd109Error::Transport(_))));
}

#[test]
fn transport_fault_during_status_read_aborts_attach() {
    let bus = sd109_bus();
    bus.fail_reads_at(BOOT_STATUS);

    let result = Sd109Session::attach(bus, Sd109Config::default());
    assert!(matches!(result, Err(Sd109Error::Transport(_))));
}

#[test]
fn unknown_boot_code_does_not_fail_attach() -> Result<(), Sd109Error> {
    let bus = sd109_bus();
    bus.set_register(BOOT_STATUS, 0x0077);

    let session = Sd109Session::attach(bus, Sd109Config::default())?;
    assert_eq!(session.boot_reason(), BootReason::Unknown);
    assert_eq!(session.identity().boot.raw, 0x0077);
    Ok(())
}

#[test]
fn boot_status_reports_watchdog_armed_bit() -> Result<(), Sd109Error> {
    let bus = sd109_bus();
    bus.set_register(BOOT_STATUS, 0x0008 | 0x0003);

    let session = Sd109Session::attach(bus, Sd109Config::default())?;
    assert!(session.identity().boot.watchdog_enabled);
    Ok(())
}

#[test]
fn attach_adopts_persisted_watchdog_values() -> Result<(), Sd109Error> {
    let bus = sd109_bus();
    // 45s timeout, 50s wait persisted in the device.
    bus.set_register(WDOG_TIMEOUT, 0x0A2D);
    let handle = bus.clone();

    let session = Sd109Session::attach(bus, Sd109Config::default())?;
    let state = session.watchdog_state();
    assert_eq!(state.timeout_seconds, 45);
    assert_eq!(state.wait_seconds, 50);
    assert!(!state.running);
    assert!(handle.writes_to(WDOG_TIMEOUT).is_empty());
    Ok(())
}

#[test]
fn configured_timeout_overrides_device_and_writes_back() -> Result<(), Sd109Error> {
    let bus = sd109_bus();
    bus.set_register(WDOG_TIMEOUT, 0x0A2D);
    let handle = bus.clone();

    let config = Sd109Config::builder()
        .watchdog_enabled(true)
        .watchdog_timeout_seconds(120)
        .build();
    let session = Sd109Session::attach(bus, config)?;

    let state = session.watchdog_state();
    assert_eq!(state.timeout_seconds, 120);
    assert_eq!(state.device_timeout_seconds, 45);
    // Low byte new timeout, high byte the device's wait / 5.
    assert_eq!(handle.writes_to(WDOG_TIMEOUT), vec![0x0A78]);
    Ok(())
}

#[test]
fn nowayout_flag_is_carried_into_state() -> Result<(), Sd109Error> {
    let bus = sd109_bus();
    let config = Sd109Config::builder().watchdog_nowayout(true).build();
    let session = Sd109Session::attach(bus, config)?;
    assert!(session.watchdog_state().nowayout);
    Ok(())
}

#[test]
fn config_round_trips_through_serde() -> Result<(), serde_json::Error> {
    let config = Sd109Config::builder()
        .watchdog_enabled(true)
        .watchdog_timeout_seconds(30)
        .rtc_enabled(true)
        .build();
    let json = serde_json::to_string(&config)?;
    let back: Sd109Config = serde_json::from_str(&json)?;
    assert_eq!(back, config);
    Ok(())
}
