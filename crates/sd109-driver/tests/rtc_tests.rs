//! RTC and wake-alarm tests over the mock bus.

use proptest::prelude::*;
use sd109_driver::bus::mock::MockRegisterBus;
use sd109_driver::{ClockControl, Sd109Config, Sd109Error, Sd109Session};

const RTC0: u8 = 0x1A;
const RTC1: u8 = 0x1B;
const RTC2: u8 = 0x1C;
const WAKEUP0: u8 = 0x1D;
const WAKEUP1: u8 = 0x1E;
const WAKEUP2: u8 = 0x1F;

const EPOCH48_MAX: u64 = 0x0000_FFFF_FFFF_FFFF;

fn attached_session() -> (Sd109Session<MockRegisterBus>, MockRegisterBus) {
    let bus = MockRegisterBus::new();
    bus.set_register(0x00, 0xD109);
    bus.set_register(0x02, 0x0001);
    let handle = bus.clone();
    let session =
        Sd109Session::attach(bus, Sd109Config::default()).expect("attach should succeed");
    handle.clear_history();
    (session, handle)
}

#[test]
fn set_time_writes_three_words_ascending() -> Result<(), Sd109Error> {
    let (session, bus) = attached_session();
    session.set_time(0x1234_5678_9ABC)?;
    assert_eq!(
        bus.write_log(),
        vec![(RTC0, 0x9ABC), (RTC1, 0x5678), (RTC2, 0x1234)]
    );
    Ok(())
}

#[test]
fn time_round_trips_at_the_48_bit_boundary() -> Result<(), Sd109Error> {
    let (session, _bus) = attached_session();
    session.set_time(EPOCH48_MAX)?;
    assert_eq!(session.read_time()?.as_secs(), EPOCH48_MAX);
    Ok(())
}

#[test]
fn set_time_over_48_bits_issues_zero_writes() {
    let (session, bus) = attached_session();
    let result = session.set_time(EPOCH48_MAX + 1);
    assert!(matches!(result, Err(Sd109Error::InvalidArgument(_))));
    assert!(bus.write_log().is_empty());
}

#[test]
fn set_time_aborts_on_first_failed_word() {
    let (session, bus) = attached_session();
    bus.fail_writes_at(RTC1);

    let result = session.set_time(0xFFFF_FFFF_FFFF);
    assert!(matches!(result, Err(Sd109Error::Transport(_))));
    // Word 0 landed, word 2 was never attempted.
    assert_eq!(bus.write_log(), vec![(RTC0, 0xFFFF)]);
}

#[test]
fn read_time_fails_fast_on_word_error() {
    let (session, bus) = attached_session();
    bus.fail_reads_at(RTC2);

    let result = session.read_time();
    assert!(matches!(result, Err(Sd109Error::Transport(_))));
    assert_eq!(bus.read_log(), vec![RTC0, RTC1, RTC2]);
}

#[test]
fn alarm_uses_its_own_register_triple() -> Result<(), Sd109Error> {
    let (session, bus) = attached_session();
    session.set_alarm(0x0001_0002_0003, true, false)?;
    assert_eq!(
        bus.write_log(),
        vec![(WAKEUP0, 0x0003), (WAKEUP1, 0x0002), (WAKEUP2, 0x0001)]
    );
    Ok(())
}

#[test]
fn alarm_flags_follow_the_last_set_alarm_call() -> Result<(), Sd109Error> {
    let (session, _bus) = attached_session();
    session.set_alarm(1000, true, true)?;

    let reading = session.read_alarm()?;
    assert_eq!(reading.time.as_secs(), 1000);
    assert!(reading.enabled);
    assert!(reading.pending);
    Ok(())
}

#[test]
fn alarm_flags_record_intent_even_when_writes_fail() -> Result<(), Sd109Error> {
    let (session, bus) = attached_session();
    bus.fail_writes_at(WAKEUP0);

    assert!(session.set_alarm(2000, true, false).is_err());

    bus.clear_faults();
    let reading = session.read_alarm()?;
    assert!(reading.enabled);
    assert!(!reading.pending);
    Ok(())
}

#[test]
fn alarm_flags_record_intent_even_for_out_of_range_time() -> Result<(), Sd109Error> {
    let (session, bus) = attached_session();

    let result = session.set_alarm(EPOCH48_MAX + 1, true, true);
    assert!(matches!(result, Err(Sd109Error::InvalidArgument(_))));
    assert!(bus.write_log().is_empty());

    let reading = session.read_alarm()?;
    assert!(reading.enabled);
    assert!(reading.pending);
    Ok(())
}

#[test]
fn disabling_the_alarm_clears_the_wake_words() -> Result<(), Sd109Error> {
    let (session, bus) = attached_session();
    session.set_alarm(0xABCD_EF01_2345, true, false)?;

    session.set_alarm_enabled(false)?;
    assert_eq!(session.read_alarm()?.time.as_secs(), 0);
    assert_eq!(bus.writes_to(WAKEUP0).last(), Some(&0));
    assert_eq!(bus.writes_to(WAKEUP1).last(), Some(&0));
    assert_eq!(bus.writes_to(WAKEUP2).last(), Some(&0));
    Ok(())
}

#[test]
fn disabling_is_best_effort_on_word_failures() -> Result<(), Sd109Error> {
    let (session, bus) = attached_session();
    session.set_alarm(0xABCD_EF01_2345, true, false)?;
    bus.fail_writes_at(WAKEUP1);

    // Failure on the middle word is swallowed; the other words still clear.
    session.set_alarm_enabled(false)?;
    assert_eq!(bus.register(WAKEUP0), 0);
    assert_eq!(bus.register(WAKEUP1), 0xEF01); // middle word left as it was
    assert_eq!(bus.register(WAKEUP2), 0);

    // The software flags are not touched by the toggle.
    bus.clear_faults();
    assert!(session.read_alarm()?.enabled);
    Ok(())
}

#[test]
fn enabling_the_alarm_touches_no_register() -> Result<(), Sd109Error> {
    let (session, bus) = attached_session();
    session.set_alarm_enabled(true)?;
    assert!(bus.write_log().is_empty());
    Ok(())
}

proptest! {
    #[test]
    fn set_then_read_time_round_trips(value in 0..=EPOCH48_MAX) {
        let (session, _bus) = attached_session();
        session.set_time(value).map_err(|e| TestCaseError::fail(e.to_string()))?;
        let read = session
            .read_time()
            .map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert_eq!(read.as_secs(), value);
    }

    #[test]
    fn set_time_rejects_everything_above_48_bits(value in EPOCH48_MAX + 1..=u64::MAX) {
        let (session, bus) = attached_session();
        prop_assert!(session.set_time(value).is_err());
        prop_assert!(bus.write_log().is_empty());
    }
}
