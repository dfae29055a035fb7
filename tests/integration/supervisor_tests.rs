//! Supervisor: startup ordering, first-exit-wins tasks, recovery policy.

use core::cell::RefCell;
use core::time::Duration;
use std::rc::Rc;

use window_alarm::app::dispatcher::ARMED_REPLY;
use window_alarm::app::monitor::ALERT_TEXT;
use window_alarm::error::{Error, TransportError};
use window_alarm::supervisor::{Exit, Supervisor};

use crate::mocks::{
    LevelContact, MockLed, MockLink, MockReset, MockTimer, RecordingMessenger, ScriptedContact,
    ScriptedUpdates, test_config,
};

const CLOSED: bool = false;
const OPEN: bool = true;

const SECOND: Duration = Duration::from_secs(1);
const READY_FLASH: Duration = Duration::from_millis(500);
const POLL: Duration = Duration::from_millis(100);

struct Rig {
    timer: MockTimer,
    reset: MockReset,
    supervisor: Supervisor<MockTimer, MockReset>,
}

fn rig(debug_mode: bool) -> Rig {
    let timer = MockTimer::default();
    let reset = MockReset::default();
    let mut config = test_config(debug_mode, &[111, 222]);
    config.messaging_token = "test-token".into();
    let supervisor = Supervisor::new(config, timer.clone(), reset.clone());
    Rig {
        timer,
        reset,
        supervisor,
    }
}

fn run_session(
    rig: &mut Rig,
    link: &mut MockLink,
    contact: impl embedded_hal::digital::InputPin,
    led: MockLed,
    updates: ScriptedUpdates,
    messenger: RecordingMessenger,
) -> Exit {
    futures_lite::future::block_on(rig.supervisor.run(link, contact, led, |_token| Ok((updates, messenger))))
}

// ── Network timeout ───────────────────────────────────────────

#[test]
fn production_timeout_waits_five_seconds_then_resets() {
    let mut r = rig(false);
    let mut link = MockLink::new(&r.timer, None);
    let contact = ScriptedContact::new(&[CLOSED]);
    let reads = contact.reads.clone();

    let exit = run_session(
        &mut r,
        &mut link,
        contact,
        MockLed::default(),
        ScriptedUpdates::new(&[]),
        RecordingMessenger::default(),
    );

    assert_eq!(exit, Exit::Reset);
    let mut expected = vec![SECOND; 10];
    expected.push(Duration::from_secs(5));
    assert_eq!(*r.timer.sleeps.borrow(), expected);
    assert_eq!(r.reset.calls.get(), 1);
    assert_eq!(reads.get(), 0, "sensor is not touched without a network");
}

#[test]
fn debug_timeout_halts_without_reset() {
    let mut r = rig(true);
    let mut link = MockLink::new(&r.timer, None);

    let exit = run_session(
        &mut r,
        &mut link,
        LevelContact::default(),
        MockLed::default(),
        ScriptedUpdates::new(&[]),
        RecordingMessenger::default(),
    );

    assert_eq!(exit, Exit::Halted);
    assert_eq!(*r.timer.sleeps.borrow(), vec![SECOND; 10]);
    assert_eq!(r.reset.calls.get(), 0);
}

#[test]
fn link_up_after_three_seconds_starts_session_without_reset() {
    let mut r = rig(true);
    let mut link = MockLink::new(&r.timer, Some(Duration::from_secs(3)));
    let messaging_started = Rc::new(RefCell::new(false));
    let started = messaging_started.clone();

    let exit = futures_lite::future::block_on(r.supervisor.run(
        &mut link,
        ScriptedContact::new(&[CLOSED, CLOSED]),
        MockLed::default(),
        move |_token| {
            *started.borrow_mut() = true;
            Ok((ScriptedUpdates::new(&[]), RecordingMessenger::default()))
        },
    ));

    assert!(*messaging_started.borrow(), "bring-up reported Connected");
    assert_eq!(r.timer.count(SECOND), 3);
    assert_eq!(r.timer.sleeps.borrow()[..4], [SECOND, SECOND, SECOND, READY_FLASH]);
    assert_eq!(r.timer.count(Duration::from_secs(5)), 0, "no network reset delay");
    assert_eq!(r.reset.calls.get(), 0);
    // The session itself ends on the exhausted contact script.
    assert_eq!(exit, Exit::Halted);
}

// ── Runtime faults ────────────────────────────────────────────

#[test]
fn production_sensor_fault_waits_ten_seconds_then_resets() {
    let mut r = rig(false);
    let mut link = MockLink::new(&r.timer, Some(Duration::ZERO));
    let led = MockLed::default();

    let exit = run_session(
        &mut r,
        &mut link,
        ScriptedContact::new(&[CLOSED, CLOSED]),
        led.clone(),
        ScriptedUpdates::new(&[]),
        RecordingMessenger::default(),
    );

    assert_eq!(exit, Exit::Reset);
    assert_eq!(
        *r.timer.sleeps.borrow(),
        vec![READY_FLASH, POLL, Duration::from_secs(10)]
    );
    assert_eq!(*led.history.borrow(), vec![true, false], "ready flash only");
    assert_eq!(r.reset.calls.get(), 1);
}

#[test]
fn debug_sensor_fault_halts() {
    let mut r = rig(true);
    let mut link = MockLink::new(&r.timer, Some(Duration::ZERO));

    let exit = run_session(
        &mut r,
        &mut link,
        ScriptedContact::new(&[CLOSED]),
        MockLed::default(),
        ScriptedUpdates::new(&[]),
        RecordingMessenger::default(),
    );

    assert_eq!(exit, Exit::Halted);
    assert_eq!(r.reset.calls.get(), 0);
    assert!(!r.timer.sleeps.borrow().contains(&Duration::from_secs(10)));
}

#[test]
fn transport_failure_ends_session_first() {
    let mut r = rig(false);
    let mut link = MockLink::new(&r.timer, Some(Duration::ZERO));

    // The contact never fails, so only the receive loop can end the session.
    let exit = run_session(
        &mut r,
        &mut link,
        LevelContact::default(),
        MockLed::default(),
        ScriptedUpdates::new(&[]).then_fail(TransportError::ReadFailed),
        RecordingMessenger::default(),
    );

    assert_eq!(exit, Exit::Reset);
    assert_eq!(r.timer.sleeps.borrow().last(), Some(&Duration::from_secs(10)));
    assert_eq!(r.reset.calls.get(), 1);
}

#[test]
fn messaging_startup_failure_is_a_runtime_fault() {
    let mut r = rig(false);
    let mut link = MockLink::new(&r.timer, Some(Duration::ZERO));
    let contact = ScriptedContact::new(&[CLOSED]);
    let reads = contact.reads.clone();

    let exit = futures_lite::future::block_on(r.supervisor.run(
        &mut link,
        contact,
        MockLed::default(),
        |_token| -> window_alarm::error::Result<(ScriptedUpdates, RecordingMessenger)> {
            Err(Error::Transport(TransportError::SpawnFailed))
        },
    ));

    assert_eq!(exit, Exit::Reset);
    assert_eq!(*r.timer.sleeps.borrow(), vec![Duration::from_secs(10)]);
    assert_eq!(reads.get(), 0);
}

// ── End to end ────────────────────────────────────────────────

#[test]
fn armed_breach_alerts_every_operator() {
    let mut r = rig(false);
    let mut link = MockLink::new(&r.timer, Some(Duration::from_secs(2)));
    let led = MockLed::default();
    let messenger = RecordingMessenger::default();
    let token = Rc::new(RefCell::new(String::new()));

    let seen_token = token.clone();
    let updates = ScriptedUpdates::new(&[(111, "/arm")]);
    let sink = messenger.clone();
    let exit = futures_lite::future::block_on(r.supervisor.run(
        &mut link,
        ScriptedContact::new(&[CLOSED, CLOSED, OPEN, OPEN]),
        led.clone(),
        move |t| {
            seen_token.borrow_mut().push_str(t);
            Ok((updates, sink))
        },
    ));

    assert_eq!(exit, Exit::Reset);
    assert_eq!(*token.borrow(), "test-token");
    assert_eq!(messenger.to(111), vec![ARMED_REPLY, ALERT_TEXT]);
    assert_eq!(messenger.to(222), vec![ALERT_TEXT]);
    assert_eq!(messenger.count_text(ALERT_TEXT), 2, "one alert per operator per edge");
    assert!(led.is_on(), "indicator stays lit until disarm");
    assert_eq!(r.timer.count(SECOND), 2);
}
