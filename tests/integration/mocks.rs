//! Mock adapters for integration tests.
//!
//! Every mock records what the core did to it so tests can assert on the
//! full history without real GPIO, WiFi or a messaging service. Time is
//! virtual: [`MockTimer`] records each sleep and yields once instead of
//! waiting.

#![allow(dead_code)]

use core::cell::{Cell, RefCell};
use core::convert::Infallible;
use core::time::Duration;
use std::collections::VecDeque;
use std::rc::Rc;

use embedded_hal::digital::{ErrorKind, ErrorType, InputPin, OutputPin};
use window_alarm::app::events::{ChatId, InboundMessage};
use window_alarm::app::ports::{Messenger, ResetPort, TimerPort, UpdateSource, WifiLink};
use window_alarm::app::whitelist::Whitelist;
use window_alarm::config::AlarmConfig;
use window_alarm::error::{NetworkError, TransportError};

// ── Contact inputs ────────────────────────────────────────────

/// Replays a fixed sequence of levels (`true` = open), then fails every
/// read. The failure is what ends a supervised session in tests.
pub struct ScriptedContact {
    levels: VecDeque<bool>,
    pub reads: Rc<Cell<usize>>,
}

impl ScriptedContact {
    pub fn new(levels: &[bool]) -> Self {
        Self {
            levels: levels.iter().copied().collect(),
            reads: Rc::new(Cell::new(0)),
        }
    }
}

impl ErrorType for ScriptedContact {
    type Error = ErrorKind;
}

impl InputPin for ScriptedContact {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        self.reads.set(self.reads.get() + 1);
        self.levels.pop_front().ok_or(ErrorKind::Other)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.is_high().map(|h| !h)
    }
}

/// Contact whose level the test sets directly.
#[derive(Clone, Default)]
pub struct LevelContact(pub Rc<Cell<bool>>);

impl LevelContact {
    pub fn set_open(&self, open: bool) {
        self.0.set(open);
    }
}

impl ErrorType for LevelContact {
    type Error = Infallible;
}

impl InputPin for LevelContact {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.0.get())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.0.get())
    }
}

// ── Indicator LED ─────────────────────────────────────────────

/// Records every level written; optionally fails writes.
#[derive(Clone, Default)]
pub struct MockLed {
    pub history: Rc<RefCell<Vec<bool>>>,
    pub fail_writes: Rc<Cell<bool>>,
}

impl MockLed {
    pub fn is_on(&self) -> bool {
        self.history.borrow().last().copied().unwrap_or(false)
    }

    fn write(&mut self, level: bool) -> Result<(), ErrorKind> {
        if self.fail_writes.get() {
            return Err(ErrorKind::Other);
        }
        self.history.borrow_mut().push(level);
        Ok(())
    }
}

impl ErrorType for MockLed {
    type Error = ErrorKind;
}

impl OutputPin for MockLed {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.write(false)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.write(true)
    }
}

// ── Virtual time ──────────────────────────────────────────────

/// Records requested sleeps; each sleep yields once to the executor.
#[derive(Clone, Default)]
pub struct MockTimer {
    pub sleeps: Rc<RefCell<Vec<Duration>>>,
}

impl MockTimer {
    pub fn elapsed(&self) -> Duration {
        self.sleeps.borrow().iter().sum()
    }

    pub fn count(&self, d: Duration) -> usize {
        self.sleeps.borrow().iter().filter(|&&s| s == d).count()
    }
}

impl TimerPort for MockTimer {
    async fn sleep(&self, duration: Duration) {
        self.sleeps.borrow_mut().push(duration);
        futures_lite::future::yield_now().await;
    }
}

// ── WiFi link ─────────────────────────────────────────────────

/// Comes up once the shared virtual clock has advanced `connect_after`
/// since association started. `None` never connects.
pub struct MockLink {
    clock: MockTimer,
    connect_after: Option<Duration>,
    started_at: Option<Duration>,
    pub already_up: bool,
    pub begin_calls: usize,
}

impl MockLink {
    pub fn new(clock: &MockTimer, connect_after: Option<Duration>) -> Self {
        Self {
            clock: clock.clone(),
            connect_after,
            started_at: None,
            already_up: false,
            begin_calls: 0,
        }
    }
}

impl WifiLink for MockLink {
    fn is_connected(&self) -> bool {
        if self.already_up {
            return true;
        }
        match (self.started_at, self.connect_after) {
            (Some(start), Some(after)) => self.clock.elapsed() - start >= after,
            _ => false,
        }
    }

    fn begin_connect(&mut self, ssid: &str, password: &str) -> Result<(), NetworkError> {
        window_alarm::net::validate_ssid(ssid)?;
        window_alarm::net::validate_password(password)?;
        self.begin_calls += 1;
        self.started_at = Some(self.clock.elapsed());
        Ok(())
    }

    fn link_info(&self) -> Option<String> {
        self.is_connected().then(|| "ip=10.0.0.2".to_string())
    }
}

// ── Messaging ─────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct RecordingMessenger {
    pub sent: Rc<RefCell<Vec<(ChatId, String)>>>,
}

impl RecordingMessenger {
    pub fn to(&self, recipient: ChatId) -> Vec<String> {
        self.sent
            .borrow()
            .iter()
            .filter(|(r, _)| *r == recipient)
            .map(|(_, t)| t.clone())
            .collect()
    }

    pub fn count_text(&self, text: &str) -> usize {
        self.sent.borrow().iter().filter(|(_, t)| t == text).count()
    }
}

impl Messenger for RecordingMessenger {
    fn send(&self, recipient: ChatId, text: &str) {
        self.sent.borrow_mut().push((recipient, text.to_string()));
    }
}

/// Delivers queued updates, then either stays pending forever or fails
/// with `end_with`.
pub struct ScriptedUpdates {
    queue: VecDeque<InboundMessage>,
    end_with: Option<TransportError>,
}

impl ScriptedUpdates {
    pub fn new(msgs: &[(ChatId, &str)]) -> Self {
        Self {
            queue: msgs
                .iter()
                .map(|&(id, text)| InboundMessage::private(id, text))
                .collect(),
            end_with: None,
        }
    }

    pub fn then_fail(mut self, e: TransportError) -> Self {
        self.end_with = Some(e);
        self
    }
}

impl UpdateSource for ScriptedUpdates {
    async fn next_update(&mut self) -> Result<InboundMessage, TransportError> {
        if let Some(msg) = self.queue.pop_front() {
            return Ok(msg);
        }
        match self.end_with {
            Some(e) => Err(e),
            None => futures_lite::future::pending().await,
        }
    }
}

// ── Reset ─────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockReset {
    pub calls: Rc<Cell<usize>>,
}

impl ResetPort for MockReset {
    fn reset(&mut self) {
        self.calls.set(self.calls.get() + 1);
    }
}

// ── Config ────────────────────────────────────────────────────

pub fn test_config(debug_mode: bool, operators: &[ChatId]) -> AlarmConfig {
    let mut config = AlarmConfig {
        debug_mode,
        whitelist: Whitelist::from_ids(operators).unwrap(),
        ..AlarmConfig::default()
    };
    config.wifi_ssid.push_str("TestNet").unwrap();
    config.wifi_password.push_str("password1").unwrap();
    config.validate().unwrap();
    config
}
