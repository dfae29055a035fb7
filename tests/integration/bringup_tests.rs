//! Network bring-up: bounded one-second polling.

use core::time::Duration;

use window_alarm::error::NetworkError;
use window_alarm::net::{self, Bringup};

use crate::mocks::{MockLink, MockTimer};

const SECOND: Duration = Duration::from_secs(1);

fn connect(link: &mut MockLink, timer: &MockTimer, timeout_secs: u32) -> Result<Bringup, NetworkError> {
    futures_lite::future::block_on(net::connect(link, timer, "TestNet", "password1", timeout_secs))
}

#[test]
fn connects_after_three_polls() {
    let timer = MockTimer::default();
    let mut link = MockLink::new(&timer, Some(Duration::from_secs(3)));

    assert_eq!(connect(&mut link, &timer, 10), Ok(Bringup::Connected));
    assert_eq!(*timer.sleeps.borrow(), vec![SECOND; 3]);
    assert_eq!(link.begin_calls, 1);
}

#[test]
fn times_out_after_exactly_timeout_polls() {
    let timer = MockTimer::default();
    let mut link = MockLink::new(&timer, None);

    assert_eq!(connect(&mut link, &timer, 10), Ok(Bringup::TimedOut));
    assert_eq!(*timer.sleeps.borrow(), vec![SECOND; 10]);
}

#[test]
fn already_connected_skips_association() {
    let timer = MockTimer::default();
    let mut link = MockLink::new(&timer, None);
    link.already_up = true;

    assert_eq!(connect(&mut link, &timer, 10), Ok(Bringup::Connected));
    assert_eq!(link.begin_calls, 0);
    assert!(timer.sleeps.borrow().is_empty());
}

#[test]
fn zero_timeout_checks_once_without_waiting() {
    let timer = MockTimer::default();
    let mut link = MockLink::new(&timer, Some(Duration::from_secs(1)));

    assert_eq!(connect(&mut link, &timer, 0), Ok(Bringup::TimedOut));
    assert!(timer.sleeps.borrow().is_empty());
}

#[test]
fn immediate_link_needs_no_poll() {
    let timer = MockTimer::default();
    let mut link = MockLink::new(&timer, Some(Duration::ZERO));

    assert_eq!(connect(&mut link, &timer, 10), Ok(Bringup::Connected));
    assert!(timer.sleeps.borrow().is_empty());
}

#[test]
fn invalid_credentials_are_an_error_not_a_timeout() {
    let timer = MockTimer::default();
    let mut link = MockLink::new(&timer, None);

    let res = futures_lite::future::block_on(net::connect(&mut link, &timer, "", "password1", 10));
    assert_eq!(res, Err(NetworkError::InvalidSsid));
    assert!(timer.sleeps.borrow().is_empty());
}
