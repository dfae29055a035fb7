//! Supervisor: startup ordering, task orchestration and fault recovery.
//!
//! ```text
//!  ┌──────────────┐  TimedOut   ┌───────────────────────────────────┐
//!  │ net::connect │────────────▶│                                   │
//!  └──────┬───────┘             │  recover(fault)                   │
//!         │ Connected           │   debug  → halt (return)          │
//!         ▼                     │   prod   → sleep 5s / 10s, reset  │
//!  messaging + monitor          │                                   │
//!  ready flash                  └───────────────────────────────────┘
//!         │                                   ▲
//!         ▼                                   │ first Err
//!  ┌──────────────────────────────────────────┴─┐
//!  │ LocalExecutor: monitor::run  ║ receive_loop│
//!  └────────────────────────────────────────────┘
//! ```
//!
//! This is the only place failures are handled. Neither task catches its
//! own errors, and whichever task exits first ends the session; the other
//! one is dropped, not restarted.

use core::cell::RefCell;
use core::convert::Infallible;
use core::fmt;
use core::time::Duration;
use std::rc::Rc;

use edge_executor::LocalExecutor;
use embedded_hal::digital::{InputPin, OutputPin};
use log::{error, info, warn};

use crate::app::dispatcher::{self, CommandDispatcher};
use crate::app::monitor::{self, SensorMonitor};
use crate::app::notifier::Notifier;
use crate::app::ports::{Messenger, ResetPort, TimerPort, UpdateSource, WifiLink};
use crate::config::AlarmConfig;
use crate::error::{Error, Result};
use crate::net::{self, Bringup};

/// Why the session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    /// The link did not come up within the bring-up window.
    NetworkTimeout,
    /// An error escaped startup or one of the two tasks.
    Runtime(Error),
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NetworkTimeout => write!(f, "network bring-up timed out"),
            Self::Runtime(e) => write!(f, "{e}"),
        }
    }
}

/// What the supervisor does about a fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recovery {
    /// Stop and leave the device for manual inspection.
    Halt,
    /// Wait, then hard-reset the device.
    ResetAfter(Duration),
}

/// Debug/production branch shared by every fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecoveryPolicy {
    pub debug_mode: bool,
    pub network_reset_delay: Duration,
    pub fault_reset_delay: Duration,
}

impl RecoveryPolicy {
    pub fn from_config(config: &AlarmConfig) -> Self {
        Self {
            debug_mode: config.debug_mode,
            network_reset_delay: config.network_reset_delay(),
            fault_reset_delay: config.fault_reset_delay(),
        }
    }

    pub fn action(&self, fault: &Fault) -> Recovery {
        if self.debug_mode {
            return Recovery::Halt;
        }
        match fault {
            Fault::NetworkTimeout => Recovery::ResetAfter(self.network_reset_delay),
            Fault::Runtime(_) => Recovery::ResetAfter(self.fault_reset_delay),
        }
    }
}

/// How [`Supervisor::run`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    /// Debug mode: stopped for inspection.
    Halted,
    /// Production: reset was requested (only observable when the reset port returns).
    Reset,
}

pub struct Supervisor<T, R> {
    config: AlarmConfig,
    policy: RecoveryPolicy,
    timer: T,
    reset: R,
}

impl<T: TimerPort, R: ResetPort> Supervisor<T, R> {
    pub fn new(config: AlarmConfig, timer: T, reset: R) -> Self {
        let policy = RecoveryPolicy::from_config(&config);
        Self {
            config,
            policy,
            timer,
            reset,
        }
    }

    /// One boot session.
    ///
    /// `connect_messaging` receives the messaging token and is only called
    /// once the network is up; the messaging client cannot exist without it.
    pub async fn run<L, S, P, F, U, M>(
        &mut self,
        link: &mut L,
        sensor: S,
        indicator: P,
        connect_messaging: F,
    ) -> Exit
    where
        L: WifiLink,
        S: InputPin,
        P: OutputPin,
        F: FnOnce(&str) -> Result<(U, M)>,
        U: UpdateSource,
        M: Messenger,
    {
        info!("Starting alarm system (debug mode: {})", self.policy.debug_mode);

        let bringup = net::connect(
            link,
            &self.timer,
            &self.config.wifi_ssid,
            &self.config.wifi_password,
            self.config.wifi_timeout_secs,
        )
        .await;

        let fault = match bringup {
            Ok(Bringup::Connected) => match self.serve(sensor, indicator, connect_messaging).await {
                Ok(never) => match never {},
                Err(e) => Fault::Runtime(e),
            },
            Ok(Bringup::TimedOut) => Fault::NetworkTimeout,
            Err(e) => Fault::Runtime(e.into()),
        };

        self.recover(fault).await
    }

    /// Connected phase: build collaborators, flash ready, run both tasks
    /// until the first one fails.
    async fn serve<S, P, F, U, M>(&self, sensor: S, indicator: P, connect_messaging: F) -> Result<Infallible>
    where
        S: InputPin,
        P: OutputPin,
        F: FnOnce(&str) -> Result<(U, M)>,
        U: UpdateSource,
        M: Messenger,
    {
        let (updates, messenger) = connect_messaging(&self.config.messaging_token)?;
        let messenger = Rc::new(messenger);
        let monitor = Rc::new(RefCell::new(SensorMonitor::new(sensor, indicator)?));

        info!("System ready");
        self.flash_ready(&monitor).await?;

        let whitelist = self.config.whitelist.clone();
        let notifier = Notifier::new(whitelist.clone(), messenger.clone());
        let dispatcher = CommandDispatcher::new(whitelist);

        let executor: LocalExecutor<'_, 4> = LocalExecutor::new();
        let sensor_task = executor.spawn(monitor::run(
            monitor.clone(),
            notifier,
            &self.timer,
            self.config.sensor_poll_period(),
        ));
        let bot_task = executor.spawn(dispatcher::receive_loop(updates, messenger, dispatcher, monitor));

        executor
            .run(futures_lite::future::or(sensor_task, bot_task))
            .await
    }

    async fn flash_ready<S: InputPin, P: OutputPin>(&self, monitor: &RefCell<SensorMonitor<S, P>>) -> Result<()> {
        monitor.borrow_mut().set_indicator(true)?;
        self.timer.sleep(self.config.ready_flash()).await;
        monitor.borrow_mut().set_indicator(false)
    }

    /// The single fault barrier.
    async fn recover(&mut self, fault: Fault) -> Exit {
        match fault {
            Fault::NetworkTimeout => error!("Could not connect to WiFi"),
            Fault::Runtime(e) => error!("Fatal error: {}", e),
        }

        match self.policy.action(&fault) {
            Recovery::Halt => {
                warn!("System halted for inspection ({})", fault);
                Exit::Halted
            }
            Recovery::ResetAfter(delay) => {
                warn!("Restarting in {} seconds...", delay.as_secs());
                self.timer.sleep(delay).await;
                self.reset.reset();
                Exit::Reset
            }
        }
    }
}
