//! Reactor-driven timer adapter.
//!
//! Implements [`TimerPort`] with `async-io-mini` timers: the executor
//! thread parks until the deadline instead of busy-spinning, and other
//! tasks on the same executor run in the meantime.

use core::time::Duration;

use crate::app::ports::TimerPort;

#[derive(Debug, Clone, Copy, Default)]
pub struct ReactorTimer;

impl ReactorTimer {
    pub fn new() -> Self {
        Self
    }
}

impl TimerPort for ReactorTimer {
    async fn sleep(&self, duration: Duration) {
        async_io_mini::Timer::after(duration).await;
    }
}
