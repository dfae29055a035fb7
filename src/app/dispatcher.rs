//! Command dispatcher: authorization boundary and command handling.
//!
//! Order per inbound message:
//!
//! 1. sender not whitelisted → log, no reply, no state change
//! 2. lowercase the text and match it against [`Command`]
//! 3. act and reply; unrecognized text gets no reply
//!
//! Step 1 runs before the text is looked at. Unknown senders get silence
//! so the bot does not confirm its existence to someone probing it.

use core::cell::RefCell;
use core::convert::Infallible;
use std::rc::Rc;

use log::{debug, info, warn};

use super::commands::Command;
use super::events::ChatId;
use super::ports::{AlarmControl, Messenger, UpdateSource};
use super::state::{AlarmState, WindowState};
use super::whitelist::Whitelist;
use crate::error::Result;

pub const HELP_TEXT: &str = "Window alarm\n\
                             /arm - arm the system\n\
                             /disarm - disarm the system\n\
                             /status - show current status";
pub const ARMED_REPLY: &str = "✅ System armed";
pub const DISARMED_REPLY: &str = "🔓 System disarmed";

/// Reply to `/status`.
pub fn status_reply(armed: bool, window: WindowState) -> String {
    let state = AlarmState {
        armed,
        last_window: window,
    };
    format!(
        "📊 System status:\nSystem: {}\nWindow: {}",
        state.armed_label(),
        state.last_window.label()
    )
}

/// How a message was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// Sender is not whitelisted; dropped.
    Denied,
    /// Authorized sender, unrecognized text; dropped.
    Ignored,
    /// Authorized sender, command executed and answered.
    Handled(Command),
}

pub struct CommandDispatcher {
    whitelist: Whitelist,
}

impl CommandDispatcher {
    pub fn new(whitelist: Whitelist) -> Self {
        Self { whitelist }
    }

    /// Handle one inbound message. Only GPIO failures from `disarm` are
    /// returned as errors; they are not caught here.
    pub fn handle(
        &self,
        sender_id: ChatId,
        raw_text: &str,
        alarm: &mut impl AlarmControl,
        messenger: &impl Messenger,
    ) -> Result<Dispatch> {
        if !self.whitelist.contains(sender_id) {
            warn!("Access denied for sender {}", sender_id);
            return Ok(Dispatch::Denied);
        }

        let command = Command::parse(raw_text);
        match command {
            Command::Start => messenger.send(sender_id, HELP_TEXT),
            Command::Arm => {
                alarm.arm();
                messenger.send(sender_id, ARMED_REPLY);
                info!("System armed (by {})", sender_id);
            }
            Command::Disarm => {
                alarm.disarm()?;
                messenger.send(sender_id, DISARMED_REPLY);
                info!("System disarmed (by {})", sender_id);
            }
            Command::Status => {
                let reply = status_reply(alarm.is_armed(), alarm.window_state());
                messenger.send(sender_id, &reply);
            }
            Command::Unrecognized => return Ok(Dispatch::Ignored),
        }
        Ok(Dispatch::Handled(command))
    }
}

/// Messaging receive loop: waits for each update and hands it to the
/// dispatcher. Ends only when the transport or a disarm fails.
pub async fn receive_loop<U, M, C>(
    mut updates: U,
    messenger: M,
    dispatcher: CommandDispatcher,
    alarm: Rc<RefCell<C>>,
) -> Result<Infallible>
where
    U: UpdateSource,
    M: Messenger,
    C: AlarmControl,
{
    info!("Messaging: waiting for commands");
    loop {
        let msg = updates.next_update().await?;
        debug!(
            "Messaging: {:?} update in '{}' from '{}' ({})",
            msg.kind, msg.chat_label, msg.sender_label, msg.sender_id
        );
        dispatcher.handle(msg.sender_id, &msg.text, &mut *alarm.borrow_mut(), &messenger)?;
    }
}
