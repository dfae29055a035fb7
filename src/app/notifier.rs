//! Breach broadcast to every whitelisted operator.

use log::info;

use super::events::NotificationEvent;
use super::ports::Messenger;
use super::whitelist::Whitelist;

/// Broadcast-notify action handed to the sensor monitor.
///
/// Alerts go to every operator in the whitelist, not just whoever sent the
/// most recent command.
pub struct Notifier<M> {
    recipients: Whitelist,
    messenger: M,
}

impl<M: Messenger> Notifier<M> {
    pub fn new(recipients: Whitelist, messenger: M) -> Self {
        Self {
            recipients,
            messenger,
        }
    }

    /// One event per whitelist entry.
    pub fn events(&self, text: &'static str) -> impl Iterator<Item = NotificationEvent> + '_ {
        self.recipients
            .iter()
            .map(move |recipient| NotificationEvent { recipient, text })
    }

    /// Send `text` to every operator. Returns the number of sends queued.
    pub fn broadcast(&self, text: &'static str) -> usize {
        let mut sent = 0;
        for event in self.events(text) {
            self.messenger.send(event.recipient, event.text);
            sent += 1;
        }
        info!("Notify: alert queued for {} operator(s)", sent);
        sent
    }
}
