//! Messages crossing the messaging boundary.
//!
//! [`InboundMessage`] carries what the messaging client hands to its
//! per-update callback; [`NotificationEvent`] is what the core sends out
//! when a breach is detected.

/// Remote operator / chat identifier.
pub type ChatId = i64;

/// Kind of chat the update came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Private,
    Group,
    Channel,
    Other,
}

/// Chat ids at or below this are channels and supergroups.
const CHANNEL_ID_CEILING: ChatId = -1_000_000_000_000;

impl MessageKind {
    /// Classify by the chat id's sign convention: users are positive,
    /// groups negative, channels and supergroups carry the `-100` prefix.
    pub const fn from_chat_id(id: ChatId) -> Self {
        if id > 0 {
            Self::Private
        } else if id <= CHANNEL_ID_CEILING {
            Self::Channel
        } else if id < 0 {
            Self::Group
        } else {
            Self::Other
        }
    }
}

/// One inbound update from the messaging service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    pub kind: MessageKind,
    /// Human-readable chat name (informational only).
    pub chat_label: String,
    /// Human-readable sender name (informational only, never trusted).
    pub sender_label: String,
    /// Numeric identity checked against the whitelist.
    pub sender_id: ChatId,
    pub text: String,
}

impl InboundMessage {
    /// A private-chat text message, the common case.
    pub fn private(sender_id: ChatId, text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Private,
            chat_label: String::new(),
            sender_label: String::new(),
            sender_id,
            text: text.into(),
        }
    }
}

impl InboundMessage {
    /// A text message from `chat_id`, its kind inferred from the id.
    pub fn from_chat(chat_id: ChatId, text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::from_chat_id(chat_id),
            ..Self::private(chat_id, text)
        }
    }
}

/// Outbound breach notification for one operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationEvent {
    pub recipient: ChatId,
    pub text: &'static str,
}
