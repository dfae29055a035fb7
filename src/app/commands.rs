//! Remote commands understood by the alarm.

/// The closed set of command texts. Anything else is `Unrecognized`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `/start`: reply with the help text.
    Start,
    /// `/arm`: arm the system.
    Arm,
    /// `/disarm`: disarm the system and clear the indicator.
    Disarm,
    /// `/status`: report armed state and window position.
    Status,
    Unrecognized,
}

impl Command {
    /// Match raw message text, case-insensitively. No other normalization
    /// is applied: surrounding whitespace or a trailing `@botname` make the
    /// text unrecognized.
    pub fn parse(raw: &str) -> Self {
        match raw.to_lowercase().as_str() {
            "/start" => Self::Start,
            "/arm" => Self::Arm,
            "/disarm" => Self::Disarm,
            "/status" => Self::Status,
            _ => Self::Unrecognized,
        }
    }
}
