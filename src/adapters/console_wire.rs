//! Line-oriented console wire for the messaging bridge.
//!
//! Inbound lines are `<sender_id> <text>`; each becomes an
//! [`InboundMessage`] whose chat kind follows the id's sign. Outbound messages are written as
//! `-> <recipient>: <text>`, one line per message (embedded newlines are
//! kept, so a multi-line status reply spans several lines).
//!
//! Host builds additionally accept `sim open` / `sim close` to move the
//! simulated contact.

use std::io::{self, BufRead, Write};

use log::{debug, warn};

use super::transport::{WireReader, WireWriter};
use crate::app::events::{ChatId, InboundMessage};
use crate::error::TransportError;

/// What a single console line turned out to be.
#[derive(Debug, PartialEq, Eq)]
pub enum ConsoleLine {
    Message(InboundMessage),
    /// Simulated contact change: `true` = open.
    SimContact(bool),
    Blank,
    Malformed,
}

/// Classify one line (without its terminator).
pub fn parse_line(line: &str) -> ConsoleLine {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.trim().is_empty() {
        return ConsoleLine::Blank;
    }
    match line.trim() {
        "sim open" => return ConsoleLine::SimContact(true),
        "sim close" => return ConsoleLine::SimContact(false),
        _ => {}
    }

    let Some((id, text)) = line.trim_start().split_once(' ') else {
        return ConsoleLine::Malformed;
    };
    match id.parse::<ChatId>() {
        Ok(sender_id) => ConsoleLine::Message(InboundMessage::from_chat(sender_id, text)),
        Err(_) => ConsoleLine::Malformed,
    }
}

pub struct ConsoleReader<R> {
    input: R,
    buf: Vec<u8>,
}

impl ConsoleReader<io::BufReader<io::Stdin>> {
    pub fn stdin() -> Self {
        Self::new(io::BufReader::new(io::stdin()))
    }
}

impl<R: BufRead> ConsoleReader<R> {
    pub fn new(input: R) -> Self {
        Self {
            input,
            buf: Vec::new(),
        }
    }
}

impl<R: BufRead + Send + 'static> WireReader for ConsoleReader<R> {
    fn read_message(&mut self) -> Result<Option<InboundMessage>, TransportError> {
        self.buf.clear();
        let n = self
            .input
            .read_until(b'\n', &mut self.buf)
            .map_err(|_| TransportError::ReadFailed)?;
        if n == 0 {
            return Err(TransportError::Closed);
        }

        // Line noise is bad data, not a broken wire: skip it.
        let Ok(line) = core::str::from_utf8(&self.buf) else {
            warn!("Console: dropped {} bytes of non-UTF-8 input", n);
            return Ok(None);
        };

        match parse_line(line) {
            ConsoleLine::Message(msg) => {
                debug!("Console: update from {}", msg.sender_id);
                Ok(Some(msg))
            }
            ConsoleLine::SimContact(open) => {
                apply_sim_contact(open);
                Ok(None)
            }
            ConsoleLine::Blank => Ok(None),
            ConsoleLine::Malformed => {
                warn!("Console: expected '<sender_id> <text>', got {:?}", line.trim_end());
                Ok(None)
            }
        }
    }
}

#[cfg(not(target_os = "espidf"))]
fn apply_sim_contact(open: bool) {
    log::info!("Console: simulated contact {}", if open { "open" } else { "closed" });
    crate::drivers::sim_gpio::sim_set_contact_open(open);
}

#[cfg(target_os = "espidf")]
fn apply_sim_contact(_open: bool) {
    warn!("Console: 'sim' commands are only available in host builds");
}

pub struct ConsoleWriter<W> {
    output: W,
}

impl ConsoleWriter<io::Stdout> {
    pub fn stdout() -> Self {
        Self { output: io::stdout() }
    }
}

impl<W: Write> ConsoleWriter<W> {
    pub fn new(output: W) -> Self {
        Self { output }
    }
}

impl<W: Write + Send + 'static> WireWriter for ConsoleWriter<W> {
    fn write_message(&mut self, recipient: ChatId, text: &str) -> Result<(), TransportError> {
        writeln!(self.output, "-> {}: {}", recipient, text).map_err(|_| TransportError::WriteFailed)?;
        self.output.flush().map_err(|_| TransportError::WriteFailed)
    }
}
