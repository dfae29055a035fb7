//! Messaging transport bridge: blocking wire threads ↔ cooperative tasks.
//!
//! The wire (long-poll client, console, ...) is allowed to block. It never
//! runs on the alarm executor: a reader thread and a writer thread talk to
//! it and exchange messages with the executor over bounded `embassy-sync`
//! channels.
//!
//! ```text
//!  ┌──────────────┐  TransportEvent  ┌──────────────────────────────┐
//!  │ reader thread│─────────────────▶│ BridgeUpdates (UpdateSource) │
//!  │ (WireReader) │                  │  awaited by receive_loop     │
//!  └──────────────┘                  └──────────────────────────────┘
//!  ┌──────────────┐  OutboundMessage ┌──────────────────────────────┐
//!  │ writer thread│◀─────────────────│ BridgeMessenger (Messenger)  │
//!  │ (WireWriter) │                  │  try_send, never blocks      │
//!  └──────────────┘                  └──────────────────────────────┘
//! ```

use std::sync::Arc;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use log::{info, warn};

use crate::app::events::{ChatId, InboundMessage};
use crate::app::ports::{Messenger, UpdateSource};
use crate::drivers::task_pin::{self, Core};
use crate::error::TransportError;

/// Channel depth for inbound updates.
const INBOUND_DEPTH: usize = 8;

/// Channel depth for outbound messages.
const OUTBOUND_DEPTH: usize = 16;

/// Longest outbound text carried; longer texts are truncated.
pub const OUTBOUND_TEXT_CAP: usize = 256;

/// Blocking inbound side of a wire.
pub trait WireReader: Send + 'static {
    /// Block for the next update. `Ok(None)` means input was consumed but
    /// held nothing deliverable.
    fn read_message(&mut self) -> Result<Option<InboundMessage>, TransportError>;
}

/// Blocking outbound side of a wire.
pub trait WireWriter: Send + 'static {
    fn write_message(&mut self, recipient: ChatId, text: &str) -> Result<(), TransportError>;
}

/// Item on the inbound channel.
pub enum TransportEvent {
    Message(InboundMessage),
    Failed(TransportError),
}

/// Item on the outbound channel.
pub struct OutboundMessage {
    pub recipient: ChatId,
    pub text: heapless::String<OUTBOUND_TEXT_CAP>,
}

type InboundChannel = Channel<CriticalSectionRawMutex, TransportEvent, INBOUND_DEPTH>;
type OutboundChannel = Channel<CriticalSectionRawMutex, OutboundMessage, OUTBOUND_DEPTH>;

// ── Executor-side handles ────────────────────────────────────

/// Inbound stream for the receive loop.
pub struct BridgeUpdates {
    inbound: Arc<InboundChannel>,
}

impl UpdateSource for BridgeUpdates {
    async fn next_update(&mut self) -> Result<InboundMessage, TransportError> {
        match self.inbound.receive().await {
            TransportEvent::Message(msg) => Ok(msg),
            TransportEvent::Failed(e) => Err(e),
        }
    }
}

/// Outbound sender shared by the dispatcher and the breach notifier.
pub struct BridgeMessenger {
    outbound: Arc<OutboundChannel>,
}

impl Messenger for BridgeMessenger {
    fn send(&self, recipient: ChatId, text: &str) {
        let msg = OutboundMessage {
            recipient,
            text: truncate(text),
        };
        if self.outbound.try_send(msg).is_err() {
            warn!("Messaging: outbound channel full, dropping message for {}", recipient);
        }
    }
}

/// Copy `text` into a fixed buffer, cutting at a char boundary if needed.
fn truncate(text: &str) -> heapless::String<OUTBOUND_TEXT_CAP> {
    let mut out = heapless::String::new();
    for c in text.chars() {
        if out.push(c).is_err() {
            warn!("Messaging: outbound text truncated to {} bytes", out.len());
            break;
        }
    }
    out
}

// ── Wire threads ─────────────────────────────────────────────

fn reader_loop(mut reader: impl WireReader, inbound: Arc<InboundChannel>) {
    loop {
        match reader.read_message() {
            Ok(Some(msg)) => futures_lite::future::block_on(inbound.send(TransportEvent::Message(msg))),
            Ok(None) => {}
            Err(e) => {
                warn!("Messaging: wire read failed ({}), stopping reader", e);
                futures_lite::future::block_on(inbound.send(TransportEvent::Failed(e)));
                return;
            }
        }
    }
}

fn writer_loop(mut writer: impl WireWriter, outbound: Arc<OutboundChannel>) {
    loop {
        let msg = futures_lite::future::block_on(outbound.receive());
        if let Err(e) = writer.write_message(msg.recipient, &msg.text) {
            // Fire-and-forget: a lost reply is not a fault.
            warn!("Messaging: send to {} failed: {}", msg.recipient, e);
        }
    }
}

/// Start the reader and writer threads and return the executor-side handles.
pub fn start<R: WireReader, W: WireWriter>(
    reader: R,
    writer: W,
) -> Result<(BridgeUpdates, BridgeMessenger), TransportError> {
    let inbound: Arc<InboundChannel> = Arc::new(Channel::new());
    let outbound: Arc<OutboundChannel> = Arc::new(Channel::new());

    let rx = inbound.clone();
    task_pin::spawn_on_core(Core::Pro, 5, 8, "msg-rx\0", move || reader_loop(reader, rx))
        .map_err(|_| TransportError::SpawnFailed)?;
    let tx = outbound.clone();
    task_pin::spawn_on_core(Core::App, 5, 8, "msg-tx\0", move || writer_loop(writer, tx))
        .map_err(|_| TransportError::SpawnFailed)?;

    info!(
        "Messaging: bridge started (inbound depth {}, outbound depth {})",
        INBOUND_DEPTH, OUTBOUND_DEPTH
    );
    Ok((BridgeUpdates { inbound }, BridgeMessenger { outbound }))
}
