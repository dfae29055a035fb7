//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter        | Implements         | Connects to                     |
//! |----------------|--------------------|---------------------------------|
//! | `timer`        | TimerPort          | async-io-mini reactor timers    |
//! | `wifi`         | WifiLink           | ESP-IDF WiFi STA / host sim     |
//! | `transport`    | UpdateSource       | Wire reader thread (channel)    |
//! |                | Messenger          | Wire writer thread (channel)    |
//! | `console_wire` | WireReader         | stdin, `<sender_id> <text>`     |
//! |                | WireWriter         | stdout, `-> <recipient>: <text>`|

pub mod console_wire;
pub mod timer;
pub mod transport;
pub mod wifi;
