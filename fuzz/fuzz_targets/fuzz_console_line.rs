//! Fuzz target: console wire line parser
//!
//! Feeds arbitrary UTF-8 lines to `parse_line` and verifies:
//! - No panics
//! - A parsed message's text is a suffix of the input line
//! - A parsed message always comes from a numeric sender prefix
//!
//! cargo fuzz run fuzz_console_line

#![no_main]

use libfuzzer_sys::fuzz_target;
use window_alarm::adapters::console_wire::{ConsoleLine, parse_line};
use window_alarm::app::commands::Command;

fuzz_target!(|data: &[u8]| {
    let Ok(line) = core::str::from_utf8(data) else {
        return;
    };

    if let ConsoleLine::Message(msg) = parse_line(line) {
        assert!(line.contains(msg.text.as_str()), "text must come from the line");
        let prefix = line.trim_start().split(' ').next().unwrap_or("");
        assert_eq!(prefix.parse::<i64>().ok(), Some(msg.sender_id));

        // Command matching must never panic on whatever text arrives.
        let _ = Command::parse(&msg.text);
    }
});
