//! # sdlog - Serial console + SD card logging
//! Copyright (C) RainSTR Studio 2025, All rights reserved.
//!
//! This mirrors every log line to the serial console and, when the
//! card could be opened, appends it to a log file on the SD volume.
//!
//! ```rust
//! use sdlog::fs::memfs::MemFs;
//! use sdlog::{sink_println, LogSink};
//!
//! let card = MemFs::new();
//! let mut sink = LogSink::new(String::new());
//! assert!(sink.initialize(&card));
//!
//! sink.emit("boot ok");
//! sink_println!(sink, "{}-{}", 7, "x");
//!
//! assert_eq!(sink.console(), "boot ok\n7-x\n");
//! assert_eq!(card.read_file("/log.txt").unwrap(), b"boot ok\n7-x\n");
//! ```

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod config;
pub mod drivers;
pub mod fs;
pub mod libs;
pub mod output;

pub use config::{LineEnding, SinkConfig, DEFAULT_LOG_PATH};
pub use output::dual::LogSink;
pub use output::serial::SerialConsole;
