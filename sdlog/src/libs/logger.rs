// src/libs/logger.rs
extern crate alloc;
use crate::output::dual::LogSink;
use alloc::boxed::Box;
use core::fmt::{self, Write};
use lazy_static::lazy_static;
use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};
use spin::Mutex;

/// Type-erased console so one sink type can serve the global logger.
pub struct AnyConsole(Box<dyn Write + Send>);

impl AnyConsole {
    pub fn new<W: Write + Send + 'static>(console: W) -> Self {
        Self(Box::new(console))
    }
}

impl Write for AnyConsole {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.0.write_str(s)
    }
}

/// The sink the `log` facade writes through.
pub type GlobalSink = LogSink<AnyConsole>;

struct LoggerState {
    sink: Option<GlobalSink>,
    level: LevelFilter,
}

/// `log` backend that renders records as `[LEVEL] target: message` lines
/// on a [`LogSink`].
///
/// Records logged while the sink is busy, e.g. by a console or file driver
/// that itself calls the `log` macros, are dropped instead of waiting on
/// the lock.
pub struct SinkLogger {
    state: Mutex<LoggerState>,
}

impl Default for SinkLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl SinkLogger {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(LoggerState {
                sink: None,
                level: LevelFilter::Trace,
            }),
        }
    }

    /// Swap in `sink`, handing back the previous one.
    pub fn replace_sink(&self, sink: GlobalSink) -> Option<GlobalSink> {
        self.state.lock().sink.replace(sink)
    }

    pub fn take_sink(&self) -> Option<GlobalSink> {
        self.state.lock().sink.take()
    }

    pub fn set_level(&self, level: LevelFilter) {
        self.state.lock().level = level;
    }

    /// Run `f` on the installed sink, if any.
    pub fn with_sink<R>(&self, f: impl FnOnce(&mut GlobalSink) -> R) -> Option<R> {
        self.state.lock().sink.as_mut().map(f)
    }
}

impl Log for SinkLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        match self.state.try_lock() {
            Some(state) => metadata.level() <= state.level,
            None => false,
        }
    }

    fn log(&self, record: &Record) {
        let Some(mut state) = self.state.try_lock() else {
            return;
        };
        if record.level() > state.level {
            return;
        }
        if let Some(sink) = state.sink.as_mut() {
            sink.emit_fmt(format_args!(
                "[{}] {}: {}",
                record.level(),
                record.target(),
                record.args()
            ));
        }
    }

    fn flush(&self) {
        if let Some(mut state) = self.state.try_lock() {
            if let Some(sink) = state.sink.as_mut() {
                sink.flush();
            }
        }
    }
}

lazy_static! {
    static ref LOGGER: SinkLogger = SinkLogger::new();
}

/// Route the `log` macros to `sink` and set the max level.
///
/// Fails if another logger was installed first; `sink` is dropped then.
pub fn init_logger(sink: GlobalSink, level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_logger(&*LOGGER)?;
    LOGGER.set_level(level);
    LOGGER.replace_sink(sink);
    log::set_max_level(level);
    Ok(())
}

/// The process-wide logger installed by [`init_logger`].
pub fn global_logger() -> &'static SinkLogger {
    &LOGGER
}
