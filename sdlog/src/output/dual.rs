extern crate alloc;
use crate::config::SinkConfig;
use crate::fs::{File, FileSystem, FsError, OpenMode};
use alloc::{boxed::Box, string::String};
use core::fmt::{self, Write};

/// Emit a formatted line through a [`LogSink`].
///
/// ```rust
/// # let mut sink = sdlog::LogSink::new(String::new());
/// sdlog::sink_println!(sink, "{}-{}", 7, "x");
/// assert_eq!(sink.console(), "7-x\n");
/// ```
#[macro_export]
macro_rules! sink_println {
    ($sink:expr) => {
        $sink.emit("")
    };
    ($sink:expr, $($arg:tt)*) => {
        $sink.emit_fmt(format_args!($($arg)*))
    };
}

/// Writes every line to the console and, while armed, appends it to the
/// log file on the card.
///
/// The console write always happens and its errors are ignored. The file
/// side is best effort: each line is written and flushed before `emit`
/// returns, and a failed write or flush is dropped silently.
pub struct LogSink<C: Write> {
    console: C,
    file: Option<Box<dyn File>>,
    path: Option<String>,
    config: SinkConfig,
}

impl<C: Write> LogSink<C> {
    /// A console-only sink with the default configuration.
    pub fn new(console: C) -> Self {
        Self::with_config(console, SinkConfig::default())
    }

    pub fn with_config(console: C, config: SinkConfig) -> Self {
        Self {
            console,
            file: None,
            path: None,
            config,
        }
    }

    /// Open the configured log file (`/log.txt` by default) on `fs`.
    pub fn initialize(&mut self, fs: &dyn FileSystem) -> bool {
        let path = self.config.path.clone();
        self.initialize_at(fs, &path)
    }

    /// Open `path` on `fs` in append mode, creating it if absent.
    ///
    /// Returns whether the file sink is armed. On failure a diagnostic line
    /// goes to the console and the sink stays console-only.
    pub fn initialize_at(&mut self, fs: &dyn FileSystem, path: &str) -> bool {
        match self.try_initialize(fs, path) {
            Ok(()) => true,
            Err(e) => {
                let _ = write!(
                    self.console,
                    "{} Failed to open log file {}: {}{}",
                    self.config.diagnostic_prefix,
                    path,
                    e,
                    self.config.line_ending.as_str()
                );
                false
            }
        }
    }

    /// Like [`LogSink::initialize_at`] but reports why the open failed and
    /// prints nothing.
    ///
    /// A handle that is already armed gets flushed and replaced, even when
    /// the new open fails.
    pub fn try_initialize(&mut self, fs: &dyn FileSystem, path: &str) -> Result<(), FsError> {
        self.disarm();
        let file = fs.open(path, OpenMode::Append)?;
        self.file = Some(file);
        self.path = Some(String::from(path));
        Ok(())
    }

    /// Write `line` and a line terminator to both sinks.
    pub fn emit(&mut self, line: &str) {
        let ending = self.config.line_ending.as_str();
        let _ = self.console.write_str(line);
        let _ = self.console.write_str(ending);
        if let Some(file) = self.file.as_mut() {
            let _ = append_line(&mut **file, line, ending);
        }
    }

    /// [`LogSink::emit`] for a pre-built `format_args!`.
    pub fn emit_fmt(&mut self, args: fmt::Arguments<'_>) {
        match args.as_str() {
            Some(line) => self.emit(line),
            None => self.emit(&alloc::fmt::format(args)),
        }
    }

    /// Force the file sink out to storage. No-op when not armed.
    pub fn flush(&mut self) {
        if let Some(file) = self.file.as_mut() {
            let _ = file.flush();
        }
    }

    /// Release the file handle and drop back to console-only output.
    pub fn disarm(&mut self) {
        self.flush();
        self.file = None;
        self.path = None;
    }

    pub fn is_armed(&self) -> bool {
        self.file.is_some()
    }

    /// Path of the armed log file.
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn config(&self) -> &SinkConfig {
        &self.config
    }

    pub fn console(&self) -> &C {
        &self.console
    }

    pub fn console_mut(&mut self) -> &mut C {
        &mut self.console
    }
}

impl<C: Write> Drop for LogSink<C> {
    fn drop(&mut self) {
        self.disarm();
    }
}

fn append_line(file: &mut dyn File, line: &str, ending: &str) -> Result<(), FsError> {
    file.write_all(line.as_bytes())?;
    file.write_all(ending.as_bytes())?;
    file.flush()
}
