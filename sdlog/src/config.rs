extern crate alloc;
use alloc::string::{String, ToString};

/// Default location of the log file on the card.
pub const DEFAULT_LOG_PATH: &str = "/log.txt";

/// Line terminator appended after every emitted line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    /// `\n`
    #[default]
    Lf,
    /// `\r\n`, what most serial terminals expect from a `println`
    CrLf,
}

impl LineEnding {
    pub const fn as_str(self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

/// Settings of a [`LogSink`](crate::LogSink).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkConfig {
    /// File opened by `LogSink::initialize`
    pub path: String,
    pub line_ending: LineEnding,
    /// Prefix of the diagnostic printed when the file can't be opened
    pub diagnostic_prefix: String,
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self {
            path: DEFAULT_LOG_PATH.to_string(),
            line_ending: LineEnding::default(),
            diagnostic_prefix: "[LOG]".to_string(),
        }
    }
}

impl SinkConfig {
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    pub fn with_line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = line_ending;
        self
    }

    pub fn with_diagnostic_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.diagnostic_prefix = prefix.into();
        self
    }
}
