pub mod logger;

pub use logger::{global_logger, init_logger, AnyConsole, GlobalSink, SinkLogger};
