pub mod serial;

pub use serial::SerialDevice;
