pub mod char;
pub mod device;

pub use self::char::SerialDevice;
pub use device::{CharDevice, DeviceError};
