use crate::drivers::{CharDevice, SerialDevice};
use core::fmt;

/// The console sink: text written here goes out of the serial transmitter.
pub struct SerialConsole<D: CharDevice = SerialDevice> {
    device: D,
}

impl SerialConsole<SerialDevice> {
    /// Bring up the UART at `base` and use it as the console.
    ///
    /// # Safety
    /// Same contract as [`SerialDevice::new`].
    pub unsafe fn mmio(base: usize) -> Self {
        Self::new(unsafe { SerialDevice::new(base) })
    }
}

impl<D: CharDevice> SerialConsole<D> {
    pub fn new(device: D) -> Self {
        Self { device }
    }
}

impl<D: CharDevice> fmt::Write for SerialConsole<D> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let mut buf = s.as_bytes();
        while !buf.is_empty() {
            match self.device.write(buf) {
                Ok(0) | Err(_) => return Err(fmt::Error),
                Ok(n) => buf = &buf[n..],
            }
        }
        Ok(())
    }
}
