use crate::drivers::{CharDevice, DeviceError};
use spin::Mutex;
use uart_16550::MmioSerialPort;

/// A 16550 compatible UART mapped into memory.
pub struct SerialDevice {
    serial_port: Mutex<MmioSerialPort>,
}

impl SerialDevice {
    /// Initialize the UART at `base`.
    ///
    /// # Safety
    /// `base` must be the MMIO base address of a 16550 compatible UART
    /// and nothing else may drive that UART.
    pub unsafe fn new(base: usize) -> Self {
        let mut serial_port = unsafe { MmioSerialPort::new(base) };
        serial_port.init();
        Self {
            serial_port: Mutex::new(serial_port),
        }
    }
}

impl CharDevice for SerialDevice {
    fn write(&self, buf: &[u8]) -> Result<usize, DeviceError> {
        let mut serial_port = self.serial_port.lock();
        for byte in buf {
            serial_port.send(*byte);
        }
        Ok(buf.len())
    }
}
