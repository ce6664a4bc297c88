use core::fmt;

/// Errors reported by the low level drivers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceError {
    /// No medium in the slot (card pulled out)
    NoMedium,
    /// The device rejected the write
    WriteFault,
}

impl fmt::Display for DeviceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            DeviceError::NoMedium => "no medium",
            DeviceError::WriteFault => "write fault",
        };
        f.write_str(msg)
    }
}

/// A byte oriented output device, such as a UART transmitter.
pub trait CharDevice: Send + Sync {
    /// Push `buf` out of the device, returning the number of bytes sent.
    fn write(&self, buf: &[u8]) -> Result<usize, DeviceError>;
}

impl<D: CharDevice + ?Sized> CharDevice for &D {
    fn write(&self, buf: &[u8]) -> Result<usize, DeviceError> {
        (**self).write(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::memfs::MemFs;
    use crate::fs::{File, FileSystem, FsError, OpenMode};

    #[test]
    fn card_failures_map_to_device_errors() {
        let card = MemFs::new();
        let mut file = card.open("/log.txt", OpenMode::Append).unwrap();

        card.fail_writes(true);
        let fault = file.write_all(b"x").unwrap_err();
        assert_eq!(fault, FsError::DeviceError(DeviceError::WriteFault));
        assert_eq!(fault.to_string(), "device error: write fault");

        card.eject();
        let gone = card.open("/log.txt", OpenMode::Append).err();
        assert_eq!(gone, Some(FsError::DeviceError(DeviceError::NoMedium)));
        assert_eq!(DeviceError::NoMedium.to_string(), "no medium");
    }
}
