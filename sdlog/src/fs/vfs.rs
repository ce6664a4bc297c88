use crate::drivers::DeviceError;
extern crate alloc;
use alloc::{
    boxed::Box,
    format,
    string::{String, ToString},
    vec::Vec,
};
use core::fmt;

/// Errors returned by storage operations.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum FsError {
    /// No such file or directory
    NotFound,
    /// The file or directory already exists
    AlreadyExists,
    /// A path component is not a directory
    NotADirectory,
    /// The path names a directory
    NotAFile,
    /// The volume is read-only
    PermissionDenied,
    /// Error from the card itself
    DeviceError(DeviceError),
    /// The path names no file (empty or `/`)
    EmptyPath,
    /// The device accepted zero bytes
    IoError,
}

impl From<DeviceError> for FsError {
    fn from(e: DeviceError) -> Self {
        FsError::DeviceError(e)
    }
}

impl fmt::Display for FsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FsError::NotFound => f.write_str("not found"),
            FsError::AlreadyExists => f.write_str("already exists"),
            FsError::NotADirectory => f.write_str("not a directory"),
            FsError::NotAFile => f.write_str("not a file"),
            FsError::PermissionDenied => f.write_str("permission denied"),
            FsError::DeviceError(e) => write!(f, "device error: {}", e),
            FsError::EmptyPath => f.write_str("empty path"),
            FsError::IoError => f.write_str("i/o error"),
        }
    }
}

/// How a file is opened for writing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenMode {
    /// Create if absent, truncate existing content
    Write,
    /// Create if absent, every write lands at the end
    Append,
}

/// A writable file handle.
pub trait File: Send {
    /// Write part of `buf`, returning how many bytes were accepted.
    fn write(&mut self, buf: &[u8]) -> Result<usize, FsError>;

    /// Push everything written so far down to the storage device.
    fn flush(&mut self) -> Result<(), FsError>;

    fn write_all(&mut self, mut buf: &[u8]) -> Result<(), FsError> {
        while !buf.is_empty() {
            match self.write(buf)? {
                0 => return Err(FsError::IoError),
                n => buf = &buf[n..],
            }
        }
        Ok(())
    }
}

/// A mounted storage volume.
pub trait FileSystem {
    /// Open the file at `path`, creating it if needed. The parent
    /// directory must already exist.
    fn open(&self, path: &str, mode: OpenMode) -> Result<Box<dyn File>, FsError>;
}

/// Resolve `.`, `..` and repeated slashes. The result always starts with
/// `/` and only ends with one for the root itself.
pub fn normalize_path(path: &str) -> String {
    let mut cleaned_parts: Vec<&str> = Vec::new();
    for part in path.split('/').filter(|&s| !s.is_empty() && s != ".") {
        if part == ".." {
            // `..` at the root stays at the root
            cleaned_parts.pop();
        } else {
            cleaned_parts.push(part);
        }
    }
    if cleaned_parts.is_empty() {
        "/".to_string()
    } else {
        format!("/{}", cleaned_parts.join("/"))
    }
}

/// Split a path into (parent, name).
/// "/a/b/c" -> ("/a/b", "c"), "/a" -> ("/", "a"), "/" -> EmptyPath
pub fn split_path(path: &str) -> Result<(&str, &str), FsError> {
    let path = path.trim_end_matches('/');
    let trimmed = path.trim_start_matches('/');
    if trimmed.is_empty() {
        return Err(FsError::EmptyPath);
    }
    match path.rsplit_once('/') {
        Some(("", name)) => Ok(("/", name)),
        Some((parent, name)) => Ok((parent, name)),
        None => Ok(("/", path)),
    }
}
