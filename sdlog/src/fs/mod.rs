pub mod memfs;
pub mod vfs;

pub use vfs::{File, FileSystem, FsError, OpenMode};
