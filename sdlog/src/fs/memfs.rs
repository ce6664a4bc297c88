extern crate alloc;
use crate::drivers::DeviceError;
use crate::fs::vfs::{normalize_path, split_path, File, FileSystem, FsError, OpenMode};
use alloc::{boxed::Box, collections::BTreeMap, string::String, sync::Arc, vec::Vec};
use core::sync::atomic::{AtomicBool, Ordering};
use spin::{Mutex, RwLock};

/// Switches shared by the volume and every handle opened on it.
struct VolumeState {
    inserted: AtomicBool,
    read_only: AtomicBool,
    fail_writes: AtomicBool,
}

impl VolumeState {
    fn check_medium(&self) -> Result<(), FsError> {
        if self.inserted.load(Ordering::Acquire) {
            Ok(())
        } else {
            Err(DeviceError::NoMedium.into())
        }
    }
}

enum MemNode {
    Dir,
    File(Arc<Mutex<Vec<u8>>>),
}

/// Open handle on a [`MemFs`] file.
///
/// Written bytes sit in `pending` until [`File::flush`] commits them to the
/// volume; a handle dropped without flushing loses them, like a card that
/// loses power with data still in the controller cache.
struct MemFile {
    data: Arc<Mutex<Vec<u8>>>,
    pending: Vec<u8>,
    volume: Arc<VolumeState>,
}

impl File for MemFile {
    fn write(&mut self, buf: &[u8]) -> Result<usize, FsError> {
        self.volume.check_medium()?;
        if self.volume.fail_writes.load(Ordering::Acquire) {
            return Err(DeviceError::WriteFault.into());
        }
        self.pending.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), FsError> {
        self.volume.check_medium()?;
        // committed data always lands at the end
        self.data.lock().append(&mut self.pending);
        Ok(())
    }
}

/// A RAM backed volume with the layout and failure modes of an SD card.
pub struct MemFs {
    nodes: RwLock<BTreeMap<String, MemNode>>,
    volume: Arc<VolumeState>,
}

impl Default for MemFs {
    fn default() -> Self {
        Self::new()
    }
}

impl MemFs {
    /// An empty, writable, inserted volume holding only `/`.
    pub fn new() -> Self {
        let mut nodes = BTreeMap::new();
        nodes.insert(String::from("/"), MemNode::Dir);
        Self {
            nodes: RwLock::new(nodes),
            volume: Arc::new(VolumeState {
                inserted: AtomicBool::new(true),
                read_only: AtomicBool::new(false),
                fail_writes: AtomicBool::new(false),
            }),
        }
    }

    /// Create a directory. The parent must already exist.
    pub fn create_dir(&self, path: &str) -> Result<(), FsError> {
        self.volume.check_medium()?;
        let path = normalize_path(path);
        let (parent, _) = split_path(&path)?;
        let mut nodes = self.nodes.write();
        match nodes.get(parent) {
            Some(MemNode::Dir) => {}
            Some(MemNode::File(_)) => return Err(FsError::NotADirectory),
            None => return Err(FsError::NotFound),
        }
        if nodes.contains_key(&path) {
            return Err(FsError::AlreadyExists);
        }
        nodes.insert(path, MemNode::Dir);
        Ok(())
    }

    /// Bytes committed to the file at `path`; unflushed writes are not
    /// included.
    pub fn read_file(&self, path: &str) -> Result<Vec<u8>, FsError> {
        self.volume.check_medium()?;
        match self.nodes.read().get(&normalize_path(path)) {
            Some(MemNode::File(data)) => Ok(data.lock().clone()),
            Some(MemNode::Dir) => Err(FsError::NotAFile),
            None => Err(FsError::NotFound),
        }
    }

    pub fn exists(&self, path: &str) -> bool {
        self.nodes.read().contains_key(&normalize_path(path))
    }

    pub fn set_read_only(&self, read_only: bool) {
        self.volume.read_only.store(read_only, Ordering::Release);
    }

    /// Pull the card. Opens and writes fail with `NoMedium` until
    /// [`MemFs::insert`].
    pub fn eject(&self) {
        self.volume.inserted.store(false, Ordering::Release);
    }

    pub fn insert(&self) {
        self.volume.inserted.store(true, Ordering::Release);
    }

    /// Make every write on this volume fail with `WriteFault`.
    pub fn fail_writes(&self, fail: bool) {
        self.volume.fail_writes.store(fail, Ordering::Release);
    }
}

impl FileSystem for MemFs {
    fn open(&self, path: &str, mode: OpenMode) -> Result<Box<dyn File>, FsError> {
        self.volume.check_medium()?;
        if self.volume.read_only.load(Ordering::Acquire) {
            return Err(FsError::PermissionDenied);
        }
        let path = normalize_path(path);
        let (parent, _) = split_path(&path)?;

        let mut nodes = self.nodes.write();
        let existing = match nodes.get(&path) {
            Some(MemNode::File(data)) => Some(data.clone()),
            Some(MemNode::Dir) => return Err(FsError::NotAFile),
            None => None,
        };
        let data = match existing {
            Some(data) => data,
            None => {
                match nodes.get(parent) {
                    Some(MemNode::Dir) => {}
                    Some(MemNode::File(_)) => return Err(FsError::NotADirectory),
                    None => return Err(FsError::NotFound),
                }
                let data = Arc::new(Mutex::new(Vec::new()));
                nodes.insert(path, MemNode::File(data.clone()));
                data
            }
        };
        if mode == OpenMode::Write {
            data.lock().clear();
        }

        Ok(Box::new(MemFile {
            data,
            pending: Vec::new(),
            volume: self.volume.clone(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_creates_missing_file_in_existing_dir() {
        let fs = MemFs::new();
        let mut file = fs.open("/log.txt", OpenMode::Append).unwrap();
        file.write_all(b"hello\n").unwrap();
        file.flush().unwrap();
        assert!(fs.exists("/log.txt"));
        assert_eq!(fs.read_file("/log.txt").unwrap(), b"hello\n");
    }

    #[test]
    fn writes_are_invisible_until_flushed() {
        let fs = MemFs::new();
        let mut file = fs.open("/log.txt", OpenMode::Append).unwrap();
        file.write_all(b"pending").unwrap();
        assert!(fs.read_file("/log.txt").unwrap().is_empty());
        file.flush().unwrap();
        assert_eq!(fs.read_file("/log.txt").unwrap(), b"pending");
    }

    #[test]
    fn append_keeps_existing_content_and_write_truncates() {
        let fs = MemFs::new();
        let mut first = fs.open("/log.txt", OpenMode::Append).unwrap();
        first.write_all(b"a\n").unwrap();
        first.flush().unwrap();

        let mut second = fs.open("/log.txt", OpenMode::Append).unwrap();
        second.write_all(b"b\n").unwrap();
        second.flush().unwrap();
        assert_eq!(fs.read_file("/log.txt").unwrap(), b"a\nb\n");

        let mut fresh = fs.open("/log.txt", OpenMode::Write).unwrap();
        fresh.write_all(b"c\n").unwrap();
        fresh.flush().unwrap();
        assert_eq!(fs.read_file("/log.txt").unwrap(), b"c\n");
    }

    #[test]
    fn missing_parent_and_directories_are_rejected() {
        let fs = MemFs::new();
        assert_eq!(
            fs.open("/logs/boot.txt", OpenMode::Append).err(),
            Some(FsError::NotFound)
        );
        fs.create_dir("/logs").unwrap();
        assert!(fs.open("/logs/boot.txt", OpenMode::Append).is_ok());
        assert_eq!(
            fs.open("/logs", OpenMode::Append).err(),
            Some(FsError::NotAFile)
        );
        assert_eq!(fs.open("/", OpenMode::Append).err(), Some(FsError::EmptyPath));
        assert_eq!(fs.create_dir("/logs"), Err(FsError::AlreadyExists));
    }

    #[test]
    fn read_only_volume_refuses_to_open() {
        let fs = MemFs::new();
        fs.set_read_only(true);
        assert_eq!(
            fs.open("/log.txt", OpenMode::Append).err(),
            Some(FsError::PermissionDenied)
        );
        assert!(!fs.exists("/log.txt"));
    }

    #[test]
    fn ejected_card_fails_open_and_existing_handles() {
        let fs = MemFs::new();
        let mut file = fs.open("/log.txt", OpenMode::Append).unwrap();
        fs.eject();
        let no_medium = FsError::DeviceError(DeviceError::NoMedium);
        assert_eq!(file.write(b"x").err(), Some(no_medium));
        assert_eq!(fs.open("/log.txt", OpenMode::Append).err(), Some(no_medium));

        fs.insert();
        file.write_all(b"back\n").unwrap();
        file.flush().unwrap();
        assert_eq!(fs.read_file("/log.txt").unwrap(), b"back\n");
    }

    #[test]
    fn injected_write_faults() {
        let fs = MemFs::new();
        let mut file = fs.open("/log.txt", OpenMode::Append).unwrap();
        fs.fail_writes(true);
        assert_eq!(
            file.write_all(b"x").err(),
            Some(FsError::DeviceError(DeviceError::WriteFault))
        );
    }
}
