//! File-system collaborator.
//!
//! The tokenizer never touches the disk directly; it asks a [`ScriptFs`] to
//! load whole files into byte buffers.  [`DiskFs`] is the real thing,
//! [`MemoryFs`] backs tests and embedded scripts.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

/// When [`ScriptFs::write_with_mode`] actually writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteMode {
    /// Always write, creating the file if needed.
    #[default]
    Always,
    /// Write only over a file that already exists.
    Update,
    /// Never write.
    Never,
}

/// Load/write/exists access to script files.
pub trait ScriptFs {
    /// Read the whole file.
    fn load(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Replace the file's contents.
    fn write(&mut self, path: &Path, bytes: &[u8]) -> io::Result<()>;

    fn exists(&self, path: &Path) -> bool;

    /// Write according to `mode`.  Returns `true` if a write happened.
    fn write_with_mode(&mut self, path: &Path, bytes: &[u8], mode: WriteMode) -> io::Result<bool> {
        let go = match mode {
            WriteMode::Always => true,
            WriteMode::Update => self.exists(path),
            WriteMode::Never => false,
        };
        if go {
            self.write(path, bytes)?;
        }
        Ok(go)
    }
}

// ── DiskFs ────────────────────────────────────────────────────────────────────

/// The local file system.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiskFs;

impl ScriptFs for DiskFs {
    fn load(&self, path: &Path) -> io::Result<Vec<u8>> {
        std::fs::read(path)
    }

    /// Creates missing parent directories before writing.
    fn write(&mut self, path: &Path, bytes: &[u8]) -> io::Result<()> {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)?;
        }
        std::fs::write(path, bytes)
    }

    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }
}

// ── MemoryFs ──────────────────────────────────────────────────────────────────

/// An in-memory file map keyed by path.
#[derive(Debug, Default, Clone)]
pub struct MemoryFs {
    files: HashMap<PathBuf, Vec<u8>>,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a file, builder style.
    pub fn with_file(mut self, path: impl Into<PathBuf>, contents: impl Into<Vec<u8>>) -> Self {
        self.insert(path, contents);
        self
    }

    pub fn insert(&mut self, path: impl Into<PathBuf>, contents: impl Into<Vec<u8>>) {
        self.files.insert(path.into(), contents.into());
    }

    pub fn get(&self, path: impl AsRef<Path>) -> Option<&[u8]> {
        self.files.get(path.as_ref()).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl ScriptFs for MemoryFs {
    fn load(&self, path: &Path) -> io::Result<Vec<u8>> {
        self.files.get(path).cloned().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, format!("{}: no such file", path.display()))
        })
    }

    fn write(&mut self, path: &Path, bytes: &[u8]) -> io::Result<()> {
        self.files.insert(path.to_path_buf(), bytes.to_vec());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_load_and_missing() {
        let fs = MemoryFs::new().with_file("a.txt", "hello");
        assert_eq!(fs.load(Path::new("a.txt")).unwrap(), b"hello");
        let err = fs.load(Path::new("b.txt")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn write_modes() {
        let mut fs = MemoryFs::new();
        let p = Path::new("out.txt");
        assert!(!fs.write_with_mode(p, b"x", WriteMode::Update).unwrap());
        assert!(!fs.exists(p));
        assert!(!fs.write_with_mode(p, b"x", WriteMode::Never).unwrap());
        assert!(fs.write_with_mode(p, b"x", WriteMode::Always).unwrap());
        assert!(fs.write_with_mode(p, b"y", WriteMode::Update).unwrap());
        assert_eq!(fs.get(p), Some(b"y".as_slice()));
    }

    #[test]
    fn disk_write_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nested/deeper/out.txt");
        let mut fs = DiskFs;
        assert!(fs.write_with_mode(&target, b"data", WriteMode::Always).unwrap());
        assert!(fs.exists(&target));
        assert_eq!(fs.load(&target).unwrap(), b"data");
    }

    #[test]
    fn disk_update_skips_missing() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("absent.txt");
        let mut fs = DiskFs;
        assert!(!fs.write_with_mode(&target, b"data", WriteMode::Update).unwrap());
        assert!(!target.exists());
    }
}
