//! Disk utilities used by script-driven batch tools: mask-based file
//! discovery, timestamp comparison and scratch-file management.

use std::cmp::Ordering;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use log::debug;

use crate::mask::{FileMask, MaskError};

/// Prefix of scratch files made by [`make_temporary_file`].
pub const TEMP_PREFIX: &str = "mgd_";
pub const TEMP_SUFFIX: &str = ".tmp";

/// A file found by [`find_files`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub path: PathBuf,
    pub modified: Option<SystemTime>,
}

#[derive(Debug, thiserror::Error)]
pub enum FindError {
    #[error(transparent)]
    Mask(#[from] MaskError),
    #[error(transparent)]
    Io(#[from] io::Error),
}

// ── Discovery ─────────────────────────────────────────────────────────────────

/// List files matching `mask`.
///
/// The directory part of `mask` (or `.` when there is none) is searched; the
/// final component is a [`FileMask`].  With `recurse`, every directory below
/// it is searched too, deepest directories first, and each directory's
/// matches are appended in name order.
pub fn find_files(mask: &Path, recurse: bool) -> Result<Vec<FileEntry>, FindError> {
    let dir = match mask.parent() {
        Some(d) if !d.as_os_str().is_empty() => d.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let pattern = mask
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "*".to_owned());
    let pattern = FileMask::new(&pattern)?;

    let dirs = if recurse { directory_tree(&dir)? } else { vec![dir] };
    let mut found = Vec::new();
    for d in &dirs {
        found.extend(list_matching(d, &pattern)?);
    }
    debug!("{} files match {}", found.len(), mask.display());
    Ok(found)
}

/// `root` and every directory below it, children before their parent.
fn directory_tree(root: &Path) -> io::Result<Vec<PathBuf>> {
    let mut out = Vec::new();
    walk_dirs(root, &mut out)?;
    Ok(out)
}

fn walk_dirs(dir: &Path, out: &mut Vec<PathBuf>) -> io::Result<()> {
    let mut subdirs: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().map(|t| t.is_dir()).unwrap_or(false))
        .map(|e| e.path())
        .collect();
    subdirs.sort();
    for sub in &subdirs {
        walk_dirs(sub, out)?;
    }
    out.push(dir.to_path_buf());
    Ok(())
}

fn list_matching(dir: &Path, pattern: &FileMask) -> io::Result<Vec<FileEntry>> {
    let mut entries: Vec<FileEntry> = std::fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().map(|t| t.is_file()).unwrap_or(false))
        .filter(|e| pattern.matches(&e.file_name().to_string_lossy()))
        .map(|e| FileEntry {
            modified: e.metadata().and_then(|m| m.modified()).ok(),
            path: e.path(),
        })
        .collect();
    entries.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(entries)
}

// ── Timestamps ────────────────────────────────────────────────────────────────

/// Compare modification times.  A file that does not exist counts as older
/// than any file that does.
pub fn compare_file_time(a: &Path, b: &Path) -> Ordering {
    mtime(a).cmp(&mtime(b))
}

fn mtime(path: &Path) -> SystemTime {
    std::fs::metadata(path)
        .and_then(|m| m.modified())
        .unwrap_or(SystemTime::UNIX_EPOCH)
}

// ── Scratch files ─────────────────────────────────────────────────────────────

/// Create a new, uniquely named `mgd_*.tmp` file in `dir` and return its path.
/// The file is left on disk for the caller.
pub fn make_temporary_file(dir: &Path) -> io::Result<PathBuf> {
    let file = tempfile::Builder::new()
        .prefix(TEMP_PREFIX)
        .suffix(TEMP_SUFFIX)
        .tempfile_in(dir)?;
    file.into_temp_path().keep().map_err(|e| e.error)
}

/// Remove files in the system temp directory whose names match `mask`.
/// Returns how many were removed.
pub fn delete_temporary_files(mask: &str) -> Result<usize, FindError> {
    delete_matching_in(&std::env::temp_dir(), mask)
}

/// [`delete_temporary_files`] against an explicit directory.
pub fn delete_matching_in(dir: &Path, mask: &str) -> Result<usize, FindError> {
    let pattern = FileMask::new(mask)?;
    let mut removed = 0;
    for entry in list_matching(dir, &pattern)? {
        match std::fs::remove_file(&entry.path) {
            Ok(()) => removed += 1,
            Err(e) => debug!("can't remove {}: {e}", entry.path.display()),
        }
    }
    Ok(removed)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
