//! Entry metadata and display paths

use std::ffi::{CStr, OsStr};
use std::fmt;
use std::os::unix::ffi::OsStrExt;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// What kind of filesystem object an entry is. Drives dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Directory,
    #[serde(rename = "symlink")]
    SymbolicLink,
    Other,
}

impl EntryKind {
    /// Classify a raw `st_mode`.
    pub fn from_mode(mode: libc::mode_t) -> Self {
        match mode & libc::S_IFMT {
            libc::S_IFDIR => Self::Directory,
            libc::S_IFLNK => Self::SymbolicLink,
            _ => Self::Other,
        }
    }
}

/// Metadata for a resolved entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryMeta {
    pub kind: EntryKind,
    /// Full `st_mode`, file type bits included
    pub mode: u32,
    pub nlink: u64,
    pub uid: u32,
    pub gid: u32,
    pub size: u64,
    /// Modification time in seconds since the Unix epoch
    pub mtime: i64,
}

impl EntryMeta {
    #[allow(clippy::useless_conversion)]
    pub(crate) fn from_stat(st: &libc::stat) -> Self {
        Self {
            kind: EntryKind::from_mode(st.st_mode),
            mode: u32::from(st.st_mode),
            nlink: u64::from(st.st_nlink),
            uid: st.st_uid,
            gid: st.st_gid,
            size: u64::try_from(st.st_size).unwrap_or(0),
            mtime: i64::from(st.st_mtime),
        }
    }

    /// Permission and special bits only.
    pub fn permissions(&self) -> u32 {
        self.mode & 0o7777
    }

    /// Whether any execute bit is set.
    pub fn is_executable(&self) -> bool {
        self.mode & 0o111 != 0
    }
}

/// Logical path of an entry as the user sees it.
///
/// Built by appending one name per level to the root argument exactly as it
/// was given. It never reflects symlink targets or the descriptors used to
/// reach the entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DisplayPath {
    path: PathBuf,
    depth: usize,
}

impl DisplayPath {
    /// Display path for a root argument.
    pub fn root(root: impl Into<PathBuf>) -> Self {
        Self {
            path: root.into(),
            depth: 0,
        }
    }

    /// Display path of a child entry one level down.
    pub fn join(&self, name: &CStr) -> Self {
        Self {
            path: self.path.join(OsStr::from_bytes(name.to_bytes())),
            depth: self.depth + 1,
        }
    }

    pub fn as_path(&self) -> &Path {
        &self.path
    }

    /// Number of levels below the root.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Last component, or the whole path for roots such as `.` or `/`.
    pub fn name(&self) -> String {
        match self.path.file_name() {
            Some(name) if self.depth > 0 || self.path.as_os_str() == name => {
                name.to_string_lossy().into_owned()
            }
            _ => self.path.to_string_lossy().into_owned(),
        }
    }
}

impl fmt::Display for DisplayPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}
