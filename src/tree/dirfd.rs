//! Descriptor-relative directory access
//!
//! Every lookup goes through an open directory stream (`openat`, `fstatat`)
//! instead of a concatenated path string, so renaming an ancestor between
//! calls cannot redirect a lookup and the working directory never matters
//! below the root container.

use std::ffi::{CStr, CString};
use std::io;
use std::mem::MaybeUninit;
use std::os::fd::RawFd;
use std::os::unix::ffi::OsStrExt;
use std::path::Path;
use std::ptr::NonNull;

use super::entry::EntryMeta;

#[cfg(target_os = "linux")]
const AT_NO_AUTOMOUNT: libc::c_int = libc::AT_NO_AUTOMOUNT;
#[cfg(not(target_os = "linux"))]
const AT_NO_AUTOMOUNT: libc::c_int = 0;

#[cfg(any(target_os = "linux", target_os = "emscripten", target_os = "hurd"))]
unsafe fn errno_location() -> *mut libc::c_int {
    unsafe { libc::__errno_location() }
}

#[cfg(any(target_os = "android", target_os = "netbsd", target_os = "openbsd"))]
unsafe fn errno_location() -> *mut libc::c_int {
    unsafe { libc::__errno() }
}

#[cfg(any(
    target_os = "macos",
    target_os = "ios",
    target_os = "freebsd",
    target_os = "dragonfly"
))]
unsafe fn errno_location() -> *mut libc::c_int {
    unsafe { libc::__error() }
}

/// Convert a path or name into the NUL-terminated form the syscalls take.
pub fn to_cstring(path: &Path) -> io::Result<CString> {
    CString::new(path.as_os_str().as_bytes()).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "path contains an interior NUL byte",
        )
    })
}

/// An open directory stream, usable both for enumeration and as the anchor
/// for relative lookups.
///
/// The stream and its descriptor are closed exactly once, when the handle is
/// dropped.
#[derive(Debug)]
pub struct DirHandle {
    dir: NonNull<libc::DIR>,
}

impl DirHandle {
    /// Open the current working directory.
    pub fn open_cwd() -> io::Result<Self> {
        Self::open_raw(libc::AT_FDCWD, c".")
    }

    /// Open `path`, relative paths being taken against the working directory.
    pub fn open(path: &Path) -> io::Result<Self> {
        Self::open_raw(libc::AT_FDCWD, &to_cstring(path)?)
    }

    /// Open the directory `name` relative to this one.
    ///
    /// Unless `follow` is set, a symlink in place of `name` fails with
    /// `ELOOP` rather than being opened.
    pub fn open_at(&self, name: &CStr, follow: bool) -> io::Result<Self> {
        let flags = if follow { 0 } else { libc::O_NOFOLLOW };
        Self::open_with(self.raw_fd(), name, flags)
    }

    fn open_raw(dirfd: RawFd, name: &CStr) -> io::Result<Self> {
        Self::open_with(dirfd, name, 0)
    }

    fn open_with(dirfd: RawFd, name: &CStr, extra_flags: libc::c_int) -> io::Result<Self> {
        let fd = unsafe {
            libc::openat(
                dirfd,
                name.as_ptr(),
                libc::O_RDONLY | libc::O_DIRECTORY | libc::O_CLOEXEC | extra_flags,
            )
        };
        if fd < 0 {
            return Err(io::Error::last_os_error());
        }
        let dir = unsafe { libc::fdopendir(fd) };
        match NonNull::new(dir) {
            Some(dir) => Ok(Self { dir }),
            None => {
                let err = io::Error::last_os_error();
                // fdopendir only takes the descriptor over on success
                unsafe { libc::close(fd) };
                Err(err)
            }
        }
    }

    fn raw_fd(&self) -> RawFd {
        unsafe { libc::dirfd(self.dir.as_ptr()) }
    }

    /// Look up `name` relative to this directory without following a
    /// trailing symlink, unless `follow` is set.
    pub fn stat_at(&self, name: &CStr, follow: bool) -> io::Result<EntryMeta> {
        let mut flags = AT_NO_AUTOMOUNT;
        if !follow {
            flags |= libc::AT_SYMLINK_NOFOLLOW;
        }
        let mut st = MaybeUninit::<libc::stat>::uninit();
        let rc = unsafe { libc::fstatat(self.raw_fd(), name.as_ptr(), st.as_mut_ptr(), flags) };
        if rc != 0 {
            return Err(io::Error::last_os_error());
        }
        let st = unsafe { st.assume_init() };
        Ok(EntryMeta::from_stat(&st))
    }

    /// Next entry name in the order the OS yields them, `.` and `..`
    /// included.
    ///
    /// Returns `None` at the end of the stream and `Some(Err(_))` if the
    /// read itself fails partway through.
    pub fn read_entry(&self) -> Option<io::Result<CString>> {
        unsafe {
            *errno_location() = 0;
            let dent = libc::readdir(self.dir.as_ptr());
            if dent.is_null() {
                let errno = *errno_location();
                return if errno == 0 {
                    None
                } else {
                    Some(Err(io::Error::from_raw_os_error(errno)))
                };
            }
            let name = CStr::from_ptr((*dent).d_name.as_ptr());
            Some(Ok(name.to_owned()))
        }
    }
}

impl Drop for DirHandle {
    fn drop(&mut self) {
        // closedir releases the descriptor as well
        unsafe { libc::closedir(self.dir.as_ptr()) };
    }
}
