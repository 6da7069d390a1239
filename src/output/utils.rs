//! Shared formatting helpers for renderers

use chrono::{Local, TimeZone};
use termcolor::{Color, ColorSpec};

use crate::tree::{Alignment, EntryKind, EntryMeta};

/// Format a size in bytes to human-readable format.
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1}G", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1}M", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1}K", bytes as f64 / KB as f64)
    } else {
        format!("{}B", bytes)
    }
}

/// `ls -l` style mode string, e.g. `drwxr-xr-x`.
pub fn mode_string(meta: &EntryMeta) -> String {
    let mode = meta.mode;
    let file_type = match mode & u32::from(libc::S_IFMT) {
        m if m == u32::from(libc::S_IFDIR) => 'd',
        m if m == u32::from(libc::S_IFLNK) => 'l',
        m if m == u32::from(libc::S_IFCHR) => 'c',
        m if m == u32::from(libc::S_IFBLK) => 'b',
        m if m == u32::from(libc::S_IFIFO) => 'p',
        m if m == u32::from(libc::S_IFSOCK) => 's',
        _ => '-',
    };

    let mut s = String::with_capacity(10);
    s.push(file_type);
    // (read, write, execute, special bit, special char)
    let triads = [
        (0o400, 0o200, 0o100, 0o4000, 's'),
        (0o040, 0o020, 0o010, 0o2000, 's'),
        (0o004, 0o002, 0o001, 0o1000, 't'),
    ];
    for (r, w, x, special, ch) in triads {
        s.push(if mode & r != 0 { 'r' } else { '-' });
        s.push(if mode & w != 0 { 'w' } else { '-' });
        s.push(match (mode & x != 0, mode & special != 0) {
            (true, true) => ch,
            (false, true) => ch.to_ascii_uppercase(),
            (true, false) => 'x',
            (false, false) => '-',
        });
    }
    s
}

/// Local modification time as `YYYY-MM-DD HH:MM`.
pub fn format_mtime(secs: i64) -> String {
    match Local.timestamp_opt(secs, 0).single() {
        Some(t) => t.format("%Y-%m-%d %H:%M").to_string(),
        None => "?".repeat(16),
    }
}

/// Spaces to put before a line of `len` columns so it lands where
/// `alignment` wants it. No padding without a known width.
pub fn alignment_padding(alignment: Alignment, len: usize, width: Option<usize>) -> usize {
    let Some(width) = width else {
        return 0;
    };
    let spare = width.saturating_sub(len);
    match alignment {
        Alignment::Left => 0,
        Alignment::Right => spare,
        Alignment::Center => spare / 2,
    }
}

/// Colour for an entry name, `ls` style.
pub fn kind_color(meta: &EntryMeta) -> ColorSpec {
    let mut spec = ColorSpec::new();
    match meta.kind {
        EntryKind::Directory => {
            spec.set_fg(Some(Color::Blue)).set_bold(true);
        }
        EntryKind::SymbolicLink => {
            spec.set_fg(Some(Color::Cyan));
        }
        EntryKind::Other if meta.is_executable() => {
            spec.set_fg(Some(Color::Green));
        }
        EntryKind::Other => {}
    }
    spec
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(kind: EntryKind, mode: u32) -> EntryMeta {
        EntryMeta {
            kind,
            mode,
            nlink: 1,
            uid: 0,
            gid: 0,
            size: 0,
            mtime: 0,
        }
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(0), "0B");
        assert_eq!(format_size(1023), "1023B");
        assert_eq!(format_size(1024), "1.0K");
        assert_eq!(format_size(1536), "1.5K");
        assert_eq!(format_size(5 * 1024 * 1024), "5.0M");
        assert_eq!(format_size(3 * 1024 * 1024 * 1024), "3.0G");
    }

    #[test]
    fn test_mode_string() {
        let dir = meta(EntryKind::Directory, u32::from(libc::S_IFDIR) | 0o755);
        assert_eq!(mode_string(&dir), "drwxr-xr-x");

        let file = meta(EntryKind::Other, u32::from(libc::S_IFREG) | 0o640);
        assert_eq!(mode_string(&file), "-rw-r-----");

        let link = meta(EntryKind::SymbolicLink, u32::from(libc::S_IFLNK) | 0o777);
        assert_eq!(mode_string(&link), "lrwxrwxrwx");
    }

    #[test]
    fn test_mode_string_special_bits() {
        let setuid = meta(EntryKind::Other, u32::from(libc::S_IFREG) | 0o4755);
        assert_eq!(mode_string(&setuid), "-rwsr-xr-x");

        let sticky = meta(EntryKind::Directory, u32::from(libc::S_IFDIR) | 0o1777);
        assert_eq!(mode_string(&sticky), "drwxrwxrwt");

        let setgid_no_exec = meta(EntryKind::Other, u32::from(libc::S_IFREG) | 0o2644);
        assert_eq!(mode_string(&setgid_no_exec), "-rw-r-Sr--");
    }

    #[test]
    fn test_format_mtime_shape() {
        let s = format_mtime(1_700_000_000);
        assert_eq!(s.len(), 16);
        assert_eq!(&s[4..5], "-");
        assert_eq!(&s[13..14], ":");
    }

    #[test]
    fn test_alignment_padding() {
        assert_eq!(alignment_padding(Alignment::Left, 10, Some(80)), 0);
        assert_eq!(alignment_padding(Alignment::Right, 10, Some(80)), 70);
        assert_eq!(alignment_padding(Alignment::Center, 10, Some(80)), 35);
        assert_eq!(alignment_padding(Alignment::Right, 100, Some(80)), 0);
        assert_eq!(alignment_padding(Alignment::Right, 10, None), 0);
    }

    #[test]
    fn test_kind_color() {
        let dir = meta(EntryKind::Directory, u32::from(libc::S_IFDIR) | 0o755);
        assert_eq!(kind_color(&dir).fg(), Some(&Color::Blue));
        let plain = meta(EntryKind::Other, u32::from(libc::S_IFREG) | 0o644);
        assert!(kind_color(&plain).is_none());
    }
}
