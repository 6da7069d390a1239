//! JSON output - one object per leaf, newline separated

use chrono::{DateTime, Utc};
use serde::Serialize;
use termcolor::{StandardStream, WriteColor};

use crate::error::RenderError;
use crate::tree::{Alignment, EntryKind};

use super::session::TerminalSession;
use super::{Leaf, Renderer};

/// Serializable view of a leaf.
#[derive(Debug, Clone, Serialize)]
pub struct JsonEntry {
    /// Display path, lossily converted when it is not UTF-8
    pub path: String,
    pub name: String,
    pub kind: EntryKind,
    /// Permission bits in octal, e.g. `"0755"`
    pub mode: String,
    pub nlink: u64,
    pub uid: u32,
    pub gid: u32,
    pub size: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified: Option<DateTime<Utc>>,
}

impl From<&Leaf<'_>> for JsonEntry {
    fn from(leaf: &Leaf<'_>) -> Self {
        let meta = leaf.meta;
        Self {
            path: leaf.path.to_string(),
            name: leaf.path.name(),
            kind: meta.kind,
            mode: format!("{:04o}", meta.permissions()),
            nlink: meta.nlink,
            uid: meta.uid,
            gid: meta.gid,
            size: meta.size,
            modified: DateTime::from_timestamp(meta.mtime, 0),
        }
    }
}

/// Emits JSON lines. Alignment does not apply.
pub struct JsonRenderer<'s, W: WriteColor = StandardStream> {
    session: &'s mut TerminalSession<W>,
}

impl<'s, W: WriteColor> JsonRenderer<'s, W> {
    pub fn new(session: &'s mut TerminalSession<W>) -> Self {
        Self { session }
    }
}

impl<W: WriteColor> Renderer for JsonRenderer<'_, W> {
    fn render(&mut self, leaf: &Leaf<'_>, _alignment: Alignment) -> Result<(), RenderError> {
        // a failed entry must not leave half a line behind
        let mut line = serde_json::to_vec(&JsonEntry::from(leaf))?;
        line.push(b'\n');
        self.session.out().write_all(&line)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), RenderError> {
        self.session.out().flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{DisplayPath, EntryMeta};
    use termcolor::Buffer;

    fn file_meta() -> EntryMeta {
        EntryMeta {
            kind: EntryKind::Other,
            mode: u32::from(libc::S_IFREG) | 0o644,
            nlink: 1,
            uid: 1000,
            gid: 1000,
            size: 12,
            mtime: 0,
        }
    }

    #[test]
    fn test_json_line() {
        let mut session = TerminalSession::new(Buffer::no_color(), Some(80));
        let path = DisplayPath::root("imgs").join(c"cat.png");
        let meta = file_meta();
        JsonRenderer::new(&mut session)
            .render(&Leaf { path: &path, meta: &meta }, Alignment::Right)
            .unwrap();

        let text = String::from_utf8(session.get_ref().as_slice().to_vec()).unwrap();
        assert_eq!(text.lines().count(), 1);
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["path"], "imgs/cat.png");
        assert_eq!(value["name"], "cat.png");
        assert_eq!(value["kind"], "other");
        assert_eq!(value["mode"], "0644");
        assert_eq!(value["size"], 12);
        assert_eq!(value["modified"], "1970-01-01T00:00:00Z");
    }

    #[test]
    fn test_non_utf8_names_stay_line_delimited() {
        let mut session = TerminalSession::new(Buffer::no_color(), None);
        let root = DisplayPath::root(".");
        let good = root.join(c"good");
        let bad = root.join(c"bad\xffname");
        let meta = file_meta();
        {
            let mut renderer = JsonRenderer::new(&mut session);
            for path in [&good, &bad, &good] {
                renderer
                    .render(&Leaf { path, meta: &meta }, Alignment::Right)
                    .unwrap();
            }
        }

        let text = String::from_utf8(session.get_ref().as_slice().to_vec()).unwrap();
        let values: Vec<serde_json::Value> = text
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(values.len(), 3);
        assert_eq!(values[0]["path"], "./good");
        assert_eq!(values[1]["path"], "./bad\u{fffd}name");
        assert_eq!(values[1]["name"], "bad\u{fffd}name");
        assert_eq!(values[2]["path"], "./good");
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn test_symlink_kind_name() {
        assert_eq!(
            serde_json::to_value(EntryKind::SymbolicLink).unwrap(),
            "symlink"
        );
        assert_eq!(
            serde_json::to_value(EntryKind::Directory).unwrap(),
            "directory"
        );
    }
}
