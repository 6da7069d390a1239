//! Plain text renderer - one line per leaf

use termcolor::{StandardStream, WriteColor};
use unicode_width::UnicodeWidthStr;

use crate::error::RenderError;
use crate::tree::Alignment;

use super::config::OutputConfig;
use super::session::TerminalSession;
use super::utils::{alignment_padding, format_mtime, format_size, kind_color, mode_string};
use super::{Leaf, Renderer};

/// Writes each leaf's display path, coloured by kind and placed according
/// to the requested alignment.
pub struct TextRenderer<'s, W: WriteColor = StandardStream> {
    session: &'s mut TerminalSession<W>,
    config: OutputConfig,
}

impl<'s, W: WriteColor> TextRenderer<'s, W> {
    pub fn new(session: &'s mut TerminalSession<W>, config: OutputConfig) -> Self {
        Self { session, config }
    }

    /// Long listing columns, without the trailing name.
    fn long_columns(leaf: &Leaf<'_>) -> String {
        let meta = leaf.meta;
        format!(
            "{} {:>3} {:>5} {:>5} {:>7} {} ",
            mode_string(meta),
            meta.nlink,
            meta.uid,
            meta.gid,
            format_size(meta.size),
            format_mtime(meta.mtime),
        )
    }
}

impl<W: WriteColor> Renderer for TextRenderer<'_, W> {
    fn render(&mut self, leaf: &Leaf<'_>, alignment: Alignment) -> Result<(), RenderError> {
        let columns = if self.config.long_listing {
            Self::long_columns(leaf)
        } else {
            String::new()
        };
        let name = leaf.path.to_string();
        let len = columns.width() + name.width();
        let pad = alignment_padding(alignment, len, self.session.width());

        let out = self.session.out();
        write!(out, "{:pad$}{}", "", columns, pad = pad)?;
        out.set_color(&kind_color(leaf.meta))?;
        write!(out, "{}", name)?;
        out.reset()?;
        writeln!(out)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), RenderError> {
        self.session.out().flush()?;
        Ok(())
    }
}
