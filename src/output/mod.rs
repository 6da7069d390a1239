//! Leaf rendering
//!
//! The walker knows nothing about how entries are shown. It hands each leaf
//! to a [`Renderer`]; this module provides the renderer boundary plus two
//! implementations:
//!
//! - `text` - one aligned, coloured line per leaf, optional long listing
//! - `json` - one JSON object per leaf
//!
//! Both write through a [`TerminalSession`], the single output handle
//! acquired at startup.

mod config;
mod json;
mod session;
mod text;
mod utils;

use crate::error::{RenderError, WalkError};
use crate::tree::{Alignment, DisplayPath, EntryMeta};

pub use config::OutputConfig;
pub use json::{JsonEntry, JsonRenderer};
pub use session::{TerminalSession, terminal_width};
pub use text::TextRenderer;
pub use utils::{alignment_padding, format_mtime, format_size, mode_string};

/// An entry the walker decided to show rather than descend into.
#[derive(Debug, Clone, Copy)]
pub struct Leaf<'a> {
    pub path: &'a DisplayPath,
    pub meta: &'a EntryMeta,
}

/// Consumer of walk results.
pub trait Renderer {
    /// Show one leaf. An error fails this entry only; the walk continues.
    fn render(&mut self, leaf: &Leaf<'_>, alignment: Alignment) -> Result<(), RenderError>;

    /// Receive a failure detected during the walk. Called exactly once per
    /// failure, at the point it happens.
    fn report(&mut self, error: &WalkError) {
        eprintln!("imgls: {}", error);
    }

    /// Flush anything still buffered once the walk is over.
    fn finish(&mut self) -> Result<(), RenderError> {
        Ok(())
    }
}
