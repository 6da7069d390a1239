//! imgls - a directory lister that hands every entry to a pluggable renderer

pub mod error;
pub mod output;
pub mod tree;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use error::{RenderError, WalkError};
pub use output::{JsonRenderer, Leaf, OutputConfig, Renderer, TerminalSession, TextRenderer};
pub use tree::{
    Alignment, DirWalker, DisplayPath, EntryKind, EntryMeta, TraversalConfig, WalkOutcome,
};
