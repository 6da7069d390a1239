//! Directory traversal
//!
//! Roots are resolved against one shared container opened once per walk.
//! Below that, every lookup is relative to the open directory it was found
//! in, and the [`DisplayPath`] handed to the renderer is tracked separately
//! from the descriptor chain.

mod config;
mod dirfd;
mod entry;
mod outcome;
mod traversal;
mod utils;
mod walker;

pub use config::{Alignment, AlignmentParseError, TraversalConfig};
pub use dirfd::DirHandle;
pub use entry::{DisplayPath, EntryKind, EntryMeta};
pub use outcome::WalkOutcome;
pub use walker::DirWalker;
