//! Error types for walking and rendering

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure signalled by a renderer for a single leaf.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Everything that can go wrong while walking.
///
/// All variants except `RootContainer` are reported and folded into the
/// walk outcome; the walk continues with the remaining siblings and roots.
#[derive(Debug, Error)]
pub enum WalkError {
    /// Metadata lookup failed for a name under its parent container.
    #[error("cannot access '{}': {source}", path.display())]
    Resolve {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A directory could not be opened for descent.
    #[error("cannot open directory '{}': {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Reading a directory failed after the listing had started.
    #[error("error reading directory '{}': {source}", path.display())]
    Enumerate {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The renderer rejected a leaf.
    #[error("cannot render '{}': {source}", path.display())]
    Render {
        path: PathBuf,
        #[source]
        source: RenderError,
    },

    /// The container that roots are resolved against could not be opened.
    #[error("cannot open '{}': {source}", path.display())]
    RootContainer {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl WalkError {
    /// Display path the error refers to.
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Resolve { path, .. }
            | Self::Open { path, .. }
            | Self::Enumerate { path, .. }
            | Self::Render { path, .. }
            | Self::RootContainer { path, .. } => path,
        }
    }
}
