//! Test utilities for building directory trees and observing walks.
//!
//! This module is only compiled for tests and benchmarks.

use std::ffi::OsStr;
use std::fs;
use std::os::unix::fs::symlink;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::error::{RenderError, WalkError};
use crate::output::{Leaf, Renderer};
use crate::tree::{Alignment, EntryKind};

/// A temporary directory tree for testing.
///
/// The tree is automatically cleaned up when dropped.
pub struct TestTree {
    dir: TempDir,
}

impl TestTree {
    /// Create a new empty temporary directory.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        Self { dir }
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Add a file, creating parent directories as needed.
    pub fn add_file(&self, path: &str, content: &str) -> PathBuf {
        let full_path = self.dir.path().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        fs::write(&full_path, content).expect("Failed to write file");
        full_path
    }

    /// Add an (empty) directory, creating parents as needed.
    pub fn add_dir(&self, path: &str) -> PathBuf {
        let full_path = self.dir.path().join(path);
        fs::create_dir_all(&full_path).expect("Failed to create dir");
        full_path
    }

    /// Create a symlink at `path` pointing at `target` (taken verbatim).
    pub fn add_symlink(&self, target: &str, path: &str) -> PathBuf {
        let full_path = self.dir.path().join(path);
        symlink(target, &full_path).expect("Failed to create symlink");
        full_path
    }
}

impl Default for TestTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether the current process bypasses permission checks.
pub fn running_as_root() -> bool {
    unsafe { libc::geteuid() == 0 }
}

/// Renderer that records what it was given instead of drawing anything.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    /// Display paths and kinds, in render order
    pub rendered: Vec<(String, EntryKind)>,
    /// Alignment received with each render
    pub alignments: Vec<Alignment>,
    /// Messages of reported errors, in report order
    pub errors: Vec<String>,
    /// Leaves whose name is listed here fail to render
    pub fail_on: Vec<String>,
    /// Files deleted after the first render; see [`RecordingRenderer::removing_after_first`]
    pub remove_after_first: Vec<PathBuf>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make rendering fail for leaves named `name`.
    pub fn failing_on(mut self, name: &str) -> Self {
        self.fail_on.push(name.to_string());
        self
    }

    /// After the first leaf renders, delete the first of `candidates` that is
    /// not that leaf, so a later lookup of it in the same walk fails.
    pub fn removing_after_first(mut self, candidates: Vec<PathBuf>) -> Self {
        self.remove_after_first = candidates;
        self
    }

    /// Rendered display paths, in render order.
    pub fn paths(&self) -> Vec<&str> {
        self.rendered.iter().map(|(p, _)| p.as_str()).collect()
    }

    /// Rendered display paths, sorted.
    pub fn sorted_paths(&self) -> Vec<&str> {
        let mut paths = self.paths();
        paths.sort_unstable();
        paths
    }
}

impl Renderer for RecordingRenderer {
    fn render(&mut self, leaf: &Leaf<'_>, alignment: Alignment) -> Result<(), RenderError> {
        let name = leaf.path.name();
        if self.fail_on.contains(&name) {
            return Err(std::io::Error::other(format!("refusing to render {}", name)).into());
        }
        self.rendered.push((leaf.path.to_string(), leaf.meta.kind));
        self.alignments.push(alignment);

        if self.rendered.len() == 1 {
            let victim = self
                .remove_after_first
                .iter()
                .find(|p| p.file_name() != Some(OsStr::new(&name)));
            if let Some(victim) = victim {
                fs::remove_file(victim).expect("Failed to remove file");
            }
        }
        Ok(())
    }

    fn report(&mut self, error: &WalkError) {
        self.errors.push(error.to_string());
    }
}
