//! DirWalker - depth-first, descriptor-relative walk over a list of roots

use std::ffi::CStr;
use std::path::Path;

use tracing::debug;

use crate::error::WalkError;
use crate::output::Renderer;

use super::config::TraversalConfig;
use super::dirfd::{DirHandle, to_cstring};
use super::entry::DisplayPath;
use super::outcome::WalkOutcome;
use super::traversal::Traversal;

/// Walks command-line roots and feeds every leaf to a [`Renderer`].
///
/// Failures below the roots are reported through the renderer and folded
/// into the returned [`WalkOutcome`]; only a root container that cannot be
/// opened aborts the walk.
pub struct DirWalker {
    config: TraversalConfig,
}

impl DirWalker {
    pub fn new(config: TraversalConfig) -> Self {
        Self { config }
    }

    /// Walk `roots`, resolving relative roots against the working directory.
    /// An empty list walks `.`.
    pub fn walk<P: AsRef<Path>, R: Renderer>(
        &self,
        roots: &[P],
        renderer: &mut R,
    ) -> Result<WalkOutcome, WalkError> {
        let base = DirHandle::open_cwd().map_err(|source| WalkError::RootContainer {
            path: ".".into(),
            source,
        })?;
        Ok(self.walk_from(&base, roots, renderer))
    }

    /// Walk `roots`, resolving relative roots against `base` instead of the
    /// working directory.
    pub fn walk_at<P: AsRef<Path>, R: Renderer>(
        &self,
        base: &Path,
        roots: &[P],
        renderer: &mut R,
    ) -> Result<WalkOutcome, WalkError> {
        let base_dir = DirHandle::open(base).map_err(|source| WalkError::RootContainer {
            path: base.to_path_buf(),
            source,
        })?;
        Ok(self.walk_from(&base_dir, roots, renderer))
    }

    fn walk_from<P: AsRef<Path>, R: Renderer>(
        &self,
        base: &DirHandle,
        roots: &[P],
        renderer: &mut R,
    ) -> WalkOutcome {
        let mut traversal = Traversal::new(&self.config, renderer);
        if roots.is_empty() {
            return traversal.visit_root(base, Path::new("."));
        }

        let mut outcome = WalkOutcome::Success;
        for root in roots {
            outcome |= traversal.visit_root(base, root.as_ref());
        }
        outcome
    }
}

impl<R: Renderer> Traversal<'_, R> {
    fn visit_root(&mut self, base: &DirHandle, root: &Path) -> WalkOutcome {
        match to_cstring(root) {
            Ok(name) => self.visit_path(base, DisplayPath::root(root), &name, true),
            Err(source) => self.report(WalkError::Resolve {
                path: root.to_path_buf(),
                source,
            }),
        }
    }

    /// Open `name` under `parent` and visit each of its entries in the order
    /// the OS yields them.
    ///
    /// `path` is the directory's own display path. The opened handle is
    /// dropped, and so closed, on every return.
    pub(super) fn descend(
        &mut self,
        parent: &DirHandle,
        path: &DisplayPath,
        name: &CStr,
        follow_links: bool,
    ) -> WalkOutcome {
        let dir = match parent.open_at(name, follow_links) {
            Ok(dir) => dir,
            Err(source) => {
                return self.report(WalkError::Open {
                    path: path.as_path().to_path_buf(),
                    source,
                });
            }
        };
        debug!(path = %path, "descending");

        let mut outcome = WalkOutcome::Success;
        while let Some(entry) = dir.read_entry() {
            match entry {
                Ok(child) => {
                    outcome |= self.visit_path(&dir, path.join(&child), &child, false);
                }
                Err(source) => {
                    // entries already visited keep their output
                    return self.report(WalkError::Enumerate {
                        path: path.as_path().to_path_buf(),
                        source,
                    });
                }
            }
        }
        outcome
    }
}
