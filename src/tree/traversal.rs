//! Per-entry dispatch: decide whether an entry is rendered or descended into.

use std::ffi::CStr;

use tracing::{debug, trace};

use crate::error::WalkError;
use crate::output::{Leaf, Renderer};

use super::config::TraversalConfig;
use super::dirfd::DirHandle;
use super::entry::{DisplayPath, EntryKind, EntryMeta};
use super::outcome::WalkOutcome;
use super::utils::{is_self_reference, should_ignore_name};

/// State shared by every frame of a single walk.
pub(super) struct Traversal<'a, R: Renderer> {
    config: &'a TraversalConfig,
    renderer: &'a mut R,
}

impl<'a, R: Renderer> Traversal<'a, R> {
    pub(super) fn new(config: &'a TraversalConfig, renderer: &'a mut R) -> Self {
        Self { config, renderer }
    }

    /// Hand an error to the renderer's error channel. Always a failure.
    pub(super) fn report(&mut self, error: WalkError) -> WalkOutcome {
        debug!(path = %error.path().display(), %error, "entry failed");
        self.renderer.report(&error);
        WalkOutcome::Failure
    }

    /// Resolve `name` under `parent` and dispatch it.
    ///
    /// `.` and `..` met during descent are skipped, as are names matching an
    /// ignore pattern. Roots are always processed.
    pub(super) fn visit_path(
        &mut self,
        parent: &DirHandle,
        path: DisplayPath,
        name: &CStr,
        is_root: bool,
    ) -> WalkOutcome {
        if !is_root {
            if is_self_reference(name) {
                return WalkOutcome::Success;
            }
            if should_ignore_name(name, &self.config.ignore_patterns) {
                trace!(path = %path, "ignored");
                return WalkOutcome::Success;
            }
        }

        match parent.stat_at(name, false) {
            Ok(meta) => {
                trace!(path = %path, kind = ?meta.kind, "resolved");
                self.visit(parent, &path, name, &meta, is_root)
            }
            Err(source) => self.report(WalkError::Resolve {
                path: path.as_path().to_path_buf(),
                source,
            }),
        }
    }

    /// Apply the dispatch policy to an already resolved entry.
    pub(super) fn visit(
        &mut self,
        parent: &DirHandle,
        path: &DisplayPath,
        name: &CStr,
        meta: &EntryMeta,
        is_root: bool,
    ) -> WalkOutcome {
        if self.config.directories_only {
            return self.render_leaf(path, meta);
        }

        match meta.kind {
            EntryKind::Directory if self.config.recurse_dirs || is_root => {
                // only roots may be reached through a symlink
                self.descend(parent, path, name, is_root)
            }
            EntryKind::SymbolicLink if is_root && self.config.dereference_links => {
                self.dereference(parent, path, name, is_root)
            }
            _ => self.render_leaf(path, meta),
        }
    }

    /// Re-resolve a symlink root through to its final target and dispatch
    /// that instead. The kernel walks the whole chain; loops surface as
    /// `ELOOP`.
    fn dereference(
        &mut self,
        parent: &DirHandle,
        path: &DisplayPath,
        name: &CStr,
        is_root: bool,
    ) -> WalkOutcome {
        match parent.stat_at(name, true) {
            Ok(target) => {
                debug!(path = %path, kind = ?target.kind, "dereferenced");
                self.visit(parent, path, name, &target, is_root)
            }
            Err(source) => self.report(WalkError::Resolve {
                path: path.as_path().to_path_buf(),
                source,
            }),
        }
    }

    fn render_leaf(&mut self, path: &DisplayPath, meta: &EntryMeta) -> WalkOutcome {
        let leaf = Leaf { path, meta };
        match self.renderer.render(&leaf, self.config.alignment) {
            Ok(()) => WalkOutcome::Success,
            Err(source) => self.report(WalkError::Render {
                path: path.as_path().to_path_buf(),
                source,
            }),
        }
    }
}
