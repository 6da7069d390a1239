//! Output configuration types

/// Configuration for output formatting.
#[derive(Debug, Clone, Default)]
pub struct OutputConfig {
    pub use_color: bool,
    /// Prefix each leaf with mode, link count, owner, size and mtime
    pub long_listing: bool,
}
