//! Configuration types for the directory walker

use std::fmt;
use std::str::FromStr;

use glob::Pattern;
use thiserror::Error;

/// Horizontal placement hint handed through to the renderer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Alignment {
    Left,
    #[default]
    Right,
    Center,
}

/// Returned when an alignment name is not one of left, right, or center.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown alignment type: {0} (expected left, right, or center)")]
pub struct AlignmentParseError(pub String);

impl FromStr for Alignment {
    type Err = AlignmentParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("left") {
            Ok(Self::Left)
        } else if s.eq_ignore_ascii_case("right") {
            Ok(Self::Right)
        } else if s.eq_ignore_ascii_case("center") {
            Ok(Self::Center)
        } else {
            Err(AlignmentParseError(s.to_string()))
        }
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Center => "center",
        })
    }
}

/// Configuration for traversal behavior. Built once from the command line.
#[derive(Debug, Clone, Default)]
pub struct TraversalConfig {
    /// Describe directories themselves instead of listing their contents
    pub directories_only: bool,
    /// Descend into directories found below the roots
    pub recurse_dirs: bool,
    /// Resolve symlinks given as roots
    pub dereference_links: bool,
    pub alignment: Alignment,
    /// Entry names skipped during descent. Roots are never filtered.
    pub ignore_patterns: Vec<Pattern>,
}

impl TraversalConfig {
    /// Compile glob patterns and attach them as ignore patterns.
    pub fn with_ignore_patterns<S: AsRef<str>>(
        mut self,
        patterns: &[S],
    ) -> Result<Self, glob::PatternError> {
        self.ignore_patterns = patterns
            .iter()
            .map(|p| Pattern::new(p.as_ref()))
            .collect::<Result<_, _>>()?;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alignment_parse_case_insensitive() {
        assert_eq!("left".parse(), Ok(Alignment::Left));
        assert_eq!("RIGHT".parse(), Ok(Alignment::Right));
        assert_eq!("Center".parse(), Ok(Alignment::Center));
    }

    #[test]
    fn test_alignment_parse_rejects_unknown() {
        let err = "middle".parse::<Alignment>().unwrap_err();
        assert_eq!(err, AlignmentParseError("middle".to_string()));
        assert!(err.to_string().contains("middle"));
    }

    #[test]
    fn test_default_alignment_is_right() {
        assert_eq!(TraversalConfig::default().alignment, Alignment::Right);
    }

    #[test]
    fn test_with_ignore_patterns() {
        let config = TraversalConfig::default()
            .with_ignore_patterns(&["*.log", "target"])
            .unwrap();
        assert_eq!(config.ignore_patterns.len(), 2);
        assert!(config.ignore_patterns[0].matches("debug.log"));

        assert!(TraversalConfig::default().with_ignore_patterns(&["[z-"]).is_err());
    }
}
