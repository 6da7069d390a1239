//! Aggregated walk result

use std::ops::{BitOr, BitOrAssign};

/// Result of visiting one entry or a whole subtree.
///
/// Outcomes fold with `|`: a single failure anywhere taints the aggregate,
/// while the walk itself keeps going.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WalkOutcome {
    #[default]
    Success,
    Failure,
}

impl WalkOutcome {
    pub fn is_success(self) -> bool {
        self == Self::Success
    }
}

impl BitOr for WalkOutcome {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        if self == Self::Failure || rhs == Self::Failure {
            Self::Failure
        } else {
            Self::Success
        }
    }
}

impl BitOrAssign for WalkOutcome {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = *self | rhs;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_absorbs() {
        use WalkOutcome::*;
        assert_eq!(Success | Success, Success);
        assert_eq!(Success | Failure, Failure);
        assert_eq!(Failure | Success, Failure);

        let mut acc = Success;
        acc |= Failure;
        acc |= Success;
        assert!(!acc.is_success());
    }
}
