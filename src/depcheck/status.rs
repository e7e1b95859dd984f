//! Dependency check result types.
//!
//! Every check produces a [`CheckOutcome`]: a tri-state [`CheckStatus`]
//! plus an optional detail such as the located path or the version found.

use std::fmt;

/// Whether a dependency was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    /// The dependency is present.
    Available,
    /// The dependency is genuinely missing.
    Unavailable,
    /// Verification itself could not be performed (e.g. no compiler to
    /// run a compile probe with).
    Unknown,
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CheckStatus::Available => "available",
            CheckStatus::Unavailable => "unavailable",
            CheckStatus::Unknown => "unknown",
        };
        f.write_str(label)
    }
}

/// The result of checking a single dependency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutcome {
    /// Tri-state result.
    pub status: CheckStatus,
    /// Located path, version found, or why the check was inconclusive.
    pub detail: Option<String>,
}

impl CheckOutcome {
    /// Dependency found, with no further detail.
    pub fn available() -> Self {
        Self {
            status: CheckStatus::Available,
            detail: None,
        }
    }

    /// Dependency found at / as `detail`.
    pub fn available_with(detail: impl Into<String>) -> Self {
        Self {
            status: CheckStatus::Available,
            detail: Some(detail.into()),
        }
    }

    /// Dependency not found.
    pub fn unavailable() -> Self {
        Self {
            status: CheckStatus::Unavailable,
            detail: None,
        }
    }

    /// Dependency not found, with an explanation.
    pub fn unavailable_with(detail: impl Into<String>) -> Self {
        Self {
            status: CheckStatus::Unavailable,
            detail: Some(detail.into()),
        }
    }

    /// Check could not be performed.
    pub fn unknown(reason: impl Into<String>) -> Self {
        Self {
            status: CheckStatus::Unknown,
            detail: Some(reason.into()),
        }
    }

    /// Map a boolean probe onto available/unavailable.
    pub fn from_found(found: bool) -> Self {
        if found {
            Self::available()
        } else {
            Self::unavailable()
        }
    }

    /// Whether the dependency is present.
    pub fn is_available(&self) -> bool {
        self.status == CheckStatus::Available
    }

    /// Whether the dependency is known to be missing.
    pub fn is_unavailable(&self) -> bool {
        self.status == CheckStatus::Unavailable
    }

    /// Whether the check was inconclusive.
    pub fn is_unknown(&self) -> bool {
        self.status == CheckStatus::Unknown
    }
}
