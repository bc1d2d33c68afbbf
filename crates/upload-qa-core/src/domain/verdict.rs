//! Whole-image quality verdict.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Quality verdict for an image about to be uploaded.
///
/// Variants are ordered by priority: a dark image is reported as `Dark`
/// even when it is also blurry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// More than the configured share of regions are dark.
    Dark,
    /// More than the configured share of regions are blurry.
    Blurry,
    /// Neither check tripped, or the image could not be evaluated.
    Ok,
}

impl Verdict {
    /// Returns `true` if the image should be held back for review.
    #[must_use]
    pub const fn is_rejected(self) -> bool {
        !matches!(self, Self::Ok)
    }

    /// Stable lowercase name, matching the serialized form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Blurry => "blurry",
            Self::Ok => "ok",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
