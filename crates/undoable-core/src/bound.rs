#![forbid(unsafe_code)]

//! History limits and the rule that trims `past` to them.
//!
//! ```text
//! limit = 3, overflow = len - limit
//!
//! [a, b, c]        overflow 0  ->  [a, b, c]
//! [a, b, c, d]     overflow 1  ->  [b, c, d]
//! [a, b, c, d, e]  overflow 2  ->  [c, d, e]   (limit lowered between calls)
//! ```
//!
//! Trimmed states are gone for good; only the newest `limit` survive.

use std::fmt;
use std::str::FromStr;

/// Default number of past states kept.
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// Maximum retained length of `past`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "HistoryLimitRepr", into = "HistoryLimitRepr")
)]
pub enum HistoryLimit {
    /// Keep at most this many past states.
    Bounded(usize),
    /// Never trim.
    Unbounded,
}

impl HistoryLimit {
    /// The bound, or `None` when unbounded.
    #[must_use]
    pub const fn get(self) -> Option<usize> {
        match self {
            Self::Bounded(limit) => Some(limit),
            Self::Unbounded => None,
        }
    }
}

impl Default for HistoryLimit {
    fn default() -> Self {
        Self::Bounded(DEFAULT_HISTORY_LIMIT)
    }
}

impl From<usize> for HistoryLimit {
    fn from(limit: usize) -> Self {
        Self::Bounded(limit)
    }
}

impl fmt::Display for HistoryLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bounded(limit) => write!(f, "{limit}"),
            Self::Unbounded => f.write_str("unbounded"),
        }
    }
}

/// A history limit string that is neither a positive integer nor a known
/// sentinel.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("history limit must be a positive integer or one of: unbounded, infinity, infinium. Not: {0}")]
pub struct ParseHistoryLimitError(pub String);

impl FromStr for HistoryLimit {
    type Err = ParseHistoryLimitError;

    /// Accepts a positive integer or `unbounded`. `infinity` and `infinium`
    /// are accepted as aliases for `unbounded`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed {
            "unbounded" | "infinity" | "infinium" => Ok(Self::Unbounded),
            _ => match trimmed.parse::<usize>() {
                Ok(limit) if limit > 0 => Ok(Self::Bounded(limit)),
                _ => Err(ParseHistoryLimitError(s.to_owned())),
            },
        }
    }
}

/// Wire form of [`HistoryLimit`]: a bare count or a sentinel name.
#[cfg(feature = "serde")]
#[doc(hidden)]
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum HistoryLimitRepr {
    Count(usize),
    Named(String),
}

#[cfg(feature = "serde")]
impl TryFrom<HistoryLimitRepr> for HistoryLimit {
    type Error = ParseHistoryLimitError;

    fn try_from(repr: HistoryLimitRepr) -> Result<Self, Self::Error> {
        match repr {
            HistoryLimitRepr::Count(0) => Err(ParseHistoryLimitError("0".into())),
            HistoryLimitRepr::Count(limit) => Ok(Self::Bounded(limit)),
            HistoryLimitRepr::Named(name) => name.parse(),
        }
    }
}

#[cfg(feature = "serde")]
impl From<HistoryLimit> for HistoryLimitRepr {
    fn from(limit: HistoryLimit) -> Self {
        match limit {
            HistoryLimit::Bounded(limit) => Self::Count(limit),
            HistoryLimit::Unbounded => Self::Named("unbounded".into()),
        }
    }
}

/// The newest `limit` entries of `past`.
///
/// Borrows instead of copying: the caller's sequence is never modified, so a
/// timeline referenced elsewhere stays intact.
#[must_use]
pub fn bound_past<T>(past: &[T], limit: HistoryLimit) -> &[T] {
    let HistoryLimit::Bounded(limit) = limit else {
        return past;
    };
    let overflow = past.len().saturating_sub(limit);
    &past[overflow..]
}
