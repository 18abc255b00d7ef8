#![forbid(unsafe_code)]

//! How an update reconciles with an existing redoable future.
//!
//! Starting from `past=[1,2] present=3 future=[4,5]` and updating to `6`:
//!
//! | behavior            | past'         | future' |
//! |---------------------|---------------|---------|
//! | `mergePastReversed` | `[1,2,5,4,3]` | `[]`    |
//! | `mergePast`         | `[1,2,3,4,5]` | `[]`    |
//! | `destroyFuture`     | `[1,2,3]`     | `[]`    |
//! | `keepFuture`        | `[1,2,3]`     | `[4,5]` |

use std::fmt;
use std::str::FromStr;

use crate::error::TransitionError;

/// Policy applied to `future` when a new value is recorded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(rename_all = "camelCase", try_from = "String")
)]
pub enum MutationBehavior {
    /// Fold the future into the past, farthest state first, then the present.
    #[default]
    MergePastReversed,
    /// Append the present, then the future in its original order.
    MergePast,
    /// Append the present and drop the future.
    DestroyFuture,
    /// Append the present and leave the future redoable.
    KeepFuture,
}

impl MutationBehavior {
    /// Every variant, in declaration order.
    pub const ALL: [Self; 4] = [
        Self::MergePastReversed,
        Self::MergePast,
        Self::DestroyFuture,
        Self::KeepFuture,
    ];

    /// The camelCase name used in configuration and on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MergePastReversed => "mergePastReversed",
            Self::MergePast => "mergePast",
            Self::DestroyFuture => "destroyFuture",
            Self::KeepFuture => "keepFuture",
        }
    }
}

impl fmt::Display for MutationBehavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MutationBehavior {
    type Err = TransitionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|behavior| behavior.as_str() == s)
            .ok_or_else(|| TransitionError::InvalidBehavior(s.to_owned()))
    }
}

impl TryFrom<String> for MutationBehavior {
    type Error = TransitionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
