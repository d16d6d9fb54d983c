//! Notice audience and publication enumerations.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::util::invalid_variant;

/// Who a notice is addressed to.
///
/// The catch-all audience is `everyone`, not `all`, since `all` is the
/// "no constraint" filter sentinel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Audience {
    /// Everybody.
    #[default]
    Everyone,
    /// Students only.
    Students,
    /// Staff only.
    Staff,
    /// Parents and guardians.
    Parents,
}

impl Audience {
    /// Return the audience as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Everyone => "everyone",
            Self::Students => "students",
            Self::Staff => "staff",
            Self::Parents => "parents",
        }
    }
}

impl fmt::Display for Audience {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Audience {
    type Err = schoolhub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "everyone" => Ok(Self::Everyone),
            "students" => Ok(Self::Students),
            "staff" => Ok(Self::Staff),
            "parents" => Ok(Self::Parents),
            _ => Err(invalid_variant(
                "audience",
                s,
                &["everyone", "students", "staff", "parents"],
            )),
        }
    }
}

/// Publication state of a notice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeStatus {
    /// Not yet visible.
    #[default]
    Draft,
    /// Visible to its audience.
    Published,
    /// No longer shown.
    Archived,
}

impl NoticeStatus {
    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
            Self::Archived => "archived",
        }
    }
}

impl fmt::Display for NoticeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for NoticeStatus {
    type Err = schoolhub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "draft" => Ok(Self::Draft),
            "published" => Ok(Self::Published),
            "archived" => Ok(Self::Archived),
            _ => Err(invalid_variant(
                "notice status",
                s,
                &["draft", "published", "archived"],
            )),
        }
    }
}
