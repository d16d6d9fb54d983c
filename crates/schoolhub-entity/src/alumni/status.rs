//! Alumni verification status.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::util::invalid_variant;

/// Whether the school has confirmed the alumnus record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlumnusStatus {
    /// Awaiting verification.
    #[default]
    Pending,
    /// Confirmed against school records.
    Verified,
}

impl AlumnusStatus {
    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Verified => "verified",
        }
    }
}

impl fmt::Display for AlumnusStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AlumnusStatus {
    type Err = schoolhub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "verified" => Ok(Self::Verified),
            _ => Err(invalid_variant(
                "alumnus status",
                s,
                &["pending", "verified"],
            )),
        }
    }
}
