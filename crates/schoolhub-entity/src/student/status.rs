//! Student enrollment status enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::util::invalid_variant;

/// Enrollment status of a student.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StudentStatus {
    /// Currently enrolled.
    #[default]
    Active,
    /// Enrolled but not attending (withdrawn, on leave).
    Inactive,
    /// Finished the programme.
    Graduated,
    /// Temporarily barred.
    Suspended,
}

impl StudentStatus {
    /// All variants in display order.
    pub const ALL: [Self; 4] = [
        Self::Active,
        Self::Inactive,
        Self::Graduated,
        Self::Suspended,
    ];

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Graduated => "graduated",
            Self::Suspended => "suspended",
        }
    }
}

impl fmt::Display for StudentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for StudentStatus {
    type Err = schoolhub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            "graduated" => Ok(Self::Graduated),
            "suspended" => Ok(Self::Suspended),
            _ => Err(invalid_variant(
                "student status",
                s,
                &["active", "inactive", "graduated", "suspended"],
            )),
        }
    }
}
