//! Room status enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::util::invalid_variant;

/// Whether a room can take more residents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomStatus {
    /// Has free beds.
    #[default]
    Available,
    /// Every bed is taken.
    Full,
    /// Closed for repairs.
    Maintenance,
}

impl RoomStatus {
    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Full => "full",
            Self::Maintenance => "maintenance",
        }
    }
}

impl fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RoomStatus {
    type Err = schoolhub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "available" => Ok(Self::Available),
            "full" => Ok(Self::Full),
            "maintenance" => Ok(Self::Maintenance),
            _ => Err(invalid_variant(
                "room status",
                s,
                &["available", "full", "maintenance"],
            )),
        }
    }
}
