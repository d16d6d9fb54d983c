//! Book availability enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::util::invalid_variant;

/// Availability of a catalogue entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookStatus {
    /// At least one copy on the shelf.
    #[default]
    Available,
    /// Every copy is out on loan.
    Issued,
    /// Held for a borrower.
    Reserved,
    /// Written off.
    Lost,
}

impl BookStatus {
    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Issued => "issued",
            Self::Reserved => "reserved",
            Self::Lost => "lost",
        }
    }

    /// Status implied by the number of copies on the shelf.
    pub fn from_availability(available_copies: u32) -> Self {
        if available_copies > 0 {
            Self::Available
        } else {
            Self::Issued
        }
    }
}

impl fmt::Display for BookStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BookStatus {
    type Err = schoolhub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "available" => Ok(Self::Available),
            "issued" => Ok(Self::Issued),
            "reserved" => Ok(Self::Reserved),
            "lost" => Ok(Self::Lost),
            _ => Err(invalid_variant(
                "book status",
                s,
                &["available", "issued", "reserved", "lost"],
            )),
        }
    }
}
