//! Alumnus entity model.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use validator::Validate;

use schoolhub_core::AppResult;
use schoolhub_core::form::{Form, FormValues};
use schoolhub_core::traits::{Listable, Resource};

use super::status::AlumnusStatus;
use crate::util::opt;

/// A former student.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Alumnus {
    /// Unique identifier.
    pub id: String,
    /// Full name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Year of graduation.
    pub graduation_year: i32,
    /// Current employer.
    pub company: Option<String>,
    /// Current role.
    pub designation: Option<String>,
    /// Verification status.
    pub status: AlumnusStatus,
}

impl Listable for Alumnus {
    const SEARCH_FIELDS: &'static [&'static str] = &["name", "email", "company"];
    const FILTER_FIELDS: &'static [&'static str] = &["status", "graduation_year"];

    fn id(&self) -> &str {
        &self.id
    }

    fn field_value(&self, field: &str) -> Option<Cow<'_, str>> {
        match field {
            "id" => Some(Cow::Borrowed(&self.id)),
            "name" => Some(Cow::Borrowed(&self.name)),
            "email" => Some(Cow::Borrowed(&self.email)),
            "graduation_year" => Some(Cow::Owned(self.graduation_year.to_string())),
            "company" => opt(&self.company),
            "designation" => opt(&self.designation),
            "status" => Some(Cow::Borrowed(self.status.as_str())),
            _ => None,
        }
    }
}

/// Data submitted by the add/edit alumnus dialog.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateAlumnus {
    /// Full name.
    #[validate(length(min = 1, max = 100, message = "must be 1-100 characters"))]
    pub name: String,
    /// Contact email.
    #[validate(email(message = "must be a valid email"))]
    pub email: String,
    /// Year of graduation.
    #[validate(range(min = 1900, max = 2100, message = "must be between 1900 and 2100"))]
    pub graduation_year: i32,
    /// Current employer.
    pub company: Option<String>,
    /// Current role.
    pub designation: Option<String>,
}

impl Form for CreateAlumnus {
    const FIELDS: &'static [&'static str] =
        &["name", "email", "graduation_year", "company", "designation"];

    fn defaults() -> FormValues {
        FormValues::new()
    }

    fn parse(values: &FormValues) -> AppResult<Self> {
        Ok(Self {
            name: values.require("name")?,
            email: values.require("email")?,
            graduation_year: values.parse("graduation_year")?,
            company: values.optional_text("company"),
            designation: values.optional_text("designation"),
        })
    }
}

/// Directory totals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlumniStats {
    /// All alumni.
    pub total: u64,
    /// Verified records.
    pub verified: u64,
    /// Records awaiting verification.
    pub pending: u64,
    /// Alumni with a known employer.
    pub employed: u64,
}

impl Resource for Alumnus {
    type Draft = CreateAlumnus;
    type Stats = AlumniStats;

    const RESOURCE: &'static str = "alumni";
    const LABEL: &'static str = "alumni";
    const PAGE_SIZE: u64 = 10;

    fn from_draft(id: String, draft: &CreateAlumnus) -> Self {
        Self {
            id,
            name: draft.name.clone(),
            email: draft.email.clone(),
            graduation_year: draft.graduation_year,
            company: draft.company.clone(),
            designation: draft.designation.clone(),
            status: AlumnusStatus::Pending,
        }
    }

    fn apply_draft(&mut self, draft: &CreateAlumnus) {
        let status = self.status;
        *self = Self::from_draft(std::mem::take(&mut self.id), draft);
        self.status = status;
    }

    fn to_form(&self) -> FormValues {
        FormValues::new()
            .with("name", self.name.as_str())
            .with("email", self.email.as_str())
            .with("graduation_year", self.graduation_year.to_string())
            .with("company", self.company.clone().unwrap_or_default())
            .with("designation", self.designation.clone().unwrap_or_default())
    }

    fn summarize(items: &[Self]) -> AlumniStats {
        AlumniStats {
            total: items.len() as u64,
            verified: items
                .iter()
                .filter(|a| a.status == AlumnusStatus::Verified)
                .count() as u64,
            pending: items
                .iter()
                .filter(|a| a.status == AlumnusStatus::Pending)
                .count() as u64,
            employed: items.iter().filter(|a| a.company.is_some()).count() as u64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_filter_value() {
        let alumnus = Alumnus {
            graduation_year: 2015,
            ..Default::default()
        };
        assert!(alumnus.matches_field("graduation_year", "2015"));
        assert!(!alumnus.matches_field("graduation_year", "2016"));
    }

    #[test]
    fn test_year_out_of_range() {
        let values = FormValues::new()
            .with("name", "Jane Roe")
            .with("email", "jane@example.com")
            .with("graduation_year", "1850");
        let err = CreateAlumnus::from_values(&values).unwrap_err();
        assert!(err.message.contains("graduation_year"));
    }
}
