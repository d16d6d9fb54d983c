//! Student entity model.

use std::borrow::Cow;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use schoolhub_core::AppResult;
use schoolhub_core::form::{Form, FormValues};
use schoolhub_core::traits::{Listable, Resource};

use super::status::StudentStatus;
use crate::util::opt;

/// A student enrolled at the school.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Student {
    /// Unique identifier assigned by the API.
    pub id: String,
    /// School admission number.
    pub admission_no: String,
    /// Full name.
    pub name: String,
    /// Contact email.
    pub email: Option<String>,
    /// Class the student is enrolled in, e.g. `"10"`.
    pub class_name: String,
    /// Section within the class, e.g. `"B"`.
    pub section: Option<String>,
    /// Guardian contact number.
    pub guardian_phone: Option<String>,
    /// Enrollment status.
    pub status: StudentStatus,
    /// Date of admission.
    pub admission_date: Option<NaiveDate>,
}

impl Listable for Student {
    const SEARCH_FIELDS: &'static [&'static str] = &["name", "admission_no", "email"];
    const FILTER_FIELDS: &'static [&'static str] = &["status", "class_name"];

    fn id(&self) -> &str {
        &self.id
    }

    fn field_value(&self, field: &str) -> Option<Cow<'_, str>> {
        match field {
            "id" => Some(Cow::Borrowed(&self.id)),
            "admission_no" => Some(Cow::Borrowed(&self.admission_no)),
            "name" => Some(Cow::Borrowed(&self.name)),
            "email" => opt(&self.email),
            "class_name" => Some(Cow::Borrowed(&self.class_name)),
            "section" => opt(&self.section),
            "guardian_phone" => opt(&self.guardian_phone),
            "status" => Some(Cow::Borrowed(self.status.as_str())),
            "admission_date" => self.admission_date.map(|d| Cow::Owned(d.to_string())),
            _ => None,
        }
    }
}

/// Data submitted by the add/edit student dialog.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateStudent {
    /// Admission number (unique).
    #[validate(length(min = 1, max = 32, message = "must be 1-32 characters"))]
    pub admission_no: String,
    /// Full name.
    #[validate(length(min = 1, max = 100, message = "must be 1-100 characters"))]
    pub name: String,
    /// Contact email.
    #[validate(email(message = "must be a valid email"))]
    pub email: Option<String>,
    /// Class.
    #[validate(length(min = 1, message = "is required"))]
    pub class_name: String,
    /// Section.
    pub section: Option<String>,
    /// Guardian contact number.
    pub guardian_phone: Option<String>,
    /// Enrollment status.
    pub status: StudentStatus,
    /// Date of admission (`YYYY-MM-DD`).
    pub admission_date: Option<NaiveDate>,
}

impl Form for CreateStudent {
    const FIELDS: &'static [&'static str] = &[
        "admission_no",
        "name",
        "email",
        "class_name",
        "section",
        "guardian_phone",
        "status",
        "admission_date",
    ];

    fn defaults() -> FormValues {
        FormValues::new().with("status", StudentStatus::Active.as_str())
    }

    fn parse(values: &FormValues) -> AppResult<Self> {
        Ok(Self {
            admission_no: values.require("admission_no")?,
            name: values.require("name")?,
            email: values.optional_text("email"),
            class_name: values.require("class_name")?,
            section: values.optional_text("section"),
            guardian_phone: values.optional_text("guardian_phone"),
            status: values.parse("status")?,
            admission_date: values.parse_optional("admission_date")?,
        })
    }
}

/// Headcounts per enrollment status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentStats {
    /// All students.
    pub total: u64,
    /// Active students.
    pub active: u64,
    /// Inactive students.
    pub inactive: u64,
    /// Graduated students.
    pub graduated: u64,
    /// Suspended students.
    pub suspended: u64,
}

impl Resource for Student {
    type Draft = CreateStudent;
    type Stats = StudentStats;

    const RESOURCE: &'static str = "students";
    const LABEL: &'static str = "student";
    const PAGE_SIZE: u64 = 10;

    fn from_draft(id: String, draft: &CreateStudent) -> Self {
        Self {
            id,
            admission_no: draft.admission_no.clone(),
            name: draft.name.clone(),
            email: draft.email.clone(),
            class_name: draft.class_name.clone(),
            section: draft.section.clone(),
            guardian_phone: draft.guardian_phone.clone(),
            status: draft.status,
            admission_date: draft.admission_date,
        }
    }

    fn to_form(&self) -> FormValues {
        FormValues::new()
            .with("admission_no", self.admission_no.as_str())
            .with("name", self.name.as_str())
            .with("email", self.email.clone().unwrap_or_default())
            .with("class_name", self.class_name.as_str())
            .with("section", self.section.clone().unwrap_or_default())
            .with("guardian_phone", self.guardian_phone.clone().unwrap_or_default())
            .with("status", self.status.as_str())
            .with(
                "admission_date",
                self.admission_date.map(|d| d.to_string()).unwrap_or_default(),
            )
    }

    fn summarize(items: &[Self]) -> StudentStats {
        let count = |status: StudentStatus| items.iter().filter(|s| s.status == status).count() as u64;
        StudentStats {
            total: items.len() as u64,
            active: count(StudentStatus::Active),
            inactive: count(StudentStatus::Inactive),
            graduated: count(StudentStatus::Graduated),
            suspended: count(StudentStatus::Suspended),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> FormValues {
        FormValues::new()
            .with("admission_no", "A-1001")
            .with("name", "John Doe")
            .with("email", "john@example.com")
            .with("class_name", "10")
            .with("status", "active")
    }

    #[test]
    fn test_draft_from_valid_form() {
        let draft = CreateStudent::from_values(&form()).expect("valid");
        assert_eq!(draft.name, "John Doe");
        assert_eq!(draft.section, None);
        assert_eq!(draft.status, StudentStatus::Active);
    }

    #[test]
    fn test_draft_rejects_bad_email() {
        let values = form().with("email", "not-an-email");
        let err = CreateStudent::from_values(&values).unwrap_err();
        assert!(err.is_validation());
        assert!(err.message.contains("email"));
    }

    #[test]
    fn test_draft_rejects_bad_admission_date() {
        let values = form().with("admission_date", "yesterday");
        assert!(CreateStudent::from_values(&values).unwrap_err().is_validation());
    }

    #[test]
    fn test_form_roundtrip_for_edit() {
        let draft = CreateStudent::from_values(&form()).expect("valid");
        let student = Student::from_draft("s1".to_string(), &draft);
        let again = CreateStudent::from_values(&student.to_form()).expect("valid");
        assert_eq!(again.admission_no, "A-1001");
        assert_eq!(again.email.as_deref(), Some("john@example.com"));
    }

    #[test]
    fn test_partial_record_deserializes() {
        let student: Student = serde_json::from_str(r#"{"id":"s9","name":"Jane Roe"}"#).unwrap();
        assert_eq!(student.status, StudentStatus::Active);
        assert!(student.field_value("email").is_none());
        assert!(student.matches_search("roe"));
    }

    #[test]
    fn test_summarize_counts_statuses() {
        let mut a = Student::default();
        a.status = StudentStatus::Graduated;
        let b = Student::default();
        let stats = Student::summarize(&[a, b]);
        assert_eq!(stats.total, 2);
        assert_eq!(stats.active, 1);
        assert_eq!(stats.graduated, 1);
    }
}
