//! Attendance entity model.

use std::borrow::Cow;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use schoolhub_core::AppResult;
use schoolhub_core::form::{Form, FormValues};
use schoolhub_core::traits::{Listable, Resource};

use super::status::AttendanceStatus;
use crate::util::{opt, percent};

/// One student's attendance mark for one day.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttendanceRecord {
    /// Unique identifier.
    pub id: String,
    /// The student's identifier.
    pub student_id: String,
    /// The student's name, denormalized for display.
    pub student_name: String,
    /// Class the mark was taken in.
    pub class_name: String,
    /// Day of the mark.
    pub date: Option<NaiveDate>,
    /// The mark.
    pub status: AttendanceStatus,
    /// Free-text remarks.
    pub remarks: Option<String>,
}

impl Listable for AttendanceRecord {
    const SEARCH_FIELDS: &'static [&'static str] = &["student_name", "student_id"];
    const FILTER_FIELDS: &'static [&'static str] = &["status", "class_name", "date"];

    fn id(&self) -> &str {
        &self.id
    }

    fn field_value(&self, field: &str) -> Option<Cow<'_, str>> {
        match field {
            "id" => Some(Cow::Borrowed(&self.id)),
            "student_id" => Some(Cow::Borrowed(&self.student_id)),
            "student_name" => Some(Cow::Borrowed(&self.student_name)),
            "class_name" => Some(Cow::Borrowed(&self.class_name)),
            "date" => self.date.map(|d| Cow::Owned(d.to_string())),
            "status" => Some(Cow::Borrowed(self.status.as_str())),
            "remarks" => opt(&self.remarks),
            _ => None,
        }
    }
}

/// Data submitted by the mark-attendance dialog.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MarkAttendance {
    /// Student identifier.
    #[validate(length(min = 1, message = "is required"))]
    pub student_id: String,
    /// Student name.
    #[validate(length(min = 1, max = 100, message = "must be 1-100 characters"))]
    pub student_name: String,
    /// Class.
    #[validate(length(min = 1, message = "is required"))]
    pub class_name: String,
    /// Day (`YYYY-MM-DD`).
    pub date: NaiveDate,
    /// The mark.
    pub status: AttendanceStatus,
    /// Remarks.
    #[validate(length(max = 500, message = "must be at most 500 characters"))]
    pub remarks: Option<String>,
}

impl Form for MarkAttendance {
    const FIELDS: &'static [&'static str] = &[
        "student_id",
        "student_name",
        "class_name",
        "date",
        "status",
        "remarks",
    ];

    fn defaults() -> FormValues {
        FormValues::new()
            .with("date", chrono::Local::now().date_naive().to_string())
            .with("status", AttendanceStatus::Present.as_str())
    }

    fn parse(values: &FormValues) -> AppResult<Self> {
        Ok(Self {
            student_id: values.require("student_id")?,
            student_name: values.require("student_name")?,
            class_name: values.require("class_name")?,
            date: values.parse("date")?,
            status: values.parse("status")?,
            remarks: values.optional_text("remarks"),
        })
    }
}

/// One line of a bulk attendance submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkEntry {
    /// Student identifier.
    pub student_id: String,
    /// The mark.
    pub status: AttendanceStatus,
}

/// Marks for a whole class on one day, sent in a single call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkAttendance {
    /// Class the marks belong to.
    pub class_name: String,
    /// Day of the marks.
    pub date: NaiveDate,
    /// One entry per student.
    pub entries: Vec<BulkEntry>,
}

impl BulkAttendance {
    /// Mark every listed student with the same status.
    pub fn uniform(
        class_name: impl Into<String>,
        date: NaiveDate,
        student_ids: impl IntoIterator<Item = String>,
        status: AttendanceStatus,
    ) -> Self {
        Self {
            class_name: class_name.into(),
            date,
            entries: student_ids
                .into_iter()
                .map(|student_id| BulkEntry { student_id, status })
                .collect(),
        }
    }
}

/// Attendance totals and rate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttendanceStats {
    /// Number of marks.
    pub total: u64,
    /// Present marks.
    pub present: u64,
    /// Absent marks.
    pub absent: u64,
    /// Late marks.
    pub late: u64,
    /// Excused marks.
    pub excused: u64,
    /// Percentage of marks that count as attended.
    pub attendance_rate: f64,
}

impl Resource for AttendanceRecord {
    type Draft = MarkAttendance;
    type Stats = AttendanceStats;

    const RESOURCE: &'static str = "attendance";
    const LABEL: &'static str = "attendance";
    const PAGE_SIZE: u64 = 15;

    fn from_draft(id: String, draft: &MarkAttendance) -> Self {
        Self {
            id,
            student_id: draft.student_id.clone(),
            student_name: draft.student_name.clone(),
            class_name: draft.class_name.clone(),
            date: Some(draft.date),
            status: draft.status,
            remarks: draft.remarks.clone(),
        }
    }

    fn to_form(&self) -> FormValues {
        FormValues::new()
            .with("student_id", self.student_id.as_str())
            .with("student_name", self.student_name.as_str())
            .with("class_name", self.class_name.as_str())
            .with("date", self.date.map(|d| d.to_string()).unwrap_or_default())
            .with("status", self.status.as_str())
            .with("remarks", self.remarks.clone().unwrap_or_default())
    }

    fn summarize(items: &[Self]) -> AttendanceStats {
        let count =
            |status: AttendanceStatus| items.iter().filter(|r| r.status == status).count() as u64;
        let attended = items
            .iter()
            .filter(|r| r.status.counts_as_attended())
            .count() as u64;
        AttendanceStats {
            total: items.len() as u64,
            present: count(AttendanceStatus::Present),
            absent: count(AttendanceStatus::Absent),
            late: count(AttendanceStatus::Late),
            excused: count(AttendanceStatus::Excused),
            attendance_rate: percent(attended, items.len() as u64),
        }
    }
}
