//! Sports event entity model.

use std::borrow::Cow;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use schoolhub_core::AppResult;
use schoolhub_core::form::{Form, FormValues};
use schoolhub_core::traits::{Listable, Resource};

use super::status::EventStatus;

/// A fixture, meet, or tournament.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SportsEvent {
    /// Unique identifier.
    pub id: String,
    /// Event name.
    pub name: String,
    /// Sport, e.g. `"football"`.
    pub sport: String,
    /// Venue.
    pub venue: String,
    /// Event date.
    pub date: Option<NaiveDate>,
    /// Registered participants.
    pub participants: u32,
    /// Lifecycle state.
    pub status: EventStatus,
}

impl Listable for SportsEvent {
    const SEARCH_FIELDS: &'static [&'static str] = &["name", "venue"];
    const FILTER_FIELDS: &'static [&'static str] = &["status", "sport"];

    fn id(&self) -> &str {
        &self.id
    }

    fn field_value(&self, field: &str) -> Option<Cow<'_, str>> {
        match field {
            "id" => Some(Cow::Borrowed(&self.id)),
            "name" => Some(Cow::Borrowed(&self.name)),
            "sport" => Some(Cow::Borrowed(&self.sport)),
            "venue" => Some(Cow::Borrowed(&self.venue)),
            "date" => self.date.map(|d| Cow::Owned(d.to_string())),
            "participants" => Some(Cow::Owned(self.participants.to_string())),
            "status" => Some(Cow::Borrowed(self.status.as_str())),
            _ => None,
        }
    }
}

/// Data submitted by the add/edit event dialog.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateEvent {
    /// Event name.
    #[validate(length(min = 1, max = 120, message = "must be 1-120 characters"))]
    pub name: String,
    /// Sport.
    #[validate(length(min = 1, message = "is required"))]
    pub sport: String,
    /// Venue.
    #[validate(length(min = 1, message = "is required"))]
    pub venue: String,
    /// Event date (`YYYY-MM-DD`).
    pub date: NaiveDate,
    /// Expected participants; blank means none registered yet.
    pub participants: Option<u32>,
    /// Lifecycle state.
    pub status: EventStatus,
}

impl Form for CreateEvent {
    const FIELDS: &'static [&'static str] =
        &["name", "sport", "venue", "date", "participants", "status"];

    fn defaults() -> FormValues {
        FormValues::new().with("status", EventStatus::Scheduled.as_str())
    }

    fn parse(values: &FormValues) -> AppResult<Self> {
        Ok(Self {
            name: values.require("name")?,
            sport: values.require("sport")?,
            venue: values.require("venue")?,
            date: values.parse("date")?,
            participants: values.parse_optional("participants")?,
            status: values.parse("status")?,
        })
    }
}

/// Event totals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SportsStats {
    /// All events.
    pub total_events: u64,
    /// Scheduled events.
    pub upcoming: u64,
    /// Finished events.
    pub completed: u64,
    /// Participants across all events.
    pub total_participants: u64,
}

impl Resource for SportsEvent {
    type Draft = CreateEvent;
    type Stats = SportsStats;

    const RESOURCE: &'static str = "sports-events";
    const LABEL: &'static str = "event";
    const PAGE_SIZE: u64 = 10;

    fn from_draft(id: String, draft: &CreateEvent) -> Self {
        Self {
            id,
            name: draft.name.clone(),
            sport: draft.sport.clone(),
            venue: draft.venue.clone(),
            date: Some(draft.date),
            participants: draft.participants.unwrap_or(0),
            status: draft.status,
        }
    }

    fn to_form(&self) -> FormValues {
        FormValues::new()
            .with("name", self.name.as_str())
            .with("sport", self.sport.as_str())
            .with("venue", self.venue.as_str())
            .with("date", self.date.map(|d| d.to_string()).unwrap_or_default())
            .with("participants", self.participants.to_string())
            .with("status", self.status.as_str())
    }

    fn summarize(items: &[Self]) -> SportsStats {
        SportsStats {
            total_events: items.len() as u64,
            upcoming: items
                .iter()
                .filter(|e| e.status == EventStatus::Scheduled)
                .count() as u64,
            completed: items
                .iter()
                .filter(|e| e.status == EventStatus::Completed)
                .count() as u64,
            total_participants: items.iter().map(|e| u64::from(e.participants)).sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_participants_allowed() {
        let values = FormValues::new()
            .with("name", "Inter-house Football")
            .with("sport", "football")
            .with("venue", "Main Ground")
            .with("date", "2024-05-10")
            .with("status", "scheduled");
        let draft = CreateEvent::from_values(&values).expect("valid");
        assert_eq!(draft.participants, None);
        assert_eq!(SportsEvent::from_draft("e1".into(), &draft).participants, 0);
    }

    #[test]
    fn test_garbage_participants_rejected() {
        let values = FormValues::new()
            .with("name", "Relay")
            .with("sport", "athletics")
            .with("venue", "Track")
            .with("date", "2024-05-10")
            .with("participants", "lots")
            .with("status", "scheduled");
        assert!(CreateEvent::from_values(&values).unwrap_err().is_validation());
    }
}
