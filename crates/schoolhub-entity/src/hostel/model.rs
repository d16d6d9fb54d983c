//! Hostel room entity model.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use validator::Validate;

use schoolhub_core::AppResult;
use schoolhub_core::form::{Form, FormValues};
use schoolhub_core::traits::{Listable, Resource};

use super::status::RoomStatus;
use crate::util::percent;

/// A hostel room.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostelRoom {
    /// Unique identifier.
    pub id: String,
    /// Room number, e.g. `"B-204"`.
    pub room_no: String,
    /// Building block.
    pub block: String,
    /// Room type: `single`, `double`, `dormitory`.
    pub room_type: String,
    /// Number of beds.
    pub capacity: u32,
    /// Beds taken.
    pub occupied: u32,
    /// Fee per resident per month.
    pub monthly_fee: f64,
    /// Room status.
    pub status: RoomStatus,
}

impl HostelRoom {
    /// Beds still free.
    pub fn vacancies(&self) -> u32 {
        self.capacity.saturating_sub(self.occupied)
    }
}

impl Listable for HostelRoom {
    const SEARCH_FIELDS: &'static [&'static str] = &["room_no", "block"];
    const FILTER_FIELDS: &'static [&'static str] = &["status", "room_type", "block"];

    fn id(&self) -> &str {
        &self.id
    }

    fn field_value(&self, field: &str) -> Option<Cow<'_, str>> {
        match field {
            "id" => Some(Cow::Borrowed(&self.id)),
            "room_no" => Some(Cow::Borrowed(&self.room_no)),
            "block" => Some(Cow::Borrowed(&self.block)),
            "room_type" => Some(Cow::Borrowed(&self.room_type)),
            "capacity" => Some(Cow::Owned(self.capacity.to_string())),
            "occupied" => Some(Cow::Owned(self.occupied.to_string())),
            "monthly_fee" => Some(Cow::Owned(format!("{:.2}", self.monthly_fee))),
            "status" => Some(Cow::Borrowed(self.status.as_str())),
            _ => None,
        }
    }
}

/// Data submitted by the add/edit room dialog.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateRoom {
    /// Room number.
    #[validate(length(min = 1, max = 16, message = "must be 1-16 characters"))]
    pub room_no: String,
    /// Building block.
    #[validate(length(min = 1, message = "is required"))]
    pub block: String,
    /// Room type.
    #[validate(length(min = 1, message = "is required"))]
    pub room_type: String,
    /// Number of beds.
    #[validate(range(min = 1, max = 64, message = "must be between 1 and 64"))]
    pub capacity: u32,
    /// Fee per resident per month.
    #[validate(range(min = 0.0, message = "must not be negative"))]
    pub monthly_fee: f64,
    /// Room status.
    pub status: RoomStatus,
}

impl Form for CreateRoom {
    const FIELDS: &'static [&'static str] = &[
        "room_no",
        "block",
        "room_type",
        "capacity",
        "monthly_fee",
        "status",
    ];

    fn defaults() -> FormValues {
        FormValues::new()
            .with("room_type", "double")
            .with("capacity", "2")
            .with("status", RoomStatus::Available.as_str())
    }

    fn parse(values: &FormValues) -> AppResult<Self> {
        Ok(Self {
            room_no: values.require("room_no")?,
            block: values.require("block")?,
            room_type: values.require("room_type")?,
            capacity: values.parse("capacity")?,
            monthly_fee: values.decimal("monthly_fee")?,
            status: values.parse("status")?,
        })
    }
}

/// Occupancy totals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HostelStats {
    /// Rooms.
    pub total_rooms: u64,
    /// Beds across all rooms.
    pub total_beds: u64,
    /// Beds taken.
    pub occupied_beds: u64,
    /// Rooms with a free bed.
    pub available_rooms: u64,
    /// Percentage of beds taken.
    pub occupancy_rate: f64,
}

impl Resource for HostelRoom {
    type Draft = CreateRoom;
    type Stats = HostelStats;

    const RESOURCE: &'static str = "hostel-rooms";
    const LABEL: &'static str = "room";
    const PAGE_SIZE: u64 = 10;

    fn from_draft(id: String, draft: &CreateRoom) -> Self {
        Self {
            id,
            room_no: draft.room_no.clone(),
            block: draft.block.clone(),
            room_type: draft.room_type.clone(),
            capacity: draft.capacity,
            occupied: 0,
            monthly_fee: draft.monthly_fee,
            status: draft.status,
        }
    }

    fn apply_draft(&mut self, draft: &CreateRoom) {
        let occupied = self.occupied;
        *self = Self::from_draft(std::mem::take(&mut self.id), draft);
        self.occupied = occupied;
    }

    fn to_form(&self) -> FormValues {
        FormValues::new()
            .with("room_no", self.room_no.as_str())
            .with("block", self.block.as_str())
            .with("room_type", self.room_type.as_str())
            .with("capacity", self.capacity.to_string())
            .with("monthly_fee", self.monthly_fee.to_string())
            .with("status", self.status.as_str())
    }

    fn summarize(items: &[Self]) -> HostelStats {
        let total_beds: u64 = items.iter().map(|r| u64::from(r.capacity)).sum();
        let occupied_beds: u64 = items.iter().map(|r| u64::from(r.occupied)).sum();
        HostelStats {
            total_rooms: items.len() as u64,
            total_beds,
            occupied_beds,
            available_rooms: items
                .iter()
                .filter(|r| r.status == RoomStatus::Available && r.vacancies() > 0)
                .count() as u64,
            occupancy_rate: percent(occupied_beds, total_beds),
        }
    }
}
