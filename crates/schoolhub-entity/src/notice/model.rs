//! Notice entity model.

use std::borrow::Cow;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use schoolhub_core::AppResult;
use schoolhub_core::form::{Form, FormValues};
use schoolhub_core::traits::{Listable, Resource};

use super::status::{Audience, NoticeStatus};

/// An announcement on the notice board.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Notice {
    /// Unique identifier.
    pub id: String,
    /// Headline.
    pub title: String,
    /// Full text.
    pub body: String,
    /// Addressees.
    pub audience: Audience,
    /// Publication state.
    pub status: NoticeStatus,
    /// Day the notice went out.
    pub published_on: Option<NaiveDate>,
}

impl Listable for Notice {
    const SEARCH_FIELDS: &'static [&'static str] = &["title", "body"];
    const FILTER_FIELDS: &'static [&'static str] = &["status", "audience"];

    fn id(&self) -> &str {
        &self.id
    }

    fn field_value(&self, field: &str) -> Option<Cow<'_, str>> {
        match field {
            "id" => Some(Cow::Borrowed(&self.id)),
            "title" => Some(Cow::Borrowed(&self.title)),
            "body" => Some(Cow::Borrowed(&self.body)),
            "audience" => Some(Cow::Borrowed(self.audience.as_str())),
            "status" => Some(Cow::Borrowed(self.status.as_str())),
            "published_on" => self.published_on.map(|d| Cow::Owned(d.to_string())),
            _ => None,
        }
    }
}

/// Data submitted by the compose-notice dialog.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateNotice {
    /// Headline.
    #[validate(length(min = 1, max = 150, message = "must be 1-150 characters"))]
    pub title: String,
    /// Full text.
    #[validate(length(min = 1, max = 5000, message = "must be 1-5000 characters"))]
    pub body: String,
    /// Addressees.
    pub audience: Audience,
    /// Publication state.
    pub status: NoticeStatus,
}

impl Form for CreateNotice {
    const FIELDS: &'static [&'static str] = &["title", "body", "audience", "status"];

    fn defaults() -> FormValues {
        FormValues::new()
            .with("audience", Audience::Everyone.as_str())
            .with("status", NoticeStatus::Draft.as_str())
    }

    fn parse(values: &FormValues) -> AppResult<Self> {
        Ok(Self {
            title: values.require("title")?,
            body: values.require("body")?,
            audience: values.parse("audience")?,
            status: values.parse("status")?,
        })
    }
}

/// Notice board totals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoticeStats {
    /// All notices.
    pub total: u64,
    /// Visible notices.
    pub published: u64,
    /// Unpublished drafts.
    pub drafts: u64,
}

impl Resource for Notice {
    type Draft = CreateNotice;
    type Stats = NoticeStats;

    const RESOURCE: &'static str = "notices";
    const LABEL: &'static str = "notice";
    const PAGE_SIZE: u64 = 10;

    fn from_draft(id: String, draft: &CreateNotice) -> Self {
        let published_on = (draft.status == NoticeStatus::Published)
            .then(|| chrono::Local::now().date_naive());
        Self {
            id,
            title: draft.title.clone(),
            body: draft.body.clone(),
            audience: draft.audience,
            status: draft.status,
            published_on,
        }
    }

    fn apply_draft(&mut self, draft: &CreateNotice) {
        let published_on = self.published_on;
        *self = Self::from_draft(std::mem::take(&mut self.id), draft);
        if self.status == NoticeStatus::Published && published_on.is_some() {
            self.published_on = published_on;
        }
    }

    fn to_form(&self) -> FormValues {
        FormValues::new()
            .with("title", self.title.as_str())
            .with("body", self.body.as_str())
            .with("audience", self.audience.as_str())
            .with("status", self.status.as_str())
    }

    fn summarize(items: &[Self]) -> NoticeStats {
        NoticeStats {
            total: items.len() as u64,
            published: items
                .iter()
                .filter(|n| n.status == NoticeStatus::Published)
                .count() as u64,
            drafts: items
                .iter()
                .filter(|n| n.status == NoticeStatus::Draft)
                .count() as u64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schoolhub_core::types::filter::is_active_value;

    #[test]
    fn test_audience_values_never_collide_with_sentinel() {
        for audience in [
            Audience::Everyone,
            Audience::Students,
            Audience::Staff,
            Audience::Parents,
        ] {
            assert!(is_active_value(audience.as_str()));
        }
    }

    #[test]
    fn test_published_draft_gets_date() {
        let draft = CreateNotice {
            title: "Sports Day".to_string(),
            body: "Friday".to_string(),
            audience: Audience::Parents,
            status: NoticeStatus::Published,
        };
        assert!(Notice::from_draft("n1".into(), &draft).published_on.is_some());
    }
}
