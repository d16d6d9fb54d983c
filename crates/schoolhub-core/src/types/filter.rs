//! Filter types for list screens and list queries.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Sentinel filter value meaning "no constraint".
pub const ALL: &str = "all";

/// Whether a selected filter value constrains anything.
///
/// Both the empty string and [`ALL`] mean the filter is inactive.
pub fn is_active_value(value: &str) -> bool {
    !value.is_empty() && value != ALL
}

/// A single equality constraint on a named field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldFilter {
    /// The field name to filter on.
    pub field: String,
    /// The value the field must equal exactly.
    pub value: String,
}

impl FieldFilter {
    /// Create a new equality filter.
    pub fn eq(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Whether this filter constrains anything.
    pub fn is_active(&self) -> bool {
        is_active_value(&self.value)
    }
}

/// The user's current query: free-text search plus discrete field filters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    /// Free-text search, matched case-insensitively as a substring.
    #[serde(default)]
    pub search_term: String,
    /// Selected value per field; `""` or `"all"` means unconstrained.
    #[serde(default)]
    pub fields: BTreeMap<String, String>,
}

impl FilterState {
    /// Create an empty filter state (matches everything).
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set the search term.
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    /// Builder: set a field filter.
    pub fn with_field(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Replace the search term. Returns `true` if the term changed.
    pub fn set_search(&mut self, term: impl Into<String>) -> bool {
        let term = term.into();
        if self.search_term == term {
            return false;
        }
        self.search_term = term;
        true
    }

    /// Select a value for a field filter. Returns `true` if the effective
    /// selection changed.
    pub fn set_field(&mut self, field: impl Into<String>, value: impl Into<String>) -> bool {
        let field = field.into();
        let value = value.into();
        let previous = self.fields.insert(field, value.clone()).unwrap_or_default();
        previous != value && (is_active_value(&previous) || is_active_value(&value))
    }

    /// Reset the search term and every field filter. Returns `true` if
    /// anything was constraining before the reset.
    pub fn clear(&mut self) -> bool {
        let was_active = self.is_active();
        self.search_term.clear();
        self.fields.clear();
        was_active
    }

    /// The lowercased search needle, or `None` when search is empty.
    pub fn needle(&self) -> Option<String> {
        if self.search_term.is_empty() {
            None
        } else {
            Some(self.search_term.to_lowercase())
        }
    }

    /// Iterate over the field filters that actually constrain.
    pub fn active_fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .filter(|(_, value)| is_active_value(value))
            .map(|(field, value)| (field.as_str(), value.as_str()))
    }

    /// Whether any part of the state constrains the collection.
    pub fn is_active(&self) -> bool {
        self.needle().is_some() || self.active_fields().next().is_some()
    }
}

/// Server-side list query passed to `ResourceApi::list`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListQuery {
    /// Equality filters; inactive entries are dropped when sent.
    pub filters: Vec<FieldFilter>,
}

impl ListQuery {
    /// Build a query from the active field filters of a filter state.
    pub fn from_filter_state(state: &FilterState) -> Self {
        Self {
            filters: state
                .active_fields()
                .map(|(field, value)| FieldFilter::eq(field, value))
                .collect(),
        }
    }

    /// Builder: add an equality filter.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push(FieldFilter::eq(field, value));
        self
    }

    /// Query-string pairs for the active filters.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        self.filters
            .iter()
            .filter(|f| f.is_active())
            .map(|f| (f.field.clone(), f.value.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinels_are_inactive() {
        let state = FilterState::new()
            .with_field("status", ALL)
            .with_field("class_name", "");
        assert!(!state.is_active());
        assert_eq!(state.active_fields().count(), 0);
    }

    #[test]
    fn test_empty_search_has_no_needle() {
        let state = FilterState::new().with_search("");
        assert_eq!(state.needle(), None);
        let state = FilterState::new().with_search("JoHn");
        assert_eq!(state.needle().as_deref(), Some("john"));
    }

    #[test]
    fn test_set_field_reports_change() {
        let mut state = FilterState::new();
        assert!(!state.set_field("status", ""));
        assert!(state.set_field("status", "active"));
        assert!(!state.set_field("status", "active"));
        assert!(state.set_field("status", ALL));
    }

    #[test]
    fn test_switching_between_sentinels_is_no_change() {
        let mut state = FilterState::new();
        assert!(!state.set_field("status", ""));
        assert!(!state.set_field("status", ALL));
        assert!(!state.set_field("status", ""));
        assert_eq!(state.fields.get("status").map(String::as_str), Some(""));
    }

    #[test]
    fn test_list_query_drops_inactive_filters() {
        let state = FilterState::new()
            .with_search("jo")
            .with_field("status", "active")
            .with_field("class_name", ALL);
        let query = ListQuery::from_filter_state(&state);
        assert_eq!(
            query.to_pairs(),
            vec![("status".to_string(), "active".to_string())]
        );
    }
}
