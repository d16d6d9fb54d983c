//! Filter and page state for one list screen.

use std::collections::BTreeSet;
use std::marker::PhantomData;

use serde::Serialize;

use schoolhub_core::error::AppError;
use schoolhub_core::result::AppResult;
use schoolhub_core::traits::Listable;
use schoolhub_core::types::{ALL, FilterState, Page, PageState};

use super::transform::{filter, paginate};

/// The filtered collection and the visible page of it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedView<'a, R> {
    /// Every record matching the filter, in collection order.
    pub filtered: Vec<&'a R>,
    /// The visible slice of `filtered`.
    pub page: Page<&'a R>,
}

impl<R> DerivedView<'_, R> {
    /// Whether the filter left no records ("no records" empty state).
    pub fn is_empty(&self) -> bool {
        self.filtered.is_empty()
    }
}

/// A screen's search text, field filters, and page position.
///
/// The collection itself is owned by the caller and passed in on every
/// call, so the view model never holds stale data. Any change to the
/// filter sends the user back to page 1; page moves are clamped to the
/// pages the current filter produces.
#[derive(Debug, Clone)]
pub struct ListViewModel<R> {
    filter: FilterState,
    page: PageState,
    _record: PhantomData<fn() -> R>,
}

impl<R: Listable> ListViewModel<R> {
    /// Create a view model on page 1 with no filters.
    pub fn new(page_size: u64) -> Self {
        Self {
            filter: FilterState::new(),
            page: PageState::first(page_size),
            _record: PhantomData,
        }
    }

    /// Current filter state.
    pub fn filter_state(&self) -> &FilterState {
        &self.filter
    }

    /// Current page state.
    pub fn page_state(&self) -> PageState {
        self.page
    }

    /// Compute the derived view over `entities`.
    pub fn view<'a>(&self, entities: &'a [R]) -> DerivedView<'a, R> {
        let filtered = filter(entities, &self.filter);
        let page = paginate(&filtered, self.page);
        DerivedView { filtered, page }
    }

    /// Update the search term. Returns `true` if it changed.
    pub fn set_search(&mut self, term: impl Into<String>) -> bool {
        let changed = self.filter.set_search(term);
        if changed {
            self.reset_page();
        }
        changed
    }

    /// Select a value for one of the record's filter fields.
    ///
    /// Returns `true` if the selection changed. Unknown fields are
    /// rejected since they would silently hide every record.
    pub fn set_filter(&mut self, field: &str, value: impl Into<String>) -> AppResult<bool> {
        if !R::FILTER_FIELDS.iter().any(|known| *known == field) {
            return Err(AppError::validation(format!(
                "Unknown filter '{field}'. Expected one of: {}",
                R::FILTER_FIELDS.join(", ")
            )));
        }
        let changed = self.filter.set_field(field, value);
        if changed {
            self.reset_page();
        }
        Ok(changed)
    }

    /// Drop the search term and every field filter.
    pub fn clear_filters(&mut self) {
        self.filter.clear();
        self.reset_page();
    }

    /// Go back to page 1.
    pub fn reset_page(&mut self) {
        self.page.page = 1;
    }

    /// Move to `page`, clamped to the pages of the current filter.
    /// Returns the page actually selected.
    pub fn go_to_page(&mut self, page: u64, entities: &[R]) -> u64 {
        let total = filter(entities, &self.filter).len() as u64;
        self.page = PageState::new(page, self.page.page_size).clamped(total);
        self.page.page
    }

    /// Advance one page unless already on the last.
    pub fn next_page(&mut self, entities: &[R]) -> u64 {
        self.go_to_page(self.page.page.saturating_add(1), entities)
    }

    /// Go back one page unless already on the first.
    pub fn previous_page(&mut self, entities: &[R]) -> u64 {
        self.go_to_page(self.page.page.saturating_sub(1), entities)
    }

    /// Re-clamp the page after the collection was replaced.
    pub fn clamp_to(&mut self, entities: &[R]) {
        self.go_to_page(self.page.page, entities);
    }

    /// Dropdown options for a filter field: [`ALL`] followed by the
    /// distinct values present in the collection, sorted.
    pub fn filter_options(&self, field: &str, entities: &[R]) -> Vec<String> {
        let values: BTreeSet<String> = entities
            .iter()
            .filter_map(|e| e.field_value(field).map(|v| v.into_owned()))
            .filter(|v| !v.is_empty())
            .collect();
        std::iter::once(ALL.to_string()).chain(values).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list::fixtures::{Person, numbered};

    #[test]
    fn test_filter_change_resets_page() {
        let people = numbered(30);
        let mut model = ListViewModel::<Person>::new(10);
        assert_eq!(model.go_to_page(3, &people), 3);

        assert!(model.set_search("Person 1"));
        assert_eq!(model.page_state().page, 1);

        model.go_to_page(2, &people);
        assert!(model.set_filter("status", "active").unwrap());
        assert_eq!(model.page_state().page, 1);
    }

    #[test]
    fn test_unchanged_filter_keeps_page() {
        let people = numbered(30);
        let mut model = ListViewModel::<Person>::new(10);
        model.set_search("Person");
        model.go_to_page(2, &people);
        assert!(!model.set_search("Person"));
        assert_eq!(model.page_state().page, 2);
    }

    #[test]
    fn test_sentinel_reselection_keeps_page() {
        let people = numbered(30);
        let mut model = ListViewModel::<Person>::new(10);
        assert!(!model.set_filter("status", "").unwrap());
        model.go_to_page(3, &people);
        assert!(!model.set_filter("status", "all").unwrap());
        assert_eq!(model.page_state().page, 3);
    }

    #[test]
    fn test_unknown_filter_field_rejected() {
        let mut model = ListViewModel::<Person>::new(10);
        let err = model.set_filter("colour", "red").unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_navigation_stops_at_boundaries() {
        let people = numbered(25);
        let mut model = ListViewModel::<Person>::new(10);
        assert_eq!(model.previous_page(&people), 1);
        assert_eq!(model.next_page(&people), 2);
        assert_eq!(model.next_page(&people), 3);
        assert_eq!(model.next_page(&people), 3);
        let view = model.view(&people);
        assert!(!view.page.has_next);
        assert!(view.page.has_previous);
    }

    #[test]
    fn test_clamp_after_collection_shrinks() {
        let mut people = numbered(25);
        let mut model = ListViewModel::<Person>::new(10);
        model.go_to_page(3, &people);
        people.truncate(8);
        model.clamp_to(&people);
        assert_eq!(model.page_state().page, 1);
    }

    #[test]
    fn test_scenario_search_jo() {
        let people = vec![
            Person::new(1, "John Doe", "active"),
            Person::new(2, "Jane Roe", "inactive"),
        ];
        let mut model = ListViewModel::<Person>::new(10);
        model.set_search("jo");
        let view = model.view(&people);
        assert_eq!(view.page.items, vec![&people[0]]);
        assert_eq!(view.page.total_items, 1);
    }

    #[test]
    fn test_empty_view_is_distinct_state() {
        let people = numbered(5);
        let mut model = ListViewModel::<Person>::new(10);
        model.set_search("nobody");
        let view = model.view(&people);
        assert!(view.is_empty());
        assert_eq!(view.page.total_pages, 1);
    }

    #[test]
    fn test_filter_options() {
        let people = vec![
            Person::new(1, "A", "inactive"),
            Person::new(2, "B", "active"),
            Person::new(3, "C", "active"),
        ];
        let model = ListViewModel::<Person>::new(10);
        assert_eq!(
            model.filter_options("status", &people),
            vec!["all", "active", "inactive"]
        );
    }
}
