//! The pure filter and paginate functions behind every list screen.
//!
//! Both functions are deterministic and never mutate their input; the
//! collection they read stays the single source of truth.

use schoolhub_core::traits::Listable;
use schoolhub_core::types::{FilterState, Page, PageState};

/// Retain the records matching `state`, keeping input order.
///
/// A record is kept when at least one of its search fields contains the
/// search term (case-insensitive; an empty term matches everything) and
/// every active field filter equals the record's field exactly.
pub fn filter<'a, R: Listable>(entities: &'a [R], state: &FilterState) -> Vec<&'a R> {
    filter_partial(entities.iter().map(Some), state)
}

/// [`filter`] over a collection that may still contain unloaded slots.
///
/// `None` entries never match and never cause an error.
pub fn filter_partial<'a, R, I>(entities: I, state: &FilterState) -> Vec<&'a R>
where
    R: Listable + 'a,
    I: IntoIterator<Item = Option<&'a R>>,
{
    let needle = state.needle();
    let constraints: Vec<(&str, &str)> = state.active_fields().collect();

    entities
        .into_iter()
        .flatten()
        .filter(|entity| {
            needle
                .as_deref()
                .is_none_or(|needle| entity.matches_search(needle))
                && constraints
                    .iter()
                    .all(|(field, value)| entity.matches_field(field, value))
        })
        .collect()
}

/// Slice one page out of a filtered collection.
///
/// The requested page is clamped into `[1, total_pages]`; an empty
/// collection yields page 1 of 1 with no items.
pub fn paginate<T: Clone>(filtered: &[T], state: PageState) -> Page<T> {
    let total = filtered.len() as u64;
    let state = state.clamped(total);
    let start = usize::try_from(state.offset())
        .unwrap_or(usize::MAX)
        .min(filtered.len());
    let end = start
        .saturating_add(state.page_size as usize)
        .min(filtered.len());
    Page::new(filtered[start..end].to_vec(), state, total)
}
