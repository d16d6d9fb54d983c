//! Field access for records shown in list screens.

use std::borrow::Cow;

/// A record that can be searched and filtered by field name.
///
/// Each module declares which fields free-text search looks at and which
/// fields its dropdown filters constrain; the list view model only ever
/// reads records through [`Listable::field_value`].
pub trait Listable {
    /// Fields searched case-insensitively by the search box.
    const SEARCH_FIELDS: &'static [&'static str];

    /// Fields offered as discrete filters (status first by convention).
    const FILTER_FIELDS: &'static [&'static str];

    /// Unique record identifier.
    fn id(&self) -> &str;

    /// Display text of a field, or `None` when the field is unknown or
    /// not loaded.
    fn field_value(&self, field: &str) -> Option<Cow<'_, str>>;

    /// Whether any searchable field contains `needle`.
    ///
    /// `needle` must already be lowercase.
    fn matches_search(&self, needle: &str) -> bool {
        Self::SEARCH_FIELDS.iter().any(|field| {
            self.field_value(field)
                .is_some_and(|value| value.to_lowercase().contains(needle))
        })
    }

    /// Whether `field` equals `value` exactly.
    fn matches_field(&self, field: &str, value: &str) -> bool {
        self.field_value(field).is_some_and(|v| v == value)
    }
}
