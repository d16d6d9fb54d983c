//! Client-side list filtering and pagination.

pub mod model;
pub mod transform;

pub use model::{DerivedView, ListViewModel};
pub use transform::{filter, filter_partial, paginate};

#[cfg(test)]
pub(crate) mod fixtures {
    use std::borrow::Cow;

    use schoolhub_core::traits::Listable;

    /// Minimal record for exercising the transform without a real module.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Person {
        pub id: String,
        pub name: String,
        pub email: Option<String>,
        pub status: String,
    }

    impl Person {
        pub fn new(id: usize, name: &str, status: &str) -> Self {
            Self {
                id: format!("p{id}"),
                name: name.to_string(),
                email: None,
                status: status.to_string(),
            }
        }
    }

    impl Listable for Person {
        const SEARCH_FIELDS: &'static [&'static str] = &["name", "email"];
        const FILTER_FIELDS: &'static [&'static str] = &["status"];

        fn id(&self) -> &str {
            &self.id
        }

        fn field_value(&self, field: &str) -> Option<Cow<'_, str>> {
            match field {
                "name" => Some(Cow::Borrowed(&self.name)),
                "email" => self.email.as_deref().map(Cow::Borrowed),
                "status" => Some(Cow::Borrowed(&self.status)),
                _ => None,
            }
        }
    }

    pub fn numbered(n: usize) -> Vec<Person> {
        (0..n).map(|i| Person::new(i, &format!("Person {i}"), "active")).collect()
    }
}
