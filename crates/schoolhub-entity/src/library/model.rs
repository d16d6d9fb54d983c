//! Book entity model and lending requests.

use std::borrow::Cow;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use schoolhub_core::AppResult;
use schoolhub_core::form::{Form, FormValues};
use schoolhub_core::traits::{Listable, Resource};

use super::status::BookStatus;

/// A catalogue entry with its copy counts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Book {
    /// Unique identifier.
    pub id: String,
    /// ISBN.
    pub isbn: String,
    /// Title.
    pub title: String,
    /// Author(s).
    pub author: String,
    /// Shelf category, e.g. `"fiction"`.
    pub category: String,
    /// Copies owned.
    pub total_copies: u32,
    /// Copies on the shelf.
    pub available_copies: u32,
    /// Availability.
    pub status: BookStatus,
}

impl Listable for Book {
    const SEARCH_FIELDS: &'static [&'static str] = &["title", "author", "isbn"];
    const FILTER_FIELDS: &'static [&'static str] = &["status", "category"];

    fn id(&self) -> &str {
        &self.id
    }

    fn field_value(&self, field: &str) -> Option<Cow<'_, str>> {
        match field {
            "id" => Some(Cow::Borrowed(&self.id)),
            "isbn" => Some(Cow::Borrowed(&self.isbn)),
            "title" => Some(Cow::Borrowed(&self.title)),
            "author" => Some(Cow::Borrowed(&self.author)),
            "category" => Some(Cow::Borrowed(&self.category)),
            "total_copies" => Some(Cow::Owned(self.total_copies.to_string())),
            "available_copies" => Some(Cow::Owned(self.available_copies.to_string())),
            "status" => Some(Cow::Borrowed(self.status.as_str())),
            _ => None,
        }
    }
}

/// Data submitted by the add/edit book dialog.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateBook {
    /// ISBN.
    #[validate(length(min = 10, max = 17, message = "must be 10-17 characters"))]
    pub isbn: String,
    /// Title.
    #[validate(length(min = 1, max = 200, message = "must be 1-200 characters"))]
    pub title: String,
    /// Author(s).
    #[validate(length(min = 1, max = 200, message = "must be 1-200 characters"))]
    pub author: String,
    /// Shelf category.
    #[validate(length(min = 1, message = "is required"))]
    pub category: String,
    /// Copies owned.
    #[validate(range(min = 1, max = 10_000, message = "must be between 1 and 10000"))]
    pub total_copies: u32,
}

impl Form for CreateBook {
    const FIELDS: &'static [&'static str] = &["isbn", "title", "author", "category", "total_copies"];

    fn defaults() -> FormValues {
        FormValues::new().with("total_copies", "1")
    }

    fn parse(values: &FormValues) -> AppResult<Self> {
        Ok(Self {
            isbn: values.require("isbn")?,
            title: values.require("title")?,
            author: values.require("author")?,
            category: values.require("category")?,
            total_copies: values.parse("total_copies")?,
        })
    }
}

/// Lend one copy of a book to a student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueBook {
    /// Book identifier.
    pub book_id: String,
    /// Borrowing student.
    pub student_id: String,
    /// Return due date.
    pub due_date: NaiveDate,
}

/// Return a lent copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnBook {
    /// Book identifier.
    pub book_id: String,
    /// Returning student.
    pub student_id: String,
}

/// Catalogue totals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryStats {
    /// Catalogue entries.
    pub total_books: u64,
    /// Copies owned across all entries.
    pub total_copies: u64,
    /// Copies on the shelf.
    pub available_copies: u64,
    /// Copies out on loan.
    pub issued_copies: u64,
}

impl Resource for Book {
    type Draft = CreateBook;
    type Stats = LibraryStats;

    const RESOURCE: &'static str = "books";
    const LABEL: &'static str = "book";
    const PAGE_SIZE: u64 = 10;

    fn from_draft(id: String, draft: &CreateBook) -> Self {
        Self {
            id,
            isbn: draft.isbn.clone(),
            title: draft.title.clone(),
            author: draft.author.clone(),
            category: draft.category.clone(),
            total_copies: draft.total_copies,
            available_copies: draft.total_copies,
            status: BookStatus::from_availability(draft.total_copies),
        }
    }

    fn apply_draft(&mut self, draft: &CreateBook) {
        let issued = self.total_copies.saturating_sub(self.available_copies);
        self.isbn = draft.isbn.clone();
        self.title = draft.title.clone();
        self.author = draft.author.clone();
        self.category = draft.category.clone();
        self.total_copies = draft.total_copies;
        self.available_copies = draft.total_copies.saturating_sub(issued);
        self.status = BookStatus::from_availability(self.available_copies);
    }

    fn to_form(&self) -> FormValues {
        FormValues::new()
            .with("isbn", self.isbn.as_str())
            .with("title", self.title.as_str())
            .with("author", self.author.as_str())
            .with("category", self.category.as_str())
            .with("total_copies", self.total_copies.to_string())
    }

    fn summarize(items: &[Self]) -> LibraryStats {
        let total_copies: u64 = items.iter().map(|b| u64::from(b.total_copies)).sum();
        let available_copies: u64 = items.iter().map(|b| u64::from(b.available_copies)).sum();
        LibraryStats {
            total_books: items.len() as u64,
            total_copies,
            available_copies,
            issued_copies: total_copies.saturating_sub(available_copies),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copies_must_be_numeric() {
        let values = FormValues::new()
            .with("isbn", "9780141439518")
            .with("title", "Pride and Prejudice")
            .with("author", "Jane Austen")
            .with("category", "fiction")
            .with("total_copies", "three");
        assert!(CreateBook::from_values(&values).unwrap_err().is_validation());
    }

    #[test]
    fn test_zero_copies_rejected_by_range() {
        let values = FormValues::new()
            .with("isbn", "9780141439518")
            .with("title", "Pride and Prejudice")
            .with("author", "Jane Austen")
            .with("category", "fiction")
            .with("total_copies", "0");
        let err = CreateBook::from_values(&values).unwrap_err();
        assert!(err.message.contains("total_copies"));
    }

    #[test]
    fn test_edit_keeps_copies_on_loan() {
        let mut book = Book {
            id: "b1".to_string(),
            title: "Emma".to_string(),
            total_copies: 3,
            available_copies: 1,
            ..Default::default()
        };
        let draft = CreateBook {
            isbn: "9780141439587".to_string(),
            title: "Emma (Penguin Classics)".to_string(),
            author: "Jane Austen".to_string(),
            category: "fiction".to_string(),
            total_copies: 4,
        };
        book.apply_draft(&draft);
        assert_eq!(book.id, "b1");
        assert_eq!(book.title, "Emma (Penguin Classics)");
        assert_eq!(book.available_copies, 2);
        assert_eq!(book.status, BookStatus::Available);

        let shrunk = CreateBook {
            total_copies: 1,
            ..draft
        };
        book.apply_draft(&shrunk);
        assert_eq!(book.available_copies, 0);
        assert_eq!(book.status, BookStatus::Issued);
    }

    #[test]
    fn test_summarize_issued_copies() {
        let book = Book {
            total_copies: 5,
            available_copies: 2,
            ..Default::default()
        };
        let stats = Book::summarize(&[book]);
        assert_eq!(stats.issued_copies, 3);
    }
}
