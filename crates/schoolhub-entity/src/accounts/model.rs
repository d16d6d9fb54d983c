//! Transaction entity model.

use std::borrow::Cow;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use schoolhub_core::AppResult;
use schoolhub_core::form::{Form, FormValues};
use schoolhub_core::traits::{Listable, Resource};

use super::kind::{TransactionKind, TransactionStatus};

/// A ledger entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Transaction {
    /// Unique identifier.
    pub id: String,
    /// Receipt or voucher number.
    pub reference: String,
    /// What the money was for.
    pub description: String,
    /// Income or expense.
    pub kind: TransactionKind,
    /// Ledger category, e.g. `"tuition"`, `"utilities"`.
    pub category: String,
    /// Amount, always positive; the direction comes from `kind`.
    pub amount: f64,
    /// Booking date.
    pub date: Option<NaiveDate>,
    /// Settlement state.
    pub status: TransactionStatus,
}

impl Transaction {
    /// Amount with the sign of its direction.
    pub fn signed_amount(&self) -> f64 {
        match self.kind {
            TransactionKind::Income => self.amount,
            TransactionKind::Expense => -self.amount,
        }
    }
}

impl Listable for Transaction {
    const SEARCH_FIELDS: &'static [&'static str] = &["description", "reference"];
    const FILTER_FIELDS: &'static [&'static str] = &["status", "kind", "category"];

    fn id(&self) -> &str {
        &self.id
    }

    fn field_value(&self, field: &str) -> Option<Cow<'_, str>> {
        match field {
            "id" => Some(Cow::Borrowed(&self.id)),
            "reference" => Some(Cow::Borrowed(&self.reference)),
            "description" => Some(Cow::Borrowed(&self.description)),
            "kind" => Some(Cow::Borrowed(self.kind.as_str())),
            "category" => Some(Cow::Borrowed(&self.category)),
            "amount" => Some(Cow::Owned(format!("{:.2}", self.amount))),
            "date" => self.date.map(|d| Cow::Owned(d.to_string())),
            "status" => Some(Cow::Borrowed(self.status.as_str())),
            _ => None,
        }
    }
}

/// Data submitted by the add/edit transaction dialog.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateTransaction {
    /// Receipt or voucher number.
    #[validate(length(min = 1, max = 40, message = "must be 1-40 characters"))]
    pub reference: String,
    /// Description.
    #[validate(length(min = 1, max = 200, message = "must be 1-200 characters"))]
    pub description: String,
    /// Income or expense.
    pub kind: TransactionKind,
    /// Ledger category.
    #[validate(length(min = 1, message = "is required"))]
    pub category: String,
    /// Amount.
    #[validate(range(exclusive_min = 0.0, message = "must be greater than zero"))]
    pub amount: f64,
    /// Booking date (`YYYY-MM-DD`).
    pub date: NaiveDate,
    /// Settlement state.
    pub status: TransactionStatus,
}

impl Form for CreateTransaction {
    const FIELDS: &'static [&'static str] = &[
        "reference",
        "description",
        "kind",
        "category",
        "amount",
        "date",
        "status",
    ];

    fn defaults() -> FormValues {
        FormValues::new()
            .with("kind", TransactionKind::Income.as_str())
            .with("date", chrono::Local::now().date_naive().to_string())
            .with("status", TransactionStatus::Completed.as_str())
    }

    fn parse(values: &FormValues) -> AppResult<Self> {
        Ok(Self {
            reference: values.require("reference")?,
            description: values.require("description")?,
            kind: values.parse("kind")?,
            category: values.require("category")?,
            amount: values.decimal("amount")?,
            date: values.parse("date")?,
            status: values.parse("status")?,
        })
    }
}

/// Ledger totals over completed transactions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountStats {
    /// Completed income.
    pub total_income: f64,
    /// Completed expenses.
    pub total_expense: f64,
    /// Income minus expenses.
    pub balance: f64,
    /// Transactions awaiting settlement.
    pub pending: u64,
}

impl Resource for Transaction {
    type Draft = CreateTransaction;
    type Stats = AccountStats;

    const RESOURCE: &'static str = "transactions";
    const LABEL: &'static str = "transaction";
    const PAGE_SIZE: u64 = 15;

    fn from_draft(id: String, draft: &CreateTransaction) -> Self {
        Self {
            id,
            reference: draft.reference.clone(),
            description: draft.description.clone(),
            kind: draft.kind,
            category: draft.category.clone(),
            amount: draft.amount,
            date: Some(draft.date),
            status: draft.status,
        }
    }

    fn to_form(&self) -> FormValues {
        FormValues::new()
            .with("reference", self.reference.as_str())
            .with("description", self.description.as_str())
            .with("kind", self.kind.as_str())
            .with("category", self.category.as_str())
            .with("amount", self.amount.to_string())
            .with("date", self.date.map(|d| d.to_string()).unwrap_or_default())
            .with("status", self.status.as_str())
    }

    fn summarize(items: &[Self]) -> AccountStats {
        let completed = || {
            items
                .iter()
                .filter(|t| t.status == TransactionStatus::Completed)
        };
        let total_income: f64 = completed()
            .filter(|t| t.kind == TransactionKind::Income)
            .map(|t| t.amount)
            .sum();
        let total_expense: f64 = completed()
            .filter(|t| t.kind == TransactionKind::Expense)
            .map(|t| t.amount)
            .sum();
        AccountStats {
            total_income,
            total_expense,
            balance: completed().map(Transaction::signed_amount).sum(),
            pending: items
                .iter()
                .filter(|t| t.status == TransactionStatus::Pending)
                .count() as u64,
        }
    }
}
