//! Inventory item entity model.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use validator::Validate;

use schoolhub_core::AppResult;
use schoolhub_core::form::{Form, FormValues};
use schoolhub_core::traits::{Listable, Resource};

use super::status::StockStatus;

/// A stocked item (stationery, lab equipment, furniture).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InventoryItem {
    /// Unique identifier.
    pub id: String,
    /// Stock keeping unit.
    pub sku: String,
    /// Item name.
    pub name: String,
    /// Category, e.g. `"lab"`.
    pub category: String,
    /// Units on hand.
    pub quantity: u32,
    /// Cost per unit.
    pub unit_price: f64,
    /// Quantity at which the item is flagged for reorder.
    pub reorder_level: u32,
    /// Stock level.
    pub status: StockStatus,
}

impl InventoryItem {
    /// Value of the units on hand.
    pub fn stock_value(&self) -> f64 {
        f64::from(self.quantity) * self.unit_price
    }
}

impl Listable for InventoryItem {
    const SEARCH_FIELDS: &'static [&'static str] = &["name", "sku"];
    const FILTER_FIELDS: &'static [&'static str] = &["status", "category"];

    fn id(&self) -> &str {
        &self.id
    }

    fn field_value(&self, field: &str) -> Option<Cow<'_, str>> {
        match field {
            "id" => Some(Cow::Borrowed(&self.id)),
            "sku" => Some(Cow::Borrowed(&self.sku)),
            "name" => Some(Cow::Borrowed(&self.name)),
            "category" => Some(Cow::Borrowed(&self.category)),
            "quantity" => Some(Cow::Owned(self.quantity.to_string())),
            "unit_price" => Some(Cow::Owned(format!("{:.2}", self.unit_price))),
            "reorder_level" => Some(Cow::Owned(self.reorder_level.to_string())),
            "status" => Some(Cow::Borrowed(self.status.as_str())),
            _ => None,
        }
    }
}

/// Data submitted by the add/edit item dialog.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateItem {
    /// Stock keeping unit.
    #[validate(length(min = 1, max = 32, message = "must be 1-32 characters"))]
    pub sku: String,
    /// Item name.
    #[validate(length(min = 1, max = 120, message = "must be 1-120 characters"))]
    pub name: String,
    /// Category.
    #[validate(length(min = 1, message = "is required"))]
    pub category: String,
    /// Units on hand.
    pub quantity: u32,
    /// Cost per unit.
    #[validate(range(min = 0.0, message = "must not be negative"))]
    pub unit_price: f64,
    /// Reorder threshold.
    pub reorder_level: u32,
}

impl Form for CreateItem {
    const FIELDS: &'static [&'static str] = &[
        "sku",
        "name",
        "category",
        "quantity",
        "unit_price",
        "reorder_level",
    ];

    fn defaults() -> FormValues {
        FormValues::new()
            .with("quantity", "0")
            .with("reorder_level", "5")
    }

    fn parse(values: &FormValues) -> AppResult<Self> {
        Ok(Self {
            sku: values.require("sku")?,
            name: values.require("name")?,
            category: values.require("category")?,
            quantity: values.parse("quantity")?,
            unit_price: values.decimal("unit_price")?,
            reorder_level: values.parse("reorder_level")?,
        })
    }
}

/// Stock totals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InventoryStats {
    /// Distinct items.
    pub total_items: u64,
    /// Value of all stock on hand.
    pub total_value: f64,
    /// Items at or below their reorder level.
    pub low_stock: u64,
    /// Items with nothing left.
    pub out_of_stock: u64,
}

impl Resource for InventoryItem {
    type Draft = CreateItem;
    type Stats = InventoryStats;

    const RESOURCE: &'static str = "inventory";
    const LABEL: &'static str = "item";
    const PAGE_SIZE: u64 = 10;

    fn from_draft(id: String, draft: &CreateItem) -> Self {
        Self {
            id,
            sku: draft.sku.clone(),
            name: draft.name.clone(),
            category: draft.category.clone(),
            quantity: draft.quantity,
            unit_price: draft.unit_price,
            reorder_level: draft.reorder_level,
            status: StockStatus::classify(draft.quantity, draft.reorder_level),
        }
    }

    fn to_form(&self) -> FormValues {
        FormValues::new()
            .with("sku", self.sku.as_str())
            .with("name", self.name.as_str())
            .with("category", self.category.as_str())
            .with("quantity", self.quantity.to_string())
            .with("unit_price", self.unit_price.to_string())
            .with("reorder_level", self.reorder_level.to_string())
    }

    fn summarize(items: &[Self]) -> InventoryStats {
        InventoryStats {
            total_items: items.len() as u64,
            total_value: items.iter().map(InventoryItem::stock_value).sum(),
            low_stock: items
                .iter()
                .filter(|i| i.status == StockStatus::LowStock)
                .count() as u64,
            out_of_stock: items
                .iter()
                .filter(|i| i.status == StockStatus::OutOfStock)
                .count() as u64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_status_is_derived() {
        let values = FormValues::new()
            .with("sku", "LAB-001")
            .with("name", "Beaker 250ml")
            .with("category", "lab")
            .with("quantity", "3")
            .with("unit_price", "4.25")
            .with("reorder_level", "5");
        let draft = CreateItem::from_values(&values).expect("valid");
        let item = InventoryItem::from_draft("i1".to_string(), &draft);
        assert_eq!(item.status, StockStatus::LowStock);
        assert_eq!(item.stock_value(), 12.75);
    }

    #[test]
    fn test_non_numeric_quantity_rejected() {
        let values = FormValues::new()
            .with("sku", "LAB-001")
            .with("name", "Beaker")
            .with("category", "lab")
            .with("quantity", "a few")
            .with("unit_price", "4.25")
            .with("reorder_level", "5");
        assert!(CreateItem::from_values(&values).unwrap_err().is_validation());
    }
}
