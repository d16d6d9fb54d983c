//! Table and JSON output formatting for CLI commands.

use serde::Serialize;
use serde_json::Value;
use tabled::builder::Builder;

use schoolhub_core::result::AppResult;
use schoolhub_core::traits::{Toast, ToastLevel};
use schoolhub_core::types::Page;

/// Output format selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// JSON output
    Json,
}

/// Print records in the selected format. Table columns follow the
/// record's serialized field order.
pub fn print_list<T: Serialize>(items: &[T], format: OutputFormat) -> AppResult<()> {
    match format {
        OutputFormat::Table => {
            if items.is_empty() {
                println!("No records found.");
            } else {
                println!("{}", render_table(items)?);
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(items)?),
    }
    Ok(())
}

/// Print one page of records followed by its position.
pub fn print_page<T: Serialize>(page: &Page<T>, format: OutputFormat) -> AppResult<()> {
    match format {
        OutputFormat::Table => {
            print_list(&page.items, format)?;
            if !page.is_empty() {
                println!(
                    "Showing {}-{} of {} (page {} of {})",
                    page.first_index(),
                    page.last_index(),
                    page.total_items,
                    page.page,
                    page.total_pages
                );
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(page)?),
    }
    Ok(())
}

/// Print a single record in the selected format
pub fn print_item<T: Serialize>(item: &T, format: OutputFormat) -> AppResult<()> {
    match format {
        OutputFormat::Table => {
            if let Value::Object(fields) = serde_json::to_value(item)? {
                for (key, value) in &fields {
                    print_kv(key, &cell(value));
                }
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(item)?),
    }
    Ok(())
}

/// Print queued toasts, errors to stderr.
pub fn print_toasts(toasts: impl IntoIterator<Item = Toast>) {
    for toast in toasts {
        match toast.level {
            ToastLevel::Success => print_success(&toast.message),
            ToastLevel::Info => println!("ℹ {}", toast.message),
            ToastLevel::Error => print_error(&toast.message),
        }
    }
}

/// Print a success message
pub fn print_success(msg: &str) {
    println!("✓ {}", msg);
}

/// Print a warning message
pub fn print_warning(msg: &str) {
    eprintln!("⚠ {}", msg);
}

/// Print an error message
pub fn print_error(msg: &str) {
    eprintln!("✗ {}", msg);
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:<24} {}", format!("{}:", key), value);
}

fn render_table<T: Serialize>(items: &[T]) -> AppResult<String> {
    let rows: Vec<Value> = items
        .iter()
        .map(serde_json::to_value)
        .collect::<Result<_, _>>()?;

    let headers: Vec<String> = match rows.first() {
        Some(Value::Object(fields)) => fields.keys().cloned().collect(),
        _ => vec!["value".to_string()],
    };

    let mut builder = Builder::default();
    builder.push_record(headers.iter().cloned());
    for row in &rows {
        let record: Vec<String> = match row {
            Value::Object(fields) => headers
                .iter()
                .map(|h| fields.get(h).map(cell).unwrap_or_default())
                .collect(),
            other => vec![cell(other)],
        };
        builder.push_record(record);
    }
    Ok(builder.build().to_string())
}

fn cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Row {
        id: &'static str,
        email: Option<&'static str>,
        copies: u32,
    }

    #[test]
    fn test_table_uses_field_order_and_blank_nulls() {
        let table = render_table(&[
            Row { id: "b1", email: None, copies: 3 },
            Row { id: "b2", email: Some("x@y.z"), copies: 0 },
        ])
        .unwrap();

        let header = table.lines().nth(1).unwrap();
        let id = header.find("id").unwrap();
        let email = header.find("email").unwrap();
        let copies = header.find("copies").unwrap();
        assert!(id < email && email < copies);
        assert!(table.contains("x@y.z"));
        assert!(!table.contains("null"));
    }

    #[test]
    fn test_cell_unquotes_strings() {
        assert_eq!(cell(&Value::String("active".into())), "active");
        assert_eq!(cell(&serde_json::json!(12.5)), "12.5");
    }
}
