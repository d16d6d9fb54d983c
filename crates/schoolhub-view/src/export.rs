//! CSV and JSON downloads of a list.
//!
//! Exports are a convenience for the user, not a storage format: columns
//! follow the record's serde field order and nothing is versioned.

use serde::Serialize;

use schoolhub_core::error::AppError;
use schoolhub_core::result::AppResult;

/// Render records as CSV with a header row. No records yields an empty
/// string.
pub fn to_csv<'a, T, I>(records: I) -> AppResult<String>
where
    T: Serialize + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut writer = csv::Writer::from_writer(Vec::new());
    for record in records {
        writer.serialize(record)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| AppError::internal(format!("Failed to flush CSV export: {e}")))?;
    String::from_utf8(bytes)
        .map_err(|e| AppError::internal(format!("CSV export is not UTF-8: {e}")))
}

/// Render records as a pretty-printed JSON array.
pub fn to_json<'a, T, I>(records: I) -> AppResult<String>
where
    T: Serialize + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let records: Vec<&T> = records.into_iter().collect();
    Ok(serde_json::to_string_pretty(&records)?)
}

/// Suggested download file name, e.g. `students-2024-03-01.csv`.
pub fn file_name(resource: &str, date: &str, extension: &str) -> String {
    format!("{resource}-{date}.{extension}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use schoolhub_entity::{Student, StudentStatus};

    fn students() -> Vec<Student> {
        vec![
            Student {
                id: "s1".to_string(),
                admission_no: "A-1".to_string(),
                name: "John Doe".to_string(),
                class_name: "10".to_string(),
                ..Default::default()
            },
            Student {
                id: "s2".to_string(),
                admission_no: "A-2".to_string(),
                name: "Jane, Roe".to_string(),
                class_name: "9".to_string(),
                status: StudentStatus::Inactive,
                ..Default::default()
            },
        ]
    }

    #[test]
    fn test_csv_has_header_and_quotes() {
        let rows = students();
        let csv = to_csv(&rows).expect("csv");
        let mut lines = csv.lines();
        assert_eq!(
            lines.next().unwrap(),
            "id,admission_no,name,email,class_name,section,guardian_phone,status,admission_date"
        );
        assert_eq!(lines.next().unwrap(), "s1,A-1,John Doe,,10,,,active,");
        assert_eq!(lines.next().unwrap(), "s2,A-2,\"Jane, Roe\",,9,,,inactive,");
    }

    #[test]
    fn test_csv_of_nothing_is_empty() {
        let rows: Vec<Student> = Vec::new();
        assert_eq!(to_csv(&rows).unwrap(), "");
    }

    #[test]
    fn test_json_is_array() {
        let rows = students();
        let json = to_json(rows.iter().filter(|s| s.status == StudentStatus::Inactive)).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), 1);
        assert_eq!(parsed[0]["name"], "Jane, Roe");
    }

    #[test]
    fn test_file_name() {
        assert_eq!(file_name("students", "2024-03-01", "csv"), "students-2024-03-01.csv");
    }
}
