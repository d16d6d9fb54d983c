//! Decoding of collection payloads that may contain unloaded rows.

use tracing::debug;

use schoolhub_core::traits::Resource;

/// Drop `null` rows from a decoded collection, keeping order.
pub(crate) fn present_rows<R: Resource>(rows: Vec<Option<R>>) -> Vec<R> {
    let total = rows.len();
    let present: Vec<R> = rows.into_iter().flatten().collect();
    if present.len() < total {
        debug!(
            resource = R::RESOURCE,
            skipped = total - present.len(),
            "Skipped unloaded rows"
        );
    }
    present
}

#[cfg(test)]
mod tests {
    use super::*;
    use schoolhub_entity::Student;

    #[test]
    fn test_null_rows_are_dropped() {
        let rows: Vec<Option<Student>> = serde_json::from_str(
            r#"[null, {"id": "s1", "name": "John Doe", "status": "active"}, null]"#,
        )
        .unwrap();
        let students = present_rows(rows);
        assert_eq!(students.len(), 1);
        assert_eq!(students[0].name, "John Doe");
    }

    #[test]
    fn test_all_null_is_empty() {
        let rows: Vec<Option<Student>> = serde_json::from_str("[null, null]").unwrap();
        assert!(present_rows(rows).is_empty());
    }
}
