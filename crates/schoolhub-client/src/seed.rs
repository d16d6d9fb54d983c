//! Seed data for the offline console.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use schoolhub_core::error::{AppError, ErrorKind};
use schoolhub_core::result::AppResult;
use schoolhub_core::traits::Resource;

use crate::memory::MemoryApi;
use crate::rows::present_rows;

/// Records keyed by resource name, e.g. `{"students": [...], "books": [...]}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct SeedData(BTreeMap<String, serde_json::Value>);

impl SeedData {
    /// Read and parse a seed file.
    pub async fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let text = tokio::fs::read_to_string(path).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Io,
                format!("Failed to read seed file {}: {e}", path.display()),
                e,
            )
        })?;
        let seed = Self::from_json(&text)?;
        info!(path = %path.display(), resources = seed.0.len(), "Loaded seed data");
        Ok(seed)
    }

    /// Parse seed data from a JSON string.
    pub fn from_json(text: &str) -> AppResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Records for one resource; a missing key yields none and `null`
    /// rows are skipped.
    pub fn records<R: Resource>(&self) -> AppResult<Vec<R>> {
        let Some(value) = self.0.get(R::RESOURCE) else {
            return Ok(Vec::new());
        };
        let rows: Vec<Option<R>> = serde_json::from_value(value.clone()).map_err(|e| {
            AppError::validation(format!("Seed data for '{}' is invalid: {e}", R::RESOURCE))
        })?;
        Ok(present_rows(rows))
    }

    /// An in-memory API pre-populated with this resource's records.
    pub fn api<R: Resource>(&self) -> AppResult<MemoryApi<R>> {
        Ok(MemoryApi::with_records(self.records()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schoolhub_core::traits::ResourceApi;
    use schoolhub_entity::{Book, Student, StudentStatus};

    const SEED: &str = r#"{
        "students": [
            {"id": "s1", "name": "John Doe", "status": "active"},
            {"id": "s2", "name": "Jane Roe", "status": "inactive", "email": null}
        ]
    }"#;

    #[test]
    fn test_partial_records_deserialize() {
        let seed = SeedData::from_json(SEED).unwrap();
        let students: Vec<Student> = seed.records().unwrap();
        assert_eq!(students.len(), 2);
        assert_eq!(students[1].status, StudentStatus::Inactive);
        assert_eq!(students[0].class_name, "");
    }

    #[test]
    fn test_null_rows_are_skipped() {
        let seed = SeedData::from_json(
            r#"{"students": [null, {"id": "s1", "name": "John Doe", "status": "active"}]}"#,
        )
        .unwrap();
        let students: Vec<Student> = seed.records().unwrap();
        assert_eq!(students.len(), 1);
        assert_eq!(students[0].id, "s1");
    }

    #[test]
    fn test_missing_resource_is_empty() {
        let seed = SeedData::from_json(SEED).unwrap();
        assert!(seed.records::<Book>().unwrap().is_empty());
    }

    #[test]
    fn test_wrong_shape_is_rejected() {
        let seed = SeedData::from_json(r#"{"students": {"id": "s1"}}"#).unwrap();
        assert!(seed.records::<Student>().unwrap_err().is_validation());
    }

    #[tokio::test]
    async fn test_api_serves_seeded_records() {
        let seed = SeedData::from_json(SEED).unwrap();
        let api = seed.api::<Student>().unwrap();
        assert_eq!(api.list(None).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_load_missing_file_is_io_error() {
        let err = SeedData::load("/definitely/not/here.json").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Io);
    }
}
