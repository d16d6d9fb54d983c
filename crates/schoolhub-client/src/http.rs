//! REST client for the school-administration API.
//!
//! Every resource lives under `{base_url}/{resource}`:
//!
//! | Operation | Request |
//! |---|---|
//! | list | `GET /{resource}?field=value` |
//! | stats | `GET /{resource}/stats` |
//! | create | `POST /{resource}` |
//! | update | `PUT /{resource}/{id}` |
//! | delete | `DELETE /{resource}/{id}` |

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use schoolhub_core::config::ApiConfig;
use schoolhub_core::error::{AppError, ErrorKind};
use schoolhub_core::result::AppResult;
use schoolhub_core::traits::{Resource, ResourceApi};
use schoolhub_core::types::ListQuery;
use schoolhub_entity::attendance::{AttendanceRecord, BulkAttendance};
use schoolhub_entity::library::{Book, IssueBook, ReturnBook};

use crate::rows::present_rows;

/// HTTP implementation of [`ResourceApi`] for every resource type.
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpApi {
    /// Build a client from configuration.
    pub fn new(config: &ApiConfig) -> AppResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(token) = config.token.as_deref().filter(|t| !t.is_empty()) {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|e| AppError::configuration(format!("Invalid API token: {e}")))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Configuration,
                    format!("Failed to create HTTP client: {e}"),
                    e,
                )
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Base URL with any trailing slash removed.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, segments: &[&str]) -> String {
        let mut url = self.base_url.clone();
        for segment in segments {
            url.push('/');
            url.push_str(segment);
        }
        url
    }

    fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        let url = self.url(segments);
        debug!(%method, %url, "API request");
        self.client.request(method, url)
    }

    /// Send a request and decode a JSON body.
    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> AppResult<T> {
        let response = self.send(request).await?;
        response.json::<T>().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::ExternalService,
                format!("Malformed API response: {e}"),
                e,
            )
        })
    }

    /// Send a request and fail on transport errors or non-success status.
    async fn send(&self, request: RequestBuilder) -> AppResult<reqwest::Response> {
        let response = request.send().await.map_err(transport_error)?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let url = response.url().to_string();
        let body = response.text().await.unwrap_or_default();
        warn!(%status, %url, body = %truncate(&body, 200), "API returned an error status");
        Err(status_error(status, &url))
    }

    /// Lend a copy of a book. Returns the book with updated availability.
    pub async fn issue_book(&self, issue: &IssueBook) -> AppResult<Book> {
        let request = self
            .request(Method::POST, &[Book::RESOURCE, "issue"])
            .json(issue);
        self.send_json(request).await
    }

    /// Take a lent copy back.
    pub async fn return_book(&self, ret: &ReturnBook) -> AppResult<Book> {
        let request = self
            .request(Method::POST, &[Book::RESOURCE, "return"])
            .json(ret);
        self.send_json(request).await
    }

    /// Submit a whole class's marks for one day in a single call.
    pub async fn mark_bulk_attendance(
        &self,
        bulk: &BulkAttendance,
    ) -> AppResult<Vec<AttendanceRecord>> {
        let request = self
            .request(Method::POST, &[AttendanceRecord::RESOURCE, "bulk"])
            .json(bulk);
        self.send_json(request).await
    }
}

#[async_trait]
impl<R: Resource> ResourceApi<R> for HttpApi {
    async fn list(&self, query: Option<&ListQuery>) -> AppResult<Vec<R>> {
        let mut request = self.request(Method::GET, &[R::RESOURCE]);
        if let Some(query) = query {
            let pairs = query.to_pairs();
            if !pairs.is_empty() {
                request = request.query(&pairs);
            }
        }
        let rows: Vec<Option<R>> = self.send_json(request).await?;
        Ok(present_rows(rows))
    }

    async fn stats(&self) -> AppResult<R::Stats> {
        self.send_json(self.request(Method::GET, &[R::RESOURCE, "stats"]))
            .await
    }

    async fn create(&self, draft: &R::Draft) -> AppResult<R> {
        let request = self.request(Method::POST, &[R::RESOURCE]).json(draft);
        self.send_json(request).await
    }

    async fn update(&self, id: &str, draft: &R::Draft) -> AppResult<R> {
        let request = self.request(Method::PUT, &[R::RESOURCE, id]).json(draft);
        self.send_json(request).await
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        self.send(self.request(Method::DELETE, &[R::RESOURCE, id]))
            .await
            .map(|_| ())
    }
}

fn transport_error(err: reqwest::Error) -> AppError {
    let message = if err.is_timeout() {
        "API request timed out".to_string()
    } else if err.is_connect() {
        "Could not connect to the API".to_string()
    } else {
        format!("API request failed: {err}")
    };
    AppError::with_source(ErrorKind::ExternalService, message, err)
}

fn status_error(status: StatusCode, url: &str) -> AppError {
    let reason = if status.is_client_error() {
        "rejected the request"
    } else {
        "failed"
    };
    AppError::external(format!("API {reason} with {status} for {url}"))
}

fn truncate(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schoolhub_entity::Student;

    fn config(base_url: &str) -> ApiConfig {
        ApiConfig {
            base_url: base_url.to_string(),
            timeout_seconds: 2,
            token: None,
        }
    }

    #[test]
    fn test_url_joins_segments() {
        let api = HttpApi::new(&config("http://school.test/api/")).unwrap();
        assert_eq!(api.base_url(), "http://school.test/api");
        assert_eq!(
            api.url(&[Student::RESOURCE, "stats"]),
            "http://school.test/api/students/stats"
        );
    }

    #[test]
    fn test_token_rejects_control_characters() {
        let mut cfg = config("http://school.test/api");
        cfg.token = Some("abc\ndef".to_string());
        let err = HttpApi::new(&cfg).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Configuration);
    }

    #[test]
    fn test_every_error_status_is_external() {
        let url = "http://school.test/api/students/x";
        for status in [
            StatusCode::NOT_FOUND,
            StatusCode::UNPROCESSABLE_ENTITY,
            StatusCode::INTERNAL_SERVER_ERROR,
        ] {
            let err = status_error(status, url);
            assert_eq!(err.kind, ErrorKind::ExternalService);
            assert!(err.message.contains(status.as_str()));
        }
    }

    #[test]
    fn test_truncate_on_char_boundary() {
        assert_eq!(truncate("héllo", 2), "hé");
        assert_eq!(truncate("hi", 10), "hi");
    }

    #[tokio::test]
    async fn test_unreachable_api_is_external_failure() {
        // Nothing listens on port 9 locally.
        let api = HttpApi::new(&config("http://127.0.0.1:9/api")).unwrap();
        let err = ResourceApi::<Student>::list(&api, None).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::ExternalService);
    }
}
