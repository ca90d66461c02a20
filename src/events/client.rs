use reqwest::{
    Client, StatusCode,
    header::{CONTENT_TYPE, HeaderMap, HeaderValue},
};
use thiserror::Error;

use super::{ACCOUNT_NAME_HEADER, API_KEY_HEADER, AnalyticsRecord, EVENTS_CONTENT_TYPE};
use crate::config::EventsConfig;

/// Errors from talking to the events service.
#[derive(Debug, Error)]
pub enum EventsError {
    #[error("request to events service failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered, but not with 200.
    #[error("events service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("configured value is not a valid header: {0}")]
    Header(#[from] reqwest::header::InvalidHeaderValue),

    #[error("failed to serialize payload: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Client for the analytics events REST API: publish records, manage the
/// schema, and run queries, all against one configured schema name.
pub struct EventsClient {
    http: Client,
    config: EventsConfig,
}

impl EventsClient {
    pub fn new(http: Client, config: EventsConfig) -> Self {
        Self { http, config }
    }

    fn headers(&self) -> Result<HeaderMap, EventsError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCOUNT_NAME_HEADER,
            HeaderValue::from_str(&self.config.account_name)?,
        );
        headers.insert(API_KEY_HEADER, HeaderValue::from_str(&self.config.api_key)?);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(EVENTS_CONTENT_TYPE));
        Ok(headers)
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.config.endpoint.trim_end_matches('/'), path)
    }

    fn schema_url(&self) -> String {
        self.endpoint(&format!("/events/schema/{}", self.config.schema_name))
    }

    /// Publish a batch of records. Success is exactly HTTP 200; anything
    /// else is returned as [`EventsError::Status`] with the response body,
    /// never retried.
    pub async fn publish(&self, records: &[AnalyticsRecord]) -> Result<(), EventsError> {
        let url = self.endpoint(&format!("/events/publish/{}", self.config.schema_name));
        let body = serde_json::to_vec(records)?;

        let response = self
            .http
            .post(&url)
            .headers(self.headers()?)
            .body(body)
            .send()
            .await?;

        self.check_ok(response, "publish").await?;
        tracing::info!(
            schema = %self.config.schema_name,
            records = records.len(),
            "records published"
        );
        Ok(())
    }

    /// Register the column schema under the configured schema name.
    pub async fn create_schema(&self) -> Result<(), EventsError> {
        let body = serde_json::to_vec(&super::schema_definition())?;
        let response = self
            .http
            .post(self.schema_url())
            .headers(self.headers()?)
            .body(body)
            .send()
            .await?;

        self.check_ok(response, "create schema").await?;
        tracing::info!(schema = %self.config.schema_name, "schema created");
        Ok(())
    }

    pub async fn delete_schema(&self) -> Result<(), EventsError> {
        let response = self
            .http
            .delete(self.schema_url())
            .headers(self.headers()?)
            .send()
            .await?;

        self.check_ok(response, "delete schema").await?;
        tracing::info!(schema = %self.config.schema_name, "schema deleted");
        Ok(())
    }

    /// Run `select * from <schema>` and return the raw response body.
    pub async fn query(&self) -> Result<String, EventsError> {
        let query = format!("select * from {}", self.config.schema_name);
        let response = self
            .http
            .post(self.endpoint("/events/query"))
            .headers(self.headers()?)
            .body(query)
            .send()
            .await?;

        let response = self.check_ok(response, "query").await?;
        Ok(response.text().await?)
    }

    async fn check_ok(
        &self,
        response: reqwest::Response,
        operation: &str,
    ) -> Result<reqwest::Response, EventsError> {
        if response.status() == StatusCode::OK {
            return Ok(response);
        }
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        // The destination summary is safe to log; the config Debug impl
        // redacts the API key.
        tracing::error!(
            operation,
            status,
            body = %body,
            destination = ?self.config,
            "events service rejected request"
        );
        Err(EventsError::Status { status, body })
    }
}
