use rand::Rng;
use serde::Serialize;
use serde_json::{Value, json};

use crate::probe::ProbeResult;

pub mod client;

pub use client::{EventsClient, EventsError};

pub const ACCOUNT_NAME_HEADER: &str = "X-Events-API-AccountName";
pub const API_KEY_HEADER: &str = "X-Events-API-Key";
pub const EVENTS_CONTENT_TYPE: &str = "application/vnd.appd.events+json;v=2";

/// One row published to the events store. Field names and types mirror the
/// registered schema; `status_code_s` duplicates `status_code` for the
/// schema's string-typed column.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsRecord {
    pub testid: u32,
    pub status_code: u16,
    pub status_code_s: String,
    pub response_time: u64,
    pub url: String,
    pub mesid: String,
}

impl AnalyticsRecord {
    /// Build the wire record for one probe result. `testid` is freshly
    /// randomized per call and identifies the run, without any uniqueness
    /// guarantee.
    pub fn from_probe(result: &ProbeResult, mesid: &str) -> Self {
        let status_code = result.status_code();
        Self {
            testid: rand::thread_rng().gen_range(1..=1000),
            status_code,
            status_code_s: status_code.to_string(),
            response_time: result.response_time_ms(),
            url: result.url.clone(),
            mesid: mesid.to_string(),
        }
    }
}

/// The column definition registered with the events service before any
/// record can be published. Must stay in sync with [`AnalyticsRecord`].
pub fn schema_definition() -> Value {
    json!({
        "schema": {
            "testid":        "integer",
            "status_code":   "integer",
            "status_code_s": "string",
            "response_time": "integer",
            "url":           "string",
            "mesid":         "string",
        }
    })
}
