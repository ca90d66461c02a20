use reqwest::{Client, StatusCode};
use thiserror::Error;

use crate::config::ControllerConfig;

/// Metric queried by the `controller-metric` command.
pub const METRIC_PATH: &str = "Analytics|TEST1_COUNT";

/// Application the metric lives under, as shown in the controller's metric
/// browser.
pub const APPLICATION_NAME: &str = "Analytics";

/// Lookback window: the last 7 days, in minutes.
pub const LOOKBACK_MINUTES: u32 = 60 * 24 * 7;

#[derive(Debug, Error)]
pub enum ControllerError {
    #[error("request to controller failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("controller returned {status}: {body}")]
    Status { status: u16, body: String },
}

/// Fetch the fixed metric time series from the controller REST API, rolled
/// up over the lookback window. Returns the raw JSON body on HTTP 200.
pub async fn query_metric(
    client: &Client,
    config: &ControllerConfig,
) -> Result<String, ControllerError> {
    let url = format!(
        "http://{}:{}/controller/rest/applications/{APPLICATION_NAME}/metric-data",
        config.host, config.port
    );
    let lookback = LOOKBACK_MINUTES.to_string();

    let response = client
        .get(&url)
        .basic_auth(config.auth_user(), Some(&config.password))
        .query(&[
            ("metric-path", METRIC_PATH),
            ("time-range-type", "BEFORE_NOW"),
            ("duration-in-mins", lookback.as_str()),
            ("rollup", "true"),
            ("output", "JSON"),
        ])
        .send()
        .await?;

    if response.status() != StatusCode::OK {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        tracing::error!(status, body = %body, controller = ?config, "metric query rejected");
        return Err(ControllerError::Status { status, body });
    }

    Ok(response.text().await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookback_covers_seven_days() {
        assert_eq!(LOOKBACK_MINUTES, 10_080);
    }
}
