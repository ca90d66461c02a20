use std::time::{Duration, Instant};

use rand::Rng;
use reqwest::Client;

use super::result::{ProbeResult, ProbeStatus};

/// Default timeout for the probe request. The original deployment set no
/// bound at all; an unbounded probe makes the elapsed measurement
/// meaningless, so the client carries a default that the caller can raise.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// URL endpoints to exercise when no explicit target is given. The last
/// entry deliberately 404s so both success and error status codes show up
/// in the events store.
pub const CANDIDATE_URLS: [&str; 4] = [
    "https://google.com",
    "https://yahoo.com",
    "https://example.com",
    "https://google.com/TESTERROR",
];

/// Build the HTTP client shared by the probe and the publish path.
pub fn build_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!("synprobe/", env!("CARGO_PKG_VERSION")))
        .build()
}

/// Pick a random candidate URL for an unattended test run.
pub fn pick_candidate() -> &'static str {
    let index = rand::thread_rng().gen_range(0..CANDIDATE_URLS.len());
    CANDIDATE_URLS[index]
}

/// Probe a single URL with one GET request.
///
/// Never fails: any transport-level error is captured as
/// [`ProbeStatus::TransportError`], and elapsed time is measured either
/// way.
pub async fn probe_url(client: &Client, url: &str) -> ProbeResult {
    let start = Instant::now();
    let response = client.get(url).send().await;
    let elapsed = start.elapsed();

    let status = match response {
        Ok(resp) => ProbeStatus::Http(resp.status().as_u16()),
        Err(e) => {
            tracing::debug!(url, error = %e, "probe transport failure");
            ProbeStatus::TransportError(e.to_string())
        }
    };

    ProbeResult {
        url: url.to_string(),
        status,
        elapsed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    #[test]
    fn candidate_urls_parse() {
        for candidate in CANDIDATE_URLS {
            Url::parse(candidate).expect("candidate URL must be well-formed");
        }
    }

    #[test]
    fn pick_candidate_stays_in_list() {
        for _ in 0..100 {
            assert!(CANDIDATE_URLS.contains(&pick_candidate()));
        }
    }

    #[tokio::test]
    async fn malformed_url_is_a_transport_error() {
        let client = build_client(Duration::from_secs(1)).unwrap();
        let result = probe_url(&client, "not a url").await;
        assert!(result.is_transport_error());
        assert_eq!(result.status_code(), crate::probe::UNAVAILABLE_SENTINEL);
    }
}
