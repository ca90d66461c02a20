use std::time::Duration;

/// Status code reported when the probe request could not complete at all.
pub const UNAVAILABLE_SENTINEL: u16 = 503;

/// Outcome of a single probe attempt.
///
/// Transport failures (DNS, refused connection, timeout, malformed URL) are
/// kept distinct from HTTP responses here; they collapse into the 503
/// sentinel only when the record is built for publishing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeStatus {
    /// The target answered with an HTTP status code.
    Http(u16),
    /// The request never produced a response.
    TransportError(String),
}

/// Result of probing one URL.
#[derive(Debug, Clone)]
pub struct ProbeResult {
    /// The exact URL that was probed.
    pub url: String,
    pub status: ProbeStatus,
    /// Wall-clock time between request start and completion or failure.
    pub elapsed: Duration,
}

impl ProbeResult {
    /// The status code as published, with transport failures folded into
    /// the 503 sentinel.
    pub fn status_code(&self) -> u16 {
        match self.status {
            ProbeStatus::Http(code) => code,
            ProbeStatus::TransportError(_) => UNAVAILABLE_SENTINEL,
        }
    }

    /// Elapsed time in whole milliseconds.
    pub fn response_time_ms(&self) -> u64 {
        self.elapsed.as_millis() as u64
    }

    pub fn is_transport_error(&self) -> bool {
        matches!(self.status, ProbeStatus::TransportError(_))
    }
}
