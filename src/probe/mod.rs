pub mod probe;
pub mod result;

pub use probe::{CANDIDATE_URLS, DEFAULT_TIMEOUT_SECS, build_client, pick_candidate, probe_url};
pub use result::{ProbeResult, ProbeStatus, UNAVAILABLE_SENTINEL};
