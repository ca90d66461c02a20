//! Synthetic URL prober.
//!
//! Issues a single HTTP GET against a target URL, measures status code and
//! latency, and publishes the result as a record to a remote analytics
//! events service. Auxiliary commands manage the remote schema and run
//! ad-hoc queries.

pub mod cli;
pub mod config;
pub mod controller;
pub mod events;
pub mod measurement;
pub mod probe;
