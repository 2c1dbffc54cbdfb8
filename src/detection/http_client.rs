//! Shared HTTP client
//!
//! Lazy-initialized reqwest client reused across both detection calls, so
//! the analyze request rides the connection the submit request opened.

use once_cell::sync::Lazy;
use reqwest::Client;
use std::time::Duration;

/// Global HTTP client for detection service calls
///
/// - 120s timeout: a full analysis can take a while server-side
/// - small idle pool; a run only makes two sequential calls
static DETECTION_CLIENT: Lazy<Client> = Lazy::new(|| {
    Client::builder()
        .timeout(Duration::from_secs(120))
        .pool_max_idle_per_host(4)
        .pool_idle_timeout(Duration::from_secs(90))
        .tcp_keepalive(Duration::from_secs(60))
        .tcp_nodelay(true)
        .build()
        .expect("Failed to create detection HTTP client")
});

#[inline]
pub fn detection_client() -> &'static Client {
    &DETECTION_CLIENT
}
