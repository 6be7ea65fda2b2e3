//! HTTP client construction for release downloads

use reqwest::blocking::Client;
use reqwest::redirect::Policy;
use std::time::Duration;

/// User agent sent with every request
pub const USER_AGENT: &str = concat!("greenlight-launcher/", env!("CARGO_PKG_VERSION"));

/// Builds HTTP client for release downloads
///
/// Redirects are not followed by the client; [`fetch_archive`] walks them
/// itself so the hop count stays bounded and observable.
///
/// # Arguments
///
/// * `timeout` - Whole-request timeout, `None` to wait indefinitely
///
/// # Errors
///
/// Returns error if client construction fails (e.g. TLS backend init)
///
/// [`fetch_archive`]: super::fetch::fetch_archive
pub fn build_client(timeout: Option<Duration>) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(USER_AGENT)
        .redirect(Policy::none())
        .timeout(timeout)
        .build()
}

/// Builds HTTP client without a request timeout
pub fn build_default_client() -> Result<Client, reqwest::Error> {
    build_client(None)
}
