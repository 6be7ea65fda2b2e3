//! Archive download with bounded redirect following

use std::error::Error as _;

use greenlight_core::{LauncherError, Result};
use reqwest::StatusCode;
use reqwest::blocking::{Client, Response};
use reqwest::header::LOCATION;
use tracing::debug;
use url::Url;

use super::url::ArtifactLocation;

/// Requests the archive and follows redirects until a final response
///
/// The returned response is unbuffered; its body is read by the caller.
/// The client must not follow redirects itself (see [`build_client`]).
///
/// # Arguments
///
/// * `client` - HTTP client built with redirects disabled
/// * `location` - Download location of the archive
/// * `max_redirects` - Maximum number of 3xx hops to follow
///
/// # Errors
///
/// - `TooManyRedirects` if the chain is longer than `max_redirects`
/// - `HttpStatus` for any final status other than 200, including a 3xx
///   without a usable `Location` header
/// - `Network` for transport failures (DNS, connect, TLS, reset)
///
/// [`build_client`]: super::client::build_client
pub fn fetch_archive(
    client: &Client,
    location: &ArtifactLocation,
    max_redirects: usize,
) -> Result<Response> {
    let mut url = location.download_url.clone();
    let mut hops = 0;

    loop {
        debug!(%url, "requesting archive");
        let response = client.get(url.clone()).send().map_err(network_error)?;
        let status = response.status();

        if status.is_redirection()
            && let Some(next) = redirect_target(&url, &response)
        {
            if hops == max_redirects {
                return Err(LauncherError::TooManyRedirects {
                    max: max_redirects,
                    url: location.download_url.to_string(),
                });
            }
            debug!(status = status.as_u16(), to = %next, "following redirect");
            hops += 1;
            url = next;
            continue;
        }

        if status == StatusCode::OK {
            debug!(%url, hops, "archive response received");
            return Ok(response);
        }

        return Err(LauncherError::HttpStatus {
            status: status.as_u16(),
            version: location.version.clone(),
            releases_url: location.releases_url.to_string(),
        });
    }
}

/// Resolves the `Location` header against the URL that produced it
fn redirect_target(current: &Url, response: &Response) -> Option<Url> {
    let location = response.headers().get(LOCATION)?.to_str().ok()?;
    current.join(location).ok()
}

/// Flattens a reqwest error and its causes into one line
pub(crate) fn network_error(err: reqwest::Error) -> LauncherError {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    LauncherError::Network(message)
}
