//! HTTP plumbing for upstream services.

mod basic;
mod client;

pub use basic::BasicClient;
pub use client::HttpClient;

use anyhow::{Result, anyhow};
use serde::de::DeserializeOwned;
use tracing::debug;

/// Builds the URL for a GET request with `params` appended as query pairs.
pub fn build_url(base: &str, params: &[(&str, &str)]) -> Result<reqwest::Url> {
    let mut url: reqwest::Url = base.parse()?;
    if !params.is_empty() {
        url.query_pairs_mut().extend_pairs(params);
    }
    Ok(url)
}

/// GETs `base` with `params` and decodes the JSON body.
///
/// Non-2xx responses fail with the status and body text.
pub async fn fetch_json<C: HttpClient + ?Sized, T: DeserializeOwned>(
    client: &C,
    base: &str,
    params: &[(&str, &str)],
) -> Result<T> {
    let url = build_url(base, params)?;
    debug!(url = %url, "Sending upstream request");

    let req = reqwest::Request::new(reqwest::Method::GET, url);
    let resp = client
        .execute(req)
        .await
        .map_err(|e| anyhow!("Failed to send request: {}", e))?;

    if !resp.status().is_success() {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        return Err(anyhow!("Upstream returned status {}: {}", status, body));
    }

    let body = resp.bytes().await?;
    serde_json::from_slice(&body).map_err(|e| anyhow!("Failed to parse response: {}", e))
}
