use std::time::{Duration, Instant};

use common::error::TransportError;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

const DEFAULT_EXECUTOR_URL: &str = "http://127.0.0.1:9400";
const DEFAULT_TIMEOUT_MS: u64 = 30_000;

pub fn executor_base_url() -> String {
    std::env::var("VENUE_SEARCH_URL").unwrap_or(DEFAULT_EXECUTOR_URL.to_string())
}

/// Transport-level timeout only; stale results are handled by the listing's epochs.
pub fn executor_timeout() -> Duration {
    let timeout_ms = std::env::var("VENUE_SEARCH_TIMEOUT_MS")
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .unwrap_or(DEFAULT_TIMEOUT_MS);
    Duration::from_millis(timeout_ms)
}

pub fn get_executor_client() -> anyhow::Result<reqwest::Client> {
    let client = reqwest::Client::builder().timeout(executor_timeout()).build()?;
    Ok(client)
}

/// GETs `path` with the given query parameters and decodes the JSON body.
///
/// A non-success status fails with [`TransportError::Status`], an
/// undecodable body with [`TransportError::InvalidResponse`].
pub async fn executor_get_json<T: DeserializeOwned>(
    client: &reqwest::Client,
    base_url: &str,
    path: &str,
    params: &[(String, String)],
) -> anyhow::Result<T> {
    let url = format!("{}{}", base_url.trim_end_matches('/'), path);
    let t0 = Instant::now();

    let response = client.get(&url).query(params).send().await?;
    let status = response.status();
    let response_txt = response.text().await?;
    if !status.is_success() {
        warn!("search executor error: {}: {}", status, response_txt);
        return Err(TransportError::Status {
            status: status.as_u16(),
            body: response_txt,
        }
        .into());
    }
    let dt_ms = t0.elapsed().as_millis();
    debug!("search executor response: len = {} (took {}ms)", response_txt.len(), dt_ms);

    let response = serde_json::from_str::<T>(&response_txt)
        .map_err(|err| TransportError::InvalidResponse(err.to_string()))?;
    Ok(response)
}
