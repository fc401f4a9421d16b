pub mod wikidata;
pub mod wikipedia;

mod error;

pub use error::{Error, Result};

use std::time::Duration;

use reqwest::{
	Client,
	header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT},
};
use serde_json::Value;

#[derive(Clone, Copy, Debug)]
pub struct RetryPolicy {
	/// Extra attempts after the first one.
	pub retries: u32,
	pub backoff_ms: u64,
}
impl RetryPolicy {
	pub fn none() -> Self {
		Self { retries: 0, backoff_ms: 0 }
	}

	pub fn from_config(cfg: &cineseek_config::WikidataProviderConfig) -> Self {
		Self { retries: cfg.retries, backoff_ms: cfg.retry_backoff_ms }
	}

	fn delay(&self, attempt: u32) -> Duration {
		Duration::from_millis(self.backoff_ms.saturating_mul(u64::from(attempt) + 1))
	}
}

pub fn build_client(user_agent: &str, timeout_ms: u64) -> Result<Client> {
	let mut headers = HeaderMap::new();

	headers.insert(USER_AGENT, HeaderValue::from_str(user_agent)?);

	Ok(Client::builder()
		.timeout(Duration::from_millis(timeout_ms))
		.default_headers(headers)
		.build()?)
}

/// GET returning JSON, retried with linear backoff. The last error is propagated.
pub async fn get_json(
	client: &Client,
	url: &str,
	query: &[(&str, &str)],
	accept: &str,
	retry: RetryPolicy,
) -> Result<Value> {
	let mut attempt = 0;

	loop {
		match try_get_json(client, url, query, accept).await {
			Ok(json) => return Ok(json),
			Err(err) if attempt < retry.retries => {
				tracing::warn!(error = %err, %url, attempt, "Upstream request failed; retrying.");

				tokio::time::sleep(retry.delay(attempt)).await;

				attempt += 1;
			},
			Err(err) => return Err(err),
		}
	}
}

async fn try_get_json(
	client: &Client,
	url: &str,
	query: &[(&str, &str)],
	accept: &str,
) -> Result<Value> {
	let res = client.get(url).query(query).header(ACCEPT, accept).send().await?;
	let json: Value = res.error_for_status()?.json().await?;

	Ok(json)
}
