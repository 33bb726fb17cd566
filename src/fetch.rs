//! Page fetching, kept out of the extraction core.
//!
//! The registry tolerates slow clients better than bursty ones, so the
//! HTTP fetcher paces itself with a fixed inter-request interval and backs
//! off on 429/5xx. The extraction side only sees the [`Fetch`] contract.

use std::time::{Duration, Instant};

use anyhow::{anyhow, Result};
use tokio::sync::Mutex;
use tracing::warn;

const MAX_RETRIES: u32 = 3;
const BASE_BACKOFF_MS: u64 = 2000;

/// The transport contract: page address in, raw page text or error out.
pub trait Fetch {
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// reqwest-backed fetcher with an interval gate between requests.
pub struct HttpFetcher {
    client: reqwest::Client,
    interval: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl HttpFetcher {
    pub fn new(interval: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            interval,
            last_request: Mutex::new(None),
        }
    }

    async fn pace(&self) {
        let mut last = self.last_request.lock().await;
        if let Some(t) = *last {
            let elapsed = t.elapsed();
            if elapsed < self.interval {
                tokio::time::sleep(self.interval - elapsed).await;
            }
        }
        *last = Some(Instant::now());
    }

    async fn fetch_once(&self, url: &str) -> Result<String> {
        self.pace().await;
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!("HTTP {status} for {url}"));
        }
        Ok(response.text().await?)
    }
}

impl Fetch for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        for attempt in 0..MAX_RETRIES {
            match self.fetch_once(url).await {
                Ok(text) => return Ok(text),
                Err(e) if is_transient(&e) => {
                    let backoff = Duration::from_millis(BASE_BACKOFF_MS * 2u64.pow(attempt));
                    warn!(
                        "Transient error on {} (attempt {}/{}), backing off {:.1}s: {}",
                        url,
                        attempt + 1,
                        MAX_RETRIES,
                        backoff.as_secs_f64(),
                        e
                    );
                    tokio::time::sleep(backoff).await;
                }
                Err(e) => return Err(e),
            }
        }
        self.fetch_once(url).await
    }
}

fn is_transient(e: &anyhow::Error) -> bool {
    let msg = e.to_string();
    msg.contains("429") || msg.contains("500") || msg.contains("502") || msg.contains("503")
}
