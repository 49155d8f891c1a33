// SPDX-License-Identifier: Apache-2.0

//! Outbound HTTP with a fixed-delay retry wrapper.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::fmt::{Display, Formatter};
use std::future::Future;
use std::time::Duration;
use tracing::{instrument, warn};

pub trait BackoffPolicy {
    /// Delay to wait after failed attempt number `attempt` (1-based).
    fn delay_for_attempt(&self, attempt: usize) -> Duration;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FixedBackoff {
    pub delay_ms: u64,
}

impl BackoffPolicy for FixedBackoff {
    fn delay_for_attempt(&self, _attempt: usize) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RetryPolicy {
    pub max_attempts: usize,
    pub backoff: FixedBackoff,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff: FixedBackoff { delay_ms: 1000 },
        }
    }
}

impl RetryPolicy {
    /// Runs `op` until it succeeds or `max_attempts` is used up, sleeping
    /// between attempts. Returns the last error.
    pub async fn run<T, E, F, Fut>(&self, mut op: F) -> Result<T, E>
    where
        F: FnMut(usize) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
    {
        let attempts = self.max_attempts.max(1);
        let mut attempt = 0;
        loop {
            attempt += 1;
            match op(attempt).await {
                Ok(value) => return Ok(value),
                Err(err) if attempt >= attempts => return Err(err),
                Err(err) => {
                    let delay = self.backoff.delay_for_attempt(attempt);
                    warn!(attempt, max_attempts = attempts, error = %err, delay_ms = delay.as_millis() as u64, "upstream attempt failed");
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamError(pub String);

impl Display for UpstreamError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for UpstreamError {}

#[async_trait]
pub trait Upstream: Send + Sync + 'static {
    async fn get_json(&self, url: &str) -> Result<Value, UpstreamError>;
}

/// `reqwest`-backed upstream.
pub struct HttpUpstream {
    client: reqwest::Client,
}

impl HttpUpstream {
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self { client }
    }
}

#[async_trait]
impl Upstream for HttpUpstream {
    #[instrument(name = "upstream_get", skip(self))]
    async fn get_json(&self, url: &str) -> Result<Value, UpstreamError> {
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| UpstreamError(format!("request failed url={url}: {e}")))?;
        if !resp.status().is_success() {
            return Err(UpstreamError(format!(
                "upstream status={} url={url}",
                resp.status()
            )));
        }
        resp.json::<Value>()
            .await
            .map_err(|e| UpstreamError(format!("decode failed url={url}: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn quick(max_attempts: usize) -> RetryPolicy {
        RetryPolicy {
            max_attempts,
            backoff: FixedBackoff { delay_ms: 1 },
        }
    }

    #[tokio::test]
    async fn retries_until_success() {
        let calls = AtomicUsize::new(0);
        let out: Result<u32, UpstreamError> = quick(3)
            .run(|attempt| {
                calls.fetch_add(1, Ordering::Relaxed);
                async move {
                    if attempt < 2 {
                        Err(UpstreamError("down".into()))
                    } else {
                        Ok(7)
                    }
                }
            })
            .await;
        assert_eq!(out, Ok(7));
        assert_eq!(calls.load(Ordering::Relaxed), 2);
    }

    #[tokio::test]
    async fn gives_up_after_max_attempts() {
        let calls = AtomicUsize::new(0);
        let out: Result<u32, UpstreamError> = quick(3)
            .run(|attempt| {
                calls.fetch_add(1, Ordering::Relaxed);
                async move { Err(UpstreamError(format!("fail {attempt}"))) }
            })
            .await;
        assert_eq!(out, Err(UpstreamError("fail 3".into())));
        assert_eq!(calls.load(Ordering::Relaxed), 3);
    }

    #[test]
    fn fixed_backoff_ignores_attempt_number() {
        let b = FixedBackoff { delay_ms: 1000 };
        assert_eq!(b.delay_for_attempt(1), b.delay_for_attempt(5));
    }
}
