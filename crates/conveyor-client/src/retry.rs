//! Retry with exponential backoff for rate-limited and failed requests.

use std::time::Duration;

use reqwest::header::{HeaderMap, RETRY_AFTER};

use crate::error::{Result, translate};
use crate::transport::{HttpRequest, HttpResponse, Transport};

/// Default number of retries after the first attempt.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Default delay before the first retry.
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(1000);

/// Default upper bound for any single wait.
pub const DEFAULT_MAX_DELAY: Duration = Duration::from_millis(30_000);

/// Default growth factor between consecutive waits.
pub const DEFAULT_BACKOFF_MULTIPLIER: f64 = 2.0;

/// Which failures are retried and how long to wait between attempts.
///
/// Both retry flags are opt-in; with the default policy every error
/// response is surfaced after a single attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Retries after the first attempt. Total attempts are `1 + max_retries`.
    pub max_retries: u32,
    /// Delay before the first retry.
    pub base_delay: Duration,
    /// Upper bound for any single wait, including `Retry-After` hints.
    pub max_delay: Duration,
    /// Growth factor applied per attempt.
    pub backoff_multiplier: f64,
    /// Retry `429 Too Many Requests`.
    pub retry_on_429: bool,
    /// Retry `5xx` responses.
    pub retry_on_server_error: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            base_delay: DEFAULT_BASE_DELAY,
            max_delay: DEFAULT_MAX_DELAY,
            backoff_multiplier: DEFAULT_BACKOFF_MULTIPLIER,
            retry_on_429: false,
            retry_on_server_error: false,
        }
    }
}

impl RetryPolicy {
    /// A policy that never retries.
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    /// Set the maximum number of retries.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Set the base delay.
    pub fn with_base_delay(mut self, delay: Duration) -> Self {
        self.base_delay = delay;
        self
    }

    /// Set the maximum delay.
    pub fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    /// Set the backoff multiplier.
    pub fn with_backoff_multiplier(mut self, multiplier: f64) -> Self {
        self.backoff_multiplier = multiplier;
        self
    }

    /// Enable or disable retrying 429 responses.
    pub fn with_retry_on_429(mut self, enabled: bool) -> Self {
        self.retry_on_429 = enabled;
        self
    }

    /// Enable or disable retrying 5xx responses.
    pub fn with_retry_on_server_error(mut self, enabled: bool) -> Self {
        self.retry_on_server_error = enabled;
        self
    }

    /// Exponential backoff for a zero-based attempt index, capped at `max_delay`.
    pub fn backoff(&self, attempt: u32) -> Duration {
        let exponent = i32::try_from(attempt).unwrap_or(i32::MAX);
        let millis = self.base_delay.as_millis() as f64 * self.backoff_multiplier.powi(exponent);
        let capped = millis.min(self.max_delay.as_millis() as f64);
        Duration::from_millis(capped.max(0.0) as u64)
    }

    /// Decide whether a failed attempt is retried and how long to wait.
    ///
    /// Returns `None` when the response must be surfaced as an error.
    pub fn delay_for(&self, status: u16, headers: &HeaderMap, attempt: u32) -> Option<Duration> {
        if attempt >= self.max_retries {
            return None;
        }
        match status {
            429 if self.retry_on_429 => Some(match retry_after(headers) {
                Some(hint) => hint.min(self.max_delay),
                None => self.backoff(attempt),
            }),
            s if s >= 500 && self.retry_on_server_error => Some(self.backoff(attempt)),
            _ => None,
        }
    }
}

/// Parse a `Retry-After` header given in seconds.
pub fn retry_after(headers: &HeaderMap) -> Option<Duration> {
    let value = headers.get(RETRY_AFTER)?.to_str().ok()?;
    value.trim().parse::<u64>().ok().map(Duration::from_secs)
}

/// Send a request, retrying according to `policy`.
///
/// Successful responses are returned as-is. Error responses that are not
/// retried are translated into [`crate::ApiError`]. Transport failures are
/// returned unmodified and never retried.
pub(crate) async fn send_with_retry(
    transport: &dyn Transport,
    policy: &RetryPolicy,
    request: &HttpRequest,
) -> Result<HttpResponse> {
    let mut attempt = 0;
    loop {
        tracing::debug!(
            method = %request.method,
            url = %request.url,
            attempt = attempt + 1,
            "Sending request"
        );
        let response = transport.send(request.clone()).await?;
        if response.status.as_u16() < 400 {
            return Ok(response);
        }

        let status = response.status.as_u16();
        match policy.delay_for(status, &response.headers, attempt) {
            Some(delay) => {
                tracing::warn!(
                    url = %request.url,
                    status,
                    attempt = attempt + 1,
                    max_retries = policy.max_retries,
                    delay_ms = delay.as_millis() as u64,
                    "Request failed, retrying"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            None => {
                return Err(translate(response.status, &response.headers, &response.body).into());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    fn headers_with_retry_after(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(RETRY_AFTER, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn test_defaults() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_retries, 3);
        assert_eq!(policy.base_delay, Duration::from_millis(1000));
        assert_eq!(policy.max_delay, Duration::from_millis(30_000));
        assert_eq!(policy.backoff_multiplier, 2.0);
        assert!(!policy.retry_on_429);
        assert!(!policy.retry_on_server_error);
    }

    #[test]
    fn test_backoff_grows_and_caps() {
        let policy = RetryPolicy::default().with_max_delay(Duration::from_millis(5000));
        assert_eq!(policy.backoff(0), Duration::from_millis(1000));
        assert_eq!(policy.backoff(1), Duration::from_millis(2000));
        assert_eq!(policy.backoff(2), Duration::from_millis(4000));
        assert_eq!(policy.backoff(3), Duration::from_millis(5000));
        assert_eq!(policy.backoff(u32::MAX), Duration::from_millis(5000));
    }

    #[test]
    fn test_default_policy_never_retries() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_for(429, &HeaderMap::new(), 0), None);
        assert_eq!(policy.delay_for(503, &HeaderMap::new(), 0), None);
    }

    #[test]
    fn test_client_errors_never_retry() {
        let policy = RetryPolicy::default()
            .with_retry_on_429(true)
            .with_retry_on_server_error(true);
        for status in [400, 401, 403, 404, 409, 422] {
            assert_eq!(policy.delay_for(status, &HeaderMap::new(), 0), None);
        }
    }

    #[test]
    fn test_retry_after_is_honored_and_capped() {
        let policy = RetryPolicy::default().with_retry_on_429(true);
        assert_eq!(
            policy.delay_for(429, &headers_with_retry_after("1"), 0),
            Some(Duration::from_secs(1))
        );

        let capped = policy.with_max_delay(Duration::from_millis(100));
        assert_eq!(
            capped.delay_for(429, &headers_with_retry_after("10"), 0),
            Some(Duration::from_millis(100))
        );
    }

    #[test]
    fn test_retry_after_ignored_for_server_errors() {
        let policy = RetryPolicy::default().with_retry_on_server_error(true);
        assert_eq!(
            policy.delay_for(503, &headers_with_retry_after("20"), 1),
            Some(Duration::from_millis(2000))
        );
    }

    #[test]
    fn test_exhausted_attempts() {
        let policy = RetryPolicy::default()
            .with_retry_on_429(true)
            .with_max_retries(2);
        assert!(policy.delay_for(429, &HeaderMap::new(), 1).is_some());
        assert_eq!(policy.delay_for(429, &HeaderMap::new(), 2), None);
    }

    #[test]
    fn test_unparseable_retry_after_falls_back_to_backoff() {
        let policy = RetryPolicy::default().with_retry_on_429(true);
        assert_eq!(
            policy.delay_for(429, &headers_with_retry_after("soon"), 1),
            Some(Duration::from_millis(2000))
        );
    }
}
