use std::{cmp::min, collections::HashMap, time::Duration};

use bytes::Bytes;
use url::Url;

use crate::error::{NetError, NetResult};

#[derive(Clone, Debug, PartialEq)]
pub struct Headers {
    inner: HashMap<String, String>,
}

impl Headers {
    pub fn new() -> Self {
        Self {
            inner: HashMap::new(),
        }
    }

    pub fn insert<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) {
        self.inner.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.inner.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inner.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl Default for Headers {
    fn default() -> Self {
        Self::new()
    }
}

impl From<HashMap<String, String>> for Headers {
    fn from(map: HashMap<String, String>) -> Self {
        Self { inner: map }
    }
}

/// A completed HTTP exchange.
///
/// Carries the status code instead of turning non-2xx into an error: the
/// fetch layer surfaces every HTTP response as-is and only transport failures
/// become [`NetError`]. Callers that need a success body go through
/// [`HttpResponse::into_success_body`].
#[derive(Clone, Debug)]
pub struct HttpResponse {
    pub status: u16,
    pub url: Url,
    pub body: Bytes,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Returns the body, or [`NetError::HttpStatus`] for a non-success status.
    pub fn into_success_body(self) -> NetResult<Bytes> {
        if self.is_success() {
            Ok(self.body)
        } else {
            Err(NetError::HttpStatus {
                status: self.status,
                url: self.url,
            })
        }
    }
}

#[derive(Clone, Debug)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(5),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_retries: u32, base_delay: Duration, max_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
            max_delay,
        }
    }

    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            return Duration::ZERO;
        }

        let exponential_delay = self.base_delay * 2_u32.pow(attempt.saturating_sub(1));
        min(exponential_delay, self.max_delay)
    }
}

#[derive(Clone, Debug)]
pub struct NetOptions {
    pub request_timeout: Duration,
    pub retry_policy: RetryPolicy,
    /// Max idle connections per host. Set to 0 to disable pooling and reduce memory.
    pub pool_max_idle_per_host: usize,
}

impl Default for NetOptions {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
            retry_policy: RetryPolicy::default(),
            pool_max_idle_per_host: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::*;

    use super::*;

    fn test_url() -> Url {
        Url::parse("https://cdn.example/master.json").unwrap()
    }

    #[rstest]
    #[case::ok(200, true)]
    #[case::created(201, true)]
    #[case::redirect(301, false)]
    #[case::not_found(404, false)]
    #[case::server_error(500, false)]
    fn http_response_is_success(#[case] status: u16, #[case] expected: bool) {
        let resp = HttpResponse {
            status,
            url: test_url(),
            body: Bytes::new(),
        };
        assert_eq!(resp.is_success(), expected);
    }

    #[rstest]
    fn into_success_body_returns_body_on_2xx() {
        let resp = HttpResponse {
            status: 200,
            url: test_url(),
            body: Bytes::from_static(b"payload"),
        };
        assert_eq!(resp.into_success_body().unwrap(), Bytes::from_static(b"payload"));
    }

    #[rstest]
    #[case(404)]
    #[case(503)]
    fn into_success_body_raises_http_status(#[case] status: u16) {
        let resp = HttpResponse {
            status,
            url: test_url(),
            body: Bytes::new(),
        };
        let error = resp.into_success_body().unwrap_err();
        assert_eq!(error.status_code(), Some(status));
    }

    #[rstest]
    #[case(0, Duration::ZERO)]
    #[case(1, Duration::from_millis(100))]
    #[case(2, Duration::from_millis(200))]
    #[case(3, Duration::from_millis(400))]
    #[case(10, Duration::from_secs(5))] // Capped at max_delay
    fn retry_policy_delay_for_attempt(#[case] attempt: u32, #[case] expected: Duration) {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_for_attempt(attempt), expected);
    }

    #[rstest]
    fn retry_policy_default() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_retries, 3);
        assert_eq!(policy.base_delay, Duration::from_millis(100));
        assert_eq!(policy.max_delay, Duration::from_secs(5));
    }

    #[rstest]
    fn headers_insert_and_get() {
        let mut headers = Headers::new();
        headers.insert("Accept", "application/json");

        assert_eq!(headers.get("Accept"), Some("application/json"));
        assert_eq!(headers.get("non-existent"), None);
        assert!(!headers.is_empty());
    }

    #[rstest]
    fn headers_from_hashmap() {
        let mut map = HashMap::new();
        map.insert("key1".to_string(), "value1".to_string());

        let headers: Headers = map.into();
        assert_eq!(headers.get("key1"), Some("value1"));
    }
}
