use async_trait::async_trait;
use tokio::time::sleep;
use tracing::debug;
use url::Url;

use crate::{
    error::NetResult,
    traits::Net,
    types::{Headers, HttpResponse, RetryPolicy},
};

/// Retry decorator for [`Net`] implementations.
///
/// Retries transport failures only, up to the policy budget; the last failure
/// propagates unchanged once the budget is exhausted. HTTP responses pass
/// through untouched whatever their status — status handling belongs to the
/// caller, not the fetch layer.
#[derive(Clone, Debug)]
pub struct RetryNet<N> {
    inner: N,
    policy: RetryPolicy,
}

impl<N: Net> RetryNet<N> {
    pub fn new(inner: N, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }
}

#[async_trait]
impl<N: Net> Net for RetryNet<N> {
    async fn get(&self, url: Url, headers: Option<Headers>) -> NetResult<HttpResponse> {
        let mut attempt = 0;

        loop {
            match self.inner.get(url.clone(), headers.clone()).await {
                Ok(resp) => return Ok(resp),
                Err(error) => {
                    if attempt >= self.policy.max_retries {
                        return Err(error);
                    }

                    let delay = self.policy.delay_for_attempt(attempt);
                    debug!(
                        url = %url,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %error,
                        "transport failure, retrying"
                    );
                    sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}
