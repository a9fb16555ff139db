use async_trait::async_trait;
use url::Url;

use crate::error::NetResult;
use crate::retry::RetryNet;
use crate::types::{Headers, HttpResponse, RetryPolicy};

#[cfg_attr(test, unimock::unimock(api = NetMock))]
#[async_trait]
pub trait Net: Send + Sync {
    /// Perform a GET and return the response whatever its status.
    ///
    /// `Err` means the request never completed (transport failure); an HTTP
    /// error status is an `Ok` response the caller inspects.
    async fn get(&self, url: Url, headers: Option<Headers>) -> NetResult<HttpResponse>;
}

pub trait NetExt: Net + Sized {
    /// Add transport-retry layer
    fn with_retry(self, policy: RetryPolicy) -> RetryNet<Self> {
        RetryNet::new(self, policy)
    }
}

impl<T: Net> NetExt for T {}
