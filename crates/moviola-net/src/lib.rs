#![forbid(unsafe_code)]

//! Network layer: a minimal fetch trait, a reqwest-backed client, and a
//! transport-retry decorator.

mod client;
mod error;
mod retry;
mod traits;
mod types;

pub use crate::{
    client::HttpClient,
    error::{NetError, NetResult},
    retry::RetryNet,
    traits::{Net, NetExt},
    types::{Headers, HttpResponse, NetOptions, RetryPolicy},
};
