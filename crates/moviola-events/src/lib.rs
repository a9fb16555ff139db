#![forbid(unsafe_code)]

//! Event channel between the download pipeline and whatever renders it.

mod bus;
mod event;

pub use bus::EventBus;
pub use event::{Event, TrackKind};
