//! Fetch one clip end to end.
//!
//! ```
//! cargo run -p moviola --example fetch_clip -- <master.json URL> [name]
//! ```
//!
//! Requires `ffmpeg` on `PATH` when the clip has an audio track.

use std::{env::args, error::Error};

use moviola::{Event, EventBus, MaxHeight, MoviolaConfig, Session};
use tracing::{info, metadata::LevelFilter, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::default()
                .add_directive("moviola=debug".parse()?)
                .add_directive(LevelFilter::INFO.into()),
        )
        .with_line_number(false)
        .with_file(false)
        .init();

    let manifest_url = args()
        .nth(1)
        .ok_or("usage: fetch_clip <master.json URL> [name]")?;
    let name = args().nth(2).unwrap_or_else(|| "clip".to_string());

    let bus = EventBus::new(128);
    let mut events_rx = bus.subscribe();
    let events = tokio::spawn(async move {
        loop {
            match events_rx.recv().await {
                Ok(Event::DownloadProgress { track, percent }) => {
                    info!(%track, percent = percent as f64, "progress")
                }
                Ok(ev) => info!(?ev),
                Err(tokio::sync::broadcast::error::RecvError::Lagged(n)) => {
                    warn!(n, "events lagged")
                }
                Err(_) => break,
            }
        }
    });

    let config = MoviolaConfig::new()
        .with_max_height(Some(MaxHeight::FullHd))
        .with_events(bus);
    let session = Session::new(config);

    info!(url = %manifest_url, "resolving manifest");
    match session.fetch_clip(&manifest_url, &name, &manifest_url).await? {
        Some(saved) => {
            for path in &saved.artifact_paths {
                info!(path = %path.display(), "artifact written");
            }
            info!(id = %saved.id, "saved to catalog");
        }
        None => warn!("a download for this clip is already running"),
    }

    drop(session);
    events.abort();
    Ok(())
}
