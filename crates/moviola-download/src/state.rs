//! Per-track download state: one observable slot per track kind.

use std::sync::Arc;

use parking_lot::RwLock;
use moviola_events::TrackKind;

/// Progress of one track's download pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackProgress {
    pub is_downloading: bool,
    /// 0..=100, monotonically increasing during a pass.
    pub progress: f32,
}

impl TrackProgress {
    fn idle() -> Self {
        Self {
            is_downloading: false,
            progress: 0.0,
        }
    }
}

#[derive(Debug)]
struct Slots {
    video: TrackProgress,
    audio: TrackProgress,
}

/// Shared download state, one slot per [`TrackKind`].
///
/// Slots are independent: video and audio may download concurrently, but a
/// second pass for a kind already downloading is rejected by `try_begin`.
/// State is never persisted; a new session starts idle.
#[derive(Clone, Debug)]
pub struct SharedDownloadState {
    inner: Arc<RwLock<Slots>>,
}

impl SharedDownloadState {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Slots {
                video: TrackProgress::idle(),
                audio: TrackProgress::idle(),
            })),
        }
    }

    pub fn snapshot(&self, kind: TrackKind) -> TrackProgress {
        let slots = self.inner.read();
        match kind {
            TrackKind::Video => slots.video,
            TrackKind::Audio => slots.audio,
        }
    }

    fn with_slot<R>(&self, kind: TrackKind, f: impl FnOnce(&mut TrackProgress) -> R) -> R {
        let mut slots = self.inner.write();
        let slot = match kind {
            TrackKind::Video => &mut slots.video,
            TrackKind::Audio => &mut slots.audio,
        };
        f(slot)
    }

    /// Claims the slot for a new pass. Returns `false` if a pass is already
    /// running for this kind — the guard against overlapping downloads.
    pub(crate) fn try_begin(&self, kind: TrackKind) -> bool {
        self.with_slot(kind, |slot| {
            if slot.is_downloading {
                return false;
            }
            *slot = TrackProgress {
                is_downloading: true,
                progress: 0.0,
            };
            true
        })
    }

    /// Advances progress by `increment` percent (clamped to 100) and returns
    /// the new value.
    pub(crate) fn advance(&self, kind: TrackKind, increment: f32) -> f32 {
        self.with_slot(kind, |slot| {
            slot.progress = (slot.progress + increment).min(100.0);
            slot.progress
        })
    }

    /// Pins the slot at completed: `{false, 100}`.
    pub(crate) fn finish(&self, kind: TrackKind) {
        self.with_slot(kind, |slot| {
            *slot = TrackProgress {
                is_downloading: false,
                progress: 100.0,
            };
        });
    }

    /// Resets the slot after a failed pass so the caller can re-initiate.
    pub(crate) fn fail(&self, kind: TrackKind) {
        self.with_slot(kind, |slot| {
            *slot = TrackProgress::idle();
        });
    }
}

impl Default for SharedDownloadState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use rstest::*;

    use super::*;

    #[rstest]
    fn starts_idle() {
        let state = SharedDownloadState::new();
        let snap = state.snapshot(TrackKind::Video);
        assert!(!snap.is_downloading);
        assert_eq!(snap.progress, 0.0);
    }

    #[rstest]
    fn try_begin_rejects_second_pass() {
        let state = SharedDownloadState::new();

        assert!(state.try_begin(TrackKind::Video));
        assert!(!state.try_begin(TrackKind::Video));
    }

    #[rstest]
    fn slots_are_independent() {
        let state = SharedDownloadState::new();

        assert!(state.try_begin(TrackKind::Video));
        assert!(state.try_begin(TrackKind::Audio));
        assert!(state.snapshot(TrackKind::Video).is_downloading);
        assert!(state.snapshot(TrackKind::Audio).is_downloading);
    }

    #[rstest]
    fn advance_is_monotonic_and_clamped() {
        let state = SharedDownloadState::new();
        state.try_begin(TrackKind::Video);

        assert_eq!(state.advance(TrackKind::Video, 40.0), 40.0);
        assert_eq!(state.advance(TrackKind::Video, 40.0), 80.0);
        assert_eq!(state.advance(TrackKind::Video, 40.0), 100.0);
    }

    #[rstest]
    fn finish_pins_completed_state() {
        let state = SharedDownloadState::new();
        state.try_begin(TrackKind::Audio);
        state.advance(TrackKind::Audio, 33.0);
        state.finish(TrackKind::Audio);

        let snap = state.snapshot(TrackKind::Audio);
        assert!(!snap.is_downloading);
        assert_eq!(snap.progress, 100.0);
    }

    #[rstest]
    fn fail_resets_for_reinitiation() {
        let state = SharedDownloadState::new();
        state.try_begin(TrackKind::Video);
        state.advance(TrackKind::Video, 50.0);
        state.fail(TrackKind::Video);

        let snap = state.snapshot(TrackKind::Video);
        assert!(!snap.is_downloading);
        assert_eq!(snap.progress, 0.0);

        // A new pass can begin after failure.
        assert!(state.try_begin(TrackKind::Video));
    }
}
