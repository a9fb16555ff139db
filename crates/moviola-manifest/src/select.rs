//! Representation selection: a one-time static pick, not adaptive streaming.

use crate::model::Representation;
use crate::error::{ManifestError, ManifestResult};

/// Common quality ceilings, by frame height.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaxHeight {
    Uhd4k,
    Qhd,
    FullHd,
    Hd,
}

impl MaxHeight {
    pub fn pixels(self) -> u32 {
        match self {
            MaxHeight::Uhd4k => 2160,
            MaxHeight::Qhd => 1440,
            MaxHeight::FullHd => 1080,
            MaxHeight::Hd => 720,
        }
    }
}

impl From<MaxHeight> for u32 {
    fn from(h: MaxHeight) -> u32 {
        h.pixels()
    }
}

/// Picks the video representation with the highest `avg_bitrate` among those
/// at or below the height ceiling.
///
/// No ceiling means no filtering. A ceiling that eliminates every candidate
/// (including candidates with no advertised height) is an error, never a
/// silent fallback to the unfiltered set: exceeding an explicit quality
/// constraint is the worse surprise.
pub fn best_video<'a>(
    representations: &'a [Representation],
    max_height: Option<u32>,
) -> ManifestResult<&'a Representation> {
    let mut candidates: Vec<&Representation> = match max_height {
        Some(ceiling) => representations
            .iter()
            .filter(|r| r.height.is_some_and(|h| h <= ceiling))
            .collect(),
        None => representations.iter().collect(),
    };

    if candidates.is_empty() {
        return Err(ManifestError::NoEligibleRepresentation { max_height });
    }

    // Stable ascending sort, take the last: on an avg_bitrate tie the later
    // manifest entry wins, matching the producer's own ordering.
    candidates.sort_by_key(|r| r.avg_bitrate);
    Ok(candidates[candidates.len() - 1])
}

/// Picks the audio representation with the highest `avg_bitrate`.
///
/// Audio has no quality ceiling; an empty list yields `None` (audio is
/// optional throughout the pipeline).
pub fn best_audio(representations: &[Representation]) -> Option<&Representation> {
    let mut candidates: Vec<&Representation> = representations.iter().collect();
    if candidates.is_empty() {
        return None;
    }

    candidates.sort_by_key(|r| r.avg_bitrate);
    Some(candidates[candidates.len() - 1])
}

#[cfg(test)]
mod tests {
    use rstest::*;

    use super::*;

    fn rep(id: &str, avg_bitrate: u64, height: Option<u32>) -> Representation {
        Representation {
            id: Some(id.to_string()),
            base_url: format!("{id}/"),
            format: None,
            mime_type: None,
            codecs: None,
            bitrate: None,
            avg_bitrate,
            avg_id: None,
            duration: None,
            max_segment_duration: None,
            init_segment: "AAAA".to_string(),
            index_segment: None,
            segments: vec![],
            width: None,
            height,
            framerate: None,
            channels: None,
            sample_rate: None,
            audio_primary: None,
        }
    }

    #[rstest]
    #[case::ceiling_above_everything(Some(2160), "v-1080")]
    #[case::no_ceiling(None, "v-1080")]
    #[case::ceiling_cuts_top(Some(720), "v-720")]
    fn best_video_picks_max_avg_bitrate_under_ceiling(
        #[case] max_height: Option<u32>,
        #[case] expected: &str,
    ) {
        let reps = vec![
            rep("v-360", 300, Some(360)),
            rep("v-720", 900, Some(720)),
            rep("v-1080", 1800, Some(1080)),
        ];

        let best = best_video(&reps, max_height).unwrap();
        assert_eq!(best.id.as_deref(), Some(expected));
    }

    #[rstest]
    fn best_video_fails_when_ceiling_eliminates_all() {
        let reps = vec![rep("v-1080", 1800, Some(1080)), rep("v-720", 900, Some(720))];

        let error = best_video(&reps, Some(480)).unwrap_err();
        assert!(matches!(
            error,
            ManifestError::NoEligibleRepresentation {
                max_height: Some(480)
            }
        ));
    }

    #[rstest]
    fn best_video_fails_on_empty_list() {
        assert!(best_video(&[], None).is_err());
    }

    #[rstest]
    fn representation_without_height_fails_the_filter() {
        let reps = vec![rep("v-raw", 5000, None), rep("v-480", 400, Some(480))];

        let best = best_video(&reps, Some(1080)).unwrap();
        assert_eq!(best.id.as_deref(), Some("v-480"));

        // ...but survives when no ceiling is set.
        let best = best_video(&reps, None).unwrap();
        assert_eq!(best.id.as_deref(), Some("v-raw"));
    }

    #[rstest]
    fn best_video_tie_resolves_to_later_entry() {
        let reps = vec![rep("first", 900, Some(720)), rep("second", 900, Some(720))];
        let best = best_video(&reps, None).unwrap();
        assert_eq!(best.id.as_deref(), Some("second"));
    }

    #[rstest]
    fn best_audio_picks_max_avg_bitrate() {
        let reps = vec![rep("a-64", 64_000, None), rep("a-128", 128_000, None)];
        let best = best_audio(&reps).unwrap();
        assert_eq!(best.id.as_deref(), Some("a-128"));
    }

    #[rstest]
    fn best_audio_of_empty_is_none() {
        assert!(best_audio(&[]).is_none());
    }
}
