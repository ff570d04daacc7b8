use crate::error::{PlayerError, Result};
use serde::{Deserialize, Serialize};

/// A raw-timeline ad window as delivered by the ad-decisioning layer
///
/// Cue points arrive once per stream load, already expressed on the stitched
/// (raw) timeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CuePoint {
    pub start: f64,
    pub end: f64,
}

/// A single stitched ad break: immutable raw-time bounds plus mutable
/// lifecycle flags
///
/// The break covers one or more fallback ad videos stitched into the main
/// video, optionally preceded by an interactive-ad placeholder segment. The
/// placeholder length is only known once the interactive experience starts,
/// so it is zero at construction and set from the lifecycle event.
#[derive(Debug, Clone, PartialEq)]
pub struct AdBreak {
    /// Position in the ordered break list (0-based)
    pub index: usize,
    /// Raw-timeline start of the break (inclusive)
    pub start_time: f64,
    /// Raw-timeline end of the break (exclusive)
    pub end_time: f64,
    /// Length of the interactive placeholder segment preceding the fallback
    /// video within the break
    pub placeholder_duration: f64,
    /// True once playback entered the break or an interactive experience
    /// began for it
    pub started: bool,
    /// Terminal: viewed fully, skipped, or credit earned. Never reverts.
    pub completed: bool,
}

impl AdBreak {
    fn new(cue: CuePoint, index: usize) -> Self {
        Self {
            index,
            start_time: cue.start,
            end_time: cue.end,
            placeholder_duration: 0.0,
            started: false,
            completed: false,
        }
    }

    /// Full raw-timeline length of the break
    pub fn duration(&self) -> f64 {
        self.end_time - self.start_time
    }

    /// Raw time where the fallback ad video begins
    pub fn fallback_start_time(&self) -> f64 {
        self.start_time + self.placeholder_duration
    }

    /// Length of the fallback ad video portion
    pub fn fallback_duration(&self) -> f64 {
        self.duration() - self.placeholder_duration
    }

    /// Whether the raw time falls inside this break
    pub fn contains(&self, raw_time: f64) -> bool {
        self.start_time <= raw_time && raw_time < self.end_time
    }
}

/// Ordered, non-overlapping ad breaks for one stitched stream
///
/// Owned by the player and replaced wholesale when a new cue-point set
/// loads. Only the lifecycle flags mutate in place; the temporal structure
/// never changes after validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BreakList {
    breaks: Vec<AdBreak>,
}

impl BreakList {
    /// Build a validated break list from collaborator cue points
    ///
    /// Rejects inverted windows (`start >= end`), unsorted input and
    /// overlapping breaks. Indices are assigned by position.
    pub fn from_cue_points(cues: &[CuePoint]) -> Result<Self> {
        let mut breaks = Vec::with_capacity(cues.len());
        let mut prev_end = f64::NEG_INFINITY;

        for (index, cue) in cues.iter().enumerate() {
            if !(cue.start < cue.end) {
                // also catches NaN bounds
                return Err(PlayerError::InvalidCuePoints(format!(
                    "cue #{index} has start {} >= end {}",
                    cue.start, cue.end
                )));
            }
            if cue.start < prev_end {
                return Err(PlayerError::InvalidCuePoints(format!(
                    "cue #{index} starting at {} overlaps the previous break ending at {}",
                    cue.start, prev_end
                )));
            }
            prev_end = cue.end;
            breaks.push(AdBreak::new(*cue, index));
        }

        Ok(Self { breaks })
    }

    pub fn len(&self) -> usize {
        self.breaks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.breaks.is_empty()
    }

    /// The earliest break, if any (used for the pre-roll floor)
    pub fn first(&self) -> Option<&AdBreak> {
        self.breaks.first()
    }

    pub fn get(&self, index: usize) -> Option<&AdBreak> {
        self.breaks.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut AdBreak> {
        self.breaks.get_mut(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AdBreak> {
        self.breaks.iter()
    }

    /// Find the unique break containing the raw time, if any
    ///
    /// Linear scan; break counts are tens at most. Uniqueness follows from
    /// the non-overlap invariant enforced at construction.
    pub fn break_at(&self, raw_time: f64) -> Option<&AdBreak> {
        self.breaks.iter().find(|ab| ab.contains(raw_time))
    }

    /// Mutable variant of [`break_at`](Self::break_at) for flag updates
    pub fn break_at_mut(&mut self, raw_time: f64) -> Option<&mut AdBreak> {
        self.breaks.iter_mut().find(|ab| ab.contains(raw_time))
    }
}
