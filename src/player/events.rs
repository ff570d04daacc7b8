use serde::{Deserialize, Serialize};

use crate::timeline::CuePoint;

/// Outcome notifications from the interactive-ad collaborator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum AdOutcome {
    /// The interactive experience began; the placeholder segment length
    /// becomes known from the creative.
    Started { placeholder_duration: f64 },
    /// Sufficient interaction: the viewer earned an ad-free credit and the
    /// fallback video is skipped.
    CreditEarned,
    /// The experience concluded without credit; the fallback ad video plays.
    NoCredit,
    /// The viewer backed out of the choice card, cancelling the stream.
    UserAbort,
}

/// Every input the player core reacts to
///
/// Events are processed strictly in arrival order by a single transition
/// function, so a recorded sequence replays deterministically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PlayerEvent {
    /// Cue points for a new stream load. Replaces the break list wholesale.
    CuePointsLoaded { cues: Vec<CuePoint> },
    /// A media element is now attached, optionally at a known position.
    MediaAttached { at: Option<f64> },
    /// The media element went away (teardown or platform workaround).
    MediaDetached,
    /// First playing notification from the media element.
    PlaybackStarted,
    /// The media duration became known.
    DurationChanged { duration: f64 },
    /// Raw playback-time progress tick.
    TimeUpdate { raw_time: f64 },
    PlayRequested,
    PauseRequested,
    TogglePlayPause,
    /// Direct seek to a raw time (ad-aware).
    SeekRequested { raw_time: f64 },
    /// Step seek by the nominal step size.
    StepRequested { forward: bool },
    /// Scrub to a position on the content timeline, as a 0..=1 ratio of the
    /// displayed duration.
    ScrubRequested { content_ratio: f64 },
    /// Lifecycle notification for a specific ad break.
    AdLifecycle { break_index: usize, outcome: AdOutcome },
    /// Tear the session down.
    Stop,
}

/// Imperative commands for the external media driver
///
/// Fire-and-forget: the core records the intended seek target for display
/// and reconciles on the next real time update.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Command {
    /// Seek the media element to a raw time. When the seek crosses a
    /// stitched ad boundary the driver should detach and reattach the media
    /// source; seeking across boundaries in place is failure-prone.
    Seek {
        raw_time: f64,
        crosses_ad_boundary: bool,
    },
    Play,
    Pause,
    Stop,
}
