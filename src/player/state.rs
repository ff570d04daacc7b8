use tracing::{debug, info, warn};

use crate::config::PlayerConfig;
use crate::error::{PlayerError, Result};
use crate::metrics;
use crate::player::events::{AdOutcome, Command, PlayerEvent};
use crate::seek::{self, SeekPlan};
use crate::timeline::{AdBreak, BreakList, CuePoint, mapper};

/// Top-level playback lifecycle
///
/// The in-ad-break condition is derived from the current raw time, not a
/// stored state; it enters whenever a break contains the current position
/// and exits when none does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Idle,
    Loading,
    Playing,
    Paused,
    Stopped,
}

/// The playback state machine
///
/// Owns the break list, the current raw time and pending seek state. All
/// mutation flows through [`handle`](Self::handle), one event at a time, so
/// a recorded event sequence replays deterministically. Commands returned
/// from `handle` are fire-and-forget instructions for the external media
/// driver; the intended seek target is recorded optimistically and
/// reconciled on the next real time update.
#[derive(Debug)]
pub struct Player {
    config: PlayerConfig,
    state: PlaybackState,
    breaks: BreakList,
    media_attached: bool,
    media_duration: Option<f64>,
    current_raw: Option<f64>,
    seek_target: Option<f64>,
    /// Raw position to apply once a media element attaches.
    pending_start: f64,
}

impl Player {
    pub fn new(config: PlayerConfig) -> Self {
        Self {
            config,
            state: PlaybackState::Idle,
            breaks: BreakList::default(),
            media_attached: false,
            media_duration: None,
            current_raw: None,
            seek_target: None,
            pending_start: 0.0,
        }
    }

    // ── Queries for the control surface ─────────────────────────────────

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn breaks(&self) -> &BreakList {
        &self.breaks
    }

    /// Pending seek target, if a seek command is still in flight
    pub fn seek_target(&self) -> Option<f64> {
        self.seek_target
    }

    pub fn media_duration(&self) -> Option<f64> {
        self.media_duration
    }

    /// Current raw time, or the pending start position before any tick
    pub fn current_raw_time(&self) -> f64 {
        self.current_raw.unwrap_or(self.pending_start)
    }

    /// Mapped content time for display
    ///
    /// Tracks the pending seek target while one is in flight, so the seek
    /// bar moves before the media element catches up. Inside an ad break's
    /// fallback portion this is the position within the ad.
    pub fn current_content_time(&self) -> f64 {
        let raw = self.seek_target.unwrap_or_else(|| self.current_raw_time());
        mapper::content_time_at(&self.breaks, raw, false)
    }

    /// Mapped content duration for display
    pub fn current_content_duration(&self) -> f64 {
        mapper::content_duration_at(
            &self.breaks,
            self.current_raw_time(),
            self.media_duration.unwrap_or(0.0),
        )
    }

    pub fn ad_break_at_current_time(&self) -> Option<&AdBreak> {
        self.breaks.break_at(self.current_raw_time())
    }

    pub fn in_ad_break(&self) -> bool {
        self.ad_break_at_current_time().is_some()
    }

    // ── Event handling ──────────────────────────────────────────────────

    /// Apply one event and return the commands for the media driver
    pub fn handle(&mut self, event: PlayerEvent) -> Vec<Command> {
        match event {
            PlayerEvent::CuePointsLoaded { cues } => {
                if let Err(e) = self.load_cue_points(&cues) {
                    warn!("rejected cue points, keeping prior break list: {e}");
                }
                Vec::new()
            }
            PlayerEvent::MediaAttached { at } => self.on_media_attached(at),
            PlayerEvent::MediaDetached => self.on_media_detached(),
            PlayerEvent::PlaybackStarted => self.on_playback_started(),
            PlayerEvent::DurationChanged { duration } => {
                if duration > 0.0 && self.media_duration.is_none() {
                    self.media_duration = Some(duration);
                }
                Vec::new()
            }
            PlayerEvent::TimeUpdate { raw_time } => self.on_time_update(raw_time),
            PlayerEvent::PlayRequested => self.request_play(),
            PlayerEvent::PauseRequested => self.request_pause(),
            PlayerEvent::TogglePlayPause => {
                if self.state == PlaybackState::Playing {
                    self.request_pause()
                } else {
                    self.request_play()
                }
            }
            PlayerEvent::SeekRequested { raw_time } => {
                let plan = seek::resolve(
                    &self.breaks,
                    self.current_raw_time(),
                    raw_time,
                    self.media_duration,
                    false,
                );
                self.apply_seek(plan)
            }
            PlayerEvent::StepRequested { forward } => self.on_step(forward),
            PlayerEvent::ScrubRequested { content_ratio } => self.on_scrub(content_ratio),
            PlayerEvent::AdLifecycle {
                break_index,
                outcome,
            } => self.on_ad_lifecycle(break_index, outcome),
            PlayerEvent::Stop => self.stop(),
        }
    }

    /// Replace the break list from a fresh cue-point set
    ///
    /// Invalid input keeps the prior list untouched; a misbehaving upstream
    /// must degrade to "no new ad breaks", never block playback. The
    /// replacement is atomic: flags and the pending seek target reset
    /// together with the temporal structure.
    pub fn load_cue_points(&mut self, cues: &[CuePoint]) -> Result<()> {
        let list = BreakList::from_cue_points(cues).inspect_err(|_| {
            metrics::record_cue_load_rejected();
        })?;

        let starts: Vec<String> = list
            .iter()
            .map(|ab| mapper::time_label(mapper::content_time_at(&list, ab.start_time, true)))
            .collect();
        info!("loaded {} ad breaks at: {}", list.len(), starts.join(", "));

        metrics::set_ad_breaks_loaded(list.len());
        self.breaks = list;
        self.seek_target = None;
        Ok(())
    }

    fn on_media_attached(&mut self, at: Option<f64>) -> Vec<Command> {
        self.media_attached = true;
        if let Some(at) = at {
            self.pending_start = at;
        }
        let start = self.pending_start;
        self.current_raw = Some(start);
        if matches!(self.state, PlaybackState::Idle | PlaybackState::Stopped) {
            self.state = PlaybackState::Loading;
        }
        info!(
            "media attached at {}",
            mapper::time_debug_display(&self.breaks, start)
        );
        vec![
            Command::Seek {
                raw_time: start,
                crosses_ad_boundary: false,
            },
            Command::Play,
        ]
    }

    fn on_media_detached(&mut self) -> Vec<Command> {
        self.media_attached = false;
        self.pending_start = self.seek_target.or(self.current_raw).unwrap_or(0.0);
        self.seek_target = None;
        self.state = PlaybackState::Idle;
        info!(
            "media detached, resume position {}",
            mapper::time_label(self.pending_start)
        );
        Vec::new()
    }

    fn on_playback_started(&mut self) -> Vec<Command> {
        if self.state != PlaybackState::Playing {
            info!(
                "playback started at {}",
                mapper::time_debug_display(&self.breaks, self.current_raw_time())
            );
            self.state = PlaybackState::Playing;
        }
        Vec::new()
    }

    /// Tick transition for a raw-time progress update
    ///
    /// Must be idempotent and side-effect-free for an unchanged time; media
    /// elements emit redundant updates at high frequency.
    fn on_time_update(&mut self, raw_time: f64) -> Vec<Command> {
        if self.current_raw == Some(raw_time) {
            return Vec::new();
        }
        self.current_raw = Some(raw_time);
        self.seek_target = None;
        debug!(
            "video time: {}",
            mapper::time_debug_display(&self.breaks, raw_time)
        );

        let tolerance = self.config.boundary_tolerance_secs;
        let hit = self
            .breaks
            .break_at(raw_time)
            .map(|ab| (ab.index, ab.started, ab.completed, ab.start_time, ab.end_time));

        if let Some((index, started, completed, start_time, end_time)) = hit {
            if completed {
                if (start_time - raw_time).abs() <= tolerance {
                    // Landed back inside a resolved break via a coarse
                    // step: skip over it instead of replaying.
                    return self.skip_past_break(index, "skipped");
                }
            } else if !started {
                // The ad-begin notification from the decisioning layer
                // drives the started transition, not time alone; the exact
                // start must coincide with creative load.
            } else if (end_time - raw_time).abs() <= tolerance {
                if let Some(ab) = self.breaks.get_mut(index) {
                    ab.completed = true;
                }
                metrics::record_break_completed("viewed");
                info!("ad break {index} viewed to completion");
            }
        }

        Vec::new()
    }

    fn request_play(&mut self) -> Vec<Command> {
        if !self.media_attached {
            debug!("{}", PlayerError::MediaUnavailable);
            return Vec::new();
        }
        if self.state == PlaybackState::Paused {
            self.state = PlaybackState::Playing;
        }
        debug!(
            "play at {}",
            mapper::time_debug_display(&self.breaks, self.current_raw_time())
        );
        vec![Command::Play]
    }

    fn request_pause(&mut self) -> Vec<Command> {
        if !self.media_attached {
            debug!("{}", PlayerError::MediaUnavailable);
            return Vec::new();
        }
        if self.state == PlaybackState::Playing {
            self.state = PlaybackState::Paused;
        }
        debug!(
            "paused at {}",
            mapper::time_debug_display(&self.breaks, self.current_raw_time())
        );
        vec![Command::Pause]
    }

    fn on_step(&mut self, forward: bool) -> Vec<Command> {
        if !self.media_attached {
            // User stepping should only happen on an active video.
            return Vec::new();
        }
        match seek::step(
            &self.breaks,
            &self.config,
            self.current_raw_time(),
            self.seek_target,
            self.media_duration,
            forward,
        ) {
            Some(plan) => self.apply_seek(plan),
            None => Vec::new(),
        }
    }

    fn on_scrub(&mut self, content_ratio: f64) -> Vec<Command> {
        if self.in_ad_break() {
            // No user seeking during ad playback.
            debug!("scrub ignored during ad break");
            return Vec::new();
        }
        let ratio = content_ratio.clamp(0.0, 1.0);
        let content_target = self.current_content_duration() * ratio;
        let raw_target = mapper::raw_time_for_content(&self.breaks, content_target);
        let plan = seek::resolve(
            &self.breaks,
            self.current_raw_time(),
            raw_target,
            self.media_duration,
            false,
        );
        self.apply_seek(plan)
    }

    fn on_ad_lifecycle(&mut self, break_index: usize, outcome: AdOutcome) -> Vec<Command> {
        if self.breaks.get(break_index).is_none() {
            warn!("ignoring {}", PlayerError::UnknownAdBreak(break_index));
            return Vec::new();
        }
        match outcome {
            AdOutcome::Started {
                placeholder_duration,
            } => self.on_ad_started(break_index, placeholder_duration),
            AdOutcome::CreditEarned => {
                info!("ad break {break_index} earned an ad-free credit");
                metrics::record_ad_credit();
                self.skip_past_break(break_index, "credit")
            }
            AdOutcome::NoCredit => self.resume_fallback(break_index),
            AdOutcome::UserAbort => {
                info!("viewer backed out of interactive ad, cancelling stream");
                self.stop()
            }
        }
    }

    fn on_ad_started(&mut self, index: usize, placeholder_duration: f64) -> Vec<Command> {
        let (started, completed) = match self.breaks.get(index) {
            Some(ab) => (ab.started, ab.completed),
            None => return Vec::new(),
        };
        if completed {
            // Ignore ads already completed; skip over the break again.
            return self.skip_past_break(index, "skipped");
        }
        if started {
            return Vec::new(); // ad already processed
        }
        if let Some(ab) = self.breaks.get_mut(index) {
            ab.started = true;
            ab.placeholder_duration = placeholder_duration.clamp(0.0, ab.duration());
        }
        metrics::record_break_started();
        info!("interactive ad started for break {index}");
        // The interactive experience renders over the paused video; the
        // resume position is decided by the outcome event.
        vec![Command::Pause]
    }

    /// Mark a break completed and seek just past its end
    fn skip_past_break(&mut self, index: usize, cause: &'static str) -> Vec<Command> {
        let target = match self.breaks.get_mut(index) {
            Some(ab) => {
                if !ab.completed {
                    ab.completed = true;
                    metrics::record_break_completed(cause);
                }
                ab.end_time + self.config.post_break_padding_secs
            }
            None => return Vec::new(),
        };
        info!("ad break {index} skipped to {}", mapper::time_label(target));
        let mut commands = self.raw_seek(target);
        commands.push(Command::Play);
        commands
    }

    /// Resume a break at its fallback ad video
    fn resume_fallback(&mut self, index: usize) -> Vec<Command> {
        let target = match self.breaks.get(index) {
            Some(ab) => ab.fallback_start_time(),
            None => return Vec::new(),
        };
        info!("ad break {index} resumed from {}", mapper::time_label(target));
        let mut commands = self.raw_seek(target);
        commands.push(Command::Play);
        commands
    }

    /// Internal seek that may land inside a break (resumption targets)
    fn raw_seek(&mut self, raw_time: f64) -> Vec<Command> {
        let plan = seek::resolve(
            &self.breaks,
            self.current_raw_time(),
            raw_time,
            self.media_duration,
            true,
        );
        self.apply_seek(plan)
    }

    fn apply_seek(&mut self, plan: SeekPlan) -> Vec<Command> {
        self.seek_target = Some(plan.target);
        metrics::record_seek(plan.crosses_ad_boundary);
        debug!(
            "seek to {}",
            mapper::time_debug_display(&self.breaks, plan.target)
        );
        if self.media_attached {
            vec![Command::Seek {
                raw_time: plan.target,
                crosses_ad_boundary: plan.crosses_ad_boundary,
            }]
        } else {
            // No media present yet: record the desired position for when
            // it attaches.
            self.pending_start = plan.target;
            Vec::new()
        }
    }

    fn stop(&mut self) -> Vec<Command> {
        if self.state == PlaybackState::Stopped {
            return Vec::new();
        }
        info!("stopping playback");
        self.state = PlaybackState::Stopped;
        self.seek_target = None;
        vec![Command::Stop]
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new(PlayerConfig::default())
    }
}
