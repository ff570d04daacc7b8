//! Seek resolution against the ad-break list
//!
//! Translates a user's seek intent into the final raw time to command the
//! media element. Completed breaks are seeked through freely; uncompleted
//! breaks pin the target to their start so the ad plays instead of being
//! stepped over; a pre-roll break that starts at or before zero can never be
//! seeked before.

use tracing::debug;

use crate::config::PlayerConfig;
use crate::timeline::{BreakList, mapper};

/// Outcome of resolving a requested seek
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeekPlan {
    /// Final raw time to command the media element
    pub target: f64,
    /// Whether the seek crosses a stitched ad boundary. Crossing seeks are
    /// more failure-prone; the media driver uses this to decide whether a
    /// detach/reattach workaround is needed.
    pub crosses_ad_boundary: bool,
}

/// Resolve a requested raw seek target against the break list
///
/// The request is first clamped: the upper bound is the media duration when
/// known, and the lower bound is the first break's duration when that break
/// is a mandatory pre-roll (starts at or before zero). The clamped target is
/// then scanned against every break between the current position and the
/// target:
///
/// - a completed break containing the running target pushes it past the
///   break's end, and the scan continues so chained completed breaks keep
///   skipping;
/// - the first uncompleted break crossed pins the target to its start,
///   forcing ad playback;
/// - the pre-roll floor is re-applied after adjustment, so forced replay can
///   never land before the mandatory pre-roll's end.
///
/// With `ignore_ads` (internal resumption seeks into a break) the ad
/// adjustment and pre-roll floor are both bypassed; only boundary crossing
/// is still reported.
pub fn resolve(
    breaks: &BreakList,
    current_raw: f64,
    requested_raw: f64,
    media_duration: Option<f64>,
    ignore_ads: bool,
) -> SeekPlan {
    // We only have a max target if the media duration is known.
    let max_target = match media_duration {
        Some(d) if d > 0.0 => d,
        _ => requested_raw,
    };

    // Don't allow seeking back before a mandatory pre-roll.
    let min_target = match breaks.first() {
        Some(first) if first.start_time <= 0.0 && !ignore_ads => first.duration(),
        _ => 0.0,
    };

    let target = requested_raw.min(max_target).max(min_target);

    // Skip over completed ads, but stop on uncompleted ones to force ad
    // playback.
    let mut adjusted = target;
    let mut crossing = false;

    if current_raw < target {
        // Seeking forward
        for ab in breaks.iter() {
            if adjusted < ab.start_time {
                break; // ignore future ads after the seek target
            }
            if ab.end_time <= current_raw {
                continue; // ignore past ads
            }
            crossing = true;
            if ab.completed {
                if ab.contains(adjusted) {
                    // Landed within the break on a step: push past it and
                    // keep scanning in case the next break follows directly.
                    adjusted += ab.duration();
                }
            } else {
                // Play the ad instead of stepping over it.
                adjusted = ab.start_time;
                break;
            }
        }
    } else {
        // Seeking backwards
        for ab in breaks.iter().rev() {
            if current_raw <= ab.start_time {
                continue; // ignore unplayed future ads
            }
            if ab.end_time < adjusted {
                break; // ignore ads before the seek target
            }
            crossing = true;
            if ab.completed {
                if ab.contains(adjusted) {
                    adjusted -= ab.duration();
                }
            } else {
                adjusted = ab.start_time;
                break;
            }
        }
    }

    let target = if ignore_ads {
        target
    } else {
        // The pre-roll floor wins over forced replay of the pre-roll itself.
        adjusted.max(min_target)
    };

    SeekPlan {
        target,
        crosses_ad_boundary: crossing,
    }
}

/// Compute the resolved target for a step seek, or refuse it
///
/// The nominal step is the configured minimum, scaled up for long videos by
/// dividing the content duration into `seek_chunks` pieces. Steps apply to
/// the pending seek target when one exists, so repeated presses accumulate
/// before the media element catches up.
///
/// Returns `None` when the current position is inside an unresolved ad
/// break; the caller should surface the control UI instead of seeking.
pub fn step(
    breaks: &BreakList,
    config: &PlayerConfig,
    current_raw: f64,
    seek_target: Option<f64>,
    media_duration: Option<f64>,
    forward: bool,
) -> Option<SeekPlan> {
    if let Some(ab) = breaks.break_at(current_raw)
        && !ab.completed
    {
        debug!("step refused inside ad break {}", ab.index);
        return None;
    }

    let mut step_size = config.seek_step_secs;
    if let Some(duration) = media_duration.filter(|d| *d > 0.0) {
        let content_duration = mapper::content_time_at(breaks, duration, true);
        let dynamic_step = (content_duration / config.seek_chunks as f64).floor();
        step_size = step_size.max(dynamic_step);
    }
    if !forward {
        step_size = -step_size;
    }

    let step_from = seek_target.unwrap_or(current_raw);
    Some(resolve(
        breaks,
        current_raw,
        step_from + step_size,
        media_duration,
        false,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::CuePoint;

    fn breaks(points: &[(f64, f64)]) -> BreakList {
        let cues: Vec<CuePoint> = points
            .iter()
            .map(|&(start, end)| CuePoint { start, end })
            .collect();
        BreakList::from_cue_points(&cues).unwrap()
    }

    #[test]
    fn test_forward_skip_over_completed_break() {
        let mut list = breaks(&[(10.0, 20.0)]);
        list.get_mut(0).unwrap().completed = true;

        let plan = resolve(&list, 5.0, 15.0, None, false);
        assert_eq!(plan.target, 25.0);
        assert!(plan.crosses_ad_boundary);
    }

    #[test]
    fn test_forward_forced_replay_of_uncompleted_break() {
        let list = breaks(&[(10.0, 20.0)]);

        let plan = resolve(&list, 5.0, 15.0, None, false);
        assert_eq!(plan.target, 10.0);
        assert!(plan.crosses_ad_boundary);
    }

    #[test]
    fn test_forward_past_completed_break_is_untouched() {
        let mut list = breaks(&[(10.0, 20.0)]);
        list.get_mut(0).unwrap().completed = true;

        // Target already beyond the break on the raw timeline: no push.
        let plan = resolve(&list, 5.0, 30.0, None, false);
        assert_eq!(plan.target, 30.0);
        assert!(plan.crosses_ad_boundary);
    }

    #[test]
    fn test_forward_chained_completed_breaks() {
        let mut list = breaks(&[(10.0, 20.0), (20.0, 30.0)]);
        list.get_mut(0).unwrap().completed = true;
        list.get_mut(1).unwrap().completed = true;

        // 15 → pushed to 25 by break 0 → still inside break 1 → pushed to 35.
        let plan = resolve(&list, 5.0, 15.0, None, false);
        assert_eq!(plan.target, 35.0);
        assert!(plan.crosses_ad_boundary);
    }

    #[test]
    fn test_forward_stops_at_uncompleted_after_completed() {
        let mut list = breaks(&[(10.0, 20.0), (30.0, 40.0)]);
        list.get_mut(0).unwrap().completed = true;

        let plan = resolve(&list, 5.0, 35.0, None, false);
        assert_eq!(plan.target, 30.0);
        assert!(plan.crosses_ad_boundary);
    }

    #[test]
    fn test_backward_skip_over_completed_break() {
        let mut list = breaks(&[(10.0, 20.0)]);
        list.get_mut(0).unwrap().completed = true;

        let plan = resolve(&list, 25.0, 15.0, None, false);
        assert_eq!(plan.target, 5.0);
        assert!(plan.crosses_ad_boundary);
    }

    #[test]
    fn test_backward_forced_replay_of_uncompleted_break() {
        let list = breaks(&[(10.0, 20.0)]);

        let plan = resolve(&list, 25.0, 15.0, None, false);
        assert_eq!(plan.target, 10.0);
        assert!(plan.crosses_ad_boundary);
    }

    #[test]
    fn test_backward_ignores_breaks_before_target() {
        let mut list = breaks(&[(10.0, 20.0)]);
        list.get_mut(0).unwrap().completed = true;

        let plan = resolve(&list, 50.0, 30.0, None, false);
        assert_eq!(plan.target, 30.0);
        assert!(!plan.crosses_ad_boundary);
    }

    #[test]
    fn test_preroll_floor() {
        let list = breaks(&[(0.0, 8.0)]);

        // Cannot seek before the mandatory pre-roll, even with a negative
        // request and even while the pre-roll is unresolved.
        let plan = resolve(&list, 0.0, -5.0, None, false);
        assert_eq!(plan.target, 8.0);
    }

    #[test]
    fn test_preroll_floor_with_completed_preroll() {
        let mut list = breaks(&[(0.0, 8.0)]);
        list.get_mut(0).unwrap().completed = true;

        let plan = resolve(&list, 20.0, -5.0, None, false);
        assert_eq!(plan.target, 8.0);
    }

    #[test]
    fn test_clamp_to_media_duration() {
        let list = breaks(&[(10.0, 20.0)]);
        let plan = resolve(&list, 50.0, 500.0, Some(120.0), false);
        assert_eq!(plan.target, 120.0);
    }

    #[test]
    fn test_no_breaks_passthrough() {
        let list = BreakList::default();
        let plan = resolve(&list, 5.0, 42.0, None, false);
        assert_eq!(plan.target, 42.0);
        assert!(!plan.crosses_ad_boundary);
    }

    #[test]
    fn test_ignore_ads_seeks_into_break() {
        let list = breaks(&[(10.0, 20.0)]);

        // Internal resumption seek lands inside the break untouched, but
        // still reports the boundary crossing.
        let plan = resolve(&list, 5.0, 14.0, None, true);
        assert_eq!(plan.target, 14.0);
        assert!(plan.crosses_ad_boundary);
    }

    #[test]
    fn test_ignore_ads_bypasses_preroll_floor() {
        let list = breaks(&[(0.0, 8.0)]);
        let plan = resolve(&list, 10.0, 2.0, None, true);
        assert_eq!(plan.target, 2.0);
    }

    #[test]
    fn test_step_default_size() {
        let list = BreakList::default();
        let config = PlayerConfig::default();

        let plan = step(&list, &config, 50.0, None, None, true).unwrap();
        assert_eq!(plan.target, 60.0);
        let plan = step(&list, &config, 50.0, None, None, false).unwrap();
        assert_eq!(plan.target, 40.0);
    }

    #[test]
    fn test_step_scales_with_content_duration() {
        let list = BreakList::default();
        let config = PlayerConfig::default();

        // 4000s / 80 chunks = 50s step.
        let plan = step(&list, &config, 100.0, None, Some(4000.0), true).unwrap();
        assert_eq!(plan.target, 150.0);
    }

    #[test]
    fn test_step_from_pending_target() {
        let list = BreakList::default();
        let config = PlayerConfig::default();

        // Repeated presses accumulate from the pending target.
        let plan = step(&list, &config, 50.0, Some(70.0), None, true).unwrap();
        assert_eq!(plan.target, 80.0);
    }

    #[test]
    fn test_step_refused_inside_unresolved_break() {
        let list = breaks(&[(10.0, 20.0)]);
        let config = PlayerConfig::default();

        assert!(step(&list, &config, 15.0, None, None, true).is_none());
    }

    #[test]
    fn test_step_allowed_inside_completed_break() {
        let mut list = breaks(&[(10.0, 20.0)]);
        list.get_mut(0).unwrap().completed = true;
        let config = PlayerConfig::default();

        let plan = step(&list, &config, 15.0, None, None, true).unwrap();
        assert_eq!(plan.target, 25.0);
    }
}
