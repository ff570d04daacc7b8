//! Raw ↔ content time mapping for stitched streams
//!
//! Ad videos are stitched into the main video, so the media element's "raw"
//! timeline includes every ad. These functions translate between that raw
//! timeline and the "content" timeline the viewer perceives, with ad
//! durations discounted.

use crate::timeline::breaks::BreakList;

/// Map a raw video time to the perceived content time
///
/// One accumulation pass serves both display variants:
/// - `skip_ads = true`: where the viewer is in the story. Inside a break the
///   content position freezes at the break's start-equivalent content time.
///   Used for the progress bar and duration display.
/// - `skip_ads = false`: where the viewer is inside the ad. Within the
///   fallback portion of a break this returns the position relative to the
///   fallback video's start. Used for the ad countdown display.
///
/// Outside any break the two variants agree.
pub fn content_time_at(breaks: &BreakList, raw_time: f64, skip_ads: bool) -> f64 {
    let mut result = raw_time;
    for ab in breaks.iter() {
        if raw_time < ab.start_time {
            break; // future ads don't affect things
        }
        if ab.contains(raw_time) {
            if !skip_ads && raw_time >= ab.fallback_start_time() {
                // Show the position within the fallback ad video.
                return raw_time - ab.fallback_start_time();
            }
            // Correct to show the content position at the ad break start.
            return result - (raw_time - ab.start_time);
        }
        // Fully behind us: discount the ad duration.
        result -= ab.duration();
    }
    result
}

/// Map a content time back to the raw timeline
///
/// Adds the full duration of every break whose content-equivalent start is
/// at or before the target. Exact inverse of
/// `content_time_at(_, skip_ads = true)` for points outside any break.
pub fn raw_time_for_content(breaks: &BreakList, content_time: f64) -> f64 {
    let mut result = content_time;
    let mut prior_durations = 0.0;
    for ab in breaks.iter() {
        let content_start = ab.start_time - prior_durations;
        if content_time < content_start {
            break;
        }
        if content_start < content_time {
            result += ab.duration();
        }
        prior_durations += ab.duration();
    }
    result
}

/// The duration the control surface should display at a raw time
///
/// Inside a break the progress bar tracks the fallback ad video, so the
/// break's fallback duration is returned. Otherwise this is the total
/// content length with all ad time discounted.
pub fn content_duration_at(breaks: &BreakList, raw_time: f64, media_duration: f64) -> f64 {
    match breaks.break_at(raw_time) {
        Some(ab) => ab.fallback_duration(),
        None => content_time_at(breaks, media_duration, true),
    }
}

/// Format seconds as `mm:ss`, or `h:mm:ss` past an hour
pub fn time_label(seconds: f64) -> String {
    let total = seconds.round().max(0.0) as u64;
    let secs = total % 60;
    let mins = (total / 60) % 60;
    let hours = total / 3600;
    if hours >= 1 {
        format!("{}:{:02}:{:02}", hours, mins, secs)
    } else {
        format!("{:02}:{:02}", mins, secs)
    }
}

/// Composite display of a raw time for log messages
///
/// Shows the content time, the position within the containing ad break if
/// there is one, and the raw time itself.
pub fn time_debug_display(breaks: &BreakList, raw_time: f64) -> String {
    let mut result = time_label(content_time_at(breaks, raw_time, true));
    if let Some(ab) = breaks.break_at(raw_time) {
        let ad_time = content_time_at(breaks, raw_time, false);
        result.push_str(&format!(" (adBreak {} {})", ab.index, time_label(ad_time)));
    }
    result.push_str(&format!(" (raw {})", time_label(raw_time)));
    result
}
