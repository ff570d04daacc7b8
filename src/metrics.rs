use metrics::{counter, gauge};

// ── Metric names ────────────────────────────────────────────────────────

/// Ad breaks currently loaded for the active stream
pub const AD_BREAKS_LOADED: &str = "stitchplay_ad_breaks_loaded";
/// Ad breaks that reached the completed state, by cause
pub const AD_BREAKS_COMPLETED: &str = "stitchplay_ad_breaks_completed_total";
/// Interactive ad experiences started
pub const AD_BREAKS_STARTED: &str = "stitchplay_ad_breaks_started_total";
/// Ad-free credits earned through interaction
pub const AD_CREDITS: &str = "stitchplay_ad_credits_total";
/// Resolved seeks, by whether they cross a stitched ad boundary
pub const SEEKS_RESOLVED: &str = "stitchplay_seeks_resolved_total";
/// Cue-point loads rejected as invalid
pub const CUE_LOADS_REJECTED: &str = "stitchplay_cue_loads_rejected_total";

// ── Recording helpers ───────────────────────────────────────────────────

/// Update the loaded ad break count for the active stream
pub fn set_ad_breaks_loaded(count: usize) {
    gauge!(AD_BREAKS_LOADED).set(count as f64);
}

/// Record an ad break reaching the completed state
///
/// `cause` is one of "viewed", "skipped", "credit".
pub fn record_break_completed(cause: &'static str) {
    counter!(AD_BREAKS_COMPLETED, "cause" => cause).increment(1);
}

/// Record an interactive ad experience starting
pub fn record_break_started() {
    counter!(AD_BREAKS_STARTED).increment(1);
}

/// Record an ad-free credit earned
pub fn record_ad_credit() {
    counter!(AD_CREDITS).increment(1);
}

/// Record a resolved seek
pub fn record_seek(crosses_ad_boundary: bool) {
    let crossing = if crosses_ad_boundary { "ad_boundary" } else { "none" };
    counter!(SEEKS_RESOLVED, "crossing" => crossing).increment(1);
}

/// Record a rejected cue-point load
pub fn record_cue_load_rejected() {
    counter!(CUE_LOADS_REJECTED).increment(1);
}
