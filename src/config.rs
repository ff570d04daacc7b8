use std::env;

/// Playback tuning knobs for the player core
///
/// Defaults match the reference CTV control surface; every value can be
/// overridden from the environment for the demo binary and field debugging.
#[derive(Clone, Debug)]
pub struct PlayerConfig {
    /// Minimum step-seek size in seconds.
    pub seek_step_secs: f64,
    /// Long videos are divided into this many chunks to derive a larger step.
    pub seek_chunks: u32,
    /// Tolerance when matching the current time against break boundaries.
    pub boundary_tolerance_secs: f64,
    /// Seek this far past a skipped break's end to avoid a flash of the
    /// final ad frame.
    pub post_break_padding_secs: f64,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            seek_step_secs: 10.0,
            seek_chunks: 80,
            boundary_tolerance_secs: 1.0,
            post_break_padding_secs: 1.0,
        }
    }
}

impl PlayerConfig {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset or unparsable.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            seek_step_secs: env_f64("STITCHPLAY_SEEK_STEP_SECS", defaults.seek_step_secs),
            seek_chunks: env_u32("STITCHPLAY_SEEK_CHUNKS", defaults.seek_chunks),
            boundary_tolerance_secs: env_f64(
                "STITCHPLAY_BOUNDARY_TOLERANCE_SECS",
                defaults.boundary_tolerance_secs,
            ),
            post_break_padding_secs: env_f64(
                "STITCHPLAY_POST_BREAK_PADDING_SECS",
                defaults.post_break_padding_secs,
            ),
        }
    }
}

fn env_f64(key: &str, default: f64) -> f64 {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn env_u32(key: &str, default: u32) -> u32 {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PlayerConfig::default();
        assert_eq!(config.seek_step_secs, 10.0);
        assert_eq!(config.seek_chunks, 80);
        assert_eq!(config.boundary_tolerance_secs, 1.0);
        assert_eq!(config.post_break_padding_secs, 1.0);
    }
}
