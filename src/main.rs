use tracing::info;

use stitchplay::config::PlayerConfig;
use stitchplay::player::{AdOutcome, Command, Player, PlayerEvent};
use stitchplay::timeline::CuePoint;

/// Demo driver: replays a scripted playback session through the player core
/// and logs every command it would send to a media element.
fn main() {
    tracing_subscriber::fmt::init();

    info!("🎬 Starting Stitchplay demo session");

    let mut player = Player::new(PlayerConfig::from_env());

    // A stitched stream: mandatory pre-roll plus one mid-roll, 10 minutes of
    // media in total.
    let script = vec![
        PlayerEvent::CuePointsLoaded {
            cues: vec![
                CuePoint {
                    start: 0.0,
                    end: 30.0,
                },
                CuePoint {
                    start: 330.0,
                    end: 345.0,
                },
            ],
        },
        PlayerEvent::MediaAttached { at: None },
        PlayerEvent::PlaybackStarted,
        PlayerEvent::DurationChanged { duration: 600.0 },
        // Pre-roll: interactive ad begins, viewer earns a credit.
        PlayerEvent::TimeUpdate { raw_time: 0.5 },
        PlayerEvent::AdLifecycle {
            break_index: 0,
            outcome: AdOutcome::Started {
                placeholder_duration: 5.0,
            },
        },
        PlayerEvent::AdLifecycle {
            break_index: 0,
            outcome: AdOutcome::CreditEarned,
        },
        // Content playback, then a forward step across the mid-roll.
        PlayerEvent::TimeUpdate { raw_time: 60.0 },
        PlayerEvent::TimeUpdate { raw_time: 325.0 },
        PlayerEvent::StepRequested { forward: true },
        // The step pinned us to the mid-roll start; the ad plays through.
        PlayerEvent::TimeUpdate { raw_time: 330.0 },
        PlayerEvent::AdLifecycle {
            break_index: 1,
            outcome: AdOutcome::Started {
                placeholder_duration: 0.0,
            },
        },
        PlayerEvent::AdLifecycle {
            break_index: 1,
            outcome: AdOutcome::NoCredit,
        },
        PlayerEvent::TimeUpdate { raw_time: 344.5 },
        // Scrub back into the first act; the completed pre-roll is crossed
        // freely.
        PlayerEvent::TimeUpdate { raw_time: 400.0 },
        PlayerEvent::ScrubRequested { content_ratio: 0.1 },
        PlayerEvent::Stop,
    ];

    for event in script {
        let label = serde_json::to_string(&event).unwrap_or_default();
        let commands = player.handle(event);
        report(&player, &label, &commands);
    }
}

fn report(player: &Player, event_label: &str, commands: &[Command]) {
    info!(
        "event {} -> content {:.1}s / {:.1}s, state {:?}",
        event_label,
        player.current_content_time(),
        player.current_content_duration(),
        player.state(),
    );
    for command in commands {
        let rendered = serde_json::to_string(command).unwrap_or_default();
        info!("  command: {rendered}");
    }
}
