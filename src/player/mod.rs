pub mod events;
pub mod state;

pub use events::{AdOutcome, Command, PlayerEvent};
pub use state::{PlaybackState, Player};
