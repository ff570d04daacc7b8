//! Stitchplay — ad-aware time mapping and seek engine for stitched CTV streams
//!
//! Library interface for the playback core: the arithmetic and state machine
//! governing what time the viewer perceives vs. the stitched media's raw
//! time, and how seeks are redirected around ad breaks.
//! The demo binary entry point is in main.rs.

pub mod config;
pub mod error;
pub mod metrics;
pub mod player;
pub mod seek;
pub mod timeline;
