pub mod breaks;
pub mod mapper;

pub use breaks::{AdBreak, BreakList, CuePoint};
