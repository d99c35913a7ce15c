//! Data models for Pairwise

mod period;
mod roster;
mod schedule;

pub use period::*;
pub use roster::*;
pub use schedule::*;
