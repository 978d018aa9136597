//! Grid building: one classified cell per displayed day.

pub mod builder;
pub mod classifier;

pub use builder::{Grid, GridBuilder, SkippedItem};
pub use classifier::classify;
