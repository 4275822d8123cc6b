//! Data models for subway-waker
//!
//! This module contains the core data structures:
//! - Feed records from the arrival and position feeds
//! - The tracked train snapshot
//! - The static line directory

pub mod lines;
pub mod records;
pub mod train;

// Re-exports for convenient access
pub use lines::{line_label, LineDirectory, LineInfo};
pub use records::{ArrivalCode, ArrivalRecord, Direction, PositionRecord, TrainStatus};
pub use train::TrackedTrain;
