//! Synthetic piecewise-constant power schedules over a daily horizon.
//!
//! Schedules are built by partitioning the horizon into random intervals and
//! assigning each a level: uniformly, through an hour-of-day priority window,
//! or from a smoothed statistical demand model. Generated profiles are
//! flattened into one `(hour, value, profile)` table for renderers.

#[cfg(feature = "api")]
pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod io;
/// Profile orchestration across assignment modes.
pub mod profiles;
pub mod reporting;
/// Partitioning, level assignment, and smoothing.
pub mod schedule;
pub mod table;
#[cfg(feature = "tui")]
pub mod tui;

pub use error::{Result, ScheduleError};
pub use profiles::{Profile, ProfileGenerator, ProfileMode, ProfileSet};
pub use table::{ProfileRow, ProfileTable};
