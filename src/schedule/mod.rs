/// Statistical mobility-demand curves.
pub mod demand;
pub mod levels;
/// Horizon partitioning into random intervals.
pub mod partition;
pub mod smoothing;
pub mod types;
/// Priority window predicates and ranges.
pub mod window;

pub use demand::{DemandCurve, DemandModel, HourBucket, assign_statistical};
pub use levels::{assign_by_hour, assign_uniform, snapshot_at_interval_starts};
pub use partition::partition;
pub use smoothing::{NoSmoothing, SavitzkyGolay, Smoother, SmoothingOutcome};
pub use types::{HOURS_PER_DAY, Interval, LevelRange, PowerBounds, Schedule};
pub use window::{HourSpan, PriorityWindow};
