//! Level assignment: uniform per interval, or per hour through a window.

use rand::Rng;

use crate::error::{Result, ScheduleError};
use crate::schedule::types::{Interval, LevelRange, Schedule};
use crate::schedule::window::PriorityWindow;

/// Draws `count` independent levels uniformly from `range`.
pub fn assign_uniform<R: Rng + ?Sized>(count: usize, range: LevelRange, rng: &mut R) -> Vec<f64> {
    (0..count).map(|_| sample(range, rng)).collect()
}

/// Draws one level per hour, using the window's in-range for hours inside
/// the predicate and its out-range elsewhere.
pub fn assign_by_hour<R, I>(hours: I, window: &PriorityWindow, rng: &mut R) -> Vec<f64>
where
    R: Rng + ?Sized,
    I: IntoIterator<Item = usize>,
{
    hours
        .into_iter()
        .map(|hour| sample(window.range_at(hour), rng))
        .collect()
}

/// Expands per-hour levels into a schedule by holding, for each interval,
/// the level drawn for its start hour.
///
/// Levels drawn for the other hours of an interval are discarded.
///
/// # Errors
///
/// Returns [`ScheduleError::MissingLevel`] if an interval starts at an hour
/// `per_hour` has no level for.
pub fn snapshot_at_interval_starts(intervals: &[Interval], per_hour: &[f64]) -> Result<Schedule> {
    let levels = intervals
        .iter()
        .map(|iv| {
            per_hour.get(iv.start).copied().ok_or(ScheduleError::MissingLevel {
                hour: iv.start,
                len: per_hour.len(),
            })
        })
        .collect::<Result<Vec<f64>>>()?;
    Ok(Schedule::from_intervals(intervals, &levels))
}

fn sample<R: Rng + ?Sized>(range: LevelRange, rng: &mut R) -> f64 {
    if range.low >= range.high {
        return range.low;
    }
    rng.random_range(range.low..=range.high)
}
