//! Random partitioning of the horizon into intervals.

use rand::Rng;

use crate::error::{Result, ScheduleError};
use crate::schedule::types::Interval;

/// Splits `horizon` unit steps into intervals of random duration.
///
/// Each duration is drawn uniformly from `[min_dur, max_dur]` and clamped to
/// the steps still unallocated, so the durations always sum to `horizon`
/// exactly. Only the final interval can come out shorter than `min_dur`.
///
/// # Errors
///
/// Returns [`ScheduleError::EmptyHorizon`] if `horizon == 0` and
/// [`ScheduleError::InvalidDurationBounds`] if `min_dur == 0` or
/// `min_dur > max_dur`.
///
/// # Examples
///
/// ```
/// use power_schedule::schedule::partition::partition;
/// use rand::{SeedableRng, rngs::StdRng};
///
/// let mut rng = StdRng::seed_from_u64(42);
/// let intervals = partition(24, 1, 6, &mut rng).unwrap();
/// assert_eq!(intervals.iter().map(|iv| iv.duration).sum::<usize>(), 24);
/// ```
pub fn partition<R: Rng + ?Sized>(
    horizon: usize,
    min_dur: usize,
    max_dur: usize,
    rng: &mut R,
) -> Result<Vec<Interval>> {
    partition_with(horizon, min_dur, max_dur, || rng.random_range(min_dur..=max_dur))
}

/// Same as [`partition`] but takes raw durations from `draw`.
///
/// Draws outside `[min_dur, max_dur]` are pulled back into the bounds before
/// clamping to the remaining horizon.
pub fn partition_with<F>(
    horizon: usize,
    min_dur: usize,
    max_dur: usize,
    mut draw: F,
) -> Result<Vec<Interval>>
where
    F: FnMut() -> usize,
{
    if horizon == 0 {
        return Err(ScheduleError::EmptyHorizon);
    }
    if min_dur == 0 || min_dur > max_dur {
        return Err(ScheduleError::InvalidDurationBounds {
            min: min_dur,
            max: max_dur,
        });
    }

    let mut intervals = Vec::with_capacity(horizon.div_ceil(min_dur));
    let mut allocated = 0usize;
    while allocated < horizon {
        let remaining = horizon - allocated;
        let duration = draw().clamp(min_dur, max_dur).min(remaining);
        intervals.push(Interval {
            start: allocated,
            duration,
        });
        allocated += duration;
    }

    Ok(intervals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    fn durations(intervals: &[Interval]) -> Vec<usize> {
        intervals.iter().map(|iv| iv.duration).collect()
    }

    #[test]
    fn scripted_durations_that_fill_the_day_exactly() {
        let mut script = [4, 6, 3, 5, 6].into_iter();
        let intervals = partition_with(24, 1, 6, || script.next().unwrap_or(1))
            .expect("valid bounds");
        assert_eq!(intervals.len(), 5);
        assert_eq!(durations(&intervals), vec![4, 6, 3, 5, 6]);
        assert_eq!(intervals[4].start, 18);
        assert_eq!(intervals[4].end(), 24);
    }

    #[test]
    fn last_draw_is_clamped_to_remaining_horizon() {
        // 6 + 6 + 6 = 18, then a draw of 6 would overshoot to 24 > 20
        let mut script = [6, 6, 6, 6].into_iter();
        let intervals = partition_with(20, 1, 6, || script.next().unwrap_or(1))
            .expect("valid bounds");
        assert_eq!(durations(&intervals), vec![6, 6, 6, 2]);
    }

    #[test]
    fn clamps_below_min_duration_when_remainder_is_short() {
        let intervals = partition_with(10, 4, 4, || 4).expect("valid bounds");
        assert_eq!(durations(&intervals), vec![4, 4, 2]);
    }

    #[test]
    fn out_of_bounds_draws_are_pulled_into_range() {
        let mut script = [0, 99, 3].into_iter();
        let intervals = partition_with(12, 2, 5, || script.next().unwrap_or(2))
            .expect("valid bounds");
        assert_eq!(durations(&intervals), vec![2, 5, 3, 2]);
    }

    #[test]
    fn intervals_are_contiguous() {
        let mut rng = StdRng::seed_from_u64(7);
        let intervals = partition(24, 1, 6, &mut rng).expect("valid bounds");
        let mut expected_start = 0;
        for iv in &intervals {
            assert_eq!(iv.start, expected_start);
            assert!(iv.duration >= 1 && iv.duration <= 6);
            expected_start = iv.end();
        }
        assert_eq!(expected_start, 24);
    }

    #[test]
    fn seeded_partition_is_deterministic() {
        let a = partition(24, 1, 6, &mut StdRng::seed_from_u64(11)).expect("valid bounds");
        let b = partition(24, 1, 6, &mut StdRng::seed_from_u64(11)).expect("valid bounds");
        assert_eq!(a, b);
    }

    #[test]
    fn rejects_invalid_preconditions() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            partition(0, 1, 6, &mut rng),
            Err(ScheduleError::EmptyHorizon)
        );
        assert_eq!(
            partition(24, 7, 6, &mut rng),
            Err(ScheduleError::InvalidDurationBounds { min: 7, max: 6 })
        );
        assert_eq!(
            partition(24, 0, 6, &mut rng),
            Err(ScheduleError::InvalidDurationBounds { min: 0, max: 6 })
        );
    }
}
