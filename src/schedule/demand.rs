//! Statistical mobility-demand curve: hour-bucketed normal draws, clipped to
//! the global bounds, then smoothed.

use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::Serialize;
use tracing::warn;

use crate::error::{Result, ScheduleError};
use crate::schedule::smoothing::{Smoother, SmoothingOutcome};
use crate::schedule::types::{PowerBounds, Schedule};
use crate::schedule::window::HourSpan;

/// Hour-of-day classification used to pick a demand distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HourBucket {
    /// Morning and evening commute.
    RushHour,
    /// Early hours with little travel.
    Night,
    /// Everything else.
    Daytime,
}

const RUSH_SPANS: [HourSpan; 2] = [
    HourSpan { start: 7, end: 9 },
    HourSpan { start: 17, end: 19 },
];
const NIGHT_SPAN: HourSpan = HourSpan { start: 0, end: 6 };

impl HourBucket {
    /// Classifies an hour (taken modulo one day).
    pub fn of(hour: usize) -> Self {
        if RUSH_SPANS.iter().any(|span| span.contains(hour)) {
            Self::RushHour
        } else if NIGHT_SPAN.contains(hour) {
            Self::Night
        } else {
            Self::Daytime
        }
    }
}

/// Normal distribution parameters for one bucket.
#[derive(Debug, Clone, Copy)]
struct BucketDistribution {
    mean: f64,
    normal: Normal<f64>,
}

impl BucketDistribution {
    fn new(mean: f64, std_dev: f64) -> Result<Self> {
        let normal =
            Normal::new(mean, std_dev).map_err(|_| ScheduleError::InvalidDistribution { mean, std_dev })?;
        Ok(Self { mean, normal })
    }
}

/// Per-bucket normal distributions derived from the global bounds.
#[derive(Debug, Clone)]
pub struct DemandModel {
    bounds: PowerBounds,
    rush: BucketDistribution,
    night: BucketDistribution,
    daytime: BucketDistribution,
}

impl DemandModel {
    /// Standard mobility model:
    ///
    /// | bucket | mean | std dev |
    /// |---|---|---|
    /// | rush hour | 0.8 max | 0.1 max |
    /// | night | min | 0.5 min |
    /// | daytime | 0.4 max | 0.2 max |
    pub fn standard(bounds: PowerBounds) -> Result<Self> {
        Ok(Self {
            bounds,
            rush: BucketDistribution::new(0.8 * bounds.max, 0.1 * bounds.max)?,
            night: BucketDistribution::new(bounds.min, 0.5 * bounds.min.abs())?,
            daytime: BucketDistribution::new(0.4 * bounds.max, 0.2 * bounds.max)?,
        })
    }

    /// Bounds the draws are clipped into.
    pub fn bounds(&self) -> PowerBounds {
        self.bounds
    }

    /// Mean demand for an hour's bucket.
    pub fn mean_at(&self, hour: usize) -> f64 {
        self.distribution(HourBucket::of(hour)).mean
    }

    fn distribution(&self, bucket: HourBucket) -> &BucketDistribution {
        match bucket {
            HourBucket::RushHour => &self.rush,
            HourBucket::Night => &self.night,
            HourBucket::Daytime => &self.daytime,
        }
    }

    fn draw<R: Rng + ?Sized>(&self, hour: usize, rng: &mut R) -> f64 {
        self.distribution(HourBucket::of(hour)).normal.sample(rng)
    }
}

/// Statistical draws for a run of hours, with the smoothing outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct DemandCurve {
    /// Final per-hour values.
    pub schedule: Schedule,
    /// Whether smoothing ran, was skipped, or is disabled.
    pub smoothing: SmoothingOutcome,
}

/// Draws one clipped normal value per hour and smooths the sequence.
///
/// Draws outside the model bounds are clipped, not redrawn. Smoothed values
/// are clipped again so the curve keeps to the bounds. When the sequence is
/// shorter than the smoothing window the clipped draws are returned as-is
/// and the outcome reports [`SmoothingOutcome::Skipped`].
pub fn assign_statistical<R, I>(
    hours: I,
    model: &DemandModel,
    smoother: &dyn Smoother,
    rng: &mut R,
) -> DemandCurve
where
    R: Rng + ?Sized,
    I: IntoIterator<Item = usize>,
{
    let bounds = model.bounds();
    let mut values: Vec<f64> = hours
        .into_iter()
        .map(|hour| bounds.clip(model.draw(hour, rng)))
        .collect();

    let smoothing = smoother.smooth(&mut values);
    match smoothing {
        SmoothingOutcome::Applied => {
            for v in &mut values {
                *v = bounds.clip(*v);
            }
        }
        SmoothingOutcome::Skipped { len, window } => {
            warn!(
                len,
                window,
                smoother = smoother.name(),
                "sequence shorter than smoothing window, returning unsmoothed values"
            );
        }
        SmoothingOutcome::Disabled => {}
    }

    DemandCurve {
        schedule: Schedule::from_values(values),
        smoothing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::smoothing::{NoSmoothing, SavitzkyGolay};
    use rand::{SeedableRng, rngs::StdRng};

    fn model() -> DemandModel {
        DemandModel::standard(PowerBounds::new(5.0, 50.0).expect("valid bounds"))
            .expect("valid model")
    }

    #[test]
    fn buckets_follow_commute_and_night_hours() {
        assert_eq!(HourBucket::of(7), HourBucket::RushHour);
        assert_eq!(HourBucket::of(8), HourBucket::RushHour);
        assert_eq!(HourBucket::of(9), HourBucket::Daytime);
        assert_eq!(HourBucket::of(18), HourBucket::RushHour);
        assert_eq!(HourBucket::of(0), HourBucket::Night);
        assert_eq!(HourBucket::of(5), HourBucket::Night);
        assert_eq!(HourBucket::of(6), HourBucket::Daytime);
        assert_eq!(HourBucket::of(23), HourBucket::Daytime);
    }

    #[test]
    fn bucket_means_scale_with_bounds() {
        let m = model();
        assert_eq!(m.mean_at(8), 40.0);
        assert_eq!(m.mean_at(2), 5.0);
        assert_eq!(m.mean_at(12), 20.0);
    }

    #[test]
    fn values_are_clipped_into_bounds() {
        let m = model();
        let sg = SavitzkyGolay::new(5, 3).expect("valid filter");
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let curve = assign_statistical(0..24, &m, &sg, &mut rng);
            assert_eq!(curve.schedule.len(), 24);
            assert_eq!(curve.smoothing, SmoothingOutcome::Applied);
            assert!(
                curve.schedule.values().iter().all(|&v| (5.0..=50.0).contains(&v)),
                "seed {seed} produced out-of-bounds values"
            );
        }
    }

    #[test]
    fn short_sequence_skips_smoothing_and_keeps_raw_values() {
        let m = model();
        let sg = SavitzkyGolay::new(5, 3).expect("valid filter");

        let smoothed = assign_statistical(0..4, &m, &sg, &mut StdRng::seed_from_u64(9));
        let raw = assign_statistical(0..4, &m, &NoSmoothing, &mut StdRng::seed_from_u64(9));

        assert_eq!(
            smoothed.smoothing,
            SmoothingOutcome::Skipped { len: 4, window: 5 }
        );
        assert_eq!(smoothed.schedule, raw.schedule);
    }

    #[test]
    fn rush_hours_average_above_night_hours() {
        let m = model();
        let mut rush_sum = 0.0;
        let mut night_sum = 0.0;
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let curve = assign_statistical(0..24, &m, &NoSmoothing, &mut rng);
            let v = curve.schedule.values();
            rush_sum += v[7] + v[8] + v[17] + v[18];
            night_sum += v[0] + v[1] + v[2] + v[3];
        }
        assert!(rush_sum > night_sum * 2.0);
    }
}
