//! Core value types shared by the partitioner and the level assigners.

use serde::Serialize;

use crate::error::{Result, ScheduleError};

/// Number of hours in one day; hour-of-day predicates wrap on this.
pub const HOURS_PER_DAY: usize = 24;

/// Global power bounds every schedule value must respect.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PowerBounds {
    /// Lowest allowed value (kW).
    pub min: f64,
    /// Highest allowed value (kW).
    pub max: f64,
}

impl PowerBounds {
    /// Creates bounds, rejecting inverted or non-finite values.
    pub fn new(min: f64, max: f64) -> Result<Self> {
        if !min.is_finite() || !max.is_finite() || min > max {
            return Err(ScheduleError::InvalidPowerBounds { min, max });
        }
        Ok(Self { min, max })
    }

    /// Clamps a value into the bounds.
    pub fn clip(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    /// Returns `true` if `value` lies inside the bounds (inclusive).
    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }

    /// The full bounds as a sampling range.
    pub fn full_range(&self) -> LevelRange {
        LevelRange {
            low: self.min,
            high: self.max,
        }
    }
}

/// Inclusive sub-range of the global bounds that levels are drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LevelRange {
    /// Lower end (kW).
    pub low: f64,
    /// Upper end (kW).
    pub high: f64,
}

impl LevelRange {
    /// Creates a range that must sit inside `bounds`.
    pub fn within(low: f64, high: f64, bounds: &PowerBounds) -> Result<Self> {
        if !low.is_finite() || !high.is_finite() || low > high || low < bounds.min || high > bounds.max
        {
            return Err(ScheduleError::InvalidLevelRange {
                low,
                high,
                min: bounds.min,
                max: bounds.max,
            });
        }
        Ok(Self { low, high })
    }

    /// Resolves a `[low, high]` pair of fractions of the global max.
    ///
    /// The resolved low end never drops below the global min, so a
    /// `0.0..0.3` fraction range over `5..50` kW becomes `5..15` kW.
    pub fn from_fractions(low_frac: f64, high_frac: f64, bounds: &PowerBounds) -> Result<Self> {
        let low = (low_frac * bounds.max).max(bounds.min);
        let high = (high_frac * bounds.max).min(bounds.max);
        Self::within(low, high, bounds)
    }

    /// Returns `true` if `value` lies inside the range (inclusive).
    pub fn contains(&self, value: f64) -> bool {
        (self.low..=self.high).contains(&value)
    }

    /// Returns `true` if the range is ordered and sits inside `bounds`.
    pub fn is_within(&self, bounds: &PowerBounds) -> bool {
        self.low <= self.high && self.low >= bounds.min && self.high <= bounds.max
    }
}

/// A contiguous run of unit steps sharing one level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Interval {
    /// First unit step covered.
    pub start: usize,
    /// Number of unit steps covered (>= 1).
    pub duration: usize,
}

impl Interval {
    /// One past the last unit step covered.
    pub fn end(&self) -> usize {
        self.start + self.duration
    }

    /// Unit steps covered by this interval.
    pub fn hours(&self) -> std::ops::Range<usize> {
        self.start..self.end()
    }
}

/// Fully expanded per-hour values for one profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Schedule {
    values: Vec<f64>,
}

impl Schedule {
    /// Wraps per-hour values.
    pub fn from_values(values: Vec<f64>) -> Self {
        Self { values }
    }

    /// Expands one level per interval across every hour it spans.
    pub fn from_intervals(intervals: &[Interval], levels: &[f64]) -> Self {
        let horizon = intervals.last().map_or(0, Interval::end);
        let mut values = Vec::with_capacity(horizon);
        for (interval, &level) in intervals.iter().zip(levels) {
            values.extend(std::iter::repeat_n(level, interval.duration));
        }
        Self { values }
    }

    /// Number of hours covered.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` when the schedule covers no hours.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Per-hour values in hour order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Value at a given hour, if within the horizon.
    pub fn value_at(&self, hour: usize) -> Option<f64> {
        self.values.get(hour).copied()
    }

    /// `(hour, value)` pairs in hour order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.values.iter().copied().enumerate()
    }
}
