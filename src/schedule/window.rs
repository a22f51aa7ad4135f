//! Priority windows: hour-of-day predicates with preferred level ranges.

use serde::Serialize;

use crate::error::{Result, ScheduleError};
use crate::schedule::types::{HOURS_PER_DAY, LevelRange, PowerBounds};

/// Half-open hour-of-day span `start..end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HourSpan {
    /// First hour inside the span.
    pub start: usize,
    /// First hour after the span.
    pub end: usize,
}

impl HourSpan {
    /// Returns `true` if `hour` (taken modulo one day) lies in the span.
    pub fn contains(&self, hour: usize) -> bool {
        (self.start..self.end).contains(&(hour % HOURS_PER_DAY))
    }
}

/// A named source-availability window.
///
/// Hours matching any of the spans draw from `in_range`; every other hour
/// draws from `out_range`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriorityWindow {
    name: String,
    spans: Vec<HourSpan>,
    in_range: LevelRange,
    out_range: LevelRange,
}

impl PriorityWindow {
    /// Builds a window from hour spans and already resolved level ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::InvalidHourSpan`] for a span with
    /// `start >= end` or `end > 24`, [`ScheduleError::EmptyWindow`] when
    /// no span is given, and [`ScheduleError::InvertedWindowRange`] when a
    /// range is inverted or not finite.
    pub fn new(
        name: impl Into<String>,
        spans: Vec<HourSpan>,
        in_range: LevelRange,
        out_range: LevelRange,
    ) -> Result<Self> {
        let name = name.into();
        for span in &spans {
            if span.start >= span.end || span.end > HOURS_PER_DAY {
                return Err(ScheduleError::InvalidHourSpan {
                    name,
                    start: span.start,
                    end: span.end,
                });
            }
        }
        if spans.is_empty() {
            return Err(ScheduleError::EmptyWindow { name });
        }
        for range in [in_range, out_range] {
            if !range.low.is_finite() || !range.high.is_finite() || range.low > range.high {
                return Err(ScheduleError::InvertedWindowRange {
                    name,
                    low: range.low,
                    high: range.high,
                });
            }
        }
        Ok(Self {
            name,
            spans,
            in_range,
            out_range,
        })
    }

    /// Builds a window whose ranges are fractions of the global max.
    ///
    /// `in_frac` and `out_frac` are `(low, high)` pairs in `[0, 1]`; see
    /// [`LevelRange::from_fractions`] for how they resolve.
    pub fn from_fractions(
        name: impl Into<String>,
        spans: Vec<HourSpan>,
        in_frac: (f64, f64),
        out_frac: (f64, f64),
        bounds: &PowerBounds,
    ) -> Result<Self> {
        let name = name.into();
        for (low, high) in [in_frac, out_frac] {
            if !(0.0..=1.0).contains(&low) || !(0.0..=1.0).contains(&high) || low > high {
                return Err(ScheduleError::InvalidFractionRange { name, low, high });
            }
        }
        let in_range = LevelRange::from_fractions(in_frac.0, in_frac.1, bounds)?;
        let out_range = LevelRange::from_fractions(out_frac.0, out_frac.1, bounds)?;
        Self::new(name, spans, in_range, out_range)
    }

    /// Profile name this window drives.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Hour spans making up the predicate.
    pub fn spans(&self) -> &[HourSpan] {
        &self.spans
    }

    /// Range used inside the window.
    pub fn in_range(&self) -> LevelRange {
        self.in_range
    }

    /// Range used outside the window.
    pub fn out_range(&self) -> LevelRange {
        self.out_range
    }

    /// Returns `true` if `hour` satisfies the window predicate.
    pub fn contains(&self, hour: usize) -> bool {
        self.spans.iter().any(|span| span.contains(hour))
    }

    /// Range to sample from at `hour`.
    pub fn range_at(&self, hour: usize) -> LevelRange {
        if self.contains(hour) {
            self.in_range
        } else {
            self.out_range
        }
    }
}

/// Windows shipped with the default configuration: `(name, spans, in, out)`.
pub const STANDARD_WINDOWS: &[(&str, &[(usize, usize)], (f64, f64), (f64, f64))] = &[
    ("Grid Energy", &[(18, 24), (0, 6)], (0.7, 1.0), (0.0, 0.3)),
    ("Solar Power", &[(10, 16)], (0.6, 1.0), (0.0, 0.3)),
    ("Surplus Solar", &[(12, 14)], (0.8, 1.0), (0.0, 0.3)),
];

/// Compiles [`STANDARD_WINDOWS`] against the given bounds.
pub fn standard_windows(bounds: &PowerBounds) -> Result<Vec<PriorityWindow>> {
    STANDARD_WINDOWS
        .iter()
        .map(|(name, spans, in_frac, out_frac)| {
            let spans = spans
                .iter()
                .map(|&(start, end)| HourSpan { start, end })
                .collect();
            PriorityWindow::from_fractions(*name, spans, *in_frac, *out_frac, bounds)
        })
        .collect()
}
