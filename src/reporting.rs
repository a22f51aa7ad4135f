//! Per-profile summary statistics.

use std::fmt;

use serde::Serialize;

use crate::profiles::{Profile, ProfileMode, ProfileSet};
use crate::schedule::smoothing::SmoothingOutcome;

/// Summary of one generated profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileSummary {
    /// Profile label.
    pub name: String,
    /// Assignment mode used.
    pub mode: ProfileMode,
    /// Number of intervals (0 for statistical profiles).
    pub intervals: usize,
    /// Lowest hourly value (kW).
    pub min_kw: f64,
    /// Mean hourly value (kW).
    pub mean_kw: f64,
    /// Highest hourly value (kW).
    pub max_kw: f64,
    /// Sum of hourly values, i.e. energy over the horizon (kWh).
    pub energy_kwh: f64,
    /// Smoothing outcome for statistical profiles.
    pub smoothing: Option<SmoothingOutcome>,
}

impl ProfileSummary {
    /// Computes summary statistics for a profile.
    pub fn from_profile(profile: &Profile) -> Self {
        let values = profile.schedule.values();
        let energy_kwh: f64 = values.iter().sum();
        let (min_kw, max_kw) = values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        let mean_kw = if values.is_empty() {
            0.0
        } else {
            energy_kwh / values.len() as f64
        };

        Self {
            name: profile.name.clone(),
            mode: profile.mode,
            intervals: profile.intervals.len(),
            min_kw: if values.is_empty() { 0.0 } else { min_kw },
            mean_kw,
            max_kw: if values.is_empty() { 0.0 } else { max_kw },
            energy_kwh,
            smoothing: profile.smoothing,
        }
    }
}

impl fmt::Display for ProfileSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mode = match self.mode {
            ProfileMode::Uniform => "uniform",
            ProfileMode::PriorityWindow => "window",
            ProfileMode::Statistical => "statistical",
        };
        write!(
            f,
            "{:<16} {:<11} intervals={:<2} min={:>6.2} mean={:>6.2} max={:>6.2} energy={:>8.2} kWh",
            self.name, mode, self.intervals, self.min_kw, self.mean_kw, self.max_kw, self.energy_kwh
        )?;
        if let Some(SmoothingOutcome::Skipped { len, window }) = self.smoothing {
            write!(f, " (smoothing skipped: {len} < {window})")?;
        }
        Ok(())
    }
}

/// Summaries for every profile in a set, in request order.
pub fn summarize(set: &ProfileSet) -> Vec<ProfileSummary> {
    set.profiles().iter().map(ProfileSummary::from_profile).collect()
}

/// Prints the summary report to stderr, keeping stdout for table output.
pub fn print_summary_report(set: &ProfileSet) {
    eprintln!("\n--- Profile Summary (seed {}) ---", set.seed());
    for summary in summarize(set) {
        eprintln!("{summary}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::types::{Interval, Schedule};

    fn profile(values: Vec<f64>) -> Profile {
        Profile {
            name: "Grid Energy".to_string(),
            mode: ProfileMode::PriorityWindow,
            intervals: vec![Interval {
                start: 0,
                duration: values.len(),
            }],
            schedule: Schedule::from_values(values),
            smoothing: None,
        }
    }

    #[test]
    fn statistics_cover_all_hours() {
        let s = ProfileSummary::from_profile(&profile(vec![10.0, 20.0, 30.0, 40.0]));
        assert_eq!(s.min_kw, 10.0);
        assert_eq!(s.max_kw, 40.0);
        assert_eq!(s.mean_kw, 25.0);
        assert_eq!(s.energy_kwh, 100.0);
        assert_eq!(s.intervals, 1);
    }

    #[test]
    fn empty_schedule_summarizes_to_zero() {
        let s = ProfileSummary::from_profile(&profile(Vec::new()));
        assert_eq!(s.min_kw, 0.0);
        assert_eq!(s.max_kw, 0.0);
        assert_eq!(s.mean_kw, 0.0);
    }

    #[test]
    fn display_mentions_skipped_smoothing() {
        let mut p = profile(vec![1.0, 2.0]);
        p.mode = ProfileMode::Statistical;
        p.smoothing = Some(SmoothingOutcome::Skipped { len: 2, window: 5 });
        let line = ProfileSummary::from_profile(&p).to_string();
        assert!(line.contains("statistical"));
        assert!(line.contains("smoothing skipped: 2 < 5"));
    }
}
