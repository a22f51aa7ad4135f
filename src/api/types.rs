//! API response and query types.

use serde::{Deserialize, Serialize};

use crate::profiles::{Profile, ProfileMode};
use crate::schedule::smoothing::SmoothingOutcome;
use crate::schedule::types::Interval;

/// One profile with its per-hour values.
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    /// Profile label.
    pub name: String,
    /// Assignment mode used.
    pub mode: ProfileMode,
    /// Per-hour values, indexed by hour.
    pub values: Vec<f64>,
    /// Intervals the values were expanded from.
    pub intervals: Vec<Interval>,
    /// Smoothing outcome for statistical profiles.
    pub smoothing: Option<SmoothingOutcome>,
}

impl From<&Profile> for ProfileResponse {
    fn from(p: &Profile) -> Self {
        Self {
            name: p.name.clone(),
            mode: p.mode,
            values: p.schedule.values().to_vec(),
            intervals: p.intervals.clone(),
            smoothing: p.smoothing,
        }
    }
}

/// Optional filters for the table endpoint.
#[derive(Debug, Deserialize)]
pub struct TableQuery {
    /// Only rows for this profile.
    pub profile: Option<String>,
    /// First hour (inclusive).
    pub from: Option<usize>,
    /// Last hour (inclusive).
    pub to: Option<usize>,
}

/// Error response body for 4xx errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::types::Schedule;

    #[test]
    fn profile_response_copies_values_and_intervals() {
        let profile = Profile {
            name: "Solar Power".to_string(),
            mode: ProfileMode::PriorityWindow,
            schedule: Schedule::from_values(vec![7.0, 7.0, 42.0]),
            intervals: vec![
                Interval {
                    start: 0,
                    duration: 2,
                },
                Interval {
                    start: 2,
                    duration: 1,
                },
            ],
            smoothing: None,
        };
        let response = ProfileResponse::from(&profile);
        assert_eq!(response.name, "Solar Power");
        assert_eq!(response.values, vec![7.0, 7.0, 42.0]);
        assert_eq!(response.intervals.len(), 2);
        assert_eq!(response.mode, ProfileMode::PriorityWindow);
    }
}
