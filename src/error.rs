//! Error types for schedule generation.

use thiserror::Error;

/// Configuration errors detected before any sampling takes place.
///
/// Generation itself cannot fail once its inputs are valid: the partitioner
/// clamps every draw to the remaining horizon, so running out of horizon is
/// not an error path.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScheduleError {
    /// The horizon has no unit steps.
    #[error("horizon must be > 0 hours")]
    EmptyHorizon,

    /// Interval duration bounds are unusable.
    #[error("interval duration bounds invalid: min {min} must be >= 1 and <= max {max}")]
    InvalidDurationBounds { min: usize, max: usize },

    /// Global power bounds are inverted or not finite.
    #[error("power bounds invalid: min {min} must be finite and <= max {max}")]
    InvalidPowerBounds { min: f64, max: f64 },

    /// A level sub-range is inverted or escapes the global bounds.
    #[error("level range invalid: [{low}, {high}] must be ordered and within [{min}, {max}]")]
    InvalidLevelRange {
        low: f64,
        high: f64,
        min: f64,
        max: f64,
    },

    /// A window's resolved level range is inverted or not finite.
    #[error("window `{name}`: level range [{low}, {high}] must be finite and ordered")]
    InvertedWindowRange { name: String, low: f64, high: f64 },

    /// A window fraction lies outside [0, 1] or is inverted.
    #[error("window `{name}`: fraction range [{low}, {high}] must satisfy 0 <= low <= high <= 1")]
    InvalidFractionRange { name: String, low: f64, high: f64 },

    /// An hour span is empty or reaches past the end of the day.
    #[error("window `{name}`: hour span {start}..{end} must satisfy start < end <= 24")]
    InvalidHourSpan {
        name: String,
        start: usize,
        end: usize,
    },

    /// A window predicate selects no hour at all.
    #[error("window `{name}` covers no hours")]
    EmptyWindow { name: String },

    /// Smoothing window length is even or too short for the polynomial order.
    #[error("smoothing window {window} must be odd and >= poly order {poly_order} + 2")]
    InvalidSmoothingWindow { window: usize, poly_order: usize },

    /// A normal distribution could not be built from the bucket parameters.
    #[error("normal distribution invalid: mean {mean}, std dev {std_dev}")]
    InvalidDistribution { mean: f64, std_dev: f64 },

    /// Per-hour levels do not cover every interval start.
    #[error("no level drawn for hour {hour}: only {len} per-hour levels available")]
    MissingLevel { hour: usize, len: usize },

    /// The statistical profile name is already taken by a window.
    #[error("`{0}` is registered as a window and cannot be the statistical profile")]
    MobilityNameTaken(String),

    /// Two windows share the same profile name.
    #[error("duplicate window name `{0}`")]
    DuplicateWindow(String),
}

/// Result type alias for schedule generation.
pub type Result<T> = std::result::Result<T, ScheduleError>;
