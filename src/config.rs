//! TOML-based generator configuration and preset definitions.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::error::ScheduleError;
use crate::profiles::{MOBILITY_NEEDS, ProfileGenerator};
use crate::schedule::smoothing::{NoSmoothing, SavitzkyGolay, Smoother};
use crate::schedule::types::{HOURS_PER_DAY, LevelRange, PowerBounds};
use crate::schedule::window::{HourSpan, PriorityWindow, STANDARD_WINDOWS};

/// Top-level generator configuration parsed from TOML.
///
/// All fields have defaults matching the `priority` preset. Load from TOML
/// with [`GeneratorConfig::from_toml_file`] or pick a preset with
/// [`GeneratorConfig::from_preset`].
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Seed and requested profiles.
    #[serde(default)]
    pub generation: GenerationConfig,
    /// Horizon length.
    #[serde(default)]
    pub horizon: HorizonConfig,
    /// Global power bounds.
    #[serde(default)]
    pub power: PowerConfig,
    /// Interval duration bounds.
    #[serde(default)]
    pub intervals: IntervalConfig,
    /// Statistical mobility-demand profile.
    #[serde(default)]
    pub mobility: MobilityConfig,
    /// Priority windows keyed by profile name.
    #[serde(default = "default_windows")]
    pub windows: Vec<WindowConfig>,
}

/// Seed and requested profiles.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenerationConfig {
    /// Master random seed.
    pub seed: u64,
    /// Profile names to generate, in output order.
    pub profiles: Vec<String>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        let mut profiles: Vec<String> = STANDARD_WINDOWS
            .iter()
            .map(|(name, ..)| (*name).to_string())
            .collect();
        profiles.push(MOBILITY_NEEDS.to_string());
        Self { seed: 42, profiles }
    }
}

/// Horizon length.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HorizonConfig {
    /// Number of hourly unit steps (must be > 0).
    pub hours: usize,
}

impl Default for HorizonConfig {
    fn default() -> Self {
        Self {
            hours: HOURS_PER_DAY,
        }
    }
}

/// Global power bounds.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PowerConfig {
    /// Minimum power per step (kW).
    pub min_kw: f64,
    /// Maximum power per step (kW).
    pub max_kw: f64,
}

impl Default for PowerConfig {
    fn default() -> Self {
        Self {
            min_kw: 5.0,
            max_kw: 50.0,
        }
    }
}

/// Interval duration bounds.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IntervalConfig {
    /// Minimum interval duration (hours, >= 1).
    pub min_hours: usize,
    /// Maximum interval duration (hours).
    pub max_hours: usize,
}

impl Default for IntervalConfig {
    fn default() -> Self {
        Self {
            min_hours: 1,
            max_hours: 6,
        }
    }
}

/// Statistical mobility-demand profile.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MobilityConfig {
    /// Profile name that selects statistical mode.
    pub name: String,
    /// Smoother: `"savgol"` or `"none"`.
    pub smoother: String,
    /// Savitzky-Golay window length (odd).
    pub window_length: usize,
    /// Savitzky-Golay polynomial order.
    pub poly_order: usize,
}

impl Default for MobilityConfig {
    fn default() -> Self {
        Self {
            name: MOBILITY_NEEDS.to_string(),
            smoother: "savgol".to_string(),
            window_length: 5,
            poly_order: 3,
        }
    }
}

/// One priority window.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WindowConfig {
    /// Profile name the window drives.
    pub name: String,
    /// Half-open `[start, end)` hour spans.
    pub hours: Vec<[usize; 2]>,
    /// In-window range as fractions of the global max.
    pub in_range: [f64; 2],
    /// Out-of-window range as fractions of the global max.
    #[serde(default = "default_out_range")]
    pub out_range: [f64; 2],
}

fn default_out_range() -> [f64; 2] {
    [0.0, 0.3]
}

fn default_windows() -> Vec<WindowConfig> {
    STANDARD_WINDOWS
        .iter()
        .map(|(name, spans, in_frac, out_frac)| WindowConfig {
            name: (*name).to_string(),
            hours: spans.iter().map(|&(s, e)| [s, e]).collect(),
            in_range: [in_frac.0, in_frac.1],
            out_range: [out_frac.0, out_frac.1],
        })
        .collect()
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"intervals.min_hours"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl From<ScheduleError> for ConfigError {
    fn from(e: ScheduleError) -> Self {
        Self::new("generator", e.to_string())
    }
}

impl GeneratorConfig {
    /// Three energy-source windows plus the mobility-needs curve.
    pub fn priority() -> Self {
        Self {
            generation: GenerationConfig::default(),
            horizon: HorizonConfig::default(),
            power: PowerConfig::default(),
            intervals: IntervalConfig::default(),
            mobility: MobilityConfig::default(),
            windows: default_windows(),
        }
    }

    /// Three generic profiles drawn uniformly over the full bounds.
    pub fn uniform() -> Self {
        Self {
            generation: GenerationConfig {
                profiles: (1..=3).map(|i| format!("Profile {i}")).collect(),
                ..GenerationConfig::default()
            },
            ..Self::priority()
        }
    }

    /// A single generic profile.
    pub fn single() -> Self {
        Self {
            generation: GenerationConfig {
                profiles: vec!["EV Charging".to_string()],
                ..GenerationConfig::default()
            },
            ..Self::priority()
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["priority", "uniform", "single"];

    /// Loads a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "priority" => Ok(Self::priority()),
            "uniform" => Ok(Self::uniform()),
            "single" => Ok(Self::single()),
            _ => Err(ConfigError::new(
                "preset",
                format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            )),
        }
    }

    /// Parses a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new("scenario", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// Validates all fields and returns every error found.
    ///
    /// Returns an empty vector if the configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.horizon.hours == 0 {
            errors.push(ConfigError::new("horizon.hours", "must be > 0"));
        }

        let p = &self.power;
        if !p.min_kw.is_finite() || !p.max_kw.is_finite() {
            errors.push(ConfigError::new("power", "bounds must be finite"));
        } else if p.min_kw > p.max_kw {
            errors.push(ConfigError::new("power.min_kw", "must be <= power.max_kw"));
        }

        let iv = &self.intervals;
        if iv.min_hours == 0 {
            errors.push(ConfigError::new("intervals.min_hours", "must be >= 1"));
        }
        if iv.min_hours > iv.max_hours {
            errors.push(ConfigError::new(
                "intervals.min_hours",
                "must be <= intervals.max_hours",
            ));
        }

        let m = &self.mobility;
        match m.smoother.as_str() {
            "savgol" => {
                if m.window_length % 2 == 0 || m.window_length < m.poly_order + 2 {
                    errors.push(ConfigError::new(
                        "mobility.window_length",
                        "must be odd and >= mobility.poly_order + 2",
                    ));
                }
            }
            "none" => {}
            other => errors.push(ConfigError::new(
                "mobility.smoother",
                format!("must be \"savgol\" or \"none\", got \"{other}\""),
            )),
        }

        for (i, w) in self.windows.iter().enumerate() {
            let field = format!("windows[{i}]");
            if w.hours.is_empty() {
                errors.push(ConfigError::new(
                    format!("{field}.hours"),
                    format!("window \"{}\" covers no hours", w.name),
                ));
            }
            for [start, end] in &w.hours {
                if start >= end || *end > HOURS_PER_DAY {
                    errors.push(ConfigError::new(
                        format!("{field}.hours"),
                        format!("span [{start}, {end}] must satisfy start < end <= 24"),
                    ));
                }
            }
            for (name, [low, high]) in [("in_range", w.in_range), ("out_range", w.out_range)] {
                if !(0.0..=1.0).contains(&low) || !(0.0..=1.0).contains(&high) || low > high {
                    errors.push(ConfigError::new(
                        format!("{field}.{name}"),
                        "must satisfy 0 <= low <= high <= 1",
                    ));
                } else if let Ok(bounds) = PowerBounds::new(p.min_kw, p.max_kw) {
                    if let Err(e) = LevelRange::from_fractions(low, high, &bounds) {
                        errors.push(ConfigError::new(
                            format!("{field}.{name}"),
                            format!("resolves to an empty range within power bounds: {e}"),
                        ));
                    }
                }
            }
            if self.windows[..i].iter().any(|prev| prev.name == w.name) {
                errors.push(ConfigError::new(
                    format!("{field}.name"),
                    format!("duplicate window name \"{}\"", w.name),
                ));
            }
            if w.name == m.name {
                errors.push(ConfigError::new(
                    format!("{field}.name"),
                    format!("\"{}\" is already the mobility profile", w.name),
                ));
            }
        }

        errors
    }

    /// Compiles the configuration into a generator.
    ///
    /// # Errors
    ///
    /// Returns the first `ScheduleError` raised while building bounds,
    /// windows, or the smoother. Run [`validate`](Self::validate) first for
    /// field-level reporting.
    pub fn build_generator(&self) -> Result<ProfileGenerator, ScheduleError> {
        let bounds = PowerBounds::new(self.power.min_kw, self.power.max_kw)?;
        let windows = self
            .windows
            .iter()
            .map(|w| {
                let spans = w
                    .hours
                    .iter()
                    .map(|&[start, end]| HourSpan { start, end })
                    .collect();
                PriorityWindow::from_fractions(
                    w.name.clone(),
                    spans,
                    (w.in_range[0], w.in_range[1]),
                    (w.out_range[0], w.out_range[1]),
                    &bounds,
                )
            })
            .collect::<Result<Vec<_>, _>>()?;

        let smoother: Box<dyn Smoother> = match self.mobility.smoother.as_str() {
            "none" => Box::new(NoSmoothing),
            _ => Box::new(SavitzkyGolay::new(
                self.mobility.window_length,
                self.mobility.poly_order,
            )?),
        };

        Ok(ProfileGenerator::new(
            self.horizon.hours,
            bounds,
            self.intervals.min_hours,
            self.intervals.max_hours,
        )?
        .with_mobility_name(self.mobility.name.clone())?
        .with_windows(windows)?
        .with_smoother(smoother))
    }
}
