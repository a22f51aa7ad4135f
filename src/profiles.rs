//! Profile orchestration: picks a level-assignment mode per profile name and
//! assembles the generated schedules into one table.

use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{Result, ScheduleError};
use crate::schedule::demand::{DemandModel, assign_statistical};
use crate::schedule::levels::{assign_by_hour, assign_uniform, snapshot_at_interval_starts};
use crate::schedule::partition::partition;
use crate::schedule::smoothing::{SavitzkyGolay, Smoother, SmoothingOutcome};
use crate::schedule::types::{Interval, PowerBounds, Schedule};
use crate::schedule::window::PriorityWindow;
use crate::table::ProfileTable;

/// Default name of the statistical mobility-demand profile.
pub const MOBILITY_NEEDS: &str = "Mobility Needs";

/// How a profile's levels are assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileMode {
    /// One uniform draw over the global bounds per interval.
    Uniform,
    /// Per-hour draws through a priority window, held at interval starts.
    PriorityWindow,
    /// Clipped and smoothed normal draws per hour.
    Statistical,
}

/// Resolved assignment rule for one profile name.
#[derive(Debug, Clone, Copy)]
enum ProfileKind<'a> {
    Uniform,
    Windowed(&'a PriorityWindow),
    Statistical,
}

impl ProfileKind<'_> {
    fn mode(&self) -> ProfileMode {
        match self {
            Self::Uniform => ProfileMode::Uniform,
            Self::Windowed(_) => ProfileMode::PriorityWindow,
            Self::Statistical => ProfileMode::Statistical,
        }
    }
}

/// One generated profile. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Profile {
    /// Profile label.
    pub name: String,
    /// Assignment mode used.
    pub mode: ProfileMode,
    /// Per-hour values.
    pub schedule: Schedule,
    /// Intervals the schedule was expanded from; empty in statistical mode.
    pub intervals: Vec<Interval>,
    /// Smoothing outcome; only set in statistical mode.
    pub smoothing: Option<SmoothingOutcome>,
}

/// Profiles generated for one request, in request order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileSet {
    seed: u64,
    profiles: Vec<Profile>,
}

impl ProfileSet {
    /// Master seed the set was generated from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Looks up a profile by name.
    pub fn get(&self, name: &str) -> Option<&Profile> {
        self.profiles.iter().find(|p| p.name == name)
    }

    /// Profiles in request order.
    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    /// Profile names in request order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.profiles.iter().map(|p| p.name.as_str())
    }

    /// Number of profiles.
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// Returns `true` if no profile was requested.
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Flattens the set into `(hour, value, profile)` rows, ordered by
    /// profile then hour.
    pub fn to_table(&self) -> ProfileTable {
        ProfileTable::from_profiles(&self.profiles)
    }
}

/// Generates profiles over a fixed horizon.
///
/// Windows are looked up by profile name, so adding a windowed profile is a
/// configuration entry rather than a code change.
#[derive(Debug)]
pub struct ProfileGenerator {
    horizon: usize,
    bounds: PowerBounds,
    min_duration: usize,
    max_duration: usize,
    windows: Vec<PriorityWindow>,
    mobility_name: String,
    demand: DemandModel,
    smoother: Box<dyn Smoother>,
}

impl ProfileGenerator {
    /// Creates a generator with no windows and the standard mobility model
    /// smoothed by a 5-point cubic Savitzky-Golay filter.
    ///
    /// # Errors
    ///
    /// Fails before any sampling if the horizon is empty or the duration
    /// bounds are unusable.
    pub fn new(
        horizon: usize,
        bounds: PowerBounds,
        min_duration: usize,
        max_duration: usize,
    ) -> Result<Self> {
        if horizon == 0 {
            return Err(ScheduleError::EmptyHorizon);
        }
        if min_duration == 0 || min_duration > max_duration {
            return Err(ScheduleError::InvalidDurationBounds {
                min: min_duration,
                max: max_duration,
            });
        }
        Ok(Self {
            horizon,
            bounds,
            min_duration,
            max_duration,
            windows: Vec::new(),
            mobility_name: MOBILITY_NEEDS.to_string(),
            demand: DemandModel::standard(bounds)?,
            smoother: Box::new(SavitzkyGolay::new(5, 3)?),
        })
    }

    /// Registers priority windows, keyed by their names.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::DuplicateWindow`] if a name is registered
    /// twice, [`ScheduleError::MobilityNameTaken`] if a window uses the
    /// statistical profile's name, and [`ScheduleError::InvalidLevelRange`]
    /// if either of a window's ranges escapes the generator's bounds.
    pub fn with_windows(mut self, windows: impl IntoIterator<Item = PriorityWindow>) -> Result<Self> {
        for window in windows {
            if self.window(window.name()).is_some() {
                return Err(ScheduleError::DuplicateWindow(window.name().to_string()));
            }
            if window.name() == self.mobility_name {
                return Err(ScheduleError::MobilityNameTaken(window.name().to_string()));
            }
            for range in [window.in_range(), window.out_range()] {
                if !range.is_within(&self.bounds) {
                    return Err(ScheduleError::InvalidLevelRange {
                        low: range.low,
                        high: range.high,
                        min: self.bounds.min,
                        max: self.bounds.max,
                    });
                }
            }
            self.windows.push(window);
        }
        Ok(self)
    }

    /// Renames the statistical profile.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::MobilityNameTaken`] if a window is already
    /// registered under `name`.
    pub fn with_mobility_name(mut self, name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if self.window(&name).is_some() {
            return Err(ScheduleError::MobilityNameTaken(name));
        }
        self.mobility_name = name;
        Ok(self)
    }

    /// Replaces the smoother applied to the statistical profile.
    pub fn with_smoother(mut self, smoother: Box<dyn Smoother>) -> Self {
        self.smoother = smoother;
        self
    }

    /// Horizon length in hours.
    pub fn horizon(&self) -> usize {
        self.horizon
    }

    /// Global power bounds.
    pub fn bounds(&self) -> PowerBounds {
        self.bounds
    }

    /// Registered windows.
    pub fn windows(&self) -> &[PriorityWindow] {
        &self.windows
    }

    /// Name of the statistical profile.
    pub fn mobility_name(&self) -> &str {
        &self.mobility_name
    }

    /// Window registered under `name`, if any.
    pub fn window(&self, name: &str) -> Option<&PriorityWindow> {
        self.windows.iter().find(|w| w.name() == name)
    }

    /// Mode that `name` resolves to.
    pub fn mode_for(&self, name: &str) -> ProfileMode {
        self.kind_for(name).mode()
    }

    fn kind_for(&self, name: &str) -> ProfileKind<'_> {
        if let Some(window) = self.window(name) {
            ProfileKind::Windowed(window)
        } else if name == self.mobility_name {
            ProfileKind::Statistical
        } else {
            ProfileKind::Uniform
        }
    }

    /// Generates one profile, drawing everything from `rng`.
    pub fn generate<R: Rng + ?Sized>(&self, name: &str, rng: &mut R) -> Result<Profile> {
        let kind = self.kind_for(name);
        let (schedule, intervals, smoothing) = match kind {
            ProfileKind::Uniform => {
                let intervals =
                    partition(self.horizon, self.min_duration, self.max_duration, rng)?;
                let levels = assign_uniform(intervals.len(), self.bounds.full_range(), rng);
                (Schedule::from_intervals(&intervals, &levels), intervals, None)
            }
            ProfileKind::Windowed(window) => {
                let intervals =
                    partition(self.horizon, self.min_duration, self.max_duration, rng)?;
                let per_hour = assign_by_hour(0..self.horizon, window, rng);
                let schedule = snapshot_at_interval_starts(&intervals, &per_hour)?;
                (schedule, intervals, None)
            }
            ProfileKind::Statistical => {
                let curve =
                    assign_statistical(0..self.horizon, &self.demand, self.smoother.as_ref(), rng);
                (curve.schedule, Vec::new(), Some(curve.smoothing))
            }
        };

        debug!(
            profile = name,
            mode = ?kind.mode(),
            intervals = intervals.len(),
            values = ?schedule.values(),
            "generated profile"
        );

        Ok(Profile {
            name: name.to_string(),
            mode: kind.mode(),
            schedule,
            intervals,
            smoothing,
        })
    }

    /// Generates every requested profile from independent RNG streams.
    ///
    /// Each profile's stream is seeded from `seed` and its name, so a
    /// profile comes out the same regardless of which other profiles are
    /// requested alongside it. Repeated names are generated once.
    pub fn build_profiles<S: AsRef<str>>(&self, names: &[S], seed: u64) -> Result<ProfileSet> {
        let mut profiles: Vec<Profile> = Vec::with_capacity(names.len());
        for name in names.iter().map(AsRef::as_ref) {
            if profiles.iter().any(|p| p.name == name) {
                continue;
            }
            let mut rng = StdRng::seed_from_u64(stream_seed(seed, name));
            profiles.push(self.generate(name, &mut rng)?);
        }

        info!(
            seed,
            profiles = profiles.len(),
            horizon = self.horizon,
            "generated profile set"
        );

        Ok(ProfileSet { seed, profiles })
    }
}

/// Derives a per-profile seed from the master seed and the profile name
/// (FNV-1a over the name bytes).
pub fn stream_seed(seed: u64, name: &str) -> u64 {
    const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;
    let hash = name
        .bytes()
        .fold(FNV_OFFSET, |h, b| (h ^ u64::from(b)).wrapping_mul(FNV_PRIME));
    seed.wrapping_mul(0x9e37_79b9_7f4a_7c15) ^ hash
}
