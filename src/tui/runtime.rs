//! TUI application state.

use tracing::info;

use crate::config::GeneratorConfig;
use crate::error::Result;
use crate::profiles::{Profile, ProfileGenerator, ProfileSet};
use crate::schedule::types::Schedule;

/// One line on the chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    /// Legend label.
    pub name: String,
    /// Index of the profile in the set, for colour fallback.
    pub index: usize,
    /// Drawn dotted rather than as a solid line.
    pub dotted: bool,
    /// Step-shaped points: each hour contributes its start and end.
    pub points: Vec<(f64, f64)>,
}

/// TUI application state.
pub struct App {
    generator: ProfileGenerator,
    profiles: Vec<String>,
    set: ProfileSet,
    /// Whether the mobility overlay is drawn.
    pub show_mobility: bool,
    /// Hour whose values the status panel shows.
    pub cursor: usize,
    /// Whether the user has requested quit.
    pub quit: bool,
}

impl App {
    /// Builds the generator and the first profile set from `config`.
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        let generator = config.build_generator()?;
        let profiles = config.generation.profiles;
        let set = generator.build_profiles(&profiles, config.generation.seed)?;
        Ok(Self {
            generator,
            profiles,
            set,
            show_mobility: true,
            cursor: 0,
            quit: false,
        })
    }

    /// Seed of the displayed set.
    pub fn seed(&self) -> u64 {
        self.set.seed()
    }

    /// The displayed profile set.
    pub fn set(&self) -> &ProfileSet {
        &self.set
    }

    /// Hours in the horizon.
    pub fn horizon(&self) -> usize {
        self.generator.horizon()
    }

    /// Regenerates every profile with the next seed.
    ///
    /// Keeps the current set if generation fails, which cannot happen for a
    /// generator that already produced one.
    pub fn regenerate(&mut self) {
        let seed = self.seed().wrapping_add(1);
        if let Ok(set) = self.generator.build_profiles(&self.profiles, seed) {
            info!(seed, "regenerated profiles");
            self.set = set;
        }
    }

    /// Shows or hides the mobility overlay.
    pub fn toggle_mobility(&mut self) {
        self.show_mobility = !self.show_mobility;
    }

    /// Moves the hour cursor back, stopping at the first hour.
    pub fn cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Moves the hour cursor forward, stopping at the last hour.
    pub fn cursor_right(&mut self) {
        if self.cursor + 1 < self.horizon() {
            self.cursor += 1;
        }
    }

    /// Returns `true` for the profile drawn as the mobility overlay.
    pub fn is_mobility(&self, profile: &Profile) -> bool {
        profile.name == self.generator.mobility_name()
    }

    /// Chart series for every visible profile, in set order.
    pub fn series(&self) -> Vec<Series> {
        self.set
            .profiles()
            .iter()
            .enumerate()
            .filter(|(_, p)| self.show_mobility || !self.is_mobility(p))
            .map(|(index, p)| Series {
                name: p.name.clone(),
                index,
                dotted: self.is_mobility(p),
                points: step_points(&p.schedule),
            })
            .collect()
    }
}

/// Expands a schedule into `(hour, value)` pairs that draw as flat steps.
pub fn step_points(schedule: &Schedule) -> Vec<(f64, f64)> {
    schedule
        .iter()
        .flat_map(|(hour, value)| {
            let h = hour as f64;
            [(h, value), (h + 1.0, value)]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        App::new(GeneratorConfig::priority()).unwrap()
    }

    #[test]
    fn app_starts_with_configured_profiles() {
        let app = app();
        assert_eq!(app.seed(), 42);
        assert_eq!(app.set().len(), 4);
        assert_eq!(app.series().len(), 4);
    }

    #[test]
    fn regenerate_moves_to_next_seed_and_changes_values() {
        let mut app = app();
        let before = app.set().clone();
        app.regenerate();
        assert_eq!(app.seed(), 43);
        assert_ne!(before.profiles(), app.set().profiles());
    }

    #[test]
    fn mobility_overlay_is_dotted_and_toggleable() {
        let mut app = app();
        let dotted: Vec<_> = app.series().into_iter().filter(|s| s.dotted).collect();
        assert_eq!(dotted.len(), 1);
        assert_eq!(dotted[0].name, "Mobility Needs");

        app.toggle_mobility();
        assert!(app.series().iter().all(|s| s.name != "Mobility Needs"));
        assert_eq!(app.series().len(), 3);
    }

    #[test]
    fn cursor_stays_within_horizon() {
        let mut app = app();
        app.cursor_left();
        assert_eq!(app.cursor, 0);
        for _ in 0..100 {
            app.cursor_right();
        }
        assert_eq!(app.cursor, 23);
    }

    #[test]
    fn step_points_hold_each_value_for_an_hour() {
        let schedule = Schedule::from_values(vec![5.0, 9.0]);
        assert_eq!(
            step_points(&schedule),
            vec![(0.0, 5.0), (1.0, 5.0), (1.0, 9.0), (2.0, 9.0)]
        );
    }
}
