//! Tidy `(hour, value, profile)` table handed to renderers.

use serde::{Deserialize, Serialize};

use crate::profiles::Profile;

/// One row of the hand-off table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileRow {
    /// Hour index within the horizon.
    pub hour: usize,
    /// Scheduled value (kW).
    pub value: f64,
    /// Profile label.
    pub profile: String,
}

/// All rows for a profile set, ordered by profile then hour.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileTable {
    rows: Vec<ProfileRow>,
}

impl ProfileTable {
    /// Concatenates the schedules of `profiles` in the given order.
    pub fn from_profiles(profiles: &[Profile]) -> Self {
        let rows = profiles
            .iter()
            .flat_map(|p| {
                p.schedule.iter().map(|(hour, value)| ProfileRow {
                    hour,
                    value,
                    profile: p.name.clone(),
                })
            })
            .collect();
        Self { rows }
    }

    /// All rows.
    pub fn rows(&self) -> &[ProfileRow] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows belonging to one profile.
    pub fn for_profile<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a ProfileRow> {
        self.rows.iter().filter(move |r| r.profile == name)
    }
}
