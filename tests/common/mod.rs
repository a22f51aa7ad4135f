//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use power_schedule::config::GeneratorConfig;
use power_schedule::profiles::{ProfileGenerator, ProfileSet};
use power_schedule::schedule::types::PowerBounds;

/// Seed used across integration tests.
pub const SEED: u64 = 42;

/// Standard global bounds (5-50 kW).
pub fn default_bounds() -> PowerBounds {
    PowerBounds::new(5.0, 50.0).expect("valid bounds")
}

/// Generator built from the `priority` preset.
pub fn priority_generator() -> ProfileGenerator {
    GeneratorConfig::priority()
        .build_generator()
        .expect("priority preset should build")
}

/// The four standard profiles in request order.
pub fn priority_names() -> Vec<String> {
    GeneratorConfig::priority().generation.profiles
}

/// Full `priority` profile set for `seed`.
pub fn priority_set(seed: u64) -> ProfileSet {
    priority_generator()
        .build_profiles(&priority_names(), seed)
        .expect("generation should succeed")
}

/// Full `uniform` preset set ("Profile 1..3") for `seed`.
pub fn uniform_set(seed: u64) -> ProfileSet {
    let config = GeneratorConfig::uniform();
    config
        .build_generator()
        .expect("uniform preset should build")
        .build_profiles(&config.generation.profiles, seed)
        .expect("generation should succeed")
}
