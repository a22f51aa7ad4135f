//! Property tests for partitioning and generated schedules.

mod common;

use power_schedule::config::GeneratorConfig;
use power_schedule::schedule::partition::partition;
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

proptest! {
    #[test]
    fn partition_sums_to_horizon(
        horizon in 1usize..200,
        min_dur in 1usize..6,
        extra in 0usize..10,
        seed in any::<u64>(),
    ) {
        let max_dur = min_dur + extra;
        let mut rng = StdRng::seed_from_u64(seed);
        let intervals = partition(horizon, min_dur, max_dur, &mut rng).unwrap();

        prop_assert_eq!(intervals.iter().map(|iv| iv.duration).sum::<usize>(), horizon);
        prop_assert!(intervals.iter().all(|iv| iv.duration >= 1 && iv.duration <= max_dur));
        // only the last interval may be cut short
        let (_, head) = intervals.split_last().unwrap();
        prop_assert!(head.iter().all(|iv| iv.duration >= min_dur));
        prop_assert_eq!(intervals[0].start, 0);
    }

    #[test]
    fn generated_values_stay_in_bounds(seed in any::<u64>(), hours in 1usize..72) {
        let mut config = GeneratorConfig::priority();
        config.horizon.hours = hours;
        let generator = config.build_generator().unwrap();
        let set = generator
            .build_profiles(&config.generation.profiles, seed)
            .unwrap();
        let bounds = common::default_bounds();

        for profile in set.profiles() {
            prop_assert_eq!(profile.schedule.len(), hours);
            prop_assert!(profile.schedule.values().iter().all(|&v| bounds.contains(v)));
        }
    }
}
