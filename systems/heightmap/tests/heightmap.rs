use neon_mask_core::{LevelConfig, LevelRng};
use neon_mask_system_heightmap::{build_heightmap, HeightmapBuilder};

#[test]
fn rolling_walk_steps_are_bounded() {
    for seed in 0..16 {
        let config = LevelConfig::classic(220, 64).with_base_ground_height(6);
        let mut rng = LevelRng::from_seed(seed);
        let heightmap = build_heightmap(&config, &mut rng);

        assert_eq!(heightmap.len(), 220);
        for pair in heightmap.depths().windows(2) {
            let step = i64::from(pair[1]) - i64::from(pair[0]);
            assert!(step.abs() <= 2, "seed {seed} produced a step of {step}");
        }
        assert!(heightmap
            .depths()
            .iter()
            .all(|depth| (3..=32).contains(depth)));
    }
}

#[test]
fn layered_noise_stays_within_bounds() {
    for seed in 0..16 {
        let config = LevelConfig::neon(180, 60).with_difficulty(3.0);
        let mut rng = LevelRng::from_seed(seed);
        let heightmap = build_heightmap(&config, &mut rng);

        assert_eq!(heightmap.len(), 180);
        assert!(heightmap
            .depths()
            .iter()
            .all(|depth| (3..=57).contains(depth)));
    }
}

#[test]
fn identical_seeds_build_identical_profiles() {
    let config = LevelConfig::neon(96, 40);
    let builder = HeightmapBuilder::new(&config);
    let first = builder.build(&mut LevelRng::from_seed(77));
    let second = builder.build(&mut LevelRng::from_seed(77));
    assert_eq!(first, second);
}

#[test]
fn layered_noise_profile_is_not_flat() {
    let config = LevelConfig::neon(180, 60);
    let heightmap = build_heightmap(&config, &mut LevelRng::from_seed(5));
    let lowest = heightmap.depths().iter().min().copied();
    let highest = heightmap.depths().iter().max().copied();
    assert_ne!(lowest, highest);
}
