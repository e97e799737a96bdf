use neon_mask_core::{CarvingTuning, Heightmap, LevelConfig, LevelRng, TileGrid};
use neon_mask_system_carving::{carve_features, FeatureCarver};

fn ground(columns: u32, rows: u32, depth: u32) -> (Heightmap, TileGrid) {
    let heightmap = Heightmap::from_depths(vec![depth; usize::try_from(columns).expect("fits")]);
    let mut grid = TileGrid::new(columns, rows);
    for column in 0..columns {
        for row in heightmap.surface_row(column, rows)..rows {
            grid.stamp(i64::from(column), i64::from(row));
        }
    }
    (heightmap, grid)
}

#[test]
fn disabled_tuning_leaves_grid_untouched() {
    let config = LevelConfig::classic(40, 20);
    let (heightmap, mut grid) = ground(40, 20, 5);
    let before = grid.clone();
    let mut rng = LevelRng::from_seed(3);
    let mut untouched = LevelRng::from_seed(3);

    carve_features(&config, &heightmap, &mut grid, &mut rng);

    assert_eq!(grid, before);
    assert_eq!(rng.next_int(0, 1_000_000), untouched.next_int(0, 1_000_000));
}

#[test]
fn carving_keeps_tiles_in_bounds() {
    for seed in 0..8 {
        let config = LevelConfig::neon(60, 24);
        let (heightmap, mut grid) = ground(60, 24, 6);
        carve_features(&config, &heightmap, &mut grid, &mut LevelRng::from_seed(seed));
        assert!(grid
            .iter()
            .all(|coord| coord.column() < 60 && coord.row() < 24));
    }
}

#[test]
fn pillars_rise_above_flat_ground() {
    let mut config = LevelConfig::neon(50, 30);
    config.carving = CarvingTuning {
        pillars_per_column: 0.2,
        ..CarvingTuning::disabled()
    };
    let (heightmap, mut grid) = ground(50, 30, 4);
    let before = grid.len();

    FeatureCarver::new(&config).carve(&heightmap, &mut grid, &mut LevelRng::from_seed(12));

    assert!(grid.len() > before, "pillars should add tiles");
    assert!(grid.iter().any(|coord| coord.row() < 26));
}

#[test]
fn caverns_remove_ground_tiles() {
    let mut config = LevelConfig::neon(50, 30);
    config.carving = CarvingTuning {
        caverns_per_column: 0.2,
        ..CarvingTuning::disabled()
    };
    let (heightmap, mut grid) = ground(50, 30, 12);
    let before = grid.len();

    FeatureCarver::new(&config).carve(&heightmap, &mut grid, &mut LevelRng::from_seed(12));

    assert!(grid.len() < before, "caverns should remove tiles");
    assert!(grid.iter().all(|coord| coord.row() >= 18));
}
