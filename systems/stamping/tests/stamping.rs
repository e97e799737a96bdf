use neon_mask_core::{Heightmap, LevelConfig, LevelRng, TileCoord};
use neon_mask_system_stamping::{stamp_terrain, TerrainStamper};

fn flat(columns: usize, depth: u32) -> Heightmap {
    Heightmap::from_depths(vec![depth; columns])
}

#[test]
fn ground_fills_each_column_to_the_floor() {
    let config = LevelConfig::classic(12, 10).with_platform_attempts(0);
    let heightmap = Heightmap::from_depths(vec![3, 4, 5, 4, 3, 3, 4, 5, 5, 4, 3, 3]);
    let grid = stamp_terrain(&config, &heightmap, &mut LevelRng::from_seed(1));

    for (column, depth) in heightmap.depths().iter().enumerate() {
        let column = u32::try_from(column).expect("column fits");
        for row in 0..10 {
            let expected = row >= 10 - depth;
            assert_eq!(
                grid.contains(TileCoord::new(column, row)),
                expected,
                "column {column} row {row}"
            );
        }
    }
}

#[test]
fn platforms_stay_inside_the_grid() {
    let config = LevelConfig::classic(20, 12).with_platform_attempts(200);
    let grid = stamp_terrain(&config, &flat(20, 3), &mut LevelRng::from_seed(9));

    assert!(grid
        .iter()
        .all(|coord| coord.column() < 20 && coord.row() < 12));
}

#[test]
fn platforms_respect_row_limits() {
    let config = LevelConfig::classic(64, 40)
        .with_base_ground_height(5)
        .with_platform_attempts(120);
    let heightmap = flat(64, 3);
    let grid = stamp_terrain(&config, &heightmap, &mut LevelRng::from_seed(21));

    let floating: Vec<_> = grid.iter().filter(|coord| coord.row() < 37).collect();
    assert!(!floating.is_empty(), "expected platforms above the ground");
    for coord in floating {
        // Platform rows lie in [2, 34]; supports add at most one row.
        assert!(coord.row() >= 2, "platform too high at {coord:?}");
        assert!(coord.row() <= 35, "platform too low at {coord:?}");
    }
}

#[test]
fn identical_streams_stamp_identical_grids() {
    let config = LevelConfig::default();
    let heightmap = flat(220, 6);
    let stamper = TerrainStamper::new(&config);
    let first = stamper.stamp(&heightmap, &mut LevelRng::from_seed(5));
    let second = stamper.stamp(&heightmap, &mut LevelRng::from_seed(5));
    assert_eq!(first, second);
}
