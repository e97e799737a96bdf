use std::collections::BTreeSet;

use neon_mask_core::{
    AdjacencyMask, DamageTier, Hazard, HazardColor, HazardKind, LevelConfig, LevelRng, PixelRect,
    Pulse, Tile, TileGrid, TileLayer,
};
use neon_mask_system_spawning::{select_spawns, SpawnSelection, SpawnSelector};

fn flat_layer(columns: u32, rows: u32) -> TileLayer {
    let mut grid = TileGrid::new(columns, rows);
    for column in 0..i64::from(columns) {
        for row in i64::from(rows) - 4..i64::from(rows) {
            grid.stamp(column, row);
        }
    }
    let mut layer = TileLayer::new(columns, rows);
    for coord in grid.iter() {
        layer.insert(Tile::new(coord, AdjacencyMask::from_grid(&grid, coord), 0));
    }
    layer
}

fn spawn_columns(selection: &SpawnSelection) -> Vec<u32> {
    selection
        .collectibles
        .iter()
        .chain(&selection.powerups)
        .map(|spawn| spawn.column())
        .collect()
}

#[test]
fn spawns_never_share_a_column() {
    for seed in 0..8 {
        let config = LevelConfig::classic(120, 30);
        let selection = select_spawns(&config, &flat_layer(120, 30), &[], &mut LevelRng::from_seed(seed));

        let columns = spawn_columns(&selection);
        let unique: BTreeSet<_> = columns.iter().copied().collect();
        assert_eq!(unique.len(), columns.len(), "seed {seed}");
    }
}

#[test]
fn budgets_are_respected() {
    let config = LevelConfig::classic(120, 30);
    let selection = select_spawns(&config, &flat_layer(120, 30), &[], &mut LevelRng::from_seed(4));

    assert_eq!(selection.collectibles.len(), 30);
    assert!(selection.powerups.len() <= 2);
    assert!(!selection.powerups.is_empty());
}

#[test]
fn collectibles_hover_above_their_tile() {
    let config = LevelConfig::classic(40, 20);
    let selection = select_spawns(&config, &flat_layer(40, 20), &[], &mut LevelRng::from_seed(6));

    for spawn in &selection.collectibles {
        let expected_x = spawn.column() as f32 * 16.0 + 8.0;
        assert!((spawn.position().x - expected_x).abs() < f32::EPSILON);
        assert!((spawn.position().y - (16.0 * 16.0 - 16.0 * 0.35)).abs() < 1e-4);
        assert!((1..=3).contains(&spawn.tier()));
    }
}

#[test]
fn powerups_use_residue_columns_and_tiers() {
    for seed in 0..8 {
        let config = LevelConfig::classic(300, 30);
        let selection = select_spawns(&config, &flat_layer(300, 30), &[], &mut LevelRng::from_seed(seed));

        assert!(selection.powerups.len() <= 6);
        for spawn in &selection.powerups {
            let residue = spawn.column() % 9;
            let expected_tier = match residue {
                2 => 1,
                5 => 2,
                7 => 3,
                other => panic!("power-up on column with residue {other}"),
            };
            assert_eq!(spawn.tier(), expected_tier);
            assert!((spawn.position().y - (26.0 * 16.0 - 8.0)).abs() < 1e-4);
        }
    }
}

#[test]
fn collectibles_avoid_hazards() {
    let config = LevelConfig::classic(24, 12);
    let hazards: Vec<Hazard> = (0..12)
        .map(|column| {
            Hazard::new(
                HazardKind::Spike,
                PixelRect::new(column * 32, 8 * 16, 16, 8),
                DamageTier::new(1),
                HazardColor::from_rgb(0xff, 0, 0),
                Pulse::STATIC,
            )
        })
        .collect();
    let selection = SpawnSelector::new(&config).select(
        &flat_layer(24, 12),
        &hazards,
        &mut LevelRng::from_seed(9),
    );

    assert_eq!(selection.collectibles.len(), 12);
    for spawn in &selection.collectibles {
        assert_eq!(spawn.column() % 2, 1, "collectible on hazard column");
    }
}

#[test]
fn sparse_layers_yield_fewer_spawns() {
    let config = LevelConfig::classic(10, 8);
    let selection = select_spawns(&config, &TileLayer::new(10, 8), &[], &mut LevelRng::from_seed(1));
    assert_eq!(selection, SpawnSelection::default());
}
