use neon_mask_core::{
    AdjacencyMask, GoalRegion, LevelConfig, PixelRect, Tile, TileCoord, TileGrid, TileLayer,
};
use neon_mask_system_goal::place_goal;

fn layer_from(grid: &TileGrid) -> TileLayer {
    let mut layer = TileLayer::new(grid.columns(), grid.rows());
    for coord in grid.iter() {
        layer.insert(Tile::new(coord, AdjacencyMask::from_grid(grid, coord), 0));
    }
    layer
}

#[test]
fn goal_sits_three_rows_above_first_ground_column() {
    let mut grid = TileGrid::new(30, 20);
    for column in 25..30 {
        for row in 14..20 {
            grid.stamp(column, row);
        }
    }
    let config = LevelConfig::classic(30, 20);
    let goal = place_goal(&config, &layer_from(&grid));

    assert_eq!(goal.anchor(), TileCoord::new(25, 11));
    assert_eq!(goal.rect(), PixelRect::new(25 * 16, 11 * 16, 48, 80));
}

#[test]
fn floating_platforms_do_not_anchor_the_goal() {
    let mut grid = TileGrid::new(30, 20);
    grid.stamp(22, 5);
    grid.stamp(23, 5);
    for row in 12..20 {
        grid.stamp(27, row);
    }
    let config = LevelConfig::classic(30, 20);
    let goal = place_goal(&config, &layer_from(&grid));
    assert_eq!(goal.anchor(), TileCoord::new(27, 9));
}

#[test]
fn missing_ground_falls_back_to_rightmost_scanned_column() {
    let config = LevelConfig::classic(30, 20).with_base_ground_height(5);
    let goal = place_goal(&config, &TileLayer::new(30, 20));

    assert_eq!(goal.anchor(), TileCoord::new(28, 11));
    assert_eq!(
        goal.rect().width(),
        GoalRegion::WIDTH_IN_TILES * 16
    );
}

#[test]
fn goal_row_is_at_least_one() {
    let mut grid = TileGrid::new(12, 6);
    for column in 0..12 {
        for row in 1..6 {
            grid.stamp(column, row);
        }
    }
    let config = LevelConfig::classic(12, 6);
    let goal = place_goal(&config, &layer_from(&grid));
    assert_eq!(goal.anchor(), TileCoord::new(4, 1));
    assert_eq!(goal.rect().top(), 16);
}

#[test]
fn tiny_levels_fall_back_inside_the_level() {
    let config = LevelConfig::classic(1, 10);
    let goal = place_goal(&config, &TileLayer::new(1, 10));
    assert_eq!(goal.anchor().column(), 0);

    let config = LevelConfig::classic(2, 10);
    let goal = place_goal(&config, &TileLayer::new(2, 10));
    assert_eq!(goal.anchor().column(), 1);
}
