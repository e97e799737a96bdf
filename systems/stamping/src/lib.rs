#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Terrain stamping system that turns a heightmap into solid tiles.
//!
//! Ground mass fills every column from its surface row down to the floor.
//! Floating platforms are then scattered over the air region. Platforms may
//! overlap ground or each other; stamping an occupied cell is a no-op.

use neon_mask_core::{Heightmap, LevelConfig, LevelRng, TileGrid};

const PLATFORM_MIN_WIDTH: i64 = 3;
const PLATFORM_MAX_WIDTH: i64 = 7;
/// Highest row a platform is drawn at before jitter.
const PLATFORM_TOP_ROW: i64 = 3;
/// Highest row a platform may end up at after jitter.
const PLATFORM_CEILING_ROW: i64 = 2;
/// Rows kept clear between the lowest platform and the floor.
const PLATFORM_FLOOR_CLEARANCE: i64 = 6;
const VERTICAL_JITTER: [i64; 4] = [-1, 0, 0, 1];

/// Pure system that stamps ground and platforms into a fresh grid.
#[derive(Clone, Copy, Debug)]
pub struct TerrainStamper {
    columns: u32,
    rows: u32,
    base_depth: u32,
    platform_attempts: u32,
    support_probability: f64,
}

impl TerrainStamper {
    /// Creates a stamper using the dimensions and platform settings of `config`.
    #[must_use]
    pub fn new(config: &LevelConfig) -> Self {
        Self {
            columns: config.width,
            rows: config.height,
            base_depth: config.base_ground_height,
            platform_attempts: config.platform_attempts,
            support_probability: config.platforms.support_probability,
        }
    }

    /// Stamps the ground described by `heightmap` followed by the platforms.
    pub fn stamp(&self, heightmap: &Heightmap, rng: &mut LevelRng) -> TileGrid {
        let mut grid = TileGrid::new(self.columns, self.rows);
        self.stamp_ground(heightmap, &mut grid);
        for _ in 0..self.platform_attempts {
            self.stamp_platform(&mut grid, rng);
        }
        grid
    }

    fn stamp_ground(&self, heightmap: &Heightmap, grid: &mut TileGrid) {
        for column in 0..self.columns {
            let surface = heightmap.surface_row(column, self.rows);
            for row in surface..self.rows {
                grid.stamp(i64::from(column), i64::from(row));
            }
        }
    }

    fn stamp_platform(&self, grid: &mut TileGrid, rng: &mut LevelRng) {
        let columns = i64::from(self.columns);
        let rows = i64::from(self.rows);

        let width = rng.next_int(PLATFORM_MIN_WIDTH, PLATFORM_MAX_WIDTH);
        let column = rng.next_int(0, (columns - width - 1).max(0));
        let lowest = (rows - i64::from(self.base_depth) - PLATFORM_FLOOR_CLEARANCE)
            .max(PLATFORM_TOP_ROW);
        let row = rng.next_int(PLATFORM_TOP_ROW, lowest);
        let jitter = rng.choice(&VERTICAL_JITTER).copied().unwrap_or(0);
        let row = (row + jitter)
            .min(rows - PLATFORM_FLOOR_CLEARANCE)
            .max(PLATFORM_CEILING_ROW);

        for offset in 0..width {
            grid.stamp(column + offset, row);
            if rng.chance(self.support_probability) {
                grid.stamp(column + offset, row + 1);
            }
        }
    }
}

/// Stamps the terrain described by `config` and `heightmap`.
pub fn stamp_terrain(config: &LevelConfig, heightmap: &Heightmap, rng: &mut LevelRng) -> TileGrid {
    TerrainStamper::new(config).stamp(heightmap, rng)
}
