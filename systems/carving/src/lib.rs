#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Feature carving system that reshapes the stamped terrain.
//!
//! Three passes run in order:
//!
//! 1. pillars: two-tile-wide columns rising from just above the local ground;
//! 2. caverns: rectangular pockets removed below the local ground surface;
//! 3. cleanup: tiles with nothing beneath them for a few rows are removed with
//!    a fixed probability.
//!
//! The cleanup pass is a heuristic that thins out floating debris. It does not
//! prove that the remaining terrain is reachable.

use neon_mask_core::{CarvingTuning, Heightmap, LevelConfig, LevelRng, TileCoord, TileGrid};

const PILLAR_WIDTH: i64 = 2;
const PILLAR_MIN_HEIGHT: i64 = 3;
const PILLAR_MAX_HEIGHT: i64 = 9;
const PILLAR_MAX_LIFT: i64 = 2;
const CAVERN_MIN_WIDTH: i64 = 3;
const CAVERN_MAX_WIDTH: i64 = 7;
const CAVERN_MIN_HEIGHT: i64 = 2;
const CAVERN_MAX_HEIGHT: i64 = 4;
const CAVERN_MIN_DEPTH: i64 = 1;
const CAVERN_MAX_DEPTH: i64 = 4;

/// Pure system that adds pillars, removes caverns and trims unsupported tiles.
#[derive(Clone, Debug)]
pub struct FeatureCarver {
    columns: u32,
    rows: u32,
    tuning: CarvingTuning,
}

impl FeatureCarver {
    /// Creates a carver using the dimensions and carving settings of `config`.
    #[must_use]
    pub fn new(config: &LevelConfig) -> Self {
        Self {
            columns: config.width,
            rows: config.height,
            tuning: config.carving.clone(),
        }
    }

    /// Applies every carving pass to `grid` in place.
    pub fn carve(&self, heightmap: &Heightmap, grid: &mut TileGrid, rng: &mut LevelRng) {
        for _ in 0..self.tuning.pillar_attempts(self.columns) {
            self.raise_pillar(heightmap, grid, rng);
        }
        for _ in 0..self.tuning.cavern_attempts(self.columns) {
            self.hollow_cavern(heightmap, grid, rng);
        }
        self.remove_unsupported(grid, rng);
    }

    fn raise_pillar(&self, heightmap: &Heightmap, grid: &mut TileGrid, rng: &mut LevelRng) {
        let column = rng.next_int(0, i64::from(self.columns) - PILLAR_WIDTH);
        let height = rng.next_int(PILLAR_MIN_HEIGHT, PILLAR_MAX_HEIGHT);
        let lift = rng.next_int(0, PILLAR_MAX_LIFT);

        let bottom = self.surface_row(heightmap, column) - 1 - lift;
        for row in (bottom - height + 1)..=bottom {
            for offset in 0..PILLAR_WIDTH {
                grid.stamp(column + offset, row);
            }
        }
    }

    fn hollow_cavern(&self, heightmap: &Heightmap, grid: &mut TileGrid, rng: &mut LevelRng) {
        let width = rng.next_int(CAVERN_MIN_WIDTH, CAVERN_MAX_WIDTH);
        let height = rng.next_int(CAVERN_MIN_HEIGHT, CAVERN_MAX_HEIGHT);
        let column = rng.next_int(0, (i64::from(self.columns) - width).max(0));
        let depth = rng.next_int(CAVERN_MIN_DEPTH, CAVERN_MAX_DEPTH);

        let top = self.surface_row(heightmap, column) + depth;
        for row in top..top + height {
            for offset in 0..width {
                grid.carve(column + offset, row);
            }
        }
    }

    fn remove_unsupported(&self, grid: &mut TileGrid, rng: &mut LevelRng) {
        if self.tuning.cleanup_probability <= 0.0 {
            return;
        }
        let lookahead = i64::from(self.tuning.support_lookahead.max(1));
        let snapshot: &TileGrid = grid;
        let candidates: Vec<TileCoord> = snapshot
            .iter()
            .filter(|coord| !self.is_supported(snapshot, *coord, lookahead))
            .collect();
        for coord in candidates {
            if rng.chance(self.tuning.cleanup_probability) {
                grid.carve(i64::from(coord.column()), i64::from(coord.row()));
            }
        }
    }

    /// A tile is supported when any of the `lookahead` rows beneath it holds a
    /// tile or lies below the level floor.
    fn is_supported(&self, grid: &TileGrid, coord: TileCoord, lookahead: i64) -> bool {
        let column = i64::from(coord.column());
        let row = i64::from(coord.row());
        (1..=lookahead).any(|distance| {
            let below = row + distance;
            below >= i64::from(self.rows) || grid.is_solid(column, below)
        })
    }

    fn surface_row(&self, heightmap: &Heightmap, column: i64) -> i64 {
        let column = u32::try_from(column.max(0)).unwrap_or(0);
        i64::from(heightmap.surface_row(column, self.rows))
    }
}

/// Applies the carving passes described by `config` to `grid`.
pub fn carve_features(
    config: &LevelConfig,
    heightmap: &Heightmap,
    grid: &mut TileGrid,
    rng: &mut LevelRng,
) {
    FeatureCarver::new(config).carve(heightmap, grid, rng);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn carver(columns: u32, rows: u32, tuning: CarvingTuning) -> FeatureCarver {
        FeatureCarver {
            columns,
            rows,
            tuning,
        }
    }

    #[test]
    fn tiles_on_the_floor_are_supported() {
        let mut grid = TileGrid::new(4, 4);
        grid.stamp(0, 3);
        let carver = carver(4, 4, CarvingTuning::neon());
        assert!(carver.is_supported(&grid, TileCoord::new(0, 3), 3));
    }

    #[test]
    fn support_is_searched_within_lookahead() {
        let mut grid = TileGrid::new(1, 10);
        grid.stamp(0, 1);
        grid.stamp(0, 4);
        let carver = carver(1, 10, CarvingTuning::neon());
        assert!(carver.is_supported(&grid, TileCoord::new(0, 1), 3));
        assert!(!carver.is_supported(&grid, TileCoord::new(0, 1), 2));
        assert!(!carver.is_supported(&grid, TileCoord::new(0, 4), 3));
    }

    #[test]
    fn certain_cleanup_removes_every_floating_tile() {
        let mut grid = TileGrid::new(3, 10);
        grid.stamp(1, 2);
        grid.stamp(0, 9);
        let tuning = CarvingTuning {
            cleanup_probability: 1.0,
            ..CarvingTuning::disabled()
        };
        let carver = carver(3, 10, tuning);
        carver.remove_unsupported(&mut grid, &mut LevelRng::from_seed(1));
        assert!(!grid.contains(TileCoord::new(1, 2)));
        assert!(grid.contains(TileCoord::new(0, 9)));
    }

    #[test]
    fn partial_cleanup_thins_floating_tiles_and_spares_the_floor() {
        const COLUMNS: u32 = 64;
        let carver = carver(COLUMNS, 10, CarvingTuning::neon());
        for seed in 0..16 {
            let mut grid = TileGrid::new(COLUMNS, 10);
            for column in 0..i64::from(COLUMNS) {
                grid.stamp(column, 2);
                grid.stamp(column, 7);
            }
            carver.remove_unsupported(&mut grid, &mut LevelRng::from_seed(seed));

            let floating = (0..COLUMNS)
                .filter(|column| grid.contains(TileCoord::new(*column, 2)))
                .count();
            assert!(floating > 0, "seed {seed} removed every floating tile");
            assert!(floating < COLUMNS as usize, "seed {seed} removed nothing");
            assert!((0..COLUMNS).all(|column| grid.contains(TileCoord::new(column, 7))));
        }
    }

    #[test]
    fn cleanup_candidates_are_fixed_before_removal() {
        let mut grid = TileGrid::new(1, 12);
        grid.stamp(0, 2);
        grid.stamp(0, 3);
        let tuning = CarvingTuning {
            cleanup_probability: 1.0,
            ..CarvingTuning::disabled()
        };
        let carver = carver(1, 12, tuning);
        carver.remove_unsupported(&mut grid, &mut LevelRng::from_seed(3));
        assert!(!grid.contains(TileCoord::new(0, 3)));
        assert!(grid.contains(TileCoord::new(0, 2)));
    }
}
