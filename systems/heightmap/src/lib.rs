#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Heightmap system producing one ground depth per level column.
//!
//! Two strategies are available. The rolling walk nudges the depth by at most
//! two tiles per column and keeps the ground in the lower half of the level.
//! Layered noise sums four sine octaves with per-generation phases and adds
//! jitter that widens with difficulty.

use std::f64::consts::TAU;

use neon_mask_core::{Heightmap, LevelConfig, LevelRng, TerrainMode};

/// Smallest ground depth any column may have.
const MIN_DEPTH: i64 = 3;
/// Probability that a rolling-walk column gains an extra tile of height.
const HILL_PROBABILITY: f64 = 0.05;
/// Frequency and amplitude of each noise octave.
const OCTAVES: [(f64, f64); 4] = [(0.035, 4.0), (0.08, 2.2), (0.17, 1.1), (0.31, 0.6)];
/// Jitter applied at difficulty zero, in tiles.
const BASE_JITTER: f64 = 0.5;
/// Additional jitter per unit of difficulty, in tiles.
const JITTER_PER_DIFFICULTY: f64 = 1.5;

/// Pure system that synthesises the terrain profile.
#[derive(Clone, Copy, Debug)]
pub struct HeightmapBuilder {
    columns: u32,
    rows: u32,
    base_depth: u32,
    mode: TerrainMode,
    difficulty: f32,
}

impl HeightmapBuilder {
    /// Creates a builder using the dimensions and terrain settings of `config`.
    #[must_use]
    pub fn new(config: &LevelConfig) -> Self {
        Self {
            columns: config.width,
            rows: config.height,
            base_depth: config.base_ground_height,
            mode: config.terrain,
            difficulty: config.difficulty,
        }
    }

    /// Draws the heightmap from `rng`.
    pub fn build(&self, rng: &mut LevelRng) -> Heightmap {
        let depths = match self.mode {
            TerrainMode::RollingWalk => self.rolling_walk(rng),
            TerrainMode::LayeredNoise => self.layered_noise(rng),
        };
        Heightmap::from_depths(depths)
    }

    fn rolling_walk(&self, rng: &mut LevelRng) -> Vec<u32> {
        let ceiling = MIN_DEPTH.max(i64::from(self.rows / 2));
        let mut depth = i64::from(self.base_depth).clamp(MIN_DEPTH, ceiling);
        let mut depths = Vec::with_capacity(capacity(self.columns));
        for column in 0..self.columns {
            if column > 0 {
                let change = rng.next_int(-1, 1);
                let hill = i64::from(rng.chance(HILL_PROBABILITY));
                depth = (depth + change + hill).clamp(MIN_DEPTH, ceiling);
            }
            depths.push(to_depth(depth));
        }
        depths
    }

    fn layered_noise(&self, rng: &mut LevelRng) -> Vec<u32> {
        let ceiling = MIN_DEPTH.max(i64::from(self.rows) - 3);
        let phases: Vec<f64> = OCTAVES.iter().map(|_| rng.uniform(0.0, TAU)).collect();
        let jitter = BASE_JITTER + f64::from(self.difficulty.max(0.0)) * JITTER_PER_DIFFICULTY;
        let base = f64::from(self.base_depth);

        let mut depths = Vec::with_capacity(capacity(self.columns));
        for column in 0..self.columns {
            let x = f64::from(column);
            let wave: f64 = OCTAVES
                .iter()
                .zip(&phases)
                .map(|((frequency, amplitude), phase)| amplitude * (x * frequency + phase).sin())
                .sum();
            let offset = rng.uniform(-jitter, jitter);
            let depth = round_to_tiles(base + wave + offset).clamp(MIN_DEPTH, ceiling);
            depths.push(to_depth(depth));
        }
        depths
    }
}

/// Builds the heightmap described by `config`.
pub fn build_heightmap(config: &LevelConfig, rng: &mut LevelRng) -> Heightmap {
    HeightmapBuilder::new(config).build(rng)
}

fn round_to_tiles(value: f64) -> i64 {
    let rounded = value.round();
    if rounded.is_nan() {
        MIN_DEPTH
    } else {
        // Saturating float-to-int conversion.
        rounded as i64
    }
}

fn to_depth(depth: i64) -> u32 {
    u32::try_from(depth).unwrap_or(u32::MAX)
}

fn capacity(columns: u32) -> usize {
    usize::try_from(columns).unwrap_or(0)
}
