#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Spawn selection system choosing collectible and power-up locations.
//!
//! Candidates are shuffled and accepted greedily. Collectibles and power-ups
//! share one set of used columns, so no column hosts more than one spawn.

use glam::Vec2;
use neon_mask_core::{
    pixel, Hazard, LevelConfig, LevelRng, PixelRect, SpawnPoint, SpawnTuning, TileCoord,
    TileLayer, TILE_SIZE,
};

/// Rarity tiers drawn for each accepted collectible.
const COLLECTIBLE_RARITIES: [u8; 7] = [1, 1, 1, 1, 2, 2, 3];

/// Spawn points accepted for a level.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SpawnSelection {
    /// Collectible spawns in acceptance order.
    pub collectibles: Vec<SpawnPoint>,
    /// Power-up spawns in acceptance order.
    pub powerups: Vec<SpawnPoint>,
}

/// Pure system that picks spawn points from the classified layer.
#[derive(Clone, Debug)]
pub struct SpawnSelector {
    columns: u32,
    tuning: SpawnTuning,
}

impl SpawnSelector {
    /// Creates a selector using the width and spawn settings of `config`.
    #[must_use]
    pub fn new(config: &LevelConfig) -> Self {
        Self {
            columns: config.width,
            tuning: config.spawns.clone(),
        }
    }

    /// Selects collectibles first, then power-ups, avoiding `hazards`.
    pub fn select(
        &self,
        layer: &TileLayer,
        hazards: &[Hazard],
        rng: &mut LevelRng,
    ) -> SpawnSelection {
        let mut used = UsedColumns::new(self.columns);
        let collectibles = self.select_collectibles(layer, hazards, &mut used, rng);
        let powerups = self.select_powerups(layer, &mut used, rng);
        SpawnSelection {
            collectibles,
            powerups,
        }
    }

    fn select_collectibles(
        &self,
        layer: &TileLayer,
        hazards: &[Hazard],
        used: &mut UsedColumns,
        rng: &mut LevelRng,
    ) -> Vec<SpawnPoint> {
        let mut candidates: Vec<TileCoord> = layer.surface_tiles().map(|tile| tile.coord()).collect();
        let budget = self
            .tuning
            .collectible_budget
            .resolve(self.columns, candidates.len());
        rng.shuffle(&mut candidates);

        let mut accepted = Vec::new();
        for coord in candidates {
            if accepted.len() >= budget {
                break;
            }
            if used.contains(coord.column()) {
                continue;
            }
            let footprint = footprint(coord);
            if hazards
                .iter()
                .any(|hazard| hazard.rect().intersects(&footprint))
            {
                continue;
            }
            used.insert(coord.column());
            let tier = rng.choice(&COLLECTIBLE_RARITIES).copied().unwrap_or(1);
            accepted.push(spawn_at(coord, self.tuning.collectible_lift, tier));
        }
        accepted
    }

    fn select_powerups(
        &self,
        layer: &TileLayer,
        used: &mut UsedColumns,
        rng: &mut LevelRng,
    ) -> Vec<SpawnPoint> {
        let mut candidates: Vec<(TileCoord, usize)> = layer
            .ground_surface_tiles()
            .filter_map(|tile| {
                let coord = tile.coord();
                self.tuning
                    .powerup_residue_index(coord.column())
                    .map(|index| (coord, index))
            })
            .collect();
        rng.shuffle(&mut candidates);
        let budget = self.tuning.powerup_budget(self.columns);

        let mut accepted = Vec::new();
        for (coord, residue_index) in candidates {
            if accepted.len() >= budget {
                break;
            }
            if used.contains(coord.column()) {
                continue;
            }
            used.insert(coord.column());
            let tier = u8::try_from(residue_index + 1).unwrap_or(u8::MAX);
            accepted.push(spawn_at(coord, self.tuning.powerup_lift, tier));
        }
        accepted
    }
}

/// Selects the spawns described by `config`.
pub fn select_spawns(
    config: &LevelConfig,
    layer: &TileLayer,
    hazards: &[Hazard],
    rng: &mut LevelRng,
) -> SpawnSelection {
    SpawnSelector::new(config).select(layer, hazards, rng)
}

/// The surface tile together with the air cell a pickup hovers in.
fn footprint(coord: TileCoord) -> PixelRect {
    let size = i32::try_from(TILE_SIZE).unwrap_or(i32::MAX);
    PixelRect::new(
        pixel(coord.column()),
        pixel(coord.row()).saturating_sub(size),
        TILE_SIZE,
        TILE_SIZE * 2,
    )
}

fn spawn_at(coord: TileCoord, lift: f32, tier: u8) -> SpawnPoint {
    let size = TILE_SIZE as f32;
    let x = coord.column() as f32 * size + size / 2.0;
    let y = coord.row() as f32 * size - size * lift;
    SpawnPoint::new(Vec2::new(x, y), coord.column(), tier)
}

#[derive(Debug)]
struct UsedColumns {
    columns: Vec<bool>,
}

impl UsedColumns {
    fn new(width: u32) -> Self {
        Self {
            columns: vec![false; usize::try_from(width).unwrap_or(0)],
        }
    }

    fn contains(&self, column: u32) -> bool {
        usize::try_from(column)
            .ok()
            .and_then(|index| self.columns.get(index))
            .copied()
            .unwrap_or(false)
    }

    fn insert(&mut self, column: u32) {
        if let Some(slot) = usize::try_from(column)
            .ok()
            .and_then(|index| self.columns.get_mut(index))
        {
            *slot = true;
        }
    }
}
