#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative level state for Neon Mask.
//!
//! A [`Level`] is built once by [`Level::generate`], which runs every
//! generation system in a fixed order against a single [`LevelRng`]. The
//! finished level is immutable; collaborators read it exclusively through the
//! free functions in [`query`].

use neon_mask_core::{
    GoalRegion, Hazard, Heightmap, LevelConfig, LevelError, LevelRng, SpawnPoint, TileLayer,
};
use neon_mask_system_carving::carve_features;
use neon_mask_system_classification::classify;
use neon_mask_system_goal::place_goal;
use neon_mask_system_hazards::place_hazards;
use neon_mask_system_heightmap::build_heightmap;
use neon_mask_system_spawning::{select_spawns, SpawnSelection};
use neon_mask_system_stamping::stamp_terrain;
use tracing::{debug, info, info_span};

/// Generated platformer level.
#[derive(Clone, Debug)]
pub struct Level {
    config: LevelConfig,
    seed: u64,
    heightmap: Heightmap,
    layer: TileLayer,
    hazards: Vec<Hazard>,
    collectibles: Vec<SpawnPoint>,
    powerups: Vec<SpawnPoint>,
    goal: GoalRegion,
}

impl Level {
    /// Generates a level from `config`.
    ///
    /// When the configuration carries no seed a fresh one is drawn; it is
    /// recorded on the level and in its configuration so the level can be
    /// replayed.
    pub fn generate(config: &LevelConfig) -> Result<Self, LevelError> {
        config.validate()?;

        let seed = config.seed.unwrap_or_else(rand::random);
        let mut config = config.clone();
        config.seed = Some(seed);

        let _span = info_span!(
            "generate_level",
            seed,
            width = config.width,
            height = config.height
        )
        .entered();
        let mut rng = LevelRng::from_seed(seed);

        let heightmap = build_heightmap(&config, &mut rng);
        debug!(
            mode = ?config.terrain,
            min_depth = heightmap.depths().iter().min().copied().unwrap_or(0),
            max_depth = heightmap.depths().iter().max().copied().unwrap_or(0),
            "heightmap built"
        );

        let mut grid = stamp_terrain(&config, &heightmap, &mut rng);
        debug!(tiles = grid.len(), "terrain stamped");

        carve_features(&config, &heightmap, &mut grid, &mut rng);
        debug!(tiles = grid.len(), "features carved");

        let layer = classify(&grid, &mut rng);
        debug!(
            surface = layer.surface_tiles().count(),
            ground_surface = layer.ground_surface_tiles().count(),
            platform_surface = layer.platform_surface_tiles().count(),
            "surfaces classified"
        );

        let hazards = place_hazards(&config, &layer, &mut rng);
        debug!(hazards = hazards.len(), "hazards placed");

        let SpawnSelection {
            collectibles,
            powerups,
        } = select_spawns(&config, &layer, &hazards, &mut rng);
        debug!(
            collectibles = collectibles.len(),
            powerups = powerups.len(),
            "spawns selected"
        );

        let goal = place_goal(&config, &layer);
        debug!(
            column = goal.anchor().column(),
            row = goal.anchor().row(),
            "goal placed"
        );

        let level = Self {
            config,
            seed,
            heightmap,
            layer,
            hazards,
            collectibles,
            powerups,
            goal,
        };
        let summary = query::summary(&level);
        info!(
            tiles = summary.tiles,
            hazards = summary.hazards(),
            collectibles = summary.collectibles,
            powerups = summary.powerups,
            "level generated"
        );
        Ok(level)
    }
}

/// Aggregate counts describing a generated level.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct LevelSummary {
    /// Number of solid tiles.
    pub tiles: usize,
    /// Number of tiles exposed to air from above.
    pub surface_tiles: usize,
    /// Number of exposed tiles resting on ground mass.
    pub ground_surface_tiles: usize,
    /// Number of exposed tiles of floating platforms.
    pub platform_surface_tiles: usize,
    /// Number of spike hazards.
    pub spikes: usize,
    /// Number of pulse hazards.
    pub pulses: usize,
    /// Number of beam hazards.
    pub beams: usize,
    /// Number of collectible spawns.
    pub collectibles: usize,
    /// Number of power-up spawns.
    pub powerups: usize,
}

impl LevelSummary {
    /// Total number of hazards of every kind.
    #[must_use]
    pub const fn hazards(&self) -> usize {
        self.spikes + self.pulses + self.beams
    }
}

/// Read-only accessors over a generated [`Level`].
///
/// Spatial queries outside the level return empty results.
pub mod query {
    use neon_mask_core::{
        GoalRegion, Hazard, HazardKind, Heightmap, LevelConfig, PixelRect, SpawnPoint, Tile,
        TileCoord, TILE_SIZE,
    };

    use super::{Level, LevelSummary};

    /// Every solid tile in row-major order.
    pub fn tiles(level: &Level) -> impl Iterator<Item = &Tile> + '_ {
        level.layer.iter()
    }

    /// Tiles whose pixel rectangle strictly intersects `region`, in row-major order.
    pub fn tiles_in_region(level: &Level, region: PixelRect) -> impl Iterator<Item = &Tile> + '_ {
        level.layer.tiles_in_rect(region)
    }

    /// Tile stored at `coord`, if any.
    #[must_use]
    pub fn tile_at(level: &Level, coord: TileCoord) -> Option<&Tile> {
        level.layer.get(coord)
    }

    /// Reports whether a tile exists at `coord` with nothing above it.
    #[must_use]
    pub fn is_surface(level: &Level, coord: TileCoord) -> bool {
        tile_at(level, coord).map_or(false, Tile::is_surface)
    }

    /// Reports whether a surface tile at `coord` rests on another tile.
    #[must_use]
    pub fn is_ground_surface(level: &Level, coord: TileCoord) -> bool {
        tile_at(level, coord).map_or(false, Tile::is_ground_surface)
    }

    /// Hazards in placement order.
    #[must_use]
    pub fn hazards(level: &Level) -> &[Hazard] {
        &level.hazards
    }

    /// Collectible spawn points in acceptance order.
    #[must_use]
    pub fn collectible_spawns(level: &Level) -> &[SpawnPoint] {
        &level.collectibles
    }

    /// Power-up spawn points in acceptance order.
    #[must_use]
    pub fn powerup_spawns(level: &Level) -> &[SpawnPoint] {
        &level.powerups
    }

    /// Width of the level in pixels.
    #[must_use]
    pub fn pixel_width(level: &Level) -> u32 {
        level.config.width.saturating_mul(TILE_SIZE)
    }

    /// Height of the level in pixels.
    #[must_use]
    pub fn pixel_height(level: &Level) -> u32 {
        level.config.height.saturating_mul(TILE_SIZE)
    }

    /// End-of-level goal region.
    #[must_use]
    pub fn goal_region(level: &Level) -> GoalRegion {
        level.goal
    }

    /// Seed the level was generated from.
    #[must_use]
    pub fn seed(level: &Level) -> u64 {
        level.seed
    }

    /// Width and height of the level in tiles.
    #[must_use]
    pub fn dimensions(level: &Level) -> (u32, u32) {
        (level.config.width, level.config.height)
    }

    /// Per-column ground depths the terrain was stamped from.
    #[must_use]
    pub fn heightmap(level: &Level) -> &Heightmap {
        &level.heightmap
    }

    /// Configuration the level was generated from, with its seed filled in.
    #[must_use]
    pub fn config(level: &Level) -> &LevelConfig {
        &level.config
    }

    /// Aggregate counts of the level contents.
    #[must_use]
    pub fn summary(level: &Level) -> LevelSummary {
        let count = |kind: HazardKind| {
            level
                .hazards
                .iter()
                .filter(|hazard| hazard.kind() == kind)
                .count()
        };
        LevelSummary {
            tiles: level.layer.len(),
            surface_tiles: level.layer.surface_tiles().count(),
            ground_surface_tiles: level.layer.ground_surface_tiles().count(),
            platform_surface_tiles: level.layer.platform_surface_tiles().count(),
            spikes: count(HazardKind::Spike),
            pulses: count(HazardKind::Pulse),
            beams: count(HazardKind::Beam),
            collectibles: level.collectibles.len(),
            powerups: level.powerups.len(),
        }
    }
}
