#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Neon Mask level generator.
//!
//! This crate defines the value types that flow between the generation
//! systems and the authoritative level. Systems receive a [`LevelRng`] and the
//! committed output of the previous stage, and hand back plain values: a
//! [`Heightmap`], a stamped [`TileGrid`], a classified [`TileLayer`], lists of
//! [`Hazard`] and [`SpawnPoint`] values, and finally a [`GoalRegion`]. None of
//! these types carry identity or shared mutable state.

pub mod config;
pub mod grid;
pub mod rng;

pub use config::{
    BeamTuning, CarvingTuning, CollectibleBudget, HazardTuning, LevelConfig, PeriodRange,
    PlatformTuning, SpawnTuning, TerrainMode,
};
pub use grid::{AdjacencyMask, Heightmap, SurfaceKind, Tile, TileGrid, TileLayer};
pub use rng::LevelRng;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Side length of a single square tile measured in pixels.
pub const TILE_SIZE: u32 = 16;

/// Number of cosmetic variants a tile may be assigned.
pub const VARIANT_COUNT: u8 = 4;

/// Errors raised while constructing a level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum LevelError {
    /// Either dimension was zero, so no grid can be laid out.
    #[error("level dimensions must be positive, got {width}x{height}")]
    InvalidDimensions {
        /// Requested number of tile columns.
        width: u32,
        /// Requested number of tile rows.
        height: u32,
    },
}

/// Location of a single tile expressed as column and row coordinates.
///
/// Row zero is the top of the level; rows grow downward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileCoord {
    column: u32,
    row: u32,
}

impl TileCoord {
    /// Creates a new tile coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the tile.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the tile.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Pixel-space rectangle covered by the tile.
    #[must_use]
    pub fn pixel_rect(&self) -> PixelRect {
        PixelRect::new(
            pixel(self.column),
            pixel(self.row),
            TILE_SIZE,
            TILE_SIZE,
        )
    }
}

/// Converts a tile index into the pixel offset of its leading edge.
#[must_use]
pub fn pixel(tiles: u32) -> i32 {
    i32::try_from(u64::from(tiles) * u64::from(TILE_SIZE)).unwrap_or(i32::MAX)
}

/// Axis-aligned rectangle expressed in pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelRect {
    x: i32,
    y: i32,
    width: u32,
    height: u32,
}

impl PixelRect {
    /// Creates a rectangle from its upper-left corner and size.
    #[must_use]
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Horizontal coordinate of the left edge.
    #[must_use]
    pub const fn left(&self) -> i32 {
        self.x
    }

    /// Vertical coordinate of the top edge.
    #[must_use]
    pub const fn top(&self) -> i32 {
        self.y
    }

    /// Horizontal coordinate one past the right edge.
    #[must_use]
    pub fn right(&self) -> i64 {
        i64::from(self.x) + i64::from(self.width)
    }

    /// Vertical coordinate one past the bottom edge.
    #[must_use]
    pub fn bottom(&self) -> i64 {
        i64::from(self.y) + i64::from(self.height)
    }

    /// Width of the rectangle in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height of the rectangle in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Reports whether the rectangle covers no area.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Reports whether the two rectangles share a region of positive area.
    ///
    /// Rectangles that merely touch along an edge do not intersect.
    #[must_use]
    pub fn intersects(&self, other: &PixelRect) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        i64::from(self.x) < other.right()
            && i64::from(other.x) < self.right()
            && i64::from(self.y) < other.bottom()
            && i64::from(other.y) < self.bottom()
    }

    /// Returns the overlapping region of two rectangles, if any.
    #[must_use]
    pub fn intersection(&self, other: &PixelRect) -> Option<PixelRect> {
        if !self.intersects(other) {
            return None;
        }
        let left = i64::from(self.x).max(i64::from(other.x));
        let top = i64::from(self.y).max(i64::from(other.y));
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        Some(PixelRect::new(
            i32::try_from(left).ok()?,
            i32::try_from(top).ok()?,
            u32::try_from(right - left).ok()?,
            u32::try_from(bottom - top).ok()?,
        ))
    }
}

/// Visual family a hazard belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HazardKind {
    /// Static spikes resting on exposed ground.
    Spike,
    /// Pulsing orb hovering above a floating platform.
    Pulse,
    /// Full-column vertical beam.
    Beam,
}

/// Damage tier consumed by the game-over logic of collaborators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DamageTier(u8);

impl DamageTier {
    /// Creates a new damage tier.
    #[must_use]
    pub const fn new(value: u8) -> Self {
        Self(value)
    }

    /// Retrieves the numeric tier.
    #[must_use]
    pub const fn get(&self) -> u8 {
        self.0
    }
}

/// Visual colour applied to a hazard.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HazardColor {
    red: u8,
    green: u8,
    blue: u8,
}

impl HazardColor {
    /// Creates a new colour from byte RGB components.
    #[must_use]
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Red component of the colour.
    #[must_use]
    pub const fn red(&self) -> u8 {
        self.red
    }

    /// Green component of the colour.
    #[must_use]
    pub const fn green(&self) -> u8 {
        self.green
    }

    /// Blue component of the colour.
    #[must_use]
    pub const fn blue(&self) -> u8 {
        self.blue
    }
}

/// Animation timing carried by a hazard and consumed by renderers.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pulse {
    period: f32,
    phase: f32,
}

impl Pulse {
    /// Timing used by hazards that do not animate.
    pub const STATIC: Pulse = Pulse {
        period: 1.0,
        phase: 0.0,
    };

    /// Creates a pulse timing. Non-positive periods fall back to the static period.
    #[must_use]
    pub fn new(period: f32, phase: f32) -> Self {
        let period = if period > 0.0 {
            period
        } else {
            Self::STATIC.period
        };
        Self {
            period,
            phase: phase.rem_euclid(1.0),
        }
    }

    /// Seconds per full pulse cycle; always positive.
    #[must_use]
    pub const fn period(&self) -> f32 {
        self.period
    }

    /// Normalised offset into the cycle in `[0, 1)`.
    #[must_use]
    pub const fn phase(&self) -> f32 {
        self.phase
    }
}

/// Rectangular hazard placed by the hazard system.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Hazard {
    kind: HazardKind,
    rect: PixelRect,
    damage: DamageTier,
    color: HazardColor,
    pulse: Pulse,
}

impl Hazard {
    /// Creates a new hazard description.
    #[must_use]
    pub const fn new(
        kind: HazardKind,
        rect: PixelRect,
        damage: DamageTier,
        color: HazardColor,
        pulse: Pulse,
    ) -> Self {
        Self {
            kind,
            rect,
            damage,
            color,
            pulse,
        }
    }

    /// Family the hazard belongs to.
    #[must_use]
    pub const fn kind(&self) -> HazardKind {
        self.kind
    }

    /// Pixel-space footprint of the hazard.
    #[must_use]
    pub const fn rect(&self) -> PixelRect {
        self.rect
    }

    /// Damage tier applied on contact.
    #[must_use]
    pub const fn damage(&self) -> DamageTier {
        self.damage
    }

    /// Colour used when drawing the hazard.
    #[must_use]
    pub const fn color(&self) -> HazardColor {
        self.color
    }

    /// Animation timing of the hazard.
    #[must_use]
    pub const fn pulse(&self) -> Pulse {
        self.pulse
    }
}

/// Spawn location for a collectible or power-up.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpawnPoint {
    position: Vec2,
    column: u32,
    tier: u8,
}

impl SpawnPoint {
    /// Creates a spawn point derived from the tile in `column`.
    #[must_use]
    pub const fn new(position: Vec2, column: u32, tier: u8) -> Self {
        Self {
            position,
            column,
            tier,
        }
    }

    /// Pixel-space position of the spawn.
    #[must_use]
    pub const fn position(&self) -> Vec2 {
        self.position
    }

    /// Column of the surface tile the spawn was derived from.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Rarity tier of the spawn.
    #[must_use]
    pub const fn tier(&self) -> u8 {
        self.tier
    }
}

/// End-of-level goal area.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GoalRegion {
    anchor: TileCoord,
    rect: PixelRect,
}

impl GoalRegion {
    /// Width of the goal measured in tiles.
    pub const WIDTH_IN_TILES: u32 = 3;
    /// Height of the goal measured in tiles.
    pub const HEIGHT_IN_TILES: u32 = 5;

    /// Creates a goal whose upper-left tile is `anchor`.
    #[must_use]
    pub fn anchored_at(anchor: TileCoord) -> Self {
        let rect = PixelRect::new(
            pixel(anchor.column()),
            pixel(anchor.row()),
            Self::WIDTH_IN_TILES * TILE_SIZE,
            Self::HEIGHT_IN_TILES * TILE_SIZE,
        );
        Self { anchor, rect }
    }

    /// Upper-left tile of the goal.
    #[must_use]
    pub const fn anchor(&self) -> TileCoord {
        self.anchor
    }

    /// Pixel-space rectangle covered by the goal.
    #[must_use]
    pub const fn rect(&self) -> PixelRect {
        self.rect
    }
}
