#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Goal placement system locating the end-of-level region.

use neon_mask_core::{GoalRegion, LevelConfig, TileCoord, TileLayer};

/// Number of trailing columns scanned for ground.
const SCAN_WIDTH: u32 = 8;
/// Rows between the ground surface and the goal anchor.
const GOAL_CLEARANCE: u32 = 3;
/// Rows between the base ground surface and the fallback anchor.
const FALLBACK_CLEARANCE: u32 = 4;

/// Pure system that anchors the goal on the ground near the right edge.
#[derive(Clone, Copy, Debug)]
pub struct GoalPlacer {
    columns: u32,
    rows: u32,
    base_depth: u32,
}

impl GoalPlacer {
    /// Creates a placer using the dimensions of `config`.
    #[must_use]
    pub fn new(config: &LevelConfig) -> Self {
        Self {
            columns: config.width,
            rows: config.height,
            base_depth: config.base_ground_height,
        }
    }

    /// Locates the goal. Consumes no randomness.
    #[must_use]
    pub fn place(&self, layer: &TileLayer) -> GoalRegion {
        let first = self.columns.saturating_sub(SCAN_WIDTH).max(1);
        let end = self.columns.saturating_sub(1);

        for column in first..end {
            let topmost = layer
                .column(column)
                .find(|tile| tile.is_ground_surface())
                .map(|tile| tile.coord().row());
            if let Some(row) = topmost {
                let anchor_row = i64::from(row) - i64::from(GOAL_CLEARANCE);
                return GoalRegion::anchored_at(TileCoord::new(column, clamp_row(anchor_row)));
            }
        }

        let column = if first < end {
            end - 1
        } else {
            first.min(self.columns.saturating_sub(1))
        };
        let fallback_row = i64::from(self.rows)
            - i64::from(self.base_depth)
            - i64::from(FALLBACK_CLEARANCE);
        GoalRegion::anchored_at(TileCoord::new(column, clamp_row(fallback_row)))
    }
}

/// Locates the goal for `config` on `layer`.
#[must_use]
pub fn place_goal(config: &LevelConfig, layer: &TileLayer) -> GoalRegion {
    GoalPlacer::new(config).place(layer)
}

/// The goal never starts above row one.
fn clamp_row(row: i64) -> u32 {
    u32::try_from(row.max(1)).unwrap_or(u32::MAX)
}
