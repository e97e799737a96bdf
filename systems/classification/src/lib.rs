#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Surface classification system that freezes the carved grid.

use neon_mask_core::{AdjacencyMask, LevelRng, Tile, TileGrid, TileLayer, VARIANT_COUNT};

/// Pure system that computes adjacency masks and cosmetic variants.
#[derive(Debug, Default)]
pub struct SurfaceClassifier;

impl SurfaceClassifier {
    /// Classifies every tile of `grid`, drawing one variant per tile in row-major order.
    pub fn classify(&self, grid: &TileGrid, rng: &mut LevelRng) -> TileLayer {
        let mut layer = TileLayer::new(grid.columns(), grid.rows());
        let last_variant = i64::from(VARIANT_COUNT.saturating_sub(1));
        for coord in grid.iter() {
            let mask = AdjacencyMask::from_grid(grid, coord);
            let variant = u8::try_from(rng.next_int(0, last_variant)).unwrap_or(0);
            layer.insert(Tile::new(coord, mask, variant));
        }
        layer
    }
}

/// Classifies `grid` into a frozen tile layer.
pub fn classify(grid: &TileGrid, rng: &mut LevelRng) -> TileLayer {
    SurfaceClassifier.classify(grid, rng)
}
