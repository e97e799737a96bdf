//! Dense tile storage used while stamping and once the level is frozen.
//!
//! [`TileGrid`] is the mutable occupancy grid that the stamping and carving
//! systems write into. The classification system freezes it into a
//! [`TileLayer`], where every solid cell carries its [`AdjacencyMask`] and
//! cosmetic variant. Both grids are dense `width * height` arrays indexed in
//! row-major order, so iteration order is fixed for a given shape.

use serde::{Deserialize, Serialize};

use crate::{PixelRect, TileCoord, TILE_SIZE};

/// Per-column ground depth produced by the heightmap system.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Heightmap {
    depths: Vec<u32>,
}

impl Heightmap {
    /// Wraps a sequence of column depths.
    #[must_use]
    pub fn from_depths(depths: Vec<u32>) -> Self {
        Self { depths }
    }

    /// Number of columns described by the heightmap.
    #[must_use]
    pub fn len(&self) -> usize {
        self.depths.len()
    }

    /// Reports whether the heightmap describes no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.depths.is_empty()
    }

    /// Ground depth of the provided column, if it exists.
    #[must_use]
    pub fn depth(&self, column: u32) -> Option<u32> {
        self.depths.get(usize::try_from(column).ok()?).copied()
    }

    /// Depths in column order.
    #[must_use]
    pub fn depths(&self) -> &[u32] {
        &self.depths
    }

    /// Topmost ground row of `column` in a level with `rows` rows.
    ///
    /// Missing columns report the level floor.
    #[must_use]
    pub fn surface_row(&self, column: u32, rows: u32) -> u32 {
        let depth = self.depth(column).unwrap_or(0);
        rows.saturating_sub(depth)
    }
}

/// Mutable occupancy grid written by the stamping and carving systems.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileGrid {
    columns: u32,
    rows: u32,
    cells: Vec<bool>,
}

impl TileGrid {
    /// Creates an empty grid of the provided shape.
    #[must_use]
    pub fn new(columns: u32, rows: u32) -> Self {
        let capacity_u64 = u64::from(columns) * u64::from(rows);
        let capacity = usize::try_from(capacity_u64).unwrap_or(0);
        Self {
            columns,
            rows,
            cells: vec![false; capacity],
        }
    }

    /// Number of columns contained in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows contained in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Marks the cell solid. Coordinates outside the grid are ignored.
    pub fn stamp(&mut self, column: i64, row: i64) {
        if let Some(index) = self.index(column, row) {
            self.cells[index] = true;
        }
    }

    /// Clears the cell. Coordinates outside the grid are ignored.
    pub fn carve(&mut self, column: i64, row: i64) {
        if let Some(index) = self.index(column, row) {
            self.cells[index] = false;
        }
    }

    /// Reports whether the cell holds a tile. Cells outside the grid are empty.
    #[must_use]
    pub fn is_solid(&self, column: i64, row: i64) -> bool {
        self.index(column, row)
            .map_or(false, |index| self.cells[index])
    }

    /// Reports whether the provided coordinate holds a tile.
    #[must_use]
    pub fn contains(&self, coord: TileCoord) -> bool {
        self.is_solid(i64::from(coord.column()), i64::from(coord.row()))
    }

    /// Number of solid cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.iter().filter(|solid| **solid).count()
    }

    /// Reports whether no cell is solid.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.cells.iter().any(|solid| *solid)
    }

    /// Iterates solid cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = TileCoord> + '_ {
        let columns = self.columns;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, solid)| **solid)
            .filter_map(move |(index, _)| coord_from_index(index, columns))
    }

    /// Topmost and bottommost solid rows of a column, if it holds any tile.
    #[must_use]
    pub fn column_extent(&self, column: u32) -> Option<(u32, u32)> {
        let solid_rows = (0..self.rows).filter(|row| {
            self.is_solid(i64::from(column), i64::from(*row))
        });
        let mut top = None;
        let mut bottom = None;
        for row in solid_rows {
            if top.is_none() {
                top = Some(row);
            }
            bottom = Some(row);
        }
        top.zip(bottom)
    }

    fn index(&self, column: i64, row: i64) -> Option<usize> {
        if column < 0 || row < 0 {
            return None;
        }
        if column >= i64::from(self.columns) || row >= i64::from(self.rows) {
            return None;
        }
        let width = usize::try_from(self.columns).ok()?;
        let row = usize::try_from(row).ok()?;
        let column = usize::try_from(column).ok()?;
        Some(row * width + column)
    }
}

fn coord_from_index(index: usize, columns: u32) -> Option<TileCoord> {
    let width = usize::try_from(columns).ok()?;
    if width == 0 {
        return None;
    }
    let column = u32::try_from(index % width).ok()?;
    let row = u32::try_from(index / width).ok()?;
    Some(TileCoord::new(column, row))
}

/// Four-bit flag set recording which orthogonal neighbours are solid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AdjacencyMask(u8);

impl AdjacencyMask {
    /// Neighbour at the row above is solid.
    pub const UP: AdjacencyMask = AdjacencyMask(1);
    /// Neighbour at the next column is solid.
    pub const RIGHT: AdjacencyMask = AdjacencyMask(2);
    /// Neighbour at the row below is solid.
    pub const DOWN: AdjacencyMask = AdjacencyMask(4);
    /// Neighbour at the previous column is solid.
    pub const LEFT: AdjacencyMask = AdjacencyMask(8);

    /// Builds the mask for `coord` from the current contents of `grid`.
    #[must_use]
    pub fn from_grid(grid: &TileGrid, coord: TileCoord) -> Self {
        let column = i64::from(coord.column());
        let row = i64::from(coord.row());
        let mut bits = 0;
        if grid.is_solid(column, row - 1) {
            bits |= Self::UP.0;
        }
        if grid.is_solid(column + 1, row) {
            bits |= Self::RIGHT.0;
        }
        if grid.is_solid(column, row + 1) {
            bits |= Self::DOWN.0;
        }
        if grid.is_solid(column - 1, row) {
            bits |= Self::LEFT.0;
        }
        Self(bits)
    }

    /// Creates a mask from raw bits; bits above the low nibble are dropped.
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & 0x0f)
    }

    /// Raw bit representation.
    #[must_use]
    pub const fn bits(&self) -> u8 {
        self.0
    }

    /// Reports whether every bit of `other` is set.
    #[must_use]
    pub const fn contains(&self, other: AdjacencyMask) -> bool {
        self.0 & other.0 == other.0
    }
}

/// Surface classification of a tile exposed to air from above.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SurfaceKind {
    /// Exposed tile resting on another tile.
    Ground,
    /// Exposed tile with nothing underneath.
    Platform,
}

/// Classified solid tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    coord: TileCoord,
    mask: AdjacencyMask,
    variant: u8,
}

impl Tile {
    /// Creates a classified tile.
    #[must_use]
    pub const fn new(coord: TileCoord, mask: AdjacencyMask, variant: u8) -> Self {
        Self {
            coord,
            mask,
            variant,
        }
    }

    /// Grid position of the tile.
    #[must_use]
    pub const fn coord(&self) -> TileCoord {
        self.coord
    }

    /// Neighbour presence recorded when the tile was classified.
    #[must_use]
    pub const fn mask(&self) -> AdjacencyMask {
        self.mask
    }

    /// Cosmetic variant used by renderers.
    #[must_use]
    pub const fn variant(&self) -> u8 {
        self.variant
    }

    /// Surface classification derived from the mask.
    #[must_use]
    pub const fn surface(&self) -> Option<SurfaceKind> {
        if self.mask.contains(AdjacencyMask::UP) {
            None
        } else if self.mask.contains(AdjacencyMask::DOWN) {
            Some(SurfaceKind::Ground)
        } else {
            Some(SurfaceKind::Platform)
        }
    }

    /// Reports whether the tile is exposed to air from above.
    #[must_use]
    pub const fn is_surface(&self) -> bool {
        self.surface().is_some()
    }

    /// Reports whether the tile is an exposed tile resting on ground mass.
    #[must_use]
    pub const fn is_ground_surface(&self) -> bool {
        matches!(self.surface(), Some(SurfaceKind::Ground))
    }

    /// Reports whether the tile is an exposed tile of a floating platform.
    #[must_use]
    pub const fn is_platform_surface(&self) -> bool {
        matches!(self.surface(), Some(SurfaceKind::Platform))
    }
}

/// Frozen, classified tile grid owned by a finished level.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileLayer {
    columns: u32,
    rows: u32,
    cells: Vec<Option<Tile>>,
}

impl TileLayer {
    /// Creates an empty layer of the provided shape.
    #[must_use]
    pub fn new(columns: u32, rows: u32) -> Self {
        let capacity_u64 = u64::from(columns) * u64::from(rows);
        let capacity = usize::try_from(capacity_u64).unwrap_or(0);
        Self {
            columns,
            rows,
            cells: vec![None; capacity],
        }
    }

    /// Stores a classified tile. Tiles outside the layer are ignored.
    pub fn insert(&mut self, tile: Tile) {
        if let Some(index) = self.index(tile.coord()) {
            self.cells[index] = Some(tile);
        }
    }

    /// Number of columns contained in the layer.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows contained in the layer.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Returns the tile at `coord`, if any.
    #[must_use]
    pub fn get(&self, coord: TileCoord) -> Option<&Tile> {
        self.index(coord)
            .and_then(|index| self.cells.get(index))
            .and_then(Option::as_ref)
    }

    /// Number of solid tiles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.iter().flatten().count()
    }

    /// Reports whether the layer holds no tiles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }

    /// Iterates tiles in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = &Tile> + '_ {
        self.cells.iter().flatten()
    }

    /// Iterates tiles exposed to air, in row-major order.
    pub fn surface_tiles(&self) -> impl Iterator<Item = &Tile> + '_ {
        self.iter().filter(|tile| tile.is_surface())
    }

    /// Iterates exposed tiles resting on ground mass, in row-major order.
    pub fn ground_surface_tiles(&self) -> impl Iterator<Item = &Tile> + '_ {
        self.iter().filter(|tile| tile.is_ground_surface())
    }

    /// Iterates exposed tiles of floating platforms, in row-major order.
    pub fn platform_surface_tiles(&self) -> impl Iterator<Item = &Tile> + '_ {
        self.iter().filter(|tile| tile.is_platform_surface())
    }

    /// Iterates the tiles of one column from top to bottom.
    pub fn column(&self, column: u32) -> impl Iterator<Item = &Tile> + '_ {
        (0..self.rows).filter_map(move |row| self.get(TileCoord::new(column, row)))
    }

    /// Iterates tiles whose pixel rectangle strictly intersects `area`, in row-major order.
    ///
    /// Areas outside the layer yield nothing.
    pub fn tiles_in_rect(&self, area: PixelRect) -> impl Iterator<Item = &Tile> + '_ {
        let (columns, rows) = if area.is_empty() {
            (0..0, 0..0)
        } else {
            (
                tile_span(i64::from(area.left()), area.right(), self.columns),
                tile_span(i64::from(area.top()), area.bottom(), self.rows),
            )
        };
        rows.flat_map(move |row| {
            columns
                .clone()
                .filter_map(move |column| self.get(TileCoord::new(column, row)))
        })
        .filter(move |tile| tile.coord().pixel_rect().intersects(&area))
    }

    fn index(&self, coord: TileCoord) -> Option<usize> {
        if coord.column() < self.columns && coord.row() < self.rows {
            let row = usize::try_from(coord.row()).ok()?;
            let column = usize::try_from(coord.column()).ok()?;
            let width = usize::try_from(self.columns).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }
}

/// Range of tile indices covering the half-open pixel span `[start, end)`.
fn tile_span(start: i64, end: i64, limit: u32) -> std::ops::Range<u32> {
    let size = i64::from(TILE_SIZE);
    let first = start.div_euclid(size).clamp(0, i64::from(limit));
    let last = (end + size - 1).div_euclid(size).clamp(0, i64::from(limit));
    let first = u32::try_from(first).unwrap_or(limit);
    let last = u32::try_from(last).unwrap_or(limit);
    first..last.max(first)
}
