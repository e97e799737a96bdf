use neon_mask_core::{HazardKind, PixelRect, TILE_SIZE};
use neon_mask_world::{query, Level};

const AIR: char = '.';
const GROUND: char = '#';
const PLATFORM: char = '=';
const SPIKE: char = '^';
const PULSE: char = '*';
const BEAM: char = '|';
const COLLECTIBLE: char = 'o';
const POWERUP: char = 'P';
const GOAL: char = 'G';

/// Character canvas with one cell per tile.
struct Canvas {
    columns: usize,
    rows: usize,
    cells: Vec<char>,
}

impl Canvas {
    fn new(columns: u32, rows: u32) -> Self {
        let columns = usize::try_from(columns).unwrap_or(0);
        let rows = usize::try_from(rows).unwrap_or(0);
        Self {
            columns,
            rows,
            cells: vec![AIR; columns * rows],
        }
    }

    fn index(&self, column: i64, row: i64) -> Option<usize> {
        let column = usize::try_from(column).ok()?;
        let row = usize::try_from(row).ok()?;
        (column < self.columns && row < self.rows).then_some(row * self.columns + column)
    }

    fn put(&mut self, column: i64, row: i64, glyph: char) {
        if let Some(index) = self.index(column, row) {
            self.cells[index] = glyph;
        }
    }

    fn put_on_air(&mut self, column: i64, row: i64, glyph: char) {
        if let Some(index) = self.index(column, row) {
            if self.cells[index] == AIR {
                self.cells[index] = glyph;
            }
        }
    }

    fn fill_rect_on_air(&mut self, rect: PixelRect, glyph: char) {
        let (columns, rows) = covered_cells(rect);
        for row in rows {
            for column in columns.clone() {
                self.put_on_air(column, row, glyph);
            }
        }
    }

    fn into_string(self) -> String {
        let mut out = String::with_capacity((self.columns + 1) * self.rows);
        for row in self.cells.chunks(self.columns.max(1)) {
            out.extend(row);
            out.push('\n');
        }
        out
    }
}

/// Tile ranges overlapped by `rect`.
fn covered_cells(rect: PixelRect) -> (std::ops::Range<i64>, std::ops::Range<i64>) {
    if rect.is_empty() {
        return (0..0, 0..0);
    }
    let size = i64::from(TILE_SIZE);
    let columns = i64::from(rect.left()).div_euclid(size)..(rect.right() + size - 1).div_euclid(size);
    let rows = i64::from(rect.top()).div_euclid(size)..(rect.bottom() + size - 1).div_euclid(size);
    (columns, rows)
}

/// Renders `level` as ASCII art, one character per tile.
pub(crate) fn render(level: &Level) -> String {
    let (width, height) = query::dimensions(level);
    let mut canvas = Canvas::new(width, height);

    for tile in query::tiles(level) {
        let glyph = if tile.is_platform_surface() {
            PLATFORM
        } else {
            GROUND
        };
        canvas.put(
            i64::from(tile.coord().column()),
            i64::from(tile.coord().row()),
            glyph,
        );
    }

    for hazard in query::hazards(level) {
        match hazard.kind() {
            HazardKind::Spike => {
                let (columns, rows) = covered_cells(hazard.rect());
                for row in rows {
                    for column in columns.clone() {
                        canvas.put(column, row, SPIKE);
                    }
                }
            }
            HazardKind::Pulse => canvas.fill_rect_on_air(hazard.rect(), PULSE),
            HazardKind::Beam => canvas.fill_rect_on_air(hazard.rect(), BEAM),
        }
    }

    let size = TILE_SIZE as f32;
    let spawns = query::collectible_spawns(level)
        .iter()
        .map(|spawn| (spawn, COLLECTIBLE))
        .chain(
            query::powerup_spawns(level)
                .iter()
                .map(|spawn| (spawn, POWERUP)),
        );
    for (spawn, glyph) in spawns {
        let row = (spawn.position().y / size).floor() as i64;
        canvas.put(i64::from(spawn.column()), row, glyph);
    }

    canvas.fill_rect_on_air(query::goal_region(level).rect(), GOAL);
    canvas.into_string()
}

#[cfg(test)]
mod tests {
    use neon_mask_core::LevelConfig;
    use neon_mask_world::{query, Level};

    use super::{render, Canvas, COLLECTIBLE, POWERUP};

    #[test]
    fn preview_has_one_line_per_row() {
        let level = Level::generate(&LevelConfig::classic(30, 12).with_seed(4)).expect("level");
        let preview = render(&level);
        let lines: Vec<&str> = preview.lines().collect();
        assert_eq!(lines.len(), 12);
        assert!(lines.iter().all(|line| line.chars().count() == 30));
        assert!(lines[11].chars().all(|glyph| glyph == '#' || glyph == '^'));
        assert!(preview.contains('G'));
        let visible = query::collectible_spawns(&level)
            .iter()
            .filter(|spawn| spawn.position().y >= 0.0)
            .count();
        assert_eq!(preview.matches('o').count(), visible);
    }

    #[test]
    fn spawns_above_the_top_row_are_not_drawn() {
        let mut canvas = Canvas::new(3, 2);
        canvas.put(1, -1, COLLECTIBLE);
        canvas.put(1, 0, POWERUP);
        assert_eq!(canvas.into_string(), ".P.\n...\n");
    }
}
