#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Hazard placement system operating on the classified tile layer.
//!
//! Spikes sit in the top half of exposed ground tiles, pulse hazards hover
//! half a tile above floating platforms, and beams cover the occupied span of
//! whole columns. Tiles are visited in row-major order so the number of draws
//! depends only on the layer and the tuning.

use neon_mask_core::{
    pixel, BeamTuning, DamageTier, Hazard, HazardColor, HazardKind, HazardTuning, LevelConfig,
    LevelRng, PeriodRange, PixelRect, Pulse, TileLayer, TILE_SIZE,
};

/// Spikes and pulse hazards are only placed below this row.
const TOP_ROWS_SKIPPED: u32 = 1;
const BEAM_WIDTH: u32 = 4;
const BEAM_MIN_TIER: i64 = 1;
const BEAM_MAX_TIER: i64 = 3;
const SPIKE_COLOR: HazardColor = HazardColor::from_rgb(0xff, 0x3b, 0x6b);
const PULSE_COLOR: HazardColor = HazardColor::from_rgb(0xff, 0x5c, 0xf4);
const BEAM_COLORS: [HazardColor; 3] = [
    HazardColor::from_rgb(0x6d, 0xff, 0xf7),
    HazardColor::from_rgb(0xff, 0xd1, 0x3b),
    HazardColor::from_rgb(0x9b, 0x5c, 0xff),
];

/// Pure system that places hazards onto a classified layer.
#[derive(Clone, Debug)]
pub struct HazardPlacer {
    columns: u32,
    tuning: HazardTuning,
}

impl HazardPlacer {
    /// Creates a placer using the width and hazard settings of `config`.
    #[must_use]
    pub fn new(config: &LevelConfig) -> Self {
        Self {
            columns: config.width,
            tuning: config.hazards.clone(),
        }
    }

    /// Places spikes, pulse hazards and beams, in that order.
    pub fn place(&self, layer: &TileLayer, rng: &mut LevelRng) -> Vec<Hazard> {
        let bounds = PixelRect::new(
            0,
            0,
            layer.columns() * TILE_SIZE,
            layer.rows() * TILE_SIZE,
        );
        let mut hazards = Vec::new();
        self.place_spikes(layer, rng, &mut hazards);
        self.place_pulses(layer, rng, &mut hazards);
        if let Some(beams) = &self.tuning.beams {
            self.place_beams(beams, layer, rng, &mut hazards);
        }
        hazards.retain_mut(|hazard| match hazard.rect().intersection(&bounds) {
            Some(clipped) => {
                *hazard = Hazard::new(
                    hazard.kind(),
                    clipped,
                    hazard.damage(),
                    hazard.color(),
                    hazard.pulse(),
                );
                true
            }
            None => false,
        });
        hazards
    }

    fn place_spikes(&self, layer: &TileLayer, rng: &mut LevelRng, out: &mut Vec<Hazard>) {
        if self.tuning.spike_probability <= 0.0 {
            return;
        }
        for tile in layer.ground_surface_tiles() {
            let coord = tile.coord();
            if coord.row() <= TOP_ROWS_SKIPPED {
                continue;
            }
            if rng.chance(self.tuning.spike_probability) {
                let rect = PixelRect::new(
                    pixel(coord.column()),
                    pixel(coord.row()),
                    TILE_SIZE,
                    TILE_SIZE / 2,
                );
                out.push(Hazard::new(
                    HazardKind::Spike,
                    rect,
                    DamageTier::new(1),
                    SPIKE_COLOR,
                    Pulse::STATIC,
                ));
            }
        }
    }

    fn place_pulses(&self, layer: &TileLayer, rng: &mut LevelRng, out: &mut Vec<Hazard>) {
        if self.tuning.pulse_probability <= 0.0 {
            return;
        }
        for tile in layer.platform_surface_tiles() {
            let coord = tile.coord();
            if coord.row() <= TOP_ROWS_SKIPPED {
                continue;
            }
            if !rng.chance(self.tuning.pulse_probability) {
                continue;
            }
            let pulse = draw_pulse(self.tuning.pulse_period, rng);
            let half = TILE_SIZE / 2;
            let rect = PixelRect::new(
                pixel(coord.column()),
                pixel(coord.row()).saturating_sub(half as i32),
                TILE_SIZE,
                half,
            );
            out.push(Hazard::new(
                HazardKind::Pulse,
                rect,
                DamageTier::new(1),
                PULSE_COLOR,
                pulse,
            ));
        }
    }

    fn place_beams(
        &self,
        tuning: &BeamTuning,
        layer: &TileLayer,
        rng: &mut LevelRng,
        out: &mut Vec<Hazard>,
    ) {
        let last_column = i64::from(self.columns) - 1;
        for _ in 0..tuning.budget(self.columns) {
            let column = u32::try_from(rng.next_int(0, last_column)).unwrap_or(0);
            let (top, bottom) = beam_span(layer, column);
            let tier = u8::try_from(rng.next_int(BEAM_MIN_TIER, BEAM_MAX_TIER)).unwrap_or(1);
            let color = rng.choice(&BEAM_COLORS).copied().unwrap_or(BEAM_COLORS[0]);
            let pulse = draw_pulse(tuning.period, rng);

            let inset = (TILE_SIZE - BEAM_WIDTH) / 2;
            let rect = PixelRect::new(
                pixel(column).saturating_add(inset as i32),
                pixel(top),
                BEAM_WIDTH,
                (bottom - top + 1) * TILE_SIZE,
            );
            out.push(Hazard::new(
                HazardKind::Beam,
                rect,
                DamageTier::new(tier),
                color,
                pulse,
            ));
        }
    }
}

/// Rows covered by a beam in `column`: one row past the occupied span on each
/// side, clamped to the level, or the whole height for an empty column.
fn beam_span(layer: &TileLayer, column: u32) -> (u32, u32) {
    let last_row = layer.rows().saturating_sub(1);
    let mut rows = layer.column(column).map(|tile| tile.coord().row());
    let Some(topmost) = rows.next() else {
        return (0, last_row);
    };
    let bottommost = rows.last().unwrap_or(topmost);
    (
        topmost.saturating_sub(1),
        bottommost.saturating_add(1).min(last_row),
    )
}

fn draw_pulse(range: PeriodRange, rng: &mut LevelRng) -> Pulse {
    let period = rng.uniform(f64::from(range.min), f64::from(range.max));
    let phase = rng.next_float();
    Pulse::new(period as f32, phase as f32)
}

/// Places the hazards described by `config` onto `layer`.
pub fn place_hazards(config: &LevelConfig, layer: &TileLayer, rng: &mut LevelRng) -> Vec<Hazard> {
    HazardPlacer::new(config).place(layer, rng)
}
