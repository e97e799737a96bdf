//! Construction parameters for a level and the tuning knobs of each stage.
//!
//! Every struct derives serde with `#[serde(default)]`, so a configuration
//! file only needs to name the values it overrides. Missing fields take the
//! values of the classic preset.

use serde::{Deserialize, Serialize};

use crate::LevelError;

/// Parameters that, together with the seed, fully determine a level.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelConfig {
    /// Number of tile columns.
    pub width: u32,
    /// Number of tile rows.
    pub height: u32,
    /// Seed for the random stream; a fresh one is drawn when absent.
    pub seed: Option<u64>,
    /// Ground depth of the first column, in tiles.
    pub base_ground_height: u32,
    /// Number of floating platforms attempted.
    pub platform_attempts: u32,
    /// Scales terrain jitter; `0.0` is the calmest setting.
    pub difficulty: f32,
    /// Algorithm used to build the heightmap.
    pub terrain: TerrainMode,
    /// Platform stamping knobs.
    pub platforms: PlatformTuning,
    /// Pillar, cavern and cleanup knobs.
    pub carving: CarvingTuning,
    /// Hazard placement knobs.
    pub hazards: HazardTuning,
    /// Collectible and power-up placement knobs.
    pub spawns: SpawnTuning,
}

impl LevelConfig {
    /// Flat rolling terrain with platforms and spikes only.
    #[must_use]
    pub fn classic(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            seed: None,
            base_ground_height: 5,
            platform_attempts: 75,
            difficulty: 0.0,
            terrain: TerrainMode::RollingWalk,
            platforms: PlatformTuning::default(),
            carving: CarvingTuning::disabled(),
            hazards: HazardTuning::spikes_only(),
            spawns: SpawnTuning::default(),
        }
    }

    /// Noisy terrain with carved features, pulse hazards and beams.
    #[must_use]
    pub fn neon(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            seed: None,
            base_ground_height: 8,
            platform_attempts: 60,
            difficulty: 1.0,
            terrain: TerrainMode::LayeredNoise,
            platforms: PlatformTuning::default(),
            carving: CarvingTuning::neon(),
            hazards: HazardTuning::neon(),
            spawns: SpawnTuning {
                collectible_budget: CollectibleBudget::PerSurface {
                    minimum: 12,
                    surface_tiles_per_spawn: 6,
                },
                ..SpawnTuning::default()
            },
        }
    }

    /// Fixes the seed of the random stream.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Overrides the ground depth of the first column.
    #[must_use]
    pub fn with_base_ground_height(mut self, base_ground_height: u32) -> Self {
        self.base_ground_height = base_ground_height;
        self
    }

    /// Overrides the number of platform attempts.
    #[must_use]
    pub fn with_platform_attempts(mut self, platform_attempts: u32) -> Self {
        self.platform_attempts = platform_attempts;
        self
    }

    /// Overrides the difficulty scalar.
    #[must_use]
    pub fn with_difficulty(mut self, difficulty: f32) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Rejects configurations that cannot lay out a grid.
    pub fn validate(&self) -> Result<(), LevelError> {
        if self.width == 0 || self.height == 0 {
            return Err(LevelError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self::classic(220, 64)
            .with_base_ground_height(6)
            .with_platform_attempts(90)
    }
}

/// Heightmap algorithm.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerrainMode {
    /// Bounded random walk; neighbouring columns differ by at most two tiles.
    #[default]
    RollingWalk,
    /// Sum of four sine octaves plus per-column jitter.
    LayeredNoise,
}

/// Platform stamping knobs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformTuning {
    /// Probability of stamping a support tile beneath each platform tile.
    pub support_probability: f64,
}

impl Default for PlatformTuning {
    fn default() -> Self {
        Self {
            support_probability: 0.18,
        }
    }
}

/// Pillar, cavern and cleanup knobs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarvingTuning {
    /// Pillars attempted per level column.
    pub pillars_per_column: f64,
    /// Caverns attempted per level column.
    pub caverns_per_column: f64,
    /// Probability of removing a tile with no support beneath it.
    pub cleanup_probability: f64,
    /// Rows inspected below a tile when looking for support.
    pub support_lookahead: u32,
}

impl CarvingTuning {
    /// Tuning that leaves the stamped grid untouched.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            pillars_per_column: 0.0,
            caverns_per_column: 0.0,
            cleanup_probability: 0.0,
            support_lookahead: 3,
        }
    }

    /// Tuning used by the neon preset.
    #[must_use]
    pub fn neon() -> Self {
        Self {
            pillars_per_column: 0.06,
            caverns_per_column: 0.08,
            cleanup_probability: 0.35,
            support_lookahead: 3,
        }
    }

    /// Number of pillars attempted for a level `width` columns wide.
    #[must_use]
    pub fn pillar_attempts(&self, width: u32) -> u32 {
        attempts(self.pillars_per_column, width)
    }

    /// Number of caverns attempted for a level `width` columns wide.
    #[must_use]
    pub fn cavern_attempts(&self, width: u32) -> u32 {
        attempts(self.caverns_per_column, width)
    }
}

impl Default for CarvingTuning {
    fn default() -> Self {
        Self::disabled()
    }
}

fn attempts(per_column: f64, width: u32) -> u32 {
    let total = (per_column * f64::from(width)).floor();
    if total.is_finite() && total > 0.0 {
        // Saturating float-to-int conversion.
        total.min(f64::from(u32::MAX)) as u32
    } else {
        0
    }
}

/// Inclusive range of pulse periods, in seconds.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PeriodRange {
    /// Shortest period drawn.
    pub min: f32,
    /// Longest period drawn.
    pub max: f32,
}

impl Default for PeriodRange {
    fn default() -> Self {
        Self { min: 0.8, max: 1.6 }
    }
}

/// Hazard placement knobs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HazardTuning {
    /// Probability of a spike on each eligible ground-surface tile.
    pub spike_probability: f64,
    /// Probability of a pulse hazard above each eligible platform-surface tile.
    pub pulse_probability: f64,
    /// Range the pulse hazard period is drawn from.
    pub pulse_period: PeriodRange,
    /// Vertical beams; disabled when absent.
    pub beams: Option<BeamTuning>,
}

impl HazardTuning {
    /// Tuning used by the classic preset.
    #[must_use]
    pub fn spikes_only() -> Self {
        Self {
            spike_probability: 0.065,
            pulse_probability: 0.0,
            pulse_period: PeriodRange::default(),
            beams: None,
        }
    }

    /// Tuning used by the neon preset.
    #[must_use]
    pub fn neon() -> Self {
        Self {
            spike_probability: 0.065,
            pulse_probability: 0.28,
            pulse_period: PeriodRange::default(),
            beams: Some(BeamTuning::default()),
        }
    }
}

impl Default for HazardTuning {
    fn default() -> Self {
        Self::spikes_only()
    }
}

/// Vertical beam knobs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BeamTuning {
    /// Level columns per beam.
    pub columns_per_beam: u32,
    /// Lower bound on the number of beams.
    pub minimum: u32,
    /// Range the beam period is drawn from.
    pub period: PeriodRange,
}

impl BeamTuning {
    /// Number of beams placed in a level `width` columns wide.
    #[must_use]
    pub fn budget(&self, width: u32) -> u32 {
        width
            .checked_div(self.columns_per_beam)
            .unwrap_or(0)
            .max(self.minimum)
    }
}

impl Default for BeamTuning {
    fn default() -> Self {
        Self {
            columns_per_beam: 8,
            minimum: 4,
            period: PeriodRange { min: 1.2, max: 2.4 },
        }
    }
}

/// Number of collectibles a level tries to place.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectibleBudget {
    /// One collectible per `columns_per_spawn` columns, at least `minimum`.
    PerWidth {
        /// Lower bound on the budget.
        minimum: u32,
        /// Level columns per collectible.
        columns_per_spawn: u32,
    },
    /// One collectible per `surface_tiles_per_spawn` surface tiles, at least `minimum`.
    PerSurface {
        /// Lower bound on the budget.
        minimum: u32,
        /// Surface tiles per collectible.
        surface_tiles_per_spawn: u32,
    },
}

impl CollectibleBudget {
    /// Resolves the budget for a level `width` columns wide with `surface_tiles` exposed tiles.
    #[must_use]
    pub fn resolve(&self, width: u32, surface_tiles: usize) -> usize {
        match *self {
            Self::PerWidth {
                minimum,
                columns_per_spawn,
            } => {
                let scaled = width.checked_div(columns_per_spawn).unwrap_or(0);
                to_usize(scaled.max(minimum))
            }
            Self::PerSurface {
                minimum,
                surface_tiles_per_spawn,
            } => {
                let scaled = surface_tiles
                    .checked_div(to_usize(surface_tiles_per_spawn))
                    .unwrap_or(0);
                scaled.max(to_usize(minimum))
            }
        }
    }
}

impl Default for CollectibleBudget {
    fn default() -> Self {
        Self::PerWidth {
            minimum: 12,
            columns_per_spawn: 4,
        }
    }
}

fn to_usize(value: u32) -> usize {
    usize::try_from(value).unwrap_or(usize::MAX)
}

/// Collectible and power-up placement knobs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnTuning {
    /// How many collectibles to place.
    pub collectible_budget: CollectibleBudget,
    /// Fraction of a tile the collectible hovers above its surface tile.
    pub collectible_lift: f32,
    /// Fraction of a tile the power-up hovers above its surface tile.
    pub powerup_lift: f32,
    /// Column modulus used to pick power-up columns.
    pub powerup_column_period: u32,
    /// Residues of the column modulus eligible for power-ups.
    pub powerup_column_residues: Vec<u32>,
    /// Level columns per power-up.
    pub powerup_columns_per_spawn: u32,
    /// Lower bound on the number of power-ups.
    pub powerup_minimum: u32,
    /// Upper bound on the number of power-ups.
    pub powerup_maximum: u32,
}

impl SpawnTuning {
    /// Number of power-ups a level `width` columns wide tries to place.
    #[must_use]
    pub fn powerup_budget(&self, width: u32) -> usize {
        let scaled = width
            .checked_div(self.powerup_columns_per_spawn)
            .unwrap_or(0);
        let upper = self.powerup_maximum.max(self.powerup_minimum);
        to_usize(scaled.clamp(self.powerup_minimum, upper))
    }

    /// Position of `column`'s residue in the eligible list, if the column hosts power-ups.
    #[must_use]
    pub fn powerup_residue_index(&self, column: u32) -> Option<usize> {
        let residue = column.checked_rem(self.powerup_column_period)?;
        self.powerup_column_residues
            .iter()
            .position(|candidate| *candidate == residue)
    }
}

impl Default for SpawnTuning {
    fn default() -> Self {
        Self {
            collectible_budget: CollectibleBudget::default(),
            collectible_lift: 0.35,
            powerup_lift: 0.5,
            powerup_column_period: 9,
            powerup_column_residues: vec![2, 5, 7],
            powerup_columns_per_spawn: 45,
            powerup_minimum: 2,
            powerup_maximum: 6,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_large_classic_level() {
        let config = LevelConfig::default();
        assert_eq!((config.width, config.height), (220, 64));
        assert_eq!(config.base_ground_height, 6);
        assert_eq!(config.platform_attempts, 90);
        assert_eq!(config.terrain, TerrainMode::RollingWalk);
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        let error = LevelConfig::classic(0, 20).validate().unwrap_err();
        assert_eq!(
            error,
            LevelError::InvalidDimensions {
                width: 0,
                height: 20
            }
        );
        assert!(LevelConfig::classic(5, 0).validate().is_err());
        assert!(LevelConfig::classic(1, 1).validate().is_ok());
    }

    #[test]
    fn collectible_budget_respects_minimum() {
        let per_width = CollectibleBudget::default();
        assert_eq!(per_width.resolve(10, 0), 12);
        assert_eq!(per_width.resolve(220, 0), 55);
        let per_surface = CollectibleBudget::PerSurface {
            minimum: 12,
            surface_tiles_per_spawn: 6,
        };
        assert_eq!(per_surface.resolve(0, 30), 12);
        assert_eq!(per_surface.resolve(0, 300), 50);
    }

    #[test]
    fn zero_divisors_fall_back_to_minimum() {
        let budget = CollectibleBudget::PerWidth {
            minimum: 3,
            columns_per_spawn: 0,
        };
        assert_eq!(budget.resolve(100, 0), 3);
        let spawns = SpawnTuning {
            powerup_columns_per_spawn: 0,
            powerup_column_period: 0,
            ..SpawnTuning::default()
        };
        assert_eq!(spawns.powerup_budget(500), 2);
        assert_eq!(spawns.powerup_residue_index(5), None);
    }

    #[test]
    fn powerup_budget_is_clamped() {
        let spawns = SpawnTuning::default();
        assert_eq!(spawns.powerup_budget(50), 2);
        assert_eq!(spawns.powerup_budget(180), 4);
        assert_eq!(spawns.powerup_budget(1_000), 6);
        assert_eq!(spawns.powerup_residue_index(16), Some(2));
        assert_eq!(spawns.powerup_residue_index(3), None);
    }

    #[test]
    fn beam_budget_has_floor() {
        let beams = BeamTuning::default();
        assert_eq!(beams.budget(20), 4);
        assert_eq!(beams.budget(180), 22);
    }

    #[test]
    fn carving_attempts_scale_with_width() {
        let carving = CarvingTuning::neon();
        assert_eq!(carving.pillar_attempts(100), 6);
        assert_eq!(carving.cavern_attempts(100), 8);
        assert_eq!(CarvingTuning::disabled().pillar_attempts(500), 0);
    }

    #[test]
    fn partial_toml_overrides_defaults() {
        let config: LevelConfig = toml::from_str(
            r#"
            width = 120
            seed = 9
            terrain = "layered_noise"

            [hazards]
            pulse_probability = 0.5

            [spawns.collectible_budget.per_surface]
            minimum = 4
            surface_tiles_per_spawn = 10
            "#,
        )
        .expect("config parses");
        assert_eq!(config.width, 120);
        assert_eq!(config.height, 64);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.terrain, TerrainMode::LayeredNoise);
        assert!((config.hazards.pulse_probability - 0.5).abs() < f64::EPSILON);
        assert!((config.hazards.spike_probability - 0.065).abs() < f64::EPSILON);
        assert_eq!(
            config.spawns.collectible_budget,
            CollectibleBudget::PerSurface {
                minimum: 4,
                surface_tiles_per_spawn: 10
            }
        );
    }

    #[test]
    fn config_round_trips_through_bincode() {
        let config = LevelConfig::neon(180, 60).with_seed(3);
        let bytes = bincode::serialize(&config).expect("serialize");
        let restored: LevelConfig = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(restored, config);
    }
}
