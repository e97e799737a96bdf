#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that generates, previews and shares Neon Mask levels.

mod preview;
mod share_code;

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use neon_mask_core::LevelConfig;
use neon_mask_world::{query, Level};
use sha2::{Digest, Sha256};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "neon_mask=info";

/// Procedural platformer level generator.
#[derive(Debug, Parser)]
#[command(name = "neon-mask", version, about, long_about = None)]
struct Cli {
    /// TOML file providing the base configuration.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Preset replacing the base configuration, keeping its dimensions.
    #[arg(long, value_enum)]
    preset: Option<Preset>,

    /// Level width in tiles.
    #[arg(long)]
    width: Option<u32>,

    /// Level height in tiles.
    #[arg(long)]
    height: Option<u32>,

    /// Seed for reproducible generation; a random seed is drawn when absent.
    #[arg(short, long)]
    seed: Option<u64>,

    /// Terrain jitter scale.
    #[arg(long)]
    difficulty: Option<f32>,

    /// Number of floating platform attempts.
    #[arg(long)]
    platforms: Option<u32>,

    /// Print an ASCII rendering of the level.
    #[arg(long)]
    preview: bool,

    /// Print a share code that regenerates the level.
    #[arg(long)]
    share: bool,

    /// Regenerate the level described by a share code, ignoring other level options.
    #[arg(long, value_name = "CODE", conflicts_with_all = ["config", "preset", "width", "height", "seed", "difficulty", "platforms"])]
    from_share: Option<String>,
}

/// Named starting configurations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Preset {
    /// Rolling terrain with platforms and spikes.
    Classic,
    /// Noisy terrain with carved features, pulse hazards and beams.
    Neon,
}

impl Cli {
    fn level_config(&self) -> Result<LevelConfig> {
        if let Some(code) = &self.from_share {
            return share_code::decode(code).context("failed to decode share code");
        }

        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => LevelConfig::default(),
        };
        if let Some(preset) = self.preset {
            let (width, height, seed) = (config.width, config.height, config.seed);
            config = match preset {
                Preset::Classic => LevelConfig::classic(width, height),
                Preset::Neon => LevelConfig::neon(width, height),
            };
            config.seed = seed;
        }
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(difficulty) = self.difficulty {
            config.difficulty = difficulty;
        }
        if let Some(platforms) = self.platforms {
            config.platform_attempts = platforms;
        }
        Ok(config)
    }
}

fn load_config(path: &Path) -> Result<LevelConfig> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read level config at {}", path.display()))?;
    toml::from_str(&contents)
        .with_context(|| format!("failed to parse level config toml at {}", path.display()))
}

/// Hex-encoded SHA-256 over the tiles, hazards, spawns and goal of `level`.
fn layout_digest(level: &Level) -> String {
    let mut hasher = Sha256::new();
    let (width, height) = query::dimensions(level);
    hasher.update(width.to_le_bytes());
    hasher.update(height.to_le_bytes());
    for tile in query::tiles(level) {
        hasher.update(tile.coord().column().to_le_bytes());
        hasher.update(tile.coord().row().to_le_bytes());
        hasher.update([tile.mask().bits(), tile.variant()]);
    }
    for hazard in query::hazards(level) {
        let rect = hazard.rect();
        hasher.update([hazard.kind() as u8, hazard.damage().get()]);
        hasher.update(rect.left().to_le_bytes());
        hasher.update(rect.top().to_le_bytes());
        hasher.update(rect.width().to_le_bytes());
        hasher.update(rect.height().to_le_bytes());
        hasher.update(hazard.pulse().period().to_le_bytes());
        hasher.update(hazard.pulse().phase().to_le_bytes());
    }
    let spawns = query::collectible_spawns(level)
        .iter()
        .chain(query::powerup_spawns(level));
    for spawn in spawns {
        hasher.update(spawn.column().to_le_bytes());
        hasher.update([spawn.tier()]);
        hasher.update(spawn.position().x.to_le_bytes());
        hasher.update(spawn.position().y.to_le_bytes());
    }
    let goal = query::goal_region(level).rect();
    hasher.update(goal.left().to_le_bytes());
    hasher.update(goal.top().to_le_bytes());

    hasher
        .finalize()
        .iter()
        .map(|byte| format!("{byte:02x}"))
        .collect()
}

fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Entry point for the Neon Mask command-line interface.
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    let config = cli.level_config()?;
    let level = Level::generate(&config).context("failed to generate level")?;
    let summary = query::summary(&level);
    let goal = query::goal_region(&level).anchor();
    let (width, height) = query::dimensions(&level);

    println!(
        "seed={} size={}x{} tiles={} hazards={} (spikes={} pulses={} beams={}) collectibles={} powerups={} goal={},{}",
        query::seed(&level),
        width,
        height,
        summary.tiles,
        summary.hazards(),
        summary.spikes,
        summary.pulses,
        summary.beams,
        summary.collectibles,
        summary.powerups,
        goal.column(),
        goal.row(),
    );
    println!("digest={}", layout_digest(&level));

    if cli.share {
        let code = share_code::encode(query::config(&level)).context("failed to encode share code")?;
        println!("share={code}");
    }
    if cli.preview {
        print!("{}", preview::render(&level));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_apply_on_top_of_preset() {
        let cli = Cli::parse_from([
            "neon-mask",
            "--preset",
            "neon",
            "--width",
            "96",
            "--seed",
            "12",
            "--platforms",
            "10",
        ]);
        let config = cli.level_config().expect("config");
        let expected = LevelConfig::neon(96, 64)
            .with_seed(12)
            .with_platform_attempts(10);
        assert_eq!(config, expected);
    }

    #[test]
    fn share_code_replaces_level_options() {
        let original = LevelConfig::neon(40, 20).with_seed(3);
        let code = share_code::encode(&original).expect("encodes");
        let cli = Cli::parse_from(["neon-mask", "--from-share", code.as_str()]);
        assert_eq!(cli.level_config().expect("config"), original);
    }

    #[test]
    fn digest_is_stable_for_a_seed() {
        let config = LevelConfig::neon(60, 24).with_seed(8);
        let first = Level::generate(&config).expect("level");
        let second = Level::generate(&config).expect("level");
        let digest = layout_digest(&first);
        assert_eq!(digest.len(), 64);
        assert_eq!(digest, layout_digest(&second));
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
