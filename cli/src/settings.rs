use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;
use sweeper_core::{CellCount, Coord, GameConfig};

#[derive(Parser, Debug)]
#[command(name = "sweeper", version, long_about = None)]
#[command(about = "Reveal every safe cell without hitting a hazard")]
pub struct Args {
    /// What log level to use
    #[command(flatten)]
    pub verbose: clap_verbosity_flag::Verbosity,

    /// Board width in cells
    #[arg(long)]
    pub width: Option<Coord>,

    /// Board height in cells
    #[arg(long)]
    pub height: Option<Coord>,

    /// Number of hazards to place
    #[arg(long)]
    pub hazards: Option<CellCount>,

    /// Force a seed instead of random
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// TOML file with board settings, flags take precedence
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Do not clear the screen between moves
    #[arg(long)]
    pub no_clear: bool,
}

/// Board settings as read from a TOML file. Missing keys fall back to the defaults.
#[derive(Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub width: Option<Coord>,
    pub height: Option<Coord>,
    pub hazards: Option<CellCount>,
    pub seed: Option<u64>,
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Could not read settings from {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("Invalid settings in {}", path.display()))
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Fills every unset value from `fallback`.
    fn or(self, fallback: Settings) -> Settings {
        Settings {
            width: self.width.or(fallback.width),
            height: self.height.or(fallback.height),
            hazards: self.hazards.or(fallback.hazards),
            seed: self.seed.or(fallback.seed),
        }
    }

    pub fn game_config(&self) -> Result<GameConfig> {
        let default = GameConfig::default();
        let size = (
            self.width.unwrap_or(default.size.0),
            self.height.unwrap_or(default.size.1),
        );
        let hazards = self.hazards.unwrap_or(default.hazards);
        GameConfig::new(size, hazards).with_context(|| {
            format!(
                "Cannot play a {}x{} board with {} hazards",
                size.0, size.1, hazards
            )
        })
    }

    pub fn seed_or_random(&self) -> u64 {
        self.seed.unwrap_or_else(random_seed)
    }
}

impl Args {
    /// Flags first, then the settings file, then the built-in defaults.
    pub fn settings(&self) -> Result<Settings> {
        let flags = Settings {
            width: self.width,
            height: self.height,
            hazards: self.hazards,
            seed: self.seed,
        };
        let file = match &self.config {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };
        Ok(flags.or(file))
    }
}

fn random_seed() -> u64 {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default();
    nanos ^ u64::from(std::process::id()).rotate_left(32)
}
