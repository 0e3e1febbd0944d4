//! Application configuration.
//!
//! Settings live in `<config_dir>/wonkytracks/config.toml`. Every key is
//! optional; missing keys fall back to the defaults below, and any key can
//! be overridden from the environment as `WONKY_<SECTION>__<KEY>`
//! (for example `WONKY_RULES__WIN_CASH=1000`).

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{ensure, Context, Result};
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{game::Contract, models::Position, models::Stockpile};

/// Directory under the user's config dir holding our files.
pub const CONFIG_DIR: &str = "wonkytracks";
/// File name of the settings file.
pub const CONFIG_FILE: &str = "config.toml";

const ENV_PREFIX: &str = "WONKY";

/// Contents written by [`ensure_default_config`].
pub const DEFAULT_CONFIG: &str = r##"# WonkyTracks settings. Delete a key to fall back to its default.

[board]
width = 11
height = 26
# seed = 42
coast_noise = 0.15
rock_density = 0.03
hub_min_spacing = 5
hub_attempts = 200
# Fixed hub corners in steel, wood, concrete order; empty scatters them.
hub_anchors = []

[rules]
draft_tracks = 8
initial_track_budget = 4
steel_track_bonus = 4
win_cash = 1500
dice_sides = 6

[[rules.contracts]]
reward = 500
require = { concrete = 3, wood = 2, steel = 1 }

[[rules.contracts]]
reward = 500
require = { concrete = 2, wood = 3, steel = 2 }

[[rules.contracts]]
reward = 500
require = { concrete = 4, wood = 1, steel = 2 }

[tui]
scoot_step_ms = 80
cpu_step_ms = 350
player_one_color = "#ff0044"
player_two_color = "#0066ff"
"##;

/// Top-level settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Board generation.
    pub board: BoardConfig,
    /// Game rules.
    pub rules: RulesConfig,
    /// Terminal front-end pacing and colours.
    pub tui: TuiConfig,
}

/// Board dimensions and procedural generation knobs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Columns.
    pub width: usize,
    /// Rows.
    pub height: usize,
    /// Fixed RNG seed; `None` draws one from the OS.
    pub seed: Option<u64>,
    /// Chance of an extra one-tile coast indent on an ordinary row.
    pub coast_noise: f64,
    /// Chance of an interior land tile turning into rock.
    pub rock_density: f64,
    /// Minimum Manhattan distance between a new hub and existing resources.
    pub hub_min_spacing: u32,
    /// Random placement attempts per hub.
    pub hub_attempts: u32,
    /// Top-left corners for the steel, wood and concrete hubs.
    pub hub_anchors: Vec<Position>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            width: 11,
            height: 26,
            seed: None,
            coast_noise: 0.15,
            rock_density: 0.03,
            hub_min_spacing: 5,
            hub_attempts: 200,
            hub_anchors: Vec::new(),
        }
    }
}

/// Draft size, budgets, contracts and the win threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Tracks each player places before the first turn.
    pub draft_tracks: u32,
    /// In-play track budget each player starts with.
    pub initial_track_budget: u32,
    /// Extra track budget granted per delivered steel.
    pub steel_track_bonus: u32,
    /// Cash that wins the game.
    pub win_cash: u32,
    /// Faces on the movement die.
    pub dice_sides: u32,
    /// Contracts offered in rotation.
    pub contracts: Vec<Contract>,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            draft_tracks: 8,
            initial_track_budget: 4,
            steel_track_bonus: 4,
            win_cash: 1500,
            dice_sides: 6,
            contracts: default_contracts(),
        }
    }
}

/// Front-end settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TuiConfig {
    /// Delay between tiles of a scoot animation.
    pub scoot_step_ms: u64,
    /// Delay before each CPU action.
    pub cpu_step_ms: u64,
    /// Hex colour for player one.
    pub player_one_color: String,
    /// Hex colour for player two.
    pub player_two_color: String,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            scoot_step_ms: 80,
            cpu_step_ms: 350,
            player_one_color: "#ff0044".to_string(),
            player_two_color: "#0066ff".to_string(),
        }
    }
}

fn default_contracts() -> Vec<Contract> {
    vec![
        Contract::new(Stockpile::new(3, 2, 1), 500),
        Contract::new(Stockpile::new(2, 3, 2), 500),
        Contract::new(Stockpile::new(4, 1, 2), 500),
    ]
}

impl AppConfig {
    /// Load from the default location, applying environment overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(config_path())
    }

    /// Load from a specific file. A missing file yields the defaults.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let settings = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config: AppConfig = settings
            .try_deserialize()
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the game cannot run with.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.board.width >= 5 && self.board.height >= 5,
            "board must be at least 5x5 to hold the home base (got {}x{})",
            self.board.width,
            self.board.height
        );
        ensure!(
            (0.0..=1.0).contains(&self.board.coast_noise)
                && (0.0..=1.0).contains(&self.board.rock_density),
            "coast_noise and rock_density must be probabilities"
        );
        ensure!(self.rules.dice_sides >= 1, "dice_sides must be at least 1");
        ensure!(
            !self.rules.contracts.is_empty(),
            "at least one contract is required"
        );
        Ok(())
    }
}

/// Path of the settings file under the user's config directory.
pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR)
        .join(CONFIG_FILE)
}

/// Write the default settings file if none exists yet.
pub fn ensure_default_config() -> Result<PathBuf> {
    let path = config_path();
    write_default_config(&path)?;
    Ok(path)
}

fn write_default_config(path: &Path) -> Result<()> {
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(path, DEFAULT_CONFIG)
        .with_context(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), "Wrote default config");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() -> Result<()> {
        let dir = tempdir()?;
        let config = AppConfig::load_from(dir.path().join("absent.toml"))?;
        assert_eq!(config.board, BoardConfig::default());
        assert_eq!(config.rules.draft_tracks, 8);
        assert_eq!(config.rules.contracts.len(), 3);
        Ok(())
    }

    #[test]
    fn default_file_matches_builtin_defaults() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join(CONFIG_DIR).join(CONFIG_FILE);
        write_default_config(&path)?;
        assert!(path.exists());
        assert!(fs::read_to_string(&path)?.contains("player_two_color = \"#0066ff\""));

        let config = AppConfig::load_from(&path)?;
        assert_eq!(config.board, BoardConfig::default());
        assert_eq!(config.rules, RulesConfig::default());
        assert_eq!(config.tui, TuiConfig::default());
        Ok(())
    }

    #[test]
    fn partial_file_keeps_other_defaults() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join(CONFIG_FILE);
        fs::write(
            &path,
            r#"
[board]
seed = 7
hub_anchors = [{ x = 1, y = 2 }]

[rules]
draft_tracks = 3
"#,
        )?;

        let config = AppConfig::load_from(&path)?;
        assert_eq!(config.board.seed, Some(7));
        assert_eq!(config.board.hub_anchors, vec![Position::new(1, 2)]);
        assert_eq!(config.board.width, 11);
        assert_eq!(config.rules.draft_tracks, 3);
        assert_eq!(config.rules.win_cash, 1500);
        Ok(())
    }

    #[test]
    fn rejects_tiny_boards() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "[board]\nwidth = 3\n")?;
        assert!(AppConfig::load_from(&path).is_err());
        Ok(())
    }

    #[test]
    fn existing_file_is_not_overwritten() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "[rules]\nwin_cash = 900\n")?;
        write_default_config(&path)?;
        assert_eq!(AppConfig::load_from(&path)?.rules.win_cash, 900);
        Ok(())
    }
}
