use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use minesweep_core::{CellCount, Difficulty, Presets};
use serde::Deserialize;

const SCORES_FILE: &str = "highscores.json";

/// Contents of the optional TOML config file.
///
/// ```toml
/// scores = "/home/me/.minesweep-scores.json"
///
/// [presets.hard]
/// mines = 120
/// hints = 1
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub scores: Option<PathBuf>,
    pub presets: PresetOverrides,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PresetOverrides {
    pub easy: PresetOverride,
    pub medium: PresetOverride,
    pub hard: PresetOverride,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PresetOverride {
    pub mines: Option<CellCount>,
    pub hints: Option<u8>,
    pub time_limit_secs: Option<u16>,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Could not read config {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("Invalid config {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Default presets with this config's overrides applied.
    pub fn presets(&self) -> Result<Presets> {
        let mut presets = Presets::default();
        for difficulty in Difficulty::ALL {
            let overrides = match difficulty {
                Difficulty::Easy => &self.presets.easy,
                Difficulty::Medium => &self.presets.medium,
                Difficulty::Hard => &self.presets.hard,
            };
            overrides
                .apply(&mut presets, difficulty)
                .with_context(|| format!("Invalid {difficulty} preset"))?;
        }
        Ok(presets)
    }

    /// Explicit path first, then the config file, then the platform data dir.
    pub fn scores_path(&self, explicit: Option<&Path>) -> Result<PathBuf> {
        if let Some(path) = explicit.or(self.scores.as_deref()) {
            return Ok(path.to_path_buf());
        }
        let dirs = ProjectDirs::from("dev", "minesweep", "minesweep")
            .context("Could not determine a data directory, pass --scores")?;
        Ok(dirs.data_dir().join(SCORES_FILE))
    }
}

impl PresetOverride {
    fn apply(&self, presets: &mut Presets, difficulty: Difficulty) -> Result<()> {
        if let Some(mines) = self.mines {
            presets.set_mines(difficulty, mines)?;
        }
        let preset = match difficulty {
            Difficulty::Easy => &mut presets.easy,
            Difficulty::Medium => &mut presets.medium,
            Difficulty::Hard => &mut presets.hard,
        };
        if let Some(hints) = self.hints {
            preset.hints = hints;
        }
        if let Some(limit) = self.time_limit_secs {
            anyhow::ensure!(limit > 0, "time limit must be at least one second");
            preset.time_limit_secs = limit;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_keeps_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.presets().unwrap(), Presets::default());
    }

    #[test]
    fn overrides_apply_per_preset() {
        let config = Config::parse(
            r#"
            scores = "/tmp/scores.json"

            [presets.hard]
            mines = 120
            hints = 1

            [presets.easy]
            time_limit_secs = 45
            "#,
        )
        .unwrap();

        let presets = config.presets().unwrap();
        assert_eq!(presets.hard.mines, 120);
        assert_eq!(presets.hard.hints, 1);
        assert_eq!(presets.easy.time_limit_secs, 45);
        assert_eq!(presets.medium, Presets::default().medium);
        assert_eq!(
            config.scores_path(None).unwrap(),
            PathBuf::from("/tmp/scores.json")
        );
    }

    #[test]
    fn explicit_scores_path_wins() {
        let config = Config::parse(r#"scores = "/tmp/a.json""#).unwrap();
        let path = config.scores_path(Some(Path::new("/tmp/b.json"))).unwrap();
        assert_eq!(path, PathBuf::from("/tmp/b.json"));
    }

    #[test]
    fn impossible_mine_count_is_an_error() {
        let config = Config::parse("[presets.easy]\nmines = 81\n").unwrap();
        assert!(config.presets().is_err());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(Config::parse("[presets.easy]\nmine = 3\n").is_err());
    }
}
