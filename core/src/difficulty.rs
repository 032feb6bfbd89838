use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Self::Easy, Self::Medium, Self::Hard];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|difficulty| difficulty.name().eq_ignore_ascii_case(s))
            .ok_or(GameError::UnknownName)
    }
}

/// Board shape and allowances for one named difficulty.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preset {
    pub rows: Coord,
    pub cols: Coord,
    pub mines: CellCount,
    pub hints: u8,
    /// Countdown used by time-attack games.
    pub time_limit_secs: u16,
}

impl Preset {
    pub fn config(&self) -> Result<GameConfig> {
        GameConfig::new(self.rows, self.cols, self.mines)
    }
}

/// The `easy`/`medium`/`hard` presets. Mine counts can be tuned per preset.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Presets {
    pub easy: Preset,
    pub medium: Preset,
    pub hard: Preset,
}

impl Default for Presets {
    fn default() -> Self {
        Self {
            easy: Preset {
                rows: 9,
                cols: 9,
                mines: 10,
                hints: 3,
                time_limit_secs: 120,
            },
            medium: Preset {
                rows: 16,
                cols: 16,
                mines: 40,
                hints: 3,
                time_limit_secs: 300,
            },
            hard: Preset {
                rows: 16,
                cols: 30,
                mines: 99,
                hints: 3,
                time_limit_secs: 600,
            },
        }
    }
}

impl Presets {
    pub fn get(&self, difficulty: Difficulty) -> &Preset {
        match difficulty {
            Difficulty::Easy => &self.easy,
            Difficulty::Medium => &self.medium,
            Difficulty::Hard => &self.hard,
        }
    }

    fn get_mut(&mut self, difficulty: Difficulty) -> &mut Preset {
        match difficulty {
            Difficulty::Easy => &mut self.easy,
            Difficulty::Medium => &mut self.medium,
            Difficulty::Hard => &mut self.hard,
        }
    }

    /// Changes the mine count of a preset, keeping the old one if it would be invalid.
    pub fn set_mines(&mut self, difficulty: Difficulty, mines: CellCount) -> Result<()> {
        let preset = self.get_mut(difficulty);
        GameConfig::new(preset.rows, preset.cols, mines)?;
        preset.mines = mines;
        Ok(())
    }

    pub fn settings(&self, difficulty: Difficulty, mode: ModeKind) -> Result<GameSettings> {
        let preset = self.get(difficulty);
        let mode = match mode {
            ModeKind::Classic => GameMode::Classic,
            ModeKind::TimeAttack => GameMode::TimeAttack {
                limit_secs: preset.time_limit_secs,
            },
        };
        GameSettings::new(preset.config()?, mode, preset.hints)
    }
}

/// Everything needed to start a game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSettings {
    config: GameConfig,
    mode: GameMode,
    hints: u8,
}

impl GameSettings {
    pub fn new(config: GameConfig, mode: GameMode, hints: u8) -> Result<Self> {
        if let GameMode::TimeAttack { limit_secs: 0 } = mode {
            return Err(GameError::InvalidTimeLimit);
        }
        Ok(Self {
            config,
            mode,
            hints,
        })
    }

    pub const fn classic(config: GameConfig) -> Self {
        Self {
            config,
            mode: GameMode::Classic,
            hints: 0,
        }
    }

    pub const fn with_hints(mut self, hints: u8) -> Self {
        self.hints = hints;
        self
    }

    pub const fn config(&self) -> GameConfig {
        self.config
    }

    pub const fn mode(&self) -> GameMode {
        self.mode
    }

    pub const fn hints(&self) -> u8 {
        self.hints
    }
}
