use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use minesweep_core::{CellCount, Difficulty, ModeKind};

#[derive(Debug, Parser)]
#[command(version, about = "Minesweeper in the terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// TOML file overriding presets and paths
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Where high scores are kept
    #[arg(long, global = true)]
    pub scores: Option<PathBuf>,

    #[command(flatten)]
    pub verbose: Verbosity<WarnLevel>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Play a game (default)
    Play(PlayArgs),
    /// Show the high score tables
    Scores(ScoresArgs),
}

#[derive(Debug, clap::Args)]
pub struct PlayArgs {
    /// easy, medium or hard
    #[arg(short, long, default_value = "easy")]
    pub difficulty: Difficulty,

    /// classic or time-attack
    #[arg(short, long, default_value = "classic")]
    pub mode: ModeKind,

    /// Override the preset's mine count
    #[arg(long)]
    pub mines: Option<CellCount>,

    /// Override the preset's time-attack limit, in seconds
    #[arg(long)]
    pub time_limit: Option<u16>,

    /// Seed for a reproducible board
    #[arg(long)]
    pub seed: Option<u64>,

    /// Name recorded with a high score
    #[arg(long)]
    pub name: Option<String>,
}

impl Default for PlayArgs {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Easy,
            mode: ModeKind::Classic,
            mines: None,
            time_limit: None,
            seed: None,
            name: None,
        }
    }
}

#[derive(Debug, clap::Args)]
pub struct ScoresArgs {
    /// Print the raw table as JSON
    #[arg(long)]
    pub json: bool,
}
