use std::io;

use anyhow::Result;
use clap::Parser;

use crate::args::{Cli, Command, PlayArgs};
use crate::config::Config;
use crate::store::JsonFileStore;

mod args;
mod config;
mod input;
mod render;
mod scores;
mod session;
mod store;

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.verbose.tracing_level_filter())
        .with_writer(io::stderr)
        .init();
    log::debug!("{:?}", cli);

    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    let store = JsonFileStore::new(config.scores_path(cli.scores.as_deref())?);
    log::debug!("high scores at {}", store.path().display());

    match cli.command.unwrap_or_else(|| Command::Play(PlayArgs::default())) {
        Command::Play(args) => {
            let settings = session::settings_for(&config.presets()?, &args)?;
            session::play(settings, args, store)
        }
        Command::Scores(args) => scores::show(&store, args.json),
    }
}
