use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use minesweep_core::{
    Bucket, Difficulty, Game, GameEvent, GameMode, GameSettings, HighScoreEntry, HighScoreStore,
    Phase, Presets, Update,
};
use time::OffsetDateTime;
use web_time::Instant;

use crate::args::PlayArgs;
use crate::input::{HELP, Input};
use crate::render::TerminalRenderer;
use crate::store::JsonFileStore;

const TICK: Duration = Duration::from_secs(1);

/// What the stdin reader thread hands to the event loop.
enum Event {
    Line(String),
    Closed,
}

/// Builds game settings from presets plus command line overrides.
pub fn settings_for(presets: &Presets, args: &PlayArgs) -> Result<GameSettings> {
    let mut presets = *presets;
    if let Some(mines) = args.mines {
        presets
            .set_mines(args.difficulty, mines)
            .with_context(|| format!("{mines} mines do not fit a {} board", args.difficulty))?;
    }

    let settings = presets.settings(args.difficulty, args.mode)?;
    match (settings.mode(), args.time_limit) {
        (GameMode::TimeAttack { .. }, Some(limit_secs)) => Ok(GameSettings::new(
            settings.config(),
            GameMode::TimeAttack { limit_secs },
            settings.hints(),
        )?),
        _ => Ok(settings),
    }
}

fn random_seed() -> u64 {
    OffsetDateTime::now_utc().unix_timestamp_nanos() as u64
}

/// Runs one game on stdin/stdout. Player commands and clock ticks are
/// handled one at a time on this thread.
pub fn play(settings: GameSettings, args: PlayArgs, mut store: JsonFileStore) -> Result<()> {
    let seed = args.seed.unwrap_or_else(random_seed);
    log::info!("starting {} {} game, seed {}", args.mode, args.difficulty, seed);

    let game = Game::new(settings, seed);
    let mut session = Session {
        renderer: TerminalRenderer::new(&game),
        game,
        difficulty: args.difficulty,
        events: spawn_stdin_reader(),
    };

    println!("{HELP}");
    session.draw()?;
    let finished = session.run()?;

    if finished && session.game.phase() == Phase::Won {
        session.record_score(&mut store, args.name)?;
    }
    Ok(())
}

struct Session {
    game: Game,
    renderer: TerminalRenderer,
    difficulty: Difficulty,
    events: Receiver<Event>,
}

impl Session {
    /// Returns whether the game reached a terminal phase (as opposed to the player quitting).
    fn run(&mut self) -> Result<bool> {
        let mut next_tick = Instant::now() + TICK;

        while !self.game.is_finished() {
            let timeout = next_tick.saturating_duration_since(Instant::now());
            match self.events.recv_timeout(timeout) {
                Ok(Event::Line(line)) => {
                    let input = match Input::parse(&line) {
                        Ok(input) => input,
                        Err(err) => {
                            println!("{err:#}");
                            continue;
                        }
                    };
                    match input {
                        Input::Quit => return Ok(false),
                        Input::Help => println!("{HELP}"),
                        action => {
                            let update = self.apply(action);
                            if update.has_event(GameEvent::Started) {
                                next_tick = Instant::now() + TICK;
                            }
                            if update.is_empty() {
                                println!("Nothing to do there.");
                            } else {
                                self.notify(&update);
                                self.draw()?;
                            }
                        }
                    }
                }
                Ok(Event::Closed) | Err(RecvTimeoutError::Disconnected) => return Ok(false),
                Err(RecvTimeoutError::Timeout) => {
                    next_tick += TICK;
                    let update = self.game.tick();
                    self.notify(&update);
                    if update.has_event(GameEvent::TimeUp) {
                        self.draw()?;
                    }
                }
            }
        }
        Ok(true)
    }

    fn apply(&mut self, input: Input) -> Update {
        log::debug!("input {:?}", input);
        match input {
            Input::Reveal(coords) => self.game.reveal(coords),
            Input::Flag(coords) => self.game.toggle_flag(coords),
            Input::Chord(coords) => self.game.chord(coords),
            Input::Hint => self.game.hint(),
            Input::Help | Input::Quit => Default::default(),
        }
    }

    fn notify(&mut self, update: &Update) {
        update.notify(&mut self.renderer);
    }

    fn draw(&mut self) -> Result<()> {
        self.renderer.draw(&self.game, &mut io::stdout().lock())?;
        Ok(())
    }

    fn record_score(&mut self, store: &mut JsonFileStore, name: Option<String>) -> Result<()> {
        let bucket = Bucket::new(self.game.mode().kind(), self.difficulty);
        let time = u32::from(self.game.elapsed_secs());
        if !store.load().qualifies(bucket, time) {
            println!("{time}s, not fast enough for the {} {} table.", bucket.mode, bucket.difficulty);
            return Ok(());
        }

        let name = match name {
            Some(name) => name,
            None => self.prompt("New high score! Your name: ")?,
        };
        let entry = HighScoreEntry::new(&name, time, OffsetDateTime::now_utc().unix_timestamp());
        if let Some(rank) = store.record(bucket, entry)? {
            println!("#{} on the {} {} table ({time}s).", rank + 1, bucket.mode, bucket.difficulty);
        }
        Ok(())
    }

    fn prompt(&self, question: &str) -> Result<String> {
        print!("{question}");
        io::stdout().flush()?;
        match self.events.recv() {
            Ok(Event::Line(line)) => Ok(line.trim().to_string()),
            _ => Ok(String::new()),
        }
    }
}

fn spawn_stdin_reader() -> Receiver<Event> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(Event::Line(line)).is_err() {
                return;
            }
        }
        let _ = tx.send(Event::Closed);
    });
    rx
}

#[cfg(test)]
mod tests {
    use super::*;
    use minesweep_core::ModeKind;

    #[test]
    fn mine_override_applies_to_selected_preset() {
        let args = PlayArgs {
            difficulty: Difficulty::Medium,
            mines: Some(60),
            ..Default::default()
        };

        let settings = settings_for(&Presets::default(), &args).unwrap();

        assert_eq!(settings.config().mines(), 60);
        assert_eq!(settings.config().size(), (16, 16));
    }

    #[test]
    fn oversized_mine_override_fails() {
        let args = PlayArgs {
            mines: Some(200),
            ..Default::default()
        };
        assert!(settings_for(&Presets::default(), &args).is_err());
    }

    #[test]
    fn time_limit_only_matters_for_time_attack() {
        let classic = PlayArgs {
            time_limit: Some(30),
            ..Default::default()
        };
        let settings = settings_for(&Presets::default(), &classic).unwrap();
        assert_eq!(settings.mode(), GameMode::Classic);

        let attack = PlayArgs {
            mode: ModeKind::TimeAttack,
            time_limit: Some(30),
            ..Default::default()
        };
        let settings = settings_for(&Presets::default(), &attack).unwrap();
        assert_eq!(settings.mode(), GameMode::TimeAttack { limit_secs: 30 });
    }
}
