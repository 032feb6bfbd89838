use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - Pending -> Running (first reveal places the mines)
/// - Running -> Won
/// - Running -> Lost
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Grid exists, no mines yet, clock stopped
    #[default]
    Pending,
    /// Mines placed, clock running
    Running,
    Won,
    Lost,
}

impl Phase {
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Game mode without its parameters, used to key high scores.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModeKind {
    Classic,
    TimeAttack,
}

impl ModeKind {
    pub const ALL: [ModeKind; 2] = [Self::Classic, Self::TimeAttack];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Classic => "classic",
            Self::TimeAttack => "time-attack",
        }
    }
}

impl fmt::Display for ModeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ModeKind {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.name().eq_ignore_ascii_case(s))
            .ok_or(GameError::UnknownName)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    /// Clock counts up from zero.
    Classic,
    /// Clock counts down from `limit_secs`; reaching zero loses the game.
    TimeAttack { limit_secs: u16 },
}

impl GameMode {
    pub const fn kind(self) -> ModeKind {
        match self {
            Self::Classic => ModeKind::Classic,
            Self::TimeAttack { .. } => ModeKind::TimeAttack,
        }
    }
}

/// A single game from difficulty selection to win or loss.
///
/// Every action returns an [`Update`] describing the cells it changed and the
/// events it produced. Actions that do not apply (terminal phase, flagged or
/// revealed target, off-grid coordinates) return an empty update.
#[derive(Debug)]
pub struct Game {
    settings: GameSettings,
    field: Minefield,
    phase: Phase,
    flag_count: CellCount,
    hints_remaining: u8,
    elapsed_secs: u16,
    generator: Box<dyn MinefieldGenerator>,
    rng: SmallRng,
}

impl Game {
    /// Game with randomly placed mines, reproducible from `seed`.
    pub fn new(settings: GameSettings, seed: u64) -> Self {
        Self::with_generator(settings, RandomGenerator::from_seed(seed), !seed)
    }

    /// Game whose mines come from `generator`, `hint_seed` drives hint selection.
    pub fn with_generator(
        settings: GameSettings,
        generator: impl MinefieldGenerator + 'static,
        hint_seed: u64,
    ) -> Self {
        Self {
            settings,
            field: Minefield::new(settings.config()),
            phase: Phase::Pending,
            flag_count: 0,
            hints_remaining: settings.hints(),
            elapsed_secs: 0,
            generator: Box::new(generator),
            rng: SmallRng::seed_from_u64(hint_seed),
        }
    }

    pub fn settings(&self) -> GameSettings {
        self.settings
    }

    pub fn config(&self) -> GameConfig {
        self.settings.config()
    }

    pub fn mode(&self) -> GameMode {
        self.settings.mode()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.phase.is_terminal()
    }

    pub fn field(&self) -> &Minefield {
        &self.field
    }

    pub fn size(&self) -> Coord2 {
        self.field.size()
    }

    pub fn revealed_count(&self) -> CellCount {
        self.field.revealed_count()
    }

    pub fn flag_count(&self) -> CellCount {
        self.flag_count
    }

    pub fn hints_remaining(&self) -> u8 {
        self.hints_remaining
    }

    pub fn elapsed_secs(&self) -> u16 {
        self.elapsed_secs
    }

    /// Seconds left in a time-attack game, `None` in classic mode.
    pub fn remaining_secs(&self) -> Option<u16> {
        match self.mode() {
            GameMode::Classic => None,
            GameMode::TimeAttack { limit_secs } => Some(limit_secs.saturating_sub(self.elapsed_secs)),
        }
    }

    /// Clock value to display: elapsed time in classic, time left in time-attack.
    pub fn display_time(&self) -> u16 {
        clamp_display(self.remaining_secs().unwrap_or(self.elapsed_secs))
    }

    /// Mines minus flags. Negative when the player over-flags.
    pub fn mines_remaining(&self) -> i32 {
        i32::from(self.config().mines()) - i32::from(self.flag_count)
    }

    pub fn view_at(&self, coords: Coord2) -> Option<CellView> {
        self.field.cell(coords).map(Cell::view)
    }

    /// Visible state of every cell, for an initial full render.
    pub fn snapshot(&self) -> Vec<CellChange> {
        let (rows, cols) = self.size();
        (0..rows)
            .flat_map(|row| (0..cols).map(move |col| (row, col)))
            .filter_map(|coords| {
                self.view_at(coords)
                    .map(|view| CellChange { coords, view })
            })
            .collect()
    }

    /// Opens a cell. The first reveal of a game places the mines around it.
    pub fn reveal(&mut self, coords: Coord2) -> Update {
        let mut update = Update::default();

        if self.phase.is_terminal() {
            return update;
        }
        if !self.field.cell(coords).is_some_and(Cell::is_hidden) {
            return update;
        }

        if self.phase == Phase::Pending {
            self.start(coords, &mut update);
        }

        match self.field.reveal(coords) {
            RevealResult::Ignored => {}
            RevealResult::MineHit(mine) => {
                log::debug!("mine hit at {:?}", mine);
                update.push_change(mine, CellView::Mine);
                update.push_event(GameEvent::Exploded { coords: mine });
                self.lose(&mut update);
            }
            RevealResult::Revealed(opened) => {
                for &pos in &opened {
                    if let Some(view) = self.view_at(pos) {
                        update.push_change(pos, view);
                    }
                }
                update.push_event(GameEvent::Revealed {
                    count: opened.len() as CellCount,
                });
                if self.field.is_cleared() {
                    self.win(&mut update);
                }
            }
        }

        update
    }

    /// Toggles a flag on a hidden or flagged cell.
    pub fn toggle_flag(&mut self, coords: Coord2) -> Update {
        let mut update = Update::default();

        if self.phase.is_terminal() {
            return update;
        }
        let Some(cell) = self.field.cell(coords) else {
            return update;
        };

        let flagged = !cell.is_flagged();
        if !self.field.set_flag(coords, flagged) {
            return update;
        }

        if flagged {
            self.flag_count += 1;
        } else {
            self.flag_count -= 1;
        }
        update.push_change(coords, if flagged { CellView::Flagged } else { CellView::Hidden });
        update.push_event(GameEvent::Flagged { coords, flagged });
        update
    }

    /// Whether chording at `coords` would open its neighbors.
    pub fn can_chord(&self, coords: Coord2) -> bool {
        if self.phase != Phase::Running {
            return false;
        }
        match self.view_at(coords) {
            Some(CellView::Number(count)) if count > 0 => {
                self.field.count_flagged_neighbors(coords) == count
            }
            _ => false,
        }
    }

    /// Opens all unflagged neighbors of a revealed number once the flags
    /// around it match. Wrong flag counts leave the game untouched.
    pub fn chord(&mut self, coords: Coord2) -> Update {
        let mut update = Update::default();
        if !self.can_chord(coords) {
            return update;
        }

        let targets: Vec<Coord2> = self
            .field
            .neighbors_of(coords)
            .filter(|&pos| self.field.cell(pos).is_some_and(Cell::is_hidden))
            .collect();
        log::debug!("chord at {:?} opens {} cells", coords, targets.len());

        for pos in targets {
            update.merge(self.reveal(pos));
        }
        update
    }

    /// Reveals a random safe cell, spending one hint.
    pub fn hint(&mut self) -> Update {
        let mut update = Update::default();
        if self.hints_remaining == 0 || self.phase != Phase::Running {
            return update;
        }

        let candidates = self
            .field
            .coords_where(|cell| !cell.is_mine() && cell.is_hidden());
        if candidates.is_empty() {
            return update;
        }

        let coords = candidates[self.rng.random_range(0..candidates.len())];
        self.hints_remaining -= 1;
        log::debug!("hint at {:?}, {} left", coords, self.hints_remaining);

        update.push_event(GameEvent::Hint { coords });
        update.merge(self.reveal(coords));
        update
    }

    /// Advances the clock by one second. Only a running game keeps time.
    pub fn tick(&mut self) -> Update {
        let mut update = Update::default();
        if self.phase != Phase::Running {
            return update;
        }

        self.elapsed_secs = self.elapsed_secs.saturating_add(1);
        update.push_event(GameEvent::Tick {
            display: self.display_time(),
        });

        if self.remaining_secs() == Some(0) {
            log::debug!("time is up after {}s", self.elapsed_secs);
            update.push_event(GameEvent::TimeUp);
            self.lose(&mut update);
        }
        update
    }

    fn start(&mut self, safe: Coord2, update: &mut Update) {
        let mut field = self.generator.generate(self.config(), safe);
        field.adopt_flags(&self.field);
        self.field = field;
        self.phase = Phase::Running;
        self.elapsed_secs = 0;
        log::debug!("game started from {:?}", safe);
        update.push_event(GameEvent::Started);
    }

    fn win(&mut self, update: &mut Update) {
        if self.phase.is_terminal() {
            return;
        }
        for coords in self.field.flag_mines() {
            self.flag_count += 1;
            update.push_change(coords, CellView::Flagged);
        }
        self.phase = Phase::Won;
        log::debug!("won after {}s", self.elapsed_secs);
        update.push_event(GameEvent::Won);
    }

    fn lose(&mut self, update: &mut Update) {
        if self.phase.is_terminal() {
            return;
        }
        for coords in self.field.reveal_mines() {
            update.push_change(coords, CellView::Mine);
        }
        self.phase = Phase::Lost;
        log::debug!("lost after {}s", self.elapsed_secs);
        update.push_event(GameEvent::Lost);
    }
}
