use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// New visible state of one cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellChange {
    pub coords: Coord2,
    pub view: CellView,
}

/// Notable things that happened during one action or tick.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Mines were placed and the clock started.
    Started,
    Revealed { count: CellCount },
    Flagged { coords: Coord2, flagged: bool },
    Exploded { coords: Coord2 },
    Hint { coords: Coord2 },
    Tick { display: u16 },
    TimeUp,
    Won,
    Lost,
}

/// Everything an action changed, for renderers and other collaborators.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Update {
    pub changes: Vec<CellChange>,
    pub events: Vec<GameEvent>,
}

impl Update {
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty() && self.events.is_empty()
    }

    pub fn has_event(&self, event: GameEvent) -> bool {
        self.events.contains(&event)
    }

    pub(crate) fn push_change(&mut self, coords: Coord2, view: CellView) {
        self.changes.push(CellChange { coords, view });
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn merge(&mut self, other: Update) {
        self.changes.extend(other.changes);
        self.events.extend(other.events);
    }

    /// Forwards this update to `observer`: cell changes first, then events in order.
    pub fn notify(&self, observer: &mut dyn GameObserver) {
        if !self.changes.is_empty() {
            observer.on_cells_changed(&self.changes);
        }

        for &event in &self.events {
            use GameEvent::*;
            match event {
                Started => observer.on_start(),
                Revealed { count } => observer.on_reveal(count),
                Flagged { coords, flagged } => observer.on_flag(coords, flagged),
                Exploded { coords } => observer.on_explode(coords),
                Hint { coords } => observer.on_hint(coords),
                Tick { display } => observer.on_tick(display),
                TimeUp => observer.on_time_up(),
                Won => observer.on_win(),
                Lost => observer.on_lose(),
            }
        }
    }
}

/// Fire-and-forget hooks for rendering, audio and effects. All default to no-ops.
pub trait GameObserver {
    fn on_cells_changed(&mut self, _changes: &[CellChange]) {}
    fn on_start(&mut self) {}
    fn on_reveal(&mut self, _count: CellCount) {}
    fn on_flag(&mut self, _coords: Coord2, _flagged: bool) {}
    fn on_explode(&mut self, _coords: Coord2) {}
    fn on_hint(&mut self, _coords: Coord2) {}
    fn on_tick(&mut self, _display: u16) {}
    fn on_time_up(&mut self) {}
    fn on_win(&mut self) {}
    fn on_lose(&mut self) {}
}
