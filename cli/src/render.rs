use std::io::{self, Write};

use minesweep_core::{CellChange, CellCount, CellView, Coord2, Game, format_counter};

/// Mirrors the visible board from cell updates and draws it as text.
#[derive(Debug)]
pub struct TerminalRenderer {
    rows: usize,
    cols: usize,
    cells: Vec<CellView>,
    messages: Vec<String>,
}

impl TerminalRenderer {
    pub fn new(game: &Game) -> Self {
        let (rows, cols) = game.size();
        let mut renderer = Self {
            rows: rows.into(),
            cols: cols.into(),
            cells: vec![CellView::Hidden; usize::from(rows) * usize::from(cols)],
            messages: Vec::new(),
        };
        renderer.apply(&game.snapshot());
        renderer
    }

    pub fn view_at(&self, (row, col): Coord2) -> CellView {
        self.cells[usize::from(row) * self.cols + usize::from(col)]
    }

    fn apply(&mut self, changes: &[CellChange]) {
        for change in changes {
            let (row, col) = change.coords;
            let index = usize::from(row) * self.cols + usize::from(col);
            if let Some(cell) = self.cells.get_mut(index) {
                *cell = change.view;
            }
        }
    }

    pub fn say(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }

    /// Header, board and any queued messages.
    pub fn draw(&mut self, game: &Game, out: &mut impl Write) -> io::Result<()> {
        writeln!(
            out,
            "mines {}   time {}   hints {}",
            format_counter(game.mines_remaining()),
            format_counter(game.display_time().into()),
            game.hints_remaining()
        )?;

        write!(out, "    ")?;
        for col in 0..self.cols {
            write!(out, "{:>3}", col + 1)?;
        }
        writeln!(out)?;

        for row in 0..self.rows {
            write!(out, "{:>3} ", row + 1)?;
            for col in 0..self.cols {
                write!(out, "{:>3}", symbol(self.cells[row * self.cols + col]))?;
            }
            writeln!(out)?;
        }

        for message in self.messages.drain(..) {
            writeln!(out, "{message}")?;
        }
        out.flush()
    }
}

fn symbol(view: CellView) -> char {
    match view {
        CellView::Hidden => '.',
        CellView::Flagged => 'F',
        CellView::Number(0) => ' ',
        CellView::Number(count) => char::from_digit(count.into(), 10).unwrap_or('?'),
        CellView::Mine => '*',
    }
}

fn describe((row, col): Coord2) -> String {
    format!("row {}, col {}", u16::from(row) + 1, u16::from(col) + 1)
}

impl minesweep_core::GameObserver for TerminalRenderer {
    fn on_cells_changed(&mut self, changes: &[CellChange]) {
        self.apply(changes);
    }

    fn on_reveal(&mut self, count: CellCount) {
        if count > 1 {
            log::debug!("opened {} cells", count);
        }
    }

    fn on_explode(&mut self, coords: Coord2) {
        self.say(format!("\x07BOOM! Mine at {}.", describe(coords)));
    }

    fn on_hint(&mut self, coords: Coord2) {
        self.say(format!("Hint: {} is safe.", describe(coords)));
    }

    fn on_time_up(&mut self) {
        self.say("Time's up!");
    }

    fn on_win(&mut self) {
        self.say("Board cleared, you win!");
    }

    fn on_lose(&mut self) {
        self.say("Game over.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minesweep_core::{FixedGenerator, GameConfig, GameObserver, GameSettings};

    fn game() -> Game {
        let config = GameConfig::new(2, 3, 1).unwrap();
        Game::with_generator(
            GameSettings::classic(config).with_hints(1),
            FixedGenerator::new([(0, 2)]),
            0,
        )
    }

    #[test]
    fn mirrors_updates_from_the_game() {
        let mut game = game();
        let mut renderer = TerminalRenderer::new(&game);

        game.reveal((1, 0)).notify(&mut renderer);
        game.toggle_flag((0, 2)).notify(&mut renderer);

        assert_eq!(renderer.view_at((1, 0)), CellView::Number(0));
        assert_eq!(renderer.view_at((1, 1)), CellView::Number(1));
        assert_eq!(renderer.view_at((0, 2)), CellView::Flagged);
    }

    #[test]
    fn draws_header_board_and_messages() {
        let mut game = game();
        let mut renderer = TerminalRenderer::new(&game);
        game.reveal((1, 0)).notify(&mut renderer);
        renderer.on_hint((0, 0));

        let mut out = Vec::new();
        renderer.draw(&game, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("mines 001   time 000   hints 1\n"));
        assert!(text.contains("\n  1      1  .\n"));
        assert!(text.contains("\n  2      1  .\n"));
        assert!(text.ends_with("Hint: row 1, col 1 is safe.\n"));
    }
}
