use anyhow::{Context, Result, bail};
use minesweep_core::{Coord, Coord2};

/// One line typed by the player. Coordinates are 1-based on screen, 0-based here.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Input {
    Reveal(Coord2),
    Flag(Coord2),
    Chord(Coord2),
    Hint,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  r ROW COL   reveal a cell
  f ROW COL   toggle a flag
  c ROW COL   chord around a revealed number
  h           use a hint
  ?           show this help
  q           quit";

impl Input {
    pub fn parse(line: &str) -> Result<Self> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            bail!("empty command");
        };

        let input = match verb.to_ascii_lowercase().as_str() {
            "r" | "reveal" => Self::Reveal(parse_coords(&mut words)?),
            "f" | "flag" => Self::Flag(parse_coords(&mut words)?),
            "c" | "chord" => Self::Chord(parse_coords(&mut words)?),
            "h" | "hint" => Self::Hint,
            "?" | "help" => Self::Help,
            "q" | "quit" | "exit" => Self::Quit,
            other => bail!("unknown command {other:?}, type ? for help"),
        };

        if let Some(extra) = words.next() {
            bail!("unexpected {extra:?} after command");
        }
        Ok(input)
    }
}

fn parse_coords<'a>(words: &mut impl Iterator<Item = &'a str>) -> Result<Coord2> {
    let row = parse_axis(words.next(), "row")?;
    let col = parse_axis(words.next(), "column")?;
    Ok((row, col))
}

fn parse_axis(word: Option<&str>, what: &str) -> Result<Coord> {
    let word = word.with_context(|| format!("missing {what}"))?;
    let value: u16 = word
        .parse()
        .with_context(|| format!("{what} {word:?} is not a number"))?;
    match value.checked_sub(1).map(Coord::try_from) {
        Some(Ok(value)) => Ok(value),
        _ => bail!("{what} {value} is out of range"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_actions_with_one_based_coords() {
        assert_eq!(Input::parse("r 1 1").unwrap(), Input::Reveal((0, 0)));
        assert_eq!(Input::parse("FLAG 3 9").unwrap(), Input::Flag((2, 8)));
        assert_eq!(Input::parse("  c 16 30 ").unwrap(), Input::Chord((15, 29)));
        assert_eq!(Input::parse("h").unwrap(), Input::Hint);
        assert_eq!(Input::parse("quit").unwrap(), Input::Quit);
    }

    #[test]
    fn rejects_bad_coordinates() {
        assert!(Input::parse("r 0 1").is_err());
        assert!(Input::parse("r 1").is_err());
        assert!(Input::parse("r a b").is_err());
        assert!(Input::parse("r 300 1").is_err());
        assert!(Input::parse("r 1 1 1").is_err());
    }

    #[test]
    fn rejects_unknown_and_empty() {
        assert!(Input::parse("").is_err());
        assert!(Input::parse("dig 1 1").is_err());
    }
}
