use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Board must have at least one row and one column")]
    InvalidSize,
    #[error("A board needs at least one mine")]
    NoMines,
    #[error("Too many mines, at least one cell must stay safe")]
    TooManyMines,
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Time limit must be at least one second")]
    InvalidTimeLimit,
    #[error("Unknown name")]
    UnknownName,
    #[error("High score table could not be encoded")]
    Encode,
}

pub type Result<T> = core::result::Result<T, GameError>;
