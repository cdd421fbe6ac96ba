use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SessionError {
    #[error("Puzzle cannot be played: {0}")]
    Unplayable(String),
    #[error("Unknown tile {0}")]
    UnknownTile(usize),
    #[error("Unknown word {0:?}")]
    UnknownWord(String),
    #[error("Tile {0} belongs to a solved category")]
    TileSolved(usize),
    #[error("Selection already holds {limit} tiles")]
    SelectionFull { limit: usize },
    #[error("Select {expected} tiles first ({selected} selected)")]
    IncompleteSelection { expected: usize, selected: usize },
    #[error("Already guessed")]
    AlreadyGuessed,
    #[error("The game is over")]
    GameOver,
    #[error("Game not found: {0}")]
    NotFound(Uuid),
}

pub type Result<T> = std::result::Result<T, SessionError>;
