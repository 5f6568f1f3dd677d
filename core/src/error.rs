use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Coordinates outside the board")]
    InvalidCoords,
    #[error("Mine count does not fit the board")]
    TooManyMines,
    #[error("Board dimensions must be positive")]
    EmptyBoard,
}

pub type Result<T> = std::result::Result<T, GameError>;
