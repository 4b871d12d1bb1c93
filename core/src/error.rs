use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Cell holds no tile")]
    EmptyCell,
    #[error("Spawned row does not match board width")]
    RowLengthMismatch,
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
    #[error("Invalid game config: {0}")]
    InvalidConfig(&'static str),
}

pub type Result<T> = core::result::Result<T, GameError>;
