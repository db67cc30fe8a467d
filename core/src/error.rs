use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Card index is outside the board")]
    InvalidIndex,
    #[error("Board has no cards")]
    EmptyBoard,
    #[error("Board needs an even number of cards")]
    OddCardCount,
    #[error("Board needs {needed} distinct symbols but the alphabet only has {available}")]
    InsufficientSymbols { needed: usize, available: usize },
    #[error("Alphabet contains a duplicate symbol")]
    DuplicateSymbol,
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
    #[error("Symbol does not appear exactly twice")]
    UnpairedSymbol,
}

pub type Result<T> = core::result::Result<T, GameError>;
