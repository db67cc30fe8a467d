use crate::*;
pub use random::*;

mod random;

pub trait DeckGenerator {
    fn generate(self, config: BoardConfig, alphabet: &Alphabet) -> Result<Deck>;
}

/// Deals a fixed, pre-validated deck; handy for scripted games and tests.
impl DeckGenerator for Deck {
    fn generate(self, config: BoardConfig, _alphabet: &Alphabet) -> Result<Deck> {
        if self.board_config() == config {
            Ok(self)
        } else {
            Err(GameError::InvalidBoardShape)
        }
    }
}
