use core::fmt;
use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub use alphabet::*;
pub use card::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use session::*;
pub use types::*;

mod alphabet;
mod card;
mod engine;
mod error;
mod generator;
mod session;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub size: Coord2,
}

impl BoardConfig {
    pub const fn new_unchecked(size: Coord2) -> Self {
        Self { size }
    }

    /// Board of `rows x cols` cards; the card count must be even and non-zero.
    pub fn new(size: Coord2) -> Result<Self> {
        let total = mult(size.0, size.1);
        if total == 0 {
            Err(GameError::EmptyBoard)
        } else if total % 2 != 0 {
            Err(GameError::OddCardCount)
        } else {
            Ok(Self::new_unchecked(size))
        }
    }

    pub const fn rows(&self) -> Coord {
        self.size.0
    }

    pub const fn cols(&self) -> Coord {
        self.size.1
    }

    pub const fn total_cards(&self) -> CardCount {
        mult(self.size.0, self.size.1)
    }

    pub const fn pairs_needed(&self) -> CardCount {
        self.total_cards() / 2
    }
}

/// Preset board sizes offered at game start.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Self::Easy, Self::Medium, Self::Hard];

    pub const fn size(self) -> Coord2 {
        match self {
            Self::Easy => (3, 4),
            Self::Medium => (4, 5),
            Self::Hard => (5, 6),
        }
    }

    pub const fn config(self) -> BoardConfig {
        BoardConfig::new_unchecked(self.size())
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (rows, cols) = self.size();
        write!(f, "{} ({}x{})", self.label(), rows, cols)
    }
}

/// Symbols laid out on the board, every symbol present exactly twice.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Deck {
    symbols: Array2<Symbol>,
}

impl Deck {
    /// Builds a deck from a fixed row-major layout, checking shape and pairing.
    pub fn from_symbols(size: Coord2, symbols: &[Symbol]) -> Result<Self> {
        let config = BoardConfig::new(size)?;
        if symbols.len() != config.total_cards() as usize {
            return Err(GameError::InvalidBoardShape);
        }

        let mut counts: BTreeMap<Symbol, usize> = BTreeMap::new();
        for &symbol in symbols {
            *counts.entry(symbol).or_default() += 1;
        }
        if counts.values().any(|&count| count != 2) {
            return Err(GameError::UnpairedSymbol);
        }

        Self::from_row_major(size, symbols.to_vec())
    }

    pub(crate) fn from_row_major(size: Coord2, symbols: Vec<Symbol>) -> Result<Self> {
        let symbols = Array2::from_shape_vec(size.to_nd_index(), symbols)
            .map_err(|_| GameError::InvalidBoardShape)?;
        Ok(Self { symbols })
    }

    pub fn board_config(&self) -> BoardConfig {
        BoardConfig::new_unchecked(self.size())
    }

    pub fn size(&self) -> Coord2 {
        let dim = self.symbols.dim();
        // dimensions were built from a Coord2
        (dim.0 as Coord, dim.1 as Coord)
    }

    pub fn total_cards(&self) -> CardCount {
        self.board_config().total_cards()
    }

    pub fn pair_count(&self) -> CardCount {
        self.board_config().pairs_needed()
    }

    pub fn validate_index(&self, index: CardIndex) -> Result<CardIndex> {
        if index < self.symbols.len() {
            Ok(index)
        } else {
            Err(GameError::InvalidIndex)
        }
    }

    pub fn symbol_at(&self, index: CardIndex) -> Result<Symbol> {
        let index = self.validate_index(index)?;
        Ok(self[index])
    }

    /// Symbols in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.symbols.iter().copied()
    }

    /// Linear indices holding `symbol`.
    pub fn positions_of(&self, symbol: Symbol) -> impl Iterator<Item = CardIndex> + '_ {
        self.iter()
            .enumerate()
            .filter(move |&(_, s)| s == symbol)
            .map(|(index, _)| index)
    }
}

impl Index<CardIndex> for Deck {
    type Output = Symbol;

    fn index(&self, index: CardIndex) -> &Self::Output {
        &self.symbols[split_index(index, self.size().1)]
    }
}

/// Result of a single click, as reported to the host.
///
/// The classic `(is_match, other_index, symbol)` triple is available through
/// [`ClickOutcome::as_tuple`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClickOutcome {
    /// Click was out of turn or on a card that is not face down.
    Ignored,
    /// First card of a turn was turned over.
    Revealed { index: CardIndex, symbol: Symbol },
    /// Second card matched the first; both stay face up for good.
    Matched {
        index: CardIndex,
        first: CardIndex,
        symbol: Symbol,
    },
    /// Second card did not match; both must be hidden again after a delay.
    Mismatched {
        index: CardIndex,
        other: CardIndex,
        symbol: Symbol,
    },
}

impl ClickOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::Ignored)
    }

    pub const fn is_match(self) -> bool {
        matches!(self, Self::Matched { .. })
    }

    /// Card that must be hidden together with the clicked one after a mismatch.
    pub const fn other_index(self) -> Option<CardIndex> {
        match self {
            Self::Mismatched { other, .. } => Some(other),
            _ => None,
        }
    }

    pub const fn symbol(self) -> Option<Symbol> {
        use ClickOutcome::*;
        match self {
            Ignored => None,
            Revealed { symbol, .. } | Matched { symbol, .. } | Mismatched { symbol, .. } => {
                Some(symbol)
            }
        }
    }

    pub const fn as_tuple(self) -> (bool, Option<CardIndex>, Option<Symbol>) {
        (self.is_match(), self.other_index(), self.symbol())
    }
}
