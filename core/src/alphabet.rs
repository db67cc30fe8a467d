use serde::{Deserialize, Serialize};

use crate::*;

/// The stock card faces, one code point each.
pub const ANIMALS: [Symbol; 24] = [
    '🐶', '🐱', '🐭', '🐹', '🐰', '🦊', '🐻', '🐼', '🐨', '🐯', '🦁', '🐮', '🐷', '🐸', '🐵', '🐔',
    '🐧', '🐦', '🐤', '🦄', '🐝', '🐛', '🦋', '🐌',
];

/// Ordered set of distinct symbols a deck is drawn from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alphabet {
    symbols: Vec<Symbol>,
}

impl Alphabet {
    pub fn new(symbols: impl IntoIterator<Item = Symbol>) -> Result<Self> {
        let symbols: Vec<Symbol> = symbols.into_iter().collect();
        for (i, symbol) in symbols.iter().enumerate() {
            if symbols[..i].contains(symbol) {
                return Err(GameError::DuplicateSymbol);
            }
        }
        Ok(Self { symbols })
    }

    pub fn animals() -> Self {
        Self {
            symbols: ANIMALS.to_vec(),
        }
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    /// Checks that a board of `config` can be dealt from this alphabet.
    pub fn check_capacity(&self, config: &BoardConfig) -> Result<()> {
        let needed = config.pairs_needed() as usize;
        if needed > self.len() {
            Err(GameError::InsufficientSymbols {
                needed,
                available: self.len(),
            })
        } else {
            Ok(())
        }
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::animals()
    }
}
