use core::num::Saturating;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnPhase {
    /// No card turned over this turn.
    #[default]
    Idle,
    /// First card of the turn is face up.
    OneRevealed,
    /// Second card was evaluated; waiting for the host to call `reset_turn`.
    Resolving,
}

impl TurnPhase {
    pub const fn accepts_clicks(self) -> bool {
        !matches!(self, Self::Resolving)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
struct FirstPick {
    index: CardIndex,
    symbol: Symbol,
}

/// Turn state machine for one dealt deck.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TurnEngine {
    deck: Deck,
    faces: Vec<CardFace>,
    first: Option<FirstPick>,
    pending_mismatch: Option<[CardIndex; 2]>,
    can_click: bool,
    moves: Saturating<u32>,
    matched_count: CardCount,
}

impl TurnEngine {
    pub fn new(deck: Deck) -> Self {
        let total = deck.total_cards() as usize;
        Self {
            deck,
            faces: vec![CardFace::Hidden; total],
            first: None,
            pending_mismatch: None,
            can_click: true,
            moves: Saturating(0),
            matched_count: 0,
        }
    }

    /// Deals a fresh deck and starts over from `Idle` with zero moves.
    pub fn setup(
        config: BoardConfig,
        alphabet: &Alphabet,
        generator: impl DeckGenerator,
    ) -> Result<Self> {
        let deck = generator.generate(config, alphabet)?;
        Ok(Self::new(deck))
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn size(&self) -> Coord2 {
        self.deck.size()
    }

    pub fn total_cards(&self) -> CardCount {
        self.deck.total_cards()
    }

    pub fn phase(&self) -> TurnPhase {
        if !self.can_click {
            TurnPhase::Resolving
        } else if self.first.is_some() {
            TurnPhase::OneRevealed
        } else {
            TurnPhase::Idle
        }
    }

    pub fn can_click(&self) -> bool {
        self.can_click
    }

    pub fn moves(&self) -> u32 {
        self.moves.0
    }

    pub fn first_index(&self) -> Option<CardIndex> {
        self.first.map(|pick| pick.index)
    }

    pub fn first_symbol(&self) -> Option<Symbol> {
        self.first.map(|pick| pick.symbol)
    }

    /// Mismatched pair still face up, waiting for `reset_turn`.
    pub fn pending_mismatch(&self) -> Option<[CardIndex; 2]> {
        self.pending_mismatch
    }

    pub fn faces(&self) -> &[CardFace] {
        &self.faces
    }

    pub fn face_at(&self, index: CardIndex) -> Result<CardFace> {
        let index = self.deck.validate_index(index)?;
        Ok(self.faces[index])
    }

    /// Symbol the player is allowed to see at `index`, if any.
    pub fn visible_symbol(&self, index: CardIndex) -> Result<Option<Symbol>> {
        Ok(match self.face_at(index)? {
            CardFace::Hidden => None,
            CardFace::Revealed | CardFace::Matched => Some(self.deck[index]),
        })
    }

    pub fn matched_pairs(&self) -> CardCount {
        self.matched_count / 2
    }

    pub fn is_won(&self) -> bool {
        self.matched_count == self.deck.total_cards()
    }

    /// Processes a click on card `index`.
    ///
    /// Out-of-turn clicks and clicks on cards that are not face down are
    /// reported as [`ClickOutcome::Ignored`] without touching any state.
    pub fn handle_click(&mut self, index: CardIndex) -> Result<ClickOutcome> {
        let index = self.deck.validate_index(index)?;

        if !self.can_click || !self.faces[index].is_face_down() {
            log::trace!(
                "Ignored click at {}, can_click: {}, face: {:?}",
                index,
                self.can_click,
                self.faces[index]
            );
            return Ok(ClickOutcome::Ignored);
        }

        let symbol = self.deck[index];
        self.faces[index] = CardFace::Revealed;

        let Some(first) = self.first.take() else {
            self.first = Some(FirstPick { index, symbol });
            log::debug!("Revealed first card {} ({})", index, symbol);
            return Ok(ClickOutcome::Revealed { index, symbol });
        };

        self.moves += 1;
        self.can_click = false;

        if first.symbol == symbol {
            self.faces[first.index] = CardFace::Matched;
            self.faces[index] = CardFace::Matched;
            self.matched_count += 2;
            log::debug!(
                "Matched {} and {} ({}), moves: {}",
                first.index,
                index,
                symbol,
                self.moves
            );
            Ok(ClickOutcome::Matched {
                index,
                first: first.index,
                symbol,
            })
        } else {
            self.pending_mismatch = Some([first.index, index]);
            log::debug!(
                "Mismatch {} ({}) and {} ({}), moves: {}",
                first.index,
                first.symbol,
                index,
                symbol,
                self.moves
            );
            Ok(ClickOutcome::Mismatched {
                index,
                other: first.index,
                symbol,
            })
        }
    }

    /// Ends a resolving turn: hides a pending mismatch and accepts clicks again.
    ///
    /// Returns the pair that was turned face down, if any. Calling this while
    /// no turn is resolving changes nothing.
    pub fn reset_turn(&mut self) -> Option<[CardIndex; 2]> {
        let hidden = self.pending_mismatch.take();
        if let Some(pair) = hidden {
            for index in pair {
                self.faces[index] = CardFace::Hidden;
            }
            log::trace!("Hid mismatched pair {:?}", pair);
        }
        self.can_click = true;
        hidden
    }

    /// Same predicate as [`check_win`] over the engine's own faces.
    pub fn check_win(&self) -> bool {
        check_win(&self.faces)
    }

    /// Cards face up in the current turn; never more than two.
    pub fn revealed_count(&self) -> usize {
        self.faces
            .iter()
            .filter(|&&face| face == CardFace::Revealed)
            .count()
    }
}
