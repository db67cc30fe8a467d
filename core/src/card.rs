use serde::{Deserialize, Serialize};

/// Player-visible state of a single card, stored by the turn engine.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardFace {
    #[default]
    Hidden,
    /// Face up during the current turn, not yet part of a found pair.
    Revealed,
    Matched,
}

impl CardFace {
    pub const fn is_face_down(self) -> bool {
        matches!(self, Self::Hidden)
    }

    pub const fn is_matched(self) -> bool {
        matches!(self, Self::Matched)
    }
}

/// True iff every card on the board has been matched.
///
/// An empty slice is never a won board.
pub fn check_win(faces: &[CardFace]) -> bool {
    !faces.is_empty() && faces.iter().all(|face| face.is_matched())
}
