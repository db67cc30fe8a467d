use core::time::Duration;
use serde::{Deserialize, Serialize};
use web_time::Instant;

use crate::*;

/// Rendering side of a game session.
///
/// Only `reveal` and `hide` are required; the rest are hooks for sounds,
/// animations or status displays.
pub trait CardView {
    /// Shows `symbol` on card `index`. `permanent` cards belong to a found pair.
    fn reveal(&mut self, index: CardIndex, symbol: Symbol, permanent: bool);

    /// Turns card `index` face down again.
    fn hide(&mut self, index: CardIndex);

    fn moves_changed(&mut self, _moves: u32) {}

    fn mismatch_hidden(&mut self, _pair: [CardIndex; 2]) {}

    fn won(&mut self, _moves: u32) {}
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionOptions {
    /// How long a mismatched pair stays face up.
    pub hide_delay: Duration,
}

impl SessionOptions {
    pub const DEFAULT_HIDE_DELAY: Duration = Duration::from_millis(1000);
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            hide_delay: Self::DEFAULT_HIDE_DELAY,
        }
    }
}

/// Drives a [`TurnEngine`] from host clicks and owns the deferred mismatch hide.
///
/// A pending hide is always applied before the next click reaches the engine,
/// so at most one mismatched pair is ever face up.
#[derive(Clone, Debug)]
pub struct Session {
    engine: TurnEngine,
    alphabet: Alphabet,
    options: SessionOptions,
    hide_due: Option<Instant>,
}

impl Session {
    pub fn new(
        config: BoardConfig,
        alphabet: Alphabet,
        generator: impl DeckGenerator,
        options: SessionOptions,
    ) -> Result<Self> {
        let engine = TurnEngine::setup(config, &alphabet, generator)?;
        Ok(Self {
            engine,
            alphabet,
            options,
            hide_due: None,
        })
    }

    /// Starts a new game, discarding the current one and any pending hide.
    ///
    /// On error the current game is left untouched.
    pub fn setup(&mut self, config: BoardConfig, generator: impl DeckGenerator) -> Result<()> {
        self.engine = TurnEngine::setup(config, &self.alphabet, generator)?;
        self.hide_due = None;
        log::debug!("New game {}x{}", config.rows(), config.cols());
        Ok(())
    }

    pub fn engine(&self) -> &TurnEngine {
        &self.engine
    }

    pub fn options(&self) -> SessionOptions {
        self.options
    }

    pub fn moves(&self) -> u32 {
        self.engine.moves()
    }

    pub fn is_won(&self) -> bool {
        self.engine.is_won()
    }

    /// When the pending mismatch should be hidden, if one is face up.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.hide_due
    }

    pub fn click(
        &mut self,
        index: CardIndex,
        now: Instant,
        view: &mut impl CardView,
    ) -> Result<ClickOutcome> {
        let index = self.engine.deck().validate_index(index)?;
        self.flush(view);

        let outcome = self.engine.handle_click(index)?;
        match outcome {
            ClickOutcome::Ignored => {}
            ClickOutcome::Revealed { index, symbol } => {
                view.reveal(index, symbol, false);
            }
            ClickOutcome::Matched {
                index,
                first,
                symbol,
            } => {
                view.reveal(index, symbol, true);
                view.reveal(first, symbol, true);
                self.engine.reset_turn();
                view.moves_changed(self.engine.moves());
                if self.engine.is_won() {
                    log::info!("Board cleared in {} moves", self.engine.moves());
                    view.won(self.engine.moves());
                }
            }
            ClickOutcome::Mismatched { index, symbol, .. } => {
                view.reveal(index, symbol, false);
                self.hide_due = Some(now + self.options.hide_delay);
                view.moves_changed(self.engine.moves());
            }
        }
        Ok(outcome)
    }

    /// Applies the pending hide if its deadline has passed.
    pub fn poll(&mut self, now: Instant, view: &mut impl CardView) -> bool {
        match self.hide_due {
            Some(due) if now >= due => self.flush(view),
            _ => false,
        }
    }

    /// Applies the pending hide right away, whatever its deadline.
    pub fn flush(&mut self, view: &mut impl CardView) -> bool {
        if self.hide_due.take().is_none() {
            return false;
        }

        match self.engine.reset_turn() {
            Some(pair) => {
                for index in pair {
                    view.hide(index);
                }
                view.mismatch_hidden(pair);
                true
            }
            None => {
                log::warn!("Pending hide fired without a mismatched pair");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    enum Event {
        Reveal(CardIndex, Symbol, bool),
        Hide(CardIndex),
        Moves(u32),
        MismatchHidden([CardIndex; 2]),
        Won(u32),
    }

    #[derive(Default)]
    struct RecordingView {
        events: Vec<Event>,
    }

    impl RecordingView {
        fn take(&mut self) -> Vec<Event> {
            core::mem::take(&mut self.events)
        }
    }

    impl CardView for RecordingView {
        fn reveal(&mut self, index: CardIndex, symbol: Symbol, permanent: bool) {
            self.events.push(Event::Reveal(index, symbol, permanent));
        }

        fn hide(&mut self, index: CardIndex) {
            self.events.push(Event::Hide(index));
        }

        fn moves_changed(&mut self, moves: u32) {
            self.events.push(Event::Moves(moves));
        }

        fn mismatch_hidden(&mut self, pair: [CardIndex; 2]) {
            self.events.push(Event::MismatchHidden(pair));
        }

        fn won(&mut self, moves: u32) {
            self.events.push(Event::Won(moves));
        }
    }

    const DELAY: Duration = Duration::from_millis(500);

    // A at 0 and 3, B at 1 and 2
    fn small_session() -> Session {
        let deck = Deck::from_symbols((2, 2), &['A', 'B', 'B', 'A']).unwrap();
        Session::new(
            deck.board_config(),
            Alphabet::new(['A', 'B']).unwrap(),
            deck,
            SessionOptions { hide_delay: DELAY },
        )
        .unwrap()
    }

    #[test]
    fn match_is_revealed_permanently_and_wins() {
        use Event::*;

        let mut session = small_session();
        let mut view = RecordingView::default();
        let now = Instant::now();

        session.click(0, now, &mut view).unwrap();
        session.click(3, now, &mut view).unwrap();
        assert_eq!(
            view.take(),
            vec![Reveal(0, 'A', false), Reveal(3, 'A', true), Reveal(0, 'A', true), Moves(1)]
        );
        assert!(session.engine().can_click());
        assert_eq!(session.next_deadline(), None);

        session.click(1, now, &mut view).unwrap();
        session.click(2, now, &mut view).unwrap();
        assert_eq!(
            view.take(),
            vec![
                Reveal(1, 'B', false),
                Reveal(2, 'B', true),
                Reveal(1, 'B', true),
                Moves(2),
                Won(2)
            ]
        );
        assert!(session.is_won());
    }

    #[test]
    fn mismatch_hides_after_delay() {
        use Event::*;

        let mut session = small_session();
        let mut view = RecordingView::default();
        let start = Instant::now();

        session.click(0, start, &mut view).unwrap();
        let outcome = session.click(1, start, &mut view).unwrap();
        assert_eq!(outcome.as_tuple(), (false, Some(0), Some('B')));
        assert_eq!(session.next_deadline(), Some(start + DELAY));
        view.take();

        assert!(!session.poll(start + DELAY / 2, &mut view));
        assert!(view.take().is_empty());
        assert!(!session.engine().can_click());

        assert!(session.poll(start + DELAY, &mut view));
        assert_eq!(view.take(), vec![Hide(0), Hide(1), MismatchHidden([0, 1])]);
        assert!(session.engine().can_click());
        assert_eq!(session.next_deadline(), None);

        assert!(!session.poll(start + DELAY * 2, &mut view));
    }

    #[test]
    fn next_click_flushes_pending_hide_first() {
        use Event::*;

        let mut session = small_session();
        let mut view = RecordingView::default();
        let start = Instant::now();

        session.click(0, start, &mut view).unwrap();
        session.click(1, start, &mut view).unwrap();
        view.take();

        // timer has not fired yet, the click must still be accepted
        let outcome = session.click(0, start, &mut view).unwrap();

        assert_eq!(outcome.as_tuple(), (false, None, Some('A')));
        assert_eq!(
            view.take(),
            vec![Hide(0), Hide(1), MismatchHidden([0, 1]), Reveal(0, 'A', false)]
        );
        assert_eq!(session.engine().revealed_count(), 1);
        assert_eq!(session.moves(), 1);
    }

    #[test]
    fn ignored_clicks_touch_nothing() {
        let mut session = small_session();
        let mut view = RecordingView::default();
        let now = Instant::now();

        session.click(2, now, &mut view).unwrap();
        view.take();

        assert_eq!(session.click(2, now, &mut view).unwrap(), ClickOutcome::Ignored);
        assert!(view.take().is_empty());
        assert_eq!(session.moves(), 0);
    }

    #[test]
    fn invalid_index_does_not_flush() {
        let mut session = small_session();
        let mut view = RecordingView::default();
        let now = Instant::now();

        session.click(0, now, &mut view).unwrap();
        session.click(1, now, &mut view).unwrap();
        view.take();

        assert_eq!(session.click(9, now, &mut view), Err(GameError::InvalidIndex));
        assert!(view.take().is_empty());
        assert!(session.next_deadline().is_some());
    }

    #[test]
    fn setup_replaces_game_and_pending_hide() {
        let mut session = small_session();
        let mut view = RecordingView::default();
        let now = Instant::now();

        session.click(0, now, &mut view).unwrap();
        session.click(1, now, &mut view).unwrap();

        let deck = Deck::from_symbols((1, 2), &['B', 'B']).unwrap();
        session.setup(deck.board_config(), deck).unwrap();

        assert_eq!(session.next_deadline(), None);
        assert_eq!(session.moves(), 0);
        assert_eq!(session.engine().phase(), TurnPhase::Idle);
        assert_eq!(session.engine().total_cards(), 2);
    }

    #[test]
    fn failed_setup_keeps_current_game() {
        let mut session = small_session();
        let mut view = RecordingView::default();
        session.click(0, Instant::now(), &mut view).unwrap();

        let result = session.setup(Difficulty::Hard.config(), RandomDeckGenerator::new(1));

        assert_eq!(
            result,
            Err(GameError::InsufficientSymbols {
                needed: 15,
                available: 2
            })
        );
        assert_eq!(session.engine().phase(), TurnPhase::OneRevealed);
    }

    #[test]
    fn default_delay_matches_classic_game() {
        assert_eq!(SessionOptions::default().hide_delay, Duration::from_secs(1));
    }
}
