use super::*;

/// Draws `pairs_needed` distinct symbols, doubles them and shuffles the result.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomDeckGenerator {
    seed: u64,
}

impl RandomDeckGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl DeckGenerator for RandomDeckGenerator {
    fn generate(self, config: BoardConfig, alphabet: &Alphabet) -> Result<Deck> {
        use rand::prelude::*;
        use rand::seq::index;

        let config = BoardConfig::new(config.size)?;
        alphabet.check_capacity(&config)?;

        let pairs = config.pairs_needed() as usize;
        let mut rng = SmallRng::seed_from_u64(self.seed);

        let chosen = index::sample(&mut rng, alphabet.len(), pairs);
        let mut cards: Vec<Symbol> = Vec::with_capacity(pairs * 2);
        for i in chosen.iter() {
            let symbol = alphabet.symbols()[i];
            cards.push(symbol);
            cards.push(symbol);
        }
        cards.shuffle(&mut rng);

        log::debug!(
            "Dealt {}x{} deck with {} pairs, seed: {}",
            config.rows(),
            config.cols(),
            pairs,
            self.seed
        );
        log::trace!("Deck layout: {:?}", cards);

        Deck::from_row_major(config.size, cards)
    }
}
