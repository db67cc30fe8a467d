use mnemo_core as game;
use std::io::{self, Write};

use game::{CardIndex, CardView, Coord2, Symbol};

const HIDDEN: char = '?';

#[derive(Copy, Clone, Debug, PartialEq)]
enum Cell {
    Hidden,
    Shown(Symbol),
    Found(Symbol),
}

/// Plain-text board that mirrors what the session tells it.
#[derive(Clone, Debug)]
pub(crate) struct TermView {
    size: Coord2,
    cells: Vec<Cell>,
    moves: u32,
    won: bool,
}

impl TermView {
    pub(crate) fn new(size: Coord2) -> Self {
        Self {
            size,
            cells: vec![Cell::Hidden; usize::from(size.0) * usize::from(size.1)],
            moves: 0,
            won: false,
        }
    }

    pub(crate) fn render(&self, out: &mut impl Write) -> io::Result<()> {
        let (rows, cols) = self.size;

        writeln!(out)?;
        writeln!(out, "Moves: {}", self.moves)?;
        write!(out, "   ")?;
        for col in 1..=cols {
            write!(out, "{:>3}", col)?;
        }
        writeln!(out)?;

        for (row, cells) in self.cells.chunks(usize::from(cols)).enumerate().take(rows.into()) {
            write!(out, "{:>3}", row + 1)?;
            for cell in cells {
                match cell {
                    Cell::Hidden => write!(out, "  {}", HIDDEN)?,
                    // emoji take two columns
                    Cell::Shown(symbol) | Cell::Found(symbol) => write!(out, " {}", symbol)?,
                }
            }
            writeln!(out)?;
        }
        out.flush()
    }

    pub(crate) fn is_won(&self) -> bool {
        self.won
    }

    pub(crate) fn found_pairs(&self) -> usize {
        self.cells
            .iter()
            .filter(|cell| matches!(cell, Cell::Found(_)))
            .count()
            / 2
    }
}

impl CardView for TermView {
    fn reveal(&mut self, index: CardIndex, symbol: Symbol, permanent: bool) {
        self.cells[index] = if permanent {
            Cell::Found(symbol)
        } else {
            Cell::Shown(symbol)
        };
    }

    fn hide(&mut self, index: CardIndex) {
        self.cells[index] = Cell::Hidden;
    }

    fn moves_changed(&mut self, moves: u32) {
        self.moves = moves;
    }

    fn mismatch_hidden(&mut self, pair: [CardIndex; 2]) {
        log::trace!("Cards {:?} turned back over", pair);
    }

    fn won(&mut self, moves: u32) {
        self.won = true;
        self.moves = moves;
    }
}
