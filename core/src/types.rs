/// Single grid axis used for board rows and columns.
pub type Coord = u8;

/// Count type used for card and pair counts.
pub type CardCount = u16;

/// Board dimensions `(rows, cols)`.
pub type Coord2 = (Coord, Coord);

/// Linear card position, row-major: `row * cols + col`.
pub type CardIndex = usize;

/// Symbol printed on the face of a card.
pub type Symbol = char;

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CardCount {
    let a = a as CardCount;
    let b = b as CardCount;
    a.saturating_mul(b)
}

/// Splits a linear index into `(row, col)` for a board with `cols` columns.
pub const fn split_index(index: CardIndex, cols: Coord) -> (usize, usize) {
    let cols = cols as usize;
    (index / cols, index % cols)
}
