/// Single coordinate axis used for board height, width, and positions.
pub type Coord = u8;

/// Count type used for tile counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(row, col)`, row 0 being the top of the board.
pub type Coord2 = (Coord, Coord);

/// Face value printed on a tile.
pub type TileValue = u8;

/// Running selection sums and targets.
pub type Sum = u32;

pub type Score = u32;

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

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Converts an ndarray index back into board coordinates.
///
/// Boards are never built larger than `Coord::MAX` along either axis, so the
/// narrowing cast cannot truncate.
pub(crate) const fn from_nd_index((row, col): (usize, usize)) -> Coord2 {
    (row as Coord, col as Coord)
}
