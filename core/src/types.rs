/// Single coordinate axis used for grid rows and columns.
pub type Coord = u8;

/// Count type used for mine counts, reveal counts, and total-cell counts.
pub type CellCount = u16;

/// Row-major linear address of a cell, `row * cols + col`.
pub type CellIndex = u16;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

/// Stakes, payouts, and balances, in whole currency units.
pub type Amount = u64;

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
