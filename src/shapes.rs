//! Tetromino templates and colour picking.

use fastrand::Rng;

/// Number of piece colours; colour indices are `0..COLOR_COUNT`.
pub const COLOR_COUNT: u8 = 7;

/// Tetromino kinds (I, O, T, S, Z, J, L).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TetrominoKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl TetrominoKind {
    pub const ALL: [Self; 7] = [Self::I, Self::O, Self::T, Self::S, Self::Z, Self::J, Self::L];

    /// 4 cells relative to origin (0,0); each (dx, dy).
    pub fn cells(&self) -> &'static [(i8, i8); 4] {
        match self {
            Self::I => &[(0, 0), (1, 0), (2, 0), (3, 0)],
            Self::O => &[(0, 0), (1, 0), (0, 1), (1, 1)],
            Self::T => &[(0, 0), (1, 0), (2, 0), (1, 1)],
            Self::S => &[(1, 0), (2, 0), (0, 1), (1, 1)],
            Self::Z => &[(0, 0), (1, 0), (1, 1), (2, 1)],
            Self::J => &[(0, 0), (0, 1), (1, 1), (2, 1)],
            Self::L => &[(2, 0), (0, 1), (1, 1), (2, 1)],
        }
    }

    /// Fresh copy of this kind's template.
    pub fn template(&self) -> Shape {
        Shape(*self.cells())
    }
}

/// Four cell offsets in the piece's current orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape([(i8, i8); 4]);

impl Shape {
    pub fn new(cells: [(i8, i8); 4]) -> Self {
        Self(cells)
    }

    #[inline]
    pub fn cells(&self) -> &[(i8, i8); 4] {
        &self.0
    }

    /// Quarter turn `(x, y) -> (y, -x)`, shifted so the bounding box starts at (0,0) again.
    ///
    /// Shifting by the minimum offset means asymmetric pieces do not return to their
    /// start orientation in exactly four turns; I, S and Z flip between two states.
    pub fn rotated(&self) -> Self {
        let turned = self.0.map(|(x, y)| (y, -x));
        let min_x = turned.iter().map(|&(x, _)| x).min().unwrap_or(0);
        let min_y = turned.iter().map(|&(_, y)| y).min().unwrap_or(0);
        Self(turned.map(|(x, y)| (x - min_x, y - min_y)))
    }

    /// (width, height) of the bounding box in cells.
    pub fn extent(&self) -> (u16, u16) {
        let max_x = self.0.iter().map(|&(x, _)| x).max().unwrap_or(0);
        let max_y = self.0.iter().map(|&(_, y)| y).max().unwrap_or(0);
        let min_x = self.0.iter().map(|&(x, _)| x).min().unwrap_or(0);
        let min_y = self.0.iter().map(|&(_, y)| y).min().unwrap_or(0);
        ((max_x - min_x + 1) as u16, (max_y - min_y + 1) as u16)
    }
}

/// Uniform pick over the seven templates. No bag: every call is independent.
pub fn pick_random_shape(rng: &mut Rng) -> Shape {
    TetrominoKind::ALL[rng.usize(..TetrominoKind::ALL.len())].template()
}

/// Uniform palette index, independent of the shape.
pub fn pick_random_color(rng: &mut Rng) -> u8 {
    rng.u8(..COLOR_COUNT)
}
