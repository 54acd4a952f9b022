//! Playfield grid: vacancy checks, locking, full-row clearing.

use crate::shapes::Shape;
use std::collections::VecDeque;

pub const BOARD_WIDTH: usize = 10;
pub const BOARD_HEIGHT: usize = 20;

/// Single cell: either empty or filled with a colour index 0..7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Filled(u8),
}

impl Cell {
    #[inline]
    pub fn is_filled(self) -> bool {
        matches!(self, Self::Filled(_))
    }
}

type Row = [Cell; BOARD_WIDTH];

const EMPTY_ROW: Row = [Cell::Empty; BOARD_WIDTH];

/// Playfield: grid of cells. y=0 is top; rows are stored [0..height].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// rows[y][x] = cell. rows[0] is top.
    rows: VecDeque<Row>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    pub fn new() -> Self {
        Self {
            rows: (0..BOARD_HEIGHT).map(|_| EMPTY_ROW).collect(),
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        BOARD_WIDTH
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<Cell> {
        self.rows.get(y).and_then(|row| row.get(x)).copied()
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, cell: Cell) {
        if let Some(slot) = self.rows.get_mut(y).and_then(|row| row.get_mut(x)) {
            *slot = cell;
        }
    }

    /// Rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.rows.iter().map(|row| &row[..])
    }

    pub fn is_empty(&self) -> bool {
        self.rows.iter().flatten().all(|cell| !cell.is_filled())
    }

    /// True if `shape` anchored at (ax, ay) stays inside the side and bottom walls and
    /// overlaps no filled cell. Cells above the top edge only get the horizontal check.
    pub fn is_vacant(&self, shape: &Shape, ax: i32, ay: i32) -> bool {
        shape.cells().iter().all(|&(dx, dy)| {
            let gx = ax + i32::from(dx);
            let gy = ay + i32::from(dy);
            if gx < 0 || gx >= BOARD_WIDTH as i32 || gy >= self.height() as i32 {
                return false;
            }
            gy < 0 || !self.get(gx as usize, gy as usize).is_some_and(Cell::is_filled)
        })
    }

    /// Write `color` into every on-board cell of the shape; off-board cells are dropped.
    pub fn lock_shape(&mut self, shape: &Shape, ax: i32, ay: i32, color: u8) {
        for &(dx, dy) in shape.cells() {
            let gx = ax + i32::from(dx);
            let gy = ay + i32::from(dy);
            if gx >= 0 && gy >= 0 {
                self.set(gx as usize, gy as usize, Cell::Filled(color));
            }
        }
    }

    /// Remove every full row, dropping the rows above it by one. Returns rows removed.
    pub fn clear_full_rows(&mut self) -> u32 {
        let mut cleared = 0;
        let mut y = self.rows.len();
        // Only move up on a kept row: after a removal the same index holds the row from above.
        while y > 0 {
            let full = self.rows[y - 1].iter().all(|cell| cell.is_filled());
            if full {
                self.rows.remove(y - 1);
                self.rows.push_front(EMPTY_ROW);
                cleared += 1;
            } else {
                y -= 1;
            }
        }
        cleared
    }
}
