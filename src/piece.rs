//! Falling piece and the queued next piece.

use crate::board::{BOARD_WIDTH, Board};
use crate::shapes::{Shape, pick_random_color, pick_random_shape};
use fastrand::Rng;

/// Spawn anchor column: one left of centre.
pub const SPAWN_X: i32 = BOARD_WIDTH as i32 / 2 - 1;
pub const SPAWN_Y: i32 = 0;

/// Current piece with anchor position and colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    pub shape: Shape,
    pub x: i32,
    pub y: i32,
    pub color: u8,
}

impl Piece {
    /// Board coordinates of the 4 cells.
    pub fn cells(&self) -> [(i32, i32); 4] {
        self.shape
            .cells()
            .map(|(dx, dy)| (self.x + i32::from(dx), self.y + i32::from(dy)))
    }
}

/// Pre-rolled shape and colour for the following spawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NextPiece {
    pub shape: Shape,
    pub color: u8,
}

impl NextPiece {
    pub fn random(rng: &mut Rng) -> Self {
        let shape = pick_random_shape(rng);
        let color = pick_random_color(rng);
        Self { shape, color }
    }
}

/// Active piece plus the queue of one.
#[derive(Debug, Clone)]
pub struct PieceController {
    active: Piece,
    next: NextPiece,
}

impl PieceController {
    /// Roll a next piece and spawn it straight away. Returns the controller and whether
    /// the spawn position was vacant.
    pub fn new(board: &Board, rng: &mut Rng) -> (Self, bool) {
        let first = NextPiece::random(rng);
        let mut controller = Self {
            active: Self::place(first),
            next: first,
        };
        let vacant = controller.spawn(board, rng);
        (controller, vacant)
    }

    fn place(next: NextPiece) -> Piece {
        Piece {
            shape: next.shape,
            x: SPAWN_X,
            y: SPAWN_Y,
            color: next.color,
        }
    }

    #[inline]
    pub fn active(&self) -> &Piece {
        &self.active
    }

    #[inline]
    pub fn next(&self) -> &NextPiece {
        &self.next
    }

    /// Promote the queued piece to active at the spawn anchor and queue a fresh one.
    /// Returns false if the spawn position is blocked.
    pub fn spawn(&mut self, board: &Board, rng: &mut Rng) -> bool {
        self.active = Self::place(self.next);
        self.next = NextPiece::random(rng);
        board.is_vacant(&self.active.shape, self.active.x, self.active.y)
    }

    pub fn try_move(&mut self, board: &Board, dx: i32, dy: i32) -> bool {
        let (x, y) = (self.active.x + dx, self.active.y + dy);
        if !board.is_vacant(&self.active.shape, x, y) {
            return false;
        }
        self.active.x = x;
        self.active.y = y;
        true
    }

    /// Rotate in place; no kicks, so a blocked rotation is simply refused.
    pub fn rotate(&mut self, board: &Board) -> bool {
        let candidate = self.active.shape.rotated();
        if !board.is_vacant(&candidate, self.active.x, self.active.y) {
            return false;
        }
        self.active.shape = candidate;
        true
    }

    #[cfg(test)]
    pub(crate) fn set_active(&mut self, piece: Piece) {
        self.active = piece;
    }

    #[cfg(test)]
    pub(crate) fn set_next(&mut self, next: NextPiece) {
        self.next = next;
    }
}
