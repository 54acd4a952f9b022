//! Game session: spawn, fall, lock, clear, respawn; score, pause and game over.

use crate::board::Board;
use crate::piece::{NextPiece, Piece, PieceController};
use fastrand::Rng;
use log::{debug, info};

/// Flat bonus per cleared row.
pub const POINTS_PER_LINE: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Playing,
    GameOver,
}

/// One independent game: board, pieces, score and run state.
#[derive(Debug)]
pub struct Session {
    board: Board,
    pieces: PieceController,
    rng: Rng,
    score: u32,
    lines_cleared: u32,
    status: Status,
    paused: bool,
}

impl Session {
    /// New session drawing pieces from `rng`.
    pub fn new(mut rng: Rng) -> Self {
        let board = Board::new();
        let (pieces, _) = PieceController::new(&board, &mut rng);
        Self {
            board,
            pieces,
            rng,
            score: 0,
            lines_cleared: 0,
            status: Status::Playing,
            paused: false,
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::new(Rng::with_seed(seed))
    }

    /// Start over on an empty board. Works from any state.
    pub fn reset(&mut self) {
        self.board = Board::new();
        self.pieces = PieceController::new(&self.board, &mut self.rng).0;
        self.score = 0;
        self.lines_cleared = 0;
        self.status = Status::Playing;
        self.paused = false;
        info!("session reset");
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn piece(&self) -> &Piece {
        self.pieces.active()
    }

    #[inline]
    pub fn next(&self) -> &NextPiece {
        self.pieces.next()
    }

    #[inline]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[inline]
    pub fn lines_cleared(&self) -> u32 {
        self.lines_cleared
    }

    #[inline]
    pub fn status(&self) -> Status {
        self.status
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.status == Status::GameOver
    }

    /// Playing and not paused.
    #[inline]
    pub fn is_running(&self) -> bool {
        self.status == Status::Playing && !self.paused
    }

    /// One gravity step: fall a row, or lock, clear, score and spawn the next piece.
    pub fn step(&mut self) {
        if !self.is_running() {
            return;
        }
        if self.pieces.try_move(&self.board, 0, 1) {
            return;
        }
        self.lock_piece();
    }

    fn lock_piece(&mut self) {
        let piece = *self.pieces.active();
        self.board.lock_shape(&piece.shape, piece.x, piece.y, piece.color);

        let cleared = self.board.clear_full_rows();
        if cleared > 0 {
            self.lines_cleared = self.lines_cleared.saturating_add(cleared);
            self.score = self.score.saturating_add(cleared * POINTS_PER_LINE);
            debug!("cleared {} row(s), score {}", cleared, self.score);
        }

        if !self.pieces.spawn(&self.board, &mut self.rng) {
            self.status = Status::GameOver;
            info!("game over, final score {}", self.score);
        }
    }

    /// Player move; refused while paused or over.
    pub fn try_move(&mut self, dx: i32, dy: i32) -> bool {
        if !self.is_running() {
            return false;
        }
        self.pieces.try_move(&self.board, dx, dy)
    }

    pub fn rotate(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.pieces.rotate(&self.board)
    }

    pub fn toggle_pause(&mut self) {
        if self.is_game_over() {
            return;
        }
        self.paused = !self.paused;
        debug!("paused: {}", self.paused);
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    #[cfg(test)]
    pub(crate) fn pieces_mut(&mut self) -> &mut PieceController {
        &mut self.pieces
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{BOARD_HEIGHT, BOARD_WIDTH, Cell};
    use crate::shapes::TetrominoKind;

    fn place(session: &mut Session, kind: TetrominoKind, x: i32, y: i32) {
        session.pieces_mut().set_active(Piece {
            shape: kind.template(),
            x,
            y,
            color: 3,
        });
    }

    #[test]
    fn test_new_session_is_running() {
        let session = Session::with_seed(1);
        assert!(session.is_running());
        assert_eq!(session.score(), 0);
        assert!(session.board().is_empty());
        assert_eq!((session.piece().x, session.piece().y), (4, 0));
    }

    #[test]
    fn test_step_moves_piece_down() {
        let mut session = Session::with_seed(2);
        let y = session.piece().y;
        session.step();
        assert_eq!(session.piece().y, y + 1);
        assert!(session.board().is_empty());
    }

    #[test]
    fn test_step_locks_and_spawns_next() {
        let mut session = Session::with_seed(3);
        place(&mut session, TetrominoKind::O, 0, 18);
        let queued = *session.next();

        session.step();

        assert_eq!(session.board().get(0, 18), Some(Cell::Filled(3)));
        assert_eq!(session.board().get(1, 19), Some(Cell::Filled(3)));
        assert_eq!(session.piece().shape, queued.shape);
        assert_eq!(session.piece().color, queued.color);
        assert_eq!((session.piece().x, session.piece().y), (4, 0));
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn test_line_clear_scores_flat_bonus() {
        let mut session = Session::with_seed(4);
        for x in 4..BOARD_WIDTH {
            session.board_mut().set(x, 19, Cell::Filled(1));
        }
        place(&mut session, TetrominoKind::I, 0, 19);

        session.step();

        assert_eq!(session.score(), 100);
        assert_eq!(session.lines_cleared(), 1);
        assert!(session.board().is_empty());
    }

    #[test]
    fn test_score_saturates_at_max() {
        let mut session = Session::with_seed(4);
        session.score = u32::MAX - 50;
        session.lines_cleared = u32::MAX;
        for x in 4..BOARD_WIDTH {
            session.board_mut().set(x, 19, Cell::Filled(1));
        }
        place(&mut session, TetrominoKind::I, 0, 19);

        session.step();

        assert_eq!(session.score(), u32::MAX);
        assert_eq!(session.lines_cleared(), u32::MAX);
        assert!(session.board().is_empty());
    }

    #[test]
    fn test_double_clear_is_not_multiplied() {
        let mut session = Session::with_seed(5);
        for y in [18, 19] {
            for x in 2..BOARD_WIDTH {
                session.board_mut().set(x, y, Cell::Filled(1));
            }
        }
        place(&mut session, TetrominoKind::O, 0, 18);

        session.step();

        assert_eq!(session.score(), 200);
        assert_eq!(session.board().height(), BOARD_HEIGHT);
    }

    #[test]
    fn test_blocked_spawn_ends_game() {
        let mut session = Session::with_seed(6);
        for (x, y) in [(4, 0), (5, 0), (4, 1), (5, 1)] {
            session.board_mut().set(x, y, Cell::Filled(2));
        }
        session.pieces_mut().set_next(NextPiece {
            shape: TetrominoKind::O.template(),
            color: 0,
        });
        place(&mut session, TetrominoKind::I, 0, 19);

        session.step();
        assert!(session.is_game_over());
        assert!(!session.is_running());

        // Terminal: nothing moves any more.
        let board = session.board().clone();
        let piece = *session.piece();
        session.step();
        assert!(!session.try_move(-1, 0));
        assert!(!session.rotate());
        session.toggle_pause();
        assert!(!session.is_paused());
        assert_eq!(session.board(), &board);
        assert_eq!(session.piece(), &piece);
    }

    #[test]
    fn test_pause_blocks_input_and_gravity() {
        let mut session = Session::with_seed(7);
        session.toggle_pause();
        assert!(session.is_paused());
        let piece = *session.piece();
        session.step();
        assert!(!session.try_move(1, 0));
        assert!(!session.rotate());
        assert_eq!(session.piece(), &piece);

        session.toggle_pause();
        assert!(session.try_move(1, 0));
    }

    #[test]
    fn test_soft_drop_never_locks() {
        let mut session = Session::with_seed(8);
        place(&mut session, TetrominoKind::O, 0, 18);
        assert!(!session.try_move(0, 1));
        assert!(session.board().is_empty());
        assert_eq!(session.piece().y, 18);
    }

    #[test]
    fn test_reset_restores_fresh_state() {
        let mut session = Session::with_seed(9);
        for x in 4..BOARD_WIDTH {
            session.board_mut().set(x, 19, Cell::Filled(1));
        }
        place(&mut session, TetrominoKind::I, 0, 19);
        session.step();
        session.toggle_pause();

        session.reset();

        assert_eq!(session.score(), 0);
        assert_eq!(session.lines_cleared(), 0);
        assert!(session.is_running());
        assert!(session.board().is_empty());
    }

    #[test]
    fn test_score_never_decreases_until_game_over() {
        let mut session = Session::with_seed(10);
        let mut last = 0;
        for _ in 0..5_000 {
            session.step();
            assert!(session.score() >= last);
            assert_eq!(session.score() % POINTS_PER_LINE, 0);
            last = session.score();
            if session.is_game_over() {
                break;
            }
        }
        assert!(session.is_game_over());
    }

    #[test]
    fn test_sessions_are_independent() {
        let mut a = Session::with_seed(11);
        let b = Session::with_seed(11);
        a.step();
        a.step();
        assert_eq!(a.piece().y, 2);
        assert_eq!(b.piece().y, 0);
        assert_eq!(a.piece().shape, b.piece().shape);
    }
}
