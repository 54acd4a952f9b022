//! blockdrop: a classic falling-block puzzle game in the terminal.
//!
//! The game core ([`shapes`], [`board`], [`piece`], [`game`], [`gravity`]) is pure and
//! deterministic given its RNG. [`ui`] and [`input`] are the terminal-facing layers and
//! [`app`] ties them together in a frame loop.

pub mod app;
pub mod board;
pub mod game;
pub mod gravity;
pub mod input;
pub mod piece;
pub mod shapes;
pub mod theme;
pub mod ui;

use std::time::Duration;

pub use app::App;
pub use game::Session;
pub use gravity::GravityClock;

/// Options derived from CLI that affect game behaviour.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Piece RNG seed; `None` seeds from the OS.
    pub seed: Option<u64>,
    pub drop_interval: Duration,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: None,
            drop_interval: gravity::DEFAULT_DROP_INTERVAL,
        }
    }
}
