//! A tile-merging puzzle on a fixed square grid.
//!
//! The engine is synchronous and owns no global state: a [`Game`] holds the board,
//! the score and its random source, and every operation runs to completion.
//! Save strings produced by [`Game::to_save_string`] restore identically anywhere
//! the grid size matches.

pub mod board;
pub mod codec;
pub mod error;
pub mod game;
pub mod input;
pub mod renderer;
pub mod selfplay;
pub mod selftest;

pub use board::{Board, Rank};
pub use error::{CodecError, SlideMismatch};
pub use game::{Direction, Game};

pub const GRID_SIZE: usize = 4;

/// Largest rank a 4x4 game can reach (131072).
pub const MAX_RANK: Rank = 17;
