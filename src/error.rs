//! Error types.
//!
//! Only restoring a save string can fail in normal play. Invalid directions and
//! spawning on a full board are no-ops, not errors.

use thiserror::Error;

use crate::board::Rank;
use crate::GRID_SIZE;

/// Why a save string could not be turned back into a game.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Wrong length, bad padding or a character outside the alphabet.
    #[error("save string is not valid text encoding: {0}")]
    Transport(#[from] base64::DecodeError),

    #[error("save data is {len} bytes, too short to hold the score")]
    MissingScore { len: usize },

    #[error("save data ends after {filled} of {cells} cells", cells = GRID_SIZE * GRID_SIZE)]
    Truncated { filled: usize },

    #[error("cell ({x}, {y}) has rank {rank}, above the largest possible tile")]
    RankOutOfRange { x: usize, y: usize, rank: Rank },

    #[error("save data is {actual} bytes, expected {expected}")]
    TrailingBytes { expected: usize, actual: usize },
}

/// A row from the slide case table that did not slide as expected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error(
    "{} => {} expected {} => {}",
    row_text(.input),
    row_text(.got),
    row_text(.input),
    row_text(.expected)
)]
pub struct SlideMismatch {
    pub input: [Rank; GRID_SIZE],
    pub got: [Rank; GRID_SIZE],
    pub expected: [Rank; GRID_SIZE],
}

fn row_text(row: &[Rank; GRID_SIZE]) -> String {
    row.iter()
        .map(|rank| rank.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
