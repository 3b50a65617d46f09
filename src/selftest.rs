// Bundled slide cases, each row slid toward index 0. Run with `tilemerge test`.

use crate::board::{slide_row, Rank};
use crate::error::SlideMismatch;
use crate::GRID_SIZE;

pub const CASES: [([Rank; GRID_SIZE], [Rank; GRID_SIZE]); 13] = [
    ([0, 0, 0, 1], [1, 0, 0, 0]),
    ([0, 0, 1, 1], [2, 0, 0, 0]),
    ([0, 1, 0, 1], [2, 0, 0, 0]),
    ([1, 0, 0, 1], [2, 0, 0, 0]),
    ([1, 0, 1, 0], [2, 0, 0, 0]),
    ([1, 1, 1, 0], [2, 1, 0, 0]),
    ([1, 0, 1, 1], [2, 1, 0, 0]),
    ([1, 1, 0, 1], [2, 1, 0, 0]),
    ([1, 1, 1, 1], [2, 2, 0, 0]),
    ([2, 2, 1, 1], [3, 2, 0, 0]),
    ([1, 1, 2, 2], [2, 3, 0, 0]),
    ([3, 0, 1, 1], [3, 2, 0, 0]),
    ([2, 0, 1, 1], [2, 2, 0, 0]),
];

/// Runs every case and returns how many passed, or the first one that did not.
pub fn run() -> Result<usize, SlideMismatch> {
    for (input, expected) in CASES {
        let mut got = input;
        let mut score = 0;
        slide_row(&mut got, &mut score);
        if got != expected {
            return Err(SlideMismatch {
                input,
                got,
                expected,
            });
        }
    }
    Ok(CASES.len())
}
