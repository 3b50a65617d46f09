// The board and every transformation that does not need randomness.
//
// All four moves are realised as "slide every column toward index 0" plus a
// number of quarter turns before and after, so the slide/merge logic exists once.

use crate::game::Direction;
use crate::{GRID_SIZE, MAX_RANK};

/// Exponent stored in a cell, the displayed tile is `2^rank`. 0 is an empty cell.
pub type Rank = u8;

/// Value of a tile of the given rank, saturating for ranks that do not fit a `u32`.
pub fn tile_value(rank: Rank) -> u32 {
    1u32.checked_shl(rank as u32).unwrap_or(u32::MAX)
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Board {
    // cells[x][y], x is the column and y the row counted from the top
    cells: [[Rank; GRID_SIZE]; GRID_SIZE],
}

impl Board {
    pub fn new() -> Board {
        Board::default()
    }

    /// Ranks above `MAX_RANK` are clamped to it.
    pub fn from_cells(cells: [[Rank; GRID_SIZE]; GRID_SIZE]) -> Board {
        Board {
            cells: cells.map(|column| column.map(|rank| rank.min(MAX_RANK))),
        }
    }

    pub fn cells(&self) -> &[[Rank; GRID_SIZE]; GRID_SIZE] {
        &self.cells
    }

    pub fn get(&self, x: usize, y: usize) -> Rank {
        self.cells[x][y]
    }

    /// Ranks above `MAX_RANK` are clamped to it.
    pub fn set(&mut self, x: usize, y: usize, rank: Rank) {
        self.cells[x][y] = rank.min(MAX_RANK);
    }

    pub fn clear(&mut self) {
        self.cells = [[0; GRID_SIZE]; GRID_SIZE];
    }

    pub fn max_rank(&self) -> Rank {
        self.cells.iter().flatten().copied().max().unwrap_or(0)
    }

    /// Rotates the board a quarter turn in place. Four turns are the identity.
    pub fn rotate(&mut self) {
        let n = GRID_SIZE;
        let b = &mut self.cells;
        for i in 0..n / 2 {
            for j in i..n - i - 1 {
                let tmp = b[i][j];
                b[i][j] = b[j][n - i - 1];
                b[j][n - i - 1] = b[n - i - 1][n - j - 1];
                b[n - i - 1][n - j - 1] = b[n - j - 1][i];
                b[n - j - 1][i] = tmp;
            }
        }
    }

    /// Moves every tile in `direction`, adding merge values to `score`.
    /// Returns whether any cell changed; `Direction::None` never changes anything.
    pub fn shift(&mut self, direction: Direction, score: &mut u32) -> bool {
        let Some(turns) = direction.quarter_turns() else {
            return false;
        };
        for _ in 0..turns {
            self.rotate();
        }
        let mut changed = false;
        for column in self.cells.iter_mut() {
            changed |= slide_row(column, score);
        }
        for _ in 0..(4 - turns) % 4 {
            self.rotate();
        }
        changed
    }

    /// Whether a move in `direction` would change the board. The board itself is untouched.
    pub fn can_shift(&self, direction: Direction) -> bool {
        let mut copy = *self;
        let mut score = 0;
        copy.shift(direction, &mut score)
    }

    pub fn count_empty(&self) -> usize {
        self.cells.iter().flatten().filter(|&&rank| rank == 0).count()
    }

    /// Coordinates of every empty cell, in the order x then y.
    pub fn empty_cells(&self) -> Vec<(usize, usize)> {
        let mut empty = Vec::with_capacity(GRID_SIZE * GRID_SIZE);
        for x in 0..GRID_SIZE {
            for y in 0..GRID_SIZE {
                if self.cells[x][y] == 0 {
                    empty.push((x, y));
                }
            }
        }
        empty
    }

    // Two vertically adjacent tiles of equal rank
    fn has_pair_down(&self) -> bool {
        self.cells
            .iter()
            .any(|column| column.windows(2).any(|w| mergeable(w[0], w[1])))
    }

    /// True iff the board is full and no two neighbours can merge.
    pub fn is_game_over(&self) -> bool {
        if self.count_empty() > 0 || self.has_pair_down() {
            return false;
        }
        let mut turned = *self;
        turned.rotate();
        !turned.has_pair_down()
    }
}

// Two tiles merge when they are equal, non-empty and below the largest rank,
// so a merge never produces a rank the save format cannot hold.
fn mergeable(a: Rank, b: Rank) -> bool {
    a != 0 && a == b && a < MAX_RANK
}

// Where the tile at `x` ends up: the cell after the first occupied cell with a
// different rank, that cell itself if the ranks match, or `stop` if everything
// down to `stop` is empty.
fn find_target(row: &[Rank; GRID_SIZE], x: usize, stop: usize) -> usize {
    if x == 0 {
        return x;
    }
    for t in (0..x).rev() {
        if row[t] != 0 {
            if !mergeable(row[t], row[x]) {
                return t + 1;
            }
            return t;
        }
        if t == stop {
            return t;
        }
    }
    x
}

/// Compacts a row toward index 0, merging equal neighbours at most once per tile.
pub fn slide_row(row: &mut [Rank; GRID_SIZE], score: &mut u32) -> bool {
    let mut changed = false;
    let mut stop = 0;
    for x in 0..GRID_SIZE {
        if row[x] == 0 {
            continue;
        }
        let t = find_target(row, x, stop);
        if t == x {
            continue;
        }
        if row[t] == 0 {
            row[t] = row[x];
        } else {
            row[t] += 1;
            *score = score.saturating_add(tile_value(row[t]));
            // a merged cell must not absorb a second tile in the same pass
            stop = t + 1;
        }
        row[x] = 0;
        changed = true;
    }
    changed
}
