use log::{debug, info, warn};
use seeded_random::{Random, Seed};

use crate::board::{Board, Rank};
use crate::codec;
use crate::error::CodecError;

// Probability that a spawned tile is a 2 rather than a 4
const SPAWN_LOW_RANK_PROBABILITY: f32 = 0.9;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    None,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Quarter turns applied before sliding toward index 0, `None` for the no-op direction.
    pub fn quarter_turns(self) -> Option<usize> {
        match self {
            Direction::Up => Some(0),
            Direction::Left => Some(1),
            Direction::Down => Some(2),
            Direction::Right => Some(3),
            Direction::None => None,
        }
    }
}

/// One running game: the board, the score and the random source used for spawns.
///
/// Nothing here is shared between sessions, so any number of games can run side by
/// side and a fixed seed replays the same spawns.
pub struct Game {
    board: Board,
    score: u32,
    rand: Random,
}

impl Game {
    /// A fresh game seeded from the wall clock, with two tiles on the board.
    pub fn new() -> Game {
        Game::from_seed(clock_seed())
    }

    pub fn from_seed(seed: u64) -> Game {
        let mut game = Game::from_parts(0, Board::new(), seed);
        game.spawn_tile();
        game.spawn_tile();
        game
    }

    /// Wraps an existing state without spawning anything.
    pub fn from_parts(score: u32, board: Board, seed: u64) -> Game {
        Game {
            board,
            score,
            rand: Random::from_seed(Seed::unsafe_new(seed)),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn rank_at(&self, x: usize, y: usize) -> Rank {
        self.board.get(x, y)
    }

    pub fn max_rank(&self) -> Rank {
        self.board.max_rank()
    }

    /// Slides and merges the board without spawning. Returns whether anything changed.
    #[time_graph::instrument]
    pub fn apply_move(&mut self, direction: Direction) -> bool {
        let before = self.score;
        let changed = self.board.shift(direction, &mut self.score);
        if changed {
            debug!("moved {:?}, score {} -> {}", direction, before, self.score);
        }
        changed
    }

    /// A full turn: the move, then a spawn if the move did something.
    pub fn play(&mut self, direction: Direction) -> bool {
        let changed = self.apply_move(direction);
        if changed {
            self.spawn_tile();
        }
        changed
    }

    pub fn legal_directions(&self) -> Vec<Direction> {
        Direction::ALL
            .into_iter()
            .filter(|&direction| self.board.can_shift(direction))
            .collect()
    }

    /// Puts a 2 (or, one time in ten, a 4) on a random empty cell.
    /// Returns where it landed, or `None` when the board is full.
    #[time_graph::instrument]
    pub fn spawn_tile(&mut self) -> Option<(usize, usize)> {
        let empty = self.board.empty_cells();
        if empty.is_empty() {
            return None;
        }
        let rank: Rank = if self.rand.gen::<f32>() < SPAWN_LOW_RANK_PROBABILITY {
            1
        } else {
            2
        };
        let index = ((empty.len() as f32 * self.rand.gen::<f32>()) as usize).min(empty.len() - 1);
        let (x, y) = empty[index];
        self.board.set(x, y, rank);
        debug!("spawned rank {} at ({}, {})", rank, x, y);
        Some((x, y))
    }

    #[time_graph::instrument]
    pub fn is_game_over(&self) -> bool {
        self.board.is_game_over()
    }

    /// Empties the board, zeroes the score and spawns two tiles. The random source keeps going.
    pub fn reset(&mut self) {
        self.board.clear();
        self.score = 0;
        self.spawn_tile();
        self.spawn_tile();
        info!("game reset");
    }

    pub fn to_save_string(&self) -> String {
        codec::encode(self.score, &self.board)
    }

    /// Replaces board and score with the decoded save string.
    /// On error the session is left exactly as it was.
    pub fn restore(&mut self, save: &str) -> Result<(), CodecError> {
        let (score, board) = match codec::decode(save) {
            Ok(state) => state,
            Err(err) => {
                warn!("rejected save string {:?}: {}", save, err);
                return Err(err);
            }
        };
        self.score = score;
        self.board = board;
        info!("restored game with score {}", score);
        Ok(())
    }
}

impl Default for Game {
    fn default() -> Self {
        Game::new()
    }
}

fn clock_seed() -> u64 {
    time::OffsetDateTime::now_utc().unix_timestamp_nanos() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_game_has_two_small_tiles() {
        let game = Game::from_seed(3);
        assert_eq!(game.board().count_empty(), 14);
        assert_eq!(game.score(), 0);
        assert!(game.max_rank() <= 2);
    }

    #[test]
    fn same_seed_same_spawns() {
        let mut a = Game::from_seed(42);
        let mut b = Game::from_seed(42);
        for direction in [Direction::Left, Direction::Up, Direction::Right, Direction::Down].repeat(8) {
            assert_eq!(a.play(direction), b.play(direction));
        }
        assert_eq!(a.board(), b.board());
        assert_eq!(a.score(), b.score());
    }

    #[test]
    fn spawn_fills_only_empty_cells() {
        let mut game = Game::from_parts(0, Board::new(), 9);
        for filled in 1..=16 {
            let (x, y) = game.spawn_tile().unwrap();
            let rank = game.rank_at(x, y);
            assert!(rank == 1 || rank == 2);
            assert_eq!(game.board().count_empty(), 16 - filled);
        }
        let full = *game.board();
        assert_eq!(game.spawn_tile(), None);
        assert_eq!(*game.board(), full);
    }

    #[test]
    fn spawn_weighting_favours_rank_one() {
        let mut game = Game::from_parts(0, Board::new(), 1234);
        let mut fours = 0;
        for _ in 0..2000 {
            game.board = Board::new();
            let (x, y) = game.spawn_tile().unwrap();
            if game.rank_at(x, y) == 2 {
                fours += 1;
            }
        }
        // one in ten on average
        assert!(fours > 100 && fours < 320, "{} fours out of 2000", fours);
    }

    #[test]
    fn spawn_cell_is_picked_evenly() {
        let mut two_holes = Board::from_cells([[1, 2, 1, 2], [2, 1, 2, 1], [1, 2, 1, 2], [2, 1, 2, 1]]);
        two_holes.set(0, 3, 0);
        two_holes.set(2, 1, 0);
        let mut game = Game::from_parts(0, two_holes, 2024);
        let (mut first, mut second) = (0, 0);
        for _ in 0..2000 {
            game.board = two_holes;
            match game.spawn_tile() {
                Some((0, 3)) => first += 1,
                Some((2, 1)) => second += 1,
                other => panic!("spawned at {:?}", other),
            }
        }
        // 1000 each on average
        assert!(first > 850 && second > 850, "{} vs {}", first, second);
    }

    #[test]
    fn unchanged_move_does_not_spawn() {
        let mut board = Board::new();
        board.set(0, 0, 1);
        let mut game = Game::from_parts(5, board, 0);
        assert!(!game.play(Direction::Up));
        assert!(!game.play(Direction::Left));
        assert!(!game.play(Direction::None));
        assert_eq!(*game.board(), board);
        assert_eq!(game.score(), 5);
    }

    #[test]
    fn changed_move_spawns_once() {
        let mut board = Board::new();
        board.set(0, 0, 1);
        board.set(0, 1, 1);
        let mut game = Game::from_parts(0, board, 0);
        assert!(game.play(Direction::Up));
        assert_eq!(game.rank_at(0, 0), 2);
        assert_eq!(game.score(), 4);
        assert_eq!(game.board().count_empty(), 14);
    }

    #[test]
    fn legal_directions_of_a_corner_tile() {
        let mut board = Board::new();
        board.set(0, 0, 1);
        let game = Game::from_parts(0, board, 0);
        assert_eq!(game.legal_directions(), vec![Direction::Down, Direction::Right]);
    }

    #[test]
    fn reset_clears_score_and_spawns_two() {
        let mut board = Board::new();
        board.set(3, 3, 9);
        let mut game = Game::from_parts(900, board, 7);
        game.reset();
        assert_eq!(game.score(), 0);
        assert_eq!(game.board().count_empty(), 14);
        assert!(game.max_rank() <= 2);
    }

    #[test]
    fn rejected_restore_keeps_state() {
        let mut game = Game::from_seed(11);
        game.play(Direction::Left);
        let board = *game.board();
        let score = game.score();
        assert!(game.restore("AAAA*AAA").is_err());
        assert!(game.restore("AAAAAAA").is_err());
        assert_eq!(*game.board(), board);
        assert_eq!(game.score(), score);
    }

    #[test]
    fn restore_replaces_state() {
        let mut board = Board::new();
        board.set(0, 0, 1);
        let save = codec::encode(2048, &board);
        let mut game = Game::from_seed(1);
        game.restore(&save).unwrap();
        assert_eq!(*game.board(), board);
        assert_eq!(game.score(), 2048);
        assert_eq!(game.to_save_string(), save);
    }
}
