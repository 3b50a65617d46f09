use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::board::Rank;
use crate::game::Game;

/// Plays one game with uniformly random legal moves.
#[derive(Clone, Debug)]
pub struct Agent {
    seed: u64,
    pub score: u32,
    pub moves: usize,
    pub best_rank: Rank,
}

impl Agent {
    pub fn new(seed: u64) -> Self {
        Agent {
            seed,
            score: 0,
            moves: 0,
            best_rank: 0,
        }
    }

    pub fn run(&mut self) {
        // the session lives and dies on whichever thread runs the agent
        let mut game = Game::from_seed(self.seed);
        let mut picker = SmallRng::seed_from_u64(self.seed);
        self.moves = 0;
        while !game.is_game_over() {
            let legal = game.legal_directions();
            if legal.is_empty() {
                break;
            }
            let direction = legal[picker.random_range(0..legal.len())];
            game.play(direction);
            self.moves += 1;
        }
        self.score = game.score();
        self.best_rank = game.max_rank();
    }
}

pub fn create_agents(count: usize, seed: u64) -> Vec<Agent> {
    (0..count as u64)
        .map(|i| Agent::new(seed.wrapping_add(i)))
        .collect()
}

pub fn run_all(agents: &mut [Agent]) {
    agents.par_iter_mut().for_each(|agent| agent.run());
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Summary {
    pub games: usize,
    pub mean_score: f64,
    pub best_score: u32,
    pub best_rank: Rank,
    pub total_moves: usize,
}

impl Summary {
    pub fn from_agents(agents: &[Agent]) -> Summary {
        if agents.is_empty() {
            return Summary::default();
        }
        let total: u64 = agents.iter().map(|agent| agent.score as u64).sum();
        Summary {
            games: agents.len(),
            mean_score: total as f64 / agents.len() as f64,
            best_score: agents.iter().map(|agent| agent.score).max().unwrap_or(0),
            best_rank: agents.iter().map(|agent| agent.best_rank).max().unwrap_or(0),
            total_moves: agents.iter().map(|agent| agent.moves).sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn agents_play_to_the_end() {
        let mut agents = create_agents(8, 100);
        run_all(&mut agents);
        for agent in &agents {
            assert!(agent.moves > 0);
            assert!(agent.best_rank >= 2);
            assert!(agent.score > 0);
        }
    }

    #[test]
    fn runs_are_reproducible_across_threads() {
        let mut parallel = create_agents(6, 7);
        run_all(&mut parallel);
        let mut serial = create_agents(6, 7);
        for agent in serial.iter_mut() {
            agent.run();
        }
        let scores = |agents: &[Agent]| agents.iter().map(|a| (a.score, a.moves)).collect::<Vec<_>>();
        assert_eq!(scores(&parallel), scores(&serial));
    }

    #[test]
    fn summary_of_nothing() {
        assert_eq!(Summary::from_agents(&[]), Summary::default());
    }

    #[test]
    fn summary_aggregates() {
        let mut a = Agent::new(0);
        a.score = 100;
        a.moves = 10;
        a.best_rank = 5;
        let mut b = Agent::new(1);
        b.score = 300;
        b.moves = 30;
        b.best_rank = 7;
        let summary = Summary::from_agents(&[a, b]);
        assert_eq!(summary.games, 2);
        assert_eq!(summary.mean_score, 200.0);
        assert_eq!(summary.best_score, 300);
        assert_eq!(summary.best_rank, 7);
        assert_eq!(summary.total_moves, 40);
    }
}
