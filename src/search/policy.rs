use log::debug;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use crate::board::GameState;
use crate::config::{Difficulty, EngineConfig};
use crate::error::Result;
use crate::search::alphabeta::{search_root, SearchParams};
use crate::search::eval::Score;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveSource {
    /// Easy tier skipped the search.
    Random,
    Search,
}

#[derive(Debug, Clone)]
pub struct Decision<M> {
    pub mv: Option<M>,
    pub source: MoveSource,
    /// Root score for the side to move; `None` for random moves.
    pub score_cp: Option<Score>,
    pub nodes: u64,
}

/// Picks the computer's move for a difficulty tier.
///
/// Holds the only RNG: it drives the easy-tier coin flip, the random move
/// itself, and the root shuffle inside the search.
pub struct Engine {
    config: EngineConfig,
    rng: SmallRng,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        Ok(Self { config, rng })
    }

    pub fn config(&self) -> &EngineConfig { &self.config }

    pub fn select_move<P: GameState>(&mut self, pos: &mut P, difficulty: Difficulty) -> Result<Option<P::Move>> {
        Ok(self.think(pos, difficulty)?.mv)
    }

    /// Like `select_move`, also reporting where the move came from.
    pub fn think<P: GameState>(&mut self, pos: &mut P, difficulty: Difficulty) -> Result<Decision<P::Move>> {
        if let Some(mv) = self.easy_random_move(pos, difficulty) {
            debug!("{} tier plays random move {}", difficulty, mv);
            return Ok(Decision { mv: Some(mv), source: MoveSource::Random, score_cp: None, nodes: 0 });
        }
        let params = SearchParams { depth: difficulty.depth(), prune: true };
        let res = search_root(pos, params, &mut self.rng)?;
        Ok(Decision { mv: res.bestmove, source: MoveSource::Search, score_cp: Some(res.score_cp), nodes: res.nodes })
    }

    fn easy_random_move<P: GameState>(&mut self, pos: &P, difficulty: Difficulty) -> Option<P::Move> {
        if difficulty != Difficulty::Easy || !self.config.easy_random_enabled { return None; }
        if !self.rng.gen_bool(self.config.easy_random_chance) { return None; }
        pos.legal_moves().choose(&mut self.rng).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::cozy::Position;

    fn engine(chance: f64, seed: u64) -> Engine {
        let cfg = EngineConfig { easy_random_enabled: true, easy_random_chance: chance, seed: Some(seed) };
        Engine::new(cfg).unwrap()
    }

    #[test]
    fn certain_random_policy_skips_search_on_easy_only() {
        let mut pos = Position::startpos();
        let mut e = engine(1.0, 11);
        let easy = e.think(&mut pos, Difficulty::Easy).unwrap();
        assert_eq!(easy.source, MoveSource::Random);
        assert_eq!(easy.nodes, 0);
        let medium = e.think(&mut pos, Difficulty::Medium).unwrap();
        assert_eq!(medium.source, MoveSource::Search);
        assert!(medium.nodes > 0);
    }

    #[test]
    fn zero_chance_always_searches() {
        let mut pos = Position::startpos();
        let mut e = engine(0.0, 5);
        for _ in 0..20 {
            assert_eq!(e.think(&mut pos, Difficulty::Easy).unwrap().source, MoveSource::Search);
        }
    }

    #[test]
    fn rejects_invalid_chance() {
        let cfg = EngineConfig { easy_random_chance: -0.1, ..EngineConfig::default() };
        assert!(Engine::new(cfg).is_err());
    }
}
