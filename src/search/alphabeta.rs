use log::{debug, trace};
use rand::seq::SliceRandom;
use rand::Rng;
use crate::board::{GameState, Outcome, Side};
use crate::error::Result;
use crate::search::eval::{evaluate, mate_score, Score, INFINITY};

#[derive(Debug, Clone, Copy)]
pub struct SearchParams {
    pub depth: u32,
    /// Alpha-beta cutoffs; off gives a plain minimax over the same tree.
    pub prune: bool,
}

impl Default for SearchParams {
    fn default() -> Self { Self { depth: 1, prune: true } }
}

#[derive(Debug, Clone)]
pub struct SearchResult<M> {
    pub bestmove: Option<M>,
    pub score_cp: Score,
    pub nodes: u64,
}

/// Fixed-depth minimax with alpha-beta bounds.
///
/// Scores are from the point of view of `perspective`, the side that owns the
/// root. Maximizing layers are that side's choices, minimizing layers its
/// opponent's.
pub struct Searcher {
    perspective: Side,
    prune: bool,
    nodes: u64,
}

impl Searcher {
    pub fn new(perspective: Side) -> Self {
        Self { perspective, prune: true, nodes: 0 }
    }

    pub fn with_pruning(mut self, prune: bool) -> Self {
        self.prune = prune;
        self
    }

    pub fn nodes(&self) -> u64 { self.nodes }

    /// Static value of a position for `perspective`.
    ///
    /// This is the only place the evaluator's White-relative score changes
    /// sign: a search run for Black sees the negated evaluation, a search run
    /// for White sees it unchanged. Checkmates score as mates; drawn positions
    /// keep their evaluation like any other leaf.
    pub fn static_score<P: GameState + ?Sized>(&self, pos: &P, depth_left: u32) -> Score {
        match pos.outcome() {
            Some(Outcome::Checkmate { winner }) => mate_score(winner, self.perspective, depth_left),
            _ => self.perspective.sign() * evaluate(pos),
        }
    }

    pub fn minimax<P: GameState>(
        &mut self,
        pos: &mut P,
        depth: u32,
        mut alpha: Score,
        mut beta: Score,
        maximizing: bool,
    ) -> Result<Score> {
        self.nodes += 1;
        if depth == 0 || pos.is_game_over() { return Ok(self.static_score(pos, depth)); }

        let moves = pos.legal_moves();
        if maximizing {
            let mut best = -INFINITY;
            for mv in moves {
                let value = pos.with_move(mv, |p| self.minimax(p, depth - 1, alpha, beta, false))?;
                best = best.max(value);
                alpha = alpha.max(value);
                if self.prune && beta <= alpha { break; }
            }
            Ok(best)
        } else {
            let mut best = INFINITY;
            for mv in moves {
                let value = pos.with_move(mv, |p| self.minimax(p, depth - 1, alpha, beta, true))?;
                best = best.min(value);
                beta = beta.min(value);
                if self.prune && beta <= alpha { break; }
            }
            Ok(best)
        }
    }
}

/// Scores every root move for the side to move and keeps the best.
///
/// Root moves are shuffled first, so equal scores resolve differently from
/// one seed to the next; the first move reaching the top score wins. Each
/// reply is searched `depth - 1` plies deep with a full window, the opponent
/// choosing first.
pub fn search_root<P, R>(pos: &mut P, params: SearchParams, rng: &mut R) -> Result<SearchResult<P::Move>>
where
    P: GameState,
    R: Rng + ?Sized,
{
    let mut searcher = Searcher::new(pos.side_to_move()).with_pruning(params.prune);
    let mut moves = pos.legal_moves();
    if moves.is_empty() {
        return Ok(SearchResult { bestmove: None, score_cp: searcher.static_score(pos, 0), nodes: 0 });
    }
    moves.shuffle(rng);

    let child_depth = params.depth.saturating_sub(1);
    let mut bestmove: Option<P::Move> = None;
    let mut best_score = -INFINITY;
    for mv in moves {
        let score = pos.with_move(mv, |p| searcher.minimax(p, child_depth, -INFINITY, INFINITY, false))?;
        trace!("root {} -> {}", mv, score);
        if bestmove.is_none() || score > best_score { best_score = score; bestmove = Some(mv); }
    }
    if let Some(mv) = bestmove {
        debug!("depth {} best {} score {} nodes {}", params.depth, mv, best_score, searcher.nodes());
    }
    Ok(SearchResult { bestmove, score_cp: best_score, nodes: searcher.nodes() })
}

/// Best move at `depth` plies, `None` when the side to move has no legal move.
pub fn select_move<P, R>(pos: &mut P, depth: u32, rng: &mut R) -> Result<Option<P::Move>>
where
    P: GameState,
    R: Rng + ?Sized,
{
    Ok(search_root(pos, SearchParams { depth, prune: true }, rng)?.bestmove)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::cozy::Position;
    use crate::search::eval::MATE_SCORE;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn depth_zero_is_oriented_evaluation() {
        let mut pos = Position::from_fen("k7/8/8/8/3N4/8/P7/7K b - - 0 1").unwrap();
        let white = Searcher::new(Side::First).minimax(&mut pos, 0, -INFINITY, INFINITY, true).unwrap();
        let black = Searcher::new(Side::Second).minimax(&mut pos, 0, -INFINITY, INFINITY, false).unwrap();
        assert_eq!(white, evaluate(&pos));
        assert_eq!(black, -evaluate(&pos));
    }

    #[test]
    fn checkmated_root_has_no_move() {
        // Fool's mate, White to move and mated
        let mut pos = Position::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3").unwrap();
        let mut rng = SmallRng::seed_from_u64(1);
        let res = search_root(&mut pos, SearchParams { depth: 2, prune: true }, &mut rng).unwrap();
        assert!(res.bestmove.is_none());
        assert_eq!(res.score_cp, -MATE_SCORE);
    }

    #[test]
    fn counts_nodes() {
        let mut pos = Position::startpos();
        let mut rng = SmallRng::seed_from_u64(3);
        let res = search_root(&mut pos, SearchParams { depth: 1, prune: true }, &mut rng).unwrap();
        // depth 1: one leaf per root move
        assert_eq!(res.nodes, 20);
    }
}
