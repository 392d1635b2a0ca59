use cozy_chess::{Board, Color, File, GameStatus, Move, Piece, Rank, Square};
use crate::board::{grid_index, DrawReason, GameState, Grid, Outcome, PieceKind, Side};
use crate::error::{EngineError, Result};

/// cozy-chess board with a snapshot stack so moves can be taken back.
#[derive(Clone, Debug)]
pub struct Position {
    board: Board,
    stack: Vec<(Board, Move)>,
}

impl Default for Position {
    fn default() -> Self { Self::startpos() }
}

impl Position {
    pub fn startpos() -> Self {
        Self { board: Board::default(), stack: Vec::with_capacity(128) }
    }

    pub fn from_fen(fen: &str) -> Result<Self> {
        Board::from_fen(fen.trim(), false)
            .map(|b| Self { board: b, stack: Vec::with_capacity(128) })
            .map_err(|e| EngineError::Fen(format!("{fen}: {e:?}")))
    }

    pub fn fen(&self) -> String { format!("{}", self.board) }

    /// Plies applied since this position was created.
    pub fn ply(&self) -> usize { self.stack.len() }

    /// Resolves a UCI token to a legal move. Castling is accepted both as the
    /// king's destination (`e1g1`) and as king-takes-rook (`e1h1`).
    pub fn parse_move(&self, mv_uci: &str) -> Result<Move> {
        let mv_uci = mv_uci.trim();
        let mut found = None;
        self.board.generate_moves(|moves| {
            for m in moves {
                if format!("{}", m) == mv_uci { found = Some(m); break; }
            }
            found.is_some()
        });
        if let Some(m) = found { return Ok(m); }
        self.parse_castle(mv_uci).ok_or_else(|| EngineError::IllegalMove(mv_uci.to_string()))
    }

    fn parse_castle(&self, mv_uci: &str) -> Option<Move> {
        let parsed: Move = mv_uci.parse().ok()?;
        if self.board.piece_on(parsed.from) != Some(Piece::King) { return None; }
        if parsed.from.rank() != parsed.to.rank() { return None; }
        let from_file = parsed.from.file() as i32;
        let to_file = parsed.to.file() as i32;
        if (to_file - from_file).abs() != 2 { return None; }
        let us = self.board.side_to_move();
        let mut found = None;
        self.board.generate_moves(|moves| {
            for m in moves {
                if m.from != parsed.from { continue; }
                if self.board.color_on(m.to) != Some(us) || self.board.piece_on(m.to) != Some(Piece::Rook) { continue; }
                let rook_file = m.to.file() as i32;
                if (rook_file - from_file).signum() == (to_file - from_file).signum() { found = Some(m); break; }
            }
            found.is_some()
        });
        found
    }

    /// UCI text for a legal move, with castling written as the king's
    /// destination square.
    pub fn uci_string(&self, mv: Move) -> String {
        let us = self.board.side_to_move();
        let is_castle = self.board.piece_on(mv.from) == Some(Piece::King)
            && self.board.color_on(mv.to) == Some(us)
            && self.board.piece_on(mv.to) == Some(Piece::Rook);
        if !is_castle { return format!("{}", mv); }
        let file = if (mv.to.file() as usize) > (mv.from.file() as usize) { File::G } else { File::C };
        let to = Square::new(file, mv.from.rank());
        format!("{}{}", mv.from, to)
    }

    pub fn make_move_uci(&mut self, mv_uci: &str) -> Result<()> {
        let mv = self.parse_move(mv_uci)?;
        self.apply(mv)
    }

    pub fn set_from_start_and_moves(moves: &[String]) -> Result<Self> {
        let mut pos = Self::startpos();
        for m in moves { pos.make_move_uci(m)?; }
        Ok(pos)
    }

    pub fn in_check(&self) -> bool { !self.board.checkers().is_empty() }

    fn has_legal_move(&self) -> bool {
        let mut any = false;
        self.board.generate_moves(|_| { any = true; true });
        any
    }

    /// Earlier occurrences of the current position among applied moves.
    fn repetitions(&self) -> usize {
        let key = self.board.hash();
        self.stack.iter().filter(|(b, _)| b.hash() == key).count()
    }
}

fn side_of(color: Color) -> Side {
    match color { Color::White => Side::First, Color::Black => Side::Second }
}

fn kind_of(piece: Piece) -> PieceKind {
    match piece {
        Piece::Pawn => PieceKind::Pawn,
        Piece::Knight => PieceKind::Knight,
        Piece::Bishop => PieceKind::Bishop,
        Piece::Rook => PieceKind::Rook,
        Piece::Queen => PieceKind::Queen,
        Piece::King => PieceKind::King,
    }
}

// Bare kings, a single minor piece, or bishops that all share one square colour.
fn insufficient_material(board: &Board) -> bool {
    let heavy = board.pieces(Piece::Pawn) | board.pieces(Piece::Rook) | board.pieces(Piece::Queen);
    if !heavy.is_empty() { return false; }
    let knights = board.pieces(Piece::Knight).len();
    let bishops = board.pieces(Piece::Bishop);
    if knights + bishops.len() <= 1 { return true; }
    if knights > 0 { return false; }
    let light = bishops.into_iter().filter(|sq| (sq.file() as usize + sq.rank() as usize) % 2 == 1).count();
    light == 0 || light == bishops.len() as usize
}

impl GameState for Position {
    type Move = Move;

    fn side_to_move(&self) -> Side { side_of(self.board.side_to_move()) }

    fn legal_moves(&self) -> Vec<Move> {
        let mut moves: Vec<Move> = Vec::with_capacity(64);
        self.board.generate_moves(|ml| { moves.extend(ml); false });
        moves
    }

    fn apply(&mut self, mv: Move) -> Result<()> {
        if !self.board.is_legal(mv) { return Err(EngineError::IllegalMove(format!("{}", mv))); }
        let prev = self.board.clone();
        self.board.play_unchecked(mv);
        self.stack.push((prev, mv));
        Ok(())
    }

    fn undo(&mut self) -> Option<Move> {
        let (prev, mv) = self.stack.pop()?;
        self.board = prev;
        Some(mv)
    }

    fn outcome(&self) -> Option<Outcome> {
        match self.board.status() {
            GameStatus::Won => return Some(Outcome::Checkmate { winner: self.side_to_move().opponent() }),
            GameStatus::Drawn => {
                let reason = if self.has_legal_move() { DrawReason::FiftyMoveRule } else { DrawReason::Stalemate };
                return Some(Outcome::Draw(reason));
            }
            GameStatus::Ongoing => {}
        }
        if insufficient_material(&self.board) { return Some(Outcome::Draw(DrawReason::InsufficientMaterial)); }
        if self.repetitions() >= 2 { return Some(Outcome::Draw(DrawReason::Repetition)); }
        None
    }

    fn occupied_squares(&self) -> Grid {
        let mut grid: Grid = [None; 64];
        for rank in 0..8 {
            for file in 0..8 {
                let sq = Square::new(File::index(file), Rank::index(rank));
                if let (Some(piece), Some(color)) = (self.board.piece_on(sq), self.board.color_on(sq)) {
                    grid[grid_index(file, rank)] = Some((kind_of(piece), side_of(color)));
                }
            }
        }
        grid
    }
}

/// Plain-text diagram, rank 8 at the top.
pub fn render(grid: &Grid) -> String {
    let mut out = String::with_capacity(200);
    for row in 0..8 {
        out.push_str(&format!("{} ", 8 - row));
        for col in 0..8 {
            let c = match grid[row * 8 + col] { Some((kind, side)) => kind.symbol(side), None => '.' };
            out.push(c);
            out.push(' ');
        }
        out.push('\n');
    }
    out.push_str("  a b c d e f g h\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_starts_at_a8() {
        let pos = Position::startpos();
        let grid = pos.occupied_squares();
        assert_eq!(grid[0], Some((PieceKind::Rook, Side::Second)));
        assert_eq!(grid[4], Some((PieceKind::King, Side::Second)));
        assert_eq!(grid[60], Some((PieceKind::King, Side::First)));
        assert_eq!(grid[52], Some((PieceKind::Pawn, Side::First)));
        assert!(grid[16..48].iter().all(|s| s.is_none()));
    }

    #[test]
    fn castling_accepts_both_notations() {
        let fen = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1";
        let pos = Position::from_fen(fen).unwrap();
        let a = pos.parse_move("e1g1").unwrap();
        let b = pos.parse_move("e1h1").unwrap();
        assert_eq!(a, b);
        assert_eq!(pos.uci_string(a), "e1g1");
        let q = pos.parse_move("e1c1").unwrap();
        assert_eq!(pos.uci_string(q), "e1c1");
    }

    #[test]
    fn illegal_apply_is_rejected_without_mutation() {
        let mut pos = Position::startpos();
        let mv: Move = "e2e5".parse().unwrap();
        assert!(pos.apply(mv).is_err());
        assert_eq!(pos.ply(), 0);
        assert_eq!(pos.fen(), Position::startpos().fen());
    }

    #[test]
    fn undo_on_fresh_position_is_none() {
        let mut pos = Position::startpos();
        assert!(pos.undo().is_none());
    }
}
