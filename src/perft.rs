use crate::board::GameState;
use crate::error::Result;

// Leaf count through apply/undo (no cloning), exercising move restoration.
pub fn perft<P: GameState>(pos: &mut P, depth: u32) -> Result<u64> {
    if depth == 0 { return Ok(1); }
    let mut nodes = 0u64;
    for mv in pos.legal_moves() {
        if depth == 1 { nodes += 1; continue; }
        nodes += pos.with_move(mv, |p| perft(p, depth - 1))?;
    }
    Ok(nodes)
}

/// Per-root-move counts, in move generation order.
pub fn divide<P: GameState>(pos: &mut P, depth: u32) -> Result<Vec<(P::Move, u64)>> {
    let mut out = Vec::new();
    if depth == 0 { return Ok(out); }
    for mv in pos.legal_moves() {
        let n = pos.with_move(mv, |p| perft(p, depth - 1))?;
        out.push((mv, n));
    }
    Ok(out)
}
