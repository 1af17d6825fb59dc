use crate::board::{Position, generate_legal};

/// Counts the leaf nodes of the legal move tree to the given depth. Depth 1
/// is bulk-counted from the move list length.
pub fn perft(pos: &Position, depth: usize) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = generate_legal(pos);

    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0;
    for move_ in &moves {
        let next = pos.make(*move_);
        nodes += perft(&next, depth - 1);
    }

    nodes
}

/// Per-root-move leaf counts, handy when hunting down a generation bug.
pub fn perft_divide(pos: &Position, depth: usize) -> Vec<(String, u64)> {
    let mut counts = Vec::new();

    for move_ in &generate_legal(pos) {
        let next = pos.make(*move_);
        counts.push((move_.to_uci(), perft(&next, depth.saturating_sub(1))));
    }

    counts
}
