use super::Position;
use super::movegen::{bishop_attacks, king_attack, knight_attack, rook_attacks};
use super::zobrist::{castle_key, ep_key, piece_key, side_key};
use crate::core::*;

/******************************************\
|==========================================|
|         Castling Rights Decay            |
|==========================================|
\******************************************/

/// Per-square castling masks: the rights that survive a move touching the
/// square. Only the king and rook home squares carry non-trivial masks; a
/// move from or onto them (a rook capture included) clears the rights they
/// guard.
const CASTLING_MASKS: [Castling; Square::NUM] = init_castling_masks();

const fn init_castling_masks() -> [Castling; Square::NUM] {
    let mut masks = [Castling::ALL; Square::NUM];

    masks[Square::A1 as usize] = Castling(Castling::ALL.0 & !Castling::WQ.0);
    masks[Square::E1 as usize] = Castling(Castling::ALL.0 & !Castling::WHITE_CASTLING.0);
    masks[Square::H1 as usize] = Castling(Castling::ALL.0 & !Castling::WK.0);
    masks[Square::A8 as usize] = Castling(Castling::ALL.0 & !Castling::BQ.0);
    masks[Square::E8 as usize] = Castling(Castling::ALL.0 & !Castling::BLACK_CASTLING.0);
    masks[Square::H8 as usize] = Castling(Castling::ALL.0 & !Castling::BK.0);

    masks
}

/******************************************\
|==========================================|
|            Board Mutators                |
|==========================================|
\******************************************/

impl Position {
    /// Places a piece, keeping the key in sync.
    #[inline]
    pub(crate) fn add_piece(&mut self, piece: Piece, square: Square) {
        self.pieces[piece.index()].set(square);
        self.key ^= piece_key(piece, square);
    }

    /// Removes a known piece, keeping the key in sync.
    #[inline]
    fn remove_piece(&mut self, piece: Piece, square: Square) {
        debug_assert!(self.pieces[piece.index()].contains(square));
        self.pieces[piece.index()].clear(square);
        self.key ^= piece_key(piece, square);
    }

    /// Moves a known piece between squares, keeping the key in sync.
    #[inline]
    fn move_piece(&mut self, piece: Piece, from: Square, to: Square) {
        self.remove_piece(piece, from);
        self.add_piece(piece, to);
    }
}

/******************************************\
|==========================================|
|             Move Application             |
|==========================================|
\******************************************/

impl Position {
    /// Applies a move, producing the successor position. The predecessor is
    /// left untouched and the Zobrist key is updated incrementally to match
    /// [`Position::calc_key`] on the result.
    ///
    /// The successor's attack maps are stale; call
    /// [`Position::update_attacks`] (or use [`Position::make`]) before move
    /// generation or check queries on it.
    pub fn apply_move(&self, move_: Move) -> Position {
        let mut next = self.clone();

        let from = move_.from();
        let to = move_.to();
        let us = self.stm;
        let them = !us;

        debug_assert!(self.on(from).is_some(), "apply_move: 'from' square empty");
        let piece = unsafe { self.on(from).unwrap_unchecked() };

        // Identify the captured piece. En passant strikes one rank behind
        // the destination square.
        let captured = if move_.is_ep_capture() {
            let cap_sq = unsafe { to.add_unchecked(-us.forward()) };
            Some((Piece::from_parts(them, PieceType::Pawn), cap_sq))
        } else if move_.is_capture() {
            debug_assert!(self.on(to).is_some(), "capture flag set on empty square");
            Some((unsafe { self.on(to).unwrap_unchecked() }, to))
        } else {
            None
        };

        if let Some((cap_piece, cap_sq)) = captured {
            next.remove_piece(cap_piece, cap_sq);
        }

        // Move the piece, swapping in the promoted piece where needed
        match move_.promotion() {
            Some(promo_pt) => {
                next.remove_piece(piece, from);
                next.add_piece(Piece::from_parts(us, promo_pt), to);
            }
            None => next.move_piece(piece, from, to),
        }

        // Castling relocates the rook along the king's side
        if move_.is_castle() {
            let rook = Piece::from_parts(us, PieceType::Rook);
            let (rook_from, rook_to) = if move_.is_king_castle() {
                (Square::H1.relative(us), Square::F1.relative(us))
            } else {
                (Square::A1.relative(us), Square::D1.relative(us))
            };

            next.move_piece(rook, rook_from, rook_to);
        }

        // Castling rights decay whenever a move touches a king or rook home
        // square
        next.key ^= castle_key(next.castling);
        next.castling
            .mask(CASTLING_MASKS[from.index()] & CASTLING_MASKS[to.index()]);
        next.key ^= castle_key(next.castling);

        // The en-passant square lives exactly one ply
        next.key ^= ep_key(next.enpassant.map(|sq| sq.file()));
        next.enpassant = if move_.is_double_push() {
            Some(unsafe { from.add_unchecked(us.forward()) })
        } else {
            None
        };
        next.key ^= ep_key(next.enpassant.map(|sq| sq.file()));

        next.stm = them;
        next.key ^= side_key();

        next
    }

    /// Applies a move and refreshes the successor's attack maps: the public
    /// "successor position" operation.
    pub fn make(&self, move_: Move) -> Position {
        let mut next = self.apply_move(move_);
        next.update_attacks();
        next
    }

    /// Rebuilds both aggregate attack maps from scratch: pawn shifts with
    /// file-edge masking, leaper tables, sliding attacks under the current
    /// occupancy, and the king leaper.
    pub fn update_attacks(&mut self) {
        let occ = self.all_occupied_bb();

        for col in Colour::iter() {
            let mut attacked =
                Bitboard::pawn_attacks(col, self.piece_of(col, PieceType::Pawn));

            let mut knights = self.piece_of(col, PieceType::Knight);
            while let Some(sq) = knights.pop_lsb() {
                attacked |= knight_attack(sq);
            }

            let mut bishops =
                self.piece_of(col, PieceType::Bishop) | self.piece_of(col, PieceType::Queen);
            while let Some(sq) = bishops.pop_lsb() {
                attacked |= bishop_attacks(sq, occ);
            }

            let mut rooks =
                self.piece_of(col, PieceType::Rook) | self.piece_of(col, PieceType::Queen);
            while let Some(sq) = rooks.pop_lsb() {
                attacked |= rook_attacks(sq, occ);
            }

            attacked |= king_attack(self.king_sq(col));

            self.attacks[col.index()] = attacked;
        }
    }
}

/******************************************\
|==========================================|
|                Unit Tests                |
|==========================================|
\******************************************/
