/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use crate::{movegen::king_home, Board, File, Piece, PieceId, PieceKind, Rank, Role, Square};

/// Auxiliary board edits a move carries beyond relocating the mover.
///
/// Promotion is not listed here: it is detected once the pawn has landed.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum SpecialMove {
    #[default]
    None,
    /// The captured pawn stands beside the destination, not on it.
    EnPassant { captured: Square },
    /// The rook on `rook_from` hops to `rook_to`, the square the king passes over.
    Castle { rook_from: Square, rook_to: Square },
}

impl fmt::Display for SpecialMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "-"),
            Self::EnPassant { captured } => write!(f, "en passant on {captured}"),
            Self::Castle { rook_from, rook_to } => write!(f, "castle, rook {rook_from}-{rook_to}"),
        }
    }
}

/// If `pawn` moving diagonally onto the empty square `to` is an en passant
/// capture, returns the square of the pawn it takes.
///
/// The victim must be an enemy pawn beside the mover, on the destination's
/// file, whose latest move was its double step and happened on the ply just
/// played. `ply` is the number of plies played so far.
pub fn en_passant_victim(board: &Board, ply: usize, pawn: &Piece, to: Square) -> Option<Square> {
    let from = pawn.square();
    if pawn.kind() != PieceKind::Pawn
        || from.distance_files(to) != 1
        || from.forward_by(pawn.color(), 1).map(|ahead| ahead.rank()) != Some(to.rank())
        || !board.is_empty(to)
    {
        return None;
    }

    let beside = Square::new(to.file(), from.rank());
    let victim = board.occupant_at(beside)?;
    match *victim.role() {
        Role::Pawn {
            double_step: true,
            last_moved_ply: Some(moved_on),
            ..
        } if victim.color() != pawn.color() && moved_on == ply => Some(beside),
        _ => None,
    }
}

/// If `king` moving to `to` is a castling move with a friendly, unmoved rook
/// still on that side's corner, returns the rook's corner and its destination.
pub fn castling_rook(board: &Board, king: &Piece, to: Square) -> Option<(Square, Square)> {
    let from = king.square();
    if king.kind() != PieceKind::King
        || from != king_home(king.color())
        || from.rank() != to.rank()
        || from.distance_files(to) != 2
    {
        return None;
    }

    let (corner_file, step) = if to.file() > from.file() {
        (File::H, 1)
    } else {
        (File::A, -1)
    };
    let rook_from = Square::new(corner_file, from.rank());
    let rook = board.occupant_at(rook_from)?;
    if rook.color() != king.color() || !matches!(rook.role(), Role::Rook { has_moved: false }) {
        return None;
    }

    let rook_to = from.offset(step, 0)?;
    Some((rook_from, rook_to))
}

/// Packages the auxiliary edits of `piece` moving to `to`.
///
/// Assumes the move has already been accepted by the resolver.
pub fn detect_special(board: &Board, ply: usize, piece: &Piece, to: Square) -> SpecialMove {
    match piece.kind() {
        PieceKind::Pawn => en_passant_victim(board, ply, piece, to)
            .map_or(SpecialMove::None, |captured| SpecialMove::EnPassant { captured }),
        PieceKind::King => castling_rook(board, piece, to)
            .map_or(SpecialMove::None, |(rook_from, rook_to)| SpecialMove::Castle {
                rook_from,
                rook_to,
            }),
        _ => SpecialMove::None,
    }
}

/// Whether `piece` landing on `to` must be promoted.
#[inline(always)]
pub fn needs_promotion(piece: &Piece, to: Square) -> bool {
    piece.kind() == PieceKind::Pawn && to.rank() == Rank::eighth(piece.color())
}

/// Supplies the replacement kind when a pawn reaches its last rank.
///
/// This is how a rules session asks whoever requested the move. A fixed
/// [`PieceKind`] always answers with itself, and any
/// `FnMut(PieceId) -> PieceKind` closure can stand in for an interactive prompt.
pub trait PromotionChooser {
    /// Picks the kind `pawn` becomes. Only queens, rooks, bishops and knights are accepted.
    fn choose(&mut self, pawn: PieceId) -> PieceKind;
}

impl PromotionChooser for PieceKind {
    #[inline(always)]
    fn choose(&mut self, _pawn: PieceId) -> PieceKind {
        *self
    }
}

impl<F: FnMut(PieceId) -> PieceKind> PromotionChooser for F {
    #[inline(always)]
    fn choose(&mut self, pawn: PieceId) -> PieceKind {
        self(pawn)
    }
}
