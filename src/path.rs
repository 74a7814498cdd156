/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use crate::{
    special::{castling_rook, en_passant_victim},
    Bitboard, Board, Piece, PieceId, PieceKind, Square,
};

/// Why the resolver refused a move.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum BlockReason {
    /// A square strictly between origin and destination is occupied.
    PathObstructed,
    /// The destination holds a piece of the mover's own side.
    FriendlyOccupied,
    /// A pawn's forward destination is occupied.
    PawnCannotCaptureForward,
    /// A pawn's diagonal destination has nothing to capture, en passant included.
    NothingToCapture,
    /// The king or the rook on that side has already moved, or the rook is gone.
    CastlingRightsLost,
    /// A square between king and rook is occupied.
    CastlingPathObstructed,
    /// The king would step onto a square the opponent attacks.
    IntoCheck,
    /// The king would castle out of, through or into an attacked square.
    ThroughCheck,
}

impl BlockReason {
    /// Whether this refusal protects the mover's own king.
    #[inline(always)]
    pub const fn is_king_safety(&self) -> bool {
        matches!(self, Self::IntoCheck | Self::ThroughCheck)
    }
}

impl fmt::Display for BlockReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Self::PathObstructed => "the path is obstructed",
            Self::FriendlyOccupied => "the destination holds a friendly piece",
            Self::PawnCannotCaptureForward => "pawns cannot capture straight ahead",
            Self::NothingToCapture => "pawns may only move diagonally to capture",
            Self::CastlingRightsLost => "castling rights on that side are lost",
            Self::CastlingPathObstructed => "pieces stand between the king and the rook",
            Self::IntoCheck => "the king would move into an attacked square",
            Self::ThroughCheck => "the king cannot castle out of, through or into check",
        };
        write!(f, "{reason}")
    }
}

/// Outcome of classifying a single move against the board.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Verdict {
    /// The path and destination are empty.
    Quiet,
    /// The move removes the identified enemy piece.
    Capture(PieceId),
    /// The move is not allowed.
    Blocked(BlockReason),
}

impl Verdict {
    #[inline(always)]
    pub const fn is_blocked(&self) -> bool {
        matches!(self, Self::Blocked(_))
    }
}

/// Facts about the game, beyond the board itself, that the resolver needs.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Context {
    /// Plies played so far.
    pub ply: usize,
    /// Every square the mover's opponent currently attacks.
    pub enemy_attacks: Bitboard,
}

/// The ordered squares a piece crosses travelling from `from` to `to`: every
/// square strictly between them, then `to` itself.
///
/// Knights jump, so their path is only the destination. Every other kind
/// moves along a rank, file or diagonal.
///
/// # Example
/// ```
/// # use gambit::{path::path_to, PieceKind, Square};
/// let path = path_to(Square::A1, Square::D4, PieceKind::Bishop);
/// assert_eq!(path, vec![Square::B2, Square::C3, Square::D4]);
/// assert_eq!(path_to(Square::G1, Square::F3, PieceKind::Knight), vec![Square::F3]);
/// ```
pub fn path_to(from: Square, to: Square, kind: PieceKind) -> Vec<Square> {
    if kind == PieceKind::Knight {
        return vec![to];
    }

    let df = to.file().index() as i8 - from.file().index() as i8;
    let dr = to.rank().index() as i8 - from.rank().index() as i8;
    debug_assert!(
        df == 0 || dr == 0 || df.abs() == dr.abs(),
        "{from} -> {to} is not a straight line"
    );
    let step = (df.signum(), dr.signum());

    let mut path = Vec::with_capacity(df.unsigned_abs().max(dr.unsigned_abs()) as usize);
    let mut current = from;
    while current != to {
        let Some(next) = current.offset(step.0, step.1) else {
            break;
        };
        path.push(next);
        current = next;
    }
    path
}

/// Applies the default blocking rule to `path`.
///
/// Any occupied square before the destination blocks. The destination itself
/// is a capture if an enemy stands there, and blocked if a friend does.
pub fn occupancy_verdict(board: &Board, piece: &Piece, path: &[Square]) -> Verdict {
    let Some((&to, between)) = path.split_last() else {
        return Verdict::Quiet;
    };

    if between.iter().any(|&square| !board.is_empty(square)) {
        return Verdict::Blocked(BlockReason::PathObstructed);
    }

    match board.occupant_at(to) {
        None => Verdict::Quiet,
        Some(occupant) if occupant.color() != piece.color() => Verdict::Capture(occupant.id()),
        Some(_) => Verdict::Blocked(BlockReason::FriendlyOccupied),
    }
}

/// Decides whether `piece` may travel to `to`, and whether it captures on the way.
///
/// `to` is assumed to be one of the piece's pseudo-legal destinations. The
/// resolver applies the default occupancy rule, then the per-kind exceptions:
/// pawns need an empty square ahead and a victim on the diagonal, kings may
/// not step onto attacked squares and castle only with all rights intact.
///
/// Whether the move leaves the mover's king attacked by something other than
/// the destination is not decided here.
pub fn classify(board: &Board, piece: &Piece, to: Square, context: &Context) -> Verdict {
    let from = piece.square();
    let path = path_to(from, to, piece.kind());

    match piece.kind() {
        PieceKind::Pawn if from.file() == to.file() => classify_pawn_push(board, &path),
        PieceKind::Pawn => classify_pawn_capture(board, piece, to, context),
        PieceKind::King if from.distance_files(to) == 2 => classify_castle(board, piece, to, context),
        PieceKind::King => match occupancy_verdict(board, piece, &path) {
            Verdict::Blocked(reason) => Verdict::Blocked(reason),
            _ if context.enemy_attacks.contains(to) => Verdict::Blocked(BlockReason::IntoCheck),
            verdict => verdict,
        },
        _ => occupancy_verdict(board, piece, &path),
    }
}

fn classify_pawn_push(board: &Board, path: &[Square]) -> Verdict {
    let Some((&to, between)) = path.split_last() else {
        return Verdict::Quiet;
    };
    if between.iter().any(|&square| !board.is_empty(square)) {
        Verdict::Blocked(BlockReason::PathObstructed)
    } else if !board.is_empty(to) {
        Verdict::Blocked(BlockReason::PawnCannotCaptureForward)
    } else {
        Verdict::Quiet
    }
}

fn classify_pawn_capture(board: &Board, pawn: &Piece, to: Square, context: &Context) -> Verdict {
    match board.occupant_at(to) {
        Some(occupant) if occupant.color() != pawn.color() => Verdict::Capture(occupant.id()),
        Some(_) => Verdict::Blocked(BlockReason::FriendlyOccupied),
        None => en_passant_victim(board, context.ply, pawn, to)
            .and_then(|victim| board.occupant_at(victim))
            .map_or(Verdict::Blocked(BlockReason::NothingToCapture), |victim| {
                Verdict::Capture(victim.id())
            }),
    }
}

fn classify_castle(board: &Board, king: &Piece, to: Square, context: &Context) -> Verdict {
    if king.has_moved() {
        return Verdict::Blocked(BlockReason::CastlingRightsLost);
    }
    let Some((rook_from, transit)) = castling_rook(board, king, to) else {
        return Verdict::Blocked(BlockReason::CastlingRightsLost);
    };

    let between = path_to(king.square(), rook_from, PieceKind::Rook);
    if between[..between.len() - 1]
        .iter()
        .any(|&square| !board.is_empty(square))
    {
        return Verdict::Blocked(BlockReason::CastlingPathObstructed);
    }

    if [king.square(), transit, to]
        .into_iter()
        .any(|square| context.enemy_attacks.contains(square))
    {
        return Verdict::Blocked(BlockReason::ThroughCheck);
    }

    Verdict::Quiet
}
