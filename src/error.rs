/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::{path::BlockReason, PieceId, PieceKind, Square};

/// Why a rules session refused a move.
///
/// Every variant is recoverable: the session is left exactly as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RuleError {
    /// The destination is not among the piece's movement patterns.
    #[error("{piece} cannot move to {to}")]
    InvalidDestination { piece: PieceId, to: Square },

    /// Other pieces, or a special-move rule, stand in the way.
    #[error("{piece} cannot move to {to}: {reason}")]
    Blocked {
        piece: PieceId,
        to: Square,
        reason: BlockReason,
    },

    /// The move would leave the mover's own king under attack.
    #[error("{piece} cannot move to {to}: it would leave the king in check")]
    WouldExposeKing { piece: PieceId, to: Square },

    /// Pawns may only become a queen, rook, bishop or knight.
    #[error("A pawn cannot be promoted to a {kind}")]
    IllegalPromotionChoice { kind: PieceKind },

    /// No piece with that label is in play.
    #[error("There is no piece {piece} on the board")]
    NoSuchPiece { piece: PieceId },

    /// The piece belongs to the side that is not on move.
    #[error("{piece} cannot move: it is the other side's turn")]
    NotYourTurn { piece: PieceId },
}

impl RuleError {
    /// Maps a resolver refusal onto the error a caller sees.
    pub(crate) fn from_block(piece: PieceId, to: Square, reason: BlockReason) -> Self {
        if reason.is_king_safety() {
            Self::WouldExposeKing { piece, to }
        } else {
            Self::Blocked { piece, to, reason }
        }
    }
}

/// Result type alias for rules operations.
pub type RuleResult<T> = Result<T, RuleError>;
