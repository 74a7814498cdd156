/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::{GameSession, MoveRequest, PieceKind};

/// Counts the move sequences of length `depth` available from `game`.
///
/// This performs bulk counting, meaning that, at depth 1, it returns the
/// number of legal moves rather than playing each of them.
pub fn perft(game: &GameSession, depth: usize) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = game.legal_moves();
    if depth == 1 {
        return moves.len() as u64;
    }

    moves
        .into_iter()
        .filter_map(|mv| with_move_played(game, mv))
        .map(|next| perft(&next, depth - 1))
        .sum()
}

/// Like [`perft`], but reports the count below each legal move at the root.
pub fn splitperft(game: &GameSession, depth: usize) -> Vec<(MoveRequest, u64)> {
    game.legal_moves()
        .into_iter()
        .filter_map(|mv| {
            let next = with_move_played(game, mv)?;
            Some((mv, perft(&next, depth.saturating_sub(1))))
        })
        .collect()
}

/// Copies `game` and plays `mv` on the copy.
fn with_move_played(game: &GameSession, mv: MoveRequest) -> Option<GameSession> {
    let mut next = game.clone();
    next.play(mv, PieceKind::Queen).ok()?;
    Some(next)
}
