/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{collections::BTreeMap, fmt};

use log::trace;

use crate::{
    movegen::{king_moves, pawn_attacks, pseudo_legal_destinations},
    path::{occupancy_verdict, path_to},
    Bitboard, Board, Color, Piece, PieceId, PieceKind, Square,
};

/// The squares one piece attacks.
///
/// Pawns attack both forward diagonals whether or not anything stands
/// there. Kings attack their eight neighbors, never their castling squares.
/// Every other piece attacks the destinations the default blocking rule
/// allows, which leaves out squares held by its own side.
pub fn attacks_of(board: &Board, piece: &Piece) -> Bitboard {
    let from = piece.square();
    let candidates = match piece.kind() {
        PieceKind::Pawn => return pawn_attacks(from, piece.color()),
        PieceKind::King => king_moves(from),
        _ => pseudo_legal_destinations(piece),
    };

    candidates
        .iter()
        .filter(|&to| !occupancy_verdict(board, piece, &path_to(from, to, piece.kind())).is_blocked())
        .collect()
}

/// Per-piece attack sets for one side.
///
/// Holds an entry for every piece of that side on the board, including
/// pieces that attack nothing.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct AttackMap {
    color: Color,
    sets: BTreeMap<PieceId, Bitboard>,
}

impl AttackMap {
    /// Builds the attack map of `color` from scratch.
    pub fn compute(board: &Board, color: Color) -> Self {
        let sets: BTreeMap<_, _> = board
            .pieces_of(color)
            .map(|piece| (piece.id(), attacks_of(board, piece)))
            .collect();
        trace!("Recomputed {} attack sets for {color}", sets.len());

        Self { color, sets }
    }

    #[inline(always)]
    pub fn color(&self) -> Color {
        self.color
    }

    /// The attack set of one piece, if it is on the board.
    #[inline(always)]
    pub fn get(&self, id: PieceId) -> Option<Bitboard> {
        self.sets.get(&id).copied()
    }

    /// Every square attacked by at least one piece.
    pub fn union(&self) -> Bitboard {
        self.sets.values().fold(Bitboard::EMPTY, |all, &set| all | set)
    }

    /// Whether any piece in this map attacks `square`.
    pub fn attacks(&self, square: Square) -> bool {
        self.sets.values().any(|set| set.contains(square))
    }

    /// The pieces that attack `square`, in label order.
    pub fn attackers_of(&self, square: Square) -> impl Iterator<Item = PieceId> + '_ {
        self.sets
            .iter()
            .filter(move |(_, set)| set.contains(square))
            .map(|(&id, _)| id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (PieceId, Bitboard)> + '_ {
        self.sets.iter().map(|(&id, &set)| (id, set))
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}

impl fmt::Display for AttackMap {
    /// One line per piece: its label followed by the squares it attacks.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (id, set) in self.iter() {
            write!(f, "{id}:")?;
            for square in set {
                write!(f, " {square}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Debug for AttackMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.sets.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starting_attacks() {
        let board = Board::standard();
        let white = AttackMap::compute(&board, Color::White);
        assert_eq!(white.len(), 16);

        // Knights reach the third rank, sliders are boxed in
        let knight = PieceId::new(Color::White, PieceKind::Knight, 1);
        let expected: Bitboard = [Square::A3, Square::C3].into_iter().collect();
        assert_eq!(white.get(knight), Some(expected));
        let rook = PieceId::new(Color::White, PieceKind::Rook, 1);
        assert_eq!(white.get(rook), Some(Bitboard::EMPTY));

        // Every third-rank square is covered by a pawn
        for file in crate::File::iter() {
            assert!(white.attacks(Square::new(file, crate::Rank::THREE)));
        }
        assert!(!white.attacks(Square::E4));
    }

    #[test]
    fn test_pawn_diagonals_ignore_occupancy() {
        let board = Board::from_placement("4k3/8/8/8/8/3P1P2/4P3/4K3").unwrap();
        let pawn = board.occupant_at(Square::E2).unwrap();
        let expected: Bitboard = [Square::D3, Square::F3].into_iter().collect();
        assert_eq!(attacks_of(&board, pawn), expected);
    }

    #[test]
    fn test_slider_stops_at_first_piece() {
        let board = Board::from_placement("4k3/8/8/3p4/8/8/8/3RK3").unwrap();
        let rook = board.occupant_at(Square::D1).unwrap();
        let attacks = attacks_of(&board, rook);
        assert!(attacks.contains(Square::D5));
        assert!(!attacks.contains(Square::D6));
        assert!(!attacks.contains(Square::E1));
        assert!(attacks.contains(Square::A1));
    }

    #[test]
    fn test_king_attacks_exclude_castling() {
        let board = Board::from_placement("4k3/8/8/8/8/8/8/R3K2R").unwrap();
        let king = board.occupant_at(Square::E1).unwrap();
        let attacks = attacks_of(&board, king);
        assert!(!attacks.contains(Square::G1));
        assert!(!attacks.contains(Square::C1));
        assert_eq!(attacks.population(), 5);
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let board = Board::from_placement("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R")
            .unwrap();
        for color in Color::all() {
            assert_eq!(AttackMap::compute(&board, color), AttackMap::compute(&board, color));
        }
    }

    #[test]
    fn test_attackers_of() {
        let board = Board::from_placement("4k3/8/8/8/8/8/8/R3K2R").unwrap();
        let white = AttackMap::compute(&board, Color::White);
        let attackers: Vec<_> = white.attackers_of(Square::F1).map(|id| id.to_string()).collect();
        assert_eq!(attackers, vec!["WR2", "WK1"]);
    }
}
