/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::{Bitboard, Color, File, Piece, Rank, Role, Square};

/// Deltas for the movement of the Queen.
pub(crate) const QUEEN_DELTAS: [(i8, i8); 8] = [
    /* Rook */
    (1, 0),
    (0, -1),
    (-1, 0),
    (0, 1),
    /* Bishop */
    (1, 1),
    (1, -1),
    (-1, -1),
    (-1, 1),
];

/// Deltas for the movement of the Rook.
pub(crate) const ROOK_DELTAS: [(i8, i8); 4] = [
    QUEEN_DELTAS[0],
    QUEEN_DELTAS[1],
    QUEEN_DELTAS[2],
    QUEEN_DELTAS[3],
];

/// Deltas for the movement of the Bishop.
pub(crate) const BISHOP_DELTAS: [(i8, i8); 4] = [
    QUEEN_DELTAS[4],
    QUEEN_DELTAS[5],
    QUEEN_DELTAS[6],
    QUEEN_DELTAS[7],
];

/// Deltas for the movement of the Knight.
pub(crate) const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (1, 2),
    (1, -2),
    (2, 1),
    (2, -1),
    (-1, 2),
    (-1, -2),
    (-2, 1),
    (-2, -1),
];

/// File offsets from a king's home square to its two castling destinations.
pub(crate) const CASTLING_DELTAS: [(i8, i8); 2] = [(2, 0), (-2, 0)];

const KNIGHT_MOVES: [Bitboard; Square::COUNT] = generate_leaper_mobility(&KNIGHT_DELTAS);
const KING_MOVES: [Bitboard; Square::COUNT] = generate_leaper_mobility(&QUEEN_DELTAS);
const KING_CASTLES: [Bitboard; Square::COUNT] = generate_leaper_mobility(&CASTLING_DELTAS);
const ROOK_RAYS: [Bitboard; Square::COUNT] = generate_rider_mobility(&ROOK_DELTAS);
const BISHOP_RAYS: [Bitboard; Square::COUNT] = generate_rider_mobility(&BISHOP_DELTAS);

/// Every square `piece` could reach on an empty board, ignoring blocking
/// and king safety.
///
/// Pawns get their forward step, the double step while unmoved, and both
/// forward diagonals (which are only ever usable as captures). Kings get
/// their eight neighbors, plus the two castling squares while on their home square.
///
/// # Example
/// ```
/// # use gambit::{movegen::pseudo_legal_destinations, Board, Square};
/// let board = Board::standard();
/// let knight = board.occupant_at(Square::B1).unwrap();
/// let moves = pseudo_legal_destinations(knight);
/// assert_eq!(moves.population(), 3);
/// assert!(moves.contains(Square::C3));
/// assert!(moves.contains(Square::D2));
/// ```
pub fn pseudo_legal_destinations(piece: &Piece) -> Bitboard {
    let from = piece.square();
    match *piece.role() {
        Role::Pawn { has_moved, .. } => {
            pawn_pushes(from, piece.color(), has_moved) | pawn_attacks(from, piece.color())
        }
        Role::Knight => KNIGHT_MOVES[from],
        Role::Bishop => BISHOP_RAYS[from],
        Role::Rook { .. } => ROOK_RAYS[from],
        Role::Queen => ROOK_RAYS[from] | BISHOP_RAYS[from],
        Role::King { .. } if from == king_home(piece.color()) => {
            KING_MOVES[from] | KING_CASTLES[from]
        }
        Role::King { .. } => KING_MOVES[from],
    }
}

/// The one- and (if unmoved) two-square advances of a pawn.
#[inline(always)]
pub fn pawn_pushes(square: Square, color: Color, has_moved: bool) -> Bitboard {
    let mut pushes = Bitboard::EMPTY;
    if let Some(single) = square.forward_by(color, 1) {
        pushes.set(single);
        if !has_moved {
            if let Some(double) = square.forward_by(color, 2) {
                pushes.set(double);
            }
        }
    }
    pushes
}

/// The two forward diagonals of a pawn, clipped to the board.
///
/// # Example
/// ```
/// # use gambit::{movegen::pawn_attacks, Color, Square};
/// let attacks = pawn_attacks(Square::A2, Color::White);
/// assert_eq!(attacks.iter().collect::<Vec<_>>(), vec![Square::B3]);
/// ```
#[inline(always)]
pub fn pawn_attacks(square: Square, color: Color) -> Bitboard {
    [-1, 1]
        .into_iter()
        .filter_map(|df| square.offset(df, color.forward()))
        .collect()
}

/// The square a king of `color` starts on, and the only one it may castle from.
#[inline(always)]
pub fn king_home(color: Color) -> Square {
    Square::new(File::E, Rank::first(color))
}

/// The eight squares surrounding `square`.
#[inline(always)]
pub const fn king_moves(square: Square) -> Bitboard {
    KING_MOVES[square.index()]
}

/// Generates the moves from every location for the "Leaper" pieces.
/// Leapers jump straight to a square a fixed distance away.
const fn generate_leaper_mobility(deltas: &[(i8, i8)]) -> [Bitboard; Square::COUNT] {
    let mut mobility = [Bitboard::EMPTY; Square::COUNT];

    let mut i = 0;
    while i < Square::COUNT {
        let square = Square::from_index_unchecked(i);
        let mut movement = Bitboard::EMPTY;

        let mut j = 0;
        while j < deltas.len() {
            let (df, dr) = deltas[j];
            if let Some(shifted) = square.offset(df, dr) {
                movement = movement.or(Bitboard::from_square(shifted));
            }
            j += 1;
        }

        mobility[i] = movement;
        i += 1;
    }

    mobility
}

/// Generates the moves from every location for the "Rider" pieces.
/// Riders slide any number of squares in a direction, up to the board edge.
const fn generate_rider_mobility(deltas: &[(i8, i8)]) -> [Bitboard; Square::COUNT] {
    let mut mobility = [Bitboard::EMPTY; Square::COUNT];

    let mut i = 0;
    while i < Square::COUNT {
        let square = Square::from_index_unchecked(i);
        let mut movement = Bitboard::EMPTY;

        let mut j = 0;
        while j < deltas.len() {
            let (df, dr) = deltas[j];
            let mut ray = square;
            while let Some(shifted) = ray.offset(df, dr) {
                movement = movement.or(Bitboard::from_square(shifted));
                ray = shifted;
            }
            j += 1;
        }

        mobility[i] = movement;
        i += 1;
    }

    mobility
}
