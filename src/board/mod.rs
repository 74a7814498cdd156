/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

/// Sets of squares.
mod bitboard;

/// The 64-cell grid and its placement primitives.
mod grid;

/// Sides, kinds, identities and per-piece state.
mod piece;

/// Files, ranks and squares.
mod square;

pub use bitboard::*;
pub use grid::*;
pub use piece::*;
pub use square::*;
