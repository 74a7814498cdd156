/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! A rules engine for two-player chess.
//!
//! Given a position and a requested move, [`GameSession`] decides whether the
//! move fits the piece's movement pattern, whether other pieces block it,
//! whether it is en passant, castling or a promotion, and whether it would
//! leave the mover's own king under attack.
//!
//! ```
//! # use gambit::{GameSession, PieceKind, RuleError};
//! let mut game = GameSession::new();
//! game.play("WP5-e4".parse().unwrap(), PieceKind::Queen).unwrap();
//! game.play("BP5-e5".parse().unwrap(), PieceKind::Queen).unwrap();
//!
//! let blocked = game.play("WP5-e5".parse().unwrap(), PieceKind::Queen);
//! assert!(matches!(blocked, Err(RuleError::Blocked { .. })));
//! ```

/// Squares, pieces and the board they stand on.
mod board;

/// Command-line definitions for the `gambit` binary.
mod cli;

/// Errors reported when a move is refused.
mod error;

/// The game session and move executor.
mod game;

/// Per-piece attack sets.
pub mod attacks;

/// Movement patterns of every kind of piece.
pub mod movegen;

/// Path walking and blocking rules.
pub mod path;

/// Move counting, for checking the rules against known positions.
pub mod perft;

/// En passant, castling and promotion.
pub mod special;

pub use attacks::AttackMap;
pub use board::*;
pub use cli::*;
pub use error::*;
pub use game::*;
pub use path::{BlockReason, Verdict};
pub use perft::{perft, splitperft};
pub use special::{PromotionChooser, SpecialMove};
