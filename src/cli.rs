/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use clap::{Parser, Subcommand};

use crate::{Color, MoveRequest, PieceId};

/// Replays a list of moves under the rules of chess, then answers one query
/// about the resulting position.
#[derive(Debug, Clone, Parser)]
#[command(version, about, rename_all = "lower")]
pub struct Cli {
    /// Starting position as a FEN placement, optionally followed by the side to move.
    ///
    /// Defaults to the standard starting array.
    #[arg(short, long, global = true)]
    pub placement: Option<String>,

    /// Moves to play before running the command, such as `WP5-e4 BP4-d5`.
    #[arg(short, long, global = true, num_args = 1.., value_name = "MOVE")]
    pub moves: Vec<MoveRequest>,

    #[command(subcommand)]
    pub command: Option<RulesCommand>,
}

/// A query to run once the moves have been played.
#[derive(Debug, Clone, Subcommand)]
#[command(rename_all = "lower")]
pub enum RulesCommand {
    /// Print a visual representation of the current board state.
    #[command(alias = "d")]
    Display,

    /// Print the legal destinations of a piece, such as `WN1`.
    Moves {
        piece: PieceId,

        /// If set, the destinations will also be printed as a grid.
        #[arg(short = 'g', long, default_value = "false")]
        pretty: bool,
    },

    /// Print every square a side attacks, piece by piece.
    Attacks { color: Color },

    /// Report whether a side's king is under attack.
    Check { color: Color },

    /// Count legal move sequences from the current position to the supplied depth.
    Perft {
        depth: usize,

        /// If set, the count below each root move is printed as well.
        #[arg(short, long, default_value = "false")]
        split: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PieceKind, Square};

    #[test]
    fn test_parse_moves_then_command() {
        let cli = Cli::try_parse_from(["gambit", "display", "--moves", "WP5-e4", "BP4-d5"]).unwrap();
        assert_eq!(cli.moves.len(), 2);
        assert_eq!(cli.moves[1].to, Square::D5);
        assert!(matches!(cli.command, Some(RulesCommand::Display)));
    }

    #[test]
    fn test_parse_queries() {
        let cli = Cli::try_parse_from(["gambit", "moves", "wn1"]).unwrap();
        let Some(RulesCommand::Moves { piece, pretty }) = cli.command else {
            panic!("expected a moves command");
        };
        assert_eq!(piece.kind(), PieceKind::Knight);
        assert!(!pretty);

        let cli = Cli::try_parse_from(["gambit", "check", "black"]).unwrap();
        assert!(matches!(cli.command, Some(RulesCommand::Check { color: Color::Black })));

        assert!(Cli::try_parse_from(["gambit", "attacks", "green"]).is_err());
        assert!(Cli::try_parse_from(["gambit", "--moves", "WP5e4", "display"]).is_err());
    }
}
