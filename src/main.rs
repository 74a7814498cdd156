/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use gambit::{perft, splitperft, Cli, GameSession, PieceKind, RulesCommand};
use log::info;

fn main() {
    let env = Env::default().filter_or("GAMBIT_LOG", "warn");
    env_logger::Builder::from_env(env).init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("{} encountered an error: {e:#}", env!("CARGO_PKG_NAME"));
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut game = match &cli.placement {
        Some(placement) => GameSession::from_placement(placement)?,
        None => GameSession::new(),
    };

    for (n, mv) in cli.moves.iter().enumerate() {
        // No one to ask, so pawns without an explicit choice become queens
        let record = game
            .play(*mv, PieceKind::Queen)
            .with_context(|| format!("Failed to replay move {} ({mv})", n + 1))?;
        info!("Replayed {record}");
    }

    match cli.command.unwrap_or(RulesCommand::Display) {
        RulesCommand::Display => println!("{game}"),

        RulesCommand::Moves { piece, pretty } => {
            let destinations = game.legal_destinations(piece)?;
            let listed: Vec<_> = destinations.iter().map(|sq| sq.to_string()).collect();
            println!("{piece}: {}", listed.join(" "));
            if pretty {
                println!("{destinations}");
            }
        }

        RulesCommand::Attacks { color } => print!("{}", game.attacked_squares(color)),

        RulesCommand::Check { color } => {
            let verdict = if game.is_in_check(color) { "is" } else { "is not" };
            println!("{color} {verdict} in check");
        }

        RulesCommand::Perft { depth, split } => {
            let now = Instant::now();
            let nodes = if split {
                let counts = splitperft(&game, depth);
                for (mv, nodes) in &counts {
                    println!("{mv}\t{nodes}");
                }
                counts.iter().map(|(_, nodes)| nodes).sum()
            } else {
                perft(&game, depth)
            };
            let elapsed = now.elapsed();
            println!("\nNodes: {nodes}\nTime: {elapsed:?}");
        }
    }

    Ok(())
}
