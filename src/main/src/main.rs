// Copyright © glimmer 2024-present
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//   https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

mod commands;

/// Deterministic rules engine and game-tree explorer for two-player Lorcana
/// games.
#[derive(Parser)]
#[command(name = "glimmer", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create a matchup directory from two decklist files
    Init {
        deck1: PathBuf,
        deck2: PathBuf,
        /// Root directory for matchup output
        #[arg(long, default_value = "output")]
        output: PathBuf,
    },

    /// Shuffle decks for a seed and deal starting hands
    Shuffle { matchdir: String, seed: String },

    /// Show the available actions recorded next to a game.dot
    Show { game_dot: PathBuf },

    /// Materialize a tree path and show the state and its actions
    Play {
        path: String,
        #[arg(long, value_enum, default_value_t = StoreKind::File)]
        store: StoreKind,
    },

    /// Run uniform random rollouts from a saved state
    PlayRandom {
        initial_state_path: String,
        #[arg(default_value_t = 1)]
        count: usize,
    },

    /// Build per-card trajectory tables from an explored matchup
    BuildTrajectories { matchdir: String },
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, ValueEnum)]
enum StoreKind {
    File,
    Memory,
}

fn main() -> ExitCode {
    if let Err(error) = color_eyre::install() {
        eprintln!("{error}");
        return ExitCode::FAILURE;
    }
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(error) => {
            // Usage problems and --help/--version both land here; only the
            // former is a failure
            let code = if error.use_stderr() { ExitCode::FAILURE } else { ExitCode::SUCCESS };
            let _ = error.print();
            return code;
        }
    };

    let result = match cli.command {
        Command::Init { deck1, deck2, output } => commands::init(&deck1, &deck2, &output),
        Command::Shuffle { matchdir, seed } => commands::shuffle(&matchdir, &seed),
        Command::Show { game_dot } => commands::show(&game_dot),
        Command::Play { path, store } => commands::play(&path, store),
        Command::PlayRandom { initial_state_path, count } => {
            commands::play_random(&initial_state_path, count)
        }
        Command::BuildTrajectories { matchdir } => commands::build_trajectories(&matchdir),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("Error: {error:?}");
            ExitCode::FAILURE
        }
    }
}
