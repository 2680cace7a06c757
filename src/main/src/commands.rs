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

use std::path::Path;
use std::time::Instant;

use data::core::primitives::PlayerName;
use data::game_states::game_state::GameState;
use game::navigation;
use game::session::GameSession;
use game::setup;
use game::trajectories;
use store::file_store::FileStore;
use store::memory_store::MemoryStore;
use store::store::{ActionSummary, StateStore};
use utils::outcome::{Outcome, OK};

use crate::StoreKind;

/// `init`: create the matchup directory and print its hash to stdout.
pub fn init(deck1: &Path, deck2: &Path, output: &Path) -> Outcome {
    let hash = setup::init_game(deck1, deck2, output)?;
    println!("{hash}");
    eprintln!("[glimmer] init: {}/{hash}/game.dot", output.display());
    OK
}

/// `shuffle`: deal a seed's starting hands and report its actions.
pub fn shuffle(matchdir: &str, seed: &str) -> Outcome {
    let mut store = FileStore::new();
    let seed = setup::shuffle_and_draw(&mut store, matchdir, seed)?;
    let seed_key = Path::new(matchdir).join(&seed);
    println!("{seed}");
    eprintln!("[glimmer] shuffle: seed={seed} -> {}", seed_key.join("game.dot").display());

    let actions = store.get_actions(&seed_key.to_string_lossy())?;
    if !actions.is_empty() {
        eprintln!("\nAvailable actions:");
        for action in actions {
            eprintln!("  [{}] {}", action.id, action.description);
        }
    }
    OK
}

/// `show`: print the actions recorded next to a `game.dot`.
pub fn show(game_dot: &Path) -> Outcome {
    let dir = game_dot.parent().unwrap_or_else(|| Path::new("."));
    let store = FileStore::new();
    let actions = store.get_actions(&dir.to_string_lossy())?;
    eprintln!("[glimmer] show: {}", game_dot.display());
    print_actions(&actions);
    OK
}

/// `play`: materialize a path (recursively applying parent actions) and show
/// the resulting state.
pub fn play(path: &str, store_kind: StoreKind) -> Outcome {
    let mut file_store = FileStore::new();
    navigation::apply_action_at_path(&mut file_store, path)?;

    let (state, actions) = match store_kind {
        StoreKind::File => {
            let state = file_store.load_state(path)?;
            let actions = file_store.get_actions(path)?;
            (state, actions)
        }
        StoreKind::Memory => {
            let state = file_store.load_state(path)?;
            let mut memory = MemoryStore::new();
            memory.save_state(&state, path, true, None)?;
            let actions = memory.get_actions(path)?;
            (memory.load_state(path)?, actions)
        }
    };

    eprintln!("[glimmer] play: {path} (store={store_kind:?})");
    print_summary(&state);
    print_actions(&actions);
    OK
}

/// `play-random`: bounded uniform random rollouts, one session reset per
/// game.
pub fn play_random(initial_state_path: &str, count: usize) -> Outcome {
    let mut session = GameSession::from_file(initial_state_path, FileStore::new())?;
    for _ in 0..count {
        session.reset();
        println!("Playing random game until completion...");
        let start = Instant::now();
        let final_path = session.play_until_game_over(true, 1000)?;
        let elapsed = start.elapsed();
        println!("Game completed in {:.1}ms", elapsed.as_secs_f64() * 1000.0);
        println!("Final path: {final_path}");
        match session.get_winner()? {
            Some(winner) => println!("Winner: {}", winner.node_id()),
            None => println!("Winner: none"),
        }
        println!("Game over: {}", session.is_game_over()?);
        println!("Actions taken: {}", final_path.matches('/').count());
    }
    OK
}

/// `build-trajectories`: replay a matchup's explored trees into per-card
/// tables.
pub fn build_trajectories(matchdir: &str) -> Outcome {
    println!("Building trajectories from {matchdir}...");
    let tables = trajectories::build_trajectories(matchdir)?;
    let total_rows: usize = tables.values().map(Vec::len).sum();
    println!("Found {} unique cards", tables.len());
    println!("Total data points: {total_rows}");
    trajectories::write_trajectories(matchdir, &tables)?;
    println!("Wrote trajectory files to {matchdir}/trajectories/");
    OK
}

fn print_summary(state: &GameState) {
    let current = state.graph.active_player();
    for player in [PlayerName::One, PlayerName::Two] {
        let marker = if current == Some(player) { "►" } else { " " };
        let node = state.graph.player(player);
        println!(
            "{marker} {}: {} lore, {}/{} ink",
            player.node_id().to_uppercase(),
            node.lore,
            node.ink_available,
            node.ink_total
        );
    }
}

fn print_actions(actions: &[ActionSummary]) {
    if actions.is_empty() {
        println!("\nNo actions available.");
        return;
    }
    println!("\nAvailable actions:");
    for action in actions {
        println!("  [{}] {}", action.id, action.description);
    }
}
