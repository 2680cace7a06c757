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

//! Per-card trajectory tables built by replaying explored game trees.
//!
//! The explored tree is replayed in memory (one session per seed directory)
//! rather than re-reading every `game.dot`; the filesystem only contributes
//! the child directory names and the `outcomes.json` win rates. Rows are
//! human-readable raw values; normalization belongs to whatever consumes
//! the tables.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use data::core::primitives::{PlayerName, Zone};
use data::graph::state_graph::StateGraph;
use store::diff;
use store::file_store::FileStore;
use store::memory_store::MemoryStore;
use store::store::StateStore;
use utils::outcome::{Outcome, Value, OK};
use utils::with_error::WithError;

use crate::session::GameSession;

/// Feature columns, in output order. Each value describes observable state
/// only; no derived "can act" columns, no lookahead.
pub const FEATURE_NAMES: &[&str] = &[
    "card_id",
    "card_name",
    "owner",
    "zone",
    "exerted",
    "damage",
    "entered_play",
    "turn",
    "current_player",
    "owner_lore",
    "opponent_lore",
    "owner_ink_available",
    "owner_ink_total",
    "owner_hand_size",
];

/// One row of a card's trajectory: its feature values at one state, plus the
/// action that produced the state and the owner's score there.
#[derive(Debug, Clone)]
pub struct TrajectoryRow {
    pub card_name: String,
    pub features: Vec<String>,
    pub action: String,
    pub path: String,
    pub diff: String,
    pub score: String,
}

/// Replays every seed tree under a matchup directory and accumulates rows
/// per card name.
pub fn build_trajectories(matchdir: &str) -> Value<BTreeMap<String, Vec<TrajectoryRow>>> {
    let mut trajectories = BTreeMap::new();
    let mut file_store = FileStore::new();

    for seed_dir in seed_directories(Path::new(matchdir))? {
        let seed_key = seed_dir.to_string_lossy().into_owned();
        let seed_state = file_store.load_state(&seed_key)?;
        let mut session = GameSession::new(&seed_state, MemoryStore::new(), seed_key)?;
        traverse(&mut session, &seed_dir, "initial", "", "", &mut trajectories)?;
    }
    Ok(trajectories)
}

/// Writes `trajectories/{card_name}.txt` TSV tables under the matchup
/// directory.
pub fn write_trajectories(
    matchdir: &str,
    trajectories: &BTreeMap<String, Vec<TrajectoryRow>>,
) -> Outcome {
    let dir = Path::new(matchdir).join("trajectories");
    fs::create_dir_all(&dir).with_error(|| format!("Error creating {}", dir.display()))?;

    let header: Vec<&str> =
        FEATURE_NAMES.iter().copied().chain(["action", "path", "diff", "score"]).collect();
    for (card_name, rows) in trajectories {
        let mut text = header.join("\t");
        text.push('\n');
        for row in rows {
            let mut values = row.features.clone();
            values.push(row.action.clone());
            values.push(row.path.clone());
            values.push(row.diff.clone());
            values.push(row.score.clone());
            text.push_str(&values.join("\t"));
            text.push('\n');
        }
        let file = dir.join(format!("{card_name}.txt"));
        fs::write(&file, text).with_error(|| format!("Error writing {}", file.display()))?;
    }
    OK
}

/// Depth-first replay of one seed's explored tree.
fn traverse(
    session: &mut GameSession<MemoryStore>,
    fs_path: &Path,
    action: &str,
    game_path: &str,
    diff_text: &str,
    trajectories: &mut BTreeMap<String, Vec<TrajectoryRow>>,
) -> Outcome {
    let state = session.get_state()?;
    let score_by_owner = read_scores(fs_path)?;

    for (card_id, card_name, owner, features) in extract_all_cards(&state.graph) {
        // Only cards touched by this step appear: active, target, or swept
        // up in the diff
        if !action.contains(&card_id) && !diff_text.contains(&card_id) {
            continue;
        }
        trajectories.entry(card_name.clone()).or_default().push(TrajectoryRow {
            card_name,
            features,
            action: action.to_string(),
            path: game_path.to_string(),
            diff: diff_text.to_string(),
            score: score_by_owner(owner),
        });
    }

    let mut children: Vec<(String, PathBuf)> = Vec::new();
    for entry in fs::read_dir(fs_path)
        .with_error(|| format!("Error listing {}", fs_path.display()))?
    {
        let entry = entry.with_error(|| format!("Error listing {}", fs_path.display()))?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if entry.path().is_dir() && is_action_dir(&name) {
            children.push((name, entry.path()));
        }
    }
    children.sort();

    let parent_key = session.current_key().to_string();
    let parent_graph = state.graph.clone();
    for (action_id, child_path) in children {
        let action_desc = parent_graph
            .find_action(&action_id)
            .map(|(_, _, data)| data.description.clone())
            .unwrap_or_else(|| "unknown".to_string());
        if session.apply_action(&action_id).is_err() {
            continue;
        }
        let child_state = session.get_state()?;
        let child_diff = diff::diff_graphs(&parent_graph, &child_state.graph).join("; ");
        let child_game_path = if game_path.is_empty() {
            action_id.clone()
        } else {
            format!("{game_path}/{action_id}")
        };
        traverse(session, &child_path, &action_desc, &child_game_path, &child_diff, trajectories)?;
        session.goto(parent_key.clone());
    }
    OK
}

/// A child directory whose name is a base-36 action id.
fn is_action_dir(name: &str) -> bool {
    !name.is_empty() && name.len() <= 2 && name.chars().all(|c| c.is_ascii_alphanumeric())
}

/// A seed directory holds a `game.dot` and has a longer-than-action name.
fn seed_directories(matchdir: &Path) -> Value<Vec<PathBuf>> {
    let mut seeds = Vec::new();
    for entry in
        fs::read_dir(matchdir).with_error(|| format!("Error listing {}", matchdir.display()))?
    {
        let entry = entry.with_error(|| format!("Error listing {}", matchdir.display()))?;
        let path = entry.path();
        let name = entry.file_name().to_string_lossy().into_owned();
        if path.is_dir() && name.len() > 2 && path.join("game.dot").exists() {
            seeds.push(path);
        }
    }
    if seeds.is_empty() && matchdir.join("game.dot").exists() {
        seeds.push(matchdir.to_path_buf());
    }
    seeds.sort();
    Ok(seeds)
}

/// Owner win rate from `outcomes.json` at this state, or empty when no
/// outcome has been recorded through it.
fn read_scores(fs_path: &Path) -> Value<impl Fn(PlayerName) -> String> {
    let summary = FileStore::new().get_outcomes(&fs_path.to_string_lossy())?;
    let p1 = summary.p1_wins.len() as f64;
    let p2 = summary.p2_wins.len() as f64;
    let total = p1 + p2;
    Ok(move |owner: PlayerName| {
        if total == 0.0 {
            return String::new();
        }
        let wins = match owner {
            PlayerName::One => p1,
            PlayerName::Two => p2,
        };
        format!("{:.2}", wins / total)
    })
}

/// Feature extraction for every card node: `(node id, card name, owner,
/// feature values)` aligned with [FEATURE_NAMES].
fn extract_all_cards(
    graph: &StateGraph,
) -> Vec<(String, String, PlayerName, Vec<String>)> {
    let turn = graph.game().turn;
    let current_player =
        graph.active_player().map(|p| p.node_id().to_string()).unwrap_or_else(|| "?".to_string());
    let mut hand_sizes: BTreeMap<PlayerName, usize> = BTreeMap::new();
    for player in [PlayerName::One, PlayerName::Two] {
        hand_sizes.insert(player, graph.cards_in_zone(player, Zone::Hand).len());
    }

    let mut result = Vec::new();
    for (id, card) in graph.cards() {
        let Some(owner) = StateGraph::card_owner(id) else {
            continue;
        };
        let owner_node = graph.player(owner);
        let opponent_node = graph.player(owner.opponent());
        let features = vec![
            id.clone(),
            card.label.clone(),
            owner.node_id().to_string(),
            card.zone.as_str().to_string(),
            if card.exerted { "1" } else { "0" }.to_string(),
            card.damage.to_string(),
            card.entered_play.map(|t| t.to_string()).unwrap_or_else(|| "-1".to_string()),
            turn.to_string(),
            current_player.clone(),
            owner_node.lore.to_string(),
            opponent_node.lore.to_string(),
            owner_node.ink_available.to_string(),
            owner_node.ink_total.to_string(),
            hand_sizes[&owner].to_string(),
        ];
        result.push((id.clone(), card.label.clone(), owner, features));
    }
    result
}

#[cfg(test)]
mod tests {
    use rules::compute;
    use rules::testing;
    use rules::testing::CardSpec;
    use store::file_store::FileStore;
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn builds_rows_for_cards_touched_by_actions() {
        let dir = TempDir::new().unwrap();
        let matchdir = dir.path().join("ab12");
        let seed_key = matchdir.join("abcd1234").to_string_lossy().into_owned();

        let mut state = testing::minimal_game();
        state.deck1 = vec!["stitch_new_dog.b".to_string()];
        state.deck2 = vec!["stitch_new_dog.b".to_string()];
        let moana = testing::add_card(
            &mut state,
            PlayerName::One,
            "moana_of_motunui",
            CardSpec::default(),
        );
        compute::compute_all(&mut state.graph).unwrap();

        // Explore a short line on disk, then rebuild trajectories from it
        let mut session = GameSession::new(&state, FileStore::new(), seed_key).unwrap();
        let quest_id = session
            .get_actions()
            .unwrap()
            .into_iter()
            .find(|a| a.description == format!("quest:{moana}"))
            .unwrap()
            .id;
        session.apply_action(&quest_id).unwrap();

        let trajectories =
            build_trajectories(&matchdir.to_string_lossy()).unwrap();
        let rows = trajectories.get("moana_of_motunui").expect("No rows for quester");
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.action, format!("quest:{moana}"));
        assert_eq!(row.path, quest_id);
        assert!(row.diff.contains("exerted=1"));

        write_trajectories(&matchdir.to_string_lossy(), &trajectories).unwrap();
        let table = std::fs::read_to_string(
            matchdir.join("trajectories/moana_of_motunui.txt"),
        )
        .unwrap();
        assert!(table.starts_with("card_id\tcard_name\towner"));
        assert!(table.contains("quest:p1.moana_of_motunui.a"));
    }

    #[test]
    fn action_dir_names_are_short_base36() {
        assert!(is_action_dir("0"));
        assert!(is_action_dir("zz"));
        assert!(!is_action_dir("abc"));
        assert!(!is_action_dir(""));
        assert!(!is_action_dir("trajectories"));
    }
}
