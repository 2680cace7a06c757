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

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use data::core::primitives::PlayerName;
use data::game_states::game_state::GameState;
use data::graph::state_graph::StateGraph;
use utils::fail;
use utils::outcome::{Outcome, Value, OK};
use utils::with_error::WithError;

use crate::actions_file;
use crate::diff;
use crate::dot;
use crate::outcome::{OutcomeRecord, OutcomeSummary};
use crate::store::{ActionSummary, StateStore};

const GAME_FILE: &str = "game.dot";
const DIFF_FILE: &str = "diff.txt";
const OUTCOME_FILE: &str = "outcome.txt";
const OUTCOMES_JSON: &str = "outcomes.json";

/// Directory-tree state storage.
///
/// Each state path is a directory holding `game.dot`, the two `.dek` deck
/// files, `actions.txt`, and a `diff.txt` against the parent directory.
/// Loaded states are cached as deep copies so that saving a child can diff
/// against its parent without re-reading disk.
#[derive(Debug, Default)]
pub struct FileStore {
    cache: HashMap<String, GameState>,
}

impl FileStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn deck_file(player: PlayerName) -> &'static str {
        match player {
            PlayerName::One => "deck1.dek",
            PlayerName::Two => "deck2.dek",
        }
    }

    fn load_deck(dir: &Path, player: PlayerName) -> Value<Vec<String>> {
        let path = dir.join(Self::deck_file(player));
        if !path.exists() {
            return Ok(vec![]);
        }
        let text = fs::read_to_string(&path)
            .with_error(|| format!("Error reading {}", path.display()))?;
        Ok(text.lines().map(str::trim).filter(|l| !l.is_empty()).map(str::to_string).collect())
    }

    /// Writes a deck file, or symlinks to the parent's file when the content
    /// is identical. Long unchanged runs therefore cost one file, bounded
    /// only by the filesystem's symlink depth limit.
    fn save_deck(dir: &Path, player: PlayerName, deck: &[String]) -> Outcome {
        let path = dir.join(Self::deck_file(player));
        let parent_path = dir.parent().map(|p| p.join(Self::deck_file(player)));
        if let Some(parent_path) = parent_path {
            if parent_path.exists() {
                let parent_deck = Self::load_deck(dir.parent().expect("Parent exists"), player)?;
                if parent_deck == deck {
                    if path.exists() || path.is_symlink() {
                        fs::remove_file(&path)
                            .with_error(|| format!("Error removing {}", path.display()))?;
                    }
                    let target = parent_path
                        .canonicalize()
                        .with_error(|| format!("Error resolving {}", parent_path.display()))?;
                    return symlink(&target, &path);
                }
            }
        }
        let mut text = String::new();
        for card_id in deck {
            text.push_str(card_id);
            text.push('\n');
        }
        fs::write(&path, text).with_error(|| format!("Error writing {}", path.display()))?;
        OK
    }

    /// Writes `diff.txt`: four header lines, a blank line, then the diff
    /// against the parent state. Skipped when no parent state is available
    /// from cache or disk.
    fn write_diff(&self, state: &GameState, dir: &Path, action_taken: Option<&str>) -> Outcome {
        let parent_graph: StateGraph = match dir.parent() {
            Some(parent_dir) => match self.cache.get(&key_for(parent_dir)) {
                Some(parent) => parent.graph.clone(),
                None => {
                    let parent_game = parent_dir.join(GAME_FILE);
                    if !parent_game.exists() {
                        return OK;
                    }
                    dot::load_dot(&parent_game)?
                }
            },
            None => return OK,
        };

        let graph = &state.graph;
        let current_player =
            graph.active_player().map(|p| p.node_id()).unwrap_or("?");
        let mut text = format!(
            "# turn: {}\n# current_player: {current_player}\n# lore: p1={}, p2={}\n# action: {}\n",
            graph.game().turn,
            graph.player(PlayerName::One).lore,
            graph.player(PlayerName::Two).lore,
            action_taken.unwrap_or("initial"),
        );
        let lines = diff::diff_graphs(&parent_graph, graph);
        if !lines.is_empty() {
            text.push('\n');
            for line in lines {
                text.push_str(&line);
                text.push('\n');
            }
        }
        let path = dir.join(DIFF_FILE);
        fs::write(&path, text).with_error(|| format!("Error writing {}", path.display()))?;
        OK
    }
}

impl StateStore for FileStore {
    fn load_state(&mut self, path: &str) -> Value<GameState> {
        if let Some(state) = self.cache.get(path) {
            return Ok(state.clone());
        }
        let dir = PathBuf::from(path);
        let game_file = dir.join(GAME_FILE);
        if !game_file.exists() {
            fail!("No {GAME_FILE} at {path}");
        }
        let graph = dot::load_dot(&game_file)?;
        let deck1 = Self::load_deck(&dir, PlayerName::One)?;
        let deck2 = Self::load_deck(&dir, PlayerName::Two)?;
        let state = GameState::new(graph, deck1, deck2);
        self.cache.insert(path.to_string(), state.clone());
        Ok(state)
    }

    fn save_state(
        &mut self,
        state: &GameState,
        path: &str,
        write_actions: bool,
        action_taken: Option<&str>,
    ) -> Outcome {
        let dir = PathBuf::from(path);
        fs::create_dir_all(&dir).with_error(|| format!("Error creating {path}"))?;
        dot::save_dot(&state.graph, &dir.join(GAME_FILE))?;
        Self::save_deck(&dir, PlayerName::One, &state.deck1)?;
        Self::save_deck(&dir, PlayerName::Two, &state.deck2)?;
        if write_actions {
            actions_file::write_actions_file(&dir, &actions_file::format_actions(&state.graph))?;
        }
        self.write_diff(state, &dir, action_taken)?;
        self.cache.insert(path.to_string(), state.clone());
        OK
    }

    fn state_exists(&self, path: &str) -> bool {
        Path::new(path).join(GAME_FILE).exists()
    }

    fn get_actions(&self, path: &str) -> Value<Vec<ActionSummary>> {
        actions_file::read_actions_file(Path::new(path))
    }

    fn save_outcome(
        &mut self,
        path: &str,
        suffix: &[String],
        outcome: &OutcomeRecord,
    ) -> Outcome {
        let dir = PathBuf::from(path);
        if suffix.is_empty() {
            let file = dir.join(OUTCOME_FILE);
            fs::write(&file, outcome.to_lines())
                .with_error(|| format!("Error writing {}", file.display()))?;
            return OK;
        }
        let mut summary = self.get_outcomes(path)?;
        summary.record(suffix, outcome.winner);
        let file = dir.join(OUTCOMES_JSON);
        let json = serde_json::to_string_pretty(&summary)
            .with_error(|| "Error serializing outcomes".to_string())?;
        fs::write(&file, json).with_error(|| format!("Error writing {}", file.display()))?;
        OK
    }

    fn get_outcomes(&self, path: &str) -> Value<OutcomeSummary> {
        let file = Path::new(path).join(OUTCOMES_JSON);
        if !file.exists() {
            return Ok(OutcomeSummary::default());
        }
        let text = fs::read_to_string(&file)
            .with_error(|| format!("Error reading {}", file.display()))?;
        serde_json::from_str(&text).with_error(|| format!("Error parsing {}", file.display()))
    }
}

fn key_for(dir: &Path) -> String {
    dir.to_string_lossy().into_owned()
}

#[cfg(unix)]
fn symlink(target: &Path, link: &Path) -> Outcome {
    std::os::unix::fs::symlink(target, link)
        .with_error(|| format!("Error linking {}", link.display()))?;
    OK
}

/// Symlinks are a disk-space optimization; platforms without them get a
/// plain copy.
#[cfg(not(unix))]
fn symlink(target: &Path, link: &Path) -> Outcome {
    fs::copy(target, link).with_error(|| format!("Error copying {}", link.display()))?;
    OK
}
