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

use data::game_states::game_state::GameState;
use utils::fail;
use utils::outcome::{Outcome, Value, OK};

use crate::actions_file;
use crate::outcome::{OutcomeRecord, OutcomeSummary};
use crate::store::{ActionSummary, StateStore};

/// Dict-backed state storage. No filesystem I/O, so much faster than
/// [crate::file_store::FileStore] for batch exploration.
#[derive(Debug, Default)]
pub struct MemoryStore {
    states: HashMap<String, GameState>,
    actions: HashMap<String, Vec<ActionSummary>>,
    outcomes: HashMap<String, OutcomeRecord>,
    outcome_refs: HashMap<String, OutcomeSummary>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops everything stored.
    pub fn clear(&mut self) {
        self.states.clear();
        self.actions.clear();
        self.outcomes.clear();
        self.outcome_refs.clear();
    }

    /// The terminal outcome recorded at `path`, if any.
    pub fn terminal_outcome(&self, path: &str) -> Option<&OutcomeRecord> {
        self.outcomes.get(path)
    }
}

impl StateStore for MemoryStore {
    fn load_state(&mut self, path: &str) -> Value<GameState> {
        match self.states.get(path) {
            Some(state) => Ok(state.clone()),
            None => fail!("State not found: {path}"),
        }
    }

    fn save_state(
        &mut self,
        state: &GameState,
        path: &str,
        write_actions: bool,
        _action_taken: Option<&str>,
    ) -> Outcome {
        if write_actions {
            self.actions.insert(path.to_string(), actions_file::format_actions(&state.graph));
        }
        self.states.insert(path.to_string(), state.clone());
        OK
    }

    fn state_exists(&self, path: &str) -> bool {
        self.states.contains_key(path)
    }

    fn get_actions(&self, path: &str) -> Value<Vec<ActionSummary>> {
        Ok(self.actions.get(path).cloned().unwrap_or_default())
    }

    fn save_outcome(
        &mut self,
        path: &str,
        suffix: &[String],
        outcome: &OutcomeRecord,
    ) -> Outcome {
        if suffix.is_empty() {
            self.outcomes.insert(path.to_string(), outcome.clone());
        } else {
            self.outcome_refs
                .entry(path.to_string())
                .or_default()
                .record(suffix, outcome.winner);
        }
        OK
    }

    fn get_outcomes(&self, path: &str) -> Value<OutcomeSummary> {
        Ok(self.outcome_refs.get(path).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use data::core::primitives::PlayerName;
    use rules::testing;

    use super::*;

    #[test]
    fn loaded_states_are_independent_copies() {
        let mut store = MemoryStore::new();
        let state = testing::minimal_game();
        store.save_state(&state, "root", false, None).unwrap();

        let mut loaded = store.load_state("root").unwrap();
        loaded.graph.player_mut(PlayerName::One).lore = 10;

        let reloaded = store.load_state("root").unwrap();
        assert_eq!(reloaded.graph.player(PlayerName::One).lore, 0);
    }

    #[test]
    fn missing_states_fail() {
        let mut store = MemoryStore::new();
        assert!(store.load_state("nowhere").is_err());
        assert!(!store.state_exists("nowhere"));
    }

    #[test]
    fn outcomes_aggregate_by_first_action() {
        let mut store = MemoryStore::new();
        let outcome = OutcomeRecord { winner: Some(PlayerName::One), p1_lore: 20, p2_lore: 4 };
        let suffix: Vec<String> = vec!["1".into(), "a".into(), "3".into()];
        store.save_outcome("seed", &suffix, &outcome).unwrap();
        store.save_outcome("seed/1/a/3", &[], &outcome).unwrap();

        let summary = store.get_outcomes("seed").unwrap();
        assert_eq!(summary.outcomes["1"].p1_wins, 1);
        assert_eq!(summary.p1_wins, vec!["1a3"]);
        assert_eq!(store.terminal_outcome("seed/1/a/3"), Some(&outcome));
    }
}
