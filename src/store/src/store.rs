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

use data::game_states::game_state::GameState;
use utils::outcome::{Outcome, Value};

use crate::outcome::{OutcomeRecord, OutcomeSummary};

/// One available action as presented to a caller navigating the tree.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ActionSummary {
    /// Base-36 action id.
    pub id: String,
    pub description: String,
}

/// Storage backend for game states, keyed by tree path.
///
/// Paths are `/`-separated strings whose segments below the root are base-36
/// action ids. Implementations must hand out and keep independent copies:
/// mutating a state returned by [Self::load_state] never affects the store,
/// and a state passed to [Self::save_state] is copied in.
pub trait StateStore {
    /// Loads the state saved at `path`.
    ///
    /// Fails if no state was saved there.
    fn load_state(&mut self, path: &str) -> Value<GameState>;

    /// Saves a state at `path`. `write_actions` also records the state's
    /// available actions for [Self::get_actions]; `action_taken` describes
    /// the action that produced this state, for change tracking.
    fn save_state(
        &mut self,
        state: &GameState,
        path: &str,
        write_actions: bool,
        action_taken: Option<&str>,
    ) -> Outcome;

    fn state_exists(&self, path: &str) -> bool;

    /// The actions recorded for `path`, empty if none were recorded.
    fn get_actions(&self, path: &str) -> Value<Vec<ActionSummary>>;

    /// Records a terminal outcome at `path`.
    ///
    /// An empty `suffix` marks the terminal state itself. A non-empty suffix
    /// is the action-id path from `path` down to the terminal state; its
    /// first element keys the per-action win counts.
    fn save_outcome(&mut self, path: &str, suffix: &[String], outcome: &OutcomeRecord)
        -> Outcome;

    /// Aggregated outcome statistics recorded at `path`, empty if none.
    fn get_outcomes(&self, path: &str) -> Value<OutcomeSummary>;
}
