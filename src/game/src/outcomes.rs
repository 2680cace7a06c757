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
use store::outcome::OutcomeRecord;
use store::store::StateStore;
use utils::outcome::{Outcome, OK};

use crate::seed;

/// Walks from a terminal state up to `stop_at` (inclusive), calling
/// `on_level` at each ancestor with the action-id suffix leading back down
/// to the terminal state.
pub fn backpropagate(
    winning_path: &str,
    stop_at: &str,
    mut on_level: impl FnMut(&str, &[String]) -> Outcome,
) -> Outcome {
    let mut actions: Vec<String> = Vec::new();
    let mut current = winning_path.to_string();
    while current != stop_at && current.contains('/') {
        let Some((parent, action)) = current.rsplit_once('/') else {
            break;
        };
        if parent.is_empty() {
            break;
        }
        actions.insert(0, action.to_string());
        on_level(parent, &actions)?;
        if parent == stop_at {
            break;
        }
        current = parent.to_string();
    }
    OK
}

/// Records a finished game: the terminal outcome at its own path, then one
/// aggregation update per ancestor up to the seed directory. Paths without a
/// recognizable seed segment only get the terminal record.
pub fn record_terminal(
    store: &mut impl StateStore,
    path: &str,
    state: &GameState,
) -> Outcome {
    let outcome = OutcomeRecord::from_state(state);
    store.save_outcome(path, &[], &outcome)?;
    if let Some(seed_path) = seed::find_seed_path(path) {
        backpropagate(path, &seed_path, |parent, suffix| {
            store.save_outcome(parent, suffix, &outcome)
        })?;
    }
    OK
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walks_up_to_the_seed_directory() {
        let mut visits: Vec<(String, String)> = Vec::new();
        backpropagate("m/xzp8iq8p/1/a/3", "m/xzp8iq8p", |parent, suffix| {
            visits.push((parent.to_string(), suffix.concat()));
            OK
        })
        .unwrap();
        assert_eq!(visits, vec![
            ("m/xzp8iq8p/1/a".to_string(), "3".to_string()),
            ("m/xzp8iq8p/1".to_string(), "a3".to_string()),
            ("m/xzp8iq8p".to_string(), "1a3".to_string()),
        ]);
    }

    #[test]
    fn stops_when_no_separator_remains() {
        let mut count = 0;
        backpropagate("solo", "other", |_, _| {
            count += 1;
            OK
        })
        .unwrap();
        assert_eq!(count, 0);
    }
}
