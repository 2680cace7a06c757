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

use rules::action_handlers::actions;
use store::file_store::FileStore;
use store::store::StateStore;
use utils::fail;
use utils::outcome::{Outcome, OK};

use crate::outcomes;

/// Materializes the state at a tree path, recursively materializing parents
/// first: each missing directory's name is the action id applied at its
/// parent state.
///
/// Reads are idempotent; a state already on disk is never recomputed.
pub fn apply_action_at_path(store: &mut FileStore, path: &str) -> Outcome {
    if store.state_exists(path) {
        return OK;
    }

    let dir = Path::new(path);
    let Some(parent) = dir.parent().filter(|p| !p.as_os_str().is_empty()) else {
        fail!("No saved state at or above: {path}");
    };
    let parent_key = parent.to_string_lossy().into_owned();
    if !store.state_exists(&parent_key) {
        apply_action_at_path(store, &parent_key)?;
    }

    let Some(action_id) = dir.file_name().map(|n| n.to_string_lossy().into_owned()) else {
        fail!("Path has no action segment: {path}");
    };

    let mut state = store.load_state(&parent_key)?;
    let description = actions::execute_by_id(&mut state, &action_id)?;
    store.save_state(&state, path, true, Some(&description))?;

    if state.is_game_over() {
        outcomes::record_terminal(store, path, &state)?;
    }
    OK
}

#[cfg(test)]
mod tests {
    use data::core::primitives::PlayerName;
    use rules::compute;
    use rules::testing;
    use rules::testing::CardSpec;
    use store::memory_store::MemoryStore;
    use tempfile::TempDir;

    use super::*;
    use crate::session::GameSession;

    #[test]
    fn rematerializes_an_explored_path_from_scratch() {
        let dir = TempDir::new().unwrap();
        let seed_key = dir.path().join("abcd1234").to_string_lossy().into_owned();

        let mut state = testing::minimal_game();
        state.deck1 = vec!["stitch_new_dog.b".to_string()];
        state.deck2 = vec!["stitch_new_dog.b".to_string()];
        testing::add_card(&mut state, PlayerName::One, "moana_of_motunui", CardSpec::default());
        compute::compute_all(&mut state.graph).unwrap();

        // Explore three steps with a file-backed session
        let mut session =
            GameSession::new(&state, FileStore::new(), seed_key.clone()).unwrap();
        session.seed_rng(42);
        for _ in 0..3 {
            assert!(session.play_random_action(true).unwrap());
        }
        let explored_key = session.current_key().to_string();
        let explored_state = session.get_state().unwrap();

        // Drop every intermediate directory except the seed, then rebuild
        for entry in std::fs::read_dir(dir.path().join("abcd1234")).unwrap() {
            let entry = entry.unwrap();
            if entry.path().is_dir() {
                std::fs::remove_dir_all(entry.path()).unwrap();
            }
        }
        let mut fresh = FileStore::new();
        assert!(!fresh.state_exists(&explored_key));
        apply_action_at_path(&mut fresh, &explored_key).unwrap();
        assert_eq!(fresh.load_state(&explored_key).unwrap(), explored_state);
    }

    #[test]
    fn existing_states_are_not_recomputed() {
        let dir = TempDir::new().unwrap();
        let seed_key = dir.path().join("abcd1234").to_string_lossy().into_owned();
        let mut state = testing::minimal_game();
        compute::compute_all(&mut state.graph).unwrap();
        let mut store = FileStore::new();
        store.save_state(&state, &seed_key, true, None).unwrap();
        apply_action_at_path(&mut store, &seed_key).unwrap();
    }

    #[test]
    fn missing_roots_fail() {
        let dir = TempDir::new().unwrap();
        let key = dir.path().join("missing/0").to_string_lossy().into_owned();
        let mut store = FileStore::new();
        assert!(apply_action_at_path(&mut store, &key).is_err());
    }

    #[test]
    fn unknown_action_segments_fail() {
        let dir = TempDir::new().unwrap();
        let seed_key = dir.path().join("abcd1234").to_string_lossy().into_owned();
        let mut state = testing::minimal_game();
        compute::compute_all(&mut state.graph).unwrap();
        let mut store = FileStore::new();
        store.save_state(&state, &seed_key, true, None).unwrap();
        assert!(apply_action_at_path(&mut store, &format!("{seed_key}/zz")).is_err());
    }

    #[test]
    fn memory_sessions_match_file_materialization() {
        // Determinism property: the same action ids applied to the same
        // initial state give byte-identical graphs on both store backends.
        let dir = TempDir::new().unwrap();
        let seed_key = dir.path().join("abcd1234").to_string_lossy().into_owned();

        let mut state = testing::minimal_game();
        state.deck1 = vec!["stitch_new_dog.b".to_string()];
        state.deck2 = vec!["stitch_new_dog.b".to_string()];
        testing::add_card(&mut state, PlayerName::One, "moana_of_motunui", CardSpec::default());
        compute::compute_all(&mut state.graph).unwrap();

        let mut on_disk = GameSession::new(&state, FileStore::new(), seed_key.clone()).unwrap();
        let mut in_memory = GameSession::new(&state, MemoryStore::new(), seed_key).unwrap();
        for _ in 0..4 {
            let actions = on_disk.get_actions().unwrap();
            let id = actions.first().expect("No actions").id.clone();
            on_disk.apply_action(&id).unwrap();
            in_memory.apply_action(&id).unwrap();
        }
        assert_eq!(
            on_disk.get_state().unwrap(),
            in_memory.get_state().unwrap()
        );
    }
}
