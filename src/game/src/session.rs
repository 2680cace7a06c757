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

use data::core::primitives::{ActionType, PlayerName};
use data::game_states::game_state::GameState;
use rand::seq::SliceRandom;
use rand_xoshiro::rand_core::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;
use rules::action_handlers::actions;
use store::actions_file;
use store::file_store::FileStore;
use store::store::{ActionSummary, StateStore};
use tracing::debug;
use utils::outcome::{Outcome, Value, OK};

use crate::outcomes;

/// A navigable game session over a state store.
///
/// The session tracks a current tree path; applying an action executes it,
/// saves the child state at `current/<action_id>` and moves there. Because
/// action ids are deterministic, identical parent states always produce
/// identical children for identical ids, and previously-visited paths can be
/// revisited with [Self::goto].
pub struct GameSession<S: StateStore> {
    store: S,
    root_key: String,
    current_key: String,
    rng: Xoshiro256StarStar,
}

impl<S: StateStore> GameSession<S> {
    /// Creates a session rooted at `root_key`, saving the initial state
    /// there.
    pub fn new(initial_state: &GameState, mut store: S, root_key: impl Into<String>) -> Value<Self> {
        let root_key = root_key.into();
        store.save_state(initial_state, &root_key, true, Some("initial"))?;
        Ok(Self {
            store,
            current_key: root_key.clone(),
            root_key,
            rng: Xoshiro256StarStar::from_entropy(),
        })
    }

    /// Bootstraps a session from a state saved on disk, keyed by that path
    /// so outcome backpropagation still finds the seed segment.
    pub fn from_file(path: &str, store: S) -> Value<Self> {
        let state = FileStore::new().load_state(path)?;
        Self::new(&state, store, path)
    }

    /// Reseeds the rollout RNG, for reproducible random play.
    pub fn seed_rng(&mut self, seed: u64) {
        self.rng = Xoshiro256StarStar::seed_from_u64(seed);
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn current_key(&self) -> &str {
        &self.current_key
    }

    /// The current state, as an independent copy.
    pub fn get_state(&mut self) -> Value<GameState> {
        self.store.load_state(&self.current_key)
    }

    /// Available actions at the current state, in action-id order.
    pub fn get_actions(&mut self) -> Value<Vec<ActionSummary>> {
        Ok(actions_file::format_actions(&self.get_state()?.graph))
    }

    /// Executes the action with this id, saves the child state and moves to
    /// it. Terminal children trigger outcome backpropagation. Fails without
    /// moving if the id matches no action at the current state.
    pub fn apply_action(&mut self, action_id: &str) -> Outcome {
        let mut state = self.get_state()?;
        let description = actions::execute_by_id(&mut state, action_id)?;
        let new_key = format!("{}/{action_id}", self.current_key);
        self.store.save_state(&state, &new_key, true, Some(&description))?;
        self.current_key = new_key;
        if state.is_game_over() {
            debug!(winner = ?state.winner(), key = %self.current_key, "Game over");
            outcomes::record_terminal(&mut self.store, &self.current_key, &state)?;
        }
        OK
    }

    pub fn is_game_over(&mut self) -> Value<bool> {
        Ok(self.get_state()?.is_game_over())
    }

    pub fn get_winner(&mut self) -> Value<Option<PlayerName>> {
        Ok(self.get_state()?.winner())
    }

    /// Path from the root to the current state, empty at the root.
    pub fn get_path(&self) -> String {
        self.current_key[self.root_key.len()..].to_string()
    }

    /// Returns to the root state.
    pub fn reset(&mut self) {
        self.current_key = self.root_key.clone();
    }

    /// Jumps to a previously-visited path.
    pub fn goto(&mut self, key: impl Into<String>) {
        self.current_key = key.into();
    }

    /// Plays one action chosen uniformly at random. With `prefer_non_pass`,
    /// passing is only chosen when nothing else is available. Returns false
    /// when no actions exist.
    pub fn play_random_action(&mut self, prefer_non_pass: bool) -> Value<bool> {
        let state = self.get_state()?;
        let mut candidates: Vec<(String, ActionType)> = state
            .graph
            .action_edges()
            .map(|(_, _, data)| (data.action_id.clone(), data.action_type))
            .collect();
        if prefer_non_pass
            && candidates.iter().any(|(_, kind)| *kind != ActionType::CanPass)
        {
            candidates.retain(|(_, kind)| *kind != ActionType::CanPass);
        }
        let Some((action_id, _)) = candidates.choose(&mut self.rng).cloned() else {
            return Ok(false);
        };
        self.apply_action(&action_id)?;
        Ok(true)
    }

    /// Bounded uniform random rollout: plays until the game ends, no action
    /// is available, or `max_actions` is reached. Returns the final path.
    /// Exhausting the bound does not end the game.
    pub fn play_until_game_over(
        &mut self,
        prefer_non_pass: bool,
        max_actions: usize,
    ) -> Value<String> {
        for _ in 0..max_actions {
            if self.is_game_over()? {
                break;
            }
            if !self.play_random_action(prefer_non_pass)? {
                break;
            }
        }
        Ok(self.get_path())
    }
}

#[cfg(test)]
mod tests {
    use data::core::primitives::Zone;
    use rules::compute;
    use rules::testing;
    use rules::testing::CardSpec;
    use store::memory_store::MemoryStore;

    use super::*;

    /// A tiny but winnable position: both players hold small decks and one
    /// character each.
    fn small_game() -> GameState {
        let mut state = testing::minimal_game();
        state.deck1 = vec!["stitch_rock_star.b".to_string()];
        state.deck2 = vec!["moana_of_motunui.b".to_string()];
        testing::add_card(&mut state, PlayerName::One, "moana_of_motunui", CardSpec::default());
        testing::add_card(&mut state, PlayerName::Two, "stitch_new_dog", CardSpec::default());
        compute::compute_all(&mut state.graph).unwrap();
        state
    }

    #[test]
    fn apply_action_moves_the_session() {
        let state = small_game();
        let mut session = GameSession::new(&state, MemoryStore::new(), "abcd1234").unwrap();
        let actions = session.get_actions().unwrap();
        assert!(!actions.is_empty());

        let quest = actions
            .iter()
            .find(|a| a.description.starts_with("quest:"))
            .expect("No quest available")
            .id
            .clone();
        session.apply_action(&quest).unwrap();
        assert_eq!(session.get_path(), format!("/{quest}"));
        assert_eq!(
            session.get_state().unwrap().graph.player(PlayerName::One).lore,
            3
        );
    }

    #[test]
    fn unknown_actions_do_not_move_the_session() {
        let state = small_game();
        let mut session = GameSession::new(&state, MemoryStore::new(), "abcd1234").unwrap();
        assert!(session.apply_action("zz").is_err());
        assert_eq!(session.get_path(), "");
    }

    #[test]
    fn reset_and_goto_navigate_visited_paths() {
        let state = small_game();
        let mut session = GameSession::new(&state, MemoryStore::new(), "abcd1234").unwrap();
        let first = session.get_actions().unwrap()[0].id.clone();
        session.apply_action(&first).unwrap();
        let visited = session.current_key().to_string();

        session.reset();
        assert_eq!(session.get_path(), "");
        session.goto(visited.clone());
        assert_eq!(session.current_key(), visited);
    }

    #[test]
    fn random_rollout_reaches_a_terminal_state() {
        let state = small_game();
        let mut session = GameSession::new(&state, MemoryStore::new(), "abcd1234").unwrap();
        session.seed_rng(7);
        let path = session.play_until_game_over(true, 500).unwrap();
        assert!(session.is_game_over().unwrap());
        assert!(session.get_winner().unwrap().is_some());
        assert!(!path.is_empty());
    }

    #[test]
    fn terminal_states_backpropagate_to_the_seed() {
        let state = small_game();
        let mut session = GameSession::new(&state, MemoryStore::new(), "abcd1234").unwrap();
        session.seed_rng(11);
        let path = session.play_until_game_over(true, 500).unwrap();
        let winner = session.get_winner().unwrap().expect("No winner");

        let summary = session.store_mut().get_outcomes("abcd1234").unwrap();
        let first_action = path.trim_start_matches('/').split('/').next().unwrap().to_string();
        let counts = &summary.outcomes[&first_action];
        match winner {
            PlayerName::One => assert_eq!(counts.p1_wins, 1),
            PlayerName::Two => assert_eq!(counts.p2_wins, 1),
        }
        let suffix: String = path.split('/').collect::<Vec<_>>().concat();
        let list = match winner {
            PlayerName::One => &summary.p1_wins,
            PlayerName::Two => &summary.p2_wins,
        };
        assert_eq!(list, &vec![suffix]);
    }

    #[test]
    fn pass_is_avoided_while_other_actions_exist() {
        let mut state = testing::minimal_game();
        testing::add_card(&mut state, PlayerName::One, "moana_of_motunui", CardSpec::default());
        compute::compute_all(&mut state.graph).unwrap();

        let mut session = GameSession::new(&state, MemoryStore::new(), "abcd1234").unwrap();
        session.seed_rng(3);
        assert!(session.play_random_action(true).unwrap());
        // The only non-pass action was the quest
        let state = session.get_state().unwrap();
        let moana = state.graph.cards_in_zone(PlayerName::One, Zone::Play);
        assert!(state.graph.card(&moana[0]).unwrap().exerted);
    }
}
