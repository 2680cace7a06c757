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

use data::core::primitives::ActionType;
use data::game_states::game_state::GameState;
use data::graph::edge::ActionData;
use tracing::{debug, instrument};
use utils::fail;
use utils::outcome::{Outcome, Value, OK};

use crate::compute;
use crate::mechanics::{challenge, ink, play, quest};
use crate::state_based_effects;
use crate::steps::step;

/// Executes one action edge against the state, then runs state-based effects
/// and recomputes the action edges.
///
/// Callers normally reach this through [execute_by_id]; this entry point
/// exists for code that has already resolved the edge.
#[instrument(level = "debug", skip(state, data), fields(action = %data.description))]
pub fn execute(state: &mut GameState, src: &str, dst: &str, data: &ActionData) -> Outcome {
    match data.action_type {
        ActionType::CanPass => step::advance_turn(state)?,
        ActionType::CanInk => ink::execute(state, src)?,
        ActionType::CanPlay => play::execute(state, src, data.enters_exerted)?,
        ActionType::CanQuest => quest::execute(state, src)?,
        ActionType::CanChallenge => challenge::execute(state, src, dst)?,
    }
    state_based_effects::check(state)?;
    compute::compute_all(&mut state.graph)?;
    OK
}

/// Finds the action edge carrying `action_id` and executes it, returning the
/// action's description.
///
/// An unknown id fails without mutating anything: either the edge is found
/// and the action completes, or the state is untouched.
pub fn execute_by_id(state: &mut GameState, action_id: &str) -> Value<String> {
    let Some((src, dst, data)) = state.graph.find_action(action_id) else {
        fail!("Unknown action: {action_id}");
    };
    let (src, dst, data) = (src.to_string(), dst.to_string(), data.clone());
    debug!(action_id, description = %data.description, "Executing action");
    execute(state, &src, &dst, &data)?;
    Ok(data.description)
}

#[cfg(test)]
mod tests {
    use data::core::primitives::{PlayerName, Zone};

    use super::*;
    use crate::testing;
    use crate::testing::CardSpec;

    #[test]
    fn execute_by_id_runs_effects_and_recomputes() {
        let mut state = testing::minimal_game();
        testing::add_card(&mut state, PlayerName::One, "moana_of_motunui", CardSpec::default());
        compute::compute_all(&mut state.graph).unwrap();
        let (_, _, data) = state
            .graph
            .action_edges()
            .find(|(_, _, data)| data.action_type == ActionType::CanQuest)
            .expect("Quest action missing");
        let id = data.action_id.clone();

        let description = execute_by_id(&mut state, &id).unwrap();
        assert_eq!(description, "quest:p1.moana_of_motunui.a");
        assert_eq!(state.graph.player(PlayerName::One).lore, 3);
        // The quest action is gone from the recomputed set
        assert!(state
            .graph
            .action_edges()
            .all(|(_, _, data)| data.action_type != ActionType::CanQuest));
    }

    #[test]
    fn unknown_action_leaves_state_untouched() {
        let mut state = testing::minimal_game();
        testing::add_card(&mut state, PlayerName::One, "moana_of_motunui", CardSpec::default());
        compute::compute_all(&mut state.graph).unwrap();
        let before = state.clone();
        assert!(execute_by_id(&mut state, "zz").is_err());
        assert_eq!(state, before);
    }

    #[test]
    fn challenge_action_banishes_through_effects() {
        let mut state = testing::minimal_game();
        let attacker = testing::add_card(
            &mut state,
            PlayerName::One,
            "aladdin_heroic_outlaw",
            CardSpec::default(),
        );
        let defender = testing::add_card(
            &mut state,
            PlayerName::Two,
            "gaston_arrogant_hunter",
            CardSpec { exerted: true, ..CardSpec::default() },
        );
        compute::compute_all(&mut state.graph).unwrap();
        let id = state
            .graph
            .action_edges()
            .find(|(_, _, data)| data.action_type == ActionType::CanChallenge)
            .map(|(_, _, data)| data.action_id.clone())
            .expect("Challenge action missing");

        execute_by_id(&mut state, &id).unwrap();
        assert_eq!(state.graph.card(&defender).unwrap().zone, Zone::Discard);
        // Aladdin took Gaston's 4 strength but has 3 willpower... and is
        // banished as well by the same effects pass
        assert_eq!(state.graph.card(&attacker).unwrap().zone, Zone::Discard);
    }
}
