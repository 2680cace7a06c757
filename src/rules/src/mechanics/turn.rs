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

use data::core::primitives::{ActionType, StepPhase};
use data::graph::state_graph::{StateGraph, GAME_NODE};
use utils::outcome::Value;

use crate::mechanics::ProposedAction;
use crate::queries::players;

/// The single `can_pass` action, offered only during the main step.
///
/// Passing is the only way to leave the main step; every other phase runs
/// automatically inside the turn machine.
pub fn enumerate(graph: &StateGraph) -> Value<Vec<ProposedAction>> {
    let ctx = players::turn_context(graph)?;
    let Some((_, step)) = graph.current_step() else {
        return Ok(vec![]);
    };
    if step.step != StepPhase::Main {
        return Ok(vec![]);
    }
    Ok(vec![ProposedAction::new(
        ctx.player.node_id(),
        GAME_NODE,
        ActionType::CanPass,
        "end",
    )])
}

#[cfg(test)]
mod tests {
    use data::core::primitives::PlayerName;

    use super::*;
    use crate::testing;

    #[test]
    fn pass_is_offered_at_main() {
        let state = testing::minimal_game();
        let actions = enumerate(&state.graph).unwrap();
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].src, "p1");
        assert_eq!(actions[0].description, "end");
    }

    #[test]
    fn pass_is_not_offered_outside_main() {
        let mut state = testing::minimal_game();
        state.graph.set_current_step(PlayerName::One, StepPhase::Draw);
        assert!(enumerate(&state.graph).unwrap().is_empty());
    }
}
