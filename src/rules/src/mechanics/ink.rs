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

use data::core::primitives::{ActionType, Zone};
use data::game_states::game_state::GameState;
use data::graph::state_graph::StateGraph;
use utils::outcome::{Outcome, Value, OK};
use utils::verify;

use crate::mechanics::ProposedAction;
use crate::mutations::cards;
use crate::queries::{card_queries, players};

/// One `can_ink` action per inkable card in the active player's hand, as
/// long as they have an ink drop left this turn.
pub fn enumerate(graph: &StateGraph) -> Value<Vec<ProposedAction>> {
    let ctx = players::turn_context(graph)?;
    if graph.player(ctx.player).ink_drops == 0 {
        return Ok(vec![]);
    }
    let mut result = Vec::new();
    for card_id in graph.cards_in_zone(ctx.player, Zone::Hand) {
        if card_queries::record(graph, &card_id)?.inkwell {
            result.push(ProposedAction::new(
                card_id.clone(),
                ctx.player.node_id(),
                ActionType::CanInk,
                format!("ink:{card_id}"),
            ));
        }
    }
    Ok(result)
}

/// Moves the card to the inkwell, spending the turn's ink drop and growing
/// both the total and available ink.
pub fn execute(state: &mut GameState, card_id: &str) -> Outcome {
    let ctx = players::turn_context(&state.graph)?;
    cards::move_card(state, card_id, Zone::Ink)?;
    let player = state.graph.player_mut(ctx.player);
    verify!(player.ink_drops > 0, "No ink drops remaining for {:?}", ctx.player);
    player.ink_drops -= 1;
    player.ink_total += 1;
    player.ink_available += 1;
    OK
}

#[cfg(test)]
mod tests {
    use data::core::primitives::PlayerName;

    use super::*;
    use crate::testing;
    use crate::testing::CardSpec;

    #[test]
    fn only_inkable_hand_cards_can_be_inked() {
        let mut state = testing::minimal_game();
        let inkable = testing::add_card(
            &mut state,
            PlayerName::One,
            "stitch_new_dog",
            CardSpec { zone: Zone::Hand, ..CardSpec::default() },
        );
        testing::add_card(
            &mut state,
            PlayerName::One,
            "elsa_snow_queen",
            CardSpec { zone: Zone::Hand, ..CardSpec::default() },
        );
        let actions = enumerate(&state.graph).unwrap();
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].src, inkable);
        assert_eq!(actions[0].description, "ink:p1.stitch_new_dog.a");
    }

    #[test]
    fn no_ink_actions_without_an_ink_drop() {
        let mut state = testing::minimal_game();
        testing::add_card(
            &mut state,
            PlayerName::One,
            "stitch_new_dog",
            CardSpec { zone: Zone::Hand, ..CardSpec::default() },
        );
        state.graph.player_mut(PlayerName::One).ink_drops = 0;
        assert!(enumerate(&state.graph).unwrap().is_empty());
    }

    #[test]
    fn execute_moves_to_inkwell_and_updates_ink() {
        let mut state = testing::minimal_game();
        let card = testing::add_card(
            &mut state,
            PlayerName::One,
            "stitch_new_dog",
            CardSpec { zone: Zone::Hand, ..CardSpec::default() },
        );
        execute(&mut state, &card).unwrap();
        assert_eq!(state.graph.card(&card).unwrap().zone, Zone::Ink);
        let player = state.graph.player(PlayerName::One);
        assert_eq!(player.ink_drops, 0);
        assert_eq!(player.ink_total, 1);
        assert_eq!(player.ink_available, 1);
        // Second ink the same turn is no longer offered
        assert!(enumerate(&state.graph).unwrap().is_empty());
    }
}
