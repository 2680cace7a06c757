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
use utils::outcome::{Outcome, Value};
use utils::with_error::WithError;

use crate::mechanics::ProposedAction;
use crate::mutations::lore;
use crate::queries::{card_queries, players};

/// One `can_quest` action per ready, dry character in the active player's
/// play zone without an incoming `cant_quest` edge.
///
/// A 0-lore character still qualifies; it just gains nothing.
pub fn enumerate(graph: &StateGraph) -> Value<Vec<ProposedAction>> {
    let ctx = players::turn_context(graph)?;
    let mut result = Vec::new();
    for card_id in graph.cards_in_zone(ctx.player, Zone::Play) {
        if !card_queries::record(graph, &card_id)?.is_character() {
            continue;
        }
        let card = graph.card(&card_id).with_error(|| format!("No card node: {card_id}"))?;
        if card.exerted || !card_queries::is_dry(card, ctx.turn) {
            continue;
        }
        if graph.has_cant_quest(&card_id) {
            continue;
        }
        result.push(ProposedAction::new(
            card_id.clone(),
            ctx.player.node_id(),
            ActionType::CanQuest,
            format!("quest:{card_id}"),
        ));
    }
    Ok(result)
}

/// Exerts the character and adds its lore value to the active player's total
/// (which may end the game).
pub fn execute(state: &mut GameState, card_id: &str) -> Outcome {
    let ctx = players::turn_context(&state.graph)?;
    let lore_value = card_queries::lore_value(&state.graph, card_id)?;
    let card = state
        .graph
        .card_mut(card_id)
        .with_error(|| format!("No card node: {card_id}"))?;
    card.exerted = true;
    lore::add_lore(state, ctx.player, lore_value)
}

#[cfg(test)]
mod tests {
    use data::core::primitives::PlayerName;

    use super::*;
    use crate::testing;
    use crate::testing::CardSpec;

    #[test]
    fn quest_gives_lore_and_exerts() {
        let mut state = testing::minimal_game();
        let moana = testing::add_card(
            &mut state,
            PlayerName::One,
            "moana_of_motunui",
            CardSpec::default(),
        );
        let actions = enumerate(&state.graph).unwrap();
        assert_eq!(actions.len(), 1);
        execute(&mut state, &moana).unwrap();
        assert!(state.graph.card(&moana).unwrap().exerted);
        assert_eq!(state.graph.player(PlayerName::One).lore, 3);
        assert!(!state.is_game_over());
    }

    #[test]
    fn exerted_characters_cannot_quest() {
        let mut state = testing::minimal_game();
        testing::add_card(
            &mut state,
            PlayerName::One,
            "moana_of_motunui",
            CardSpec { exerted: true, ..CardSpec::default() },
        );
        assert!(enumerate(&state.graph).unwrap().is_empty());
    }

    #[test]
    fn drying_characters_cannot_quest() {
        let mut state = testing::minimal_game();
        testing::set_turn(&mut state, 4);
        testing::add_card(
            &mut state,
            PlayerName::One,
            "moana_of_motunui",
            CardSpec { entered_play: Some(4), ..CardSpec::default() },
        );
        assert!(enumerate(&state.graph).unwrap().is_empty());
    }

    #[test]
    fn reckless_characters_cannot_quest() {
        let mut state = testing::minimal_game();
        testing::set_turn(&mut state, 2);
        testing::add_card(
            &mut state,
            PlayerName::One,
            "gaston_arrogant_hunter",
            CardSpec { entered_play: Some(1), ..CardSpec::default() },
        );
        assert!(enumerate(&state.graph).unwrap().is_empty());
    }

    #[test]
    fn zero_lore_characters_still_quest() {
        let mut state = testing::minimal_game();
        let pascal = testing::add_card(
            &mut state,
            PlayerName::One,
            "pascal_rapunzel's_companion",
            CardSpec::default(),
        );
        let actions = enumerate(&state.graph).unwrap();
        assert_eq!(actions.len(), 1);
        execute(&mut state, &pascal).unwrap();
        assert_eq!(state.graph.player(PlayerName::One).lore, 0);
    }

    #[test]
    fn winning_at_twenty_lore() {
        let mut state = testing::minimal_game();
        state.graph.player_mut(PlayerName::One).lore = 17;
        let moana = testing::add_card(
            &mut state,
            PlayerName::One,
            "moana_of_motunui",
            CardSpec::default(),
        );
        execute(&mut state, &moana).unwrap();
        assert_eq!(state.graph.player(PlayerName::One).lore, 20);
        assert!(state.is_game_over());
        assert_eq!(state.winner(), Some(PlayerName::One));
        // A finished game enumerates nothing
        crate::compute::compute_all(&mut state.graph).unwrap();
        assert!(state.graph.action_edges().next().is_none());
    }
}
