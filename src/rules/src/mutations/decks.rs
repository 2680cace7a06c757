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

use data::core::primitives::{PlayerName, Zone};
use data::game_states::game_state::GameState;
use data::graph::node::{CardNode, Node};
use data::graph::state_graph::NodeId;
use oracle::card_database::card_db;
use utils::outcome::Value;

/// Draws up to `count` cards from the front of the player's deck, creating a
/// hand-zone card node for each. Returns the created node ids.
///
/// Drawing from an empty deck draws nothing; the deck-out loss is decided by
/// the turn machine's draw step, not here.
pub fn draw(state: &mut GameState, player: PlayerName, count: usize) -> Value<Vec<NodeId>> {
    let db = card_db()?;
    let mut drawn = Vec::new();
    for _ in 0..count {
        if state.deck(player).is_empty() {
            break;
        }
        let card_id = state.deck_mut(player).remove(0);
        // "elsa_snow_queen.b" -> label "elsa_snow_queen"
        let label = match card_id.rsplit_once('.') {
            Some((base, _suffix)) => base.to_string(),
            None => card_id.clone(),
        };
        db.require(&label)?;
        let node_id = format!("{}.{card_id}", player.node_id());
        state.graph.insert_node(
            node_id.clone(),
            Node::Card(CardNode {
                label,
                zone: Zone::Hand,
                exerted: false,
                damage: 0,
                entered_play: None,
            }),
        );
        drawn.push(node_id);
    }
    Ok(drawn)
}

#[cfg(test)]
mod tests {
    use data::core::primitives::Zone;

    use super::*;
    use crate::testing;

    #[test]
    fn draw_creates_hand_nodes_and_pops_deck() {
        let mut state = testing::minimal_game();
        state.deck1 = vec!["stitch_new_dog.a".to_string(), "be_prepared.a".to_string()];
        let drawn = draw(&mut state, PlayerName::One, 1).unwrap();
        assert_eq!(drawn, vec!["p1.stitch_new_dog.a".to_string()]);
        assert_eq!(state.deck1, vec!["be_prepared.a".to_string()]);
        let card = state.graph.card("p1.stitch_new_dog.a").unwrap();
        assert_eq!(card.zone, Zone::Hand);
        assert_eq!(card.label, "stitch_new_dog");
        assert_eq!(card.entered_play, None);
    }

    #[test]
    fn draw_from_empty_deck_is_a_no_op() {
        let mut state = testing::minimal_game();
        assert!(draw(&mut state, PlayerName::One, 3).unwrap().is_empty());
    }

    #[test]
    fn unknown_card_in_deck_fails() {
        let mut state = testing::minimal_game();
        state.deck1 = vec!["not_a_real_card.a".to_string()];
        assert!(draw(&mut state, PlayerName::One, 1).is_err());
    }
}
