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
use enum_iterator::all;
use utils::outcome::{Outcome, OK};

use crate::mutations::cards;
use crate::queries::card_queries;

/// Checks and resolves state-based effects. Runs after every action's
/// execute, before action edges are recomputed.
///
/// A single pass suffices: banishing a character cannot push another
/// character's damage past its willpower.
pub fn check(state: &mut GameState) -> Outcome {
    banish_damaged_characters(state)
}

/// Banishes every character in play whose marked damage meets its willpower.
/// Undamaged characters are never banished, whatever their willpower.
fn banish_damaged_characters(state: &mut GameState) -> Outcome {
    let mut to_banish = Vec::new();
    for player in all::<PlayerName>() {
        for card_id in state.graph.cards_in_zone(player, Zone::Play) {
            let record = card_queries::record(&state.graph, &card_id)?;
            if !record.is_character() {
                continue;
            }
            let Some(card) = state.graph.card(&card_id) else {
                continue;
            };
            if card.damage > 0 && card.damage >= record.willpower {
                to_banish.push(card_id);
            }
        }
    }
    for card_id in to_banish {
        cards::move_card(state, &card_id, Zone::Discard)?;
    }
    OK
}
