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

use data::core::numerics::Damage;
use data::core::primitives::Zone;
use data::game_states::game_state::GameState;
use utils::outcome::{Outcome, OK};
use utils::with_error::WithError;

/// Moves a card to a new zone.
///
/// A card leaving the play zone takes its abilities with it: every ability
/// node whose `source` edge points at the card is removed along with all of
/// that ability's edges. Card nodes themselves are never deleted; banishing
/// is a move to the discard zone.
pub fn move_card(state: &mut GameState, card_id: &str, zone: Zone) -> Outcome {
    let card = state
        .graph
        .card_mut(card_id)
        .with_error(|| format!("No card node: {card_id}"))?;
    let leaving_play = card.zone == Zone::Play && zone != Zone::Play;
    card.zone = zone;
    if leaving_play {
        for ability in state.graph.abilities_sourced_by(card_id) {
            state.graph.remove_node(&ability);
        }
    }
    OK
}

/// Marks `amount` additional damage on a card. Lethal damage is resolved by
/// the state-based effects pass, not here.
pub fn damage_card(state: &mut GameState, card_id: &str, amount: Damage) -> Outcome {
    let card = state
        .graph
        .card_mut(card_id)
        .with_error(|| format!("No card node: {card_id}"))?;
    card.damage += amount;
    OK
}
