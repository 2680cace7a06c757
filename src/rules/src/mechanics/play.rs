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

use data::core::primitives::{ActionType, CardType, Keyword, Zone};
use data::game_states::game_state::GameState;
use data::graph::state_graph::StateGraph;
use utils::outcome::{Outcome, Value, OK};
use utils::verify;
use utils::with_error::WithError;

use crate::mechanics::ProposedAction;
use crate::mutations::{abilities, cards};
use crate::queries::{card_queries, players};

/// One `can_play` action per affordable card in the active player's hand.
///
/// Bodyguard characters get a second variant that enters play exerted; the
/// keyword is read from the card database because the card is not in play
/// yet and has no ability nodes.
pub fn enumerate(graph: &StateGraph) -> Value<Vec<ProposedAction>> {
    let ctx = players::turn_context(graph)?;
    let ink_available = graph.player(ctx.player).ink_available;
    let mut result = Vec::new();
    for card_id in graph.cards_in_zone(ctx.player, Zone::Hand) {
        let record = card_queries::record(graph, &card_id)?;
        if record.cost > ink_available {
            continue;
        }
        result.push(ProposedAction::new(
            card_id.clone(),
            ctx.player.node_id(),
            ActionType::CanPlay,
            format!("play:{card_id}"),
        ));
        if record.has_keyword(Keyword::Bodyguard) {
            result.push(ProposedAction {
                enters_exerted: true,
                ..ProposedAction::new(
                    card_id.clone(),
                    ctx.player.node_id(),
                    ActionType::CanPlay,
                    format!("play:{card_id}:exerted"),
                )
            });
        }
    }
    Ok(result)
}

/// Pays the card's cost and puts it where it goes: actions to the discard,
/// everything else into play with its printed abilities attached.
pub fn execute(state: &mut GameState, card_id: &str, enters_exerted: bool) -> Outcome {
    let ctx = players::turn_context(&state.graph)?;
    let record = card_queries::record(&state.graph, card_id)?;
    let player = state.graph.player_mut(ctx.player);
    verify!(
        player.ink_available >= record.cost,
        "Cannot afford {card_id}: cost {} with {} ink",
        record.cost,
        player.ink_available
    );
    player.ink_available -= record.cost;

    if record.card_type == CardType::Action {
        return cards::move_card(state, card_id, Zone::Discard);
    }

    cards::move_card(state, card_id, Zone::Play)?;
    let card = state
        .graph
        .card_mut(card_id)
        .with_error(|| format!("No card node: {card_id}"))?;
    card.entered_play = Some(ctx.turn);
    card.exerted = enters_exerted;
    abilities::create_printed_abilities(&mut state.graph, card_id, record, ctx.turn);
    OK
}
