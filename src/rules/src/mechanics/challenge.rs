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

use data::core::primitives::{ActionType, Keyword, Zone};
use data::game_states::game_state::GameState;
use data::graph::state_graph::{NodeId, StateGraph};
use itertools::iproduct;
use utils::outcome::{Outcome, Value};
use utils::with_error::WithError;

use crate::mechanics::ProposedAction;
use crate::mutations::cards;
use crate::queries::{card_queries, players};

/// One `can_challenge` action per (attacker, defender) pair.
///
/// Attackers are the active player's ready characters that are dry or have
/// Rush. Defenders are the opponent's exerted characters, restricted to
/// Bodyguards whenever any exerted Bodyguard is present, and gated by
/// Evasive: an Evasive defender can only be challenged by an attacker with
/// Evasive or Alert.
pub fn enumerate(graph: &StateGraph) -> Value<Vec<ProposedAction>> {
    let ctx = players::turn_context(graph)?;

    let mut attackers = Vec::new();
    for card_id in graph.cards_in_zone(ctx.player, Zone::Play) {
        if !card_queries::record(graph, &card_id)?.is_character() {
            continue;
        }
        let card = graph.card(&card_id).with_error(|| format!("No card node: {card_id}"))?;
        if card.exerted {
            continue;
        }
        if !card_queries::is_dry(card, ctx.turn) && !graph.has_keyword(&card_id, Keyword::Rush) {
            continue;
        }
        attackers.push(card_id);
    }

    let mut defenders: Vec<NodeId> = Vec::new();
    for card_id in graph.cards_in_zone(ctx.opponent, Zone::Play) {
        if !card_queries::record(graph, &card_id)?.is_character() {
            continue;
        }
        let card = graph.card(&card_id).with_error(|| format!("No card node: {card_id}"))?;
        if card.exerted {
            defenders.push(card_id);
        }
    }
    // An exerted Bodyguard restricts target selection to Bodyguards
    if defenders.iter().any(|d| graph.has_keyword(d, Keyword::Bodyguard)) {
        defenders.retain(|d| graph.has_keyword(d, Keyword::Bodyguard));
    }

    let mut result = Vec::new();
    for (attacker, defender) in iproduct!(&attackers, &defenders) {
        if graph.has_keyword(defender, Keyword::Evasive)
            && !graph.has_keyword(attacker, Keyword::Evasive)
            && !graph.has_keyword(attacker, Keyword::Alert)
        {
            continue;
        }
        result.push(ProposedAction::new(
            attacker.clone(),
            defender.clone(),
            ActionType::CanChallenge,
            format!("challenge:{attacker}->{defender}"),
        ));
    }
    Ok(result)
}

/// Exerts the attacker and trades damage simultaneously: each character
/// marks damage equal to the other's strength. Lethal damage is resolved by
/// the state-based effects pass that follows every action.
pub fn execute(state: &mut GameState, attacker: &str, defender: &str) -> Outcome {
    let card = state
        .graph
        .card_mut(attacker)
        .with_error(|| format!("No card node: {attacker}"))?;
    card.exerted = true;
    let attacker_strength = card_queries::strength(&state.graph, attacker)?;
    let defender_strength = card_queries::strength(&state.graph, defender)?;
    cards::damage_card(state, defender, attacker_strength)?;
    cards::damage_card(state, attacker, defender_strength)
}

#[cfg(test)]
mod tests {
    use data::core::primitives::PlayerName;

    use super::*;
    use crate::testing;
    use crate::testing::CardSpec;

    fn exerted() -> CardSpec {
        CardSpec { exerted: true, ..CardSpec::default() }
    }

    #[test]
    fn challenges_exerted_opposing_characters() {
        let mut state = testing::minimal_game();
        let attacker =
            testing::add_card(&mut state, PlayerName::One, "stitch_rock_star", CardSpec::default());
        let target =
            testing::add_card(&mut state, PlayerName::Two, "stitch_new_dog", exerted());
        testing::add_card(&mut state, PlayerName::Two, "mickey_mouse_true_friend", CardSpec::default());
        let actions = enumerate(&state.graph).unwrap();
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].src, attacker);
        assert_eq!(actions[0].dst, target);
    }

    #[test]
    fn drying_attackers_need_rush() {
        let mut state = testing::minimal_game();
        testing::set_turn(&mut state, 3);
        testing::add_card(
            &mut state,
            PlayerName::One,
            "stitch_rock_star",
            CardSpec { entered_play: Some(3), ..CardSpec::default() },
        );
        let rusher = testing::add_card(
            &mut state,
            PlayerName::One,
            "cerberus_three_headed_dog",
            CardSpec { entered_play: Some(3), ..CardSpec::default() },
        );
        testing::add_card(&mut state, PlayerName::Two, "stitch_new_dog", exerted());
        let actions = enumerate(&state.graph).unwrap();
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].src, rusher);
    }

    #[test]
    fn evasive_gate_blocks_plain_attackers() {
        let mut state = testing::minimal_game();
        testing::add_card(&mut state, PlayerName::One, "stitch_rock_star", CardSpec::default());
        testing::add_card(&mut state, PlayerName::Two, "peter_pan_never_landing", exerted());
        assert!(enumerate(&state.graph).unwrap().is_empty());

        let evasive_attacker = testing::add_card(
            &mut state,
            PlayerName::One,
            "mickey_mouse_brave_little_tailor",
            CardSpec::default(),
        );
        let actions = enumerate(&state.graph).unwrap();
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].src, evasive_attacker);
    }

    #[test]
    fn alert_attackers_pass_the_evasive_gate() {
        let mut state = testing::minimal_game();
        let alert =
            testing::add_card(&mut state, PlayerName::One, "maximus_palace_horse", CardSpec::default());
        let evasive =
            testing::add_card(&mut state, PlayerName::Two, "peter_pan_never_landing", exerted());
        let actions = enumerate(&state.graph).unwrap();
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].src, alert);
        assert_eq!(actions[0].dst, evasive);
    }

    #[test]
    fn exerted_bodyguard_forces_targeting() {
        let mut state = testing::minimal_game();
        testing::add_card(&mut state, PlayerName::One, "stitch_rock_star", CardSpec::default());
        let bodyguard =
            testing::add_card(&mut state, PlayerName::Two, "simba_protective_cub", exerted());
        let plain = testing::add_card(&mut state, PlayerName::Two, "stitch_new_dog", exerted());

        let actions = enumerate(&state.graph).unwrap();
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].dst, bodyguard);

        // A ready Bodyguard is not a legal target and stops restricting
        state.graph.card_mut(&bodyguard).unwrap().exerted = false;
        let actions = enumerate(&state.graph).unwrap();
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].dst, plain);
    }

    #[test]
    fn execute_trades_damage_and_exerts_attacker() {
        let mut state = testing::minimal_game();
        let attacker =
            testing::add_card(&mut state, PlayerName::One, "stitch_rock_star", CardSpec::default());
        let defender =
            testing::add_card(&mut state, PlayerName::Two, "moana_of_motunui", exerted());
        execute(&mut state, &attacker, &defender).unwrap();
        assert!(state.graph.card(&attacker).unwrap().exerted);
        // Stitch - Rock Star is 3 strength, Moana is 1
        assert_eq!(state.graph.card(&defender).unwrap().damage, 3);
        assert_eq!(state.graph.card(&attacker).unwrap().damage, 1);
    }

    #[test]
    fn zero_strength_characters_may_challenge() {
        let mut state = testing::minimal_game();
        testing::add_card(
            &mut state,
            PlayerName::One,
            "pascal_rapunzel's_companion",
            CardSpec::default(),
        );
        testing::add_card(&mut state, PlayerName::Two, "stitch_new_dog", exerted());
        assert_eq!(enumerate(&state.graph).unwrap().len(), 1);
    }
}
