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

use data::core::primitives::{PlayerName, StepPhase, Zone};
use data::game_states::game_state::GameState;
use utils::outcome::{Outcome, OK};

use crate::mutations::decks;
use crate::queries::players;

/// Advances the turn after the active player passes at their main step.
///
/// Primary entry point for the turn state machine. Runs
/// `end(P) → switch → ready(P') → set(P') → draw(P') → main(P')` as one
/// atomic block; `main` is the only phase that waits for input. The turn
/// number increments at the switch, so it counts half-turns.
pub fn advance_turn(state: &mut GameState) -> Outcome {
    let player = players::active_player(&state.graph)?;
    let next = player.opponent();

    state.graph.set_current_step(player, StepPhase::End);
    end_step(state, player)?;

    state.graph.set_current_turn(next);
    state.graph.game_mut().turn += 1;

    let mut phase = StepPhase::Ready;
    loop {
        state.graph.set_current_step(next, phase);
        match phase {
            StepPhase::Ready => ready_step(state, next)?,
            StepPhase::Set => set_step(state, next)?,
            StepPhase::Draw => draw_step(state, next)?,
            StepPhase::Main => break,
            StepPhase::End => {}
        }
        phase = enum_iterator::next(&phase).unwrap_or(StepPhase::Main);
    }
    OK
}

/// End-of-turn step. Reserved hook for end-of-turn triggers; nothing fires
/// here yet.
fn end_step(_state: &mut GameState, _player: PlayerName) -> Outcome {
    OK
}

/// Ready step: ready every card in the incoming player's play zone.
fn ready_step(state: &mut GameState, player: PlayerName) -> Outcome {
    for card_id in state.graph.cards_in_zone(player, Zone::Play) {
        if let Some(card) = state.graph.card_mut(&card_id) {
            card.exerted = false;
        }
    }
    OK
}

/// Set step: grant the turn's ink drop and refresh available ink.
fn set_step(state: &mut GameState, player: PlayerName) -> Outcome {
    let node = state.graph.player_mut(player);
    node.ink_drops = 1;
    node.ink_available = node.ink_total;
    OK
}

/// Draw step: draw one card.
///
/// The starting player skips their first draw. Drawing from an empty deck is
/// the deck-out loss: the opponent wins on the spot.
fn draw_step(state: &mut GameState, player: PlayerName) -> Outcome {
    if player == PlayerName::One && state.turn() == 1 {
        return OK;
    }
    if state.deck(player).is_empty() {
        let game = state.graph.game_mut();
        game.game_over = true;
        game.winner = Some(player.opponent());
        return OK;
    }
    decks::draw(state, player, 1)?;
    OK
}

#[cfg(test)]
mod tests {
    use data::core::primitives::Zone;

    use super::*;
    use crate::testing;
    use crate::testing::CardSpec;

    #[test]
    fn pass_switches_player_and_runs_automatic_steps() {
        let mut state = testing::minimal_game();
        state.deck2 = vec!["stitch_new_dog.a".to_string(), "stitch_new_dog.b".to_string()];
        let exhausted = testing::add_card(
            &mut state,
            PlayerName::Two,
            "moana_of_motunui",
            CardSpec { exerted: true, ..CardSpec::default() },
        );
        state.graph.player_mut(PlayerName::Two).ink_total = 3;

        advance_turn(&mut state).unwrap();

        assert_eq!(state.graph.active_player(), Some(PlayerName::Two));
        assert_eq!(state.turn(), 2);
        let (step_id, step) = state.graph.current_step().unwrap();
        assert_eq!(step_id, "step.p2.main");
        assert_eq!(step.step, StepPhase::Main);
        // ready step readied the exerted character
        assert!(!state.graph.card(&exhausted).unwrap().exerted);
        // set step refreshed ink
        let p2 = state.graph.player(PlayerName::Two);
        assert_eq!(p2.ink_drops, 1);
        assert_eq!(p2.ink_available, 3);
        // draw step drew one card
        assert_eq!(state.deck2.len(), 1);
        assert_eq!(state.graph.cards_in_zone(PlayerName::Two, Zone::Hand).len(), 1);
    }

    #[test]
    fn starting_player_skips_first_draw() {
        let mut state = testing::minimal_game();
        state.deck1 = vec!["stitch_new_dog.a".to_string()];
        state.deck2 = vec!["stitch_new_dog.a".to_string()];
        // p1 -> p2: turn becomes 2, p2 draws
        advance_turn(&mut state).unwrap();
        assert_eq!(state.deck2.len(), 0);
        // p2 -> p1: turn 3, p1 draws normally (the skip only covers turn 1)
        advance_turn(&mut state).unwrap();
        assert_eq!(state.deck1.len(), 0);
        assert!(!state.is_game_over());
    }

    #[test]
    fn deck_out_on_draw_loses_the_game() {
        let mut state = testing::minimal_game();
        state.deck2 = vec!["stitch_new_dog.a".to_string()];
        advance_turn(&mut state).unwrap();
        assert!(!state.is_game_over());
        advance_turn(&mut state).unwrap();
        // p1's deck is empty on their turn-3 draw step
        assert!(state.is_game_over());
        assert_eq!(state.winner(), Some(PlayerName::Two));
    }
}
