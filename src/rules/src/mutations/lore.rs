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

use data::core::numerics::{LoreValue, WINNING_LORE};
use data::core::primitives::PlayerName;
use data::game_states::game_state::GameState;
use utils::outcome::{Outcome, OK};

/// Adds lore to a player's total and checks the win condition: reaching
/// [WINNING_LORE] ends the game immediately. The winner, once set, is never
/// overwritten.
pub fn add_lore(state: &mut GameState, player: PlayerName, amount: LoreValue) -> Outcome {
    let node = state.graph.player_mut(player);
    node.lore += amount;
    let lore = node.lore;
    let game = state.graph.game_mut();
    if lore >= WINNING_LORE && !game.game_over {
        game.game_over = true;
        game.winner = Some(player);
    }
    OK
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;

    #[test]
    fn lore_accumulates() {
        let mut state = testing::minimal_game();
        add_lore(&mut state, PlayerName::One, 3).unwrap();
        add_lore(&mut state, PlayerName::One, 2).unwrap();
        assert_eq!(state.graph.player(PlayerName::One).lore, 5);
        assert!(!state.is_game_over());
    }

    #[test]
    fn reaching_twenty_wins() {
        let mut state = testing::minimal_game();
        add_lore(&mut state, PlayerName::Two, 19).unwrap();
        assert!(!state.is_game_over());
        add_lore(&mut state, PlayerName::Two, 1).unwrap();
        assert!(state.is_game_over());
        assert_eq!(state.winner(), Some(PlayerName::Two));
    }
}
