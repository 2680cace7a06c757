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

use serde::{Deserialize, Serialize};

use crate::core::numerics::TurnNumber;
use crate::core::primitives::PlayerName;
use crate::graph::state_graph::StateGraph;

/// This is the state of a single game at one point of one explored line: the
/// state graph plus both players' remaining decks.
///
/// Deck entries are card ids of the form `"{normalized_name}.{suffix}"`; a
/// card still in a deck has no graph node. Drawing pops from the front of the
/// deck and creates the node.
///
/// The whole state is a value: stores save and load deep copies, so mutating
/// a loaded state never affects a stored one.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub graph: StateGraph,

    /// Remaining cards in player one's deck, front of the list on top.
    pub deck1: Vec<String>,

    /// Remaining cards in player two's deck, front of the list on top.
    pub deck2: Vec<String>,
}

impl GameState {
    pub fn new(graph: StateGraph, deck1: Vec<String>, deck2: Vec<String>) -> Self {
        Self { graph, deck1, deck2 }
    }

    pub fn deck(&self, player: PlayerName) -> &Vec<String> {
        match player {
            PlayerName::One => &self.deck1,
            PlayerName::Two => &self.deck2,
        }
    }

    pub fn deck_mut(&mut self, player: PlayerName) -> &mut Vec<String> {
        match player {
            PlayerName::One => &mut self.deck1,
            PlayerName::Two => &mut self.deck2,
        }
    }

    pub fn turn(&self) -> TurnNumber {
        self.graph.game().turn
    }

    pub fn is_game_over(&self) -> bool {
        self.graph.game().game_over
    }

    pub fn winner(&self) -> Option<PlayerName> {
        self.graph.game().winner
    }
}
