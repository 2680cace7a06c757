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

//! Helpers for building minimal game states in tests.
//!
//! These are intentionally simple: tests exercise game logic, not full game
//! setup, so they splice card nodes directly into a fresh graph.

use data::core::numerics::{Damage, InkValue, TurnNumber};
use data::core::primitives::{PlayerName, Zone};
use data::game_states::game_state::GameState;
use data::graph::node::{CardNode, Node};
use data::graph::state_graph::{NodeId, StateGraph};
use oracle::card_database::card_db;

use crate::mutations::abilities;

/// A fresh game with empty decks: turn 1, player one active at their main
/// step, no cards anywhere.
pub fn minimal_game() -> GameState {
    GameState::new(StateGraph::new_game(), vec![], vec![])
}

/// Placement options for [add_card].
#[derive(Debug, Clone)]
pub struct CardSpec {
    pub zone: Zone,
    pub exerted: bool,
    pub damage: Damage,

    /// Defaults to turn 0, i.e. dry from the start of the game.
    pub entered_play: Option<TurnNumber>,
}

impl Default for CardSpec {
    fn default() -> Self {
        Self { zone: Zone::Play, exerted: false, damage: 0, entered_play: Some(0) }
    }
}

/// Splices the `.a` copy of a card into the game for `player`.
///
/// Cards placed into the play zone get their printed ability nodes, exactly
/// as if they had been played. Panics on names missing from the card
/// database.
pub fn add_card(
    state: &mut GameState,
    player: PlayerName,
    name: &str,
    spec: CardSpec,
) -> NodeId {
    let record = card_db()
        .expect("Card database failed to load")
        .require(name)
        .expect("Test card missing from database");
    let node_id = format!("{}.{name}.a", player.node_id());
    state.graph.insert_node(
        node_id.clone(),
        Node::Card(CardNode {
            label: name.to_string(),
            zone: spec.zone,
            exerted: spec.exerted,
            damage: spec.damage,
            entered_play: spec.entered_play,
        }),
    );
    if spec.zone == Zone::Play {
        abilities::create_printed_abilities(
            &mut state.graph,
            &node_id,
            record,
            spec.entered_play.unwrap_or(0),
        );
    }
    node_id
}

/// Gives a player ink to spend.
pub fn give_ink(state: &mut GameState, player: PlayerName, amount: InkValue) {
    let node = state.graph.player_mut(player);
    node.ink_total = amount;
    node.ink_available = amount;
}

/// Sets the current turn number.
pub fn set_turn(state: &mut GameState, turn: TurnNumber) {
    state.graph.game_mut().turn = turn;
}
