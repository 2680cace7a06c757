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

use data::core::numerics::TurnNumber;
use data::core::primitives::PlayerName;
use data::graph::state_graph::StateGraph;
use utils::outcome::Value;
use utils::with_error::WithError;

/// Common context read at the start of every enumeration: whose turn it is,
/// who their opponent is, and the turn number.
#[derive(Debug, Clone, Copy)]
pub struct TurnContext {
    pub player: PlayerName,
    pub opponent: PlayerName,
    pub turn: TurnNumber,
}

/// Returns the name of the player targeted by the `current_turn` edge.
pub fn active_player(graph: &StateGraph) -> Value<PlayerName> {
    graph.active_player().with_error(|| "Graph has no current_turn edge".to_string())
}

pub fn turn_context(graph: &StateGraph) -> Value<TurnContext> {
    let player = active_player(graph)?;
    Ok(TurnContext { player, opponent: player.opponent(), turn: graph.game().turn })
}
