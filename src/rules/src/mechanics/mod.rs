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

use data::core::primitives::ActionType;
use data::graph::state_graph::NodeId;

pub mod challenge;
pub mod ink;
pub mod play;
pub mod quest;
pub mod turn;

/// A legal action produced by a mechanic's enumeration, before the action
/// compute pass has sorted it and assigned its base-36 id.
///
/// Enumeration functions are pure over the graph, emit nothing once the game
/// is over, and always enumerate from the active player's perspective.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ProposedAction {
    pub src: NodeId,
    pub dst: NodeId,
    pub action_type: ActionType,
    pub description: String,

    /// Bodyguard "play exerted" variant marker.
    pub enters_exerted: bool,
}

impl ProposedAction {
    pub fn new(
        src: impl Into<NodeId>,
        dst: impl Into<NodeId>,
        action_type: ActionType,
        description: impl Into<String>,
    ) -> Self {
        Self {
            src: src.into(),
            dst: dst.into(),
            action_type,
            description: description.into(),
            enters_exerted: false,
        }
    }
}
