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
use data::core::primitives::Keyword;
use data::graph::edge::EdgeKind;
use data::graph::node::{AbilityNode, Node};
use data::graph::state_graph::{NodeId, StateGraph};
use oracle::card_json::CardRecord;

/// Creates ability nodes for every recognized printed keyword on a card
/// entering play. Keywords the engine does not implement are skipped.
pub fn create_printed_abilities(
    graph: &mut StateGraph,
    card_id: &str,
    record: &CardRecord,
    turn: TurnNumber,
) {
    for keyword in record.keywords() {
        create_ability(graph, card_id, keyword, turn);
    }
}

/// Creates one ability node with its `source` edge and keyword edge.
///
/// Reckless additionally writes a `cant_quest` edge; the quest enumeration
/// looks only at that edge, never at the keyword itself.
pub fn create_ability(
    graph: &mut StateGraph,
    card_id: &str,
    keyword: Keyword,
    turn: TurnNumber,
) -> NodeId {
    let ability_id = next_ability_id(graph, keyword, turn);
    graph.insert_node(ability_id.clone(), Node::Ability(AbilityNode));
    graph.add_edge(ability_id.clone(), card_id, EdgeKind::Source);
    graph.add_edge(ability_id.clone(), card_id, EdgeKind::Keyword(keyword));
    if keyword == Keyword::Reckless {
        graph.add_edge(ability_id.clone(), card_id, EdgeKind::CantQuest);
    }
    ability_id
}

/// Allocates `"{keyword}.t{turn}.{seq}"` with the smallest positive `seq`
/// not yet present in the graph.
fn next_ability_id(graph: &StateGraph, keyword: Keyword, turn: TurnNumber) -> NodeId {
    let mut seq = 1;
    loop {
        let id = format!("{}.t{turn}.{seq}", keyword.label());
        if !graph.contains_node(&id) {
            return id;
        }
        seq += 1;
    }
}
