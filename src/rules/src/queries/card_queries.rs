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

use data::core::numerics::{LoreValue, Strength, TurnNumber, Willpower};
use data::graph::node::CardNode;
use data::graph::state_graph::StateGraph;
use oracle::card_database::card_db;
use oracle::card_json::CardRecord;
use utils::outcome::Value;
use utils::with_error::WithError;

/// Returns the card database record for a card node, failing fast if either
/// the node or its label is unknown.
pub fn record(graph: &StateGraph, card_id: &str) -> Value<&'static CardRecord> {
    let card = graph.card(card_id).with_error(|| format!("No card node: {card_id}"))?;
    card_db()?.require(&card.label)
}

/// Effective strength of a character. Currently the printed value; granted
/// modifiers will stack here once effects can change statistics.
pub fn strength(graph: &StateGraph, card_id: &str) -> Value<Strength> {
    Ok(record(graph, card_id)?.strength)
}

/// Effective willpower of a character, see [strength].
pub fn willpower(graph: &StateGraph, card_id: &str) -> Value<Willpower> {
    Ok(record(graph, card_id)?.willpower)
}

/// Lore this character earns when questing.
pub fn lore_value(graph: &StateGraph, card_id: &str) -> Value<LoreValue> {
    Ok(record(graph, card_id)?.lore)
}

/// A character is *dry* once it has been in play since before the current
/// turn. Characters that have never entered play count as dry.
pub fn is_dry(card: &CardNode, turn: TurnNumber) -> bool {
    card.entered_play.map_or(true, |entered| entered < turn)
}
