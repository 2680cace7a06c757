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

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utils::fail;
use utils::outcome::Value;

use crate::core::numerics::{Damage, InkValue, LoreValue, TurnNumber};
use crate::core::primitives::{NodeType, PlayerName, StepPhase, Zone};

/// The singleton `"game"` node.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameNode {
    /// Current turn number, starting at 1 and incrementing on every player
    /// switch.
    pub turn: TurnNumber,

    /// True once a player has won. Immutable afterwards, and no action edges
    /// may exist while this is set.
    pub game_over: bool,

    /// Winning player, set together with `game_over`.
    pub winner: Option<PlayerName>,
}

/// One of the `"p1"` / `"p2"` nodes.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlayerNode {
    pub lore: LoreValue,

    /// Inks remaining this turn, 0 or 1.
    pub ink_drops: InkValue,

    /// Cards in this player's inkwell.
    pub ink_total: InkValue,

    /// Unspent ink this turn. Always `<= ink_total`.
    pub ink_available: InkValue,
}

/// A card node, id `"{player}.{normalized_name}.{suffix}"`.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct CardNode {
    /// Normalized card name; key into the card database.
    pub label: String,

    pub zone: Zone,

    pub exerted: bool,

    pub damage: Damage,

    /// Turn number on which this card most recently entered play. None if it
    /// has never been in play.
    pub entered_play: Option<TurnNumber>,
}

/// A turn-phase node, id `"step.{player}.{phase}"`.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct StepNode {
    pub player: PlayerName,
    pub step: StepPhase,
}

/// An ability node, id `"{keyword}.t{turn}.{seq}"`.
///
/// An ability's meaning lives entirely in its outgoing edges: a `source` edge
/// to the card that carries it plus one keyword-labeled edge (and
/// `cant_quest` for Reckless). The node itself holds no attributes.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct AbilityNode;

/// A node in the state graph, tagged by [NodeType].
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum Node {
    Game(GameNode),
    Player(PlayerNode),
    Card(CardNode),
    Step(StepNode),
    Ability(AbilityNode),
}

impl Node {
    pub fn node_type(&self) -> NodeType {
        match self {
            Node::Game(_) => NodeType::Game,
            Node::Player(_) => NodeType::Player,
            Node::Card(_) => NodeType::Card,
            Node::Step(_) => NodeType::Step,
            Node::Ability(_) => NodeType::Ability,
        }
    }

    /// Flattens this node into `(key, value)` string attribute pairs,
    /// including its `type` tag. This is the canonical form used by the DOT
    /// serializer and the semantic diff.
    pub fn attributes(&self) -> Vec<(&'static str, String)> {
        let mut attrs = vec![("type", self.node_type().as_str().to_string())];
        match self {
            Node::Game(game) => {
                attrs.push(("turn", game.turn.to_string()));
                attrs.push(("game_over", bool_attr(game.game_over)));
                attrs.push(("winner", match game.winner {
                    Some(player) => player.node_id().to_string(),
                    None => String::new(),
                }));
            }
            Node::Player(player) => {
                attrs.push(("lore", player.lore.to_string()));
                attrs.push(("ink_drops", player.ink_drops.to_string()));
                attrs.push(("ink_total", player.ink_total.to_string()));
                attrs.push(("ink_available", player.ink_available.to_string()));
            }
            Node::Card(card) => {
                attrs.push(("label", card.label.clone()));
                attrs.push(("zone", card.zone.as_str().to_string()));
                attrs.push(("exerted", bool_attr(card.exerted)));
                attrs.push(("damage", card.damage.to_string()));
                attrs.push(("entered_play", match card.entered_play {
                    Some(turn) => turn.to_string(),
                    None => "-1".to_string(),
                }));
            }
            Node::Step(step) => {
                attrs.push(("player", step.player.node_id().to_string()));
                attrs.push(("step", step.step.as_str().to_string()));
            }
            Node::Ability(_) => {}
        }
        attrs
    }

    /// Inverse of [Self::attributes]. Missing numeric attributes default to
    /// zero; a missing or unknown `type` tag is an error.
    pub fn from_attributes(id: &str, attrs: &BTreeMap<String, String>) -> Value<Node> {
        let Some(node_type) = attrs.get("type").and_then(|t| NodeType::parse(t)) else {
            fail!("Node {id} has a missing or unknown type tag");
        };
        Ok(match node_type {
            NodeType::Game => Node::Game(GameNode {
                turn: int_attr(id, attrs, "turn")?,
                game_over: bool_attr_value(id, attrs, "game_over")?,
                winner: match attrs.get("winner").map(String::as_str) {
                    None | Some("") => None,
                    Some(value) => Some(
                        PlayerName::parse(value)
                            .ok_or_else(|| unknown_value(id, "winner", value))?,
                    ),
                },
            }),
            NodeType::Player => Node::Player(PlayerNode {
                lore: int_attr(id, attrs, "lore")?,
                ink_drops: int_attr(id, attrs, "ink_drops")?,
                ink_total: int_attr(id, attrs, "ink_total")?,
                ink_available: int_attr(id, attrs, "ink_available")?,
            }),
            NodeType::Card => {
                let Some(label) = attrs.get("label") else {
                    fail!("Card node {id} has no label");
                };
                let zone = match attrs.get("zone") {
                    Some(value) => Zone::parse(value)
                        .ok_or_else(|| unknown_value(id, "zone", value))?,
                    None => Zone::Unknown,
                };
                Node::Card(CardNode {
                    label: label.clone(),
                    zone,
                    exerted: bool_attr_value(id, attrs, "exerted")?,
                    damage: int_attr(id, attrs, "damage")?,
                    entered_play: match attrs.get("entered_play").map(String::as_str) {
                        None | Some("-1") => None,
                        Some(value) => Some(value.parse().map_err(|_| {
                            unknown_value(id, "entered_play", value)
                        })?),
                    },
                })
            }
            NodeType::Step => {
                let player = attrs.get("player").and_then(|p| PlayerName::parse(p));
                let step = attrs.get("step").and_then(|s| StepPhase::parse(s));
                let (Some(player), Some(step)) = (player, step) else {
                    fail!("Step node {id} has missing or unknown player/step attributes");
                };
                Node::Step(StepNode { player, step })
            }
            NodeType::Ability => Node::Ability(AbilityNode),
        })
    }
}

fn bool_attr(value: bool) -> String {
    if value { "1".to_string() } else { "0".to_string() }
}

fn int_attr(id: &str, attrs: &BTreeMap<String, String>, key: &str) -> Value<u64> {
    match attrs.get(key) {
        None => Ok(0),
        Some(value) => {
            Ok(value.parse().map_err(|_| unknown_value(id, key, value))?)
        }
    }
}

fn bool_attr_value(id: &str, attrs: &BTreeMap<String, String>, key: &str) -> Value<bool> {
    match attrs.get(key).map(String::as_str) {
        None | Some("0") => Ok(false),
        Some("1") => Ok(true),
        Some(value) => fail!("Node {id} has non-boolean {key}: {value}"),
    }
}

fn unknown_value(id: &str, key: &str, value: &str) -> color_eyre::Report {
    color_eyre::eyre::eyre!("Node {id} has unknown {key}: {value}")
}
