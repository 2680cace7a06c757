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

use crate::core::primitives::{Keyword, PlayerName, StepPhase, Zone};
use crate::graph::edge::{ActionData, Edge, EdgeKind};
use crate::graph::node::{CardNode, GameNode, Node, PlayerNode, StepNode};

/// Graph node identifier, e.g. `"game"`, `"p1"`, `"p1.elsa_snow_queen.a"`,
/// `"step.p2.main"`, `"rush.t3.1"`.
pub type NodeId = String;

/// Id of the singleton game node.
pub const GAME_NODE: &str = "game";

/// Typed attributed multigraph holding one game state.
///
/// Nodes live in a [BTreeMap] so that iteration order, and therefore DOT
/// output, diffs, and action enumeration, is deterministic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateGraph {
    nodes: BTreeMap<NodeId, Node>,
    edges: Vec<Edge>,
}

impl StateGraph {
    /// An empty graph, used when reconstructing a state from external data.
    pub fn empty() -> Self {
        Self { nodes: BTreeMap::new(), edges: Vec::new() }
    }

    /// The canonical pre-shuffle initial state: turn 1, player one active at
    /// their main step, empty inkwells, no cards anywhere.
    ///
    /// The two main-step nodes created here are never removed; the remaining
    /// step nodes are created on demand by the turn state machine.
    pub fn new_game() -> Self {
        let mut graph = Self::empty();
        graph.insert_node(
            GAME_NODE.to_string(),
            Node::Game(GameNode { turn: 1, game_over: false, winner: None }),
        );
        for player in [PlayerName::One, PlayerName::Two] {
            graph.insert_node(
                player.node_id().to_string(),
                Node::Player(PlayerNode {
                    lore: 0,
                    ink_drops: 1,
                    ink_total: 0,
                    ink_available: 0,
                }),
            );
            graph.insert_node(
                Self::step_node_id(player, StepPhase::Main),
                Node::Step(StepNode { player, step: StepPhase::Main }),
            );
        }
        graph.set_current_turn(PlayerName::One);
        graph.set_current_step(PlayerName::One, StepPhase::Main);
        graph
    }

    pub fn step_node_id(player: PlayerName, phase: StepPhase) -> NodeId {
        format!("step.{}.{}", player.node_id(), phase.as_str())
    }

    /// The player owning a card node, parsed from its `"p1."` / `"p2."` id
    /// prefix.
    pub fn card_owner(card_id: &str) -> Option<PlayerName> {
        PlayerName::parse(card_id.split('.').next()?)
    }

    // ========== Nodes ==========

    pub fn insert_node(&mut self, id: NodeId, node: Node) {
        self.nodes.insert(id, node);
    }

    /// Removes a node together with all edges incident to it.
    pub fn remove_node(&mut self, id: &str) {
        self.nodes.remove(id);
        self.edges.retain(|edge| edge.src != id && edge.dst != id);
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Iterator over all nodes in id order.
    pub fn nodes(&self) -> impl Iterator<Item = (&NodeId, &Node)> {
        self.nodes.iter()
    }

    /// Looks up the game node.
    ///
    /// Panics if the graph has no game node.
    pub fn game(&self) -> &GameNode {
        match self.nodes.get(GAME_NODE) {
            Some(Node::Game(game)) => game,
            _ => panic!("Graph has no game node"),
        }
    }

    /// Mutable equivalent of [Self::game]
    pub fn game_mut(&mut self) -> &mut GameNode {
        match self.nodes.get_mut(GAME_NODE) {
            Some(Node::Game(game)) => game,
            _ => panic!("Graph has no game node"),
        }
    }

    /// Looks up the state for a player.
    ///
    /// Panics if the player node does not exist.
    pub fn player(&self, name: PlayerName) -> &PlayerNode {
        match self.nodes.get(name.node_id()) {
            Some(Node::Player(player)) => player,
            _ => panic!("Graph has no node for {:?}", name),
        }
    }

    /// Mutable equivalent of [Self::player]
    pub fn player_mut(&mut self, name: PlayerName) -> &mut PlayerNode {
        match self.nodes.get_mut(name.node_id()) {
            Some(Node::Player(player)) => player,
            _ => panic!("Graph has no node for {:?}", name),
        }
    }

    pub fn card(&self, id: &str) -> Option<&CardNode> {
        match self.nodes.get(id) {
            Some(Node::Card(card)) => Some(card),
            _ => None,
        }
    }

    pub fn card_mut(&mut self, id: &str) -> Option<&mut CardNode> {
        match self.nodes.get_mut(id) {
            Some(Node::Card(card)) => Some(card),
            _ => None,
        }
    }

    /// Iterator over all card nodes in id order.
    pub fn cards(&self) -> impl Iterator<Item = (&NodeId, &CardNode)> {
        self.nodes.iter().filter_map(|(id, node)| match node {
            Node::Card(card) => Some((id, card)),
            _ => None,
        })
    }

    /// Ids of all of `player`'s cards currently in `zone`, in id order.
    pub fn cards_in_zone(&self, player: PlayerName, zone: Zone) -> Vec<NodeId> {
        self.cards()
            .filter(|(id, card)| {
                card.zone == zone && Self::card_owner(id) == Some(player)
            })
            .map(|(id, _)| id.clone())
            .collect()
    }

    // ========== Edges ==========

    pub fn add_edge(&mut self, src: impl Into<NodeId>, dst: impl Into<NodeId>, kind: EdgeKind) {
        self.edges.push(Edge { src: src.into(), dst: dst.into(), kind });
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    /// The player targeted by the `current_turn` edge.
    pub fn active_player(&self) -> Option<PlayerName> {
        self.edges.iter().find_map(|edge| match edge.kind {
            EdgeKind::CurrentTurn => PlayerName::parse(&edge.dst),
            _ => None,
        })
    }

    /// The step node targeted by the `current_step` edge.
    pub fn current_step(&self) -> Option<(&str, &StepNode)> {
        self.edges.iter().find_map(|edge| match edge.kind {
            EdgeKind::CurrentStep => match self.nodes.get(&edge.dst) {
                Some(Node::Step(step)) => Some((edge.dst.as_str(), step)),
                _ => None,
            },
            _ => None,
        })
    }

    /// Retargets the `current_turn` edge at `player`.
    pub fn set_current_turn(&mut self, player: PlayerName) {
        self.edges.retain(|edge| edge.kind != EdgeKind::CurrentTurn);
        self.add_edge(GAME_NODE, player.node_id(), EdgeKind::CurrentTurn);
    }

    /// Retargets the `current_step` edge at the step node for `player` and
    /// `phase`, creating that node if it does not exist yet.
    pub fn set_current_step(&mut self, player: PlayerName, phase: StepPhase) {
        let step_id = Self::step_node_id(player, phase);
        if !self.nodes.contains_key(&step_id) {
            self.insert_node(step_id.clone(), Node::Step(StepNode { player, step: phase }));
        }
        self.edges.retain(|edge| edge.kind != EdgeKind::CurrentStep);
        self.add_edge(GAME_NODE, step_id, EdgeKind::CurrentStep);
    }

    /// True if any live keyword edge with this label points at the card.
    pub fn has_keyword(&self, card_id: &str, keyword: Keyword) -> bool {
        self.edges
            .iter()
            .any(|edge| edge.dst == card_id && edge.kind == EdgeKind::Keyword(keyword))
    }

    /// True if any `cant_quest` edge points at the card.
    pub fn has_cant_quest(&self, card_id: &str) -> bool {
        self.edges.iter().any(|edge| edge.dst == card_id && edge.kind == EdgeKind::CantQuest)
    }

    /// Ids of all ability nodes whose `source` edge points at this card.
    pub fn abilities_sourced_by(&self, card_id: &str) -> Vec<NodeId> {
        self.edges
            .iter()
            .filter(|edge| edge.dst == card_id && edge.kind == EdgeKind::Source)
            .map(|edge| edge.src.clone())
            .collect()
    }

    // ========== Action edges ==========

    /// Removes every edge carrying an action payload.
    pub fn clear_action_edges(&mut self) {
        self.edges.retain(|edge| !matches!(edge.kind, EdgeKind::Action(_)));
    }

    /// Iterator over `(src, dst, data)` for all action edges, in insertion
    /// order (which is the deterministic enumeration order).
    pub fn action_edges(&self) -> impl Iterator<Item = (&str, &str, &ActionData)> {
        self.edges.iter().filter_map(|edge| match &edge.kind {
            EdgeKind::Action(data) => Some((edge.src.as_str(), edge.dst.as_str(), data)),
            _ => None,
        })
    }

    /// Finds the action edge carrying the given base-36 id.
    pub fn find_action(&self, action_id: &str) -> Option<(&str, &str, &ActionData)> {
        self.action_edges().find(|(_, _, data)| data.action_id == action_id)
    }
}

impl PartialEq for StateGraph {
    /// Semantic equality: node maps must match and edges must match as
    /// multisets (edge insertion order is not significant).
    fn eq(&self, other: &Self) -> bool {
        if self.nodes != other.nodes {
            return false;
        }
        let mut ours = self.edges.clone();
        let mut theirs = other.edges.clone();
        ours.sort();
        theirs.sort();
        ours == theirs
    }
}

impl Eq for StateGraph {}
