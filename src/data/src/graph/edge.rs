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

use crate::core::primitives::{ActionType, Keyword};

/// Payload of an action edge.
///
/// Action edges are recomputed after every state mutation; `action_id` is the
/// base-36 index of this edge in the deterministic sort of all enumerated
/// actions at the state.
#[derive(
    Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize,
)]
pub struct ActionData {
    pub action_type: ActionType,
    pub action_id: String,
    pub description: String,

    /// True for the Bodyguard "play exerted" variant of a play action.
    pub enters_exerted: bool,
}

/// The label of a directed edge in the state graph.
#[derive(
    Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize,
)]
pub enum EdgeKind {
    /// game → active player. Exactly one exists.
    CurrentTurn,

    /// game → current step node. Exactly one exists.
    CurrentStep,

    /// ability → the card in play that carries it.
    Source,

    /// ability → card; the card "has" the keyword while this edge lives.
    Keyword(Keyword),

    /// ability → card; blocks questing (created by Reckless).
    CantQuest,

    /// A legal action from the current state.
    Action(ActionData),
}

impl EdgeKind {
    /// Edge label as written to DOT output. Action edges use their action
    /// type as the label, matching the diff's edge identity.
    pub fn label(&self) -> &str {
        match self {
            EdgeKind::CurrentTurn => "current_turn",
            EdgeKind::CurrentStep => "current_step",
            EdgeKind::Source => "source",
            EdgeKind::Keyword(keyword) => keyword.label(),
            EdgeKind::CantQuest => "cant_quest",
            EdgeKind::Action(data) => data.action_type.as_str(),
        }
    }

    /// Flattens this edge label into `(key, value)` attribute pairs for the
    /// DOT serializer and the semantic diff.
    pub fn attributes(&self) -> Vec<(&'static str, String)> {
        match self {
            EdgeKind::Action(data) => {
                let mut attrs = vec![
                    ("action_type", data.action_type.as_str().to_string()),
                    ("action_id", data.action_id.clone()),
                    ("description", data.description.clone()),
                ];
                if data.enters_exerted {
                    attrs.push(("exerted", "true".to_string()));
                }
                attrs
            }
            other => vec![("label", other.label().to_string())],
        }
    }

    /// Inverse of [Self::attributes].
    pub fn from_attributes(
        src: &str,
        dst: &str,
        attrs: &BTreeMap<String, String>,
    ) -> Value<EdgeKind> {
        if let Some(action_type) = attrs.get("action_type") {
            let Some(action_type) = ActionType::parse(action_type) else {
                fail!("Edge {src} -> {dst} has unknown action_type: {action_type}");
            };
            return Ok(EdgeKind::Action(ActionData {
                action_type,
                action_id: attrs.get("action_id").cloned().unwrap_or_default(),
                description: attrs.get("description").cloned().unwrap_or_default(),
                enters_exerted: attrs.get("exerted").map(String::as_str) == Some("true"),
            }));
        }
        let Some(label) = attrs.get("label") else {
            fail!("Edge {src} -> {dst} has neither label nor action_type");
        };
        Ok(match label.as_str() {
            "current_turn" => EdgeKind::CurrentTurn,
            "current_step" => EdgeKind::CurrentStep,
            "source" => EdgeKind::Source,
            "cant_quest" => EdgeKind::CantQuest,
            other => match Keyword::parse_label(other) {
                Some(keyword) => EdgeKind::Keyword(keyword),
                None => fail!("Edge {src} -> {dst} has unknown label: {other}"),
            },
        })
    }
}

/// A directed, labeled edge. Parallel edges are allowed: an ability points at
/// its card with both a `source` edge and a keyword edge.
#[derive(
    Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize,
)]
pub struct Edge {
    pub src: String,
    pub dst: String,
    pub kind: EdgeKind,
}
