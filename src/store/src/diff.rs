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

//! Semantic diff between two state graphs.
//!
//! Nodes are identified by id, edges by `(src, dst, label)` where an action
//! edge's label is its action type. Output is one operation per line:
//!
//! ```text
//! add node p1.elsa_snow_queen.a damage=0 entered_play=3 ...
//! remove node rush.t2.1
//! set node p1 ink_available=2
//! add edge evasive.t3.1 -> p1.elsa_snow_queen.a evasive
//! remove edge game -> step.p1.main current_step
//! set edge p1.x.a -> p1 can_quest action_id=2
//! ```

use std::collections::BTreeMap;

use data::graph::state_graph::StateGraph;

type Attrs = BTreeMap<String, String>;

/// Computes the operations transforming `old` into `new`. Returns an empty
/// list for identical graphs.
pub fn diff_graphs(old: &StateGraph, new: &StateGraph) -> Vec<String> {
    let mut lines = Vec::new();

    let old_nodes = node_map(old);
    let new_nodes = node_map(new);

    for (id, attrs) in &new_nodes {
        if !old_nodes.contains_key(id) {
            lines.push(format!("add node {id} {}", format_attrs(attrs)));
        }
    }
    for id in old_nodes.keys() {
        if !new_nodes.contains_key(id) {
            lines.push(format!("remove node {id}"));
        }
    }
    for (id, new_attrs) in &new_nodes {
        if let Some(old_attrs) = old_nodes.get(id) {
            let changed = diff_attrs(old_attrs, new_attrs);
            if !changed.is_empty() {
                lines.push(format!("set node {id} {changed}"));
            }
        }
    }

    let old_edges = edge_map(old);
    let new_edges = edge_map(new);

    for (key, attrs) in &new_edges {
        if !old_edges.contains_key(key) {
            let (src, dst, label) = key;
            let formatted = format_attrs(attrs);
            let suffix = if formatted.is_empty() { String::new() } else { format!(" {formatted}") };
            lines.push(format!("add edge {src} -> {dst} {label}{suffix}"));
        }
    }
    for (src, dst, label) in old_edges.keys() {
        if !new_edges.contains_key(&(src.clone(), dst.clone(), label.clone())) {
            lines.push(format!("remove edge {src} -> {dst} {label}"));
        }
    }
    for (key, new_attrs) in &new_edges {
        if let Some(old_attrs) = old_edges.get(key) {
            let changed = diff_attrs(old_attrs, new_attrs);
            if !changed.is_empty() {
                let (src, dst, label) = key;
                lines.push(format!("set edge {src} -> {dst} {label} {changed}"));
            }
        }
    }

    lines
}

fn node_map(graph: &StateGraph) -> BTreeMap<String, Attrs> {
    graph
        .nodes()
        .map(|(id, node)| {
            (id.clone(), node.attributes().into_iter().map(|(k, v)| (k.to_string(), v)).collect())
        })
        .collect()
}

/// Maps `(src, dst, label)` to edge attributes, excluding the label itself.
/// Parallel edges with the same label collapse to the last one, matching the
/// identity the diff works at.
fn edge_map(graph: &StateGraph) -> BTreeMap<(String, String, String), Attrs> {
    graph
        .edges()
        .map(|edge| {
            let attrs: Attrs = edge
                .kind
                .attributes()
                .into_iter()
                .filter(|(key, _)| *key != "label")
                .map(|(k, v)| (k.to_string(), v))
                .collect();
            ((edge.src.clone(), edge.dst.clone(), edge.kind.label().to_string()), attrs)
        })
        .collect()
}

fn format_attrs(attrs: &Attrs) -> String {
    attrs.iter().map(|(k, v)| format!("{k}={v}")).collect::<Vec<_>>().join(" ")
}

/// Changed attributes as `key=value` pairs with the new values; attributes
/// missing from `new` render as `None`.
fn diff_attrs(old: &Attrs, new: &Attrs) -> String {
    let mut changed = Vec::new();
    let keys: std::collections::BTreeSet<_> = old.keys().chain(new.keys()).collect();
    for key in keys {
        let old_value = old.get(key);
        let new_value = new.get(key);
        if old_value != new_value {
            match new_value {
                Some(value) => changed.push(format!("{key}={value}")),
                None => changed.push(format!("{key}=None")),
            }
        }
    }
    changed.join(" ")
}

#[cfg(test)]
mod tests {
    use data::core::primitives::{PlayerName, Zone};
    use data::graph::node::{CardNode, Node};

    use super::*;

    fn with_card(exerted: bool) -> StateGraph {
        let mut graph = StateGraph::new_game();
        graph.insert_node(
            "p1.moana_of_motunui.a".to_string(),
            Node::Card(CardNode {
                label: "moana_of_motunui".to_string(),
                zone: Zone::Play,
                exerted,
                damage: 0,
                entered_play: Some(0),
            }),
        );
        graph
    }

    #[test]
    fn identical_graphs_have_no_diff() {
        assert!(diff_graphs(&with_card(false), &with_card(false)).is_empty());
    }

    #[test]
    fn attribute_changes_are_reported() {
        let lines = diff_graphs(&with_card(false), &with_card(true));
        assert_eq!(lines, vec!["set node p1.moana_of_motunui.a exerted=1"]);
    }

    #[test]
    fn node_and_edge_additions_are_reported() {
        let old = StateGraph::new_game();
        let new = with_card(false);
        let lines = diff_graphs(&old, &new);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("add node p1.moana_of_motunui.a"));
        assert!(lines[0].contains("zone=play"));

        let mut with_lore = new.clone();
        with_lore.player_mut(PlayerName::One).lore = 5;
        with_lore.set_current_turn(PlayerName::Two);
        let lines = diff_graphs(&new, &with_lore);
        assert!(lines.contains(&"set node p1 lore=5".to_string()));
        assert!(lines.contains(&"add edge game -> p2 current_turn".to_string()));
        assert!(lines.contains(&"remove edge game -> p1 current_turn".to_string()));
    }
}
