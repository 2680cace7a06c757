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

//! DOT rendering of state graphs.
//!
//! The on-disk `game.dot` format is one statement per line with quoted
//! attribute values:
//!
//! ```text
//! digraph {
//! "game" [type="game", turn="3", game_over="0", winner=""];
//! "game" -> "p1" [label="current_turn"];
//! }
//! ```
//!
//! The parser accepts exactly this shape. It is not a general DOT reader;
//! it round-trips what [to_dot] writes.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use data::graph::edge::EdgeKind;
use data::graph::node::Node;
use data::graph::state_graph::StateGraph;
use utils::fail;
use utils::outcome::{Outcome, Value, OK};
use utils::with_error::WithError;

/// Renders a graph: nodes in id order, then edges in insertion order.
pub fn to_dot(graph: &StateGraph) -> String {
    let mut out = String::from("digraph {\n");
    for (id, node) in graph.nodes() {
        out.push_str(&format!("{} [{}];\n", quote(id), format_attrs(&node.attributes())));
    }
    for edge in graph.edges() {
        out.push_str(&format!(
            "{} -> {} [{}];\n",
            quote(&edge.src),
            quote(&edge.dst),
            format_attrs(&edge.kind.attributes())
        ));
    }
    out.push_str("}\n");
    out
}

/// Parses the output of [to_dot] back into a graph.
pub fn parse_dot(text: &str) -> Value<StateGraph> {
    let mut nodes: Vec<(String, BTreeMap<String, String>)> = Vec::new();
    let mut edges: Vec<(String, String, BTreeMap<String, String>)> = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with("digraph") || line == "}" {
            continue;
        }
        let mut scanner = Scanner::new(line);
        let id = scanner.quoted_string()?;
        scanner.skip_whitespace();
        if scanner.consume("->") {
            scanner.skip_whitespace();
            let dst = scanner.quoted_string()?;
            scanner.skip_whitespace();
            let attrs = scanner.attr_list()?;
            edges.push((id, dst, attrs));
        } else {
            let attrs = scanner.attr_list()?;
            nodes.push((id, attrs));
        }
    }

    let mut graph = StateGraph::empty();
    for (id, attrs) in nodes {
        let node = Node::from_attributes(&id, &attrs)?;
        graph.insert_node(id, node);
    }
    for (src, dst, attrs) in edges {
        let kind = EdgeKind::from_attributes(&src, &dst, &attrs)?;
        graph.add_edge(src, dst, kind);
    }
    Ok(graph)
}

/// Writes `game.dot`, creating parent directories.
pub fn save_dot(graph: &StateGraph, path: &Path) -> Outcome {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_error(|| format!("Error creating {}", parent.display()))?;
    }
    fs::write(path, to_dot(graph)).with_error(|| format!("Error writing {}", path.display()))?;
    OK
}

pub fn load_dot(path: &Path) -> Value<StateGraph> {
    let text =
        fs::read_to_string(path).with_error(|| format!("Error reading {}", path.display()))?;
    parse_dot(&text)
}

fn format_attrs(attrs: &[(&'static str, String)]) -> String {
    attrs
        .iter()
        .map(|(key, value)| format!("{key}={}", quote(value)))
        .collect::<Vec<_>>()
        .join(", ")
}

fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}

/// Minimal cursor over one DOT statement line.
struct Scanner<'a> {
    rest: &'a str,
}

impl<'a> Scanner<'a> {
    fn new(line: &'a str) -> Self {
        Self { rest: line }
    }

    fn skip_whitespace(&mut self) {
        self.rest = self.rest.trim_start();
    }

    fn consume(&mut self, token: &str) -> bool {
        match self.rest.strip_prefix(token) {
            Some(rest) => {
                self.rest = rest;
                true
            }
            None => false,
        }
    }

    /// Reads a `"quoted"` string, handling `\"` and `\\` escapes.
    fn quoted_string(&mut self) -> Value<String> {
        self.skip_whitespace();
        if !self.consume("\"") {
            fail!("Expected quoted string at: {}", self.rest);
        }
        let mut value = String::new();
        let mut chars = self.rest.char_indices();
        while let Some((index, ch)) = chars.next() {
            match ch {
                '\\' => match chars.next() {
                    Some((_, escaped)) => value.push(escaped),
                    None => fail!("Dangling escape in: {}", self.rest),
                },
                '"' => {
                    self.rest = &self.rest[index + 1..];
                    return Ok(value);
                }
                other => value.push(other),
            }
        }
        fail!("Unterminated quoted string in: {}", self.rest);
    }

    /// Reads an optional `[key="value", ...]` attribute list.
    fn attr_list(&mut self) -> Value<BTreeMap<String, String>> {
        let mut attrs = BTreeMap::new();
        self.skip_whitespace();
        if !self.consume("[") {
            return Ok(attrs);
        }
        loop {
            self.skip_whitespace();
            if self.consume("]") {
                break;
            }
            let key: String = self
                .rest
                .chars()
                .take_while(|c| c.is_ascii_alphanumeric() || *c == '_')
                .collect();
            if key.is_empty() {
                fail!("Expected attribute name at: {}", self.rest);
            }
            self.rest = &self.rest[key.len()..];
            self.skip_whitespace();
            if !self.consume("=") {
                fail!("Expected '=' at: {}", self.rest);
            }
            let value = self.quoted_string()?;
            attrs.insert(key, value);
            self.skip_whitespace();
            self.consume(",");
        }
        Ok(attrs)
    }
}
