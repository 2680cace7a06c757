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

use std::fs;
use std::path::Path;

use data::graph::state_graph::StateGraph;
use utils::outcome::{Outcome, Value, OK};
use utils::with_error::WithError;

use crate::store::ActionSummary;

const ACTIONS_FILE: &str = "actions.txt";

/// Reads the action edges of a graph into presentation order: sorted by
/// `(action_type, src, dst)`, which is also ascending action-id order.
pub fn format_actions(graph: &StateGraph) -> Vec<ActionSummary> {
    let mut edges: Vec<_> = graph.action_edges().collect();
    edges.sort_by_key(|(src, dst, data)| {
        (data.action_type, src.to_string(), dst.to_string())
    });
    edges
        .into_iter()
        .map(|(_, _, data)| ActionSummary {
            id: data.action_id.clone(),
            description: data.description.clone(),
        })
        .collect()
}

/// Writes `actions.txt`: one `"{id}: {description}"` line per action.
pub fn write_actions_file(dir: &Path, actions: &[ActionSummary]) -> Outcome {
    fs::create_dir_all(dir).with_error(|| format!("Error creating {}", dir.display()))?;
    let mut text = String::new();
    for action in actions {
        text.push_str(&format!("{}: {}\n", action.id, action.description));
    }
    let path = dir.join(ACTIONS_FILE);
    fs::write(&path, text).with_error(|| format!("Error writing {}", path.display()))?;
    OK
}

/// Parses `actions.txt` back into summaries. A missing file is an empty
/// action list, not an error.
pub fn read_actions_file(dir: &Path) -> Value<Vec<ActionSummary>> {
    let path = dir.join(ACTIONS_FILE);
    if !path.exists() {
        return Ok(vec![]);
    }
    let text =
        fs::read_to_string(&path).with_error(|| format!("Error reading {}", path.display()))?;
    let mut actions = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some((id, description)) = line.split_once(':') {
            actions.push(ActionSummary {
                id: id.trim().to_string(),
                description: description.trim().to_string(),
            });
        }
    }
    Ok(actions)
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn writes_and_reads_actions() {
        let dir = TempDir::new().unwrap();
        let actions = vec![
            ActionSummary { id: "0".to_string(), description: "end".to_string() },
            ActionSummary {
                id: "1".to_string(),
                description: "quest:p1.moana_of_motunui.a".to_string(),
            },
        ];
        write_actions_file(dir.path(), &actions).unwrap();
        assert_eq!(read_actions_file(dir.path()).unwrap(), actions);
    }

    #[test]
    fn missing_file_reads_as_empty() {
        let dir = TempDir::new().unwrap();
        assert!(read_actions_file(dir.path()).unwrap().is_empty());
    }
}
