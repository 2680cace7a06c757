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

use data::core::numerics::LoreValue;
use data::core::primitives::PlayerName;
use data::game_states::game_state::GameState;
use serde::{Deserialize, Serialize};

/// The result of one finished game, recorded at its terminal state.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct OutcomeRecord {
    pub winner: Option<PlayerName>,
    pub p1_lore: LoreValue,
    pub p2_lore: LoreValue,
}

impl OutcomeRecord {
    pub fn from_state(state: &GameState) -> Self {
        Self {
            winner: state.winner(),
            p1_lore: state.graph.player(PlayerName::One).lore,
            p2_lore: state.graph.player(PlayerName::Two).lore,
        }
    }

    /// `"{key}: {value}"` lines for `outcome.txt`.
    pub fn to_lines(&self) -> String {
        let winner = self.winner.map(|p| p.node_id()).unwrap_or("");
        format!(
            "winner: {winner}\np1_lore: {}\np2_lore: {}\n",
            self.p1_lore, self.p2_lore
        )
    }
}

/// Win tally for one outgoing action of a state.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct WinCounts {
    pub p1_wins: u64,
    pub p2_wins: u64,
}

/// Aggregated outcomes at an interior state: per-action win counts plus the
/// full suffix of every win recorded through this state.
///
/// Serialized verbatim as `outcomes.json`.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct OutcomeSummary {
    pub outcomes: BTreeMap<String, WinCounts>,
    pub p1_wins: Vec<String>,
    pub p2_wins: Vec<String>,
}

impl OutcomeSummary {
    /// Folds one terminal result into this summary. `suffix` is the non-empty
    /// action-id path from this state down to the terminal state; the win is
    /// credited to its first action, and the concatenated suffix string is
    /// appended to the winner's list.
    pub fn record(&mut self, suffix: &[String], winner: Option<PlayerName>) {
        let Some(first) = suffix.first() else {
            return;
        };
        let counts = self.outcomes.entry(first.clone()).or_default();
        let joined = suffix.concat();
        match winner {
            Some(PlayerName::One) => {
                counts.p1_wins += 1;
                self.p1_wins.push(joined);
            }
            Some(PlayerName::Two) => {
                counts.p2_wins += 1;
                self.p2_wins.push(joined);
            }
            None => {}
        }
    }
}
