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

use data::graph::edge::{ActionData, EdgeKind};
use data::graph::state_graph::StateGraph;
use utils::outcome::{Outcome, OK};

use crate::mechanics::{challenge, ink, play, quest, turn, ProposedAction};

/// Recomputes all action edges from the current state.
///
/// Stale action edges are always cleared first; a finished game carries no
/// action edges at all. The surviving enumeration is sorted by
/// `(action_type, src, dst)` with a stable sort, so the two play variants of
/// a Bodyguard card keep their emission order, and the i-th edge receives
/// the base-36 id of `i`. Running this twice on the same state yields
/// identical edges, because the sort key is over stable node ids.
pub fn compute_all(graph: &mut StateGraph) -> Outcome {
    graph.clear_action_edges();
    if graph.game().game_over {
        return OK;
    }

    let mut proposed: Vec<ProposedAction> = Vec::new();
    proposed.extend(turn::enumerate(graph)?);
    proposed.extend(ink::enumerate(graph)?);
    proposed.extend(play::enumerate(graph)?);
    proposed.extend(quest::enumerate(graph)?);
    proposed.extend(challenge::enumerate(graph)?);

    proposed.sort_by(|a, b| {
        (a.action_type, &a.src, &a.dst).cmp(&(b.action_type, &b.src, &b.dst))
    });

    for (index, action) in proposed.into_iter().enumerate() {
        graph.add_edge(
            action.src,
            action.dst,
            EdgeKind::Action(ActionData {
                action_type: action.action_type,
                action_id: to_base36(index),
                description: action.description,
                enters_exerted: action.enters_exerted,
            }),
        );
    }
    OK
}

const BASE36_DIGITS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Lowercase base-36 rendering of an action index: `0..9`, `a..z`, `10`, …
pub fn to_base36(mut n: usize) -> String {
    if n == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while n > 0 {
        digits.push(BASE36_DIGITS[n % 36]);
        n /= 36;
    }
    digits.reverse();
    String::from_utf8(digits).expect("Base-36 digits are ASCII")
}

#[cfg(test)]
mod tests {
    use data::core::primitives::{ActionType, PlayerName, Zone};

    use super::*;
    use crate::testing;
    use crate::testing::CardSpec;

    #[test]
    fn base36_renders_compact_ids() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(9), "9");
        assert_eq!(to_base36(10), "a");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
        assert_eq!(to_base36(36 * 36 - 1), "zz");
    }

    #[test]
    fn actions_are_sorted_and_numbered() {
        let mut state = testing::minimal_game();
        testing::add_card(
            &mut state,
            PlayerName::One,
            "stitch_new_dog",
            CardSpec { zone: Zone::Hand, ..CardSpec::default() },
        );
        testing::add_card(&mut state, PlayerName::One, "moana_of_motunui", CardSpec::default());
        testing::give_ink(&mut state, PlayerName::One, 1);
        compute_all(&mut state.graph).unwrap();

        let actions: Vec<_> = state
            .graph
            .action_edges()
            .map(|(src, _, data)| (data.action_id.clone(), data.action_type, src.to_string()))
            .collect();
        // Lexicographic over action type names: can_ink < can_pass < can_play < can_quest
        assert_eq!(actions[0].1, ActionType::CanInk);
        assert_eq!(actions[1].1, ActionType::CanPass);
        assert_eq!(actions[2].1, ActionType::CanPlay);
        assert_eq!(actions[3].1, ActionType::CanQuest);
        let ids: Vec<_> = actions.iter().map(|(id, _, _)| id.as_str()).collect();
        assert_eq!(ids, vec!["0", "1", "2", "3"]);
    }

    #[test]
    fn recompute_is_idempotent() {
        let mut state = testing::minimal_game();
        testing::add_card(&mut state, PlayerName::One, "moana_of_motunui", CardSpec::default());
        compute_all(&mut state.graph).unwrap();
        let first = state.graph.clone();
        compute_all(&mut state.graph).unwrap();
        assert_eq!(first, state.graph);
    }

    #[test]
    fn finished_games_have_no_actions() {
        let mut state = testing::minimal_game();
        testing::add_card(&mut state, PlayerName::One, "moana_of_motunui", CardSpec::default());
        compute_all(&mut state.graph).unwrap();
        assert!(state.graph.action_edges().next().is_some());

        let game = state.graph.game_mut();
        game.game_over = true;
        game.winner = Some(PlayerName::One);
        compute_all(&mut state.graph).unwrap();
        assert!(state.graph.action_edges().next().is_none());
    }
}
