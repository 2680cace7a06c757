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

use data::core::numerics::STARTING_HAND_SIZE;
use data::core::primitives::PlayerName;
use data::game_states::game_state::GameState;
use data::graph::state_graph::StateGraph;
use md5::{Digest, Md5};
use oracle::card_database::card_db;
use oracle::decklist;
use rand::seq::SliceRandom;
use rules::compute;
use rules::mutations::decks;
use store::dot;
use store::file_store::FileStore;
use store::store::StateStore;
use tracing::info;
use utils::outcome::Value;
use utils::with_error::WithError;
use utils::{fail, verify};

use crate::seed;

pub const DECK1_SOURCE: &str = "deck1.txt";
pub const DECK2_SOURCE: &str = "deck2.txt";

/// The matchup directory name: first four hex digits of the MD5 of both
/// decklists concatenated. A path fragment, not a content guarantee;
/// collisions are tolerated.
pub fn matchup_hash(deck1_text: &str, deck2_text: &str) -> String {
    let mut hasher = Md5::new();
    hasher.update(deck1_text.as_bytes());
    hasher.update(deck2_text.as_bytes());
    format!("{:x}", hasher.finalize())[..4].to_string()
}

/// Creates a matchup directory under `output_root` from two decklist files:
/// copies the decklists in and writes the pre-shuffle initial `game.dot`.
/// Returns the matchup hash.
pub fn init_game(deck1_path: &Path, deck2_path: &Path, output_root: &Path) -> Value<String> {
    let deck1_text = fs::read_to_string(deck1_path)
        .with_error(|| format!("Error reading {}", deck1_path.display()))?;
    let deck2_text = fs::read_to_string(deck2_path)
        .with_error(|| format!("Error reading {}", deck2_path.display()))?;

    // Preload the card database so bad data fails here, not mid-game
    card_db()?;

    let hash = matchup_hash(&deck1_text, &deck2_text);
    let matchdir = output_root.join(&hash);
    fs::create_dir_all(&matchdir)
        .with_error(|| format!("Error creating {}", matchdir.display()))?;
    info!(hash, "Creating matchup");

    fs::write(matchdir.join(DECK1_SOURCE), &deck1_text)
        .with_error(|| "Error copying deck1".to_string())?;
    fs::write(matchdir.join(DECK2_SOURCE), &deck2_text)
        .with_error(|| "Error copying deck2".to_string())?;

    let mut graph = StateGraph::new_game();
    compute::compute_all(&mut graph)?;
    dot::save_dot(&graph, &matchdir.join("game.dot"))?;

    Ok(hash)
}

/// Builds a shuffled deck from decklist text.
///
/// With `hand_indices`, the indices select the starting hand from the
/// decklist's distinct names (0-based, decklist order), consuming one unused
/// copy per index; the remaining cards are shuffled behind them. Without
/// indices the whole deck is shuffled. Both modes seed the RNG from
/// `shuffle_seed` alone.
pub fn build_shuffled_deck(
    deck_text: &str,
    shuffle_seed: &str,
    hand_indices: Option<&[usize]>,
) -> Value<Vec<String>> {
    let entries = decklist::parse(deck_text)?;
    let mut rng = seed::rng_for_seed(shuffle_seed);

    let Some(hand_indices) = hand_indices else {
        let mut deck: Vec<String> = entries.iter().flat_map(decklist::copy_ids).collect();
        deck.shuffle(&mut rng);
        return Ok(deck);
    };

    let mut copies: Vec<Vec<String>> = entries.iter().map(decklist::copy_ids).collect();
    let mut hand = Vec::new();
    for &index in hand_indices {
        verify!(
            index < entries.len(),
            "Hand index {index} out of range (deck has {} unique cards)",
            entries.len()
        );
        verify!(
            !copies[index].is_empty(),
            "Not enough copies of '{}' for hand",
            entries[index].name
        );
        hand.push(copies[index].remove(0));
    }
    let mut remaining: Vec<String> = copies.into_iter().flatten().collect();
    remaining.shuffle(&mut rng);
    hand.extend(remaining);
    Ok(hand)
}

/// Shuffles both decks for `seed` and draws the starting hands, saving the
/// result under `<matchdir>/<seed>`. Returns the seed for display.
pub fn shuffle_and_draw(store: &mut FileStore, matchdir: &str, seed_str: &str) -> Value<String> {
    let parent = store.load_state(matchdir)?;

    let deck1_text = fs::read_to_string(Path::new(matchdir).join(DECK1_SOURCE))
        .with_error(|| format!("Error reading {DECK1_SOURCE} in {matchdir}"))?;
    let deck2_text = fs::read_to_string(Path::new(matchdir).join(DECK2_SOURCE))
        .with_error(|| format!("Error reading {DECK2_SOURCE} in {matchdir}"))?;

    let (deck1, deck2) = if seed_str.contains('.') {
        let Some(spec) = seed::parse_hand_spec(seed_str) else {
            fail!("Invalid hand-spec seed format: {seed_str}");
        };
        (
            build_shuffled_deck(&deck1_text, seed_str, Some(&spec.p1_hand))?,
            build_shuffled_deck(&deck2_text, seed_str, Some(&spec.p2_hand))?,
        )
    } else {
        (
            build_shuffled_deck(&deck1_text, &format!("{seed_str}_p1"), None)?,
            build_shuffled_deck(&deck2_text, &format!("{seed_str}_p2"), None)?,
        )
    };

    let mut state = GameState::new(parent.graph, deck1, deck2);
    decks::draw(&mut state, PlayerName::One, STARTING_HAND_SIZE)?;
    decks::draw(&mut state, PlayerName::Two, STARTING_HAND_SIZE)?;
    compute::compute_all(&mut state.graph)?;

    let seed_key = Path::new(matchdir).join(seed_str);
    store.save_state(&state, &seed_key.to_string_lossy(), true, Some("initial"))?;
    Ok(seed_str.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const DECK: &str = "\
2 Stitch - New Dog
1 Simba - Protective Cub
2 Moana - Of Motunui
1 Fire the Cannons!
";

    #[test]
    fn matchup_hash_is_four_hex_chars() {
        let hash = matchup_hash("deck one", "deck two");
        assert_eq!(hash.len(), 4);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(hash, matchup_hash("deck one", "deck two"));
        assert_ne!(hash, matchup_hash("deck one", "deck three"));
    }

    #[test]
    fn simple_shuffles_are_deterministic_permutations() {
        let first = build_shuffled_deck(DECK, "seed_p1", None).unwrap();
        let second = build_shuffled_deck(DECK, "seed_p1", None).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 6);

        let mut sorted = first.clone();
        sorted.sort();
        let mut expected = decklist::build_deck(DECK).unwrap();
        expected.sort();
        assert_eq!(sorted, expected);
    }

    #[test]
    fn hand_spec_picks_copies_in_order() {
        // Indices into distinct names: 0 = Stitch, 1 = Simba, 2 = Moana
        let deck = build_shuffled_deck(DECK, "0102200.ab", Some(&[0, 1, 0, 2, 2])).unwrap();
        assert_eq!(
            &deck[..5],
            &[
                "stitch_new_dog.a",
                "simba_protective_cub.a",
                "stitch_new_dog.b",
                "moana_of_motunui.a",
                "moana_of_motunui.b"
            ]
        );
        assert_eq!(deck.len(), 6);
        assert_eq!(deck[5], "fire_the_cannons!.a");
    }

    #[test]
    fn hand_spec_failures_are_errors() {
        // Index past the distinct-name list
        assert!(build_shuffled_deck(DECK, "s", Some(&[9])).is_err());
        // Third copy of a two-copy card
        assert!(build_shuffled_deck(DECK, "s", Some(&[0, 0, 0])).is_err());
    }
}
