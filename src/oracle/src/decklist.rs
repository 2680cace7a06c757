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

use once_cell::sync::Lazy;
use regex::Regex;
use utils::outcome::Value;
use utils::verify;

use crate::card_database::normalize_card_name;

/// One `"{count} {name}"` line of a decklist file.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct DecklistEntry {
    pub count: u32,
    pub name: String,
}

static DECKLIST_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)\s+(.+)$").expect("Invalid decklist regex"));

/// Parses decklist text. Blank lines and lines not matching the
/// `"{count} {name}"` shape are skipped.
pub fn parse(text: &str) -> Value<Vec<DecklistEntry>> {
    let mut entries = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(captures) = DECKLIST_LINE.captures(line) {
            let count: u32 = captures[1].parse().expect("Digits always parse");
            verify!(count > 0 && count <= 26, "Bad card count in decklist line: {line}");
            entries.push(DecklistEntry { count, name: captures[2].trim().to_string() });
        }
    }
    Ok(entries)
}

/// The copy ids for one decklist entry: `"{normalized_name}.a"`,
/// `"{normalized_name}.b"`, …
pub fn copy_ids(entry: &DecklistEntry) -> Vec<String> {
    let base = normalize_card_name(&entry.name);
    (0..entry.count).map(|i| format!("{base}.{}", (b'a' + i as u8) as char)).collect()
}

/// Builds the unshuffled deck: all copies, in decklist order.
pub fn build_deck(text: &str) -> Value<Vec<String>> {
    Ok(parse(text)?.iter().flat_map(copy_ids).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_expands_copies() {
        let deck = build_deck("2 Stitch - New Dog\n\n1 Be Prepared\n").unwrap();
        assert_eq!(deck, vec!["stitch_new_dog.a", "stitch_new_dog.b", "be_prepared.a"]);
    }

    #[test]
    fn skips_unparseable_lines() {
        let deck = build_deck("# sideboard\n3 Dinglehopper\n").unwrap();
        assert_eq!(deck, vec!["dinglehopper.a", "dinglehopper.b", "dinglehopper.c"]);
    }

    #[test]
    fn rejects_zero_counts() {
        assert!(build_deck("0 Dinglehopper").is_err());
    }
}
