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

use std::collections::HashMap;
use std::{env, fs};

use color_eyre::Result;
use once_cell::sync::Lazy;
use utils::fail;
use utils::outcome::Value;
use utils::with_error::WithError;

use crate::card_json;
use crate::card_json::{CardCatalog, CardRecord};

/// Environment variable naming a JSON file to load instead of the bundled
/// card data.
pub const CARDS_JSON_ENV: &str = "GLIMMER_CARDS_JSON";

/// Read-only mapping from normalized card name to card record.
///
/// Process-wide immutable after first load; see [card_db].
#[derive(Debug, Clone)]
pub struct CardDatabase {
    cards: HashMap<String, CardRecord>,
}

static CARDS: Lazy<Result<CardDatabase>> = Lazy::new(|| {
    match env::var(CARDS_JSON_ENV) {
        Ok(path) => CardDatabase::from_json(
            &fs::read_to_string(&path)
                .with_error(|| format!("Error reading card database at {path}"))?,
        ),
        Err(_) => CardDatabase::from_json(card_json::BUNDLED_CARDS),
    }
});

/// The lazily-initialized global card database.
pub fn card_db() -> Value<&'static CardDatabase> {
    match CARDS.as_ref() {
        Ok(db) => Ok(db),
        Err(e) => {
            fail!("Error loading card database: {e:?}");
        }
    }
}

impl CardDatabase {
    /// Builds a database from JSON text.
    ///
    /// Different printings of the same card may exist with different ids;
    /// the first printing of a normalized name wins, since statistics and
    /// abilities are identical across printings.
    pub fn from_json(text: &str) -> Result<CardDatabase> {
        let catalog: CardCatalog =
            serde_json::from_str(text).with_error(|| "Error parsing card json data".to_string())?;
        let mut cards = HashMap::new();
        for card in catalog.cards {
            cards.entry(normalize_card_name(&card.full_name)).or_insert(card);
        }
        Ok(CardDatabase { cards })
    }

    pub fn get(&self, normalized_name: &str) -> Option<&CardRecord> {
        self.cards.get(normalized_name)
    }

    /// Looks up a card, failing fast on unknown names.
    ///
    /// Decks and states referencing names outside the database are data
    /// corruption, not a game situation.
    pub fn require(&self, normalized_name: &str) -> Value<&CardRecord> {
        self.cards.get(normalized_name).with_error(|| format!("Unknown card: {normalized_name}"))
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// Converts `"Tinker Bell - Giant Fairy"` to `"tinker_bell_giant_fairy"`.
pub fn normalize_card_name(name: &str) -> String {
    name.to_lowercase().replace(" - ", "_").replace(' ', "_").replace('-', "_")
}

#[cfg(test)]
mod tests {
    use data::core::primitives::Keyword;

    use super::*;

    #[test]
    fn normalizes_names() {
        assert_eq!(normalize_card_name("Tinker Bell - Giant Fairy"), "tinker_bell_giant_fairy");
        assert_eq!(normalize_card_name("Fire the Cannons!"), "fire_the_cannons!");
        assert_eq!(normalize_card_name("Te-Kā"), "te_kā");
    }

    #[test]
    fn bundled_database_loads() {
        let db = card_db().unwrap();
        let simba = db.require("simba_protective_cub").unwrap();
        assert!(simba.has_keyword(Keyword::Bodyguard));
        assert!(simba.is_character());
    }

    #[test]
    fn unknown_card_fails() {
        let db = card_db().unwrap();
        assert!(db.require("no_such_card").is_err());
    }

    #[test]
    fn first_printing_wins() {
        let json = r#"{"cards": [
            {"id": 1, "fullName": "Elsa - Snow Queen", "type": "Character",
             "cost": 8, "strength": 4, "willpower": 6, "lore": 3},
            {"id": 2, "fullName": "Elsa - Snow Queen", "type": "Character",
             "cost": 1, "strength": 1, "willpower": 1, "lore": 1}
        ]}"#;
        let db = CardDatabase::from_json(json).unwrap();
        assert_eq!(db.require("elsa_snow_queen").unwrap().id, 1);
    }
}
