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

use data::core::numerics::{LoreValue, Strength, Willpower};
use data::core::primitives::{CardType, Keyword};
use enumset::EnumSet;
use serde::{Deserialize, Serialize};

/// Bundled card data used when no external database path is configured.
pub static BUNDLED_CARDS: &str = include_str!("../assets/cards.json");

/// Top-level shape of a card database JSON file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardCatalog {
    pub cards: Vec<CardRecord>,
}

/// One printing of a card as it appears in the database file.
///
/// Non-character cards omit combat statistics; those fields default to zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardRecord {
    pub id: u64,

    /// Display name, e.g. `"Tinker Bell - Giant Fairy"`.
    pub full_name: String,

    #[serde(rename = "type")]
    pub card_type: CardType,

    #[serde(default)]
    pub cost: u64,

    /// Whether this card may be placed in the inkwell.
    #[serde(default)]
    pub inkwell: bool,

    #[serde(default)]
    pub strength: Strength,

    #[serde(default)]
    pub willpower: Willpower,

    #[serde(default)]
    pub lore: LoreValue,

    #[serde(default)]
    pub abilities: Vec<AbilityRecord>,
}

/// A printed ability. Only keyword abilities are meaningful to the engine;
/// entries without a recognized keyword are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbilityRecord {
    #[serde(default)]
    pub keyword: Option<String>,
}

impl CardRecord {
    /// True if this card's printed abilities include the keyword.
    pub fn has_keyword(&self, keyword: Keyword) -> bool {
        self.keywords().contains(keyword)
    }

    /// The set of recognized printed keywords on this card.
    pub fn keywords(&self) -> EnumSet<Keyword> {
        self.abilities
            .iter()
            .filter_map(|ability| ability.keyword.as_deref())
            .filter_map(Keyword::parse_printed)
            .collect()
    }

    pub fn is_character(&self) -> bool {
        self.card_type == CardType::Character
    }
}
